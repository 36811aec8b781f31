use crate::{AppStatus, StatusRegister, TrayIconState, tray_icon_state::tooltip_for};

/// WHAT: A fresh register reports listening, not recording, idle text
/// WHY: The app must come up ready for the hotkey with a truthful tooltip
#[test]
fn given_new_register_when_snapshotted_then_default_status() {
    let register = StatusRegister::new();
    let snapshot = register.snapshot();

    assert!(snapshot.listening_enabled);
    assert!(!snapshot.is_recording);
    assert_eq!(snapshot.status_text, "Idle - Listening");
}

/// WHAT: set_recording toggles the flag and the canonical text together
/// WHY: Icon and tooltip are derived from one snapshot; they must agree
#[test]
fn given_register_when_recording_toggled_then_text_and_flag_agree() {
    let register = StatusRegister::new();

    register.set_recording(true);
    let snapshot = register.snapshot();
    assert!(snapshot.is_recording);
    assert_eq!(snapshot.status_text, "Recording...");

    register.set_recording(false);
    let snapshot = register.snapshot();
    assert!(!snapshot.is_recording);
    assert_eq!(snapshot.status_text, "Processing...");
}

/// WHAT: set_listening rewrites the idle text to match the flag
/// WHY: The tray tooltip must say whether the hotkey is live
#[test]
fn given_register_when_listening_disabled_then_idle_text_updated() {
    let register = StatusRegister::new();

    register.set_listening(false);
    let snapshot = register.snapshot();
    assert!(!snapshot.listening_enabled);
    assert_eq!(snapshot.status_text, "Idle - Not Listening");

    register.set_listening(true);
    assert_eq!(register.snapshot().status_text, "Idle - Listening");
}

/// WHAT: update_status with None leaves the recording flag untouched
/// WHY: Status text changes mid-session must not flip the visual state
#[test]
fn given_recording_register_when_text_updated_then_flag_preserved() {
    let register = StatusRegister::new();
    register.set_recording(true);

    register.update_status("Recording...", None);

    assert!(register.snapshot().is_recording);
}

/// WHAT: Clones of the register observe each other's writes
/// WHY: Orchestrator and lifecycle share one underlying status
#[test]
fn given_cloned_register_when_one_writes_then_other_observes() {
    let register = StatusRegister::new();
    let clone = register.clone();

    register.update_status("Transcribing...", Some(false));

    assert_eq!(clone.snapshot().status_text, "Transcribing...");
}

fn status(listening: bool, recording: bool, text: &str) -> AppStatus {
    AppStatus {
        listening_enabled: listening,
        is_recording: recording,
        status_text: text.to_string(),
    }
}

/// WHAT: Each snapshot shape maps to its designated visual state
/// WHY: The icon is the only always-visible indicator; the mapping is
/// the contract between pipeline state and what the user sees
#[test]
fn given_status_snapshots_when_mapped_then_expected_visual_states() {
    assert_eq!(
        TrayIconState::from_status(&status(true, false, "Idle - Listening")),
        TrayIconState::Idle
    );
    assert_eq!(
        TrayIconState::from_status(&status(true, true, "Recording...")),
        TrayIconState::Recording
    );
    assert_eq!(
        TrayIconState::from_status(&status(true, false, "Processing...")),
        TrayIconState::Processing
    );
    assert_eq!(
        TrayIconState::from_status(&status(true, false, "Transcribing...")),
        TrayIconState::Processing
    );
    assert_eq!(
        TrayIconState::from_status(&status(false, false, "Idle - Not Listening")),
        TrayIconState::Disabled
    );
    assert_eq!(
        TrayIconState::from_status(&status(true, false, "Error: Transcription failed.")),
        TrayIconState::Error
    );
    assert_eq!(
        TrayIconState::from_status(&status(true, false, "Audio recording failed.")),
        TrayIconState::Error
    );
}

/// WHAT: Disabled wins over every other signal
/// WHY: A disabled listener is the most important fact to surface, even
/// when the last session ended in an error
#[test]
fn given_disabled_listening_when_mapped_then_disabled_beats_error() {
    assert_eq!(
        TrayIconState::from_status(&status(false, false, "Error inserting text.")),
        TrayIconState::Disabled
    );
    assert_eq!(
        TrayIconState::from_status(&status(false, true, "Recording...")),
        TrayIconState::Disabled
    );
}

/// WHAT: Success text after insertion maps to Idle
/// WHY: "inserted successfully" contains no error keyword and the
/// pipeline is done; the icon must return to ready
#[test]
fn given_success_text_when_mapped_then_idle() {
    assert_eq!(
        TrayIconState::from_status(&status(true, false, "Text inserted successfully.")),
        TrayIconState::Idle
    );
}

/// WHAT: Tooltip carries the prefix and the full text when short
/// WHY: The hover text is the detailed status surface
#[test]
fn given_short_status_when_tooltip_built_then_prefixed_untruncated() {
    let tooltip = tooltip_for(&status(true, false, "Recording..."));
    assert_eq!(tooltip, "TapTalk: Recording...");
}

/// WHAT: Over-long status text is truncated with an ellipsis
/// WHY: Platform tray tooltips cap out around 128 characters
#[test]
fn given_long_status_when_tooltip_built_then_truncated() {
    let long_text = "x".repeat(300);
    let tooltip = tooltip_for(&status(true, false, &long_text));

    assert!(tooltip.chars().count() <= 127);
    assert!(tooltip.starts_with("TapTalk: "));
    assert!(tooltip.ends_with("..."));
}
