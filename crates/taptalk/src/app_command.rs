/// Lifecycle commands accepted by the session orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Re-open the capture stream and resume acting on hotkey signals.
    EnableListening,
    /// Stop acting on hotkey signals and release the capture stream.
    /// A session already in flight runs to completion first.
    DisableListening,
    /// Request application shutdown.
    Shutdown,
}
