use crate::audio::frame_buffer::{FrameBuffer, MAX_BUFFER_SAMPLES};

use std::sync::Arc;

/// WHAT: Blocks pushed while armed are drained in arrival order
/// WHY: The artifact must be the concatenation of frames as delivered
#[test]
fn given_armed_buffer_when_pushing_blocks_then_disarm_returns_them_in_order() {
    // Given: An armed frame buffer
    let buffer = FrameBuffer::new();
    buffer.arm();

    // When: Three distinct blocks arrive
    buffer.push_block(&[0.1, 0.2]);
    buffer.push_block(&[0.3]);
    buffer.push_block(&[0.4, 0.5, 0.6]);

    // Then: Disarm drains all blocks in arrival order
    let blocks = buffer.disarm();
    assert_eq!(blocks, vec![vec![0.1, 0.2], vec![0.3], vec![0.4, 0.5, 0.6]]);
    assert!(!buffer.is_armed());
}

/// WHAT: Pushes while disarmed are discarded
/// WHY: Frames may only be appended while a session is armed
#[test]
fn given_disarmed_buffer_when_pushing_blocks_then_nothing_accumulates() {
    // Given: A buffer that was never armed
    let buffer = FrameBuffer::new();

    // When: A callback fires anyway
    buffer.push_block(&[0.5; 128]);

    // Then: Nothing was accumulated
    assert!(buffer.disarm().is_empty());
}

/// WHAT: Disarm drains exactly once
/// WHY: The artifact is produced exactly once per arm/disarm cycle
#[test]
fn given_drained_buffer_when_disarming_again_then_empty() {
    // Given: A buffer with one completed session
    let buffer = FrameBuffer::new();
    buffer.arm();
    buffer.push_block(&[1.0; 64]);
    assert_eq!(buffer.disarm().len(), 1);

    // When: Disarming a second time without re-arming
    let blocks = buffer.disarm();

    // Then: No frames remain
    assert!(blocks.is_empty());
}

/// WHAT: Re-arming resets leftover frames
/// WHY: A new session must never contain audio from a previous one
#[test]
fn given_discarded_session_when_rearming_then_buffer_starts_empty() {
    // Given: An armed buffer with frames that get discarded (teardown path)
    let buffer = FrameBuffer::new();
    buffer.arm();
    buffer.push_block(&[0.7; 32]);
    buffer.discard();

    // When: A fresh session is armed and one block arrives
    buffer.arm();
    buffer.push_block(&[0.1; 16]);

    // Then: Only the new session's block is present
    let blocks = buffer.disarm();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].len(), 16);
}

/// WHAT: Buffer respects MAX_BUFFER_SAMPLES limit
/// WHY: Prevents unbounded memory growth while the hotkey is held
#[test]
fn given_buffer_at_max_capacity_when_pushing_then_newest_block_dropped() {
    // Given: An armed buffer filled to exactly the cap
    let buffer = FrameBuffer::new();
    buffer.arm();
    let big = vec![0.0f32; MAX_BUFFER_SAMPLES];
    buffer.push_block(&big);

    // When: One more block arrives past the cap
    buffer.push_block(&[1.0; 1024]);

    // Then: The overflowing block was dropped, earlier audio intact
    let blocks = buffer.disarm();
    let total: usize = blocks.iter().map(Vec::len).sum();
    assert_eq!(total, MAX_BUFFER_SAMPLES);
}

/// WHAT: Concurrent pushes to a shared buffer produce consistent state
/// WHY: Validates thread safety under audio-callback contention
#[test]
#[allow(clippy::unwrap_used)]
fn given_concurrent_writers_when_pushing_blocks_then_no_corruption() {
    // Given: A shared armed buffer simulating callback contention
    let buffer = Arc::new(FrameBuffer::new());
    buffer.arm();
    let mut handles = vec![];

    // When: 4 threads push 1000 blocks of 48 samples each concurrently
    for i in 0..4u8 {
        let buffer = Arc::clone(&buffer);
        handles.push(std::thread::spawn(move || {
            let block = vec![f32::from(i); 48];
            for _ in 0..1000 {
                buffer.push_block(&block);
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    // Then: Every block arrived whole and every sample is finite
    let blocks = buffer.disarm();
    assert_eq!(blocks.len(), 4 * 1000);
    assert!(blocks.iter().all(|b| b.len() == 48));
    assert!(blocks.iter().flatten().all(|s| s.is_finite()));
}
