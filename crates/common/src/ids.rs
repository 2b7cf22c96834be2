//! Opaque identifier generation.
//!
//! Task ids and download file names must be unique without any cross-task
//! coordination, and must not leak anything about their contents or order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a UUID-v4-shaped opaque identifier without external dependency.
///
/// The seed mixes the wall clock with a process-wide counter so that two
/// concurrent calls can never observe the same value.
pub fn opaque_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let seed = nanos ^ ((seq.wrapping_mul(0x9E37_79B9_7F4A_7C15) as u128) << 64);
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (seed & 0xFFFF_FFFF) as u32,
        ((seed >> 32) & 0xFFFF) as u16,
        ((seed >> 48) & 0x0FFF) as u16,
        (((seed >> 60) & 0x3F) | 0x80) as u16 | (((seed >> 66) & 0x3FF) as u16) << 6,
        (seed >> 76) & 0xFFFF_FFFF_FFFF,
    )
}
