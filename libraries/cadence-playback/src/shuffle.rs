//! Shuffle selection
//!
//! Shuffle does not reorder the playlist. Each advance draws a fresh index,
//! uniformly among the tracks other than the current one.

use rand::Rng;

/// Draw the next shuffled index for a playlist of `len` tracks
///
/// Distinct from `current` whenever `len > 1`. Callers guarantee `len > 0`.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize, current: Option<usize>) -> usize {
    if len <= 1 {
        return 0;
    }

    match current {
        Some(current) if current < len => {
            // Draw from the other len - 1 slots and skip over the current one
            let drawn = rng.gen_range(0..len - 1);
            if drawn >= current {
                drawn + 1
            } else {
                drawn
            }
        }
        _ => rng.gen_range(0..len),
    }
}
