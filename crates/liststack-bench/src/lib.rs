//! Benchmark profiles for the liststack crate.
//!
//! - [`payload_profile`]: deterministic variable-length payloads via seed
//! - [`filled_stack`]: a stack pre-loaded with a profile, for read benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use liststack::ListStack;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `count` payloads with lengths in `1..=max_len`.
///
/// Same seed, same payloads.
pub fn payload_profile(seed: u64, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    assert!(max_len > 0, "max_len must be at least 1");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = 1 + (rng.next_u32() as usize % max_len);
            let mut payload = vec![0u8; len];
            rng.fill_bytes(&mut payload);
            payload
        })
        .collect()
}

/// Region size that holds every payload in `payloads` with 4-byte links.
pub fn region_for(payloads: &[Vec<u8>]) -> usize {
    12 + payloads.iter().map(|p| p.len() + 4).sum::<usize>()
}

/// Build an owned stack holding `payloads`, last one at the front.
///
/// # Panics
///
/// Panics if a push fails, which [`region_for`] sizing rules out.
pub fn filled_stack(payloads: &[Vec<u8>]) -> ListStack<Vec<u8>> {
    let size = region_for(payloads);
    let mut stack = ListStack::new(vec![0u8; size], size).expect("region holds the header");
    for p in payloads {
        stack.push(p).expect("region sized for the profile");
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_profile_deterministic() {
        assert_eq!(payload_profile(42, 32, 64), payload_profile(42, 32, 64));
        assert_ne!(payload_profile(42, 32, 64), payload_profile(43, 32, 64));
    }

    #[test]
    fn payload_lengths_in_range() {
        let payloads = payload_profile(7, 500, 16);
        assert!(payloads.iter().all(|p| (1..=16).contains(&p.len())));
    }

    #[test]
    fn filled_stack_is_exactly_full() {
        let payloads = payload_profile(1, 100, 40);
        let stack = filled_stack(&payloads);
        assert_eq!(stack.len(), 100);
        assert_eq!(stack.remaining(), 0);
        assert_eq!(stack.front(), payloads.last().map(Vec::as_slice));
    }
}
