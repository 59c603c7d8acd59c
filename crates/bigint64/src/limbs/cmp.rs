// Copyright 2025 Irreducible Inc.

use std::cmp::Ordering;

use super::is_normalized;

/// Compares two normalized magnitudes.
///
/// A longer sequence is strictly greater (normalization guarantees its top limb is
/// nonzero); equal-length sequences compare lexicographically from the most significant
/// limb down.
pub fn cmp(a: &[u64], b: &[u64]) -> Ordering {
	debug_assert!(is_normalized(a));
	debug_assert!(is_normalized(b));

	a.len().cmp(&b.len()).then_with(|| {
		for (&a_limb, &b_limb) in a.iter().rev().zip(b.iter().rev()) {
			match a_limb.cmp(&b_limb) {
				Ordering::Equal => continue,
				ord => return ord,
			}
		}
		Ordering::Equal
	})
}
