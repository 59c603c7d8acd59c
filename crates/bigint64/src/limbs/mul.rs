// Copyright 2025 Irreducible Inc.

use super::{LIMB_BITS, add, is_normalized, is_zero, normalized, shift::shl_words, sub, trim};

/// Limb count at which Karatsuba becomes better than textbook multiplication.
pub const KARATSUBA_THRESHOLD: usize = 32;

/// Multiplies two normalized magnitudes using the textbook algorithm.
///
/// Runs the schoolbook double loop: every limb pair contributes a 128-bit partial
/// product accumulated at its position with carry propagation. The result has at most
/// `a.len() + b.len()` limbs and is renormalized before being returned.
pub fn textbook_mul(a: &[u64], b: &[u64]) -> Vec<u64> {
	debug_assert!(is_normalized(a));
	debug_assert!(is_normalized(b));

	if is_zero(a) || is_zero(b) {
		return vec![0];
	}

	let mut accumulator = vec![0u64; a.len() + b.len()];
	for (i, &a_limb) in a.iter().enumerate() {
		if a_limb == 0 {
			continue;
		}
		let mut carry = 0u128;
		for (j, &b_limb) in b.iter().enumerate() {
			let product =
				a_limb as u128 * b_limb as u128 + accumulator[i + j] as u128 + carry;
			accumulator[i + j] = product as u64;
			carry = product >> LIMB_BITS;
		}
		accumulator[i + b.len()] = carry as u64;
	}

	trim(&mut accumulator);
	accumulator
}

/// Multiplies two normalized magnitudes using Karatsuba's three-product recursion.
///
/// Both operands are split at half the shorter length; the middle product is formed
/// from the half sums, so every intermediate stays non-negative. Sub-products route
/// back through [`optimal_mul`], terminating in [`textbook_mul`] below
/// [`KARATSUBA_THRESHOLD`].
pub fn karatsuba_mul(a: &[u64], b: &[u64]) -> Vec<u64> {
	let split = a.len().min(b.len()) / 2;
	if split < 2 {
		return textbook_mul(a, b);
	}

	let (a0, a1) = (normalized(&a[..split]), &a[split..]);
	let (b0, b1) = (normalized(&b[..split]), &b[split..]);

	let low = optimal_mul(&a0, &b0);
	let high = optimal_mul(a1, b1);

	// (a0 + a1) * (b0 + b1) - low - high = a0 * b1 + a1 * b0
	let mid = sub(
		&sub(&optimal_mul(&add(&a0, a1), &add(&b0, b1)), &low),
		&high,
	);

	let mut product = add(&low, &shl_words(&mid, split));
	super::add_assign(&mut product, &shl_words(&high, 2 * split));
	product
}

/// Multiplies two normalized magnitudes, picking the better algorithm by size.
pub fn optimal_mul(a: &[u64], b: &[u64]) -> Vec<u64> {
	if a.len().min(b.len()) >= KARATSUBA_THRESHOLD {
		karatsuba_mul(a, b)
	} else {
		textbook_mul(a, b)
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;
	use crate::test_oracle::{from_oracle, random_limbs, to_oracle};

	#[test]
	fn test_mul_single_limbs() {
		assert_eq!(textbook_mul(&[6], &[7]), [42]);
		// (2^64 - 1)^2 = 2^128 - 2^65 + 1
		assert_eq!(textbook_mul(&[u64::MAX], &[u64::MAX]), [1, u64::MAX - 1]);
	}

	#[test]
	fn test_mul_by_zero_and_one() {
		assert_eq!(textbook_mul(&[1, 2, 3], &[0]), [0]);
		assert_eq!(textbook_mul(&[0], &[0]), [0]);
		assert_eq!(textbook_mul(&[1, 2, 3], &[1]), [1, 2, 3]);
	}

	#[test]
	fn test_mul_carry_propagation() {
		// (2^64 + 1) * (2^64 + 2) = 2^128 + 3 * 2^64 + 2
		assert_eq!(textbook_mul(&[1, 1], &[2, 1]), [2, 3, 1]);
	}

	#[test]
	fn test_karatsuba_agrees_with_textbook_large() {
		let mut rng = StdRng::seed_from_u64(0);
		for _ in 0..10 {
			let a_len = KARATSUBA_THRESHOLD * 2 + rng.random_range(0..7);
			let a = random_limbs(&mut rng, a_len);
			let b_len = KARATSUBA_THRESHOLD + rng.random_range(0..7);
			let b = random_limbs(&mut rng, b_len);
			assert_eq!(karatsuba_mul(&a, &b), textbook_mul(&a, &b));
		}
	}

	proptest! {
		#[test]
		fn prop_textbook_mul_matches_oracle(
			a in prop::collection::vec(any::<u64>(), 1..12),
			b in prop::collection::vec(any::<u64>(), 1..12),
		) {
			let a = crate::limbs::normalized(&a);
			let b = crate::limbs::normalized(&b);
			let product = textbook_mul(&a, &b);
			prop_assert!(crate::limbs::is_normalized(&product));
			prop_assert_eq!(product, from_oracle(&(to_oracle(&a) * to_oracle(&b))));
		}

		#[test]
		fn prop_karatsuba_agrees_with_textbook(
			a in prop::collection::vec(any::<u64>(), 4..40),
			b in prop::collection::vec(any::<u64>(), 4..40),
		) {
			let a = crate::limbs::normalized(&a);
			let b = crate::limbs::normalized(&b);
			prop_assert_eq!(karatsuba_mul(&a, &b), textbook_mul(&a, &b));
		}
	}
}
