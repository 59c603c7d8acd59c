// Copyright 2025 Irreducible Inc.

use std::cmp::Ordering;

use super::{is_normalized, trim};

/// Single-limb add with carry in and carry out.
#[inline]
fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
	let (sum, overflow1) = a.overflowing_add(b);
	let (sum, overflow2) = sum.overflowing_add(carry);
	(sum, (overflow1 | overflow2) as u64)
}

/// Single-limb subtract with borrow in and borrow out.
#[inline]
fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
	let (diff, underflow1) = a.overflowing_sub(b);
	let (diff, underflow2) = diff.overflowing_sub(borrow);
	(diff, (underflow1 | underflow2) as u64)
}

/// Adds two normalized magnitudes, propagating carries across limbs.
///
/// The result has `max(a.len(), b.len())` limbs, or one more when the top addition
/// carries out.
pub fn add(a: &[u64], b: &[u64]) -> Vec<u64> {
	let mut sum = a.to_vec();
	add_assign(&mut sum, b);
	sum
}

/// In-place `a += b`, reusing `a`'s buffer where capacity allows.
pub fn add_assign(a: &mut Vec<u64>, b: &[u64]) {
	debug_assert!(is_normalized(a));
	debug_assert!(is_normalized(b));

	if a.len() < b.len() {
		a.resize(b.len(), 0);
	}

	let mut carry = 0;
	let (low, high) = a.split_at_mut(b.len());
	for (a_limb, &b_limb) in low.iter_mut().zip(b) {
		let (sum, carry_out) = adc(*a_limb, b_limb, carry);
		*a_limb = sum;
		carry = carry_out;
	}
	for a_limb in high {
		if carry == 0 {
			break;
		}
		let (sum, carry_out) = adc(*a_limb, 0, carry);
		*a_limb = sum;
		carry = carry_out;
	}
	if carry != 0 {
		a.push(carry);
	}
}

/// Subtracts `b` from `a`, propagating borrows across limbs.
///
/// The caller must establish `a >= b` beforehand (compare first); a smaller minuend is
/// a contract violation.
///
/// # Panics
/// Panics if `a < b`.
pub fn sub(a: &[u64], b: &[u64]) -> Vec<u64> {
	let mut diff = a.to_vec();
	sub_assign(&mut diff, b);
	diff
}

/// In-place `a -= b`, reusing `a`'s buffer. Same contract as [`sub`].
pub fn sub_assign(a: &mut Vec<u64>, b: &[u64]) {
	debug_assert!(is_normalized(a));
	debug_assert!(is_normalized(b));
	debug_assert!(super::cmp(a, b) != Ordering::Less);

	assert!(b.len() <= a.len(), "sub: minuend is smaller than subtrahend");

	let mut borrow = 0;
	let (low, high) = a.split_at_mut(b.len());
	for (a_limb, &b_limb) in low.iter_mut().zip(b) {
		let (diff, borrow_out) = sbb(*a_limb, b_limb, borrow);
		*a_limb = diff;
		borrow = borrow_out;
	}
	for a_limb in high {
		if borrow == 0 {
			break;
		}
		let (diff, borrow_out) = sbb(*a_limb, 0, borrow);
		*a_limb = diff;
		borrow = borrow_out;
	}
	assert_eq!(borrow, 0, "sub: minuend is smaller than subtrahend");

	trim(a);
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;
	use crate::test_oracle::{from_oracle, random_limbs, to_oracle};

	#[test]
	fn test_add_carry_chain() {
		// (2^128 - 1) + 1 = 2^128
		assert_eq!(add(&[u64::MAX, u64::MAX], &[1]), [0, 0, 1]);
	}

	#[test]
	fn test_add_zero_identity() {
		assert_eq!(add(&[0], &[0]), [0]);
		assert_eq!(add(&[7, 9], &[0]), [7, 9]);
	}

	#[test]
	fn test_sub_borrow_chain() {
		// 2^128 - 1 = [MAX, MAX]
		assert_eq!(sub(&[0, 0, 1], &[1]), [u64::MAX, u64::MAX]);
	}

	#[test]
	fn test_sub_to_zero() {
		assert_eq!(sub(&[5, 5], &[5, 5]), [0]);
	}

	#[test]
	#[should_panic(expected = "minuend is smaller")]
	fn test_sub_underflow_panics() {
		sub(&[1], &[2]);
	}

	#[test]
	fn test_add_assign_reuses_buffer() {
		let mut a = Vec::with_capacity(8);
		a.extend_from_slice(&[u64::MAX, 1]);
		let ptr = a.as_ptr();
		add_assign(&mut a, &[1]);
		assert_eq!(a, [0, 2]);
		assert_eq!(a.as_ptr(), ptr);
	}

	#[test]
	fn test_add_sub_roundtrip_random() {
		let mut rng = StdRng::seed_from_u64(0);
		for _ in 0..200 {
			let a_len = 1 + rng.random_range(0..8);
			let a = random_limbs(&mut rng, a_len);
			let b_len = 1 + rng.random_range(0..8);
			let b = random_limbs(&mut rng, b_len);
			let sum = add(&a, &b);
			assert_eq!(sub(&sum, &b), a);
			assert_eq!(sub(&sum, &a), b);
		}
	}

	proptest! {
		#[test]
		fn prop_add_matches_oracle(
			a in prop::collection::vec(any::<u64>(), 1..16),
			b in prop::collection::vec(any::<u64>(), 1..16),
		) {
			let a = crate::limbs::normalized(&a);
			let b = crate::limbs::normalized(&b);
			let sum = add(&a, &b);
			prop_assert!(crate::limbs::is_normalized(&sum));
			prop_assert_eq!(sum, from_oracle(&(to_oracle(&a) + to_oracle(&b))));
		}

		#[test]
		fn prop_sub_matches_oracle(
			a in prop::collection::vec(any::<u64>(), 1..16),
			b in prop::collection::vec(any::<u64>(), 1..16),
		) {
			let mut a = crate::limbs::normalized(&a);
			let mut b = crate::limbs::normalized(&b);
			if crate::limbs::cmp(&a, &b) == Ordering::Less {
				std::mem::swap(&mut a, &mut b);
			}
			let diff = sub(&a, &b);
			prop_assert!(crate::limbs::is_normalized(&diff));
			prop_assert_eq!(diff, from_oracle(&(to_oracle(&a) - to_oracle(&b))));
		}
	}
}
