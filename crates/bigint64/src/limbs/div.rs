// Copyright 2025 Irreducible Inc.

use std::cmp::Ordering;

use super::{
	LIMB_BITS, cmp, div_bz::{burnikel_ziegler_div_rem, bz_threshold}, is_normalized, is_zero,
	shift::{shl, shr},
	trim,
};

/// Divides one normalized magnitude by another, returning `(quotient, remainder)`.
///
/// This is the magnitude-level division entry point. It dispatches on the divisor's
/// limb count: a single-limb divisor takes the short-division fast path, a divisor
/// above the Burnikel-Ziegler threshold takes the recursive block algorithm, and
/// everything in between runs schoolbook long division. All three paths produce
/// identical results.
///
/// # Panics
/// Panics if `v` is zero. A zero divisor is a caller error; returning a sentinel would
/// silently corrupt downstream arithmetic.
pub fn div_rem(u: &[u64], v: &[u64]) -> (Vec<u64>, Vec<u64>) {
	assert!(!is_zero(v), "div_rem: division by zero");

	if v.len() > bz_threshold() {
		burnikel_ziegler_div_rem(u, v)
	} else {
		basecase_div_rem(u, v)
	}
}

/// Divides a normalized magnitude by a single nonzero limb.
///
/// Each step combines the running remainder with the next dividend limb as a 128-bit
/// value and divides by the limb divisor.
///
/// # Panics
/// Panics if `v` is zero.
pub fn div_rem_limb(u: &[u64], v: u64) -> (Vec<u64>, u64) {
	debug_assert!(is_normalized(u));
	assert!(v != 0, "div_rem_limb: division by zero");

	let mut quotient = vec![0u64; u.len()];
	let mut remainder: u64 = 0;
	for (q_limb, &u_limb) in quotient.iter_mut().zip(u).rev() {
		let numerator = (remainder as u128) << LIMB_BITS | u_limb as u128;
		*q_limb = (numerator / v as u128) as u64;
		remainder = (numerator % v as u128) as u64;
	}

	trim(&mut quotient);
	(quotient, remainder)
}

/// Schoolbook long division of normalized magnitudes (Knuth's Algorithm D).
///
/// Works for every operand size and serves as the recursion base (and correctness
/// reference) for [`burnikel_ziegler_div_rem`]. The steps:
///
/// 1. Single-limb divisors go through [`div_rem_limb`]; a dividend smaller than the
///    divisor yields `(0, u)` immediately.
/// 2. Both operands are shifted left so the divisor's top limb has its high bit set,
///    which bounds the per-digit estimation error by 2.
/// 3. Each quotient limb is estimated from the top two limbs of the remainder window
///    divided by the divisor's top limb, refined against the second divisor limb, then
///    corrected by at most one add-back after the multiply-subtract.
/// 4. The remainder is shifted back right at the end.
///
/// # Panics
/// Panics if `v` is zero.
pub fn basecase_div_rem(u: &[u64], v: &[u64]) -> (Vec<u64>, Vec<u64>) {
	debug_assert!(is_normalized(u));
	debug_assert!(is_normalized(v));
	assert!(!is_zero(v), "basecase_div_rem: division by zero");

	if v.len() == 1 {
		let (quotient, remainder) = div_rem_limb(u, v[0]);
		return (quotient, vec![remainder]);
	}
	if cmp(u, v) == Ordering::Less {
		return (vec![0], u.to_vec());
	}

	let n = u.len();
	let m = v.len();

	// Normalize so the divisor's top limb has its high bit set.
	let shift = v[m - 1].leading_zeros() as usize;
	let vn = shl(v, shift);
	debug_assert_eq!(vn.len(), m);
	let mut un = shl(u, shift);
	un.resize(n + 1, 0);

	let divisor_top = vn[m - 1];
	let divisor_second = vn[m - 2];

	let mut quotient = vec![0u64; n - m + 1];
	for j in (0..=n - m).rev() {
		// Estimate the quotient limb from the top two limbs of the current window.
		// The window's top limb never exceeds the divisor's top limb; when they are
		// equal the true digit is at most 2^64 - 1, so the estimate saturates.
		let numerator = (un[j + m] as u128) << LIMB_BITS | un[j + m - 1] as u128;
		let (mut q_hat, mut r_hat) = if un[j + m] < divisor_top {
			(numerator / divisor_top as u128, numerator % divisor_top as u128)
		} else {
			(u64::MAX as u128, numerator - (u64::MAX as u128) * divisor_top as u128)
		};

		// Refine against the second divisor limb; at most two decrements.
		while r_hat <= u64::MAX as u128
			&& q_hat * divisor_second as u128
				> (r_hat << LIMB_BITS | un[j + m - 2] as u128)
		{
			q_hat -= 1;
			r_hat += divisor_top as u128;
		}

		// Multiply-subtract; the estimate can still be one too large, which shows up
		// as an underflow and is repaired by a single add-back.
		let q_hat = q_hat as u64;
		let underflow = sub_mul_limb(&mut un[j..=j + m], &vn, q_hat);
		if underflow {
			quotient[j] = q_hat - 1;
			add_back(&mut un[j..=j + m], &vn);
		} else {
			quotient[j] = q_hat;
		}
	}

	trim(&mut quotient);

	let mut remainder = un;
	remainder.truncate(m);
	trim(&mut remainder);
	(quotient, shr(&remainder, shift))
}

/// Computes `acc -= q * v` over a window of `v.len() + 1` limbs, returning whether the
/// subtraction underflowed.
fn sub_mul_limb(acc: &mut [u64], v: &[u64], q: u64) -> bool {
	debug_assert_eq!(acc.len(), v.len() + 1);

	let mut carry = 0u128;
	let mut borrow = 0u64;
	for (acc_limb, &v_limb) in acc.iter_mut().zip(v) {
		let product = q as u128 * v_limb as u128 + carry;
		carry = product >> LIMB_BITS;

		let (diff, underflow1) = acc_limb.overflowing_sub(product as u64);
		let (diff, underflow2) = diff.overflowing_sub(borrow);
		*acc_limb = diff;
		borrow = (underflow1 | underflow2) as u64;
	}

	let top = &mut acc[v.len()];
	let (diff, underflow1) = top.overflowing_sub(carry as u64);
	let (diff, underflow2) = diff.overflowing_sub(borrow);
	*top = diff;
	underflow1 | underflow2
}

/// Adds `v` back into a window that underflowed in [`sub_mul_limb`]; the final carry
/// out cancels the borrow and is discarded.
fn add_back(acc: &mut [u64], v: &[u64]) {
	debug_assert_eq!(acc.len(), v.len() + 1);

	let mut carry = 0u64;
	for (acc_limb, &v_limb) in acc.iter_mut().zip(v) {
		let (sum, overflow1) = acc_limb.overflowing_add(v_limb);
		let (sum, overflow2) = sum.overflowing_add(carry);
		*acc_limb = sum;
		carry = (overflow1 | overflow2) as u64;
	}
	acc[v.len()] = acc[v.len()].wrapping_add(carry);
}
