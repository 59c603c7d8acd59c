// Copyright 2025 Irreducible Inc.

use std::{cmp::Ordering, env, sync::OnceLock};

use super::{
	add, bit_len, cmp, div::basecase_div_rem, high_words, is_normalized, is_zero,
	mul::optimal_mul,
	shift::{shl, shl_words, shr},
	split_words, sub, sub_assign, trim,
};

/// Default divisor limb count above which division takes the Burnikel-Ziegler path.
///
/// Any positive threshold preserves correctness (basecase and Burnikel-Ziegler agree on
/// every input); this constant only balances recursion overhead against basecase cost.
pub const DEFAULT_BZ_THRESHOLD: usize = 60;

/// Resolves the Burnikel-Ziegler threshold once per process.
///
/// Reads `BIGINT64_BZ_THRESHOLD` from the environment on first use; malformed or
/// non-positive values fall back to [`DEFAULT_BZ_THRESHOLD`]. The value never changes
/// afterward, so call sites may read it without synchronization concerns.
pub fn bz_threshold() -> usize {
	static THRESHOLD: OnceLock<usize> = OnceLock::new();
	*THRESHOLD.get_or_init(|| {
		env::var("BIGINT64_BZ_THRESHOLD")
			.ok()
			.and_then(|raw| raw.parse().ok())
			.filter(|&threshold| threshold > 0)
			.unwrap_or(DEFAULT_BZ_THRESHOLD)
	})
}

/// Divides one normalized magnitude by another with the Burnikel-Ziegler recursive
/// block algorithm, returning `(quotient, remainder)`.
///
/// The divisor is padded to `n` limbs (a power-of-two multiple of a near-threshold
/// block count) and shifted so its top bit is set; the dividend is cut into `n`-limb
/// blocks and consumed two blocks at a time by [`div_2n_1n`], which produces one
/// quotient block per window and carries the remainder into the next. Divisors at or
/// below the threshold fall back to [`basecase_div_rem`] directly.
///
/// The result is identical to [`basecase_div_rem`] for every input.
///
/// # Panics
/// Panics if `v` is zero.
pub fn burnikel_ziegler_div_rem(u: &[u64], v: &[u64]) -> (Vec<u64>, Vec<u64>) {
	burnikel_ziegler_div_rem_with(u, v, bz_threshold())
}

/// [`burnikel_ziegler_div_rem`] with an explicit threshold, so the recursion can be
/// exercised at any depth independent of the process-wide setting.
pub(crate) fn burnikel_ziegler_div_rem_with(
	u: &[u64],
	v: &[u64],
	threshold: usize,
) -> (Vec<u64>, Vec<u64>) {
	debug_assert!(is_normalized(u));
	debug_assert!(is_normalized(v));
	assert!(!is_zero(v), "burnikel_ziegler_div_rem: division by zero");
	debug_assert!(threshold > 0);

	let s = v.len();
	if s <= threshold || cmp(u, v) == Ordering::Less {
		return basecase_div_rem(u, v);
	}

	// Smallest power-of-two block count m with m * threshold > s, so the per-block
	// limb count stays at or below the threshold after log2(m) halvings.
	let m = 1usize << (usize::BITS - (s / threshold).leading_zeros());
	let limbs_per_block = s.div_ceil(m);
	let n = limbs_per_block * m;
	let n_bits = n * super::LIMB_BITS;

	// Align the divisor to exactly n limbs with its top bit set.
	let sigma = n_bits - bit_len(v);
	let vn = shl(v, sigma);
	debug_assert_eq!(vn.len(), n);
	let un = shl(u, sigma);

	// Cut the dividend into t blocks of n limbs. The extra block keeps the leading
	// window below vn * 2^n_bits, the precondition of div_2n_1n.
	let t = (bit_len(&un) / n_bits + 1).max(2);

	let mut window = add(&shl_words(&block(&un, t - 1, n), n), &block(&un, t - 2, n));
	let mut quotient = vec![0u64; (t - 1) * n];
	let remainder;
	let mut i = t - 1;
	loop {
		i -= 1;
		let (q_block, r_block) = div_2n_1n(&window, &vn, n, threshold);
		quotient[i * n..i * n + q_block.len()].copy_from_slice(&q_block);
		if i == 0 {
			remainder = r_block;
			break;
		}
		window = add(&shl_words(&r_block, n), &block(&un, i - 1, n));
	}

	trim(&mut quotient);
	(quotient, shr(&remainder, sigma))
}

/// The `i`-th `n`-limb block of a magnitude, normalized.
fn block(limbs: &[u64], i: usize, n: usize) -> Vec<u64> {
	let start = (i * n).min(limbs.len());
	let end = ((i + 1) * n).min(limbs.len());
	if start == end {
		return vec![0];
	}
	super::normalized(&limbs[start..end])
}

/// Divides a dividend of up to `2n` limbs by an `n`-limb divisor whose top bit is set,
/// given `dividend < divisor * 2^(64n)`. Returns an up-to-`n`-limb quotient and a
/// remainder smaller than the divisor.
///
/// Recursion base: an odd or at-or-below-threshold block count runs basecase division
/// (a block can never be split into two smaller ones at size zero).
fn div_2n_1n(a: &[u64], b: &[u64], n: usize, threshold: usize) -> (Vec<u64>, Vec<u64>) {
	if n % 2 == 1 || n <= threshold {
		return basecase_div_rem(a, b);
	}

	let half = n / 2;
	let (a_low, a_high) = split_words(a, half);

	let (q_high, r_high) = div_3n_2n(&a_high, b, half, threshold);
	let (q_low, r_low) = div_3n_2n(&add(&shl_words(&r_high, half), &a_low), b, half, threshold);

	(add(&shl_words(&q_high, half), &q_low), r_low)
}

/// Divides a dividend of up to `3h` limbs by a `2h`-limb divisor whose top bit is set,
/// given `dividend < divisor * 2^(64h)`. Returns an up-to-`h`-limb quotient and a
/// remainder smaller than the divisor.
fn div_3n_2n(a: &[u64], b: &[u64], h: usize, threshold: usize) -> (Vec<u64>, Vec<u64>) {
	let (a_bottom, a_top) = split_words(a, h);
	let (b_low, b_high) = split_words(b, h);
	let a_lead = high_words(a, 2 * h);

	let (mut quotient, partial) = if cmp(&a_lead, &b_high) == Ordering::Less {
		// Estimate against the divisor's high half; the quotient fits one block.
		div_2n_1n(&a_top, &b_high, h, threshold)
	} else {
		// The leading blocks match the divisor's high half, so the quotient estimate
		// saturates at 2^(64h) - 1 and a_top - (2^(64h) - 1) * b_high remains.
		(
			vec![u64::MAX; h],
			add(&sub(&a_top, &shl_words(&b_high, h)), &b_high),
		)
	};

	// Reconstruct the low partial product and correct the estimate downward while the
	// remainder would underflow; at most two rounds.
	let product = optimal_mul(&quotient, &b_low);
	let mut remainder = add(&shl_words(&partial, h), &a_bottom);
	while cmp(&remainder, &product) == Ordering::Less {
		remainder = add(&remainder, b);
		sub_assign(&mut quotient, &[1]);
	}

	(quotient, sub(&remainder, &product))
}

#[cfg(test)]
mod tests {
	use rand::{Rng, SeedableRng, rngs::StdRng};

	use super::*;
	use crate::test_oracle::random_limbs;

	fn assert_agrees_with_basecase(u: &[u64], v: &[u64], threshold: usize) {
		let (q_bz, r_bz) = burnikel_ziegler_div_rem_with(u, v, threshold);
		let (q_base, r_base) = basecase_div_rem(u, v);
		assert_eq!(q_bz, q_base, "quotient mismatch for {} / {} limbs", u.len(), v.len());
		assert_eq!(r_bz, r_base, "remainder mismatch for {} / {} limbs", u.len(), v.len());
	}

	#[test]
	fn test_small_threshold_deep_recursion() {
		let mut rng = StdRng::seed_from_u64(0);
		for threshold in 1..=4 {
			for _ in 0..100 {
				let u_len = 1 + rng.random_range(0..40);
				let u = random_limbs(&mut rng, u_len);
				let v_len = 1 + rng.random_range(0..20);
				let v = random_limbs(&mut rng, v_len);
				assert_agrees_with_basecase(&u, &v, threshold);
			}
		}
	}

	#[test]
	fn test_threshold_boundary_sizes() {
		let mut rng = StdRng::seed_from_u64(1);
		let threshold = 8;
		for divisor_len in [threshold, threshold + 1, 2 * threshold, 2 * threshold + 1] {
			for dividend_len in [divisor_len, divisor_len + 1, 2 * divisor_len, 3 * divisor_len] {
				let u = random_limbs(&mut rng, dividend_len);
				let v = random_limbs(&mut rng, divisor_len);
				assert_agrees_with_basecase(&u, &v, threshold);
			}
		}
	}

	#[test]
	fn test_all_ones_operands() {
		// Maximal limb patterns push every carry and borrow path.
		let threshold = 4;
		let u = vec![u64::MAX; 4 * (threshold + 1)];
		let v = vec![u64::MAX; threshold + 1];
		assert_agrees_with_basecase(&u, &v, threshold);
	}

	#[test]
	fn test_power_of_two_operands() {
		let threshold = 4;
		for exp_u in [512usize, 640, 1024] {
			for exp_v in [320usize, 384] {
				let u = shl(&[1], exp_u);
				let v = shl(&[1], exp_v);
				assert_agrees_with_basecase(&u, &v, threshold);
			}
		}
	}

	#[test]
	fn test_divisor_below_threshold_falls_back() {
		let mut rng = StdRng::seed_from_u64(2);
		let u = random_limbs(&mut rng, 12);
		let v = random_limbs(&mut rng, 3);
		// Well below the default threshold: must take the basecase route and still be
		// correct.
		let (q, r) = burnikel_ziegler_div_rem(&u, &v);
		let (q_base, r_base) = basecase_div_rem(&u, &v);
		assert_eq!(q, q_base);
		assert_eq!(r, r_base);
	}

	#[test]
	fn test_dividend_smaller_than_divisor() {
		let mut rng = StdRng::seed_from_u64(3);
		let v = random_limbs(&mut rng, 24);
		let u = random_limbs(&mut rng, 12);
		let (q, r) = burnikel_ziegler_div_rem_with(&u, &v, 4);
		assert_eq!(q, [0]);
		assert_eq!(r, u);
	}

	#[test]
	fn test_default_threshold_sizes() {
		// One pass over the real threshold: divisor at DEFAULT_BZ_THRESHOLD + 1 limbs
		// takes the recursive path, at the threshold it takes basecase.
		let mut rng = StdRng::seed_from_u64(4);
		for divisor_len in [DEFAULT_BZ_THRESHOLD, DEFAULT_BZ_THRESHOLD + 1] {
			let u = random_limbs(&mut rng, 2 * divisor_len + 1);
			let v = random_limbs(&mut rng, divisor_len);
			let (q_dispatch, r_dispatch) = crate::limbs::div_rem(&u, &v);
			let (q_base, r_base) = basecase_div_rem(&u, &v);
			assert_eq!(q_dispatch, q_base);
			assert_eq!(r_dispatch, r_base);
		}
	}
}
