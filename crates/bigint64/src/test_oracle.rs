// Copyright 2025 Irreducible Inc.

//! Conversions between limb sequences and `num_bigint` values, plus random magnitude
//! generation. Test-only: `num_bigint` is the independent oracle the arithmetic here is
//! checked against, never a runtime dependency.

use num_bigint::BigUint;
use rand::Rng;

/// Interprets a normalized limb sequence as a `num_bigint::BigUint`.
pub fn to_oracle(limbs: &[u64]) -> BigUint {
	let bytes: Vec<u8> = limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect();
	BigUint::from_bytes_le(&bytes)
}

/// Converts a `num_bigint::BigUint` back into a normalized limb sequence.
pub fn from_oracle(value: &BigUint) -> Vec<u64> {
	let mut limbs = value.to_u64_digits();
	if limbs.is_empty() {
		limbs.push(0);
	}
	limbs
}

/// A uniformly random magnitude of exactly `len` limbs (top limb forced nonzero so the
/// sequence is normalized at the requested length).
pub fn random_limbs(rng: &mut impl Rng, len: usize) -> Vec<u64> {
	assert!(len > 0);
	let mut limbs: Vec<u64> = (0..len).map(|_| rng.random()).collect();
	if limbs[len - 1] == 0 {
		limbs[len - 1] = 1 + rng.random_range(0..u64::MAX);
	}
	limbs
}
