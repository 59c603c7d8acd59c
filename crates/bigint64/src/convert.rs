// Copyright 2025 Irreducible Inc.

//! Conversions between [`BigInt`] and native types, plus string parsing and formatting.
//!
//! Everything here sits outside the arithmetic core: validation happens at this
//! boundary and yields explicit errors, so the limb algorithms only ever see
//! well-formed magnitudes.

use std::{fmt, str::FromStr};

use crate::{BigInt, Error, limbs};

impl BigInt {
	fn from_unsigned_128(value: u128) -> Self {
		BigInt::from_sign_magnitude(false, vec![value as u64, (value >> 64) as u64])
	}

	fn from_signed_128(value: i128) -> Self {
		let magnitude = value.unsigned_abs();
		BigInt::from_sign_magnitude(
			value < 0,
			vec![magnitude as u64, (magnitude >> 64) as u64],
		)
	}

	/// Interprets a fixed-width two's-complement word sequence (least significant word
	/// first) as a signed value.
	///
	/// `negative` is the sign bit of the source: when set, each word is complemented,
	/// the result is treated as an unsigned magnitude, one is added, and the value is
	/// negated — the usual two's-complement decoding, independent of the source width.
	pub fn from_twos_complement(words: &[u64], negative: bool) -> Self {
		if !negative {
			return BigInt::from_sign_magnitude(false, words.to_vec());
		}
		let mut magnitude: Vec<u64> = words.iter().map(|&word| !word).collect();
		limbs::trim(&mut magnitude);
		limbs::add_assign(&mut magnitude, &[1]);
		BigInt::from_sign_magnitude(true, magnitude)
	}

	/// Parses a string of digits in the given radix, with an optional leading `+` or
	/// `-`.
	///
	/// Digits beyond 9 are the ASCII letters in either case, as in
	/// `u64::from_str_radix`. Malformed input is reported as an [`Error`]; no partial
	/// value is ever produced.
	pub fn from_str_radix(input: &str, radix: u32) -> Result<Self, Error> {
		if !(2..=36).contains(&radix) {
			return Err(Error::InvalidRadix(radix));
		}
		let (negative, digits) = match input.strip_prefix('-') {
			Some(rest) => (true, rest),
			None => (false, input.strip_prefix('+').unwrap_or(input)),
		};
		if digits.is_empty() {
			return Err(Error::EmptyDigits);
		}

		// Fold digits in the largest groups that fit a limb, so the expensive
		// multiply-by-radix walks the magnitude once per group rather than per digit.
		let (group_len, group_base) = limb_group(radix);
		let mut magnitude = vec![0u64];
		let mut group_acc = 0u64;
		let mut group_count = 0u32;
		for ch in digits.chars() {
			let digit = ch.to_digit(radix).ok_or(Error::InvalidDigit { digit: ch, radix })?;
			group_acc = group_acc * radix as u64 + digit as u64;
			group_count += 1;
			if group_count == group_len {
				mul_add_limb(&mut magnitude, group_base, group_acc);
				group_acc = 0;
				group_count = 0;
			}
		}
		if group_count > 0 {
			mul_add_limb(&mut magnitude, (radix as u64).pow(group_count), group_acc);
		}

		Ok(BigInt::from_sign_magnitude(negative, magnitude))
	}
}

/// The largest power of `radix` that fits in a limb, as `(exponent, value)`.
fn limb_group(radix: u32) -> (u32, u64) {
	let mut count = 0;
	let mut base: u64 = 1;
	while let Some(next) = base.checked_mul(radix as u64) {
		base = next;
		count += 1;
	}
	(count, base)
}

/// In-place `magnitude = magnitude * base + addend` over a normalized magnitude.
fn mul_add_limb(magnitude: &mut Vec<u64>, base: u64, addend: u64) {
	let mut carry = addend as u128;
	for limb in magnitude.iter_mut() {
		let product = *limb as u128 * base as u128 + carry;
		*limb = product as u64;
		carry = product >> limbs::LIMB_BITS;
	}
	if carry != 0 {
		magnitude.push(carry as u64);
	}
}

macro_rules! impl_from_unsigned {
	($($t:ty),*) => {$(
		impl From<$t> for BigInt {
			fn from(value: $t) -> Self {
				BigInt::from_unsigned_128(value as u128)
			}
		}
	)*};
}

macro_rules! impl_from_signed {
	($($t:ty),*) => {$(
		impl From<$t> for BigInt {
			fn from(value: $t) -> Self {
				BigInt::from_signed_128(value as i128)
			}
		}
	)*};
}

impl_from_unsigned!(u8, u16, u32, u64, usize, u128);
impl_from_signed!(i8, i16, i32, i64, isize, i128);

impl TryFrom<&BigInt> for u64 {
	type Error = Error;

	fn try_from(value: &BigInt) -> Result<Self, Error> {
		if value.is_negative() || value.magnitude().len() > 1 {
			return Err(Error::OutOfRange);
		}
		Ok(value.magnitude()[0])
	}
}

impl TryFrom<&BigInt> for u128 {
	type Error = Error;

	fn try_from(value: &BigInt) -> Result<Self, Error> {
		if value.is_negative() || value.magnitude().len() > 2 {
			return Err(Error::OutOfRange);
		}
		let mut out = value.magnitude()[0] as u128;
		if let Some(&high) = value.magnitude().get(1) {
			out |= (high as u128) << 64;
		}
		Ok(out)
	}
}

impl TryFrom<&BigInt> for i64 {
	type Error = Error;

	fn try_from(value: &BigInt) -> Result<Self, Error> {
		if value.magnitude().len() > 1 {
			return Err(Error::OutOfRange);
		}
		let magnitude = value.magnitude()[0];
		if value.is_negative() {
			if magnitude > 1 << 63 {
				return Err(Error::OutOfRange);
			}
			Ok((magnitude as i64).wrapping_neg())
		} else if magnitude <= i64::MAX as u64 {
			Ok(magnitude as i64)
		} else {
			Err(Error::OutOfRange)
		}
	}
}

impl TryFrom<&BigInt> for i128 {
	type Error = Error;

	fn try_from(value: &BigInt) -> Result<Self, Error> {
		let magnitude = match u128::try_from(&value.abs()) {
			Ok(magnitude) => magnitude,
			Err(_) => return Err(Error::OutOfRange),
		};
		if value.is_negative() {
			if magnitude > 1 << 127 {
				return Err(Error::OutOfRange);
			}
			Ok((magnitude as i128).wrapping_neg())
		} else if magnitude <= i128::MAX as u128 {
			Ok(magnitude as i128)
		} else {
			Err(Error::OutOfRange)
		}
	}
}

macro_rules! impl_try_from_owned {
	($($t:ty),*) => {$(
		impl TryFrom<BigInt> for $t {
			type Error = Error;

			fn try_from(value: BigInt) -> Result<Self, Error> {
				<$t>::try_from(&value)
			}
		}
	)*};
}

impl_try_from_owned!(u64, u128, i64, i128);

/// Exact conversion from a double: the source must be finite and integral; anything
/// else is an error rather than a rounded or partial value.
impl TryFrom<f64> for BigInt {
	type Error = Error;

	fn try_from(value: f64) -> Result<Self, Error> {
		if !value.is_finite() {
			return Err(Error::NonFiniteFloat);
		}
		if value.trunc() != value {
			return Err(Error::FractionalFloat);
		}
		if value == 0.0 {
			return Ok(BigInt::zero());
		}

		// Finite, integral, and nonzero: the value is (2^52 + fraction) * 2^shift.
		// Subnormals cannot reach here (an integral subnormal is zero), so the implicit
		// mantissa bit is always present.
		let bits = value.abs().to_bits();
		let exponent = (bits >> 52) as i64;
		let mantissa = bits & ((1 << 52) - 1) | 1 << 52;
		let shift = exponent - 1075;

		let magnitude = if shift >= 0 {
			limbs::shl(&[mantissa], shift as usize)
		} else {
			// Integrality means the bits shifted out are all zero.
			limbs::shr(&[mantissa], -shift as usize)
		};
		Ok(BigInt::from_sign_magnitude(value.is_sign_negative(), magnitude))
	}
}

impl FromStr for BigInt {
	type Err = Error;

	fn from_str(input: &str) -> Result<Self, Error> {
		BigInt::from_str_radix(input, 10)
	}
}

/// Ten to the largest power that fits in a limb; one decimal output group.
const DECIMAL_GROUP_BASE: u64 = 10_000_000_000_000_000_000;
const DECIMAL_GROUP_LEN: usize = 19;

impl fmt::Display for BigInt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_zero() {
			return f.pad_integral(true, "", "0");
		}

		// Peel 19-digit groups off the low end, then print them high to low.
		let mut groups = Vec::new();
		let mut rest = self.magnitude().to_vec();
		while !limbs::is_zero(&rest) {
			let (quotient, group) = limbs::div_rem_limb(&rest, DECIMAL_GROUP_BASE);
			groups.push(group);
			rest = quotient;
		}

		let mut digits = String::with_capacity(groups.len() * DECIMAL_GROUP_LEN);
		for (i, group) in groups.iter().rev().enumerate() {
			if i == 0 {
				digits.push_str(&format!("{group}"));
			} else {
				digits.push_str(&format!("{group:019}"));
			}
		}
		f.pad_integral(!self.is_negative(), "", &digits)
	}
}

impl fmt::LowerHex for BigInt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut digits = String::with_capacity(self.magnitude().len() * 16);
		for (i, &limb) in self.magnitude().iter().enumerate().rev() {
			if i == self.magnitude().len() - 1 {
				digits.push_str(&format!("{limb:x}"));
			} else {
				digits.push_str(&format!("{limb:016x}"));
			}
		}
		f.pad_integral(!self.is_negative(), "0x", &digits)
	}
}

impl fmt::UpperHex for BigInt {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut digits = String::with_capacity(self.magnitude().len() * 16);
		for (i, &limb) in self.magnitude().iter().enumerate().rev() {
			if i == self.magnitude().len() - 1 {
				digits.push_str(&format!("{limb:X}"));
			} else {
				digits.push_str(&format!("{limb:016X}"));
			}
		}
		f.pad_integral(!self.is_negative(), "0x", &digits)
	}
}
