// Copyright 2025 Irreducible Inc.

use std::{
	cmp::Ordering,
	ops::{
		Add, AddAssign, Div, Mul, Neg, Rem, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
	},
};

use crate::{Error, limbs};

/// An arbitrary-precision signed integer.
///
/// A `BigInt` pairs a sign flag with a magnitude stored as a normalized little-endian
/// limb sequence. The representation is unique: the magnitude carries no trailing zero
/// limb, and zero is never negative, so structural equality is numeric equality.
///
/// Values have ordinary ownership semantics — every arithmetic operation produces a new
/// value and never aliases an operand. The compound-assign operators (`+=`, `-=`,
/// `<<=`, `>>=`) mutate in place and may reuse the existing limb buffer.
///
/// Division truncates toward zero and the remainder takes the dividend's sign:
///
/// ```
/// use bigint64::BigInt;
///
/// let (q, r) = BigInt::from(-7).quotient_and_remainder(&BigInt::from(2));
/// assert_eq!((q, r), (BigInt::from(-3), BigInt::from(-1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigInt {
	negative: bool,
	magnitude: Vec<u64>,
}

impl BigInt {
	/// The value zero.
	pub fn zero() -> Self {
		BigInt {
			negative: false,
			magnitude: vec![0],
		}
	}

	/// The value one.
	pub fn one() -> Self {
		BigInt {
			negative: false,
			magnitude: vec![1],
		}
	}

	/// Constructs a value from a sign flag and a little-endian limb sequence.
	///
	/// The limb sequence need not be pre-trimmed; trailing zero limbs are dropped and a
	/// zero magnitude forces the sign positive, so the invariants hold for any input.
	pub fn from_sign_magnitude(negative: bool, mut magnitude: Vec<u64>) -> Self {
		limbs::trim(&mut magnitude);
		BigInt {
			negative: negative && !limbs::is_zero(&magnitude),
			magnitude,
		}
	}

	/// The magnitude as a normalized little-endian limb sequence.
	pub fn magnitude(&self) -> &[u64] {
		&self.magnitude
	}

	/// Whether the value is strictly negative.
	pub fn is_negative(&self) -> bool {
		self.negative
	}

	/// Whether the value is zero.
	pub fn is_zero(&self) -> bool {
		limbs::is_zero(&self.magnitude)
	}

	/// Number of significant bits in the magnitude.
	pub fn bit_len(&self) -> usize {
		limbs::bit_len(&self.magnitude)
	}

	/// The absolute value.
	pub fn abs(&self) -> Self {
		BigInt {
			negative: false,
			magnitude: self.magnitude.clone(),
		}
	}

	/// Flips the sign in place. Zero stays non-negative.
	pub fn negate(&mut self) {
		if !self.is_zero() {
			self.negative = !self.negative;
		}
	}

	/// Truncating division: returns `(quotient, remainder)` with the quotient rounded
	/// toward zero and the remainder carrying the dividend's sign.
	///
	/// The quotient's sign is the XOR of the operand signs and the remainder's sign is
	/// the dividend's, except that a zero quotient or remainder is non-negative:
	/// `7 / 2 = 3 rem 1`, `-7 / 2 = -3 rem -1`, `7 / -2 = -3 rem 1`,
	/// `-7 / -2 = 3 rem -1`.
	///
	/// # Panics
	/// Panics if `divisor` is zero — see [`BigInt::checked_div_rem`] for the
	/// non-panicking variant.
	pub fn quotient_and_remainder(&self, divisor: &BigInt) -> (BigInt, BigInt) {
		assert!(!divisor.is_zero(), "quotient_and_remainder: division by zero");

		let (quotient, remainder) = limbs::div_rem(&self.magnitude, &divisor.magnitude);
		(
			BigInt::from_sign_magnitude(self.negative != divisor.negative, quotient),
			BigInt::from_sign_magnitude(self.negative, remainder),
		)
	}

	/// [`BigInt::quotient_and_remainder`] that reports a zero divisor as an error
	/// instead of panicking.
	pub fn checked_div_rem(&self, divisor: &BigInt) -> Result<(BigInt, BigInt), Error> {
		if divisor.is_zero() {
			return Err(Error::DivisionByZero);
		}
		Ok(self.quotient_and_remainder(divisor))
	}
}

impl Default for BigInt {
	fn default() -> Self {
		Self::zero()
	}
}

impl Ord for BigInt {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.negative, other.negative) {
			(false, true) => Ordering::Greater,
			(true, false) => Ordering::Less,
			(false, false) => limbs::cmp(&self.magnitude, &other.magnitude),
			(true, true) => limbs::cmp(&other.magnitude, &self.magnitude),
		}
	}
}

impl PartialOrd for BigInt {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Neg for &BigInt {
	type Output = BigInt;

	fn neg(self) -> BigInt {
		BigInt::from_sign_magnitude(!self.negative, self.magnitude.clone())
	}
}

impl Neg for BigInt {
	type Output = BigInt;

	fn neg(mut self) -> BigInt {
		self.negate();
		self
	}
}

impl Add for &BigInt {
	type Output = BigInt;

	fn add(self, rhs: Self) -> BigInt {
		if self.negative == rhs.negative {
			return BigInt::from_sign_magnitude(
				self.negative,
				limbs::add(&self.magnitude, &rhs.magnitude),
			);
		}
		// Opposite signs: the larger magnitude wins the sign.
		match limbs::cmp(&self.magnitude, &rhs.magnitude) {
			Ordering::Equal => BigInt::zero(),
			Ordering::Greater => BigInt::from_sign_magnitude(
				self.negative,
				limbs::sub(&self.magnitude, &rhs.magnitude),
			),
			Ordering::Less => BigInt::from_sign_magnitude(
				rhs.negative,
				limbs::sub(&rhs.magnitude, &self.magnitude),
			),
		}
	}
}

impl Sub for &BigInt {
	type Output = BigInt;

	fn sub(self, rhs: Self) -> BigInt {
		self + &-rhs
	}
}

impl Mul for &BigInt {
	type Output = BigInt;

	fn mul(self, rhs: Self) -> BigInt {
		BigInt::from_sign_magnitude(
			self.negative != rhs.negative,
			limbs::optimal_mul(&self.magnitude, &rhs.magnitude),
		)
	}
}

impl Div for &BigInt {
	type Output = BigInt;

	fn div(self, rhs: Self) -> BigInt {
		self.quotient_and_remainder(rhs).0
	}
}

impl Rem for &BigInt {
	type Output = BigInt;

	fn rem(self, rhs: Self) -> BigInt {
		self.quotient_and_remainder(rhs).1
	}
}

/// Shifts the magnitude left; the sign is unchanged.
impl Shl<usize> for &BigInt {
	type Output = BigInt;

	fn shl(self, bits: usize) -> BigInt {
		BigInt::from_sign_magnitude(self.negative, limbs::shl(&self.magnitude, bits))
	}
}

/// Shifts the magnitude right, truncating toward zero; the sign is unchanged except
/// that a result of zero is non-negative.
impl Shr<usize> for &BigInt {
	type Output = BigInt;

	fn shr(self, bits: usize) -> BigInt {
		BigInt::from_sign_magnitude(self.negative, limbs::shr(&self.magnitude, bits))
	}
}

macro_rules! forward_owned_binop {
	($trait:ident, $method:ident, $rhs:ty) => {
		impl $trait<$rhs> for BigInt {
			type Output = BigInt;

			fn $method(self, rhs: $rhs) -> BigInt {
				$trait::$method(&self, &rhs)
			}
		}

		impl $trait<&BigInt> for BigInt {
			type Output = BigInt;

			fn $method(self, rhs: &BigInt) -> BigInt {
				$trait::$method(&self, rhs)
			}
		}

		impl $trait<$rhs> for &BigInt {
			type Output = BigInt;

			fn $method(self, rhs: $rhs) -> BigInt {
				$trait::$method(self, &rhs)
			}
		}
	};
}

forward_owned_binop!(Add, add, BigInt);
forward_owned_binop!(Sub, sub, BigInt);
forward_owned_binop!(Mul, mul, BigInt);
forward_owned_binop!(Div, div, BigInt);
forward_owned_binop!(Rem, rem, BigInt);

impl Shl<usize> for BigInt {
	type Output = BigInt;

	fn shl(mut self, bits: usize) -> BigInt {
		self <<= bits;
		self
	}
}

impl Shr<usize> for BigInt {
	type Output = BigInt;

	fn shr(mut self, bits: usize) -> BigInt {
		self >>= bits;
		self
	}
}

impl AddAssign<&BigInt> for BigInt {
	fn add_assign(&mut self, rhs: &BigInt) {
		if self.negative == rhs.negative {
			limbs::add_assign(&mut self.magnitude, &rhs.magnitude);
			return;
		}
		match limbs::cmp(&self.magnitude, &rhs.magnitude) {
			Ordering::Equal => *self = BigInt::zero(),
			Ordering::Greater => {
				limbs::sub_assign(&mut self.magnitude, &rhs.magnitude);
			}
			Ordering::Less => {
				*self = BigInt::from_sign_magnitude(
					rhs.negative,
					limbs::sub(&rhs.magnitude, &self.magnitude),
				);
			}
		}
	}
}

impl AddAssign for BigInt {
	fn add_assign(&mut self, rhs: BigInt) {
		*self += &rhs;
	}
}

impl SubAssign<&BigInt> for BigInt {
	fn sub_assign(&mut self, rhs: &BigInt) {
		self.negate();
		*self += rhs;
		self.negate();
	}
}

impl SubAssign for BigInt {
	fn sub_assign(&mut self, rhs: BigInt) {
		*self -= &rhs;
	}
}

impl ShlAssign<usize> for BigInt {
	fn shl_assign(&mut self, bits: usize) {
		limbs::shl_assign(&mut self.magnitude, bits);
	}
}

impl ShrAssign<usize> for BigInt {
	fn shr_assign(&mut self, bits: usize) {
		limbs::shr_assign(&mut self.magnitude, bits);
		if limbs::is_zero(&self.magnitude) {
			self.negative = false;
		}
	}
}
