// Copyright 2025 Irreducible Inc.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("division by zero")]
	DivisionByZero,
	#[error("radix {0} is outside the supported range 2..=36")]
	InvalidRadix(u32),
	#[error("no digits in input string")]
	EmptyDigits,
	#[error("invalid digit {digit:?} for radix {radix}")]
	InvalidDigit { digit: char, radix: u32 },
	#[error("floating-point value is not finite")]
	NonFiniteFloat,
	#[error("floating-point value has a fractional part")]
	FractionalFloat,
	#[error("value does not fit in the target integer type")]
	OutOfRange,
}
