// Copyright 2025 Irreducible Inc.

//! Arbitrary-precision signed integer arithmetic over 64-bit limbs.
//!
//! This crate represents integers of unbounded magnitude and provides exact arithmetic
//! without overflow: addition, subtraction, multiplication, truncating division with
//! remainder, bit shifts, comparisons, and conversions to and from native types.
//!
//! The central type is [`BigInt`], a sign-magnitude value: a sign flag paired with a
//! magnitude stored as a little-endian sequence of 64-bit limbs. Every value has exactly
//! one representation — the limb sequence carries no trailing zero limb (except the
//! single-limb zero), and zero is never negative.
//!
//! The [`limbs`] module exposes the magnitude-level primitives the signed layer is built
//! on. Its centerpiece is the division subsystem: schoolbook long division with digit
//! estimation and correction ([`limbs::basecase_div_rem`]), and recursive
//! Burnikel-Ziegler block division for large operands
//! ([`limbs::burnikel_ziegler_div_rem`]). The two agree bit for bit on every input;
//! [`limbs::div_rem`] picks between them based on the divisor's limb count.
//!
//! All operations are synchronous pure computations over immutable inputs. There is no
//! interior mutability and no global mutable state, so values can be used freely across
//! threads.

mod convert;
mod error;
mod int;
pub mod limbs;

#[cfg(test)]
mod test_oracle;

pub use error::Error;
pub use int::BigInt;
