//! Test utilities for writing decimal fixtures
//!
//! `BigDecimal` has no const constructor, so fixtures are written as numeric
//! literals and parsed at runtime.

use crate::BigDecimal;

/// Build a `BigDecimal` from a numeric literal
///
/// Underscore separators and a leading minus are accepted. Panics when the
/// literal is not a decimal number, so it is meant for tests and fixtures.
///
/// ```rust
/// use lp_aum_types::{dec, BigDecimal};
///
/// assert_eq!(dec!(1_000.25), "1000.25".parse::<BigDecimal>().unwrap());
/// assert_eq!(dec!(-3), BigDecimal::from(-3));
/// ```
#[macro_export]
macro_rules! dec {
	($($literal:tt)+) => {
		$crate::test_utils::parse_decimal(stringify!($($literal)+))
	};
}

#[doc(hidden)]
pub fn parse_decimal(literal: &str) -> BigDecimal {
	let digits: String = literal
		.chars()
		.filter(|c| *c != '_' && !c.is_whitespace())
		.collect();
	digits
		.parse()
		.unwrap_or_else(|e| panic!("Invalid decimal literal '{}': {}", literal, e))
}
