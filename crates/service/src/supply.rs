//! Circulating LP supply

use lp_aum_types::BigDecimal;

/// `base` minus every per-chain deduction
///
/// Not floored at zero: a negative result points at over-issuance and is
/// returned as-is.
pub fn net_supply<I>(base: BigDecimal, deductions: I) -> BigDecimal
where
	I: IntoIterator<Item = BigDecimal>,
{
	deductions
		.into_iter()
		.fold(base, |supply, deduct| supply - deduct)
}
