//! Checked quantity arithmetic. Every change to an `amount` or `total_supply`
//! goes through these helpers; raw `+`/`-` on quantities is not used anywhere.

use crate::error::ArithmeticError;

/// `a + b`, or `Overflow` if the sum does not fit in a u64
pub fn checked_add(a: u64, b: u64) -> Result<u64, ArithmeticError> {
    a.checked_add(b).ok_or(ArithmeticError::Overflow)
}

/// `a - b`, or `Underflow` if `b > a`
pub fn checked_sub(a: u64, b: u64) -> Result<u64, ArithmeticError> {
    a.checked_sub(b).ok_or(ArithmeticError::Underflow)
}
