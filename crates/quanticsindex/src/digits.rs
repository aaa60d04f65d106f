//! Place-value arithmetic shared by the packing and codec layers.
//!
//! Values handled here are zero-based; the 1-based digit convention is applied
//! by the callers. Callers validate ranges before reaching these helpers.

/// `base^exp` as i64, or `None` if it overflows.
pub(crate) fn checked_pow(base: usize, exp: usize) -> Option<i64> {
    let base = i64::try_from(base).ok()?;
    let mut result: i64 = 1;
    for _ in 0..exp {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

/// Digits of a non-negative value in the given base, least significant first.
///
/// The iterator is infinite (it yields zeros once the value is exhausted), so
/// callers bound it with `take` or `zip`.
#[derive(Debug, Clone)]
pub(crate) struct LsbDigits {
    rest: i64,
    base: i64,
}

impl LsbDigits {
    #[inline]
    pub(crate) fn new(value: i64, base: usize) -> Self {
        Self {
            rest: value,
            base: base as i64,
        }
    }
}

impl Iterator for LsbDigits {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<i64> {
        let digit = if self.base == 2 {
            let digit = self.rest & 1;
            self.rest >>= 1;
            digit
        } else {
            let digit = self.rest % self.base;
            self.rest /= self.base;
            digit
        };
        Some(digit)
    }
}

/// Append `digit` (zero-based) as the new least significant digit of `acc`.
#[inline]
pub(crate) fn push_digit(acc: i64, digit: i64, base: usize) -> i64 {
    if base == 2 {
        (acc << 1) | digit
    } else {
        acc * base as i64 + digit
    }
}
