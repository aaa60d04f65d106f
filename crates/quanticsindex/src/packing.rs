//! Fusing parallel digit sequences into digits of an enlarged base and back.
//!
//! Given `d` sequences of base-`B` digits, [`fuse_dimensions`] combines the
//! digits found at the same position into one digit of base `B^d`. The first
//! sequence supplies the least significant contribution:
//!
//! ```text
//! fused[i] = 1 + sum_k (lists[k][i] - 1) * B^k
//! ```
//!
//! [`split_dimensions`] is the exact inverse.

use crate::digits::{checked_pow, push_digit, LsbDigits};
use crate::error::{QuanticsIndexError, Result};

/// Fuse `lists.len()` digit sequences of base `base` into one sequence of
/// base `base^lists.len()`.
///
/// # Example
/// ```
/// use quanticsindex::fuse_dimensions;
///
/// let fused = fuse_dimensions(2, &[[1i64, 2, 1], [2, 1, 1]]).unwrap();
/// assert_eq!(fused, vec![3, 2, 1]);
/// ```
pub fn fuse_dimensions<L: AsRef<[i64]>>(base: usize, lists: &[L]) -> Result<Vec<i64>> {
    if base < 2 {
        return Err(QuanticsIndexError::InvalidBase(base));
    }
    let ndims = lists.len();
    let first = lists
        .first()
        .ok_or_else(|| QuanticsIndexError::shape("at least one digit sequence is required"))?;
    let len = first.as_ref().len();
    for (k, list) in lists.iter().enumerate() {
        if list.as_ref().len() != len {
            return Err(QuanticsIndexError::shape(format!(
                "digit sequence {} has length {}, expected {}",
                k,
                list.as_ref().len(),
                len
            )));
        }
    }
    checked_pow(base, ndims).ok_or(QuanticsIndexError::ResolutionTooLarge { r: ndims, base })?;

    let max = base as i64;
    for list in lists {
        for (position, &digit) in list.as_ref().iter().enumerate() {
            if digit < 1 || digit > max {
                return Err(QuanticsIndexError::DigitOutOfRange {
                    position,
                    value: digit,
                    max,
                });
            }
        }
    }

    let result = (0..len)
        .map(|i| {
            lists
                .iter()
                .rev()
                .fold(0i64, |acc, list| push_digit(acc, list.as_ref()[i] - 1, base))
                + 1
        })
        .collect();
    Ok(result)
}

/// Split a sequence of base `base^ndims` digits into `ndims` sequences of
/// base `base`. Inverse of [`fuse_dimensions`].
///
/// # Example
/// ```
/// use quanticsindex::split_dimensions;
///
/// let lists = split_dimensions(2, &[3, 2, 1], 2).unwrap();
/// assert_eq!(lists, vec![vec![1, 2, 1], vec![2, 1, 1]]);
/// ```
pub fn split_dimensions(base: usize, fused: &[i64], ndims: usize) -> Result<Vec<Vec<i64>>> {
    if base < 2 {
        return Err(QuanticsIndexError::InvalidBase(base));
    }
    if ndims == 0 {
        return Err(QuanticsIndexError::shape("cannot split into zero dimensions"));
    }
    let max = checked_pow(base, ndims)
        .ok_or(QuanticsIndexError::ResolutionTooLarge { r: ndims, base })?;
    for (position, &value) in fused.iter().enumerate() {
        if value < 1 || value > max {
            return Err(QuanticsIndexError::DigitOutOfRange {
                position,
                value,
                max,
            });
        }
    }

    let mut result = vec![vec![0i64; fused.len()]; ndims];
    for (i, &value) in fused.iter().enumerate() {
        for (list, digit) in result.iter_mut().zip(LsbDigits::new(value - 1, base)) {
            list[i] = digit + 1;
        }
    }
    Ok(result)
}
