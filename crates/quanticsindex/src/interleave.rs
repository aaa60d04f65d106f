//! Round-robin interleaving of parallel digit sequences.
//!
//! For sequences `a`, `b` the interleaved layout is `[a1, b1, a2, b2, ...]`:
//! position `i * d + k` (zero-based) holds digit `i` of dimension `k`. No digit
//! value is changed.

use crate::error::{QuanticsIndexError, Result};

/// Interleave `lists.len()` equally long digit sequences round-robin.
///
/// # Example
/// ```
/// use quanticsindex::interleave_dimensions;
///
/// let bits = interleave_dimensions(&[[1i64, 2], [2, 1]]).unwrap();
/// assert_eq!(bits, vec![1, 2, 2, 1]);
/// ```
pub fn interleave_dimensions<L: AsRef<[i64]>>(lists: &[L]) -> Result<Vec<i64>> {
    let ndims = lists.len();
    let first = lists
        .first()
        .ok_or_else(|| QuanticsIndexError::shape("at least one digit sequence is required"))?;
    let len = first.as_ref().len();
    for (k, list) in lists.iter().enumerate() {
        let list = list.as_ref();
        if list.len() != len {
            return Err(QuanticsIndexError::shape(format!(
                "digit sequence {} has length {}, expected {}",
                k,
                list.len(),
                len
            )));
        }
    }

    let mut result = vec![0i64; len * ndims];
    for (k, list) in lists.iter().enumerate() {
        for (i, &digit) in list.as_ref().iter().enumerate() {
            result[i * ndims + k] = digit;
        }
    }
    Ok(result)
}

/// Split an interleaved sequence back into `ndims` sequences.
/// Inverse of [`interleave_dimensions`].
///
/// # Example
/// ```
/// use quanticsindex::deinterleave_dimensions;
///
/// let lists = deinterleave_dimensions(&[1, 2, 2, 1], 2).unwrap();
/// assert_eq!(lists, vec![vec![1, 2], vec![2, 1]]);
/// ```
pub fn deinterleave_dimensions(bits: &[i64], ndims: usize) -> Result<Vec<Vec<i64>>> {
    if ndims == 0 {
        return Err(QuanticsIndexError::shape(
            "cannot deinterleave into zero dimensions",
        ));
    }
    if bits.len() % ndims != 0 {
        return Err(QuanticsIndexError::shape(format!(
            "sequence length {} is not divisible by {} dimensions",
            bits.len(),
            ndims
        )));
    }

    Ok((0..ndims)
        .map(|k| bits.iter().skip(k).step_by(ndims).copied().collect())
        .collect())
}
