//! Data-parallel conversions over flat, row-major slices.

use log::trace;
use rayon::prelude::*;

use crate::codec::QuanticsCodec;
use crate::error::{QuanticsIndexError, Result};

impl QuanticsCodec {
    /// Encode many index tuples at once.
    ///
    /// `indices` holds `count * ndims` values, one tuple after another. The
    /// result holds `count * len()` digits, one sequence after another. If any
    /// tuple is invalid the whole batch fails.
    ///
    /// # Example
    /// ```
    /// use quanticsindex::QuanticsCodec;
    ///
    /// let codec = QuanticsCodec::builder(1, 2).build().unwrap();
    /// let quantics = codec.encode_batch(&[1, 2, 3, 4]).unwrap();
    /// assert_eq!(quantics, vec![1, 1, 1, 2, 2, 1, 2, 2]);
    /// ```
    pub fn encode_batch(&self, indices: &[i64]) -> Result<Vec<i64>> {
        let ndims = self.ndims();
        if indices.len() % ndims != 0 {
            return Err(QuanticsIndexError::shape(format!(
                "batch of {} indices is not a multiple of {} dimensions",
                indices.len(),
                ndims
            )));
        }
        let count = indices.len() / ndims;
        trace!("encoding batch of {} index tuples", count);

        let mut result = vec![0i64; count * self.len()];
        result
            .par_chunks_mut(self.len())
            .zip(indices.par_chunks(ndims))
            .try_for_each(|(out, tuple)| self.encode_into(tuple, out))?;
        Ok(result)
    }

    /// Decode many quantics digit sequences at once.
    ///
    /// `quantics` holds `count * len()` digits; the result holds
    /// `count * ndims` indices. Inverse of [`QuanticsCodec::encode_batch`].
    pub fn decode_batch(&self, quantics: &[i64]) -> Result<Vec<i64>> {
        let len = self.len();
        if quantics.len() % len != 0 {
            return Err(QuanticsIndexError::shape(format!(
                "batch of {} digits is not a multiple of sequence length {}",
                quantics.len(),
                len
            )));
        }
        let count = quantics.len() / len;
        trace!("decoding batch of {} quantics sequences", count);

        let mut result = vec![0i64; count * self.ndims()];
        result
            .par_chunks_mut(self.ndims())
            .zip(quantics.par_chunks(len))
            .try_for_each(|(out, sequence)| self.decode_into(sequence, out))?;
        Ok(result)
    }
}
