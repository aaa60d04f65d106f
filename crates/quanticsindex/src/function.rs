//! Adapter letting a function of indices be called with quantics digits.

use std::fmt;

use log::trace;
use rayon::prelude::*;

use crate::codec::{quantics_to_index_nd, QuanticsCodec};
use crate::error::Result;
use crate::UnfoldingScheme;

#[derive(Debug, Clone, Copy)]
enum Decoder {
    /// Base 2, number of digits taken from the sequence length
    Binary {
        ndims: usize,
        scheme: UnfoldingScheme,
    },
    Codec(QuanticsCodec),
}

/// A function of `ndims` indices, callable with a quantics digit sequence.
///
/// # Example
/// ```
/// use quanticsindex::{index_to_quantics_nd, QuanticsFunction, UnfoldingScheme};
///
/// let qf = QuanticsFunction::new(|idx: &[i64]| idx[0] * 10 + idx[1], 2, UnfoldingScheme::Fused);
/// let quantics = index_to_quantics_nd(&[3, 4], 4, UnfoldingScheme::Fused).unwrap();
/// assert_eq!(qf.call(&quantics).unwrap(), 34);
/// ```
pub struct QuanticsFunction<F> {
    func: F,
    decoder: Decoder,
}

impl<F> QuanticsFunction<F> {
    /// Wrap `func` for binary quantics sequences of any length.
    pub fn new(func: F, ndims: usize, scheme: UnfoldingScheme) -> Self {
        Self {
            func,
            decoder: Decoder::Binary { ndims, scheme },
        }
    }

    /// Wrap `func` using a configured codec (any base, fixed resolution).
    pub fn with_codec(func: F, codec: QuanticsCodec) -> Self {
        Self {
            func,
            decoder: Decoder::Codec(codec),
        }
    }

    /// Number of indices passed to the wrapped function
    pub fn ndims(&self) -> usize {
        match self.decoder {
            Decoder::Binary { ndims, .. } => ndims,
            Decoder::Codec(codec) => codec.ndims(),
        }
    }

    /// Unfolding scheme used to decode sequences
    pub fn unfolding_scheme(&self) -> UnfoldingScheme {
        match self.decoder {
            Decoder::Binary { scheme, .. } => scheme,
            Decoder::Codec(codec) => codec.unfolding_scheme(),
        }
    }

    /// The wrapped function
    pub fn inner(&self) -> &F {
        &self.func
    }

    fn decode(&self, quantics: &[i64]) -> Result<Vec<i64>> {
        match self.decoder {
            Decoder::Binary { ndims, scheme } => quantics_to_index_nd(quantics, ndims, scheme),
            Decoder::Codec(codec) => codec.decode(quantics),
        }
    }

    /// Decode `quantics` and evaluate the wrapped function on the indices.
    pub fn call<V>(&self, quantics: &[i64]) -> Result<V>
    where
        F: Fn(&[i64]) -> V,
    {
        let indices = self.decode(quantics)?;
        Ok((self.func)(&indices))
    }

    /// Evaluate on every sequence of `batch`, in parallel.
    ///
    /// Fails if any sequence fails to decode.
    pub fn call_batch<Q, V>(&self, batch: &[Q]) -> Result<Vec<V>>
    where
        Q: AsRef<[i64]> + Sync,
        F: Fn(&[i64]) -> V + Sync,
        V: Send,
    {
        trace!("evaluating quantics function on {} sequences", batch.len());
        batch
            .par_iter()
            .map(|quantics| self.call(quantics.as_ref()))
            .collect()
    }
}

impl<F> fmt::Debug for QuanticsFunction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuanticsFunction")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

/// Wrap a function of indices so it accepts binary quantics digits.
///
/// # Example
/// ```
/// use quanticsindex::{quantics_function, UnfoldingScheme};
///
/// let qf = quantics_function(1, UnfoldingScheme::Fused, |idx: &[i64]| idx[0] * idx[0]);
/// assert_eq!(qf(&[2, 1, 1]).unwrap(), 25);
/// ```
pub fn quantics_function<F, V>(
    ndims: usize,
    scheme: UnfoldingScheme,
    f: F,
) -> impl Fn(&[i64]) -> Result<V>
where
    F: Fn(&[i64]) -> V,
{
    let qf = QuanticsFunction::new(f, ndims, scheme);
    move |quantics: &[i64]| qf.call(quantics)
}
