//! Conversion between integer indices and quantics digit sequences.

use log::debug;

use crate::digits::{checked_pow, push_digit, LsbDigits};
use crate::error::{QuanticsIndexError, Result};
use crate::UnfoldingScheme;

/// A codec between `ndims`-tuples of indices and quantics digit sequences.
///
/// Every index lies in `[1, base^nbits]` and every digit is 1-based. The digit
/// sequence layout depends on the [`UnfoldingScheme`]:
/// - **Fused**: `nbits` digits of base `base^ndims`, most significant first.
///   Within a digit the first dimension is the least significant contribution.
/// - **Interleaved**: `nbits * ndims` digits of base `base`, cycling through
///   the dimensions at every scale.
///
/// # Example
/// ```
/// use quanticsindex::{QuanticsCodec, UnfoldingScheme};
///
/// let codec = QuanticsCodec::builder(2, 3)
///     .with_unfolding_scheme(UnfoldingScheme::Fused)
///     .build()
///     .unwrap();
///
/// let quantics = codec.encode(&[2, 6]).unwrap();
/// assert_eq!(quantics, vec![3, 1, 4]);
/// assert_eq!(codec.decode(&quantics).unwrap(), vec![2, 6]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuanticsCodec {
    /// Number of dimensions
    ndims: usize,
    /// Number of digits per dimension
    nbits: usize,
    /// Numeric base (default 2)
    base: usize,
    /// Layout of the digit sequence
    unfolding_scheme: UnfoldingScheme,
    /// base^nbits
    max_index: i64,
    /// Largest admissible digit (base^ndims when fused, base when interleaved)
    max_digit: i64,
}

impl QuanticsCodec {
    /// Create a new builder for a codec over `ndims` dimensions with `nbits`
    /// digits each.
    pub fn builder(ndims: usize, nbits: usize) -> QuanticsCodecBuilder {
        QuanticsCodecBuilder::new(ndims, nbits)
    }

    pub(crate) fn from_parts(
        base: usize,
        ndims: usize,
        nbits: usize,
        unfolding_scheme: UnfoldingScheme,
    ) -> Result<Self> {
        if base < 2 {
            return Err(QuanticsIndexError::InvalidBase(base));
        }
        if ndims == 0 {
            return Err(QuanticsIndexError::shape("at least one dimension is required"));
        }
        if nbits == 0 {
            return Err(QuanticsIndexError::shape("at least one digit is required"));
        }
        let max_index =
            checked_pow(base, nbits).ok_or(QuanticsIndexError::ResolutionTooLarge { r: nbits, base })?;
        let max_digit = match unfolding_scheme {
            UnfoldingScheme::Fused => checked_pow(base, ndims)
                .ok_or(QuanticsIndexError::ResolutionTooLarge { r: ndims, base })?,
            UnfoldingScheme::Interleaved => base as i64,
        };

        Ok(Self {
            ndims,
            nbits,
            base,
            unfolding_scheme,
            max_index,
            max_digit,
        })
    }

    /// Number of dimensions
    pub fn ndims(&self) -> usize {
        self.ndims
    }

    /// Number of digits per dimension
    pub fn nbits(&self) -> usize {
        self.nbits
    }

    /// Numeric base
    pub fn base(&self) -> usize {
        self.base
    }

    /// Unfolding scheme
    pub fn unfolding_scheme(&self) -> UnfoldingScheme {
        self.unfolding_scheme
    }

    /// Largest valid index per dimension (base^nbits)
    pub fn max_index(&self) -> i64 {
        self.max_index
    }

    /// Length of a quantics digit sequence
    pub fn len(&self) -> usize {
        match self.unfolding_scheme {
            UnfoldingScheme::Fused => self.nbits,
            UnfoldingScheme::Interleaved => self.nbits * self.ndims,
        }
    }

    /// Always false: a codec has at least one digit position
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of values a digit at `site` can take
    pub fn site_dim(&self, site: usize) -> Result<usize> {
        if site >= self.len() {
            return Err(QuanticsIndexError::SiteIndexOutOfBounds {
                site,
                max: self.len(),
            });
        }
        Ok(self.max_digit as usize)
    }

    /// Number of values each digit can take, per position
    pub fn local_dimensions(&self) -> Vec<usize> {
        vec![self.max_digit as usize; self.len()]
    }

    /// Convert indices to a quantics digit sequence.
    ///
    /// A single index given to a multi-dimensional codec is used for every
    /// dimension.
    pub fn encode(&self, indices: &[i64]) -> Result<Vec<i64>> {
        let mut result = vec![0i64; self.len()];
        self.encode_into(indices, &mut result)?;
        Ok(result)
    }

    /// Convert indices to a quantics digit sequence written into `out`.
    pub fn encode_into(&self, indices: &[i64], out: &mut [i64]) -> Result<()> {
        if out.len() != self.len() {
            return Err(QuanticsIndexError::shape(format!(
                "output buffer has length {}, expected {}",
                out.len(),
                self.len()
            )));
        }
        self.validate_indices(indices)?;
        self.encode_unchecked(indices, out);
        Ok(())
    }

    /// Convert a quantics digit sequence back to indices.
    pub fn decode(&self, quantics: &[i64]) -> Result<Vec<i64>> {
        let mut result = vec![0i64; self.ndims];
        self.decode_into(quantics, &mut result)?;
        Ok(result)
    }

    /// Convert a quantics digit sequence back to indices written into `out`.
    pub fn decode_into(&self, quantics: &[i64], out: &mut [i64]) -> Result<()> {
        if out.len() != self.ndims {
            return Err(QuanticsIndexError::shape(format!(
                "output buffer has length {}, expected {}",
                out.len(),
                self.ndims
            )));
        }
        self.validate_quantics(quantics)?;
        self.decode_unchecked(quantics, out);
        Ok(())
    }

    // ========================================================================
    // Private helper methods
    // ========================================================================

    fn validate_indices(&self, indices: &[i64]) -> Result<()> {
        if indices.len() != self.ndims && indices.len() != 1 {
            return Err(QuanticsIndexError::DimensionMismatch {
                expected: self.ndims,
                actual: indices.len(),
            });
        }
        for (dim, &value) in indices.iter().enumerate() {
            if value < 1 || value > self.max_index {
                return Err(QuanticsIndexError::IndexOutOfRange {
                    dim,
                    value,
                    max: self.max_index,
                });
            }
        }
        Ok(())
    }

    fn validate_quantics(&self, quantics: &[i64]) -> Result<()> {
        if quantics.len() != self.len() {
            return Err(QuanticsIndexError::WrongQuanticsLength {
                expected: self.len(),
                actual: quantics.len(),
            });
        }
        for (position, &value) in quantics.iter().enumerate() {
            if value < 1 || value > self.max_digit {
                return Err(QuanticsIndexError::DigitOutOfRange {
                    position,
                    value,
                    max: self.max_digit,
                });
            }
        }
        Ok(())
    }

    /// `indices` holds either `ndims` values or one value to broadcast.
    fn encode_unchecked(&self, indices: &[i64], out: &mut [i64]) {
        let index_of = |dim: usize| {
            if indices.len() == 1 {
                indices[0]
            } else {
                indices[dim]
            }
        };

        match self.unfolding_scheme {
            UnfoldingScheme::Fused => {
                out.fill(0);
                // Most significant dimension first so push_digit lands each
                // dimension at weight base^dim.
                for dim in (0..self.ndims).rev() {
                    let digits = LsbDigits::new(index_of(dim) - 1, self.base);
                    for (slot, digit) in out.iter_mut().rev().zip(digits) {
                        *slot = push_digit(*slot, digit, self.base);
                    }
                }
                for slot in out.iter_mut() {
                    *slot += 1;
                }
            }
            UnfoldingScheme::Interleaved => {
                for dim in 0..self.ndims {
                    let digits = LsbDigits::new(index_of(dim) - 1, self.base);
                    for (bit, digit) in (0..self.nbits).rev().zip(digits) {
                        out[bit * self.ndims + dim] = digit + 1;
                    }
                }
            }
        }
    }

    /// Fused digits are split and accumulated in the same pass.
    fn decode_unchecked(&self, quantics: &[i64], out: &mut [i64]) {
        out.fill(0);
        match self.unfolding_scheme {
            UnfoldingScheme::Fused => {
                for &value in quantics {
                    let digits = LsbDigits::new(value - 1, self.base);
                    for (acc, digit) in out.iter_mut().zip(digits) {
                        *acc = push_digit(*acc, digit, self.base);
                    }
                }
            }
            UnfoldingScheme::Interleaved => {
                for (position, &value) in quantics.iter().enumerate() {
                    let acc = &mut out[position % self.ndims];
                    *acc = push_digit(*acc, value - 1, self.base);
                }
            }
        }
        for acc in out.iter_mut() {
            *acc += 1;
        }
    }
}

/// Builder for QuanticsCodec
#[derive(Debug, Clone)]
pub struct QuanticsCodecBuilder {
    ndims: usize,
    nbits: usize,
    base: usize,
    unfolding_scheme: UnfoldingScheme,
}

impl QuanticsCodecBuilder {
    /// Create a new builder with base 2 and the fused scheme
    pub fn new(ndims: usize, nbits: usize) -> Self {
        Self {
            ndims,
            nbits,
            base: 2,
            unfolding_scheme: UnfoldingScheme::Fused,
        }
    }

    /// Set the numeric base (default 2)
    pub fn with_base(mut self, base: usize) -> Self {
        self.base = base;
        self
    }

    /// Set the unfolding scheme
    pub fn with_unfolding_scheme(mut self, scheme: UnfoldingScheme) -> Self {
        self.unfolding_scheme = scheme;
        self
    }

    /// Build the QuanticsCodec
    pub fn build(self) -> Result<QuanticsCodec> {
        let codec =
            QuanticsCodec::from_parts(self.base, self.ndims, self.nbits, self.unfolding_scheme)?;
        debug!(
            "built quantics codec: ndims={} nbits={} base={} scheme={}",
            codec.ndims, codec.nbits, codec.base, codec.unfolding_scheme
        );
        Ok(codec)
    }
}

// ============================================================================
// Base-2 convenience functions
// ============================================================================

/// Convert a single index in `[1, 2^nbits]` to its `nbits` binary digits.
///
/// # Example
/// ```
/// use quanticsindex::index_to_quantics;
///
/// // 5 - 1 = 0b0100
/// assert_eq!(index_to_quantics(5, 4).unwrap(), vec![1, 2, 1, 1]);
/// ```
pub fn index_to_quantics(index: i64, nbits: usize) -> Result<Vec<i64>> {
    index_to_quantics_nd(&[index], nbits, UnfoldingScheme::Fused)
}

/// Convert binary quantics digits back to a single index.
pub fn quantics_to_index(quantics: &[i64]) -> Result<i64> {
    let indices = quantics_to_index_nd(quantics, 1, UnfoldingScheme::Fused)?;
    Ok(indices[0])
}

/// Convert a tuple of indices, each in `[1, 2^nbits]`, to binary quantics
/// digits laid out according to `scheme`.
pub fn index_to_quantics_nd(
    indices: &[i64],
    nbits: usize,
    scheme: UnfoldingScheme,
) -> Result<Vec<i64>> {
    QuanticsCodec::from_parts(2, indices.len(), nbits, scheme)?.encode(indices)
}

/// Convert binary quantics digits laid out according to `scheme` back to
/// `ndims` indices. The number of digits per dimension follows from the
/// sequence length.
pub fn quantics_to_index_nd(
    quantics: &[i64],
    ndims: usize,
    scheme: UnfoldingScheme,
) -> Result<Vec<i64>> {
    let nbits = nbits_from_len(quantics.len(), ndims, scheme)?;
    QuanticsCodec::from_parts(2, ndims, nbits, scheme)?.decode(quantics)
}

fn nbits_from_len(len: usize, ndims: usize, scheme: UnfoldingScheme) -> Result<usize> {
    match scheme {
        UnfoldingScheme::Fused => Ok(len),
        UnfoldingScheme::Interleaved => {
            if ndims == 0 || len % ndims != 0 {
                return Err(QuanticsIndexError::shape(format!(
                    "sequence length {} is not divisible by {} dimensions",
                    len, ndims
                )));
            }
            Ok(len / ndims)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{deinterleave_dimensions, split_dimensions};

    #[test]
    fn test_index_to_quantics_basic() {
        // 5 - 1 = 0b0100
        assert_eq!(index_to_quantics(5, 4).unwrap(), vec![1, 2, 1, 1]);
        assert_eq!(quantics_to_index(&[1, 2, 1, 1]).unwrap(), 5);
        // 6 - 1 = 0b0101
        assert_eq!(index_to_quantics(6, 4).unwrap(), vec![1, 2, 1, 2]);
        assert_eq!(quantics_to_index(&[1, 1, 2, 2]).unwrap(), 4);
    }

    #[test]
    fn test_index_to_quantics_extremes() {
        assert_eq!(index_to_quantics(1, 3).unwrap(), vec![1, 1, 1]);
        assert_eq!(index_to_quantics(8, 3).unwrap(), vec![2, 2, 2]);
        assert_eq!(index_to_quantics(2, 1).unwrap(), vec![2]);
        assert_eq!(quantics_to_index(&[2]).unwrap(), 2);
    }

    #[test]
    fn test_fused_2d() {
        // 2 - 1 = 001, 6 - 1 = 101 -> per scale 1 + a + 2b
        let quantics = index_to_quantics_nd(&[2, 6], 3, UnfoldingScheme::Fused).unwrap();
        assert_eq!(quantics, vec![3, 1, 4]);
        let back = quantics_to_index_nd(&quantics, 2, UnfoldingScheme::Fused).unwrap();
        assert_eq!(back, vec![2, 6]);
    }

    #[test]
    fn test_interleaved_2d() {
        let quantics = index_to_quantics_nd(&[2, 6], 3, UnfoldingScheme::Interleaved).unwrap();
        assert_eq!(quantics, vec![1, 2, 1, 1, 2, 2]);
        let back = quantics_to_index_nd(&quantics, 2, UnfoldingScheme::Interleaved).unwrap();
        assert_eq!(back, vec![2, 6]);
    }

    #[test]
    fn test_fused_matches_split_then_decode() {
        let codec = QuanticsCodec::builder(3, 2).with_base(3).build().unwrap();
        for value in 1..=27i64 {
            for other in 1..=27i64 {
                let quantics = vec![value, other];
                let fast = codec.decode(&quantics).unwrap();
                let slow: Vec<i64> = split_dimensions(3, &quantics, 3)
                    .unwrap()
                    .iter()
                    .map(|digits| {
                        QuanticsCodec::builder(1, 2)
                            .with_base(3)
                            .build()
                            .unwrap()
                            .decode(digits)
                            .unwrap()[0]
                    })
                    .collect();
                assert_eq!(fast, slow);
            }
        }
    }

    #[test]
    fn test_interleaved_matches_deinterleave_then_decode() {
        let codec = QuanticsCodec::builder(2, 2)
            .with_unfolding_scheme(UnfoldingScheme::Interleaved)
            .build()
            .unwrap();
        let quantics = vec![2, 1, 1, 2];
        let lists = deinterleave_dimensions(&quantics, 2).unwrap();
        let expected: Vec<i64> = lists
            .iter()
            .map(|digits| quantics_to_index(digits).unwrap())
            .collect();
        assert_eq!(codec.decode(&quantics).unwrap(), expected);
        assert_eq!(expected, vec![3, 2]);
    }

    #[test]
    fn test_all_indices_roundtrip() {
        let codec = QuanticsCodec::builder(2, 2).build().unwrap();

        for x in 1..=4 {
            for y in 1..=4 {
                let indices = vec![x, y];
                let quantics = codec.encode(&indices).unwrap();
                let back = codec.decode(&quantics).unwrap();
                assert_eq!(back, indices, "Failed for indices {:?}", indices);
            }
        }
    }

    #[test]
    fn test_base3_codec() {
        let codec = QuanticsCodec::builder(1, 2).with_base(3).build().unwrap();

        assert_eq!(codec.base(), 3);
        assert_eq!(codec.max_index(), 9);
        assert_eq!(codec.encode(&[8]).unwrap(), vec![3, 2]); // 7 = 21 in base 3

        for x in 1..=9 {
            let quantics = codec.encode(&[x]).unwrap();
            assert_eq!(codec.decode(&quantics).unwrap(), vec![x]);
        }
    }

    #[test]
    fn test_broadcast_single_index() {
        let codec = QuanticsCodec::builder(2, 3).build().unwrap();
        assert_eq!(
            codec.encode(&[5]).unwrap(),
            codec.encode(&[5, 5]).unwrap()
        );
    }

    #[test]
    fn test_local_dimensions() {
        let fused = QuanticsCodec::builder(2, 3).build().unwrap();
        assert_eq!(fused.len(), 3);
        assert_eq!(fused.local_dimensions(), vec![4, 4, 4]);
        assert_eq!(fused.site_dim(2).unwrap(), 4);

        let interleaved = QuanticsCodec::builder(2, 3)
            .with_unfolding_scheme(UnfoldingScheme::Interleaved)
            .build()
            .unwrap();
        assert_eq!(interleaved.len(), 6);
        assert_eq!(interleaved.local_dimensions(), vec![2; 6]);
        assert!(matches!(
            interleaved.site_dim(6),
            Err(QuanticsIndexError::SiteIndexOutOfBounds { site: 6, max: 6 })
        ));
    }

    #[test]
    fn test_encode_into_decode_into() {
        let codec = QuanticsCodec::builder(2, 4).build().unwrap();
        let mut quantics = [0i64; 4];
        codec.encode_into(&[16, 1], &mut quantics).unwrap();
        assert_eq!(quantics, [2, 2, 2, 2]);

        let mut indices = [0i64; 2];
        codec.decode_into(&quantics, &mut indices).unwrap();
        assert_eq!(indices, [16, 1]);

        let mut short = [0i64; 3];
        assert!(matches!(
            codec.encode_into(&[1, 1], &mut short),
            Err(QuanticsIndexError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_error_index_out_of_range() {
        assert!(matches!(
            index_to_quantics(0, 3),
            Err(QuanticsIndexError::IndexOutOfRange { dim: 0, value: 0, max: 8 })
        ));
        assert!(matches!(
            index_to_quantics(9, 3),
            Err(QuanticsIndexError::IndexOutOfRange { value: 9, .. })
        ));
        assert!(matches!(
            index_to_quantics_nd(&[1, 5], 2, UnfoldingScheme::Interleaved),
            Err(QuanticsIndexError::IndexOutOfRange { dim: 1, value: 5, max: 4 })
        ));
    }

    #[test]
    fn test_error_digit_out_of_range() {
        assert!(matches!(
            quantics_to_index(&[1, 3]),
            Err(QuanticsIndexError::DigitOutOfRange { position: 1, value: 3, max: 2 })
        ));
        assert!(matches!(
            quantics_to_index_nd(&[5, 1], 2, UnfoldingScheme::Fused),
            Err(QuanticsIndexError::DigitOutOfRange { value: 5, max: 4, .. })
        ));
        assert!(matches!(
            quantics_to_index_nd(&[3, 1], 2, UnfoldingScheme::Interleaved),
            Err(QuanticsIndexError::DigitOutOfRange { value: 3, max: 2, .. })
        ));
    }

    #[test]
    fn test_error_wrong_length() {
        let codec = QuanticsCodec::builder(2, 3).build().unwrap();
        assert!(matches!(
            codec.decode(&[1, 1]),
            Err(QuanticsIndexError::WrongQuanticsLength { expected: 3, actual: 2 })
        ));
        assert!(matches!(
            codec.encode(&[1, 1, 1]),
            Err(QuanticsIndexError::DimensionMismatch { expected: 2, actual: 3 })
        ));
        assert!(matches!(
            quantics_to_index_nd(&[1, 2, 1], 2, UnfoldingScheme::Interleaved),
            Err(QuanticsIndexError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            quantics_to_index(&[]),
            Err(QuanticsIndexError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_error_invalid_builder() {
        assert!(matches!(
            QuanticsCodec::builder(1, 3).with_base(1).build(),
            Err(QuanticsIndexError::InvalidBase(1))
        ));
        assert!(matches!(
            QuanticsCodec::builder(0, 3).build(),
            Err(QuanticsIndexError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            QuanticsCodec::builder(1, 63).build(),
            Err(QuanticsIndexError::ResolutionTooLarge { r: 63, base: 2 })
        ));
        assert!(matches!(
            QuanticsCodec::builder(64, 1).build(),
            Err(QuanticsIndexError::ResolutionTooLarge { r: 64, base: 2 })
        ));
        // Interleaved digits stay base 2 regardless of ndims
        assert!(QuanticsCodec::builder(64, 1)
            .with_unfolding_scheme(UnfoldingScheme::Interleaved)
            .build()
            .is_ok());
    }

    #[test]
    fn test_largest_resolution() {
        let codec = QuanticsCodec::builder(1, 62).build().unwrap();
        let max = codec.max_index();
        assert_eq!(max, 1i64 << 62);
        let quantics = codec.encode(&[max]).unwrap();
        assert!(quantics.iter().all(|&d| d == 2));
        assert_eq!(codec.decode(&quantics).unwrap(), vec![max]);
    }
}
