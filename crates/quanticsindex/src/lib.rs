//! Conversion between integer indices and their quantics digit representation.
//!
//! Quantics tensor trains represent a function of a large-range integer index
//! by the digits of that index, one digit per length scale. This crate provides
//! the index arithmetic: it turns tuples of 1-based indices into sequences of
//! 1-based digits and back, for any base and any number of dimensions.
//!
//! # Overview
//!
//! - [`fuse_dimensions`] / [`split_dimensions`]: combine digits of several
//!   dimensions into one digit of an enlarged base, and back
//! - [`interleave_dimensions`] / [`deinterleave_dimensions`]: round-robin
//!   rearrangement of several digit sequences, and back
//! - [`index_to_quantics`] / [`quantics_to_index`] and their `_nd` variants:
//!   binary conversions between indices and digit sequences
//! - [`QuanticsCodec`]: configurable conversions (base, dimensions,
//!   resolution, scheme) including parallel batch conversions
//! - [`QuanticsFunction`]: wraps a function of indices so it can be called with
//!   a digit sequence
//!
//! ## Conventions
//!
//! Indices lie in `[1, base^R]` and digits in `[1, base]`: digit `v` stands
//! for the mathematical digit `v - 1`. Digit sequences are ordered from the
//! coarsest scale (most significant digit) to the finest.
//!
//! ## Unfolding Schemes
//!
//! Two layouts are supported via [`UnfoldingScheme`]:
//!
//! - **Fused** (default): digits of all dimensions at the same scale form one
//!   digit of base `base^d`; the first dimension is least significant
//! - **Interleaved**: digits alternate between dimensions, `[a1, b1, a2, b2, ...]`
//!
//! # Quick Start
//!
//! ```
//! use quanticsindex::{index_to_quantics_nd, quantics_to_index_nd, UnfoldingScheme};
//!
//! let quantics = index_to_quantics_nd(&[2, 6], 3, UnfoldingScheme::Fused).unwrap();
//! assert_eq!(quantics, vec![3, 1, 4]);
//!
//! let indices = quantics_to_index_nd(&quantics, 2, UnfoldingScheme::Fused).unwrap();
//! assert_eq!(indices, vec![2, 6]);
//! ```
//!
//! # Other Bases
//!
//! ```
//! use quanticsindex::{QuanticsCodec, UnfoldingScheme};
//!
//! let codec = QuanticsCodec::builder(2, 4)
//!     .with_base(3)
//!     .with_unfolding_scheme(UnfoldingScheme::Interleaved)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(codec.max_index(), 81);
//! let quantics = codec.encode(&[80, 7]).unwrap();
//! assert_eq!(quantics.len(), 8);
//! assert_eq!(codec.decode(&quantics).unwrap(), vec![80, 7]);
//! ```
//!
//! # Error Handling
//!
//! Out-of-range input is rejected rather than wrapped:
//!
//! ```
//! use quanticsindex::{index_to_quantics, QuanticsIndexError};
//!
//! let result = index_to_quantics(9, 3);
//! assert!(matches!(result, Err(QuanticsIndexError::IndexOutOfRange { .. })));
//! ```

use std::fmt;
use std::str::FromStr;

mod batch;
mod codec;
mod digits;
mod error;
mod function;
mod interleave;
mod packing;

pub use codec::{
    index_to_quantics, index_to_quantics_nd, quantics_to_index, quantics_to_index_nd,
    QuanticsCodec, QuanticsCodecBuilder,
};
pub use error::{QuanticsIndexError, Result};
pub use function::{quantics_function, QuanticsFunction};
pub use interleave::{deinterleave_dimensions, interleave_dimensions};
pub use packing::{fuse_dimensions, split_dimensions};

/// Layout of a multi-dimensional quantics digit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnfoldingScheme {
    /// One digit of base `B` per position, alternating between variables.
    /// For variables (a, b) with R=2, produces: [a1, b1, a2, b2]
    Interleaved,
    /// Digits at the same scale are fused into one digit of base `B^d`.
    /// For variables (a, b) with R=2, produces: [a1 + B*b1, a2 + B*b2]
    #[default]
    Fused,
}

impl fmt::Display for UnfoldingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnfoldingScheme::Interleaved => f.write_str("interleaved"),
            UnfoldingScheme::Fused => f.write_str("fused"),
        }
    }
}

impl FromStr for UnfoldingScheme {
    type Err = QuanticsIndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "interleaved" => Ok(UnfoldingScheme::Interleaved),
            "fused" => Ok(UnfoldingScheme::Fused),
            _ => Err(QuanticsIndexError::UnsupportedScheme(s.to_string())),
        }
    }
}
