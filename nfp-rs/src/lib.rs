//! No-fit-polygon engine for 2D irregular nesting.
//!
//! Provides the geometric building blocks used by placement heuristics: simple polygons and
//! their support primitives, a bridge to the boolean-operation kernel, a default NFP
//! primitive, the inner-fit rectangle and a deduplicating NFP cache ([`nfp::NfpAssistant`]).

/// Instances and solutions of the nesting problem
pub mod entities;

/// Domain errors raised while computing or resolving no-fit-polygons and placements
pub mod error;

/// Geometric primitives and the bridge to the polygon boolean-operation kernel
pub mod geometry;

/// Importing instances into and exporting solutions out of this library
pub mod io;

/// No-fit-polygon generation, shape catalog and cache
pub mod nfp;

/// Helper functions which do not belong to any specific module
pub mod util;

#[doc(inline)]
pub use error::NestError;
