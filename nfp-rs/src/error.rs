use thiserror::Error;

use crate::nfp::ShapeSignature;

/// Errors raised by the NFP cache and the placement engines built on top of it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestError {
    /// The NFP primitive could not produce a feasible region for a pair of shapes
    #[error("no feasible sliding vector: {reason}")]
    NfpComputation {
        /// Why the primitive gave up
        reason: String,
    },

    /// No candidate position admits an instance, rotations included. Fatal to the run.
    #[error("no feasible placement for instance {instance} after trying {orientations} orientation(s)")]
    PlacementInfeasible {
        /// Index of the instance in the input order
        instance: usize,
        /// Number of orientations that were tried
        orientations: usize,
    },

    /// A persisted record refers to a shape that is not part of the current catalog
    #[error("persisted NFP record ({stationary:?}, {orbiting:?}) matches no catalog shape")]
    CacheMismatch {
        stationary: ShapeSignature,
        orbiting: ShapeSignature,
    },

    /// A configuration value is outside of its valid range, detected before any work is done
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Reading from or appending to an NFP store failed
    #[error("NFP store failure: {0}")]
    Persistence(String),
}

impl NestError {
    pub fn nfp(reason: impl Into<String>) -> Self {
        NestError::NfpComputation {
            reason: reason.into(),
        }
    }

    pub fn config(reason: impl Into<String>) -> Self {
        NestError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for NestError {
    fn from(err: std::io::Error) -> Self {
        NestError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for NestError {
    fn from(err: serde_json::Error) -> Self {
        NestError::Persistence(err.to_string())
    }
}
