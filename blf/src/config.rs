use serde::{Deserialize, Serialize};

use nfp_rs::NestError;
use nfp_rs::util::{NfpCacheConfig, SimplifyConfig};

/// Configuration for the Bottom-Left-Fill packer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct BLFConfig {
    /// Configuration of the NFP cache
    pub nfp_cache: NfpCacheConfig,
    /// Number of orientations tried per instance, evenly spread over a full turn.
    /// The first one is always the original orientation.
    pub n_rotations: usize,
    /// Place instances in descending order of [`OrderWeights`] score instead of input order
    pub sort_instances: bool,
    pub order_weights: OrderWeights,
    /// Uniformly scale all polygons down when one of them exceeds the container
    pub auto_scale: bool,
    /// Safety margin on the scale factor, as a fraction
    pub scale_margin: f64,
    /// Step of the grid searched for the position of the first instance
    pub grid_step: f64,
    /// Maximum overlap area tolerated between two instances, also the tolerance on the container bounds
    pub overlap_tolerance: f64,
    /// Padding added around the inner-fit rectangle before the NFPs are subtracted from it
    pub ifr_padding: f64,
    /// Candidates that overlap their neighbours by less than this area are retried at slightly shifted positions
    pub near_miss_area: f64,
    /// Size of the shift applied to near-miss candidates, zero disables the retry
    pub candidate_nudge: f64,
    /// Which instances a candidate placement is checked against
    pub overlap_scope: OverlapScope,
    /// Adaptive simplification of the polygons on import. Disabled if undefined
    pub poly_simpl: Option<SimplifyConfig>,
}

impl Default for BLFConfig {
    fn default() -> Self {
        Self {
            nfp_cache: NfpCacheConfig::default(),
            n_rotations: 4,
            sort_instances: true,
            order_weights: OrderWeights::default(),
            auto_scale: true,
            scale_margin: 0.05,
            grid_step: 1.0,
            overlap_tolerance: 1e-10,
            //2^-20, exactly representable so it does not perturb the region coordinates
            ifr_padding: 9.5367431640625e-7,
            near_miss_area: 1e-6,
            //2^-21
            candidate_nudge: 4.76837158203125e-7,
            overlap_scope: OverlapScope::PlacedOnly,
            poly_simpl: None,
        }
    }
}

impl BLFConfig {
    /// Rejects values the packer cannot run with
    pub fn validate(&self) -> Result<(), NestError> {
        if self.n_rotations == 0 {
            return Err(NestError::config("n_rotations must be at least 1"));
        }
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err(NestError::config(format!(
                "grid_step must be finite and positive, got {}",
                self.grid_step
            )));
        }
        if !(0.0..1.0).contains(&self.scale_margin) {
            return Err(NestError::config(format!(
                "scale_margin must lie in [0, 1), got {}",
                self.scale_margin
            )));
        }
        let non_negative = [
            ("overlap_tolerance", self.overlap_tolerance),
            ("ifr_padding", self.ifr_padding),
            ("near_miss_area", self.near_miss_area),
            ("candidate_nudge", self.candidate_nudge),
        ];
        match non_negative
            .into_iter()
            .find(|(_, v)| !(v.is_finite() && *v >= 0.0))
        {
            Some((name, v)) => Err(NestError::config(format!(
                "{name} must be finite and non-negative, got {v}"
            ))),
            None => Ok(()),
        }
    }
}

/// Weights of the terms of the placement order score
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct OrderWeights {
    /// Bounding box area, relative to the largest one
    pub bbox_area: f64,
    /// Number of vertices, relative to the largest number
    pub complexity: f64,
    /// Fraction of the bounding box not covered by the shape
    pub waste: f64,
}

impl Default for OrderWeights {
    fn default() -> Self {
        Self {
            bbox_area: 0.7,
            complexity: 0.1,
            waste: 0.2,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapScope {
    /// Only instances that have already been placed
    #[default]
    PlacedOnly,
    /// Every other instance, unplaced ones at their coordinates from before placement
    AllInstances,
}
