use serde::{Deserialize, Serialize};

///Configuration of the NFP cache ([`NfpAssistant`](crate::nfp::NfpAssistant))
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct NfpCacheConfig {
    ///Compute the full table of distinct shape pairs when the cache is constructed
    pub eager: bool,
    ///Restore previously computed NFPs from the store at construction
    pub load_history: bool,
    ///Append every newly computed NFP to the store
    pub store_nfp: bool,
    ///Derive an NFP from its mirrored pair (by point reflection) when available
    pub exploit_symmetry: bool,
}

impl Default for NfpCacheConfig {
    fn default() -> Self {
        Self {
            eager: true,
            load_history: false,
            store_nfp: false,
            exploit_symmetry: true,
        }
    }
}

///Configuration of the adaptive polygon simplification, see [`simplify_adaptive`](crate::geometry::simplify_adaptive)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SimplifyConfig {
    ///Tolerance of the first simplification attempt, halved after each rejected attempt
    pub initial_tolerance: f64,
    ///Below this tolerance the original polygon is kept
    pub min_tolerance: f64,
    ///Minimum number of vertices the simplified polygon has to retain
    pub min_vertices: usize,
    ///Maximum deviation from the original area, as a fraction
    pub max_area_deviation: f64,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            initial_tolerance: 0.1,
            min_tolerance: 1e-4,
            min_vertices: 8,
            max_area_deviation: 0.01,
        }
    }
}
