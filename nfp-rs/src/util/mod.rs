/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

mod config;
mod fpa;

#[doc(inline)]
pub use config::NfpCacheConfig;
#[doc(inline)]
pub use config::SimplifyConfig;
#[doc(inline)]
pub use fpa::BIAS;
#[doc(inline)]
pub use fpa::FPA;
