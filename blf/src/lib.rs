use std::sync::LazyLock;
use std::time::Instant;

use nfp_rs::NestError;
use nfp_rs::entities::{NestInstance, NestSolution};
use nfp_rs::nfp::{MinkowskiNfp, NfpAssistant, NfpStore};

use crate::config::BLFConfig;
use crate::opt::blf_packer::BottomLeftFillPacker;

pub mod config;
pub mod io;
pub mod opt;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Nests all polygons of `instance` with the default NFP generator.
///
/// The NFP cache is built after any rescaling of the polygons, so that its catalog matches
/// the geometry being placed. `store` is used for NFP history, as configured in [`BLFConfig::nfp_cache`].
pub fn nest(
    instance: &NestInstance,
    config: BLFConfig,
    store: Option<Box<dyn NfpStore>>,
) -> Result<NestSolution, NestError> {
    let mut packer =
        BottomLeftFillPacker::new(instance.container, instance.polygons.clone(), config)?;
    let mut assistant =
        NfpAssistant::new(packer.polygons(), MinkowskiNfp, store, config.nfp_cache)?;
    packer.solve(&mut assistant)
}
