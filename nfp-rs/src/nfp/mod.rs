mod assistant;
mod catalog;
mod ifr;
mod primitive;
mod signature;
mod store;

#[doc(inline)]
pub use assistant::NfpAssistant;
#[doc(inline)]
pub use catalog::{CatalogEntry, ShapeCatalog};
#[doc(inline)]
pub use ifr::inner_fit_rect;
#[doc(inline)]
pub use primitive::{MinkowskiNfp, NfpGenerator};
#[doc(inline)]
pub use signature::ShapeSignature;
#[doc(inline)]
pub use store::{JsonLinesNfpStore, MemoryNfpStore, NfpRecord, NfpStore};
