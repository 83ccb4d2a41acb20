use std::collections::HashMap;

use log::debug;

use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, SPolygon};
use crate::nfp::ShapeSignature;

/// A distinct shape of the input, as it first appeared
#[derive(Clone, Debug)]
pub struct CatalogEntry {
    pub shape: SPolygon,
    pub signature: ShapeSignature,
    pub area: f64,
    pub centroid: Point,
    pub first_edge: Point,
}

impl CatalogEntry {
    pub fn new(shape: SPolygon) -> Self {
        let centroid = shape.centroid();
        CatalogEntry {
            signature: ShapeSignature::new(&shape),
            area: shape.area,
            first_edge: shape.first_edge(),
            centroid,
            shape,
        }
    }
}

/// Deduplicated set of the shapes in a multiset of polygons, addressed by a dense index.
/// Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct ShapeCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<ShapeSignature, usize>,
}

impl ShapeCatalog {
    pub fn new<'a>(polygons: impl IntoIterator<Item = &'a SPolygon>) -> Self {
        let mut catalog = ShapeCatalog::default();
        let mut n_polygons = 0;
        for poly in polygons {
            n_polygons += 1;
            let signature = ShapeSignature::new(poly);
            if !catalog.index.contains_key(&signature) {
                catalog.index.insert(signature, catalog.entries.len());
                catalog.entries.push(CatalogEntry::new(poly.clone()));
            }
        }
        debug!(
            "[CAT] {} distinct shapes among {} polygons",
            catalog.entries.len(),
            n_polygons
        );
        catalog
    }

    /// Catalog index of the shape matching `poly`, if any
    pub fn lookup(&self, poly: &SPolygon) -> Option<usize> {
        self.index_of(&ShapeSignature::new(poly))
    }

    pub fn index_of(&self, signature: &ShapeSignature) -> Option<usize> {
        self.index.get(signature).copied()
    }

    pub fn entry(&self, idx: usize) -> &CatalogEntry {
        &self.entries[idx]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
