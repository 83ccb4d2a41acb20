use itertools::Itertools;
use log::{debug, info, warn};

use crate::NestError;
use crate::geometry::Region;
use crate::geometry::geo_traits::Shape;
use crate::geometry::primitives::{Point, SPolygon};
use crate::nfp::{MinkowskiNfp, NfpGenerator, NfpRecord, NfpStore, ShapeCatalog, ShapeSignature};
use crate::util::NfpCacheConfig;

/// Orchestrates the no-fit-polygons of a nesting run.
///
/// Geometrically identical polygons are collapsed into a [`ShapeCatalog`] and NFPs are computed
/// once per pair of distinct shapes. They are kept in a canonical frame (the stationary shape's
/// centroid at the origin, the orbiting shape referenced by its centroid) so a single entry serves
/// every pair of positioned instances of those shapes, and so the entry for `(j, i)` is the point
/// reflection of the entry for `(i, j)`.
pub struct NfpAssistant<G: NfpGenerator = MinkowskiNfp> {
    catalog: ShapeCatalog,
    /// `table[i][j]`: canonical NFP of catalog shape `i` (stationary) against `j` (orbiting)
    table: Vec<Vec<Option<Region>>>,
    generator: G,
    store: Option<Box<dyn NfpStore>>,
    config: NfpCacheConfig,
    n_generator_calls: usize,
}

impl<G: NfpGenerator> NfpAssistant<G> {
    /// Builds the catalog of `polygons`, restores history from `store` and fills the table
    /// eagerly, as configured. Fails only if the history cannot be read.
    pub fn new(
        polygons: &[SPolygon],
        generator: G,
        store: Option<Box<dyn NfpStore>>,
        config: NfpCacheConfig,
    ) -> Result<Self, NestError> {
        let catalog = ShapeCatalog::new(polygons);
        let n = catalog.len();
        let mut assistant = NfpAssistant {
            catalog,
            table: vec![vec![None; n]; n],
            generator,
            store,
            config,
            n_generator_calls: 0,
        };

        if config.load_history {
            assistant.load_history()?;
        }
        if config.eager {
            assistant.fill_table();
        }
        Ok(assistant)
    }

    /// NFP of `orbiting` against `stationary` at their current positions,
    /// expressed as the locus of `orbiting`'s reference vertex.
    pub fn resolve_nfp(
        &mut self,
        stationary: &SPolygon,
        orbiting: &SPolygon,
    ) -> Result<Region, NestError> {
        match (self.catalog.lookup(stationary), self.catalog.lookup(orbiting)) {
            (Some(i), Some(j)) => {
                let canonical = self.canonical_nfp(i, j)?;
                let offset = stationary.centroid() + (orbiting.reference_point() - orbiting.centroid());
                Ok(canonical.translated(offset))
            }
            _ => {
                //shapes unknown to the catalog (rotated instances) are never cached
                debug!("[NFP] uncatalogued pair, computing directly");
                self.n_generator_calls += 1;
                self.generator.compute(stationary, orbiting)
            }
        }
    }

    /// Canonical NFP of catalog shape `i` (stationary) against `j` (orbiting), computed if needed
    pub fn canonical_nfp(&mut self, i: usize, j: usize) -> Result<&Region, NestError> {
        if self.table[i][j].is_none() {
            let mirrored = match self.config.exploit_symmetry {
                true => self.table[j][i].as_ref().map(Region::reflected),
                false => None,
            };
            let nfp = match mirrored {
                Some(nfp) => nfp,
                None => self.compute_canonical(i, j)?,
            };
            self.table[i][j] = Some(nfp);
        }
        match &self.table[i][j] {
            Some(nfp) => Ok(nfp),
            None => Err(NestError::nfp("cache entry vanished")),
        }
    }

    fn compute_canonical(&mut self, i: usize, j: usize) -> Result<Region, NestError> {
        let (stat, orb) = (self.catalog.entry(i), self.catalog.entry(j));
        self.n_generator_calls += 1;
        let raw = self.generator.compute(&stat.shape, &orb.shape)?;

        //raw NFP is the locus of the orbiting reference vertex with the stationary shape in place
        let Point(rx, ry) = orb.shape.reference_point();
        let offset = Point(
            -stat.centroid.0 - rx + orb.centroid.0,
            -stat.centroid.1 - ry + orb.centroid.1,
        );
        let canonical = raw.translated(offset);

        if self.config.store_nfp {
            let record = NfpRecord {
                stationary: to_array(&stat.shape),
                orbiting: to_array(&orb.shape),
                nfp: canonical.to_nested(),
            };
            if let Some(store) = self.store.as_mut() {
                if let Err(e) = store.store(&record) {
                    warn!("[NFP] failed to persist NFP ({i}, {j}): {e}");
                }
            }
        }
        Ok(canonical)
    }

    fn load_history(&mut self) -> Result<(), NestError> {
        let Some(store) = self.store.as_ref() else {
            warn!("[NFP] history loading requested without a store");
            return Ok(());
        };
        let records = store.load()?;
        let n_records = records.len();
        let mut n_restored = 0;

        for record in records {
            match self.match_record(&record) {
                Ok((i, j)) => {
                    if self.table[i][j].is_none() {
                        self.table[i][j] = Some(Region::from_nested(&record.nfp));
                        n_restored += 1;
                    }
                }
                Err(e) => debug!("[NFP] skipping history record: {e}"),
            }
        }
        info!("[NFP] restored {n_restored} NFPs from {n_records} history records");
        Ok(())
    }

    fn match_record(&self, record: &NfpRecord) -> Result<(usize, usize), NestError> {
        let signature_of = |vertices: &[[f64; 2]]| {
            SPolygon::new(vertices.iter().map(|&p| Point::from(p)).collect())
                .map(|p| ShapeSignature::new(&p))
                .map_err(|e| NestError::Persistence(e.to_string()))
        };
        let stationary = signature_of(&record.stationary)?;
        let orbiting = signature_of(&record.orbiting)?;

        match (
            self.catalog.index_of(&stationary),
            self.catalog.index_of(&orbiting),
        ) {
            (Some(i), Some(j)) => Ok((i, j)),
            _ => Err(NestError::CacheMismatch {
                stationary,
                orbiting,
            }),
        }
    }

    fn fill_table(&mut self) {
        let n = self.catalog.len();
        let calls_before = self.n_generator_calls;
        for (i, j) in (0..n).cartesian_product(0..n) {
            if let Err(e) = self.canonical_nfp(i, j) {
                //left empty, resolving this pair during placement will fail again
                warn!("[NFP] eager computation of NFP ({i}, {j}) failed: {e}");
            }
        }
        info!(
            "[NFP] eager build of {n}x{n} table took {} generator calls",
            self.n_generator_calls - calls_before
        );
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// Number of times the NFP generator has been invoked
    pub fn n_generator_calls(&self) -> usize {
        self.n_generator_calls
    }

    /// Number of populated table entries
    pub fn n_cached(&self) -> usize {
        self.table.iter().flatten().filter(|e| e.is_some()).count()
    }
}

fn to_array(poly: &SPolygon) -> Vec<[f64; 2]> {
    poly.vertices.iter().map(|&p| p.into()).collect()
}
