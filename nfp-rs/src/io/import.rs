use anyhow::{Context, Result, ensure};
use log::{debug, info};

use crate::entities::{Container, NestInstance};
use crate::geometry::primitives::{Point, SPolygon};
use crate::geometry::simplify_adaptive;
use crate::io::ext_repr::{ExtInstance, ExtSPolygon};
use crate::util::SimplifyConfig;

/// Converts external representations of instances into internal ones.
#[derive(Clone, Debug, Copy, Default)]
pub struct Importer {
    /// Simplify every shape on import, see [`simplify_adaptive`]
    pub poly_simpl: Option<SimplifyConfig>,
}

impl Importer {
    pub fn new(poly_simpl: Option<SimplifyConfig>) -> Importer {
        Importer { poly_simpl }
    }

    /// Imports an instance, expanding every item into as many polygons as its demand
    pub fn import_instance(&self, ext_instance: &ExtInstance) -> Result<NestInstance> {
        let ExtInstance {
            name,
            container,
            items,
        } = ext_instance;
        ensure!(
            container.width > 0.0 && container.height > 0.0,
            "container dimensions must be positive, got {} x {}",
            container.width,
            container.height
        );

        let mut polygons = vec![];
        let mut item_ids = vec![];
        for item in items {
            let shape = import_simple_polygon(&item.shape)
                .with_context(|| format!("invalid shape for item {}", item.id))?;
            let shape = match &self.poly_simpl {
                Some(config) => simplify_adaptive(&shape, config),
                None => shape,
            };
            debug!(
                "[IO] item {}: {} vertices, area {:.3}, demand {}",
                item.id,
                shape.n_vertices(),
                shape.area,
                item.demand
            );
            for _ in 0..item.demand {
                polygons.push(shape.clone());
                item_ids.push(item.id);
            }
        }
        info!(
            "[IO] imported instance {name}: {} items expanded into {} polygons",
            items.len(),
            polygons.len()
        );

        Ok(NestInstance {
            name: name.clone(),
            container: Container {
                width: container.width,
                height: container.height,
            },
            polygons,
            item_ids,
        })
    }
}

pub fn import_simple_polygon(sp: &ExtSPolygon) -> Result<SPolygon> {
    SPolygon::new(sp.0.iter().map(|&p| Point::from(p)).collect())
}
