use serde::{Deserialize, Serialize};

/// External representation of a [`NestInstance`](crate::entities::NestInstance).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtInstance {
    /// Name of the instance
    pub name: String,
    pub container: ExtContainer,
    pub items: Vec<ExtItem>,
}

/// External representation of a [`Container`](crate::entities::Container).
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ExtContainer {
    pub width: f64,
    pub height: f64,
}

/// An item to be placed, possibly multiple times.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtItem {
    /// Unique identifier of the item
    pub id: u64,
    /// Number of copies to place
    #[serde(default = "default_demand")]
    pub demand: usize,
    /// Shape of the item
    pub shape: ExtSPolygon,
}

fn default_demand() -> usize {
    1
}

/// External representation of a [`SPolygon`](crate::geometry::primitives::SPolygon).
/// Vertices in order, a closing vertex equal to the first one is optional.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSPolygon(pub Vec<(f64, f64)>);

/// External representation of a [`NestSolution`](crate::entities::NestSolution).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSolution {
    /// Placed items, in the order of the input
    pub placed_items: Vec<ExtPlacedItem>,
    pub occupied_length: f64,
    /// Placed area relative to the area of the container
    pub density: f64,
    /// Placed area relative to the occupied part of the container
    pub usage: f64,
    /// Factor by which all items were scaled down to fit the container
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub scale_factor: Option<f64>,
    pub run_time_sec: u64,
}

/// An item copy at its final position.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedItem {
    /// The id of the item in the instance
    pub item_id: u64,
    /// Counterclockwise rotation in degrees applied around the centroid
    pub rotation: f64,
    /// The final shape of the copy
    pub shape: ExtSPolygon,
}
