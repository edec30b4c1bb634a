mod error;
mod graticule;
mod projection;
mod renderer;
mod topology;

pub use error::MapError;
pub use graticule::Graticule;
pub use projection::Projection;
pub use renderer::{load_land, MapRenderer, MapState};
pub use topology::{LandFeature, Topology};
