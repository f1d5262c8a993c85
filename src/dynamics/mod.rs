pub mod state;
pub mod sixdof;

pub use sixdof::update_physics;
pub use state::{Aircraft, AirData, SimConfig};
