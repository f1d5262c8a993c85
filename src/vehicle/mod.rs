pub mod airplane;

pub use airplane::{create_airplane, euler_deg_to_quaternion, presets, AirplaneBuilder};
