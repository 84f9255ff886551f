pub mod simulate;

pub use simulate::{SimulateConfig, SimulateMode};
