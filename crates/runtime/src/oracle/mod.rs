//! Adapters between content data, host randomness, and the engine.
mod content;
mod rng;

pub use content::ContentBundle;
pub use rng::{RecordingRng, StdRngOracle};
