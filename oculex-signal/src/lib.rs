pub mod attributes;
pub mod gaze;

pub use attributes::{AttrValue, Category, TrialAttributes};
pub use gaze::{DenseGazeBuffer, GazeSource};
