pub mod detectors;
pub mod json;
