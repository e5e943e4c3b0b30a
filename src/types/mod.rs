pub mod coordinate;
pub mod dataset;
pub mod display_mode;
pub mod grid;
pub mod observation;
