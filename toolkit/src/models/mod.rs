pub mod chart;
pub mod dataset;
pub mod date_range;
pub mod matrix;
pub mod report;
pub mod value;

pub use chart::*;
pub use dataset::*;
pub use date_range::*;
pub use matrix::*;
pub use report::*;
pub use value::*;
