pub mod csv_service;
pub mod session;

pub use csv_service::*;
pub use session::*;
