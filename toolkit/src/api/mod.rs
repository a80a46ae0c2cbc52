//! High-level API for easy library usage

pub mod builder;

pub use builder::SessionBuilder;
