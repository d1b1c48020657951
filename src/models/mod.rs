//! API models

pub mod capture;

pub use capture::*;
