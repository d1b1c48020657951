//! HTTP handlers

pub mod extract;
pub mod health;
pub mod capture;
pub mod flows;
pub mod model;
