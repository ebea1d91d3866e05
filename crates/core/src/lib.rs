//! Core business logic for atelier.

pub mod services;

pub use services::*;
