//! # nael-core
//!
//! Core types, traits, settings, and error handling for Nael.

pub mod bus;
pub mod config;
pub mod error;
pub mod language;
pub mod message;
pub mod traits;

pub use config::shellexpand;
