//! Core translation and history sync

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod sync;
