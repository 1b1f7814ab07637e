// src/core/state/templates/mod.rs

pub mod state;
pub mod types;
