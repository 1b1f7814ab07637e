// src/core/state/session/mod.rs

pub mod state;
pub mod types;
