// src/core/state/mod.rs

pub mod session;
pub mod templates;
