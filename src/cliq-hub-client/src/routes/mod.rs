// src/routes/mod.rs

pub mod router;
pub mod views;
