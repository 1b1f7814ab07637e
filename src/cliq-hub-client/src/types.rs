// src/types.rs
use crate::routes::views::ViewModule;

/// Produces a view module the first time its route is visited.
pub type ViewLoader = fn() -> ViewModule;
