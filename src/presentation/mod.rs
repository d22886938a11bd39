//! Terminal rendering of controller state.

pub mod grid;
pub mod print;

pub use grid::render_grid;
