//! GRACIE Core - Foundational types shared by every GRACIE crate
//!
//! This crate provides:
//! - `Vec2` - 2D positions and velocities in surface pixels
//! - `Color` - straight-alpha RGBA with CSS-style hex parsing
//! - Error types and Result alias

mod error;
mod types;

pub use error::{GracieError, Result};
pub use types::{Color, Vec2};
