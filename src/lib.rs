//! Procedural abstract black-and-white images.
//!
//! [`generate`] renders one image from a caller-owned random generator;
//! [`batch`] turns a range of indices into a directory of seeded JPEGs.

pub mod batch;
pub mod canvas;
pub mod config;
pub mod error;
pub mod logging;
pub mod pattern;
mod utils;

pub use canvas::{Canvas, Fill, Primitive};
pub use error::{Error, Result};
pub use pattern::{generate, generate_seeded, Style, DEFAULT_HEIGHT, DEFAULT_WIDTH};
