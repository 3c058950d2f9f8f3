//! Library entry point for the ytrss crate.
//! A caching proxy that republishes YouTube channel feeds as RSS 2.0.

pub mod api;
pub mod cache;
pub mod config;
pub mod env;
pub mod log;
pub mod net;
pub mod server;
pub mod transform;
pub mod utils;

pub use utils::*;

/// Capacity of the channel in front of every actor.
pub const BUFFER_SIZE: usize = 128;
