//! High-level interfaces for external services.
//!
//! Actors here sit on top of the networking actor and speak the domain of one
//! service each.

pub mod youtube;

pub use youtube::YouTubeApi;
