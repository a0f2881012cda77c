//! Layout engines for positioning graph nodes.
//!
//! # Pipeline Position
//!
//! ```text
//! GraphSpec
//!     ↓ Graph::from_spec
//! Graph
//!     ↓ layout (this module)
//! Graph with node positions and layout bounds
//!     ↓ render
//! SVG
//! ```
//!
//! # Submodules
//!
//! - [`spring`] - Force-directed spring layout

pub mod spring;

pub use spring::{SpringConfig, SpringLayout};
