//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis parser,
//! layout engine, and renderer. It includes:
//!
//! - **Identifiers**: Efficient string-interned node identifiers ([`identifier::Id`])
//! - **Colors**: CSS color handling and the default node palette ([`color`] module)
//! - **Geometry**: Points and bounding boxes in layout space ([`geometry`] module)
//! - **Semantic**: The parsed description of a graph ([`semantic`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod semantic;
