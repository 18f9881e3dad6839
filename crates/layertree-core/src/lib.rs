//! Layertree Core Types and Definitions
//!
//! This crate provides the backend-agnostic value types a layer tree is made
//! of. It includes:
//!
//! - **Identifiers**: String-interned element identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points, sizes and transforms ([`geometry`] module)
//! - **Draw**: Layers, layer contents and their paint attributes ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
