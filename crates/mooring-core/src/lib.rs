//! Mooring Core Types and Definitions
//!
//! This crate provides the foundational types for the Mooring schema
//! converter. It includes:
//!
//! - **Schema**: Tables, columns, and the Data Vault / Anchor kind tags
//!   ([`schema`] module)
//! - **Geometry**: Basic positioning types for diagram layout
//!   ([`geometry`] module)

pub mod geometry;
pub mod schema;
