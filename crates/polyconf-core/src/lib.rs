//! Polyconf Core - Data tree and normalization for the multi-format
//! configuration renderer
//!
//! This crate provides the foundational types used throughout Polyconf:
//! - `ConfigNode`: the universal tagged-union tree (mapping/sequence/scalar)
//! - `Key`: mapping keys (plain strings or symbolic atoms)
//! - `normalize` / `deep_copy_mappings`: the pre-render normalization passes

pub mod error;
pub mod node;
pub mod normalize;

pub use error::{CoreError, Result};
pub use node::{ConfigNode, Key, Map, format_float};
pub use normalize::{deep_copy_mappings, normalize};
