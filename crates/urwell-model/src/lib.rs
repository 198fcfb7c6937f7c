// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! uRWELL Model - Shared types and collaborator traits for strip geometry
//!
//! This crate provides the core abstractions for the uRWELL strip-geometry
//! system: geometric primitives, discrete cache keys, the immutable detector
//! configuration, and the traits that decouple the geometry engine from its
//! constants and solid-volume providers.
//!
//! # Architecture
//!
//! - [`Line3`] / [`Plane3`] - strip segments and readout planes on top of
//!   nalgebra
//! - [`StripKey`] / [`ChamberKey`] - discrete cache addressing
//! - [`Config`] / [`ConstantsSource`] - immutable configuration snapshot and
//!   the constants-provider contract
//! - [`Volume`] / [`VolumeSource`] - the solid-volume provider contract
//!
//! # Example
//!
//! ```ignore
//! use urwell_model::{Config, NominalConstants, Variant};
//!
//! let config = Config::new(&NominalConstants, Variant::Production, 2)?;
//! assert_eq!(config.layer_total(), 4);
//! ```

pub mod config;
pub mod error;
pub mod prim;
pub mod types;
pub mod volume;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Vector3};

// Re-export all public types
pub use config::*;
pub use error::*;
pub use prim::*;
pub use types::*;
pub use volume::*;
