// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # uRWELL Strip Geometry Engine
//!
//! Computes the exact 3D geometry of every readout strip of the uRWELL
//! detector -- per chamber, layer, and sector -- and the fitted readout
//! plane of each chamber. Track reconstruction consumes the precomputed
//! segments to map raw strip hits onto spatial positions.
//!
//! ## Overview
//!
//! - **Chamber decomposition**: how many pitch-spaced stereo strips fit in a
//!   trapezoidal chamber, and which chamber owns a sector-wide strip index
//! - **Strip building**: idealized infinite strip lines, placed globally and
//!   clipped against the physical chamber solid
//! - **Frame transforms**: global, sector-tilted, and chamber-local views of
//!   the same segment
//! - **Plane fitting**: one readout plane per chamber from its border strips
//! - **Caching**: everything is computed once at construction; queries are
//!   O(1) lookups by discrete key
//!
//! Collaborators enter through the `urwell-model` traits: a
//! [`ConstantsSource`](urwell_model::ConstantsSource) for dimensions and
//! counts, and a [`VolumeSource`](urwell_model::VolumeSource) for placed
//! chamber solids. [`NominalVolumes`] ships an idealized trapezoid-prism
//! implementation so the engine runs without a simulation backend.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use urwell_geometry::{NominalVolumes, StripFactory};
//! use urwell_model::{Config, NominalConstants, Variant};
//!
//! let config = Config::new(&NominalConstants, Variant::Prototype, 1)?;
//! let volumes = Arc::new(NominalVolumes::nominal(&config)?);
//! let factory = StripFactory::with_config(config, volumes)?;
//!
//! if let Some(strip) = factory.strip(6, 1, 42) {
//!     println!("strip 42 runs {:?} -> {:?}", strip.origin, strip.end);
//! }
//! ```

pub mod builder;
pub mod decomposer;
pub mod error;
pub mod factory;
pub mod frames;
pub mod planes;
pub mod volumes;

// Re-export main types
pub use builder::StripBuilder;
pub use decomposer::ChamberDecomposer;
pub use error::{Error, Result};
pub use factory::StripFactory;
pub use frames::{to_chamber_local, to_tilted};
pub use planes::fit_plane;
pub use volumes::{NominalVolumes, PlacementParams, TrapezoidChamber};
