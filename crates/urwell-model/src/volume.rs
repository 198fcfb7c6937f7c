// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Volume-provider contract
//!
//! The geometry engine never builds detector solids itself; it consumes them
//! through these traits. Implementations wrap a solid-geometry backend (a
//! full simulation volume tree, or the idealized trapezoid prisms shipped
//! with the geometry crate).

use crate::{Line3, Result, TrapezoidDims, Variant};
use nalgebra::Isometry3;

/// A placed solid volume
pub trait Volume {
    /// Rigid transform from the volume's local frame to the global frame
    fn global_transform(&self) -> Isometry3<f64>;

    /// Intersect the infinite line through `line` with this solid
    ///
    /// Returns the clipped hit segments, possibly none when the line misses
    /// the solid entirely.
    fn intersect(&self, line: &Line3) -> Vec<Line3>;
}

/// Source of placed chamber volumes and their cross-section dimensions
///
/// Must be deterministic for fixed inputs: the strip caches are built once
/// from a single enumeration pass and are never refreshed.
pub trait VolumeSource: Send + Sync {
    /// The chamber volume for the given placement indices
    ///
    /// # Arguments
    /// * `region` - 1-based region number
    /// * `sector` - 1-based sector number
    /// * `chamber` - 0-based chamber index within the sector
    /// * `layer` - 1-based global layer number
    /// * `variant` - detector variant the volume tree was built for
    fn chamber_volume(
        &self,
        region: usize,
        sector: usize,
        chamber: usize,
        layer: usize,
        variant: Variant,
    ) -> Result<&dyn Volume>;

    /// Trapezoid half-dimensions of the given 0-based chamber
    fn chamber_dimensions(&self, chamber: usize) -> Result<TrapezoidDims>;
}
