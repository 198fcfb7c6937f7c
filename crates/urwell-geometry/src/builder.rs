// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strip line construction
//!
//! Builds the idealized infinite strip line in chamber coordinates, places
//! it in the global frame through the chamber volume's transform, and clips
//! it against the physical solid to obtain the real finite segment.

use crate::decomposer::ChamberDecomposer;
use crate::Result;
use nalgebra::Point3;
use urwell_model::{Config, Line3, VolumeSource};

/// Builds clipped strip segments in the global frame
pub struct StripBuilder<'a> {
    config: &'a Config,
    decomposer: &'a ChamberDecomposer,
    volumes: &'a dyn VolumeSource,
}

impl<'a> StripBuilder<'a> {
    pub fn new(
        config: &'a Config,
        decomposer: &'a ChamberDecomposer,
        volumes: &'a dyn VolumeSource,
    ) -> Self {
        Self {
            config,
            decomposer,
            volumes,
        }
    }

    /// Build the strip segment in the global frame
    ///
    /// Returns `Ok(None)` when the sector-wide strip index exceeds the
    /// sector total, and when the idealized line misses the physical solid
    /// (edge strips over-counted by the decomposition formulas). Collaborator
    /// failures propagate as errors.
    pub fn build_global(
        &self,
        sector: usize,
        layer: usize,
        strip: usize,
    ) -> Result<Option<Line3>> {
        let Some(chamber) = self.decomposer.chamber_of(strip) else {
            return Ok(None);
        };
        let Some(local) = self.decomposer.local_strip(strip) else {
            return Ok(None);
        };
        let Some(dims) = self.decomposer.dims(chamber) else {
            return Ok(None);
        };

        let stereo = self.config.stereo_rad();
        let pitch = self.config.pitch();

        // Renumber so that strip zero crosses the chamber origin: DY is the
        // y intercept of the strip line through the small-base corner B.
        let dy = -dims.half_height - stereo.tan() * dims.half_small_base;
        let n_zero = (dy * stereo.cos() / pitch).floor() as i64;
        let n = n_zero + (local as i64 - 1);

        // Layers alternate the stereo sign: crossed readout.
        let signed = if layer % 2 != 0 { -stereo } else { stereo };

        // Strip line y = m x + c on the z = 0 chamber plane, sampled at the
        // large-base half-width to span the full chamber.
        let m = signed.tan();
        let c = n as f64 * pitch / signed.cos();
        let x = dims.half_large_base;
        let ideal = Line3::new(
            Point3::new(-x, -x * m + c, 0.0),
            Point3::new(x, x * m + c, 0.0),
        );

        let region = self.config.region_of_layer(layer);
        let volume =
            self.volumes
                .chamber_volume(region, sector, chamber, layer, self.config.variant())?;

        let global = ideal.transformed(&volume.global_transform());

        // The decomposition slightly over-counts at chamber edges; a strip
        // whose line misses the solid simply does not exist.
        Ok(volume.intersect(&global).into_iter().next())
    }
}
