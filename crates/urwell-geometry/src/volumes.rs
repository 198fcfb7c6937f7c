// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Idealized trapezoidal chamber volumes
//!
//! A stand-in for a full detector-simulation volume tree: each chamber is a
//! trapezoidal prism placed by a rigid transform. Intersection clips the
//! infinite line against the prism's six bounding half-spaces in the local
//! frame, then maps the surviving interval back to the global frame.

use nalgebra::{Isometry3, Vector3};
use rustc_hash::FxHashMap;
use urwell_model::{
    Config, Error as ModelError, Line3, Result as ModelResult, TrapezoidDims, Variant, Volume,
    VolumeSource, SECTOR_STEP_DEG,
};

/// A trapezoidal prism chamber with a rigid placement
///
/// Local frame: x spans the bases, y runs from the small base (-half_height)
/// to the large base (+half_height), z is the thin readout direction.
#[derive(Clone, Debug)]
pub struct TrapezoidChamber {
    dims: TrapezoidDims,
    half_thickness: f64,
    placement: Isometry3<f64>,
}

impl TrapezoidChamber {
    pub fn new(dims: TrapezoidDims, half_thickness: f64, placement: Isometry3<f64>) -> Self {
        Self {
            dims,
            half_thickness,
            placement,
        }
    }

    /// The six bounding half-spaces, as (outward normal, offset) pairs with
    /// the solid satisfying `n . p <= k`
    fn half_spaces(&self) -> [(Vector3<f64>, f64); 6] {
        let d = &self.dims;
        // Side walls: x = +-(slope * y + mid) with the width interpolating
        // between the two bases.
        let slope = (d.half_large_base - d.half_small_base) / (2.0 * d.half_height);
        let mid = (d.half_small_base + d.half_large_base) / 2.0;

        [
            (Vector3::new(0.0, 0.0, 1.0), self.half_thickness),
            (Vector3::new(0.0, 0.0, -1.0), self.half_thickness),
            (Vector3::new(0.0, 1.0, 0.0), d.half_height),
            (Vector3::new(0.0, -1.0, 0.0), d.half_height),
            (Vector3::new(1.0, -slope, 0.0), mid),
            (Vector3::new(-1.0, -slope, 0.0), mid),
        ]
    }
}

impl Volume for TrapezoidChamber {
    fn global_transform(&self) -> Isometry3<f64> {
        self.placement
    }

    fn intersect(&self, line: &Line3) -> Vec<Line3> {
        let inv = self.placement.inverse();
        let origin = inv.transform_point(&line.origin);
        let dir = inv.transform_vector(&line.direction());

        // Clip the parametric line p(t) = origin + t dir against the convex
        // half-space intersection; the prism is bounded, so a non-empty
        // interval is always finite.
        let mut t_enter = f64::NEG_INFINITY;
        let mut t_exit = f64::INFINITY;

        for (normal, offset) in self.half_spaces() {
            let denom = normal.dot(&dir);
            let num = offset - normal.dot(&origin.coords);

            if denom.abs() < 1e-15 {
                if num < 0.0 {
                    return Vec::new();
                }
            } else {
                let t = num / denom;
                if denom > 0.0 {
                    t_exit = t_exit.min(t);
                } else {
                    t_enter = t_enter.max(t);
                }
            }
        }

        if t_enter >= t_exit || !t_enter.is_finite() || !t_exit.is_finite() {
            return Vec::new();
        }

        let clipped = Line3::new(origin + dir * t_enter, origin + dir * t_exit);
        vec![clipped.transformed(&self.placement)]
    }
}

/// Placement parameters for [`NominalVolumes`]
#[derive(Clone, Copy, Debug)]
pub struct PlacementParams {
    /// Chamber half-thickness along local z
    pub half_thickness: f64,
    /// Radial distance from the beam axis to the first chamber's small base
    pub radial_offset: f64,
    /// Gap between stacked chambers along the sector plane
    pub chamber_gap: f64,
    /// Separation between the two strip layers of a region along local z
    pub layer_gap: f64,
    /// Longitudinal step between regions along local z
    pub region_step: f64,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            half_thickness: 0.25,
            radial_offset: 150.0,
            chamber_gap: 0.2,
            layer_gap: 0.6,
            region_step: 30.0,
        }
    }
}

/// Idealized volume source: one trapezoid prism per (region, sector,
/// chamber, layer)
///
/// Chambers of a sector are stacked radially along the sector plane, tilted
/// by the polar tilt about y and rotated to the sector azimuth about z --
/// the same forward placement the tilted-frame transform undoes.
pub struct NominalVolumes {
    dims: Vec<TrapezoidDims>,
    chambers: FxHashMap<(usize, usize, usize, usize), TrapezoidChamber>,
}

impl NominalVolumes {
    /// Build volumes for every placement the configuration enumerates
    pub fn new(
        config: &Config,
        dims: Vec<TrapezoidDims>,
        params: PlacementParams,
    ) -> ModelResult<Self> {
        if dims.len() != config.chambers() {
            return Err(ModelError::volume(format!(
                "expected dimensions for {} chambers, got {}",
                config.chambers(),
                dims.len()
            )));
        }
        for (chamber, d) in dims.iter().enumerate() {
            d.validate(chamber)?;
        }

        let mut chambers = FxHashMap::default();
        for region in 1..=config.regions() {
            for &sector in &config.sector_numbers() {
                for layer_index in 0..config.layers() {
                    let layer = config.layer_in_region(region, layer_index);
                    let mut base = params.radial_offset;
                    for (chamber, d) in dims.iter().enumerate() {
                        let center_y = base + d.half_height;
                        let center_z = (region as f64 - 1.0) * params.region_step
                            + (layer_index as f64 - 0.5) * params.layer_gap;

                        let placement = placement_transform(
                            sector,
                            config.tilt_rad(),
                            center_y,
                            center_z,
                        );
                        chambers.insert(
                            (region, sector, chamber, layer),
                            TrapezoidChamber::new(*d, params.half_thickness, placement),
                        );

                        base += 2.0 * d.half_height + params.chamber_gap;
                    }
                }
            }
        }

        Ok(Self { dims, chambers })
    }

    /// Build volumes with the nominal chamber dimensions
    pub fn nominal(config: &Config) -> ModelResult<Self> {
        let dims = nominal_dims(config.chambers());
        Self::new(config, dims, PlacementParams::default())
    }
}

/// Forward placement: azimuthal rotation about z, polar tilt about y, then
/// the chamber's offset in the sector plane
fn placement_transform(
    sector: usize,
    tilt_rad: f64,
    center_y: f64,
    center_z: f64,
) -> Isometry3<f64> {
    let azimuth = (SECTOR_STEP_DEG * (sector as f64 - 1.0)).to_radians();
    Isometry3::rotation(Vector3::z() * azimuth)
        * Isometry3::rotation(Vector3::y() * tilt_rad)
        * Isometry3::translation(0.0, center_y, center_z)
}

/// Nominal trapezoid half-dimensions for a chamber stack
fn nominal_dims(chambers: usize) -> Vec<TrapezoidDims> {
    (0..chambers)
        .map(|i| {
            let i = i as f64;
            TrapezoidDims::new(25.0 + 5.0 * i, 28.0 + 22.0 * i, 50.0 + 26.0 * i)
        })
        .collect()
}

impl VolumeSource for NominalVolumes {
    fn chamber_volume(
        &self,
        region: usize,
        sector: usize,
        chamber: usize,
        layer: usize,
        _variant: Variant,
    ) -> ModelResult<&dyn Volume> {
        self.chambers
            .get(&(region, sector, chamber, layer))
            .map(|c| c as &dyn Volume)
            .ok_or_else(|| {
                ModelError::volume(format!(
                    "no chamber volume for region {region} sector {sector} \
                     chamber {chamber} layer {layer}"
                ))
            })
    }

    fn chamber_dimensions(&self, chamber: usize) -> ModelResult<TrapezoidDims> {
        self.dims
            .get(chamber)
            .copied()
            .ok_or_else(|| ModelError::index("chamber", chamber, self.dims.len() - 1))
    }
}
