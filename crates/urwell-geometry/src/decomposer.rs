// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Chamber decomposition: strip counting and index mapping
//!
//! A chamber cross-section is a trapezoid with the large base CD parallel to
//! the small base AB and the stereo-angle apex anchored at corner A:
//!
//! ```text
//!   C-----------D
//!    \         /
//!     A-------B
//! ```
//!
//! Strips run at the stereo angle and are spaced at constant pitch measured
//! perpendicular to the strip direction. `nAB` counts pitch crossings along
//! the small base, `nAC` along the slanted side AC; the chamber holds
//! `nAB + nAC + 1` strips. Floor semantics in both counts are exact and
//! deliberate: boundary values decide whether an edge strip exists.

use crate::Result;
use urwell_model::{Config, TrapezoidDims, VolumeSource};

/// Maps sector-wide strip indices onto chambers
///
/// Built once per factory from the chamber dimensions; all counts and
/// cumulative sums are precomputed so index mapping is arithmetic only.
#[derive(Clone, Debug)]
pub struct ChamberDecomposer {
    dims: Vec<TrapezoidDims>,
    counts: Vec<usize>,
    cumulative: Vec<usize>,
}

impl ChamberDecomposer {
    /// Fetch and validate the chamber dimensions, then precompute strip
    /// counts for every chamber of a sector
    pub fn new(config: &Config, volumes: &dyn VolumeSource) -> Result<Self> {
        let mut dims = Vec::with_capacity(config.chambers());
        for chamber in 0..config.chambers() {
            let d = volumes.chamber_dimensions(chamber)?;
            d.validate(chamber)?;
            dims.push(d);
        }

        let counts: Vec<usize> = dims
            .iter()
            .map(|d| strip_count_for(d, config.pitch(), config.stereo_rad()))
            .collect();

        let mut cumulative = Vec::with_capacity(counts.len());
        let mut total = 0;
        for count in &counts {
            total += count;
            cumulative.push(total);
        }

        Ok(Self {
            dims,
            counts,
            cumulative,
        })
    }

    /// Number of chambers per sector
    pub fn chamber_count(&self) -> usize {
        self.counts.len()
    }

    /// Dimensions of the given 0-based chamber
    pub fn dims(&self, chamber: usize) -> Option<&TrapezoidDims> {
        self.dims.get(chamber)
    }

    /// Number of strips in the given 0-based chamber
    pub fn strip_count(&self, chamber: usize) -> Option<usize> {
        self.counts.get(chamber).copied()
    }

    /// Total number of strips in a sector
    pub fn strips_per_sector(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Index of the chamber containing the given 1-based sector-wide strip,
    /// or `None` beyond the sector total
    pub fn chamber_of(&self, strip: usize) -> Option<usize> {
        if strip == 0 {
            return None;
        }
        self.cumulative.iter().position(|&total| strip <= total)
    }

    /// 1-based strip index within its owning chamber
    pub fn local_strip(&self, strip: usize) -> Option<usize> {
        let chamber = self.chamber_of(strip)?;
        Some(strip - self.strips_before(chamber))
    }

    /// First 1-based sector-wide strip of the given chamber
    pub fn first_strip(&self, chamber: usize) -> Option<usize> {
        if chamber < self.counts.len() {
            Some(self.strips_before(chamber) + 1)
        } else {
            None
        }
    }

    /// Last 1-based sector-wide strip of the given chamber
    pub fn last_strip(&self, chamber: usize) -> Option<usize> {
        self.cumulative.get(chamber).copied()
    }

    fn strips_before(&self, chamber: usize) -> usize {
        if chamber == 0 {
            0
        } else {
            self.cumulative[chamber - 1]
        }
    }
}

/// Strip count of one trapezoidal chamber
///
/// `stereo` in radians. The two terms count pitch-spaced strip crossings on
/// the small base AB and on the slanted side AC; the diagonal term projects
/// the pitch onto AC through the angle between AC and the chamber axis.
fn strip_count_for(dims: &TrapezoidDims, pitch: f64, stereo: f64) -> usize {
    let n_ab = (2.0 * dims.half_small_base / (pitch / stereo.sin())).floor() as usize;

    let ac = ((dims.half_small_base - dims.half_large_base).powi(2)
        + (2.0 * dims.half_height).powi(2))
    .sqrt();
    let theta = (2.0 * dims.half_height / ac).acos();
    let n_ac = (ac / (pitch / (theta - stereo).cos())).floor() as usize;

    n_ab + n_ac + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use urwell_model::{ConstantsSource, Error, Result as ModelResult, Variant, Volume};

    struct FixedDims(Vec<TrapezoidDims>);

    impl VolumeSource for FixedDims {
        fn chamber_volume(
            &self,
            _region: usize,
            _sector: usize,
            _chamber: usize,
            _layer: usize,
            _variant: Variant,
        ) -> ModelResult<&dyn Volume> {
            Err(Error::volume("no volumes in this fixture"))
        }

        fn chamber_dimensions(&self, chamber: usize) -> ModelResult<TrapezoidDims> {
            self.0
                .get(chamber)
                .copied()
                .ok_or_else(|| Error::index("chamber", chamber, self.0.len() - 1))
        }
    }

    struct WideConstants(usize);

    impl ConstantsSource for WideConstants {
        fn pitch(&self) -> f64 {
            0.4
        }
        fn stereo_angle_deg(&self) -> f64 {
            15.0
        }
        fn tilt_angle_deg(&self) -> f64 {
            25.0
        }
        fn region_count(&self, _: Variant) -> usize {
            1
        }
        fn sector_count(&self, _: Variant) -> usize {
            6
        }
        fn chamber_count(&self, _: Variant) -> usize {
            self.0
        }
        fn layer_count(&self, _: Variant) -> usize {
            2
        }
    }

    fn decomposer(dims: Vec<TrapezoidDims>) -> ChamberDecomposer {
        let config = Config::new(&WideConstants(dims.len()), Variant::Production, 1).unwrap();
        ChamberDecomposer::new(&config, &FixedDims(dims)).unwrap()
    }

    #[test]
    fn test_known_trapezoid_strip_count() {
        // Hand-computed from the counting formulas: pitch 0.4, stereo 15 deg,
        // half-dims (10, 5, 8) give nAB = 6, nAC = 50, total 57.
        let d = decomposer(vec![TrapezoidDims::new(10.0, 5.0, 8.0)]);
        assert_eq!(d.strip_count(0), Some(57));
        assert_eq!(d.strips_per_sector(), 57);
    }

    #[test]
    fn test_strip_count_positive_for_thin_chamber() {
        let d = decomposer(vec![TrapezoidDims::new(0.5, 0.2, 0.3)]);
        assert!(d.strip_count(0).unwrap() >= 1);
    }

    #[test]
    fn test_cumulative_mapping() {
        let d = decomposer(vec![
            TrapezoidDims::new(10.0, 5.0, 8.0),
            TrapezoidDims::new(12.0, 8.0, 11.0),
        ]);
        let n0 = d.strip_count(0).unwrap();
        let n1 = d.strip_count(1).unwrap();
        assert_eq!(d.strips_per_sector(), n0 + n1);

        assert_eq!(d.chamber_of(1), Some(0));
        assert_eq!(d.chamber_of(n0), Some(0));
        assert_eq!(d.chamber_of(n0 + 1), Some(1));
        assert_eq!(d.chamber_of(n0 + n1), Some(1));
        assert_eq!(d.chamber_of(n0 + n1 + 1), None);
        assert_eq!(d.chamber_of(0), None);

        assert_eq!(d.local_strip(1), Some(1));
        assert_eq!(d.local_strip(n0), Some(n0));
        assert_eq!(d.local_strip(n0 + 1), Some(1));

        assert_eq!(d.first_strip(1), Some(n0 + 1));
        assert_eq!(d.last_strip(1), Some(n0 + n1));
    }

    #[test]
    fn test_chamber_of_monotonic() {
        let d = decomposer(vec![
            TrapezoidDims::new(10.0, 5.0, 8.0),
            TrapezoidDims::new(12.0, 8.0, 11.0),
            TrapezoidDims::new(14.0, 11.0, 15.0),
        ]);
        let mut previous = 0;
        for strip in 1..=d.strips_per_sector() {
            let chamber = d.chamber_of(strip).unwrap();
            assert!(chamber == previous || chamber == previous + 1);
            previous = chamber;
        }
        assert_eq!(previous, d.chamber_count() - 1);
    }

    #[test]
    fn test_bad_dimensions_rejected() {
        let config = Config::new(&WideConstants(1), Variant::Production, 1).unwrap();
        let source = FixedDims(vec![TrapezoidDims::new(10.0, 9.0, 5.0)]);
        assert!(ChamberDecomposer::new(&config, &source).is_err());
    }
}
