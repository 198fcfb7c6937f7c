// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detector configuration and the constants-provider contract
//!
//! [`Config`] is the immutable snapshot of the constants a factory instance
//! runs with. Building it up front and passing it by reference replaces the
//! global mutable count fields of older strip-factory designs.

use crate::{Error, Result, Variant};
use serde::{Deserialize, Serialize};

/// Sector number used by the single-sector prototype setup
pub const PROTOTYPE_SECTOR: usize = 6;

/// Azimuthal step between neighboring sectors, degrees
pub const SECTOR_STEP_DEG: f64 = 60.0;

/// Source of physical constants and detector counts
///
/// Implementations wrap whatever constants store is available (a calibration
/// database, hard-coded nominal values, test fixtures). Must be
/// deterministic for fixed inputs.
pub trait ConstantsSource: Send + Sync {
    /// Strip pitch, in detector length units
    fn pitch(&self) -> f64;

    /// Strip stereo angle, degrees
    fn stereo_angle_deg(&self) -> f64;

    /// Detector polar tilt angle, degrees
    fn tilt_angle_deg(&self) -> f64;

    /// Number of regions (the maximum, for the production variant)
    fn region_count(&self, variant: Variant) -> usize;

    /// Number of azimuthal sectors
    fn sector_count(&self, variant: Variant) -> usize;

    /// Number of chambers per sector
    fn chamber_count(&self, variant: Variant) -> usize;

    /// Number of strip layers per region
    fn layer_count(&self, variant: Variant) -> usize;
}

/// Nominal constants for the uRWELL detector
///
/// Stands in for the calibration-database values until those are finalized.
#[derive(Clone, Copy, Debug, Default)]
pub struct NominalConstants;

impl ConstantsSource for NominalConstants {
    fn pitch(&self) -> f64 {
        0.1
    }

    fn stereo_angle_deg(&self) -> f64 {
        10.0
    }

    fn tilt_angle_deg(&self) -> f64 {
        25.0
    }

    fn region_count(&self, variant: Variant) -> usize {
        match variant {
            Variant::Production => 2,
            Variant::Prototype => 1,
        }
    }

    fn sector_count(&self, variant: Variant) -> usize {
        match variant {
            Variant::Production => 6,
            Variant::Prototype => 1,
        }
    }

    fn chamber_count(&self, variant: Variant) -> usize {
        match variant {
            Variant::Production => 3,
            Variant::Prototype => 1,
        }
    }

    fn layer_count(&self, _variant: Variant) -> usize {
        2
    }
}

/// Immutable geometry configuration
///
/// Fixed for the lifetime of a factory instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    variant: Variant,
    regions: usize,
    sectors: usize,
    chambers: usize,
    layers: usize,
    pitch: f64,
    stereo_deg: f64,
    tilt_deg: f64,
}

impl Config {
    /// Build a configuration snapshot from a constants source
    ///
    /// For the production variant `regions` is clamped to the source's
    /// maximum; the prototype ignores it and uses the fixed prototype
    /// counts. Unusable constants are rejected here, before any geometry is
    /// computed.
    pub fn new(
        constants: &dyn ConstantsSource,
        variant: Variant,
        regions: usize,
    ) -> Result<Self> {
        let regions = match variant {
            Variant::Production => regions.min(constants.region_count(variant)),
            Variant::Prototype => constants.region_count(variant),
        };

        let config = Self {
            variant,
            regions,
            sectors: constants.sector_count(variant),
            chambers: constants.chamber_count(variant),
            layers: constants.layer_count(variant),
            pitch: constants.pitch(),
            stereo_deg: constants.stereo_angle_deg(),
            tilt_deg: constants.tilt_angle_deg(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, count) in [
            ("region", self.regions),
            ("sector", self.sectors),
            ("chamber", self.chambers),
            ("layer", self.layers),
        ] {
            if count == 0 {
                return Err(Error::constants(format!("{name} count must be positive")));
            }
        }
        if !self.pitch.is_finite() || self.pitch <= 0.0 {
            return Err(Error::constants(format!(
                "pitch must be finite and positive, got {}",
                self.pitch
            )));
        }
        if !(0.0..90.0).contains(&self.stereo_deg) || self.stereo_deg == 0.0 {
            return Err(Error::constants(format!(
                "stereo angle must lie in (0, 90) degrees, got {}",
                self.stereo_deg
            )));
        }
        if !self.tilt_deg.is_finite() {
            return Err(Error::constants(format!(
                "tilt angle must be finite, got {}",
                self.tilt_deg
            )));
        }
        Ok(())
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_prototype(&self) -> bool {
        self.variant.is_prototype()
    }

    pub fn regions(&self) -> usize {
        self.regions
    }

    pub fn sectors(&self) -> usize {
        self.sectors
    }

    pub fn chambers(&self) -> usize {
        self.chambers
    }

    /// Layers per region
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Total layer count across all regions
    pub fn layer_total(&self) -> usize {
        self.regions * self.layers
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn stereo_deg(&self) -> f64 {
        self.stereo_deg
    }

    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    pub fn stereo_rad(&self) -> f64 {
        self.stereo_deg.to_radians()
    }

    pub fn tilt_rad(&self) -> f64 {
        self.tilt_deg.to_radians()
    }

    /// Global layer number for a region and a 0-based in-region layer index
    pub fn layer_in_region(&self, region: usize, layer_index: usize) -> usize {
        (region - 1) * self.layers + layer_index + 1
    }

    /// Region owning a global layer number
    pub fn region_of_layer(&self, layer: usize) -> usize {
        (layer - 1) / self.layers + 1
    }

    /// The sector numbers this configuration enumerates
    ///
    /// The prototype is a single module sitting in the slot of sector 6.
    pub fn sector_numbers(&self) -> Vec<usize> {
        if self.is_prototype() {
            vec![PROTOTYPE_SECTOR]
        } else {
            (1..=self.sectors).collect()
        }
    }

    /// Reject a sector number outside this configuration
    pub fn check_sector(&self, sector: usize) -> Result<()> {
        let valid = if self.is_prototype() {
            sector == PROTOTYPE_SECTOR
        } else {
            (1..=self.sectors).contains(&sector)
        };
        if valid {
            Ok(())
        } else {
            Err(Error::index("sector", sector, PROTOTYPE_SECTOR.max(self.sectors)))
        }
    }

    /// Reject a global layer number outside this configuration
    pub fn check_layer(&self, layer: usize) -> Result<()> {
        if (1..=self.layer_total()).contains(&layer) {
            Ok(())
        } else {
            Err(Error::index("layer", layer, self.layer_total()))
        }
    }

    /// Reject a 0-based chamber index outside this configuration
    pub fn check_chamber(&self, chamber: usize) -> Result<()> {
        if chamber < self.chambers {
            Ok(())
        } else {
            Err(Error::index("chamber", chamber, self.chambers - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_config() {
        let config = Config::new(&NominalConstants, Variant::Production, 2).unwrap();
        assert_eq!(config.regions(), 2);
        assert_eq!(config.sectors(), 6);
        assert_eq!(config.layer_total(), 4);
        assert_eq!(config.sector_numbers(), vec![1, 2, 3, 4, 5, 6]);
        assert!(config.check_sector(6).is_ok());
        assert!(config.check_sector(7).is_err());
    }

    #[test]
    fn test_region_clamping() {
        let config = Config::new(&NominalConstants, Variant::Production, 10).unwrap();
        assert_eq!(config.regions(), 2);
    }

    #[test]
    fn test_prototype_config() {
        let config = Config::new(&NominalConstants, Variant::Prototype, 5).unwrap();
        assert_eq!(config.regions(), 1);
        assert_eq!(config.sector_numbers(), vec![PROTOTYPE_SECTOR]);
        assert!(config.check_sector(PROTOTYPE_SECTOR).is_ok());
        assert!(config.check_sector(1).is_err());
    }

    #[test]
    fn test_layer_numbering() {
        let config = Config::new(&NominalConstants, Variant::Production, 2).unwrap();
        assert_eq!(config.layer_in_region(1, 0), 1);
        assert_eq!(config.layer_in_region(1, 1), 2);
        assert_eq!(config.layer_in_region(2, 0), 3);
        assert_eq!(config.region_of_layer(2), 1);
        assert_eq!(config.region_of_layer(3), 2);
    }

    #[test]
    fn test_bad_constants_rejected() {
        struct BadPitch;
        impl ConstantsSource for BadPitch {
            fn pitch(&self) -> f64 {
                0.0
            }
            fn stereo_angle_deg(&self) -> f64 {
                10.0
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
                3
            }
            fn layer_count(&self, _: Variant) -> usize {
                2
            }
        }
        assert!(Config::new(&BadPitch, Variant::Production, 1).is_err());
    }
}
