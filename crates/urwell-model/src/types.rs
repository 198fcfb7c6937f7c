// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core keys and dimension records
//!
//! This module defines the discrete addressing types used throughout the
//! strip-geometry system: the detector variant, the cache keys, and the
//! trapezoid half-dimensions of a chamber cross-section.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Detector configuration variant
///
/// The prototype is a smaller single-sector setup with a mirrored
/// readout-plane normal convention.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub enum Variant {
    #[default]
    Production,
    Prototype,
}

impl Variant {
    /// Whether this is the prototype layout
    pub fn is_prototype(self) -> bool {
        matches!(self, Variant::Prototype)
    }
}

/// Cache key addressing one strip: (sector, layer, strip), all 1-based
///
/// Strip numbering is contiguous across the chambers of a sector; chamber
/// boundaries follow from the cumulative per-chamber strip counts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct StripKey {
    pub sector: u16,
    pub layer: u16,
    pub strip: u16,
}

impl StripKey {
    /// Create a strip key from untyped indices
    pub fn new(sector: usize, layer: usize, strip: usize) -> Self {
        Self {
            sector: sector as u16,
            layer: layer as u16,
            strip: strip as u16,
        }
    }

    /// Pack the key into a single integer
    pub fn packed(self) -> u64 {
        (self.sector as u64) << 32 | (self.layer as u64) << 16 | self.strip as u64
    }
}

impl fmt::Display for StripKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}/l{}/strip{}", self.sector, self.layer, self.strip)
    }
}

/// Cache key addressing one chamber readout plane: sector and layer are
/// 1-based, the chamber index is 0-based
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ChamberKey {
    pub sector: u16,
    pub layer: u16,
    pub chamber: u16,
}

impl ChamberKey {
    /// Create a chamber key from untyped indices
    pub fn new(sector: usize, layer: usize, chamber: usize) -> Self {
        Self {
            sector: sector as u16,
            layer: layer as u16,
            chamber: chamber as u16,
        }
    }
}

impl fmt::Display for ChamberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}/l{}/chamber{}", self.sector, self.layer, self.chamber)
    }
}

/// Trapezoid half-dimensions of a chamber cross-section
///
/// The large base is parallel to the small base; the strip stereo angle is
/// anchored at the small-base corner. Both invariants are assumed by the
/// strip-counting formulas, so a dimension swap here silently shifts every
/// strip index downstream.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct TrapezoidDims {
    /// Half-height along the chamber y axis
    pub half_height: f64,
    /// Half-width of the small base (at -half_height)
    pub half_small_base: f64,
    /// Half-width of the large base (at +half_height)
    pub half_large_base: f64,
}

impl TrapezoidDims {
    /// Create a dimension triple
    pub fn new(half_height: f64, half_small_base: f64, half_large_base: f64) -> Self {
        Self {
            half_height,
            half_small_base,
            half_large_base,
        }
    }

    /// Reject dimensions that cannot describe the expected trapezoid
    pub fn validate(&self, chamber: usize) -> Result<()> {
        let all = [self.half_height, self.half_small_base, self.half_large_base];
        if all.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(Error::bad_dimensions(
                chamber,
                format!("half-dimensions must be finite and positive, got {all:?}"),
            ));
        }
        if self.half_small_base > self.half_large_base {
            return Err(Error::bad_dimensions(
                chamber,
                format!(
                    "small base {} wider than large base {}",
                    self.half_small_base, self.half_large_base
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_key_packing() {
        let key = StripKey::new(6, 4, 1024);
        assert_eq!(key.packed(), (6u64 << 32) | (4u64 << 16) | 1024);
        assert_ne!(key.packed(), StripKey::new(6, 5, 1024).packed());
    }

    #[test]
    fn test_dims_validation() {
        assert!(TrapezoidDims::new(10.0, 5.0, 8.0).validate(0).is_ok());
        assert!(TrapezoidDims::new(10.0, 8.0, 5.0).validate(0).is_err());
        assert!(TrapezoidDims::new(-1.0, 5.0, 8.0).validate(0).is_err());
        assert!(TrapezoidDims::new(f64::NAN, 5.0, 8.0).validate(0).is_err());
    }
}
