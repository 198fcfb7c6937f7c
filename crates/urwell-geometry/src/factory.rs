// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strip factory: the eager cache of strip lines and readout planes
//!
//! Construction runs two enumeration passes -- strips, then planes -- and
//! either completes fully or fails without yielding a factory. Afterwards
//! every public query is a pure lookup; the caches are never mutated again,
//! so a built factory is safe to share across threads.

use crate::builder::StripBuilder;
use crate::decomposer::ChamberDecomposer;
use crate::{frames, planes, Error, Result};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use urwell_model::{
    ChamberKey, Config, ConstantsSource, Line3, Plane3, StripKey, Variant, VolumeSource,
};

/// Precomputed strip and readout-plane geometry for every chamber
pub struct StripFactory {
    config: Config,
    decomposer: ChamberDecomposer,
    volumes: Arc<dyn VolumeSource>,
    global: FxHashMap<StripKey, Line3>,
    tilted: FxHashMap<StripKey, Line3>,
    planes: FxHashMap<ChamberKey, Plane3>,
}

impl StripFactory {
    /// Build the factory from a constants source and a volume source
    ///
    /// `regions` requests the number of production regions to enumerate; the
    /// prototype variant ignores it. All geometry errors surface here.
    pub fn new(
        constants: &dyn ConstantsSource,
        volumes: Arc<dyn VolumeSource>,
        variant: Variant,
        regions: usize,
    ) -> Result<Self> {
        let config = Config::new(constants, variant, regions)?;
        Self::with_config(config, volumes)
    }

    /// Build the factory from an already validated configuration
    pub fn with_config(config: Config, volumes: Arc<dyn VolumeSource>) -> Result<Self> {
        let decomposer = ChamberDecomposer::new(&config, volumes.as_ref())?;

        let (global, tilted) = fill_strips(&config, &decomposer, volumes.as_ref())?;
        let planes = fill_planes(&config, &decomposer, &global)?;

        Ok(Self {
            config,
            decomposer,
            volumes,
            global,
            tilted,
            planes,
        })
    }

    /// The configuration this factory was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of strips in the given 0-based chamber
    pub fn strip_count(&self, chamber: usize) -> Result<usize> {
        self.config.check_chamber(chamber)?;
        self.decomposer
            .strip_count(chamber)
            .ok_or_else(|| urwell_model::Error::index("chamber", chamber, self.config.chambers() - 1).into())
    }

    /// Total number of strips in a sector
    pub fn strips_per_sector(&self) -> usize {
        self.decomposer.strips_per_sector()
    }

    /// Index of the chamber containing the given 1-based sector-wide strip
    pub fn chamber_of(&self, strip: usize) -> Option<usize> {
        self.decomposer.chamber_of(strip)
    }

    /// The strip segment in the global frame
    ///
    /// `None` both for keys outside the configured bounds and for in-range
    /// strips whose idealized line missed the physical chamber.
    pub fn strip(&self, sector: usize, layer: usize, strip: usize) -> Option<&Line3> {
        self.global.get(&StripKey::new(sector, layer, strip))
    }

    /// The strip segment in the sector-tilted frame
    pub fn tilted_strip(&self, sector: usize, layer: usize, strip: usize) -> Option<&Line3> {
        self.tilted.get(&StripKey::new(sector, layer, strip))
    }

    /// The strip segment in the local frame of the given 0-based chamber
    ///
    /// Computed on demand from the cached global segment and the chamber
    /// volume's inverse transform.
    pub fn chamber_strip(
        &self,
        region: usize,
        sector: usize,
        chamber: usize,
        layer: usize,
        strip: usize,
    ) -> Result<Option<Line3>> {
        self.config.check_chamber(chamber)?;
        let Some(global) = self.strip(sector, layer, strip) else {
            return Ok(None);
        };
        let volume = self.volumes.chamber_volume(
            region,
            sector,
            chamber,
            layer,
            self.config.variant(),
        )?;
        Ok(Some(frames::to_chamber_local(volume, global)))
    }

    /// The readout plane of the chamber owning the given strip
    ///
    /// The plane is addressed by any strip of the target chamber and
    /// resolved internally to the chamber-level entry.
    pub fn plane(&self, sector: usize, layer: usize, strip: usize) -> Result<&Plane3> {
        self.config.check_sector(sector)?;
        self.config.check_layer(layer)?;
        let chamber = self.chamber_of(strip).ok_or_else(|| {
            urwell_model::Error::index("strip", strip, self.strips_per_sector())
        })?;
        self.planes
            .get(&ChamberKey::new(sector, layer, chamber))
            .ok_or_else(|| {
                urwell_model::Error::index("layer", layer, self.config.layer_total()).into()
            })
    }
}

/// First pass: build and cache the global and tilted strip segments
fn fill_strips(
    config: &Config,
    decomposer: &ChamberDecomposer,
    volumes: &dyn VolumeSource,
) -> Result<(FxHashMap<StripKey, Line3>, FxHashMap<StripKey, Line3>)> {
    let builder = StripBuilder::new(config, decomposer, volumes);

    let mut global = FxHashMap::default();
    let mut tilted = FxHashMap::default();

    for region in 1..=config.regions() {
        for &sector in &config.sector_numbers() {
            for layer_index in 0..config.layers() {
                let layer = config.layer_in_region(region, layer_index);
                for strip in 1..=decomposer.strips_per_sector() {
                    let Some(line) = builder.build_global(sector, layer, strip)? else {
                        continue;
                    };
                    let key = StripKey::new(sector, layer, strip);
                    tilted.insert(key, frames::to_tilted(sector, config.tilt_deg(), &line));
                    global.insert(key, line);
                }
            }
        }
    }

    Ok((global, tilted))
}

/// Second pass: fit one readout plane per chamber from the cached strips
fn fill_planes(
    config: &Config,
    decomposer: &ChamberDecomposer,
    global: &FxHashMap<StripKey, Line3>,
) -> Result<FxHashMap<ChamberKey, Plane3>> {
    let mut plane_map = FxHashMap::default();

    for region in 1..=config.regions() {
        for &sector in &config.sector_numbers() {
            for layer_index in 0..config.layers() {
                let layer = config.layer_in_region(region, layer_index);
                for chamber in 0..decomposer.chamber_count() {
                    let plane =
                        fit_chamber_plane(config, decomposer, global, sector, layer, chamber)?;
                    plane_map.insert(ChamberKey::new(sector, layer, chamber), plane);
                }
            }
        }
    }

    Ok(plane_map)
}

/// Fit the plane of one chamber from its border strips
///
/// Volume clipping may have dropped a few strips at the chamber edges; the
/// fit uses the first and last strips actually present in the cache.
fn fit_chamber_plane(
    config: &Config,
    decomposer: &ChamberDecomposer,
    global: &FxHashMap<StripKey, Line3>,
    sector: usize,
    layer: usize,
    chamber: usize,
) -> Result<Plane3> {
    let missing = || Error::missing_strips(sector, layer, chamber);

    let lo = decomposer.first_strip(chamber).ok_or_else(missing)?;
    let hi = decomposer.last_strip(chamber).ok_or_else(missing)?;

    let first = (lo..=hi)
        .find_map(|strip| global.get(&StripKey::new(sector, layer, strip)).map(|l| (strip, l)))
        .ok_or_else(missing)?;
    let last = (lo..=hi)
        .rev()
        .find_map(|strip| global.get(&StripKey::new(sector, layer, strip)).map(|l| (strip, l)))
        .ok_or_else(missing)?;

    if first.0 == last.0 {
        return Err(missing());
    }

    planes::fit_plane(first.1, last.1, config.variant())
        .ok_or_else(|| Error::degenerate_plane(sector, layer, chamber))
}
