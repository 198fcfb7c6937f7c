// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame transforms between the global, sector-tilted, and chamber-local
//! frames
//!
//! Both transforms are pure and are exact inverses of the forward placement
//! used when the strips were built, so local -> global -> local round-trips
//! reproduce the input to floating-point tolerance.

use urwell_model::{Line3, Volume, SECTOR_STEP_DEG};

/// Transform a global segment into the sector-tilted frame
///
/// Undoes the sector's azimuthal placement (sectors sit at 60 degree steps
/// around the beam axis) and then the detector polar tilt, yielding a frame
/// common to all sectors.
pub fn to_tilted(sector: usize, tilt_deg: f64, global: &Line3) -> Line3 {
    global
        .rotated_z((-SECTOR_STEP_DEG * (sector as f64 - 1.0)).to_radians())
        .rotated_y((-tilt_deg).to_radians())
}

/// Transform a global segment into a chamber's local frame
pub fn to_chamber_local(volume: &dyn Volume, global: &Line3) -> Line3 {
    global.transformed(&volume.global_transform().inverse())
}
