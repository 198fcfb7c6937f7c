// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the geometry engine

use thiserror::Error;

/// Geometry engine result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry engine errors
///
/// All fatal conditions surface during factory construction; queries on a
/// built factory only fail on out-of-bounds keys.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or collaborator failure
    #[error(transparent)]
    Model(#[from] urwell_model::Error),

    /// Plane fitting hit two coincident reference strips
    #[error(
        "degenerate readout plane for sector {sector} layer {layer} chamber {chamber}: \
         reference strips are coincident"
    )]
    DegeneratePlane {
        sector: usize,
        layer: usize,
        chamber: usize,
    },

    /// Plane fitting found fewer than two clipped strips in a chamber
    #[error(
        "cannot fit readout plane for sector {sector} layer {layer} chamber {chamber}: \
         fewer than two strips survived volume clipping"
    )]
    MissingStrips {
        sector: usize,
        layer: usize,
        chamber: usize,
    },
}

impl Error {
    /// Create a degenerate-plane error
    pub fn degenerate_plane(sector: usize, layer: usize, chamber: usize) -> Self {
        Error::DegeneratePlane {
            sector,
            layer,
            chamber,
        }
    }

    /// Create a missing-strips error
    pub fn missing_strips(sector: usize, layer: usize, chamber: usize) -> Self {
        Error::MissingStrips {
            sector,
            layer,
            chamber,
        }
    }
}
