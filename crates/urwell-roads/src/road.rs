// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Road records: binned detector signatures matched to a particle
//!
//! A road is the discrete trace a charged particle leaves across the
//! tracking detectors: one representative wire per drift-chamber
//! superlayer, the scintillator paddles it crosses, the three calorimeter
//! strip views, and a Cherenkov mask, together with the generating particle.
//! Roads round-trip through one whitespace-delimited text line each.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of drift-chamber superlayers contributing one wire each
pub const N_SUPERLAYERS: usize = 6;

/// Generating particle parameters stored with each road
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Particle {
    pub charge: i8,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub vz: f64,
}

/// How much of a road participates in key matching
///
/// Each mode keys on the previous mode's fields plus more detectors.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum TestMode {
    /// Drift-chamber wires and sector only
    Dc,
    /// Adds the calorimeter U view
    DcPcalU,
    /// Adds the time-of-flight paddles
    DcFtofPcalU,
    /// Adds the calorimeter V and W views
    DcFtofPcalUvw,
    /// Adds the Cherenkov mask
    DcFtofPcalUvwHtcc,
}

impl TestMode {
    /// Whether this mode keys on at least everything `other` keys on
    pub fn contains(self, other: TestMode) -> bool {
        self >= other
    }
}

/// One road record
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Road {
    /// One representative wire per drift-chamber superlayer
    pub wires: [u8; N_SUPERLAYERS],
    /// Time-of-flight panel 1b paddle
    pub paddle1b: u8,
    /// Time-of-flight panel 2 paddle
    pub paddle2: u8,
    /// Calorimeter strip, U view
    pub pcal_u: u8,
    /// Calorimeter strip, V view
    pub pcal_v: u8,
    /// Calorimeter strip, W view
    pub pcal_w: u8,
    /// Cherenkov photomultiplier mask
    pub htcc: u8,
    /// Sector number (0 after sector-independent binning)
    pub sector: u8,
    /// The particle this road was generated from
    pub particle: Particle,
}

impl Road {
    /// Parse a road from one dictionary line
    ///
    /// Field order: charge px py pz vz, six wires, two paddles, three
    /// calorimeter strips, Cherenkov mask, sector. `line` is the 1-based
    /// line number used in error messages.
    pub fn from_line(line: usize, text: &str) -> Result<Road> {
        let mut fields = text.split_whitespace();
        let mut next = |name: &str| {
            fields
                .next()
                .ok_or_else(|| Error::parse(line, format!("missing field {name}")))
        };

        let parse_f64 = |name: &str, raw: &str| {
            raw.parse::<f64>()
                .map_err(|_| Error::parse(line, format!("bad {name}: {raw:?}")))
        };
        let parse_u8 = |name: &str, raw: &str| {
            raw.parse::<u8>()
                .map_err(|_| Error::parse(line, format!("bad {name}: {raw:?}")))
        };

        let raw = next("charge")?;
        let charge = raw
            .parse::<i8>()
            .map_err(|_| Error::parse(line, format!("bad charge: {raw:?}")))?;
        let px = parse_f64("px", next("px")?)?;
        let py = parse_f64("py", next("py")?)?;
        let pz = parse_f64("pz", next("pz")?)?;
        let vz = parse_f64("vz", next("vz")?)?;

        let mut wires = [0u8; N_SUPERLAYERS];
        for (i, wire) in wires.iter_mut().enumerate() {
            *wire = parse_u8("wire", next(&format!("wire{}", i + 1))?)?;
        }

        let paddle1b = parse_u8("paddle1b", next("paddle1b")?)?;
        let paddle2 = parse_u8("paddle2", next("paddle2")?)?;
        let pcal_u = parse_u8("pcalU", next("pcalU")?)?;
        let pcal_v = parse_u8("pcalV", next("pcalV")?)?;
        let pcal_w = parse_u8("pcalW", next("pcalW")?)?;
        let htcc = parse_u8("htcc", next("htcc")?)?;
        let sector = parse_u8("sector", next("sector")?)?;

        if fields.next().is_some() {
            return Err(Error::parse(line, "trailing fields"));
        }

        Ok(Road {
            wires,
            paddle1b,
            paddle2,
            pcal_u,
            pcal_v,
            pcal_w,
            htcc,
            sector,
            particle: Particle {
                charge,
                px,
                py,
                pz,
                vz,
            },
        })
    }

    /// Coarsen the road in place
    ///
    /// Wires and calorimeter strips collapse onto bins of the given widths;
    /// a sector-independent dictionary zeroes the sector byte so roads from
    /// all sectors share keys.
    pub fn set_binning(&mut self, wire_bin: u8, strip_bin: u8, sector_dependent: bool) {
        if wire_bin > 1 {
            for wire in self.wires.iter_mut() {
                *wire = bin(*wire, wire_bin);
            }
        }
        if strip_bin > 1 {
            self.pcal_u = bin(self.pcal_u, strip_bin);
            self.pcal_v = bin(self.pcal_v, strip_bin);
            self.pcal_w = bin(self.pcal_w, strip_bin);
        }
        if !sector_dependent {
            self.sector = 0;
        }
    }

    /// Matching key for the given test mode
    pub fn key(&self, mode: TestMode) -> Vec<u8> {
        let mut key = Vec::with_capacity(N_SUPERLAYERS + 7);
        key.extend_from_slice(&self.wires);
        key.push(self.sector);

        if mode.contains(TestMode::DcPcalU) {
            key.push(self.pcal_u);
        }
        if mode.contains(TestMode::DcFtofPcalU) {
            key.push(self.paddle1b);
            key.push(self.paddle2);
        }
        if mode.contains(TestMode::DcFtofPcalUvw) {
            key.push(self.pcal_v);
            key.push(self.pcal_w);
        }
        if mode.contains(TestMode::DcFtofPcalUvwHtcc) {
            key.push(self.htcc);
        }

        key
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }
}

/// Map a 1-based id onto the first id of its bin; 0 stays 0 (no signal)
fn bin(value: u8, size: u8) -> u8 {
    if value == 0 {
        0
    } else {
        (value - 1) / size * size + 1
    }
}

impl fmt::Display for Road {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.particle;
        write!(f, "{} {} {} {} {}", p.charge, p.px, p.py, p.pz, p.vz)?;
        for wire in &self.wires {
            write!(f, " {wire}")?;
        }
        write!(
            f,
            " {} {} {} {} {} {} {}",
            self.paddle1b, self.paddle2, self.pcal_u, self.pcal_v, self.pcal_w, self.htcc,
            self.sector
        )
    }
}
