// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! uRWELL Roads - Trigger-road dictionary for track lookup
//!
//! A road is the set of detector elements a charged particle crossed,
//! recorded together with the generating particle. Dictionaries of roads
//! are persisted as flat text, one record per line, and queried by a
//! composite byte key whose width depends on the chosen [`TestMode`].
//!
//! # Example
//!
//! ```ignore
//! use urwell_roads::{Dictionary, TestMode};
//!
//! let mut dict = Dictionary::new();
//! let report = dict.read_file("roads.txt", TestMode::Dc, 4, 2, true, None)?;
//! println!("kept {} of {} roads", report.kept(), report.parsed);
//! ```

pub mod dictionary;
pub mod error;
pub mod road;

pub use dictionary::{Dictionary, ReadReport};
pub use error::{Error, Result};
pub use road::{Particle, Road, TestMode, N_SUPERLAYERS};
