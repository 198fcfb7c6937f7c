// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Road dictionary with flat-text persistence
//!
//! One newline-delimited record per road. Reading applies the requested
//! binning and keys roads under a [`TestMode`]; the first road wins on key
//! collisions, duplicates are only counted.

use crate::road::{Particle, Road, TestMode};
use crate::Result;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Counters reported by a dictionary read
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ReadReport {
    /// Records parsed from the file
    pub parsed: usize,
    /// Records dropped because their key was already present
    pub duplicates: usize,
}

impl ReadReport {
    /// Records actually inserted
    pub fn kept(&self) -> usize {
        self.parsed - self.duplicates
    }
}

/// Road-to-particle lookup table
#[derive(Default)]
pub struct Dictionary {
    roads: FxHashMap<Vec<u8>, Road>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    /// The road stored under the given key
    pub fn road(&self, key: &[u8]) -> Option<&Road> {
        self.roads.get(key)
    }

    /// The particle stored under the given key
    pub fn particle(&self, key: &[u8]) -> Option<&Particle> {
        self.roads.get(key).map(Road::particle)
    }

    /// Insert a road keyed under `mode`; returns false on a duplicate key
    pub fn insert(&mut self, road: Road, mode: TestMode) -> bool {
        let key = road.key(mode);
        if self.roads.contains_key(&key) {
            return false;
        }
        self.roads.insert(key, road);
        true
    }

    /// Iterate over all (key, road) entries
    pub fn iter(&self) -> impl Iterator<Item = (&Vec<u8>, &Road)> {
        self.roads.iter()
    }

    /// Read roads from a flat-text dictionary file
    ///
    /// Applies the binning to every parsed road before keying it under
    /// `mode`. Stops after `max_roads` records when a cap is given. Blank
    /// lines are skipped; malformed lines abort the read.
    #[allow(clippy::too_many_arguments)]
    pub fn read_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        mode: TestMode,
        wire_bin: u8,
        strip_bin: u8,
        sector_dependent: bool,
        max_roads: Option<usize>,
    ) -> Result<ReadReport> {
        let reader = BufReader::new(File::open(path)?);
        let cap = max_roads.unwrap_or(usize::MAX);
        let mut report = ReadReport::default();

        for (index, line) in reader.lines().enumerate() {
            if report.parsed >= cap {
                break;
            }
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let mut road = Road::from_line(index + 1, &line)?;
            road.set_binning(wire_bin, strip_bin, sector_dependent);
            report.parsed += 1;
            if !self.insert(road, mode) {
                report.duplicates += 1;
            }
        }

        Ok(report)
    }

    /// Write all roads to a flat-text dictionary file, one record per line
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for road in self.roads.values() {
            writeln!(writer, "{road}")?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road_line(wire0: u8, sector: u8) -> String {
        format!("1 0.5 0.0 3.0 -1.0  {wire0} 12 22 32 42 52  7 3  18 19 20  1 {sector}")
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("urwell-roads-{}-{}", std::process::id(), name));
        path
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut dict = Dictionary::new();
        let road = Road::from_line(1, &road_line(10, 1)).unwrap();
        assert!(dict.insert(road.clone(), TestMode::Dc));

        let found = dict.road(&road.key(TestMode::Dc)).unwrap();
        assert_eq!(found.particle().charge, 1);
        assert!(dict.particle(&[0, 0, 0]).is_none());
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let mut dict = Dictionary::new();
        let first = Road::from_line(1, &road_line(10, 1)).unwrap();
        let mut second = first.clone();
        second.particle.vz = 99.0;

        assert!(dict.insert(first, TestMode::Dc));
        assert!(!dict.insert(second, TestMode::Dc));
        assert_eq!(dict.len(), 1);

        let key = dict.iter().next().unwrap().0.clone();
        assert_ne!(dict.particle(&key).unwrap().vz, 99.0);
    }

    #[test]
    fn test_file_round_trip() {
        let path = temp_path("round-trip");

        let mut dict = Dictionary::new();
        for wire in [10u8, 40, 70] {
            let road = Road::from_line(1, &road_line(wire, 2)).unwrap();
            dict.insert(road, TestMode::DcFtofPcalUvwHtcc);
        }
        dict.write_file(&path).unwrap();

        let mut back = Dictionary::new();
        let report = back
            .read_file(&path, TestMode::DcFtofPcalUvwHtcc, 1, 1, true, None)
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.parsed, 3);
        assert_eq!(report.duplicates, 0);
        assert_eq!(back.len(), dict.len());
    }

    #[test]
    fn test_read_applies_binning_and_counts_duplicates() {
        let path = temp_path("binning");
        // Wires 10 and 11 fall into one bin of width 4: the second road
        // collapses onto the first.
        std::fs::write(&path, format!("{}\n{}\n", road_line(10, 1), road_line(11, 1))).unwrap();

        let mut dict = Dictionary::new();
        let report = dict
            .read_file(&path, TestMode::Dc, 4, 1, false, None)
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.parsed, 2);
        assert_eq!(report.duplicates, 1);
        assert_eq!(report.kept(), 1);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_read_honors_road_cap() {
        let path = temp_path("cap");
        std::fs::write(
            &path,
            format!("{}\n{}\n{}\n", road_line(10, 1), road_line(40, 1), road_line(70, 1)),
        )
        .unwrap();

        let mut dict = Dictionary::new();
        let report = dict.read_file(&path, TestMode::Dc, 1, 1, true, Some(2)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(report.parsed, 2);
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_malformed_line_aborts() {
        let path = temp_path("malformed");
        std::fs::write(&path, "not a road\n").unwrap();

        let mut dict = Dictionary::new();
        let result = dict.read_file(&path, TestMode::Dc, 1, 1, true, None);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
