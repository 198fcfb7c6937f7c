// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Readout-plane fitting from a chamber's border strips

use nalgebra::Vector3;
use urwell_model::{Line3, Plane3, Variant};

const PARALLEL_EPS: f64 = 1e-12;

/// Fit the chamber readout plane from its first and last strip
///
/// The plane passes through the first strip's origin. Its normal is the
/// cross product of the first strip direction with the shortest bridge
/// segment between the two strip lines; the prototype layout is mirrored and
/// winds the cross product the other way.
///
/// Border strips of a chamber are parallel by construction, which is fine:
/// the bridge is perpendicular to both and the cross product stays well
/// defined. Returns `None` only when the two strip lines coincide and the
/// bridge collapses to zero length, degenerating the cross product; the
/// caller decides how to surface that.
pub fn fit_plane(first: &Line3, last: &Line3, variant: Variant) -> Option<Plane3> {
    let bridge = first.bridge_to(last);

    let strip_dir = first.direction();
    let bridge_dir = bridge.direction();

    let normal: Vector3<f64> = if variant.is_prototype() {
        bridge_dir.cross(&strip_dir)
    } else {
        strip_dir.cross(&bridge_dir)
    };

    let scale = strip_dir.norm_squared() * bridge_dir.norm_squared();
    if !(normal.norm_squared() > PARALLEL_EPS * scale) {
        return None;
    }

    Some(Plane3::new(first.origin, normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn border_strips() -> (Line3, Line3) {
        // Two parallel stereo strips offset across the chamber, the way a
        // chamber's first and last strip actually sit.
        let first = Line3::new(Point3::new(-5.0, -1.0, 0.0), Point3::new(5.0, 1.0, 0.0));
        let last = Line3::new(Point3::new(-5.0, 9.0, 0.0), Point3::new(5.0, 11.0, 0.0));
        (first, last)
    }

    #[test]
    fn test_plane_contains_both_strips() {
        let (first, last) = border_strips();
        let plane = fit_plane(&first, &last, Variant::Production).unwrap();
        assert_relative_eq!(plane.signed_distance(&first.origin), 0.0, epsilon = 1e-12);
        assert_relative_eq!(plane.signed_distance(&first.end), 0.0, epsilon = 1e-12);
        assert_relative_eq!(plane.signed_distance(&last.origin), 0.0, epsilon = 1e-12);
        // Coplanar strips: the normal points along z.
        assert_relative_eq!(plane.unit_normal().z.abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_prototype_flips_normal() {
        let (first, last) = border_strips();
        let production = fit_plane(&first, &last, Variant::Production).unwrap();
        let prototype = fit_plane(&first, &last, Variant::Prototype).unwrap();
        assert_relative_eq!(
            production.unit_normal(),
            -prototype.unit_normal(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_coincident_strips_degenerate() {
        let first = Line3::new(Point3::new(-5.0, 0.0, 0.0), Point3::new(5.0, 0.0, 0.0));
        let last = Line3::new(Point3::new(-2.0, 0.0, 0.0), Point3::new(8.0, 0.0, 0.0));
        assert!(fit_plane(&first, &last, Variant::Production).is_none());
    }
}
