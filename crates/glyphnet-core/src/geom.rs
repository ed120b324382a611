//! Geometry helpers shared by the translators and the render boundary.
//!
//! Positions in the canonical model are top-left corners; Escher node
//! positions are centers. Everything here works in center space.

use crate::model::{BoundingBox, CurveSegment, Features, TextFeatures};

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}

/// Default box for a metabolite node: primary nodes render larger.
pub fn metabolite_size(primary: bool) -> Size {
    if primary {
        size(60.0, 36.0)
    } else {
        size(40.0, 24.0)
    }
}

/// Default box for a reaction midpoint/junction marker.
pub const MARKER_SIZE: Size = Size::new(10.0, 10.0);

/// Default box for a reaction label, 5x the marker box.
pub fn marker_label_size() -> Size {
    size(5.0 * MARKER_SIZE.width, 5.0 * MARKER_SIZE.height)
}

/// Stand-off radius of a node: half the diagonal of its box.
pub fn radius(size: Size) -> f64 {
    0.5 * size.width.hypot(size.height)
}

pub fn bounding_box_center(bb: &BoundingBox) -> Point {
    point(bb.x + 0.5 * bb.width, bb.y + 0.5 * bb.height)
}

/// Midpoint of the first segment's start and the last segment's end.
pub fn curve_center(curve: &[CurveSegment]) -> Point {
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return point(0.0, 0.0);
    };
    point(
        0.5 * (first.start_x + last.end_x),
        0.5 * (first.start_y + last.end_y),
    )
}

/// Center of a graphical object's features: bounding box first, then curve,
/// else the origin.
pub fn features_center(features: &Features) -> Point {
    if let Some(bb) = &features.bounding_box {
        return bounding_box_center(bb);
    }
    if let Some(curve) = &features.curve {
        return curve_center(curve);
    }
    point(0.0, 0.0)
}

pub fn text_features_center(features: &TextFeatures) -> Point {
    match &features.bounding_box {
        Some(bb) => bounding_box_center(bb),
        None => point(0.0, 0.0),
    }
}

/// Angle of the line from `p1` to `p2`.
pub fn slope(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

/// Export-direction slope: vertical runs are treated as flat.
///
/// The import side uses the true arctangent (`slope`); the two directions are
/// intentionally not symmetric.
pub fn level_slope(p1: Point, p2: Point) -> f64 {
    if p1.x == p2.x {
        return 0.0;
    }
    slope(p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;
    use float_cmp::assert_approx_eq;

    fn segment(start: (f64, f64), end: (f64, f64)) -> CurveSegment {
        CurveSegment {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            base_point1_x: None,
            base_point1_y: None,
            base_point2_x: None,
            base_point2_y: None,
        }
    }

    #[test]
    fn bounding_box_center_is_midpoint() {
        let bb = BoundingBox {
            x: 70.0,
            y: 82.0,
            width: 60.0,
            height: 36.0,
        };
        let c = bounding_box_center(&bb);
        assert_approx_eq!(f64, c.x, 100.0);
        assert_approx_eq!(f64, c.y, 100.0);
    }

    #[test]
    fn curve_center_spans_first_start_to_last_end() {
        let curve = vec![segment((0.0, 0.0), (10.0, 10.0)), segment((10.0, 10.0), (20.0, 4.0))];
        let c = curve_center(&curve);
        assert_approx_eq!(f64, c.x, 10.0);
        assert_approx_eq!(f64, c.y, 2.0);
    }

    #[test]
    fn curve_center_defaults_to_origin() {
        let c = curve_center(&[]);
        assert_eq!((c.x, c.y), (0.0, 0.0));
    }

    #[test]
    fn slope_is_true_arctangent_for_vertical_runs() {
        let s = slope(point(5.0, 0.0), point(5.0, 3.0));
        assert_approx_eq!(f64, s, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn level_slope_flattens_vertical_runs() {
        assert_eq!(level_slope(point(5.0, 0.0), point(5.0, 3.0)), 0.0);
        assert_approx_eq!(
            f64,
            level_slope(point(0.0, 0.0), point(1.0, 1.0)),
            std::f64::consts::FRAC_PI_4
        );
    }

    #[test]
    fn default_sizes_match_the_size_table() {
        assert_eq!(metabolite_size(true), size(60.0, 36.0));
        assert_eq!(metabolite_size(false), size(40.0, 24.0));
        assert_eq!(MARKER_SIZE, size(10.0, 10.0));
        assert_eq!(marker_label_size(), size(50.0, 50.0));
    }

    #[test]
    fn radius_is_half_the_diagonal() {
        assert_approx_eq!(f64, radius(size(6.0, 8.0)), 5.0);
        assert_approx_eq!(f64, radius(MARKER_SIZE), 5.0 * 2.0_f64.sqrt());
    }
}
