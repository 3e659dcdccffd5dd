//! Procedural weather icons.
//!
//! Icons are built from two primitives:
//!
//! - **Sun**: a square outline with eight rays (four straight, four diagonal)
//! - **Cloud**: a closed 16-segment path forming two side-by-side lobes
//!
//! Four variants are composed from these depending on the score bucket
//! (see [`crate::thresholds::Visibility::icon`]). All lengths are proportional
//! to the requested icon size and computed in integer per-mille fixed point,
//! rounded half away from zero, so every coordinate lands on a whole pixel.
//!
//! Geometry is produced as an [`IconGeometry`] shape list; drawing it is done by
//! [`crate::widgets::draw_icon`]. Later shapes are drawn over earlier ones, which
//! is how clouds hide parts of the sun.

use embedded_graphics::geometry::Point;
use heapless::Vec;

use crate::config::{round_permille, truncate_permille};
use crate::model::Score;
use crate::thresholds::Visibility;

// =============================================================================
// Geometry Constants
// =============================================================================

/// Straight ray length (per-mille of icon size).
const SUN_RAY: i32 = 150;

/// Diagonal ray length (per-mille of icon size).
const SUN_DIAGONAL_RAY: i32 = 120;

/// Side length of the sun square (per-mille of icon size).
const SUN_BOX: i32 = 460;

/// Distance from the icon top to the cloud's top edge, in pixels (not scaled).
pub const CLOUD_TOP_OFFSET: i32 = 16;

/// Number of segments in the cloud outline.
pub const CLOUD_SEGMENTS: usize = 16;

/// Number of points in the cloud outline (segments + start point).
pub const CLOUD_POINTS: usize = CLOUD_SEGMENTS + 1;

/// Cloud outline as relative moves: unit direction and length in per-mille of
/// icon size. Walks the left lobe anticlockwise from the top centre, along the
/// flat bottom, then up and over the right lobe back to the start.
const CLOUD_PATH: [(i32, i32, i32); CLOUD_SEGMENTS] = [
    (-1, 0, 190),  // left lobe, upper top
    (-1, 1, 110),  // left lobe, upper top-left corner
    (0, 1, 130),   // left lobe, upper left
    (-1, 0, 120),  // left lobe, lower top
    (-1, 1, 110),  // left lobe, lower top-left corner
    (0, 1, 230),   // left lobe, lower left
    (1, 1, 110),   // left lobe, bottom-left corner
    (1, 0, 400),   // left lobe, bottom
    (1, 0, 410),   // right lobe, bottom
    (1, -1, 110),  // right lobe, bottom-right corner
    (0, -1, 230),  // right lobe, lower right
    (-1, -1, 110), // right lobe, lower top-right corner
    (-1, 0, 180),  // right lobe, lower top
    (0, -1, 130),  // right lobe, upper right
    (-1, -1, 110), // right lobe, upper top-right corner
    (-1, 0, 110),  // right lobe, upper top
];

/// Size of the secondary element in composite icons (per-mille).
const COMPOSITE_SCALE: i32 = 660;

/// Partly cloudy: downward shift of the cloud (per-mille of icon size).
const PARTLY_CLOUD_SHIFT_Y: i32 = 70;

/// Mostly cloudy: upward shift of the cloud (per-mille of icon size).
const MOSTLY_CLOUD_SHIFT_Y: i32 = 140;

/// Very cloudy: size reduction and offset unit (per-mille of icon size).
const VERY_CLOUDY_ADJUST: i32 = 100;

/// Upper bound on shapes in one icon (partly cloudy: 12 sun lines + 1 cloud).
pub const MAX_ICON_SHAPES: usize = 16;

// =============================================================================
// Icon Variants
// =============================================================================

/// The four icon variants.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IconKind {
    /// Sun only.
    Sun,
    /// Full sun with a smaller cloud over its lower half.
    PartlyCloudy,
    /// Small sun peeking out from behind a full-size cloud.
    MostlyCloudy,
    /// Two overlapping clouds, no sun.
    VeryCloudy,
}

impl IconKind {
    /// Icon for a score. The unloaded sentinel maps to [`IconKind::VeryCloudy`].
    #[inline]
    pub const fn for_score(score: Score) -> Self { Visibility::from_score(score).icon() }
}

// =============================================================================
// Shapes
// =============================================================================

/// Closed cloud outline in absolute coordinates.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CloudPath {
    pub points: [Point; CLOUD_POINTS],
}

/// One drawable element of an icon.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IconShape {
    /// Sun stroke (square edge or ray).
    SunLine { start: Point, end: Point },
    /// Cloud, filled with the background colour then outlined.
    Cloud(CloudPath),
}

/// Ordered list of shapes making up one icon. Draw in order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct IconGeometry {
    shapes: Vec<IconShape, MAX_ICON_SHAPES>,
}

impl IconGeometry {
    /// Geometry for the icon matching `score`, drawn in a `size x size` box at `pos`.
    pub fn for_score(
        score: Score,
        pos: Point,
        size: i32,
    ) -> Self {
        Self::build(IconKind::for_score(score), pos, size)
    }

    /// Geometry for an icon variant.
    pub fn build(
        kind: IconKind,
        pos: Point,
        size: i32,
    ) -> Self {
        let mut geometry = Self::default();
        match kind {
            IconKind::Sun => geometry.push_sun(pos, size),
            IconKind::PartlyCloudy => {
                geometry.push_sun(pos, size);
                geometry.push_cloud(
                    Point::new(pos.x, offset_permille(pos.y, size, PARTLY_CLOUD_SHIFT_Y)),
                    truncate_permille(size, COMPOSITE_SCALE),
                );
            }
            IconKind::MostlyCloudy => {
                geometry.push_sun(
                    Point::new(offset_permille(pos.x, size, 1000 - COMPOSITE_SCALE), pos.y),
                    truncate_permille(size, COMPOSITE_SCALE),
                );
                geometry.push_cloud(Point::new(pos.x, offset_permille(pos.y, size, -MOSTLY_CLOUD_SHIFT_Y)), size);
            }
            IconKind::VeryCloudy => {
                // The vertical nudge follows the anchor's x, so icons further
                // right sit slightly higher.
                let adjustment_y = -round_permille(pos.x, VERY_CLOUDY_ADJUST);
                let adjustment_size = round_permille(size, VERY_CLOUDY_ADJUST);
                let cloud_size = size - adjustment_size;
                geometry.push_cloud(
                    Point::new(pos.x + adjustment_size * 3, pos.y + adjustment_y - adjustment_size * 2),
                    cloud_size,
                );
                geometry.push_cloud(Point::new(pos.x, pos.y + adjustment_y), cloud_size);
            }
        }
        geometry
    }

    /// Shapes in draw order.
    #[inline]
    pub fn shapes(&self) -> &[IconShape] { &self.shapes }

    /// Number of cloud shapes.
    pub fn cloud_count(&self) -> usize { self.shapes.iter().filter(|s| matches!(s, IconShape::Cloud(_))).count() }

    /// Number of sun strokes.
    pub fn sun_line_count(&self) -> usize {
        self.shapes
            .iter()
            .filter(|s| matches!(s, IconShape::SunLine { .. }))
            .count()
    }

    fn push_sun(
        &mut self,
        pos: Point,
        size: i32,
    ) {
        for (start, end) in sun_lines(pos, size) {
            self.shapes.push(IconShape::SunLine { start, end }).ok();
        }
    }

    fn push_cloud(
        &mut self,
        pos: Point,
        size: i32,
    ) {
        self.shapes.push(IconShape::Cloud(cloud_path(pos, size))).ok();
    }
}

// =============================================================================
// Primitive Builders
// =============================================================================

/// `base + value * permille / 1000`, truncated toward zero as a whole.
#[inline]
const fn offset_permille(
    base: i32,
    value: i32,
    permille: i32,
) -> i32 {
    (base * 1000 + value * permille) / 1000
}

/// Sun strokes: four square edges followed by eight rays.
pub fn sun_lines(
    pos: Point,
    size: i32,
) -> [(Point, Point); 12] {
    let ray = round_permille(size, SUN_RAY);
    let diagonal = round_permille(size, SUN_DIAGONAL_RAY);
    let box_size = round_permille(size, SUN_BOX);
    let gap = (size - box_size - ray * 2) / 2;
    let center_x = pos.x + size / 2;
    let center_y = pos.y + size / 2;

    let top_left = Point::new(pos.x + ray + gap, pos.y + ray + gap);
    let top_right = top_left + Point::new(box_size, 0);
    let bottom_left = top_left + Point::new(0, box_size);
    let bottom_right = top_left + Point::new(box_size, box_size);

    let left = pos.x;
    let top = pos.y;
    let right = pos.x + size;
    let bottom = pos.y + size;

    [
        // Square
        (top_left, top_right),
        (top_right, bottom_right),
        (bottom_right, bottom_left),
        (bottom_left, top_left),
        // Straight rays
        (Point::new(center_x, top), Point::new(center_x, top + ray)),
        (Point::new(center_x, bottom - ray), Point::new(center_x, bottom)),
        (Point::new(left, center_y), Point::new(left + ray, center_y)),
        (Point::new(right - ray, center_y), Point::new(right, center_y)),
        // Diagonal rays
        (
            Point::new(left + gap, top + gap),
            Point::new(left + gap + diagonal, top + gap + diagonal),
        ),
        (
            Point::new(right - gap, top + gap),
            Point::new(right - gap - diagonal, top + gap + diagonal),
        ),
        (
            Point::new(left + gap, bottom - gap),
            Point::new(left + gap + diagonal, bottom - gap - diagonal),
        ),
        (
            Point::new(right - gap, bottom - gap),
            Point::new(right - gap - diagonal, bottom - gap - diagonal),
        ),
    ]
}

/// Cloud outline starting at the top centre of the icon box.
pub fn cloud_path(
    pos: Point,
    size: i32,
) -> CloudPath {
    let mut points = [Point::zero(); CLOUD_POINTS];
    let mut current = Point::new(pos.x + size / 2, pos.y + CLOUD_TOP_OFFSET);
    points[0] = current;

    for (i, &(dx, dy, permille)) in CLOUD_PATH.iter().enumerate() {
        let length = round_permille(size, permille);
        current += Point::new(dx * length, dy * length);
        points[i + 1] = current;
    }

    CloudPath { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SCORE_UNLOADED;

    #[test]
    fn test_icon_kind_for_score() {
        assert_eq!(IconKind::for_score(10), IconKind::Sun);
        assert_eq!(IconKind::for_score(8), IconKind::Sun);
        assert_eq!(IconKind::for_score(7), IconKind::PartlyCloudy);
        assert_eq!(IconKind::for_score(6), IconKind::PartlyCloudy);
        assert_eq!(IconKind::for_score(5), IconKind::MostlyCloudy);
        assert_eq!(IconKind::for_score(3), IconKind::MostlyCloudy);
        assert_eq!(IconKind::for_score(2), IconKind::VeryCloudy);
        assert_eq!(IconKind::for_score(SCORE_UNLOADED), IconKind::VeryCloudy);
    }

    #[test]
    fn test_sun_geometry_size_30() {
        let lines = sun_lines(Point::zero(), 30);

        // ray 5, diagonal 4, box 14, gap 3
        assert_eq!(lines[0], (Point::new(8, 8), Point::new(22, 8)), "top edge");
        assert_eq!(lines[2], (Point::new(22, 22), Point::new(8, 22)), "bottom edge");
        assert_eq!(lines[4], (Point::new(15, 0), Point::new(15, 5)), "top ray");
        assert_eq!(lines[7], (Point::new(25, 15), Point::new(30, 15)), "right ray");
        assert_eq!(lines[8], (Point::new(3, 3), Point::new(7, 7)), "top-left diagonal");
        assert_eq!(lines[11], (Point::new(27, 27), Point::new(23, 23)), "bottom-right diagonal");
    }

    #[test]
    fn test_sun_straight_rays_longer_than_diagonal() {
        let lines = sun_lines(Point::zero(), 40);
        let straight = lines[4].1.y - lines[4].0.y;
        let diagonal = lines[8].1.x - lines[8].0.x;
        assert!(straight > diagonal, "straight {straight} should exceed diagonal {diagonal}");
    }

    #[test]
    fn test_sun_translates_with_anchor() {
        let origin = sun_lines(Point::zero(), 30);
        let moved = sun_lines(Point::new(24, 38), 30);
        for (a, b) in origin.iter().zip(moved.iter()) {
            assert_eq!(a.0 + Point::new(24, 38), b.0);
            assert_eq!(a.1 + Point::new(24, 38), b.1);
        }
    }

    #[test]
    fn test_cloud_path_size_30() {
        let cloud = cloud_path(Point::zero(), 30);
        assert_eq!(cloud.points[0], Point::new(15, 16), "starts at top centre, fixed offset");
        assert_eq!(cloud.points[1], Point::new(9, 16));
        assert_eq!(cloud.points[6], Point::new(-1, 33), "left lobe reaches past the box");
        assert_eq!(cloud.points[8], Point::new(14, 36));
        assert_eq!(cloud.points[9], Point::new(26, 36));
        assert_eq!(cloud.points[CLOUD_SEGMENTS], cloud.points[0], "path closes at size 30");
    }

    #[test]
    fn test_cloud_top_offset_is_not_scaled() {
        let small = cloud_path(Point::new(0, 10), 20);
        let large = cloud_path(Point::new(0, 10), 60);
        assert_eq!(small.points[0].y, 26);
        assert_eq!(large.points[0].y, 26);
    }

    #[test]
    fn test_cloud_lobes_scale_with_size() {
        let small = cloud_path(Point::zero(), 20);
        let large = cloud_path(Point::zero(), 40);
        let width = |c: &CloudPath| {
            let min = c.points.iter().map(|p| p.x).min().unwrap();
            let max = c.points.iter().map(|p| p.x).max().unwrap();
            max - min
        };
        assert!(width(&large) > width(&small));
        assert!((width(&large) - 2 * width(&small)).abs() <= 2, "rounding drift stays small");
    }

    #[test]
    fn test_sun_icon_has_no_cloud() {
        let geometry = IconGeometry::build(IconKind::Sun, Point::new(24, 38), 30);
        assert_eq!(geometry.sun_line_count(), 12);
        assert_eq!(geometry.cloud_count(), 0);
    }

    #[test]
    fn test_partly_cloudy_layers_cloud_over_sun() {
        let pos = Point::new(24, 38);
        let geometry = IconGeometry::build(IconKind::PartlyCloudy, pos, 30);
        assert_eq!(geometry.sun_line_count(), 12);
        assert_eq!(geometry.cloud_count(), 1);
        assert!(matches!(geometry.shapes().last(), Some(IconShape::Cloud(_))), "cloud drawn last");

        // Cloud is 66% size (19), shifted down by 7% (2)
        assert_eq!(geometry.shapes()[12], IconShape::Cloud(cloud_path(Point::new(24, 40), 19)));
        // Sun is full size at the anchor
        assert_eq!(geometry.shapes()[0], IconShape::SunLine { start: Point::new(32, 46), end: Point::new(46, 46) });
    }

    #[test]
    fn test_mostly_cloudy_small_sun_behind_large_cloud() {
        let pos = Point::new(24, 38);
        let geometry = IconGeometry::build(IconKind::MostlyCloudy, pos, 30);
        assert_eq!(geometry.sun_line_count(), 12);
        assert!(matches!(geometry.shapes().last(), Some(IconShape::Cloud(_))), "cloud drawn last");

        // Sun at 66% size, pushed right by size - 66%
        let small_sun = sun_lines(Point::new(34, 38), 19);
        assert_eq!(geometry.shapes()[0], IconShape::SunLine { start: small_sun[0].0, end: small_sun[0].1 });
        // Full-size cloud, raised by 14% (38 - 4.2 truncates to 33)
        assert_eq!(geometry.shapes()[12], IconShape::Cloud(cloud_path(Point::new(24, 33), 30)));
    }

    #[test]
    fn test_very_cloudy_two_offset_clouds() {
        let pos = Point::new(24, 38);
        let geometry = IconGeometry::build(IconKind::VeryCloudy, pos, 30);
        assert_eq!(geometry.sun_line_count(), 0);
        assert_eq!(geometry.cloud_count(), 2);

        // adjustment 3, vertical nudge -round(2.4) = -2, clouds 27 px
        assert_eq!(geometry.shapes()[0], IconShape::Cloud(cloud_path(Point::new(33, 30), 27)));
        assert_eq!(geometry.shapes()[1], IconShape::Cloud(cloud_path(Point::new(24, 36), 27)));
    }

    #[test]
    fn test_unloaded_score_draws_very_cloudy() {
        let pos = Point::new(24, 38);
        assert_eq!(
            IconGeometry::for_score(SCORE_UNLOADED, pos, 30),
            IconGeometry::build(IconKind::VeryCloudy, pos, 30)
        );
    }

    #[test]
    fn test_geometry_is_deterministic() {
        let a = IconGeometry::for_score(6, Point::new(37, 101), 24);
        let b = IconGeometry::for_score(6, Point::new(37, 101), 24);
        assert_eq!(a, b);
    }
}
