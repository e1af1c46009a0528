use crate::config::MenuTuning;
use glam::Vec3;

pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit vector in the menu plane at `degrees` counter-clockwise from +X.
pub fn angle_xy(degrees: f32) -> Vec3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec3::new(cos, sin, 0.0)
}

pub fn sector_step(count: usize) -> f32 {
    360.0 / count as f32
}

/// Start and end of sector `index`, relative to `start`.
pub fn sector_bounds(index: usize, count: usize, start: f32) -> (f32, f32) {
    let step = sector_step(count);
    (
        start + index as f32 * step,
        start + (index + 1) as f32 * step,
    )
}

pub fn sector_center(index: usize, count: usize, start: f32) -> f32 {
    start + (index as f32 + 0.5) * sector_step(count)
}

/// Sector under `angle`, for a ring of `count` sectors whose first sector begins at `start`.
pub fn sector_at(angle: f32, start: f32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let relative = normalize_degrees(normalize_degrees(angle) - start);
    let index = (relative / sector_step(count)).floor() as usize;
    Some(index.min(count - 1))
}

/// Where the fingertip is relative to the rings, in menu-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTest {
    pub on_menu: bool,
    pub focused: bool,
    pub selected: bool,
    pub cancel: bool,
    pub magnitude_sq: f32,
    /// Planar direction of the fingertip, degrees in [0, 360).
    pub angle: f32,
}

impl HitTest {
    pub fn classify(local: Vec3, tuning: &MenuTuning) -> Self {
        let on_menu = local.z.abs() < tuning.plane_tolerance;
        let magnitude_sq = local.x * local.x + local.y * local.y;
        let beyond = |radius: f32| magnitude_sq > radius * radius;

        Self {
            on_menu,
            focused: on_menu && beyond(tuning.inner_radius),
            selected: on_menu && beyond(tuning.mid_radius),
            cancel: beyond(tuning.outer_radius),
            magnitude_sq,
            angle: normalize_degrees(local.y.atan2(local.x).to_degrees()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }

    pub fn closest(&self, p: Vec3) -> Vec3 {
        p - self.normal * (p - self.point).dot(self.normal)
    }
}

pub fn ring_polyline(radius: f32, segments: usize) -> Vec<Vec3> {
    let step = sector_step(segments.max(3));
    (0..segments.max(3))
        .map(|i| angle_xy(i as f32 * step) * radius)
        .collect()
}

/// Circle outlines drawn every frame, built once.
#[derive(Debug, Clone)]
pub struct GuideRings {
    pub inner: Vec<Vec3>,
    pub outer: Vec<Vec3>,
    /// Unit circle for the palm indicator.
    pub unit: Vec<Vec3>,
}

impl GuideRings {
    pub fn new(tuning: &MenuTuning) -> Self {
        Self {
            inner: ring_polyline(tuning.inner_radius, tuning.ring_segments),
            outer: ring_polyline(tuning.outer_radius, tuning.ring_segments),
            unit: ring_polyline(1.0, tuning.ring_segments),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn sectors_partition_the_circle() {
        for count in 1..=12 {
            let step = sector_step(count);
            let mut expected_start = 0.0;
            for i in 0..count {
                let (a, b) = sector_bounds(i, count, 0.0);
                assert!((a - expected_start).abs() < EPSILON);
                assert!((b - a - step).abs() < EPSILON);
                expected_start = b;
            }
            assert!((expected_start - 360.0).abs() < EPSILON);

            // every probe lands in exactly the sector whose bounds contain it
            for probe in 0..720 {
                let angle = probe as f32 * 0.5 + 0.25;
                let idx = sector_at(angle, 0.0, count).unwrap();
                let (a, b) = sector_bounds(idx, count, 0.0);
                assert!(angle >= a && angle < b, "{angle} not in [{a}, {b}) for {count}");
            }
        }
    }

    #[test]
    fn sector_at_respects_start_angle() {
        assert_eq!(sector_at(10.0, 0.0, 4), Some(0));
        assert_eq!(sector_at(10.0, 45.0, 4), Some(3));
        assert_eq!(sector_at(50.0, 45.0, 4), Some(0));
        assert_eq!(sector_at(-80.0, 0.0, 4), Some(3));
        assert_eq!(sector_at(10.0, 400.0, 4), Some(3));
        assert_eq!(sector_at(10.0, 0.0, 0), None);
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        let tiny = normalize_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn ring_boundaries_are_exclusive() {
        let tuning = MenuTuning::default();
        let at = |r: f32| HitTest::classify(Vec3::new(r, 0.0, 0.0), &tuning);

        assert!(!at(tuning.inner_radius).focused);
        assert!(at(tuning.inner_radius + 1e-4).focused);

        assert!(!at(tuning.mid_radius).selected);
        assert!(at(tuning.mid_radius + 1e-4).selected);

        assert!(!at(tuning.outer_radius).cancel);
        assert!(at(tuning.outer_radius + 1e-4).cancel);
    }

    #[test]
    fn cancel_ignores_plane_distance() {
        let tuning = MenuTuning::default();
        let hit = HitTest::classify(Vec3::new(0.0, 0.2, 0.5), &tuning);
        assert!(!hit.on_menu);
        assert!(!hit.focused && !hit.selected);
        assert!(hit.cancel);
    }

    #[test]
    fn plane_band_is_exclusive() {
        let tuning = MenuTuning::default();
        let hit = HitTest::classify(Vec3::new(0.08, 0.0, tuning.plane_tolerance), &tuning);
        assert!(!hit.on_menu && !hit.selected);
        let hit = HitTest::classify(Vec3::new(0.08, 0.0, -0.019), &tuning);
        assert!(hit.on_menu && hit.selected);
    }

    #[test]
    fn hit_angle_follows_atan2() {
        let tuning = MenuTuning::default();
        let hit = HitTest::classify(Vec3::new(0.0, -0.05, 0.0), &tuning);
        assert!((hit.angle - 270.0).abs() < EPSILON);
    }

    #[test]
    fn plane_projection() {
        let plane = Plane::new(Vec3::new(0.0, 1.0, -0.4), Vec3::Z);
        let p = plane.closest(Vec3::new(0.1, 1.1, -0.3));
        assert!((p - Vec3::new(0.1, 1.1, -0.4)).length() < EPSILON);
    }

    #[test]
    fn rings_have_requested_resolution() {
        let rings = GuideRings::new(&MenuTuning::default());
        assert_eq!(rings.inner.len(), 48);
        assert_eq!(rings.outer.len(), 48);
        for p in &rings.outer {
            assert!((p.length() - 0.1).abs() < EPSILON);
        }
    }
}
