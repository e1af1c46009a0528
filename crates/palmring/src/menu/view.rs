use super::geometry::{self, GuideRings, HitTest};
use super::item::ItemPlacement;
use super::layer::MenuLayer;
use super::theme::ThemeColors;
use super::{CHILD_INDICATOR_SIZE, HIGHLIGHT_THICKNESS, INDICATOR_PUSH, LINE_THICKNESS};
use crate::config::MenuTuning;
use glam::{Mat4, Vec3};
use handkit::{Color, LineSegment, Pose, Renderer};

/// Everything needed to draw the open menu for one frame.
pub struct MenuFrame<'a> {
    pub layer: &'a MenuLayer,
    /// Menu-local to world, including the open animation's scale.
    pub transform: Mat4,
    pub hit: HitTest,
    pub tip_local: Vec3,
    /// Sector to highlight; `None` until the menu has settled.
    pub focused_sector: Option<usize>,
    /// Layer start angle plus the current re-entry offset.
    pub angle_base: f32,
    pub tuning: &'a MenuTuning,
    pub rings: &'a GuideRings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpokeState {
    Highlighted,
    Plain,
}

impl SpokeState {
    /// A focused sector lights up both spokes bounding it.
    fn resolve(index: usize, focused: Option<usize>, count: usize) -> Self {
        match focused {
            Some(f) if f == index || (f + 1) % count == index => Self::Highlighted,
            _ => Self::Plain,
        }
    }

    fn style(&self, colors: &ThemeColors) -> (Color, f32) {
        match self {
            Self::Highlighted => (colors.primary, HIGHLIGHT_THICKNESS),
            Self::Plain => (colors.common, LINE_THICKNESS),
        }
    }
}

struct LocalLines<'a> {
    renderer: &'a mut dyn Renderer,
    transform: Mat4,
}

impl LocalLines<'_> {
    fn line(&mut self, a: Vec3, b: Vec3, color: Color, thickness: f32) {
        self.renderer.add_line(LineSegment::new(
            self.transform.transform_point3(a),
            self.transform.transform_point3(b),
            color,
            thickness,
        ));
    }
}

pub fn draw_menu(frame: &MenuFrame, colors: &ThemeColors, renderer: &mut dyn Renderer) {
    renderer.add_polyline(
        &frame.rings.inner,
        frame.transform,
        colors.guide,
        LINE_THICKNESS,
    );
    renderer.add_polyline(
        &frame.rings.outer,
        frame.transform,
        colors.guide,
        LINE_THICKNESS,
    );

    let count = frame.layer.item_count();
    if count > 0 {
        draw_spokes(frame, colors, renderer);
        draw_items(frame, colors, renderer);
    }

    let mut lines = LocalLines {
        renderer,
        transform: frame.transform,
    };
    // finger guide, flattened onto the menu plane
    let guide = if frame.hit.focused {
        colors.primary
    } else {
        colors.common
    };
    lines.line(
        Vec3::ZERO,
        Vec3::new(frame.tip_local.x, frame.tip_local.y, 0.0),
        guide,
        LINE_THICKNESS,
    );
}

fn draw_spokes(frame: &MenuFrame, colors: &ThemeColors, renderer: &mut dyn Renderer) {
    let count = frame.layer.item_count();
    let mut lines = LocalLines {
        renderer,
        transform: frame.transform,
    };

    for i in 0..count {
        let (start, _) = geometry::sector_bounds(i, count, frame.angle_base);
        let dir = geometry::angle_xy(start);
        let (color, thickness) = SpokeState::resolve(i, frame.focused_sector, count).style(colors);
        lines.line(
            dir * frame.tuning.inner_radius,
            dir * frame.tuning.outer_radius,
            color,
            thickness,
        );
    }
}

fn draw_items(frame: &MenuFrame, colors: &ThemeColors, renderer: &mut dyn Renderer) {
    let count = frame.layer.item_count();
    let step = geometry::sector_step(count);
    let fit_radius = frame.tuning.mid_radius * step.min(90.0).to_radians();

    for (i, item) in frame.layer.items().iter().enumerate() {
        let angle = geometry::sector_center(i, count, frame.angle_base);
        let focused = frame.focused_sector == Some(i);

        if item.navigates() {
            draw_child_indicator(frame, angle, focused, colors, renderer);
        }

        item.draw(
            &ItemPlacement {
                position: geometry::angle_xy(angle) * frame.tuning.mid_radius,
                radius: fit_radius,
                angle,
                focused,
                transform: frame.transform,
            },
            renderer,
        );
    }
}

/// Small chevron just inside the outer ring, pointing outwards.
fn draw_child_indicator(
    frame: &MenuFrame,
    angle: f32,
    focused: bool,
    colors: &ThemeColors,
    renderer: &mut dyn Renderer,
) {
    let dir = geometry::angle_xy(angle);
    let side = geometry::angle_xy(angle + 90.0);
    let base = dir * (frame.tuning.outer_radius - 2.0 * CHILD_INDICATOR_SIZE);
    let tip = base + dir * CHILD_INDICATOR_SIZE;
    let color = if focused {
        colors.highlight
    } else {
        colors.common
    };

    let mut lines = LocalLines {
        renderer,
        transform: frame.transform,
    };
    lines.line(base + side * CHILD_INDICATOR_SIZE, tip, color, LINE_THICKNESS);
    lines.line(base - side * CHILD_INDICATOR_SIZE, tip, color, LINE_THICKNESS);
}

/// Pre-open hint on the palm; grows with the grip and floats off the palm while the hand is open.
pub fn draw_indicator(
    palm: &Pose,
    grip: f32,
    tuning: &MenuTuning,
    rings: &GuideRings,
    colors: &ThemeColors,
    renderer: &mut dyn Renderer,
) -> f32 {
    let scale = indicator_scale(grip, tuning);
    let mut pose = *palm;
    pose.position += palm.forward() * (1.0 - grip.clamp(0.0, 1.0)) * INDICATOR_PUSH;

    renderer.add_polyline(
        &rings.unit,
        pose.to_matrix(scale),
        colors.indicator(grip),
        LINE_THICKNESS,
    );
    scale
}

pub fn indicator_scale(grip: f32, tuning: &MenuTuning) -> f32 {
    tuning
        .indicator_min_scale
        .max(grip * tuning.indicator_grip_scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::item::MenuItem;
    use handkit::sink::Recorder;

    fn layer() -> MenuLayer {
        MenuLayer::new(
            "Root",
            vec![
                MenuItem::layer("File", "File"),
                MenuItem::close("About"),
                MenuItem::back("Back"),
                MenuItem::close("Cancel"),
            ],
        )
    }

    #[test]
    fn spoke_highlight_covers_focused_sector_edges() {
        assert_eq!(SpokeState::resolve(2, Some(2), 4), SpokeState::Highlighted);
        assert_eq!(SpokeState::resolve(3, Some(2), 4), SpokeState::Highlighted);
        assert_eq!(SpokeState::resolve(0, Some(3), 4), SpokeState::Highlighted);
        assert_eq!(SpokeState::resolve(1, Some(2), 4), SpokeState::Plain);
        assert_eq!(SpokeState::resolve(2, None, 4), SpokeState::Plain);
    }

    #[test]
    fn draws_rings_spokes_labels_and_indicators() {
        let tuning = MenuTuning::default();
        let rings = GuideRings::new(&tuning);
        let layer = layer();
        let tip = Vec3::new(0.01, 0.0, 0.0);
        let frame = MenuFrame {
            layer: &layer,
            transform: Mat4::IDENTITY,
            hit: HitTest::classify(tip, &tuning),
            tip_local: tip,
            focused_sector: None,
            angle_base: 0.0,
            tuning: &tuning,
            rings: &rings,
        };
        let recorder = Recorder::new();
        draw_menu(&frame, &ThemeColors::default(), &mut recorder.clone());

        // 2 rings of 48, 4 spokes, 2 chevrons of 2 lines, 1 finger line
        assert_eq!(recorder.line_count(), 48 * 2 + 4 + 2 * 2 + 1);
        assert_eq!(recorder.texts(), vec!["File", "About", "Back", "Cancel"]);
    }

    #[test]
    fn focused_label_is_enlarged() {
        let tuning = MenuTuning::default();
        let rings = GuideRings::new(&tuning);
        let layer = layer();
        let tip = Vec3::new(0.05, 0.05, 0.0);
        let frame = MenuFrame {
            layer: &layer,
            transform: Mat4::IDENTITY,
            hit: HitTest::classify(tip, &tuning),
            tip_local: tip,
            focused_sector: Some(0),
            angle_base: 0.0,
            tuning: &tuning,
            rings: &rings,
        };
        let recorder = Recorder::new();
        draw_menu(&frame, &ThemeColors::default(), &mut recorder.clone());

        let texts = recorder.take().texts;
        let size = |i: usize| texts[i].transform.x_axis.length();
        assert!(size(0) > size(1));
        // label sits at the sector centre on the mid ring
        let at = texts[1].transform.w_axis.truncate();
        let expected = geometry::angle_xy(135.0) * tuning.mid_radius;
        assert!((at - expected).length() < 1e-5);
    }

    #[test]
    fn indicator_scale_has_floor() {
        let tuning = MenuTuning::default();
        assert_eq!(indicator_scale(0.0, &tuning), 0.02);
        assert!((indicator_scale(0.5, &tuning) - 0.1).abs() < 1e-6);
        assert!((indicator_scale(1.0, &tuning) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn empty_layer_still_draws_rings() {
        let tuning = MenuTuning::default();
        let rings = GuideRings::new(&tuning);
        let layer = MenuLayer::new("Empty", Vec::new());
        let frame = MenuFrame {
            layer: &layer,
            transform: Mat4::IDENTITY,
            hit: HitTest::classify(Vec3::ZERO, &tuning),
            tip_local: Vec3::ZERO,
            focused_sector: None,
            angle_base: 0.0,
            tuning: &tuning,
            rings: &rings,
        };
        let recorder = Recorder::new();
        draw_menu(&frame, &ThemeColors::default(), &mut recorder.clone());
        assert_eq!(recorder.line_count(), 48 * 2 + 1);
    }
}
