use derive_more::{AsRef, Deref, Display, From, Into};
use glam::{Mat4, Vec3};
use palette::Srgba;
use serde::{Deserialize, Serialize};

pub type Color = Srgba<f32>;

/// Opaque reference to an image the host knows how to draw.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconHandle(String);

crate::impl_string_newtype!(IconHandle);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub thickness: f32,
}

impl LineSegment {
    pub fn new(start: Vec3, end: Vec3, color: Color, thickness: f32) -> Self {
        Self {
            start,
            end,
            color,
            thickness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Center,
    BottomCenter,
    TopCenter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub transform: Mat4,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub icon: IconHandle,
    pub transform: Mat4,
}

/// Immediate-mode submissions. Nothing persists past the frame it was submitted in.
pub trait Renderer {
    fn add_line(&mut self, line: LineSegment);

    fn add_text(&mut self, text: TextDraw);

    fn add_sprite(&mut self, _sprite: SpriteDraw) {}

    /// Closed loop through `points`, each transformed by `transform`.
    fn add_polyline(&mut self, points: &[Vec3], transform: Mat4, color: Color, thickness: f32) {
        let count = points.len();
        if count < 2 {
            return;
        }
        for i in 0..count {
            let a = transform.transform_point3(points[i]);
            let b = transform.transform_point3(points[(i + 1) % count]);
            self.add_line(LineSegment::new(a, b, color, thickness));
        }
    }
}
