pub mod controller;
pub mod geometry;
pub mod item;
pub mod layer;
pub mod registry;
pub mod theme;
pub mod view;

pub use controller::{MenuState, RadialController};
pub use geometry::{GuideRings, HitTest};
pub use item::{ItemAction, ItemId, ItemName, ItemPlacement, ItemVisual, LayerName, MenuItem};
pub use layer::MenuLayer;
pub use registry::LayerRegistry;

pub const INNER_RADIUS: f32 = 0.03; // focus distance
pub const MID_RADIUS: f32 = 0.065; // select distance, also where labels sit
pub const OUTER_RADIUS: f32 = 0.1; // cancel distance
pub const PLANE_TOLERANCE: f32 = 0.02;
pub const SMOOTHING_RATE: f32 = 24.0;
pub const ACTIVATION_THRESHOLD: f32 = 0.95;
pub const PALM_FACING_THRESHOLD: f32 = 0.5;
pub const INDICATOR_MIN_SCALE: f32 = 0.02;
pub const INDICATOR_GRIP_SCALE: f32 = 0.2;
pub const INDICATOR_PUSH: f32 = 0.02; // how far the indicator floats off an open palm
pub const RING_SEGMENTS: usize = 48;
pub const MIN_MENU_SCALE: f32 = 0.05;
pub const LABEL_FOCUS_SCALE: f32 = 1.2;
pub const LINE_THICKNESS: f32 = 0.001;
pub const HIGHLIGHT_THICKNESS: f32 = 0.002;
pub const CHILD_INDICATOR_SIZE: f32 = 0.004;
