pub mod audio;
pub mod input;
pub mod macros;
pub mod render;
pub mod sink;
pub mod stepper;
pub mod trace;

pub use audio::{AudioSink, Sound};
pub use input::{HandSnapshot, Handed, InputFrame, Pose};
pub use render::{Color, IconHandle, LineSegment, Renderer, SpriteDraw, TextAlign, TextDraw};
pub use stepper::Stepper;

pub const SOCKET_PATH: &str = "/tmp/palmring.sock";
