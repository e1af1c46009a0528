use crate::audio::{AudioSink, Sound};
use crate::render::{LineSegment, Renderer, SpriteDraw, TextDraw};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// Sink for hosts without a renderer or audio device: everything goes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl Renderer for LogSink {
    fn add_line(&mut self, line: LineSegment) {
        log::trace!("line {} -> {} ({})", line.start, line.end, line.thickness);
    }

    fn add_text(&mut self, text: TextDraw) {
        log::trace!(
            "text '{}' at {}",
            text.text,
            text.transform.w_axis.truncate()
        );
    }

    fn add_sprite(&mut self, sprite: SpriteDraw) {
        log::trace!(
            "sprite '{}' at {}",
            sprite.icon,
            sprite.transform.w_axis.truncate()
        );
    }
}

impl AudioSink for LogSink {
    fn play(&mut self, sound: Sound, at: Vec3) {
        log::info!("sound {} at {}", sound, at);
    }
}

#[derive(Debug, Default)]
pub struct Recording {
    pub lines: Vec<LineSegment>,
    pub texts: Vec<TextDraw>,
    pub sprites: Vec<SpriteDraw>,
    pub sounds: Vec<(Sound, Vec3)>,
}

/// Shared handle that keeps every submission, so a caller can inspect what a component drew.
#[derive(Debug, Default, Clone)]
pub struct Recorder(Rc<RefCell<Recording>>);

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Recording {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn sounds(&self) -> Vec<Sound> {
        self.0.borrow().sounds.iter().map(|(s, _)| *s).collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.0.borrow().texts.iter().map(|t| t.text.clone()).collect()
    }

    pub fn line_count(&self) -> usize {
        self.0.borrow().lines.len()
    }

    pub fn clear(&self) {
        self.take();
    }
}

impl Renderer for Recorder {
    fn add_line(&mut self, line: LineSegment) {
        self.0.borrow_mut().lines.push(line);
    }

    fn add_text(&mut self, text: TextDraw) {
        self.0.borrow_mut().texts.push(text);
    }

    fn add_sprite(&mut self, sprite: SpriteDraw) {
        self.0.borrow_mut().sprites.push(sprite);
    }
}

impl AudioSink for Recorder {
    fn play(&mut self, sound: Sound, at: Vec3) {
        self.0.borrow_mut().sounds.push((sound, at));
    }
}
