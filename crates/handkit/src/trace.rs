use crate::input::{Handed, InputFrame};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed trace: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Trace contains no frames")]
    Empty,
}

/// A recorded sequence of tracking frames, replayed in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandTrace {
    pub frames: Vec<InputFrame>,
}

impl HandTrace {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let data = fs_err::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, TraceError> {
        let trace: HandTrace = serde_json::from_str(data)?;
        if trace.frames.is_empty() {
            return Err(TraceError::Empty);
        }
        Ok(trace)
    }

    /// A single frame with nothing tracked, for hosts that only react to commands.
    pub fn still() -> Self {
        Self {
            frames: vec![InputFrame::default()],
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn duration(&self) -> f32 {
        self.frames.iter().map(|f| f.elapsed).sum()
    }

    pub fn tracked_frames(&self, handed: Handed) -> usize {
        self.frames
            .iter()
            .filter(|f| f.hand(handed).tracked)
            .count()
    }

    pub fn grip_edges(&self, handed: Handed) -> usize {
        self.frames
            .iter()
            .filter(|f| f.hand(handed).just_gripped)
            .count()
    }

    /// Endless replay, wrapping back to the first frame.
    pub fn looped(&self) -> impl Iterator<Item = &InputFrame> {
        self.frames.iter().cycle()
    }
}
