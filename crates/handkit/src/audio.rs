use glam::Vec3;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    /// Confirmation: opening the menu or entering a layer.
    Click,
    /// Dismissal: closing the menu or stepping back.
    Unclick,
}

/// Fire-and-forget spatial audio.
pub trait AudioSink {
    fn play(&mut self, sound: Sound, at: Vec3);
}
