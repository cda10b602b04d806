use serde::{Deserialize, Serialize};

/// Discrete audio events emitted by the simulation. The audio collaborator
/// decides how (or whether) to voice them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    /// A round has started.
    Start,
    /// The player won the round.
    Win,
    /// The player lost the round.
    Lose,
    /// A bike crashed this tick.
    Collision,
}

/// A plain sine tone description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f32,
}

impl AudioCue {
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Start => "start",
            AudioCue::Win => "win",
            AudioCue::Lose => "lose",
            AudioCue::Collision => "collision",
        }
    }

    /// Reference tone for each cue.
    pub fn tone(self) -> Tone {
        let (frequency_hz, duration_secs) = match self {
            AudioCue::Start => (440.0, 0.5),
            AudioCue::Win => (880.0, 0.5),
            AudioCue::Lose => (220.0, 0.5),
            AudioCue::Collision => (330.0, 0.2),
        };
        Tone {
            frequency_hz,
            duration_secs,
        }
    }
}
