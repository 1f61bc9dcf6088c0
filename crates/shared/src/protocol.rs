use serde::{Deserialize, Serialize};

use crate::domain::{InputSource, PlaybackView, RunState, SortingMethod};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PlaybackCommand {
    LoadInput {
        #[serde(default)]
        text: Option<String>,
    },
    LoadValues {
        values: Vec<i64>,
    },
    Start,
    Pause,
    Step,
    Reset,
    /// Re-reads the last loaded input source.
    Reload,
    SetSpeed {
        speed: i64,
    },
    SelectAlgorithm {
        method: SortingMethod,
    },
    View,
}

impl PlaybackCommand {
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackCommand::LoadInput { .. } => "load_input",
            PlaybackCommand::LoadValues { .. } => "load_values",
            PlaybackCommand::Start => "start",
            PlaybackCommand::Pause => "pause",
            PlaybackCommand::Step => "step",
            PlaybackCommand::Reset => "reset",
            PlaybackCommand::Reload => "reload",
            PlaybackCommand::SetSpeed { .. } => "set_speed",
            PlaybackCommand::SelectAlgorithm { .. } => "select_algorithm",
            PlaybackCommand::View => "view",
        }
    }

    pub fn input_source(&self) -> Option<InputSource> {
        match self {
            PlaybackCommand::LoadInput { text: Some(text) } => Some(InputSource::Text(text.clone())),
            PlaybackCommand::LoadInput { text: None } => Some(InputSource::Random),
            PlaybackCommand::LoadValues { values } => Some(InputSource::Values(values.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PlaybackEvent {
    LogAppended {
        line: String,
    },
    RunStateChanged {
        from: RunState,
        to: RunState,
    },
    ViewUpdated {
        view: PlaybackView,
    },
}
