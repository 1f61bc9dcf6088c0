use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseMethodError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortingMethod {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

impl SortingMethod {
    pub const ALL: [SortingMethod; 5] = [
        SortingMethod::Bubble,
        SortingMethod::Selection,
        SortingMethod::Insertion,
        SortingMethod::Quick,
        SortingMethod::Merge,
    ];

    /// Display label used in narration and log lines.
    pub fn label(self) -> &'static str {
        match self {
            SortingMethod::Bubble => "Bubble Sort",
            SortingMethod::Selection => "Selection Sort",
            SortingMethod::Insertion => "Insertion Sort",
            SortingMethod::Quick => "Quick Sort",
            SortingMethod::Merge => "Merge Sort",
        }
    }

    fn key(self) -> &'static str {
        match self {
            SortingMethod::Bubble => "bubble",
            SortingMethod::Selection => "selection",
            SortingMethod::Insertion => "insertion",
            SortingMethod::Quick => "quick",
            SortingMethod::Merge => "merge",
        }
    }
}

impl fmt::Display for SortingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts `quick`, `quick_sort`, `quick-sort`, `Quick Sort` and `quicksort`.
impl FromStr for SortingMethod {
    type Err = ParseMethodError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let normalized = normalized.strip_suffix("sort").unwrap_or(&normalized);

        SortingMethod::ALL
            .into_iter()
            .find(|method| method.key() == normalized)
            .ok_or_else(|| ParseMethodError::new(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::Idle => "IDLE",
            RunState::Running => "RUNNING",
            RunState::Paused => "PAUSED",
            RunState::Completed => "COMPLETED",
        };
        f.write_str(label)
    }
}

/// One unit of trace data. Each step owns its snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub array: Vec<i64>,
    pub highlights: Vec<usize>,
    pub sorted_indices: BTreeSet<usize>,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Read-only state exposed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackView {
    pub method: SortingMethod,
    pub run_state: RunState,
    pub speed: u8,
    pub array: Vec<i64>,
    pub highlights: Vec<usize>,
    pub sorted_indices: BTreeSet<usize>,
    pub log: Vec<String>,
    pub steps_applied: usize,
}

/// Where the controller takes its next sequence from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Comma separated integers as typed by the user.
    Text(String),
    Values(Vec<i64>),
    #[default]
    Random,
}
