use std::fmt;

use serde::{Deserialize, Serialize};

/// Which variant of a case is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// The recommended pattern.
    Do,
    /// The pattern to avoid. Shown when nothing else is asked for.
    #[default]
    Dont,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Do => "do",
            ViewMode::Dont => "dont",
        }
    }

    /// Lenient parse of a query value: anything but `do`/`dont` is `Dont`.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("do") => ViewMode::Do,
            _ => ViewMode::Dont,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Do => ViewMode::Dont,
            ViewMode::Dont => ViewMode::Do,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
