use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which of the two lists is active (and which list an item belongs to)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Work,
    Travel,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Work, Mode::Travel];

    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "Work",
            Mode::Travel => "Travel",
        }
    }

    /// Placeholder shown in an empty input line
    pub fn placeholder(self) -> &'static str {
        match self {
            Mode::Work => "Add a To Do",
            Mode::Travel => "Where do U want to go?",
        }
    }

    /// The other list
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Work => Mode::Travel,
            Mode::Travel => Mode::Work,
        }
    }

    /// Stored form: `true` is Work, `false` is Travel
    pub fn as_flag(self) -> bool {
        self == Mode::Work
    }

    pub fn from_flag(working: bool) -> Mode {
        if working { Mode::Work } else { Mode::Travel }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Work => write!(f, "work"),
            Mode::Travel => write!(f, "travel"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "work" | "w" => Ok(Mode::Work),
            "travel" | "t" => Ok(Mode::Travel),
            other => Err(format!("unknown mode '{}' (expected work or travel)", other)),
        }
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.as_flag())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(Mode::from_flag)
    }
}

/// Item identifier: creation time in Unix milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Creation time recovered from the id
    pub fn created(self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.0).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// A single to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToDoItem {
    pub text: String,
    /// Owning list, fixed at creation
    #[serde(rename = "working")]
    pub mode: Mode,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, rename = "editting")]
    pub editing: bool,
}

impl ToDoItem {
    pub fn new(text: impl Into<String>, mode: Mode) -> Self {
        ToDoItem {
            text: text.into(),
            mode,
            completed: false,
            editing: false,
        }
    }

    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(&self) -> char {
        if self.completed { 'x' } else { ' ' }
    }
}
