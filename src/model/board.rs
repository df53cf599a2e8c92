use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "desc")]
    pub description: String,
}

/// A column on a board. Named `BoardList` to stay clear of `std` collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Boards can carry colorless labels, so this is optional on the wire.
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Yellow,
    Purple,
    Blue,
    Red,
    Green,
    Orange,
    Black,
    Sky,
    Pink,
    Lime,
}

impl LabelColor {
    pub const ALL: [LabelColor; 10] = [
        LabelColor::Yellow,
        LabelColor::Purple,
        LabelColor::Blue,
        LabelColor::Red,
        LabelColor::Green,
        LabelColor::Orange,
        LabelColor::Black,
        LabelColor::Sky,
        LabelColor::Pink,
        LabelColor::Lime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelColor::Yellow => "yellow",
            LabelColor::Purple => "purple",
            LabelColor::Blue => "blue",
            LabelColor::Red => "red",
            LabelColor::Green => "green",
            LabelColor::Orange => "orange",
            LabelColor::Black => "black",
            LabelColor::Sky => "sky",
            LabelColor::Pink => "pink",
            LabelColor::Lime => "lime",
        }
    }

    /// Comma separated list shown whenever a color is rejected.
    pub fn accepted() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label color '{0}'")]
pub struct UnknownColor(pub String);

impl FromStr for LabelColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// Everything needed to submit a card. Built once at the end of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub list_id: String,
    pub name: String,
    pub description: String,
    pub label_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCard {
    pub id: String,
    #[serde(default)]
    pub short_url: Option<String>,
}
