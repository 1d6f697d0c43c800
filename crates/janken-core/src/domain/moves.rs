//! Move identifiers and the pure rule data attached to them.
//!
//! Presentation (labels, emoji) lives in [`super::display`]; nothing here
//! knows how a move is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a selectable move (e.g. `"rock"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveId(String);

impl MoveId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MoveId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MoveId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Rule data for one move: its identifier and the moves it defeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSpec {
    pub id: MoveId,
    #[serde(default)]
    pub beats: Vec<MoveId>,
}

impl MoveSpec {
    pub fn new(id: impl Into<MoveId>, beats: &[&str]) -> Self {
        Self {
            id: id.into(),
            beats: beats.iter().map(|b| MoveId::from(*b)).collect(),
        }
    }
}
