//! Subjects: the teams whose fixtures are tracked.
//!
//! A subject keys everything per team: which calendar receives its events
//! and which state files hold its fixture cache and identity map.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a tracked team, as assigned by the fixture data provider.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SubjectId(u32);

impl SubjectId {
    /// Creates a subject id from its numeric value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// File name of this subject's fixture cache (`matches<id>.json`).
    pub fn fixtures_file_name(self) -> String {
        format!("matches{}.json", self.0)
    }

    /// File name of this subject's identity map (`events<id>.json`).
    pub fn identity_file_name(self) -> String {
        format!("events{}.json", self.0)
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SubjectId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for SubjectId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A tracked team bound to the calendar that receives its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// Provider-side team id.
    pub id: SubjectId,

    /// Calendar that receives this subject's events.
    pub calendar_id: String,
}

impl Subject {
    /// Creates a subject.
    pub fn new(id: impl Into<SubjectId>, calendar_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            calendar_id: calendar_id.into(),
        }
    }
}
