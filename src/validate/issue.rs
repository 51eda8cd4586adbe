use std::fmt;

use serde::Serialize;
use tracing::trace;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapIssueKind {
    InvalidChar,
    PlayerCount,
    OpenBoundary,
    TouchesVoid,
    EmptyLine,
}

impl MapIssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidChar => "invalid-char",
            Self::PlayerCount => "player-count",
            Self::OpenBoundary => "open-boundary",
            Self::TouchesVoid => "touches-void",
            Self::EmptyLine => "empty-line",
        }
    }
}

impl fmt::Display for MapIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a walkable tile was found next to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Exposure {
    Void,
    OutOfBounds,
}

/// A single structural defect in a cub map. Coordinates are grid columns
/// (`x`) and rows (`y`) of the padded grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MapIssue {
    InvalidChar { ch: char, x: usize, y: usize },
    PlayerCount { found: usize },
    OpenBoundary { x: usize, y: usize },
    TouchesVoid { x: usize, y: usize, exposure: Exposure },
    EmptyLine { y: usize },
}

impl MapIssue {
    pub fn kind(&self) -> MapIssueKind {
        match self {
            Self::InvalidChar { .. } => MapIssueKind::InvalidChar,
            Self::PlayerCount { .. } => MapIssueKind::PlayerCount,
            Self::OpenBoundary { .. } => MapIssueKind::OpenBoundary,
            Self::TouchesVoid { .. } => MapIssueKind::TouchesVoid,
            Self::EmptyLine { .. } => MapIssueKind::EmptyLine,
        }
    }

    /// `(x, y)` of the offending cell, if the issue is tied to one.
    pub fn location(&self) -> Option<(usize, usize)> {
        match *self {
            Self::InvalidChar { x, y, .. }
            | Self::OpenBoundary { x, y }
            | Self::TouchesVoid { x, y, .. } => Some((x, y)),
            Self::PlayerCount { .. } | Self::EmptyLine { .. } => None,
        }
    }

    /// Row index, including issues that only know their row.
    pub fn row(&self) -> Option<usize> {
        match *self {
            Self::EmptyLine { y } => Some(y),
            _ => self.location().map(|(_, y)| y),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MapIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar { ch, x, y } => {
                write!(f, "Invalid character '{ch}' at ({y},{x})")
            }
            Self::PlayerCount { found } => {
                write!(f, "Must have exactly 1 player (found {found})")
            }
            Self::OpenBoundary { x, y } => {
                write!(f, "Open map: walkable tile on boundary at ({y},{x})")
            }
            Self::TouchesVoid {
                x,
                y,
                exposure: Exposure::Void,
            } => write!(f, "Open map: walkable tile touches void ' ' at ({y},{x})"),
            Self::TouchesVoid {
                x,
                y,
                exposure: Exposure::OutOfBounds,
            } => write!(f, "Open map: walkable tile touches out-of-bounds at ({y},{x})"),
            Self::EmptyLine { y } => write!(f, "Empty line inside map at row {y}"),
        }
    }
}

/// Append-only collector; issues keep the order they were found in.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Vec<MapIssue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: MapIssue) {
        trace!(kind = %issue.kind(), "{issue}");
        self.issues.push(issue);
    }

    pub fn count(&self) -> usize {
        self.issues.len()
    }

    pub fn finish(self) -> Vec<MapIssue> {
        self.issues
    }
}
