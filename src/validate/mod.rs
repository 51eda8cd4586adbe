//! Structural validation of cub-style text maps.
//!
//! A map is closed when no walkable tile (`0` or a spawn marker) sits on the
//! border of the padded grid or next to the void character.

use serde::Serialize;
use tracing::debug;

mod issue;

pub use issue::{Exposure, IssueLog, MapIssue, MapIssueKind};

use crate::types::{ALLOWED_MAP_CHARS, PLAYER_MARKERS, VOID};

const NEIGHBORS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedMap {
    pub width: usize,
    pub height: usize,
    /// `grid[y][x]`, short lines right-padded with the void character.
    pub grid: Vec<Vec<char>>,
    pub issues: Vec<MapIssue>,
    pub player_count: usize,
}

/// Spawn marker found in a map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Spawn {
    pub x: usize,
    pub y: usize,
    pub facing: char,
}

impl ValidatedMap {
    /// True when no structural issue was found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Padded map character at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Issues of one kind, in the order they were found.
    pub fn issues_of(&self, kind: MapIssueKind) -> impl Iterator<Item = &MapIssue> {
        self.issues.iter().filter(move |issue| issue.kind() == kind)
    }

    /// First spawn marker in row-major order.
    pub fn spawn(&self) -> Option<Spawn> {
        self.grid.iter().enumerate().find_map(|(y, row)| {
            row.iter().enumerate().find_map(|(x, &ch)| {
                is_player(ch).then_some(Spawn { x, y, facing: ch })
            })
        })
    }
}

#[inline]
fn is_player(ch: char) -> bool {
    PLAYER_MARKERS.contains(&ch)
}

#[inline]
fn is_walkable(ch: char) -> bool {
    ch == '0' || is_player(ch)
}

#[inline]
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parse and check a map body. Every defect is reported, nothing is thrown.
pub fn validate_cub_map(text: &str) -> ValidatedMap {
    let normalized = text.replace('\r', "");
    let mut lines: Vec<&str> = normalized.split('\n').collect();

    // Only fully blank lines around the body are dropped, spaces inside are map data.
    while lines.first().is_some_and(|line| is_blank(line)) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }

    let height = lines.len();
    if height == 0 {
        debug!("map text is blank");
        return ValidatedMap {
            width: 0,
            height: 0,
            grid: Vec::new(),
            issues: Vec::new(),
            player_count: 0,
        };
    }

    let mut log = IssueLog::new();

    for (y, line) in lines.iter().enumerate() {
        if is_blank(line) {
            log.push(MapIssue::EmptyLine { y });
        }
    }

    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let grid: Vec<Vec<char>> = lines
        .iter()
        .map(|line| {
            let mut row: Vec<char> = line.chars().collect();
            row.resize(width, VOID);
            row
        })
        .collect();

    let mut player_count = 0;
    for (y, row) in grid.iter().enumerate() {
        for (x, &ch) in row.iter().enumerate() {
            if !ALLOWED_MAP_CHARS.contains(&ch) {
                log.push(MapIssue::InvalidChar { ch, x, y });
            }
            if is_player(ch) {
                player_count += 1;
            }
        }
    }

    if player_count != 1 {
        log.push(MapIssue::PlayerCount {
            found: player_count,
        });
    }

    check_closed(&grid, width, height, &mut log);

    debug!(width, height, player_count, issues = log.count(), "validated map");

    ValidatedMap {
        width,
        height,
        grid,
        issues: log.finish(),
        player_count,
    }
}

fn check_closed(grid: &[Vec<char>], width: usize, height: usize, log: &mut IssueLog) {
    for (y, row) in grid.iter().enumerate() {
        for (x, &ch) in row.iter().enumerate() {
            if !is_walkable(ch) {
                continue;
            }

            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                log.push(MapIssue::OpenBoundary { x, y });
                continue;
            }

            let exposure = NEIGHBORS.iter().find_map(|&(dx, dy)| {
                let neighbor = x
                    .checked_add_signed(dx)
                    .zip(y.checked_add_signed(dy))
                    .and_then(|(nx, ny)| grid.get(ny).and_then(|row| row.get(nx)));
                match neighbor {
                    None => Some(Exposure::OutOfBounds),
                    Some(&VOID) => Some(Exposure::Void),
                    Some(_) => None,
                }
            });

            if let Some(exposure) = exposure {
                log.push(MapIssue::TouchesVoid { x, y, exposure });
            }
        }
    }
}
