//! Cells, ship kinds and ship geometry.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;

/// A grid coordinate: `x` is the column, `y` the row, both 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// Row-major index into a `BOARD_SIZE`×`BOARD_SIZE` grid.
    pub(crate) fn index(&self) -> usize {
        self.y * BOARD_SIZE + self.x
    }

    pub(crate) fn from_index(idx: usize) -> Self {
        Self {
            x: idx % BOARD_SIZE,
            y: idx / BOARD_SIZE,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Extends towards increasing `x`.
    Horizontal,
    /// Extends towards increasing `y`.
    Vertical,
}

/// Class of a ship as named by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipKind {
    Small,
    Medium,
    Large,
    Huge,
}

impl ShipKind {
    /// Conventional length for this class.
    pub fn nominal_length(&self) -> usize {
        match self {
            ShipKind::Small => 1,
            ShipKind::Medium => 2,
            ShipKind::Large => 3,
            ShipKind::Huge => 4,
        }
    }
}

/// A ship as submitted by a player. Immutable once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ship {
    pub kind: ShipKind,
    pub length: usize,
    pub anchor: Cell,
    pub orientation: Orientation,
}

impl Ship {
    pub fn new(kind: ShipKind, length: usize, anchor: Cell, orientation: Orientation) -> Self {
        Self {
            kind,
            length,
            anchor,
            orientation,
        }
    }

    /// A ship whose length matches its class.
    pub fn of_kind(kind: ShipKind, anchor: Cell, orientation: Orientation) -> Self {
        Self::new(kind, kind.nominal_length(), anchor, orientation)
    }

    /// Every cell covered by the ship, starting at the anchor. Cells may fall
    /// outside the grid; callers check bounds.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => Cell::new(self.anchor.x + i, self.anchor.y),
            Orientation::Vertical => Cell::new(self.anchor.x, self.anchor.y + i),
        })
    }

    /// `true` when every covered cell lies on the grid.
    pub fn fits(&self) -> bool {
        self.cells().all(|cell| cell.in_bounds())
    }
}
