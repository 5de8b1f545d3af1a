//! Per-player grid: fleet placement, shot resolution and defeat detection.

use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, ShotOutcome};
use crate::config::{BOARD_SIZE, CELL_COUNT, MAX_SHIP_LENGTH, MIN_SHIP_LENGTH};
use crate::ship::{Cell, Ship};

type BB = BitBoard<u128, BOARD_SIZE>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PlacedShip {
    ship: Ship,
    hits: usize,
}

impl PlacedShip {
    fn is_sunk(&self) -> bool {
        self.hits >= self.ship.length
    }
}

/// One player's board within a session.
///
/// `occupancy` maps each cell to the index of the ship covering it, and
/// `uncalled` holds every cell not yet fired upon. `uncalled_slot` records
/// where each cell sits in `uncalled` so removal is a `swap_remove`.
#[derive(Clone)]
pub struct Board {
    ships: Vec<PlacedShip>,
    occupancy: [Option<u8>; CELL_COUNT],
    ship_map: BB,
    fired: BB,
    uncalled: Vec<Cell>,
    uncalled_slot: [Option<u8>; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed, nothing to fire at).
    pub fn new() -> Self {
        Board {
            ships: Vec::new(),
            occupancy: [None; CELL_COUNT],
            ship_map: BB::new(),
            fired: BB::new(),
            uncalled: Vec::new(),
            uncalled_slot: [None; CELL_COUNT],
        }
    }

    /// Place a whole fleet. Every ship is checked before anything is
    /// committed, so a rejected fleet leaves the board untouched.
    pub fn place(&mut self, ships: &[Ship]) -> Result<(), BoardError> {
        if !self.ships.is_empty() {
            return Err(BoardError::ShipsAlreadyPlaced);
        }
        if ships.is_empty() {
            return Err(BoardError::EmptyFleet);
        }

        let mut staged = BB::new();
        for (i, ship) in ships.iter().enumerate() {
            if !(MIN_SHIP_LENGTH..=MAX_SHIP_LENGTH).contains(&ship.length) {
                return Err(BoardError::InvalidShipLength {
                    ship: i,
                    length: ship.length,
                });
            }
            if !ship.fits() {
                return Err(BoardError::OutOfBounds { ship: i });
            }
            for cell in ship.cells() {
                if !staged.insert(cell)? {
                    return Err(BoardError::OverlappingShips { cell });
                }
            }
        }

        // commit
        for (i, ship) in ships.iter().enumerate() {
            for cell in ship.cells() {
                self.occupancy[cell.index()] = Some(i as u8);
            }
            self.ships.push(PlacedShip {
                ship: *ship,
                hits: 0,
            });
        }
        self.ship_map = staged;
        self.fired = BB::new();
        self.uncalled = (0..CELL_COUNT).map(Cell::from_index).collect();
        self.uncalled_slot = core::array::from_fn(|i| Some(i as u8));
        Ok(())
    }

    /// Fire at `cell`. Each cell resolves at most once; a repeat is rejected
    /// rather than re-scored.
    pub fn resolve_shot(&mut self, cell: Cell) -> Result<ShotOutcome, BoardError> {
        if !cell.in_bounds() {
            return Err(BoardError::CellOutOfBounds(cell));
        }
        if !self.fired.insert(cell)? {
            return Err(BoardError::AlreadyTargeted(cell));
        }
        self.take_uncalled(cell);

        let Some(idx) = self.occupancy[cell.index()] else {
            return Ok(ShotOutcome::Miss);
        };
        let placed = &mut self.ships[idx as usize];
        placed.hits += 1;
        if placed.is_sunk() {
            Ok(ShotOutcome::Sunk)
        } else {
            Ok(ShotOutcome::Hit)
        }
    }

    fn take_uncalled(&mut self, cell: Cell) {
        let Some(slot) = self.uncalled_slot[cell.index()].take() else {
            return;
        };
        let slot = slot as usize;
        self.uncalled.swap_remove(slot);
        if let Some(moved) = self.uncalled.get(slot) {
            self.uncalled_slot[moved.index()] = Some(slot as u8);
        }
    }

    /// `true` iff a fleet is placed and every ship in it is sunk.
    pub fn is_defeated(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(PlacedShip::is_sunk)
    }

    /// Uniformly random cell that has not been fired upon yet.
    pub fn pick_uncalled_cell<R: Rng>(&self, rng: &mut R) -> Option<Cell> {
        if self.uncalled.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.uncalled.len());
        Some(self.uncalled[idx])
    }

    pub fn is_placed(&self) -> bool {
        !self.ships.is_empty()
    }

    /// Whether `cell` has been fired upon. Off-grid cells count as not called.
    pub fn is_called(&self, cell: Cell) -> bool {
        self.fired.contains(cell).unwrap_or(false)
    }

    /// Ships as they were submitted.
    pub fn ships(&self) -> Vec<Ship> {
        self.ships.iter().map(|p| p.ship).collect()
    }

    pub fn uncalled_count(&self) -> usize {
        self.uncalled.len()
    }

    /// Number of cells covered by ships.
    pub fn ship_cell_count(&self) -> usize {
        self.ship_map.count()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  ship_map: {:?},\n  fired: {:?},\n  ships: {:?}\n}}",
            self.ship_map, self.fired, self.ships
        )
    }
}
