//! Game board: the grid of squares, ship placement and shot resolution.

use std::fmt;

use rand::Rng;

use crate::core::common::{PlacementError, ShotResult};
use crate::core::config::{MAX_SHIP_LENGTH, PLACEMENT_ATTEMPTS};
use crate::core::coord::Coord;
use crate::core::ship::{Orientation, Ship, ShipId};
use crate::core::view::{write_grid, Glyph, PublicBoard};

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Square {
    coord: Coord,
    hit: bool,
    /// Index into the owning board's ship list. Set once at placement.
    ship: Option<usize>,
}

impl Square {
    fn new(coord: Coord) -> Self {
        Self {
            coord,
            hit: false,
            ship: None,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    pub fn is_occupied(&self) -> bool {
        self.ship.is_some()
    }
}

/// An N×N board owned by one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
    ships: Vec<Ship>,
    next_ship_id: u32,
}

impl Board {
    /// Create an empty `size`×`size` board.
    pub fn new(size: usize) -> Self {
        let squares = (0..size)
            .flat_map(|y| (0..size).map(move |x| Square::new(Coord::new(x, y))))
            .collect();
        Self {
            size,
            squares,
            ships: Vec::new(),
            next_ship_id: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn square(&self, coord: Coord) -> Option<&Square> {
        self.index(coord).map(|i| &self.squares[i])
    }

    /// Ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coord) -> Option<&Ship> {
        self.square(coord)?.ship.map(|i| &self.ships[i])
    }

    /// `true` once every placed ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.x < self.size && coord.y < self.size).then(|| coord.y * self.size + coord.x)
    }

    /// Place a ship of `length` squares starting at `origin`.
    ///
    /// Fails without touching the board if the run is too short or long,
    /// leaves the grid, or crosses another ship.
    pub fn place_ship(
        &mut self,
        length: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<&Ship, PlacementError> {
        if length == 0 || length > MAX_SHIP_LENGTH {
            return Err(PlacementError::InvalidLength {
                length,
                max: MAX_SHIP_LENGTH,
            });
        }
        let out_of_bounds = PlacementError::OutOfBounds {
            length,
            origin,
            orientation,
            size: self.size,
        };
        let mut cells = Vec::with_capacity(length);
        let mut indices = Vec::with_capacity(length);
        for i in 0..length {
            let coord = origin.step(orientation, i).ok_or(out_of_bounds.clone())?;
            let index = self.index(coord).ok_or(out_of_bounds.clone())?;
            if let Some(occupant) = self.squares[index].ship {
                return Err(PlacementError::Overlap {
                    at: coord,
                    occupant: self.ships[occupant].id(),
                });
            }
            cells.push(coord);
            indices.push(index);
        }

        let ship_index = self.ships.len();
        for index in indices {
            self.squares[index].ship = Some(ship_index);
        }
        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;
        self.ships.push(Ship::new(id, orientation, cells));
        Ok(&self.ships[ship_index])
    }

    /// Returns a random non-overlapping origin and orientation for a ship of
    /// `length`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<(Coord, Orientation), PlacementError> {
        if length == 0 || length > MAX_SHIP_LENGTH {
            return Err(PlacementError::InvalidLength {
                length,
                max: MAX_SHIP_LENGTH,
            });
        }
        if length <= self.size {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let orientation = if rng.random() {
                    Orientation::Right
                } else {
                    Orientation::Down
                };
                let (max_x, max_y) = match orientation {
                    Orientation::Right => (self.size - length, self.size - 1),
                    Orientation::Down => (self.size - 1, self.size - length),
                };
                let origin = Coord::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
                let free = (0..length).all(|i| {
                    origin
                        .step(orientation, i)
                        .and_then(|c| self.square(c))
                        .is_some_and(|sq| !sq.is_occupied())
                });
                if free {
                    return Ok((origin, orientation));
                }
            }
        }
        Err(PlacementError::NoRoom {
            length,
            attempts: PLACEMENT_ATTEMPTS,
        })
    }

    /// Place one randomly positioned ship per entry of `lengths`.
    pub fn place_random_fleet<R: Rng>(
        &mut self,
        rng: &mut R,
        lengths: &[usize],
    ) -> Result<(), PlacementError> {
        for &length in lengths {
            let (origin, orientation) = self.random_placement(rng, length)?;
            self.place_ship(length, origin, orientation)?;
        }
        Ok(())
    }

    /// Fire at `(x, y)`.
    ///
    /// Never fails: off-board coordinates are a miss and change nothing.
    /// Shooting a square again re-reports what is there now.
    pub fn shoot(&mut self, x: usize, y: usize) -> ShotResult {
        let Some(index) = self.index(Coord::new(x, y)) else {
            return ShotResult::Miss;
        };
        let square = &mut self.squares[index];
        let first_hit = !square.hit;
        square.hit = true;
        let Some(ship_index) = square.ship else {
            return ShotResult::Miss;
        };
        let ship = &mut self.ships[ship_index];
        if first_hit {
            ship.record_hit();
        }
        if ship.is_sunk() {
            ShotResult::Sunk
        } else {
            ShotResult::Hit
        }
    }

    fn glyph(&self, square: &Square, reveal_ships: bool) -> Glyph {
        match square.ship.map(|i| &self.ships[i]) {
            None if square.hit => Glyph::Miss,
            None => Glyph::Blank,
            Some(ship) if ship.is_sunk() => Glyph::Sunk,
            Some(_) if square.hit => Glyph::Hit,
            Some(ship) if reveal_ships => Glyph::Ship(ship.id().glyph()),
            Some(_) => Glyph::Blank,
        }
    }

    /// Glyph for every square, row by row.
    pub fn render(&self, reveal_ships: bool) -> Vec<Vec<Glyph>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.squares
            .chunks(self.size)
            .map(|row| row.iter().map(|sq| self.glyph(sq, reveal_ships)).collect())
            .collect()
    }

    /// Unsunk ship counts indexed by `length - 1`.
    pub fn remaining_ships(&self) -> [usize; MAX_SHIP_LENGTH] {
        let mut counts = [0; MAX_SHIP_LENGTH];
        for ship in self.ships.iter().filter(|s| !s.is_sunk()) {
            counts[ship.length() - 1] += 1;
        }
        counts
    }

    /// The view an opponent is allowed to see.
    pub fn public_view(&self) -> PublicBoard {
        PublicBoard::new(self.render(false), self.remaining_ships())
    }

    /// Text table of the board, with or without ship letters.
    pub fn display(&self, reveal_ships: bool) -> BoardDisplay<'_> {
        BoardDisplay {
            board: self,
            reveal_ships,
        }
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Board::display`].
pub struct BoardDisplay<'a> {
    board: &'a Board,
    reveal_ships: bool,
}

impl fmt::Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.board.render(self.reveal_ships))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(true), f)
    }
}
