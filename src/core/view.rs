//! Rendered board contents and the public view shared with opponents.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::core::config::MAX_SHIP_LENGTH;
use crate::core::coord::{column_letter, Coord};

/// What a single square displays as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Not shot at, and either empty or hiding a ship: `" "`.
    Blank,
    /// Shot at, no ship: `"."`.
    Miss,
    /// Shot at, ship still afloat: `"x"`.
    Hit,
    /// Part of a sunk ship: `"-"`.
    Sunk,
    /// Unhit square of a floating ship, only in revealed renders.
    Ship(char),
}

impl Glyph {
    pub fn as_char(self) -> char {
        match self {
            Glyph::Blank => ' ',
            Glyph::Miss => '.',
            Glyph::Hit => 'x',
            Glyph::Sunk => '-',
            Glyph::Ship(c) => c,
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Glyph {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(' '), None) => Ok(Glyph::Blank),
            (Some('.'), None) => Ok(Glyph::Miss),
            (Some('x'), None) => Ok(Glyph::Hit),
            (Some('-'), None) => Ok(Glyph::Sunk),
            (Some(c), None) if c.is_ascii_lowercase() => Ok(Glyph::Ship(c)),
            _ => Err(format!("invalid cell glyph {:?}", s)),
        }
    }
}

impl Serialize for Glyph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Glyph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Board as seen by an opponent: hidden ships, plus how many ships of each
/// length are still afloat.
///
/// Serializes as `{"board": [[" ", ...], ...], "remaining_ships": {"1": n, ...}}`
/// with rows as the outer array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicBoard {
    pub board: Vec<Vec<Glyph>>,
    #[serde(deserialize_with = "remaining_from_string_keys")]
    pub remaining_ships: BTreeMap<usize, usize>,
}

/// JSON object keys are strings. Inside a tagged event they reach us already
/// buffered, where serde_json no longer turns `"3"` into an integer for us.
fn remaining_from_string_keys<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<usize, usize>, D::Error> {
    BTreeMap::<String, usize>::deserialize(deserializer)?
        .into_iter()
        .map(|(length, count)| {
            length
                .parse()
                .map(|length| (length, count))
                .map_err(|_| de::Error::custom(format!("invalid ship length {:?}", length)))
        })
        .collect()
}

impl PublicBoard {
    pub(crate) fn new(board: Vec<Vec<Glyph>>, remaining: [usize; MAX_SHIP_LENGTH]) -> Self {
        let remaining_ships = (1..=MAX_SHIP_LENGTH)
            .zip(remaining)
            .collect();
        Self {
            board,
            remaining_ships,
        }
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.board.len()
    }

    pub fn glyph(&self, coord: Coord) -> Option<Glyph> {
        self.board.get(coord.y)?.get(coord.x).copied()
    }

    /// Unsunk ships of the given length.
    pub fn remaining(&self, length: usize) -> usize {
        self.remaining_ships.get(&length).copied().unwrap_or(0)
    }

    /// First blank square in row-major order.
    pub fn first_blank(&self) -> Option<Coord> {
        self.board.iter().enumerate().find_map(|(y, row)| {
            row.iter()
                .position(|&g| g == Glyph::Blank)
                .map(|x| Coord::new(x, y))
        })
    }
}

impl fmt::Display for PublicBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.board)
    }
}

/// Draw rows of glyphs as an ASCII table with lettered columns and
/// numbered rows.
pub(crate) fn write_grid(f: &mut fmt::Formatter<'_>, rows: &[Vec<Glyph>]) -> fmt::Result {
    let size = rows.len();
    let label = size.saturating_sub(1).to_string().len();
    let rule = format!("|{}+{}", "-".repeat(label + 2), "---+".repeat(size));
    writeln!(f, "{}", rule)?;
    write!(f, "| {:label$} |", "")?;
    for x in 0..size {
        match column_letter(x) {
            Some(letter) => write!(f, " {} |", letter)?,
            None => write!(f, " ? |")?,
        }
    }
    writeln!(f)?;
    for (y, row) in rows.iter().enumerate() {
        writeln!(f, "{}", rule)?;
        write!(f, "| {:>label$} |", y)?;
        for glyph in row {
            write!(f, " {} |", glyph)?;
        }
        writeln!(f)?;
    }
    writeln!(f, "{}", rule)
}
