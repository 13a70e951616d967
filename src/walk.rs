//! The walk: a bishop wandering a walled atrium, leaving a coin on every tile
//! he steps on.
//!
//! Positions are `row + column * side`. The x bit moves one column (a full
//! stride of `side` cells), the y bit moves one row. Moves that would cross a
//! wall are dropped, never wrapped. Under mirror only the left half of the
//! columns exists; the right half is produced by reflection when rendering.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bits::{BitCursor, Discipline, Exhausted};
use crate::error::{Error, Result};

pub const MIN_BITS: u32 = 1;
pub const MAX_BITS: u32 = 8;
pub const DEFAULT_BITS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Bits per side: the grid is `2^bits` cells wide.
    pub bits: u32,
    pub mirror: bool,
    /// Allow occasional single-axis (king) steps.
    pub king: bool,
    pub discipline: Discipline,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            bits: DEFAULT_BITS,
            mirror: false,
            king: true,
            discipline: Discipline::Cyclic,
        }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BITS..=MAX_BITS).contains(&self.bits) {
            return Err(Error::InvalidSize {
                bits: self.bits,
                min: MIN_BITS,
                max: MAX_BITS,
            });
        }
        Ok(())
    }

    pub fn side(&self) -> usize {
        1 << self.bits
    }

    /// Number of addressable cells.
    pub fn cell_count(&self) -> usize {
        let cells = self.side() * self.side();
        if self.mirror { cells / 2 } else { cells }
    }

    /// Width of the starting-position field.
    pub fn start_bits(&self) -> u32 {
        if self.mirror { self.bits * 2 - 1 } else { self.bits * 2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal: one column, `side` cells.
    X,
    /// Vertical: one row, one cell.
    Y,
}

/// Movement mode for a single step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gait {
    /// Both axes move.
    #[default]
    Diagonal,
    /// Only the given axis moves. Always followed by a diagonal step.
    Single(Axis),
}

impl Gait {
    /// Gait for the next step. Without a tendency stream, or straight after a
    /// single-axis step, this is always diagonal and reads nothing.
    pub fn advance(self, tendency: Option<&mut BitCursor>) -> std::result::Result<Gait, Exhausted> {
        let Some(stream) = tendency else {
            return Ok(Gait::Diagonal);
        };
        match self {
            Gait::Single(_) => Ok(Gait::Diagonal),
            Gait::Diagonal if stream.next_bit()? == 1 => {
                let axis = if stream.next_bit()? == 1 { Axis::Y } else { Axis::X };
                Ok(Gait::Single(axis))
            }
            Gait::Diagonal => Ok(Gait::Diagonal),
        }
    }

    pub fn moves(self, axis: Axis) -> bool {
        match self {
            Gait::Diagonal => true,
            Gait::Single(only) => only == axis,
        }
    }
}

/// Why the walk stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// All `2 * cell_count` steps were taken.
    Completed,
    /// A finite bit stream ran dry first.
    Exhausted,
}

/// Per-cell visit counts left behind by a walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Atrium {
    counts: Vec<u32>,
    side: usize,
    mirror: bool,
    start: usize,
    moves: usize,
    termination: Termination,
}

impl Atrium {
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }

    pub fn rows(&self) -> usize {
        self.side
    }

    /// Addressable columns (half the side under mirror).
    pub fn columns(&self) -> usize {
        self.counts.len() / self.side
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> u32 {
        self.counts[row + column * self.side]
    }

    /// Largest count; at least 1 since the start is always stamped.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0).max(1)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Relative visit weight of a cell in `[0, 1]`.
    pub fn weight(&self, row: usize, column: usize) -> f64 {
        f64::from(self.get(row, column)) / f64::from(self.max_count())
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    #[cfg(test)]
    pub(crate) fn from_counts(counts: Vec<u32>, side: usize, mirror: bool) -> Self {
        let moves = counts.iter().map(|&c| c as usize).sum::<usize>().saturating_sub(1);
        Atrium {
            counts,
            side,
            mirror,
            start: 0,
            moves,
            termination: Termination::Completed,
        }
    }
}

struct Walker {
    steps: BitCursor,
    tendency: Option<BitCursor>,
    counts: Vec<u32>,
    side: usize,
    start_bits: u32,
    pos: usize,
    start: usize,
    moves: usize,
}

impl Walker {
    fn draw_position(&mut self) -> std::result::Result<usize, Exhausted> {
        Ok(self.steps.take_bits(self.start_bits)? as usize)
    }

    fn run(&mut self) -> std::result::Result<(), Exhausted> {
        let cells = self.counts.len();
        let side = self.side;

        self.pos = self.draw_position()?;
        self.start = self.pos;
        self.counts[self.pos] += 1;

        let mut gait = Gait::Diagonal;
        for i in 0..cells * 2 {
            let x = self.steps.next_bit()?;
            let y = self.steps.next_bit()?;
            gait = gait.advance(self.tendency.as_mut())?;

            let mut pos = self.pos;
            if gait.moves(Axis::X) {
                if x == 1 {
                    if pos + side < cells {
                        pos += side;
                    }
                } else if pos >= side {
                    pos -= side;
                }
            }
            if gait.moves(Axis::Y) {
                if y == 1 {
                    if (pos + 1) % side != 0 {
                        pos += 1;
                    }
                } else if pos % side != 0 {
                    pos -= 1;
                }
            }
            self.pos = pos;
            self.counts[pos] += 1;
            self.moves += 1;

            // Halfway: wake up somewhere new.
            if i == cells - 1 {
                self.pos = self.draw_position()?;
            }
        }
        Ok(())
    }
}

/// Walk the atrium for `digest` under `config`.
pub fn walk(digest: &[u8], config: &WalkConfig) -> Result<Atrium> {
    config.validate()?;

    let available = digest.len() * 8;
    let needed = config.start_bits() as usize;
    if available < needed {
        return Err(Error::DigestTooShort { available, needed });
    }

    let mut walker = Walker {
        steps: BitCursor::new(digest, config.discipline),
        tendency: config.king.then(|| BitCursor::reversed(digest)),
        counts: vec![0; config.cell_count()],
        side: config.side(),
        start_bits: config.start_bits(),
        pos: 0,
        start: 0,
        moves: 0,
    };

    let termination = match walker.run() {
        Ok(()) => Termination::Completed,
        Err(Exhausted) => Termination::Exhausted,
    };

    debug!(
        "walked {} cells: start={} moves={} termination={:?} bits_read={}",
        walker.counts.len(),
        walker.start,
        walker.moves,
        termination,
        walker.steps.consumed()
    );

    Ok(Atrium {
        counts: walker.counts,
        side: walker.side,
        mirror: config.mirror,
        start: walker.start,
        moves: walker.moves,
        termination,
    })
}
