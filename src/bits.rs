//! Bit-level views over a digest.
//!
//! Bits are read most-significant first within each byte, bytes in buffer
//! order. A cursor either cycles back to the first bit forever or stops with
//! [`Exhausted`] once every bit has been read.

use serde::{Deserialize, Serialize};

/// How a cursor behaves once its buffer has been fully consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Restart from the first bit. Never exhausts (unless the buffer is empty).
    #[default]
    Cyclic,
    /// Report [`Exhausted`] after the last bit.
    Finite,
}

/// Returned by a cursor with nothing left to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exhausted;

impl std::fmt::Display for Exhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("bit stream exhausted")
    }
}

impl std::error::Error for Exhausted {}

#[derive(Clone, Debug)]
pub struct BitCursor {
    bytes: Vec<u8>,
    pos: usize,
    discipline: Discipline,
}

impl BitCursor {
    pub fn new(bytes: &[u8], discipline: Discipline) -> Self {
        BitCursor {
            bytes: bytes.to_vec(),
            pos: 0,
            discipline,
        }
    }

    pub fn cyclic(bytes: &[u8]) -> Self {
        Self::new(bytes, Discipline::Cyclic)
    }

    pub fn finite(bytes: &[u8]) -> Self {
        Self::new(bytes, Discipline::Finite)
    }

    /// Cyclic cursor over the whole bit sequence reversed: the last bit of the
    /// last byte comes out first.
    pub fn reversed(bytes: &[u8]) -> Self {
        let flipped: Vec<u8> = bytes.iter().rev().map(|b| b.reverse_bits()).collect();
        Self::new(&flipped, Discipline::Cyclic)
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Total number of bits in one pass over the buffer.
    pub fn len_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Bits read so far, counting every lap of a cyclic cursor.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    pub fn next_bit(&mut self) -> Result<u8, Exhausted> {
        let total = self.len_bits();
        if total == 0 {
            return Err(Exhausted);
        }
        let idx = match self.discipline {
            Discipline::Cyclic => self.pos % total,
            Discipline::Finite if self.pos < total => self.pos,
            Discipline::Finite => return Err(Exhausted),
        };
        self.pos += 1;
        let byte = self.bytes[idx / 8];
        Ok((byte >> (7 - idx % 8)) & 1)
    }

    /// Read `n` bits (at most 64) as an unsigned integer, first bit read
    /// landing in the most significant position.
    pub fn take_bits(&mut self, n: u32) -> Result<u64, Exhausted> {
        debug_assert!(n <= 64);
        let mut value = 0u64;
        for _ in 0..n {
            value = (value << 1) | u64::from(self.next_bit()?);
        }
        Ok(value)
    }
}
