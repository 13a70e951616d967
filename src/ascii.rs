//! Text rendering: each cell becomes a glyph from a ramp of increasing visual
//! weight.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::walk::Atrium;

/// SSH keyart-style ramp, each glyph printed twice.
pub const RAMP: &[u8] = b" .o+=*BOX@%&#/^";

/// Lighter ramp for spaced output, each glyph preceded by a space.
pub const SPACED_RAMP: &[u8] = b" .,:;oix%08X&#@";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsciiStyle {
    pub spaced: bool,
    pub border: bool,
}

impl Default for AsciiStyle {
    fn default() -> Self {
        AsciiStyle {
            spaced: false,
            border: true,
        }
    }
}

/// Column order for display: left to right, reflected under mirror.
pub(crate) fn display_columns(atrium: &Atrium) -> Vec<usize> {
    let columns = atrium.columns();
    if atrium.mirror() {
        (0..columns).chain((0..columns).rev()).collect()
    } else {
        (0..columns).collect()
    }
}

fn glyph(ramp: &[u8], weight: f64) -> char {
    let max_index = ramp.len() - 1;
    let index = ((max_index as f64 * weight) as usize).min(max_index);
    char::from(ramp[index])
}

fn border_line(width: usize) -> String {
    format!("+{}+\n", "-".repeat(width))
}

pub fn render(atrium: &Atrium, style: &AsciiStyle) -> String {
    let ramp = if style.spaced { SPACED_RAMP } else { RAMP };
    let columns = display_columns(atrium);
    let width = columns.len() * 2 + usize::from(style.spaced);

    let mut out = String::with_capacity((width + 3) * (atrium.rows() + 2));
    if style.border {
        out.push_str(&border_line(width));
    }
    for row in 0..atrium.rows() {
        if style.border {
            out.push('|');
        }
        for &column in &columns {
            let ch = glyph(ramp, atrium.weight(row, column));
            if style.spaced {
                out.push(' ');
            } else {
                out.push(ch);
            }
            out.push(ch);
        }
        if style.border {
            if style.spaced {
                out.push(' ');
            }
            out.push('|');
        }
        out.push('\n');
    }
    if style.border {
        out.push_str(&border_line(width));
    }

    trace!("rendered {}x{} ascii avatar ({:?})", atrium.rows(), columns.len(), style);
    out
}
