//! Indentation-unit preparse
//!
//! Python structure is keyed off indentation, so before detection starts the
//! source is scanned once: tab indentation has unit width 1, space
//! indentation gets its unit guessed from the observed indent widths. Mixing
//! tabs and spaces anywhere in leading whitespace is fatal.
//!
//! The guess walks the candidate list largest-first and takes the first unit
//! for which at most 20% of the observed indents are non-multiples; real
//! files contain the odd hand-aligned continuation line, hence the
//! tolerance.

use crate::error::{ParseError, ParseResult};
use crate::position::SourceLines;

pub const INDENT_UNIT_CANDIDATES: [usize; 5] = [12, 6, 4, 3, 2];
pub const INDENT_OUTLIER_TOLERANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentUnit {
    Tabs,
    Spaces(usize),
}

impl IndentUnit {
    /// Characters per structural level.
    pub fn width(&self) -> usize {
        match self {
            IndentUnit::Tabs => 1,
            IndentUnit::Spaces(n) => *n,
        }
    }
}

/// Scan leading whitespace across the file and settle the indent unit.
pub fn detect_indent_unit(lines: &SourceLines) -> ParseResult<IndentUnit> {
    let mut uses_tabs = false;
    let mut uses_spaces = false;
    let mut widths: Vec<usize> = Vec::new();

    for line_no in 0..lines.line_count() {
        let line = lines.line(line_no);
        let leading: Vec<char> = line
            .chars()
            .take_while(|&c| c == ' ' || c == '\t')
            .collect();
        if leading.len() == line.chars().count() {
            // Whitespace-only line; its indentation means nothing.
            continue;
        }
        if leading.is_empty() {
            continue;
        }
        let has_tab = leading.contains(&'\t');
        let has_space = leading.contains(&' ');
        if has_tab && has_space {
            return Err(ParseError::MixedIndentation { line: line_no });
        }
        if (has_tab && uses_spaces) || (has_space && uses_tabs) {
            return Err(ParseError::MixedIndentation { line: line_no });
        }
        uses_tabs |= has_tab;
        uses_spaces |= has_space;
        widths.push(leading.len());
    }

    if uses_tabs {
        return Ok(IndentUnit::Tabs);
    }
    if widths.is_empty() {
        return Ok(IndentUnit::Spaces(4));
    }
    for candidate in INDENT_UNIT_CANDIDATES {
        let non_multiples = widths.iter().filter(|&&w| w % candidate != 0).count();
        if (non_multiples as f64) <= INDENT_OUTLIER_TOLERANCE * (widths.len() as f64) {
            log::debug!("indent unit: {candidate} spaces ({} samples)", widths.len());
            return Ok(IndentUnit::Spaces(candidate));
        }
    }
    Ok(IndentUnit::Spaces(1))
}
