//! The line-oriented universe text format.
//!
//! ```text
//! #N <name>
//! #R #B<digits>/S<digits>
//! #S <width> <height>
//! <x> <y>
//! ...
//! ```
//!
//! Parsing is permissive: a malformed rule falls back to `B3/S23`, and
//! unrecognized lines are skipped. Each recovery is reported alongside the
//! parsed description. Only a missing or malformed size record is fatal.
//! Coordinates are not range-checked here; see
//! [`ToroidalGrid::from_description`](crate::grid::ToroidalGrid::from_description).

use std::fmt;

use log::debug;

use crate::cell::Cell;
use crate::error::{Result, UniverseError};
use crate::grid::MAX_CELLS;
use crate::rule::RuleSet;
use crate::universe::UniverseDescription;

const NAME_TAG: &str = "#N";
const RULE_TAG: &str = "#R";
const SIZE_TAG: &str = "#S";

/// A record the parser tolerated instead of rejecting. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery {
    /// No `#R` record; the standard rule was used.
    MissingRule,
    /// The `#R` record did not parse; the standard rule was used.
    MalformedRule { line: usize, error: UniverseError },
    /// A `#` line with an unknown tag.
    UnrecognizedHeader { line: usize, text: String },
    /// A body line that is not a pair of integers.
    IgnoredLine { line: usize, text: String },
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovery::MissingRule => write!(
                f,
                "No transition rules specified; standard rules {} will be used",
                RuleSet::STANDARD
            ),
            Recovery::MalformedRule { line, error } => write!(
                f,
                "Line {}: {}; standard rules {} will be used",
                line,
                error,
                RuleSet::STANDARD
            ),
            Recovery::UnrecognizedHeader { line, text } => {
                write!(f, "Line {}: ignoring unrecognized header {:?}", line, text)
            }
            Recovery::IgnoredLine { line, text } => {
                write!(f, "Line {}: ignoring malformed cell coordinates {:?}", line, text)
            }
        }
    }
}

/// A parsed universe together with everything the parser had to recover from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUniverse {
    pub description: UniverseDescription,
    pub recoveries: Vec<Recovery>,
}

/// Parses universe text, discarding the recovery report.
pub fn parse(text: &str) -> Result<UniverseDescription> {
    parse_with_report(text).map(|parsed| parsed.description)
}

pub fn parse_with_report(text: &str) -> Result<ParsedUniverse> {
    let mut name = String::new();
    let mut rules = None;
    let mut size = None;
    let mut live_cells = Vec::new();
    let mut recoveries = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix(NAME_TAG) {
            name = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(RULE_TAG) {
            let rule_text = rest.trim();
            let rule_text = rule_text.strip_prefix('#').unwrap_or(rule_text);
            match RuleSet::parse(rule_text) {
                Ok(parsed) => rules = Some(parsed),
                Err(error) => {
                    debug!("Line {}: {}", line_no, error);
                    rules = Some(RuleSet::STANDARD);
                    recoveries.push(Recovery::MalformedRule {
                        line: line_no,
                        error,
                    });
                }
            }
        } else if let Some(rest) = line.strip_prefix(SIZE_TAG) {
            size = Some(parse_size(rest).map_err(|reason| {
                UniverseError::MalformedSize(format!("line {}: {}", line_no, reason))
            })?);
        } else if line.starts_with('#') {
            debug!("Line {}: unrecognized header {:?}", line_no, line);
            recoveries.push(Recovery::UnrecognizedHeader {
                line: line_no,
                text: line.to_string(),
            });
        } else {
            match parse_coordinates(line) {
                Some(cell) => live_cells.push(cell),
                None => {
                    debug!("Line {}: not a coordinate pair: {:?}", line_no, line);
                    recoveries.push(Recovery::IgnoredLine {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
            }
        }
    }

    let (width, height) = size
        .ok_or_else(|| UniverseError::MalformedSize("missing #S size record".to_string()))?;
    let rules = rules.unwrap_or_else(|| {
        recoveries.insert(0, Recovery::MissingRule);
        RuleSet::STANDARD
    });

    debug!(
        "Parsed universe {:?}: {}x{} {} with {} cells",
        name,
        width,
        height,
        rules,
        live_cells.len()
    );

    Ok(ParsedUniverse {
        description: UniverseDescription::new(name, width, height, rules, live_cells),
        recoveries,
    })
}

fn parse_size(rest: &str) -> std::result::Result<(usize, usize), String> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let [width, height] = tokens[..] else {
        return Err(format!("expected `#S <width> <height>`, got {:?}", rest.trim()));
    };
    let extent = |token: &str| match token.parse::<usize>() {
        Ok(0) => Err(format!("dimension must be positive, got {}", token)),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("{:?} is not a non-negative integer", token)),
    };
    let (width, height) = (extent(width)?, extent(height)?);
    match width.checked_mul(height) {
        Some(area) if area <= MAX_CELLS => Ok((width, height)),
        _ => Err(format!("{}x{} grid exceeds {} cells", width, height, MAX_CELLS)),
    }
}

fn parse_coordinates(line: &str) -> Option<Cell> {
    let mut tokens = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty());
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    match tokens.next() {
        Some(_) => None,
        None => Some(Cell::alive(x, y)),
    }
}

/// [`fmt::Display`] adapter rendering a description with an explicit cell list.
#[derive(Debug, Clone, Copy)]
pub struct UniverseText<'a> {
    description: &'a UniverseDescription,
    live_cells: &'a [Cell],
}

impl<'a> UniverseText<'a> {
    pub fn new(description: &'a UniverseDescription, live_cells: &'a [Cell]) -> Self {
        Self {
            description,
            live_cells,
        }
    }
}

impl fmt::Display for UniverseText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.description;
        writeln!(f, "{} {}", NAME_TAG, d.name)?;
        writeln!(f, "{} #{}", RULE_TAG, d.rules)?;
        writeln!(f, "{} {} {}", SIZE_TAG, d.width, d.height)?;
        for cell in self.live_cells.iter().filter(|cell| cell.alive) {
            writeln!(f, "{} {}", cell.x, cell.y)?;
        }
        Ok(())
    }
}

/// Serializes `description`'s header followed by `live_cells` in the order
/// supplied. Dead entries are skipped.
pub fn serialize(description: &UniverseDescription, live_cells: &[Cell]) -> String {
    UniverseText::new(description, live_cells).to_string()
}
