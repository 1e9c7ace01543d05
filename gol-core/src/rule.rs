//! Birth/survival rules for two-state Moore-neighbourhood automata.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, UniverseError};

/// Highest neighbour count a Moore neighbourhood can produce.
pub const MAX_NEIGHBORS: u8 = 8;

static RULE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[Bb]([0-8]+)/[Ss]([0-8]+)$").expect("rule regex is valid"));

/// Neighbour counts that cause birth in a dead cell and survival of a live one.
///
/// Both sets are subsets of `0..=8`. An empty set is legal and means "never".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RuleSet {
    birth: [bool; 9],
    survival: [bool; 9],
}

impl RuleSet {
    /// Conway's Game of Life, `B3/S23`.
    pub const STANDARD: RuleSet = RuleSet {
        birth: [false, false, false, true, false, false, false, false, false],
        survival: [false, false, true, true, false, false, false, false, false],
    };

    /// Builds a rule from explicit neighbour counts. Repeated counts are
    /// idempotent; counts above 8 are rejected.
    pub fn new(birth: &[u8], survival: &[u8]) -> Result<Self> {
        let to_set = |counts: &[u8]| -> Result<[bool; 9]> {
            let mut set = [false; 9];
            for &n in counts {
                if n > MAX_NEIGHBORS {
                    return Err(UniverseError::MalformedRule(format!(
                        "neighbour count {} is out of range 0-8",
                        n
                    )));
                }
                set[n as usize] = true;
            }
            Ok(set)
        };
        Ok(Self {
            birth: to_set(birth)?,
            survival: to_set(survival)?,
        })
    }

    /// Parses rule text such as `B3/S23`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let captures = RULE_REGEX
            .captures(text)
            .ok_or_else(|| UniverseError::MalformedRule(text.to_string()))?;

        let digits = |run: &str| -> Vec<u8> {
            run.bytes().map(|b| b - b'0').collect()
        };
        Self::new(&digits(&captures[1]), &digits(&captures[2]))
    }

    pub fn is_birth(&self, neighbors: u8) -> bool {
        self.birth.get(neighbors as usize).copied().unwrap_or(false)
    }

    pub fn is_survival(&self, neighbors: u8) -> bool {
        self.survival.get(neighbors as usize).copied().unwrap_or(false)
    }

    /// Renders the rule as `B<digits>/S<digits>`, digits ascending.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl FromStr for RuleSet {
    type Err = UniverseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in 0..=MAX_NEIGHBORS {
            if self.is_birth(n) {
                write!(f, "{}", n)?;
            }
        }
        write!(f, "/S")?;
        for n in 0..=MAX_NEIGHBORS {
            if self.is_survival(n) {
                write!(f, "{}", n)?;
            }
        }
        Ok(())
    }
}
