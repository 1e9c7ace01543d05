use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub universe: UniverseSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where the starting universe comes from
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct UniverseSettings {
    /// Universe file loaded when none is given on the command line.
    pub input: Option<PathBuf>,
    /// Directory of universe files to pick a fallback from.
    pub default_universes_dir: Option<PathBuf>,
    /// Built-in universe to fall back to, by name.
    pub default_pattern: Option<String>,
    /// Seed for picking a fallback universe; entropy when unset.
    pub seed: Option<u64>,
}

/// Terminal rendering settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplaySettings {
    #[serde(default = "default_display_enabled")]
    pub enabled: bool,
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,
    #[serde(default = "default_live_glyph")]
    pub live_glyph: char,
    #[serde(default = "default_dead_glyph")]
    pub dead_glyph: char,
}

fn default_display_enabled() -> bool { true }
fn default_frame_delay_ms() -> u64 { 100 }
fn default_live_glyph() -> char { '■' }
fn default_dead_glyph() -> char { ' ' }

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            enabled: default_display_enabled(),
            frame_delay_ms: default_frame_delay_ms(),
            live_glyph: default_live_glyph(),
            dead_glyph: default_dead_glyph(),
        }
    }
}

/// Where and how offline runs write their result
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutputSettings {
    /// Output file; standard output when unset.
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `#N/#R/#S` universe text, loadable again
    #[default]
    Universe,
    /// JSON snapshot of the current generation
    Json,
}
