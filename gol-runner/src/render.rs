use gol_config::DisplaySettings;
use gol_core::SimulationEngine;

pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";
pub const TITLE: &str = "Conway's game of life.";

/// Draws the current generation: a header followed by one text row per grid
/// row, each cell as its glyph plus a space.
pub fn render(engine: &SimulationEngine, display: &DisplaySettings) -> String {
    let grid = engine.grid();
    let mut frame = String::with_capacity((grid.width() * 2 + 1) * grid.height() + 128);

    frame.push_str(&format!("{}\n\n{}\n", TITLE, engine.name()));
    frame.push_str(&format!(
        "{}  generation {}  population {}\n",
        engine.rules(),
        engine.generation(),
        grid.population()
    ));
    for row in grid.rows() {
        for &alive in row {
            frame.push(if alive { display.live_glyph } else { display.dead_glyph });
            frame.push(' ');
        }
        frame.push('\n');
    }
    frame
}
