use gol_config::OutputFormat;
use gol_core::{Cell, SimulationEngine};
use serde::Serialize;

use crate::TransportError;

/// Renders the current engine state for output.
pub trait Serializer: Send + Sync {
    fn serialize(&self, engine: &SimulationEngine) -> Result<String, TransportError>;
}

/// Writes the `#N/#R/#S` universe format, reloadable as input.
pub struct UniverseTextSerializer;

impl Serializer for UniverseTextSerializer {
    fn serialize(&self, engine: &SimulationEngine) -> Result<String, TransportError> {
        Ok(engine.to_universe_text())
    }
}

/// Current generation as a JSON document.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub name: &'a str,
    pub rules: String,
    pub width: usize,
    pub height: usize,
    pub generation: u64,
    pub population: usize,
    pub live_cells: Vec<Cell>,
}

impl<'a> Snapshot<'a> {
    pub fn of(engine: &'a SimulationEngine) -> Self {
        let live_cells = engine.live_cells();
        Self {
            name: engine.name(),
            rules: engine.rules().to_string(),
            width: engine.width(),
            height: engine.height(),
            generation: engine.generation(),
            population: live_cells.len(),
            live_cells,
        }
    }
}

/// Serializes a [`Snapshot`] as pretty-printed JSON.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, engine: &SimulationEngine) -> Result<String, TransportError> {
        let mut json = serde_json::to_string_pretty(&Snapshot::of(engine))?;
        json.push('\n');
        Ok(json)
    }
}

pub fn create_serializer(format: OutputFormat) -> Box<dyn Serializer> {
    match format {
        OutputFormat::Universe => Box::new(UniverseTextSerializer),
        OutputFormat::Json => Box::new(JsonSerializer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gol_core::parse;

    fn blinker() -> SimulationEngine {
        let text = "#N Blinker\n#R #B3/S23\n#S 5 5\n2 1\n2 2\n2 3\n";
        SimulationEngine::new(parse(text).unwrap()).unwrap()
    }

    #[test]
    fn universe_text_matches_engine_dump() {
        let mut engine = blinker();
        engine.advance(1);
        let text = create_serializer(OutputFormat::Universe)
            .serialize(&engine)
            .unwrap();
        assert_eq!(text, "#N Blinker\n#R #B3/S23\n#S 5 5\n1 2\n2 2\n3 2\n");
    }

    #[test]
    fn json_snapshot_fields() {
        let mut engine = blinker();
        engine.advance(2);
        let json = JsonSerializer.serialize(&engine).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Blinker");
        assert_eq!(value["rules"], "B3/S23");
        assert_eq!(value["width"], 5);
        assert_eq!(value["generation"], 2);
        assert_eq!(value["population"], 3);
        assert_eq!(value["live_cells"][0], serde_json::json!({ "x": 2, "y": 1 }));
    }
}
