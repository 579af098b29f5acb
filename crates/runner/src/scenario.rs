//! Scenario files: grid size, flow parameters, initial layout and emitters.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sim::constants::{REFERENCE_HEIGHT, REFERENCE_WIDTH};
use sim::{FlowParams, Grid, Layout};

use crate::emitter::WaterEmitter;

/// A complete run description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default)]
    pub params: FlowParams,
    /// Explicit cell lists. Mutually exclusive with `map`.
    #[serde(default)]
    pub layout: Option<Layout>,
    /// Text map (`#` solid, `~` water). Sets the grid size.
    #[serde(default)]
    pub map: Option<String>,
    #[serde(default)]
    pub emitters: Vec<WaterEmitter>,
    #[serde(default = "default_steps")]
    pub steps: usize,
}

fn default_width() -> usize {
    REFERENCE_WIDTH
}

fn default_height() -> usize {
    REFERENCE_HEIGHT
}

fn default_steps() -> usize {
    500
}

impl Scenario {
    /// The container map with the three-cell spout pouring from the top.
    pub fn reference() -> Self {
        Self {
            name: "container".to_string(),
            description: "Spout pouring over the central container".to_string(),
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            params: FlowParams::default(),
            layout: None,
            map: None,
            emitters: vec![WaterEmitter::spout(REFERENCE_WIDTH)],
            steps: default_steps(),
        }
    }

    /// Build the initial grid. With neither `layout` nor `map` the
    /// container layout is used.
    pub fn build_grid(&self) -> Result<Grid> {
        let grid = match (&self.layout, &self.map) {
            (Some(_), Some(_)) => bail!("scenario '{}' sets both layout and map", self.name),
            (Some(layout), None) => Grid::with_layout(self.width, self.height, self.params, layout),
            (None, Some(map)) => {
                let (width, height) = Layout::text_size(map);
                Grid::with_layout(width, height, self.params, &Layout::parse(map))
            }
            (None, None) => Grid::with_layout(
                self.width,
                self.height,
                self.params,
                &Layout::container(self.width, self.height),
            ),
        };
        grid.with_context(|| format!("building grid for scenario '{}'", self.name))
    }

    /// Save scenario to a JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Load scenario from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let scenario = serde_json::from_str(&json)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim::{CellType, EditQueue};

    #[test]
    fn test_reference_builds() {
        let scenario = Scenario::reference();
        let grid = scenario.build_grid().unwrap();
        assert_eq!(grid.width(), 40);
        assert_eq!(grid.cell_type(19, 17), CellType::Solid);
    }

    #[test]
    fn test_minimal_json() {
        let scenario: Scenario = serde_json::from_str(r#"{ "name": "empty" }"#).unwrap();
        assert_eq!(scenario.width, 40);
        assert_eq!(scenario.steps, 500);
        assert!(scenario.emitters.is_empty());
        assert_eq!(scenario.params, FlowParams::default());
    }

    #[test]
    fn test_map_sets_size() {
        let scenario: Scenario = serde_json::from_str(
            r##"{ "name": "cup", "map": "#~~#\n#..#\n####", "steps": 3 }"##,
        )
        .unwrap();
        let grid = scenario.build_grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert_eq!(grid.cell_type(1, 0), CellType::Water);
    }

    #[test]
    fn test_layout_and_map_conflict() {
        let mut scenario = Scenario::reference();
        scenario.layout = Some(Layout::new());
        scenario.map = Some("#".to_string());
        assert!(scenario.build_grid().is_err());
    }

    #[test]
    fn test_layout_out_of_range_is_error() {
        let mut scenario = Scenario::reference();
        scenario.layout = Some(Layout::new().solid(40, 0));
        let err = scenario.build_grid().unwrap_err();
        assert!(err.to_string().contains("container"));
    }

    #[test]
    fn test_bundled_cup_scenario() {
        let scenario: Scenario =
            serde_json::from_str(include_str!("../scenarios/cup.json")).unwrap();
        assert!(scenario.params.open_boundaries);
        let stop = scenario.emitters[0].stop.unwrap();

        let mut grid = scenario.build_grid().unwrap();
        let mut queue = EditQueue::new();
        let mut drained = 0.0;
        let mut leaked_below = false;
        let mut mass_at_stop = 0.0;

        for tick in 0..scenario.steps as u64 {
            for emitter in &scenario.emitters {
                emitter.emit(tick, &mut queue);
            }
            let applied = queue.drain_into(&mut grid);
            assert_eq!(applied, if tick < stop { 2 } else { 0 }, "tick {tick}");

            grid.step();
            drained += grid.drained_last_step();
            leaked_below |= grid.mass(5, 5) > 0.0;
            if tick + 1 == stop {
                mass_at_stop = grid.total_mass();
            }
        }

        // Water left the cup through the hole and ran off the shelf edges
        assert!(leaked_below);
        assert!(drained > 0.0);
        assert!(grid.total_mass() < mass_at_stop);
        for (x, y) in [(2, 2), (7, 2), (2, 4), (4, 4), (6, 4), (7, 4)] {
            assert_eq!(grid.cell_type(x, y), CellType::Solid, "cup ({x}, {y})");
        }
        for x in 0..10 {
            assert_eq!(grid.cell_type(x, 6), CellType::Solid, "shelf ({x}, 6)");
        }
    }

    #[test]
    fn test_json_roundtrip_file() {
        let path = std::env::temp_dir().join("water_runner_scenario_test.json");
        let scenario = Scenario::reference();
        scenario.save_json(&path).unwrap();
        let loaded = Scenario::load_json(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, scenario);
    }
}
