//! Water emitters: cells refilled every frame for a window of frames.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use sim::{Edit, EditQueue};

/// Emitter for adding water to the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaterEmitter {
    pub cells: Vec<IVec2>,
    /// First frame the emitter runs.
    #[serde(default)]
    pub start: u64,
    /// Frame the emitter stops (exclusive). `None` runs forever.
    #[serde(default)]
    pub stop: Option<u64>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl WaterEmitter {
    pub fn new(cells: Vec<IVec2>) -> Self {
        Self {
            cells,
            start: 0,
            stop: None,
            enabled: true,
        }
    }

    /// Three cells on the top row, centred.
    pub fn spout(width: usize) -> Self {
        let cx = (width / 2) as i32 - 1;
        Self::new(vec![
            IVec2::new(cx - 1, 0),
            IVec2::new(cx, 0),
            IVec2::new(cx + 1, 0),
        ])
    }

    pub fn with_window(mut self, start: u64, stop: Option<u64>) -> Self {
        self.start = start;
        self.stop = stop;
        self
    }

    pub fn is_active(&self, frame: u64) -> bool {
        self.enabled && frame >= self.start && self.stop.map_or(true, |stop| frame < stop)
    }

    /// Queue this frame's edits.
    pub fn emit(&self, frame: u64, queue: &mut EditQueue) {
        if self.is_active(frame) {
            queue.extend(self.cells.iter().copied().map(Edit::Water));
        }
    }
}
