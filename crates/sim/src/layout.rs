//! Obstacle layouts: which cells start solid and which start full of water.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::cell::CellType;
use crate::error::SimResult;
use crate::grid::Grid;

/// Initial solid and water cells, in interior coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub solids: Vec<IVec2>,
    #[serde(default)]
    pub water: Vec<IVec2>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solid(mut self, x: i32, y: i32) -> Self {
        self.solids.push(IVec2::new(x, y));
        self
    }

    pub fn water(mut self, x: i32, y: i32) -> Self {
        self.water.push(IVec2::new(x, y));
        self
    }

    /// Horizontal run of solid cells from `x0` to `x1` inclusive.
    pub fn solid_row(mut self, x0: i32, x1: i32, y: i32) -> Self {
        self.solids.extend((x0..=x1).map(|x| IVec2::new(x, y)));
        self
    }

    /// Vertical run of solid cells from `y0` to `y1` inclusive.
    pub fn solid_column(mut self, x: i32, y0: i32, y1: i32) -> Self {
        self.solids.extend((y0..=y1).map(|y| IVec2::new(x, y)));
        self
    }

    /// The demonstration map: an open-top container in the middle, a short
    /// ledge under the spout, two pyramids below the container and a wide
    /// ledge near the floor. Positions are taken relative to the centre so
    /// a 40x40 grid gets the classic demo placement. An inner floor and
    /// right wall sit one cell inside the ring, leaving the last row and
    /// column as a sealed gutter. Cells that do not fit in smaller grids
    /// are dropped.
    pub fn container(width: usize, height: usize) -> Self {
        let cx = (width / 2) as i32;
        let cy = (height / 2) as i32;
        let (w, h) = (width as i32, height as i32);
        let floor = h - 9;

        let mut layout = Self::new()
            // Container: floor plus two walls
            .solid_row(cx - 4, cx + 2, cy - 3)
            .solid_column(cx - 4, cy - 6, cy - 3)
            .solid_column(cx + 2, cy - 6, cy - 3)
            // Ledge splitting the spout
            .solid(cx - 2, 2)
            .solid(cx - 3, 2)
            .solid(cx, 2)
            .solid(cx + 1, 2);

        for px in [cx - 5, cx + 3] {
            layout = layout
                .solid(px, cy + 1)
                .solid_row(px - 1, px + 1, cy + 2)
                .solid_row(px - 2, px + 2, cy + 3);
        }

        layout = layout
            .solid_row(cx - 6, cx + 4, floor)
            .solid_row(0, w - 1, h - 2)
            .solid_column(w - 2, 0, h - 1);

        layout
            .solids
            .retain(|c| c.x >= 0 && c.y >= 0 && c.x < w && c.y < h);
        layout
    }

    /// Parse a text map: one row per line, `#` solid, `~` water, anything
    /// else open. Rows may differ in length.
    pub fn parse(text: &str) -> Self {
        let mut layout = Self::new();
        for (y, line) in text.lines().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let cell = IVec2::new(x as i32, y as i32);
                match CellType::from_glyph(c) {
                    CellType::Solid => layout.solids.push(cell),
                    CellType::Water => layout.water.push(cell),
                    CellType::Open => {}
                }
            }
        }
        layout
    }

    /// Bounding size `(width, height)` of a text map.
    pub fn text_size(text: &str) -> (usize, usize) {
        let width = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
        (width, text.lines().count())
    }

    /// Place every cell on `grid`: solids first, then water.
    pub fn apply(&self, grid: &mut Grid) -> SimResult<()> {
        for cell in &self.solids {
            grid.place_solid(cell.x, cell.y)?;
        }
        for cell in &self.water {
            grid.place_water(cell.x, cell.y)?;
        }
        Ok(())
    }
}
