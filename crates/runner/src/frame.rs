//! Text rendering of a grid, one character per cell.

use sim::{CellType, Grid};

/// Water glyphs from nearly dry to full.
const LEVELS: [char; 4] = ['.', ':', '~', '='];
/// Cells at or above this mass are drawn as compressed.
const COMPRESSED: f32 = 1.0;

/// Glyph for a single cell.
pub fn glyph(cell: CellType, mass: f32, max_mass: f32) -> char {
    match cell {
        CellType::Solid => '#',
        CellType::Open => ' ',
        CellType::Water if mass >= COMPRESSED => '@',
        CellType::Water => {
            let level = (mass / max_mass * LEVELS.len() as f32) as usize;
            LEVELS[level.min(LEVELS.len() - 1)]
        }
    }
}

/// Render the grid including its boundary ring.
pub fn render(grid: &Grid) -> String {
    let max_mass = grid.params().max_mass;
    let mut out = String::with_capacity((grid.width() + 3) * (grid.height() + 2));
    for y in -1..=grid.height() as i32 {
        for x in -1..=grid.width() as i32 {
            out.push(glyph(grid.cell_type(x, y), grid.mass(x, y), max_mass));
        }
        out.push('\n');
    }
    out
}
