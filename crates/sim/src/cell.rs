//! Cell classification.

use serde::{Deserialize, Serialize};

/// Classification of a single grid cell.
///
/// Only `Solid` is stored. `Open` and `Water` are derived from the cell's
/// mass every time they are read, so they can never drift out of sync with
/// the mass field.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub enum CellType {
    /// Dry, non-solid cell.
    #[default]
    Open,
    /// Obstacle - never sends or receives mass.
    Solid,
    /// Non-solid cell holding more than the dryness threshold.
    Water,
}

impl CellType {
    /// Classify a non-solid cell from its mass.
    #[inline]
    pub fn from_mass(mass: f32, min_mass: f32) -> Self {
        if mass > min_mass {
            CellType::Water
        } else {
            CellType::Open
        }
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        matches!(self, CellType::Solid)
    }

    #[inline]
    pub const fn is_water(self) -> bool {
        matches!(self, CellType::Water)
    }

    /// Single-character glyph used by text maps.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            CellType::Open => '.',
            CellType::Solid => '#',
            CellType::Water => '~',
        }
    }

    /// Inverse of [`CellType::glyph`]. Unknown characters read as `Open`.
    #[inline]
    pub const fn from_glyph(c: char) -> Self {
        match c {
            '#' => CellType::Solid,
            '~' => CellType::Water,
            _ => CellType::Open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mass_threshold() {
        assert_eq!(CellType::from_mass(0.0, 0.0001), CellType::Open);
        assert_eq!(CellType::from_mass(0.0001, 0.0001), CellType::Open);
        assert_eq!(CellType::from_mass(0.00011, 0.0001), CellType::Water);
        assert_eq!(CellType::from_mass(7.5, 0.0001), CellType::Water);
    }

    #[test]
    fn test_glyph_roundtrip() {
        for cell in [CellType::Open, CellType::Solid, CellType::Water] {
            assert_eq!(CellType::from_glyph(cell.glyph()), cell);
        }
        assert_eq!(CellType::from_glyph(' '), CellType::Open);
    }
}
