//! Tunable parameters for the mass-transfer rule.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_COMPRESS, MAX_MASS, MAX_SPEED, MIN_FLOW, MIN_MASS};
use crate::error::{SimError, SimResult};

/// Flow parameters. `Default` matches the reference tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParams {
    /// Normal, un-pressurized mass of a full water cell.
    pub max_mass: f32,
    /// Extra mass a cell may hold relative to the cell above it.
    pub max_compress: f32,
    /// Cap on vertical transfer per step.
    pub max_speed: f32,
    /// Flows above this are halved.
    pub min_flow: f32,
    /// Dryness threshold for Open/Water classification.
    pub min_mass: f32,
    /// Zero a cell's mass when it is turned solid. If false the mass stays
    /// in place, frozen and inert.
    pub clear_mass_on_solid: bool,
    /// Open boundaries - if true, the outer ring accepts flow and drains it.
    /// If false, the ring is solid and the grid is a closed system.
    pub open_boundaries: bool,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            max_mass: MAX_MASS,
            max_compress: MAX_COMPRESS,
            max_speed: MAX_SPEED,
            min_flow: MIN_FLOW,
            min_mass: MIN_MASS,
            clear_mass_on_solid: false,
            open_boundaries: false,
        }
    }
}

impl FlowParams {
    /// Check that every constant is finite and in range.
    pub fn validate(&self) -> SimResult<()> {
        let checks = [
            ("max_mass", self.max_mass, false),
            ("max_compress", self.max_compress, true),
            ("max_speed", self.max_speed, false),
            ("min_flow", self.min_flow, true),
            ("min_mass", self.min_mass, true),
        ];
        for (name, value, zero_ok) in checks {
            if !value.is_finite() {
                return Err(SimError::InvalidParams(format!("{name} must be finite, got {value}")));
            }
            if value < 0.0 || (!zero_ok && value == 0.0) {
                return Err(SimError::InvalidParams(format!(
                    "{name} must be {}, got {value}",
                    if zero_ok { "non-negative" } else { "positive" }
                )));
            }
        }
        Ok(())
    }

    /// Mass the lower of two stacked cells settles to when they hold
    /// `total_mass` between them.
    ///
    /// Three bands:
    /// - up to one unit, the lower cell takes all of it (target 1)
    /// - a linear transition band below `2 * max_mass + max_compress`
    /// - beyond that the excess splits evenly, the lower cell `max_compress` ahead
    #[inline]
    pub fn stable_height(&self, total_mass: f32) -> f32 {
        let max_mass = self.max_mass;
        let max_compress = self.max_compress;
        if total_mass <= 1.0 {
            1.0
        } else if total_mass < 2.0 * max_mass + max_compress {
            (max_mass * max_mass + total_mass * max_compress) / (max_mass + max_compress)
        } else {
            (total_mass + max_compress) / 2.0
        }
    }

    /// Halve flows above `min_flow`.
    #[inline]
    pub(crate) fn damp(&self, flow: f32) -> f32 {
        if flow > self.min_flow {
            flow * 0.5
        } else {
            flow
        }
    }
}
