//! Mass-transfer update rule.
//!
//! Each non-solid cell pushes mass to its neighbours in a fixed order:
//! down, left, right, up. Flow magnitudes read only the step-start
//! snapshot, so the result does not depend on visiting order.

use crate::grid::Grid;
use crate::params::FlowParams;

impl FlowParams {
    /// Mass moving down into a cell holding `below`.
    #[inline]
    pub fn downward_flow(&self, remaining: f32, below: f32) -> f32 {
        let flow = self.stable_height(remaining + below) - below;
        clamp_flow(self.damp(flow), self.max_speed.min(remaining))
    }

    /// Mass moving sideways toward a cell holding `neighbour`. Equalizes
    /// over four steps, bounded only by what is left in the source.
    #[inline]
    pub fn lateral_flow(&self, here: f32, neighbour: f32, remaining: f32) -> f32 {
        let flow = (here - neighbour) / 4.0;
        clamp_flow(self.damp(flow), remaining)
    }

    /// Mass rising into a cell holding `above`. Only the excess over the
    /// compressed stable state moves, undamped.
    #[inline]
    pub fn upward_flow(&self, remaining: f32, above: f32) -> f32 {
        let flow = remaining - self.stable_height(remaining + above);
        clamp_flow(flow, self.max_speed.min(remaining))
    }
}

#[inline]
fn clamp_flow(flow: f32, cap: f32) -> f32 {
    if flow > cap {
        cap
    } else if flow < 0.0 {
        0.0
    } else {
        flow
    }
}

#[inline]
fn transfer(next: &mut [f32], from: usize, to: usize, amount: f32) {
    next[from] -= amount;
    next[to] += amount;
}

impl Grid {
    /// Advance the simulation by one step.
    ///
    /// Computes every flow from the current mass field into the next-mass
    /// buffer, commits it, then drains the boundary ring. Open/Water
    /// classification follows the committed mass.
    pub fn step(&mut self) {
        let params = self.params;
        let stride = self.stride;
        let (width, height) = (self.width, self.height);

        self.next_mass.copy_from_slice(&self.mass);
        let mass = &self.mass;
        let solid = &self.solid;
        let next = &mut self.next_mass;

        for y in 1..=height {
            for x in 1..=width {
                let idx = y * stride + x;
                if solid[idx] {
                    continue;
                }

                let mut remaining = mass[idx];
                if remaining <= 0.0 {
                    continue;
                }

                // Below
                let below = idx + stride;
                if !solid[below] {
                    let flow = params.downward_flow(remaining, mass[below]);
                    transfer(next, idx, below, flow);
                    remaining -= flow;
                }
                if remaining <= 0.0 {
                    continue;
                }

                // Left
                let left = idx - 1;
                if !solid[left] {
                    let flow = params.lateral_flow(mass[idx], mass[left], remaining);
                    transfer(next, idx, left, flow);
                    remaining -= flow;
                }
                if remaining <= 0.0 {
                    continue;
                }

                // Right
                let right = idx + 1;
                if !solid[right] {
                    let flow = params.lateral_flow(mass[idx], mass[right], remaining);
                    transfer(next, idx, right, flow);
                    remaining -= flow;
                }
                if remaining <= 0.0 {
                    continue;
                }

                // Above: pressure relief only
                let above = idx - stride;
                if !solid[above] {
                    let flow = params.upward_flow(remaining, mass[above]);
                    transfer(next, idx, above, flow);
                }
            }
        }

        std::mem::swap(&mut self.mass, &mut self.next_mass);
        for m in self.mass.iter_mut() {
            if *m < 0.0 {
                *m = 0.0;
            }
        }

        let mut drained = 0.0;
        for idx in self.ring_indices() {
            drained += self.mass[idx];
            self.mass[idx] = 0.0;
        }
        self.drained = drained;
        self.frame += 1;

        log::trace!(
            "step {}: interior mass {:.4}, drained {:.4}",
            self.frame,
            self.total_mass(),
            drained
        );
    }

    /// Run `steps` steps back to back.
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }
}
