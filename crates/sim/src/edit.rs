//! Deferred grid mutations.
//!
//! Drivers that gather input while a frame is being produced push edits
//! here and drain them between steps, so no mutation ever lands mid-step.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edit {
    /// Fill a cell with one nominal cell of water.
    Water(IVec2),
    /// Turn a cell solid.
    Solid(IVec2),
}

impl Edit {
    #[inline]
    pub fn cell(&self) -> IVec2 {
        match *self {
            Edit::Water(c) | Edit::Solid(c) => c,
        }
    }
}

impl Grid {
    /// Apply a single edit immediately.
    pub fn apply(&mut self, edit: Edit) -> SimResult<()> {
        match edit {
            Edit::Water(c) => self.place_water(c.x, c.y),
            Edit::Solid(c) => self.place_solid(c.x, c.y),
        }
    }
}

/// FIFO of pending edits.
#[derive(Clone, Debug, Default)]
pub struct EditQueue {
    pending: VecDeque<Edit>,
}

impl EditQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: Edit) {
        self.pending.push_back(edit);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Apply all pending edits in order. Rejected edits are logged and
    /// skipped. Returns the number applied.
    pub fn drain_into(&mut self, grid: &mut Grid) -> usize {
        let mut applied = 0;
        for edit in self.pending.drain(..) {
            match grid.apply(edit) {
                Ok(()) => applied += 1,
                Err(e) => log::warn!("dropping {:?}: {}", edit, e),
            }
        }
        applied
    }
}

impl Extend<Edit> for EditQueue {
    fn extend<T: IntoIterator<Item = Edit>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}
