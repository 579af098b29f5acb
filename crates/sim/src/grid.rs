//! Grid state: solid flags and the double-buffered mass field.
//!
//! Public coordinates are interior-relative: `(0, 0)` is the top-left
//! interior cell, `y` grows downward. Storage carries a one-cell ring
//! around the interior, so the ring is addressable at `x == -1`,
//! `x == width`, `y == -1` and `y == height`.

use crate::cell::CellType;
use crate::constants::{REFERENCE_HEIGHT, REFERENCE_WIDTH};
use crate::error::{SimError, SimResult};
use crate::layout::Layout;
use crate::params::FlowParams;

/// Water grid with a closed boundary ring.
///
/// Only the solid flag is authoritative. Open/Water classification is
/// derived from `mass` on read.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) width: usize,
    pub(crate) height: usize,
    /// Row stride of the storage arrays (`width + 2`).
    pub(crate) stride: usize,
    pub(crate) params: FlowParams,
    pub(crate) solid: Vec<bool>,
    /// Step-start snapshot. Flow magnitudes only ever read this.
    pub(crate) mass: Vec<f32>,
    /// Accumulator for the step in progress. Swapped with `mass` at commit.
    pub(crate) next_mass: Vec<f32>,
    /// Mass removed from the ring by the last step.
    pub(crate) drained: f32,
    /// Number of completed steps.
    pub(crate) frame: u64,
}

impl Grid {
    /// Create an empty grid (all interior cells Open, zero mass) with the
    /// boundary ring established.
    pub fn new(width: usize, height: usize, params: FlowParams) -> SimResult<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        params.validate()?;

        let stride = width + 2;
        let len = stride * (height + 2);
        let mut grid = Self {
            width,
            height,
            stride,
            params,
            solid: vec![false; len],
            mass: vec![0.0; len],
            next_mass: vec![0.0; len],
            drained: 0.0,
            frame: 0,
        };

        if !params.open_boundaries {
            for idx in grid.ring_indices() {
                grid.solid[idx] = true;
            }
        }

        log::debug!(
            "created {}x{} grid (open boundaries: {})",
            width,
            height,
            params.open_boundaries
        );
        Ok(grid)
    }

    /// Create a grid and apply `layout` to it. Fails if any layout cell lies
    /// outside the interior.
    pub fn with_layout(
        width: usize,
        height: usize,
        params: FlowParams,
        layout: &Layout,
    ) -> SimResult<Self> {
        let mut grid = Self::new(width, height, params)?;
        layout.apply(&mut grid)?;
        log::debug!(
            "applied layout: {} solid, {} water",
            layout.solids.len(),
            layout.water.len()
        );
        Ok(grid)
    }

    /// The 40x40 reference grid with the container obstacle layout.
    pub fn reference() -> SimResult<Self> {
        Self::with_layout(
            REFERENCE_WIDTH,
            REFERENCE_HEIGHT,
            FlowParams::default(),
            &Layout::container(REFERENCE_WIDTH, REFERENCE_HEIGHT),
        )
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn params(&self) -> &FlowParams {
        &self.params
    }

    /// Replace the flow parameters between steps. The ring follows the new
    /// `open_boundaries` setting.
    pub fn set_params(&mut self, params: FlowParams) -> SimResult<()> {
        params.validate()?;
        self.params = params;
        let closed = !params.open_boundaries;
        for idx in self.ring_indices() {
            self.solid[idx] = closed;
        }
        Ok(())
    }

    /// Number of completed steps.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Storage index for an interior-relative coordinate. Valid for the
    /// interior and the ring.
    #[inline]
    pub(crate) fn idx(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_storage(x, y));
        (y + 1) as usize * self.stride + (x + 1) as usize
    }

    /// True for `[0, width) x [0, height)`.
    #[inline]
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// True for cells of the one-cell ring around the interior.
    #[inline]
    pub fn is_boundary(&self, x: i32, y: i32) -> bool {
        self.in_storage(x, y) && !self.is_interior(x, y)
    }

    #[inline]
    fn in_storage(&self, x: i32, y: i32) -> bool {
        x >= -1 && y >= -1 && x <= self.width as i32 && y <= self.height as i32
    }

    fn check_interior(&self, x: i32, y: i32) -> SimResult<usize> {
        if self.is_interior(x, y) {
            Ok(self.idx(x, y))
        } else {
            Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Fill a cell with one nominal cell of water. Clears a solid flag.
    pub fn place_water(&mut self, x: i32, y: i32) -> SimResult<()> {
        let idx = self.check_interior(x, y)?;
        self.solid[idx] = false;
        self.mass[idx] = self.params.max_mass;
        Ok(())
    }

    /// Turn a cell solid. Its mass is left in place unless
    /// `params.clear_mass_on_solid` is set.
    pub fn place_solid(&mut self, x: i32, y: i32) -> SimResult<()> {
        let idx = self.check_interior(x, y)?;
        self.solid[idx] = true;
        if self.params.clear_mass_on_solid {
            self.mass[idx] = 0.0;
        }
        Ok(())
    }

    /// Overwrite the mass of an interior cell without touching its
    /// classification. Negative values clamp to zero. NaN and infinite
    /// values are rejected and the cell keeps its mass.
    pub fn set_mass(&mut self, x: i32, y: i32, mass: f32) -> SimResult<()> {
        let idx = self.check_interior(x, y)?;
        if !mass.is_finite() {
            return Err(SimError::InvalidMass { x, y, mass });
        }
        self.mass[idx] = mass.max(0.0);
        Ok(())
    }

    /// Classification at `(x, y)`. Anything beyond the ring reads as Solid.
    pub fn cell_type(&self, x: i32, y: i32) -> CellType {
        if !self.in_storage(x, y) {
            return CellType::Solid;
        }
        self.cell_at(self.idx(x, y))
    }

    #[inline]
    fn cell_at(&self, idx: usize) -> CellType {
        if self.solid[idx] {
            CellType::Solid
        } else {
            CellType::from_mass(self.mass[idx], self.params.min_mass)
        }
    }

    /// Mass at `(x, y)`. Anything beyond the ring reads as zero.
    pub fn mass(&self, x: i32, y: i32) -> f32 {
        if !self.in_storage(x, y) {
            return 0.0;
        }
        self.mass[self.idx(x, y)]
    }

    /// Total mass over the interior, including inert mass held by solid cells.
    pub fn total_mass(&self) -> f32 {
        self.interior_indices().map(|idx| self.mass[idx]).sum()
    }

    /// Number of interior cells currently classified as Water.
    pub fn water_cells(&self) -> usize {
        self.interior_indices()
            .filter(|&idx| self.cell_at(idx).is_water())
            .count()
    }

    /// Mass removed through the boundary ring by the most recent step.
    #[inline]
    pub fn drained_last_step(&self) -> f32 {
        self.drained
    }

    /// Row-major iterator over interior storage indices.
    pub(crate) fn interior_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=self.height).flat_map(move |y| (1..=self.width).map(move |x| y * self.stride + x))
    }

    /// Storage indices of the boundary ring, each visited once.
    pub(crate) fn ring_indices(&self) -> impl Iterator<Item = usize> {
        let stride = self.stride;
        let last_row = self.height + 1;
        let last_col = self.width + 1;
        let rows = (0..stride).flat_map(move |x| [x, last_row * stride + x]);
        let cols = (1..last_row).flat_map(move |y| [y * stride, y * stride + last_col]);
        rows.chain(cols)
    }
}
