//! Compressible-water cellular automaton.
//!
//! Water is tracked as a mass per cell on a fixed 2D grid. Each step moves
//! mass between neighbouring cells:
//! - down toward a "stable state" where lower cells hold slightly more
//!   than the cells resting on them
//! - sideways to equalize with neighbours
//! - up only when a cell is compressed past its stable state
//!
//! A one-cell ring surrounds the interior and is drained every step.
//!
//! This crate is simulation only; rendering and input belong to the caller.
//!
//! # Example
//!
//! ```
//! use sim::{CellType, FlowParams, Grid};
//!
//! let mut grid = Grid::new(8, 8, FlowParams::default()).unwrap();
//! grid.place_solid(3, 7).unwrap();
//! grid.place_water(3, 0).unwrap();
//!
//! for _ in 0..20 {
//!     grid.step();
//! }
//! assert_eq!(grid.cell_type(3, 7), CellType::Solid);
//! assert!((grid.total_mass() - 0.5).abs() < 1e-4);
//! ```

pub mod cell;
pub mod constants;
pub mod edit;
pub mod error;
pub mod flow;
pub mod grid;
pub mod layout;
pub mod params;

pub use cell::CellType;
pub use edit::{Edit, EditQueue};
pub use error::{SimError, SimResult};
pub use glam::IVec2;
pub use grid::Grid;
pub use layout::Layout;
pub use params::FlowParams;
