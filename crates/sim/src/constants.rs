//! Default tuning constants for the mass-transfer rule.
//!
//! Mass is measured in "cells": a full, un-pressurized water cell holds
//! [`MAX_MASS`]. Cells further down a column hold a little more, up to
//! [`MAX_COMPRESS`] above the cell resting on top of them.

/// Normal, un-pressurized mass of a full water cell.
pub const MAX_MASS: f32 = 0.5;

/// How much excess water a cell can store compared to the cell above it.
pub const MAX_COMPRESS: f32 = 2.0;

/// Maximum mass moved from one cell to a vertical neighbour per step.
pub const MAX_SPEED: f32 = 30.0;

/// Flows larger than this are halved to smooth out oscillation.
pub const MIN_FLOW: f32 = 0.01;

/// Cells at or below this mass count as dry.
pub const MIN_MASS: f32 = 0.0001;

/// Reference grid width.
pub const REFERENCE_WIDTH: usize = 40;

/// Reference grid height.
pub const REFERENCE_HEIGHT: usize = 40;
