//! # `flowplot`: 2D visualizations of binary CFD solver snapshots
//!
//! Post-processing tooling for a finite-difference CFD solver that
//! writes its solutions as raw binary `op` files. This crate reads the
//! solver's text configuration (`solver.inp`, `simulation.inp`), loads
//! the snapshots into ndarrays indexed by simulation, snapshot time,
//! spatial coordinate and variable, derives velocity and pressure from
//! the conserved variables, and renders pseudocolor maps and streamline
//! plots to PNG files.
//!
//! It is not a simulation engine: it consumes already-computed results
//! and turns arrays of floating-point data into pictures.
//!
//! # Example
//! Plot a sliced 3-D solution from a simulation directory:
//! ```ignore
//! use flowplot::pipeline::{plot_solution, SolutionPlotOptions};
//!
//! fn main() {
//!     let opts = SolutionPlotOptions::default();
//!     plot_solution(".", "plots", &opts).unwrap();
//! }
//! ```
//! Or from the command line:
//! ```text
//! flowplot solution --dir . --plots-dir plots
//! flowplot streamlines --dir . --density 4
//! ```
//!
//! ## Snapshot format
//! One `op` file is a headerless block of little-endian `f64` values:
//! the grid coordinates per axis, then the solution with all components
//! interleaved per grid point, x-fastest. Grid dimensions and variable
//! count come entirely from `solver.inp`; a file that does not match
//! them exactly is an error.
#![warn(missing_docs)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
pub mod error;
pub mod euler;
pub mod input;
pub mod mask;
pub mod pipeline;
pub mod plot;
pub mod snapshot;

pub use error::{Error, Result};
