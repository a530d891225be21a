//! # Solver configuration files
//! The solver leaves two small text files in the simulation directory,
//! `solver.inp` and `simulation.inp`, which define grid dimensions,
//! variable count and timestep parameters. Everything about a run that
//! is not in the binary snapshots comes from here.
pub mod config;
pub mod inp_file;
pub use config::{SimulationConfig, SnapshotTiming, SolverConfig};
pub use inp_file::InpFile;
