//! Typed view of `solver.inp` and `simulation.inp`
use super::InpFile;
use crate::error::{Error, Result};
use std::path::Path;

/// Simulation parameters from `solver.inp`
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Number of spatial dimensions
    pub ndims: usize,
    /// Number of solution vector components
    pub nvars: usize,
    /// Grid points per dimension, `ndims` entries
    pub size: Vec<usize>,
    /// Total number of time iterations
    pub n_iter: usize,
    /// Timestep
    pub dt: f64,
    /// Iterations between solution outputs (unsteady runs only)
    pub file_op_iter: Option<usize>,
    /// Whether each output overwrites the previous one ("yes"/"no")
    pub op_overwrite: bool,
}

impl SolverConfig {
    /// Read `solver.inp` from the simulation directory
    ///
    /// # Errors
    /// When the file is missing or malformed, when a required key is
    /// absent, or when `op_file_format` is not binary.
    pub fn read<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let inp = InpFile::read(dir.as_ref().join("solver.inp"))?;

        // The only hard format gate: everything downstream assumes the
        // raw binary snapshot layout.
        let format = inp.get_str("op_file_format")?;
        if format != "binary" && format != "bin" {
            return Err(Error::NotBinary(format.to_string()));
        }

        let ndims: usize = inp.get("ndims")?;
        if ndims != 2 && ndims != 3 {
            return Err(Error::BadDimensions(ndims));
        }
        let size: Vec<usize> = inp.get_vec("size")?;
        if size.len() != ndims {
            return Err(Error::InvalidValue {
                key: "size".to_string(),
                value: format!("{} entries for ndims = {}", size.len(), ndims),
            });
        }
        let op_overwrite = inp.get_str("op_overwrite")? == "yes";
        let file_op_iter = if op_overwrite {
            None
        } else {
            Some(inp.get("file_op_iter")?)
        };

        Ok(Self {
            ndims,
            nvars: inp.get("nvars")?,
            size,
            n_iter: inp.get("n_iter")?,
            dt: inp.get("dt")?,
            file_op_iter,
            op_overwrite,
        })
    }

    /// Number of grid points in the domain
    pub fn npoints(&self) -> usize {
        self.size.iter().product()
    }

    /// Simulation end time
    pub fn t_final(&self) -> f64 {
        self.dt * self.n_iter as f64
    }

    /// Snapshot count and spacing implied by the output settings
    pub fn snapshot_timing(&self) -> SnapshotTiming {
        match self.file_op_iter {
            // Unsteady: one snapshot every file_op_iter iterations,
            // plus the initial state.
            Some(op_iter) => SnapshotTiming {
                n_snapshots: self.n_iter / op_iter + 1,
                dt_snapshots: op_iter as f64 * self.dt,
            },
            // Steady (op_overwrite yes): a single snapshot at t_final.
            None => SnapshotTiming {
                n_snapshots: 1,
                dt_snapshots: self.t_final(),
            },
        }
    }
}

/// Snapshot count and time spacing of a run
#[derive(Debug, Clone, Copy)]
pub struct SnapshotTiming {
    /// Expected number of solution snapshots
    pub n_snapshots: usize,
    /// Time between consecutive snapshots
    pub dt_snapshots: f64,
}

/// Ensemble parameters from `simulation.inp`
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    /// Number of simulations sharing the directory
    pub nsims: usize,
}

impl SimulationConfig {
    /// Read `simulation.inp` from the simulation directory
    ///
    /// A missing file is not an error; single-simulation runs usually
    /// do not write one.
    ///
    /// # Errors
    /// When a present file is malformed.
    pub fn read<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join("simulation.inp");
        if !path.exists() {
            return Ok(Self { nsims: 1 });
        }
        let inp = InpFile::read(path)?;
        Ok(Self {
            nsims: inp.get("nsims")?,
        })
    }
}
