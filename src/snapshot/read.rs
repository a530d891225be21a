//! Reading binary `op` files from disk
use super::Grid;
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of one snapshot
///
/// Single-simulation runs use the base name `op`, ensembles append a
/// two-digit simulation index. Unsteady runs (one file per output time)
/// additionally carry a five-digit snapshot index; steady runs
/// (`op_overwrite yes`) do not.
///
/// ```
/// use flowplot::snapshot::op_filename;
/// assert_eq!(op_filename(1, 0, Some(3)), "op_00003.bin");
/// assert_eq!(op_filename(4, 2, Some(3)), "op_02_00003.bin");
/// assert_eq!(op_filename(4, 2, None), "op_02.bin");
/// assert_eq!(op_filename(1, 0, None), "op.bin");
/// ```
pub fn op_filename(nsims: usize, sim: usize, snapshot: Option<usize>) -> String {
    let root = if nsims > 1 {
        format!("op_{:02}", sim)
    } else {
        "op".to_string()
    };
    match snapshot {
        Some(idx) => format!("{}_{:05}.bin", root, idx),
        None => format!("{}.bin", root),
    }
}

/// Read one `op` file: grid coordinate block plus flat solution buffer
///
/// # Errors
/// When the file cannot be read or holds fewer values than
/// `sum(size) + nvars * prod(size)`.
pub fn read_op_file<P: AsRef<Path>>(
    path: P,
    nvars: usize,
    size: &[usize],
) -> Result<(Grid, Array1<f64>)> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let nvalues = bytes.len() / 8;

    let ngrid: usize = size.iter().sum();
    let ndof: usize = nvars * size.iter().product::<usize>();
    if nvalues < ngrid + ndof {
        return Err(Error::ShapeMismatch {
            file: path.to_path_buf(),
            expected: ngrid + ndof,
            found: nvalues,
        });
    }

    let mut values = Vec::with_capacity(ngrid + ndof);
    for chunk in bytes.chunks_exact(8).take(ngrid + ndof) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        values.push(f64::from_le_bytes(buf));
    }

    let grid = Grid::from_flat(&values[..ngrid], size);
    let solution = Array1::from(values[ngrid..].to_vec());
    Ok((grid, solution))
}

/// Solution snapshots of all simulations in a directory
#[derive(Debug, Clone)]
pub struct SnapshotSet {
    /// Grid coordinates, taken from the first snapshot file
    pub grid: Grid,
    /// Per simulation: one row per snapshot, `nvars * prod(size)` columns
    pub sims: Vec<Array2<f64>>,
}

impl SnapshotSet {
    /// Number of snapshots actually found for simulation `sim`
    pub fn n_snapshots(&self, sim: usize) -> usize {
        self.sims[sim].nrows()
    }
}

/// Load the solution snapshots of every simulation in `dir`
///
/// Snapshot files are read in order until the first missing file; a run
/// that was stopped early simply yields fewer snapshots than expected.
/// Pass `n_snapshots = None` for steady runs, which have a single
/// unindexed file per simulation.
///
/// # Errors
/// When no snapshot file exists at all, or when a present file is
/// shorter than the configured dimensions demand.
pub fn load_snapshots<P: AsRef<Path>>(
    dir: P,
    nsims: usize,
    n_snapshots: Option<usize>,
    nvars: usize,
    size: &[usize],
) -> Result<SnapshotSet> {
    let dir = dir.as_ref();
    let ndof: usize = nvars * size.iter().product::<usize>();
    let mut grid: Option<Grid> = None;
    let mut sims = Vec::with_capacity(nsims);

    for sim in 0..nsims {
        let mut rows: Vec<f64> = Vec::new();
        let mut count = 0;
        let indices: Vec<Option<usize>> = match n_snapshots {
            Some(n) => (0..n).map(Some).collect(),
            None => vec![None],
        };
        for idx in indices {
            let path: PathBuf = dir.join(op_filename(nsims, sim, idx));
            if !path.exists() {
                log::warn!("snapshot file {:?} not found, stopping here", path);
                break;
            }
            let (g, flat) = read_op_file(&path, nvars, size)?;
            if grid.is_none() {
                grid = Some(g);
            }
            rows.extend(flat.iter());
            count += 1;
        }
        let data = Array2::from_shape_vec((count, ndof), rows).expect("row length is ndof");
        sims.push(data);
    }

    match grid {
        Some(grid) => Ok(SnapshotSet { grid, sims }),
        None => Err(Error::NoSnapshots(dir.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Write a synthetic op file whose grid is 0..n per axis and whose
    /// solution values encode their flat index.
    fn write_op_file(path: &Path, nvars: usize, size: &[usize], offset: f64) {
        let mut values: Vec<f64> = Vec::new();
        for &n in size {
            values.extend((0..n).map(|i| i as f64));
        }
        let ndof = nvars * size.iter().product::<usize>();
        values.extend((0..ndof).map(|p| offset + p as f64));
        let mut file = fs::File::create(path).unwrap();
        for v in values {
            file.write_all(&v.to_le_bytes()).unwrap();
        }
    }

    #[test]
    fn test_read_op_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("op.bin");
        write_op_file(&path, 2, &[3, 2], 0.);
        let (grid, flat) = read_op_file(&path, 2, &[3, 2]).unwrap();
        assert_eq!(grid.x().as_slice().unwrap(), &[0., 1., 2.]);
        assert_eq!(grid.y().as_slice().unwrap(), &[0., 1.]);
        assert_eq!(flat.len(), 12);
        assert_eq!(flat[0], 0.);
        assert_eq!(flat[11], 11.);
    }

    #[test]
    fn test_truncated_file_is_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("op.bin");
        write_op_file(&path, 2, &[3, 2], 0.);
        // Demand a larger grid than the file holds.
        assert!(matches!(
            read_op_file(&path, 2, &[30, 20]),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_load_snapshots_stops_at_gap() {
        let dir = tempfile::tempdir().unwrap();
        for idx in [0usize, 1, 3] {
            let path = dir.path().join(op_filename(1, 0, Some(idx)));
            write_op_file(&path, 2, &[3, 2], idx as f64);
        }
        let set = load_snapshots(dir.path(), 1, Some(5), 2, &[3, 2]).unwrap();
        // op_00002.bin is missing, so only the first two are loaded.
        assert_eq!(set.n_snapshots(0), 2);
        assert_eq!(set.sims[0][[1, 0]], 1.);
    }

    #[test]
    fn test_load_snapshots_multi_sim_steady() {
        let dir = tempfile::tempdir().unwrap();
        for sim in 0..3usize {
            let path = dir.path().join(op_filename(3, sim, None));
            write_op_file(&path, 2, &[3, 2], 100. * sim as f64);
        }
        let set = load_snapshots(dir.path(), 3, None, 2, &[3, 2]).unwrap();
        assert_eq!(set.sims.len(), 3);
        assert_eq!(set.n_snapshots(2), 1);
        assert_eq!(set.sims[2][[0, 0]], 200.);
    }

    #[test]
    fn test_load_snapshots_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_snapshots(dir.path(), 1, Some(2), 2, &[3, 2]),
            Err(Error::NoSnapshots(_))
        ));
    }
}
