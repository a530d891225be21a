//! # Solution snapshots
//! Locates and reads the solver's binary `op` output files and reshapes
//! their flat buffers into per-variable ndarrays.
//!
//! One `op` file is a raw block of little-endian `f64` values: first the
//! grid coordinates (`x`, then `y`, then `z` for 3-D domains), then the
//! solution with all components interleaved per grid point, x-fastest.
//! The element `(v, i, j, k)` sits at flat index
//! `v + nvars * (i + nx * (j + ny * k))`.
pub mod read;
pub mod solution;
pub use read::{load_snapshots, op_filename, read_op_file, SnapshotSet};
pub use solution::{flatten_3d, reshape_2d, reshape_3d, slice_plane, Plane, SliceAxis};

use ndarray::Array1;

/// Grid coordinates of a snapshot, one array per dimension
#[derive(Debug, Clone)]
pub struct Grid {
    /// Grid points per dimension
    pub size: Vec<usize>,
    /// Coordinate values per dimension
    pub coords: Vec<Array1<f64>>,
}

impl Grid {
    /// Split the flat coordinate block of an `op` file into per-axis arrays
    ///
    /// # Panics
    /// Panics when the block length does not equal the sum of `size`.
    pub fn from_flat(block: &[f64], size: &[usize]) -> Self {
        assert_eq!(block.len(), size.iter().sum::<usize>());
        let mut coords = Vec::with_capacity(size.len());
        let mut offset = 0;
        for &n in size {
            coords.push(Array1::from(block[offset..offset + n].to_vec()));
            offset += n;
        }
        Self {
            size: size.to_vec(),
            coords,
        }
    }

    /// Coordinates along the first dimension
    pub fn x(&self) -> &Array1<f64> {
        &self.coords[0]
    }

    /// Coordinates along the second dimension
    pub fn y(&self) -> &Array1<f64> {
        &self.coords[1]
    }

    /// Coordinates along the third dimension
    ///
    /// # Panics
    /// Panics for 2-D grids.
    pub fn z(&self) -> &Array1<f64> {
        &self.coords[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_flat() {
        let block = [0., 1., 2., 10., 20., 100.];
        let grid = Grid::from_flat(&block, &[3, 2, 1]);
        assert_eq!(grid.x().as_slice().unwrap(), &[0., 1., 2.]);
        assert_eq!(grid.y().as_slice().unwrap(), &[10., 20.]);
        assert_eq!(grid.z().as_slice().unwrap(), &[100.]);
    }
}
