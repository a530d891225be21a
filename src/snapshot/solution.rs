//! Reshaping flat solution buffers and extracting 2-D planes
use super::Grid;
use crate::error::{Error, Result};
use ndarray::{s, Array1, Array3, Array4, ArrayView1};
use std::str::FromStr;

/// Reshape a flat 3-D solution buffer into `(nvars, nx, ny, nz)`
///
/// Inverts the solver's flat layout, where `(v, i, j, k)` sits at index
/// `v + nvars * (i + nx * (j + ny * k))`.
///
/// # Errors
/// When the buffer length is not `nvars * nx * ny * nz`.
pub fn reshape_3d(flat: ArrayView1<f64>, nvars: usize, size: &[usize]) -> Result<Array4<f64>> {
    let (nx, ny, nz) = (size[0], size[1], size[2]);
    let expected = nvars * nx * ny * nz;
    if flat.len() != expected {
        return Err(Error::Reshape {
            expected,
            found: flat.len(),
        });
    }
    let arr = Array4::from_shape_vec((nz, ny, nx, nvars), flat.to_vec())
        .expect("length checked above");
    Ok(arr.permuted_axes([3, 2, 1, 0]))
}

/// Reshape a flat 2-D solution buffer into `(nvars, nx, ny)`
///
/// # Errors
/// When the buffer length is not `nvars * nx * ny`.
pub fn reshape_2d(flat: ArrayView1<f64>, nvars: usize, size: &[usize]) -> Result<Array3<f64>> {
    let (nx, ny) = (size[0], size[1]);
    let expected = nvars * nx * ny;
    if flat.len() != expected {
        return Err(Error::Reshape {
            expected,
            found: flat.len(),
        });
    }
    let arr =
        Array3::from_shape_vec((ny, nx, nvars), flat.to_vec()).expect("length checked above");
    Ok(arr.permuted_axes([2, 1, 0]))
}

/// Flatten a `(nvars, nx, ny, nz)` solution back into the solver's layout
pub fn flatten_3d(sol: &Array4<f64>) -> Array1<f64> {
    let rev = sol.view().permuted_axes([3, 2, 1, 0]);
    Array1::from_iter(rev.iter().copied())
}

/// Axis along which a 3-D solution is sliced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceAxis {
    /// Slice at fixed x, plane coordinates (y, z)
    X,
    /// Slice at fixed y, plane coordinates (x, z)
    Y,
    /// Slice at fixed z, plane coordinates (x, y)
    Z,
}

impl FromStr for SliceAxis {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "x" | "X" | "0" => Ok(Self::X),
            "y" | "Y" | "1" => Ok(Self::Y),
            "z" | "Z" | "2" => Ok(Self::Z),
            other => Err(format!("invalid slice axis {:?}", other)),
        }
    }
}

/// A 2-D plane extracted from a 3-D solution
#[derive(Debug, Clone)]
pub struct Plane {
    /// Solution components on the plane, `(nvars, n0, n1)`
    pub data: Array3<f64>,
    /// Coordinates along the first plane axis
    pub x: Array1<f64>,
    /// Coordinates along the second plane axis
    pub y: Array1<f64>,
}

/// Extract a 2-D plane at fractional location `loc` in `[0, 1)`
///
/// The slice index is `floor(loc * n)` along the chosen axis, clamped to
/// the last point.
pub fn slice_plane(sol: &Array4<f64>, grid: &Grid, axis: SliceAxis, loc: f64) -> Plane {
    let index = |n: usize| ((loc * n as f64) as usize).min(n - 1);
    match axis {
        SliceAxis::X => {
            let i = index(sol.shape()[1]);
            Plane {
                data: sol.slice(s![.., i, .., ..]).to_owned(),
                x: grid.y().clone(),
                y: grid.z().clone(),
            }
        }
        SliceAxis::Y => {
            let j = index(sol.shape()[2]);
            Plane {
                data: sol.slice(s![.., .., j, ..]).to_owned(),
                x: grid.x().clone(),
                y: grid.z().clone(),
            }
        }
        SliceAxis::Z => {
            let k = index(sol.shape()[3]);
            Plane {
                data: sol.slice(s![.., .., .., k]).to_owned(),
                x: grid.x().clone(),
                y: grid.y().clone(),
            }
        }
    }
}
