//! Physical quantities derived from the conserved variables
//!
//! The solver stores (density, momentum components, energy). Velocity
//! and pressure follow by division and the ideal-gas relation
//! `p = (gamma - 1) * (e - rho * |u|^2 / 2)`.
use crate::error::{Error, Result};
use ndarray::{s, Array2, Array3, ArrayView2, Zip};

/// Default ratio of specific heats
pub const GAMMA: f64 = 1.4;

/// Derived flow fields on a 2-D plane
///
/// Zero-density cells are not guarded against; the division then yields
/// non-finite values which the plotting layer leaves unpainted.
#[derive(Debug, Clone)]
pub struct FlowPlane {
    /// Density
    pub density: Array2<f64>,
    /// Velocity along the first plane axis
    pub velx: Array2<f64>,
    /// Velocity along the second plane axis
    pub vely: Array2<f64>,
    /// Out-of-plane velocity (3-D solutions only)
    pub velz: Option<Array2<f64>>,
    /// Velocity magnitude
    pub speed: Array2<f64>,
    /// Pressure from the ideal-gas relation
    pub pressure: Array2<f64>,
}

impl FlowPlane {
    /// Derive fields from a 3-D solution slice `(nvars, n0, n1)` with
    /// components (rho, rho*u, rho*v, rho*w, e)
    ///
    /// # Errors
    /// When fewer than five components are present.
    pub fn from_conserved_3d(sol: &Array3<f64>, gamma: f64) -> Result<Self> {
        if sol.shape()[0] < 5 {
            return Err(Error::BadVariables {
                expected: 5,
                found: sol.shape()[0],
            });
        }
        let density = sol.slice(s![0, .., ..]).to_owned();
        let velx = &sol.slice(s![1, .., ..]) / &density;
        let vely = &sol.slice(s![2, .., ..]) / &density;
        let velz = &sol.slice(s![3, .., ..]) / &density;
        let speed = Zip::from(&velx)
            .and(&vely)
            .and(&velz)
            .map_collect(|u, v, w| (u * u + v * v + w * w).sqrt());
        let pressure = pressure(sol.slice(s![4, .., ..]), &density, &speed, gamma);
        Ok(Self {
            density,
            velx,
            vely,
            velz: Some(velz),
            speed,
            pressure,
        })
    }

    /// Derive fields from a 2-D solution `(nvars, n0, n1)` with
    /// components (rho, rho*u, rho*v, e)
    ///
    /// # Errors
    /// When fewer than four components are present.
    pub fn from_conserved_2d(sol: &Array3<f64>, gamma: f64) -> Result<Self> {
        if sol.shape()[0] < 4 {
            return Err(Error::BadVariables {
                expected: 4,
                found: sol.shape()[0],
            });
        }
        let density = sol.slice(s![0, .., ..]).to_owned();
        let velx = &sol.slice(s![1, .., ..]) / &density;
        let vely = &sol.slice(s![2, .., ..]) / &density;
        let speed = Zip::from(&velx)
            .and(&vely)
            .map_collect(|u, v| (u * u + v * v).sqrt());
        let pressure = pressure(sol.slice(s![3, .., ..]), &density, &speed, gamma);
        Ok(Self {
            density,
            velx,
            vely,
            velz: None,
            speed,
            pressure,
        })
    }

    /// Multiply every field by a mask of ones and NaNs
    pub fn apply_mask(&mut self, mask: &Array2<f64>) {
        self.density = &self.density * mask;
        self.velx = &self.velx * mask;
        self.vely = &self.vely * mask;
        if let Some(velz) = &self.velz {
            self.velz = Some(velz * mask);
        }
        self.speed = &self.speed * mask;
        self.pressure = &self.pressure * mask;
    }
}

/// Ideal-gas pressure from energy, density and velocity magnitude
fn pressure(
    energy: ArrayView2<f64>,
    density: &Array2<f64>,
    speed: &Array2<f64>,
    gamma: f64,
) -> Array2<f64> {
    Zip::from(energy)
        .and(density)
        .and(speed)
        .map_collect(|e, rho, q| (gamma - 1.) * (e - 0.5 * rho * q * q))
}

/// Minimum and maximum over the finite values of a field
///
/// Masked (NaN) cells are skipped; `None` when no finite value exists.
pub fn field_range(field: &Array2<f64>) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for &v in field.iter().filter(|v| v.is_finite()) {
        range = Some(match range {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) {
        if (a - b).abs() > 1e-12 {
            panic!("Large difference of values, got {} expected {}.", a, b)
        }
    }

    /// Uniform free stream: rho = 1, (u, v, w) = (2, 0, 0), p = 1
    fn freestream_3d(n0: usize, n1: usize) -> Array3<f64> {
        let (rho, u, p) = (1.0, 2.0, 1.0);
        let e = p / (GAMMA - 1.) + 0.5 * rho * u * u;
        let mut sol = Array3::zeros((5, n0, n1));
        sol.slice_mut(s![0, .., ..]).fill(rho);
        sol.slice_mut(s![1, .., ..]).fill(rho * u);
        sol.slice_mut(s![4, .., ..]).fill(e);
        sol
    }

    #[test]
    fn test_freestream_pressure() {
        let sol = freestream_3d(8, 6);
        let flow = FlowPlane::from_conserved_3d(&sol, GAMMA).unwrap();
        for &p in flow.pressure.iter() {
            approx_eq(p, 1.0);
        }
        for &q in flow.speed.iter() {
            approx_eq(q, 2.0);
        }
        for &w in flow.velz.as_ref().unwrap().iter() {
            approx_eq(w, 0.0);
        }
    }

    #[test]
    fn test_2d_conserved() {
        let (rho, u, v) = (2.0, 3.0, -1.0);
        let p = 5.0;
        let e = p / (GAMMA - 1.) + 0.5 * rho * (u * u + v * v);
        let mut sol = Array3::zeros((4, 3, 3));
        sol.slice_mut(s![0, .., ..]).fill(rho);
        sol.slice_mut(s![1, .., ..]).fill(rho * u);
        sol.slice_mut(s![2, .., ..]).fill(rho * v);
        sol.slice_mut(s![3, .., ..]).fill(e);
        let flow = FlowPlane::from_conserved_2d(&sol, GAMMA).unwrap();
        approx_eq(flow.velx[[1, 1]], u);
        approx_eq(flow.vely[[1, 1]], v);
        approx_eq(flow.speed[[1, 1]], (u * u + v * v).sqrt());
        approx_eq(flow.pressure[[1, 1]], p);
        assert!(flow.velz.is_none());
    }

    #[test]
    fn test_too_few_variables() {
        let sol = Array3::zeros((3, 2, 2));
        assert!(FlowPlane::from_conserved_3d(&sol, GAMMA).is_err());
        assert!(FlowPlane::from_conserved_2d(&sol, GAMMA).is_err());
    }

    #[test]
    fn test_field_range_skips_nan() {
        let mut field = Array2::from_elem((2, 2), 1.0);
        field[[0, 0]] = f64::NAN;
        field[[1, 1]] = -3.0;
        assert_eq!(field_range(&field), Some((-3.0, 1.0)));
        let all_nan = Array2::from_elem((2, 2), f64::NAN);
        assert_eq!(field_range(&all_nan), None);
    }
}
