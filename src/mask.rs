//! Iblank masking of excluded grid regions
//!
//! A mask is an `Array2` of ones with NaN at excluded cells; multiplying
//! a field by it marks those cells non-plottable.
use ndarray::Array2;

/// Mask of the cells inside a cylinder of `radius` around the origin
///
/// A cell `(i, j)` is excluded when `sqrt(x[i]^2 + y[j]^2)` is strictly
/// less than `radius`.
pub fn cylinder_mask(x: &[f64], y: &[f64], radius: f64) -> Array2<f64> {
    let mut mask = Array2::ones((x.len(), y.len()));
    for (i, &xi) in x.iter().enumerate() {
        for (j, &yj) in y.iter().enumerate() {
            if (xi * xi + yj * yj).sqrt() < radius {
                mask[[i, j]] = f64::NAN;
            }
        }
    }
    mask
}

/// Mask keeping only the recirculating wake (`u <= 0`)
pub fn wake_mask(velx: &Array2<f64>) -> Array2<f64> {
    velx.mapv(|u| if u > 0. { f64::NAN } else { u })
}
