//! # Plot rendering
//! Pseudocolor maps, the wake overlay and streamline plots, rendered to
//! PNG files through the `plotters` bitmap backend.
pub mod colormap;
pub mod pcolor;
pub mod streamline;
pub use colormap::Colormap;
pub use pcolor::{pcolor, pcolor_overlay, PcolorOptions};
pub use streamline::{streamlines, StreamlineOptions};

use crate::error::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Font size used for titles and axis labels
pub const FONT_SIZE: u32 = 22;

/// Edges of cell-centered coordinates, midpoints between neighbors
///
/// The outermost edges extrapolate the first and last spacing, so a
/// field of `n` cells paints over `n + 1` edges.
pub(crate) fn cell_edges(c: &[f64]) -> Vec<f64> {
    let n = c.len();
    if n == 1 {
        return vec![c[0] - 0.5, c[0] + 0.5];
    }
    let mut edges = Vec::with_capacity(n + 1);
    edges.push(c[0] - 0.5 * (c[1] - c[0]));
    for i in 1..n {
        edges.push(0.5 * (c[i - 1] + c[i]));
    }
    edges.push(c[n - 1] + 0.5 * (c[n - 1] - c[n - 2]));
    edges
}

/// Widen a degenerate value range so color normalization stays defined
pub(crate) fn padded_range(vmin: f64, vmax: f64) -> (f64, f64) {
    if vmax > vmin {
        (vmin, vmax)
    } else {
        (vmin - 0.5, vmax + 0.5)
    }
}

/// Draw a vertical colorbar for `cmap` over `[vmin, vmax]` on `area`
pub(crate) fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, Shift>,
    cmap: &Colormap,
    vmin: f64,
    vmax: f64,
    label: Option<&str>,
    font_size: u32,
) -> Result<()> {
    let area = match label {
        Some(label) => area.titled(label, ("sans-serif", font_size))?,
        None => area.clone(),
    };
    let (vmin, vmax) = padded_range(vmin, vmax);
    let mut chart = ChartBuilder::on(&area)
        .margin(10)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..1f64, vmin..vmax)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_labels(6)
        .label_style(("sans-serif", font_size))
        .draw()?;
    let n = 256;
    let dv = (vmax - vmin) / f64::from(n);
    chart.draw_series((0..n).map(|i| {
        let v0 = vmin + f64::from(i) * dv;
        Rectangle::new(
            [(0., v0), (1., v0 + dv)],
            cmap.eval((f64::from(i) + 0.5) / f64::from(n)).filled(),
        )
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_edges_uniform() {
        let edges = cell_edges(&[0., 1., 2., 3.]);
        assert_eq!(edges, vec![-0.5, 0.5, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_cell_edges_stretched() {
        let edges = cell_edges(&[0., 1., 3.]);
        assert_eq!(edges, vec![-0.5, 0.5, 2.0, 4.0]);
    }

    #[test]
    fn test_cell_edges_single_point() {
        assert_eq!(cell_edges(&[2.0]), vec![1.5, 2.5]);
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(0., 1.), (0., 1.));
        assert_eq!(padded_range(2., 2.), (1.5, 2.5));
    }
}
