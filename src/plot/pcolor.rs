//! Pseudocolor maps of 2-D fields
use super::{cell_edges, draw_colorbar, padded_range, Colormap, FONT_SIZE};
use crate::error::Result;
use crate::euler::field_range;
use ndarray::Array2;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;

/// Canvas and styling options of a pseudocolor plot
#[derive(Debug, Clone)]
pub struct PcolorOptions {
    /// Plot title
    pub title: String,
    /// Horizontal axis limits
    pub xlim: (f64, f64),
    /// Vertical axis limits
    pub ylim: (f64, f64),
    /// Colormap
    pub cmap: Colormap,
    /// Canvas size in pixels
    pub size: (u32, u32),
    /// Font size for title and labels
    pub font_size: u32,
}

impl PcolorOptions {
    /// Options with the default canvas (1600x1000, `jet`)
    pub fn new(title: impl Into<String>, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Self {
            title: title.into(),
            xlim,
            ylim,
            cmap: Colormap::jet(),
            size: (1600, 1000),
            font_size: FONT_SIZE,
        }
    }
}

/// Render a pseudocolor map of `field` over cell-centered coordinates
///
/// `field` has shape `(x.len(), y.len())`; cells with non-finite values
/// (masked or degenerate) are left unpainted.
///
/// # Errors
/// When the plotters backend fails.
///
/// # Panics
/// Panics when the field shape does not match the coordinate arrays.
pub fn pcolor<P: AsRef<Path>>(
    path: P,
    field: &Array2<f64>,
    x: &[f64],
    y: &[f64],
    opts: &PcolorOptions,
) -> Result<()> {
    assert_eq!(field.shape(), &[x.len(), y.len()]);
    let root = BitMapBackend::new(path.as_ref(), opts.size).into_drawing_area();
    root.fill(&WHITE)?;
    let (plot, bar) = root.split_horizontally(opts.size.0 - 200);

    let (vmin, vmax) = padded_range_of(field);
    let mut chart = ChartBuilder::on(&plot)
        .caption(&opts.title, ("sans-serif", opts.font_size))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(opts.xlim.0..opts.xlim.1, opts.ylim.0..opts.ylim.1)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .label_style(("sans-serif", opts.font_size))
        .draw()?;
    draw_cells(&mut chart, field, x, y, &opts.cmap, vmin, vmax)?;
    draw_colorbar(&bar, &opts.cmap, vmin, vmax, None, opts.font_size)?;
    root.present()?;
    Ok(())
}

/// Render `overlay` on top of `base` with separate colormaps
///
/// Used for the wake plot: pressure underneath, the wake-masked
/// x-velocity on top. Both colorbars are drawn and labeled.
///
/// # Errors
/// When the plotters backend fails.
///
/// # Panics
/// Panics when a field shape does not match the coordinate arrays.
#[allow(clippy::too_many_arguments)]
pub fn pcolor_overlay<P: AsRef<Path>>(
    path: P,
    base: &Array2<f64>,
    base_cmap: &Colormap,
    base_label: &str,
    overlay: &Array2<f64>,
    overlay_cmap: &Colormap,
    overlay_label: &str,
    x: &[f64],
    y: &[f64],
    opts: &PcolorOptions,
) -> Result<()> {
    assert_eq!(base.shape(), &[x.len(), y.len()]);
    assert_eq!(overlay.shape(), &[x.len(), y.len()]);
    let root = BitMapBackend::new(path.as_ref(), opts.size).into_drawing_area();
    root.fill(&WHITE)?;
    let (plot, bars) = root.split_horizontally(opts.size.0 - 400);
    let (base_bar, overlay_bar) = bars.split_horizontally(200);

    let (base_min, base_max) = padded_range_of(base);
    let (over_min, over_max) = padded_range_of(overlay);
    let mut chart = ChartBuilder::on(&plot)
        .caption(&opts.title, ("sans-serif", opts.font_size))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(opts.xlim.0..opts.xlim.1, opts.ylim.0..opts.ylim.1)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .label_style(("sans-serif", opts.font_size))
        .draw()?;
    draw_cells(&mut chart, base, x, y, base_cmap, base_min, base_max)?;
    draw_cells(&mut chart, overlay, x, y, overlay_cmap, over_min, over_max)?;
    draw_colorbar(
        &base_bar,
        base_cmap,
        base_min,
        base_max,
        Some(base_label),
        opts.font_size,
    )?;
    draw_colorbar(
        &overlay_bar,
        overlay_cmap,
        over_min,
        over_max,
        Some(overlay_label),
        opts.font_size,
    )?;
    root.present()?;
    Ok(())
}

fn padded_range_of(field: &Array2<f64>) -> (f64, f64) {
    let (vmin, vmax) = field_range(field).unwrap_or((0., 1.));
    padded_range(vmin, vmax)
}

/// Paint one filled rectangle per finite cell
fn draw_cells<'a, DB: DrawingBackend + 'a>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    field: &Array2<f64>,
    x: &[f64],
    y: &[f64],
    cmap: &Colormap,
    vmin: f64,
    vmax: f64,
) -> Result<()> {
    let xe = cell_edges(x);
    let ye = cell_edges(y);
    chart.draw_series(field.indexed_iter().filter(|(_, v)| v.is_finite()).map(
        |((i, j), &v)| {
            Rectangle::new(
                [(xe[i], ye[j]), (xe[i + 1], ye[j + 1])],
                cmap.color_for(v, vmin, vmax).filled(),
            )
        },
    ))?;
    Ok(())
}
