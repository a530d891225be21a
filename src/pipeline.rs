//! # Plotting pipelines
//! The two end-to-end routines of this crate: read the configuration
//! files, load the binary snapshots, derive the physical fields and
//! write one image per field and output time.
use crate::error::{Error, Result};
use crate::euler::{field_range, FlowPlane, GAMMA};
use crate::input::{SimulationConfig, SolverConfig};
use crate::mask::{cylinder_mask, wake_mask};
use crate::plot::{pcolor, pcolor_overlay, streamlines, Colormap, PcolorOptions, StreamlineOptions};
use crate::snapshot::{load_snapshots, reshape_2d, reshape_3d, slice_plane, SliceAxis};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Options of the 3-D slice pipeline
#[derive(Debug, Clone)]
pub struct SolutionPlotOptions {
    /// Axis to slice along
    pub slice_axis: SliceAxis,
    /// Fractional slice location in `[0, 1)`
    pub slice_loc: f64,
    /// Horizontal plot window
    pub xlim: (f64, f64),
    /// Vertical plot window
    pub ylim: (f64, f64),
    /// Ratio of specific heats
    pub gamma: f64,
    /// Radius of the excluded cylinder around the origin
    pub mask_radius: f64,
    /// Colormap of the single-field plots
    pub colormap: Colormap,
}

impl Default for SolutionPlotOptions {
    fn default() -> Self {
        // Window sized for the flow-past-a-cylinder case the solver
        // ships as its reference setup.
        Self {
            slice_axis: SliceAxis::Z,
            slice_loc: 0.5,
            xlim: (-4., 10.),
            ylim: (-6., 6.),
            gamma: GAMMA,
            mask_radius: 1.0,
            colormap: Colormap::jet(),
        }
    }
}

/// Options of the 2-D streamline pipeline
#[derive(Debug, Clone)]
pub struct StreamlinePlotOptions {
    /// Seed density of the streamline tracer
    pub density: usize,
    /// Line width in pixels
    pub linewidth: u32,
    /// Ratio of specific heats
    pub gamma: f64,
}

impl Default for StreamlinePlotOptions {
    fn default() -> Self {
        Self {
            density: 4,
            linewidth: 1,
            gamma: GAMMA,
        }
    }
}

/// File name of one figure, mirroring the snapshot naming scheme
fn fig_filename(prefix: &str, nsims: usize, sim: usize, snapshot: Option<usize>) -> String {
    let mut name = prefix.to_string();
    if nsims > 1 {
        name.push_str(&format!("_{:02}", sim));
    }
    if let Some(idx) = snapshot {
        name.push_str(&format!("_{:05}", idx));
    }
    name + ".png"
}

fn log_parameters(sim: &SimulationConfig, solver: &SolverConfig) {
    log::info!("number of simulations: {}", sim.nsims);
    log::info!("simulation parameters:");
    log::info!("  ndims      = {}", solver.ndims);
    log::info!("  nvars      = {}", solver.nvars);
    log::info!("  grid size  = {:?}", solver.size);
    log::info!("  dt         = {}", solver.dt);
    log::info!("  n_iter     = {}", solver.n_iter);
    log::info!("  final time = {}", solver.t_final());
    let timing = solver.snapshot_timing();
    if !solver.op_overwrite {
        log::info!("  snapshot dt = {}", timing.dt_snapshots);
        log::info!("  expected number of snapshots = {}", timing.n_snapshots);
    }
}

fn log_range(name: &str, field: &Array2<f64>) {
    match field_range(field) {
        Some((lo, hi)) => log::info!("{} range: {} {}", name, lo, hi),
        None => log::info!("{} range: empty", name),
    }
}

/// Render pseudocolor maps of a 2-D slice through a 3-D solution
///
/// For every simulation and snapshot this writes `fig_density`,
/// `fig_pressure`, `fig_velocity_magnitude`, `fig_u`, `fig_v` and the
/// `fig_u_wake` pressure/wake overlay into `plots_dir`.
///
/// # Errors
/// When configuration or snapshot files are missing or malformed, when
/// the domain is not 3-D, or when rendering fails.
pub fn plot_solution<P: AsRef<Path>, Q: AsRef<Path>>(
    sim_dir: P,
    plots_dir: Q,
    opts: &SolutionPlotOptions,
) -> Result<()> {
    let sim_dir = sim_dir.as_ref();
    let plots_dir = plots_dir.as_ref();
    let sim = SimulationConfig::read(sim_dir)?;
    let solver = SolverConfig::read(sim_dir)?;
    if solver.ndims != 3 {
        return Err(Error::BadDimensions(solver.ndims));
    }
    log_parameters(&sim, &solver);
    fs::create_dir_all(plots_dir)?;

    let timing = solver.snapshot_timing();
    let expected = (!solver.op_overwrite).then(|| timing.n_snapshots);
    let set = load_snapshots(sim_dir, sim.nsims, expected, solver.nvars, &solver.size)?;
    log::info!(
        "domain: x in [{}, {}], y in [{}, {}]",
        set.grid.x()[0],
        set.grid.x()[set.grid.x().len() - 1],
        set.grid.y()[0],
        set.grid.y()[set.grid.y().len() - 1]
    );

    for s in 0..sim.nsims {
        for i in 0..set.n_snapshots(s) {
            let sol = reshape_3d(set.sims[s].row(i), solver.nvars, &solver.size)?;
            let plane = slice_plane(&sol, &set.grid, opts.slice_axis, opts.slice_loc);
            let mut flow = FlowPlane::from_conserved_3d(&plane.data, opts.gamma)?;

            log_range("density", &flow.density);
            log_range("pressure", &flow.pressure);
            log_range("u", &flow.velx);
            log_range("v", &flow.vely);

            let x = plane.x.to_vec();
            let y = plane.y.to_vec();
            let mask = cylinder_mask(&x, &y, opts.mask_radius);
            flow.apply_mask(&mask);

            let t = if solver.op_overwrite {
                solver.t_final()
            } else {
                i as f64 * timing.dt_snapshots
            };
            let snapshot = (!solver.op_overwrite).then(|| i);

            let fields: [(&str, &str, &Array2<f64>); 5] = [
                ("fig_density", "Density", &flow.density),
                ("fig_pressure", "Pressure", &flow.pressure),
                (
                    "fig_velocity_magnitude",
                    "Velocity magnitude",
                    &flow.speed,
                ),
                ("fig_u", "x-Velocity", &flow.velx),
                ("fig_v", "y-Velocity", &flow.vely),
            ];
            for (prefix, label, field) in fields {
                let mut popts =
                    PcolorOptions::new(format!("{}, t={:.3}", label, t), opts.xlim, opts.ylim);
                popts.cmap = opts.colormap.clone();
                let path = plots_dir.join(fig_filename(prefix, sim.nsims, s, snapshot));
                log::info!("saving {:?}", path);
                pcolor(&path, field, &x, &y, &popts)?;
            }

            // Pressure with the recirculating wake (u <= 0) on top.
            let popts = PcolorOptions::new(
                format!("Pressure, x-Velocity in wake (u < 0), t={:.3}", t),
                opts.xlim,
                opts.ylim,
            );
            let wake = wake_mask(&flow.velx);
            let path = plots_dir.join(fig_filename("fig_u_wake", sim.nsims, s, snapshot));
            log::info!("saving {:?}", path);
            pcolor_overlay(
                &path,
                &flow.pressure,
                &Colormap::rdbu(),
                "Pressure",
                &wake,
                &opts.colormap,
                "u",
                &x,
                &y,
                &popts,
            )?;
        }
    }
    Ok(())
}

/// Render streamline plots of a 2-D solution
///
/// Writes `streamlines[_SS][_IIIII].png` into `plots_dir` for every
/// simulation and snapshot.
///
/// # Errors
/// When configuration or snapshot files are missing or malformed, when
/// the domain is not 2-D, or when rendering fails.
pub fn plot_streamlines<P: AsRef<Path>, Q: AsRef<Path>>(
    sim_dir: P,
    plots_dir: Q,
    opts: &StreamlinePlotOptions,
) -> Result<()> {
    let sim_dir = sim_dir.as_ref();
    let plots_dir = plots_dir.as_ref();
    let sim = SimulationConfig::read(sim_dir)?;
    let solver = SolverConfig::read(sim_dir)?;
    if solver.ndims != 2 {
        return Err(Error::BadDimensions(solver.ndims));
    }
    log_parameters(&sim, &solver);
    fs::create_dir_all(plots_dir)?;

    let timing = solver.snapshot_timing();
    let expected = (!solver.op_overwrite).then(|| timing.n_snapshots);
    let set = load_snapshots(sim_dir, sim.nsims, expected, solver.nvars, &solver.size)?;

    for s in 0..sim.nsims {
        for i in 0..set.n_snapshots(s) {
            let sol = reshape_2d(set.sims[s].row(i), solver.nvars, &solver.size)?;
            let flow = FlowPlane::from_conserved_2d(&sol, opts.gamma)?;
            let t = if solver.op_overwrite {
                solver.t_final()
            } else {
                i as f64 * timing.dt_snapshots
            };
            let snapshot = (!solver.op_overwrite).then(|| i);

            let mut sopts = StreamlineOptions::new(format!("Streamline(u,v), t={:.3}", t));
            sopts.density = opts.density;
            sopts.linewidth = opts.linewidth;
            let path = plots_dir.join(fig_filename("streamlines", sim.nsims, s, snapshot));
            log::info!("saving {:?}", path);
            let x = set.grid.x().to_vec();
            let y = set.grid.y().to_vec();
            streamlines(
                &path,
                &x,
                &y,
                &flow.velx,
                &flow.vely,
                &flow.speed,
                &sopts,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fig_filename() {
        assert_eq!(fig_filename("fig_density", 1, 0, None), "fig_density.png");
        assert_eq!(
            fig_filename("fig_density", 1, 0, Some(4)),
            "fig_density_00004.png"
        );
        assert_eq!(
            fig_filename("streamlines", 3, 2, Some(4)),
            "streamlines_02_00004.png"
        );
        assert_eq!(fig_filename("fig_u", 3, 2, None), "fig_u_02.png");
    }

    /// Write a freestream op file: rho = 1, u = 1, p = 1
    fn write_op_file(path: &Path, nvars: usize, size: &[usize]) {
        let mut values: Vec<f64> = Vec::new();
        for (d, &n) in size.iter().enumerate() {
            // Coordinates centered on the origin so the mask bites.
            values.extend((0..n).map(|i| i as f64 - (n / 2) as f64 + 0.1 * d as f64));
        }
        let npoints: usize = size.iter().product();
        let e = 1.0 / (GAMMA - 1.) + 0.5;
        for _ in 0..npoints {
            values.push(1.0); // rho
            values.push(1.0); // rho u
            for _ in 2..nvars - 1 {
                values.push(0.0);
            }
            values.push(e);
        }
        let mut file = fs::File::create(path).unwrap();
        for v in values {
            file.write_all(&v.to_le_bytes()).unwrap();
        }
    }

    #[test]
    fn test_plot_solution_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("solver.inp"),
            "begin\n\
             ndims 3\n\
             nvars 5\n\
             size 8 6 2\n\
             n_iter 10\n\
             dt 0.1\n\
             file_op_iter 5\n\
             op_file_format binary\n\
             op_overwrite no\n\
             end\n",
        )
        .unwrap();
        for idx in 0..3 {
            write_op_file(
                &dir.path().join(format!("op_{:05}.bin", idx)),
                5,
                &[8, 6, 2],
            );
        }
        let plots = dir.path().join("plots");
        let mut opts = SolutionPlotOptions::default();
        opts.xlim = (-4., 4.);
        opts.ylim = (-3., 3.);
        plot_solution(dir.path(), &plots, &opts).unwrap();
        for prefix in [
            "fig_density",
            "fig_pressure",
            "fig_velocity_magnitude",
            "fig_u",
            "fig_v",
            "fig_u_wake",
        ] {
            for idx in 0..3 {
                assert!(
                    plots.join(format!("{}_{:05}.png", prefix, idx)).exists(),
                    "missing {} {}",
                    prefix,
                    idx
                );
            }
        }
    }

    #[test]
    fn test_plot_streamlines_steady() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("solver.inp"),
            "begin\n\
             ndims 2\n\
             nvars 4\n\
             size 12 10\n\
             n_iter 100\n\
             dt 0.01\n\
             op_file_format binary\n\
             op_overwrite yes\n\
             end\n",
        )
        .unwrap();
        write_op_file(&dir.path().join("op.bin"), 4, &[12, 10]);
        let plots = dir.path().join("plots");
        plot_streamlines(dir.path(), &plots, &StreamlinePlotOptions::default()).unwrap();
        assert!(plots.join("streamlines.png").exists());
    }

    #[test]
    fn test_plot_solution_rejects_2d() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("solver.inp"),
            "begin\nndims 2\nnvars 4\nsize 4 4\nn_iter 1\ndt 0.1\n\
             op_file_format binary\nop_overwrite yes\nend\n",
        )
        .unwrap();
        assert!(matches!(
            plot_solution(dir.path(), dir.path(), &SolutionPlotOptions::default()),
            Err(Error::BadDimensions(2))
        ));
    }
}
