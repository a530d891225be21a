//! Command line entry point
//!
//! ```text
//! flowplot solution --dir . --plots-dir plots --slice-axis z --slice-loc 0.5
//! flowplot streamlines --dir . --plots-dir plots --density 4
//! ```
use clap::{Parser, Subcommand};
use flowplot::pipeline::{
    plot_solution, plot_streamlines, SolutionPlotOptions, StreamlinePlotOptions,
};
use flowplot::plot::Colormap;
use flowplot::snapshot::SliceAxis;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "flowplot", version)]
#[clap(about = "Render 2D visualizations from binary CFD solver snapshots")]
struct Opts {
    /// Simulation directory holding solver.inp and the op files
    #[clap(short, long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Output directory for the rendered images
    #[clap(long, default_value = "plots", global = true)]
    plots_dir: PathBuf,

    /// Ratio of specific heats
    #[clap(long, default_value = "1.4", global = true)]
    gamma: f64,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pseudocolor maps of a 2D slice through a 3D solution
    Solution {
        /// Axis to slice along (x, y or z)
        #[clap(long, default_value = "z")]
        slice_axis: String,

        /// Fractional slice location in [0, 1)
        #[clap(long, default_value = "0.5")]
        slice_loc: f64,

        /// Plot window, horizontal axis
        #[clap(long, default_value = "-4", allow_hyphen_values = true)]
        xmin: f64,
        #[clap(long, default_value = "10", allow_hyphen_values = true)]
        xmax: f64,

        /// Plot window, vertical axis
        #[clap(long, default_value = "-6", allow_hyphen_values = true)]
        ymin: f64,
        #[clap(long, default_value = "6", allow_hyphen_values = true)]
        ymax: f64,

        /// Radius of the excluded cylinder around the origin
        #[clap(long, default_value = "1.0")]
        mask_radius: f64,

        /// Colormap (jet, Spectral or RdBu)
        #[clap(long, default_value = "jet")]
        colormap: String,
    },
    /// Streamline plots of a 2D solution
    Streamlines {
        /// Seed density of the streamline tracer
        #[clap(long, default_value = "4")]
        density: usize,

        /// Line width in pixels
        #[clap(long, default_value = "1")]
        linewidth: u32,
    },
}

fn run(opts: &Opts) -> flowplot::Result<()> {
    match &opts.command {
        Command::Solution {
            slice_axis,
            slice_loc,
            xmin,
            xmax,
            ymin,
            ymax,
            mask_radius,
            colormap,
        } => {
            let colormap = Colormap::by_name(colormap).unwrap_or_else(|| {
                log::warn!("unknown colormap {:?}, falling back to jet", colormap);
                Colormap::jet()
            });
            let slice_axis: SliceAxis =
                slice_axis
                    .parse()
                    .map_err(|_| flowplot::Error::InvalidValue {
                        key: "slice-axis".to_string(),
                        value: slice_axis.clone(),
                    })?;
            let sopts = SolutionPlotOptions {
                slice_axis,
                slice_loc: *slice_loc,
                xlim: (*xmin, *xmax),
                ylim: (*ymin, *ymax),
                gamma: opts.gamma,
                mask_radius: *mask_radius,
                colormap,
            };
            plot_solution(&opts.dir, &opts.plots_dir, &sopts)
        }
        Command::Streamlines { density, linewidth } => {
            let sopts = StreamlinePlotOptions {
                density: *density,
                linewidth: *linewidth,
                gamma: opts.gamma,
            };
            plot_streamlines(&opts.dir, &opts.plots_dir, &sopts)
        }
    }
}

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .expect("logger");
    let opts = Opts::parse();
    if let Err(e) = run(&opts) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
