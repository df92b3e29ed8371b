// ============================================================
// CLI Layer
// ============================================================
// A thin driver over the library, handy outside of a training
// script:
//
//   ptmlib cpu                              — CPU count report
//   ptmlib chart --history h.pkl --metric loss [--save]
//   ptmlib show accuracy-cv_1.png           — re-display a chart
//
// Every command only routes to library calls.

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{ChartArgs, Commands, CpuArgs, ShowArgs};

use ptmlib::{ChartRenderer, CpuCount, FigureSize, HistoryStore};

#[derive(Parser, Debug)]
#[command(
    name = "ptmlib",
    version,
    about = "CPU stats and training-history charts for ML experiments."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Cpu(args)   => run_cpu(args),
            Commands::Chart(args) => run_chart(args),
            Commands::Show(args)  => run_show(args),
        }
    }
}

fn run_cpu(args: CpuArgs) -> Result<()> {
    let cpu: CpuCount = (&args).into();
    cpu.print_stats();
    Ok(())
}

fn run_chart(args: ChartArgs) -> Result<()> {
    let history = HistoryStore::load_file(&args.history)
        .with_context(|| format!("Cannot read history '{}'", args.history.display()))?;

    let renderer = ChartRenderer::new(&args.out_dir).with_fig_size((&args).into());

    match renderer.render(&history, &args.metric, args.save, args.suffix.as_deref())? {
        Some(path) => println!("Chart saved to '{}'", path.display()),
        None if args.save => tracing::debug!("Nothing saved for '{}'", args.metric),
        None => {}
    }
    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let size: FigureSize = (&args).into();
    let renderer = ChartRenderer::new(".").with_fig_size(size);

    if !renderer.show_saved(&args.path, Some(size))? {
        println!("No image at '{}'", args.path.display());
    }
    Ok(())
}
