// ============================================================
// CLI — Commands and Arguments
// ============================================================

use clap::{Args, Subcommand};
use std::path::PathBuf;

use ptmlib::{CpuCount, FigureSize};

/// Largest accepted figure side, in inches (4000 px at 100 dpi)
pub const MAX_INCHES: f32 = 40.0;
const MIN_INCHES: f32 = 0.5;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print total and adjusted logical CPU counts
    Cpu(CpuArgs),

    /// Render a chart from a saved {name}_history.pkl file
    Chart(ChartArgs),

    /// Re-display a previously saved chart image
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct CpuArgs {
    /// Pretend the host has this many logical CPUs
    #[arg(long)]
    pub total: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ChartArgs {
    /// History file written by load-or-fit
    #[arg(long)]
    pub history: PathBuf,

    /// Substring selecting the series to plot, e.g. "accuracy"
    #[arg(long)]
    pub metric: String,

    /// Write the chart as {metric}-{suffix}.png
    #[arg(long)]
    pub save: bool,

    /// File name suffix; defaults to a YYYYmmdd-HHMMSS timestamp
    #[arg(long)]
    pub suffix: Option<String>,

    /// Directory for saved charts
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Figure width in inches
    #[arg(long, default_value_t = 10.0, value_parser = parse_inches)]
    pub width: f32,

    /// Figure height in inches
    #[arg(long, default_value_t = 6.0, value_parser = parse_inches)]
    pub height: f32,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// PNG file to display
    pub path: PathBuf,

    /// Figure width in inches
    #[arg(long, default_value_t = 10.0, value_parser = parse_inches)]
    pub width: f32,

    /// Figure height in inches
    #[arg(long, default_value_t = 6.0, value_parser = parse_inches)]
    pub height: f32,
}

/// Figure side in inches, within MIN_INCHES..=MAX_INCHES
fn parse_inches(s: &str) -> Result<f32, String> {
    let inches: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(MIN_INCHES..=MAX_INCHES).contains(&inches) {
        return Err(format!("must be between {MIN_INCHES} and {MAX_INCHES} inches"));
    }
    Ok(inches)
}

// CLI args → library types; the library never sees clap types.

impl From<&CpuArgs> for CpuCount {
    fn from(a: &CpuArgs) -> Self {
        match a.total {
            Some(total) => CpuCount::with_total(total),
            None        => CpuCount::new(),
        }
    }
}

impl From<&ChartArgs> for FigureSize {
    fn from(a: &ChartArgs) -> Self {
        FigureSize::new(a.width, a.height)
    }
}

impl From<&ShowArgs> for FigureSize {
    fn from(a: &ShowArgs) -> Self {
        FigureSize::new(a.width, a.height)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> Result<Commands, clap::Error> {
        TestCli::try_parse_from(std::iter::once("ptmlib").chain(args.iter().copied()))
            .map(|cli| cli.command)
    }

    #[test]
    fn test_chart_args_convert_to_figure_size() {
        let Commands::Chart(args) =
            parse(&["chart", "--history", "h.pkl", "--metric", "loss", "--width", "4"]).unwrap()
        else {
            panic!("expected chart command");
        };
        assert_eq!(FigureSize::from(&args), FigureSize::new(4.0, 6.0));
    }

    #[test]
    fn test_show_defaults_to_ten_by_six() {
        let Commands::Show(args) = parse(&["show", "loss-cv_1.png"]).unwrap() else {
            panic!("expected show command");
        };
        let size: FigureSize = (&args).into();
        assert_eq!(size, FigureSize::default());
    }

    #[test]
    fn test_oversized_figure_is_rejected() {
        assert!(parse(&["show", "a.png", "--width", "1e6"]).is_err());
        assert!(parse(&["show", "a.png", "--height", "0"]).is_err());
        assert!(parse(&["show", "a.png", "--width", "wide"]).is_err());
        assert!(parse(&["show", "a.png", "--width", "40"]).is_ok());
    }

    #[test]
    fn test_cpu_total_override() {
        let Commands::Cpu(args) = parse(&["cpu", "--total", "8"]).unwrap() else {
            panic!("expected cpu command");
        };
        let cpu: CpuCount = (&args).into();
        assert_eq!(cpu.total_count(), 8);
        assert_eq!(cpu.adjusted_count(1), 7);
    }
}
