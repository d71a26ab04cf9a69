//! parkern: times the sequential and parallel kernels on generated data.
//!
//! Each run prints one CSV line on stdout so sweeps over sizes and thread
//! counts can be collected by a script:
//!
//! ```text
//! dot:     mode,size,threads,elapsed_seconds,result
//! matmul:  mode,size,threads,elapsed_seconds
//! ```

use std::fmt;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use par_kernels::{
    dot_parallel, dot_sequential, matmul_parallel, matmul_sequential, Element, Generator,
};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "parkern")]
#[command(author, version, about = "Time sequential and parallel integer kernels", long_about = None)]
struct Cli {
    /// Enable verbose logging (also prints matrices for `matmul`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dot product of two random vectors of length SIZE
    Dot(RunArgs),

    /// Product of two random SIZE x SIZE matrices
    Matmul(RunArgs),
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Vector length or matrix dimension
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    size: u64,

    /// Worker threads for `par` mode; values below 1 are raised to 1
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    threads: i64,

    /// Execution mode
    #[arg(long, value_enum, default_value_t = Mode::Seq)]
    mode: Mode,

    /// Seed for input generation (defaults to the current UNIX time)
    #[arg(long)]
    seed: Option<u64>,

    /// Smallest generated value
    #[arg(long, allow_negative_numbers = true)]
    min: Option<Element>,

    /// Largest generated value
    #[arg(long, allow_negative_numbers = true)]
    max: Option<Element>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Sequential reference kernel
    Seq,
    /// Parallel kernel with --threads workers
    Par,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Seq => "seq",
            Mode::Par => "par",
        })
    }
}

/// Inputs resolved from the command line and per-kernel defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunPlan {
    size: usize,
    threads: usize,
    mode: Mode,
    seed: u64,
    min: Element,
    max: Element,
}

impl RunArgs {
    fn plan(&self, default_bounds: (Element, Element)) -> Result<RunPlan> {
        let size = usize::try_from(self.size).context("size does not fit in memory")?;
        let seed = match self.seed {
            Some(seed) => seed,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .context("system clock is before the UNIX epoch")?
                .as_secs(),
        };
        Ok(RunPlan {
            size,
            threads: clamp_threads(self.threads),
            mode: self.mode,
            seed,
            min: self.min.unwrap_or(default_bounds.0),
            max: self.max.unwrap_or(default_bounds.1),
        })
    }
}

fn clamp_threads(threads: i64) -> usize {
    usize::try_from(threads.max(1)).unwrap_or(usize::MAX)
}

fn run_dot(plan: &RunPlan) -> Result<String> {
    let mut gen = Generator::new(plan.seed);
    let v1 = gen.vector(plan.size, plan.min, plan.max)?;
    let v2 = gen.vector(plan.size, plan.min, plan.max)?;

    let start = Instant::now();
    let result = match plan.mode {
        Mode::Seq => dot_sequential(&v1, &v2),
        Mode::Par => dot_parallel(&v1, &v2, plan.threads)?,
    };
    let elapsed = start.elapsed().as_secs_f64();

    Ok(format!(
        "{},{},{},{:.6},{}",
        plan.mode, plan.size, plan.threads, elapsed, result
    ))
}

fn run_matmul(plan: &RunPlan, print_matrices: bool) -> Result<String> {
    let mut gen = Generator::new(plan.seed);
    let a = gen.matrix(plan.size, plan.size, plan.min, plan.max)?;
    let b = gen.matrix(plan.size, plan.size, plan.min, plan.max)?;

    let start = Instant::now();
    let result = match plan.mode {
        Mode::Seq => matmul_sequential(&a, &b)?,
        Mode::Par => matmul_parallel(&a, &b, plan.threads)?,
    };
    let elapsed = start.elapsed().as_secs_f64();

    if print_matrices {
        eprint!("a = {a}");
        eprint!("b = {b}");
        eprint!("result = {result}");
    }

    Ok(format!(
        "{},{},{},{:.6}",
        plan.mode, plan.size, plan.threads, elapsed
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let line = match &cli.command {
        Commands::Dot(args) => {
            let plan = args.plan((-100, 100))?;
            debug!(?plan, "dot product run");
            run_dot(&plan).context("dot product failed")?
        }
        Commands::Matmul(args) => {
            let plan = args.plan((-10, 10))?;
            debug!(?plan, "matrix product run");
            run_matmul(&plan, cli.verbose).context("matrix product failed")?
        }
    };

    println!("{line}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("parkern").chain(args.iter().copied())).unwrap()
    }

    fn run_args(cli: Cli) -> RunArgs {
        match cli.command {
            Commands::Dot(args) | Commands::Matmul(args) => args,
        }
    }

    #[test]
    fn test_defaults() {
        let args = run_args(parse(&["dot", "--size", "10", "--seed", "5"]));
        let plan = args.plan((-100, 100)).unwrap();
        assert_eq!(
            plan,
            RunPlan {
                size: 10,
                threads: 1,
                mode: Mode::Seq,
                seed: 5,
                min: -100,
                max: 100,
            }
        );
    }

    #[test]
    fn test_threads_clamped() {
        let args = run_args(parse(&["matmul", "--size", "4", "--threads", "-3"]));
        assert_eq!(args.plan((-10, 10)).unwrap().threads, 1);
        assert_eq!(clamp_threads(0), 1);
        assert_eq!(clamp_threads(6), 6);
    }

    #[test]
    fn test_size_required_and_positive() {
        let missing = Cli::try_parse_from(["parkern", "dot"]);
        assert!(missing.is_err());
        let zero = Cli::try_parse_from(["parkern", "dot", "--size", "0"]);
        assert!(zero.is_err());
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let bad = Cli::try_parse_from(["parkern", "dot", "--size", "3", "--mode", "gpu"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_dot_csv_line() {
        let args = run_args(parse(&[
            "dot", "--size", "1000", "--mode", "par", "--threads", "4", "--seed", "9",
        ]));
        let plan = args.plan((-100, 100)).unwrap();
        let line = run_dot(&plan).unwrap();
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(&fields[..3], &["par", "1000", "4"]);

        // Same seed in sequential mode gives the same result column.
        let seq = RunPlan {
            mode: Mode::Seq,
            ..plan
        };
        let seq_line = run_dot(&seq).unwrap();
        assert_eq!(seq_line.rsplit(',').next(), line.rsplit(',').next());
    }

    #[test]
    fn test_matmul_csv_line() {
        let args = run_args(parse(&["matmul", "--size", "8", "--mode", "par", "--threads", "3"]));
        let plan = args.plan((-10, 10)).unwrap();
        let line = run_matmul(&plan, false).unwrap();
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(&fields[..3], &["par", "8", "3"]);
    }

    #[test]
    fn test_inverted_bounds_fail() {
        let args = run_args(parse(&["dot", "--size", "3", "--min", "5", "--max", "-5"]));
        let plan = args.plan((-100, 100)).unwrap();
        assert!(run_dot(&plan).is_err());
    }
}
