use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args as ClapArgs, Parser, Subcommand};
use planar_common::io::GraphFormat;
use planar_common::{BoundKind, Config, EdgeOrder};

/// Maximum planar subgraph search
#[derive(Parser, Debug)]
#[command(name = "planar")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log at debug level when RUST_LOG is unset
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute a maximum planar subgraph and write it out
    Compute {
        #[command(flatten)]
        input: InputArgs,
        /// Where to write the subgraph (csv if it ends in .csv or --csv is given, dot otherwise)
        output: PathBuf,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Draw a graph with Graphviz; the format follows the output extension
    Picture {
        #[command(flatten)]
        input: InputArgs,
        /// Image to write, e.g. graph.png or graph.svg
        output: PathBuf,
    },
    /// Test a graph for planarity and show a Kuratowski subdivision if it has one
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Convert a graph to dot
    ToDot {
        #[command(flatten)]
        input: InputArgs,
        /// Dot file to write
        output: PathBuf,
    },
    /// Convert a graph to a csv edge list
    ToCsv {
        #[command(flatten)]
        input: InputArgs,
        /// Csv file to write
        output: PathBuf,
    },
}

/// Input file and its format.
#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// Graph to read (csv if it ends in .csv or --csv is given, dot otherwise)
    pub input: PathBuf,
    /// Treat files as csv edge lists regardless of extension
    #[arg(long, default_value_t = false)]
    pub csv: bool,
}

impl InputArgs {
    /// Format of `path` under the `--csv` override.
    pub fn format_of(&self, path: &Path) -> GraphFormat {
        if self.csv {
            GraphFormat::Csv
        } else {
            GraphFormat::from_path(path)
        }
    }
}

/// Search tuning.
#[derive(ClapArgs, Debug)]
pub struct SearchArgs {
    /// Order in which edges are decided
    #[arg(long, value_enum, default_value = "degree")]
    pub order: OrderArg,
    /// Upper bound used for pruning
    #[arg(long, value_enum, default_value = "combined")]
    pub bound: BoundArg,
    /// Give up after this many milliseconds and keep the best subgraph found
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Explore subtrees in parallel
    #[arg(short = 'p', long, default_value_t = false)]
    pub parallel: bool,
    /// Number of leading edges decided before splitting work
    #[arg(long, default_value_t = 6)]
    pub split_depth: usize,
}

impl SearchArgs {
    /// Convert command-line arguments into the search configuration
    pub fn to_config(&self) -> Config {
        Config::builder()
            .order(self.order.clone().into())
            .bound(self.bound.clone().into())
            .maybe_time_limit(self.timeout_ms.map(Duration::from_millis))
            .parallel(self.parallel)
            .split_depth(self.split_depth)
            .build()
    }
}

/// Command-line argument wrapper for EdgeOrder
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OrderArg {
    /// Highest combined endpoint degree first
    #[value(name = "degree")]
    Degree,
    /// Input order
    #[value(name = "insertion")]
    Insertion,
}

impl From<OrderArg> for EdgeOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Degree => Self::DegreeDescending,
            OrderArg::Insertion => Self::Insertion,
        }
    }
}

/// Command-line argument wrapper for BoundKind
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum BoundArg {
    /// Kept plus undecided edges
    #[value(name = "trivial")]
    Trivial,
    /// Euler's formula per component
    #[value(name = "euler")]
    Euler,
    /// The tighter of the two
    #[value(name = "combined")]
    Combined,
}

impl From<BoundArg> for BoundKind {
    fn from(arg: BoundArg) -> Self {
        match arg {
            BoundArg::Trivial => Self::Trivial,
            BoundArg::Euler => Self::Euler,
            BoundArg::Combined => Self::Combined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_defaults() {
        let args = Args::try_parse_from(["planar", "compute", "in.dot", "out.dot"]).unwrap();
        assert!(!args.verbose);
        match args.command {
            Command::Compute {
                input,
                output,
                search,
            } => {
                assert_eq!(input.input, PathBuf::from("in.dot"));
                assert_eq!(output, PathBuf::from("out.dot"));
                assert_eq!(search.to_config(), Config::default());
            }
            other => panic!("expected compute, got {other:?}"),
        }
    }

    #[test]
    fn test_compute_flags_map_to_config() {
        let args = Args::try_parse_from([
            "planar",
            "compute",
            "in.csv",
            "out.csv",
            "--order",
            "insertion",
            "--bound",
            "euler",
            "--timeout-ms",
            "1500",
            "--parallel",
            "--split-depth",
            "3",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);
        let Command::Compute { search, .. } = args.command else {
            panic!("expected compute");
        };
        let config = search.to_config();
        assert_eq!(config.order, EdgeOrder::Insertion);
        assert_eq!(config.bound, BoundKind::Euler);
        assert_eq!(config.time_limit, Some(Duration::from_millis(1500)));
        assert!(config.parallel);
        assert_eq!(config.split_depth, 3);
    }

    #[test]
    fn test_csv_flag_overrides_extension() {
        let args =
            Args::try_parse_from(["planar", "to-dot", "edges.txt", "out.dot", "--csv"]).unwrap();
        let Command::ToDot { input, output } = args.command else {
            panic!("expected to-dot");
        };
        assert_eq!(input.format_of(&input.input), GraphFormat::Csv);
        assert_eq!(input.format_of(&output), GraphFormat::Csv);
    }

    #[test]
    fn test_rejects_unknown_bound() {
        let unknown = Args::try_parse_from(["planar", "compute", "a", "b", "--bound", "tight"]);
        assert!(unknown.is_err());
        assert!(Args::try_parse_from(["planar", "check"]).is_err());
    }
}
