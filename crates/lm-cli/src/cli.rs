use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "linemerge",
    about = "Linemerge: line diff and right-wins three-way merge",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file (defaults to ./linemerge.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,

    /// Upper bound on LCS table cells per diff; 0 removes the bound
    #[arg(long, global = true)]
    pub max_cells: Option<usize>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the operations that turn BASE into OTHER
    Diff(DiffArgs),
    /// Merge LEFT and RIGHT against their common BASE
    Merge(MergeArgs),
    /// List the conflicts a merge would resolve in favor of RIGHT
    Conflicts(ConflictsArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub base: PathBuf,
    pub other: PathBuf,
}

#[derive(Args)]
pub struct MergeArgs {
    pub base: PathBuf,
    pub left: PathBuf,
    pub right: PathBuf,
    /// Write the merged document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Exit with an error when any left edit was discarded
    #[arg(long)]
    pub fail_on_conflict: bool,
}

#[derive(Args)]
pub struct ConflictsArgs {
    pub base: PathBuf,
    pub left: PathBuf,
    pub right: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["linemerge", "diff", "a.txt", "b.txt"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.base, PathBuf::from("a.txt"));
            assert_eq!(args.other, PathBuf::from("b.txt"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_with_output() {
        let cli = Cli::try_parse_from(["linemerge", "merge", "base", "l", "r", "-o", "out"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.output, Some(PathBuf::from("out")));
            assert!(!args.fail_on_conflict);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_fail_on_conflict() {
        let cli = Cli::try_parse_from(["linemerge", "merge", "b", "l", "r", "--fail-on-conflict"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert!(args.fail_on_conflict);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn merge_requires_three_inputs() {
        assert!(Cli::try_parse_from(["linemerge", "merge", "base", "left"]).is_err());
    }

    #[test]
    fn parse_conflicts() {
        let cli = Cli::try_parse_from(["linemerge", "conflicts", "b", "l", "r"]).unwrap();
        assert!(matches!(cli.command, Command::Conflicts(_)));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "linemerge", "--verbose", "--no-color", "--max-cells", "100", "diff", "a", "b",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.max_cells, Some(100));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["linemerge", "--format", "json", "diff", "a", "b"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::try_parse_from(["linemerge", "diff", "a", "b", "--config", "lm.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("lm.toml")));
    }
}
