use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::info;

use lm_diff::{split_lines, try_compute_diff_operations, DiffOperation, OperationKind};
use lm_merge::{format_line_range, try_merge_changes, MergeConflict, MergeResult};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?.with_overrides(&cli);
    colored::control::set_override(config.color);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Command::Diff(args) => cmd_diff(args, &cli.format, &config, &mut out),
        Command::Merge(args) => cmd_merge(args, &cli.format, &config, &mut out),
        Command::Conflicts(args) => cmd_conflicts(args, &cli.format, &config, &mut out),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn merge_files(
    base: &Path,
    left: &Path,
    right: &Path,
    config: &CliConfig,
) -> anyhow::Result<MergeResult> {
    let (base, left, right) = (read_text(base)?, read_text(left)?, read_text(right)?);
    let result = try_merge_changes(&base, &left, &right, &config.diff)?;
    info!(
        left = result.left_operations.len(),
        right = result.right_operations.len(),
        conflicts = result.conflicts.len(),
        "merge complete"
    );
    Ok(result)
}

pub(crate) fn cmd_diff(
    args: &DiffArgs,
    format: &OutputFormat,
    config: &CliConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let base = read_text(&args.base)?;
    let other = read_text(&args.other)?;
    let ops = try_compute_diff_operations(&base, &other, &config.diff)?;

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&ops)?)?,
        OutputFormat::Text => {
            if ops.is_empty() {
                writeln!(out, "No changes.")?;
            }
            let base_lines = split_lines(&base);
            for op in &ops {
                write_hunk(out, op, &base_lines)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn cmd_merge(
    args: &MergeArgs,
    format: &OutputFormat,
    config: &CliConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let result = merge_files(&args.base, &args.left, &args.right, config)?;

    if let Some(path) = &args.output {
        std::fs::write(path, &result.merged_text)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        OutputFormat::Text => {
            if args.output.is_none() {
                write!(out, "{}", result.merged_text)?;
            }
            let stderr = io::stderr();
            let mut err = stderr.lock();
            for conflict in &result.conflicts {
                write_conflict(&mut err, conflict)?;
            }
        }
    }

    if args.fail_on_conflict && result.has_conflicts() {
        anyhow::bail!(
            "{} conflict(s) resolved in favor of {}",
            result.conflicts.len(),
            args.right.display()
        );
    }
    Ok(())
}

pub(crate) fn cmd_conflicts(
    args: &ConflictsArgs,
    format: &OutputFormat,
    config: &CliConfig,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let result = merge_files(&args.base, &args.left, &args.right, config)?;

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&result.conflicts)?)?
        }
        OutputFormat::Text => {
            if result.conflicts.is_empty() {
                writeln!(out, "{} No conflicts.", "✓".green().bold())?;
            }
            for conflict in &result.conflicts {
                write_conflict(out, conflict)?;
            }
        }
    }
    Ok(())
}

fn hunk_header(op: &DiffOperation) -> String {
    let range = format_line_range(op.start, op.end);
    match op.kind() {
        OperationKind::Insertion => format!("insert before {range}"),
        OperationKind::Deletion => format!("delete {range}"),
        OperationKind::Replacement => format!("replace {range}"),
    }
}

fn write_hunk(out: &mut dyn Write, op: &DiffOperation, base_lines: &[String]) -> io::Result<()> {
    writeln!(out, "{}", format!("@@ {} @@", hunk_header(op)).cyan())?;
    for line in base_lines.get(op.start..op.end).unwrap_or_default() {
        writeln!(out, "{}", format!("-{line}").red())?;
    }
    for line in &op.replacement {
        writeln!(out, "{}", format!("+{line}").green())?;
    }
    Ok(())
}

fn write_conflict(out: &mut dyn Write, conflict: &MergeConflict) -> io::Result<()> {
    writeln!(out, "{} conflict: {}", "✗".red().bold(), conflict.describe().bold())?;
    writeln!(out, "  {} {}", "left (dropped):".yellow(), hunk_header(&conflict.left))?;
    for line in &conflict.left.replacement {
        writeln!(out, "    {}", format!("+{line}").dimmed())?;
    }
    writeln!(out, "  {} {}", "right (kept):".green(), hunk_header(&conflict.right))?;
    for line in &conflict.right.replacement {
        writeln!(out, "    {}", format!("+{line}").green())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Fixture {
        _dir: tempfile::TempDir,
        base: PathBuf,
        left: PathBuf,
        right: PathBuf,
        out: PathBuf,
    }

    fn fixture(base: &str, left: &str, right: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        std::fs::write(root.join("base.txt"), base).unwrap();
        std::fs::write(root.join("left.txt"), left).unwrap();
        std::fs::write(root.join("right.txt"), right).unwrap();
        Fixture {
            _dir: dir,
            base: root.join("base.txt"),
            left: root.join("left.txt"),
            right: root.join("right.txt"),
            out: root.join("merged.txt"),
        }
    }

    fn plain() -> CliConfig {
        colored::control::set_override(false);
        CliConfig {
            color: false,
            ..CliConfig::default()
        }
    }

    fn merge_args(f: &Fixture, fail_on_conflict: bool) -> MergeArgs {
        MergeArgs {
            base: f.base.clone(),
            left: f.left.clone(),
            right: f.right.clone(),
            output: Some(f.out.clone()),
            fail_on_conflict,
        }
    }

    #[test]
    fn merge_writes_output_file() {
        let f = fixture("a\nb\nc", "a\nB\nc", "a\nb\nc\nd");
        let mut buf = Vec::new();
        cmd_merge(&merge_args(&f, false), &OutputFormat::Text, &plain(), &mut buf).unwrap();
        assert_eq!(std::fs::read_to_string(&f.out).unwrap(), "a\nB\nc\nd");
        assert!(buf.is_empty());
    }

    #[test]
    fn merge_fails_on_conflict_when_asked() {
        let f = fixture("a\nb\nc", "a\nB\nc", "a\nbeta\nc");
        let mut buf = Vec::new();
        let err = cmd_merge(&merge_args(&f, true), &OutputFormat::Text, &plain(), &mut buf)
            .unwrap_err();
        assert!(err.to_string().contains("1 conflict(s)"));
        // The right-wins result is still written.
        assert_eq!(std::fs::read_to_string(&f.out).unwrap(), "a\nbeta\nc");
    }

    #[test]
    fn merge_json_reports_conflicts() {
        let f = fixture("a\nb\nc", "a\nB\nc", "a\nbeta\nc");
        let mut buf = Vec::new();
        cmd_merge(&merge_args(&f, false), &OutputFormat::Json, &plain(), &mut buf).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["mergedText"], "a\nbeta\nc");
        assert_eq!(json["conflicts"][0]["left"]["replacement"][0], "B");
    }

    #[test]
    fn merge_missing_file_is_an_error() {
        let f = fixture("a", "a", "a");
        let mut args = merge_args(&f, false);
        args.left = f.base.with_file_name("absent.txt");
        let err = cmd_merge(&args, &OutputFormat::Text, &plain(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn merge_respects_cell_limit() {
        let f = fixture("a\nb", "a", "b");
        let mut config = plain();
        config.diff = lm_diff::DiffConfig::with_max_table_cells(2);
        let err = cmd_merge(&merge_args(&f, false), &OutputFormat::Text, &config, &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn diff_text_output() {
        let f = fixture("alpha\nbeta\ngamma", "alpha\nBETA\ngamma", "");
        let args = DiffArgs { base: f.base.clone(), other: f.left.clone() };
        let mut buf = Vec::new();
        cmd_diff(&args, &OutputFormat::Text, &plain(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "@@ replace line 2 @@\n-beta\n+BETA\n");
    }

    #[test]
    fn diff_identical_files() {
        let f = fixture("same", "same", "");
        let args = DiffArgs { base: f.base.clone(), other: f.left.clone() };
        let mut buf = Vec::new();
        cmd_diff(&args, &OutputFormat::Text, &plain(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No changes.\n");
    }

    #[test]
    fn diff_json_output() {
        let f = fixture("alpha\nbeta\ngamma", "alpha\nbeta\ngamma\ndelta", "");
        let args = DiffArgs { base: f.base.clone(), other: f.left.clone() };
        let mut buf = Vec::new();
        cmd_diff(&args, &OutputFormat::Json, &plain(), &mut buf).unwrap();
        let ops: Vec<DiffOperation> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(ops, vec![DiffOperation::insertion(3, vec!["delta".into()])]);
    }

    #[test]
    fn conflicts_text_output() {
        let f = fixture("a\nb\nc", "a\nB\nc", "a\nbeta\nc");
        let args = ConflictsArgs { base: f.base.clone(), left: f.left.clone(), right: f.right.clone() };
        let mut buf = Vec::new();
        cmd_conflicts(&args, &OutputFormat::Text, &plain(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("conflict: line 2 vs line 2"));
        assert!(text.contains("left (dropped): replace line 2"));
        assert!(text.contains("+beta"));
    }

    #[test]
    fn hunk_headers() {
        assert_eq!(hunk_header(&DiffOperation::insertion(3, vec!["x".into()])), "insert before line 4");
        assert_eq!(hunk_header(&DiffOperation::deletion(0, 2)), "delete lines 1-2");
    }
}
