//! brat2i2b2 - convert a brat annotation directory into i2b2 concept files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use brat2i2b2::{
    BatchReport, ConverterConfig, CursorPolicy, GroupKey, SegmenterKind, convert_directory,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding <id>.txt / <id>.ann pairs
    input: PathBuf,

    /// Directory receiving the con/ and txt/ subdirectories
    output: PathBuf,

    /// YAML configuration file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Span cursor; `legacy` can miss the span after a span-adjacent token
    #[arg(long, value_enum)]
    cursor: Option<CursorArg>,

    /// How labeled tokens are collapsed into concepts
    #[arg(long, value_enum)]
    group_by: Option<GroupByArg>,

    /// Sentence and token segmenter
    #[arg(long, value_enum)]
    segmenter: Option<SegmenterArg>,

    /// Convert documents in parallel
    #[arg(long)]
    parallel: bool,

    /// Emit JSON logs and print the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Exit with status 1 if any document failed
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum CursorArg {
    Retry,
    Legacy,
}

impl From<CursorArg> for CursorPolicy {
    fn from(value: CursorArg) -> Self {
        match value {
            CursorArg::Retry => CursorPolicy::Retry,
            CursorArg::Legacy => CursorPolicy::Legacy,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupByArg {
    Text,
    LabelAndText,
}

impl From<GroupByArg> for GroupKey {
    fn from(value: GroupByArg) -> Self {
        match value {
            GroupByArg::Text => GroupKey::Text,
            GroupByArg::LabelAndText => GroupKey::LabelAndText,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SegmenterArg {
    Unicode,
    Whitespace,
}

impl From<SegmenterArg> for SegmenterKind {
    fn from(value: SegmenterArg) -> Self {
        match value {
            SegmenterArg::Unicode => SegmenterKind::Unicode,
            SegmenterArg::Whitespace => SegmenterKind::Whitespace,
        }
    }
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<ConverterConfig> {
        let mut config = match &self.config {
            Some(path) => ConverterConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ConverterConfig::default(),
        };
        if let Some(cursor) = self.cursor {
            config.align.cursor = cursor.into();
        }
        if let Some(group_by) = self.group_by {
            config.align.group_by = group_by.into();
        }
        if let Some(segmenter) = self.segmenter {
            config.segment.kind = segmenter.into();
        }
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("brat2i2b2=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_report(report: &BatchReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!(
        "converted {} document(s), skipped {} with empty annotations, {} failed",
        report.converted.len(),
        report.skipped_empty.len(),
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  {}: {}", failure.doc_id, failure.error);
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.json);

    let config = cli.resolve_config()?;
    let segmenter = config.segment.kind.build();
    let report = convert_directory(&cli.input, &cli.output, &*segmenter, &config.to_options())
        .with_context(|| {
            format!(
                "converting {} into {}",
                cli.input.display(),
                cli.output.display()
            )
        })?;

    print_report(&report, cli.json)?;
    if cli.strict && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn cursor_flag_overrides_config_both_ways() {
        let mut config = NamedTempFile::new().expect("config file");
        config
            .write_all(b"align:\n  cursor: legacy\n")
            .expect("write config");
        let path = config.path().to_str().expect("utf-8 path");

        let from_file = Cli::try_parse_from(["brat2i2b2", "in", "out", "--config", path])
            .expect("parse")
            .resolve_config()
            .expect("resolve");
        assert_eq!(from_file.align.cursor, CursorPolicy::Legacy);

        let back_to_retry =
            Cli::try_parse_from(["brat2i2b2", "in", "out", "--config", path, "--cursor", "retry"])
                .expect("parse")
                .resolve_config()
                .expect("resolve");
        assert_eq!(back_to_retry.align.cursor, CursorPolicy::Retry);

        let legacy = Cli::try_parse_from(["brat2i2b2", "in", "out", "--cursor", "legacy"])
            .expect("parse")
            .resolve_config()
            .expect("resolve");
        assert_eq!(legacy.align.cursor, CursorPolicy::Legacy);
    }

    #[test]
    fn unknown_cursor_is_rejected() {
        assert!(Cli::try_parse_from(["brat2i2b2", "in", "out", "--cursor", "sideways"]).is_err());
    }
}
