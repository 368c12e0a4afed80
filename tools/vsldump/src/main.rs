//! CLI tool for dumping `varnishlog` output as structured entries.
//!
//! # Usage
//!
//! ```bash
//! # Parse a saved log and print JSON lines
//! vsldump --input varnish.log
//!
//! # Follow varnishlog (default VXID grouping), only backend requests, only selected tags
//! varnishlog -g vxid | vsldump --kind be-req --tag BereqURL --tag BerespStatus
//!
//! # One line per entry
//! vsldump -i varnish.log --format summary --limit 10
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write, stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use vslparser::prelude::*;

/// Parse varnishlog entries and print them in a structured form.
///
/// Reads entries from input (file or stdin) one at a time and writes the
/// selected ones to stdout.
#[derive(Parser, Debug)]
#[command(name = "vsldump")]
#[command(version, about)]
struct Args {
    /// Input file path. If not specified, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Only print entries of this kind. May be repeated.
    #[arg(short, long, value_enum)]
    kind: Vec<KindArg>,

    /// Only print these tags. May be repeated.
    #[arg(short, long)]
    tag: Vec<String>,

    /// Stop after printing this many entries.
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

/// Output formats for CLI arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// varnishlog text, entries separated by blank lines.
    Text,
    /// One line per entry: kind, vxid and tag count.
    Summary,
}

/// Entry kinds for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Session,
    Request,
    BeReq,
    Raw,
}

impl From<KindArg> for EntryKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Session => EntryKind::Session,
            KindArg::Request => EntryKind::Request,
            KindArg::BeReq => EntryKind::BeReq,
            KindArg::Raw => EntryKind::Raw,
        }
    }
}

/// Selection and formatting options derived from [`Args`].
#[derive(Debug, Default)]
struct DumpOptions {
    format: OutputFormat,
    kinds: Vec<EntryKind>,
    tags: Vec<String>,
    limit: Option<usize>,
}

impl DumpOptions {
    fn from_args(args: &Args) -> Self {
        Self {
            format: args.format,
            kinds: args.kind.iter().copied().map(EntryKind::from).collect(),
            tags: args.tag.clone(),
            limit: args.limit,
        }
    }

    fn selects(&self, entry: &Entry) -> bool {
        self.kinds.is_empty() || self.kinds.contains(&entry.kind())
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, PartialEq, Eq)]
struct DumpStats {
    parsed: usize,
    printed: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let options = DumpOptions::from_args(&args);
    debug!(?options, "starting");

    // Open input source
    let input: Box<dyn Read> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdin().lock()),
    };

    let mut source = BufReader::new(input).lines();
    let mut output = BufWriter::new(stdout().lock());

    let stats = dump(&mut source, &mut output, &options)?;
    output.flush().context("Failed to flush output")?;

    // Report result to stderr (so it doesn't interfere with stdout output)
    eprintln!("Parsed {} entries, printed {}", stats.parsed, stats.printed);

    Ok(())
}

/// Reads entries from `source` until clean end of input or the limit, and
/// writes the selected ones to `output`.
fn dump<S, W>(source: &mut S, output: &mut W, options: &DumpOptions) -> Result<DumpStats>
where
    S: LineSource + ?Sized,
    W: Write,
{
    let mut stats = DumpStats::default();

    while options.limit.is_none_or(|limit| stats.printed < limit) {
        let entry = match parse(source) {
            Ok(entry) => entry,
            Err(ParseError::EndOfInput) => break,
            Err(e) => {
                let index = stats.parsed + 1;
                return Err(e).with_context(|| format!("Failed to parse entry #{index}"));
            }
        };
        stats.parsed += 1;

        if !options.selects(&entry) {
            continue;
        }

        let entry = if options.tags.is_empty() {
            entry
        } else {
            Entry::new(entry.kind(), entry.vxid(), entry.fields().clone().retain_tags(&options.tags))
        };

        write_entry(output, &entry, options.format)
            .with_context(|| format!("Failed to write entry {}", entry.vxid()))?;
        stats.printed += 1;
    }

    Ok(stats)
}

fn write_entry<W: Write>(output: &mut W, entry: &Entry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *output, entry)?;
            writeln!(output)?;
        }
        OutputFormat::Text => writeln!(output, "{entry}\n")?,
        OutputFormat::Summary => {
            writeln!(output, "{} {} {} tag(s)", entry.kind(), entry.vxid(), entry.fields().len())?
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> &'static str {
        "\
*   << BeReq    >> 32771
-   Begin          bereq 32770 fetch
-   BereqMethod    GET
-   BereqURL       /
-   BerespStatus   200
-   End

*   << Request  >> 32770
-   Begin          req 32769 rxreq
-   ReqMethod      GET
-   ReqURL         /
-   ReqHeader      Host: example.com
-   ReqHeader      Accept: */*
-   End
"
    }

    fn run_dump(input: &str, options: &DumpOptions) -> (DumpStats, String) {
        let mut output = Vec::new();
        let stats = dump(&mut lines_of(input), &mut output, options).unwrap();
        (stats, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_json_output() {
        let (stats, output) = run_dump(sample_log(), &DumpOptions::default());

        assert_eq!(stats, DumpStats { parsed: 2, printed: 2 });
        let lines: Vec<serde_json::Value> =
            output.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines[0]["kind"], "BeReq");
        assert_eq!(lines[0]["vxid"], 32771);
        assert_eq!(lines[1]["fields"]["ReqHeader"][1], "Accept: */*");
    }

    #[test]
    fn test_kind_filter() {
        let options = DumpOptions {
            format: OutputFormat::Summary,
            kinds: vec![EntryKind::Request],
            ..Default::default()
        };
        let (stats, output) = run_dump(sample_log(), &options);

        assert_eq!(stats, DumpStats { parsed: 2, printed: 1 });
        assert_eq!(output, "Request 32770 4 tag(s)\n");
    }

    #[test]
    fn test_tag_filter_text_output() {
        let options = DumpOptions {
            format: OutputFormat::Text,
            tags: vec!["BereqURL".to_string()],
            ..Default::default()
        };
        let (_, output) = run_dump(sample_log(), &options);

        assert!(output.starts_with("* << BeReq >> 32771\n- BereqURL /\n- End\n\n"));
        assert!(!output.contains("ReqMethod"));
    }

    #[test]
    fn test_limit_stops_reading() {
        let options = DumpOptions { limit: Some(1), ..Default::default() };
        let mut source = lines_of(sample_log());
        let stats = dump(&mut source, &mut Vec::new(), &options).unwrap();

        assert_eq!(stats, DumpStats { parsed: 1, printed: 1 });
        // The second entry is still in the source.
        assert_eq!(parse(&mut source).unwrap().vxid(), 32770);
    }

    #[test]
    fn test_empty_input() {
        let (stats, output) = run_dump("", &DumpOptions::default());
        assert_eq!(stats, DumpStats::default());
        assert!(output.is_empty());
    }

    #[test]
    fn test_truncated_input_fails() {
        let mut output = Vec::new();
        let mut source = lines_of("* << Request >> 1\n- ReqURL /");
        let err = dump(&mut source, &mut output, &DumpOptions::default()).unwrap_err();

        assert!(format!("{err:#}").contains("Failed to parse entry #1"));
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::TruncatedEntry { vxid: 1, .. })
        ));
    }
}
