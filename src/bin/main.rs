use clap::Parser;
use crossterm::style::Stylize;
use lexicon_core::persistence::{lines_for_forms, sample_lines, JsonLinesReader, TsvWriter};
use lexicon_core::{ConversionReport, LexiconConverter};
use std::error::Error;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT_PATH: &str = "data/morphology/fr_lefff.tsv";
const DEFAULT_VERIFY_WORDS: &str = "le,la,les,un,une,grand,grande,mange,pense,penses";
const VERIFY_LIMIT: usize = 3;

/// Converts Lefff rows (JSON Lines) into the grammar checker's form/lemma/tag lexicon.
#[derive(Parser, Debug)]
#[command(name = "lexicon_convert", version)]
struct Args {
    /// Raw lexicon, one JSON object per line. Use `-` for stdin.
    input: PathBuf,

    /// Destination TSV file.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Number of written lines to show after the conversion.
    #[arg(long, default_value_t = 15)]
    sample: usize,

    /// Forms to look up in the written lexicon.
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_VERIFY_WORDS)]
    verify: Vec<String>,

    /// Print the conversion report as JSON instead of the summary.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let source: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(std::fs::File::open(&args.input)?))
    };

    let mut writer = TsvWriter::create(&args.output)?;
    let mut converter = LexiconConverter::new();
    for read in JsonLinesReader::new(source) {
        converter.process_read(read, &mut writer)?;
    }
    let report = converter.finish();
    let size = writer.finish()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report, size);

    if args.sample > 0 {
        println!("\n{}", "Sample entries:".bold());
        for line in sample_lines(&args.output, args.sample)? {
            println!("  {line}");
        }
    }

    if !args.verify.is_empty() {
        println!("\n{}", "Verification:".bold());
        for (word, lines) in lines_for_forms(&args.output, &args.verify, VERIFY_LIMIT)? {
            if lines.is_empty() {
                println!("  {}: {}", word, "not found".yellow());
            } else {
                println!("  {word}: {lines:?}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &ConversionReport, size: u64) {
    println!(
        "{} Wrote {} entries ({} skipped)",
        "Done!".green().bold(),
        report.accepted,
        report.skipped_total()
    );
    let skipped = &report.skipped;
    println!(
        "  malformed: {}, excluded: {}, non-alphabetic: {}, mapping failures: {}",
        skipped.malformed_entry,
        skipped.excluded_category,
        skipped.non_alphabetic_form,
        skipped.mapping_failure
    );
    println!("File size: {:.2} MB", size as f64 / 1024.0 / 1024.0);
}
