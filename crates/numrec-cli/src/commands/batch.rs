//! Batch command - recognize quantities in many text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use numrec_core::{NumberRecognizer, RecognizerKind};

use super::recognize::{OutputFormat, Recognized, format_matches, parse_kinds, recognize_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Kinds to recognize ("all" or a comma-separated list)
    #[arg(short, long, default_value = "all")]
    kind: String,

    /// Culture; overrides the config file
    #[arg(long)]
    culture: Option<String>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    matches: Option<Vec<Recognized>>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let mut config = super::load_config(config_path)?;
    if let Some(culture) = &args.culture {
        config.culture = culture.clone();
    }
    let recognizer = Arc::new(NumberRecognizer::from_config(&config)?);
    let kinds = Arc::new(parse_kinds(&args.kind)?);
    let extract_only = config.output.extract_only;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text" | "md")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    // Set up progress bar
    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Process files, `jobs` at a time
    let mut results = Vec::with_capacity(files.len());
    for chunk in files.chunks(args.jobs.max(1)) {
        let handles: Vec<_> = chunk
            .iter()
            .cloned()
            .map(|path| {
                let recognizer = Arc::clone(&recognizer);
                let kinds = Arc::clone(&kinds);
                tokio::task::spawn_blocking(move || {
                    let file_start = Instant::now();
                    let result = process_single_file(&path, &recognizer, &kinds, extract_only);
                    (path, result, file_start.elapsed().as_millis() as u64)
                })
            })
            .collect();

        for handle in handles {
            let (path, result, processing_time_ms) = handle.await?;
            match result {
                Ok(matches) => results.push(ProcessResult {
                    path,
                    matches: Some(matches),
                    error: None,
                    processing_time_ms,
                }),
                Err(e) => {
                    let error_msg = e.to_string();
                    if args.continue_on_error {
                        warn!("Failed to process {}: {}", path.display(), error_msg);
                        results.push(ProcessResult {
                            path,
                            matches: None,
                            error: Some(error_msg),
                            processing_time_ms,
                        });
                    } else {
                        error!("Failed to process {}: {}", path.display(), error_msg);
                        anyhow::bail!("Processing failed: {}", error_msg);
                    }
                }
            }
            overall_pb.inc(1);
        }
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.matches.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Write outputs
    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            let Some(matches) = &result.matches else {
                continue;
            };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_matches(matches, args.format, &config)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    recognizer: &NumberRecognizer,
    kinds: &[RecognizerKind],
    extract_only: bool,
) -> anyhow::Result<Vec<Recognized>> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| anyhow::anyhow!("File is not valid UTF-8"))?;
    recognize_text(recognizer, kinds, &text, extract_only)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    // Write header
    let mut header = vec!["filename", "status", "matches"];
    header.extend(RecognizerKind::ALL.iter().map(|k| k.as_str()));
    header.extend(["processing_time_ms", "error"]);
    wtr.write_record(&header)?;

    // Write data
    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let mut record = vec![filename.to_string()];
        match &result.matches {
            Some(matches) => {
                record.push("success".to_string());
                record.push(matches.len().to_string());
                record.extend(RecognizerKind::ALL.iter().map(|kind| {
                    matches.iter().filter(|m| m.kind == *kind).count().to_string()
                }));
                record.push(result.processing_time_ms.to_string());
                record.push(String::new());
            }
            None => {
                record.push("error".to_string());
                record.push(String::new());
                record.extend(RecognizerKind::ALL.iter().map(|_| String::new()));
                record.push(result.processing_time_ms.to_string());
                record.push(result.error.clone().unwrap_or_default());
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
