//! Recognize command - find quantities in a single text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use numrec_core::{Culture, NumberRecognizer, NumrecConfig, RecognizerKind, Value};

/// Arguments for the recognize command.
#[derive(Args)]
pub struct RecognizeArgs {
    /// Text to recognize (reads stdin when neither text nor --file is given)
    #[arg(conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Kinds to recognize: "all" or a comma-separated list of
    /// number, ordinal, percentage, range, currency
    #[arg(short, long, default_value = "all")]
    kind: String,

    /// Culture (e.g. "en-us", "zh-cn"); overrides the config file
    #[arg(long)]
    culture: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Report spans only, without resolving values
    #[arg(long)]
    extract_only: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text, one match per line
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

/// One recognized span, flattened for output.
#[derive(Debug, Clone, Serialize)]
pub struct Recognized {
    pub kind: RecognizerKind,
    pub start: usize,
    pub length: usize,
    pub text: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

pub async fn run(args: RecognizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    // Load configuration
    let mut config = super::load_config(config_path)?;
    if let Some(culture) = &args.culture {
        config.culture = culture.clone();
    }

    // Read input text
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // Build recognizer
    let recognizer = NumberRecognizer::from_config(&config)
        .map_err(|e| anyhow::anyhow!("{} (supported: {})", e, culture_codes()))?;
    let kinds = parse_kinds(&args.kind)?;
    let extract_only = args.extract_only || config.output.extract_only;
    info!(
        "Recognizing {} bytes as {}",
        text.len(),
        recognizer.culture()
    );

    let matches = recognize_text(&recognizer, &kinds, &text, extract_only)?;

    // Format output
    let output = format_matches(&matches, args.format, &config)?;

    // Write output
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} matches written to {}",
            style("✓").green(),
            matches.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());
    Ok(())
}

/// "all", or a comma-separated list of kind names.
pub fn parse_kinds(spec: &str) -> anyhow::Result<Vec<RecognizerKind>> {
    if spec.trim().eq_ignore_ascii_case("all") {
        return Ok(RecognizerKind::ALL.to_vec());
    }
    let mut kinds = Vec::new();
    for name in spec.split(',').filter(|s| !s.trim().is_empty()) {
        let kind: RecognizerKind = name.parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    if kinds.is_empty() {
        anyhow::bail!("No recognizer kind given");
    }
    Ok(kinds)
}

/// Run each kind over the text, in order.
pub fn recognize_text(
    recognizer: &NumberRecognizer,
    kinds: &[RecognizerKind],
    text: &str,
    extract_only: bool,
) -> anyhow::Result<Vec<Recognized>> {
    let mut matches = Vec::new();
    for &kind in kinds {
        if extract_only {
            matches.extend(recognizer.extract(kind, text).into_iter().map(|r| Recognized {
                kind,
                start: r.start,
                length: r.length,
                tag: r.tag().name.clone(),
                text: r.text,
                value: None,
                resolution: None,
                unit: None,
            }));
        } else {
            matches.extend(recognizer.recognize(kind, text)?.into_iter().map(|r| Recognized {
                kind,
                start: r.extraction.start,
                length: r.extraction.length,
                tag: r.extraction.tag().name.clone(),
                text: r.extraction.text,
                value: r.value,
                resolution: Some(r.resolution_str),
                unit: r.unit,
            }));
        }
    }
    Ok(matches)
}

pub fn format_matches(
    matches: &[Recognized],
    format: OutputFormat,
    config: &NumrecConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if config.output.pretty => Ok(serde_json::to_string_pretty(matches)?),
        OutputFormat::Json => Ok(serde_json::to_string(matches)?),
        OutputFormat::Csv => format_csv(matches),
        OutputFormat::Text => Ok(format_text(matches)),
    }
}

fn format_csv(matches: &[Recognized]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["kind", "start", "length", "text", "tag", "resolution", "unit"])?;
    for m in matches {
        wtr.write_record([
            m.kind.as_str(),
            &m.start.to_string(),
            &m.length.to_string(),
            &m.text,
            &m.tag,
            m.resolution.as_deref().unwrap_or(""),
            m.unit.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(matches: &[Recognized]) -> String {
    if matches.is_empty() {
        return "No matches.".to_string();
    }

    let mut output = String::new();
    for m in matches {
        output.push_str(&format!(
            "{:<11} [{}..{}] {:?}",
            m.kind.as_str(),
            m.start,
            m.start + m.length,
            m.text
        ));
        if let Some(resolution) = &m.resolution {
            output.push_str(&format!(" => {}", resolution));
        }
        if let Some(unit) = &m.unit {
            output.push_str(&format!(" {}", unit));
        }
        output.push('\n');
    }
    output.truncate(output.trim_end().len());
    output
}

/// Culture names accepted by `--culture`, for help and error output.
pub fn culture_codes() -> String {
    Culture::ALL
        .iter()
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join(", ")
}
