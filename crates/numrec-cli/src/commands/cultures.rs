//! Cultures command - list supported cultures and their pattern tables.

use clap::Args;
use console::style;
use serde::Serialize;

use numrec_core::{Culture, provider};

/// Arguments for the cultures command.
#[derive(Args)]
pub struct CulturesArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CultureInfo {
    code: &'static str,
    number_patterns: usize,
    ordinal_patterns: usize,
    percentage_patterns: usize,
    range_patterns: usize,
    currency_units: usize,
    diagnostics: Vec<String>,
}

fn describe(culture: Culture) -> CultureInfo {
    let locale = provider(culture);
    CultureInfo {
        code: culture.code(),
        number_patterns: locale.number_patterns().len(),
        ordinal_patterns: locale.ordinal_patterns().len(),
        percentage_patterns: locale.percentage_patterns().len(),
        range_patterns: locale.range_patterns().len(),
        currency_units: locale.currency_patterns().len(),
        diagnostics: locale.diagnostics().iter().map(|d| d.to_string()).collect(),
    }
}

pub async fn run(args: CulturesArgs) -> anyhow::Result<()> {
    let cultures: Vec<CultureInfo> = Culture::ALL.iter().map(|&c| describe(c)).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cultures)?);
        return Ok(());
    }

    println!("{}", style("Supported cultures:").bold());
    for info in &cultures {
        let status = if info.diagnostics.is_empty() {
            style("ok").green()
        } else {
            style("degraded").yellow()
        };
        println!(
            "  {:<6} {} numbers, {} ordinals, {} percentages, {} ranges, {} currency units [{}]",
            info.code,
            info.number_patterns,
            info.ordinal_patterns,
            info.percentage_patterns,
            info.range_patterns,
            info.currency_units,
            status
        );
        for diagnostic in &info.diagnostics {
            println!("         {} {}", style("!").yellow(), diagnostic);
        }
    }

    Ok(())
}
