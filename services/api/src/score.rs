use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{breakdown, parse_receipt, ScoreBreakdown};
use serde_json::Value;
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Receipt JSON file to score, or `-` to read standard input
    pub(crate) input: PathBuf,
    /// Print the breakdown as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let payload = read_payload(&args.input)?;
    let breakdown = score_payload(&payload)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        print!("{}", render_breakdown(&breakdown));
    }
    Ok(())
}

fn read_payload(input: &Path) -> Result<Value, AppError> {
    let raw = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn score_payload(payload: &Value) -> Result<ScoreBreakdown, AppError> {
    let receipt = parse_receipt(payload).inspect_err(|error| {
        for violation in &error.violations {
            eprintln!("- {violation}");
        }
    })?;
    Ok(breakdown(&receipt))
}

pub(crate) fn render_breakdown(breakdown: &ScoreBreakdown) -> String {
    let mut out = String::from("Receipt points\n");
    for component in &breakdown.components {
        let _ = writeln!(
            out,
            "- {:<28} {:>4}  ({})",
            component.rule.label(),
            component.points,
            component.notes
        );
    }
    let _ = writeln!(out, "Total: {}", breakdown.total);
    out
}
