use crate::infra::{calibrate_export, parse_scale, scoring_config, ScoringOverrides};
use chrono::SecondsFormat;
use clap::Args;
use lead_score::error::AppError;
use lead_score::workflows::leads::{
    AttributeTablesView, LeadRecord, LeadScoreModel, LeadScoreView, RecordSet, ScaleConvention,
};
use serde::Serialize;
use std::path::PathBuf;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Args, Debug)]
pub(crate) struct TablesArgs {
    /// Lead export (CSV) used for calibration
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Attribute column to score on; repeat to replace the configured list
    #[arg(long)]
    pub(crate) attribute: Vec<String>,
    /// Emit the tables as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Lead export (CSV) used for calibration and scoring
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Zero-based row of the export to score
    #[arg(long, default_value_t = 0, conflicts_with = "all")]
    pub(crate) row: usize,
    /// Score every row in the export
    #[arg(long)]
    pub(crate) all: bool,
    /// Attribute column to score on; repeat to replace the configured list
    #[arg(long)]
    pub(crate) attribute: Vec<String>,
    /// Clamp scores that fall outside [-100, 100] instead of failing
    #[arg(long)]
    pub(crate) clamp: bool,
    /// Scaling convention: span200 or span100
    #[arg(long, value_parser = parse_scale)]
    pub(crate) scale: Option<ScaleConvention>,
    /// Emit scores as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct ScoredRow {
    row: usize,
    #[serde(flatten)]
    score: LeadScoreView,
}

pub(crate) fn run_tables_report(args: TablesArgs) -> Result<(), AppError> {
    let TablesArgs {
        csv,
        attribute,
        json,
    } = args;

    let config = scoring_config(ScoringOverrides {
        attributes: attribute,
        ..ScoringOverrides::default()
    })?;
    let (_, model) = calibrate_export(&csv, &config)?;
    let views = model.table_views();

    if json {
        match serde_json::to_string_pretty(&views) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Tables unavailable as JSON: {err}"),
        }
        return Ok(());
    }

    render_calibration(&model);
    for view in &views {
        render_tables(view);
    }
    Ok(())
}

pub(crate) fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        csv,
        row,
        all,
        attribute,
        clamp,
        scale,
        json,
    } = args;

    let config = scoring_config(ScoringOverrides {
        attributes: attribute,
        scale,
        clamp,
    })?;
    let (records, model) = calibrate_export(&csv, &config)?;

    let rows = select_rows(row, all, records.len())?;

    if json {
        let mut scored = Vec::with_capacity(rows.len());
        for index in rows {
            if let Some(record) = records.get(index) {
                let score = model.score(record)?;
                scored.push(ScoredRow {
                    row: index,
                    score: LeadScoreView::from(score),
                });
            }
        }
        match serde_json::to_string_pretty(&scored) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Scores unavailable as JSON: {err}"),
        }
        return Ok(());
    }

    if all {
        render_calibration(&model);
        println!("\nLead scores");
        for (index, record) in records.records().iter().enumerate() {
            match model.score(record) {
                Ok(score) => println!(
                    "- row {index}: {:>4} ({})",
                    score.score,
                    score.likelihood.label()
                ),
                Err(err) => println!("- row {index}: unscored ({err})"),
            }
        }
        return Ok(());
    }

    if let Some(record) = records.get(row) {
        render_lead(&records, record);
        let score = model.score(record)?;
        println!(
            "\nLead score of:{BOLD} {} {RESET}\n(Calculated between -100 and 100)",
            score.score
        );
        println!(
            "Lead is{BOLD} {} {RESET}to result in a closed deal.",
            score.likelihood.label()
        );
    }
    Ok(())
}

fn select_rows(row: usize, all: bool, leads: usize) -> Result<Vec<usize>, AppError> {
    if all {
        Ok((0..leads).collect())
    } else if row < leads {
        Ok(vec![row])
    } else {
        Err(AppError::RowOutOfRange { row, leads })
    }
}

fn render_calibration(model: &LeadScoreModel) {
    let summary = model.summary();
    println!(
        "Calibrated on {} leads at {}",
        summary.record_count,
        summary
            .calibrated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    println!(
        "Perfect score {:.2} | Worst score {:.2} | Scaler {:.4} ({})",
        summary.perfect_score,
        summary.worst_score,
        summary.scaler,
        summary.convention.label()
    );
}

fn render_lead(records: &RecordSet, record: &LeadRecord) {
    println!("The lead we are analyzing:");
    let width = records
        .columns()
        .iter()
        .map(|column| column.len())
        .max()
        .unwrap_or(0);
    for column in records.columns() {
        println!(
            "  {column:<width$}  {}",
            record.get(column).unwrap_or("-")
        );
    }
}

fn render_tables(view: &AttributeTablesView) {
    println!("\n{}", view.attribute);
    println!(
        "  {:<32} {:>7} {:>11} {:>9} {:>13} {:>10} {:>8}",
        "value", "closed", "non-closed", "closed %", "non-closed %", "difference", "weight"
    );

    let rows = view
        .counts
        .rows
        .iter()
        .zip(&view.percents.rows)
        .zip(&view.weights.rows);
    for ((count, percent), weight) in rows {
        println!(
            "  {:<32} {:>7} {:>11} {:>9.2} {:>13.2} {:>10.2} {:>8.2}",
            count.value,
            count.closed,
            count.non_closed,
            percent.closed_pct,
            percent.non_closed_pct,
            weight.difference,
            weight.weight
        );
    }
    println!(
        "  totals: {} closed, {} non-closed | weights {:.2}..{:.2}, mean {:.2}",
        view.counts.total_closed,
        view.counts.total_non_closed,
        view.weights.min_weight,
        view.weights.max_weight,
        view.weights.mean_weight
    );
}
