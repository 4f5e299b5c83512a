use clap::Args;
use lungscreen::assessment::{
    normalize, read_questionnaires, score_breakdown, AssessmentError, HttpPredictor,
    RawQuestionnaire, RiskCategory, ScoreBreakdown, ScoringOrchestrator, ScoringOutcome,
    ScoringSource,
};
use lungscreen::config::AppConfig;
use lungscreen::error::AppError;
use std::fmt::Write as _;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one questionnaire keyed by upper-case field names
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Skip the prediction service and use the local point table
    #[arg(long)]
    pub(crate) local_only: bool,
    /// Print each field's contribution to the local score
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one questionnaire per row
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Skip the prediction service and use the local point table
    #[arg(long)]
    pub(crate) local_only: bool,
}

fn build_orchestrator(config: &AppConfig) -> Result<ScoringOrchestrator<HttpPredictor>, AppError> {
    let predictor = HttpPredictor::new(&config.predictor)?;
    Ok(ScoringOrchestrator::new(Arc::new(predictor)))
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let use_remote = config.scoring.use_remote && !args.local_only;

    let reader = BufReader::new(File::open(&args.input)?);
    let raw: RawQuestionnaire = serde_json::from_reader(reader)?;
    let input = normalize(&raw).map_err(AssessmentError::from)?;

    let orchestrator = build_orchestrator(&config)?;
    let outcome = orchestrator.score_normalized(&input, use_remote).await;

    print!("{}", render_outcome(&outcome));
    if args.breakdown {
        print!("{}", render_breakdown(&score_breakdown(&input.full)));
    }

    Ok(())
}

pub(crate) async fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let use_remote = config.scoring.use_remote && !args.local_only;

    let rows = read_questionnaires(BufReader::new(File::open(&args.input)?))?;
    let orchestrator = build_orchestrator(&config)?;

    let mut tally = BatchTally::default();
    let source = args.input.display();
    println!("Scoring {} questionnaire(s) from {source}", rows.len());
    for (index, row) in rows.iter().enumerate() {
        // Header is line 1.
        let line = index + 2;
        match orchestrator.score_with_fallback(row, use_remote).await {
            Ok(outcome) => {
                println!("{}", render_batch_line(line, &outcome));
                tally.record(&outcome);
            }
            Err(error) => {
                println!("- line {line}: skipped ({error})");
                tally.skipped += 1;
            }
        }
    }
    print!("{}", tally.render());

    Ok(())
}

fn source_label(outcome: &ScoringOutcome) -> &'static str {
    match (outcome.source, outcome.used_fallback) {
        (ScoringSource::Remote, _) => "prediction service",
        (ScoringSource::Local, true) => "local fallback",
        (ScoringSource::Local, false) => "local",
    }
}

pub(crate) fn render_outcome(outcome: &ScoringOutcome) -> String {
    let category = outcome.category();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Risk score: {}/100 ({}) via {}",
        outcome.result.risk_score,
        category.label(),
        source_label(outcome)
    );
    if let Some(warning) = &outcome.warning {
        let _ = writeln!(out, "Warning: {warning}");
    }

    if outcome.result.risk_factors.is_empty() {
        let _ = writeln!(out, "No significant risk factors identified");
    } else {
        let _ = writeln!(out, "Risk factors:");
        for factor in &outcome.result.risk_factors {
            let _ = writeln!(out, "  - {factor}");
        }
    }

    let _ = writeln!(out, "Recommendations:");
    for recommendation in category.recommendations() {
        let _ = writeln!(out, "  - {recommendation}");
    }
    out
}

pub(crate) fn render_breakdown(breakdown: &ScoreBreakdown) -> String {
    let mut out = String::from("Local point breakdown:\n");
    for component in &breakdown.components {
        let name = component.field.wire_name();
        let _ = write!(out, "  {name:<24} {:>5.1}", component.points);
        if let Some(factor) = component.factor {
            let _ = write!(out, "  {factor}");
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "  raw {:.1} / 150 -> {}",
        breakdown.raw_score,
        breakdown.normalized_score()
    );
    out
}

fn render_batch_line(line: usize, outcome: &ScoringOutcome) -> String {
    format!(
        "- line {line}: {:>3} {:<9} via {} | {} factor(s)",
        outcome.result.risk_score,
        outcome.category().label(),
        source_label(outcome),
        outcome.result.risk_factors.len()
    )
}

#[derive(Debug, Default)]
struct BatchTally {
    // Low, Moderate, High, Very High.
    categories: [usize; 4],
    fallbacks: usize,
    skipped: usize,
}

const CATEGORY_ORDER: [RiskCategory; 4] = [
    RiskCategory::Low,
    RiskCategory::Moderate,
    RiskCategory::High,
    RiskCategory::VeryHigh,
];

impl BatchTally {
    fn record(&mut self, outcome: &ScoringOutcome) {
        let category = outcome.category();
        if let Some(slot) = CATEGORY_ORDER.iter().position(|c| *c == category) {
            self.categories[slot] += 1;
        }
        if outcome.used_fallback {
            self.fallbacks += 1;
        }
    }

    fn render(&self) -> String {
        let scored: usize = self.categories.iter().sum();
        let mut out = format!(
            "\n{scored} scored | {} local fallback(s) | {} skipped\n",
            self.fallbacks, self.skipped
        );
        for (category, count) in CATEGORY_ORDER.iter().zip(self.categories) {
            let _ = writeln!(out, "  {:<9} {count}", category.label());
        }
        out
    }
}
