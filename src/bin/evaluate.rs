//! Offline accuracy run over the labelled emails.
//!
//! Uses the same `TAGGER_*` environment as the server. Pass `--json` to print
//! the full report as JSON instead of the human-readable summary.

use anyhow::Context;

use email_tagger::evaluation::{EvaluationReport, evaluate};
use email_tagger::service::Service;

/// Characters of email text shown for a miss.
const PREVIEW_CHARS: usize = 50;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let json = std::env::args().skip(1).any(|a| a == "--json");

    let service = Service::from_env().context("loading tagging service")?;
    let report = evaluate(&service.store, &service.engine);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &EvaluationReport) {
    println!(
        "Found customers: {:?}",
        report
            .customers
            .iter()
            .map(|c| c.customer_id.as_str())
            .collect::<Vec<_>>()
    );

    for customer in &report.customers {
        println!("\n--- Processing Customer: {} ---", customer.customer_id);
        println!("Valid Tags: {:?}", customer.valid_tags);

        for outcome in &customer.outcomes {
            let status = if outcome.correct { "✅" } else { "❌" };
            println!(
                "Email ID: {} | GT: {} | Pred: {} {}",
                outcome.email_id, outcome.ground_truth, outcome.predicted, status
            );
            if !outcome.correct {
                let preview: String = outcome.text.chars().take(PREVIEW_CHARS).collect();
                println!("   -> Text: {}...", preview);
                println!(
                    "   -> Explanation: {}",
                    outcome.explanation.as_deref().unwrap_or("none")
                );
            }
        }
    }

    println!("\n========================================");
    println!("Total Emails: {}", report.total());
    println!("Accuracy: {:.2}%", report.accuracy());
    println!("========================================");
}
