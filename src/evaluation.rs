//! Batch accuracy measurement over the labelled emails.
//!
//! For every customer: classify each email's subject + body against the
//! customer's tags and compare with the ground-truth tag.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::store::DataStore;
use crate::tagging::{ClassificationEngine, Source};

/// Outcome for one email.
#[derive(Debug, Clone, Serialize)]
pub struct EmailOutcome {
    pub email_id: String,
    /// Text the engine classified.
    pub text: String,
    pub ground_truth: String,
    pub predicted: String,
    pub source: Source,
    pub correct: bool,
    pub explanation: Option<String>,
}

/// All outcomes for one customer.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerReport {
    pub customer_id: String,
    pub valid_tags: Vec<String>,
    pub outcomes: Vec<EmailOutcome>,
}

impl CustomerReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn correct(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct).count()
    }

    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct(), self.total())
    }
}

/// Aggregate result of an evaluation run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub customers: Vec<CustomerReport>,
    pub generated_at: DateTime<Utc>,
}

impl EvaluationReport {
    pub fn total(&self) -> usize {
        self.customers.iter().map(CustomerReport::total).sum()
    }

    pub fn correct(&self) -> usize {
        self.customers.iter().map(CustomerReport::correct).sum()
    }

    /// Percentage of correct predictions, 0.0 when nothing was evaluated.
    pub fn accuracy(&self) -> f64 {
        accuracy(self.correct(), self.total())
    }
}

/// `correct / total * 100`, defined as 0 for an empty run.
pub fn accuracy(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

/// Classify every email of every configured customer.
pub fn evaluate(store: &DataStore, engine: &ClassificationEngine) -> EvaluationReport {
    let customers = store.customers();
    info!(count = customers.len(), "Evaluating customers");

    let mut reports = Vec::with_capacity(customers.len());
    for customer_id in customers {
        let valid_tags = store.valid_tags(customer_id);
        let outcomes: Vec<EmailOutcome> = store
            .emails(Some(customer_id))
            .into_iter()
            .map(|email| {
                let text = email.classification_text();
                let result = engine.predict(&text, customer_id, valid_tags);
                let correct = result.tag == email.ground_truth_tag;
                debug!(
                    email_id = %email.id,
                    ground_truth = %email.ground_truth_tag,
                    predicted = %result.tag,
                    correct,
                    "Evaluated email"
                );
                EmailOutcome {
                    email_id: email.id.clone(),
                    text,
                    ground_truth: email.ground_truth_tag.clone(),
                    predicted: result.tag,
                    source: result.source,
                    correct,
                    explanation: result.explanation,
                }
            })
            .collect();

        let report = CustomerReport {
            customer_id: customer_id.to_string(),
            valid_tags: valid_tags.to_vec(),
            outcomes,
        };
        info!(
            customer_id,
            total = report.total(),
            correct = report.correct(),
            "Customer evaluated"
        );
        reports.push(report);
    }

    let report = EvaluationReport {
        customers: reports,
        generated_at: Utc::now(),
    };
    info!(
        total = report.total(),
        correct = report.correct(),
        accuracy = report.accuracy(),
        "Evaluation complete"
    );
    report
}
