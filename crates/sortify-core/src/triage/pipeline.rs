//! Screening and the extraction pipeline.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use super::model::{ActionableTask, FetchedMessage, PipelineOutcome, PipelineStats, Screening};
use crate::extract::{NO_DEADLINE, TaskExtractor, is_actionable, normalize_deadline};
use crate::relay::{is_relay_subject, parse_relay_body};
use crate::scoring::{Scorer, ScoringInput};

/// Decides what to do with a message without calling the model.
///
/// Relay messages are recognised by subject and parsed; everything else is
/// scored.
#[must_use]
pub fn screen(scorer: &Scorer, message: &FetchedMessage) -> Screening {
    if is_relay_subject(&message.subject) {
        return Screening::Relay {
            task: parse_relay_body(&message.body),
        };
    }

    let input = ScoringInput::new(&message.subject, &message.body).with_sender(&message.from);
    let assessment = scorer.assess(&input);

    let screening = if assessment.is_important() {
        Screening::Important {
            score: assessment.score,
        }
    } else {
        Screening::Skipped {
            score: assessment.score,
        }
    };

    debug!(
        subject = %message.subject,
        score = assessment.score,
        self_sent = assessment.self_sent,
        rules = assessment.contributions.len(),
        decision = screening.as_str(),
        "Scored message"
    );

    screening
}

/// Per-message result inside a run.
enum Step {
    Relayed(ActionableTask),
    Extracted(ActionableTask),
    Skipped,
    NotActionable,
}

/// Turns fetched messages into actionable tasks.
///
/// Messages are handled one at a time, in order. The extractor is only
/// called for messages the scorer keeps.
#[derive(Debug, Clone)]
pub struct TaskPipeline<E> {
    scorer: Scorer,
    extractor: E,
    today: NaiveDate,
}

impl<E: TaskExtractor> TaskPipeline<E> {
    /// Creates a pipeline that judges deadlines against the local date.
    #[must_use]
    pub fn new(scorer: Scorer, extractor: E) -> Self {
        Self {
            scorer,
            extractor,
            today: Local::now().date_naive(),
        }
    }

    /// Overrides the date deadlines are compared against.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// The scorer used for screening.
    #[must_use]
    pub const fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// The model client.
    #[must_use]
    pub const fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Processes a batch of messages.
    ///
    /// Extractor failures never abort the batch: a failed task extraction
    /// counts as "no actionable tasks" and a failed deadline extraction as
    /// "no deadline".
    pub async fn process(&self, messages: &[FetchedMessage]) -> PipelineOutcome {
        info!("Processing {} messages", messages.len());

        let mut outcome = PipelineOutcome::default();

        for message in messages {
            outcome.stats.processed += 1;

            match self.process_one(message, &mut outcome.stats).await {
                Step::Relayed(task) => {
                    outcome.stats.relayed += 1;
                    outcome.tasks.push(task);
                }
                Step::Extracted(task) => {
                    outcome.stats.extracted += 1;
                    outcome.tasks.push(task);
                }
                Step::Skipped => outcome.stats.skipped += 1,
                Step::NotActionable => outcome.stats.not_actionable += 1,
            }
        }

        info!(
            tasks = outcome.tasks.len(),
            relayed = outcome.stats.relayed,
            extracted = outcome.stats.extracted,
            skipped = outcome.stats.skipped,
            not_actionable = outcome.stats.not_actionable,
            extractor_errors = outcome.stats.extractor_errors,
            "Finished processing messages"
        );

        outcome
    }

    async fn process_one(&self, message: &FetchedMessage, stats: &mut PipelineStats) -> Step {
        debug!(
            "Processing message from {} with subject {:?}",
            message.from, message.subject
        );

        match screen(&self.scorer, message) {
            Screening::Relay { task } => {
                let deadline = if task.deadline.is_empty() {
                    NO_DEADLINE.to_string()
                } else {
                    task.deadline.clone()
                };
                Step::Relayed(ActionableTask {
                    subject: message.subject.clone(),
                    from: message.from.clone(),
                    summary: task.summary(),
                    deadline,
                })
            }
            Screening::Skipped { score } => {
                debug!("Skipping {:?} (score {score})", message.subject);
                Step::Skipped
            }
            Screening::Important { .. } => {
                let summary = match self.extractor.extract_task(&message.body).await {
                    Ok(summary) => summary.trim().to_string(),
                    Err(e) => {
                        warn!("Task extraction failed for {:?}: {e}", message.subject);
                        stats.extractor_errors += 1;
                        return Step::NotActionable;
                    }
                };

                if !is_actionable(&summary) {
                    return Step::NotActionable;
                }

                let deadline = match self.extractor.extract_deadline(&summary).await {
                    Ok(raw) => normalize_deadline(&raw, self.today)
                        .map_or_else(|| NO_DEADLINE.to_string(), |d| d.to_string()),
                    Err(e) => {
                        warn!("Deadline extraction failed for {:?}: {e}", message.subject);
                        stats.extractor_errors += 1;
                        NO_DEADLINE.to_string()
                    }
                };

                Step::Extracted(ActionableTask {
                    subject: message.subject.clone(),
                    from: message.from.clone(),
                    summary,
                    deadline,
                })
            }
        }
    }
}
