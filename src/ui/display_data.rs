use crate::config::Config;
use crate::core::models::{DetailAction, DetailBody, DetailView, JobStatus, Quote};
use crate::core::queue::JobQueue;
use crate::core::reservation::ReservationStore;
use crate::core::selection::{DateStrip, SelectionState};
use crate::core::slot_clock::SlotClock;
use crate::core::types::{DateKey, JobType, Urgency};
use crate::ui::ansi::{FG_GREEN, FG_RED, FG_YELLOW, paint};

const PROGRESS_BAR_WIDTH: usize = 20;

pub type Pairs = Vec<(String, String)>;

/// Turns domain state into table rows and label/value pairs.
#[derive(Debug, Default, Clone)]
pub struct DisplayDataBuilder;

impl DisplayDataBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn queue_rows(&self, queue: &JobQueue) -> Vec<Vec<String>> {
        queue
            .entries()
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.requester.clone(),
                    paint_status(&e.status),
                    format!("{}-{}", e.start_time, e.end_time),
                ]
            })
            .collect()
    }

    pub fn date_rows(&self, strip: &DateStrip, store: &ReservationStore) -> Vec<Vec<String>> {
        strip
            .days()
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let active = if i == strip.active_index() { "*" } else { "" };
                vec![
                    i.to_string(),
                    d.to_string(),
                    d.short_label(),
                    store.reserved_count(*d).to_string(),
                    active.to_string(),
                ]
            })
            .collect()
    }

    pub fn config_rows(&self, config: &Config) -> Vec<Vec<String>> {
        config
            .rows()
            .iter()
            .enumerate()
            .map(|(i, (k, d, v))| vec![i.to_string(), k.clone(), d.clone(), v.clone()])
            .collect()
    }

    pub fn detail_pairs(&self, view: &DetailView) -> Pairs {
        let mut pairs: Pairs = match &view.body {
            DetailBody::Waiting {
                reason,
                queue_position,
                wait_minutes,
            } => vec![
                pair("Status", &paint(FG_YELLOW, "Waiting")),
                pair("Reason", reason),
                pair("Queue position", queue_position),
                pair("Expected wait (min)", wait_minutes),
            ],
            DetailBody::Running {
                progress_percent,
                estimated_end_time,
            } => vec![
                pair("Status", &paint(FG_GREEN, "Running")),
                pair("Progress", &progress_bar(*progress_percent)),
                pair("Estimated end", estimated_end_time),
            ],
            DetailBody::Failed { failure_reason } => vec![
                pair("Status", &paint(FG_RED, "Failed")),
                pair("Failure reason", failure_reason),
            ],
        };

        if !view.actions.is_empty() {
            let actions = view
                .actions
                .iter()
                .map(|a| match a {
                    DetailAction::Retry => "Retry",
                })
                .collect::<Vec<_>>()
                .join(", ");
            pairs.push(pair("Actions", &actions));
        }
        pairs
    }

    pub fn quote_pairs(&self, quote: &Quote) -> Pairs {
        vec![
            pair("Job", &quote.summary),
            pair("Type", &quote.job_type_label),
            pair("Urgency", &quote.urgency_label),
            pair("Start", &quote.time_label()),
            pair("Cost", &quote.cost_label()),
            pair("Priority", &quote.priority_reason),
        ]
    }

    /// Current values of the submission form.
    pub fn form_pairs(
        &self,
        name: &str,
        job_type: Option<JobType>,
        urgency: Urgency,
        date: DateKey,
        selection: &SelectionState,
    ) -> Pairs {
        let name = if name.trim().is_empty() { "-" } else { name };
        let job_type = job_type.map(|t| t.label()).unwrap_or("-");
        vec![
            pair("Name", name),
            pair("Type", job_type),
            pair("Urgency", urgency.label()),
            pair("Date", &date.to_string()),
            pair("Slots", &self.selection_summary(selection)),
        ]
    }

    /// `10, 11, 12 (05:00-06:30)`, or a hint when nothing is picked.
    pub fn selection_summary(&self, selection: &SelectionState) -> String {
        match (selection.slots().first(), selection.slots().last()) {
            (Some(first), Some(last)) => {
                let (start, end) = SlotClock::slot_range_label(*first, *last);
                let slots = selection
                    .slots()
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{slots} ({start}-{end})")
            }
            _ => "none selected".to_string(),
        }
    }
}

fn pair(label: &str, value: &str) -> (String, String) {
    (label.to_string(), value.to_string())
}

fn paint_status(status: &JobStatus) -> String {
    let style = match status {
        JobStatus::Waiting { .. } => FG_YELLOW,
        JobStatus::Running { .. } => FG_GREEN,
        JobStatus::Failed { .. } => FG_RED,
    };
    paint(style, status.label())
}

fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * PROGRESS_BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}
