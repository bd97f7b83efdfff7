use crate::core::selection::SelectionState;
use crate::core::types::{DateKey, JobType, SlotIndex, Urgency};
use crate::core::validation::is_not_empty;
use crate::errors::{Error, Result};
use std::fmt;

// ==================
// PendingJobRequest
// ==================

/// A fully validated submission waiting for its quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingJobRequest {
    name: String,
    job_type: JobType,
    urgency: Urgency,
    slots: Vec<SlotIndex>,
}

impl PendingJobRequest {
    /// Refuses to build unless the name is non-blank, a type is chosen and
    /// at least one slot is selected.
    pub fn new(
        name: &str,
        job_type: Option<JobType>,
        urgency: Urgency,
        selection: &SelectionState,
    ) -> Result<Self> {
        is_not_empty(name, "job name")?;
        let job_type = job_type
            .ok_or_else(|| Error::validation("Please select a job type."))?;
        if selection.is_empty() {
            return Err(Error::validation(
                "Please select at least one time slot to reserve.",
            ));
        }
        Ok(Self {
            name: name.trim().to_string(),
            job_type,
            urgency,
            slots: selection.slots().to_vec(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_type(&self) -> JobType {
        self.job_type
    }

    pub fn urgency(&self) -> Urgency {
        self.urgency
    }

    pub fn slots(&self) -> &[SlotIndex] {
        &self.slots
    }

    pub fn first_slot(&self) -> SlotIndex {
        self.slots[0]
    }

    pub fn last_slot(&self) -> SlotIndex {
        self.slots[self.slots.len() - 1]
    }
}

// ======
// Quote
// ======

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub date: DateKey,
    pub job_type_label: String,
    pub urgency_label: String,
    pub summary: String,
    pub cost: u64,
    pub start_time: String,
    pub priority_reason: String,
}

impl Quote {
    pub fn time_label(&self) -> String {
        format!("{} {} onward", self.date, self.start_time)
    }

    pub fn cost_label(&self) -> String {
        format!("approx. {} KRW", self.cost)
    }
}

// ==========
// Job queue
// ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Waiting {
        reason: String,
        queue_position: String,
        wait_minutes: String,
    },
    Running {
        progress_percent: u8,
        estimated_end_time: String,
    },
    Failed {
        failure_reason: String,
    },
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Waiting { .. } => "Waiting",
            JobStatus::Running { .. } => "Running",
            JobStatus::Failed { .. } => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQueueEntry {
    pub id: JobId,
    pub name: String,
    pub requester: String,
    pub status: JobStatus,
    pub start_time: String,
    pub end_time: String,
}

impl fmt::Display for JobQueueEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job(id={}, name='{}', status={}, time={}-{})",
            self.id,
            self.name,
            self.status.label(),
            self.start_time,
            self.end_time
        )
    }
}

// ============
// Detail view
// ============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailBody {
    Waiting {
        reason: String,
        queue_position: String,
        wait_minutes: String,
    },
    Running {
        progress_percent: u8,
        estimated_end_time: String,
    },
    Failed {
        failure_reason: String,
    },
}

/// What the status popup shows for a queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub body: DetailBody,
    pub actions: Vec<DetailAction>,
}

impl From<&JobQueueEntry> for DetailView {
    fn from(entry: &JobQueueEntry) -> Self {
        let title = format!("[{}] Job progress", entry.name);
        let (body, actions) = match &entry.status {
            JobStatus::Waiting {
                reason,
                queue_position,
                wait_minutes,
            } => (
                DetailBody::Waiting {
                    reason: reason.clone(),
                    queue_position: queue_position.clone(),
                    wait_minutes: wait_minutes.clone(),
                },
                Vec::new(),
            ),
            JobStatus::Running {
                progress_percent,
                estimated_end_time,
            } => (
                DetailBody::Running {
                    progress_percent: *progress_percent,
                    estimated_end_time: estimated_end_time.clone(),
                },
                Vec::new(),
            ),
            JobStatus::Failed { failure_reason } => (
                DetailBody::Failed {
                    failure_reason: failure_reason.clone(),
                },
                vec![DetailAction::Retry],
            ),
        };
        Self {
            title,
            body,
            actions,
        }
    }
}
