use crate::core::models::{
    DetailView, JobId, JobQueueEntry, JobStatus, PendingJobRequest, Quote,
};
use crate::core::reservation::ReservationStore;
use crate::core::selection::SelectionState;
use crate::core::slot_clock::SlotClock;
use crate::core::types::DateKey;
use crate::errors::{Error, Result};

pub const WAITING_REASON: &str = "submitted after AI quote approval";
pub const WAITING_POSITION: &str = "last";
pub const WAITING_MINUTES: &str = "undetermined";

/// Submitted jobs, newest first. Entries are never removed.
#[derive(Debug, Default, Clone)]
pub struct JobQueue {
    entries: Vec<JobQueueEntry>,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue with the rows that already exist when a session starts.
    pub fn with_fixtures() -> Self {
        let entries = vec![
            JobQueueEntry {
                id: JobId(2043),
                name: "thermal-sim-batch".into(),
                requester: "Kim Minji".into(),
                status: JobStatus::Waiting {
                    reason: "higher-priority job running".into(),
                    queue_position: "2".into(),
                    wait_minutes: "30".into(),
                },
                start_time: "14:00".into(),
                end_time: "16:00".into(),
            },
            JobQueueEntry {
                id: JobId(2042),
                name: "render-final-cut".into(),
                requester: "Lee Seojun".into(),
                status: JobStatus::Failed {
                    failure_reason: "GPU out of memory on node 3".into(),
                },
                start_time: "09:00".into(),
                end_time: "10:30".into(),
            },
            JobQueueEntry {
                id: JobId(2041),
                name: "vision-model-train".into(),
                requester: "Park Jiwoo".into(),
                status: JobStatus::Running {
                    progress_percent: 65,
                    estimated_end_time: "13:30".into(),
                },
                start_time: "08:00".into(),
                end_time: "13:30".into(),
            },
        ];
        Self { entries }
    }

    pub fn entries(&self) -> &[JobQueueEntry] {
        &self.entries
    }

    pub fn head(&self) -> Option<&JobQueueEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: JobId) -> Result<&JobQueueEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or(Error::JobNotFound(id.0))
    }

    fn next_id(&self) -> JobId {
        let max = self.entries.iter().map(|e| e.id.0).max().unwrap_or(2043);
        JobId(max + 1)
    }

    /// Commit an approved quote: reserve its slots, clear the selection and
    /// put a Waiting entry at the head of the queue. Nothing changes when any
    /// requested slot got reserved in the meantime.
    pub fn confirm(
        &mut self,
        request: &PendingJobRequest,
        quote: &Quote,
        date: DateKey,
        requester: &str,
        store: &mut ReservationStore,
        selection: &mut SelectionState,
    ) -> Result<&JobQueueEntry> {
        if quote.date != date {
            return Err(Error::Domain(format!(
                "Quote was issued for {} but the active date is {}.",
                quote.date, date
            )));
        }
        let conflicts = store.conflicts(date, request.slots());
        if !conflicts.is_empty() {
            return Err(Error::SlotUnavailable {
                date,
                slots: conflicts,
            });
        }

        let (start_time, end_time) =
            SlotClock::slot_range_label(request.first_slot(), request.last_slot());
        let entry = JobQueueEntry {
            id: self.next_id(),
            name: request.name().to_string(),
            requester: requester.to_string(),
            status: JobStatus::Waiting {
                reason: WAITING_REASON.into(),
                queue_position: WAITING_POSITION.into(),
                wait_minutes: WAITING_MINUTES.into(),
            },
            start_time,
            end_time,
        };

        store.reserve(date, request.slots());
        selection.clear();
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    pub fn select_entry(&self, id: JobId) -> Result<DetailView> {
        self.get(id).map(DetailView::from)
    }
}
