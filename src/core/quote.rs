use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use crate::core::models::{PendingJobRequest, Quote};
use crate::core::slot_clock::SlotClock;
use crate::core::types::DateKey;
use crate::errors::{Error, Result};

pub const DEFAULT_UNIT_PRICE: u32 = 1500;
pub const DEFAULT_QUOTE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct QuoteEngine {
    unit_price: u32,
    delay: Duration,
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::new(
            DEFAULT_UNIT_PRICE,
            Duration::from_millis(DEFAULT_QUOTE_DELAY_MS),
        )
    }
}

impl QuoteEngine {
    pub fn new(unit_price: u32, delay: Duration) -> Self {
        Self { unit_price, delay }
    }

    pub fn unit_price(&self) -> u32 {
        self.unit_price
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Price and time a request immediately.
    pub fn compute(&self, request: &PendingJobRequest, date: DateKey) -> Quote {
        let job_type_label = request.job_type().label().to_string();
        Quote {
            date,
            urgency_label: request.urgency().label().to_string(),
            summary: format!("{} ({})", request.name(), job_type_label),
            job_type_label,
            cost: request.slots().len() as u64 * self.unit_price as u64,
            start_time: SlotClock::slot_to_time(request.first_slot()),
            priority_reason: request.urgency().priority_reason(),
        }
    }

    /// Start pricing on a worker that answers after the configured delay.
    pub fn request_quote(&self, request: PendingJobRequest, date: DateKey) -> QuoteTicket {
        let (tx, rx) = mpsc::channel();
        let engine = self.clone();
        thread::spawn(move || {
            thread::sleep(engine.delay);
            let quote = engine.compute(&request, date);
            let _ = tx.send(quote);
        });
        QuoteTicket { rx }
    }
}

/// Handle to a quote still being computed.
#[derive(Debug)]
pub struct QuoteTicket {
    rx: Receiver<Quote>,
}

impl QuoteTicket {
    /// Block until the quote arrives.
    pub fn wait(self) -> Result<Quote> {
        self.rx
            .recv()
            .map_err(|_| Error::Domain("Quote worker stopped before answering.".into()))
    }
}
