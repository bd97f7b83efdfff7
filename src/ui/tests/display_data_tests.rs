use super::{day, slot};
use crate::core::models::{DetailView, JobId, Quote};
use crate::core::queue::JobQueue;
use crate::core::reservation::ReservationStore;
use crate::core::selection::{DateStrip, SelectionState};
use crate::core::types::{JobType, Urgency};
use crate::ui::display_data::DisplayDataBuilder;
use crate::ui::width_util::WidthUtil;

fn value<'a>(pairs: &'a [(String, String)], label: &str) -> &'a str {
    pairs
        .iter()
        .find(|(k, _)| k == label)
        .map(|(_, v)| v.as_str())
        .unwrap()
}

#[test]
fn queue_rows_follow_queue_order_with_painted_status() {
    let rows = DisplayDataBuilder::new().queue_rows(&JobQueue::with_fixtures());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "#2043");
    assert_eq!(WidthUtil::strip_ansi(&rows[0][3]), "Waiting");
    assert_ne!(rows[0][3], "Waiting");
    assert_eq!(rows[1][4], "09:00-10:30");
}

#[test]
fn date_rows_mark_active_day_and_counts() {
    let mut store = ReservationStore::new();
    store.reserve(day().offset(1), &[slot(3), slot(4)]);
    let mut strip = DateStrip::new(day(), 3);
    strip.select_index(1, &mut SelectionState::new()).unwrap();

    let rows = DisplayDataBuilder::new().date_rows(&strip, &store);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["0", "2099-01-01", "1/1", "0", ""]);
    assert_eq!(rows[1], vec!["1", "2099-01-02", "1/2", "2", "*"]);
}

#[test]
fn detail_pairs_follow_status() {
    let queue = JobQueue::with_fixtures();
    let data = DisplayDataBuilder::new();

    let running = data.detail_pairs(&queue.select_entry(JobId(2041)).unwrap());
    assert_eq!(value(&running, "Progress"), "[#############-------] 65%");
    assert_eq!(value(&running, "Estimated end"), "13:30");
    assert!(!running.iter().any(|(k, _)| k == "Actions"));

    let failed = data.detail_pairs(&queue.select_entry(JobId(2042)).unwrap());
    assert_eq!(value(&failed, "Failure reason"), "GPU out of memory on node 3");
    assert_eq!(value(&failed, "Actions"), "Retry");

    let waiting: DetailView = queue.select_entry(JobId(2043)).unwrap();
    let waiting = data.detail_pairs(&waiting);
    assert_eq!(value(&waiting, "Queue position"), "2");
}

#[test]
fn quote_pairs_show_cost_and_start() {
    let quote = Quote {
        date: day(),
        job_type_label: "Rendering".into(),
        urgency_label: "High".into(),
        summary: "demo (Rendering)".into(),
        cost: 4500,
        start_time: "05:00".into(),
        priority_reason: "reason".into(),
    };
    let pairs = DisplayDataBuilder::new().quote_pairs(&quote);
    assert_eq!(value(&pairs, "Cost"), "approx. 4500 KRW");
    assert_eq!(value(&pairs, "Start"), "2099-01-01 05:00 onward");
    assert_eq!(value(&pairs, "Job"), "demo (Rendering)");
}

#[test]
fn form_pairs_show_placeholders_until_filled() {
    let data = DisplayDataBuilder::new();
    let empty = SelectionState::new();
    let pairs = data.form_pairs("  ", None, Urgency::default(), day(), &empty);
    assert_eq!(value(&pairs, "Name"), "-");
    assert_eq!(value(&pairs, "Type"), "-");
    assert_eq!(value(&pairs, "Urgency"), "Medium");
    assert_eq!(value(&pairs, "Slots"), "none selected");

    let mut selection = SelectionState::new();
    for n in [12, 10, 11] {
        selection.toggle(slot(n));
    }
    let pairs = data.form_pairs("demo", Some(JobType::Render), Urgency::High, day(), &selection);
    assert_eq!(value(&pairs, "Type"), "Rendering");
    assert_eq!(value(&pairs, "Slots"), "10, 11, 12 (05:00-06:30)");
}
