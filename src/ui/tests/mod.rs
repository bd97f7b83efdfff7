mod display_data_tests;
mod timeline_view_tests;

use crate::core::types::{DateKey, SlotIndex};
use chrono::NaiveDate;

pub(super) fn day() -> DateKey {
    DateKey(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
}

pub(super) fn slot(n: i64) -> SlotIndex {
    SlotIndex::try_new(n).unwrap()
}
