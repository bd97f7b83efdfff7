use super::{day, slot};
use crate::core::grid::{GridMode, TimelineGrid};
use crate::core::reservation::ReservationStore;
use crate::core::selection::SelectionState;
use crate::ui::timeline_view::TimelineView;
use crate::ui::width_util::WidthUtil;

fn fixture() -> (ReservationStore, SelectionState) {
    let mut store = ReservationStore::new();
    store.reserve(day(), &[slot(0), slot(1)]);
    let mut selection = SelectionState::new();
    selection.toggle(slot(10));
    (store, selection)
}

#[test]
fn booking_grid_renders_bands_and_marks() {
    let (store, selection) = fixture();
    let grid = TimelineGrid::build(day(), &store, &selection, GridMode::Interactive);
    let lines = TimelineView::plain().render(&grid);

    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "2099-01-01 (booking)");
    assert_eq!(lines[1], "00:00  --  --  02  03  04  05  06  07 ");
    assert_eq!(lines[2], "04:00  08  09 [10] 11  12  13  14  15 ");
    assert!(lines[6].starts_with("20:00  40 "));
    assert_eq!(lines[8], "Reserved: 2  Available: 45  Selected: 1");
}

#[test]
fn usage_grid_ignores_selection() {
    let (store, selection) = fixture();
    let grid = TimelineGrid::build(day(), &store, &selection, GridMode::ReadOnly);
    let lines = TimelineView::plain().render(&grid);

    assert_eq!(lines[0], "2099-01-01 (usage)");
    assert!(!lines.iter().any(|l| l.contains('[')));
    assert_eq!(lines[8], "Reserved: 2  Available: 46");
}

#[test]
fn rendering_is_repeatable() {
    let (store, selection) = fixture();
    let grid = TimelineGrid::build(day(), &store, &selection, GridMode::Interactive);
    let view = TimelineView::colored();
    assert_eq!(view.render(&grid), view.render(&grid));

    let rebuilt = TimelineGrid::build(day(), &store, &selection, GridMode::Interactive);
    assert_eq!(view.render(&grid), view.render(&rebuilt));
}

#[test]
fn colored_rendering_matches_plain_once_stripped() {
    let (store, selection) = fixture();
    let grid = TimelineGrid::build(day(), &store, &selection, GridMode::Interactive);
    let plain = TimelineView::plain().render(&grid);
    let colored: Vec<String> = TimelineView::colored()
        .render(&grid)
        .iter()
        .map(|l| WidthUtil::strip_ansi(l))
        .collect();
    assert_eq!(plain, colored);
}
