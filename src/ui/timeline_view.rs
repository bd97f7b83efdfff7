use crate::core::grid::{CellState, GridCell, GridMode, TimelineGrid};
use crate::ui::ansi::{FG_DARK_GRAY, SELECTED_STYLE, paint};

/// Text rendering of a [`TimelineGrid`]: one line per four-hour band.
///
/// ```text
/// 2099-01-01 (booking)
/// 00:00  --   01   02   03   04   05   06   07
/// 04:00   08   09 [10] [11] [12]  13   14   15
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineView {
    colored: bool,
}

impl TimelineView {
    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn colored() -> Self {
        Self { colored: true }
    }

    pub fn render(&self, grid: &TimelineGrid) -> Vec<String> {
        let mode = match grid.mode() {
            GridMode::ReadOnly => "usage",
            GridMode::Interactive => "booking",
        };
        let mut lines = vec![format!("{} ({mode})", grid.date())];

        for band in grid.bands() {
            let cells: String = band.cells.iter().map(|c| self.cell(c)).collect();
            lines.push(format!("{:02}:00 {cells}", band.start_hour));
        }

        lines.push(self.legend(grid.mode()));
        lines.push(self.counts(grid));
        lines
    }

    fn cell(&self, cell: &GridCell) -> String {
        let n = cell.slot.get();
        match cell.state {
            CellState::Reserved => self.style(FG_DARK_GRAY, " -- "),
            CellState::Available => format!(" {n:02} "),
            CellState::Selected => self.style(SELECTED_STYLE, &format!("[{n:02}]")),
        }
    }

    fn style(&self, style: &str, text: &str) -> String {
        if self.colored {
            paint(style, text)
        } else {
            text.to_string()
        }
    }

    fn legend(&self, mode: GridMode) -> String {
        match mode {
            GridMode::ReadOnly => "Legend: NN available, -- reserved".to_string(),
            GridMode::Interactive => {
                "Legend: NN available, [NN] selected, -- reserved".to_string()
            }
        }
    }

    fn counts(&self, grid: &TimelineGrid) -> String {
        let reserved = grid.count(CellState::Reserved);
        let available = grid.count(CellState::Available);
        match grid.mode() {
            GridMode::ReadOnly => format!("Reserved: {reserved}  Available: {available}"),
            GridMode::Interactive => format!(
                "Reserved: {reserved}  Available: {available}  Selected: {}",
                grid.count(CellState::Selected)
            ),
        }
    }
}
