use crate::config::Config;
use crate::core::grid::TimelineGrid;
use crate::core::models::{DetailView, Quote};
use crate::core::queue::JobQueue;
use crate::core::reservation::ReservationStore;
use crate::core::selection::{DateStrip, SelectionState};
use crate::core::types::{DateKey, JobType, Urgency};
use crate::ui::display_data::DisplayDataBuilder;
use crate::ui::table_printer::TablePrinter;
use crate::ui::timeline_view::TimelineView;
use crate::ui::width_util::WidthUtil;
use std::io::{self, Write};

const QUEUE_HEADERS: [&str; 5] = ["ID", "NAME", "REQUESTER", "STATUS", "TIME"];
const DATE_HEADERS: [&str; 5] = ["IDX", "DATE", "LABEL", "RESERVED", "ACTIVE"];
const CONFIG_HEADERS: [&str; 4] = ["ID", "KEY", "DESCRIPTION", "VALUE"];

#[derive(Debug, Default, Clone)]
pub struct DisplayManager {
    pub printer: TablePrinter,
    pub util: WidthUtil,
    pub data: DisplayDataBuilder,
    pub timeline: TimelineView,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self {
            timeline: TimelineView::colored(),
            ..Self::default()
        }
    }

    /// No color codes in grid output; tables keep their status colors.
    pub fn plain() -> Self {
        Self {
            timeline: TimelineView::plain(),
            ..Self::default()
        }
    }

    pub fn render_config<W: Write + ?Sized>(&self, config: &Config, out: &mut W) -> io::Result<()> {
        let rows = self.data.config_rows(config);
        self.printer.render_table(
            "Config",
            &CONFIG_HEADERS,
            &rows,
            Some("No config items found."),
            None,
            out,
        )
    }

    /// Print the config table centered in the terminal; returns its width.
    pub fn display_config_centered(&self, config: &Config) -> usize {
        let rows = self.data.config_rows(config);
        let table_w = self
            .printer
            .compute_table_width(&CONFIG_HEADERS, &rows)
            .max(self.util.visible_width("CONFIG"));

        let printer = self.printer.with_left_pad(self.util.center_pad(table_w));
        let _ = printer.render_table(
            "Config",
            &CONFIG_HEADERS,
            &rows,
            Some("No config items found."),
            Some(table_w),
            &mut io::stdout(),
        );
        table_w
    }

    pub fn render_grid<W: Write + ?Sized>(&self, grid: &TimelineGrid, out: &mut W) -> io::Result<()> {
        for line in self.timeline.render(grid) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Interactive grid followed by what is currently picked.
    pub fn render_booking<W: Write + ?Sized>(
        &self,
        grid: &TimelineGrid,
        selection: &SelectionState,
        out: &mut W,
    ) -> io::Result<()> {
        self.render_grid(grid, out)?;
        writeln!(out, "Selection: {}", self.data.selection_summary(selection))
    }

    pub fn render_queue<W: Write + ?Sized>(&self, queue: &JobQueue, out: &mut W) -> io::Result<()> {
        let rows = self.data.queue_rows(queue);
        self.printer.render_table(
            "Job queue",
            &QUEUE_HEADERS,
            &rows,
            Some("No jobs in the queue."),
            None,
            out,
        )
    }

    /// Today's usage grid above the job queue.
    pub fn render_dashboard<W: Write + ?Sized>(
        &self,
        usage: &TimelineGrid,
        queue: &JobQueue,
        out: &mut W,
    ) -> io::Result<()> {
        let queue_rows = self.data.queue_rows(queue);
        let width = self.printer.compute_table_width(&QUEUE_HEADERS, &queue_rows);
        self.printer.render_banner("Usage", width, out)?;
        self.render_grid(usage, out)?;
        writeln!(out)?;
        self.render_queue(queue, out)
    }

    pub fn render_dates<W: Write + ?Sized>(
        &self,
        strip: &DateStrip,
        store: &ReservationStore,
        out: &mut W,
    ) -> io::Result<()> {
        let rows = self.data.date_rows(strip, store);
        self.printer
            .render_table("Dates", &DATE_HEADERS, &rows, None, None, out)
    }

    pub fn render_detail<W: Write + ?Sized>(&self, view: &DetailView, out: &mut W) -> io::Result<()> {
        let pairs = self.data.detail_pairs(view);
        self.printer.render_key_values(&view.title, &pairs, out)
    }

    pub fn render_quote<W: Write + ?Sized>(&self, quote: &Quote, out: &mut W) -> io::Result<()> {
        let pairs = self.data.quote_pairs(quote);
        self.printer.render_key_values("Quote", &pairs, out)
    }

    pub fn render_submission_form<W: Write + ?Sized>(
        &self,
        name: &str,
        job_type: Option<JobType>,
        urgency: Urgency,
        date: DateKey,
        selection: &SelectionState,
        out: &mut W,
    ) -> io::Result<()> {
        let pairs = self
            .data
            .form_pairs(name, job_type, urgency, date, selection);
        self.printer.render_key_values("New job", &pairs, out)
    }
}
