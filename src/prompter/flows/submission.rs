use std::io::{self, Write};

use crate::core::context::AppContext;
use crate::core::models::{PendingJobRequest, Quote};
use crate::core::quote::QuoteTicket;
use crate::core::types::{JobType, Urgency};
use crate::errors::Result;
use crate::extensions::enums::valid_csv;
use crate::extensions::string::StripQuotes;
use crate::logging::LogTarget;
use crate::prompter::models::{Flow, FlowCtrl, SubmissionForm, SubmissionState};
use crate::ui::ansi::STYLE_RESET;
use crate::ui::chrome::UiChrome;
use crate::ui::display_manager::DisplayManager;

const FORM_HINT: &str = "name <text> | type <job type> | urgency <level> | quote | back";
const QUOTE_HINT: &str = "confirm | cancel";

/// Form -> Loading -> Quote -> Done. Cancelling a quote goes back to the form
/// with everything typed so far.
pub struct SubmissionFlow<'a> {
    ctx: &'a mut AppContext,
    dm: DisplayManager,
    chrome: UiChrome,
    state: SubmissionState,
    form: SubmissionForm,
    loading: Option<(PendingJobRequest, QuoteTicket)>,
    quoted: Option<(PendingJobRequest, Quote)>,
}

impl<'a> SubmissionFlow<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        Self {
            ctx,
            dm: DisplayManager::new(),
            chrome: UiChrome::new(),
            state: SubmissionState::Form,
            form: SubmissionForm::default(),
            loading: None,
            quoted: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SubmissionState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn form(&self) -> &SubmissionForm {
        &self.form
    }

    #[cfg(test)]
    pub(crate) fn quote(&self) -> Option<&Quote> {
        self.quoted.as_ref().map(|(_, q)| q)
    }

    fn render_form(&self) -> Result<()> {
        let mut out = io::stdout();
        self.dm.render_submission_form(
            &self.form.name,
            self.form.job_type,
            self.form.urgency,
            self.ctx.active_date(),
            &self.ctx.selection,
            &mut out,
        )?;
        writeln!(out, "{FORM_HINT}")?;
        self.chrome.print_prompt("submit> ");
        Ok(())
    }

    fn render_quote(&self) -> Result<()> {
        if let Some((_, quote)) = &self.quoted {
            let mut out = io::stdout();
            self.dm.render_quote(quote, &mut out)?;
            writeln!(out, "{QUOTE_HINT}")?;
        }
        self.chrome.print_prompt("quote> ");
        Ok(())
    }

    /// Block until the pending quote arrives.
    fn await_quote(&mut self) {
        let Some((request, ticket)) = self.loading.take() else {
            self.state = SubmissionState::Form;
            return;
        };
        println!("Requesting quote...");
        match ticket.wait() {
            Ok(quote) => {
                self.ctx.logger.info(
                    format!(
                        "Quote ready for '{}': {} from {}.",
                        request.name(),
                        quote.cost_label(),
                        quote.time_label()
                    ),
                    LogTarget::FileOnly,
                );
                self.quoted = Some((request, quote));
                self.state = SubmissionState::Quote;
            }
            Err(err) => {
                self.ctx
                    .logger
                    .error(err.to_string(), LogTarget::ConsoleAndFile);
                self.state = SubmissionState::Form;
            }
        }
    }

    fn reject(&self, msg: impl AsRef<str>) {
        self.ctx.logger.warn(msg, LogTarget::ConsoleAndFile);
    }
}

impl<'a> Flow for SubmissionFlow<'a> {
    fn render(&mut self) -> Result<()> {
        if self.state == SubmissionState::Loading {
            self.await_quote();
        }
        match self.state {
            SubmissionState::Form => self.render_form(),
            SubmissionState::Quote => self.render_quote(),
            SubmissionState::Loading | SubmissionState::Done => Ok(()),
        }
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        print!("{STYLE_RESET}");
        let _ = io::stdout().flush();
        match self.state {
            SubmissionState::Form => Ok(self.handle_form_input(input)),
            SubmissionState::Quote => Ok(self.handle_quote_input(input)),
            SubmissionState::Loading => Ok(FlowCtrl::Continue),
            SubmissionState::Done => Ok(FlowCtrl::Finish),
        }
    }
}

impl<'a> SubmissionFlow<'a> {
    fn handle_form_input(&mut self, input: &str) -> FlowCtrl {
        let (word, rest) = match input.trim().split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (input.trim(), ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => {}
            "name" => self.form.name = rest.strip_quotes().to_string(),
            "type" => match JobType::try_from(rest) {
                Ok(t) => self.form.job_type = Some(t),
                Err(err) => self.reject(err.to_string()),
            },
            "urgency" => match Urgency::try_from(rest) {
                Ok(u) => self.form.urgency = u,
                Err(err) => self.reject(err.to_string()),
            },
            "quote" => self.request_quote(),
            "back" => {
                self.ctx
                    .logger
                    .info("Submission form closed.", LogTarget::FileOnly);
                self.state = SubmissionState::Done;
                return FlowCtrl::Finish;
            }
            other => self.reject(format!(
                "Unknown form command: '{other}'. Use {FORM_HINT}. Job types: {}",
                valid_csv::<JobType>()
            )),
        }
        FlowCtrl::Continue
    }

    fn request_quote(&mut self) {
        let request = match PendingJobRequest::new(
            &self.form.name,
            self.form.job_type,
            self.form.urgency,
            &self.ctx.selection,
        ) {
            Ok(request) => request,
            Err(err) => {
                self.reject(format!("Submission rejected. {err}"));
                return;
            }
        };

        let date = self.ctx.active_date();
        self.ctx.logger.info(
            format!(
                "Quote requested for '{}' ({} slot(s) on {}).",
                request.name(),
                request.slots().len(),
                date
            ),
            LogTarget::FileOnly,
        );
        let ticket = self.ctx.quotes.request_quote(request.clone(), date);
        self.loading = Some((request, ticket));
        self.state = SubmissionState::Loading;
    }

    fn handle_quote_input(&mut self, input: &str) -> FlowCtrl {
        match input.trim().to_ascii_lowercase().as_str() {
            "confirm" => self.confirm(),
            "cancel" => {
                if let Some((request, _)) = self.quoted.take() {
                    self.ctx.logger.info(
                        format!("Quote for '{}' discarded.", request.name()),
                        LogTarget::FileOnly,
                    );
                }
                self.state = SubmissionState::Form;
                FlowCtrl::Continue
            }
            _ => {
                println!("Type 'confirm' to queue the job or 'cancel' to go back.");
                FlowCtrl::Continue
            }
        }
    }

    fn confirm(&mut self) -> FlowCtrl {
        let Some((request, quote)) = self.quoted.take() else {
            self.state = SubmissionState::Form;
            return FlowCtrl::Continue;
        };
        match self.ctx.confirm(&request, &quote) {
            Ok(entry) => {
                self.ctx.logger.info(
                    format!(
                        "Queued {} '{}' {}-{}.",
                        entry.id, entry.name, entry.start_time, entry.end_time
                    ),
                    LogTarget::ConsoleOnly,
                );
                self.redraw_timelines(true);
                self.state = SubmissionState::Done;
                FlowCtrl::Finish
            }
            Err(err) => {
                self.ctx.logger.error(err.to_string(), LogTarget::ConsoleOnly);
                self.redraw_timelines(false);
                self.state = SubmissionState::Form;
                FlowCtrl::Continue
            }
        }
    }

    /// Repaint the booking grid and, after a commit, the dashboard so new
    /// reservations show up straight away.
    fn redraw_timelines(&self, with_dashboard: bool) {
        let mut out = io::stdout();
        let mut draw = || -> io::Result<()> {
            if with_dashboard {
                self.dm
                    .render_dashboard(&self.ctx.usage_grid(), &self.ctx.queue, &mut out)?;
                writeln!(out)?;
            }
            self.dm
                .render_booking(&self.ctx.booking_grid(), &self.ctx.selection, &mut out)
        };
        if let Err(err) = draw() {
            self.ctx
                .logger
                .error(format!("Unable to draw timeline. {err}"), LogTarget::ConsoleAndFile);
        }
    }
}
