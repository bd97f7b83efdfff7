use std::io;

use crate::arg::args::Arg;
use crate::command::manual::ManualCatalog;
use crate::command::policies::flag_policy::{FlagDecision, FlagPolicy};
use crate::core::context::AppContext;
use crate::core::models::JobId;
use crate::core::types::SlotIndex;
use crate::errors::{Error, Result};
use crate::logging::LogTarget;
use crate::prompter::flows::config_edit::ConfigEditFlow;
use crate::prompter::flows::submission::SubmissionFlow;
use crate::prompter::prompter::Prompter;
use crate::ui::display_manager::DisplayManager;

pub struct CommandCore<'a> {
    pub args: &'a [Arg],
    pub flag_policy: FlagPolicy,
}
impl<'a> CommandCore<'a> {
    pub fn new(args: &'a [Arg], flag_policy: FlagPolicy) -> Self {
        Self { args, flag_policy }
    }
}

mod sealed {
    use super::CommandCore;

    pub trait Sealed<'a> {
        fn core(&self) -> &CommandCore<'a>;
    }
}

pub trait Command<'a>: sealed::Sealed<'a> {
    fn usage(&self) -> String;
    fn perform(&self, ctx: &mut AppContext) -> Result<()>;

    fn execute(&self, ctx: &mut AppContext) -> Result<()> {
        let core = self.core();
        match core.flag_policy.evaluate(core.args) {
            FlagDecision::ShortCircuitUsage => {
                ctx.logger
                    .info(format!("Usage: {}", self.usage()), LogTarget::ConsoleOnly);
                Ok(())
            }
            FlagDecision::Continue => self.perform(ctx),
            FlagDecision::Error(e) => Err(with_usage(e, &self.usage())),
        }
    }
}

pub type CommandDyn<'a> = Box<dyn Command<'a> + 'a>;

/// Append the usage line so the prompt loop can print it under the error.
fn with_usage(err: Error, usage: &str) -> Error {
    let msg = match err {
        Error::Parse(msg) => msg,
        other => other.to_string(),
    };
    Error::Parse(format!("{msg}\nUsage: {usage}"))
}

macro_rules! sealed_command {
    ($name:ident) => {
        impl<'a> sealed::Sealed<'a> for $name<'a> {
            fn core(&self) -> &CommandCore<'a> {
                &self.core
            }
        }
    };
}

// =========
// Overview
// =========

pub struct DashboardCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> DashboardCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(DashboardCommand);

impl<'a> Command<'a> for DashboardCommand<'a> {
    fn usage(&self) -> String {
        "dashboard    # Today's usage grid and the job queue".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        DisplayManager::new().render_dashboard(&ctx.usage_grid(), &ctx.queue, &mut io::stdout())?;
        Ok(())
    }
}

pub struct QueueCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> QueueCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(QueueCommand);

impl<'a> Command<'a> for QueueCommand<'a> {
    fn usage(&self) -> String {
        "queue        # Job queue, newest first".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        DisplayManager::new().render_queue(&ctx.queue, &mut io::stdout())?;
        Ok(())
    }
}

pub struct ShowCommand<'a> {
    core: CommandCore<'a>,
    shortcut: Option<JobId>,
}

impl<'a> ShowCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(1)),
            shortcut: None,
        }
    }

    /// `#2044` typed on its own.
    pub fn for_id(id: JobId, args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
            shortcut: Some(id),
        }
    }

    fn job_id(&self) -> Result<JobId> {
        if let Some(id) = self.shortcut {
            return Ok(id);
        }
        match self.core.args.first() {
            Some(Arg::JobId(id)) => Ok(*id),
            Some(Arg::Int(n)) => u32::try_from(*n)
                .map(JobId)
                .map_err(|_| Error::Parse(format!("Invalid job id: {n}"))),
            Some(other) => Err(with_usage(
                Error::Parse(format!("Expected a job id, got {other}.")),
                &self.usage(),
            )),
            None => Err(with_usage(
                Error::Parse("Missing job id.".into()),
                &self.usage(),
            )),
        }
    }
}

sealed_command!(ShowCommand);

impl<'a> Command<'a> for ShowCommand<'a> {
    fn usage(&self) -> String {
        "show <#id>   # Status detail for a queued job (or type #<id>)".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let view = ctx.queue.select_entry(self.job_id()?)?;
        DisplayManager::new().render_detail(&view, &mut io::stdout())?;
        Ok(())
    }
}

// ==========
// Selection
// ==========

pub struct DatesCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> DatesCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(DatesCommand);

impl<'a> Command<'a> for DatesCommand<'a> {
    fn usage(&self) -> String {
        "dates        # Bookable days; * marks the active one".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        DisplayManager::new().render_dates(&ctx.dates, &ctx.reservations, &mut io::stdout())?;
        Ok(())
    }
}

pub struct DateCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> DateCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(1)),
        }
    }
}

sealed_command!(DateCommand);

impl<'a> Command<'a> for DateCommand<'a> {
    fn usage(&self) -> String {
        "date <idx|date>  # Change the active day (clears the selection)".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let changed = match self.core.args.first() {
            Some(Arg::Int(n)) => {
                let idx = usize::try_from(*n)
                    .map_err(|_| Error::Parse(format!("Invalid date index: {n}")))?;
                ctx.change_date_index(idx)?
            }
            Some(Arg::Date(date)) => ctx.change_date(*date)?,
            _ => {
                return Err(with_usage(
                    Error::Parse("Expected a date index or a date.".into()),
                    &self.usage(),
                ));
            }
        };

        let msg = if changed {
            format!("Active date is now {}.", ctx.active_date())
        } else {
            format!("{} is already the active date.", ctx.active_date())
        };
        ctx.logger.info(msg, LogTarget::ConsoleOnly);
        DisplayManager::new().render_booking(&ctx.booking_grid(), &ctx.selection, &mut io::stdout())?;
        Ok(())
    }
}

pub struct GridCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> GridCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(GridCommand);

impl<'a> Command<'a> for GridCommand<'a> {
    fn usage(&self) -> String {
        "grid         # Booking grid for the active day".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        DisplayManager::new().render_booking(&ctx.booking_grid(), &ctx.selection, &mut io::stdout())?;
        Ok(())
    }
}

pub struct ToggleCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ToggleCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(usize::MAX)),
        }
    }

    /// Slots in the order they were typed; ranges expand ascending.
    fn slots(&self) -> Result<Vec<SlotIndex>> {
        if self.core.args.is_empty() {
            return Err(with_usage(
                Error::Parse("Missing slot(s).".into()),
                &self.usage(),
            ));
        }
        let mut slots = Vec::new();
        for arg in self.core.args {
            match arg {
                Arg::Int(n) => slots.push(SlotIndex::try_new(*n)?),
                Arg::SlotRange(first, last) => {
                    for n in first.get()..=last.get() {
                        slots.push(SlotIndex::try_new(n as i64)?);
                    }
                }
                other => {
                    return Err(with_usage(
                        Error::Parse(format!("Expected a slot or slot range, got {other}.")),
                        &self.usage(),
                    ));
                }
            }
        }
        Ok(slots)
    }
}

sealed_command!(ToggleCommand);

impl<'a> Command<'a> for ToggleCommand<'a> {
    fn usage(&self) -> String {
        "toggle <slot|a-b>...  # Select or unselect slots on the booking grid".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let slots = self.slots()?;
        let result = ctx.toggle_slots(&slots);
        DisplayManager::new().render_booking(&ctx.booking_grid(), &ctx.selection, &mut io::stdout())?;
        result.map(|_| ())
    }
}

pub struct ClearCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ClearCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(ClearCommand);

impl<'a> Command<'a> for ClearCommand<'a> {
    fn usage(&self) -> String {
        "clear        # Drop every selected slot".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let dropped = ctx.selection.len();
        ctx.selection.clear();
        ctx.logger.info(
            format!("Cleared {dropped} selected slot(s)."),
            LogTarget::ConsoleAndFile,
        );
        Ok(())
    }
}

// ========
// Flows
// ========

pub struct SubmitCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> SubmitCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(SubmitCommand);

impl<'a> Command<'a> for SubmitCommand<'a> {
    fn usage(&self) -> String {
        "submit       # Fill in a job, get a quote and confirm it".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        Prompter::new().run(SubmissionFlow::new(ctx), false)
    }
}

pub struct ConfigCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(ConfigCommand);

impl<'a> Command<'a> for ConfigCommand<'a> {
    fn usage(&self) -> String {
        "config       # View and edit configuration".into()
    }
    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        Prompter::new().run(ConfigEditFlow::new(ctx), true)
    }
}

// =====
// Misc
// =====

pub struct LogCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> LogCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(0)),
        }
    }
}

sealed_command!(LogCommand);

impl<'a> Command<'a> for LogCommand<'a> {
    fn usage(&self) -> String {
        "log          # Print current session log to console".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        match ctx.logger.session_lines() {
            Ok(lines) if lines.is_empty() => println!("No logs"),
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(err) => eprintln!("Unable to read log file: {err}"),
        }
        Ok(())
    }
}

pub struct ManCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ManCommand<'a> {
    pub fn new(args: &'a [Arg]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_and_max(1)),
        }
    }

    fn topic_arg(&self) -> Result<Option<String>> {
        match self.core.args.first() {
            None => Ok(None),
            Some(Arg::Name(name)) => Ok(Some(name.clone())),
            Some(other) => Err(Error::Parse(format!(
                "Unsupported manual topic: {other}. Usage: man [topic]"
            ))),
        }
    }
}

sealed_command!(ManCommand);

impl<'a> Command<'a> for ManCommand<'a> {
    fn usage(&self) -> String {
        "man [topic]  # Show manual pages".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<()> {
        let topic = self.topic_arg()?;
        let page = ManualCatalog::new().page_for(topic.as_deref())?;
        ctx.logger.info(page.render(), LogTarget::ConsoleOnly);
        Ok(())
    }
}
