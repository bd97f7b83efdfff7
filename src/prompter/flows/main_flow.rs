use std::io::{self, Write};

use crate::arg::arg_parse_strategy::CommandArgParser;
use crate::command::command_parser::CommandParser;
use crate::command::manual::ManualCatalog;
use crate::core::context::AppContext;
use crate::errors::{Error, Result};
use crate::logging::{LogTarget, Logger};
use crate::prompter::models::{Flow, FlowCtrl};
use crate::ui::ansi::STYLE_RESET;
use crate::ui::chrome::UiChrome;
use crate::ui::display_manager::DisplayManager;

/// Where a typed line stopped on its way to a command.
#[derive(Debug)]
enum Stage {
    Arguments,
    Resolution,
    Execution,
}

#[derive(Debug)]
struct Failure {
    stage: Stage,
    err: Error,
}

impl Failure {
    fn at(stage: Stage) -> impl FnOnce(Error) -> Failure {
        move |err| Failure { stage, err }
    }
}

/// The `> ` prompt: one line, one command, then back to the prompt.
pub struct MainFlow<'a> {
    ctx: &'a mut AppContext,
    args: CommandArgParser,
    commands: CommandParser,
    dm: DisplayManager,
    chrome: UiChrome,
    logger: Logger,
}

impl<'a> MainFlow<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        let logger = ctx.logger.clone();
        Self {
            ctx,
            args: CommandArgParser::new(),
            commands: CommandParser::new(),
            dm: DisplayManager::new(),
            chrome: UiChrome::new(),
            logger,
        }
    }
}

impl<'a> Flow for MainFlow<'a> {
    fn render(&mut self) -> Result<()> {
        if !self.ctx.startup_displayed {
            self.welcome();
            self.ctx.startup_displayed = true;
        }
        self.chrome.print_prompt("> ");
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        self.chrome.print_prompt_bottom_padding();
        println!();
        print!("{STYLE_RESET}");
        let _ = io::stdout().flush();

        let line = input.trim();
        match line {
            "" => {}
            _ if line.eq_ignore_ascii_case("exit") => return Ok(FlowCtrl::Finish),
            _ => {
                if let Err(failure) = self.dispatch(line) {
                    self.report(line, failure);
                }
            }
        }
        Ok(FlowCtrl::Continue)
    }
}

impl<'a> MainFlow<'a> {
    /// Banner, where things live, then the usage grid and queue.
    fn welcome(&self) {
        self.chrome.print_banner();
        let topics = ManualCatalog::new().topics();
        let notes = [
            String::new(),
            "Use 'man <topic>' for command-specific details.".to_string(),
            format!("Available topics: {}", topics.join(", ")),
            String::new(),
            format!("Config path: {}", self.ctx.config_path.display()),
            format!("Logs path: {}", self.ctx.logs_dir.display()),
            String::new(),
        ];
        let mut out = io::stdout();
        let drawn = notes
            .iter()
            .try_for_each(|note| writeln!(out, "{note}"))
            .and_then(|_| {
                self.dm
                    .render_dashboard(&self.ctx.usage_grid(), &self.ctx.queue, &mut out)
            })
            .and_then(|_| writeln!(out));
        if let Err(err) = drawn {
            self.logger
                .error(format!("Unable to draw dashboard. {err}"), LogTarget::ConsoleAndFile);
        }
    }

    fn dispatch(&mut self, line: &str) -> std::result::Result<(), Failure> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let raw: Vec<String> = words.map(str::to_string).collect();

        let args = self
            .args
            .parse(name, &raw)
            .map_err(Failure::at(Stage::Arguments))?;
        let cmd = self
            .commands
            .parse(name, &args)
            .map_err(Failure::at(Stage::Resolution))?;

        // `log` would otherwise show up in its own output.
        if !name.eq_ignore_ascii_case("log") {
            self.logger
                .info(format!("Command run: {line}"), LogTarget::FileOnly);
        }
        cmd.execute(self.ctx).map_err(Failure::at(Stage::Execution))
    }

    fn report(&self, line: &str, Failure { stage, err }: Failure) {
        let name = line.split_whitespace().next().unwrap_or_default();
        match (stage, err) {
            (Stage::Arguments, err) => self.logger.error(
                format!("Argument parsing failed for '{line}'. {err}"),
                LogTarget::ConsoleAndFile,
            ),
            (Stage::Resolution, err) => self.logger.error(
                format!("Command resolution failed for '{name}'. {err}"),
                LogTarget::ConsoleAndFile,
            ),
            // Rejected clicks are already in the session file; show what is still free.
            (Stage::Execution, err @ Error::SlotUnavailable { .. }) => {
                self.logger.warn(err.to_string(), LogTarget::ConsoleOnly);
                let grid = self.ctx.booking_grid();
                let drawn = self
                    .dm
                    .render_booking(&grid, &self.ctx.selection, &mut io::stdout());
                if let Err(err) = drawn {
                    self.logger
                        .error(format!("Unable to draw timeline. {err}"), LogTarget::FileOnly);
                }
            }
            (Stage::Execution, err) => {
                let text = err.to_string();
                let prefix = format!("Command execution failed for '{name}'.");
                match text.split_once("\nUsage:") {
                    // Usage text is for the console only.
                    Some((head, _)) => {
                        self.logger
                            .error(format!("{prefix} {text}"), LogTarget::ConsoleOnly);
                        self.logger
                            .error(format!("{prefix} {}", head.trim()), LogTarget::FileOnly);
                    }
                    None => self
                        .logger
                        .error(format!("{prefix} {text}"), LogTarget::ConsoleAndFile),
                }
            }
        }
    }
}
