use crate::config::{ConfigKey, ConfigRows};
use crate::core::context::AppContext;
use crate::core::types::BoolFormat;
use crate::errors::Result;
use crate::extensions::enums::valid_csv;
use crate::logging::LogTarget;
use crate::prompter::models::{ConfigState, Flow, FlowCtrl};
use crate::ui::ansi::STYLE_RESET;
use crate::ui::chrome::UiChrome;
use crate::ui::display_manager::DisplayManager;
use std::io::Write;
use std::str::FromStr;

/// Table-driven editor for the config file. Every accepted value is saved
/// right away and the quote engine picks up price and delay changes.
pub struct ConfigEditFlow<'a> {
    ctx: &'a mut AppContext,
    dm: DisplayManager,
    chrome: UiChrome,
    state: ConfigState,
    rows_cache: ConfigRows,
    selected_idx: Option<usize>,
    frame_width: usize,
}

impl<'a> ConfigEditFlow<'a> {
    pub fn new(ctx: &'a mut AppContext) -> Self {
        let rows = ctx.config.rows();
        Self {
            ctx,
            dm: DisplayManager::new(),
            chrome: UiChrome::new(),
            state: ConfigState::ShowTable,
            rows_cache: rows,
            selected_idx: None,
            frame_width: 60,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ConfigState {
        self.state.clone()
    }

    #[cfg(test)]
    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.selected_idx
    }

    fn selected_row(&self) -> Option<(&str, &str, &str)> {
        self.selected_idx
            .and_then(|i| self.rows_cache.get(i))
            .map(|(k, d, v)| (k.as_str(), d.as_str(), v.as_str()))
    }

    fn possible_options(&self) -> Option<String> {
        let (key, _, _) = self.selected_row()?;
        match ConfigKey::from_str(key).ok()? {
            ConfigKey::UnitPrice => Some("a whole number of KRW above 0".into()),
            ConfigKey::QuoteDelayMs => Some("milliseconds, 0 for an instant quote".into()),
            ConfigKey::RandomSeed => {
                Some("a whole number, or empty for a fresh seed (used on next start)".into())
            }
            ConfigKey::FileLoggingEnabled => Some(format!(
                "{} (True writes log messages to the session file)",
                valid_csv::<BoolFormat>()
            )),
            ConfigKey::Requester => None,
        }
    }

    fn say(&self, message: &str) {
        self.chrome
            .println_centered_in_box(message, self.frame_width);
    }

    fn render_prompt(&self, message: &str) {
        self.say(message);
        self.chrome
            .print_centered_prefix_plain("> ", self.frame_width);
    }

    fn render_new_value_prompt(&self, show_details: bool) {
        if let (true, Some((_, desc, val))) = (show_details, self.selected_row()) {
            self.say(desc);
            self.say(&format!("Current value: {val}"));
        }
        if let Some(opts) = self.possible_options() {
            self.say(&format!("Possible options: {opts}"));
        }
        self.render_prompt("Enter new value: ");
    }

    fn render_table(&mut self) {
        self.chrome.clear_screen();
        self.frame_width = self.dm.display_config_centered(&self.ctx.config);
        self.render_prompt("Would you like to edit a setting? (Y/N)");
    }
}

impl<'a> Flow for ConfigEditFlow<'a> {
    fn render(&mut self) -> Result<()> {
        match self.state {
            ConfigState::ShowTable => self.render_table(),
            ConfigState::SelectId => self.render_prompt(&format!(
                "Enter ID (0..{}): ",
                self.rows_cache.len().saturating_sub(1)
            )),
            ConfigState::ShowCurrent => {
                self.render_new_value_prompt(true);
                self.state = ConfigState::AskNewValue;
            }
            ConfigState::AskNewValue => self.render_new_value_prompt(false),
            ConfigState::Done => {}
        }
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<FlowCtrl> {
        print!("{STYLE_RESET}");
        let _ = std::io::stdout().flush();
        match self.state {
            ConfigState::ShowTable => Ok(self.handle_table_input(input)),
            ConfigState::SelectId => Ok(self.handle_select_id_input(input)),
            // advanced by render()
            ConfigState::ShowCurrent => Ok(FlowCtrl::Continue),
            ConfigState::AskNewValue => {
                self.handle_new_value_input(input);
                Ok(FlowCtrl::Continue)
            }
            ConfigState::Done => Ok(FlowCtrl::Finish),
        }
    }
}

impl<'a> ConfigEditFlow<'a> {
    fn handle_table_input(&mut self, input: &str) -> FlowCtrl {
        match input.to_ascii_lowercase().as_str() {
            "y" | "yes" => self.state = ConfigState::SelectId,
            "n" | "no" => {
                self.state = ConfigState::Done;
                return FlowCtrl::Finish;
            }
            _ => self.say("Please enter Y or N."),
        }
        FlowCtrl::Continue
    }

    fn handle_select_id_input(&mut self, input: &str) -> FlowCtrl {
        let len = self.rows_cache.len();
        if len == 0 {
            self.say("No config items to edit.");
            self.state = ConfigState::Done;
            return FlowCtrl::Finish;
        }

        match input.parse::<usize>() {
            Ok(v) if v < len => {
                self.selected_idx = Some(v);
                self.state = ConfigState::ShowCurrent;
            }
            _ => self.say(&format!(
                "Invalid ID. Please enter 0..{}.",
                len.saturating_sub(1)
            )),
        }
        FlowCtrl::Continue
    }

    fn handle_new_value_input(&mut self, input: &str) {
        let Some(idx) = self.selected_idx else {
            self.state = ConfigState::SelectId;
            return;
        };

        if let Err(e) = self.ctx.config.set_by_index(idx, input) {
            self.say(&format!("Error: {e}"));
            self.state = ConfigState::AskNewValue;
            return;
        }

        if let Some((key, old, new)) = self.ctx.config.take_last_change() {
            self.say(&format!("Updated {key}."));
            self.log_config_change(&key, &old, &new);
        }
        self.ctx
            .logger
            .set_file_logging_enabled(self.ctx.config.file_logging_enabled());
        self.ctx.refresh_quote_engine();

        self.rows_cache = self.ctx.config.rows();
        self.state = ConfigState::ShowTable;
    }

    /// A FILE_LOGGING_ENABLED change is written to the file in both directions.
    fn log_config_change(&self, key: &str, old: &str, new: &str) {
        let msg = format!("Config '{key}' updated: '{old}' -> '{new}'");
        let logger = &self.ctx.logger;
        if matches!(ConfigKey::from_str(key), Ok(ConfigKey::FileLoggingEnabled)) {
            logger.set_file_logging_enabled(true);
            logger.info(msg, LogTarget::FileOnly);
            logger.set_file_logging_enabled(self.ctx.config.file_logging_enabled());
        } else {
            logger.info(msg, LogTarget::FileOnly);
        }
    }
}
