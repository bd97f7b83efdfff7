use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display as DisplayDerive, EnumIter as EnumIterDerive, EnumString};

use crate::core::grid::{BAND_HOURS, CELLS_PER_BAND};
use crate::core::slot_clock::{SLOT_MINUTES, SLOTS_PER_DAY};
use crate::core::types::{DateKey, GlobalCommand, JobType, Urgency};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, DisplayDerive, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ManualTopic {
    General,
    Dashboard,
    Dates,
    Date,
    Grid,
    Toggle,
    Clear,
    Submit,
    Queue,
    Show,
    Config,
    Log,
    Man,
    Slots,
    Jobs,
}

impl ManualTopic {
    pub fn try_from(input: &str) -> Result<Self> {
        Self::from_str(input.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unsupported manual topic: '{}'. Valid topics: {}",
                input.trim(),
                valid_csv::<ManualTopic>()
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct ManualSection {
    title: String,
    body: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ManualPage {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPage {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_section(
            "NAME",
            &[format!("{} - {}", self.name, self.summary)],
            &mut out,
        );
        for section in &self.sections {
            self.write_section(&section.title, &section.body, &mut out);
        }
        out.trim_end().to_string()
    }

    fn write_section(&self, title: &str, lines: &[String], out: &mut String) {
        out.push_str(&title.to_uppercase());
        out.push('\n');
        for line in lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
}

pub struct ManualPageBuilder {
    name: String,
    summary: String,
    sections: Vec<ManualSection>,
}

impl ManualPageBuilder {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, title: &str, body: Vec<String>) -> Self {
        self.sections.push(ManualSection {
            title: title.to_string(),
            body,
        });
        self
    }

    pub fn build(self) -> ManualPage {
        ManualPage {
            name: self.name,
            summary: self.summary,
            sections: self.sections,
        }
    }
}

pub struct ManualCatalog;

impl ManualCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn page_for(&self, topic: Option<&str>) -> Result<ManualPage> {
        let topic = match topic {
            None => ManualTopic::General,
            Some(name) => ManualTopic::try_from(name)?,
        };
        Ok(self.build_page(topic))
    }

    pub fn topics(&self) -> Vec<String> {
        ManualTopic::iter().map(|t| t.to_string()).collect()
    }

    fn build_page(&self, topic: ManualTopic) -> ManualPage {
        match topic {
            ManualTopic::General => self.general_page(),
            ManualTopic::Dashboard => self.command_page(
                GlobalCommand::Dashboard,
                "Show today's usage and the job queue.",
                "dashboard",
                lines(&[
                    "Prints the read-only usage grid for the first day of the window,",
                    "then the job queue table. Nothing on the usage grid can be selected.",
                ]),
            ),
            ManualTopic::Dates => self.command_page(
                GlobalCommand::Dates,
                "List the bookable days.",
                "dates",
                lines(&[
                    "One row per day with its index, reserved slot count and an * on the active day.",
                    "Use the index or the date with 'date' to switch days.",
                ]),
            ),
            ManualTopic::Date => ManualPageBuilder::new(
                GlobalCommand::Date.to_string(),
                "Change the active day.",
            )
            .section(
                "SYNOPSIS",
                lines(&["date <index>", "date <date>"]),
            )
            .section(
                "DESCRIPTION",
                vec![
                    "Switching to another day drops the current selection.".to_string(),
                    "Choosing the day that is already active changes nothing.".to_string(),
                    DateKey::usage(),
                ],
            )
            .build(),
            ManualTopic::Grid => self.command_page(
                GlobalCommand::Grid,
                "Show the booking grid for the active day.",
                "grid",
                lines(&[
                    "Selected slots show as [NN], reserved ones as --.",
                    "See 'man slots' for how the grid is laid out.",
                ]),
            ),
            ManualTopic::Toggle => ManualPageBuilder::new(
                GlobalCommand::Toggle.to_string(),
                "Select or unselect slots on the booking grid.",
            )
            .section(
                "SYNOPSIS",
                lines(&["toggle <slot> [slot...]", "toggle <first>-<last>"]),
            )
            .section(
                "DESCRIPTION",
                lines(&[
                    "Each slot flips between selected and available, in the order given.",
                    "Reserved slots cannot be selected; toggling stops at the first one.",
                    "Slots toggled before that stay as they are.",
                ]),
            )
            .section("EXAMPLES", lines(&["toggle 10 11 12", "toggle 10-12"]))
            .build(),
            ManualTopic::Clear => self.command_page(
                GlobalCommand::Clear,
                "Drop every selected slot.",
                "clear",
                lines(&["Reservations and the queue are not touched."]),
            ),
            ManualTopic::Submit => ManualPageBuilder::new(
                GlobalCommand::Submit.to_string(),
                "Turn the selection into a queued job.",
            )
            .section("SYNOPSIS", lines(&["submit"]))
            .section(
                "FORM",
                lines(&[
                    "name <text>        # Job name (required)",
                    "type <job type>    # See 'man jobs' (required)",
                    "urgency <level>    # low, medium (default) or high",
                    "quote              # Check the form and request a quote",
                    "back               # Leave without submitting",
                ]),
            )
            .section(
                "QUOTE",
                lines(&[
                    "confirm            # Reserve the slots and queue the job",
                    "cancel             # Back to the form, input kept",
                ]),
            )
            .section(
                "DESCRIPTION",
                lines(&[
                    "At least one slot must be selected on the active day.",
                    "The quote costs UNIT_PRICE per slot and arrives after QUOTE_DELAY_MS.",
                    "Confirming fails when a slot was reserved in the meantime.",
                ]),
            )
            .build(),
            ManualTopic::Queue => self.command_page(
                GlobalCommand::Queue,
                "Show the job queue.",
                "queue",
                lines(&["Newest jobs first. Use 'show <#id>' for the detail view."]),
            ),
            ManualTopic::Show => ManualPageBuilder::new(
                GlobalCommand::Show.to_string(),
                "Show the status detail for a job.",
            )
            .section("SYNOPSIS", lines(&["show <#id>", "show <id>", "#<id>"]))
            .section(
                "DESCRIPTION",
                lines(&[
                    "Waiting jobs show the reason, queue position and expected wait.",
                    "Running jobs show progress and the estimated end time.",
                    "Failed jobs show the failure reason.",
                ]),
            )
            .build(),
            ManualTopic::Config => self.command_page(
                GlobalCommand::Config,
                "View or edit configuration values.",
                "config",
                lines(&[
                    "Opens an interactive configuration editor.",
                    "Changes are written back to the config file right away.",
                ]),
            ),
            ManualTopic::Log => self.command_page(
                GlobalCommand::Log,
                "Print the current session log to the console.",
                "log",
                lines(&[
                    "Shows the session log file contents if it exists.",
                    "Does not create a log file when one is missing.",
                ]),
            ),
            ManualTopic::Man => self.command_page(
                GlobalCommand::Man,
                "Show manual pages for commands and topics.",
                "man [topic]",
                vec![
                    format!("Topics: {}", self.topics().join(", ")),
                    "Use 'man' with no topic for the general manual.".to_string(),
                ],
            ),
            ManualTopic::Slots => self.slots_page(),
            ManualTopic::Jobs => self.jobs_page(),
        }
    }

    fn general_page(&self) -> ManualPage {
        ManualPageBuilder::new("slotdesk", "Half-hour bookings and a job queue.")
            .section("SYNOPSIS", lines(&["<command> [args]"]))
            .section("COMMANDS", general_command_lines())
            .section(
                "TOPICS",
                vec![
                    "Use 'man <topic>' for command-specific details.".to_string(),
                    format!("Available topics: {}", self.topics().join(", ")),
                ],
            )
            .build()
    }

    fn command_page(
        &self,
        command: GlobalCommand,
        summary: &str,
        synopsis: &str,
        description: Vec<String>,
    ) -> ManualPage {
        ManualPageBuilder::new(command.to_string(), summary)
            .section("SYNOPSIS", vec![synopsis.to_string()])
            .section("DESCRIPTION", description)
            .build()
    }

    fn slots_page(&self) -> ManualPage {
        ManualPageBuilder::new("slots", "How a day is divided.")
            .section(
                "DESCRIPTION",
                vec![
                    format!(
                        "A day has {SLOTS_PER_DAY} slots of {SLOT_MINUTES} minutes, numbered 0 to {}.",
                        SLOTS_PER_DAY - 1
                    ),
                    "Slot n starts at n/2 hours: slot 10 is 05:00-05:30.".to_string(),
                    format!(
                        "Grids show {BAND_HOURS}-hour rows of {CELLS_PER_BAND} slots, starting at 00:00."
                    ),
                ],
            )
            .section(
                "SEE ALSO",
                vec![
                    GlobalCommand::Grid.to_string(),
                    GlobalCommand::Toggle.to_string(),
                ],
            )
            .build()
    }

    fn jobs_page(&self) -> ManualPage {
        let types = JobType::iter()
            .map(|t| format!("{:<12}{}", t.to_string(), t.label()))
            .collect();
        let urgencies = Urgency::iter()
            .map(|u| {
                let default = if u == Urgency::default() { " (default)" } else { "" };
                format!("{u}{default}")
            })
            .collect();
        ManualPageBuilder::new("jobs", "Job types and urgency levels.")
            .section("JOB TYPES", types)
            .section("URGENCY", urgencies)
            .section("SEE ALSO", vec![GlobalCommand::Submit.to_string()])
            .build()
    }
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn general_command_lines() -> Vec<String> {
    lines(&[
        "dashboard              # Today's usage grid and the job queue",
        "dates                  # List the bookable days",
        "date <idx|date>        # Change the active day",
        "grid                   # Booking grid for the active day",
        "toggle <slot|a-b>...   # Select or unselect slots",
        "clear                  # Drop the selection",
        "submit                 # Fill in a job and get a quote",
        "queue                  # Job queue, newest first",
        "show <#id> | #<id>     # Status detail for a job",
        "config                 # View or edit config",
        "log                    # Print the session log",
        "man [topic]            # Show manual pages",
        "exit                   # Quit",
    ])
}
