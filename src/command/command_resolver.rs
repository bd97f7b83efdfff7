use crate::arg::args::{Arg, JobIdArg, SingleTokenArg};
use crate::command::commands::{
    ClearCommand, CommandDyn, ConfigCommand, DashboardCommand, DateCommand, DatesCommand,
    GridCommand, LogCommand, ManCommand, QueueCommand, ShowCommand, SubmitCommand, ToggleCommand,
};
use crate::core::types::GlobalCommand;
use crate::errors::{Error, Result};

pub trait CommandResolver {
    fn can_resolve(&self, command: &str) -> bool;
    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>>;
}

pub struct GlobalResolver;

impl CommandResolver for GlobalResolver {
    fn can_resolve(&self, command: &str) -> bool {
        GlobalCommand::try_from(command).is_ok()
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        let command_type = GlobalCommand::try_from(command)?;
        match command_type {
            GlobalCommand::Dashboard => Ok(Box::new(DashboardCommand::new(args))),
            GlobalCommand::Dates => Ok(Box::new(DatesCommand::new(args))),
            GlobalCommand::Date => Ok(Box::new(DateCommand::new(args))),
            GlobalCommand::Grid => Ok(Box::new(GridCommand::new(args))),
            GlobalCommand::Toggle => Ok(Box::new(ToggleCommand::new(args))),
            GlobalCommand::Clear => Ok(Box::new(ClearCommand::new(args))),
            GlobalCommand::Submit => Ok(Box::new(SubmitCommand::new(args))),
            GlobalCommand::Queue => Ok(Box::new(QueueCommand::new(args))),
            GlobalCommand::Show => Ok(Box::new(ShowCommand::new(args))),
            GlobalCommand::Config => Ok(Box::new(ConfigCommand::new(args))),
            GlobalCommand::Log => Ok(Box::new(LogCommand::new(args))),
            GlobalCommand::Man => Ok(Box::new(ManCommand::new(args))),
        }
    }
}

/// A queue id typed as the command word (`#2044`) opens its detail view.
pub struct JobIdResolver;

impl CommandResolver for JobIdResolver {
    fn can_resolve(&self, command: &str) -> bool {
        JobIdArg::accepts(command)
    }

    fn resolve<'a>(&self, command: &str, args: &'a [Arg]) -> Result<CommandDyn<'a>> {
        match JobIdArg::new(command)? {
            Arg::JobId(id) => Ok(Box::new(ShowCommand::for_id(id, args))),
            other => Err(Error::Parse(format!("Expected a job id, got {other}."))),
        }
    }
}
