use std::collections::HashMap;

use crate::arg::arg_parser::ArgParser;
use crate::arg::args::{Arg, DateArg, FlagArg, IntArg, SingleTokenArg};
use crate::core::types::GlobalCommand;
use crate::errors::{Error, Result};
use crate::extensions::string::StripQuotes;

pub trait ArgParseStrategy {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>>;
}

pub struct StandardArgParser {
    parser: ArgParser,
}

impl StandardArgParser {
    pub fn new() -> Self {
        Self {
            parser: ArgParser::new(),
        }
    }
}

impl ArgParseStrategy for StandardArgParser {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        self.parser.parse(raw)
    }
}

/// `man` takes free text; quotes are optional.
pub struct ManArgParser;

impl ArgParseStrategy for ManArgParser {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        if let [only] = raw {
            if FlagArg::accepts(only) {
                return Ok(vec![FlagArg::new(only)?]);
            }
        }
        Ok(vec![Arg::Name(raw.join(" ").strip_quotes().to_string())])
    }
}

/// `date` takes one strip index or one calendar date. Short dates like
/// `01-05` would otherwise read as a slot range.
pub struct DateSelectArgParser;

impl ArgParseStrategy for DateSelectArgParser {
    fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        raw.iter()
            .map(|tok| {
                if FlagArg::accepts(tok) {
                    FlagArg::new(tok)
                } else if IntArg::accepts(tok) {
                    IntArg::new(tok)
                } else if DateArg::accepts(tok) {
                    DateArg::new(tok)
                } else {
                    Err(Error::Parse(format!(
                        "Expected a date index or a date, got '{tok}'."
                    )))
                }
            })
            .collect()
    }
}

pub struct CommandArgParser {
    default: StandardArgParser,
    overrides: HashMap<String, Box<dyn ArgParseStrategy>>,
}

impl Default for CommandArgParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandArgParser {
    pub fn new() -> Self {
        let mut overrides: HashMap<String, Box<dyn ArgParseStrategy>> = HashMap::new();
        overrides.insert(GlobalCommand::Man.to_string(), Box::new(ManArgParser));
        overrides.insert(GlobalCommand::Date.to_string(), Box::new(DateSelectArgParser));
        Self {
            default: StandardArgParser::new(),
            overrides,
        }
    }

    pub fn parse(&self, command: &str, raw: &[String]) -> Result<Vec<Arg>> {
        let key = command.trim().to_ascii_lowercase();
        match self.overrides.get(&key) {
            Some(parser) => parser.parse(raw),
            None => self.default.parse(raw),
        }
    }
}
