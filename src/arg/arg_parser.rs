use super::args::*;
use crate::errors::{Error, Result};

pub struct ArgParser {
    factories: Vec<Box<dyn ArgFactory>>,
}

impl Default for ArgParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgParser {
    /// Order matters: the first factory that can start a token claims it.
    pub fn new() -> Self {
        Self {
            factories: vec![
                Box::new(MultiTokenFactory::<NameArg>::new()),
                Box::new(SingleTokenFactory::<FlagArg>::new()),
                Box::new(SingleTokenFactory::<JobIdArg>::new()),
                Box::new(SingleTokenFactory::<SlotRangeArg>::new()),
                Box::new(SingleTokenFactory::<IntArg>::new()),
                Box::new(SingleTokenFactory::<DateArg>::new()),
            ],
        }
    }

    pub fn parse(&self, raw: &[String]) -> Result<Vec<Arg>> {
        let mut ts = TokenStream::new(raw);
        let mut out = Vec::new();

        while !ts.eof() {
            let tok = ts.peek()?.to_string();
            let factory = self
                .factories
                .iter()
                .find(|f| f.can_start(&tok))
                .ok_or_else(|| {
                    Error::Parse(format!(
                        "Unrecognized argument: '{}'. If this is a name, wrap it in quotes.",
                        tok
                    ))
                })?;
            out.push(factory.parse(&mut ts)?);
        }
        Ok(out)
    }
}
