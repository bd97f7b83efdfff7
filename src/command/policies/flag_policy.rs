use crate::arg::args::Arg;
use crate::core::types::Flag;
use crate::errors::Error;

#[derive(Debug)]
pub enum FlagDecision {
    /// Stop execution and just print usage()
    ShortCircuitUsage,
    /// Continue command execution
    Continue,
    /// Turn into an error
    Error(Error),
}

pub trait FlagRule {
    fn check(&self, args: &[Arg]) -> FlagDecision;
}

pub struct HelpAtIdx(pub usize);
impl FlagRule for HelpAtIdx {
    fn check(&self, args: &[Arg]) -> FlagDecision {
        match args.get(self.0) {
            Some(Arg::Flag(Flag::Help)) => FlagDecision::ShortCircuitUsage,
            _ => FlagDecision::Continue,
        }
    }
}

/// Rejects argument lists longer than the command understands.
pub struct MaxArgs(pub usize);
impl FlagRule for MaxArgs {
    fn check(&self, args: &[Arg]) -> FlagDecision {
        if args.len() <= self.0 {
            return FlagDecision::Continue;
        }
        let msg = match self.0 {
            0 => "This command takes no arguments.".to_string(),
            n => format!("Expected at most {n} argument(s), got {}.", args.len()),
        };
        FlagDecision::Error(Error::Parse(msg))
    }
}

pub struct FlagPolicy {
    rules: Vec<Box<dyn FlagRule>>,
}
impl FlagPolicy {
    pub fn new(rules: Vec<Box<dyn FlagRule>>) -> Self {
        Self { rules }
    }
    pub fn none() -> Self {
        Self { rules: vec![] }
    }

    /// `-h` first, then an argument cap.
    pub fn help_and_max(max: usize) -> Self {
        Self::new(vec![Box::new(HelpAtIdx(0)), Box::new(MaxArgs(max))])
    }

    pub fn evaluate(&self, args: &[Arg]) -> FlagDecision {
        // First matching short-circuit wins; otherwise Continue.
        for r in &self.rules {
            match r.check(args) {
                FlagDecision::Continue => continue,
                other => return other,
            }
        }
        FlagDecision::Continue
    }
}
