use crate::extensions::enums::valid_csv;
use crate::extensions::string::StripQuotes;
use std::fmt;
use std::marker::PhantomData;

use crate::core::models::JobId;
use crate::core::types::{DateKey, Flag, SlotIndex};
use crate::errors::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Flag(Flag),
    Int(i64),
    /// Inclusive run of slots written `a-b`.
    SlotRange(SlotIndex, SlotIndex),
    JobId(JobId),
    Date(DateKey),
    Name(String),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Flag(x) => write!(f, "{x}"),
            Arg::Int(x) => write!(f, "{x}"),
            Arg::SlotRange(a, b) => write!(f, "{a}-{b}"),
            Arg::JobId(x) => write!(f, "{x}"),
            Arg::Date(x) => write!(f, "{x}"),
            Arg::Name(x) => write!(f, "\"{x}\""),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenStream {
    toks: Vec<String>,
    i: usize,
}

impl TokenStream {
    pub fn new(raw: &[String]) -> Self {
        Self {
            toks: raw.to_vec(),
            i: 0,
        }
    }
    pub fn eof(&self) -> bool {
        self.i >= self.toks.len()
    }
    pub fn peek(&self) -> Result<&str> {
        self.toks
            .get(self.i)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::Parse("EOF".into()))
    }
    pub fn next(&mut self) -> Result<String> {
        let s = self.peek()?.to_string();
        self.i += 1;
        Ok(s)
    }
}

pub trait SingleTokenArg {
    fn accepts(tok: &str) -> bool;
    fn new(tok: &str) -> Result<Arg>;
}

pub trait MultiTokenArg: SingleTokenArg {
    fn starts_sequence(tok: &str) -> bool;
}

pub trait ArgFactory {
    fn can_start(&self, tok: &str) -> bool;
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg>;
}

pub struct SingleTokenFactory<A: SingleTokenArg>(PhantomData<A>);
impl<A: SingleTokenArg> SingleTokenFactory<A> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<A: SingleTokenArg> ArgFactory for SingleTokenFactory<A> {
    fn can_start(&self, tok: &str) -> bool {
        A::accepts(tok)
    }
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg> {
        let tok = ts.next()?;
        A::new(&tok)
    }
}

/// Keeps pulling tokens until the joined text is accepted or input runs out.
pub struct MultiTokenFactory<A: MultiTokenArg>(PhantomData<A>);
impl<A: MultiTokenArg> MultiTokenFactory<A> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}
impl<A: MultiTokenArg> ArgFactory for MultiTokenFactory<A> {
    fn can_start(&self, tok: &str) -> bool {
        A::starts_sequence(tok)
    }
    fn parse(&self, ts: &mut TokenStream) -> Result<Arg> {
        let mut buf: Vec<String> = vec![ts.next()?];
        loop {
            let joined = buf.join(" ");
            if A::accepts(&joined) || ts.eof() {
                return A::new(&joined);
            }
            buf.push(ts.next()?);
        }
    }
}

/// Quoted free text, possibly spanning several tokens.
pub struct NameArg;
impl MultiTokenArg for NameArg {
    fn starts_sequence(value: &str) -> bool {
        value.starts_with('\'') || value.starts_with('"')
    }
}

impl SingleTokenArg for NameArg {
    fn accepts(value: &str) -> bool {
        let t = value.trim();
        match t.chars().next() {
            Some(q @ ('"' | '\'')) => t.len() >= 3 && t.ends_with(q),
            _ => false,
        }
    }
    fn new(value: &str) -> Result<Arg> {
        if !Self::accepts(value) {
            return Err(Error::Parse(
                "Name must contain text wrapped in single or double quotes.".into(),
            ));
        }
        Ok(Arg::Name(value.strip_quotes().to_string()))
    }
}

pub struct FlagArg;
impl SingleTokenArg for FlagArg {
    fn accepts(value: &str) -> bool {
        Flag::try_from(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Flag(Flag::try_from(value).map_err(|_| {
            Error::Parse(format!(
                "Invalid flag: {}. Valid flags: {}",
                value,
                valid_csv::<Flag>()
            ))
        })?))
    }
}

pub struct IntArg;
impl SingleTokenArg for IntArg {
    fn accepts(value: &str) -> bool {
        !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
    }
    fn new(value: &str) -> Result<Arg> {
        value
            .parse::<i64>()
            .map(Arg::Int)
            .map_err(|_| Error::Parse(format!("Expected an integer, got '{}'", value)))
    }
}

/// `a-b` with both ends plain slot numbers. Rejected when `a > b`.
pub struct SlotRangeArg;
impl SlotRangeArg {
    fn bounds(value: &str) -> Option<(&str, &str)> {
        let (a, b) = value.split_once('-')?;
        (IntArg::accepts(a) && IntArg::accepts(b)).then_some((a, b))
    }
}
impl SingleTokenArg for SlotRangeArg {
    fn accepts(value: &str) -> bool {
        Self::bounds(value).is_some()
    }
    fn new(value: &str) -> Result<Arg> {
        let (a, b) = Self::bounds(value).ok_or_else(|| {
            Error::Parse(format!(
                "Invalid slot range: '{value}'. Expected '<first>-<last>' (e.g., 10-12)."
            ))
        })?;
        let first = SlotIndex::try_from_str(a)?;
        let last = SlotIndex::try_from_str(b)?;
        if first > last {
            return Err(Error::Parse(format!(
                "Invalid slot range: '{value}'. The first slot must not come after the last."
            )));
        }
        Ok(Arg::SlotRange(first, last))
    }
}

/// `#<number>`, the way queue ids are printed.
pub struct JobIdArg;
impl SingleTokenArg for JobIdArg {
    fn accepts(value: &str) -> bool {
        value.strip_prefix('#').is_some_and(IntArg::accepts)
    }
    fn new(value: &str) -> Result<Arg> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        digits
            .parse::<u32>()
            .map(|n| Arg::JobId(JobId(n)))
            .map_err(|_| Error::Parse(format!("Invalid job id: '{value}'. Expected e.g. #2044.")))
    }
}

pub struct DateArg;
impl SingleTokenArg for DateArg {
    fn accepts(value: &str) -> bool {
        DateKey::try_from_str(value).is_ok()
    }
    fn new(value: &str) -> Result<Arg> {
        Ok(Arg::Date(DateKey::try_from_str(value)?))
    }
}
