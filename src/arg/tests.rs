use super::{arg_parser::*, args::*};
use crate::arg::arg_parse_strategy::{
    ArgParseStrategy, CommandArgParser, DateSelectArgParser, ManArgParser,
};
use crate::core::models::JobId;
use crate::core::types::{DateKey, Flag, SlotIndex};
use crate::errors::Error;
use chrono::NaiveDate;

fn toks(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn slot(n: i64) -> SlotIndex {
    SlotIndex::try_new(n).unwrap()
}

// ---------- args.rs ----------
#[test]
fn token_stream_walks_tokens() {
    let raw = toks(&["one", "two"]);
    let mut ts = TokenStream::new(&raw);
    assert!(!ts.eof());
    assert_eq!(ts.peek().unwrap(), "one");
    assert_eq!(ts.next().unwrap(), "one");
    assert_eq!(ts.next().unwrap(), "two");
    assert!(ts.eof());
    assert!(matches!(ts.peek(), Err(Error::Parse(_))));
}

#[test]
fn name_arg_requires_quotes_and_strips_them() {
    assert!(NameArg::accepts("\"render final\""));
    assert!(NameArg::accepts("'demo'"));
    assert!(!NameArg::accepts("\"\""));
    assert!(!NameArg::accepts("demo"));
    assert!(!NameArg::accepts("\"open"));

    assert_eq!(
        NameArg::new("\"render final\"").unwrap(),
        Arg::Name("render final".into())
    );
    assert!(NameArg::new("demo").is_err());
}

#[test]
fn slot_range_arg_checks_bounds_and_order() {
    assert!(SlotRangeArg::accepts("10-12"));
    assert!(!SlotRangeArg::accepts("2099-01-01"));
    assert!(!SlotRangeArg::accepts("10-"));

    assert_eq!(
        SlotRangeArg::new("10-12").unwrap(),
        Arg::SlotRange(slot(10), slot(12))
    );
    assert!(matches!(SlotRangeArg::new("12-10"), Err(Error::Parse(_))));
    assert!(matches!(SlotRangeArg::new("40-48"), Err(Error::Parse(_))));
}

#[test]
fn job_id_arg_wants_hash_prefix() {
    assert!(JobIdArg::accepts("#2044"));
    assert!(!JobIdArg::accepts("2044"));
    assert!(!JobIdArg::accepts("#"));
    assert_eq!(JobIdArg::new("#2044").unwrap(), Arg::JobId(JobId(2044)));
}

#[test]
fn flag_and_int_args() {
    assert_eq!(FlagArg::new("-help").unwrap(), Arg::Flag(Flag::Help));
    assert!(FlagArg::new("-x").is_err());
    assert!(!IntArg::accepts(""));
    assert!(!IntArg::accepts("-3"));
    assert_eq!(IntArg::new("07").unwrap(), Arg::Int(7));
}

#[test]
fn factories_parse_single_and_multi_token_args() {
    let mut ts = TokenStream::new(&toks(&["\"vision", "model\""]));
    let name_factory = MultiTokenFactory::<NameArg>::new();
    assert!(name_factory.can_start("\"vision"));
    let arg = name_factory.parse(&mut ts).unwrap();
    assert_eq!(arg, Arg::Name("vision model".into()));

    let mut ts = TokenStream::new(&toks(&["42"]));
    let int_factory = SingleTokenFactory::<IntArg>::new();
    assert!(int_factory.can_start("42"));
    assert_eq!(int_factory.parse(&mut ts).unwrap(), Arg::Int(42));
}

#[test]
fn arg_display_round_trips_to_tokens() {
    assert_eq!(Arg::SlotRange(slot(3), slot(5)).to_string(), "3-5");
    assert_eq!(Arg::JobId(JobId(7)).to_string(), "#7");
    assert_eq!(Arg::Name("a b".into()).to_string(), "\"a b\"");
}

// ---------- arg_parser.rs ----------
#[test]
fn parser_mixes_slots_ranges_and_flags() {
    let args = ArgParser::new()
        .parse(&toks(&["10", "14-15", "-h"]))
        .unwrap();
    assert_eq!(
        args,
        vec![
            Arg::Int(10),
            Arg::SlotRange(slot(14), slot(15)),
            Arg::Flag(Flag::Help),
        ]
    );
}

#[test]
fn parser_reads_ids_dates_and_names() {
    let args = ArgParser::new()
        .parse(&toks(&["#2042", "2099-01-01", "'final", "cut'"]))
        .unwrap();
    assert_eq!(args[0], Arg::JobId(JobId(2042)));
    assert_eq!(
        args[1],
        Arg::Date(DateKey(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()))
    );
    assert_eq!(args[2], Arg::Name("final cut".into()));
}

#[test]
fn parser_rejects_unknown_tokens() {
    match ArgParser::new().parse(&toks(&["noon"])).unwrap_err() {
        Error::Parse(msg) => assert!(msg.starts_with("Unrecognized argument: 'noon'")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

// ---------- arg_parse_strategy.rs ----------
#[test]
fn man_parser_joins_free_text() {
    assert!(ManArgParser.parse(&[]).unwrap().is_empty());
    assert_eq!(
        ManArgParser.parse(&toks(&["\"toggle\""])).unwrap(),
        vec![Arg::Name("toggle".into())]
    );
    assert_eq!(
        ManArgParser.parse(&toks(&["-h"])).unwrap(),
        vec![Arg::Flag(Flag::Help)]
    );
}

#[test]
fn date_parser_prefers_index_then_date() {
    let parsed = DateSelectArgParser.parse(&toks(&["3"])).unwrap();
    assert_eq!(parsed, vec![Arg::Int(3)]);

    let parsed = DateSelectArgParser.parse(&toks(&["2099/01/02"])).unwrap();
    assert!(matches!(parsed[0], Arg::Date(_)));

    assert!(DateSelectArgParser.parse(&toks(&["tomorrow"])).is_err());
}

#[test]
fn command_parser_routes_overrides_case_insensitively() {
    let parser = CommandArgParser::new();
    assert!(matches!(
        parser.parse("DATE", &toks(&["01-05"])).unwrap()[0],
        Arg::Date(_)
    ));
    assert!(matches!(
        parser.parse("toggle", &toks(&["01-05"])).unwrap()[0],
        Arg::SlotRange(_, _)
    ));
    assert_eq!(
        parser.parse("man", &toks(&["slots"])).unwrap(),
        vec![Arg::Name("slots".into())]
    );
}
