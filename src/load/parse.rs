//! Convert one line of user input into a command

#![allow(clippy::upper_case_acronyms)]

use chrono::NaiveDate;
use pest::Parser;
use pest_derive::*;
use std::path::PathBuf;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;

use crate::cli::page::Page;
use crate::lib::{
    advice,
    entry::{Amount, Category},
};
use crate::load::error;

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/command.pest"]
pub struct CommandParser;

/// A date as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Today,
    On(NaiveDate),
}

/// Everything the user can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// navigate to a page
    Page(Page),
    /// insert a finance record, `None` is the page default (today)
    Add {
        date: Option<When>,
        spending: Amount,
        saving: Amount,
    },
    /// file an item as a need or a want
    Item(Category, String),
    /// look up a record, `None` is the page default (earliest record)
    Lookup(Option<When>),
    /// rename the chatbot
    Bot(&'static str),
    /// free-text question for the chatbot
    Ask(String),
    /// item-specific advice
    Advise(String),
    /// write the chart, optionally elsewhere than the configured path
    Chart(Option<PathBuf>),
    History,
    Help,
    Quit,
}

// extract contents of wrapper rule
macro_rules! subrule {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No subrule"));
        if items.next().is_some() {
            panic!("Several subrules");
        }
        fst
    }};
}

// get first and rest of inner
macro_rules! decapitate {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No head"));
        (fst, items)
    }};
}

/// Parse a single line of input
///
/// `source` names where the line comes from and only appears in error reports.
/// A blank line is `None` with no error.
/// Caller should determine the success of this function by querying `errs`.
pub fn extract(source: &str, errs: &mut error::Record, line: &str) -> Option<Command> {
    let line = line.trim_end();
    match CommandParser::parse(Rule::line, line) {
        Ok(mut pairs) => {
            let line = pairs.next()?;
            let command = line.into_inner().find(|p| p.as_rule() == Rule::command)?;
            validate(source, errs, subrule!(command))
        }
        Err(e) => {
            errs.make("Unrecognized command")
                .from(e.with_path(source))
                .hint("type 'help' to list the available commands");
            None
        }
    }
}

/// Check the semantics the grammar can't express
///
/// Page names, bot names and calendar validity are only checked here.
fn validate(source: &str, errs: &mut error::Record, pair: Pair) -> Option<Command> {
    let rule = pair.as_rule();
    let (_, mut args) = decapitate!(pair);
    match rule {
        Rule::cmd_page => {
            let arg = args.next()?;
            match Page::lookup(arg.as_str()) {
                Some(page) => Some(Command::Page(page)),
                None => {
                    let loc = (source, arg.as_span());
                    errs.make("Unknown page")
                        .span(&loc, "requested here")
                        .text(format!("'{}' is not in the menu", arg.as_str().trim()))
                        .hint(format!(
                            "pages are {}",
                            Page::all()
                                .map(|p| format!("{} ({})", p.key(), p.number()))
                                .collect::<Vec<_>>()
                                .join(", ")
                        ));
                    None
                }
            }
        }
        Rule::cmd_add => {
            let mut date = None;
            let mut amounts = Vec::new();
            for arg in args {
                match arg.as_rule() {
                    Rule::date => date = Some(validate_date(source, errs, arg)?),
                    Rule::number => amounts.push(validate_amount(source, errs, arg)?),
                    _ => unreachable!(),
                }
            }
            // the grammar always provides exactly two amounts
            let [spending, saving] = amounts[..] else {
                unreachable!()
            };
            Some(Command::Add { date, spending, saving })
        }
        Rule::cmd_item => {
            let cat = args.next()?;
            let category = match subrule!(cat).as_rule() {
                Rule::need => Category::Need,
                Rule::want => Category::Want,
                _ => unreachable!(),
            };
            let text = args.next().map(|t| t.as_str().to_string()).unwrap_or_default();
            Some(Command::Item(category, text))
        }
        Rule::cmd_lookup => match args.next() {
            Some(arg) => Some(Command::Lookup(Some(validate_date(source, errs, arg)?))),
            None => Some(Command::Lookup(None)),
        },
        Rule::cmd_bot => {
            let arg = args.next()?;
            match advice::bot_name(arg.as_str()) {
                Some(name) => Some(Command::Bot(name)),
                None => {
                    let loc = (source, arg.as_span());
                    errs.make("Unknown bot name")
                        .span(&loc, "requested here")
                        .text(format!("there is no bot called '{}'", arg.as_str().trim()))
                        .hint(format!("choose one of: {}", advice::BOT_NAMES.join(", ")));
                    None
                }
            }
        }
        Rule::cmd_ask => Some(Command::Ask(rest(args.next()))),
        Rule::cmd_advise => Some(Command::Advise(rest(args.next()))),
        Rule::cmd_chart => Some(Command::Chart(
            args.next()
                .map(|p| p.as_str().trim())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        )),
        Rule::cmd_history => Some(Command::History),
        Rule::cmd_help => Some(Command::Help),
        Rule::cmd_quit => Some(Command::Quit),
        _ => unreachable!("{:?}", rule),
    }
}

fn rest(text: Option<Pair>) -> String {
    text.map(|t| t.as_str().trim().to_string()).unwrap_or_default()
}

fn validate_date(source: &str, errs: &mut error::Record, pair: Pair) -> Option<When> {
    let inner = subrule!(pair);
    match inner.as_rule() {
        Rule::today => Some(When::Today),
        Rule::iso_date => match NaiveDate::parse_from_str(inner.as_str(), "%Y-%m-%d") {
            Ok(date) => Some(When::On(date)),
            Err(e) => {
                let loc = (source, inner.as_span());
                errs.make("Invalid date")
                    .span(&loc, "provided here")
                    .text(format!("'{}': {}", inner.as_str(), e))
                    .hint("choose a date that exists, written YYYY-MM-DD");
                None
            }
        },
        _ => unreachable!(),
    }
}

fn validate_amount(source: &str, errs: &mut error::Record, pair: Pair) -> Option<Amount> {
    match pair.as_str().parse::<u64>() {
        Ok(v) if v <= Amount::MAX.0 => Some(Amount(v)),
        _ => {
            let loc = (source, pair.as_span());
            errs.make("Amount too large")
                .span(&loc, "provided here")
                .hint(format!("amounts must not exceed {}", Amount::MAX));
            None
        }
    }
}
