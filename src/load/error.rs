//! Pretty-printing facility for error messages
//!
//! Mostly a wrapper around `pest::error::Error::new_from_span`,
//! the difficult part of the formatting is handled and `Error` only adds aggregation
//! of messages as well as colored output.
//!
//! # Example
//!
//! ```rust
//! errs.make("Invalid date")
//!     .span(&loc, "provided here")
//!     .text("2023-02-30 is not a day of the calendar")
//!     .hint("dates are written YYYY-MM-DD");
//! ```
//!
//! ```txt
//! --> Error: Invalid date
//!  |     --> stdin:1:5
//!  |      |
//!  |    1 | add 2023-02-30 10 10
//!  |      |     ^--------^
//!  |      |
//!  |      = provided here
//!  |  2023-02-30 is not a day of the calendar
//!  |      ? hint: dates are written YYYY-MM-DD
//! ```

/// Location of an error
///
/// Contains the name of the input the command came from
/// and the precise span within that command
pub type Loc<'i> = (&'i str, pest::Span<'i>);

use crate::load::parse::Rule;

/// Report for a single error
///
/// All messages (`label` passed with `new`, arguments of `hint`
/// and `text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Error {
    /// determines the error label (warning/error) and the color (yellow/red)
    fatal: bool,
    /// name of the error
    label: String,
    items: Vec<Item>,
}

/// Kinds of items that can be added to an error report
#[derive(Debug)]
enum Item {
    /// code block
    Block(pest::error::Error<Rule>),
    /// important message
    Text(String),
    /// recommendations for fixes
    Hint(String),
}

/// A collection of errors
///
/// Typically all errors detected in one command, but the structure
/// makes no assumption on how the errors relate to each other
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    /// how many are errors, the rest are warnings
    /// counts only `contents[..contents.len()-1]`
    fatal: usize,
    contents: Vec<Error>,
}

impl Error {
    /// Create a new error
    pub fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Add a pre-existing error (e.g. to build from a parsing error)
    pub fn from(&mut self, err: pest::error::Error<Rule>) -> &mut Self {
        self.items.push(Item::Block(err.renamed_rules(rule_rename)));
        self
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Add a code block and its associated message
    pub fn span<S>(&mut self, loc: &Loc, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Block(
            pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError {
                    message: msg.to_string(),
                },
                loc.1.clone(),
            )
            .with_path(loc.0),
        ));
        self
    }

    /// Add an important note
    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any of the recorded errors are fatal
    pub fn is_fatal(&self) -> bool {
        self.fatal > 0 || self.last_is_fatal()
    }

    fn last_is_fatal(&self) -> bool {
        self.contents.last().map(|e| e.fatal).unwrap_or(false)
    }

    /// Number of fatal errors
    pub fn count_errors(&self) -> usize {
        self.fatal + if self.last_is_fatal() { 1 } else { 0 }
    }

    /// Number of nonfatal errors
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Labels of all recorded errors, oldest first
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().map(|e| e.label())
    }

    /// Add a new error to the pool
    pub fn make<S>(&mut self, msg: S) -> &mut Error
    where
        S: ToString,
    {
        if self.last_is_fatal() {
            self.fatal += 1;
        }
        self.contents.push(Error::new(msg));
        let n = self.contents.len();
        &mut self.contents[n - 1]
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

use std::fmt;
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => {
                    let mut align = "   ".to_string();
                    let mut align_found = false;
                    for line in format!("{}", err).split('\n') {
                        write!(
                            f,
                            " {}|{}  {}",
                            color,
                            if align_found { align.as_str() } else { "" },
                            BLUE
                        )?;
                        for c in line.chars() {
                            match c {
                                '-' if !align_found => {
                                    align_found = true;
                                    write!(f, "{}-", align)?;
                                }
                                ' ' if !align_found => {
                                    align.pop();
                                    write!(f, " ")?;
                                }
                                '|' => write!(f, "|{}", NONE)?,
                                '=' => write!(f, "={}", NONE)?,
                                '^' => write!(f, "{}^", color)?,
                                _ => write!(f, "{}", c)?,
                            }
                        }
                        writeln!(f)?;
                    }
                }
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal {
            self.count_errors()
        } else {
            self.count_warnings()
        };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 5;
        for err in self
            .contents
            .iter()
            .filter(|err| err.fatal == fatal)
            .take(trunc)
        {
            // only print errors with the maximum fatality
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.{}", color, count - trunc, NONE)?;
        }
        Ok(())
    }
}

fn rule_rename(r: &Rule) -> String {
    String::from(match r {
        Rule::EOI => "end of line",
        Rule::number => "a non-negative whole amount",
        Rule::iso_date => "a date YYYY-MM-DD",
        Rule::today => "'today'",
        Rule::date => "a date YYYY-MM-DD or 'today'",
        Rule::text => "some text",
        Rule::need => "'need'",
        Rule::want => "'want'",
        Rule::category => "a category 'need' or 'want'",
        Rule::kw_page => "'page'",
        Rule::kw_add => "'add'",
        Rule::kw_item => "'item'",
        Rule::kw_lookup => "'lookup'",
        Rule::kw_bot => "'bot'",
        Rule::kw_ask => "'ask'",
        Rule::kw_advise => "'advise'",
        Rule::kw_chart => "'chart'",
        Rule::kw_history => "'history'",
        Rule::kw_help => "'help'",
        Rule::kw_quit => "'quit'",
        Rule::cmd_page => "a page selection 'page NAME'",
        Rule::cmd_add => "a record 'add [DATE] SPENDING SAVING'",
        Rule::cmd_item => "an item 'item need|want TEXT'",
        Rule::cmd_lookup => "a lookup 'lookup [DATE]'",
        Rule::cmd_bot => "a bot selection 'bot NAME'",
        Rule::cmd_ask => "a question 'ask TEXT'",
        Rule::cmd_advise => "an advice request 'advise ITEM'",
        Rule::cmd_chart => "a chart export 'chart [PATH]'",
        Rule::cmd_history => "'history'",
        Rule::cmd_help => "'help'",
        Rule::cmd_quit => "'quit'",
        Rule::command => "a command",
        Rule::line => "a command line",
        _ => "a separator",
    })
}
