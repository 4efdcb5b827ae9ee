use std::fmt;

/// One piece of feedback shown after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// page or section title
    Header(String),
    /// an insertion went through
    Success(String),
    /// something the user should worry about
    Warning(String),
    /// neutral remark, e.g. an empty result
    Info(String),
    /// anything else, printed as is
    Plain(String),
}

impl Notice {
    /// Text without decoration
    pub fn text(&self) -> &str {
        use Notice::*;
        match self {
            Header(s) | Success(s) | Warning(s) | Info(s) | Plain(s) => s,
        }
    }
}

const RED: &str = "\x1b[0;91;1m";
const GREEN: &str = "\x1b[0;92;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Notice::*;
        match self {
            Header(s) => write!(f, "{}== {} =={}", WHITE, s, NONE),
            Success(s) => write!(f, "{}✔ {}{}", GREEN, s, NONE),
            Warning(s) => write!(f, "{}! {}{}", RED, s, NONE),
            Info(s) => write!(f, "{}i {}{}", BLUE, s, NONE),
            Plain(s) => write!(f, "{}", s.trim_end_matches('\n')),
        }
    }
}
