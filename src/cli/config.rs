//! Command-line configuration

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

use crate::lib::advice;

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// initial chatbot name
    pub bot: &'static str,
    /// where the Graph page writes its chart
    pub chart: PathBuf,
    /// run commands from this file instead of reading stdin
    pub script: Option<PathBuf>,
    /// the date `today` resolves to
    pub today: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: advice::BOT_NAMES[0],
            chart: PathBuf::from(DEFAULT_CHART),
            script: None,
            today: Local::now().date_naive(),
        }
    }
}

const DEFAULT_CHART: &str = "metronome.svg";

pub fn app() -> App<'static, 'static> {
    App::new("metronome")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track spending & saving, sort needs from wants, chat with a finance helper")
        .arg(
            Arg::with_name("bot")
                .long("bot")
                .short("b")
                .takes_value(true)
                .value_name("NAME")
                .possible_values(advice::BOT_NAMES)
                .case_insensitive(true)
                .help("Name of the chatbot"),
        )
        .arg(
            Arg::with_name("chart")
                .long("chart")
                .short("c")
                .takes_value(true)
                .value_name("PATH")
                .default_value(DEFAULT_CHART)
                .help("File the Graph page writes its SVG chart to"),
        )
        .arg(
            Arg::with_name("script")
                .long("script")
                .short("s")
                .takes_value(true)
                .value_name("FILE")
                .help("Read commands from FILE instead of the terminal"),
        )
        .arg(
            Arg::with_name("today")
                .long("today")
                .takes_value(true)
                .value_name("YYYY-MM-DD")
                .validator(|s| parse_date(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help("Override the current date"),
        )
}

impl Config {
    /// Read the process arguments, exits on `--help` or invalid flags
    pub fn from_args() -> Result<Self> {
        Self::from_matches(&app().get_matches())
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let mut config = Self::default();
        if let Some(name) = matches.value_of("bot") {
            config.bot = advice::bot_name(name).ok_or_else(|| anyhow!("unknown bot name '{}'", name))?;
        }
        if let Some(chart) = matches.value_of("chart") {
            config.chart = PathBuf::from(chart);
        }
        config.script = matches.value_of("script").map(PathBuf::from);
        if let Some(today) = matches.value_of("today") {
            config.today = parse_date(today)?;
        }
        Ok(config)
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("'{}' is not a date YYYY-MM-DD", s))
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(args: &[&str]) -> Result<Config> {
        let matches = app().get_matches_from_safe(std::iter::once("metronome").chain(args.iter().copied()))?;
        Config::from_matches(&matches)
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bot, "Lilly");
        assert_eq!(cfg.chart, PathBuf::from("metronome.svg"));
        assert_eq!(cfg.script, None);
    }

    #[test]
    fn overrides() {
        let cfg = config(&["--bot", "cookie", "-c", "out.svg", "--script", "cmds.txt", "--today", "2024-02-29"]).unwrap();
        assert_eq!(cfg.bot, "Cookie");
        assert_eq!(cfg.chart, PathBuf::from("out.svg"));
        assert_eq!(cfg.script, Some(PathBuf::from("cmds.txt")));
        assert_eq!(cfg.today, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn rejected() {
        assert!(config(&["--bot", "Bob"]).is_err());
        assert!(config(&["--today", "2023-02-29"]).is_err());
        assert!(config(&["--today", "tomorrow"]).is_err());
    }
}
