//! One user's interaction with the tracker
//!
//! A `Session` owns its store for its whole lifetime. Each command goes
//! through `dispatch`, which applies at most one insertion and then
//! renders the page the command belongs to.

use chrono::NaiveDate;
use log::{debug, info, warn};
use std::path::Path;

use crate::cli::{
    config::Config,
    notice::Notice,
    page::Page,
    plot::{PlotError, Plotter},
    table::Table,
};
use crate::lib::{
    advice,
    entry::Category,
    store::RecordStore,
};
use crate::load::parse::{Command, When};

pub struct Session {
    config: Config,
    store: RecordStore,
    bot: &'static str,
    page: Page,
    /// every question asked and the reply it got
    history: Vec<(String, String)>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        info!("session started, today is {}, chatting with {}", config.today, config.bot);
        Self {
            bot: config.bot,
            config,
            store: RecordStore::new(),
            page: Page::Welcome,
            history: Vec::new(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn bot(&self) -> &'static str {
        self.bot
    }

    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    fn resolve(&self, when: When) -> NaiveDate {
        match when {
            When::Today => self.config.today,
            When::On(date) => date,
        }
    }

    /// Apply a command and collect what should be shown
    pub fn dispatch(&mut self, cmd: Command) -> Vec<Notice> {
        debug!("page {:?}: {:?}", self.page, cmd);
        match cmd {
            Command::Page(page) => {
                self.page = page;
                self.render()
            }
            Command::Add { date, spending, saving } => {
                self.page = Page::AddData;
                let date = self.resolve(date.unwrap_or(When::Today));
                self.store.add_finance_record(date, spending, saving);
                let mut out = vec![Notice::Success(format!("Added record for {}", date))];
                out.extend(self.render_add_data());
                out
            }
            Command::Item(category, text) => {
                if self.page != Page::Chatbot {
                    self.page = Page::NeedsWants;
                }
                let mut out = Vec::new();
                if self.store.add_categorized_item(&text, category).is_some() {
                    out.push(Notice::Success(format!("Added '{}' as {}", text, category)));
                }
                out.extend(self.render());
                out
            }
            Command::Lookup(when) => {
                self.page = Page::Calendar;
                let when = when.map(|w| self.resolve(w));
                let mut out = vec![Notice::Header(Page::Calendar.title().to_string())];
                out.extend(self.lookup(when));
                out
            }
            Command::Bot(name) => {
                info!("bot renamed from {} to {}", self.bot, name);
                self.bot = name;
                self.page = Page::Chatbot;
                self.render()
            }
            Command::Ask(text) => {
                self.page = Page::Chatbot;
                self.ask(&text, |t| advice::respond(t).to_string())
            }
            Command::Advise(text) => {
                self.page = Page::Chatbot;
                let bot = self.bot;
                let known = self.store.category_of(&text);
                self.ask(&text, |item| match known {
                    Some(category) => advice::item_advice(item, category, bot),
                    None => advice::respond(item).to_string(),
                })
            }
            Command::Chart(path) => {
                let path = path.unwrap_or_else(|| self.config.chart.clone());
                self.write_chart(&path)
            }
            Command::History => self.render_history(),
            Command::Help => vec![Notice::Plain(help())],
            Command::Quit => {
                info!(
                    "session ended with {} records and {} items",
                    self.store.records().len(),
                    self.store.items().len()
                );
                vec![Notice::Info("Goodbye!".to_string())]
            }
        }
    }

    /// Render the current page without changing anything
    pub fn render(&self) -> Vec<Notice> {
        match self.page {
            Page::Welcome => vec![
                Notice::Header("Welcome 👋".to_string()),
                Notice::Plain(
                    "Use 'add' to enter your spending & saving. Then view graphs, calendar, and chatbot tips."
                        .to_string(),
                ),
            ],
            Page::AddData => self.render_add_data(),
            Page::Graph => self.render_graph(),
            Page::Calendar => {
                let mut out = vec![Notice::Header(Page::Calendar.title().to_string())];
                out.extend(self.lookup(None));
                out
            }
            Page::NeedsWants => {
                let mut out = vec![Notice::Header(Page::NeedsWants.title().to_string())];
                out.extend(self.render_items());
                out
            }
            Page::About => vec![
                Notice::Header("About this project".to_string()),
                Notice::Plain(
                    "This app helps you track spending & saving, visualize progress, and chat with a finance helper."
                        .to_string(),
                ),
            ],
            Page::Chatbot => {
                let mut out = vec![
                    Notice::Header("Finance Chatbot & Needs vs Wants Advisor".to_string()),
                    Notice::Plain(format!("You are now chatting with {} 🤖", self.bot)),
                ];
                out.extend(self.render_items());
                out.push(Notice::Header(format!("Ask {} about your items", self.bot)));
                out
            }
        }
    }

    fn render_add_data(&self) -> Vec<Notice> {
        vec![
            Notice::Header("Current Data".to_string()),
            Notice::Plain(Table::records(self.store.records()).to_string()),
        ]
    }

    fn render_graph(&self) -> Vec<Notice> {
        let mut out = vec![Notice::Header("Spending vs Saving Graph".to_string())];
        if self.store.is_empty() {
            out.push(Notice::Warning("No data yet. Please add some in 'Add Data'.".to_string()));
            return out;
        }
        let summary = self.store.summary();
        out.push(Notice::Plain(format!(
            "Total Spending: {}  |  Total Saving: {}",
            summary.spending(),
            summary.saving()
        )));
        if summary.overspent() {
            out.push(Notice::Warning("Warning: spending > saving".to_string()));
        }
        out.extend(self.write_chart(&self.config.chart));
        out
    }

    fn write_chart(&self, path: &Path) -> Vec<Notice> {
        match Plotter::new(self.store.records()).save(path) {
            Ok(()) => vec![Notice::Info(format!("Chart written to {}", path.display()))],
            Err(PlotError::NoData) => {
                vec![Notice::Warning("No data yet. Please add some in 'Add Data'.".to_string())]
            }
            Err(e) => {
                warn!("{}", e);
                vec![Notice::Warning(format!("{}", e))]
            }
        }
    }

    /// Calendar lookup, `None` defaults to the earliest recorded date
    fn lookup(&self, date: Option<NaiveDate>) -> Vec<Notice> {
        let date = match date.or_else(|| self.store.earliest_date()) {
            Some(date) if !self.store.is_empty() => date,
            _ => return vec![Notice::Warning("No data yet. Add some first.".to_string())],
        };
        match self.store.find_by_date(date) {
            Some(rec) => vec![Notice::Plain(format!(
                "On {}: 💸 Spending {} | 💰 Saving {}",
                date, rec.spending, rec.saving
            ))],
            None => vec![Notice::Info("No record for this date.".to_string())],
        }
    }

    fn render_items(&self) -> Vec<Notice> {
        let mut out = Vec::new();
        for (category, title, missing) in &[
            (Category::Need, "Your Needs", "No Needs added yet."),
            (Category::Want, "Your Wants", "No Wants added yet."),
        ] {
            let items = self.store.items_by_category(*category);
            if items.is_empty() {
                out.push(Notice::Header(title.to_string()));
                out.push(Notice::Info(missing.to_string()));
            } else {
                out.push(Notice::Plain(Table::items(&items).with_title(title).to_string()));
            }
        }
        out
    }

    /// Shared handling of chat questions: blank input is ignored
    fn ask<F>(&mut self, text: &str, reply: F) -> Vec<Notice>
    where
        F: FnOnce(&str) -> String,
    {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let answer = reply(text);
        self.history.push((text.to_string(), answer.clone()));
        vec![Notice::Plain(answer)]
    }

    fn render_history(&self) -> Vec<Notice> {
        if self.history.is_empty() {
            return vec![Notice::Info("No questions asked yet.".to_string())];
        }
        let mut out = vec![Notice::Header("Chat history".to_string())];
        for (question, answer) in &self.history {
            out.push(Notice::Plain(format!("you: {}", question)));
            out.push(Notice::Plain(format!("  -> {}", answer)));
        }
        out
    }
}

fn help() -> String {
    let mut s = String::from("Commands:\n");
    for (usage, effect) in HELP {
        s.push_str(&format!("  {:<26} {}\n", usage, effect));
    }
    s.push_str("Pages: ");
    s.push_str(
        &Page::all()
            .map(|p| format!("{} ({})", p.key(), p.number()))
            .collect::<Vec<_>>()
            .join(", "),
    );
    s
}

const HELP: &[(&str, &str)] = &[
    ("page NAME|N", "go to a page of the menu"),
    ("add [DATE] SPEND SAVE", "record spending and saving (DATE defaults to today)"),
    ("item need|want TEXT", "file an item as a need or a want"),
    ("lookup [DATE]", "show the record of a date (defaults to the earliest)"),
    ("bot NAME", "rename the chatbot"),
    ("ask TEXT", "ask the chatbot for advice"),
    ("advise ITEM", "get advice about one of your items"),
    ("chart [PATH]", "write the spending/saving chart as SVG"),
    ("history", "show the questions asked so far"),
    ("help", "show this message"),
    ("quit", "leave, all data is discarded"),
];

#[cfg(test)]
mod test {
    use super::*;
    use crate::lib::entry::Amount;

    macro_rules! dt {
        ( $y:tt - $m:tt - $d:tt ) => {
            NaiveDate::from_ymd_opt($y, $m, $d).unwrap()
        };
    }

    fn session(dir: &tempfile::TempDir) -> Session {
        Session::new(Config {
            chart: dir.path().join("chart.svg"),
            today: dt!(2024-3-15),
            ..Config::default()
        })
    }

    fn add(s: &mut Session, date: NaiveDate, spending: u64, saving: u64) -> Vec<Notice> {
        s.dispatch(Command::Add {
            date: Some(When::On(date)),
            spending: Amount(spending),
            saving: Amount(saving),
        })
    }

    fn texts(out: &[Notice]) -> Vec<&str> {
        out.iter().map(|n| n.text()).collect()
    }

    fn warnings(out: &[Notice]) -> Vec<&str> {
        out.iter()
            .filter(|n| matches!(n, Notice::Warning(_)))
            .map(|n| n.text())
            .collect()
    }

    #[test]
    fn graph_without_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        add(&mut s, dt!(2024-1-1), 100, 50);
        add(&mut s, dt!(2024-1-2), 20, 80);
        let out = s.dispatch(Command::Page(Page::Graph));
        assert!(texts(&out).contains(&"Total Spending: 120  |  Total Saving: 130"));
        assert!(warnings(&out).is_empty());
        assert!(dir.path().join("chart.svg").exists());
    }

    #[test]
    fn graph_overspent() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        add(&mut s, dt!(2024-1-1), 100, 50);
        let out = s.dispatch(Command::Page(Page::Graph));
        assert_eq!(warnings(&out), vec!["Warning: spending > saving"]);
    }

    #[test]
    fn graph_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let out = s.dispatch(Command::Page(Page::Graph));
        assert_eq!(warnings(&out), vec!["No data yet. Please add some in 'Add Data'."]);
        assert!(!dir.path().join("chart.svg").exists());
    }

    #[test]
    fn add_defaults_to_today() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let out = s.dispatch(Command::Add {
            date: None,
            spending: Amount(10),
            saving: Amount(20),
        });
        assert_eq!(out[0], Notice::Success("Added record for 2024-03-15".to_string()));
        assert_eq!(s.page(), Page::AddData);
        assert_eq!(s.store().records()[0].date, dt!(2024-3-15));
    }

    #[test]
    fn calendar() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let out = s.dispatch(Command::Lookup(None));
        assert_eq!(warnings(&out), vec!["No data yet. Add some first."]);
        add(&mut s, dt!(2024-1-5), 7, 3);
        add(&mut s, dt!(2024-1-2), 20, 80);
        add(&mut s, dt!(2024-1-2), 99, 99);
        let out = s.dispatch(Command::Page(Page::Calendar));
        assert!(texts(&out).contains(&"On 2024-01-02: 💸 Spending 20 | 💰 Saving 80"));
        let out = s.dispatch(Command::Lookup(Some(When::On(dt!(2024-1-3)))));
        assert!(out.contains(&Notice::Info("No record for this date.".to_string())));
        let out = s.dispatch(Command::Lookup(Some(When::Today)));
        assert!(out.contains(&Notice::Info("No record for this date.".to_string())));
    }

    #[test]
    fn items_pages() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let out = s.dispatch(Command::Item(Category::Need, "   ".to_string()));
        assert!(!out.iter().any(|n| matches!(n, Notice::Success(_))));
        assert!(texts(&out).contains(&"No Needs added yet."));
        assert_eq!(s.page(), Page::NeedsWants);
        let out = s.dispatch(Command::Item(Category::Want, "Netflix".to_string()));
        assert_eq!(out[0], Notice::Success("Added 'Netflix' as Want".to_string()));
        assert!(texts(&out).contains(&"No Needs added yet."));
        assert!(!texts(&out).contains(&"No Wants added yet."));
        s.dispatch(Command::Page(Page::Chatbot));
        s.dispatch(Command::Item(Category::Need, "Rent".to_string()));
        assert_eq!(s.page(), Page::Chatbot);
        assert_eq!(s.store().items_by_category(Category::Need), vec!["Rent"]);
    }

    #[test]
    fn chat() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        assert!(s.dispatch(Command::Ask("  ".to_string())).is_empty());
        assert!(s.history().is_empty());
        let out = s.dispatch(Command::Ask("I want to save more".to_string()));
        assert_eq!(texts(&out), vec![advice::respond("save")]);
        s.dispatch(Command::Item(Category::Want, "Netflix".to_string()));
        s.dispatch(Command::Bot("Cookie"));
        let out = s.dispatch(Command::Advise("netflix".to_string()));
        assert_eq!(
            texts(&out),
            vec!["Cookie: 'netflix' is a Want. Consider it only if your Needs are well-covered."]
        );
        let out = s.dispatch(Command::Advise("xyz".to_string()));
        assert_eq!(texts(&out), vec![advice::respond("xyz")]);
        assert_eq!(s.history().len(), 3);
        let out = s.dispatch(Command::History);
        assert_eq!(out.len(), 1 + 2 * 3);
    }

    #[test]
    fn blank_questions_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        s.dispatch(Command::Item(Category::Need, "Rent".to_string()));
        assert!(s.dispatch(Command::Advise("   ".to_string())).is_empty());
        assert!(s.dispatch(Command::Ask("\t".to_string())).is_empty());
        assert!(s.history().is_empty());
        assert_eq!(s.dispatch(Command::History), vec![Notice::Info("No questions asked yet.".to_string())]);
    }

    #[test]
    fn advise_first_stored_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        s.dispatch(Command::Item(Category::Want, "Netflix".to_string()));
        s.dispatch(Command::Item(Category::Need, "netflix".to_string()));
        let mut errs = crate::load::error::Record::new();
        let cmd = crate::load::parse::extract("test", &mut errs, "advise  NETFLIX ").unwrap();
        let out = s.dispatch(cmd);
        assert_eq!(
            texts(&out),
            vec!["Lilly: 'NETFLIX' is a Want. Consider it only if your Needs are well-covered."]
        );
        assert_eq!(s.history()[0].0, "NETFLIX");
    }

    #[test]
    fn item_tables_titled() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let out = s.dispatch(Command::Item(Category::Need, "Rent".to_string()));
        assert!(texts(&out).iter().any(|t| t.starts_with("Your Needs\n┌")));
        assert!(out.contains(&Notice::Header("Your Wants".to_string())));
        assert!(texts(&out).contains(&"No Wants added yet."));
    }

    #[test]
    fn graph_with_large_amounts() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        add(&mut s, dt!(2024-1-1), Amount::MAX.0, 0);
        add(&mut s, dt!(2024-1-2), Amount::MAX.0, 0);
        add(&mut s, dt!(2024-1-3), u64::MAX, 0);
        add(&mut s, dt!(2024-1-4), 1, 0);
        let out = s.dispatch(Command::Page(Page::Graph));
        assert!(texts(&out).contains(&"Total Spending: 18446744073709551615  |  Total Saving: 0"));
        assert_eq!(warnings(&out), vec!["Warning: spending > saving"]);
        assert!(dir.path().join("chart.svg").exists());
    }

    #[test]
    fn bot_rename() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        assert_eq!(s.bot(), "Lilly");
        let out = s.dispatch(Command::Bot("Daisy"));
        assert_eq!(s.bot(), "Daisy");
        assert!(texts(&out).contains(&"You are now chatting with Daisy 🤖"));
    }

    #[test]
    fn chart_command() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = session(&dir);
        let other = dir.path().join("other.svg");
        let out = s.dispatch(Command::Chart(Some(other.clone())));
        assert_eq!(warnings(&out).len(), 1);
        add(&mut s, dt!(2024-1-1), 1, 2);
        s.dispatch(Command::Chart(Some(other.clone())));
        assert!(other.exists());
    }
}
