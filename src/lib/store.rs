//! The session's two append-only tables
//!
//! Nothing here is ever updated or removed: records and items only
//! accumulate for as long as the owning session lives. Totals are
//! recomputed from scratch on every query.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::lib::{
    entry::{Amount, CategorizedItem, Category, FinanceRecord},
    summary::Summary,
};

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<FinanceRecord>,
    items: Vec<CategorizedItem>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, always succeeds
    ///
    /// Several records may share the same date.
    pub fn add_finance_record(&mut self, date: NaiveDate, spending: Amount, saving: Amount) {
        debug!("record #{}: {} spending={} saving={}", self.records.len(), date, spending, saving);
        self.records.push(FinanceRecord { date, spending, saving });
    }

    /// Append an item under `category`
    ///
    /// The label is trimmed first; a blank label is dropped without
    /// complaint and `None` is returned.
    pub fn add_categorized_item(&mut self, item: &str, category: Category) -> Option<&CategorizedItem> {
        let item = item.trim();
        if item.is_empty() {
            warn!("ignoring blank item for {}", category);
            return None;
        }
        debug!("item #{}: '{}' as {}", self.items.len(), item, category);
        self.items.push(CategorizedItem {
            item: item.to_string(),
            category,
        });
        self.items.last()
    }

    pub fn total_spending(&self) -> Amount {
        self.summary().spending()
    }

    pub fn total_saving(&self) -> Amount {
        self.summary().saving()
    }

    /// Both totals in one pass over the records
    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }

    /// First record inserted for exactly this date
    pub fn find_by_date(&self, date: NaiveDate) -> Option<&FinanceRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    /// Labels of `category`, in insertion order
    pub fn items_by_category(&self, category: Category) -> Vec<&str> {
        self.items
            .iter()
            .filter(|it| it.category == category)
            .map(|it| it.item.as_str())
            .collect()
    }

    /// Category of the first item whose label matches, ignoring case
    pub fn category_of(&self, item: &str) -> Option<Category> {
        let item = item.trim().to_lowercase();
        self.items
            .iter()
            .find(|it| it.item.to_lowercase() == item)
            .map(|it| it.category)
    }

    pub fn earliest_date(&self) -> Option<NaiveDate> {
        self.records.iter().map(|r| r.date).min()
    }

    pub fn records(&self) -> &[FinanceRecord] {
        &self.records
    }

    pub fn items(&self) -> &[CategorizedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
