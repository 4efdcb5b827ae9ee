use chrono::NaiveDate;
use std::fmt;
use std::ops;

/// A non-negative whole amount of money
///
/// Negative values are unrepresentable: the command parser only ever
/// produces unsigned digits, and rejects anything above `Amount::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(pub u64);

impl Amount {
    /// Largest amount a single record accepts
    ///
    /// Leaves room for a million records to be summed and still fit
    /// in the `i64` scale of the chart.
    pub const MAX: Amount = Amount(i64::MAX as u64 >> 20);
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

/// One line of the finance table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinanceRecord {
    pub date: NaiveDate,
    pub spending: Amount,
    pub saving: Amount,
}

/// Needs are essentials, wants are extras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Need,
    Want,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A labelled item filed under one of the two categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedItem {
    pub item: String,
    pub category: Category,
}
