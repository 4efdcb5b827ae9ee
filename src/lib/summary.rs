use std::ops;

use crate::lib::entry::{Amount, FinanceRecord};

/// Running totals over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    spending: Amount,
    saving: Amount,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of records into their totals
    pub fn from_records<'r, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'r FinanceRecord>,
    {
        let mut sum = Self::new();
        for rec in records {
            sum += rec;
        }
        sum
    }

    pub fn spending(&self) -> Amount {
        self.spending
    }

    pub fn saving(&self) -> Amount {
        self.saving
    }

    /// Strictly more was spent than saved
    pub fn overspent(&self) -> bool {
        self.spending > self.saving
    }
}

impl ops::AddAssign<&FinanceRecord> for Summary {
    fn add_assign(&mut self, rec: &FinanceRecord) {
        self.spending += rec.spending;
        self.saving += rec.saving;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    macro_rules! rec {
        ( $y:tt - $m:tt - $d:tt : $sp:expr, $sv:expr ) => {
            FinanceRecord {
                date: NaiveDate::from_ymd_opt($y, $m, $d).unwrap(),
                spending: Amount($sp),
                saving: Amount($sv),
            }
        };
    }

    #[test]
    fn totals() {
        let recs = [rec!(2024-1-1: 100, 50), rec!(2024-1-2: 20, 80)];
        let sum = Summary::from_records(&recs);
        assert_eq!(sum.spending(), Amount(120));
        assert_eq!(sum.saving(), Amount(130));
        assert!(!sum.overspent());
    }

    #[test]
    fn overspending_is_strict() {
        assert!(!Summary::from_records(&[rec!(2024-3-1: 40, 40)]).overspent());
        assert!(Summary::from_records(&[rec!(2024-3-1: 41, 40)]).overspent());
        assert!(!Summary::new().overspent());
    }
}
