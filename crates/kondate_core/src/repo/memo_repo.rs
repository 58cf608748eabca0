//! Memo repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Map one calendar day to one `DayMemo`.
//! - Keep entries for the lifetime of the owning session.
//!
//! # Invariants
//! - Keys are created lazily on first write and never removed.
//! - A write fully replaces the previous memo for that day.

use crate::model::calendar::CalendarDate;
use crate::model::memo::DayMemo;
use std::collections::BTreeMap;

/// Repository interface for day memo storage.
pub trait MemoRepository {
    /// Gets the memo stored for `date`, if any.
    fn get_memo(&self, date: CalendarDate) -> Option<&DayMemo>;
    /// Replaces the memo stored for `date`.
    fn put_memo(&mut self, date: CalendarDate, memo: DayMemo);
    /// Number of days with a stored memo.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Volatile, ordered memo store. Dropped with its owning session.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemoRepository {
    entries: BTreeMap<CalendarDate, DayMemo>,
}

impl InMemoryMemoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoRepository for InMemoryMemoRepository {
    fn get_memo(&self, date: CalendarDate) -> Option<&DayMemo> {
        self.entries.get(&date)
    }

    fn put_memo(&mut self, date: CalendarDate, memo: DayMemo) {
        self.entries.insert(date, memo);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryMemoRepository, MemoRepository};
    use crate::model::calendar::CalendarDate;
    use crate::model::memo::DayMemo;

    fn date(raw: &str) -> CalendarDate {
        CalendarDate::parse_key(raw).unwrap()
    }

    #[test]
    fn put_overwrites_and_get_reads_back() {
        let mut repo = InMemoryMemoRepository::new();
        assert!(repo.is_empty());
        repo.put_memo(date("2024-01-08"), DayMemo::new("・soup", ""));
        repo.put_memo(date("2024-01-08"), DayMemo::new("・rice", "・milk"));
        assert_eq!(repo.len(), 1);
        assert_eq!(
            repo.get_memo(date("2024-01-08")),
            Some(&DayMemo::new("・rice", "・milk"))
        );
        assert_eq!(repo.get_memo(date("2024-01-09")), None);
    }
}
