//! Memo use-case service.
//!
//! # Responsibility
//! - Provide day-level get/save entry points over a memo repository.
//! - Normalize free text before it reaches storage.
//!
//! # Invariants
//! - `get` never fails; absent days read as an empty memo.
//! - `save` always stores normalized text and fully replaces the day.

use crate::model::calendar::CalendarDate;
use crate::model::memo::DayMemo;
use crate::repo::memo_repo::MemoRepository;
use crate::service::text::normalize_lines;
use log::info;

/// Use-case facade for day memos.
#[derive(Debug, Clone, Default)]
pub struct MemoService<R: MemoRepository> {
    repo: R,
}

impl<R: MemoRepository> MemoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets the memo for `date`, or an empty memo when none was saved.
    pub fn get(&self, date: CalendarDate) -> DayMemo {
        self.repo.get_memo(date).cloned().unwrap_or_default()
    }

    /// Normalizes both fields and replaces the memo stored for `date`.
    ///
    /// Returns the memo as stored.
    pub fn save(&mut self, date: CalendarDate, menu_text: &str, shopping_text: &str) -> DayMemo {
        let memo = DayMemo::new(normalize_lines(menu_text), normalize_lines(shopping_text));
        info!(
            "event=memo_save module=service status=ok date={} menu_lines={} shopping_lines={}",
            date,
            line_count(&memo.menu),
            line_count(&memo.shopping)
        );
        self.repo.put_memo(date, memo.clone());
        memo
    }

    /// Number of days holding a saved memo.
    pub fn saved_days(&self) -> usize {
        self.repo.len()
    }
}

fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.lines().count()
    }
}
