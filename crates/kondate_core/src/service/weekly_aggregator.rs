//! Weekly summary aggregation.
//!
//! # Responsibility
//! - Concatenate filled menus of one window into a clipboard export.
//! - Reduce per-day shopping lines into a deduplicated item list.
//!
//! # Invariants
//! - Items keep first-seen order; dates within an item keep window order.
//! - Items match by exact text after bullet stripping (no fuzzy dedup).
//! - Results are derived on demand and never written back to storage.

use crate::model::calendar::{CalendarDate, WeekWindow};
use crate::repo::memo_repo::MemoRepository;
use crate::service::memo_service::MemoService;
use crate::service::text::{split_lines, strip_bullet};
use serde::Serialize;
use std::collections::HashMap;

/// One distinct shopping item and the days it appears on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingEntry {
    pub item: String,
    pub days: Vec<CalendarDate>,
}

impl ShoppingEntry {
    /// Whether the item is needed on more than one day of the window.
    pub fn is_recurring(&self) -> bool {
        self.days.len() > 1
    }
}

/// Ordered item → days mapping for one window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingAggregate {
    entries: Vec<ShoppingEntry>,
    index: HashMap<String, usize>,
}

impl ShoppingAggregate {
    /// Appends `date` to the list of `item`, creating the entry on first sight.
    pub fn record(&mut self, item: &str, date: CalendarDate) {
        match self.index.get(item) {
            Some(&position) => self.entries[position].days.push(date),
            None => {
                self.index.insert(item.to_string(), self.entries.len());
                self.entries.push(ShoppingEntry {
                    item: item.to_string(),
                    days: vec![date],
                });
            }
        }
    }

    /// Days on which `item` appears, if it appears at all.
    pub fn days_for(&self, item: &str) -> Option<&[CalendarDate]> {
        self.index
            .get(item)
            .map(|&position| self.entries[position].days.as_slice())
    }

    pub fn entries(&self) -> &[ShoppingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text export: one distinct item per line.
    pub fn export(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\n", entry.item))
            .collect()
    }
}

/// Read-only menu row for one day of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuDay {
    pub date: CalendarDate,
    pub label: String,
    /// `None` when the day has no menu yet.
    pub menu: Option<String>,
}

/// Aggregated view of one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySummary {
    pub menu_days: Vec<MenuDay>,
    pub menu_export: String,
    pub shopping: ShoppingAggregate,
}

/// Aggregates the memos of every day in `window`.
pub fn aggregate_week<R: MemoRepository>(
    window: &WeekWindow,
    memos: &MemoService<R>,
) -> WeeklySummary {
    let mut menu_days = Vec::with_capacity(window.days().len());
    let mut menu_export = String::new();
    let mut shopping = ShoppingAggregate::default();

    for &date in window {
        let memo = memos.get(date);
        let label = date.display_label();

        if memo.menu.is_empty() {
            menu_days.push(MenuDay {
                date,
                label,
                menu: None,
            });
        } else {
            menu_export.push_str(&format!("{label}\n{}\n\n", memo.menu));
            menu_days.push(MenuDay {
                date,
                label,
                menu: Some(memo.menu),
            });
        }

        for item in split_lines(&memo.shopping)
            .map(strip_bullet)
            .filter(|item| !item.is_empty())
        {
            shopping.record(item, date);
        }
    }

    WeeklySummary {
        menu_days,
        menu_export,
        shopping,
    }
}

#[cfg(test)]
mod tests {
    use super::{aggregate_week, ShoppingAggregate};
    use crate::model::calendar::{resolve_week, CalendarDate};
    use crate::repo::memo_repo::InMemoryMemoRepository;
    use crate::service::memo_service::MemoService;

    fn date(raw: &str) -> CalendarDate {
        CalendarDate::parse_key(raw).unwrap()
    }

    #[test]
    fn record_keeps_first_seen_order() {
        let mut aggregate = ShoppingAggregate::default();
        aggregate.record("eggs", date("2024-01-08"));
        aggregate.record("milk", date("2024-01-08"));
        aggregate.record("eggs", date("2024-01-10"));

        let items = aggregate
            .entries()
            .iter()
            .map(|entry| entry.item.as_str())
            .collect::<Vec<_>>();
        assert_eq!(items, vec!["eggs", "milk"]);
        assert!(aggregate.entries()[0].is_recurring());
        assert!(!aggregate.entries()[1].is_recurring());
        assert_eq!(aggregate.export(), "eggs\nmilk\n");
        assert_eq!(aggregate.days_for("tofu"), None);
    }

    #[test]
    fn empty_window_produces_empty_summary() {
        let memos = MemoService::new(InMemoryMemoRepository::new());
        let summary = aggregate_week(&resolve_week(date("2024-01-10")), &memos);
        assert_eq!(summary.menu_export, "");
        assert!(summary.shopping.is_empty());
        assert_eq!(summary.menu_days.len(), 7);
        assert!(summary.menu_days.iter().all(|day| day.menu.is_none()));
    }

    #[test]
    fn days_outside_window_are_ignored() {
        let mut memos = MemoService::new(InMemoryMemoRepository::new());
        memos.save(date("2024-01-06"), "last week", "milk");
        memos.save(date("2024-01-07"), "", "milk");
        let summary = aggregate_week(&resolve_week(date("2024-01-07")), &memos);
        assert_eq!(summary.shopping.days_for("milk"), Some(&[date("2024-01-07")][..]));
        assert_eq!(summary.menu_export, "");
    }

    #[test]
    fn same_item_twice_on_one_day_lists_the_day_twice() {
        let mut memos = MemoService::new(InMemoryMemoRepository::new());
        memos.save(date("2024-01-08"), "", "milk\nmilk");
        let summary = aggregate_week(&resolve_week(date("2024-01-08")), &memos);
        let days = summary.shopping.days_for("milk").unwrap();
        assert_eq!(days, &[date("2024-01-08"), date("2024-01-08")][..]);
    }
}
