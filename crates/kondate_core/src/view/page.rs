//! Render-ready projection of one session.
//!
//! # Responsibility
//! - Flatten session state and the weekly summary into plain view data.
//! - Keep the render host free of business rules (recurring flags, exports).

use crate::model::calendar::CalendarDate;
use crate::service::weekly_aggregator::{aggregate_week, MenuDay};
use crate::view::clipboard::ClipboardButton;
use crate::view::session::SessionState;
use serde::Serialize;

/// Page title shown by every host.
pub const PAGE_TITLE: &str = "📋 献立＆買い物リスト（週間）";

/// One selectable day of the displayed week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTab {
    pub date: CalendarDate,
    pub label: String,
    pub selected: bool,
}

/// One deduplicated shopping checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingLine {
    pub item: String,
    pub days: Vec<CalendarDate>,
    /// Rendered with a repeat indicator.
    pub recurring: bool,
    pub checked: bool,
}

/// Read-only weekly summary column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub menu_days: Vec<MenuDay>,
    pub shopping: Vec<ShoppingLine>,
    pub menu_export: String,
    pub shopping_export: String,
    pub menu_button: ClipboardButton,
    pub shopping_button: ClipboardButton,
}

/// Everything a host needs to draw the planner page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannerView {
    pub title: &'static str,
    /// Date shown in the week picker (the window's Sunday).
    pub week_start: CalendarDate,
    pub days: Vec<DayTab>,
    pub selected: CalendarDate,
    pub menu_input: String,
    pub shopping_input: String,
    pub flash: Option<String>,
    pub sidebar: Sidebar,
}

impl PlannerView {
    /// Projects `state` into view data, re-aggregating the current window.
    pub fn build(state: &SessionState) -> Self {
        let window = state.window();
        let summary = aggregate_week(window, state.memos());

        let days = window
            .days()
            .iter()
            .map(|&date| DayTab {
                date,
                label: date.display_label(),
                selected: date == state.selected(),
            })
            .collect();

        let shopping_export = summary.shopping.export();
        let shopping = summary
            .shopping
            .entries()
            .iter()
            .map(|entry| ShoppingLine {
                item: entry.item.clone(),
                days: entry.days.clone(),
                recurring: entry.is_recurring(),
                checked: state.is_checked(&entry.item),
            })
            .collect();

        Self {
            title: PAGE_TITLE,
            week_start: window.start(),
            days,
            selected: state.selected(),
            menu_input: state.menu_input().to_string(),
            shopping_input: state.shopping_input().to_string(),
            flash: state.flash().map(str::to_string),
            sidebar: Sidebar {
                menu_days: summary.menu_days,
                shopping,
                menu_button: ClipboardButton::menu(summary.menu_export.clone()),
                shopping_button: ClipboardButton::shopping(shopping_export.clone()),
                menu_export: summary.menu_export,
                shopping_export,
            },
        }
    }
}
