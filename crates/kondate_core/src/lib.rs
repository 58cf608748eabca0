//! Core domain logic for the Kondate weekly planner.
//! This crate is the single source of truth for planner behavior; hosts only
//! translate user input into events and draw the resulting view.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::calendar::{resolve_week, CalendarDate, CalendarError, WeekWindow, WEEKDAY_LABELS};
pub use model::memo::DayMemo;
pub use repo::memo_repo::{InMemoryMemoRepository, MemoRepository};
pub use service::memo_service::MemoService;
pub use service::text::{normalize_lines, strip_bullet, BULLET_MARKER};
pub use service::weekly_aggregator::{
    aggregate_week, MenuDay, ShoppingAggregate, ShoppingEntry, WeeklySummary,
};
pub use view::clipboard::{escape_html, ClipboardButton};
pub use view::page::{DayTab, PlannerView, ShoppingLine, Sidebar, PAGE_TITLE};
pub use view::session::{step, PlannerEvent, SessionState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
