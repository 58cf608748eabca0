//! Session state and the planner event loop.
//!
//! # Responsibility
//! - Own everything one browser session keeps between interactions.
//! - Apply one user event at a time and rebuild the view afterwards.
//!
//! # Invariants
//! - `selected` always lies inside `window`.
//! - Edit buffers are reloaded from the store whenever the selected day
//!   changes; unsaved edits of the previous day are discarded.
//! - A flash message survives exactly one render.

use crate::model::calendar::{resolve_week, CalendarDate, WeekWindow};
use crate::repo::memo_repo::InMemoryMemoRepository;
use crate::service::memo_service::MemoService;
use crate::view::page::PlannerView;
use log::{debug, info};
use std::collections::BTreeSet;

/// One user interaction delivered by the render host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerEvent {
    /// Re-render without changing anything.
    Refresh,
    /// Date picker moved; may switch the displayed week.
    PickDate(CalendarDate),
    /// A day tab was chosen.
    SelectDay(CalendarDate),
    /// Menu text area changed.
    EditMenu(String),
    /// Shopping text area changed.
    EditShopping(String),
    /// Save button pressed for the selected day.
    Save,
    /// Shopping checkbox flipped for an item.
    ToggleItem(String),
}

/// Session-scoped planner state.
#[derive(Debug, Clone)]
pub struct SessionState {
    memos: MemoService<InMemoryMemoRepository>,
    window: WeekWindow,
    selected: CalendarDate,
    menu_input: String,
    shopping_input: String,
    checked_items: BTreeSet<String>,
    flash: Option<String>,
}

impl SessionState {
    /// Starts a session on the week containing `today`, Sunday selected.
    pub fn new(today: CalendarDate) -> Self {
        let window = resolve_week(today);
        let mut state = Self {
            memos: MemoService::new(InMemoryMemoRepository::new()),
            window,
            selected: window.start(),
            menu_input: String::new(),
            shopping_input: String::new(),
            checked_items: BTreeSet::new(),
            flash: None,
        };
        state.load_buffers();
        state
    }

    /// Applies one event, mutating the state in place.
    pub fn apply(&mut self, event: PlannerEvent) {
        self.flash = None;
        match event {
            PlannerEvent::Refresh => {}
            PlannerEvent::PickDate(date) => {
                let window = resolve_week(date);
                if window != self.window {
                    debug!(
                        "event=week_switch module=view status=ok from={} to={}",
                        self.window.start(),
                        window.start()
                    );
                    self.window = window;
                    self.select(window.start());
                }
            }
            PlannerEvent::SelectDay(date) => {
                if !self.window.contains(date) {
                    self.window = resolve_week(date);
                }
                self.select(date);
            }
            PlannerEvent::EditMenu(text) => self.menu_input = text,
            PlannerEvent::EditShopping(text) => self.shopping_input = text,
            PlannerEvent::Save => {
                self.memos
                    .save(self.selected, &self.menu_input, &self.shopping_input);
                self.flash = Some(format!("{} の内容を保存しました。", self.selected));
            }
            PlannerEvent::ToggleItem(item) => {
                if !self.checked_items.remove(&item) {
                    self.checked_items.insert(item);
                }
            }
        }
    }

    /// Builds the view for the current state.
    pub fn render(&self) -> PlannerView {
        PlannerView::build(self)
    }

    pub fn window(&self) -> &WeekWindow {
        &self.window
    }

    pub fn selected(&self) -> CalendarDate {
        self.selected
    }

    pub fn menu_input(&self) -> &str {
        &self.menu_input
    }

    pub fn shopping_input(&self) -> &str {
        &self.shopping_input
    }

    pub fn flash(&self) -> Option<&str> {
        self.flash.as_deref()
    }

    pub fn is_checked(&self, item: &str) -> bool {
        self.checked_items.contains(item)
    }

    pub fn memos(&self) -> &MemoService<InMemoryMemoRepository> {
        &self.memos
    }

    fn select(&mut self, date: CalendarDate) {
        if date == self.selected {
            return;
        }
        self.selected = date;
        self.load_buffers();
    }

    fn load_buffers(&mut self) {
        let memo = self.memos.get(self.selected);
        self.menu_input = memo.menu;
        self.shopping_input = memo.shopping;
        info!(
            "event=day_select module=view status=ok date={} saved_days={}",
            self.selected,
            self.memos.saved_days()
        );
    }
}

/// Applies `event` to `state` and renders the result.
pub fn step(mut state: SessionState, event: PlannerEvent) -> (SessionState, PlannerView) {
    state.apply(event);
    let view = state.render();
    (state, view)
}

#[cfg(test)]
mod tests {
    use super::{step, PlannerEvent, SessionState};
    use crate::model::calendar::CalendarDate;

    fn date(raw: &str) -> CalendarDate {
        CalendarDate::parse_key(raw).unwrap()
    }

    #[test]
    fn new_session_selects_sunday_of_current_week() {
        let state = SessionState::new(date("2024-01-10"));
        assert_eq!(state.window().start(), date("2024-01-07"));
        assert_eq!(state.selected(), date("2024-01-07"));
        assert_eq!(state.menu_input(), "");
    }

    #[test]
    fn picking_date_in_same_week_keeps_selection_and_buffers() {
        let mut state = SessionState::new(date("2024-01-07"));
        state.apply(PlannerEvent::SelectDay(date("2024-01-09")));
        state.apply(PlannerEvent::EditMenu("draft".to_string()));
        state.apply(PlannerEvent::PickDate(date("2024-01-12")));
        assert_eq!(state.selected(), date("2024-01-09"));
        assert_eq!(state.menu_input(), "draft");
    }

    #[test]
    fn picking_date_in_other_week_moves_window_and_selects_sunday() {
        let mut state = SessionState::new(date("2024-01-07"));
        state.apply(PlannerEvent::PickDate(date("2024-01-17")));
        assert_eq!(state.window().start(), date("2024-01-14"));
        assert_eq!(state.selected(), date("2024-01-14"));
    }

    #[test]
    fn switching_days_discards_unsaved_edits() {
        let mut state = SessionState::new(date("2024-01-07"));
        state.apply(PlannerEvent::SelectDay(date("2024-01-08")));
        state.apply(PlannerEvent::EditMenu("unsaved".to_string()));
        state.apply(PlannerEvent::SelectDay(date("2024-01-09")));
        state.apply(PlannerEvent::SelectDay(date("2024-01-08")));
        assert_eq!(state.menu_input(), "");
    }

    #[test]
    fn save_stores_normalized_text_and_flashes_once() {
        let state = SessionState::new(date("2024-01-07"));
        let (state, _) = step(state, PlannerEvent::SelectDay(date("2024-01-08")));
        let (state, _) = step(state, PlannerEvent::EditMenu(" Soup \n\n".to_string()));
        let (state, view) = step(state, PlannerEvent::Save);
        assert_eq!(view.flash.as_deref(), Some("2024-01-08 の内容を保存しました。"));
        assert_eq!(state.memos().get(date("2024-01-08")).menu, "・Soup");
        assert_eq!(state.menu_input(), " Soup \n\n");

        let (_, view) = step(state, PlannerEvent::Refresh);
        assert_eq!(view.flash, None);
    }

    #[test]
    fn returning_to_saved_day_loads_stored_text() {
        let mut state = SessionState::new(date("2024-01-07"));
        state.apply(PlannerEvent::EditShopping("milk\nbread".to_string()));
        state.apply(PlannerEvent::Save);
        state.apply(PlannerEvent::SelectDay(date("2024-01-08")));
        state.apply(PlannerEvent::SelectDay(date("2024-01-07")));
        assert_eq!(state.shopping_input(), "・milk\n・bread");
    }

    #[test]
    fn selecting_day_outside_window_re_resolves_window() {
        let mut state = SessionState::new(date("2024-01-07"));
        state.apply(PlannerEvent::SelectDay(date("2024-01-03")));
        assert_eq!(state.window().start(), date("2023-12-31"));
        assert_eq!(state.selected(), date("2024-01-03"));
    }

    #[test]
    fn toggle_item_flips_checkbox() {
        let mut state = SessionState::new(date("2024-01-07"));
        state.apply(PlannerEvent::ToggleItem("milk".to_string()));
        assert!(state.is_checked("milk"));
        state.apply(PlannerEvent::ToggleItem("milk".to_string()));
        assert!(!state.is_checked("milk"));
    }
}
