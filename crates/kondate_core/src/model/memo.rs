//! Per-day memo record.
//!
//! # Responsibility
//! - Hold the normalized menu and shopping text for one calendar day.
//!
//! # Invariants
//! - Stored text is always the output of `normalize_lines`.
//! - A missing memo is equivalent to `DayMemo::default()`.

use serde::{Deserialize, Serialize};

/// Menu and shopping notes for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMemo {
    /// Bulleted menu lines, empty when not filled.
    pub menu: String,
    /// Bulleted shopping lines, empty when not filled.
    pub shopping: String,
}

impl DayMemo {
    pub fn new(menu: impl Into<String>, shopping: impl Into<String>) -> Self {
        Self {
            menu: menu.into(),
            shopping: shopping.into(),
        }
    }

    /// Returns whether neither field carries any text.
    pub fn is_empty(&self) -> bool {
        self.menu.is_empty() && self.shopping.is_empty()
    }
}
