// Storage page view state
//
// Page-local and never persisted: it only tracks which database panel is
// active between change events.

use crate::models::page::DbPanel;

/// Exactly one panel is active at any time; `Sqlite` until changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageView {
    active: DbPanel,
}

impl Default for StorageView {
    fn default() -> Self {
        Self {
            active: DbPanel::Sqlite,
        }
    }
}

impl StorageView {
    pub fn active_panel(&self) -> DbPanel {
        self.active
    }

    /// Make `panel` the active one and return the panel it replaces.
    pub fn set_active_panel(&mut self, panel: DbPanel) -> DbPanel {
        std::mem::replace(&mut self.active, panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_sqlite() {
        assert_eq!(StorageView::default().active_panel(), DbPanel::Sqlite);
    }

    #[test]
    fn set_active_panel_returns_previous() {
        let mut view = StorageView::default();
        assert_eq!(view.set_active_panel(DbPanel::Mysql), DbPanel::Sqlite);
        assert_eq!(view.set_active_panel(DbPanel::Postgres), DbPanel::Mysql);
        assert_eq!(view.set_active_panel(DbPanel::Postgres), DbPanel::Postgres);
        assert_eq!(view.active_panel(), DbPanel::Postgres);
    }
}
