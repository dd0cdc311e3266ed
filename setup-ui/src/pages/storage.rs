// Storage page: database backend selection
//
// Three panels (SQLite, MySQL, PostgreSQL) share the page; only the active one is shown with its
// inputs enabled. The dropdown drives the choice, and a database error on load forces the panel
// the error is about.

use crate::banner::{report_error, ErrorEntry, ErrorTable, ReportedError};
use crate::dom::PageDom;
use crate::error::Result;
use crate::models::layout::StorageLayout;
use crate::models::page::{DbPanel, PageKind};
use crate::models::state::StorageView;
use log::{info, warn};

pub static STORAGE_ERRORS: ErrorTable<DbPanel> = ErrorTable::new(&[
    ErrorEntry {
        code: "1",
        message: "Invalid SQLite database location. Does the folder exist and ForumRS has sufficient permissions to write to it?",
        action: DbPanel::Sqlite,
    },
    ErrorEntry {
        code: "2",
        message: "Please enter a value for every MySQL box.",
        action: DbPanel::Mysql,
    },
    ErrorEntry {
        code: "3",
        message: "ForumRS cannot connect to the MySQL server. Please check the host, port and login details.",
        action: DbPanel::Mysql,
    },
    ErrorEntry {
        code: "420",
        message: "PostgreSQL is not yet implemented. Please choose SQLite or MySQL.",
        action: DbPanel::Postgres,
    },
]);

#[derive(Debug, Clone)]
pub struct StoragePage {
    layout: StorageLayout,
    view: StorageView,
}

impl StoragePage {
    /// Initial panel setup: MySQL and PostgreSQL hidden with their inputs disabled, SQLite
    /// active as served.
    pub fn mount<D: PageDom>(layout: StorageLayout, dom: &mut D) -> Result<Self> {
        dom.get_element(&layout.db_type)?;
        for panel in DbPanel::ALL {
            dom.get_element(layout.panel_id(panel))?;
        }

        let page = Self {
            layout,
            view: StorageView::default(),
        };
        for panel in [DbPanel::Mysql, DbPanel::Postgres] {
            page.set_panel_active(dom, panel, false)?;
        }

        info!(
            "[PHASE: storage] [STEP: mount] Storage page mounted, active panel {}",
            page.view.active_panel()
        );
        Ok(page)
    }

    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    pub fn active_panel(&self) -> DbPanel {
        self.view.active_panel()
    }

    /// Change handler of the database type dropdown.
    ///
    /// An unrecognized option value leaves the active panel in place: it is switched off and
    /// straight back on.
    pub fn on_db_type_changed<D: PageDom>(&mut self, dom: &mut D) -> Result<DbPanel> {
        let select = dom.get_element(&self.layout.db_type)?;
        let value = dom.value(&select)?;
        let next = match DbPanel::from_label(&value) {
            Some(panel) => panel,
            None => {
                warn!(
                    "[PHASE: storage] [STEP: db_type_change] Unrecognized database type '{}', keeping {}",
                    value,
                    self.view.active_panel()
                );
                self.view.active_panel()
            }
        };

        self.switch_to(dom, next)?;
        info!(
            "[PHASE: storage] [STEP: db_type_change] Active panel {}",
            next
        );
        Ok(next)
    }

    /// Switch panels without user input and write the result back into the dropdown.
    pub fn force_panel<D: PageDom>(&mut self, dom: &mut D, panel: DbPanel) -> Result<()> {
        self.switch_to(dom, panel)?;
        let select = dom.get_element(&self.layout.db_type)?;
        dom.set_value(&select, panel.label())?;
        info!(
            "[PHASE: storage] [STEP: force_panel] Forced active panel {}",
            panel
        );
        Ok(())
    }

    pub fn on_load<D: PageDom>(&mut self, dom: &mut D, href: &str) -> Result<Option<ReportedError>> {
        let banner = self.layout.error_banner.clone();
        report_error(
            dom,
            PageKind::Storage,
            &STORAGE_ERRORS,
            href,
            move |_| banner,
            |dom, panel| self.force_panel(dom, *panel),
        )
    }

    fn switch_to<D: PageDom>(&mut self, dom: &mut D, panel: DbPanel) -> Result<()> {
        let current = self.view.active_panel();
        self.set_panel_active(dom, current, false)?;
        self.view.set_active_panel(panel);
        self.set_panel_active(dom, panel, true)
    }

    fn set_panel_active<D: PageDom>(&self, dom: &mut D, panel: DbPanel, active: bool) -> Result<()> {
        let container = dom.get_element(self.layout.panel_id(panel))?;
        for input in dom.inputs_within(&container) {
            dom.set_enabled(&input, active)?;
        }
        dom.set_visible(&container, active)
    }
}
