//! Setup page controllers.
//!
//! One controller per wizard page. [`PageController`] wraps them so the browser entry and the
//! smoke runner can drive any page the same way: mount, load, then change events by element id.

pub mod general;
pub mod login;
pub mod security;
pub mod storage;

use crate::banner::ReportedError;
use crate::dom::PageDom;
use crate::error::Result;
use crate::models::layout::PageLayout;
use crate::models::page::PageKind;
use log::{debug, info};
use serde::Serialize;

pub use general::GeneralPage;
pub use login::LoginPage;
pub use security::SecurityPage;
pub use storage::StoragePage;

#[derive(Debug, Clone)]
pub enum PageController {
    General(GeneralPage),
    Login(LoginPage),
    Security(SecurityPage),
    Storage(StoragePage),
}

impl PageController {
    /// Build the controller for `page` and run its script-time setup.
    pub fn mount<D: PageDom>(page: PageKind, layout: &PageLayout, dom: &mut D) -> Result<Self> {
        let controller = match page {
            PageKind::General => PageController::General(GeneralPage::new(layout.general.clone())),
            PageKind::Login => PageController::Login(LoginPage::new(layout.login.clone())),
            PageKind::Security => {
                PageController::Security(SecurityPage::new(layout.security.clone()))
            }
            PageKind::Storage => {
                PageController::Storage(StoragePage::mount(layout.storage.clone(), dom)?)
            }
        };
        info!("[PHASE: {}] [STEP: mount] Page controller mounted", page);
        Ok(controller)
    }

    pub fn kind(&self) -> PageKind {
        match self {
            PageController::General(_) => PageKind::General,
            PageController::Login(_) => PageKind::Login,
            PageController::Security(_) => PageKind::Security,
            PageController::Storage(_) => PageKind::Storage,
        }
    }

    /// Ids of the elements whose `change` events this page listens to.
    pub fn change_targets(&self) -> Vec<String> {
        match self {
            PageController::General(_) | PageController::Login(_) => Vec::new(),
            PageController::Security(page) => vec![
                page.layout().ssl_checkbox.clone(),
                page.layout().captcha_checkbox.clone(),
            ],
            PageController::Storage(page) => vec![page.layout().db_type.clone()],
        }
    }

    pub fn on_load<D: PageDom>(&mut self, dom: &mut D, href: &str) -> Result<Option<ReportedError>> {
        match self {
            PageController::General(page) => page.on_load(dom, href),
            PageController::Login(page) => page.on_load(dom, href),
            PageController::Security(page) => page.on_load(dom, href),
            PageController::Storage(page) => page.on_load(dom, href),
        }
    }

    /// Route a `change` event fired by `element_id`. Returns false when this page has no
    /// handler for that element.
    pub fn on_change<D: PageDom>(&mut self, dom: &mut D, element_id: &str) -> Result<bool> {
        let kind = self.kind();
        match self {
            PageController::Security(page) if element_id == page.layout().ssl_checkbox => {
                page.on_ssl_toggled(dom)?;
            }
            PageController::Security(page) if element_id == page.layout().captcha_checkbox => {
                page.on_captcha_toggled(dom)?;
            }
            PageController::Storage(page) if element_id == page.layout().db_type => {
                page.on_db_type_changed(dom)?;
            }
            _ => {
                debug!(
                    "[PHASE: {}] [STEP: change] No handler for #{}",
                    kind,
                    element_id
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// One row of the error code contract between the setup handler and the pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub page: PageKind,
    pub code: &'static str,
    pub location: String,
    pub banner: String,
    pub message: &'static str,
}

/// Every code each page understands, with the banner it lands in under `layout`.
pub fn catalog(layout: &PageLayout) -> Vec<CatalogEntry> {
    let mut rows = Vec::new();
    let mut push = |page: PageKind, code: &'static str, banner: &str, message: &'static str| {
        rows.push(CatalogEntry {
            page,
            code,
            location: page.error_location(code),
            banner: banner.to_string(),
            message,
        });
    };

    for e in general::GENERAL_ERRORS.entries() {
        push(PageKind::General, e.code, &layout.general.error_banner, e.message);
    }
    for e in login::LOGIN_ERRORS.entries() {
        push(PageKind::Login, e.code, &layout.login.error_banner, e.message);
    }
    let security_page = SecurityPage::new(layout.security.clone());
    for e in security::SECURITY_ERRORS.entries() {
        push(PageKind::Security, e.code, security_page.banner_id(e.action), e.message);
    }
    for e in storage::STORAGE_ERRORS.entries() {
        push(PageKind::Storage, e.code, &layout.storage.error_banner, e.message);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;

    fn mounted(page: PageKind) -> (PageController, MemoryDocument) {
        let layout = PageLayout::default();
        let mut doc = MemoryDocument::for_page(page, &layout);
        let controller = PageController::mount(page, &layout, &mut doc).unwrap();
        (controller, doc)
    }

    #[test]
    fn change_targets_per_page() {
        assert!(mounted(PageKind::General).0.change_targets().is_empty());
        assert!(mounted(PageKind::Login).0.change_targets().is_empty());
        assert_eq!(
            mounted(PageKind::Security).0.change_targets(),
            vec!["useSSL", "useCaptch"]
        );
        assert_eq!(mounted(PageKind::Storage).0.change_targets(), vec!["dbType"]);
    }

    #[test]
    fn on_change_routes_by_element() {
        let (mut controller, mut doc) = mounted(PageKind::Security);
        doc.check("useSSL", true).unwrap();
        assert!(controller.on_change(&mut doc, "useSSL").unwrap());
        assert!(doc.is_enabled("privateKey"));
        assert!(!doc.is_enabled("siteKey"));

        assert!(!controller.on_change(&mut doc, "privateKey").unwrap());
    }

    #[test]
    fn on_change_drives_storage_dropdown() {
        let (mut controller, mut doc) = mounted(PageKind::Storage);
        doc.select("dbType", "MySQL").unwrap();
        assert!(controller.on_change(&mut doc, "dbType").unwrap());
        assert!(doc.is_visible("mysql-config"));
        assert!(!doc.is_visible("sql-config"));
    }

    #[test]
    fn on_load_dispatches_to_page() {
        let (mut controller, mut doc) = mounted(PageKind::Login);
        let reported = controller
            .on_load(&mut doc, "http://localhost/login?err=1")
            .unwrap()
            .unwrap();
        assert_eq!(reported.page, PageKind::Login);
        assert_eq!(controller.kind(), PageKind::Login);
    }

    #[test]
    fn catalog_covers_every_table() {
        let rows = catalog(&PageLayout::default());
        assert_eq!(rows.len(), 4 + 1 + 7 + 4);

        let captcha: Vec<_> = rows
            .iter()
            .filter(|r| r.banner == "captcha-error")
            .map(|r| r.code)
            .collect();
        assert_eq!(captcha, vec!["6", "7"]);

        let pg = rows
            .iter()
            .find(|r| r.page == PageKind::Storage && r.code == "420")
            .unwrap();
        assert_eq!(pg.location, "/storage?err=420");
    }

    #[test]
    fn catalog_messages_round_trip_through_pages() {
        let layout = PageLayout::default();
        for row in catalog(&layout) {
            let (mut controller, mut doc) = mounted(row.page);
            let href = format!("http://127.0.0.1:8080{}", row.location);
            let reported = controller.on_load(&mut doc, &href).unwrap().unwrap();
            assert_eq!(reported.banner, row.banner);
            assert_eq!(doc.banner_text(&row.banner).as_deref(), Some(row.message));
        }
    }
}
