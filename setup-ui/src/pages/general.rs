// General settings page: website name, bind address and domain

use crate::banner::{report_error, ErrorEntry, ErrorTable, ReportedError};
use crate::dom::PageDom;
use crate::error::Result;
use crate::models::layout::GeneralLayout;
use crate::models::page::PageKind;

pub static GENERAL_ERRORS: ErrorTable<()> = ErrorTable::new(&[
    ErrorEntry {
        code: "1",
        message: "A website name is required.",
        action: (),
    },
    ErrorEntry {
        code: "2",
        message: "Invalid IP Address. If you are not sure what to put there, then just use 127.0.0.1!",
        action: (),
    },
    ErrorEntry {
        code: "3",
        message: "Invalid Port. If you are not sure what to put there, then just use 8080!",
        action: (),
    },
    ErrorEntry {
        code: "4",
        message: "Invalid Domain. Please tell ForumRS what domain you intened on using. Do not include http or https. Example: forumrs.example.com.",
        action: (),
    },
]);

#[derive(Debug, Clone)]
pub struct GeneralPage {
    layout: GeneralLayout,
}

impl GeneralPage {
    pub fn new(layout: GeneralLayout) -> Self {
        Self { layout }
    }

    pub fn on_load<D: PageDom>(&self, dom: &mut D, href: &str) -> Result<Option<ReportedError>> {
        report_error(
            dom,
            PageKind::General,
            &GENERAL_ERRORS,
            href,
            |_| self.layout.error_banner.clone(),
            |_, _| Ok(()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use crate::models::layout::PageLayout;

    fn load(href: &str) -> (MemoryDocument, Option<ReportedError>) {
        let layout = PageLayout::default();
        let mut doc = MemoryDocument::for_page(PageKind::General, &layout);
        let reported = GeneralPage::new(layout.general).on_load(&mut doc, href).unwrap();
        (doc, reported)
    }

    #[test]
    fn every_code_shows_its_message() {
        for entry in GENERAL_ERRORS.entries() {
            let (doc, reported) = load(&format!("http://127.0.0.1:8080/general?err={}", entry.code));
            assert!(doc.is_visible("general-error"), "code {} should show banner", entry.code);
            assert_eq!(doc.banner_text("general-error").as_deref(), Some(entry.message));
            assert_eq!(reported.map(|r| r.code), Some(entry.code.to_string()));
        }
    }

    #[test]
    fn missing_or_unknown_code_keeps_banner_hidden() {
        for href in [
            "http://127.0.0.1:8080/general",
            "http://127.0.0.1:8080/general?err=5",
            "http://127.0.0.1:8080/general?err=abc",
            "http://127.0.0.1:8080/general?err=",
        ] {
            let (doc, reported) = load(href);
            assert!(!doc.is_visible("general-error"), "{} should not show banner", href);
            assert_eq!(doc.banner_text("general-error").as_deref(), Some(""));
            assert_eq!(reported, None);
        }
    }

    #[test]
    fn port_error_text() {
        let (doc, _) = load("http://127.0.0.1:8080/general?err=3");
        assert_eq!(
            doc.banner_text("general-error").as_deref(),
            Some("Invalid Port. If you are not sure what to put there, then just use 8080!")
        );
    }
}
