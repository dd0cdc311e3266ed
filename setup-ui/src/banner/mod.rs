//! Error banners driven by the `err` query parameter.
//!
//! Each page owns a static [`ErrorTable`] mapping the codes the setup handler can redirect with
//! to a message and a page-specific action (which banner to use, which panel to force).
//! [`report_error`] is the one load-time flow all pages share.

pub mod query;

use crate::dom::PageDom;
use crate::error::{Result, SetupUiError};
use crate::models::page::PageKind;
use log::{debug, info};
use serde::Serialize;

pub use query::read_error_code;

/// One recognized failure code.
#[derive(Debug)]
pub struct ErrorEntry<A> {
    pub code: &'static str,
    pub message: &'static str,
    pub action: A,
}

/// Fixed code table of one page. Codes are matched exactly; anything else is ignored.
#[derive(Debug)]
pub struct ErrorTable<A: 'static> {
    entries: &'static [ErrorEntry<A>],
}

impl<A: 'static> ErrorTable<A> {
    pub const fn new(entries: &'static [ErrorEntry<A>]) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, code: &str) -> Option<&'static ErrorEntry<A>> {
        self.entries.iter().find(|e| e.code == code)
    }

    pub fn entries(&self) -> &'static [ErrorEntry<A>] {
        self.entries
    }
}

/// What a page showed for the code it was loaded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedError {
    pub page: PageKind,
    pub code: String,
    pub banner: String,
    pub message: String,
}

/// Put `message` in the banner's slot and reveal the banner.
pub fn show_banner<D: PageDom>(dom: &mut D, banner_id: &str, message: &str) -> Result<()> {
    let banner = dom.get_element(banner_id)?;
    let slot = dom
        .message_slot(&banner)
        .ok_or_else(|| SetupUiError::MissingMessageSlot(banner_id.to_string()))?;
    dom.set_text(&slot, message)?;
    dom.set_visible(&banner, true)
}

/// Load-time error reporting shared by every page.
///
/// Reads `err` from `href` and looks it up in `table`. For a match, `effect` runs first (with the
/// entry's action), then the banner chosen by `banner_for` receives the message. Absent and
/// unrecognized codes leave the page untouched; the banner element is not even looked up.
pub fn report_error<D, A, B, E>(
    dom: &mut D,
    page: PageKind,
    table: &ErrorTable<A>,
    href: &str,
    banner_for: B,
    effect: E,
) -> Result<Option<ReportedError>>
where
    D: PageDom,
    A: 'static,
    B: FnOnce(&A) -> String,
    E: FnOnce(&mut D, &A) -> Result<()>,
{
    let Some(code) = read_error_code(href)? else {
        return Ok(None);
    };
    debug!("[PHASE: {}] [STEP: load] err={:?}", page, code);

    let Some(entry) = table.lookup(&code) else {
        debug!(
            "[PHASE: {}] [STEP: load] Ignoring unrecognized error code '{}'",
            page, code
        );
        return Ok(None);
    };

    effect(dom, &entry.action)?;

    let banner = banner_for(&entry.action);
    show_banner(dom, &banner, entry.message)?;
    info!(
        "[PHASE: {}] [STEP: load] Showing error {} in #{}",
        page, code, banner
    );

    Ok(Some(ReportedError {
        page,
        code,
        banner,
        message: entry.message.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDocument, Tag};

    static TABLE: ErrorTable<u8> = ErrorTable::new(&[
        ErrorEntry {
            code: "1",
            message: "first",
            action: 1,
        },
        ErrorEntry {
            code: "42",
            message: "answer",
            action: 42,
        },
    ]);

    fn doc_with_banner() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.append_banner("banner");
        doc
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(TABLE.lookup("42").map(|e| e.action), Some(42));
        assert!(TABLE.lookup("042").is_none());
        assert!(TABLE.lookup(" 1").is_none());
        assert_eq!(TABLE.entries().len(), 2);
    }

    #[test]
    fn report_runs_effect_then_shows_banner() {
        let mut doc = doc_with_banner();
        let mut seen = None;
        let reported = report_error(
            &mut doc,
            PageKind::General,
            &TABLE,
            "http://localhost/general?err=42",
            |_| "banner".to_string(),
            |_, action| {
                seen = Some(*action);
                Ok(())
            },
        )
        .unwrap()
        .unwrap();

        assert_eq!(seen, Some(42));
        assert_eq!(reported.code, "42");
        assert_eq!(reported.message, "answer");
        assert!(doc.is_visible("banner"));
        assert_eq!(doc.banner_text("banner").as_deref(), Some("answer"));
    }

    #[test]
    fn unrecognized_code_never_touches_missing_banner() {
        let mut doc = MemoryDocument::new();
        let reported = report_error(
            &mut doc,
            PageKind::General,
            &TABLE,
            "http://localhost/general?err=7",
            |_| "banner".to_string(),
            |_, _| panic!("effect must not run"),
        )
        .unwrap();
        assert_eq!(reported, None);
    }

    #[test]
    fn recognized_code_with_missing_banner_fails() {
        let mut doc = MemoryDocument::new();
        let err = report_error(
            &mut doc,
            PageKind::General,
            &TABLE,
            "http://localhost/general?err=1",
            |_| "banner".to_string(),
            |_, _| Ok(()),
        )
        .unwrap_err();
        assert_eq!(err, SetupUiError::MissingElement("banner".to_string()));
    }

    #[test]
    fn banner_without_span_fails() {
        let mut doc = MemoryDocument::new();
        doc.append(None, Tag::Div, Some("banner"));
        assert_eq!(
            show_banner(&mut doc, "banner", "x"),
            Err(SetupUiError::MissingMessageSlot("banner".to_string()))
        );
    }

    struct CaptureLogger;

    static LOGGER: CaptureLogger = CaptureLogger;

    static CAPTURED: std::sync::Mutex<Vec<String>> = std::sync::Mutex::new(Vec::new());

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    fn capture_logs() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(log::LevelFilter::Debug);
        });
    }

    #[test]
    fn error_code_read_is_logged_even_when_unrecognized() {
        capture_logs();
        let mut doc = MemoryDocument::new();
        report_error(
            &mut doc,
            PageKind::Login,
            &TABLE,
            "http://localhost/login?err=9137",
            |_| "banner".to_string(),
            |_, _| Ok(()),
        )
        .unwrap();

        let logs = CAPTURED.lock().unwrap();
        assert!(
            logs.iter()
                .any(|l| l == "[PHASE: login] [STEP: load] err=\"9137\""),
            "Expected the read code to be logged, got {:?}",
            *logs
        );
    }
}
