// Deterministic page smoke runner
//
// Builds a page's markup in memory, mounts its controller, runs the load handler for a URL and
// then replays user changes. The transcript records every step so runs can be diffed.

use crate::banner::ReportedError;
use crate::dom::memory::ElementSnapshot;
use crate::dom::MemoryDocument;
use crate::models::layout::PageLayout;
use crate::models::page::PageKind;
use crate::pages::PageController;
use anyhow::{Context, Result};
use serde::Serialize;

/// A user change replayed after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeEvent {
    Check { id: String, checked: bool },
    Select { id: String, value: String },
}

impl SmokeEvent {
    /// Parse `--check=<id>`, `--uncheck=<id>` or `--select=<id>:<value>`. Other arguments are
    /// not events and yield `None`.
    pub fn from_arg(arg: &str) -> Result<Option<Self>> {
        if let Some(id) = arg.strip_prefix("--check=") {
            return Ok(Some(SmokeEvent::Check {
                id: non_empty(id, arg)?,
                checked: true,
            }));
        }
        if let Some(id) = arg.strip_prefix("--uncheck=") {
            return Ok(Some(SmokeEvent::Check {
                id: non_empty(id, arg)?,
                checked: false,
            }));
        }
        if let Some(pair) = arg.strip_prefix("--select=") {
            let (id, value) = pair
                .split_once(':')
                .ok_or_else(|| anyhow::anyhow!("Expected --select=<id>:<value>, got '{}'", arg))?;
            return Ok(Some(SmokeEvent::Select {
                id: non_empty(id, arg)?,
                value: value.to_string(),
            }));
        }
        Ok(None)
    }

    pub fn target(&self) -> &str {
        match self {
            SmokeEvent::Check { id, .. } | SmokeEvent::Select { id, .. } => id,
        }
    }

    fn apply(&self, doc: &mut MemoryDocument) -> Result<()> {
        match self {
            SmokeEvent::Check { id, checked } => doc.check(id, *checked)?,
            SmokeEvent::Select { id, value } => doc.select(id, value)?,
        }
        Ok(())
    }
}

fn non_empty(id: &str, arg: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(anyhow::anyhow!("Missing element id in '{}'", arg));
    }
    Ok(id.trim().to_string())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSmokeReport {
    pub page: PageKind,
    pub href: String,
    pub reported: Option<ReportedError>,
    pub elements: Vec<ElementSnapshot>,
    pub transcript: Vec<String>,
}

/// Run one page through mount, load and `events`.
pub fn page_smoke(
    page: PageKind,
    href: &str,
    events: &[SmokeEvent],
    layout: &PageLayout,
) -> Result<PageSmokeReport> {
    let mut transcript = Vec::new();
    transcript.push("PAGE_SMOKE begin".to_string());
    transcript.push(format!("page={} href={}", page, href));

    let mut doc = MemoryDocument::for_page(page, layout);
    let mut controller = PageController::mount(page, layout, &mut doc)
        .with_context(|| format!("Failed to mount {} page", page))?;
    transcript.push(format!(
        "mount ok change_targets=[{}]",
        controller.change_targets().join(",")
    ));

    let reported = controller
        .on_load(&mut doc, href)
        .with_context(|| format!("Load handler failed for {}", href))?;
    match &reported {
        Some(r) => transcript.push(format!(
            "load err={} banner=#{} message={:?}",
            r.code, r.banner, r.message
        )),
        None => transcript.push("load no banner".to_string()),
    }

    for event in events {
        event.apply(&mut doc)?;
        let handled = controller
            .on_change(&mut doc, event.target())
            .with_context(|| format!("Change handler failed for #{}", event.target()))?;
        transcript.push(format!("event {:?} handled={}", event, handled));
    }

    let elements = doc.snapshot();
    for e in &elements {
        transcript.push(format!(
            "element #{} visible={} enabled={} value={:?} text={:?}",
            e.id, e.visible, e.enabled, e.value, e.text
        ));
    }
    transcript.push("PAGE_SMOKE end".to_string());

    Ok(PageSmokeReport {
        page,
        href: href.to_string(),
        reported,
        elements,
        transcript,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_args_parse() {
        assert_eq!(
            SmokeEvent::from_arg("--check=useSSL").unwrap(),
            Some(SmokeEvent::Check {
                id: "useSSL".to_string(),
                checked: true
            })
        );
        assert_eq!(
            SmokeEvent::from_arg("--select=dbType:PostgreSQL").unwrap(),
            Some(SmokeEvent::Select {
                id: "dbType".to_string(),
                value: "PostgreSQL".to_string()
            })
        );
        assert_eq!(SmokeEvent::from_arg("--url=http://x").unwrap(), None);
        assert!(SmokeEvent::from_arg("--select=dbType").is_err());
        assert!(SmokeEvent::from_arg("--uncheck=").is_err());
    }

    #[test]
    fn storage_smoke_records_forced_panel_then_user_change() {
        let events = vec![SmokeEvent::Select {
            id: "dbType".to_string(),
            value: "PostgreSQL".to_string(),
        }];
        let report = page_smoke(
            PageKind::Storage,
            "http://127.0.0.1:8080/storage?err=3",
            &events,
            &PageLayout::default(),
        )
        .unwrap();

        assert_eq!(report.reported.as_ref().map(|r| r.code.as_str()), Some("3"));
        let find = |id: &str| report.elements.iter().find(|e| e.id == id).unwrap();
        assert!(find("postgre-config").visible);
        assert!(!find("mysql-config").visible);
        assert_eq!(find("dbType").value, "PostgreSQL");
        assert!(find("db-error").visible);
        assert_eq!(report.transcript.first().map(String::as_str), Some("PAGE_SMOKE begin"));
        assert_eq!(report.transcript.last().map(String::as_str), Some("PAGE_SMOKE end"));
    }

    #[test]
    fn smoke_fails_on_unknown_event_target() {
        let events = vec![SmokeEvent::Check {
            id: "nope".to_string(),
            checked: true,
        }];
        let result = page_smoke(
            PageKind::Security,
            "http://localhost/security",
            &events,
            &PageLayout::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn smoke_fails_on_bad_url() {
        let result = page_smoke(PageKind::General, "not a url", &[], &PageLayout::default());
        let err = result.unwrap_err();
        assert!(
            format!("{:#}", err).contains("Invalid page URL"),
            "Error chain should mention the URL: {:#}",
            err
        );
    }
}
