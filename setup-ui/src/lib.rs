// ForumRS setup wizard: client-side page controllers
// Main library entry point

pub mod banner;
pub mod dom;
pub mod error;
pub mod models;
pub mod pages;
pub mod smoke;
pub mod utils;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use banner::{read_error_code, ErrorEntry, ErrorTable, ReportedError};
pub use dom::{MemoryDocument, PageDom};
pub use error::{Result, SetupUiError};
pub use models::layout::PageLayout;
pub use models::page::{DbPanel, PageKind};
pub use models::state::StorageView;
pub use pages::{catalog, PageController};

#[cfg(not(target_arch = "wasm32"))]
pub use native::*;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use crate::models::layout::PageLayout;
    use crate::models::page::PageKind;
    use crate::smoke::{page_smoke, SmokeEvent};
    use crate::utils;
    use log::{error, info};
    use std::path::Path;

    /// Initialize logging system with dual format (JSON + human-readable)
    pub fn init_logging(with_console: bool) -> Result<(), Box<dyn std::error::Error>> {
        let log_dir = utils::path_resolver::resolve_log_folder()?;
        std::fs::create_dir_all(&log_dir)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");
        let json_log_file = log_dir.join(format!("setup-ui-{}.log", timestamp));
        let txt_log_file = log_dir.join(format!("setup-ui-{}.txt", timestamp));

        let mut dispatch = fern::Dispatch::new().level(log::LevelFilter::Debug);

        if with_console {
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Info)
                    .format(move |out, message, record| {
                        let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                        let meta = utils::logging::parse_log_metadata(&message.to_string());
                        let txt_line = utils::logging::format_human_readable_log(
                            &timestamp_local.to_string(),
                            record.level(),
                            record.target(),
                            &meta,
                        );
                        out.finish(format_args!("{}", txt_line));
                    })
                    .chain(std::io::stderr()),
            );
        }

        dispatch = dispatch
            .chain(
                fern::Dispatch::new()
                    .format(move |out, message, record| {
                        let timestamp_utc = chrono::Utc::now().to_rfc3339();
                        let meta = utils::logging::parse_log_metadata(&message.to_string());
                        let json_line = utils::logging::format_json_log(
                            &timestamp_utc,
                            record.level(),
                            record.target(),
                            &meta,
                        );
                        out.finish(format_args!("{}", json_line));
                    })
                    .chain(fern::log_file(json_log_file)?),
            )
            .chain(
                fern::Dispatch::new()
                    .format(move |out, message, record| {
                        let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                        let meta = utils::logging::parse_log_metadata(&message.to_string());
                        let txt_line = utils::logging::format_human_readable_log(
                            &timestamp_local.to_string(),
                            record.level(),
                            record.target(),
                            &meta,
                        );
                        out.finish(format_args!("{}", txt_line));
                    })
                    .chain(fern::log_file(txt_log_file)?),
            );

        dispatch.apply()?;

        log::info!(
            "[PHASE: initialization] Logging initialized, log directory: {:?}",
            log_dir
        );
        Ok(())
    }

    fn load_layout(layout_path: Option<&Path>) -> anyhow::Result<PageLayout> {
        match layout_path {
            Some(path) => PageLayout::load(path),
            None => Ok(PageLayout::default()),
        }
    }

    /// Non-interactive page smoke (for automated verification / log capture).
    /// Writes `page_smoke_<page>_transcript.log` under `Setup_Wizard_Log/`, prints the JSON report
    /// and exits 0/1.
    pub fn run_page_smoke(target: &str, href: &str, events: &[SmokeEvent], layout_path: Option<&Path>) {
        if let Err(e) = init_logging(false) {
            eprintln!("Failed to initialize logging: {}", e);
        }

        info!(
            "[PHASE: smoke] [STEP: start] Page smoke starting at {} (target={}, href={})",
            chrono::Utc::now(),
            target,
            href
        );

        let result = (|| -> anyhow::Result<String> {
            let page: PageKind = target.parse()?;
            let layout = load_layout(layout_path)?;
            let report = page_smoke(page, href, events, &layout)?;

            let log_dir = utils::path_resolver::resolve_log_folder()?;
            let transcript_path = log_dir.join(format!("page_smoke_{}_transcript.log", page));
            let mut transcript = report.transcript.join("\n");
            transcript.push('\n');
            std::fs::write(&transcript_path, transcript)?;
            info!(
                "[PHASE: smoke] [STEP: transcript] Wrote {:?}",
                transcript_path
            );

            Ok(serde_json::to_string_pretty(&report)?)
        })();

        match result {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("[PHASE: smoke] [STEP: fatal] Page smoke failed: {:#}", e);
                eprintln!("Setup page smoke error: {:#}", e);
                std::process::exit(1);
            }
        }
    }

    /// Print the error code contract for every page as JSON and exit 0/1.
    pub fn run_error_catalog(layout_path: Option<&Path>) {
        let result = load_layout(layout_path)
            .and_then(|layout| Ok(serde_json::to_string_pretty(&crate::pages::catalog(&layout))?));

        match result {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Setup error catalog error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}
