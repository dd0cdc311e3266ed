// The browser build only needs the library; the smoke runner is native.
#![cfg_attr(target_arch = "wasm32", allow(dead_code, unused_imports))]

use forumrs_setup_ui::smoke::SmokeEvent;
use std::path::PathBuf;

const USAGE: &str = "Usage:
  forumrs-setup-ui --page-smoke=<general|login|security|storage> --url=<href>
                   [--check=<id>] [--uncheck=<id>] [--select=<id>:<value>] [--layout=<file.toml>]
  forumrs-setup-ui --error-catalog [--layout=<file.toml>]";

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let prefix = format!("{}=", flag);
    args.iter()
        .find_map(|a| a.strip_prefix(prefix.as_str()))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let layout_path = arg_value(&args, "--layout").map(PathBuf::from);

    // Error code contract for the setup handler, as JSON.
    if args.iter().any(|a| a == "--error-catalog") {
        forumrs_setup_ui::run_error_catalog(layout_path.as_deref());
        return;
    }

    // Deterministic page smoke: mount, load `--url`, replay change events in argument order.
    // Writes `page_smoke_<page>_transcript.log` under `Setup_Wizard_Log/` and exits 0/1.
    if let Some(target) = arg_value(&args, "--page-smoke") {
        let Some(href) = arg_value(&args, "--url") else {
            eprintln!("--page-smoke requires --url=<href>\n\n{}", USAGE);
            std::process::exit(2);
        };

        let mut events = Vec::new();
        for arg in &args {
            match SmokeEvent::from_arg(arg) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(e) => {
                    eprintln!("{}\n\n{}", e, USAGE);
                    std::process::exit(2);
                }
            }
        }

        forumrs_setup_ui::run_page_smoke(target, href, &events, layout_path.as_deref());
        return;
    }

    eprintln!("{}", USAGE);
    std::process::exit(2);
}
