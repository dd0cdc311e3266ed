// Logging utilities
// Structured logging with JSON and human-readable formats
//
// Messages carry their page and step as inline tags:
//   "[PHASE: storage] [STEP: force_panel] Switched to MySQL"
// The formatters lift those tags into their own fields.

use log::Level;
use regex::Regex;
use serde_json::json;

/// Phase/step tags extracted from a log message, plus the message without them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogMetadata {
    pub phase: Option<String>,
    pub step: Option<String>,
    pub message: String,
}

/// Parse phase and step from log message
/// Extracts [PHASE: ...] and [STEP: ...] patterns
pub fn parse_log_metadata(message: &str) -> LogMetadata {
    let Ok(tag_re) = Regex::new(r"\[(PHASE|STEP):\s*([^\]]*)\]") else {
        return LogMetadata {
            message: message.to_string(),
            ..LogMetadata::default()
        };
    };

    let mut meta = LogMetadata::default();
    for caps in tag_re.captures_iter(message) {
        let value = caps[2].trim().to_string();
        match &caps[1] {
            "PHASE" if meta.phase.is_none() => meta.phase = Some(value),
            "STEP" if meta.step.is_none() => meta.step = Some(value),
            _ => {}
        }
    }

    let stripped = tag_re.replace_all(message, "");
    meta.message = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    meta
}

/// Format log entry as JSON for structured logging
pub fn format_json_log(timestamp: &str, level: Level, target: &str, meta: &LogMetadata) -> String {
    let mut log_entry = json!({
        "timestamp": timestamp,
        "level": level.as_str(),
        "target": target,
        "message": meta.message,
    });

    if let Some(phase) = &meta.phase {
        log_entry["phase"] = json!(phase);
    }

    if let Some(step) = &meta.step {
        log_entry["step"] = json!(step);
    }

    serde_json::to_string(&log_entry).unwrap_or_else(|_| "{}".to_string())
}

/// Format log entry as human-readable text
pub fn format_human_readable_log(
    timestamp: &str,
    level: Level,
    target: &str,
    meta: &LogMetadata,
) -> String {
    let mut log_line = format!("[{}] [{}]", timestamp, level.as_str());

    if let Some(phase) = &meta.phase {
        log_line.push_str(&format!(" [PHASE: {}]", phase));
    }

    if let Some(step) = &meta.step {
        log_line.push_str(&format!(" [STEP: {}]", step));
    }

    log_line.push_str(&format!(" [{}] {}", target, meta.message));
    log_line
}
