// Input validation utilities

use anyhow::Result;
use regex::Regex;

/// Validate a DOM element id used by a page layout.
///
/// Only plain ids are accepted (letter first, then letters/digits/`-`/`_`) so an id can never be
/// mistaken for a selector.
pub fn validate_element_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(anyhow::anyhow!("Element id cannot be empty"));
    }

    let id_re = Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").map_err(|e| {
        anyhow::anyhow!("Internal error: failed to compile element id regex: {}", e)
    })?;
    if !id_re.is_match(id) {
        return Err(anyhow::anyhow!("Invalid element id: '{}'", id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_markup_ids() {
        for id in ["general-error", "useSSL", "sql-config", "dbType", "secret_key"] {
            assert!(validate_element_id(id).is_ok(), "Should accept '{}'", id);
        }
    }

    #[test]
    fn rejects_selectors_and_blanks() {
        for id in ["", "#useSSL", "1st", "ssl error", ".panel", "a>b"] {
            assert!(validate_element_id(id).is_err(), "Should reject '{}'", id);
        }
    }
}
