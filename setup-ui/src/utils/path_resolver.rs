use anyhow::Result;
use std::path::PathBuf;

const LOG_FOLDER_NAME: &str = "Setup_Wizard_Log";

/// Resolve deployment folder (absolute path)
pub fn resolve_deployment_folder() -> Result<PathBuf> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return Ok(dir.to_path_buf());
        }
    }

    // Fallback: current working directory
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    Ok(cwd)
}

/// Resolve log folder (absolute path)
///
/// Walks up from the working directory looking for an existing `Setup_Wizard_Log/` or the
/// workspace root (a `Cargo.toml` declaring `[workspace]`), and creates the folder there.
/// Otherwise the folder sits next to the executable.
pub fn resolve_log_folder() -> Result<PathBuf> {
    if let Ok(mut dir) = std::env::current_dir() {
        for _ in 0..12 {
            let candidate = dir.join(LOG_FOLDER_NAME);
            if candidate.exists() {
                return Ok(candidate);
            }

            if is_workspace_root(&dir) {
                std::fs::create_dir_all(&candidate)
                    .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
                return Ok(candidate);
            }

            if let Some(parent) = dir.parent() {
                dir = parent.to_path_buf();
            } else {
                break;
            }
        }
    }

    let base = resolve_deployment_folder()?;
    let log_dir = base.join(LOG_FOLDER_NAME);
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
    Ok(log_dir)
}

fn is_workspace_root(dir: &std::path::Path) -> bool {
    std::fs::read_to_string(dir.join("Cargo.toml"))
        .map(|manifest| manifest.lines().any(|l| l.trim() == "[workspace]"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_root_needs_workspace_table() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_workspace_root(dir.path()));

        std::fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"x\"\n").unwrap();
        assert!(!is_workspace_root(dir.path()));

        std::fs::write(dir.path().join("Cargo.toml"), "[workspace]\nmembers = []\n").unwrap();
        assert!(is_workspace_root(dir.path()));
    }
}
