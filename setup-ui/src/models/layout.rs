// Page layout: the element ids each setup page is wired to
//
// Defaults match the markup served by the setup views. A TOML file can
// override any of them; missing sections and fields keep their defaults.

use crate::error::{Result, SetupUiError};
use crate::models::page::{DbPanel, PageKind};
use crate::utils::validation::validate_element_id;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub general: GeneralLayout,
    pub login: LoginLayout,
    pub security: SecurityLayout,
    pub storage: StorageLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneralLayout {
    pub error_banner: String,
}

impl Default for GeneralLayout {
    fn default() -> Self {
        Self {
            error_banner: "general-error".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginLayout {
    pub error_banner: String,
}

impl Default for LoginLayout {
    fn default() -> Self {
        Self {
            error_banner: "login-error".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityLayout {
    pub ssl_checkbox: String,
    pub private_key: String,
    pub public_key: String,
    pub captcha_checkbox: String,
    pub site_key: String,
    pub secret_key: String,
    pub ssl_error_banner: String,
    pub captcha_error_banner: String,
}

impl Default for SecurityLayout {
    fn default() -> Self {
        Self {
            ssl_checkbox: "useSSL".to_string(),
            private_key: "privateKey".to_string(),
            public_key: "publicKey".to_string(),
            // Id as served by the security view (sic).
            captcha_checkbox: "useCaptch".to_string(),
            site_key: "siteKey".to_string(),
            secret_key: "secretKey".to_string(),
            ssl_error_banner: "ssl-error".to_string(),
            captcha_error_banner: "captcha-error".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageLayout {
    pub db_type: String,
    pub sqlite_panel: String,
    pub mysql_panel: String,
    pub postgres_panel: String,
    pub error_banner: String,
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self {
            db_type: "dbType".to_string(),
            sqlite_panel: "sql-config".to_string(),
            mysql_panel: "mysql-config".to_string(),
            postgres_panel: "postgre-config".to_string(),
            error_banner: "db-error".to_string(),
        }
    }
}

impl StorageLayout {
    pub fn panel_id(&self, panel: DbPanel) -> &str {
        match panel {
            DbPanel::Sqlite => &self.sqlite_panel,
            DbPanel::Mysql => &self.mysql_panel,
            DbPanel::Postgres => &self.postgres_panel,
        }
    }
}

impl PageLayout {
    /// Read a TOML layout file and validate it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read layout file {:?}: {}", path, e))?;
        let layout: PageLayout = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse layout file {:?}: {}", path, e))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Ids wired by one page, in a stable order.
    pub fn ids_for(&self, page: PageKind) -> Vec<&str> {
        match page {
            PageKind::General => vec![self.general.error_banner.as_str()],
            PageKind::Login => vec![self.login.error_banner.as_str()],
            PageKind::Security => {
                let s = &self.security;
                vec![
                    s.ssl_checkbox.as_str(),
                    s.private_key.as_str(),
                    s.public_key.as_str(),
                    s.captcha_checkbox.as_str(),
                    s.site_key.as_str(),
                    s.secret_key.as_str(),
                    s.ssl_error_banner.as_str(),
                    s.captcha_error_banner.as_str(),
                ]
            }
            PageKind::Storage => {
                let s = &self.storage;
                vec![
                    s.db_type.as_str(),
                    s.sqlite_panel.as_str(),
                    s.mysql_panel.as_str(),
                    s.postgres_panel.as_str(),
                    s.error_banner.as_str(),
                ]
            }
        }
    }

    /// Every id must be well-formed and unique within its page.
    pub fn validate(&self) -> Result<()> {
        for page in PageKind::ALL {
            let mut seen = HashSet::new();
            for id in self.ids_for(page) {
                validate_element_id(id)
                    .map_err(|e| SetupUiError::Layout(format!("{} page: {}", page, e)))?;
                if !seen.insert(id) {
                    return Err(SetupUiError::Layout(format!(
                        "{} page: id '{}' is used more than once",
                        page, id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_layout_is_valid() {
        PageLayout::default().validate().unwrap();
    }

    #[test]
    fn load_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\nerrorBanner = \"storage-error\"\n").unwrap();

        let layout = PageLayout::load(file.path()).unwrap();
        assert_eq!(layout.storage.error_banner, "storage-error");
        assert_eq!(layout.storage.db_type, "dbType");
        assert_eq!(layout.security, SecurityLayout::default());
    }

    #[test]
    fn load_rejects_malformed_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[login]\nerrorBanner = \"login error\"\n").unwrap();

        let err = PageLayout::load(file.path()).unwrap_err();
        assert!(
            err.to_string().contains("login page"),
            "Error should name the page: {}",
            err
        );
    }

    #[test]
    fn validate_rejects_duplicate_ids_within_a_page() {
        let mut layout = PageLayout::default();
        layout.storage.mysql_panel = layout.storage.sqlite_panel.clone();
        assert!(matches!(layout.validate(), Err(SetupUiError::Layout(_))));
    }

    #[test]
    fn same_id_on_different_pages_is_allowed() {
        let mut layout = PageLayout::default();
        layout.login.error_banner = "error".to_string();
        layout.general.error_banner = "error".to_string();
        layout.validate().unwrap();
    }

    #[test]
    fn panel_id_follows_layout() {
        let layout = StorageLayout::default();
        assert_eq!(layout.panel_id(DbPanel::Sqlite), "sql-config");
        assert_eq!(layout.panel_id(DbPanel::Postgres), "postgre-config");
    }
}
