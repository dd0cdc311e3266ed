// Setup wizard page and database panel identifiers

use crate::error::SetupUiError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One page of the setup wizard that carries client-side behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    General,
    Login,
    Security,
    Storage,
}

impl PageKind {
    pub const ALL: [PageKind; 4] = [
        PageKind::General,
        PageKind::Login,
        PageKind::Security,
        PageKind::Storage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageKind::General => "general",
            PageKind::Login => "login",
            PageKind::Security => "security",
            PageKind::Storage => "storage",
        }
    }

    /// Route the page is served from.
    pub fn path(&self) -> &'static str {
        match self {
            PageKind::General => "/general",
            PageKind::Login => "/login",
            PageKind::Security => "/security",
            PageKind::Storage => "/storage",
        }
    }

    /// Redirect target the setup handler uses to report `code` on this page,
    /// e.g. `/login?err=1`.
    pub fn error_location(&self, code: &str) -> String {
        format!("{}?err={}", self.path(), code)
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = SetupUiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().trim_start_matches('/').to_ascii_lowercase();
        PageKind::ALL
            .into_iter()
            .find(|p| p.as_str() == t)
            .ok_or_else(|| SetupUiError::UnknownPage(s.to_string()))
    }
}

/// Database backend configuration panel on the storage page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbPanel {
    Sqlite,
    Mysql,
    Postgres,
}

impl DbPanel {
    pub const ALL: [DbPanel; 3] = [DbPanel::Sqlite, DbPanel::Mysql, DbPanel::Postgres];

    /// Option value shown by the database type dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            DbPanel::Sqlite => "SQLite",
            DbPanel::Mysql => "MySQL",
            DbPanel::Postgres => "PostgreSQL",
        }
    }

    /// Exact (case-sensitive) match on the dropdown option value.
    pub fn from_label(label: &str) -> Option<Self> {
        DbPanel::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for DbPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_kind_parses_names_and_paths() {
        assert_eq!("storage".parse::<PageKind>().unwrap(), PageKind::Storage);
        assert_eq!("/login".parse::<PageKind>().unwrap(), PageKind::Login);
        assert_eq!(" Security ".parse::<PageKind>().unwrap(), PageKind::Security);
        assert_eq!(
            "welcome".parse::<PageKind>(),
            Err(SetupUiError::UnknownPage("welcome".to_string()))
        );
    }

    #[test]
    fn error_location_matches_login_redirect() {
        assert_eq!(PageKind::Login.error_location("1"), "/login?err=1");
        assert_eq!(PageKind::Storage.error_location("420"), "/storage?err=420");
    }

    #[test]
    fn db_panel_labels_are_case_sensitive() {
        assert_eq!(DbPanel::from_label("MySQL"), Some(DbPanel::Mysql));
        assert_eq!(DbPanel::from_label("PostgreSQL"), Some(DbPanel::Postgres));
        assert_eq!(DbPanel::from_label("mysql"), None);
        assert_eq!(DbPanel::from_label(""), None);
    }
}
