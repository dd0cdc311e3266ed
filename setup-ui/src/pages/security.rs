// Security page: SSL key files and CAPTCHA keys
//
// Each checkbox gates its two inputs. Enabled state follows the checkbox only on change events;
// it is not re-synchronized on load.

use crate::banner::{report_error, ErrorEntry, ErrorTable, ReportedError};
use crate::dom::{set_enabled_by_id, PageDom};
use crate::error::Result;
use crate::models::layout::SecurityLayout;
use crate::models::page::PageKind;
use log::info;

/// Which of the two security banners a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityBanner {
    Ssl,
    Captcha,
}

/// SSL codes are 1-5, CAPTCHA codes 6-7; one table, one dispatch.
pub static SECURITY_ERRORS: ErrorTable<SecurityBanner> = ErrorTable::new(&[
    ErrorEntry {
        code: "1",
        message: "Please specify a public and private key for SSL.",
        action: SecurityBanner::Ssl,
    },
    ErrorEntry {
        code: "2",
        message: "Please enter a valid private key that is a pem or asc1 file.",
        action: SecurityBanner::Ssl,
    },
    ErrorEntry {
        code: "3",
        message: "Please enter a valid public key that is a pem or asc1 file.",
        action: SecurityBanner::Ssl,
    },
    ErrorEntry {
        code: "4",
        message: "The server cannot find the specified private key. Does the file exist and ForumRS has sufficent permissions to access it?",
        action: SecurityBanner::Ssl,
    },
    ErrorEntry {
        code: "5",
        message: "The server cannot find the specified public key. Does the file exist and ForumRS has sufficent permissions to access it?",
        action: SecurityBanner::Ssl,
    },
    ErrorEntry {
        code: "6",
        message: "Please specify a Site and Secret key.",
        action: SecurityBanner::Captcha,
    },
    ErrorEntry {
        code: "7",
        message: "Please specify a valid Site and Secret key.",
        action: SecurityBanner::Captcha,
    },
]);

#[derive(Debug, Clone)]
pub struct SecurityPage {
    layout: SecurityLayout,
}

impl SecurityPage {
    pub fn new(layout: SecurityLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &SecurityLayout {
        &self.layout
    }

    pub fn banner_id(&self, banner: SecurityBanner) -> &str {
        match banner {
            SecurityBanner::Ssl => &self.layout.ssl_error_banner,
            SecurityBanner::Captcha => &self.layout.captcha_error_banner,
        }
    }

    /// Change handler of the SSL checkbox: private and public key inputs follow it.
    pub fn on_ssl_toggled<D: PageDom>(&self, dom: &mut D) -> Result<bool> {
        let l = &self.layout;
        let checked = toggle_group(
            dom,
            &l.ssl_checkbox,
            &[l.private_key.as_str(), l.public_key.as_str()],
        )?;
        info!(
            "[PHASE: security] [STEP: ssl_toggle] SSL key inputs {}",
            if checked { "enabled" } else { "disabled" }
        );
        Ok(checked)
    }

    /// Change handler of the CAPTCHA checkbox: site and secret key inputs follow it.
    pub fn on_captcha_toggled<D: PageDom>(&self, dom: &mut D) -> Result<bool> {
        let l = &self.layout;
        let checked = toggle_group(
            dom,
            &l.captcha_checkbox,
            &[l.site_key.as_str(), l.secret_key.as_str()],
        )?;
        info!(
            "[PHASE: security] [STEP: captcha_toggle] CAPTCHA key inputs {}",
            if checked { "enabled" } else { "disabled" }
        );
        Ok(checked)
    }

    pub fn on_load<D: PageDom>(&self, dom: &mut D, href: &str) -> Result<Option<ReportedError>> {
        report_error(
            dom,
            PageKind::Security,
            &SECURITY_ERRORS,
            href,
            |banner| self.banner_id(*banner).to_string(),
            |_, _| Ok(()),
        )
    }
}

fn toggle_group<D: PageDom>(dom: &mut D, checkbox_id: &str, inputs: &[&str]) -> Result<bool> {
    let checkbox = dom.get_element(checkbox_id)?;
    let checked = dom.is_checked(&checkbox)?;
    set_enabled_by_id(dom, inputs, checked)?;
    Ok(checked)
}
