// Login page: one-time setup code printed to the console

use crate::banner::{report_error, ErrorEntry, ErrorTable, ReportedError};
use crate::dom::PageDom;
use crate::error::Result;
use crate::models::layout::LoginLayout;
use crate::models::page::PageKind;

pub static LOGIN_ERRORS: ErrorTable<()> = ErrorTable::new(&[ErrorEntry {
    code: "1",
    message: "Invalid login code. Please copy the code from the console.",
    action: (),
}]);

#[derive(Debug, Clone)]
pub struct LoginPage {
    layout: LoginLayout,
}

impl LoginPage {
    pub fn new(layout: LoginLayout) -> Self {
        Self { layout }
    }

    pub fn on_load<D: PageDom>(&self, dom: &mut D, href: &str) -> Result<Option<ReportedError>> {
        report_error(
            dom,
            PageKind::Login,
            &LOGIN_ERRORS,
            href,
            |_| self.layout.error_banner.clone(),
            |_, _| Ok(()),
        )
    }
}
