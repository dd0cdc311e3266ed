//! Page adapter.
//!
//! Page controllers never query the browser directly: everything they need from the markup goes
//! through [`PageDom`]. [`MemoryDocument`] backs it in tests and the smoke runner; on wasm32,
//! `WebDocument` backs it with the live page.

pub(crate) mod listeners;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use memory::MemoryDocument;

use crate::error::Result;

/// Capabilities a setup page needs from its document.
pub trait PageDom {
    /// Handle to one element of the page.
    type Element: Clone;

    /// Look an element up by id. A missing element is an error.
    fn get_element(&self, id: &str) -> Result<Self::Element>;

    /// First `span` inside `container`, where banners keep their message.
    fn message_slot(&self, container: &Self::Element) -> Option<Self::Element>;

    /// All `input` elements inside `container`, in document order.
    fn inputs_within(&self, container: &Self::Element) -> Vec<Self::Element>;

    fn set_visible(&mut self, element: &Self::Element, visible: bool) -> Result<()>;

    fn set_enabled(&mut self, element: &Self::Element, enabled: bool) -> Result<()>;

    fn set_text(&mut self, element: &Self::Element, text: &str) -> Result<()>;

    /// Current value of an input or select element.
    fn value(&self, element: &Self::Element) -> Result<String>;

    fn set_value(&mut self, element: &Self::Element, value: &str) -> Result<()>;

    fn is_checked(&self, element: &Self::Element) -> Result<bool>;
}

/// Set enabled state of each element named in `ids`.
pub fn set_enabled_by_id<D: PageDom>(dom: &mut D, ids: &[&str], enabled: bool) -> Result<()> {
    for id in ids {
        let element = dom.get_element(id)?;
        dom.set_enabled(&element, enabled)?;
    }
    Ok(())
}
