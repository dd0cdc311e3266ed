// Live page adapter (wasm32)

use crate::dom::PageDom;
use crate::error::{Result, SetupUiError};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlSelectElement};

fn js_err(context: &str, err: JsValue) -> SetupUiError {
    SetupUiError::Dom(format!(
        "{}: {}",
        context,
        err.as_string().unwrap_or_else(|| format!("{:?}", err))
    ))
}

pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn current() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| SetupUiError::Dom("window is unavailable".into()))?;
        let document = window
            .document()
            .ok_or_else(|| SetupUiError::Dom("document is unavailable".into()))?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn descendants(container: &HtmlElement, tag: &str) -> Vec<HtmlElement> {
        let list = container.get_elements_by_tag_name(tag);
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|e| e.dyn_into::<HtmlElement>().ok())
            .collect()
    }
}

impl PageDom for WebDocument {
    type Element = HtmlElement;

    fn get_element(&self, id: &str) -> Result<HtmlElement> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| SetupUiError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SetupUiError::Dom(format!("#{} is not an HTML element", id)))
    }

    fn message_slot(&self, container: &HtmlElement) -> Option<HtmlElement> {
        Self::descendants(container, "span").into_iter().next()
    }

    fn inputs_within(&self, container: &HtmlElement) -> Vec<HtmlElement> {
        Self::descendants(container, "input")
    }

    fn set_visible(&mut self, element: &HtmlElement, visible: bool) -> Result<()> {
        element
            .style()
            .set_property("display", if visible { "block" } else { "none" })
            .map_err(|e| js_err("failed to set display", e))
    }

    fn set_enabled(&mut self, element: &HtmlElement, enabled: bool) -> Result<()> {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(!enabled);
            return Ok(());
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_disabled(!enabled);
            return Ok(());
        }
        Err(SetupUiError::Dom(format!(
            "#{} cannot be disabled",
            element.id()
        )))
    }

    fn set_text(&mut self, element: &HtmlElement, text: &str) -> Result<()> {
        element.set_text_content(Some(text));
        Ok(())
    }

    fn value(&self, element: &HtmlElement) -> Result<String> {
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return Ok(select.value());
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Ok(input.value());
        }
        Err(SetupUiError::Dom(format!("#{} has no value", element.id())))
    }

    fn set_value(&mut self, element: &HtmlElement, value: &str) -> Result<()> {
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
            return Ok(());
        }
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
            return Ok(());
        }
        Err(SetupUiError::Dom(format!("#{} has no value", element.id())))
    }

    fn is_checked(&self, element: &HtmlElement) -> Result<bool> {
        element
            .dyn_ref::<HtmlInputElement>()
            .map(|input| input.checked())
            .ok_or_else(|| SetupUiError::Dom(format!("#{} is not a checkbox", element.id())))
    }
}
