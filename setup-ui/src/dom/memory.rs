// In-memory setup page document
//
// A flat element tree (parent links, insertion = document order) with just the state the setup
// pages touch. Used by the smoke runner and every page test.

use crate::dom::PageDom;
use crate::error::{Result, SetupUiError};
use crate::models::layout::PageLayout;
use crate::models::page::{DbPanel, PageKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Div,
    Span,
    Input,
    Select,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    id: Option<String>,
    tag: Tag,
    parent: Option<NodeId>,
    visible: bool,
    disabled: bool,
    text: String,
    value: String,
    checked: bool,
}

/// Serializable view of one element that has an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub id: String,
    pub tag: Tag,
    pub visible: bool,
    pub enabled: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element under `parent` (or at the top level). Elements start visible and
    /// enabled, like unstyled markup.
    pub fn append(&mut self, parent: Option<NodeId>, tag: Tag, id: Option<&str>) -> NodeId {
        self.nodes.push(Node {
            id: id.map(str::to_string),
            tag,
            parent,
            visible: true,
            disabled: false,
            text: String::new(),
            value: String::new(),
            checked: false,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Hidden error banner with an empty message `span`.
    pub fn append_banner(&mut self, id: &str) -> NodeId {
        let banner = self.append(None, Tag::Div, Some(id));
        self.nodes[banner.0].visible = false;
        self.append(Some(banner), Tag::Span, None);
        banner
    }

    /// Text input, optionally rendered disabled.
    pub fn append_input(&mut self, parent: Option<NodeId>, id: &str, disabled: bool) -> NodeId {
        let input = self.append(parent, Tag::Input, Some(id));
        self.nodes[input.0].disabled = disabled;
        input
    }

    /// Markup the setup views serve for `page`, wired to the ids in `layout`.
    pub fn for_page(page: PageKind, layout: &PageLayout) -> Self {
        let mut doc = Self::new();
        match page {
            PageKind::General => {
                doc.append_banner(&layout.general.error_banner);
                for id in ["websiteName", "ip", "port", "domain"] {
                    doc.append_input(None, id, false);
                }
            }
            PageKind::Login => {
                doc.append_banner(&layout.login.error_banner);
                doc.append_input(None, "loginCode", false);
            }
            PageKind::Security => {
                let s = &layout.security;
                doc.append_banner(&s.ssl_error_banner);
                doc.append_input(None, &s.ssl_checkbox, false);
                doc.append_input(None, &s.private_key, true);
                doc.append_input(None, &s.public_key, true);
                doc.append_banner(&s.captcha_error_banner);
                doc.append_input(None, &s.captcha_checkbox, false);
                doc.append_input(None, &s.site_key, true);
                doc.append_input(None, &s.secret_key, true);
            }
            PageKind::Storage => {
                let s = &layout.storage;
                doc.append_banner(&s.error_banner);
                let select = doc.append(None, Tag::Select, Some(s.db_type.as_str()));
                doc.nodes[select.0].value = DbPanel::Sqlite.label().to_string();

                let sqlite = doc.append(None, Tag::Div, Some(s.sqlite_panel.as_str()));
                doc.append_input(Some(sqlite), &format!("{}-location", s.sqlite_panel), false);

                for panel_id in [&s.mysql_panel, &s.postgres_panel] {
                    let panel = doc.append(None, Tag::Div, Some(panel_id.as_str()));
                    for field in ["host", "port", "user", "password", "database"] {
                        doc.append_input(Some(panel), &format!("{}-{}", panel_id, field), false);
                    }
                }
            }
        }
        doc
    }

    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn node_by_id(&self, id: &str) -> Result<&Node> {
        self.find(id)
            .map(|n| &self.nodes[n.0])
            .ok_or_else(|| SetupUiError::MissingElement(id.to_string()))
    }

    fn node_by_id_mut(&mut self, id: &str) -> Result<&mut Node> {
        let n = self
            .find(id)
            .ok_or_else(|| SetupUiError::MissingElement(id.to_string()))?;
        Ok(&mut self.nodes[n.0])
    }

    /// Simulate the user ticking or clearing a checkbox (no change handler runs).
    pub fn check(&mut self, id: &str, checked: bool) -> Result<()> {
        let node = self.node_by_id_mut(id)?;
        if node.tag != Tag::Input {
            return Err(SetupUiError::Dom(format!("#{} is not a checkbox", id)));
        }
        node.checked = checked;
        Ok(())
    }

    /// Simulate the user picking a dropdown option (no change handler runs).
    pub fn select(&mut self, id: &str, value: &str) -> Result<()> {
        let node = self.node_by_id_mut(id)?;
        if node.tag != Tag::Select {
            return Err(SetupUiError::Dom(format!("#{} is not a select", id)));
        }
        node.value = value.to_string();
        Ok(())
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.node_by_id(id).map(|n| n.visible).unwrap_or(false)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.node_by_id(id).map(|n| !n.disabled).unwrap_or(false)
    }

    /// Ids of the inputs inside the element `id`.
    pub fn input_ids_within(&self, id: &str) -> Vec<String> {
        let Some(container) = self.find(id) else {
            return Vec::new();
        };
        self.inputs_within(&container)
            .into_iter()
            .filter_map(|n| self.nodes[n.0].id.clone())
            .collect()
    }

    /// Message currently held by a banner's slot.
    pub fn banner_text(&self, id: &str) -> Option<String> {
        let banner = self.find(id)?;
        let slot = self.message_slot(&banner)?;
        Some(self.nodes[slot.0].text.clone())
    }

    pub fn value_of(&self, id: &str) -> Option<String> {
        self.node_by_id(id).ok().map(|n| n.value.clone())
    }

    pub fn snapshot(&self) -> Vec<ElementSnapshot> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                let id = n.id.clone()?;
                let text = match n.tag {
                    Tag::Div => self
                        .message_slot(&NodeId(i))
                        .map(|s| self.nodes[s.0].text.clone())
                        .unwrap_or_default(),
                    _ => n.text.clone(),
                };
                Some(ElementSnapshot {
                    id,
                    tag: n.tag,
                    visible: n.visible,
                    enabled: !n.disabled,
                    text,
                    value: n.value.clone(),
                    checked: n.checked,
                })
            })
            .collect()
    }

    fn node(&self, element: &NodeId) -> Result<&Node> {
        self.nodes
            .get(element.0)
            .ok_or_else(|| SetupUiError::Dom(format!("node {} is not in this document", element.0)))
    }

    fn node_mut(&mut self, element: &NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(element.0)
            .ok_or_else(|| SetupUiError::Dom(format!("node {} is not in this document", element.0)))
    }

    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cur = self.nodes[node.0].parent;
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes[p.0].parent;
        }
        false
    }

    fn descendants_with_tag(&self, container: NodeId, tag: Tag) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|n| self.nodes[n.0].tag == tag && self.is_descendant(*n, container))
            .collect()
    }
}

impl PageDom for MemoryDocument {
    type Element = NodeId;

    fn get_element(&self, id: &str) -> Result<NodeId> {
        self.find(id)
            .ok_or_else(|| SetupUiError::MissingElement(id.to_string()))
    }

    fn message_slot(&self, container: &NodeId) -> Option<NodeId> {
        self.descendants_with_tag(*container, Tag::Span)
            .into_iter()
            .next()
    }

    fn inputs_within(&self, container: &NodeId) -> Vec<NodeId> {
        self.descendants_with_tag(*container, Tag::Input)
    }

    fn set_visible(&mut self, element: &NodeId, visible: bool) -> Result<()> {
        self.node_mut(element)?.visible = visible;
        Ok(())
    }

    fn set_enabled(&mut self, element: &NodeId, enabled: bool) -> Result<()> {
        let node = self.node_mut(element)?;
        match node.tag {
            Tag::Input | Tag::Select => {
                node.disabled = !enabled;
                Ok(())
            }
            tag => Err(SetupUiError::Dom(format!(
                "{:?} element cannot be disabled",
                tag
            ))),
        }
    }

    fn set_text(&mut self, element: &NodeId, text: &str) -> Result<()> {
        self.node_mut(element)?.text = text.to_string();
        Ok(())
    }

    fn value(&self, element: &NodeId) -> Result<String> {
        let node = self.node(element)?;
        match node.tag {
            Tag::Input | Tag::Select => Ok(node.value.clone()),
            tag => Err(SetupUiError::Dom(format!("{:?} element has no value", tag))),
        }
    }

    fn set_value(&mut self, element: &NodeId, value: &str) -> Result<()> {
        let node = self.node_mut(element)?;
        match node.tag {
            Tag::Input | Tag::Select => {
                node.value = value.to_string();
                Ok(())
            }
            tag => Err(SetupUiError::Dom(format!("{:?} element has no value", tag))),
        }
    }

    fn is_checked(&self, element: &NodeId) -> Result<bool> {
        let node = self.node(element)?;
        match node.tag {
            Tag::Input => Ok(node.checked),
            tag => Err(SetupUiError::Dom(format!("{:?} element is not a checkbox", tag))),
        }
    }
}
