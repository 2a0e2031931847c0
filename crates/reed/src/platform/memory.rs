//! In-memory element tree implementing [`Page`].
//!
//! Used as the injected fake document in tests and by the scenario
//! replayer. Nodes live in an arena in document order: a node is always
//! pushed before its children, so index order is tree order.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data_url;
use crate::page::Page;
use crate::selector::{Matchable, Selector};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFixture {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl FileFixture {
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementFixture {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub value: String,
    pub files: Vec<FileFixture>,
    pub children: Vec<ElementFixture>,
}

impl ElementFixture {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn file(mut self, file: FileFixture) -> Self {
        self.files.push(file);
        self
    }

    pub fn child(mut self, child: ElementFixture) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub scroll_y: f64,
    pub elements: Vec<ElementFixture>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementSnapshot {
    pub node: NodeId,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub scroll_y: f64,
    pub elements: Vec<ElementSnapshot>,
    pub alerts: Vec<String>,
}

#[derive(Debug)]
struct Node {
    tag: String,
    parent: Option<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    value: String,
    files: Vec<FileFixture>,
}

impl Matchable for Node {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    nodes: RefCell<Vec<Node>>,
    scroll_y: Cell<f64>,
    alerts: RefCell<Vec<String>>,
}

impl MemoryPage {
    pub fn new(fixture: &PageFixture) -> Self {
        let page = Self::default();
        page.scroll_y.set(fixture.scroll_y);
        {
            let mut nodes = page.nodes.borrow_mut();
            for element in &fixture.elements {
                insert(&mut nodes, element, None);
            }
        }
        page
    }

    pub fn from_elements(elements: Vec<ElementFixture>) -> Self {
        Self::new(&PageFixture {
            scroll_y: 0.0,
            elements,
        })
    }

    pub fn set_scroll_y(&self, scroll_y: f64) {
        self.scroll_y.set(scroll_y);
    }

    pub fn set_files(&self, element: &NodeId, files: Vec<FileFixture>) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.index()) {
            node.files = files;
        }
    }

    pub fn first_file(&self, element: &NodeId) -> Option<FileFixture> {
        self.nodes.borrow().get(element.index())?.files.first().cloned()
    }

    /// Synchronous stand-in for `FileReader.readAsDataURL` on the first file.
    pub fn read_first_file_as_data_url(&self, element: &NodeId) -> Option<String> {
        self.first_file(element)
            .map(|file| data_url::encode(&file.mime, &file.bytes))
    }

    pub fn style(&self, element: &NodeId, property: &str) -> Option<String> {
        self.nodes.borrow().get(element.index())?.style.get(property).cloned()
    }

    pub fn classes(&self, element: &NodeId) -> Vec<String> {
        self.nodes
            .borrow()
            .get(element.index())
            .map(|node| node.classes.clone())
            .unwrap_or_default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let nodes = self.nodes.borrow();
        let elements = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let mut attributes = node.attributes.clone();
                let id = attributes.remove("id");
                ElementSnapshot {
                    node: NodeId(index as u32),
                    tag: node.tag.clone(),
                    id,
                    classes: node.classes.clone(),
                    attributes,
                    style: node.style.clone(),
                    value: node.value.clone(),
                }
            })
            .collect();
        PageSnapshot {
            scroll_y: self.scroll_y.get(),
            elements,
            alerts: self.alerts(),
        }
    }

    fn is_descendant(nodes: &[Node], node: NodeId, root: NodeId) -> bool {
        let mut current = nodes[node.index()].parent;
        while let Some(parent) = current {
            if parent == root {
                return true;
            }
            current = nodes[parent.index()].parent;
        }
        false
    }

    fn with_node<T>(&self, element: &NodeId, f: impl FnOnce(&Node) -> T) -> Option<T> {
        self.nodes.borrow().get(element.index()).map(f)
    }

    fn with_node_mut(&self, element: &NodeId, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(element.index()) {
            f(node);
        }
    }
}

fn insert(nodes: &mut Vec<Node>, fixture: &ElementFixture, parent: Option<NodeId>) {
    let id = NodeId(nodes.len() as u32);
    let mut attributes = fixture.attributes.clone();
    let mut classes = fixture.classes.clone();
    if let Some(class_attribute) = attributes.remove("class") {
        classes.extend(class_attribute.split_whitespace().map(str::to_string));
    }
    if let Some(element_id) = &fixture.id {
        attributes.insert("id".to_string(), element_id.clone());
    }
    nodes.push(Node {
        tag: fixture.tag.to_ascii_lowercase(),
        parent,
        classes,
        attributes,
        style: BTreeMap::new(),
        value: fixture.value.clone(),
        files: fixture.files.clone(),
    });
    for child in &fixture.children {
        insert(nodes, child, Some(id));
    }
}

impl Page for MemoryPage {
    type Element = NodeId;

    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| selector.matches(*node))
            .map(|(index, _)| NodeId(index as u32))
            .collect()
    }

    fn query_within(&self, root: &NodeId, selector: &Selector) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        nodes
            .iter()
            .enumerate()
            .skip(root.index() + 1)
            .map(|(index, node)| (NodeId(index as u32), node))
            .filter(|(id, node)| Self::is_descendant(&nodes, *id, *root) && selector.matches(*node))
            .map(|(id, _)| id)
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .position(|node| node.attributes.get("id").map(String::as_str) == Some(id))
            .map(|index| NodeId(index as u32))
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.with_node(element, |node| node.has_class(class)).unwrap_or(false)
    }

    fn set_class(&self, element: &NodeId, class: &str, present: bool) {
        self.with_node_mut(element, |node| {
            let position = node.classes.iter().position(|existing| existing == class);
            match (present, position) {
                (true, None) => node.classes.push(class.to_string()),
                (false, Some(position)) => {
                    node.classes.remove(position);
                }
                _ => {}
            }
        });
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        self.with_node_mut(element, |node| {
            node.style.insert(property.to_string(), value.to_string());
        });
    }

    fn value(&self, element: &NodeId) -> String {
        self.with_node(element, |node| node.value.clone()).unwrap_or_default()
    }

    fn set_value(&self, element: &NodeId, value: &str) {
        self.with_node_mut(element, |node| node.value = value.to_string());
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.with_node(element, |node| node.attributes.get(name).cloned()).flatten()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        self.with_node_mut(element, |node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn selected_file_count(&self, element: &NodeId) -> usize {
        self.with_node(element, |node| node.files.len()).unwrap_or(0)
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}
