//! Owned structural snapshots of DOM subtrees.
//!
//! Two screens are structurally equivalent if their [`ScreenShape`]s are equal,
//! regardless of node identity or attached listeners.

use wasm_bindgen::JsCast;
use web_sys::{Attr, Element, NamedNodeMap, NodeList, Text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeNode {
	Element(ScreenShape),
	Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenShape {
	pub name: String,
	/// Sorted by name.
	pub attributes: Vec<(String, String)>,
	pub content: Vec<ShapeNode>,
}

impl ScreenShape {
	#[must_use]
	pub fn load(element: &Element) -> Self {
		load_element(element)
	}

	/// Concatenated text of this subtree.
	#[must_use]
	pub fn text(&self) -> String {
		let mut text = String::new();
		self.push_text(&mut text);
		text
	}

	fn push_text(&self, text: &mut String) {
		for node in &self.content {
			match node {
				ShapeNode::Element(element) => element.push_text(text),
				ShapeNode::Text(data) => text.push_str(data),
			}
		}
	}
}

pub fn load_child_nodes(child_nodes: &NodeList) -> Vec<ShapeNode> {
	(0..child_nodes.length())
		.filter_map(|i| child_nodes.item(i))
		.filter_map(|child| {
			if let Some(element) = child.dyn_ref::<Element>() {
				Some(ShapeNode::Element(load_element(element)))
			} else {
				child.dyn_ref::<Text>().map(|text| ShapeNode::Text(text.data()))
			}
		})
		.collect()
}

pub fn load_element(element: &Element) -> ScreenShape {
	let node: &web_sys::Node = element.as_ref();
	ScreenShape {
		name: element.tag_name(),
		attributes: load_attributes(&element.attributes()),
		content: load_child_nodes(&node.child_nodes()),
	}
}

pub fn load_attributes(attributes: &NamedNodeMap) -> Vec<(String, String)> {
	let mut loaded: Vec<_> = (0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute)).collect();
	loaded.sort();
	loaded
}

pub fn load_attribute(attribute: &Attr) -> (String, String) {
	(attribute.local_name(), attribute.value())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_concatenates_in_document_order() {
		let shape = ScreenShape {
			name: "DIV".to_owned(),
			attributes: vec![("id".to_owned(), "home".to_owned())],
			content: vec![
				ShapeNode::Text("a".to_owned()),
				ShapeNode::Element(ScreenShape {
					name: "SPAN".to_owned(),
					attributes: vec![],
					content: vec![ShapeNode::Text("b".to_owned())],
				}),
				ShapeNode::Text("c".to_owned()),
			],
		};
		assert_eq!(shape.text(), "abc");
	}
}
