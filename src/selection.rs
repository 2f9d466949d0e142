//! Element selection in the preview
//!
//! The crate never owns a DOM. Whatever renders the preview implements
//! [`SelectionHost`] for its node handle; the provided methods then turn a
//! click target into the element the editor should select.

use crate::session::SelectedElement;

/// HTML tags that can be selected directly
pub const SELECTABLE_TAGS: [&str; 12] = [
    "div", "section", "header", "footer", "nav", "h1", "h2", "h3", "p", "img", "button", "a",
];

pub fn is_selectable(tag_name: &str) -> bool {
    let tag_name = tag_name.trim();
    SELECTABLE_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(tag_name))
}

/// Read access to a document tree
pub trait SelectionHost {
    type Node: Clone;

    fn tag_name(&self, node: &Self::Node) -> String;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn class_name(&self, _node: &Self::Node) -> Option<String> {
        None
    }

    fn id(&self, _node: &Self::Node) -> Option<String> {
        None
    }

    fn text_content(&self, _node: &Self::Node) -> Option<String> {
        None
    }

    /// The node itself if selectable, otherwise its nearest selectable ancestor
    fn find_selectable_ancestor(&self, node: &Self::Node) -> Option<Self::Node> {
        let mut current = Some(node.clone());
        while let Some(candidate) = current {
            if is_selectable(&self.tag_name(&candidate)) {
                return Some(candidate);
            }
            current = self.parent(&candidate);
        }
        None
    }

    fn describe(&self, node: &Self::Node) -> SelectedElement {
        let mut element = SelectedElement::from_html_tag(&self.tag_name(node));
        element.class_name = self.class_name(node).filter(|c| !c.is_empty());
        element.id = self.id(node).filter(|id| !id.is_empty());
        element.text_content = self
            .text_content(node)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        element
    }

    /// Resolves a click target straight to a selection description
    fn select(&self, node: &Self::Node) -> Option<SelectedElement> {
        self.find_selectable_ancestor(node)
            .map(|selected| self.describe(&selected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::ElementTag;

    struct Node {
        tag: &'static str,
        parent: Option<usize>,
        class: Option<&'static str>,
        text: Option<&'static str>,
    }

    /// Flat arena: nodes refer to their parent by index
    struct Tree(Vec<Node>);

    impl SelectionHost for Tree {
        type Node = usize;

        fn tag_name(&self, node: &usize) -> String {
            self.0[*node].tag.to_uppercase()
        }

        fn parent(&self, node: &usize) -> Option<usize> {
            self.0[*node].parent
        }

        fn class_name(&self, node: &usize) -> Option<String> {
            self.0[*node].class.map(str::to_string)
        }

        fn text_content(&self, node: &usize) -> Option<String> {
            self.0[*node].text.map(str::to_string)
        }
    }

    fn node(tag: &'static str, parent: Option<usize>) -> Node {
        Node {
            tag,
            parent,
            class: None,
            text: None,
        }
    }

    fn tree() -> Tree {
        Tree(vec![
            node("body", None),
            Node {
                class: Some("site-header"),
                ..node("header", Some(0))
            },
            Node {
                text: Some("  Welcome  "),
                ..node("h1", Some(1))
            },
            node("span", Some(2)),
            node("strong", Some(3)),
            node("ul", Some(0)),
        ])
    }

    #[test]
    fn test_selectable_tags() {
        assert!(is_selectable("div"));
        assert!(is_selectable("H2"));
        assert!(!is_selectable("h4"));
        assert!(!is_selectable("span"));
    }

    #[test]
    fn test_node_itself_is_selected() {
        assert_eq!(tree().find_selectable_ancestor(&2), Some(2));
    }

    #[test]
    fn test_walks_up_to_nearest_selectable() {
        assert_eq!(tree().find_selectable_ancestor(&4), Some(2));
    }

    #[test]
    fn test_no_selectable_ancestor() {
        assert_eq!(tree().find_selectable_ancestor(&5), None);
        assert_eq!(tree().select(&5), None);
    }

    #[test]
    fn test_describe() {
        let tree = tree();

        let heading = tree.select(&4).unwrap();
        assert_eq!(heading.tag, ElementTag::Heading);
        assert_eq!(heading.html_tag, "h1");
        assert_eq!(heading.text_content.as_deref(), Some("Welcome"));

        let header = tree.describe(&1);
        assert_eq!(header.tag, ElementTag::Header);
        assert_eq!(header.class_name.as_deref(), Some("site-header"));
        assert_eq!(header.id, None);
    }
}
