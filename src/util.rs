use libxml::tree::{Node, NodeType};
use libxml::xpath::Context;

/// Single notion of "nothing worth using" across the value kinds a page
/// hands us: missing attributes, whitespace-only strings, empty lists.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }
}

impl<T: Blank> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map(Blank::is_blank).unwrap_or(true)
    }
}

impl<T> Blank for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

pub struct Util;

impl Util {
    pub fn evaluate_xpath(
        xpath_ctx: &Context,
        xpath: &str,
        node: Option<&Node>,
    ) -> Result<Vec<Node>, ()> {
        let res = match node {
            Some(node) => xpath_ctx.node_evaluate(xpath, node),
            None => xpath_ctx.evaluate(xpath),
        }
        .map_err(|()| {
            log::debug!("Evaluation of xpath '{}' failed", xpath);
        })?;

        let node_vec = res.get_nodes_as_vec();
        if node_vec.is_empty() {
            log::debug!("Evaluation of xpath '{}' yielded no results", xpath);
        }

        Ok(node_vec)
    }

    /// Non-blank value of `attribute` on the first node `xpath` matches that has one.
    pub fn get_attribute(context: &Context, xpath: &str, attribute: &str) -> Option<String> {
        Self::get_attributes(context, xpath, attribute)
            .into_iter()
            .next()
    }

    /// Every non-blank value of `attribute` on the nodes `xpath` matches, in document order.
    pub fn get_attributes(context: &Context, xpath: &str, attribute: &str) -> Vec<String> {
        Self::evaluate_xpath(context, xpath, None)
            .unwrap_or_default()
            .iter()
            .filter_map(|node| Self::non_blank_attribute(node, attribute))
            .collect()
    }

    pub fn non_blank_attribute(node: &Node, attribute: &str) -> Option<String> {
        node.get_attribute(attribute)
            .filter(|value| !value.is_blank())
    }

    /// Text content with every run of whitespace collapsed into a single space.
    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn flattened_text(node: &Node) -> String {
        Self::collapse_whitespace(&node.get_content())
    }

    pub fn text_length(node: &Node) -> usize {
        Self::flattened_text(node).chars().count()
    }

    pub fn is_text_node(node: &Node) -> bool {
        matches!(
            node.get_type(),
            Some(NodeType::TextNode) | Some(NodeType::CDataSectionNode)
        )
    }

    pub fn get_elements_by_tag_name(node: &Node, tag: &str) -> Vec<Node> {
        let tag = tag.to_lowercase();
        let mut vec = Vec::new();

        fn get_elems(node: &Node, tag: &str, vec: &mut Vec<Node>) {
            for child in node.get_child_elements() {
                if child.get_name().to_lowercase() == tag {
                    vec.push(child.clone());
                }
                get_elems(&child, tag, vec);
            }
        }

        get_elems(node, &tag, &mut vec);
        vec
    }

    pub fn has_descendant_tag(node: &Node, tag: &str) -> bool {
        node.get_child_elements().iter().any(|child| {
            child.get_name().eq_ignore_ascii_case(tag) || Self::has_descendant_tag(child, tag)
        })
    }

    pub fn class_contains(node: &Node, needle: &str) -> bool {
        node.get_attribute("class")
            .map(|class| class.contains(needle))
            .unwrap_or(false)
    }

    pub fn is_descendant_or_self(node: &Node, ancestor: &Node) -> bool {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if &n == ancestor {
                return true;
            }
            current = n.get_parent();
        }
        false
    }

    /// Distance from `node` down to its deepest element descendant.
    pub fn get_height(node: &Node) -> usize {
        node.get_child_elements()
            .iter()
            .map(|child| Self::get_height(child) + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn part_of_result(node: &Node, xpath_result: &[Node]) -> bool {
        let mut parent = node.get_parent();
        while let Some(p) = parent {
            if xpath_result.contains(&p) {
                return true;
            }
            parent = p.get_parent();
        }
        false
    }

    /// Unlink everything `xpath` matches below `root`. Nodes whose ancestor is
    /// also matched leave together with that ancestor.
    pub fn strip_node(context: &Context, xpath: &str, root: &Node) -> Result<usize, ()> {
        let node_vec = Self::evaluate_xpath(context, xpath, Some(root))?;
        let mut removed = 0;

        for node in &node_vec {
            if node == root || Self::part_of_result(node, &node_vec) {
                continue;
            }

            let mut node = node.clone();
            node.unlink();
            removed += 1;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Blank, Util};

    #[test]
    fn blank_values() {
        assert!("  \n".is_blank());
        assert!(!"a".is_blank());
        assert!(None::<String>.is_blank());
        assert!(Some(String::from(" ")).is_blank());
        assert!(!Some(String::from("x")).is_blank());
        assert!(Vec::<u8>::new().is_blank());
    }

    #[test]
    fn collapse_whitespace() {
        assert_eq!(
            Util::collapse_whitespace("  Hello \n\t world  "),
            "Hello world"
        );
        assert_eq!(Util::collapse_whitespace(" \n "), "");
    }
}
