use super::render::{ElementRenderer, Fragment, Tag};
use crate::constants;
use crate::util::Util;
use libxml::tree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleaningMode {
    /// Render the direct children of the container one by one.
    Iterative,
    /// Walk the whole subtree, discarding page furniture on the way.
    Recursive,
}

impl CleaningMode {
    pub fn for_score(score: f64) -> Self {
        if score > constants::ITERATIVE_THRESHOLD {
            Self::Iterative
        } else {
            Self::Recursive
        }
    }
}

pub fn clean(renderer: &ElementRenderer, root: &Node, score: f64) -> Fragment {
    let mode = CleaningMode::for_score(score);
    log::debug!("Cleaning container <{}> ({:?})", root.get_name(), mode);

    match mode {
        CleaningMode::Iterative => iterative(renderer, root, score),
        CleaningMode::Recursive => recursive(renderer, root, score),
    }
}

pub fn iterative(renderer: &ElementRenderer, root: &Node, score: f64) -> Fragment {
    let mut fragment = Fragment::default();
    for child in root.get_child_nodes() {
        fragment.append(renderer.render(&child, score));
    }
    fragment
}

pub fn recursive(renderer: &ElementRenderer, node: &Node, score: f64) -> Fragment {
    let mut fragment = Fragment::default();
    walk(renderer, node, score, &mut fragment);
    fragment
}

fn walk(renderer: &ElementRenderer, node: &Node, score: f64, fragment: &mut Fragment) {
    let tag = Tag::of(node);
    if is_discarded(node, tag, score) {
        log::debug!("Discarding <{}>", node.get_name());
        return;
    }

    let children = node.get_child_nodes();
    if children.is_empty() || tag.is_renderable() {
        fragment.append(renderer.render(node, score));
        return;
    }

    for child in children {
        walk(renderer, &child, score, fragment);
    }
}

fn is_discarded(node: &Node, tag: Tag, score: f64) -> bool {
    match tag {
        Tag::Header | Tag::Footer => true,
        Tag::Div => is_meta_block(node),
        Tag::Section | Tag::List(_) => score > constants::ITERATIVE_THRESHOLD,
        _ => false,
    }
}

fn is_meta_block(node: &Node) -> bool {
    node.get_attribute("class")
        .map(|class| class.to_lowercase().contains("meta"))
        .unwrap_or(false)
        && Util::text_length(node) < constants::META_BLOCK_MAX_CHARS
}
