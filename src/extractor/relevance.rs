use super::Candidate;
use crate::constants;
use crate::util::Util;
use libxml::tree::Node;

/// Narrow the container down to the descendant that holds (nearly) all of
/// its paragraphs. Walks up from the paragraphs one generation at a time and
/// keeps track of the ancestor with the most paragraph descendants.
///
/// Finding such a node raises the score to `RELEVANT_SCORE`. Containers
/// without paragraphs come back unchanged.
pub fn locate(candidate: Candidate) -> (Node, f64) {
    let Candidate {
        node: container,
        mut score,
        paragraphs,
    } = candidate;

    if paragraphs.is_empty() {
        return (container, score);
    }

    let total = paragraphs.len();
    let max_steps = Util::get_height(&container) + 1;
    let mut generation = paragraphs;
    let mut richest = container.clone();
    let mut max_count = 0;
    let mut last_count = 0;

    for _ in 0..max_steps {
        if generation.first() == Some(&container) {
            break;
        }

        let parents = parent_generation(&generation, &container);
        if parents.is_empty() {
            break;
        }

        for parent in &parents {
            let count = Util::get_elements_by_tag_name(parent, "p").len();
            if count > max_count {
                max_count = count;
                richest = parent.clone();
            }
        }

        if (last_count > 5 && last_count == max_count) || total.saturating_sub(max_count) < 2 {
            if score < 1.0 {
                score = constants::RELEVANT_SCORE;
            }
            log::debug!(
                "<{}> holds {} of {} paragraphs",
                richest.get_name(),
                max_count,
                total
            );
            break;
        }

        last_count = max_count;
        generation = parents;
    }

    (richest, score)
}

/// Distinct parents of `generation` that still lie inside `container`.
fn parent_generation(generation: &[Node], container: &Node) -> Vec<Node> {
    let mut parents: Vec<Node> = Vec::new();

    for node in generation {
        if let Some(parent) = node.get_parent() {
            if Util::is_descendant_or_self(&parent, container) && !parents.contains(&parent) {
                parents.push(parent);
            }
        }
    }

    parents
}
