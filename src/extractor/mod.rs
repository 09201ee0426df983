pub mod error;
mod relevance;
mod render;
mod sanitize;


pub use self::render::{ElementRenderer, Fragment, ListKind, Tag};
pub use self::sanitize::CleaningMode;

use self::error::ExtractorError;
use crate::article::Article;
use crate::constants;
use crate::images::ImageSelector;
use crate::metadata;
use crate::util::{Blank, Util};
use libxml::tree::{Document, Node};
use libxml::xpath::Context;

/// The node presumed to hold the article.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub node: Node,
    pub score: f64,
    pub paragraphs: Vec<Node>,
}

impl Candidate {
    pub fn new(node: Node, score: f64) -> Self {
        let paragraphs = Util::get_elements_by_tag_name(&node, "p");
        Self {
            node,
            score,
            paragraphs,
        }
    }
}

pub struct ArticleExtractor<'a> {
    images: &'a ImageSelector<'a>,
}

impl<'a> ArticleExtractor<'a> {
    pub fn new(images: &'a ImageSelector<'a>) -> Self {
        Self { images }
    }

    /// Find the article in `document` and turn it into clean html.
    ///
    /// `type_hint` is what the page claims to be (`og:type`). Anything but
    /// "article" lowers the confidence. The document is modified: boilerplate
    /// gets unlinked from the chosen container.
    pub fn extract(
        &self,
        document: &Document,
        type_hint: Option<&str>,
    ) -> Result<Article, ExtractorError> {
        libxml::tree::node::set_node_rc_guard(10);

        let xpath_ctx = Context::new(document).map_err(|()| {
            log::error!("Creating xpath context failed for downloaded HTML");
            ExtractorError::Xml
        })?;
        // read before stripping, bylines often sit in the article's own header
        let byline = metadata::extract_byline(&xpath_ctx);

        let (node, score) = match Self::select_candidate(&xpath_ctx) {
            Some(selection) => selection,
            None => {
                log::info!("No article container found");
                return Ok(Article::empty());
            }
        };
        log::debug!(
            "Article container <{}> with score {}",
            node.get_name(),
            score
        );

        Self::strip_unwanted(&xpath_ctx, &node);

        let (container, score) = relevance::locate(Candidate::new(node, score));
        let score = Self::apply_type_hint(score, type_hint);

        let renderer = ElementRenderer::new(self.images);
        let fragment = sanitize::clean(&renderer, &container, score);

        Ok(Article {
            body: fragment.html,
            text: Util::flattened_text(&container),
            images: fragment.images,
            score,
            authors: byline.authors,
            date: byline.date,
        })
    }

    fn select_candidate(xpath_ctx: &Context) -> Option<(Node, f64)> {
        let articles =
            Util::evaluate_xpath(xpath_ctx, constants::ARTICLE_XPATH, None).unwrap_or_default();

        match articles.as_slice() {
            [] => {}
            [single] => {
                if Util::text_length(single) >= constants::SINGLE_ARTICLE_MIN_CHARS {
                    return Some((single.clone(), constants::SINGLE_ARTICLE_SCORE));
                }
                log::debug!("Single <article> too short");
            }
            multiple => {
                let article = multiple.iter().find(|article| {
                    Util::text_length(article) > constants::MULTIPLE_ARTICLES_MIN_CHARS
                });
                if let Some(article) = article {
                    return Some((article.clone(), constants::MULTIPLE_ARTICLES_SCORE));
                }
                log::debug!("None of {} <article> elements long enough", multiple.len());
            }
        }

        Self::find_fallback(xpath_ctx).map(|node| (node, constants::FALLBACK_SCORE))
    }

    fn find_fallback(xpath_ctx: &Context) -> Option<Node> {
        for xpath in constants::FALLBACK_XPATHS {
            let node_vec = Util::evaluate_xpath(xpath_ctx, xpath, None).unwrap_or_default();
            let outermost = node_vec
                .iter()
                .filter(|node| !Util::part_of_result(node, &node_vec))
                .map(|node| (node, Util::text_length(node)))
                .collect::<Vec<_>>();

            let total: usize = outermost.iter().map(|(_, length)| length).sum();
            if total < constants::FALLBACK_MIN_CHARS {
                continue;
            }

            let mut longest: Option<(&Node, usize)> = None;
            for (node, length) in outermost {
                if longest.map(|(_, max)| length > max).unwrap_or(true) {
                    longest = Some((node, length));
                }
            }

            if let Some((node, _)) = longest {
                log::debug!("Fallback container found with '{}'", xpath);
                return Some(node.clone());
            }
        }

        None
    }

    fn strip_unwanted(xpath_ctx: &Context, root: &Node) {
        for xpath in constants::UNWANTED_XPATHS {
            Self::strip_matching(xpath_ctx, xpath, root);
        }

        for value in constants::UNWANTED_ATTRIBUTE_VALUES {
            let xpath = format!(".//*[@*[contains(., '{value}')]]");
            Self::strip_matching(xpath_ctx, &xpath, root);
        }
    }

    fn strip_matching(xpath_ctx: &Context, xpath: &str, root: &Node) {
        match Util::strip_node(xpath_ctx, xpath, root) {
            Ok(0) => {}
            Ok(removed) => log::debug!("Stripped {} nodes matching '{}'", removed, xpath),
            Err(()) => log::debug!("Stripping nodes matching '{}' failed", xpath),
        }
    }

    fn apply_type_hint(score: f64, type_hint: Option<&str>) -> f64 {
        match type_hint {
            Some(kind) if !kind.is_blank() && kind.trim() != constants::ARTICLE_TYPE => {
                log::debug!("Page claims to be '{}', not an article", kind);
                score - constants::TYPE_MISMATCH_PENALTY
            }
            _ => score,
        }
    }
}
