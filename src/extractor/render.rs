use super::sanitize;
use crate::constants;
use crate::images::ImageSelector;
use crate::util::{Blank, Util};
use libxml::tree::{Node, NodeType};

/// Rendered markup together with the images it shows, in the order they
/// first appeared.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Fragment {
    pub html: String,
    pub images: Vec<String>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.html.is_blank()
    }

    pub fn push_str(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub fn add_image(&mut self, url: String) {
        if !self.images.contains(&url) {
            self.images.push(url);
        }
    }

    pub fn append(&mut self, other: Fragment) {
        self.html.push_str(&other.html);
        for url in other.images {
            self.add_image(url);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Every kind of node the renderer tells apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Anchor,
    Image,
    /// `h1` to `h4`
    Heading,
    Paragraph,
    Figure,
    Text,
    Italic,
    List(ListKind),
    Div,
    Span,
    Break,
    Header,
    Footer,
    Section,
    Other,
}

impl Tag {
    pub fn of(node: &Node) -> Self {
        if Util::is_text_node(node) {
            return Self::Text;
        }

        if node.get_type() != Some(NodeType::ElementNode) {
            return Self::Other;
        }

        match node.get_name().to_lowercase().as_str() {
            "a" => Self::Anchor,
            "img" => Self::Image,
            "h1" | "h2" | "h3" | "h4" => Self::Heading,
            "p" => Self::Paragraph,
            "figure" => Self::Figure,
            "i" => Self::Italic,
            "ul" => Self::List(ListKind::Unordered),
            "ol" => Self::List(ListKind::Ordered),
            "div" => Self::Div,
            "span" => Self::Span,
            "br" => Self::Break,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "section" => Self::Section,
            _ => Self::Other,
        }
    }

    /// Rendered as a whole by the recursive cleaner instead of being descended into.
    pub fn is_renderable(&self) -> bool {
        matches!(
            self,
            Self::Paragraph | Self::Figure | Self::Anchor | Self::Heading | Self::Text
        )
    }
}

pub struct ElementRenderer<'a> {
    images: &'a ImageSelector<'a>,
}

impl<'a> ElementRenderer<'a> {
    pub fn new(images: &'a ImageSelector<'a>) -> Self {
        Self { images }
    }

    /// Turn a single node into sanitized markup. Only tags out of
    /// p, figure, img, figcaption, h2, i, a, ul, ol, li and br are ever produced.
    pub fn render(&self, node: &Node, score: f64) -> Fragment {
        let mut fragment = Fragment::default();

        match Tag::of(node) {
            // links only make sense inline, see `assemble_paragraph`
            Tag::Anchor => {}
            Tag::Image => {
                if let Some(url) = self.images.validate(node) {
                    fragment.push_str(&format!(
                        r#"<figure><img src="{}"></figure>"#,
                        escaper::encode_minimal(&url)
                    ));
                    fragment.add_image(url);
                }
            }
            Tag::Heading => {
                Self::wrap_text(&mut fragment, "<h2>", &Util::flattened_text(node), "</h2>")
            }
            Tag::Paragraph => fragment.append(self.render_paragraph(node, score)),
            Tag::Figure => fragment.append(self.render_figure(node)),
            Tag::Text => {
                let text = Util::flattened_text(node);
                if text != constants::ADVERTISEMENT {
                    Self::wrap_text(&mut fragment, r#"<p class="inline">"#, &text, "</p>");
                }
            }
            Tag::Italic => Self::wrap_text(&mut fragment, "<i>", &Util::flattened_text(node), "</i>"),
            Tag::List(kind) => fragment.append(self.render_list(node, kind)),
            Tag::Div | Tag::Span => {
                for child in node.get_child_nodes() {
                    fragment.append(self.render(&child, score));
                }
            }
            Tag::Break | Tag::Header | Tag::Footer | Tag::Section | Tag::Other => {}
        }

        fragment
    }

    fn wrap_text(fragment: &mut Fragment, open: &str, text: &str, close: &str) {
        if !text.is_blank() {
            fragment.push_str(open);
            fragment.push_str(&escaper::encode_minimal(text));
            fragment.push_str(close);
        }
    }

    fn render_paragraph(&self, node: &Node, score: f64) -> Fragment {
        let mut fragment = Fragment::default();

        if score < constants::LINK_PARAGRAPH_THRESHOLD && Self::is_link_only(node) {
            log::debug!("Dropping paragraph consisting only of links");
            return fragment;
        }

        self.assemble_paragraph(node, &mut fragment);
        let content = if fragment.html.is_blank() {
            escaper::encode_minimal(&Util::flattened_text(node))
        } else {
            Util::collapse_whitespace(&fragment.html)
        };

        fragment.html = if content.is_blank() {
            String::new()
        } else {
            constants::EMPTY_PARAGRAPH
                .replace_all(&format!("<p>{content}</p>"), "")
                .into_owned()
        };
        fragment
    }

    fn is_link_only(node: &Node) -> bool {
        let anchors = Util::get_elements_by_tag_name(node, "a");
        if anchors.is_empty() {
            return false;
        }

        let link_text = anchors
            .iter()
            .map(Node::get_content)
            .collect::<String>();
        Util::flattened_text(node) == Util::collapse_whitespace(&link_text)
    }

    fn assemble_paragraph(&self, node: &Node, fragment: &mut Fragment) {
        for child in node.get_child_nodes() {
            match Tag::of(&child) {
                // image wrapped in a link
                Tag::Anchor if Util::has_descendant_tag(&child, "img") => {
                    self.assemble_paragraph(&child, fragment)
                }
                Tag::Anchor => {
                    let href = child.get_attribute("href").unwrap_or_default();
                    fragment.push_str(&format!(
                        r#" <a href="{}">{}</a> "#,
                        escaper::encode_minimal(&href),
                        escaper::encode_minimal(&Util::flattened_text(&child))
                    ));
                }
                Tag::Image => {
                    if let Some(url) = self.images.validate(&child) {
                        fragment.push_str(&format!(
                            r#"</p><figure><img src="{}"></figure><p>"#,
                            escaper::encode_minimal(&url)
                        ));
                        fragment.add_image(url);
                    }
                }
                Tag::Break => fragment.push_str("<br>"),
                Tag::Text => {
                    // keep word boundaries towards neighbouring inline elements
                    let content = child.get_content();
                    if content.is_blank() {
                        fragment.push_str(" ");
                    } else {
                        let leading = content.starts_with(char::is_whitespace);
                        let trailing = content.ends_with(char::is_whitespace);
                        let text = escaper::encode_minimal(&Util::collapse_whitespace(&content));
                        fragment.push_str(&format!(
                            "{}{}{}",
                            if leading { " " } else { "" },
                            text,
                            if trailing { " " } else { "" }
                        ));
                    }
                }
                _ => self.assemble_paragraph(&child, fragment),
            }
        }
    }

    fn render_figure(&self, node: &Node) -> Fragment {
        let mut images = Fragment::default();
        self.collect_figure_images(node, &mut images);

        if images.is_empty() {
            return images;
        }

        let caption = Util::get_elements_by_tag_name(node, "figcaption")
            .iter()
            .map(Util::flattened_text)
            .collect::<Vec<_>>()
            .join(" ");
        let caption = Util::collapse_whitespace(&caption);

        let mut fragment = Fragment::default();
        fragment.push_str("<figure>");
        fragment.append(images);
        Self::wrap_text(&mut fragment, "<figcaption>", &caption, "</figcaption>");
        fragment.push_str("</figure>");
        fragment
    }

    fn collect_figure_images(&self, node: &Node, images: &mut Fragment) {
        if Tag::of(node) == Tag::Image || Util::class_contains(node, constants::DELAYED_IMAGE_CLASS)
        {
            if let Some(url) = self.images.validate(node) {
                images.push_str(&format!(
                    r#"<img src="{}">"#,
                    escaper::encode_minimal(&url)
                ));
                images.add_image(url);
            }
            return;
        }

        for child in node.get_child_nodes() {
            self.collect_figure_images(&child, images);
        }
    }

    fn render_list(&self, node: &Node, kind: ListKind) -> Fragment {
        let mut items = Fragment::default();

        for item in Util::get_elements_by_tag_name(node, "li") {
            let cleaned = sanitize::recursive(self, &item, constants::LIST_ITEM_SCORE);
            if !cleaned.is_empty() {
                items.push_str(&format!("<li>{}</li>", cleaned.html));
                for url in cleaned.images {
                    items.add_image(url);
                }
            }
        }

        if items.is_empty() {
            return Fragment::default();
        }

        Fragment {
            html: format!("<{0}>{1}</{0}>", kind.tag_name(), items.html),
            images: items.images,
        }
    }
}
