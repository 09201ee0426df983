use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

pub const SINGLE_ARTICLE_SCORE: f64 = 0.9;
pub const MULTIPLE_ARTICLES_SCORE: f64 = 0.8;
pub const FALLBACK_SCORE: f64 = 0.6;
pub const RELEVANT_SCORE: f64 = 0.95;
pub const IMAGE_PAGE_SCORE: f64 = 1.0;
pub const TYPE_MISMATCH_PENALTY: f64 = 0.5;

/// Scores above this are cleaned one child at a time, everything else is
/// walked recursively.
pub const ITERATIVE_THRESHOLD: f64 = 0.9;
/// Below this, paragraphs made of nothing but links are dropped.
pub const LINK_PARAGRAPH_THRESHOLD: f64 = 0.8;
/// List items are always cleaned as if they were highly relevant.
pub const LIST_ITEM_SCORE: f64 = 0.95;

pub const SINGLE_ARTICLE_MIN_CHARS: usize = 500;
pub const MULTIPLE_ARTICLES_MIN_CHARS: usize = 200;
pub const FALLBACK_MIN_CHARS: usize = 450;
pub const META_BLOCK_MAX_CHARS: usize = 300;

pub const MIN_IMAGE_DIMENSION: u32 = 100;
pub const MIN_GIF_WIDTH: u32 = 299;
pub const MIN_GIF_HEIGHT: u32 = 199;
pub const MIN_YEAR: i32 = 2000;

pub const ARTICLE_XPATH: &str = "//article";
pub const FALLBACK_XPATHS: &[&str] = &[
    "//*[@*='articleBody']",
    "//*[contains(@class, 'article')]",
    "//*[contains(@class, 'body')]",
];
pub const UNWANTED_XPATHS: &[&str] = &[
    ".//script",
    ".//comment()",
    ".//aside",
    ".//*[contains(@class, 'aside')]",
    ".//iframe",
    ".//noscript",
    ".//form",
    ".//header",
    ".//footer",
];
pub const UNWANTED_ATTRIBUTE_VALUES: &[&str] = &["comment", "social", "advertisement", "share"];

/// Attributes an `<img>` may carry its url in, most trustworthy first.
/// Lazy loading scripts tend to keep a placeholder in `src`.
pub const IMAGE_SOURCE_ATTRIBUTES: &[&str] = &[
    "data-image",
    "data-original",
    "srcset",
    "data-src",
    "datasrc",
    "rel:bf_image_src",
    "src",
];
pub const DELAYED_IMAGE_CLASS: &str = "js-delayed-image-load";
pub const ADVERTISEMENT: &str = "advertisement";
pub const ARTICLE_TYPE: &str = "article";
pub const IMAGE_TYPE: &str = "image";

pub static LOGO_OR_FALLBACK: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r#"logo|fallback"#)
        .case_insensitive(true)
        .build()
        .expect("LOGO_OR_FALLBACK regex")
});
pub static HAS_SCHEME: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r#"^(http|https)://"#)
        .case_insensitive(true)
        .build()
        .expect("HAS_SCHEME regex")
});
pub static VALID_URL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(
        r#"^(http|https)://[a-z0-9]+([\-.][a-z0-9]+)*\.[a-z]{2,5}(:[0-9]{1,5})?(/.*)?$"#,
    )
    .case_insensitive(true)
    .build()
    .expect("VALID_URL regex")
});
pub static EMPTY_PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<p>\s*</p>"#).expect("EMPTY_PARAGRAPH regex"));
pub static CHARSET_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"charset=([^"']+)"#).expect("CHARSET_HEADER regex"));
pub static CHARSET_HTML: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<meta[^>]*?charset=["']?([^"'\s>]+)"#).expect("CHARSET_HTML regex"));
