use crate::constants;
use serde::Serialize;
use url::Url;

/// What the extractor made of a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Sanitized html fragment
    pub body: String,
    /// Plain text of the refined container
    pub text: String,
    pub images: Vec<String>,
    pub score: f64,
    pub authors: Vec<String>,
    pub date: Option<String>,
}

impl Article {
    /// Nothing resembling an article was found.
    pub fn empty() -> Self {
        Self {
            body: String::new(),
            text: String::new(),
            images: Vec::new(),
            score: 0.0,
            authors: Vec::new(),
            date: None,
        }
    }

    /// The page is a bare image. Nothing to extract, so show the image itself.
    pub fn image(url: &Url) -> Self {
        let src = url.as_str();
        Self {
            body: format!(
                r#"<figure><img src="{}"></figure>"#,
                escaper::encode_minimal(src)
            ),
            text: String::new(),
            images: vec![src.to_owned()],
            score: constants::IMAGE_PAGE_SCORE,
            authors: Vec::new(),
            date: None,
        }
    }

    pub fn is_image(&self) -> bool {
        self.score >= constants::IMAGE_PAGE_SCORE
    }
}

/// The complete record handed out for a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clip {
    pub url: String,
    pub body: String,
    pub text: String,
    pub images: Vec<String>,
    pub score: f64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub favicon: Option<String>,
    pub theme: Option<String>,
    pub date: Option<String>,
    pub authors: Vec<String>,
    pub image: Option<String>,
}

impl Clip {
    pub fn new(url: &Url, article: Article) -> Self {
        let kind = if article.is_image() {
            Some(constants::IMAGE_TYPE.to_owned())
        } else {
            None
        };

        Self {
            url: url.as_str().to_owned(),
            body: article.body,
            text: article.text,
            images: article.images,
            score: article.score,
            kind,
            title: None,
            tags: Vec::new(),
            favicon: None,
            theme: None,
            date: article.date,
            authors: article.authors,
            image: None,
        }
    }
}
