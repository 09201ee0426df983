use crate::constants;
use crate::util::{Blank, Util};
use chrono::NaiveDate;
use libxml::xpath::Context;
use log::{debug, warn};
use url::Url;

/// Everything the `<head>` of a page says about it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: Option<String>,
    /// `og:type`
    pub kind: Option<String>,
    pub tags: Vec<String>,
    /// `og:image` urls, made absolute
    pub images: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Byline {
    pub authors: Vec<String>,
    pub date: Option<String>,
}

pub fn extract(context: &Context, url: &Url) -> PageMetadata {
    PageMetadata {
        title: extract_title(context),
        kind: get_meta(context, "og:type"),
        tags: extract_tags(context),
        images: extract_images(context, url),
    }
}

pub fn extract_byline(context: &Context) -> Byline {
    Byline {
        authors: Util::get_attributes(
            context,
            "//meta[@property='author' or @name='author']",
            "content",
        ),
        date: extract_date(context),
    }
}

fn get_meta(context: &Context, name: &str) -> Option<String> {
    Util::get_attribute(
        context,
        &format!("//meta[@property='{name}' or @name='{name}']"),
        "content",
    )
}

fn extract_title(context: &Context) -> Option<String> {
    let title = get_meta(context, "og:title").or_else(|| {
        Util::evaluate_xpath(context, "//title", None)
            .ok()?
            .first()
            .map(|node| node.get_content())
    })?;

    let title = match escaper::decode_html(&title) {
        Ok(decoded_title) => decoded_title,
        Err(_error) => title,
    };
    let title = Util::collapse_whitespace(&title);
    debug!("Page title: '{}'", title);

    if title.is_blank() {
        None
    } else {
        Some(title)
    }
}

fn extract_tags(context: &Context) -> Vec<String> {
    let xpath = "//meta[contains(@name, 'tag') or contains(@property, 'tag') \
                 or contains(@name, 'keyword') or contains(@property, 'keyword')]";
    let mut tags: Vec<String> = Vec::new();

    for content in Util::get_attributes(context, xpath, "content") {
        for tag in content.split(',').map(str::trim) {
            if !tag.is_blank() && !tags.iter().any(|known| known == tag) {
                tags.push(tag.to_owned());
            }
        }
    }

    tags
}

fn extract_images(context: &Context, url: &Url) -> Vec<String> {
    Util::get_attributes(
        context,
        "//meta[@property='og:image' or @name='og:image']",
        "content",
    )
    .into_iter()
    .map(|image| absolute_image_url(image.trim(), url))
    .collect()
}

fn absolute_image_url(image: &str, url: &Url) -> String {
    if image.starts_with("//") {
        format!("{}:{}", url.scheme(), image)
    } else if image.starts_with('/') {
        let host = url.host_str().unwrap_or_default();
        match url.port() {
            Some(port) => format!("{}://{}:{}{}", url.scheme(), host, port, image),
            None => format!("{}://{}{}", url.scheme(), host, image),
        }
    } else {
        image.to_owned()
    }
}

fn extract_date(context: &Context) -> Option<String> {
    let from_meta = Util::get_attributes(
        context,
        "//meta[contains(@name, 'date') or contains(@property, 'date')]",
        "content",
    )
    .into_iter()
    .find(|content| is_plausible_date(content));

    let date_string = from_meta.or_else(|| {
        Util::get_attributes(context, "//*[@datetime]", "datetime")
            .into_iter()
            .find(|datetime| is_plausible_date(datetime))
    })?;

    debug!("Article date: '{}'", date_string);
    let date = format_date(&date_string);
    if date.is_none() {
        warn!("Parsing the date string '{}' failed", date_string);
    }
    date
}

/// Starts with a year of this millennium.
fn is_plausible_date(value: &str) -> bool {
    value
        .trim()
        .get(..4)
        .and_then(|year| year.parse::<i32>().ok())
        .map(|year| year > constants::MIN_YEAR)
        .unwrap_or(false)
}

/// `2015-06-01T08:00:00Z` becomes `June 1, 2015`. Month and day default to 1.
pub fn format_date(value: &str) -> Option<String> {
    let compact: String = value.split_whitespace().collect();
    let compact: String = compact.chars().take(10).collect();

    let mut parts = compact.split('-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = match parts.next() {
        Some(month) => month.parse::<u32>().ok()?,
        None => 1,
    };
    let day = match parts.next() {
        Some(day) => day.parse::<u32>().ok()?,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format("%B %-d, %Y").to_string())
}

#[cfg(test)]
mod tests {
    use super::{extract, extract_byline, format_date};
    use libxml::parser::Parser;
    use libxml::xpath::Context;
    use url::Url;

    const HEAD: &str = r#"<html><head>
        <title>  Fallback &amp; Title </title>
        <meta property="og:title" content="The  Real Title">
        <meta property="og:type" content="article">
        <meta name="keywords" content="rust, parsing, , rust">
        <meta property="article:tag" content="html">
        <meta property="og:image" content="//cdn.news.test/lead.jpg">
        <meta name="og:image" content="/img/second.png">
        <meta property="og:image" content="https://other.test/third.gif">
        <meta name="author" content="Jane Doe">
        <meta property="author" content="  ">
        <meta property="author" content="John Roe">
        <meta name="last-modified-date" content="yesterday">
        <meta property="article:published_date" content="2015-06-01T08:00:00Z">
        </head><body><p>text</p></body></html>"#;

    #[test]
    fn page_metadata() {
        let document = Parser::default_html().parse_string(HEAD).unwrap();
        let context = Context::new(&document).unwrap();
        let url = Url::parse("https://news.test:8080/story").unwrap();

        let metadata = extract(&context, &url);
        assert_eq!(metadata.title.as_deref(), Some("The Real Title"));
        assert_eq!(metadata.kind.as_deref(), Some("article"));
        assert_eq!(metadata.tags, vec!["rust", "parsing", "html"]);
        assert_eq!(
            metadata.images,
            vec![
                "https://cdn.news.test/lead.jpg",
                "https://news.test:8080/img/second.png",
                "https://other.test/third.gif",
            ]
        );
    }

    #[test]
    fn title_falls_back_to_title_element() {
        let html = "<html><head><title>  Fish &amp;\n Chips </title></head><body></body></html>";
        let document = Parser::default_html().parse_string(html).unwrap();
        let context = Context::new(&document).unwrap();
        let url = Url::parse("http://food.test/").unwrap();

        let metadata = extract(&context, &url);
        assert_eq!(metadata.title.as_deref(), Some("Fish & Chips"));
        assert_eq!(metadata.kind, None);
        assert!(metadata.tags.is_empty());
        assert!(metadata.images.is_empty());
    }

    #[test]
    fn byline() {
        let document = Parser::default_html().parse_string(HEAD).unwrap();
        let context = Context::new(&document).unwrap();

        let byline = extract_byline(&context);
        assert_eq!(byline.authors, vec!["Jane Doe", "John Roe"]);
        assert_eq!(byline.date.as_deref(), Some("June 1, 2015"));
    }

    #[test]
    fn date_from_datetime_attribute() {
        let html = r#"<html><body>
            <time datetime="1999-01-01">old</time>
            <time datetime="2019-11-23 10:00">new</time>
            </body></html>"#;
        let document = Parser::default_html().parse_string(html).unwrap();
        let context = Context::new(&document).unwrap();

        assert_eq!(
            extract_byline(&context).date.as_deref(),
            Some("November 23, 2019")
        );
    }

    #[test]
    fn date_formats() {
        assert_eq!(format_date("2015-06-01").as_deref(), Some("June 1, 2015"));
        assert_eq!(format_date("2016-03").as_deref(), Some("March 1, 2016"));
        assert_eq!(format_date("2017").as_deref(), Some("January 1, 2017"));
        assert_eq!(format_date("2015-13-01"), None);
        assert_eq!(format_date("2015/06/01"), None);
    }
}
