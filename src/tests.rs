use crate::*;
use url::Url;

const ARTICLE: &str = include_str!("../resources/tests/article.html");
const PAGE_URL: &str = "https://news.example.com/2015/06/harbour.html";
const LEAD_IMAGE: &str = "https://news.example.com/images/lead.jpg";

fn artext() -> Artext {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config {
        sample_theme: false,
        ..Config::default()
    };
    let probe = StaticProbe::new().with(LEAD_IMAGE, ImageInfo::new(ImageKind::Jpeg, 1200, 800));
    Artext::with_probe(config, Box::new(probe)).unwrap()
}

#[test]
fn harbour_story() {
    let url = Url::parse(PAGE_URL).unwrap();
    let clip = artext().extract_html(ARTICLE, &url).unwrap();

    assert_eq!(clip.url, PAGE_URL);
    assert_eq!(clip.title.as_deref(), Some("Dawn at the Harbour"));
    assert_eq!(clip.kind.as_deref(), Some("article"));
    assert_eq!(clip.tags, vec!["harbour", "boats", "mornings"]);
    assert_eq!(
        clip.image.as_deref(),
        Some("https://news.example.com/images/lead-og.jpg")
    );
    assert_eq!(clip.authors, vec!["Jane Doe"]);
    assert_eq!(clip.date.as_deref(), Some("June 1, 2015"));
    assert_eq!(clip.score, 0.95);
    assert_eq!(clip.images, vec![LEAD_IMAGE]);
    assert_eq!(
        clip.favicon.as_deref(),
        Some("http://www.google.com/s2/favicons?domain_url=https://news.example.com/2015/06/harbour.html")
    );
    assert_eq!(clip.theme, None);
}

#[test]
fn harbour_story_body() {
    let url = Url::parse(PAGE_URL).unwrap();
    let clip = artext().extract_html(ARTICLE, &url).unwrap();

    assert!(clip.body.starts_with(
        "<p>Long before the first ferry leaves, the harbour is already awake. Fishermen haul"
    ));
    assert!(clip.body.contains(concat!(
        r#"<figure><img src="https://news.example.com/images/lead.jpg">"#,
        "<figcaption>The harbour at dawn, seen from the old lighthouse.</figcaption></figure>",
    )));
    assert!(clip.body.contains(concat!(
        r#"stops at the <a href="https://news.example.com/food/best-fish-and-chips">"#,
        "Fish &amp; chips stand</a> on the corner every morning.</p>",
    )));
    assert!(clip.body.contains(concat!(
        r#"<ul><li><p class="inline">Nets mended</p></li>"#,
        r#"<li><p class="inline">Engines checked</p></li></ul>"#,
    )));
    assert!(clip
        .body
        .ends_with("until long after the sun is up.</p>"));

    assert!(clip.text.starts_with("Long before the first ferry leaves"));
    for unwanted in [
        "Coastal Daily",
        "Share on Twitter",
        "trackRead",
        "Saving the lighthouse",
        "Filed under",
        "Great read",
        "By Jane Doe",
    ] {
        assert!(!clip.body.contains(unwanted), "{unwanted}");
        assert!(!clip.text.contains(unwanted), "{unwanted}");
    }
}

#[test]
fn website_type_lowers_score() {
    let html = ARTICLE.replace(
        r#"<meta property="og:type" content="article">"#,
        r#"<meta property="og:type" content="website">"#,
    );
    let url = Url::parse(PAGE_URL).unwrap();
    let clip = artext().extract_html(&html, &url).unwrap();

    assert_eq!(clip.kind.as_deref(), Some("website"));
    assert!((clip.score - 0.45).abs() < 1e-9);
    // cleaned recursively now, lists are flattened
    assert!(!clip.body.contains("<ul>"));
    assert!(clip.body.contains(r#"<p class="inline">Nets mended</p>"#));
}

#[test]
fn nothing_to_parse_is_an_image() {
    let url = Url::parse("http://pics.example.com/cat.png").unwrap();
    let clip = artext().extract_html("", &url).unwrap();

    assert_eq!(clip.kind.as_deref(), Some("image"));
    assert_eq!(clip.score, 1.0);
    assert_eq!(clip.images, vec!["http://pics.example.com/cat.png"]);
    assert_eq!(
        clip.body,
        r#"<figure><img src="http://pics.example.com/cat.png"></figure>"#
    );
    assert!(clip.favicon.is_some());
}

#[test]
fn page_without_article() {
    let html = "<html><head><title>Contact</title></head><body><p>Call us.</p></body></html>";
    let url = Url::parse("http://shop.example.com/contact").unwrap();
    let clip = artext().extract_html(html, &url).unwrap();

    assert_eq!(clip.title.as_deref(), Some("Contact"));
    assert_eq!(clip.score, 0.0);
    assert_eq!(clip.body, "");
    assert!(clip.images.is_empty());
    assert_eq!(clip.kind, None);
}

#[test]
fn normalize_url() {
    assert_eq!(
        Artext::normalize_url("example.com/story").unwrap().as_str(),
        "http://example.com/story"
    );
    assert_eq!(
        Artext::normalize_url(" HTTPS://News.Example.com:8080/a?b=c ")
            .unwrap()
            .as_str(),
        "https://news.example.com:8080/a?b=c"
    );

    for invalid in ["ftp://example.com/file", "not a url", "localhost/page", ""] {
        assert!(
            matches!(
                Artext::normalize_url(invalid),
                Err(ArtextError::InvalidUrl(_))
            ),
            "{invalid}"
        );
    }
}

#[test]
fn invalid_url_never_fetched() {
    assert!(matches!(
        artext().extract("javascript:alert(1)"),
        Err(ArtextError::InvalidUrl(_))
    ));
}

#[test]
fn clip_json() {
    let url = Url::parse(PAGE_URL).unwrap();
    let clip = artext().extract_html(ARTICLE, &url).unwrap();
    let json = serde_json::to_value(&clip).unwrap();

    assert_eq!(json["type"], "article");
    assert_eq!(json["title"], "Dawn at the Harbour");
    assert_eq!(json["images"][0], LEAD_IMAGE);
    assert!(json["theme"].is_null());
}
