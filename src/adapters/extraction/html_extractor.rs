//! Generic article page parser built on `scraper`.
//!
//! Pulls title, body, summary, authors, publish date and lead image from common
//! meta tags and markup. No per-site rules.

use crate::domain::{DomainError, ExtractedArticle};
use crate::ports::ArticleExtractorPort;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

const TITLE_META: &[&str] = &[r#"meta[property="og:title"]"#, r#"meta[name="twitter:title"]"#];
const SUMMARY_META: &[&str] = &[
    r#"meta[name="description"]"#,
    r#"meta[property="og:description"]"#,
];
const AUTHOR_META: &[&str] = &[r#"meta[name="author"]"#, r#"meta[property="article:author"]"#];
const DATE_META: &[&str] = &[
    r#"meta[property="article:published_time"]"#,
    r#"meta[name="pubdate"]"#,
    r#"meta[name="publish-date"]"#,
    r#"meta[itemprop="datePublished"]"#,
];
const IMAGE_META: &[&str] = &[r#"meta[property="og:image"]"#, r#"meta[name="twitter:image"]"#];

pub struct HtmlArticleExtractor {
    client: Client,
    min_chars: usize,
}

impl HtmlArticleExtractor {
    /// `min_chars`: bodies shorter than this (after trimming) are rejected.
    pub fn new(client: Client, min_chars: usize) -> Self {
        Self { client, min_chars }
    }
}

#[async_trait::async_trait]
impl ArticleExtractorPort for HtmlArticleExtractor {
    async fn extract(&self, url: &str) -> Result<Option<ExtractedArticle>, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Extraction(format!("download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::Extraction(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| DomainError::Extraction(format!("body unreadable: {}", e)))?;

        let article = parse_article(&html, self.min_chars);
        match &article {
            Some(a) => info!(url, chars = a.text.len(), authors = a.authors.len(), "article extracted"),
            None => debug!(url, min = self.min_chars, "article body below length floor"),
        }
        Ok(article)
    }
}

/// Parse an article page. `None` when the body text is shorter than `min_chars`.
pub fn parse_article(html: &str, min_chars: usize) -> Option<ExtractedArticle> {
    let doc = Html::parse_document(html);

    let text = body_text(&doc);
    if text.trim().chars().count() < min_chars {
        return None;
    }

    let title = meta_content(&doc, TITLE_META)
        .or_else(|| first_text(&doc, "title"))
        .or_else(|| first_text(&doc, "h1"))
        .unwrap_or_default();

    let publish_date = meta_content(&doc, DATE_META).or_else(|| {
        let sel = Selector::parse("time[datetime]").ok()?;
        doc.select(&sel)
            .next()
            .and_then(|t| t.value().attr("datetime"))
            .map(|s| s.trim().to_string())
    });

    Some(ExtractedArticle {
        title,
        text,
        summary: meta_content(&doc, SUMMARY_META).unwrap_or_default(),
        authors: authors(&doc),
        publish_date,
        top_image: meta_content(&doc, IMAGE_META),
    })
}

/// Paragraphs inside `<article>` when present and non-empty, otherwise every `<p>`.
fn body_text(doc: &Html) -> String {
    let scoped = paragraphs(doc, "article p");
    if !scoped.is_empty() {
        return scoped.join("\n\n");
    }
    paragraphs(doc, "p").join("\n\n")
}

fn paragraphs(doc: &Html, css: &str) -> Vec<String> {
    let Ok(sel) = Selector::parse(css) else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(|p| normalize(p.text()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Ordered, de-duplicated author names from meta tags and `rel=author` links.
fn authors(doc: &Html) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut push = |name: String| {
        if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
            names.push(name);
        }
    };

    for css in AUTHOR_META {
        if let Ok(sel) = Selector::parse(css) {
            for el in doc.select(&sel) {
                if let Some(content) = el.value().attr("content") {
                    // Skip profile URLs some sites put in article:author.
                    if !content.starts_with("http") {
                        push(content.trim().to_string());
                    }
                }
            }
        }
    }
    if let Ok(sel) = Selector::parse(r#"[rel="author"]"#) {
        for el in doc.select(&sel) {
            push(normalize(el.text()));
        }
    }
    names
}

fn meta_content(doc: &Html, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|css| {
        let sel = Selector::parse(css).ok()?;
        doc.select(&sel)
            .filter_map(|m| m.value().attr("content"))
            .map(str::trim)
            .find(|c| !c.is_empty())
            .map(str::to_string)
    })
}

fn first_text(doc: &Html, css: &str) -> Option<String> {
    let sel = Selector::parse(css).ok()?;
    doc.select(&sel)
        .map(|el| normalize(el.text()))
        .find(|t| !t.is_empty())
}

fn normalize<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
