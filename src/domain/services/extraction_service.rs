use scraper::{ElementRef, Html, Node, Selector};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;
use url::Url;

use crate::domain::models::scrape_result::{
    LinkCounts, ScrapeResult, NO_H1, NO_MAIN_CONTENT, NO_META_DESCRIPTION, NO_TITLE,
};
use crate::utils::text_processing::{collapse_whitespace, truncate_chars};

/// 只检查前 N 张图片的 alt
pub const MAX_ALT_IMAGES: usize = 10;
/// 正文摘要最大字符数
pub const MAX_SNIPPET_CHARS: usize = 5000;

/// 正文容器的优先顺序
const CONTENT_CONTAINERS: [&str; 4] = ["main", "article", "[role=\"main\"]", "body"];
/// 直接父节点为这些标签的文本不计入正文
const SKIPPED_TEXT_PARENTS: [&str; 5] = ["script", "style", "head", "title", "meta"];

/// 提取服务
///
/// 负责从 HTML 内容中提取 SEO 相关字段。提取是纯函数且尽力而为：
/// 缺失的元素使用固定的回退值，任何输入都不会导致失败
pub struct ExtractionService;

impl ExtractionService {
    /// 提取数据
    ///
    /// # 参数
    /// * `html_content` - 页面原始 HTML
    /// * `url` - 页面地址，用于解析相对链接和区分站内外链接
    pub fn extract(html_content: &str, url: &str) -> ScrapeResult {
        let document = Html::parse_document(html_content);

        ScrapeResult {
            url: url.to_string(),
            title: extract_title(&document),
            meta_description: extract_meta_description(&document),
            h1: first_element(&document, "h1")
                .map(element_text)
                .unwrap_or_else(|| NO_H1.to_string()),
            headings: extract_headings(&document),
            alt_texts: extract_alt_texts(&document),
            schema_blocks: extract_schema_blocks(&document),
            links: count_links(&document, url),
            content_snippet: extract_content_snippet(&document),
        }
    }
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

fn first_element<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = selector(css)?;
    document.select(&selector).next()
}

fn all_elements<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(selector) => document.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// 元素内所有文本节点去除首尾空白后以单个空格连接
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_title(document: &Html) -> String {
    first_element(document, "title")
        .map(element_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string())
}

fn extract_meta_description(document: &Html) -> String {
    first_element(document, "meta[name=\"description\"]")
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_META_DESCRIPTION.to_string())
}

fn extract_headings(document: &Html) -> BTreeMap<String, Vec<String>> {
    let mut headings = BTreeMap::new();
    for level in 1..=6 {
        let tag = format!("h{}", level);
        let texts: Vec<String> = all_elements(document, &tag)
            .into_iter()
            .map(element_text)
            .collect();
        if !texts.is_empty() {
            headings.insert(tag, texts);
        }
    }
    headings
}

fn extract_alt_texts(document: &Html) -> Vec<String> {
    all_elements(document, "img")
        .into_iter()
        .take(MAX_ALT_IMAGES)
        .filter_map(|img| img.value().attr("alt"))
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_schema_blocks(document: &Html) -> Vec<Value> {
    all_elements(document, "script[type=\"application/ld+json\"]")
        .into_iter()
        .filter_map(|script| {
            let raw: String = script.text().collect();
            match serde_json::from_str::<Value>(raw.trim()) {
                Ok(block) => Some(block),
                Err(e) => {
                    warn!(
                        "Could not parse JSON-LD script: {} (content: {}...)",
                        e,
                        truncate_chars(raw.trim(), 100)
                    );
                    None
                }
            }
        })
        .collect()
}

fn count_links(document: &Html, page_url: &str) -> LinkCounts {
    let base = Url::parse(page_url).ok();
    let page_host = base
        .as_ref()
        .and_then(|b| b.host_str())
        .map(str::to_string);

    let mut counts = LinkCounts::default();
    for anchor in all_elements(document, "a[href]") {
        let href = match anchor.value().attr("href").map(str::trim) {
            Some(href) if !href.is_empty() => href,
            _ => continue,
        };

        let resolved = match &base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        let Ok(resolved) = resolved else {
            continue;
        };

        // mailto:, javascript:, tel: and friends are not counted
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }

        if resolved.host_str().is_some() && resolved.host_str() == page_host.as_deref() {
            counts.internal_count += 1;
        } else {
            counts.external_count += 1;
        }
    }
    counts
}

fn extract_content_snippet(document: &Html) -> String {
    let Some(container) = CONTENT_CONTAINERS
        .iter()
        .find_map(|css| first_element(document, css))
    else {
        return NO_MAIN_CONTENT.to_string();
    };

    let text = container
        .descendants()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            // Text directly under the document root has no element parent
            let parent = node.parent()?.value().as_element()?;
            if SKIPPED_TEXT_PARENTS.contains(&parent.name()) {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join(" ");

    truncate_chars(&collapse_whitespace(&text), MAX_SNIPPET_CHARS).to_string()
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
