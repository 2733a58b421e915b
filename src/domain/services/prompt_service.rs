// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::domain::models::prompt::{Language, Platform, PromptRequest, UseCase};
use crate::domain::models::scrape_result::ScrapeResult;
use crate::utils::errors::SeoError;
use crate::utils::text_processing::truncate_chars;

/// 每级标题最多取样数
const HEADING_SAMPLES_PER_LEVEL: usize = 2;
/// alt 文本取样数
const ALT_TEXT_SAMPLES: usize = 5;
/// 结构化数据类型取样数
const SCHEMA_TYPE_SAMPLES: usize = 3;
/// 正文取样字符数
const CONTENT_SAMPLE_CHARS: usize = 500;

const UNKNOWN_SCHEMA_TYPE: &str = "Unknown Type";
const END_OF_INSTRUCTIONS: &str = "--- End of Instructions ---";

/// 按模板标识构建提示词时携带的数据
#[derive(Debug, Clone, Copy)]
pub enum PromptInput<'a> {
    Page(&'a ScrapeResult),
    Topic {
        topic: &'a str,
        keywords: Option<&'a str>,
    },
}

/// 提示词服务
///
/// 把抓取结果或社交主题渲染成发送给模型的提示词，
/// 提示词中包含要求模型逐字填写的输出 JSON 模板
pub struct PromptService;

impl PromptService {
    /// 构建提示词
    pub fn build(request: &PromptRequest<'_>) -> Result<String, SeoError> {
        match *request {
            PromptRequest::ShopifySeo { page, language } => Ok(seo_prompt(page, language)),
            PromptRequest::Social {
                platform,
                topic,
                keywords,
                language,
            } => {
                if topic.trim().is_empty() {
                    return Err(missing_topic());
                }
                Ok(social_prompt(platform, topic.trim(), keywords, language))
            }
        }
    }

    /// 先解析模板标识（`shopify_seo` / `social:<platform>`），再构建提示词
    pub fn build_for_tag(
        tag: &str,
        language: Language,
        input: PromptInput<'_>,
    ) -> Result<String, SeoError> {
        let request = match (tag.parse::<UseCase>()?, input) {
            (UseCase::ShopifySeo, PromptInput::Page(page)) => {
                PromptRequest::ShopifySeo { page, language }
            }
            (UseCase::Social(platform), PromptInput::Topic { topic, keywords }) => {
                PromptRequest::Social {
                    platform,
                    topic,
                    keywords,
                    language,
                }
            }
            (use_case, _) => {
                return Err(SeoError::InvalidInput(format!(
                    "Prompt data does not match template: {}",
                    use_case
                )))
            }
        };
        Self::build(&request)
    }

    /// 校验社交请求参数并组装提示词请求
    ///
    /// 平台不受支持时返回 `UnsupportedPlatform`，主题为空时返回 `MissingInput`
    pub fn social_request<'a>(
        platform: &str,
        topic: &'a str,
        keywords: Option<&'a str>,
        language: Language,
    ) -> Result<PromptRequest<'a>, SeoError> {
        let platform: Platform = platform.parse()?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(missing_topic());
        }

        Ok(PromptRequest::Social {
            platform,
            topic,
            keywords: keywords.map(str::trim).filter(|k| !k.is_empty()),
            language,
        })
    }
}

fn missing_topic() -> SeoError {
    SeoError::MissingInput("Missing 'topic' or description parameter".to_string())
}

/// 提取结构化数据块中的类型名称
///
/// 依次展开顶层数组、`@graph` 成员和 `@type` 数组；没有类型的块记为 `Unknown Type`
pub fn schema_type_names(blocks: &[Value]) -> Vec<String> {
    let mut names = Vec::new();
    for block in blocks {
        collect_type_names(block, &mut names);
    }
    names
}

fn collect_type_names(value: &Value, names: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_type_names(item, names);
            }
        }
        Value::Object(map) => match (map.get("@type"), map.get("@graph")) {
            (Some(Value::String(name)), _) => names.push(name.clone()),
            (Some(Value::Array(types)), _) => {
                names.extend(types.iter().filter_map(Value::as_str).map(str::to_string))
            }
            (_, Some(graph)) => collect_type_names(graph, names),
            _ => names.push(UNKNOWN_SCHEMA_TYPE.to_string()),
        },
        _ => names.push(UNKNOWN_SCHEMA_TYPE.to_string()),
    }
}

fn heading_samples(headings: &BTreeMap<String, Vec<String>>) -> Value {
    let samples: serde_json::Map<String, Value> = headings
        .iter()
        .filter(|(_, texts)| !texts.is_empty())
        .map(|(level, texts)| {
            let sample: Vec<&String> = texts.iter().take(HEADING_SAMPLES_PER_LEVEL).collect();
            (level.clone(), json!(sample))
        })
        .collect();
    Value::Object(samples)
}

fn seo_prompt(page: &ScrapeResult, language: Language) -> String {
    let lang = language.display_name();
    let alt_samples: Vec<&String> = page.alt_texts.iter().take(ALT_TEXT_SAMPLES).collect();
    let schema_samples: Vec<String> = schema_type_names(&page.schema_blocks)
        .into_iter()
        .take(SCHEMA_TYPE_SAMPLES)
        .collect();

    format!(
        r#"Act as an experienced e-commerce SEO consultant who specializes in Shopify stores.
Analyze the following data scraped from the page {url} and find SEO optimization opportunities. Write the analysis in {lang}.

**Scraped Data:**
- Title: {title}
- Meta Description: {description}
- H1 Heading: {h1}
- Headings Structure (Sample): {headings}
- Image Alt Texts (Sample): {alts}
- Detected Schema Types (Sample): {schemas}
- Link Counts: Internal: {internal}, External: {external}
- Content Snippet: "{content}..."

**Analysis Tasks (write everything in {lang}):**

1. Core SEO elements:
   - Critique the current title (length, clarity, keywords) and suggest one improved title of at most 60 characters, with your reasoning.
   - Critique the current meta description (length, clarity, call to action, keywords) and suggest one improved description of at most 155 characters, with your reasoning.
   - Analyze the H1 heading and suggest an improvement only if one is needed.

2. Content and keywords:
   - Identify the main topic from the headings and content snippet and suggest 5 to 7 relevant short and long-tail keywords.
   - Suggest 2 Shopify blog post titles related to this page that could drive traffic.

3. On-page and technical:
   - Give 1 specific recommendation for image SEO based on the sampled alt texts.
   - Recommend the most appropriate Schema.org type for this page (for example Product, Article or CollectionPage) and list 3 essential properties. If schema was detected, briefly evaluate it.
   - Give 2 actionable technical SEO tips for Shopify stores.

**Output Format:**
Respond only with a single valid JSON object that follows this structure exactly. Every natural-language string value must be written in {lang}.

```json
{template}
```

{end}"#,
        url = page.url,
        lang = lang,
        title = page.title,
        description = page.meta_description,
        h1 = page.h1,
        headings = heading_samples(&page.headings),
        alts = json!(alt_samples),
        schemas = json!(schema_samples),
        internal = page.links.internal_count,
        external = page.links.external_count,
        content = truncate_chars(&page.content_snippet, CONTENT_SAMPLE_CHARS),
        template = format!("{:#}", seo_template(language)),
        end = END_OF_INSTRUCTIONS,
    )
}

fn seo_template(language: Language) -> Value {
    json!({
        "analysis_language": language.code(),
        "core_seo": {
            "title_critique": "[Critique of the current title]",
            "suggested_title": "[Suggested title]",
            "title_reasoning": "[Reasoning for the suggested title]",
            "description_critique": "[Critique of the current meta description]",
            "suggested_description": "[Suggested meta description]",
            "description_reasoning": "[Reasoning for the suggested description]",
            "h1_analysis": "[Analysis of the H1 heading]",
            "suggested_h1": "[Suggested H1 if an improvement is needed, otherwise null]"
        },
        "content_keywords": {
            "main_topic": "[Main topic]",
            "suggested_keywords": ["[keyword 1]", "[keyword 2]", "[...]", "[keyword 7]"],
            "blog_post_ideas": ["[Blog post title 1]", "[Blog post title 2]"]
        },
        "on_page_technical": {
            "image_seo_tip": "[Image SEO recommendation]",
            "schema_recommendation": {
                "suggested_type": "[Schema.org type, e.g. Product]",
                "required_properties": ["[property 1]", "[property 2]", "[property 3]"],
                "current_schema_evaluation": "[Evaluation of the detected schema, otherwise null]"
            },
            "technical_tips": ["[Technical tip 1]", "[Technical tip 2]"]
        }
    })
}

fn social_prompt(
    platform: Platform,
    topic: &str,
    keywords: Option<&str>,
    language: Language,
) -> String {
    let lang = language.display_name();
    let platform_name = platform.as_str().to_uppercase();

    let mut prompt = format!(
        "Act as a creative social media marketing expert specializing in {platform_name}.\n\
         Generate content ideas in {lang} for **{platform_name}** based on the following:\n\
         - Main Topic/Product: '{topic}'\n"
    );
    if let Some(keywords) = keywords.map(str::trim).filter(|k| !k.is_empty()) {
        prompt.push_str(&format!("- Keywords: {}\n", keywords));
    }

    prompt.push_str("\n**Content Requirements:**\n");
    prompt.push_str(platform_requirements(platform));
    prompt.push_str(&format!(
        "\n**Output Format:**\n\
         Respond only with a single valid JSON object that follows this structure exactly. \
         Every natural-language string value must be written in {lang}.\n\n\
         ```json\n{:#}\n```\n\n{}",
        social_template(platform, language),
        END_OF_INSTRUCTIONS,
    ));
    prompt
}

fn platform_requirements(platform: Platform) -> &'static str {
    match platform {
        Platform::Youtube => {
            "- Generate 2 distinct YouTube video concepts. For each concept provide:\n\
             \x20 - an engaging title of at most 70 characters\n\
             \x20 - a hook for the first 5 to 10 seconds\n\
             \x20 - an outline of 3 to 4 bullet points covering the key segments\n\
             \x20 - a specific call to action\n\
             \x20 - a thumbnail concept describing the visual idea\n\
             - Suggest 5 relevant YouTube tags.\n\
             - Explain why one of the concepts is particularly suited for YouTube engagement.\n"
        }
        Platform::Instagram => {
            "- Generate 2 distinct Instagram post or Reel ideas. For each idea provide:\n\
             \x20 - a hook-focused caption idea of under 30 words\n\
             \x20 - a visual concept (image type, Reel style or trending audio)\n\
             \x20 - a specific call to action\n\
             - Suggest one set of 7 relevant hashtags mixing broad and niche ones.\n\
             - Provide 1 Instagram Story idea (poll, Q&A or behind the scenes) related to the topic.\n\
             - Briefly explain which common engagement tactic one of the ideas uses.\n"
        }
        Platform::Pinterest => {
            "- Generate 2 distinct Pin concepts. For each concept provide:\n\
             \x20 - a keyword-rich, SEO-optimized Pin title\n\
             \x20 - a Pin description of 1 to 3 sentences including keywords and a call to action\n\
             \x20 - a description of what the Pin image or video should show\n\
             - Suggest 3 relevant Pinterest board names.\n\
             - Explain why one of the Pin concepts is visually appealing on Pinterest.\n"
        }
    }
}

fn social_template(platform: Platform, language: Language) -> Value {
    match platform {
        Platform::Youtube => json!({
            "platform": "youtube",
            "language": language.code(),
            "concepts": [
                {
                    "title": "[Title 1]",
                    "hook": "[Hook 1]",
                    "outline": ["[Point 1.1]", "[Point 1.2]", "[Point 1.3]"],
                    "call_to_action": "[Call to action 1]",
                    "thumbnail_concept": "[Thumbnail concept 1]"
                },
                {
                    "title": "[Title 2]",
                    "hook": "[Hook 2]",
                    "outline": ["[Point 2.1]", "[Point 2.2]", "[Point 2.3]", "[Point 2.4]"],
                    "call_to_action": "[Call to action 2]",
                    "thumbnail_concept": "[Thumbnail concept 2]"
                }
            ],
            "suggested_tags": ["tag1", "tag2", "tag3", "tag4", "tag5"],
            "justification": "[Why one concept suits YouTube engagement]"
        }),
        Platform::Instagram => json!({
            "platform": "instagram",
            "language": language.code(),
            "post_ideas": [
                {
                    "caption_idea": "[Caption 1]",
                    "visual_concept": "[Visual or audio concept 1]",
                    "call_to_action": "[Call to action 1]"
                },
                {
                    "caption_idea": "[Caption 2]",
                    "visual_concept": "[Visual or audio concept 2]",
                    "call_to_action": "[Call to action 2]"
                }
            ],
            "suggested_hashtags": [
                "#hashtag1", "#hashtag2", "#hashtag3", "#hashtag4",
                "#hashtag5", "#hashtag6", "#hashtag7"
            ],
            "story_idea": "[Story idea]",
            "engagement_tactic_explanation": "[Engagement tactic explanation]"
        }),
        Platform::Pinterest => json!({
            "platform": "pinterest",
            "language": language.code(),
            "pin_concepts": [
                {
                    "title": "[Pin title 1]",
                    "description": "[Pin description 1]",
                    "visual_description": "[Visual description 1]"
                },
                {
                    "title": "[Pin title 2]",
                    "description": "[Pin description 2]",
                    "visual_description": "[Visual description 2]"
                }
            ],
            "suggested_boards": ["Board 1", "Board 2", "Board 3"],
            "visual_appeal_explanation": "[Visual appeal explanation]"
        }),
    }
}
