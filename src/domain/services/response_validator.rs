// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use tracing::warn;

use crate::utils::errors::SeoError;
use crate::utils::text_processing::truncate_chars;

/// 诊断用原始文本片段的最大字符数
pub const RAW_SNIPPET_CHARS: usize = 500;

/// 校验模型输出
///
/// - 不是合法 JSON：`ResponseParse`，附带最多 500 字符的原始片段
/// - 合法 JSON 但不是对象（`null`、数字、字符串、数组）：同样是 `ResponseParse`
/// - JSON 对象带 `error` 字段：`ModelReported`
/// - 其他情况：返回解析后的对象
pub fn validate_response(raw: &str) -> Result<Value, SeoError> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            let raw_snippet = truncate_chars(raw, RAW_SNIPPET_CHARS).to_string();
            warn!(
                "Failed to decode JSON response from model: {} (raw snippet: {})",
                e, raw_snippet
            );
            return Err(SeoError::ResponseParse { raw_snippet });
        }
    };

    let Value::Object(fields) = &parsed else {
        let raw_snippet = truncate_chars(raw, RAW_SNIPPET_CHARS).to_string();
        warn!(
            "Model response is JSON but not an object (raw snippet: {})",
            raw_snippet
        );
        return Err(SeoError::ResponseParse { raw_snippet });
    };

    if let Some(reported) = fields.get("error") {
        let message = match reported {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        warn!("Model reported an error in its JSON response: {}", message);
        return Err(SeoError::ModelReported(message));
    }

    Ok(parsed)
}
