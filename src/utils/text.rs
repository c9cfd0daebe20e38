// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// 正文中不允许出现的元素，连同内容一起移除
const FORBIDDEN_ELEMENTS: [&str; 6] = ["script", "style", "iframe", "object", "embed", "form"];

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

static COMMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

static FORBIDDEN_BLOCK_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    FORBIDDEN_ELEMENTS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("valid forbidden block regex")
        })
        .collect()
});

// Unclosed or self-closing leftovers of the forbidden elements
static FORBIDDEN_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?is)</?(?:{})\b[^>]*>",
        FORBIDDEN_ELEMENTS.join("|")
    ))
    .expect("valid forbidden tag regex")
});

static EVENT_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("valid event attribute regex")
});

static SCRIPT_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:java|vb)script\s*:").expect("valid script url regex"));

/// 生成 URL 友好的 slug
///
/// 去掉标签和实体，转写为 ASCII，小写，空白与分隔符折叠为单个 `-`，
/// 其余标点直接丢弃。
pub fn slugify(input: &str) -> String {
    let stripped = TAG_REGEX.replace_all(input, "");
    let decoded = html_escape::decode_html_entities(&stripped);
    let ascii = deunicode::deunicode(&decoded).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c == '-' || c == '.' || c == '/' || c.is_whitespace() {
            pending_dash = true;
        }
    }

    slug
}

/// HTML 转义，不会重复转义已有实体
pub fn escape_html(input: &str) -> String {
    let decoded = html_escape::decode_html_entities(input);
    html_escape::encode_safe(&decoded).into_owned()
}

/// 转义用于 `href` 属性的 URL
///
/// 只保留 http/https 地址，其他协议或无法解析的地址返回空字符串。
pub fn escape_url(input: &str) -> String {
    match Url::parse(input.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            html_escape::encode_double_quoted_attribute(url.as_str()).into_owned()
        }
        _ => String::new(),
    }
}

/// 净化文章 HTML
///
/// 移除脚本类元素与注释、事件处理属性以及脚本协议地址，其余标记原样保留。
/// 属性清理只作用于标签内部，正文文本不会被改写。
pub fn sanitize_html(input: &str) -> String {
    let mut cleaned = COMMENT_REGEX.replace_all(input, "").into_owned();

    for regex in FORBIDDEN_BLOCK_REGEXES.iter() {
        cleaned = regex.replace_all(&cleaned, "").into_owned();
    }

    cleaned = FORBIDDEN_TAG_REGEX.replace_all(&cleaned, "").into_owned();
    TAG_REGEX
        .replace_all(&cleaned, |caps: &regex::Captures<'_>| clean_tag(&caps[0]))
        .into_owned()
}

/// 清理单个标签的事件处理属性与脚本协议
fn clean_tag(tag: &str) -> String {
    let without_handlers = EVENT_ATTR_REGEX.replace_all(tag, "");
    SCRIPT_URL_REGEX.replace_all(&without_handlers, "").into_owned()
}
