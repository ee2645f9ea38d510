use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::PublishError;

const DELIMITER: &str = "---";

/// Header of a post, written between two `---` lines
/// ---
/// title: 我的新文章
/// date: 2024年5月22日
/// readTime: 3分钟阅读
/// mood: 开心
/// tags: [生活, 随笔]
/// summary: 这是一篇文章的简要摘要。
/// ---
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: HashMap<String, String>,
    tags: Option<Vec<String>>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_str())
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    pub fn require(&self, key: &str) -> Result<&str, PublishError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(PublishError::MissingField(key.to_string())),
        }
    }

    fn insert(&mut self, key: &str, value: &str) {
        if key == "tags" {
            self.tags = Some(extract_tags(value));
        } else {
            self.fields.insert(key.to_string(), value.to_string());
        }
    }
}

/// Splits a document into its header and the trimmed body
pub fn parse_front_matter(content: &str) -> Result<(FrontMatter, String), PublishError> {
    let mut lines = content.lines();

    // Empty lines before the header are ok
    let first = lines.by_ref().map(|l| l.trim()).find(|l| !l.is_empty());
    if first != Some(DELIMITER) {
        return Err(PublishError::Format(
            "the document must start with a front matter block opened by ---".to_string()));
    }

    let mut front_matter = FrontMatter::default();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim() == DELIMITER {
            closed = true;
            break;
        }

        if let Some((key, val)) = extract_key_val(line) {
            front_matter.insert(key, val);
        }
    }

    if !closed {
        return Err(PublishError::Format(
            "end of the front matter block (---) is missing".to_string()));
    }

    let body = lines.collect::<Vec<&str>>().join("\n");

    Ok((front_matter, body.trim().to_string()))
}

fn extract_key_val(line: &str) -> Option<(&str, &str)> {
    lazy_static! {
        static ref KEY_VAL_REGEX: Regex = Regex::new(r"^(?P<key>[^:]*):(?P<value>.*)$").unwrap();
    }

    KEY_VAL_REGEX.captures(line).and_then(|cap| {
        let key = cap.name("key").map(|key| key.as_str().trim());
        let val = cap.name("value").map(|val| val.as_str().trim());
        match (key, val) {
            (Some(key), Some(val)) => Some((key, val)),
            _ => None
        }
    })
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(|tag| tag.trim().trim_matches(|c: char| c == '\'' || c == '"' || c == ' '))
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}
