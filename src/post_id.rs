use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_SLUG_LEN: usize = 50;

#[derive(Debug, Clone, Eq, Hash, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PostId(pub String);

impl PostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unicode aware slug: word characters of any script are kept, so
/// `我的 新文章` becomes `我的-新文章`. None when nothing usable is left
/// or the result is too long for a file name.
pub fn slugify(title: &str) -> Option<String> {
    lazy_static! {
        static ref UNSAFE_CHARS_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
        static ref SEPARATOR_REGEX: Regex = Regex::new(r"[-\s]+").unwrap();
    }

    let safe_title = UNSAFE_CHARS_REGEX.replace_all(title, "");
    let safe_title = safe_title.trim().to_lowercase();
    let slug = SEPARATOR_REGEX.replace_all(&safe_title, "-").into_owned();

    if slug.is_empty() || slug.chars().count() > MAX_SLUG_LEN {
        return None;
    }
    Some(slug)
}

fn random_slug() -> String {
    rand::rng().random_range(1000..=9999).to_string()
}

/// `<YYYY-MM-DD>-<slug>`, with a random four digit number replacing an unusable slug.
/// Existing ids are not checked.
pub fn generate_post_id(title: &str, date: &NaiveDate) -> PostId {
    let slug = slugify(title).unwrap_or_else(random_slug);
    PostId(format!("{}-{}", date.format("%Y-%m-%d"), slug))
}
