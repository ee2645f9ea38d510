use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::post_id::PostId;

/// A published post, as stored in `<posts_dir>/<id>.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    pub title: String,
    pub date: String,
    #[serde(rename = "readTime")]
    pub read_time: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub body: String,
}

/// Summary of a post kept in the index. Same shape as `PostRecord` without the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IndexEntry {
    pub id: PostId,
    pub title: String,
    pub date: String,
    #[serde(rename = "readTime")]
    pub read_time: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub summary: String,
}

impl From<&PostRecord> for IndexEntry {
    fn from(post: &PostRecord) -> Self {
        IndexEntry {
            id: post.id.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
            read_time: post.read_time.clone(),
            mood: post.mood.clone(),
            tags: post.tags.clone(),
            summary: post.summary.clone(),
        }
    }
}

impl Display for PostRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "id={}, title={}, date={}, readTime={}, mood={}, tags=[{}]\nsummary={}\nbody:\n{}",
               self.id,
               self.title,
               self.date,
               self.read_time,
               self.mood,
               self.tags.join(", "),
               self.summary,
               self.body
        )
    }
}
