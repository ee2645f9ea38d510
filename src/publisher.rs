use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use spdlog::info;

use crate::body_encoding::BodyEncoding;
use crate::config::{Config, Defaults};
use crate::error::PublishError;
use crate::front_matter::parse_front_matter;
use crate::post::PostRecord;
use crate::post_id::generate_post_id;
use crate::post_store::{PostStore, StoreConfig, StoredPost};
use crate::text_utils::format_display_date;

pub const REQUIRED_FIELDS: [&str; 2] = ["title", "summary"];

/// Fields collected by the interactive wizard. Empty optional fields get the defaults;
/// `tags: None` gets the default tags while `Some(vec![])` publishes without tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub date: Option<String>,
    pub read_time: Option<String>,
    pub mood: Option<String>,
    pub tags: Option<Vec<String>>,
    pub summary: String,
    pub body: String,
}

pub struct PublishedPost {
    pub post: PostRecord,
    pub stored: StoredPost,
}

pub struct Publisher {
    defaults: Defaults,
    store: PostStore,
}

impl Publisher {
    pub fn new(config: &Config) -> Self {
        Publisher {
            defaults: config.defaults.clone(),
            store: PostStore::new(StoreConfig::from(&config.paths)),
        }
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Builds the record for a markdown document without writing anything
    pub fn prepare_document(&self, raw: &str, today: &NaiveDate) -> Result<PostRecord, PublishError> {
        let (header, body) = parse_front_matter(raw)?;
        for field in REQUIRED_FIELDS {
            header.require(field)?;
        }

        let draft = PostDraft {
            title: header.require("title")?.to_string(),
            date: header.get("date").map(|s| s.to_string()),
            read_time: header.get("readTime").map(|s| s.to_string()),
            mood: header.get("mood").map(|s| s.to_string()),
            tags: None,
            summary: header.require("summary")?.to_string(),
            body,
        };

        let tags = match header.tags() {
            Some(tags) => tags.to_vec(),
            None => self.defaults.tags.clone(),
        };

        Ok(self.build_record(draft, tags, BodyEncoding::MarkdownRendered, today))
    }

    pub fn publish_document(&self, raw: &str, today: &NaiveDate) -> Result<PublishedPost, PublishError> {
        let post = self.prepare_document(raw, today)?;
        self.store_post(post)
    }

    pub fn publish_file(&self, path: &Path, today: &NaiveDate) -> Result<PublishedPost, PublishError> {
        info!("Reading {}", path.display());
        let raw = fs::read_to_string(path)?;
        self.publish_document(&raw, today)
    }

    pub fn prepare_draft(&self, draft: PostDraft, encoding: BodyEncoding, today: &NaiveDate) -> Result<PostRecord, PublishError> {
        if draft.title.trim().is_empty() {
            return Err(PublishError::MissingField("title".to_string()));
        }
        if draft.summary.trim().is_empty() {
            return Err(PublishError::MissingField("summary".to_string()));
        }

        let tags = draft.tags.clone().unwrap_or_else(|| self.defaults.tags.clone());

        Ok(self.build_record(draft, tags, encoding, today))
    }

    pub fn publish_draft(&self, draft: PostDraft, encoding: BodyEncoding, today: &NaiveDate) -> Result<PublishedPost, PublishError> {
        let post = self.prepare_draft(draft, encoding, today)?;
        self.store_post(post)
    }

    fn build_record(&self, draft: PostDraft, tags: Vec<String>, encoding: BodyEncoding, today: &NaiveDate) -> PostRecord {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let date = non_empty(draft.date)
            .unwrap_or_else(|| format_display_date(today, &self.defaults.date_format));
        let read_time = non_empty(draft.read_time).unwrap_or_else(|| self.defaults.read_time.clone());
        let mood = non_empty(draft.mood).unwrap_or_else(|| self.defaults.mood.clone());

        PostRecord {
            id: generate_post_id(&draft.title, today),
            title: draft.title,
            date,
            read_time,
            mood,
            tags,
            summary: draft.summary,
            body: encoding.encode(&draft.body),
        }
    }

    fn store_post(&self, post: PostRecord) -> Result<PublishedPost, PublishError> {
        let stored = self.store.publish(&post)?;
        info!("Published {} ({})", post.id, post.title);
        Ok(PublishedPost { post, stored })
    }
}
