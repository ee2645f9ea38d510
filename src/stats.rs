use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::post::IndexEntry;

const TOP_TAGS: usize = 10;

pub struct IndexStats<'a> {
    pub post_count: usize,
    /// Most used tags first. Ties keep the order in which tags first appear in the index.
    pub top_tags: Vec<(&'a str, usize)>,
    pub latest: Option<&'a IndexEntry>,
}

impl<'a> IndexStats<'a> {
    pub fn from_entries(entries: &'a [IndexEntry]) -> Self {
        let mut tag_map: HashMap<&str, (usize, usize)> = HashMap::new();
        for tag in entries.iter().flat_map(|e| e.tags.iter()) {
            let next_pos = tag_map.len();
            let (count, _) = tag_map.entry(tag.as_str()).or_insert((0, next_pos));
            *count += 1;
        }

        let mut tag_list: Vec<(&str, (usize, usize))> = tag_map.into_iter().collect();
        tag_list.sort_by(|(_, (ca, pa)), (_, (cb, pb))| cb.cmp(ca).then(pa.cmp(pb)));

        let top_tags = tag_list.into_iter()
            .take(TOP_TAGS)
            .map(|(tag, (count, _))| (tag, count))
            .collect();

        IndexStats {
            post_count: entries.len(),
            top_tags,
            latest: entries.first(),
        }
    }
}

impl Display for IndexStats<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Posts: {}", self.post_count)?;

        if !self.top_tags.is_empty() {
            writeln!(f, "Tags:")?;
            for (tag, count) in self.top_tags.iter() {
                writeln!(f, "  {}: {}", tag, count)?;
            }
        }

        if let Some(latest) = self.latest {
            writeln!(f, "Latest: {}", latest.title)?;
            writeln!(f, "  date: {}", latest.date)?;
            writeln!(f, "  tags: {}", latest.tags.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, tags: &[&str]) -> IndexEntry {
        IndexEntry {
            title: title.to_string(),
            date: "2024年5月22日".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_stats() {
        let entries = vec![
            entry("newest", &["rust", "生活"]),
            entry("middle", &["生活"]),
            entry("oldest", &["随笔", "生活", "rust"]),
        ];
        let stats = IndexStats::from_entries(&entries);
        assert_eq!(stats.post_count, 3);
        assert_eq!(stats.top_tags, vec![("生活", 3), ("rust", 2), ("随笔", 1)]);
        assert_eq!(stats.latest.unwrap().title, "newest");

        let text = stats.to_string();
        assert_eq!(text, "Posts: 3\nTags:\n  生活: 3\n  rust: 2\n  随笔: 1\nLatest: newest\n  date: 2024年5月22日\n  tags: rust, 生活\n");
    }

    #[test]
    fn test_top_tags_are_capped() {
        let tags: Vec<String> = (0..15).map(|i| format!("t{}", i)).collect();
        let tag_refs: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        let entries = vec![entry("a", &tag_refs)];
        let stats = IndexStats::from_entries(&entries);
        assert_eq!(stats.top_tags.len(), 10);
        assert_eq!(stats.top_tags[0], ("t0", 1));
    }

    #[test]
    fn test_empty_index() {
        let stats = IndexStats::from_entries(&[]);
        assert_eq!(stats.post_count, 0);
        assert!(stats.latest.is_none());
        assert_eq!(stats.to_string(), "Posts: 0\n");
    }
}
