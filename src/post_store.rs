use std::ffi::OsString;
use std::fs;
use std::io;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use spdlog::{debug, info, warn};

use crate::config::Paths;
use crate::post::{IndexEntry, PostRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub posts_dir: PathBuf,
    pub index_file: PathBuf,
}

impl From<&Paths> for StoreConfig {
    fn from(paths: &Paths) -> Self {
        StoreConfig {
            posts_dir: paths.posts_dir.clone(),
            index_file: paths.index_file.clone(),
        }
    }
}

/// Files written by a publish
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPost {
    pub post_path: PathBuf,
    pub index_path: PathBuf,
}

/// Owns the posts directory and the index file. Assumes a single writer.
pub struct PostStore {
    config: StoreConfig,
}

impl PostStore {
    pub fn new(config: StoreConfig) -> Self {
        PostStore { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn post_path(&self, post: &PostRecord) -> PathBuf {
        self.config.posts_dir.join(post.id.file_name())
    }

    /// Writes `<posts_dir>/<id>.json`, replacing any file with the same id
    pub fn save(&self, post: &PostRecord) -> io::Result<PathBuf> {
        let post_path = self.prepare_post_path(post)?;
        write_json(&post_path, post)?;
        info!("Post saved: {}", post_path.display());
        Ok(post_path)
    }

    /// Index entries as stored. Missing or unreadable index means an empty one.
    /// Only a file that is not a JSON array is discarded; entries are kept untouched.
    pub fn load_index_values(&self) -> Vec<Value> {
        let index_file = &self.config.index_file;
        let content = match fs::read_to_string(index_file) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return vec![],
            Err(e) => {
                warn!("Could not read index {}, starting a new one: {}", index_file.display(), e);
                return vec![];
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!("Index {} is not a JSON array and will be recreated", index_file.display());
                vec![]
            }
            Err(e) => {
                warn!("Index {} is not valid JSON and will be recreated: {}", index_file.display(), e);
                vec![]
            }
        }
    }

    /// Typed view of the index. Entries that do not fit `IndexEntry` are skipped.
    pub fn load_index(&self) -> Vec<IndexEntry> {
        self.load_index_values()
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<IndexEntry>(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping index entry: {}", e);
                    None
                }
            })
            .collect()
    }

    fn index_with(&self, post: &PostRecord) -> io::Result<Vec<Value>> {
        let mut entries = self.load_index_values();
        entries.insert(0, serde_json::to_value(IndexEntry::from(post))?);
        Ok(entries)
    }

    /// Puts the post summary at the top of the index and rewrites the whole file
    pub fn append_to_index(&self, post: &PostRecord) -> io::Result<()> {
        let entries = self.index_with(post)?;
        create_parent_dir(&self.config.index_file)?;
        write_json(&self.config.index_file, &entries)?;
        info!("Index updated: {} ({} posts)", self.config.index_file.display(), entries.len());
        Ok(())
    }

    /// Writes the post file and the updated index together.
    ///
    /// Both files are staged as `.tmp` siblings first and only renamed into place
    /// once both were written, so a failure while writing leaves the previous
    /// post and index untouched.
    pub fn publish(&self, post: &PostRecord) -> io::Result<StoredPost> {
        let post_path = self.prepare_post_path(post)?;
        let index_path = self.config.index_file.clone();
        create_parent_dir(&index_path)?;

        let entries = self.index_with(post)?;

        let post_tmp = tmp_path(&post_path);
        let index_tmp = tmp_path(&index_path);

        let staged = write_json(&post_tmp, post)
            .and_then(|_| write_json(&index_tmp, &entries));
        if let Err(e) = staged {
            let _ = fs::remove_file(&post_tmp);
            let _ = fs::remove_file(&index_tmp);
            return Err(e);
        }

        fs::rename(&post_tmp, &post_path)?;
        fs::rename(&index_tmp, &index_path)?;

        info!("Post saved: {}", post_path.display());
        info!("Index updated: {} ({} posts)", index_path.display(), entries.len());

        Ok(StoredPost {
            post_path,
            index_path,
        })
    }

    /// Post files sorted by name, which is by date for generated ids
    pub fn list_posts(&self) -> io::Result<Vec<PathBuf>> {
        let posts_dir = &self.config.posts_dir;
        if !posts_dir.exists() {
            return Ok(vec![]);
        }

        let mut posts = vec![];
        for entry in fs::read_dir(posts_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                posts.push(path);
            }
        }
        posts.sort();

        Ok(posts)
    }

    pub fn read_post(&self, path: &Path) -> io::Result<PostRecord> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(io::Error::from)
    }

    fn prepare_post_path(&self, post: &PostRecord) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.config.posts_dir)?;
        let post_path = self.post_path(post);
        if post_path.exists() {
            warn!("Post {} already exists and will be overwritten", post_path.display());
        }
        Ok(post_path)
    }
}

fn create_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Pretty printed with two spaces; non ASCII characters are written as they are
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    debug!("Writing {}", path.display());
    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()
}
