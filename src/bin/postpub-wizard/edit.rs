use std::io;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use postpub::post_store::PostStore;
use postpub::prompt::Prompter;
use postpub::text_utils::ellipsize;
use postpub::util::os_helper::open_in_editor;

const TITLE_MAX: usize = 30;
const TITLE_KEEP: usize = 27;

/// Menu label of each post file: its title, or a note when it cannot be read
pub fn post_labels(store: &PostStore) -> io::Result<Vec<(PathBuf, String)>> {
    let labels = store.list_posts()?
        .into_iter()
        .map(|path| {
            let file_name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
            let label = match store.read_post(&path) {
                Ok(post) => format!("{} ({})", ellipsize(&post.title, TITLE_MAX, TITLE_KEEP), file_name),
                Err(_) => format!("{} (unreadable)", file_name),
            };
            (path, label)
        })
        .collect();
    Ok(labels)
}

/// Picks a post file. None when there is nothing to edit or the user cancels.
pub fn choose_post<R: BufRead, W: Write>(p: &mut Prompter<R, W>, store: &PostStore) -> io::Result<Option<PathBuf>> {
    let labels = post_labels(store)?;
    if labels.is_empty() {
        p.say("No posts found")?;
        return Ok(None);
    }

    for (i, (_, label)) in labels.iter().enumerate() {
        p.say(&format!("{}. {}", i + 1, label))?;
    }

    let question = format!("Post to edit (1-{}, 0 to cancel): ", labels.len());
    let answer = p.read_line(&question)?;
    if answer.trim() == "0" {
        return Ok(None);
    }

    match postpub::prompt::parse_choice(&answer, labels.len()) {
        Some(n) => Ok(Some(labels[n - 1].0.clone())),
        None => {
            p.say("Invalid choice")?;
            Ok(None)
        }
    }
}

pub fn edit_post<R: BufRead, W: Write>(p: &mut Prompter<R, W>, store: &PostStore) -> io::Result<()> {
    let Some(path) = choose_post(p, store)? else {
        return Ok(());
    };

    p.say(&format!("Editing {}", path.display()))?;
    match open_in_editor(&path) {
        Ok(()) => p.say("Opened with the default editor"),
        Err(e) => p.say(&format!("Could not open the file: {}\nFile location: {}", e, path.display())),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Cursor;

    use tempfile::TempDir;

    use postpub::post::PostRecord;
    use postpub::post_id::PostId;
    use postpub::post_store::StoreConfig;

    use super::*;

    fn store_with_posts(dir: &TempDir) -> PostStore {
        let store = PostStore::new(StoreConfig {
            posts_dir: dir.path().join("posts"),
            index_file: dir.path().join("posts_index.json"),
        });
        for (id, title) in [("2024-05-21-a", "short"), ("2024-05-22-b", "a very long title that needs to be cut")] {
            store.save(&PostRecord {
                id: PostId(id.to_string()),
                title: title.to_string(),
                date: "d".to_string(),
                read_time: "r".to_string(),
                mood: "m".to_string(),
                tags: vec![],
                summary: "s".to_string(),
                body: "b".to_string(),
            }).unwrap();
        }
        fs::write(dir.path().join("posts").join("2024-05-23-broken.json"), "{").unwrap();
        store
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), vec![])
    }

    #[test]
    fn test_post_labels() {
        let dir = TempDir::new().unwrap();
        let labels: Vec<String> = post_labels(&store_with_posts(&dir)).unwrap()
            .into_iter()
            .map(|(_, label)| label)
            .collect();
        assert_eq!(labels, [
            "short (2024-05-21-a.json)",
            "a very long title that need... (2024-05-22-b.json)",
            "2024-05-23-broken.json (unreadable)",
        ]);
    }

    #[test]
    fn test_choose_post() {
        let dir = TempDir::new().unwrap();
        let store = store_with_posts(&dir);

        let chosen = choose_post(&mut prompter("2\n"), &store).unwrap();
        assert_eq!(chosen, Some(dir.path().join("posts").join("2024-05-22-b.json")));
        assert_eq!(choose_post(&mut prompter("0\n"), &store).unwrap(), None);
        assert_eq!(choose_post(&mut prompter("7\n"), &store).unwrap(), None);
    }

    #[test]
    fn test_choose_post_without_posts() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(StoreConfig {
            posts_dir: dir.path().join("posts"),
            index_file: dir.path().join("posts_index.json"),
        });
        let mut p = prompter("");
        assert_eq!(choose_post(&mut p, &store).unwrap(), None);
        assert!(String::from_utf8(p.into_output()).unwrap().contains("No posts found"));
    }
}
