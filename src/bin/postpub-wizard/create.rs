use std::fmt::Write as _;
use std::io;
use std::io::{BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;

use postpub::body_encoding::BodyEncoding;
use postpub::config::Defaults;
use postpub::post::PostRecord;
use postpub::prompt::{Prompter, BODY_END_MARK};
use postpub::publisher::{PostDraft, Publisher};
use postpub::post_store::StoredPost;
use postpub::text_utils::{ellipsize, format_display_date};

const DEFAULT_IMAGE_ALT: &str = "文章配图";
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageInsert {
    pub url: String,
    pub alt: String,
}

impl ImageInsert {
    pub fn to_html(&self) -> String {
        format!("\n<img src=\"{}\" alt=\"{}\" style=\"max-width:100%;border-radius:8px;margin:1rem 0;\">\n",
                self.url, self.alt)
    }
}

/// Inserts `html` before the 1-based `line`. Without a valid line it goes to the end.
pub fn insert_image(body: &str, html: &str, line: Option<usize>) -> String {
    let mut lines: Vec<&str> = body.split('\n').collect();
    match line {
        Some(n) if n >= 1 && n <= lines.len() + 1 => {
            lines.insert(n - 1, html);
            lines.join("\n")
        }
        _ => format!("{}{}", body, html),
    }
}

fn ask_image<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<Option<ImageInsert>> {
    p.say("Add an image?")?;
    p.say("  1. No image")?;
    p.say("  2. Image from a URL")?;
    p.say("  3. I will add it later by editing the post")?;

    if p.choose("Choice (1/2/3, default 1): ", 3)? != Some(2) {
        return Ok(None);
    }

    let url = p.ask("Image URL", "", false)?;
    if url.is_empty() {
        return Ok(None);
    }
    let alt = p.ask("Image description", DEFAULT_IMAGE_ALT, false)?;

    Ok(Some(ImageInsert { url, alt }))
}

/// Asks every field of a post. Errors with `UnexpectedEof` when the input is closed.
pub fn collect_draft<R: BufRead, W: Write>(p: &mut Prompter<R, W>, defaults: &Defaults, today: &NaiveDate) -> io::Result<PostDraft> {
    let title = p.ask("Title", "", true)?;
    let date = p.ask("Date", &format_display_date(today, &defaults.date_format), true)?;
    let read_time = p.ask("Read time", &defaults.read_time, true)?;
    p.say("Mood:")?;
    let mood = p.choose_mood(&defaults.moods, &defaults.mood)?;
    let summary = p.ask("Summary", "", true)?;
    let tags = p.ask_tags(&defaults.tags, defaults.max_tags)?;

    p.say(&format!("Write the post. Finish with a line containing only {}", BODY_END_MARK))?;
    let mut body = p.read_body()?;

    if let Some(image) = ask_image(p)? {
        let line = p.read_line("Insert the image before line (empty for the end): ")?;
        body = insert_image(&body, &image.to_html(), line.trim().parse().ok());
    }

    Ok(PostDraft {
        title,
        date: Some(date),
        read_time: Some(read_time),
        mood: Some(mood),
        tags: Some(tags),
        summary,
        body,
    })
}

pub fn render_preview(post: &PostRecord, raw_body: &str, post_path: &Path) -> String {
    let mut buf = String::new();
    let _ = writeln!(&mut buf, "title: {}", post.title);
    let _ = writeln!(&mut buf, "date: {}", post.date);
    let _ = writeln!(&mut buf, "tags: {}", post.tags.join(", "));
    let _ = writeln!(&mut buf, "summary: {}", post.summary);
    let _ = writeln!(&mut buf, "body: {}", ellipsize(raw_body, PREVIEW_CHARS, PREVIEW_CHARS));
    let _ = writeln!(&mut buf, "file: {}", post_path.display());
    buf
}

/// Interactive publish. None when the user does not confirm.
pub fn create_post<R: BufRead, W: Write>(p: &mut Prompter<R, W>, publisher: &Publisher, today: &NaiveDate) -> anyhow::Result<Option<(PostRecord, StoredPost)>> {
    let draft = collect_draft(p, publisher.defaults(), today)?;
    let raw_body = draft.body.clone();
    let post = publisher.prepare_draft(draft, BodyEncoding::PlainTextWithBreaks, today)?;

    p.say(&render_preview(&post, &raw_body, &publisher.store().post_path(&post)))?;
    if !p.confirm("Publish this post?")? {
        p.say("Cancelled")?;
        return Ok(None);
    }

    let stored = publisher.store().publish(&post)?;
    p.say(&format!("Post saved: {}", stored.post_path.display()))?;
    p.say(&format!("Index updated: {}", stored.index_path.display()))?;

    Ok(Some((post, stored)))
}
