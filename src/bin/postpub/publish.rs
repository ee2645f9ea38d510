use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};

use postpub::config::Config;
use postpub::error::PublishError;
use postpub::git_sync::GitSync;
use postpub::post::PostRecord;
use postpub::prompt::Prompter;
use postpub::publisher::Publisher;
use postpub::text_utils::today;

use crate::{PreviewArgs, PublishArgs};

const RULE: &str = "==================================================";

fn check_exists(file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("File '{}' does not exist", file.display());
    }
    Ok(())
}

const HEADER_HELP: &str = "The file must start with a front matter block between two --- lines \
                           and set at least title and summary";

fn explain(err: PublishError) -> anyhow::Error {
    if err.is_validation() {
        anyhow::anyhow!("{}\n{}", err, HEADER_HELP)
    } else {
        err.into()
    }
}

pub fn render_summary(post: &PostRecord) -> String {
    format!("{}\nPost published\nid: {}\ntitle: {}\ndate: {}\ntags: {}\n{}",
            RULE, post.id, post.title, post.date, post.tags.join(", "), RULE)
}

/// `--push` and `--no-push` decide; otherwise the user is asked
fn should_push<R: io::BufRead, W: Write>(args: &PublishArgs, prompter: &mut Prompter<R, W>) -> io::Result<bool> {
    if args.no_push {
        return Ok(false);
    }
    if args.push {
        return Ok(true);
    }
    prompter.confirm("Push the update to the remote repository?")
}

pub fn publish_cmd(config: &Config, args: &PublishArgs) -> Result<()> {
    check_exists(&args.file)?;
    println!("Processing {}", args.file.display());

    let publisher = Publisher::new(config);
    let published = publisher.publish_file(&args.file, &today()).map_err(explain)?;
    let post = &published.post;

    println!("Post saved: {}", published.stored.post_path.display());
    println!("Index updated: {}", published.stored.index_path.display());
    println!("{}", render_summary(post));

    let sync = GitSync::from_config(&config.git);
    let files = [published.stored.post_path.as_path(), published.stored.index_path.as_path()];

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let push = config.git.enabled && should_push(args, &mut prompter)?;

    let mut out = io::stdout();
    if push {
        sync.sync_and_report(&files, &post.title, config.git.site_url.as_deref(), &mut out)?;
    } else {
        writeln!(out, "Local files updated. To publish later, run:")?;
        write!(out, "{}", sync.manual_instructions(&files, &post.title))?;
    }

    // The post is written: the outcome of the sync does not change the exit code
    Ok(())
}

pub fn preview_cmd(config: &Config, args: &PreviewArgs) -> Result<()> {
    check_exists(&args.file)?;
    let raw = fs::read_to_string(&args.file)?;

    let publisher = Publisher::new(config);
    let post = publisher.prepare_document(&raw, &today()).map_err(explain)?;

    println!("{}", serde_json::to_string_pretty(&post)?);
    println!("Would be written to {}", publisher.store().post_path(&post).display());
    Ok(())
}
