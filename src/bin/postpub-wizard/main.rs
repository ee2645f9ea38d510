use std::io;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spdlog::{debug, info, warn};

use postpub::config::{open_config, Config};
use postpub::git_sync::GitSync;
use postpub::logger::configure_logger;
use postpub::prompt::Prompter;
use postpub::publisher::Publisher;
use postpub::stats::IndexStats;
use postpub::text_utils::today;

use crate::create::create_post;
use crate::edit::edit_post;

mod create;
mod edit;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive post publishing", long_about = None)]
struct Args {
    /// Config path. Defaults to postpub.toml next to the executable, in the current dir or in the user config dir
    #[arg(short, long)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuItem {
    Create,
    Edit,
    Stats,
    Quit,
}

impl MenuItem {
    fn from_choice(n: usize) -> Option<Self> {
        match n {
            1 => Some(MenuItem::Create),
            2 => Some(MenuItem::Edit),
            3 => Some(MenuItem::Stats),
            4 => Some(MenuItem::Quit),
            _ => None,
        }
    }
}

fn show_menu<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> io::Result<()> {
    p.say("")?;
    p.say("==============================")?;
    p.say("  postpub")?;
    p.say("==============================")?;
    p.say("1. Publish a new post")?;
    p.say("2. Edit an existing post")?;
    p.say("3. Show statistics")?;
    p.say("4. Quit")
}

fn publish_new<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &Config) -> Result<()> {
    let publisher = Publisher::new(config);
    let Some((post, stored)) = create_post(p, &publisher, &today())? else {
        return Ok(());
    };

    if !config.git.enabled {
        return Ok(());
    }

    let sync = GitSync::from_config(&config.git);
    let files = [stored.post_path.as_path(), stored.index_path.as_path()];
    if p.confirm("Push the update to the remote repository?")? {
        let mut out = io::stdout();
        sync.sync_and_report(&files, &post.title, config.git.site_url.as_deref(), &mut out)?;
    } else {
        p.say("Local files updated. To publish later, run:")?;
        p.say(sync.manual_instructions(&files, &post.title).trim_end())?;
    }
    Ok(())
}

fn show_stats<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &Config) -> io::Result<()> {
    let publisher = Publisher::new(config);
    let entries = publisher.store().load_index();
    p.say(IndexStats::from_entries(&entries).to_string().trim_end())
}

/// Runs one menu action. Returns false when the user wants to leave.
fn run_item<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &Config, item: MenuItem) -> Result<bool> {
    match item {
        MenuItem::Create => publish_new(p, config)?,
        MenuItem::Edit => edit_post(p, Publisher::new(config).store())?,
        MenuItem::Stats => show_stats(p, config)?,
        MenuItem::Quit => return Ok(false),
    }
    Ok(true)
}

fn run<R: BufRead, W: Write>(p: &mut Prompter<R, W>, config: &Config) -> Result<()> {
    loop {
        show_menu(p)?;
        let answer = match p.read_line("Choice (1-4): ") {
            Ok(answer) => answer,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };

        let Some(item) = postpub::prompt::parse_choice(&answer, 4).and_then(MenuItem::from_choice) else {
            p.say("Invalid choice, try again")?;
            continue;
        };

        match run_item(p, config, item) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => match e.downcast_ref::<io::Error>() {
                Some(io_err) if io_err.kind() == io::ErrorKind::UnexpectedEof => break,
                _ => {
                    warn!("Action failed: {:#}", e);
                    p.say(&format!("Error: {:#}", e))?;
                }
            },
        }

        if p.read_line("Press Enter to return to the menu...").is_err() {
            break;
        }
    }

    p.say("Bye!")?;
    Ok(())
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let (config, used_path) = open_config(config_path)
        .context("Could not load the configuration. Please run postpub-wizard --help")?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match used_path {
        Some(path) => debug!("Configuration read from {}", path.display()),
        None => debug!("No configuration found, using defaults"),
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config_path)?;
    info!("Posts directory: {}", config.paths.posts_dir.display());

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    run(&mut prompter, &config)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), vec![])
    }

    fn config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.posts_dir = dir.path().join("posts");
        config.paths.index_file = dir.path().join("posts_index.json");
        config.git.enabled = false;
        config
    }

    #[test]
    fn test_menu_item() {
        assert_eq!(MenuItem::from_choice(1), Some(MenuItem::Create));
        assert_eq!(MenuItem::from_choice(4), Some(MenuItem::Quit));
        assert_eq!(MenuItem::from_choice(5), None);
    }

    #[test]
    fn test_quit() {
        let dir = TempDir::new().unwrap();
        let mut p = prompter("4\n");
        run(&mut p, &config(&dir)).unwrap();
        assert!(String::from_utf8(p.into_output()).unwrap().ends_with("Bye!\n"));
    }

    #[test]
    fn test_closed_input_leaves_menu() {
        let dir = TempDir::new().unwrap();
        let mut p = prompter("9\n");
        run(&mut p, &config(&dir)).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Invalid choice"));
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_publish_then_stats() {
        let dir = TempDir::new().unwrap();
        let input = "1\nMenu post\n\n\n1\nsum\nrust\nhello\nEND\n1\ny\n\n3\n\n4\n";
        let mut p = prompter(input);
        run(&mut p, &config(&dir)).unwrap();

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Posts: 1"));
        assert!(out.contains("  rust: 1"));
        assert!(dir.path().join("posts_index.json").exists());
    }
}
