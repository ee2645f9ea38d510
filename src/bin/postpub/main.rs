use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use spdlog::{debug, warn};

use postpub::config::{open_config, Config};
use postpub::logger::configure_logger;

use crate::init::init_cmd;
use crate::publish::{preview_cmd, publish_cmd};
use crate::stats::stats_cmd;
use crate::template::template_cmd;

mod init;
mod publish;
mod stats;
mod template;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. Defaults to postpub.toml next to the executable, in the current dir or in the user config dir
    #[arg(short, long, global = true)]
    config_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish a markdown post
    Publish(PublishArgs),
    /// Show the record a markdown post would produce, without writing it
    Preview(PreviewArgs),
    /// Write a starter markdown post and open it
    Template(TemplateArgs),
    /// Show statistics of the post index
    Stats,
    /// Write a sample configuration
    Init(InitArgs),
}

#[derive(ClapArgs, Debug)]
struct PublishArgs {
    /// Markdown file with a front matter header
    file: PathBuf,

    /// Push to the remote repository without asking
    #[arg(short, long, conflicts_with = "no_push")]
    push: bool,

    /// Only update the local files
    #[arg(short, long)]
    no_push: bool,
}

#[derive(ClapArgs, Debug)]
struct PreviewArgs {
    /// Markdown file with a front matter header
    file: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct TemplateArgs {
    /// Where the template is written
    #[arg(short, long, default_value = "template.md")]
    path: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct InitArgs {
    /// Directory where postpub.toml will be written
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let (config, used_path) = open_config(config_path)
        .context("Could not load the configuration. Please run postpub --help")?;

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

    if let Command::Init(ref init_args) = args.command {
        return init_cmd(init_args);
    }

    let config = load_config(args.config_path)?;

    match args.command {
        Command::Publish(ref publish_args) => publish_cmd(&config, publish_args),
        Command::Preview(ref preview_args) => preview_cmd(&config, preview_args),
        Command::Template(ref template_args) => template_cmd(template_args),
        Command::Stats => stats_cmd(&config),
        Command::Init(_) => Ok(()),
    }
}
