use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

use crate::text_utils::is_valid_date_format;

pub const CFG_FILE_NAME: &str = "postpub.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub index_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            posts_dir: PathBuf::from("./posts"),
            index_file: PathBuf::from("./posts_index.json"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Defaults {
    /// chrono format used when the header has no `date`
    pub date_format: String,
    pub read_time: String,
    pub mood: String,
    pub tags: Vec<String>,
    /// Only enforced by the interactive wizard
    pub max_tags: usize,
    pub moods: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            date_format: "%Y年%-m月%-d日".to_string(),
            read_time: "3分钟阅读".to_string(),
            mood: "平静".to_string(),
            tags: vec!["随笔".to_string()],
            max_tags: 5,
            moods: ["开心", "平静", "思考", "兴奋", "怀念", "期待", "放松", "其他"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Git {
    pub enabled: bool,
    pub program: String,
    pub work_dir: Option<PathBuf>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    /// `{title}` is replaced by the post title
    pub commit_message: String,
    pub site_url: Option<String>,
}

impl Default for Git {
    fn default() -> Self {
        Git {
            enabled: true,
            program: "git".to_string(),
            work_dir: None,
            remote: None,
            branch: None,
            commit_message: "发布新文章: {title}".to_string(),
            site_url: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub defaults: Defaults,
    pub git: Git,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().ok_or_else(|| {
        io::Error::new(ErrorKind::NotFound, "Could not find the executable directory")
    })?;
    let str_path = path.to_string_lossy();
    Ok(PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir)?,
        index_file: parse_path(cfg.paths.index_file)?,
    };

    if !is_valid_date_format(&cfg.defaults.date_format) {
        return Err(io::Error::new(
            ErrorKind::InvalidData,
            format!("Invalid date_format '{}' in [defaults]", cfg.defaults.date_format)));
    }

    if let Some(work_dir) = cfg.git.work_dir.take() {
        cfg.git.work_dir = Some(parse_path(work_dir)?);
    }

    if let Some(mut log) = cfg.log.take() {
        if let Some(location) = log.location.take() {
            log.location = Some(parse_path(location)?);
        }
        cfg.log = Some(log);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

/// Executable dir, then current dir, then the user config dir
pub fn find_config_path() -> Option<PathBuf> {
    let mut candidates = vec![];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(|d| d.to_path_buf())) {
        candidates.push(exe_dir);
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir);
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir);
    }

    candidates.into_iter()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// An explicit path must exist. Without one, a missing file means the built-in defaults.
pub fn open_config(cfg_path: Option<PathBuf>) -> io::Result<(Config, Option<PathBuf>)> {
    let cfg_path = cfg_path.or_else(find_config_path);
    match cfg_path {
        Some(path) => {
            let config = read_config(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((Config::default(), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("./posts"));
        assert_eq!(cfg.paths.index_file, PathBuf::from("./posts_index.json"));
        assert_eq!(cfg.defaults.tags, ["随笔"]);
        assert_eq!(cfg.defaults.max_tags, 5);
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r##"
[paths]
posts_dir = "content/posts"

[defaults]
mood = "happy"

[git]
remote = "origin"
branch = "main"

[log]
level = "Debug"
log_to_console = false
"##;
        let cfg = parse_config(toml_str).unwrap();
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("content/posts"));
        assert_eq!(cfg.paths.index_file, PathBuf::from("./posts_index.json"));
        assert_eq!(cfg.defaults.mood, "happy");
        assert_eq!(cfg.defaults.read_time, "3分钟阅读");
        assert_eq!(cfg.git.remote.as_deref(), Some("origin"));
        assert_eq!(cfg.git.branch.as_deref(), Some("main"));
        assert_eq!(cfg.git.program, "git");
        let log = cfg.log.unwrap();
        assert_eq!(log.level, LogLevel::Debug);
        assert!(log.location.is_none());
    }

    #[test]
    fn test_exe_dir_is_expanded() {
        let toml_str = r##"
[paths]
index_file = "${exe_dir}/index.json"
"##;
        let cfg = parse_config(toml_str).unwrap();
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(cfg.paths.index_file, exe_dir.join("index.json"));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[paths\nposts_dir = 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_invalid_date_format() {
        let err = parse_config("[defaults]\ndate_format = \"%Y年%Q\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("date_format"));
    }

    #[test]
    fn test_open_config_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CFG_FILE_NAME);
        fs::write(&path, "[defaults]\nmood = \"calm\"\n").unwrap();

        let (cfg, used) = open_config(Some(path.clone())).unwrap();
        assert_eq!(cfg.defaults.mood, "calm");
        assert_eq!(used, Some(path));

        let err = open_config(Some(dir.path().join("missing.toml"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_sample_config_parses() {
        let cfg = parse_config(crate::SAMPLE_CONFIG).unwrap();
        assert_eq!(cfg.defaults, Defaults::default());
        assert_eq!(cfg.git.commit_message, "发布新文章: {title}");
    }
}
