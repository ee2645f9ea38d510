use std::env;
use std::ffi::OsString;
use std::fmt::Write as _;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use spdlog::{debug, info, warn};
use thiserror::Error;

use crate::config::Git;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{0} was not found. Is it installed and in the PATH?")]
    ToolMissing(String),

    #[error("`{step}` failed ({status}): {stderr}")]
    StepFailed {
        step: String,
        status: String,
        stderr: String,
    },

    #[error("Error running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Stages, commits and pushes published files with the git command line
pub struct GitSync {
    program: String,
    work_dir: Option<PathBuf>,
    remote: Option<String>,
    branch: Option<String>,
    commit_message: String,
}

impl GitSync {
    pub fn from_config(git: &Git) -> Self {
        GitSync {
            program: git.program.clone(),
            work_dir: git.work_dir.clone(),
            remote: git.remote.clone(),
            branch: git.branch.clone(),
            commit_message: git.commit_message.clone(),
        }
    }

    pub fn commit_message(&self, title: &str) -> String {
        self.commit_message.replace("{title}", title)
    }

    /// Relative paths name files from the current dir. git runs in `work_dir`
    /// when one is set, so they are made absolute first.
    fn resolve(&self, file: &Path) -> PathBuf {
        if self.work_dir.is_none() || file.is_absolute() {
            return file.to_path_buf();
        }
        match env::current_dir() {
            Ok(cwd) => cwd.join(file),
            Err(e) => {
                warn!("Could not read the current dir, passing {} as is: {}", file.display(), e);
                file.to_path_buf()
            }
        }
    }

    fn add_args(&self, files: &[&Path]) -> Vec<OsString> {
        let mut args = vec![OsString::from("add")];
        args.extend(files.iter().map(|f| self.resolve(f).into_os_string()));
        args
    }

    fn commit_args(&self, title: &str) -> Vec<OsString> {
        vec!["commit".into(), "-m".into(), self.commit_message(title).into()]
    }

    fn push_args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("push")];
        if let Some(ref remote) = self.remote {
            args.push(remote.into());
            if let Some(ref branch) = self.branch {
                args.push(branch.into());
            }
        }
        args
    }

    /// The three invocations, in order
    pub fn commands(&self, files: &[&Path], title: &str) -> Vec<Vec<OsString>> {
        vec![
            self.add_args(files),
            self.commit_args(title),
            self.push_args(),
        ]
    }

    /// Runs add, commit and push. Stops at the first failing step; nothing is rolled back.
    pub fn sync(&self, files: &[&Path], title: &str) -> Result<(), SyncError> {
        for args in self.commands(files, title) {
            self.run(&args)?;
        }
        info!("Pushed \"{}\"", title);
        Ok(())
    }

    fn run(&self, args: &[OsString]) -> Result<Output, SyncError> {
        let step = format!("{} {}", self.program, args.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" "));
        debug!("Running {}", step);

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(ref dir) = self.work_dir {
            cmd.current_dir(dir);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SyncError::ToolMissing(self.program.clone()));
            }
            Err(e) => {
                return Err(SyncError::Io { program: self.program.clone(), source: e });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // git commit reports "nothing to commit" on stdout
            let message = if stderr.trim().is_empty() { stdout } else { stderr };
            return Err(SyncError::StepFailed {
                step,
                status: output.status.to_string(),
                stderr: message.trim().to_string(),
            });
        }

        Ok(output)
    }

    /// Runs the sync and tells the user how it went. A failure is only a warning:
    /// the published files stay in place and the manual commands are printed.
    pub fn sync_and_report<W: Write>(&self, files: &[&Path], title: &str, site_url: Option<&str>, out: &mut W) -> io::Result<bool> {
        writeln!(out, "Pushing to the remote repository...")?;
        match self.sync(files, title) {
            Ok(()) => {
                writeln!(out, "Pushed. The site will be updated once the remote deploys it.")?;
                if let Some(url) = site_url {
                    writeln!(out, "Visit: {}", url)?;
                }
                Ok(true)
            }
            Err(e) => {
                warn!("Sync failed: {}", e);
                writeln!(out, "Warning: {}", e)?;
                writeln!(out, "The post is saved locally. Run these commands to publish it:")?;
                write!(out, "{}", self.manual_instructions(files, title))?;
                Ok(false)
            }
        }
    }

    /// Shell commands the user can run to finish the sync by hand
    pub fn manual_instructions(&self, files: &[&Path], title: &str) -> String {
        let mut buf = String::new();
        let files: Vec<String> = files.iter().map(|f| self.resolve(f).display().to_string()).collect();

        let _ = writeln!(&mut buf, "  {} add {}", self.program, files.join(" "));
        let _ = writeln!(&mut buf, "  {} commit -m \"{}\"", self.program, self.commit_message(title));
        let push: Vec<String> = self.push_args().iter().map(|a| a.to_string_lossy().to_string()).collect();
        let _ = writeln!(&mut buf, "  {} {}", self.program, push.join(" "));
        buf
    }
}
