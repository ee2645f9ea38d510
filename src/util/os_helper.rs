use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// Command that opens a file with the default application of the platform
pub fn opener_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

pub fn open_in_editor(path: &Path) -> io::Result<()> {
    let mut cmd = opener_command(path);
    let status = cmd.status()?;
    if !status.success() {
        return Err(io::Error::new(
            ErrorKind::Other,
            format!("{:?} exited with {}", cmd.get_program(), status)));
    }
    Ok(())
}
