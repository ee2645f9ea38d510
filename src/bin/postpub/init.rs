use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use postpub::config::CFG_FILE_NAME;
use postpub::SAMPLE_CONFIG;

use crate::InitArgs;

fn write_sample_cfg(out_dir: &Path) -> Result<PathBuf> {
    if !out_dir.is_dir() {
        bail!("Output path must be a directory: {}", out_dir.display());
    }

    let cfg_path = out_dir.join(CFG_FILE_NAME);
    if cfg_path.exists() {
        bail!("{} already exists", cfg_path.display());
    }

    let file = File::create(&cfg_path)
        .with_context(|| format!("Error writing {}", cfg_path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(SAMPLE_CONFIG.as_bytes())?;
    writer.flush()?;

    Ok(cfg_path)
}

pub fn init_cmd(args: &InitArgs) -> Result<()> {
    let out_dir = fs::canonicalize(&args.out_dir)
        .with_context(|| format!("Error converting path to absolute: {}", args.out_dir.display()))?;
    let cfg_path = write_sample_cfg(&out_dir)?;
    println!("Configuration written to {}", cfg_path.display());
    Ok(())
}
