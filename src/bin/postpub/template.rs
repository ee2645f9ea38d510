use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Result;

use postpub::util::os_helper::open_in_editor;

use crate::TemplateArgs;

const TEMPLATE: &str = r#"---
title: 新文章标题
date: 2024年1月1日
readTime: 3分钟阅读
mood: 平静
tags: [随笔]
summary: 这里是文章摘要。
---

从这里开始写文章正文...

## 二级标题

正文内容...

![图片描述](https://example.com/image.jpg)
"#;

/// Writes the template unless the file is already there. Returns true when written.
fn write_template(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(TEMPLATE.as_bytes())?;
    writer.flush()?;
    Ok(true)
}

pub fn template_cmd(args: &TemplateArgs) -> Result<()> {
    if write_template(&args.path)? {
        println!("Template written to {}", args.path.display());
    }

    if let Err(e) = open_in_editor(&args.path) {
        println!("Could not open an editor ({}). Template file: {}", e, args.path.display());
    }
    Ok(())
}
