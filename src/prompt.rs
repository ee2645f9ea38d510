use std::io;
use std::io::{BufRead, ErrorKind, Write};

use lazy_static::lazy_static;
use regex::Regex;

pub const BODY_END_MARK: &str = "END";

/// Line based terminal questions. Generic over the streams so flows can be scripted.
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Reads one line without its line break. A closed input is an `UnexpectedEof` error.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Asks until an answer is given; an empty answer takes the default when there is one
    pub fn ask(&mut self, question: &str, default: &str, required: bool) -> io::Result<String> {
        loop {
            let prompt = if default.is_empty() {
                format!("{}: ", question)
            } else {
                format!("{} [{}]: ", question, default)
            };

            let answer = self.read_line(&prompt)?;
            let answer = answer.trim();

            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            if !default.is_empty() {
                return Ok(default.to_string());
            }
            if !required {
                return Ok(String::new());
            }
            self.say("This field is required")?;
        }
    }

    /// `y/N` question. Anything but `y`, including a closed input, is a no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        match self.read_line(&format!("{} (y/N): ", question)) {
            Ok(answer) => Ok(answer.trim().eq_ignore_ascii_case("y")),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// 1-based choice in `1..=count`, None for anything else
    pub fn choose(&mut self, question: &str, count: usize) -> io::Result<Option<usize>> {
        let answer = self.read_line(question)?;
        Ok(parse_choice(&answer, count))
    }

    pub fn choose_mood(&mut self, moods: &[String], default: &str) -> io::Result<String> {
        for (i, mood) in moods.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, mood)?;
        }

        match self.choose(&format!("Mood (1-{}, other for a custom one): ", moods.len()), moods.len())? {
            Some(n) => Ok(moods[n - 1].clone()),
            None => self.ask("Custom mood", default, true),
        }
    }

    /// A blank answer takes `default`. An answer that cleans down to nothing means no tags.
    pub fn ask_tags(&mut self, default: &[String], max_tags: usize) -> io::Result<Vec<String>> {
        let answer = self.read_line("Tags (comma or space separated, empty for the default): ")?;
        let tags = parse_tags(&answer, max_tags);
        if answer.trim().is_empty() {
            return Ok(default.to_vec());
        }
        Ok(tags)
    }

    /// Body lines until a line with `END`. A closed input also ends the body.
    pub fn read_body(&mut self) -> io::Result<String> {
        let mut lines = vec![];
        loop {
            let line = match self.read_line(&format!("[{}] ", lines.len() + 1)) {
                Ok(line) => line,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            };
            if line.trim().eq_ignore_ascii_case(BODY_END_MARK) {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

pub fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n),
        _ => None,
    }
}

/// Comma separated when there is a comma, whitespace separated otherwise.
/// Characters outside `[\w\s-]` are removed and at most `max_tags` are kept.
pub fn parse_tags(input: &str, max_tags: usize) -> Vec<String> {
    lazy_static! {
        static ref TAG_CLEAN_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
    }

    let input = input.trim();
    let raw_tags: Vec<&str> = if input.contains(',') {
        input.split(',').map(|t| t.trim()).collect()
    } else {
        input.split_whitespace().collect()
    };

    raw_tags.into_iter()
        .filter(|t| !t.is_empty())
        .map(|t| TAG_CLEAN_REGEX.replace_all(t, "").to_string())
        .filter(|t| !t.is_empty())
        .take(max_tags)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), vec![])
    }

    #[test]
    fn test_ask() {
        let mut p = prompter("\n  \nHello  \n\n\n");
        assert_eq!(p.ask("Title", "", true).unwrap(), "Hello");
        assert_eq!(p.ask("Read time", "3分钟阅读", true).unwrap(), "3分钟阅读");
        assert_eq!(p.ask("Optional", "", false).unwrap(), "");
        let err = p.ask("Title", "", true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Read time [3分钟阅读]: "));
        assert!(out.contains("This field is required"));
    }

    #[test]
    fn test_confirm() {
        let mut p = prompter("y\nY\nn\nyes\n");
        assert!(p.confirm("Publish?").unwrap());
        assert!(p.confirm("Publish?").unwrap());
        assert!(!p.confirm("Publish?").unwrap());
        assert!(!p.confirm("Publish?").unwrap());
        assert!(!p.confirm("Publish?").unwrap());
    }

    #[test]
    fn test_choose_mood() {
        let moods: Vec<String> = vec!["开心".to_string(), "平静".to_string()];
        let mut p = prompter("2\n9\ncurious\nx\n\n");
        assert_eq!(p.choose_mood(&moods, "平静").unwrap(), "平静");
        assert_eq!(p.choose_mood(&moods, "平静").unwrap(), "curious");
        assert_eq!(p.choose_mood(&moods, "平静").unwrap(), "平静");
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("rust, 生活 , cli!", 5), ["rust", "生活", "cli"]);
        assert_eq!(parse_tags("rust 生活  cli", 5), ["rust", "生活", "cli"]);
        assert_eq!(parse_tags("a b c d e f g", 5), ["a", "b", "c", "d", "e"]);
        assert_eq!(parse_tags("a,,!!, b", 5), ["a", "b"]);
        assert!(parse_tags("   ", 5).is_empty());
    }

    #[test]
    fn test_ask_tags_default() {
        let default = vec!["随笔".to_string()];
        let mut p = prompter("\nx y\n!!\n");
        assert_eq!(p.ask_tags(&default, 5).unwrap(), default);
        assert_eq!(p.ask_tags(&default, 5).unwrap(), ["x", "y"]);
        assert!(p.ask_tags(&default, 5).unwrap().is_empty());
    }

    #[test]
    fn test_read_body() {
        let mut p = prompter("first line\n\n<strong>third</strong>\nend\nnot read\n");
        assert_eq!(p.read_body().unwrap(), "first line\n\n<strong>third</strong>");
        assert_eq!(p.read_line("").unwrap(), "not read");

        let mut p = prompter("only\nlines");
        assert_eq!(p.read_body().unwrap(), "only\nlines");
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice(" 3 ", 4), Some(3));
        assert_eq!(parse_choice("0", 4), None);
        assert_eq!(parse_choice("5", 4), None);
        assert_eq!(parse_choice("", 4), None);
    }
}
