//! JSON lines output

use crate::crawler::Article;
use crate::output::traits::{ArticleSink, OutputResult};
use std::io::Write;

/// Writes each article as one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ArticleSink for JsonLinesSink<W> {
    fn deliver(&mut self, articles: &[Article]) -> OutputResult<()> {
        for article in articles {
            serde_json::to_writer(&mut self.writer, article)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: u64, cover: Option<&str>) -> Article {
        Article {
            id,
            title: format!("Article {}", id),
            url: format!("https://example.com/wp/{}.html", id),
            cover: cover.map(str::to_string),
            desc: "first\nsecond".to_string(),
        }
    }

    #[test]
    fn test_one_line_per_article() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.deliver(&[article(2, Some("https://example.com/2.jpg")), article(1, None)])
            .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Article = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, article(2, Some("https://example.com/2.jpg")));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["id"], 1);
        assert!(second["cover"].is_null());
        assert_eq!(second["desc"], "first\nsecond");
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.deliver(&[]).unwrap();
        assert!(sink.into_inner().is_empty());
    }
}
