//! Plain-text message output
//!
//! Mirrors the layout a chat delivery would use: a header line announcing
//! the count, then one block per article.

use crate::crawler::Article;
use crate::output::traits::{ArticleSink, OutputResult};
use std::io::Write;

/// Writes a human-readable announcement for each non-empty batch
pub struct TextSink<W: Write> {
    writer: W,
    site_label: String,
}

impl<W: Write> TextSink<W> {
    /// `site_label` names the listing in the header line
    pub fn new(writer: W, site_label: impl Into<String>) -> Self {
        Self {
            writer,
            site_label: site_label.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_article(&mut self, article: &Article) -> OutputResult<()> {
        writeln!(self.writer, "[Title] {}", article.title)?;
        if !article.desc.is_empty() {
            writeln!(self.writer, "[Content] {}", article.desc)?;
        }
        writeln!(self.writer, "[Link] {}", article.url)?;
        if let Some(cover) = &article.cover {
            writeln!(self.writer, "[Cover] {}", cover)?;
        }
        Ok(())
    }
}

impl<W: Write> ArticleSink for TextSink<W> {
    fn deliver(&mut self, articles: &[Article]) -> OutputResult<()> {
        if articles.is_empty() {
            return Ok(());
        }

        writeln!(
            self.writer,
            "{} published {} new article(s).",
            self.site_label,
            articles.len()
        )?;
        for article in articles {
            writeln!(self.writer)?;
            self.write_article(article)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
