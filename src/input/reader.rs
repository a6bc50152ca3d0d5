//! Reading resume and job description documents from disk

use crate::error::{Result, SkillGapError};
use log::info;
use pulldown_cmark::{Event, Parser, Tag};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Supported on-disk document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    Text,
    Markdown,
}

impl SourceFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                SkillGapError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        match extension.to_lowercase().as_str() {
            "pdf" => Ok(SourceFormat::Pdf),
            "txt" => Ok(SourceFormat::Text),
            "md" | "markdown" => Ok(SourceFormat::Markdown),
            other => Err(SkillGapError::UnsupportedFormat(format!(
                "Unsupported file type '.{}' for: {}",
                other,
                path.display()
            ))),
        }
    }
}

/// Loads document text from files, caching per path so a resume referenced by
/// several commands in one run is only parsed once.
pub struct DocumentReader {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for DocumentReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn read_text(&mut self, path: &Path) -> Result<String> {
        let key = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached) = self.cache.get(&key) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(SkillGapError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let format = SourceFormat::from_path(path)?;
        let text = match format {
            SourceFormat::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                let bytes = fs::read(path).await?;
                pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
                    SkillGapError::PdfExtraction(format!(
                        "Failed to extract text from '{}': {}",
                        path.display(),
                        e
                    ))
                })?
            }
            SourceFormat::Text => {
                info!("Reading plain text file: {}", path.display());
                fs::read_to_string(path).await?
            }
            SourceFormat::Markdown => {
                info!("Rendering markdown file: {}", path.display());
                let markdown = fs::read_to_string(path).await?;
                markdown_to_text(&markdown)
            }
        };

        if self.enable_cache {
            self.cache.insert(key, text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Strip markdown structure down to its text content, one line per block.
fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            // inline tag ends (emphasis, links) must not split the line
            Event::End(
                Tag::Paragraph
                | Tag::Heading(..)
                | Tag::Item
                | Tag::List(_)
                | Tag::CodeBlock(_)
                | Tag::BlockQuote
                | Tag::TableRow,
            ) => {
                if !text.ends_with('\n') {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
