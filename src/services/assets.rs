// src/services/assets.rs
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use scraper::{Html, Node, Selector};
use serde_json::{Map, Value};
use tokio::fs::read_to_string;
use tracing::error;

use crate::{error::AssetError, services::notification::Notifier};

const IMPRINT_FILE: &str = "imprint.json";
const DOCUMENTATION_FILE: &str = "documentation.html";

/// Static pages shipped with the client: the imprint and the documentation export.
#[derive(Clone)]
pub struct AssetService {
    dir: PathBuf,
    notifier: Arc<dyn Notifier>,
}

impl AssetService {
    pub fn new(dir: impl Into<PathBuf>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            dir: dir.into(),
            notifier,
        }
    }

    pub async fn try_imprint(&self) -> Result<Map<String, Value>, AssetError> {
        let raw = read_to_string(self.dir.join(IMPRINT_FILE)).await?;
        match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(AssetError::Shape),
        }
    }

    pub async fn try_documentation(&self) -> Result<String, AssetError> {
        Ok(read_to_string(self.dir.join(DOCUMENTATION_FILE)).await?)
    }

    pub async fn imprint(&self) -> Option<Map<String, Value>> {
        self.try_imprint()
            .await
            .map_err(|e| self.report("imprint", &self.dir.join(IMPRINT_FILE), e))
            .ok()
    }

    pub async fn documentation(&self) -> Option<String> {
        self.try_documentation()
            .await
            .map_err(|e| self.report("documentation", &self.dir.join(DOCUMENTATION_FILE), e))
            .ok()
    }

    fn report(&self, what: &str, path: &Path, e: AssetError) {
        error!(asset = what, path = %path.display(), error = %e, "loading asset failed");
        self.notifier
            .show_error(&format!("Could not load the {what}"), "Asset Error");
    }
}

/// Renders imprint entries as `key: value` lines, nested objects indented.
pub fn render_imprint(map: &Map<String, Value>) -> String {
    let mut out = String::new();
    render_entries(map, 0, &mut out);
    out
}

fn render_entries(map: &Map<String, Value>, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    for (key, value) in map {
        match value {
            Value::Object(inner) => {
                out.push_str(&format!("{pad}{key}:\n"));
                render_entries(inner, depth + 1, out);
            }
            Value::String(s) => out.push_str(&format!("{pad}{key}: {s}\n")),
            other => out.push_str(&format!("{pad}{key}: {other}\n")),
        }
    }
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "pre", "blockquote",
];
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Readable text of an HTML document's `<body>`, one block per line.
/// `<script>` and `<style>` content is dropped.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        match node.value() {
            Node::Element(el) if BLOCK_TAGS.contains(&el.name()) => text.push('\n'),
            Node::Text(t) => {
                let hidden = node.ancestors().any(|a| {
                    a.value()
                        .as_element()
                        .is_some_and(|el| SKIPPED_TAGS.contains(&el.name()))
                });
                if !hidden {
                    text.push_str(t);
                }
            }
            _ => {}
        }
    }

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
