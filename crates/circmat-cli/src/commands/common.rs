//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use circmat_ir::CircuitMatrix;

/// A matrix as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixDocument {
    /// Optional circuit name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The qubit lines.
    pub lines: CircuitMatrix,
}

/// On-disk document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    /// One line per row, whitespace-separated cell tokens.
    Text,
}

impl DocumentFormat {
    /// Pick the format for a path. Unknown extensions are read as text.
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "json" => DocumentFormat::Json,
            "yaml" | "yml" => DocumentFormat::Yaml,
            _ => DocumentFormat::Text,
        }
    }
}

/// Load a matrix document from a JSON, YAML or text file.
pub fn load_matrix(path: &str) -> Result<MatrixDocument> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;

    let format = DocumentFormat::from_path(path_obj);
    debug!(?format, "Loading matrix from {path}");

    let doc = match format {
        DocumentFormat::Json => serde_json::from_str(&source)
            .with_context(|| format!("Invalid JSON matrix document: {path}"))?,
        DocumentFormat::Yaml => serde_yaml_ng::from_str(&source)
            .with_context(|| format!("Invalid YAML matrix document: {path}"))?,
        DocumentFormat::Text => MatrixDocument {
            name: path_obj
                .file_stem()
                .and_then(|s| s.to_str())
                .map(String::from),
            lines: source
                .parse()
                .map_err(|e| anyhow::anyhow!("Parse error in {path}: {e}"))?,
        },
    };

    Ok(doc)
}

/// Render a document in the given format.
pub fn render_matrix(doc: &MatrixDocument, format: DocumentFormat) -> Result<String> {
    let text = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(doc)?,
        DocumentFormat::Yaml => serde_yaml_ng::to_string(doc)?,
        DocumentFormat::Text => format!("{}\n", doc.lines),
    };
    Ok(text)
}

/// Write a document to `output`, or print it as text when no output is given.
pub fn write_matrix(doc: &MatrixDocument, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            let text = render_matrix(doc, DocumentFormat::from_path(Path::new(path)))?;
            fs::write(path, text).with_context(|| format!("Failed to write file: {path}"))?;
            debug!("Wrote matrix to {path}");
        }
        None => print!("{}", render_matrix(doc, DocumentFormat::Text)?),
    }
    Ok(())
}

/// Display name of a document.
pub fn display_name(doc: &MatrixDocument) -> &str {
    doc.name.as_deref().unwrap_or("circuit")
}
