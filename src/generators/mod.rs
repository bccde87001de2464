//! Native code generators
//!
//! Generators consume validated IR roots and return the files to write,
//! relative to the platform directory they were configured with.

pub mod compose;
pub mod live_activity;
pub mod swiftui;

pub use compose::ComposeGenerator;
pub use swiftui::SwiftUiGenerator;

use crate::error::Result;
use crate::ir::{Axis, IrRoot, Node, NodeKind, IR_VERSION};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// One emitted source file. `path` is relative to the generator's output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

pub trait CodeGenerator {
    fn name(&self) -> &'static str;

    fn generate(&self, roots: &[IrRoot]) -> Result<Vec<GeneratedFile>>;
}

/// Write files under `out_dir`, creating parent directories as needed
pub fn write_generated_files(files: &[GeneratedFile], out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Replace anything outside `[A-Za-z0-9_]` with `_`, prefixing `_` before a leading digit
pub fn sanitize_identifier(raw: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let re = INVALID.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());
    let ident = re.replace_all(raw, "_").into_owned();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", ident)
    } else {
        ident
    }
}

/// Escape a value for a double-quoted Swift string literal
pub fn escape_swift(value: &str) -> String {
    escape_quoted(value, false)
}

/// Kotlin also interpolates `$`
pub fn escape_kotlin(value: &str) -> String {
    escape_quoted(value, true)
}

/// Text safe to place after `//`: line breaks become spaces
pub fn comment_text(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn escape_quoted(value: &str, escape_dollar: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' if escape_dollar => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Primitive a node lowers to, independent of the target grammar
pub fn primitive_kind(node: &Node) -> &'static str {
    match &node.kind {
        NodeKind::View { children } if children.is_empty() => "Empty",
        NodeKind::View { .. } => "Column",
        NodeKind::Stack {
            axis: Axis::Horizontal,
            ..
        } => "Row",
        NodeKind::Stack { .. } => "Column",
        other => other.type_name(),
    }
}

/// Pre-order `(primitive, depth)` sequence of a tree. Both targets must
/// produce code with this same shape.
pub fn structural_digest(node: &Node) -> Vec<(&'static str, usize)> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<(&'static str, usize)>) {
        out.push((primitive_kind(node), depth));
        for child in node.children() {
            walk(child, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(node, 0, &mut out);
    out
}

/// Generators only accept the IR version they were written for
pub(crate) fn ensure_version(root: &IrRoot) -> Result<()> {
    if root.version != IR_VERSION {
        return Err(crate::error::CompilerError::UnsupportedVersion {
            root_id: root.root_id.clone(),
            found: u64::from(root.version),
            expected: IR_VERSION,
        });
    }
    Ok(())
}

/// Line-oriented source writer with four-space indentation
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
    out: String,
    level: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.level {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `header`, run `body` one level deeper, then write `footer`
    pub fn block(&mut self, header: impl AsRef<str>, footer: &str, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.level += 1;
        body(self);
        self.level -= 1;
        self.line(footer);
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TextContent;
    use tempfile::TempDir;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("src_Widget.tsx"), "src_Widget_tsx");
        assert_eq!(sanitize_identifier("my-widget"), "my_widget");
        assert_eq!(sanitize_identifier("1st"), "_1st");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_swift(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_swift("a\nb"), "a\\nb");
        assert_eq!(escape_swift("$5"), "$5");
        assert_eq!(escape_kotlin("$5"), "\\$5");
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(comment_text("renderRow"), "renderRow");
        assert_eq!(comment_text("a\r\n}\nfun evil() {"), "a  } fun evil() {");
    }

    #[test]
    fn test_structural_digest() {
        let text = Node::new(NodeKind::Text {
            text: TextContent::String("Hi".into()),
        });
        let row = Node::new(NodeKind::Stack {
            axis: Axis::Horizontal,
            children: vec![text.clone(), Node::new(NodeKind::Spacer { flex: None })],
        });
        let tree = Node::new(NodeKind::View {
            children: vec![row, Node::placeholder()],
        });
        assert_eq!(
            structural_digest(&tree),
            vec![
                ("Column", 0),
                ("Row", 1),
                ("Text", 2),
                ("Spacer", 2),
                ("Empty", 1)
            ]
        );
    }

    #[test]
    fn test_source_writer_blocks() {
        let mut w = SourceWriter::new();
        w.block("fun a() {", "}", |w| {
            w.line("b()");
            w.blank();
        });
        assert_eq!(w.finish(), "fun a() {\n    b()\n\n}\n");
    }

    #[test]
    fn test_write_generated_files() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![GeneratedFile::new("a/b/C.swift", "struct C {}")];
        let written = write_generated_files(&files, temp_dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "struct C {}");
    }
}
