//! On-disk IR artifacts
//!
//! Every root is written as `<rootId>.json` under the output directory, next
//! to an `index.json` listing the root ids in compile order.

use crate::error::{CompilerError, Result};
use crate::ir::IrRoot;
use crate::schema::parse_root;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactIndex {
    pub count: usize,
    pub roots: Vec<String>,
}

pub fn artifact_path(out_dir: &Path, root_id: &str) -> PathBuf {
    out_dir.join(format!("{}.json", root_id))
}

/// Write one JSON file per root plus the index. Returns the files written.
pub fn write_artifacts(roots: &[IrRoot], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(roots.len() + 1);
    for root in roots {
        let path = artifact_path(out_dir, &root.root_id);
        let json = serde_json::to_string_pretty(root)?;
        fs::write(&path, json)?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }

    let index = ArtifactIndex {
        count: roots.len(),
        roots: roots.iter().map(|r| r.root_id.clone()).collect(),
    };
    let index_path = out_dir.join(INDEX_FILE);
    fs::write(&index_path, serde_json::to_string_pretty(&index)?)?;
    written.push(index_path);

    Ok(written)
}

/// Load and validate every root listed in the index.
/// Without an index, every `*.json` in the directory is read in name order.
pub fn read_artifacts(out_dir: &Path) -> Result<Vec<IrRoot>> {
    if !out_dir.is_dir() {
        return Err(CompilerError::FileNotFound {
            path: out_dir.display().to_string(),
        });
    }

    let index_path = out_dir.join(INDEX_FILE);
    let files: Vec<PathBuf> = if index_path.is_file() {
        let text = fs::read_to_string(&index_path)?;
        let index: ArtifactIndex = serde_json::from_str(&text).map_err(|e| CompilerError::InvalidFormat {
            message: format!("{}: {}", index_path.display(), e),
        })?;
        index.roots.iter().map(|id| artifact_path(out_dir, id)).collect()
    } else {
        let mut files: Vec<PathBuf> = fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files
    };

    let mut roots = Vec::with_capacity(files.len());
    for path in files {
        let text = fs::read_to_string(&path).map_err(|e| CompilerError::FileNotFound {
            path: format!("{}: {}", path.display(), e),
        })?;
        roots.push(parse_root(&text)?);
    }
    Ok(roots)
}

/// Remove the output directory. Missing directories are not an error.
pub fn clean_artifacts(out_dir: &Path) -> Result<bool> {
    if !out_dir.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(out_dir)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Node, NodeKind, TextContent};
    use tempfile::TempDir;

    fn text_root(id: &str, text: &str) -> IrRoot {
        IrRoot::new(
            id,
            Node::new(NodeKind::Text {
                text: TextContent::String(text.to_string()),
            }),
        )
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join(".brik");
        let roots = vec![text_root("b_tsx", "B"), text_root("a_tsx", "A")];

        let written = write_artifacts(&roots, &out).unwrap();
        assert_eq!(written.len(), 3);
        assert!(out.join("b_tsx.json").is_file());

        let loaded = read_artifacts(&out).unwrap();
        assert_eq!(loaded, roots);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        fs::write(
            out.join("old.json"),
            r#"{"version": 2, "rootId": "old", "tree": {"type": "View", "children": []}}"#,
        )
        .unwrap();

        let err = read_artifacts(out).unwrap_err();
        assert!(matches!(err, CompilerError::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_artifacts(&temp_dir.path().join("nope")).unwrap_err();
        assert_eq!(err.code(), "BR104");
        assert!(!clean_artifacts(&temp_dir.path().join("nope")).unwrap());
    }
}
