//! Brik Widget Compiler
//!
//! Compiles React-Native-style JSX/TSX widget markup into a versioned JSON
//! intermediate representation and lowers that IR into native SwiftUI
//! (iOS, WidgetKit, ActivityKit) and Jetpack Compose / Glance (Android) code.
//!
//! # Features
//!
//! - Static evaluation of literals, local constants, loop variables and
//!   conditional markup
//! - Bucketed style normalization shared by both platforms
//! - Home-screen widgets and live activities from doc-comment markers
//! - Schema validation with field-level error paths
//! - Deterministic, structurally equivalent output for both targets
//!
//! # Basic Usage
//!
//! ```no_run
//! use brikc::{compile_project, generate_platform, CompilerOptions, Result};
//! use brikc::generators::SwiftUiGenerator;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let options = CompilerOptions::for_project(".");
//!     let output = compile_project(&options)?;
//!     generate_platform(&SwiftUiGenerator::new(), &output.roots, Path::new("ios"))?;
//!     Ok(())
//! }
//! ```
//!
//! # Compilation Pipeline
//!
//! 1. **Discovery**: walk the project for `.tsx`/`.jsx` sources
//! 2. **Parsing**: one oxc syntax tree per file
//! 3. **Root selection**: live-activity configuration, else the first buildable element
//! 4. **Building**: elements to IR nodes with static evaluation and style normalization
//! 5. **Validation**: schema checks on every root
//! 6. **Artifacts**: `<rootId>.json` plus `index.json` in the output directory
//! 7. **Generation**: SwiftUI and Compose sources from the validated IR

pub mod artifacts;
pub mod builder;
pub mod cli;
pub mod color;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod generators;
pub mod ir;
pub mod layout;
pub mod parser;
pub mod schema;
pub mod style;
pub mod value;

use serde::Serialize;
use std::path::{Path, PathBuf};

// Re-export commonly used types and functions
pub use artifacts::{read_artifacts, write_artifacts, ArtifactIndex};
pub use compiler::{compile_files, compile_source, derive_root_id, discover_sources, CompileOutput, FileFailure};
pub use error::{CompilerError, Result, ValidationIssue};
pub use generators::{CodeGenerator, ComposeGenerator, GeneratedFile, SwiftUiGenerator};
pub use ir::{IrRoot, Node, NodeKind, IR_VERSION};
pub use schema::{parse_root, validate_root};
pub use style::{normalize_style, NormalizedStyle};
pub use cli::EnhancedCli;

/// Compiler version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default artifact directory, relative to the project root
pub const DEFAULT_OUT_DIR: &str = ".brik";

/// Compiler build information
pub const BUILD_INFO: CompilerInfo = CompilerInfo {
    version: VERSION,
    name: NAME,
    description: DESCRIPTION,
    ir_version: IR_VERSION,
    supported_features: &[
        "widgets",
        "live-activities",
        "static-lists",
        "conditional-markup",
        "swiftui",
        "compose",
        "glance",
    ],
};

/// Compiler information structure
#[derive(Debug, Clone)]
pub struct CompilerInfo {
    pub version: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub ir_version: u32,
    pub supported_features: &'static [&'static str],
}

/// Compilation options and settings
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Directory sources are discovered under and root ids are relative to
    pub project_root: PathBuf,

    /// Explicit source files relative to the project root; skips discovery
    pub entries: Option<Vec<PathBuf>>,

    /// Artifact directory; relative paths resolve against the project root
    pub out_dir: PathBuf,

    /// Attach default widget metadata to every plain root
    pub as_widget: bool,

    /// Extra directory names skipped during discovery
    pub exclude_dirs: Vec<String>,

    /// Enable debug mode with per-file logging
    pub debug_mode: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            entries: None,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            as_widget: false,
            exclude_dirs: Vec::new(),
            debug_mode: false,
        }
    }
}

impl CompilerOptions {
    pub fn for_project(root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: root.into(),
            ..Self::default()
        }
    }

    pub fn artifact_dir(&self) -> PathBuf {
        if self.out_dir.is_absolute() {
            self.out_dir.clone()
        } else {
            self.project_root.join(&self.out_dir)
        }
    }
}

/// Compilation statistics and metrics
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompilationStats {
    /// Source files read
    pub files_scanned: usize,

    /// Roots that built and validated
    pub roots_compiled: usize,

    pub parse_failures: usize,

    pub validation_failures: usize,

    /// Roots carrying a live-activity configuration
    pub live_activity_count: usize,

    /// Roots carrying widget metadata
    pub widget_count: usize,

    /// Total IR nodes across all root trees
    pub node_count: usize,

    /// Compilation time in milliseconds
    pub compile_time_ms: u64,
}

/// Compile a project and write its artifacts
pub fn compile_project(options: &CompilerOptions) -> Result<CompileOutput> {
    if options.debug_mode {
        log::info!("{} v{} (IR v{})", NAME, VERSION, IR_VERSION);
        log::debug!("Compiler options: {:?}", options);
    }

    let output = compile_files(options)?;
    let out_dir = options.artifact_dir();
    let written = write_artifacts(&output.roots, &out_dir)?;

    if options.debug_mode {
        log::info!("Wrote {} artifacts to {}", written.len(), out_dir.display());
        log::debug!("Full stats: {:?}", output.stats);
    }

    Ok(output)
}

/// Run one generator and write its files under `out_dir`
pub fn generate_platform(
    generator: &dyn CodeGenerator,
    roots: &[IrRoot],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let files = generator.generate(roots)?;
    let written = generators::write_generated_files(&files, out_dir)?;
    log::info!(
        "{}: wrote {} files to {}",
        generator.name(),
        written.len(),
        out_dir.display()
    );
    Ok(written)
}

/// Get compiler build information
pub fn build_info() -> &'static CompilerInfo {
    &BUILD_INFO
}

/// Check if a feature is supported
pub fn supports_feature(feature: &str) -> bool {
    BUILD_INFO.supported_features.contains(&feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_compile_project_writes_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("src/Hello.tsx"),
            "export const Hello = () => <View><Text>Hi</Text></View>;",
        )
        .unwrap();

        let options = CompilerOptions::for_project(root);
        let output = compile_project(&options).unwrap();

        assert_eq!(output.stats.roots_compiled, 1);
        assert_eq!(output.stats.node_count, 2);
        assert!(root.join(".brik/src_Hello.tsx.json").is_file());
        assert!(root.join(".brik/index.json").is_file());

        let loaded = read_artifacts(&options.artifact_dir()).unwrap();
        assert_eq!(loaded, output.roots);
    }

    #[test]
    fn test_generate_platform() {
        let temp_dir = TempDir::new().unwrap();
        let roots = vec![IrRoot::new("A_tsx", Node::placeholder())];
        let written = generate_platform(&ComposeGenerator::new(), &roots, temp_dir.path()).unwrap();
        assert_eq!(written.len(), 1);
        assert!(temp_dir
            .path()
            .join("brik/src/main/java/generated/A_tsx.kt")
            .is_file());
    }

    #[test]
    fn test_build_info() {
        let info = build_info();
        assert!(!info.version.is_empty());
        assert_eq!(info.ir_version, 1);
        assert!(supports_feature("live-activities"));
        assert!(!supports_feature("nonexistent_feature"));
    }

    #[test]
    fn test_compiler_options_default() {
        let options = CompilerOptions::default();
        assert!(!options.debug_mode);
        assert!(!options.as_widget);
        assert!(options.entries.is_none());
        assert_eq!(options.artifact_dir(), PathBuf::from("./.brik"));
    }
}
