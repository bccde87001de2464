use super::{project_root, EnhancedCli, TargetPlatform, DEFAULT_ANDROID_DIR, DEFAULT_IOS_DIR};
use crate::artifacts::clean_artifacts;
use crate::compiler::{compile_files, CompileOutput, FileFailure};
use crate::generators::{ComposeGenerator, SwiftUiGenerator};
use crate::ir::IrRoot;
use crate::{compile_project, generate_platform, CompilationStats, CompilerError, Result};
use clap::ArgMatches;
use std::path::{Path, PathBuf};

// --- SCAN ---
pub fn handle_scan_command(cli: &EnhancedCli, matches: &ArgMatches) -> Result<()> {
    let root = project_root(matches);
    let config = cli.resolve_config(&root)?;
    let options = cli.build_compiler_options(matches, &config)?;

    println!("🔎 Scanning {}", root.display());
    let output = compile_files(&options)?;

    for ir in &output.roots {
        println!("   {} ({}, {} nodes)", ir.root_id, root_kind(ir), ir.tree.count());
    }
    print_failures(&output.failures);
    println!(
        "📊 {} roots from {} files",
        output.roots.len(),
        output.stats.files_scanned
    );
    Ok(())
}

// --- BUILD ---
pub fn handle_build_command(cli: &EnhancedCli, matches: &ArgMatches) -> Result<()> {
    let root = project_root(matches);
    let config = cli.resolve_config(&root)?;
    let options = cli.build_compiler_options(matches, &config)?;
    let platform = matches
        .get_one::<TargetPlatform>("platform")
        .copied()
        .unwrap_or(TargetPlatform::All);

    println!("🔨 Building {}", root.display());
    let output = compile_project(&options)?;
    print_failures(&output.failures);
    println!(
        "✅ Compiled {} roots into {}",
        output.roots.len(),
        options.artifact_dir().display()
    );

    if output.roots.is_empty() {
        println!("⚠️  Nothing to generate");
    } else {
        if platform.includes_ios() {
            let ios_dir = platform_dir(&root, matches.get_one::<String>("ios-dir"), config.ios_dir.as_deref(), DEFAULT_IOS_DIR);
            let written = generate_platform(&SwiftUiGenerator::new(), &output.roots, &ios_dir)?;
            println!("   iOS: {} files in {}", written.len(), ios_dir.display());
        }
        if platform.includes_android() {
            let android_dir = platform_dir(
                &root,
                matches.get_one::<String>("android-dir"),
                config.android_dir.as_deref(),
                DEFAULT_ANDROID_DIR,
            );
            let generator = match &config.kotlin_package {
                Some(package) => ComposeGenerator::with_package(package.clone()),
                None => ComposeGenerator::new(),
            };
            let written = generate_platform(&generator, &output.roots, &android_dir)?;
            println!("   Android: {} files in {}", written.len(), android_dir.display());
        }
    }

    println!("   Time: {}ms", cli.elapsed_ms());
    if matches.get_flag("stats") {
        print_detailed_stats(&output.stats)?;
    }
    Ok(())
}

// --- CHECK ---
pub fn handle_check_command(cli: &EnhancedCli, matches: &ArgMatches) -> Result<()> {
    let root = project_root(matches);
    let config = cli.resolve_config(&root)?;
    let options = cli.build_compiler_options(matches, &config)?;

    println!("🔍 Checking {}", root.display());
    let output = compile_files(&options)?;
    for ir in &output.roots {
        println!("✅ {} - No issues found", ir.root_id);
    }
    print_failures(&output.failures);
    check_summary(&output)
}

fn check_summary(output: &CompileOutput) -> Result<()> {
    let total = output.stats.files_scanned;
    let failed = output.failures.len();

    println!("\n📊 Check Summary:");
    println!("   Total files: {}", total);
    println!("   Files with errors: {}", failed);
    if total > 0 {
        println!(
            "   Success rate: {:.1}%",
            total.saturating_sub(failed) as f64 / total as f64 * 100.0
        );
    }

    if failed > 0 {
        Err(CompilerError::CompilationFailed { failed, total })
    } else {
        Ok(())
    }
}

// --- CLEAN ---
pub fn handle_clean_command(cli: &EnhancedCli, matches: &ArgMatches) -> Result<()> {
    let root = project_root(matches);
    let config = cli.resolve_config(&root)?;
    let options = cli.build_compiler_options(matches, &config)?;
    let out_dir = options.artifact_dir();

    if clean_artifacts(&out_dir)? {
        println!("🧹 Removed {}", out_dir.display());
    } else {
        println!("Nothing to clean at {}", out_dir.display());
    }
    Ok(())
}

// --- HELPERS ---
fn root_kind(root: &IrRoot) -> &'static str {
    if root.live_activity.is_some() {
        "live activity"
    } else if root.widget.is_some() {
        "widget"
    } else {
        "view"
    }
}

fn print_failures(failures: &[FileFailure]) {
    for failure in failures {
        println!("❌ {} [{}] {}", failure.file, failure.error.code(), failure.error);
    }
}

/// Flag, then config value, then default; relative paths hang off the project root
fn platform_dir(root: &Path, flag: Option<&String>, configured: Option<&str>, default: &str) -> PathBuf {
    let dir = flag.map(String::as_str).or(configured).unwrap_or(default);
    root.join(dir)
}

fn print_detailed_stats(stats: &CompilationStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)?;
    println!("\n📈 Compilation statistics:\n{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dir_precedence() {
        let root = Path::new("app");
        let flag = "custom/ios".to_string();
        assert_eq!(
            platform_dir(root, Some(&flag), Some("cfg"), DEFAULT_IOS_DIR),
            PathBuf::from("app/custom/ios")
        );
        assert_eq!(platform_dir(root, None, Some("cfg"), DEFAULT_IOS_DIR), PathBuf::from("app/cfg"));
        assert_eq!(platform_dir(root, None, None, DEFAULT_ANDROID_DIR), PathBuf::from("app/android"));
    }

    #[test]
    fn test_check_summary_fails_on_any_failure() {
        let mut output = CompileOutput::default();
        output.stats.files_scanned = 2;
        assert!(check_summary(&output).is_ok());

        output.failures.push(FileFailure {
            file: "src/Broken.tsx".into(),
            error: CompilerError::parse("src/Broken.tsx", "unexpected token"),
        });
        let err = check_summary(&output).unwrap_err();
        assert!(matches!(err, CompilerError::CompilationFailed { failed: 1, total: 2 }));
        assert_eq!(err.code(), "BR001");
    }
}
