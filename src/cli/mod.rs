mod config;
mod handlers;

pub use config::{BrikConfig, CONFIG_FILE_NAMES};

use crate::error::Result;
use crate::CompilerOptions;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const DEFAULT_IOS_DIR: &str = "ios";
pub const DEFAULT_ANDROID_DIR: &str = "android";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetPlatform {
    Ios,
    Android,
    All,
}

impl TargetPlatform {
    pub fn includes_ios(self) -> bool {
        matches!(self, Self::Ios | Self::All)
    }

    pub fn includes_android(self) -> bool {
        matches!(self, Self::Android | Self::All)
    }
}

pub struct EnhancedCli {
    config: Option<BrikConfig>,
    start_time: Instant,
}

impl Default for EnhancedCli {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancedCli {
    pub fn new() -> Self {
        Self {
            config: None,
            start_time: Instant::now(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.start_time = Instant::now();
        let matches = Self::build_cli().get_matches();

        self.setup_logging(matches.get_count("verbose"));

        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = Some(BrikConfig::load(Path::new(config_path))?);
        }

        match matches.subcommand() {
            Some(("scan", sub_matches)) => handlers::handle_scan_command(self, sub_matches),
            Some(("build", sub_matches)) => handlers::handle_build_command(self, sub_matches),
            Some(("check", sub_matches)) => handlers::handle_check_command(self, sub_matches),
            Some(("clean", sub_matches)) => handlers::handle_clean_command(self, sub_matches),
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        }
    }

    pub fn build_cli() -> Command {
        Command::new(crate::NAME)
            .version(crate::VERSION)
            .about(crate::DESCRIPTION)
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path (.toml or .json)")
                    .global(true)
                    .action(ArgAction::Set),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Increase verbosity (can be used multiple times)")
                    .global(true)
                    .action(ArgAction::Count),
            )
            .subcommand(
                project_args(Command::new("scan").about("List the roots a project would compile to")),
            )
            .subcommand(
                project_args(Command::new("build").about("Compile sources to IR and generate native code"))
                    .arg(Arg::new("platform").short('p').long("platform").value_parser(clap::value_parser!(TargetPlatform)).default_value("all").help("Target platform"))
                    .arg(out_arg())
                    .arg(Arg::new("ios-dir").long("ios-dir").value_name("DIR").help("iOS project directory [default: ios]"))
                    .arg(Arg::new("android-dir").long("android-dir").value_name("DIR").help("Android project directory [default: android]"))
                    .arg(Arg::new("stats").long("stats").help("Print compilation statistics as JSON").action(ArgAction::SetTrue)),
            )
            .subcommand(
                project_args(Command::new("check").about("Compile and validate without writing anything")),
            )
            .subcommand(
                Command::new("clean")
                    .about("Remove the IR artifact directory")
                    .arg(root_arg())
                    .arg(out_arg()),
            )
    }

    fn setup_logging(&self, verbose_count: u8) {
        let log_level = match verbose_count {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        env_logger::Builder::from_default_env()
            .filter_level(log_level)
            .format_timestamp_secs()
            .init();
    }

    /// Explicit `--config` file, else one discovered in the project root
    pub fn resolve_config(&self, project_root: &Path) -> Result<BrikConfig> {
        if let Some(config) = &self.config {
            return Ok(config.clone());
        }
        Ok(BrikConfig::discover(project_root)?.unwrap_or_default())
    }

    /// Config values first, then command-line flags on top
    pub fn build_compiler_options(&self, matches: &ArgMatches, config: &BrikConfig) -> Result<CompilerOptions> {
        let mut options = CompilerOptions::for_project(project_root(matches));
        config.apply_to(&mut options);

        if flag(matches, "as-widget") {
            options.as_widget = true;
        }
        if flag(matches, "debug") {
            options.debug_mode = true;
        }
        if let Ok(Some(out)) = matches.try_get_one::<String>("out") {
            options.out_dir = PathBuf::from(out);
        }
        Ok(options)
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }
}

pub(crate) fn project_root(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<String>("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false)
}

fn root_arg() -> Arg {
    Arg::new("root")
        .help("Project root directory")
        .default_value(".")
        .index(1)
}

fn out_arg() -> Arg {
    Arg::new("out")
        .short('o')
        .long("out")
        .value_name("DIR")
        .help("IR artifact directory [default: .brik]")
}

fn project_args(command: Command) -> Command {
    command
        .arg(root_arg())
        .arg(Arg::new("as-widget").long("as-widget").help("Treat every plain root as a home-screen widget").action(ArgAction::SetTrue))
        .arg(Arg::new("debug").short('d').long("debug").help("Enable per-file debug logging").action(ArgAction::SetTrue))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub_matches(args: &[&str]) -> ArgMatches {
        let matches = EnhancedCli::build_cli().try_get_matches_from(args).unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        sub.clone()
    }

    #[test]
    fn test_cli_definition() {
        EnhancedCli::build_cli().debug_assert();
    }

    #[test]
    fn test_build_args() {
        let matches = sub_matches(&["brikc", "build", "app", "-p", "ios", "--as-widget", "-o", "out"]);
        assert_eq!(matches.get_one::<TargetPlatform>("platform"), Some(&TargetPlatform::Ios));

        let options = EnhancedCli::new()
            .build_compiler_options(&matches, &BrikConfig::default())
            .unwrap();
        assert_eq!(options.project_root, PathBuf::from("app"));
        assert_eq!(options.out_dir, PathBuf::from("out"));
        assert!(options.as_widget);
        assert!(!options.debug_mode);
    }

    #[test]
    fn test_flags_override_config() {
        let config = BrikConfig {
            out_dir: Some("from-config".into()),
            as_widget: Some(false),
            ..BrikConfig::default()
        };
        let matches = sub_matches(&["brikc", "check", "--as-widget"]);
        let options = EnhancedCli::new().build_compiler_options(&matches, &config).unwrap();
        assert_eq!(options.project_root, PathBuf::from("."));
        assert_eq!(options.out_dir, PathBuf::from("from-config"));
        assert!(options.as_widget);
    }

    #[test]
    fn test_clean_without_project_flags() {
        let matches = sub_matches(&["brikc", "clean", "-o", "tmp/ir"]);
        let options = EnhancedCli::new()
            .build_compiler_options(&matches, &BrikConfig::default())
            .unwrap();
        assert_eq!(options.artifact_dir(), PathBuf::from("./tmp/ir"));
        assert!(!options.as_widget);
    }

    #[test]
    fn test_target_platform() {
        assert!(TargetPlatform::All.includes_ios());
        assert!(TargetPlatform::All.includes_android());
        assert!(!TargetPlatform::Ios.includes_android());
    }
}
