//! Brik Compiler Binary

use brikc::EnhancedCli;
use std::process;

fn main() {
    let mut cli = EnhancedCli::new();

    if let Err(e) = cli.run() {
        eprintln!("error[{}]: {}", e.code(), e);
        process::exit(1);
    }
}
