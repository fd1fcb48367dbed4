//! Basic logger usage example
//!
//! Demonstrates an explicit logger handle, both message styles, silent
//! entries, and the process-wide default logger.
//!
//! Run with: cargo run --example basic_usage

use flog::prelude::*;
use flog::{info, warn};

fn main() -> Result<()> {
    println!("=== flog - Basic Usage Example ===\n");

    let folder = std::env::temp_dir().join("flog_basic_usage");
    let logger = Logger::builder().log_folder(&folder).file_prefix("demo_").build()?;

    println!("1. Logging at different levels:");
    logger.panic(&args!["This is a panic message (the process keeps running)"]);
    logger.error(&args!["This is an error message"]);
    logger.warn(&args!["This is a warning message"]);
    logger.info(&args!["This is an info message"]);
    logger.debug(&args!["This is a debug message"]);
    logger.success(&args!["This is a success message"]);

    println!("\n2. Message styles:");
    logger.info(&args!["joined:", 3, "values", true]);
    logger.info(&args!["printf: %s took %.1fms", "query", 12.345]);
    logger.successf("template: !1 finished in !2s", &args!["build", 42]);
    let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    logger.errorf("template with an error: !1", &args![error_arg(&err)]);

    println!("\n3. Silent entries go to the file only:");
    logger.sinfo(&args!["You will not see this on the console"]);
    info!(logger, "Macros work too:", "join", "style");
    warn!(logger, "silent macro"; silent);

    logger.cleanup()?;
    for (level, path) in logger.log_files() {
        println!("   {:<7} -> {}", level, path.display());
    }

    println!("\n4. Default logger:");
    flog::init(Config::default().with_log_folder(&folder))?;
    flog::info(&args!["Logged through the default instance"]);
    flog::cleanup()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
