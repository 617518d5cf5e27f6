//! CLI command implementations
//!
//! Commands are organized hierarchically:
//! - Top-level commands (version) are implemented in this file
//! - Subcommands with multiple actions are in subdirectories:
//!   - commands/config/ - Configuration management (init, validate, show, schema)

pub mod config;

/// Version command implementation
pub fn version_command(detailed: bool) {
    if detailed {
        println!("lintrc {}", lintrc_core::VERSION);
        println!("Build information:");
        println!("  Target: {}", std::env::consts::ARCH);
        println!("  OS: {}", std::env::consts::OS);
        if let Ok(profile) = std::env::var("PROFILE") {
            println!("  Profile: {profile}");
        }
    } else {
        println!("{}", lintrc_core::VERSION);
    }
}
