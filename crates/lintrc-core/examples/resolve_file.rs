use lintrc_core::ConfigLoader;
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    let path = env::args().nth(1).expect("usage: resolve_file <config> [preset-dir...]");
    let preset_dirs: Vec<PathBuf> = env::args().skip(2).map(PathBuf::from).collect();

    match ConfigLoader::load_resolved(Path::new(&path), &preset_dirs) {
        Ok(resolved) => {
            for warning in &resolved.warnings {
                eprintln!("  WARN {warning}");
            }
            println!("{}", serde_json::to_string_pretty(&resolved.effective).unwrap());
        }
        Err(err) => {
            eprintln!("{path}: {err}");
            std::process::exit(1);
        }
    }
}
