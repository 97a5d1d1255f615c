use std::path::PathBuf;

use clap::Parser;

use crate::backend::Backend;

#[derive(Debug, Parser)]
#[command(name = "employee-directory")]
#[command(about = "Browse and manage an employee directory", long_about = None)]
pub struct Cli {
    /// Where employee records come from
    #[arg(long, value_enum, env = "EMPDIR_BACKEND", default_value = "memory")]
    pub backend: Backend,

    /// Override the REST base URL of the selected profile
    #[arg(long, env = "EMPDIR_BASE_URL")]
    pub base_url: Option<String>,

    /// Theme file (created with defaults if missing)
    #[arg(long, env = "EMPDIR_THEME", default_value = "theme.conf")]
    pub theme: PathBuf,

    /// Keybindings file (created with defaults if missing)
    #[arg(long, env = "EMPDIR_KEYBINDS", default_value = "keybinds.conf")]
    pub keybinds: PathBuf,

    /// View preferences file, saved on quit
    #[arg(long, env = "EMPDIR_VIEW", default_value = "view.conf")]
    pub view: PathBuf,

    /// Log output; the terminal belongs to the TUI
    #[arg(long, env = "EMPDIR_LOG_FILE", default_value = "employee-directory.log")]
    pub log_file: PathBuf,
}
