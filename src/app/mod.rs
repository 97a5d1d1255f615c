//! Application state types and entry glue.
//!
//! Defines the enums and structs that model the TUI state around the
//! [`Directory`], helpers to locate config files, and the event loop entry
//! point (re-exported as `run`).
//!
pub mod form;
pub mod keymap;
pub mod update;
pub mod viewconf;

use ratatui::style::Color;
use std::time::Instant;

use crate::backend::Employee;
use crate::directory::Directory;
use form::EmployeeForm;
use keymap::Keymap;

/// Name of the per-user config directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "employee-directory";

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search box; every keystroke re-filters.
    Search,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub badge_active: Color,
    pub badge_inactive: Color,
    pub error: Color,
}

impl Theme {
    /// Dark default theme.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            badge_active: Color::Green,
            badge_inactive: Color::Red,
            error: Color::LightRed,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            badge_active: Color::Rgb(0xa6, 0xe3, 0xa1), // green
            badge_inactive: Color::Rgb(0xf3, 0x8b, 0xa8), // red
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "badge_active" => theme.badge_active = color,
                    "badge_inactive" => theme.badge_inactive = color,
                    "error" => theme.error = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or special names: "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        None
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# employee-directory theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors get a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(i) => format!("index:{}", i),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("badge_active", self.badge_active);
        kv("badge_inactive", self.badge_inactive);
        kv("error", self.error);

        std::fs::write(path, buf)
    }

    /// Ensure a config file exists; if missing, write one with the current default theme and return it.
    /// If present, load from it; on read errors, return `mocha`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = config_file_read_path("theme.conf") {
            return Self::from_file(&existing).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default theme");
        }
        t
    }
}

/// Look for `name` in the per-user config directory.
pub fn config_file_read_path(name: &str) -> Option<String> {
    let path = dirs::config_dir()?.join(CONFIG_DIR_NAME).join(name);
    path.exists().then(|| path.to_string_lossy().to_string())
}

/// Modal dialog states.
#[derive(Clone, Debug)]
pub enum ModalState {
    /// Add or edit form.
    Form(EmployeeForm),
    /// Yes/No before deleting. `selected`: 0 = Yes, 1 = No.
    DeleteConfirm {
        id: String,
        name: String,
        selected: usize,
    },
    /// Status dropdown; `selected` indexes `StatusFilter::CHOICES`.
    FilterMenu {
        selected: usize,
    },
    Info {
        message: String,
    },
    Help {
        scroll: u16,
    },
}

pub struct AppState {
    pub started_at: Instant,
    pub directory: Directory,
    /// Selected row within the visible page.
    pub selected_row: usize,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    /// One-line feedback shown in the status bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Wrap a directory with default theme and keybindings.
    pub fn new(directory: Directory) -> Self {
        Self::with_config(directory, Theme::mocha(), Keymap::default())
    }

    pub fn with_config(directory: Directory, theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            directory,
            selected_row: 0,
            input_mode: InputMode::Normal,
            theme,
            keymap,
            modal: None,
            status_message: None,
        }
    }

    /// The record under the cursor on the visible page.
    pub fn selected_employee(&self) -> Option<Employee> {
        self.directory.view().rows.get(self.selected_row).cloned()
    }

    /// Keep the cursor on an existing row after the page contents change.
    pub fn clamp_selection(&mut self) {
        let len = self.directory.view().rows.len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    pub fn open_modal(&mut self, modal: ModalState) {
        self.modal = Some(modal);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    /// Show a failure both in the status bar and as an Info modal.
    pub fn report_error(&mut self, what: &str, err: &dyn std::fmt::Display) {
        let message = format!("{what}: {err}");
        self.status_message = Some(message.clone());
        self.open_modal(ModalState::Info { message });
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
