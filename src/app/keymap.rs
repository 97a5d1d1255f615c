//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! This module manages keyboard shortcuts for the table screen. It supports:
//! - Loading custom keybindings from a config file (`keybinds.conf`)
//! - Providing sensible defaults if no config is present
//! - Resolving key presses (with modifiers) to semantic actions
//! - Exporting the current keymap back to a file for reference or customization

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::search::SortField;

/// Semantic keyboard actions that can be bound to key combinations.
///
/// Multiple key combinations can map to the same action (both 'j' and Down
/// move down, for instance).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Focus the search box.
    StartSearch,
    /// Open the status dropdown.
    OpenFilterMenu,
    /// Display the help/keybindings reference.
    OpenHelp,
    /// Open the Add Employee form.
    AddEmployee,
    /// Open the Edit form for the selected row.
    EditSelection,
    /// Ask to delete the selected row.
    DeleteSelection,
    /// Header click on a column: sort by it, or flip direction if already active.
    SortBy(SortField),
    /// Flip the direction of the active sort.
    ReverseSort,
    /// Re-fetch the record set from the backend.
    Reload,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    /// Ignore this key (used for keys that shouldn't trigger anything).
    Ignore,
}

/// Manages keybinding configuration and key-to-action resolution.
#[derive(Clone, Debug)]
pub struct Keymap {
    /// Canonical mapping from (modifiers, code) to action.
    bindings: std::collections::HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Create a keymap with default keybindings.
    ///
    /// Arrow keys and vim-style keys for navigation, digits 1-6 for the
    /// sortable column headers, single letters for the row actions.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = std::collections::HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('f')), KeyAction::OpenFilterMenu);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::NONE, Char('a')), KeyAction::AddEmployee);
        bindings.insert((M::NONE, Char('n')), KeyAction::AddEmployee);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        for (digit, field) in ('1'..='6').zip(SortField::ALL) {
            bindings.insert((M::NONE, Char(digit)), KeyAction::SortBy(field));
        }
        bindings.insert((M::NONE, Char('s')), KeyAction::ReverseSort);
        // Some terminals report uppercase letters with SHIFT, some without
        bindings.insert((M::NONE, Char('R')), KeyAction::Reload);
        bindings.insert((M::SHIFT, Char('R')), KeyAction::Reload);

        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        bindings.insert((M::NONE, Home), KeyAction::FirstPage);
        bindings.insert((M::NONE, End), KeyAction::LastPage);

        Self { bindings }
    }

    /// Load a keymap from a file, or create defaults if the file doesn't exist.
    ///
    /// Looks at `path` first, then in the user config directory. If neither
    /// exists, writes the defaults to `path` for future customization.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        if let Some(existing) = crate::app::config_file_read_path("keybinds.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default keybinds");
        }
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// The file uses `<Action> = <KeySpec>` lines (the reversed
    /// `<KeySpec> = <Action>` form is accepted too). Defaults are kept and
    /// overridden by the file's bindings.
    ///
    /// Returns `None` if the file cannot be read.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse keybinding lines on top of the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
                continue;
            }
            tracing::debug!(line, "ignoring unrecognized keybinding");
        }
        map
    }

    /// Write the current keymap to a configuration file, sorted by action
    /// name so the file is stable across runs.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        std::fs::write(path, self.render())
    }

    fn render(&self) -> String {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# employee-directory keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Tab, BackTab, Up, Down, Left, Right, PageUp, PageDown, Home, End, Delete, /, 1\n\n");

        let mut lines: Vec<(String, String)> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a != KeyAction::Ignore)
            .map(|((mods, code), action)| {
                (format_action(*action), Self::format_key(*mods, *code))
            })
            .collect();
        lines.sort();
        for (action, key) in lines {
            let _ = writeln!(&mut buf, "{} = {}", action, key);
        }
        buf
    }

    /// Resolve a key event to its corresponding action.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Return a snapshot of all bindings as ((modifiers, code), action) pairs.
    pub fn all_bindings(&self) -> Vec<((KeyModifiers, KeyCode), KeyAction)> {
        self.bindings.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Keys bound to `action`, formatted and sorted, for help screens.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((m, c), _)| Self::format_key(*m, *c))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key (modifiers + code) into a human-readable spec like "Ctrl+c", "PageUp".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let mut rest = s;
    let mut mods = KeyModifiers::NONE;
    if let Some(after) = s.strip_prefix("Ctrl+") {
        mods |= KeyModifiers::CONTROL;
        rest = after;
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    if let Some(field) = s.strip_prefix("SortBy") {
        return SortField::parse(field).map(KeyAction::SortBy);
    }
    match s {
        "Quit" => Some(KeyAction::Quit),
        "StartSearch" => Some(KeyAction::StartSearch),
        "OpenFilterMenu" => Some(KeyAction::OpenFilterMenu),
        "OpenHelp" => Some(KeyAction::OpenHelp),
        "AddEmployee" => Some(KeyAction::AddEmployee),
        "EditSelection" => Some(KeyAction::EditSelection),
        "DeleteSelection" => Some(KeyAction::DeleteSelection),
        "ReverseSort" => Some(KeyAction::ReverseSort),
        "Reload" => Some(KeyAction::Reload),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PrevPage" => Some(KeyAction::PrevPage),
        "NextPage" => Some(KeyAction::NextPage),
        "FirstPage" => Some(KeyAction::FirstPage),
        "LastPage" => Some(KeyAction::LastPage),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}

pub fn format_action(a: KeyAction) -> String {
    match a {
        KeyAction::Quit => "Quit".to_string(),
        KeyAction::StartSearch => "StartSearch".to_string(),
        KeyAction::OpenFilterMenu => "OpenFilterMenu".to_string(),
        KeyAction::OpenHelp => "OpenHelp".to_string(),
        KeyAction::AddEmployee => "AddEmployee".to_string(),
        KeyAction::EditSelection => "EditSelection".to_string(),
        KeyAction::DeleteSelection => "DeleteSelection".to_string(),
        KeyAction::SortBy(field) => {
            let key = field.key();
            let mut chars = key.chars();
            let capitalized: String = chars
                .next()
                .map(|c| c.to_ascii_uppercase())
                .into_iter()
                .chain(chars)
                .collect();
            format!("SortBy{capitalized}")
        }
        KeyAction::ReverseSort => "ReverseSort".to_string(),
        KeyAction::Reload => "Reload".to_string(),
        KeyAction::MoveUp => "MoveUp".to_string(),
        KeyAction::MoveDown => "MoveDown".to_string(),
        KeyAction::PrevPage => "PrevPage".to_string(),
        KeyAction::NextPage => "NextPage".to_string(),
        KeyAction::FirstPage => "FirstPage".to_string(),
        KeyAction::LastPage => "LastPage".to_string(),
        KeyAction::Ignore => "Ignore".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_sort_columns_by_default() {
        let km = Keymap::default();
        let key = KeyEvent::new(KeyCode::Char('6'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&key), Some(KeyAction::SortBy(SortField::Updated)));
    }

    #[test]
    fn parse_overrides_defaults_both_forms() {
        let km = Keymap::parse("AddEmployee = Ctrl+n\nx = Quit\n# comment\ngarbage\n");
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(km.resolve(&ctrl_n), Some(KeyAction::AddEmployee));
        assert_eq!(km.resolve(&x), Some(KeyAction::Quit));
    }

    #[test]
    fn sort_action_names_round_trip() {
        for field in SortField::ALL {
            let name = format_action(KeyAction::SortBy(field));
            assert_eq!(parse_action(&name), Some(KeyAction::SortBy(field)));
        }
    }

    #[test]
    fn rendered_file_parses_back_to_same_bindings() {
        let km = Keymap::default();
        let back = Keymap::parse(&km.render());
        let mut a = km.all_bindings();
        let mut b = back.all_bindings();
        a.sort_by_key(|((m, c), _)| (m.bits(), format!("{c:?}")));
        b.sort_by_key(|((m, c), _)| (m.bits(), format!("{c:?}")));
        assert_eq!(a, b);
    }
}
