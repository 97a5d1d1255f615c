// Integration tests for employee-directory

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use employee_directory::backend::{Employee, EmployeeDraft, EmployeeSource, MemoryAdapter, Status};
use employee_directory::directory::{Answer, DeleteOutcome, Directory};
use employee_directory::error::{Result, simple_error};

fn temp_path(tag: &str) -> String {
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    path.push(format!("empdir_{tag}_{}_{}.conf", std::process::id(), nonce));
    path.to_string_lossy().to_string()
}

fn seeded_directory() -> Directory {
    let mut d = Directory::new(Box::new(MemoryAdapter::seeded()));
    d.load().expect("memory load");
    d
}

fn emp(id: &str, name: &str) -> Employee {
    Employee {
        id: id.into(),
        name: name.into(),
        email: format!("{}@co.com", name.to_lowercase()),
        status: Status::Active,
        phone: String::new(),
        department: String::new(),
        updated: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    }
}

// A source that lists fine but fails or refuses every write.
struct FailingSource {
    refuse_delete: bool,
}

impl EmployeeSource for FailingSource {
    fn describe(&self) -> String {
        "failing".into()
    }
    fn list(&mut self) -> Result<Vec<Employee>> {
        Ok(vec![emp("1", "Kim"), emp("2", "Lee")])
    }
    fn create(&mut self, _draft: &EmployeeDraft) -> Result<Employee> {
        Err(simple_error("connection refused"))
    }
    fn update(&mut self, _id: &str, _draft: &EmployeeDraft) -> Result<Employee> {
        Err(simple_error("connection refused"))
    }
    fn delete(&mut self, _id: &str) -> Result<bool> {
        if self.refuse_delete {
            Ok(false)
        } else {
            Err(simple_error("connection refused"))
        }
    }
}

// A source whose server is unreachable.
struct OfflineSource;

impl EmployeeSource for OfflineSource {
    fn describe(&self) -> String {
        "offline".into()
    }
    fn list(&mut self) -> Result<Vec<Employee>> {
        Err(simple_error("connection refused"))
    }
    fn create(&mut self, _draft: &EmployeeDraft) -> Result<Employee> {
        Err(simple_error("connection refused"))
    }
    fn update(&mut self, _id: &str, _draft: &EmployeeDraft) -> Result<Employee> {
        Err(simple_error("connection refused"))
    }
    fn delete(&mut self, _id: &str) -> Result<bool> {
        Err(simple_error("connection refused"))
    }
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use employee_directory::app::Theme;

    let path_str = temp_path("theme");
    let t = Theme::mocha();
    t.write_file(&path_str).expect("write theme");
    let t2 = Theme::from_file(&path_str).expect("read theme");
    assert_eq!(t.text, t2.text);
    assert_eq!(t.badge_active, t2.badge_active);
    assert_eq!(t.badge_inactive, t2.badge_inactive);

    let init_path = temp_path("theme_init");
    let _ = std::fs::remove_file(&init_path);
    let _created = Theme::load_or_init(&init_path);
    assert!(PathBuf::from(&init_path).exists());

    let _ = std::fs::remove_file(&path_str);
    let _ = std::fs::remove_file(&init_path);
}

// 2) Keybindings survive a write/read cycle
#[test]
fn keybinds_roundtrip() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use employee_directory::app::keymap::{KeyAction, Keymap};
    use employee_directory::search::SortField;

    let path_str = temp_path("keybinds");
    let km = Keymap::parse("AddEmployee = Ctrl+n\nSortByUpdated = u\n");
    km.write_file(&path_str).expect("write keybinds");
    let km2 = Keymap::from_file(&path_str).expect("read keybinds");
    let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
    assert_eq!(km2.resolve(&ctrl_n), Some(KeyAction::AddEmployee));
    let u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE);
    assert_eq!(km2.resolve(&u), Some(KeyAction::SortBy(SortField::Updated)));
    let _ = std::fs::remove_file(&path_str);
}

// 3) View preferences round trip and apply
#[test]
fn view_config_roundtrip_and_apply() {
    use employee_directory::app::viewconf::ViewConfig;
    use employee_directory::search::{SortDirection, SortField, SortSpec, StatusFilter};

    let path_str = temp_path("view");
    let cfg = ViewConfig {
        status: StatusFilter::Only(Status::Active),
        sort: SortSpec {
            field: SortField::Updated,
            direction: SortDirection::Descending,
        },
    };
    cfg.write_file(&path_str).expect("write view");
    let loaded = ViewConfig::from_file(&path_str).expect("read view");
    assert_eq!(loaded, cfg);

    let mut d = seeded_directory();
    d.next_page();
    loaded.apply_to(&mut d);
    assert_eq!(d.page_index(), 0);
    assert_eq!(d.sort(), cfg.sort);
    assert_eq!(ViewConfig::from_directory(&d), cfg);
    let _ = std::fs::remove_file(&path_str);
}

// 4) Add puts the new record first and shows page 1
#[test]
fn add_prepends_and_resets_page() {
    let mut d = Directory::new(Box::new(MemoryAdapter::new(vec![
        emp("1", "Kim"),
        emp("2", "Zed"),
    ])));
    d.load().unwrap();
    let draft = EmployeeDraft {
        name: "Jane Doe".into(),
        email: "jane@co.com".into(),
        ..Default::default()
    };
    let saved = d.add(&draft).expect("add");
    assert_eq!(d.records()[0].id, saved.id);
    assert_eq!(d.page_index(), 0);
    let view = d.view();
    assert_eq!(view.rows[0].name, "Jane Doe");
    assert_eq!(view.rows[0].status, Status::Active);
}

// 5) Delete asks first; only a yes removes the row
#[test]
fn delete_requires_confirmation() {
    let mut d = seeded_directory();
    let before = d.records().to_vec();

    let mut asked = String::new();
    let outcome = d
        .delete("3", &mut |m: &str| {
            asked = m.to_string();
            false
        })
        .unwrap();
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(asked, "Are you sure you want to delete Emma Williams?");
    assert_eq!(d.records(), before.as_slice());

    let outcome = d.delete("3", &mut Answer(true)).unwrap();
    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(d.records().len(), before.len() - 1);
    assert!(d.get("3").is_none());
    let remaining: Vec<&Employee> = before.iter().filter(|e| e.id != "3").collect();
    assert!(d.records().iter().zip(remaining).all(|(a, b)| a == b));
}

// 6) Edit keeps id and position
#[test]
fn edit_replaces_in_place() {
    let mut d = seeded_directory();
    let pos = d.records().iter().position(|e| e.id == "5").unwrap();
    let mut draft = d.get("5").unwrap().to_draft();
    draft.department = "Legal".into();
    draft.status = Status::Passive;
    d.update("5", &draft).expect("update");
    let after = &d.records()[pos];
    assert_eq!(after.id, "5");
    assert_eq!(after.department, "Legal");
    assert_eq!(after.status, Status::Passive);
    assert_eq!(d.records().len(), 24);
}

// 7) Filter, query and sort changes always go back to page 1
#[test]
fn view_changes_reset_page() {
    use employee_directory::search::{SortField, StatusFilter};

    let mut d = seeded_directory();
    d.last_page();
    assert_eq!(d.page_index(), 2);
    d.set_status_filter(StatusFilter::Only(Status::Active));
    assert_eq!(d.page_index(), 0);
    d.next_page();
    d.toggle_sort(SortField::Email);
    assert_eq!(d.page_index(), 0);
    d.next_page();
    d.set_query("engineering");
    assert_eq!(d.page_index(), 0);
    assert_eq!(d.view().matched, 6);
}

// 8) Failed writes leave the table untouched
#[test]
fn failed_writes_leave_state_unchanged() {
    let mut d = Directory::new(Box::new(FailingSource { refuse_delete: false }));
    d.load().unwrap();
    let before = d.records().to_vec();
    let draft = EmployeeDraft {
        name: "Jane".into(),
        email: "jane@co.com".into(),
        ..Default::default()
    };
    assert!(d.add(&draft).is_err());
    assert!(d.update("1", &draft).is_err());
    assert!(d.delete("1", &mut Answer(true)).is_err());
    assert_eq!(d.records(), before.as_slice());

    let mut d = Directory::new(Box::new(FailingSource { refuse_delete: true }));
    d.load().unwrap();
    assert_eq!(d.delete("2", &mut Answer(true)).unwrap(), DeleteOutcome::Rejected);
    assert_eq!(d.records().len(), 2);
}

// 9) Render smoke test on a test backend
#[test]
fn render_table_and_modals() {
    use employee_directory::app::form::EmployeeForm;
    use employee_directory::app::{AppState, ModalState};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    let mut app = AppState::new(seeded_directory());
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| employee_directory::ui::render(f, &app)).unwrap();
    let text = screen(&terminal);
    assert!(text.contains("Full Name ▲"));
    assert!(text.contains("Page 1 of 3"));
    assert!(text.contains("Abigail Lee"));

    app.open_modal(ModalState::Form(EmployeeForm::add()));
    terminal.draw(|f| employee_directory::ui::render(f, &app)).unwrap();
    assert!(screen(&terminal).contains("Add New Employee"));

    app.open_modal(ModalState::Help { scroll: 0 });
    terminal.draw(|f| employee_directory::ui::render(f, &app)).unwrap();
    assert!(screen(&terminal).contains("Help"));
}

// 10) An empty table still renders a placeholder row and page 1 of 1
#[test]
fn render_empty_table() {
    use employee_directory::app::AppState;
    use ratatui::{Terminal, backend::TestBackend};

    let mut d = seeded_directory();
    d.set_query("no such person");
    let app = AppState::new(d);
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|f| employee_directory::ui::render(f, &app)).unwrap();
    let buf = terminal.backend().buffer().clone();
    let text: String = buf.content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("No records found."));
    assert!(text.contains("Page 1 of 1"));
}

// 11) A failed initial load leaves an empty first page
#[test]
fn failed_load_leaves_empty_table() {
    use employee_directory::app::AppState;
    use ratatui::{Terminal, backend::TestBackend};

    let mut d = Directory::new(Box::new(OfflineSource));
    assert!(d.load().is_err());
    assert!(d.records().is_empty());
    assert_eq!(d.page_index(), 0);
    assert!(!d.next_page());

    let app = AppState::new(d);
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|f| employee_directory::ui::render(f, &app)).unwrap();
    let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("No records found."));
    assert!(text.contains("Page 1 of 1"));
}

// 12) A very long error message still renders inside the info modal
#[test]
fn long_info_message_renders() {
    use employee_directory::app::{AppState, ModalState};
    use ratatui::{Terminal, backend::TestBackend};

    let mut app = AppState::new(seeded_directory());
    app.open_modal(ModalState::Info {
        message: "x".repeat(100_000),
    });
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| employee_directory::ui::render(f, &app)).unwrap();
    let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
    assert!(text.contains("Info"));
}
