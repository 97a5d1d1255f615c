//! Add/Edit employee form: field state, focus movement and submit-time validation.

use std::sync::OnceLock;

use regex::Regex;

use crate::backend::{Employee, EmployeeDraft, Status};

/// Whether the form creates a new record or edits an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

/// Focusable rows of the form, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Status,
    Phone,
    Department,
    Submit,
    Cancel,
}

impl FormField {
    pub const ORDER: [FormField; 7] = [
        FormField::Name,
        FormField::Email,
        FormField::Status,
        FormField::Phone,
        FormField::Department,
        FormField::Submit,
        FormField::Cancel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Full Name",
            FormField::Email => "Email Address",
            FormField::Status => "Status",
            FormField::Phone => "Phone",
            FormField::Department => "Department",
            FormField::Submit => "Submit",
            FormField::Cancel => "Cancel",
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Per-field messages from the last failed submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"))
}

/// Loose `text@text.text` check, the same one the form applies on submit.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Validate the two required fields.
pub fn validate(draft: &EmployeeDraft) -> FormErrors {
    let mut errors = FormErrors::default();
    if draft.name.trim().is_empty() {
        errors.name = Some("Name is required".to_string());
    }
    let email = draft.email.trim();
    if email.is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.email = Some("Email is invalid".to_string());
    }
    errors
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeForm {
    pub mode: FormMode,
    pub draft: EmployeeDraft,
    pub focus: FormField,
    pub errors: FormErrors,
}

impl EmployeeForm {
    /// Blank form; status defaults to Active.
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            draft: EmployeeDraft {
                status: Status::Active,
                ..Default::default()
            },
            focus: FormField::Name,
            errors: FormErrors::default(),
        }
    }

    /// Form pre-populated from `employee`.
    pub fn edit(employee: &Employee) -> Self {
        Self {
            mode: FormMode::Edit {
                id: employee.id.clone(),
            },
            draft: employee.to_draft(),
            focus: FormField::Name,
            errors: FormErrors::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Employee",
            FormMode::Edit { .. } => "Edit Employee",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add",
            FormMode::Edit { .. } => "Save",
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Email => &self.draft.email,
            FormField::Status => self.draft.status.as_str(),
            FormField::Phone => &self.draft.phone,
            FormField::Department => &self.draft.department,
            FormField::Submit | FormField::Cancel => "",
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Phone => Some(&mut self.draft.phone),
            FormField::Department => Some(&mut self.draft.department),
            FormField::Status | FormField::Submit | FormField::Cancel => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type into the focused text field. Space on the status row toggles it.
    pub fn input_char(&mut self, c: char) {
        if let Some(text) = self.text_mut() {
            text.push(c);
        } else if self.focus == FormField::Status && c == ' ' {
            self.toggle_status();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub fn toggle_status(&mut self) {
        self.draft.status = self.draft.status.toggled();
    }

    /// Validate and, when valid, hand back the draft. On failure the
    /// per-field errors are kept for display and nothing is emitted.
    pub fn submit(&mut self) -> Option<EmployeeDraft> {
        self.errors = validate(&self.draft);
        if self.errors.is_empty() {
            Some(self.draft.clone())
        } else {
            self.focus = if self.errors.name.is_some() {
                FormField::Name
            } else {
                FormField::Email
            };
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(form: &mut EmployeeForm, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn blank_add_reports_both_errors() {
        let mut form = EmployeeForm::add();
        assert!(form.submit().is_none());
        assert_eq!(form.errors.name.as_deref(), Some("Name is required"));
        assert_eq!(form.errors.email.as_deref(), Some("Email is required"));
        assert_eq!(form.focus, FormField::Name);
    }

    #[test]
    fn malformed_email_is_invalid() {
        let mut form = EmployeeForm::add();
        type_str(&mut form, "Bob");
        form.focus_next();
        type_str(&mut form, "bob");
        assert!(form.submit().is_none());
        assert!(form.errors.name.is_none());
        assert_eq!(form.errors.email.as_deref(), Some("Email is invalid"));
        assert_eq!(form.focus, FormField::Email);
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let errors = validate(&EmployeeDraft {
            name: "   ".into(),
            email: "a@b.co".into(),
            ..Default::default()
        });
        assert!(errors.name.is_some());
        assert!(errors.email.is_none());
    }

    #[test]
    fn valid_form_emits_draft() {
        let mut form = EmployeeForm::add();
        type_str(&mut form, "Jane Doe");
        form.focus_next();
        type_str(&mut form, "jane@co.com");
        let draft = form.submit().expect("valid");
        assert_eq!(draft.name, "Jane Doe");
        assert_eq!(draft.status, Status::Active);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn status_row_toggles_with_space_and_ignores_text() {
        let mut form = EmployeeForm::add();
        form.focus = FormField::Status;
        form.input_char('x');
        assert_eq!(form.draft.status, Status::Active);
        form.input_char(' ');
        assert_eq!(form.draft.status, Status::Passive);
    }

    #[test]
    fn focus_wraps_around() {
        assert_eq!(FormField::Cancel.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Cancel);
    }

    #[test]
    fn email_pattern_is_loose() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@."));
    }
}
