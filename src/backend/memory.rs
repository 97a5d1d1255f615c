use chrono::NaiveDate;

use super::model::{new_id, Employee, EmployeeDraft, Status};
use super::EmployeeSource;
use crate::error::{simple_error, Result};

/// In-memory employee store. Nothing leaves the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryAdapter {
    records: Vec<Employee>,
}

impl MemoryAdapter {
    pub fn new(records: Vec<Employee>) -> Self {
        Self { records }
    }

    /// Store pre-filled with [`seed_employees`].
    pub fn seeded() -> Self {
        Self::new(seed_employees())
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }
}

impl EmployeeSource for MemoryAdapter {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn list(&mut self) -> Result<Vec<Employee>> {
        Ok(self.records.clone())
    }

    fn create(&mut self, draft: &EmployeeDraft) -> Result<Employee> {
        let mut saved = Employee::from_draft(draft);
        while self.records.iter().any(|e| e.id == saved.id) {
            saved.id = new_id();
        }
        self.records.insert(0, saved.clone());
        Ok(saved)
    }

    fn update(&mut self, id: &str, draft: &EmployeeDraft) -> Result<Employee> {
        let slot = self
            .records
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| simple_error(format!("no employee with id {id}")))?;
        *slot = Employee::stamped(id, draft);
        Ok(slot.clone())
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|e| e.id != id);
        Ok(self.records.len() != before)
    }
}

/// Sample dataset used by the memory backend: 24 people, three pages.
pub fn seed_employees() -> Vec<Employee> {
    const ROWS: [(&str, &str, Status, &str, &str, (i32, u32, u32)); 24] = [
        ("Olivia Martin", "olivia.martin@acme.io", Status::Active, "+1 555-0101", "Engineering", (2024, 1, 15)),
        ("Liam Johnson", "liam.johnson@acme.io", Status::Active, "+1 555-0102", "Sales", (2024, 2, 3)),
        ("Emma Williams", "emma.williams@acme.io", Status::Passive, "+1 555-0103", "Marketing", (2023, 11, 20)),
        ("Noah Brown", "noah.brown@acme.io", Status::Active, "+1 555-0104", "", (2024, 3, 8)),
        ("Ava Jones", "ava.jones@acme.io", Status::Active, "+1 555-0105", "Finance", (2023, 9, 30)),
        ("Elijah Garcia", "elijah.garcia@acme.io", Status::Passive, "+1 555-0106", "Support", (2024, 4, 12)),
        ("Sophia Miller", "sophia.miller@acme.io", Status::Active, "+1 555-0107", "Engineering", (2024, 5, 1)),
        ("James Davis", "james.davis@acme.io", Status::Active, "", "HR", (2022, 12, 5)),
        ("Isabella Rodriguez", "isabella.rodriguez@acme.io", Status::Passive, "+1 555-0109", "Sales", (2024, 1, 22)),
        ("Benjamin Martinez", "benjamin.martinez@acme.io", Status::Active, "+1 555-0110", "Engineering", (2024, 6, 18)),
        ("Mia Hernandez", "mia.hernandez@acme.io", Status::Active, "+1 555-0111", "Marketing", (2023, 7, 14)),
        ("Lucas Lopez", "lucas.lopez@acme.io", Status::Passive, "+1 555-0112", "", (2023, 10, 2)),
        ("Charlotte Gonzalez", "charlotte.gonzalez@acme.io", Status::Active, "+1 555-0113", "Finance", (2024, 2, 27)),
        ("Henry Wilson", "henry.wilson@acme.io", Status::Active, "+1 555-0114", "Support", (2024, 3, 19)),
        ("Amelia Anderson", "amelia.anderson@acme.io", Status::Passive, "+1 555-0115", "HR", (2023, 8, 9)),
        ("Alexander Thomas", "alexander.thomas@acme.io", Status::Active, "+1 555-0116", "Engineering", (2024, 4, 30)),
        ("Harper Taylor", "harper.taylor@acme.io", Status::Active, "+1 555-0117", "Sales", (2024, 5, 21)),
        ("Daniel Moore", "daniel.moore@acme.io", Status::Passive, "+1 555-0118", "Marketing", (2022, 11, 11)),
        ("Evelyn Jackson", "evelyn.jackson@acme.io", Status::Active, "+1 555-0119", "Engineering", (2024, 6, 2)),
        ("Michael Martin", "michael.martin@acme.io", Status::Active, "+1 555-0120", "Finance", (2023, 12, 24)),
        ("Abigail Lee", "abigail.lee@acme.io", Status::Active, "+1 555-0121", "Support", (2024, 1, 3)),
        ("Sebastian Perez", "sebastian.perez@acme.io", Status::Passive, "+1 555-0122", "", (2023, 6, 6)),
        ("Emily Thompson", "emily.thompson@acme.io", Status::Active, "+1 555-0123", "HR", (2024, 2, 14)),
        ("Jack White", "jack.white@acme.io", Status::Active, "+1 555-0124", "Engineering", (2024, 3, 31)),
    ];

    ROWS.iter()
        .enumerate()
        .filter_map(|(i, (name, email, status, phone, department, (y, m, d)))| {
            Some(Employee {
                id: (i + 1).to_string(),
                name: name.to_string(),
                email: email.to_string(),
                status: *status,
                phone: phone.to_string(),
                department: department.to_string(),
                updated: NaiveDate::from_ymd_opt(*y, *m, *d)?,
            })
        })
        .collect()
}
