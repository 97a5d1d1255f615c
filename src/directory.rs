//! The table container: owns the record set and the view parameters, and runs
//! the add/edit/delete flows against an [`EmployeeSource`].

use crate::backend::{Employee, EmployeeDraft, EmployeeSource};
use crate::error::{simple_error, Result};
use crate::search::{self, SortField, SortSpec, StatusFilter, TableView, ViewParams};

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// A pre-recorded answer, e.g. the button picked in a confirmation modal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Outcome of a delete request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no; nothing was sent.
    Cancelled,
    /// The backend answered without deleting; local state is untouched.
    Rejected,
    Deleted,
}

pub struct Directory {
    source: Box<dyn EmployeeSource>,
    records: Vec<Employee>,
    params: ViewParams,
}

impl Directory {
    /// A directory with no records yet; call [`Directory::load`] to fill it.
    pub fn new(source: Box<dyn EmployeeSource>) -> Self {
        Self {
            source,
            records: Vec::new(),
            params: ViewParams::default(),
        }
    }

    /// Fetch the full record set. A failure is logged and leaves the table empty.
    pub fn load(&mut self) -> Result<usize> {
        match self.source.list() {
            Ok(records) => {
                tracing::info!(count = records.len(), "loaded employees");
                self.records = records;
                self.clamp_page();
                Ok(self.records.len())
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load employees");
                self.records.clear();
                self.params.page_index = 0;
                Err(e)
            }
        }
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&Employee> {
        self.records.iter().find(|e| e.id == id)
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.params.status
    }

    pub fn query(&self) -> &str {
        &self.params.query
    }

    pub fn sort(&self) -> SortSpec {
        self.params.sort
    }

    pub fn page_index(&self) -> usize {
        self.params.page_index
    }

    /// The visible page, derived fresh from the current state.
    pub fn view(&self) -> TableView {
        search::derive_view(&self.records, &self.params)
    }

    /// Filtered and sorted records across all pages.
    pub fn matching(&self) -> Vec<&Employee> {
        search::filtered_sorted(&self.records, &self.params)
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.params.status = status;
        self.params.page_index = 0;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.params.query = query.into();
        self.params.page_index = 0;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.params.sort = sort;
        self.params.page_index = 0;
    }

    /// Header click on `field`.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.set_sort(self.params.sort.toggled(field));
    }

    pub fn reverse_sort(&mut self) {
        let current = self.params.sort;
        self.set_sort(current.toggled(current.field));
    }

    fn page_count(&self) -> usize {
        self.view().page_count
    }

    pub fn next_page(&mut self) -> bool {
        if self.params.page_index + 1 < self.page_count() {
            self.params.page_index += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.params.page_index > 0 {
            self.params.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn first_page(&mut self) {
        self.params.page_index = 0;
    }

    pub fn last_page(&mut self) {
        self.params.page_index = self.page_count().saturating_sub(1);
    }

    fn clamp_page(&mut self) {
        let len = self.matching().len();
        self.params.page_index = search::clamp_page(self.params.page_index, len);
    }

    /// Create through the backend and prepend the saved record.
    pub fn add(&mut self, draft: &EmployeeDraft) -> Result<Employee> {
        let saved = self.source.create(draft).map_err(|e| {
            tracing::error!(error = %e, "failed to create employee");
            e
        })?;
        if self.get(&saved.id).is_some() {
            tracing::error!(id = %saved.id, "backend returned a duplicate id");
            return Err(simple_error(format!("duplicate employee id {}", saved.id)));
        }
        tracing::info!(id = %saved.id, name = %saved.name, "added employee");
        self.records.insert(0, saved.clone());
        self.params.page_index = 0;
        Ok(saved)
    }

    /// Update through the backend and replace the record in place.
    pub fn update(&mut self, id: &str, draft: &EmployeeDraft) -> Result<Employee> {
        let Some(pos) = self.records.iter().position(|e| e.id == id) else {
            return Err(simple_error(format!("no employee with id {id}")));
        };
        let mut saved = self.source.update(id, draft).map_err(|e| {
            tracing::error!(id, error = %e, "failed to update employee");
            e
        })?;
        if saved.id != id {
            tracing::warn!(id, returned = %saved.id, "backend changed the id on update; keeping ours");
            saved.id = id.to_string();
        }
        tracing::info!(id, "updated employee");
        self.records[pos] = saved.clone();
        // The edit may move the record out of the active filter
        self.clamp_page();
        Ok(saved)
    }

    /// Ask `confirm`, then delete through the backend. The record is removed
    /// only when the backend reports success.
    pub fn delete(&mut self, id: &str, confirm: &mut dyn Confirm) -> Result<DeleteOutcome> {
        let Some(target) = self.get(id) else {
            return Err(simple_error(format!("no employee with id {id}")));
        };
        let message = format!("Are you sure you want to delete {}?", target.name);
        if !confirm.confirm(&message) {
            tracing::debug!(id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }
        let deleted = self.source.delete(id).map_err(|e| {
            tracing::error!(id, error = %e, "failed to delete employee");
            e
        })?;
        if !deleted {
            tracing::warn!(id, "backend refused delete");
            return Ok(DeleteOutcome::Rejected);
        }
        self.records.retain(|e| e.id != id);
        self.clamp_page();
        tracing::info!(id, "deleted employee");
        Ok(DeleteOutcome::Deleted)
    }
}
