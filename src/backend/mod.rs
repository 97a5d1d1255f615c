//! Data sources for employee records.
//!
//! Every backend implements [`EmployeeSource`]; the directory only ever talks
//! to that trait, so the REST profiles and the in-memory dataset are
//! interchangeable at startup.

pub mod memory;
pub mod model;
pub mod rest;

pub use memory::MemoryAdapter;
pub use model::{Employee, EmployeeDraft, Status};
pub use rest::{ApiProfile, RestAdapter};

use crate::error::Result;

/// List/create/update/delete of the single employee resource.
///
/// Implementations surface every transport failure as `Err`; callers decide
/// whether to log, report or ignore it. Nothing here filters, sorts or pages.
pub trait EmployeeSource {
    /// Short label shown in the header bar.
    fn describe(&self) -> String;

    fn list(&mut self) -> Result<Vec<Employee>>;

    fn create(&mut self, draft: &EmployeeDraft) -> Result<Employee>;

    fn update(&mut self, id: &str, draft: &EmployeeDraft) -> Result<Employee>;

    /// `Ok(false)` means the backend answered but did not delete.
    fn delete(&mut self, id: &str) -> Result<bool>;
}

/// Which backend to open at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Seeded in-memory dataset, no network.
    Memory,
    /// REST API under `/api/v1/employees`.
    Rest,
    /// Older REST API under `/api/employees`.
    Legacy,
}

/// Construct the source for `backend`, overriding the profile's base URL if given.
pub fn open_source(backend: Backend, base_url: Option<&str>) -> Result<Box<dyn EmployeeSource>> {
    let source: Box<dyn EmployeeSource> = match backend {
        Backend::Memory => Box::new(MemoryAdapter::seeded()),
        Backend::Rest => Box::new(RestAdapter::new(ApiProfile::V1, base_url)?),
        Backend::Legacy => Box::new(RestAdapter::new(ApiProfile::Legacy, base_url)?),
    };
    tracing::info!(backend = %source.describe(), "opened employee source");
    Ok(source)
}
