//! Derivation pipeline: status filter, text query, sort, then pagination.
//!
//! Every function here is pure; the visible page is recomputed from the full
//! record set each time it is needed and is never stored.

use std::cmp::Ordering;

use crate::backend::{Employee, Status};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// Status dropdown value. `All` passes every record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub const CHOICES: [StatusFilter; 3] = [
        StatusFilter::All,
        StatusFilter::Only(Status::Active),
        StatusFilter::Only(Status::Passive),
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(s) => s.as_str(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(StatusFilter::All);
        }
        s.parse().ok().map(StatusFilter::Only)
    }

    pub fn matches(self, employee: &Employee) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => employee.status.as_str().eq_ignore_ascii_case(s.as_str()),
        }
    }
}

/// Sortable table columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Email,
    Status,
    Phone,
    Department,
    Updated,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Name,
        SortField::Email,
        SortField::Status,
        SortField::Phone,
        SortField::Department,
        SortField::Updated,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Status => "status",
            SortField::Phone => "phone",
            SortField::Department => "department",
            SortField::Updated => "updated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|f| f.key().eq_ignore_ascii_case(s))
    }

    fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            SortField::Name => cmp_text(&a.name, &b.name),
            SortField::Email => cmp_text(&a.email, &b.email),
            SortField::Status => a.status.cmp(&b.status),
            SortField::Phone => cmp_text(&a.phone, &b.phone),
            SortField::Department => cmp_text(&a.department, &b.department),
            SortField::Updated => a.updated.cmp(&b.updated),
        }
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortSpec {
    /// Header click: a new field sorts ascending, the active field flips.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.reversed(),
            }
        } else {
            Self {
                field,
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// The inputs of the pipeline besides the records themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub status: StatusFilter,
    pub query: String,
    pub sort: SortSpec,
    pub page_index: usize,
}

/// One derived page plus the numbers the pagination control needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<Employee>,
    pub page_index: usize,
    pub page_count: usize,
    /// Records left after filtering, across all pages.
    pub matched: usize,
}

impl TableView {
    pub fn has_prev(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// Case-insensitive substring match on name, email or department.
pub fn matches_query(employee: &Employee, query: &str) -> bool {
    let q = query.to_lowercase();
    if q.is_empty() {
        return true;
    }
    employee.name.to_lowercase().contains(&q)
        || employee.email.to_lowercase().contains(&q)
        || employee.department.to_lowercase().contains(&q)
}

/// Status filter then query filter, preserving collection order.
pub fn filter_records<'a>(records: &'a [Employee], status: StatusFilter, query: &str) -> Vec<&'a Employee> {
    records
        .iter()
        .filter(|e| status.matches(e))
        .filter(|e| matches_query(e, query))
        .collect()
}

/// Stable sort: ties keep collection order in both directions.
pub fn sort_records(rows: &mut [&Employee], sort: SortSpec) {
    rows.sort_by(|a, b| {
        let ord = sort.field.compare(a, b);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Clamp a page index into `0..page_count` (0 when there are no pages).
pub fn clamp_page(page_index: usize, len: usize) -> usize {
    page_index.min(page_count(len).saturating_sub(1))
}

pub fn paginate<T: Clone>(rows: &[T], page_index: usize) -> Vec<T> {
    let start = page_index.saturating_mul(PAGE_SIZE).min(rows.len());
    let end = (start + PAGE_SIZE).min(rows.len());
    rows[start..end].to_vec()
}

/// Filtered and sorted records, all pages.
pub fn filtered_sorted<'a>(records: &'a [Employee], params: &ViewParams) -> Vec<&'a Employee> {
    let mut rows = filter_records(records, params.status, &params.query);
    sort_records(&mut rows, params.sort);
    rows
}

/// Run the whole pipeline and return the requested page.
pub fn derive_view(records: &[Employee], params: &ViewParams) -> TableView {
    let rows = filtered_sorted(records, params);
    let page_index = clamp_page(params.page_index, rows.len());
    TableView {
        rows: paginate(&rows, page_index).into_iter().cloned().collect(),
        page_index,
        page_count: page_count(rows.len()),
        matched: rows.len(),
    }
}
