//! Employee record model and its lenient JSON representation.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Employment status shown as a badge in the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    #[default]
    Active,
    Passive,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Active, Status::Passive];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Passive => "Passive",
        }
    }

    /// The other status; used by the form's status selector.
    pub fn toggled(self) -> Self {
        match self {
            Status::Active => Status::Passive,
            Status::Passive => Status::Active,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "passive" => Ok(Status::Passive),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|_| {
            tracing::warn!(status = %raw, "unknown status; treating as Passive");
            Status::Passive
        }))
    }
}

/// A single employee as held by the directory and exchanged with backends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub department: String,
    #[serde(serialize_with = "ser_date", deserialize_with = "de_date")]
    pub updated: NaiveDate,
}

/// The editable part of an employee, as collected by the add/edit forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub status: Status,
    pub phone: String,
    pub department: String,
}

impl Employee {
    /// Build a record from a draft with the given id, stamped with today's date.
    pub fn stamped(id: impl Into<String>, draft: &EmployeeDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            status: draft.status,
            phone: draft.phone.trim().to_string(),
            department: draft.department.trim().to_string(),
            updated: today(),
        }
    }

    /// Build a brand new record with a client-generated identifier.
    pub fn from_draft(draft: &EmployeeDraft) -> Self {
        Self::stamped(new_id(), draft)
    }

    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            status: self.status,
            phone: self.phone.clone(),
            department: self.department.clone(),
        }
    }
}

/// Client-side identifier for records created before the backend answers.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse the date forms backends are known to send: ISO dates, RFC 3339
/// timestamps and the US locale `M/D/YYYY` form.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

fn ser_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

fn de_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn de_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_lenient_record() {
        let json = r#"{"id": 42, "name": "Ann", "email": "ann@co.com", "status": "active",
            "phone": null, "updated": "3/14/2024"}"#;
        let e: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(e.id, "42");
        assert_eq!(e.status, Status::Active);
        assert_eq!(e.phone, "");
        assert_eq!(e.department, "");
        assert_eq!(e.updated, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
    }

    #[test]
    fn unknown_status_decodes_as_passive() {
        let json = r#"[
            {"id": 1, "name": "Ann", "email": "ann@co.com", "status": "Active", "updated": "2024-01-02"},
            {"id": 2, "name": "Bo", "email": "bo@co.com", "status": "Inactive", "updated": "2024-01-03"}
        ]"#;
        let list: Vec<Employee> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].status, Status::Active);
        assert_eq!(list[1].status, Status::Passive);
    }

    #[test]
    fn encodes_iso_date_and_pascal_status() {
        let e = Employee {
            id: "a1".into(),
            name: "Bo".into(),
            email: "bo@co.com".into(),
            status: Status::Passive,
            phone: String::new(),
            department: "Ops".into(),
            updated: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["updated"], "2023-01-02");
        assert_eq!(v["status"], "Passive");
    }

    #[test]
    fn parse_date_accepts_rfc3339() {
        assert_eq!(
            parse_date("2024-06-01T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 6, 1)
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("retired".parse::<Status>().is_err());
    }

    #[test]
    fn stamped_trims_fields() {
        let draft = EmployeeDraft {
            name: "  Jane Doe ".into(),
            email: " jane@co.com".into(),
            ..Default::default()
        };
        let e = Employee::stamped("x", &draft);
        assert_eq!(e.name, "Jane Doe");
        assert_eq!(e.email, "jane@co.com");
        assert_eq!(e.updated, today());
    }
}
