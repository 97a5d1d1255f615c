use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::model::{Employee, EmployeeDraft};
use super::EmployeeSource;
use crate::error::{simple_error, Context, Result};

/// The two REST APIs the directory can talk to. They share verbs and record
/// shape but live at different paths and disagree on delete semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiProfile {
    /// `/api/v1/employees`; delete success is the response status.
    V1,
    /// `/api/employees`; any non-2xx is an error and bodies may be wrapped
    /// in a `{"data": ...}` envelope.
    Legacy,
}

impl ApiProfile {
    pub const fn default_base_url(self) -> &'static str {
        match self {
            ApiProfile::V1 => "http://localhost:3000/api/v1/employees",
            ApiProfile::Legacy => "http://localhost:5000/api/employees",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApiProfile::V1 => "rest",
            ApiProfile::Legacy => "legacy",
        }
    }
}

pub struct RestAdapter {
    profile: ApiProfile,
    base: Url,
    client: Client,
}

impl RestAdapter {
    /// Build an adapter for `profile`, using `base_url` instead of the
    /// profile default when given.
    pub fn new(profile: ApiProfile, base_url: Option<&str>) -> Result<Self> {
        let raw = base_url.unwrap_or(profile.default_base_url());
        let base = Url::parse(raw.trim_end_matches('/'))
            .with_ctx(|| format!("invalid base URL '{raw}'"))?;
        if base.cannot_be_a_base() {
            return Err(simple_error(format!("base URL '{raw}' cannot hold a path")));
        }
        let client = Client::builder()
            .build()
            .with_ctx(|| "failed to build HTTP client".to_string())?;
        Ok(Self {
            profile,
            base,
            client,
        })
    }

    fn item_url(&self, id: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| simple_error(format!("base URL '{}' cannot hold a path", self.base)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn read_body<T: DeserializeOwned>(&self, resp: Response, what: &str) -> Result<T> {
        let value: Value = resp.json().with_ctx(|| format!("decode {what}"))?;
        let value = match self.profile {
            ApiProfile::V1 => value,
            ApiProfile::Legacy => unwrap_envelope(value),
        };
        serde_json::from_value(value).with_ctx(|| format!("decode {what}"))
    }
}

/// Strip a `{"data": ...}` wrapper. A bare record also has no `data` key, so
/// anything carrying an `id` is left alone.
fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") && !map.contains_key("id") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

impl EmployeeSource for RestAdapter {
    fn describe(&self) -> String {
        format!("{} {}", self.profile.label(), self.base)
    }

    fn list(&mut self) -> Result<Vec<Employee>> {
        let url = self.base.clone();
        tracing::debug!(%url, "GET employees");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .with_ctx(|| format!("GET {url}"))?
            .error_for_status()
            .with_ctx(|| format!("GET {url}"))?;
        let employees: Vec<Employee> = self.read_body(resp, "employee list")?;
        tracing::debug!(count = employees.len(), "fetched employees");
        Ok(employees)
    }

    fn create(&mut self, draft: &EmployeeDraft) -> Result<Employee> {
        let url = self.base.clone();
        let body = Employee::from_draft(draft);
        tracing::debug!(%url, id = %body.id, "POST employee");
        let resp = self
            .client
            .post(url.clone())
            .json(&body)
            .send()
            .with_ctx(|| format!("POST {url}"))?
            .error_for_status()
            .with_ctx(|| format!("POST {url}"))?;
        self.read_body(resp, "created employee")
    }

    fn update(&mut self, id: &str, draft: &EmployeeDraft) -> Result<Employee> {
        let url = self.item_url(id)?;
        let body = Employee::stamped(id, draft);
        tracing::debug!(%url, "PUT employee");
        let resp = self
            .client
            .put(url.clone())
            .json(&body)
            .send()
            .with_ctx(|| format!("PUT {url}"))?
            .error_for_status()
            .with_ctx(|| format!("PUT {url}"))?;
        self.read_body(resp, "updated employee")
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let url = self.item_url(id)?;
        tracing::debug!(%url, "DELETE employee");
        let resp = self
            .client
            .delete(url.clone())
            .send()
            .with_ctx(|| format!("DELETE {url}"))?;
        match self.profile {
            ApiProfile::V1 => {
                let ok = resp.status().is_success();
                if !ok {
                    tracing::warn!(%url, status = %resp.status(), "delete not acknowledged");
                }
                Ok(ok)
            }
            ApiProfile::Legacy => {
                resp.error_for_status().with_ctx(|| format!("DELETE {url}"))?;
                Ok(true)
            }
        }
    }
}
