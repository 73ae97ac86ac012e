use intersight_core::{Error, Result};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// HTTP verbs accepted by the Intersight API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Upper case name of the verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// PATCH and DELETE address a single existing object.
    pub fn requires_moid(&self) -> bool {
        matches!(self, Method::Patch | Method::Delete)
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(
                Error::request_invalid("please select a valid HTTP verb (GET/POST/PATCH/DELETE)")
                    .with_context("method", s),
            ),
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = Error;

    fn try_from(m: &http::Method) -> Result<Self> {
        m.as_str().parse()
    }
}

impl From<Method> for http::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// Helpers to build OData `$filter` expressions.
pub struct Filter;

impl Filter {
    /// `Name eq '<name>'`, with embedded quotes doubled.
    pub fn name_eq(name: &str) -> String {
        format!("Name eq '{}'", name.replace('\'', "''"))
    }

    /// Match any of `names`: `Name eq 'a' or Name eq 'b'`.
    pub fn names<I, S>(names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| Self::name_eq(name.as_ref()))
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

/// A single API call: verb, resource, query and body.
///
/// PATCH and DELETE need either `moid` or `name`; a name is resolved to
/// its Moid right before the call.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// HTTP verb.
    pub method: Method,
    /// Resource path relative to the API base, e.g. `/ntp/Policies`.
    pub resource_path: String,
    /// Query parameters in the order they are sent.
    pub query: Vec<(String, String)>,
    /// JSON object sent with non-GET requests.
    pub body: Value,
    /// Moid of the target object.
    pub moid: Option<String>,
    /// Name of the target object, resolved to a Moid when `moid` is unset.
    pub name: Option<String>,
}

impl Operation {
    /// Create an operation with an empty body and no query.
    pub fn new(method: Method, resource_path: impl Into<String>) -> Self {
        Self {
            method,
            resource_path: resource_path.into(),
            query: Vec::new(),
            body: Value::Object(Map::new()),
            moid: None,
            name: None,
        }
    }

    /// GET `resource_path`.
    pub fn get(resource_path: impl Into<String>) -> Self {
        Self::new(Method::Get, resource_path)
    }

    /// POST `resource_path`.
    pub fn post(resource_path: impl Into<String>) -> Self {
        Self::new(Method::Post, resource_path)
    }

    /// PATCH `resource_path`.
    pub fn patch(resource_path: impl Into<String>) -> Self {
        Self::new(Method::Patch, resource_path)
    }

    /// DELETE `resource_path`.
    pub fn delete(resource_path: impl Into<String>) -> Self {
        Self::new(Method::Delete, resource_path)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a `$filter` query parameter.
    pub fn with_filter(self, filter: impl Into<String>) -> Self {
        self.with_query("$filter", filter)
    }

    /// Set the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Set the target Moid.
    pub fn with_moid(mut self, moid: impl Into<String>) -> Self {
        self.moid = Some(moid.into());
        self
    }

    /// Set the target name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
