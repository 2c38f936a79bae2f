use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "";
pub const DEFAULT_COMPANY: &str = "N/A";
pub const DEFAULT_DESCRIPTION: &str = "";
pub const DEFAULT_URL: &str = "#";

/// One job advertisement as retrieved from the search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub title: String,
    pub company: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostingError {
    #[error("posting record is not an object")]
    NotAnObject,

    #[error("field '{field}' has an unexpected type")]
    InvalidField { field: &'static str },
}

impl Posting {
    /// Builds a posting from a raw provider record.
    ///
    /// Accepts Adzuna's nested naming (`company.display_name`, `redirect_url`)
    /// as well as flat naming (`company` string, `url`). Missing and `null`
    /// fields take their defaults; any other shape is a `PostingError`.
    pub fn from_record(record: &Value) -> Result<Self, PostingError> {
        let obj = record.as_object().ok_or(PostingError::NotAnObject)?;

        let title = string_field(obj, "title")?.unwrap_or(DEFAULT_TITLE);
        let description = string_field(obj, "description")?.unwrap_or(DEFAULT_DESCRIPTION);
        let company = company_field(obj)?.unwrap_or(DEFAULT_COMPANY);
        let url = match string_field(obj, "redirect_url")? {
            Some(url) => Some(url),
            None => string_field(obj, "url")?,
        }
        .unwrap_or(DEFAULT_URL);

        Ok(Posting {
            title: title.to_string(),
            company: company.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        })
    }
}

/// Best-effort `(company, title)` for a record that failed to parse, so the
/// exclusion trail can still name it.
pub fn record_label(record: &Value) -> (String, String) {
    let company = record
        .get("company")
        .and_then(|c| c.get("display_name").or(Some(c)))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_COMPANY);
    let title = record
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TITLE);
    (company.to_string(), title.to_string())
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, PostingError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(PostingError::InvalidField { field }),
    }
}

fn company_field(obj: &Map<String, Value>) -> Result<Option<&str>, PostingError> {
    match obj.get("company") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(Value::Object(company)) => string_field(company, "display_name"),
        Some(_) => Err(PostingError::InvalidField { field: "company" }),
    }
}
