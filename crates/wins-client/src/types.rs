//! Request and response types for the wins API.

use serde::{Deserialize, Serialize};
use spiral::Milestone;

// ---------- Auth ----------

/// Body for `POST /login` and `POST /register`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful `POST /login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// `{msg}` body used for confirmations and errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub msg: Option<String>,
}

// ---------- Wins ----------

/// One stored win as returned by `GET /wins`.
///
/// Backends disagree on the name of the text field: `desc`, `subject` and
/// `text` are all accepted, in that order of preference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WinRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl WinRecord {
    /// Normalize to a milestone. Missing fields become empty strings so a
    /// bad record degrades the layout instead of failing the fetch.
    pub fn into_milestone(self) -> Milestone {
        let desc = [self.desc, self.subject, self.text]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or_default();
        Milestone {
            date: self.date.unwrap_or_default(),
            desc,
        }
    }
}

/// `GET /wins` body: a bare array, or an object wrapping it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WinsResponse {
    List(Vec<WinRecord>),
    Wrapped {
        #[serde(default)]
        wins: Option<Vec<WinRecord>>,
        #[serde(default)]
        data: Option<Vec<WinRecord>>,
    },
}

impl WinsResponse {
    pub fn into_milestones(self) -> Vec<Milestone> {
        let records = match self {
            Self::List(records) => records,
            Self::Wrapped { wins, data } => wins.or(data).unwrap_or_default(),
        };
        records.into_iter().map(WinRecord::into_milestone).collect()
    }
}

/// Name of the text field sent with `POST /wins`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinField {
    Desc,
    Subject,
}

impl WinField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Desc => "desc",
            Self::Subject => "subject",
        }
    }
}

/// Which text field(s) to try when adding a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddWinSchema {
    /// `{date, desc}`
    #[default]
    Desc,
    /// `{date, subject}`
    Subject,
    /// Legacy behavior: `desc`, then `subject` if the first attempt fails.
    Auto,
}

impl AddWinSchema {
    pub fn fields(&self) -> &'static [WinField] {
        match self {
            Self::Desc => &[WinField::Desc],
            Self::Subject => &[WinField::Subject],
            Self::Auto => &[WinField::Desc, WinField::Subject],
        }
    }
}

/// Body for `POST /wins`.
#[derive(Debug, Clone, Serialize)]
pub struct AddWinRequest<'a> {
    pub date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<&'a str>,
}

impl<'a> AddWinRequest<'a> {
    pub fn new(milestone: &'a Milestone, field: WinField) -> Self {
        let text = Some(milestone.desc.as_str());
        let (desc, subject) = match field {
            WinField::Desc => (text, None),
            WinField::Subject => (None, text),
        };
        Self {
            date: &milestone.date,
            desc,
            subject,
        }
    }
}
