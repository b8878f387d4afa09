pub mod fields;
pub mod parser;

use serde::Serialize;

/// Tag carried on every forwarded submission.
pub const SOURCE_TAG: &str = "server-proxy";

/// A validated contact-form submission under canonical field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Body sent to the intake endpoint.
#[derive(Debug, Serialize)]
pub struct IntakePayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    pub message: &'a str,
    pub source: &'static str,
}

impl Submission {
    pub fn to_payload(&self) -> IntakePayload<'_> {
        IntakePayload {
            name: &self.name,
            email: &self.email,
            phone: self.phone.as_deref(),
            message: &self.message,
            source: SOURCE_TAG,
        }
    }
}
