use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const MSG_MALFORMED: &str = "Cuerpo de la solicitud inválido";
pub const MSG_MISSING_FIELDS: &str = "Faltan campos obligatorios";
pub const MSG_MISCONFIGURED: &str = "Configuración del servidor incorrecta: faltan credenciales";
pub const MSG_UPSTREAM: &str = "Error desde el servidor de envío";

#[derive(Debug)]
pub enum RelayError {
    MalformedRequest(String),
    MissingRequiredFields { missing: Vec<&'static str> },
    ServerMisconfigured,
    UpstreamRejected { status: StatusCode, body: String },
    Internal(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MalformedRequest(_) | RelayError::MissingRequiredFields { .. } => {
                StatusCode::BAD_REQUEST
            }
            RelayError::ServerMisconfigured | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::UpstreamRejected { status, .. } => *status,
        }
    }

    /// Errors the caller can fix by changing the submission.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::MalformedRequest(_) | RelayError::MissingRequiredFields { .. }
        )
    }
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayError::MalformedRequest(msg) => write!(f, "Malformed request: {msg}"),
            RelayError::MissingRequiredFields { missing } => {
                write!(f, "Missing required fields: {}", missing.join(", "))
            }
            RelayError::ServerMisconfigured => {
                write!(f, "Server misconfigured: no intake credentials")
            }
            RelayError::UpstreamRejected { status, body } => {
                write!(f, "Upstream rejected submission ({status}): {body}")
            }
            RelayError::Internal(msg) => write!(f, "Internal relay error: {msg}"),
        }
    }
}

impl std::error::Error for RelayError {}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            RelayError::MalformedRequest(_) => json!({ "error": MSG_MALFORMED }),
            RelayError::MissingRequiredFields { missing } => {
                json!({ "error": MSG_MISSING_FIELDS, "missing": missing })
            }
            RelayError::ServerMisconfigured => json!({ "error": MSG_MISCONFIGURED }),
            RelayError::UpstreamRejected { body, .. } => {
                json!({ "error": MSG_UPSTREAM, "details": body })
            }
            RelayError::Internal(msg) => json!({ "error": msg }),
        };

        (status, axum::Json(body)).into_response()
    }
}
