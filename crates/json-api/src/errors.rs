//! API Errors
//!
//! Every failure leaves the server as `{"message": "..."}` with a matching status code.

use salvo::{
    catcher::Catcher,
    http::ResBody,
    oapi::{self, Components, EndpointOutRegister, Operation, RefOr, Schema, ToSchema},
    prelude::*,
    writing::Scribe,
};
use serde::{Deserialize, Serialize};

use littlelemon::policy::AccessDenied;

pub(crate) const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub(crate) const INTERNAL_SERVER_ERROR: &str = "Internal server error.";

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An error on its way to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
    }
}

impl From<AccessDenied> for ApiError {
    fn from(denied: AccessDenied) -> Self {
        Self::new(StatusCode::FORBIDDEN, denied.to_string())
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(MessageResponse::new(self.message)));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema: RefOr<Schema> = MessageResponse::to_schema(components);

        for (status, description) in [
            ("400", "Validation error"),
            ("401", "Missing or invalid credentials"),
            ("403", "Not permitted"),
            ("404", "Not found"),
            ("500", "Internal server error"),
        ] {
            operation.responses.insert(
                status,
                oapi::Response::new(description).add_content("application/json", schema.clone()),
            );
        }
    }
}

/// Catcher for the errors Salvo produces itself, such as unmatched routes and bodies that fail
/// to extract.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(render_status_error)
}

#[handler]
async fn render_status_error(req: &mut Request, res: &mut Response, ctrl: &mut FlowCtrl) {
    if !matches!(res.body, ResBody::None | ResBody::Error(_)) {
        return;
    }

    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    let brief = match std::mem::replace(&mut res.body, ResBody::None) {
        ResBody::Error(error) => error.brief,
        _ => String::new(),
    };

    let message = match status {
        StatusCode::NOT_FOUND => "Not found.".to_string(),
        StatusCode::METHOD_NOT_ALLOWED => format!("Method \"{}\" not allowed.", req.method()),
        _ if !brief.trim().is_empty() => brief,
        _ => format!("{}.", status.canonical_reason().unwrap_or("Error")),
    };

    res.render(ApiError::new(status, message));
    ctrl.skip_rest();
}
