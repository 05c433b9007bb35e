use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub type EchoResult<T> = Result<T, EchoError>;

/// Body sent for every request that fails before reaching a handler.
pub const GENERIC_ERROR_BODY: &str = "something went wrong";

#[derive(Debug, Error)]
pub enum EchoError {
    #[error("invalid peer address: {addr}")]
    AddressParse { addr: String },
    #[error("untrusted proxy: peer {peer} does not match {trusted}")]
    UntrustedProxy { peer: String, trusted: String },
}

impl EchoError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AddressParse { .. } => "address_parse",
            Self::UntrustedProxy { .. } => "untrusted_proxy",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for EchoError {
    // The cause is only ever logged; clients see the same opaque body.
    fn into_response(self) -> Response {
        let mut response = (self.status(), GENERIC_ERROR_BODY).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};

    use super::{EchoError, GENERIC_ERROR_BODY};

    #[tokio::test]
    async fn every_error_renders_the_same_opaque_body() {
        let errors = [
            EchoError::AddressParse {
                addr: "garbage".to_string(),
            },
            EchoError::UntrustedProxy {
                peer: "10.0.0.2".to_string(),
                trusted: "10.0.0.1".to_string(),
            },
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&body[..], GENERIC_ERROR_BODY.as_bytes());
        }
    }

    #[test]
    fn display_keeps_the_diagnostic_details() {
        let err = EchoError::UntrustedProxy {
            peer: "10.0.0.2".to_string(),
            trusted: "10.0.0.1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "untrusted proxy: peer 10.0.0.2 does not match 10.0.0.1"
        );
        assert_eq!(err.code(), "untrusted_proxy");
    }
}
