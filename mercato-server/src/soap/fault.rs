//! SOAP faults
//!
//! A failed operation yields a `SoapFault` value which renders as a SOAP 1.2
//! fault envelope with the matching HTTP status.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use quick_xml::escape::escape;

use super::envelope::{EnvelopeError, SOAP_ENV_NS};
use super::SOAP_CONTENT_TYPE;
use crate::error::Error;

const RPC_NS: &str = "http://www.w3.org/2003/05/soap-rpc";

#[derive(Debug, Clone, PartialEq)]
pub enum SoapFault {
    /// The caller sent something unusable
    BadArguments { reason: String },

    /// The store rejected or failed the write
    DatabaseError { detail: String },
}

impl SoapFault {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadArguments { .. } => "soap:Sender",
            Self::DatabaseError { .. } => "soap:Receiver",
        }
    }

    pub fn subcode(&self) -> &'static str {
        match self {
            Self::BadArguments { .. } => "rpc:BadArguments",
            Self::DatabaseError { .. } => "rpc:DatabaseError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadArguments { .. } => StatusCode::BAD_REQUEST,
            Self::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::BadArguments { reason } => reason,
            Self::DatabaseError { .. } => "Database error occurred.",
        }
    }

    pub fn to_xml(&self) -> String {
        let detail = match self {
            Self::DatabaseError { detail } => {
                format!("<soap:Detail>{}</soap:Detail>", escape(detail.as_str()))
            }
            Self::BadArguments { .. } => String::new(),
        };
        format!(
            concat!(
                r#"<?xml version="1.0" encoding="utf-8"?>"#,
                r#"<soap:Envelope xmlns:soap="{env}" xmlns:rpc="{rpc}">"#,
                "<soap:Body><soap:Fault>",
                "<soap:Code><soap:Value>{code}</soap:Value>",
                "<soap:Subcode><soap:Value>{subcode}</soap:Value></soap:Subcode></soap:Code>",
                r#"<soap:Reason><soap:Text xml:lang="en">{reason}</soap:Text></soap:Reason>"#,
                "{detail}",
                "</soap:Fault></soap:Body></soap:Envelope>"
            ),
            env = SOAP_ENV_NS,
            rpc = RPC_NS,
            code = self.code(),
            subcode = self.subcode(),
            reason = escape(self.reason()),
            detail = detail,
        )
    }
}

impl From<EnvelopeError> for SoapFault {
    fn from(e: EnvelopeError) -> Self {
        Self::BadArguments {
            reason: e.to_string(),
        }
    }
}

impl From<Error> for SoapFault {
    fn from(e: Error) -> Self {
        match e {
            Error::Store(e) => {
                tracing::error!("Store error during SOAP call: {}", e);
                Self::DatabaseError {
                    detail: e.to_string(),
                }
            }
            other => Self::BadArguments {
                reason: other.to_string(),
            },
        }
    }
}

impl IntoResponse for SoapFault {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, SOAP_CONTENT_TYPE)],
            self.to_xml(),
        )
            .into_response()
    }
}
