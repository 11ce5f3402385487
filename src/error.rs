//! Error types for the authentication pipeline.
//!
//! Rejections carry a wire-level [`Status`] so the surrounding framework can
//! forward them to the client unchanged; hook failures stay separate and are
//! never folded into a rejection.

use std::fmt;

use thiserror::Error;

/// Boxed error used at the hook seams, where implementations bring their own
/// error types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical RPC status codes.
///
/// Numbering follows the gRPC convention; [`Code::Unauthenticated`] is the
/// only code this crate produces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Code {
    Ok = 0,
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl Code {
    /// Numeric value of the code as it appears on the wire.
    pub fn value(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Code::Ok => "OK",
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::AlreadyExists => "ALREADY_EXISTS",
            Code::PermissionDenied => "PERMISSION_DENIED",
            Code::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Aborted => "ABORTED",
            Code::OutOfRange => "OUT_OF_RANGE",
            Code::Unimplemented => "UNIMPLEMENTED",
            Code::Internal => "INTERNAL",
            Code::Unavailable => "UNAVAILABLE",
            Code::DataLoss => "DATA_LOSS",
            Code::Unauthenticated => "UNAUTHENTICATED",
        };
        f.write_str(name)
    }
}

/// Detail string carried by the uniform rejection.
const UNAUTHENTICATED_DETAILS: &str = "Unauthenticated";

/// Wire-level status attached to a rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {details}")]
pub struct Status {
    code: Code,
    details: String,
}

impl Status {
    /// Status with an arbitrary code and detail message.
    pub fn new(code: Code, details: impl Into<String>) -> Self {
        Self {
            code,
            details: details.into(),
        }
    }

    /// The uniform rejection for denied calls.
    ///
    /// Deliberately identical for missing, invalid, and revoked credentials,
    /// so a client cannot probe which of the three applied.
    pub fn unauthenticated() -> Self {
        Self::new(Code::Unauthenticated, UNAUTHENTICATED_DETAILS)
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

/// Failure of one pipeline run.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The call was denied and passthrough is disabled.
    #[error(transparent)]
    Unauthenticated(#[from] Status),

    /// A caller-supplied hook failed. Carried unchanged so the caller can
    /// recover its own error type; never converted into a rejection.
    #[error("authentication hook failed: {0}")]
    Hook(#[source] BoxError),
}

impl GuardError {
    /// The rejection status, when this failure is a denial.
    pub fn status(&self) -> Option<&Status> {
        match self {
            GuardError::Unauthenticated(status) => Some(status),
            GuardError::Hook(_) => None,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, GuardError::Unauthenticated(_))
    }
}

/// Result type alias for pipeline operations.
pub type GuardResult<T> = Result<T, GuardError>;
