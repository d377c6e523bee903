//! Outcome and failure codes raised by request handlers.

use std::fmt;

/// Closed set of outcome codes a handler can report.
///
/// Most codes describe failures. `AddedUserplane` is the exception: it is a
/// success signal carried through [`crate::Outcome::Signal`], never through
/// [`HandlerError`] by the bundled handlers.
///
/// `Other` holds raw codes that fall outside the table (for example a numeric
/// code read off the wire). An `Other` built around a listed value is read as
/// the named code it aliases; see [`ErrorCode::canonical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    AddedUserplane,
    InvalidType,
    InvalidParameter,
    InvalidUerplaneFunction,
    InvalidDataSchema,
    UserplaneNotFound,
    InternalSoftwareError,
    ConnectEpcError,
    DispatchNoTarget,
    DispatchNoType,
    Other(i32),
}

impl ErrorCode {
    /// Every named code, in raw-value order.
    pub const NAMED: [ErrorCode; 10] = [
        ErrorCode::AddedUserplane,
        ErrorCode::InvalidType,
        ErrorCode::InvalidParameter,
        ErrorCode::InvalidUerplaneFunction,
        ErrorCode::InvalidDataSchema,
        ErrorCode::UserplaneNotFound,
        ErrorCode::InternalSoftwareError,
        ErrorCode::ConnectEpcError,
        ErrorCode::DispatchNoTarget,
        ErrorCode::DispatchNoType,
    ];

    /// Stable numeric value of this code.
    #[must_use]
    pub fn raw(self) -> i32 {
        match self {
            Self::AddedUserplane => 1,
            Self::InvalidType => 2,
            Self::InvalidParameter => 3,
            Self::InvalidUerplaneFunction => 4,
            Self::InvalidDataSchema => 5,
            Self::UserplaneNotFound => 6,
            Self::InternalSoftwareError => 7,
            Self::ConnectEpcError => 8,
            Self::DispatchNoTarget => 9,
            Self::DispatchNoType => 10,
            Self::Other(raw) => raw,
        }
    }

    /// Maps a numeric value back to its code. Unlisted values become `Other`.
    #[must_use]
    pub fn from_raw(raw: i32) -> Self {
        Self::NAMED
            .iter()
            .copied()
            .find(|code| code.raw() == raw)
            .unwrap_or(Self::Other(raw))
    }

    /// Folds an `Other` carrying a listed raw value into its named code.
    #[must_use]
    pub fn canonical(self) -> Self {
        match self {
            Self::Other(raw) => Self::from_raw(raw),
            named => named,
        }
    }

    /// Upper-case symbolic name, as used in logs and diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self.canonical() {
            Self::AddedUserplane => "ADDED_USERPLANE",
            Self::InvalidType => "INVALID_TYPE",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::InvalidUerplaneFunction => "INVALID_UERPLANE_FUNCTION",
            Self::InvalidDataSchema => "INVALID_DATA_SCHEMA",
            Self::UserplaneNotFound => "USERPLANE_NOT_FOUND",
            Self::InternalSoftwareError => "INTERNAL_SOFTWARE_ERROR",
            Self::ConnectEpcError => "CONNECT_EPC_ERROR",
            Self::DispatchNoTarget => "DISPATCH_NOTARGET",
            Self::DispatchNoType => "DISPATCH_NOTYPE",
            Self::Other(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical() {
            Self::Other(raw) => write!(f, "UNKNOWN({raw})"),
            named => f.write_str(named.name()),
        }
    }
}

/// Failure raised by a request handler or by routing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}{}", detail_suffix(.detail))]
pub struct HandlerError {
    pub code: ErrorCode,
    /// Optional clarifying text. Never affects translation.
    pub detail: Option<String>,
}

#[allow(clippy::ref_option)]
fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

impl HandlerError {
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self { code, detail: None }
    }

    #[must_use]
    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
        }
    }
}

impl From<ErrorCode> for HandlerError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}
