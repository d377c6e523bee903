//! Status table and error translation.
//!
//! External callers branch on both the status and the message text, so the
//! values below are fixed and must not be reworded.

use http::StatusCode;

use crate::error::ErrorCode;

pub const HTTP_SC_ADDED_USERPLANE: StatusCode = StatusCode::CREATED;
pub const HTTP_SC_BAD_REQUEST: StatusCode = StatusCode::BAD_REQUEST;
pub const HTTP_SC_INVALID_UERPLANE_PROPERTISE: StatusCode = StatusCode::BAD_REQUEST;
pub const HTTP_SC_USERPLANE_NOT_FOUND: StatusCode = StatusCode::NOT_FOUND;
pub const HTTP_SC_NOT_FOUND: StatusCode = StatusCode::NOT_FOUND;
pub const HTTP_SC_INTERNAL_SOFTWARE_ERROR: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;
pub const HTTP_SC_EPC_CONNECT_ERROR: StatusCode = StatusCode::SERVICE_UNAVAILABLE;
pub const HTTP_SC_INTERNAL_SERVER_ERROR: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Caller-facing status and message for one code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub status: StatusCode,
    pub message: &'static str,
}

/// Maps a code to its status and message. Total over every `ErrorCode`.
///
/// Codes are canonicalized first, so `Other(3)` translates like
/// `InvalidParameter`.
#[must_use]
pub fn translate(code: ErrorCode) -> Translation {
    let (status, message) = match code.canonical() {
        ErrorCode::AddedUserplane => (HTTP_SC_ADDED_USERPLANE, "ADDED_USERPLANE"),
        ErrorCode::InvalidType | ErrorCode::InvalidParameter => {
            (HTTP_SC_BAD_REQUEST, "ParameterInvalid")
        }
        ErrorCode::InvalidUerplaneFunction => (
            HTTP_SC_INVALID_UERPLANE_PROPERTISE,
            "INVALID_UERPLANE_PROPERTISE",
        ),
        ErrorCode::InvalidDataSchema | ErrorCode::UserplaneNotFound => {
            (HTTP_SC_USERPLANE_NOT_FOUND, "USERPLANE_NOT_FOUND")
        }
        ErrorCode::InternalSoftwareError => {
            (HTTP_SC_INTERNAL_SOFTWARE_ERROR, "INTERNAL_SOFTWARE_ERROR")
        }
        ErrorCode::ConnectEpcError => (HTTP_SC_EPC_CONNECT_ERROR, "EPC CP Connect failure"),
        ErrorCode::DispatchNoTarget => (HTTP_SC_NOT_FOUND, "404 not found"),
        ErrorCode::DispatchNoType => (HTTP_SC_BAD_REQUEST, "BadRequest"),
        ErrorCode::Other(_) => (HTTP_SC_INTERNAL_SERVER_ERROR, "UnknownError"),
    };
    Translation { status, message }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn pair(code: ErrorCode) -> (u16, &'static str) {
        let t = translate(code);
        (t.status.as_u16(), t.message)
    }

    #[test]
    fn table_is_reproduced_exactly() {
        assert_eq!(pair(ErrorCode::AddedUserplane), (201, "ADDED_USERPLANE"));
        assert_eq!(pair(ErrorCode::InvalidType), (400, "ParameterInvalid"));
        assert_eq!(pair(ErrorCode::InvalidParameter), (400, "ParameterInvalid"));
        assert_eq!(
            pair(ErrorCode::InvalidUerplaneFunction),
            (400, "INVALID_UERPLANE_PROPERTISE")
        );
        assert_eq!(pair(ErrorCode::InvalidDataSchema), (404, "USERPLANE_NOT_FOUND"));
        assert_eq!(pair(ErrorCode::UserplaneNotFound), (404, "USERPLANE_NOT_FOUND"));
        assert_eq!(
            pair(ErrorCode::InternalSoftwareError),
            (500, "INTERNAL_SOFTWARE_ERROR")
        );
        assert_eq!(pair(ErrorCode::ConnectEpcError), (503, "EPC CP Connect failure"));
        assert_eq!(pair(ErrorCode::DispatchNoTarget), (404, "404 not found"));
        assert_eq!(pair(ErrorCode::DispatchNoType), (400, "BadRequest"));
    }

    #[test]
    fn unlisted_code_maps_to_unknown_error() {
        assert_eq!(pair(ErrorCode::Other(0)), (500, "UnknownError"));
        assert_eq!(pair(ErrorCode::Other(i32::MAX)), (500, "UnknownError"));
    }

    #[test]
    fn other_aliasing_a_listed_value_translates_as_that_code() {
        assert_eq!(pair(ErrorCode::Other(3)), (400, "ParameterInvalid"));
        assert_eq!(pair(ErrorCode::Other(1)), (201, "ADDED_USERPLANE"));
        assert_eq!(pair(ErrorCode::Other(9)), (404, "404 not found"));
    }

    #[test]
    fn data_schema_shares_not_found_translation() {
        assert_eq!(
            translate(ErrorCode::InvalidDataSchema),
            translate(ErrorCode::UserplaneNotFound)
        );
    }

    proptest! {
        #[test]
        fn translate_is_deterministic(raw in any::<i32>()) {
            let code = ErrorCode::from_raw(raw);
            prop_assert_eq!(translate(code), translate(code));
        }

        #[test]
        fn other_translates_like_its_raw_value(raw in any::<i32>()) {
            prop_assert_eq!(translate(ErrorCode::Other(raw)), translate(ErrorCode::from_raw(raw)));
        }

        #[test]
        fn raw_codes_outside_table_are_unknown(raw in any::<i32>()) {
            prop_assume!(!(1..=10).contains(&raw));
            let t = translate(ErrorCode::from_raw(raw));
            prop_assert_eq!(t.status, StatusCode::INTERNAL_SERVER_ERROR);
            prop_assert_eq!(t.message, "UnknownError");
        }
    }
}
