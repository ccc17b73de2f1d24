//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Inputs (`FfiHeader`) are borrowed from the C caller and never freed here.
//! Outputs (`FfiVastResult`) are heap-allocated by this library and owned by
//! the caller until passed to `vast_free_result`.

use std::ffi::CString;
use std::os::raw::c_char;

use vast_client::RequestError;

/// Opaque handle to a `VastClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiVastClient {
    pub(crate) inner: vast_client::VastClient,
}

/// A single request header. Both strings are borrowed from the caller.
#[repr(C)]
pub struct FfiHeader {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// Error codes returned in `FfiVastResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    TransportInit = 1,
    Transport = 2,
    Panic = 3,
    NullArg = 4,
    InvalidUtf8 = 5,
    InteriorNul = 6,
}

/// Result envelope for every request function.
///
/// On success `error_code` is `Ok`, `error_message` is null and `body` holds
/// the response body. On failure `body` is null and `error_message`
/// describes what went wrong.
#[repr(C)]
pub struct FfiVastResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub body: *mut c_char,
}

impl FfiVastResult {
    fn boxed(error_code: FfiErrorCode, error_message: Option<String>, body: Option<CString>) -> *mut Self {
        let result = Box::new(FfiVastResult {
            error_code,
            error_message: error_message
                .map(|m| CString::new(m).unwrap_or_default().into_raw())
                .unwrap_or(std::ptr::null_mut()),
            body: body.map(CString::into_raw).unwrap_or(std::ptr::null_mut()),
        });
        Box::into_raw(result)
    }

    /// Build a success result carrying the response body.
    pub(crate) fn ok(body: String) -> *mut Self {
        match CString::new(body) {
            Ok(body) => Self::boxed(FfiErrorCode::Ok, None, Some(body)),
            Err(e) => Self::boxed(
                FfiErrorCode::InteriorNul,
                Some(format!("response body contains a NUL byte at offset {}", e.nul_position())),
                None,
            ),
        }
    }

    /// Build an error result from a `RequestError`.
    pub(crate) fn from_error(err: RequestError) -> *mut Self {
        let code = match &err {
            RequestError::TransportInit(_) => FfiErrorCode::TransportInit,
            RequestError::Transport(_) => FfiErrorCode::Transport,
        };
        Self::boxed(code, Some(err.to_string()), None)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::NullArg, Some(format!("null argument: {name}")), None)
    }

    pub(crate) fn invalid_utf8(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::InvalidUtf8,
            Some(format!("argument is not valid UTF-8: {name}")),
            None,
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, Some(msg.to_string()), None)
    }
}
