//! C-ABI wrapper around `vast-client`.
//!
//! # Overview
//! Exposes `VastClient` construction and the four request verbs through
//! `extern "C"` functions, so C and C++ callers can talk to the VAST REST API
//! without linking against an HTTP library themselves.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - All request functions return one `FfiVastResult` envelope carrying
//!   either the response body or an error code and message.
//! - Input strings and header arrays are borrowed for the duration of the
//!   call only. Returned pointers are owned by the caller and released with
//!   the matching `vast_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use vast_client::{Headers, RequestError, VastClient};

use types::*;

// ---------------------------------------------------------------------------
// Argument decoding
// ---------------------------------------------------------------------------

enum ArgError {
    Null(&'static str),
    InvalidUtf8(&'static str),
}

impl ArgError {
    fn into_result(self) -> *mut FfiVastResult {
        match self {
            ArgError::Null(name) => FfiVastResult::null_arg(name),
            ArgError::InvalidUtf8(name) => FfiVastResult::invalid_utf8(name),
        }
    }
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn required_str<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a str, ArgError> {
    if ptr.is_null() {
        return Err(ArgError::Null(name));
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .map_err(|_| ArgError::InvalidUtf8(name))
}

/// Like `required_str`, but null reads as the empty string.
unsafe fn optional_str<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a str, ArgError> {
    if ptr.is_null() {
        return Ok("");
    }
    unsafe { required_str(ptr, name) }
}

/// Copy a caller-owned header array into a `Headers` map. A repeated key
/// keeps its last value.
unsafe fn read_headers(headers: *const FfiHeader, len: u32) -> Result<Headers, ArgError> {
    let mut map = Headers::new();
    if len == 0 {
        return Ok(map);
    }
    if headers.is_null() {
        return Err(ArgError::Null("headers"));
    }
    let entries = unsafe { std::slice::from_raw_parts(headers, len as usize) };
    for entry in entries {
        let key = unsafe { required_str(entry.key, "header key") }?;
        let value = unsafe { required_str(entry.value, "header value") }?;
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}

/// Shared body of every request function: decode arguments, run `call`,
/// wrap the outcome in an `FfiVastResult`.
fn perform<F>(
    name: &str,
    client: *const FfiVastClient,
    endpoint: *const c_char,
    body: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
    call: F,
) -> *mut FfiVastResult
where
    F: FnOnce(&VastClient, &str, &str, &Headers) -> Result<String, RequestError>,
{
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiVastResult::null_arg("client");
        }
        let client = unsafe { &*client };

        let args = (|| {
            let endpoint = unsafe { required_str(endpoint, "endpoint") }?;
            let body = unsafe { optional_str(body, "body") }?;
            let headers = unsafe { read_headers(headers, headers_len) }?;
            Ok::<_, ArgError>((endpoint, body, headers))
        })();

        match args {
            Ok((endpoint, body, headers)) => match call(&client.inner, endpoint, body, &headers) {
                Ok(response) => FfiVastResult::ok(response),
                Err(e) => FfiVastResult::from_error(e),
            },
            Err(e) => e.into_result(),
        }
    }))
    .unwrap_or_else(|_| FfiVastResult::panic(&format!("panic in {name}")))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `VastClient` bound to `base_url`. `token` may be null, which
/// is the same as an empty token.
///
/// Returns null if `base_url` is null or not UTF-8, or if an internal panic
/// occurs. The caller must free the returned pointer with `vast_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn vast_client_new(base_url: *const c_char, token: *const c_char) -> *mut FfiVastClient {
    catch_unwind(|| {
        let (Ok(url), Ok(token)) = (unsafe { required_str(base_url, "base_url") }, unsafe {
            optional_str(token, "token")
        }) else {
            return std::ptr::null_mut();
        };
        let client = VastClient::new(url, token);
        Box::into_raw(Box::new(FfiVastClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `vast_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn vast_client_free(client: *mut FfiVastClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Issue a GET for `endpoint`. `headers` may be null when `headers_len` is 0.
///
/// The caller must free the returned pointer with `vast_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn vast_client_get(
    client: *const FfiVastClient,
    endpoint: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
) -> *mut FfiVastResult {
    perform(
        "vast_client_get",
        client,
        endpoint,
        std::ptr::null(),
        headers,
        headers_len,
        |c, endpoint, _, headers| c.get(endpoint, headers),
    )
}

/// Issue a POST for `endpoint`. A null or empty `body` sends no body.
#[unsafe(no_mangle)]
pub extern "C" fn vast_client_post(
    client: *const FfiVastClient,
    endpoint: *const c_char,
    body: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
) -> *mut FfiVastResult {
    perform(
        "vast_client_post",
        client,
        endpoint,
        body,
        headers,
        headers_len,
        |c, endpoint, body, headers| c.post(endpoint, body, headers),
    )
}

/// Issue a PUT for `endpoint`. A null or empty `body` sends no body.
#[unsafe(no_mangle)]
pub extern "C" fn vast_client_put(
    client: *const FfiVastClient,
    endpoint: *const c_char,
    body: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
) -> *mut FfiVastResult {
    perform(
        "vast_client_put",
        client,
        endpoint,
        body,
        headers,
        headers_len,
        |c, endpoint, body, headers| c.put(endpoint, body, headers),
    )
}

/// Issue a DELETE for `endpoint`.
#[unsafe(no_mangle)]
pub extern "C" fn vast_client_delete(
    client: *const FfiVastClient,
    endpoint: *const c_char,
    headers: *const FfiHeader,
    headers_len: u32,
) -> *mut FfiVastResult {
    perform(
        "vast_client_delete",
        client,
        endpoint,
        std::ptr::null(),
        headers,
        headers_len,
        |c, endpoint, _, headers| c.delete(endpoint, headers),
    )
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiVastResult` returned by any request function. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn vast_free_result(result: *mut FfiVastResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.body.is_null() {
            drop(unsafe { CString::from_raw(result.body) });
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn vast_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
