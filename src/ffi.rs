//! C-ABI FFI bindings for cross-language integration.
//!
//! This module lets a non-Rust editor host (a webview shell, a C# or
//! Node.js app) call the renderer directly.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::render::{to_html_with_stats, to_json, JsonFormat, RenderOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct MarknoteResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Freed by `marknote_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Freed by `marknote_free_result`.
    pub error: *mut c_char,
}

impl MarknoteResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn input_str<'a>(text: *const c_char) -> Result<&'a str, String> {
    if text.is_null() {
        return Err("Input cannot be null".to_string());
    }
    CStr::from_ptr(text)
        .to_str()
        .map_err(|_| "Invalid UTF-8 input".to_string())
}

/// Render Markdown text to an HTML fragment.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `marknote_free_result`.
#[no_mangle]
pub unsafe extern "C" fn marknote_render(text: *const c_char, line_numbers: bool) -> MarknoteResult {
    match input_str(text) {
        Ok(text) => {
            let options = RenderOptions::new().with_line_numbers(line_numbers);
            MarknoteResult::success(crate::render_markdown_with_options(text, &options))
        }
        Err(e) => MarknoteResult::error(e),
    }
}

/// Render Markdown text and return the HTML plus statistics as JSON.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `marknote_free_result`.
#[no_mangle]
pub unsafe extern "C" fn marknote_render_json(text: *const c_char, pretty: bool) -> MarknoteResult {
    let text = match input_str(text) {
        Ok(text) => text,
        Err(e) => return MarknoteResult::error(e),
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let result = to_html_with_stats(text, &RenderOptions::default());
    match to_json(&result, format) {
        Ok(json) => MarknoteResult::success(json),
        Err(e) => MarknoteResult::error(e.to_string()),
    }
}

/// Free a result returned by any `marknote_*` function.
///
/// # Safety
///
/// The result must have been returned by this library and not freed before.
#[no_mangle]
pub unsafe extern "C" fn marknote_free_result(result: MarknoteResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Get the library version.
///
/// The returned string is static and must not be freed.
#[no_mangle]
pub extern "C" fn marknote_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
