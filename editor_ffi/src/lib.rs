//! # Editor FFI
//!
//! C ABI over [`EditorHost`] for embedding the engine in another runtime.
//!
//! ## Conventions
//!
//! - Every function takes the handle returned by [`mix_host_new`] first
//! - Failures are reported as `false`, `0`, `-1` or a null pointer; the
//!   session is left exactly as it was
//! - Text arguments are NUL-terminated byte strings; a null text pointer
//!   fails the call
//! - Returned strings are owned by the caller and must be released with
//!   [`mix_string_free`]
//!
//! Panics never cross the boundary: the workspace builds with
//! `panic = "abort"`.

pub mod host;

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use editor_core::Motion;

pub use host::EditorHost;

/// Borrows a NUL-terminated argument, `None` for null
///
/// # Safety
///
/// `text` must be null or point to a valid NUL-terminated string.
unsafe fn text_arg<'a>(text: *const c_char) -> Option<&'a [u8]> {
    if text.is_null() {
        None
    } else {
        Some(CStr::from_ptr(text).to_bytes())
    }
}

/// Hands `bytes` to the caller, cut at the first interior NUL
fn into_c_string(mut bytes: Vec<u8>) -> *mut c_char {
    if let Some(nul) = bytes.iter().position(|b| *b == 0) {
        bytes.truncate(nul);
    }
    CString::new(bytes).map_or(ptr::null_mut(), CString::into_raw)
}

// Lifecycle

/// Allocates a host with no session
#[no_mangle]
pub extern "C" fn mix_host_new() -> *mut EditorHost {
    Box::into_raw(Box::new(EditorHost::new()))
}

/// Releases a host and its session
///
/// # Safety
///
/// `host` must be null or a pointer from [`mix_host_new`] not yet freed.
#[no_mangle]
pub unsafe extern "C" fn mix_host_free(host: *mut EditorHost) {
    if !host.is_null() {
        drop(Box::from_raw(host));
    }
}

/// Starts an empty session
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_init(host: *mut EditorHost) -> bool {
    match host.as_mut() {
        Some(host) => {
            host.init();
            true
        }
        None => false,
    }
}

/// Replaces the document with `text`
///
/// # Safety
///
/// `host` must be null or live; `text` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn mix_load_text(host: *mut EditorHost, text: *const c_char) -> bool {
    match (host.as_mut(), text_arg(text)) {
        (Some(host), Some(text)) => {
            host.load_text(text);
            true
        }
        _ => false,
    }
}

/// Drops the session
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_destroy(host: *mut EditorHost) {
    if let Some(host) = host.as_mut() {
        host.destroy();
    }
}

// Buffer queries

/// Document length in bytes, 0 without a session
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_length(host: *const EditorHost) -> usize {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(0, |session| session.len())
}

/// Number of lines, 0 without a session
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_line_count(host: *const EditorHost) -> usize {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(0, |session| session.line_count())
}

/// Copy of the whole document, null without a session
///
/// # Safety
///
/// `host` must be null or live. Release the result with [`mix_string_free`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_all_text(host: *const EditorHost) -> *mut c_char {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(ptr::null_mut(), |session| into_c_string(session.bytes()))
}

/// Copy of line `line` without its terminator, null past the last line
///
/// # Safety
///
/// `host` must be null or live. Release the result with [`mix_string_free`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_line(host: *const EditorHost, line: usize) -> *mut c_char {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .and_then(|session| session.buffer().line_text(line))
        .map_or(ptr::null_mut(), into_c_string)
}

// Buffer mutation

/// Inserts `text` at `position`
///
/// # Safety
///
/// `host` must be null or live; `text` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn mix_insert_text(
    host: *mut EditorHost,
    position: usize,
    text: *const c_char,
) -> bool {
    match (host.as_mut(), text_arg(text)) {
        (Some(host), Some(text)) => host
            .with_session("insert_text", |session| session.insert_bytes(position, text))
            .is_ok(),
        _ => false,
    }
}

/// Deletes `length` bytes at `position`
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_delete_text(
    host: *mut EditorHost,
    position: usize,
    length: usize,
) -> bool {
    host.as_mut().is_some_and(|host| {
        host.with_session("delete_text", |session| session.delete(position, length))
            .is_ok()
    })
}

/// Inserts `text` at the cursor and moves past it
///
/// # Safety
///
/// `host` must be null or live; `text` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn mix_insert_at_cursor(host: *mut EditorHost, text: *const c_char) -> bool {
    match (host.as_mut(), text_arg(text)) {
        (Some(host), Some(text)) => host
            .with_session("insert_at_cursor", |session| {
                session.insert_at_cursor_bytes(text)
            })
            .is_ok(),
        _ => false,
    }
}

/// Backspace
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_delete_before_cursor(host: *mut EditorHost) -> bool {
    host.as_mut().is_some_and(|host| {
        host.with_session("delete_before_cursor", |session| session.delete_before_cursor())
            .is_ok()
    })
}

/// Deletes the byte under the cursor
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_delete_at_cursor(host: *mut EditorHost) -> bool {
    host.as_mut().is_some_and(|host| {
        host.with_session("delete_at_cursor", |session| session.delete_at_cursor())
            .is_ok()
    })
}

/// Deletes the cursor line (`dd`)
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_delete_line(host: *mut EditorHost) -> bool {
    host.as_mut().is_some_and(|host| {
        host.with_session("delete_line", |session| session.delete_current_line())
            .is_ok()
    })
}

// Cursor

/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_position(host: *const EditorHost) -> usize {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(0, |session| session.cursor_position())
}

/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_line_number(host: *const EditorHost) -> usize {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(0, |session| session.cursor_line())
}

/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_column(host: *const EditorHost) -> usize {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(0, |session| session.cursor_column())
}

/// Moves the cursor, clamped to the document
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_set_position(host: *mut EditorHost, position: usize) {
    if let Some(session) = host.as_mut().and_then(|host| host.session_mut().ok()) {
        session.set_position(position);
    }
}

// Mode

/// Mode code (`NORMAL=0` .. `SEARCH=4`), -1 without a session
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_mode(host: *const EditorHost) -> i32 {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(-1, |session| session.mode().code())
}

/// Switches mode; unknown codes fail and change nothing
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_set_mode(host: *mut EditorHost, mode: i32) -> bool {
    host.as_mut().is_some_and(|host| {
        host.with_session("set_mode", |session| session.set_mode_code(mode))
            .is_ok()
    })
}

/// Mode name such as `"NORMAL"`, null without a session
///
/// # Safety
///
/// `host` must be null or live. Release the result with [`mix_string_free`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_mode_name(host: *const EditorHost) -> *mut c_char {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(ptr::null_mut(), |session| {
            into_c_string(session.mode_name().as_bytes().to_vec())
        })
}

// Motions

macro_rules! motion_entry {
    ($name:ident, $motion:expr, $key:literal) => {
        #[doc = concat!("Motion `", $key, "`")]
        ///
        /// # Safety
        ///
        /// `host` must be null or a live pointer from [`mix_host_new`].
        #[no_mangle]
        pub unsafe extern "C" fn $name(host: *mut EditorHost) {
            if let Some(host) = host.as_mut() {
                host.apply_motion($motion);
            }
        }
    };
}

motion_entry!(mix_motion_h, Motion::Left, "h");
motion_entry!(mix_motion_l, Motion::Right, "l");
motion_entry!(mix_motion_j, Motion::Down, "j");
motion_entry!(mix_motion_k, Motion::Up, "k");
motion_entry!(mix_motion_w, Motion::WordForward, "w");
motion_entry!(mix_motion_b, Motion::WordBackward, "b");
motion_entry!(mix_motion_e, Motion::WordEnd, "e");
motion_entry!(mix_motion_line_start, Motion::LineStart, "0");
motion_entry!(mix_motion_line_end, Motion::LineEnd, "$");
motion_entry!(mix_motion_file_start, Motion::BufferStart, "gg");
motion_entry!(mix_motion_file_end, Motion::BufferEnd, "G");

// Selection

/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_has_selection(host: *const EditorHost) -> bool {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .is_some_and(|session| session.has_selection())
}

/// Selection start, or the cursor outside VISUAL mode
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_selection_start(host: *const EditorHost) -> usize {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(0, |session| session.selection_start())
}

/// Selection end, or the cursor outside VISUAL mode
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_get_selection_end(host: *const EditorHost) -> usize {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .map_or(0, |session| session.selection_end())
}

// Search

/// Stores the search pattern
///
/// # Safety
///
/// `host` must be null or live; `pattern` must be null or NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn mix_set_search_pattern(
    host: *mut EditorHost,
    pattern: *const c_char,
) -> bool {
    match (host.as_mut(), text_arg(pattern)) {
        (Some(host), Some(pattern)) => host
            .with_session("set_search_pattern", |session| {
                session.set_search_pattern_bytes(pattern);
                Ok(())
            })
            .is_ok(),
        _ => false,
    }
}

/// Moves to the next match; false when nothing matches
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_search_next(host: *mut EditorHost) -> bool {
    host.as_mut().is_some_and(|host| {
        host.with_session("search_next", |session| session.search_next())
            .is_ok()
    })
}

/// Moves to the previous match; false when nothing matches
///
/// # Safety
///
/// `host` must be null or a live pointer from [`mix_host_new`].
#[no_mangle]
pub unsafe extern "C" fn mix_search_prev(host: *mut EditorHost) -> bool {
    host.as_mut().is_some_and(|host| {
        host.with_session("search_prev", |session| session.search_prev())
            .is_ok()
    })
}

// Utility

/// Session state as a JSON object, null without a session
///
/// # Safety
///
/// `host` must be null or live. Release the result with [`mix_string_free`].
#[no_mangle]
pub unsafe extern "C" fn mix_snapshot_json(host: *const EditorHost) -> *mut c_char {
    host.as_ref()
        .and_then(|host| host.session().ok())
        .and_then(|session| serde_json::to_vec(&session.snapshot()).ok())
        .map_or(ptr::null_mut(), into_c_string)
}

/// Releases a string returned by this library
///
/// # Safety
///
/// `text` must be null or a pointer returned by a `mix_*` function that has
/// not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn mix_string_free(text: *mut c_char) {
    if !text.is_null() {
        drop(CString::from_raw(text));
    }
}
