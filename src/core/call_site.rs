//! Call-site capture for log records
//!
//! The location of a log call is threaded explicitly into the logger instead
//! of being recovered by walking the stack, so wrapping a logging call in
//! extra helper layers never shifts the reported frame. The macros in
//! [`crate::macros`] build a full [`CallSite`] (function, file, line); the
//! leveled methods on [`crate::Logger`] use `#[track_caller]` and can only
//! recover file and line.

use std::panic::Location;
use std::path::Path;

/// Function name reported when the enclosing function is not known
pub const UNKNOWN_FUNCTION: &str = "???";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Build a call site from a fully qualified function path and a source path.
    ///
    /// Only the last meaningful segment of `function_path` and the base name
    /// of `file_path` are kept.
    pub fn new(function_path: &'static str, file_path: &'static str, line: u32) -> Self {
        Self {
            function: short_function_name(function_path),
            file: file_base_name(file_path),
            line,
        }
    }

    /// Call site from a `#[track_caller]` location; the function is unknown
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            function: UNKNOWN_FUNCTION,
            file: file_base_name(location.file()),
            line: location.line(),
        }
    }

    /// Location of the caller of the `#[track_caller]` function this is invoked in
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }
}

/// `crate::module::handler::{{closure}}` -> `handler`
pub fn short_function_name(path: &'static str) -> &'static str {
    path.rsplit("::")
        .find(|segment| !segment.is_empty() && *segment != "{{closure}}")
        .unwrap_or(UNKNOWN_FUNCTION)
}

/// `src/bin/server.rs` -> `server.rs`
pub fn file_base_name(path: &'static str) -> &'static str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// Fully qualified path of the enclosing function.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn __f() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__f);
        name.strip_suffix("::__f").unwrap_or(name)
    }};
}

/// Capture the current function, file and line as a [`CallSite`].
///
/// # Examples
///
/// ```
/// use rust_rotating_logger::call_site;
///
/// fn handler() -> rust_rotating_logger::CallSite {
///     call_site!()
/// }
///
/// let site = handler();
/// assert_eq!(site.function, "handler");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::CallSite::new($crate::__function_path!(), file!(), line!())
    };
}
