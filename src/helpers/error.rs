//! Helpers related to generation of error messages.

/// Generates a recursive error message for an [`Error`].
///
/// Starts with the [`Error`]'s own [`Display`] output, then walks the [`source`] chain and
/// appends each cause's description. If backtrace support is available (see
/// [`backtrace_message`]), the error's [`Backtrace`](std::backtrace::Backtrace) is appended too.
///
/// [`Error`]: std::error::Error
/// [`source`]: std::error::Error::source
/// [`Display`]: std::fmt::Display
#[cfg(not(tarpaulin_include))]
pub fn recursive_error_message<E>(error: &E) -> String
where
    E: std::error::Error,
{
    let mut message = format!("{}", error);

    let mut current: &dyn std::error::Error = error;
    while let Some(source) = current.source() {
        message += &format!("\ncaused by: {}", source);
        current = source;
    }

    if let Some(backtrace_msg) = backtrace_message(error) {
        message += &format!("\n\nBacktrace: {}", backtrace_msg);
    }

    message
}

/// Attempts to get backtrace information for an [`Error`].
///
/// Queries the given [`Error`] for a [`Backtrace`] component; if it has one, it is converted
/// to a string through its [`Display`] implementation and returned.
///
/// # Notes
///
/// This function currently requires a `Nightly` Rust version. It is tied to the `backtrace_support`
/// config, which is set by the build script.
///
/// [`Error`]: std::error::Error
/// [`Backtrace`]: std::backtrace::Backtrace
/// [`Display`]: std::fmt::Display
#[cfg(not(tarpaulin_include))]
#[cfg(backtrace_support)]
pub fn backtrace_message<E>(error: &E) -> Option<String>
where
    E: std::error::Error,
{
    std::error::request_ref::<std::backtrace::Backtrace>(error)
        .map(|backtrace| format!("{:#}", backtrace))
}

#[cfg(not(tarpaulin_include))]
#[cfg(not(backtrace_support))]
#[doc(hidden)]
pub fn backtrace_message<E>(_error: &E) -> Option<String>
where
    E: std::error::Error,
{
    None
}
