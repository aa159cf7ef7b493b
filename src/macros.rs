//! Level-named logging macros that capture the call site's source
//! coordinates. The expansion is a plain [`Registry::log_at`] call; the
//! macros exist only because `file!()` and `line!()` must expand in the
//! caller's crate.
//!
//! [`Registry::log_at`]: crate::Registry::log_at

/// Logs at `Trace`, stamping the caller's module path, file, and line.
#[macro_export]
macro_rules! log_trace {
    ($registry:expr, $module:expr, $message:expr) => {
        $registry.log_at(
            $module,
            $crate::Level::Trace,
            $message,
            Some(module_path!()),
            Some(file!()),
            Some(line!()),
        )
    };
}

/// Logs at `Debug`, stamping the caller's module path, file, and line.
#[macro_export]
macro_rules! log_debug {
    ($registry:expr, $module:expr, $message:expr) => {
        $registry.log_at(
            $module,
            $crate::Level::Debug,
            $message,
            Some(module_path!()),
            Some(file!()),
            Some(line!()),
        )
    };
}

/// Logs at `Info`, stamping the caller's module path, file, and line.
#[macro_export]
macro_rules! log_info {
    ($registry:expr, $module:expr, $message:expr) => {
        $registry.log_at(
            $module,
            $crate::Level::Info,
            $message,
            Some(module_path!()),
            Some(file!()),
            Some(line!()),
        )
    };
}

/// Logs at `Warning`, stamping the caller's module path, file, and line.
#[macro_export]
macro_rules! log_warning {
    ($registry:expr, $module:expr, $message:expr) => {
        $registry.log_at(
            $module,
            $crate::Level::Warning,
            $message,
            Some(module_path!()),
            Some(file!()),
            Some(line!()),
        )
    };
}

/// Logs at `Error`, stamping the caller's module path, file, and line.
#[macro_export]
macro_rules! log_error {
    ($registry:expr, $module:expr, $message:expr) => {
        $registry.log_at(
            $module,
            $crate::Level::Error,
            $message,
            Some(module_path!()),
            Some(file!()),
            Some(line!()),
        )
    };
}

/// Logs at `Fatal`, stamping the caller's module path, file, and line.
#[macro_export]
macro_rules! log_fatal {
    ($registry:expr, $module:expr, $message:expr) => {
        $registry.log_at(
            $module,
            $crate::Level::Fatal,
            $message,
            Some(module_path!()),
            Some(file!()),
            Some(line!()),
        )
    };
}
