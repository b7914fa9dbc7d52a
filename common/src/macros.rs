//! Leveled output macros shared by every crate in the workspace.
//!
//! These forward to [`tracing`] so the CLI formatter decides how each level
//! is rendered. `success!` is an info-level event on a dedicated target that
//! the formatter styles differently.

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "adres::success", $($arg)*)
    };
}
