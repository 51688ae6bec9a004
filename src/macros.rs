macro_rules! bitpos {
    ($idx:expr) => {{
        let idx = $idx;
        (idx >> 6, idx & 63)
    }};
}

/// Emits a `tracing::trace!` event when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
macro_rules! trace_alloc {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_alloc {
    ($($arg:tt)*) => {{}};
}

pub(crate) use bitpos;
pub(crate) use trace_alloc;
