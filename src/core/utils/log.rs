//! Console logging macros
//!
//! In wasm32: forwards to the browser console through web-sys.
//! Native builds (tests, benches): arguments are type-checked but nothing
//! is printed, because web-sys imports cannot be called outside wasm.
//!
//! Usage:
//! ```rust
//! use particula_rigid::engine_log;
//!
//! let bodies = 3;
//! engine_log!("world created with {} bodies", bodies);
//! ```

/// Info-level message to the console
#[macro_export]
macro_rules! engine_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Warning-level message to the console
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
