#![forbid(unsafe_code)]

//! Browser binding for scroll-spy navigation.
//!
//! This crate is intentionally host-specific (web/WASM). It provides a
//! stable `wasm-bindgen` API surface for:
//! - discovering the navigation-link and section collections from the live
//!   document (a one-time static snapshot),
//! - intercepting link clicks and smooth-scrolling to the linked section,
//! - watching section visibility against the configured viewport band via
//!   `IntersectionObserver`, and
//! - toggling the active class on exactly one link at a time.
//!
//! All decisions live in [`scrollspy_core`]; this crate only collects DOM
//! events, feeds them to the controller, and applies the returned commands.

pub mod options;

pub use options::{OptionsError, SpyOptions};

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::ScrollSpy;

/// Native builds compile this crate as a stub so `cargo check --workspace`
/// stays green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct ScrollSpy;

#[cfg(not(target_arch = "wasm32"))]
impl ScrollSpy {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
