#![forbid(unsafe_code)]

//! `scrollspy-core` provides the host-agnostic half of scroll-spy navigation.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (a browser binding, a
//!   test harness) pushes activation and visibility events in.
//! - **Effects out, never applied**: handlers return [`event::NavCommand`]
//!   values; the host owns scrolling and marker application.
//! - **Deterministic**: the outcome of a visibility batch never depends on
//!   the order the host delivered its records in.
//!
//! This crate intentionally does not bind to `wasm-bindgen`. The primary
//! purpose is to provide controller building blocks that `scrollspy-web`
//! wraps with a stable JS API.

pub mod band;
pub mod controller;
pub mod event;
pub mod logging;
pub mod page;
pub mod replay;

pub use band::ViewportBand;
pub use controller::NavController;
pub use event::{NavCommand, PageEvent, VisibilityRecord};
pub use page::{NavLink, PageMap, Section};
pub use replay::EventScript;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
