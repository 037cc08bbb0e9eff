#![forbid(unsafe_code)]

//! Deterministic, JSON-friendly event schema for scroll-spy navigation.
//!
//! The host (a browser binding, a replay harness) is expected to provide:
//! - element indices into the page snapshot, and
//! - band-overlap ratios as reported by its visibility machinery.
//!
//! Everything here serializes as snake_case-tagged JSON so live sessions can
//! be recorded and replayed byte-for-byte.

use serde::{Deserialize, Serialize};

/// One section whose band-overlap state crossed the boundary since the last
/// notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityRecord {
    /// Index of the section in the page snapshot.
    pub section: usize,
    /// Whether the section is now inside the band.
    pub entered: bool,
    /// Overlap proportion at notification time, nominally `0.0..=1.0`.
    pub ratio: f32,
}

impl VisibilityRecord {
    /// Record a section entering the band with the given overlap ratio.
    #[must_use]
    pub const fn entered(section: usize, ratio: f32) -> Self {
        Self {
            section,
            entered: true,
            ratio,
        }
    }

    /// Record a section leaving the band.
    #[must_use]
    pub const fn left(section: usize) -> Self {
        Self {
            section,
            entered: false,
            ratio: 0.0,
        }
    }
}

/// Host-delivered events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PageEvent {
    /// A navigation link was activated (e.g. clicked), identified by its
    /// position in the link collection. Default anchor navigation is assumed
    /// suppressed by the host.
    LinkActivated { link: usize },
    /// The distinguished logo element was activated.
    LogoActivated,
    /// A batch of visibility changes, one record per section that crossed
    /// the band boundary.
    Visibility { records: Vec<VisibilityRecord> },
}

/// Effects returned to the host.
///
/// The controller never touches the page itself; these are the only two
/// side effects the system performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NavCommand {
    /// Smooth-scroll so the section's top edge aligns with the viewport's
    /// top edge.
    ScrollTo { section: usize },
    /// Clear the active marker from every link, then set it on exactly this
    /// one. Full reset, not a differential toggle.
    MarkActive { link: usize },
}
