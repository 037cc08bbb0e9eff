#![forbid(unsafe_code)]

//! The scroll-spy navigation controller.
//!
//! One controller is constructed per page from the static element snapshot.
//! The host pushes events in via [`NavController::handle`]; the controller
//! updates its active-link state and returns the commands the host must
//! apply. It never touches the page itself.
//!
//! # Invariants
//!
//! 1. At most one link is active at any time. Activation is a full reset:
//!    every emitted [`NavCommand::MarkActive`] means "clear all, set one".
//! 2. The outcome of a visibility batch is independent of the order the
//!    host delivered its records in: among records entering the band, the
//!    greatest overlap ratio wins, with ties resolved to the lowest section
//!    index (document order).
//! 3. Leaving the band never clears the marker; only entry events move it.
//!
//! # Failure Modes
//!
//! All lookups are lenient. A link whose target matches no section, or a
//! visibility record naming a section with no matching link, produces no
//! commands and no error.

use crate::band::ViewportBand;
use crate::event::{NavCommand, PageEvent, VisibilityRecord};
use crate::page::PageMap;

/// Section identifier the logo always scrolls to unless overridden.
const DEFAULT_HOME_ID: &str = "home";

/// Stateful scroll-spy controller: events in, commands out.
///
/// # Lifecycle
///
/// 1. [`NavController::new`] — create from the page snapshot and band.
/// 2. [`NavController::initialize`] — call once; seeds the first link
///    active and returns the seeding command.
/// 3. [`NavController::handle`] — call for every host event.
#[derive(Debug, Clone)]
pub struct NavController {
    page: PageMap,
    band: ViewportBand,
    home_id: String,

    /// Currently active link (None until seeded).
    active: Option<usize>,

    /// Diagnostic: total active-link switches.
    switches: u64,
}

impl NavController {
    /// Create a controller over a page snapshot.
    #[must_use]
    pub fn new(page: PageMap, band: ViewportBand) -> Self {
        Self {
            page,
            band,
            home_id: DEFAULT_HOME_ID.to_owned(),
            active: None,
            switches: 0,
        }
    }

    /// Override the section identifier the logo scrolls to.
    pub fn set_home_id(&mut self, id: impl Into<String>) {
        self.home_id = id.into();
    }

    /// Seed the starting state: the first link in the collection is marked
    /// active unconditionally, regardless of actual scroll position.
    ///
    /// Returns the commands to apply, empty when the page has no links.
    pub fn initialize(&mut self) -> Vec<NavCommand> {
        if self.page.link_count() == 0 {
            return Vec::new();
        }
        self.set_active(0)
    }

    /// Process one host event and return the commands to apply.
    pub fn handle(&mut self, event: &PageEvent) -> Vec<NavCommand> {
        match event {
            PageEvent::LinkActivated { link } => self.activate_link(*link),
            PageEvent::LogoActivated => self.scroll_home(),
            PageEvent::Visibility { records } => self.track(records),
        }
    }

    /// Currently active link, if any.
    #[inline]
    #[must_use]
    pub const fn active_link(&self) -> Option<usize> {
        self.active
    }

    /// The viewport band this controller was configured with.
    #[inline]
    #[must_use]
    pub const fn band(&self) -> ViewportBand {
        self.band
    }

    /// The page snapshot this controller reads from.
    #[inline]
    #[must_use]
    pub const fn page(&self) -> &PageMap {
        &self.page
    }

    /// Number of active-link switches so far (diagnostic).
    #[inline]
    #[must_use]
    pub const fn switch_count(&self) -> u64 {
        self.switches
    }

    // -----------------------------------------------------------------------
    // Internal handlers
    // -----------------------------------------------------------------------

    /// Click-to-scroll: resolve the link's target section and scroll to it.
    /// A dangling or absent target is a silent no-op.
    fn activate_link(&self, link: usize) -> Vec<NavCommand> {
        match self.page.scroll_target_of(link) {
            Some(section) => vec![NavCommand::ScrollTo {
                section: section.index,
            }],
            None => {
                crate::trace!(link, "activation target resolves to no section");
                Vec::new()
            }
        }
    }

    /// The logo always scrolls to the home section, ignoring whatever
    /// target the logo element itself carries.
    fn scroll_home(&self) -> Vec<NavCommand> {
        match self.page.section_by_id(&self.home_id) {
            Some(section) => vec![NavCommand::ScrollTo {
                section: section.index,
            }],
            None => {
                crate::trace!(home_id = %self.home_id, "no home section on this page");
                Vec::new()
            }
        }
    }

    /// Visibility batch: pick the winning entry record, mark its link.
    fn track(&mut self, records: &[VisibilityRecord]) -> Vec<NavCommand> {
        let Some(winner) = Self::winning_entry(records) else {
            return Vec::new();
        };
        let Some(section) = self.page.section(winner.section) else {
            crate::trace!(section = winner.section, "visibility record out of range");
            return Vec::new();
        };
        let Some(link) = self.page.link_matching(&section.id) else {
            crate::trace!(id = %section.id, "no link matches visible section");
            return Vec::new();
        };
        self.set_active(link.index)
    }

    /// The record that decides the new active link: entering the band, with
    /// the greatest overlap ratio; ties go to the lowest section index.
    fn winning_entry(records: &[VisibilityRecord]) -> Option<&VisibilityRecord> {
        let mut best: Option<&VisibilityRecord> = None;
        for rec in records.iter().filter(|r| r.entered) {
            best = match best {
                None => Some(rec),
                Some(cur) => {
                    let (a, b) = (normalized_ratio(rec), normalized_ratio(cur));
                    if a > b || (a == b && rec.section < cur.section) {
                        Some(rec)
                    } else {
                        Some(cur)
                    }
                }
            };
        }
        best
    }

    /// Full-reset activation. Re-entry of the current link re-emits the
    /// (idempotent) command without counting as a switch.
    fn set_active(&mut self, link: usize) -> Vec<NavCommand> {
        if self.active != Some(link) {
            self.switches += 1;
            crate::debug!(link, switches = self.switches, "active link changed");
        }
        self.active = Some(link);
        vec![NavCommand::MarkActive { link }]
    }
}

/// Hosts deserialize ratios from JSON; non-finite values count as zero
/// overlap so comparisons stay total.
fn normalized_ratio(rec: &VisibilityRecord) -> f32 {
    if rec.ratio.is_finite() {
        rec.ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
