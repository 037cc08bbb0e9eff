#![forbid(unsafe_code)]

//! The static page snapshot: sections, navigation links, and lookups.
//!
//! Both collections are captured once when the binding initializes and are
//! assumed static for the page lifetime; there is no re-discovery. All
//! lookups are lenient: a dangling reference resolves to `None`, never to an
//! error.

/// A page region with an identifier unique within the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Identifier unique among sections.
    pub id: String,
    /// Document position among observed sections.
    pub index: usize,
}

/// A navigation entry.
///
/// The scroll destination and the active-matching identifier may come from
/// different attributes on the same element, so they are stored
/// independently. Both are bare section identifiers (any `#` prefix is the
/// host's concern).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavLink {
    /// Section identifier this link scrolls to, if any.
    pub scroll_target: Option<String>,
    /// Section identifier visibility notifications are matched against.
    pub match_id: Option<String>,
    /// Position in the navigation-link collection.
    pub index: usize,
}

/// Snapshot of the page's navigation links and sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMap {
    sections: Vec<Section>,
    links: Vec<NavLink>,
}

impl PageMap {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section in document order.
    pub fn push_section(&mut self, id: impl Into<String>) {
        let index = self.sections.len();
        self.sections.push(Section {
            id: id.into(),
            index,
        });
    }

    /// Append a navigation link in document order.
    pub fn push_link(&mut self, scroll_target: Option<String>, match_id: Option<String>) {
        let index = self.links.len();
        self.links.push(NavLink {
            scroll_target,
            match_id,
            index,
        });
    }

    /// All sections, in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All navigation links, in document order.
    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    /// Number of sections.
    #[inline]
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of navigation links.
    #[inline]
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Section at `index`, if in range.
    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// First section whose identifier equals `id`.
    #[must_use]
    pub fn section_by_id(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// First link whose active-matching identifier equals `id`.
    #[must_use]
    pub fn link_matching(&self, id: &str) -> Option<&NavLink> {
        self.links
            .iter()
            .find(|l| l.match_id.as_deref() == Some(id))
    }

    /// The section a link scrolls to, if the link exists and its target
    /// resolves.
    #[must_use]
    pub fn scroll_target_of(&self, link: usize) -> Option<&Section> {
        let target = self.links.get(link)?.scroll_target.as_deref()?;
        self.section_by_id(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_page() -> PageMap {
        let mut page = PageMap::new();
        page.push_section("home");
        page.push_section("about");
        page.push_section("projects");
        page.push_link(Some("home".into()), Some("home".into()));
        page.push_link(Some("about".into()), Some("about".into()));
        page.push_link(Some("missing".into()), None);
        page
    }

    #[test]
    fn indices_follow_insertion_order() {
        let page = sample_page();
        assert_eq!(page.section_count(), 3);
        assert_eq!(page.sections()[2].index, 2);
        assert_eq!(page.links()[1].index, 1);
    }

    #[test]
    fn section_by_id_finds_unique_match() {
        let page = sample_page();
        assert_eq!(page.section_by_id("about").map(|s| s.index), Some(1));
        assert!(page.section_by_id("nope").is_none());
    }

    #[test]
    fn link_matching_ignores_links_without_match_id() {
        let page = sample_page();
        assert_eq!(page.link_matching("home").map(|l| l.index), Some(0));
        assert!(page.link_matching("missing").is_none());
    }

    #[test]
    fn scroll_target_resolves_through_both_hops() {
        let page = sample_page();
        assert_eq!(page.scroll_target_of(1).map(|s| s.id.as_str()), Some("about"));
        // Dangling target identifier.
        assert!(page.scroll_target_of(2).is_none());
        // Out-of-range link index.
        assert!(page.scroll_target_of(99).is_none());
    }
}
