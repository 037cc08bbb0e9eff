#![forbid(unsafe_code)]

//! Configuration for the browser binding.
//!
//! Options arrive from JS as a JSON string; absent fields keep their
//! defaults, which match the conventional markup this binding was written
//! for (`.nav-link` anchors, `section[id]` regions, a `.logo` element, an
//! `active` class, and a `home` section).

use serde::{Deserialize, Serialize};

use scrollspy_core::ViewportBand;

/// Binding configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpyOptions {
    /// Selector for navigation-link elements.
    pub nav_link_selector: String,
    /// Selector for section elements. Sections are matched to links by
    /// their `id` attribute.
    pub section_selector: String,
    /// Selector for the distinguished logo element.
    pub logo_selector: String,
    /// Class toggled on the active navigation link.
    pub active_class: String,
    /// Identifier of the section the logo always scrolls to.
    pub home_id: String,
    /// Top edge of the viewport band, as a fraction of viewport height.
    pub band_top: f32,
    /// Bottom edge of the viewport band, as a fraction of viewport height.
    pub band_bottom: f32,
    /// Attribute naming a link's scroll destination (href-style, a leading
    /// `#` is stripped).
    pub link_href_attr: String,
    /// Attribute naming the identifier visibility notifications are matched
    /// against. Links without it fall back to the scroll destination.
    pub link_match_attr: String,
}

impl Default for SpyOptions {
    fn default() -> Self {
        Self {
            nav_link_selector: ".nav-link".to_owned(),
            section_selector: "section[id]".to_owned(),
            logo_selector: ".logo".to_owned(),
            active_class: "active".to_owned(),
            home_id: "home".to_owned(),
            band_top: 0.30,
            band_bottom: 0.70,
            link_href_attr: "href".to_owned(),
            link_match_attr: "data-section".to_owned(),
        }
    }
}

impl SpyOptions {
    /// Parse options from JSON. Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(json).map_err(OptionsError::Json)
    }

    /// The viewport band these options describe (fractions clamped).
    #[must_use]
    pub fn band(&self) -> ViewportBand {
        ViewportBand::new(self.band_top, self.band_bottom)
    }

    /// Root margins for the intersection observer, shrinking the viewport
    /// to the configured band. Rendered as whole percentages, e.g.
    /// `"-30% 0px -30% 0px"` for the default band.
    #[must_use]
    pub fn root_margin(&self) -> String {
        let (above, below) = self.band().exclusion_margins();
        format!("-{}% 0px -{}% 0px", percent(above), percent(below))
    }
}

fn percent(fraction: f32) -> u32 {
    (fraction * 100.0).round() as u32
}

/// Option-parsing error.
#[derive(Debug)]
pub enum OptionsError {
    /// The options string was not valid JSON for this schema.
    Json(serde_json::Error),
}

impl core::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid options JSON: {err}"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_conventional_markup() {
        let opts = SpyOptions::default();
        assert_eq!(opts.nav_link_selector, ".nav-link");
        assert_eq!(opts.section_selector, "section[id]");
        assert_eq!(opts.logo_selector, ".logo");
        assert_eq!(opts.active_class, "active");
        assert_eq!(opts.home_id, "home");
        assert_eq!(opts.link_href_attr, "href");
        assert_eq!(opts.link_match_attr, "data-section");
    }

    #[test]
    fn default_root_margin_excludes_thirty_percent_per_edge() {
        assert_eq!(SpyOptions::default().root_margin(), "-30% 0px -30% 0px");
    }

    #[test]
    fn custom_band_renders_whole_percent_margins() {
        let opts = SpyOptions {
            band_top: 0.25,
            band_bottom: 0.9,
            ..Default::default()
        };
        assert_eq!(opts.root_margin(), "-25% 0px -10% 0px");
    }

    #[test]
    fn out_of_range_band_clamps_before_rendering() {
        let opts = SpyOptions {
            band_top: -1.0,
            band_bottom: 5.0,
            ..Default::default()
        };
        assert_eq!(opts.root_margin(), "-0% 0px -0% 0px");
        assert_eq!(opts.band(), ViewportBand::new(0.0, 1.0));
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let opts = SpyOptions::from_json(r#"{"active_class":"current","band_top":0.2}"#).unwrap();
        assert_eq!(opts.active_class, "current");
        assert_eq!(opts.band_top, 0.2);
        assert_eq!(opts.nav_link_selector, ".nav-link");
        assert_eq!(opts.band_bottom, 0.7);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = SpyOptions::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("invalid options JSON"));
    }

    #[test]
    fn options_round_trip_through_json() {
        let opts = SpyOptions {
            home_id: "top".to_owned(),
            ..Default::default()
        };
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(SpyOptions::from_json(&json).unwrap(), opts);
    }
}
