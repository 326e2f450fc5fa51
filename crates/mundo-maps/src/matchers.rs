//! Ordered pattern matchers used by [`crate::normalize_map_link`].
//!
//! Each matcher inspects the trimmed candidate and either claims it with a
//! [`Target`] or passes. The first matcher to claim wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{EMBED_BASE, EMBED_SUFFIX};

/// Host fragment that identifies the supported map service.
const MAPS_PATH_HOST: &str = "google.com/maps";
/// Legacy host spelling accepted for extraction.
const MAPS_LEGACY_HOST: &str = "maps.google.com";

/// Characters `encodeURIComponent` leaves untouched that `urlencoding` escapes.
const COMPONENT_SAFE: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Location extracted from a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Already embeddable; emitted verbatim.
    Embed(String),
    /// Decimal latitude/longitude pair, kept exactly as written.
    Coordinates {
        /// Latitude text.
        lat: String,
        /// Longitude text.
        lng: String,
    },
    /// Decoded free-text place name.
    Place(String),
}

impl Target {
    /// Render the canonical embed URL for this target.
    #[must_use]
    pub fn render(self) -> String {
        match self {
            Self::Embed(url) => url,
            Self::Coordinates { lat, lng } => format!("{EMBED_BASE}{lat},{lng}{EMBED_SUFFIX}"),
            Self::Place(name) => format!("{EMBED_BASE}{}{EMBED_SUFFIX}", encode_component(&name)),
        }
    }
}

struct Patterns {
    iframe_src: Regex,
    at_pair: Regex,
    data_pair: Regex,
    query_pair: Regex,
    place_segment: Regex,
    ll_pair: Regex,
    query_text: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            iframe_src: Regex::new(r#"src=["']([^"']+)["']"#)?,
            at_pair: Regex::new(r"@(-?\d+\.\d+),(-?\d+\.\d+)")?,
            data_pair: Regex::new(r"!3d(-?\d+\.\d+)!4d(-?\d+\.\d+)")?,
            query_pair: Regex::new(r"[?&]q=(-?\d+\.\d+),(-?\d+\.\d+)")?,
            place_segment: Regex::new(r"place/([^/]+)")?,
            ll_pair: Regex::new(r"[?&]ll=(-?\d+\.\d+),(-?\d+\.\d+)")?,
            query_text: Regex::new(r"[?&]q=([^&]+)")?,
        })
    }
}

static PATTERNS: Lazy<Option<Patterns>> = Lazy::new(|| Patterns::compile().ok());

type Matcher = fn(&Patterns, &str) -> Option<Target>;

const MATCHERS: [Matcher; 8] = [
    prepared_embed,
    iframe_source,
    at_coordinates,
    data_coordinates,
    query_coordinates,
    place_name,
    ll_coordinates,
    query_place_name,
];

/// Run the matchers in order and return the first claim.
///
/// Shortened `goo.gl/maps` links and any other unrecognised shape fall off the end.
pub(crate) fn first_match(candidate: &str) -> Option<Target> {
    let patterns = PATTERNS.as_ref()?;
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(patterns, candidate))
}

pub(crate) fn qualifies_as_embed(value: &str) -> bool {
    value.contains(MAPS_PATH_HOST) && (value.contains("/embed") || value.contains("output=embed"))
}

fn references_maps_host(value: &str) -> bool {
    value.contains(MAPS_PATH_HOST) || value.contains(MAPS_LEGACY_HOST)
}

fn prepared_embed(_: &Patterns, candidate: &str) -> Option<Target> {
    // Markup is unwrapped by `iframe_source` instead of echoed back.
    if candidate.contains('<') || !qualifies_as_embed(candidate) {
        return None;
    }
    Some(Target::Embed(candidate.to_string()))
}

fn iframe_source(patterns: &Patterns, candidate: &str) -> Option<Target> {
    let source = patterns.iframe_src.captures(candidate)?.get(1)?.as_str();
    qualifies_as_embed(source).then(|| Target::Embed(source.to_string()))
}

fn coordinate_pair(pattern: &Regex, candidate: &str) -> Option<Target> {
    if !references_maps_host(candidate) {
        return None;
    }
    let captures = pattern.captures(candidate)?;
    Some(Target::Coordinates {
        lat: captures.get(1)?.as_str().to_string(),
        lng: captures.get(2)?.as_str().to_string(),
    })
}

fn at_coordinates(patterns: &Patterns, candidate: &str) -> Option<Target> {
    coordinate_pair(&patterns.at_pair, candidate)
}

fn data_coordinates(patterns: &Patterns, candidate: &str) -> Option<Target> {
    coordinate_pair(&patterns.data_pair, candidate)
}

fn query_coordinates(patterns: &Patterns, candidate: &str) -> Option<Target> {
    coordinate_pair(&patterns.query_pair, candidate)
}

fn ll_coordinates(patterns: &Patterns, candidate: &str) -> Option<Target> {
    coordinate_pair(&patterns.ll_pair, candidate)
}

fn decoded_capture(pattern: &Regex, candidate: &str) -> Option<Target> {
    if !references_maps_host(candidate) {
        return None;
    }
    let raw = pattern.captures(candidate)?.get(1)?.as_str().replace('+', " ");
    let decoded = urlencoding::decode(&raw).ok()?;
    Some(Target::Place(decoded.into_owned()))
}

fn place_name(patterns: &Patterns, candidate: &str) -> Option<Target> {
    decoded_capture(&patterns.place_segment, candidate)
}

fn query_place_name(patterns: &Patterns, candidate: &str) -> Option<Target> {
    decoded_capture(&patterns.query_text, candidate)
}

fn encode_component(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    for (escaped, raw) in COMPONENT_SAFE {
        encoded = encoded.replace(escaped, raw);
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert!(PATTERNS.is_some());
    }

    #[test]
    fn encode_component_matches_browser_semantics() {
        assert_eq!(encode_component("a b/c?d"), "a%20b%2Fc%3Fd");
        assert_eq!(encode_component("it's (ok)!*"), "it's%20(ok)!*");
        assert_eq!(encode_component("Café"), "Caf%C3%A9");
    }

    #[test]
    fn coordinate_matchers_require_the_map_host() {
        let Some(patterns) = PATTERNS.as_ref() else {
            panic!("patterns failed to compile");
        };
        assert_eq!(at_coordinates(patterns, "https://example.com/@1.5,2.5"), None);
        assert_eq!(
            at_coordinates(patterns, "https://maps.google.com/@1.5,2.5"),
            Some(Target::Coordinates {
                lat: "1.5".to_string(),
                lng: "2.5".to_string(),
            })
        );
    }
}
