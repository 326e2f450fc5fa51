#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]

//! Map-link normalisation for property locations.
//!
//! Admins paste whatever the map service handed them: a browser URL with
//! coordinates, a shareable place link, a prepared embed link, or the whole
//! iframe snippet. [`normalize_map_link`] turns each of those into a single
//! embeddable URL, or reports that no embeddable form can be derived.
//!
//! The function is pure and never fails; `None` is a normal outcome and
//! callers are expected to fall back to a plain outbound link.

mod matchers;

pub use matchers::Target;

/// Base of every canonical embed link.
pub const EMBED_BASE: &str = "https://maps.google.com/maps?q=";

/// Fixed zoom/layout parameters appended after the query.
pub const EMBED_SUFFIX: &str = "&t=&z=15&ie=UTF8&iwloc=&output=embed";

/// Normalise a pasted map reference into an embeddable URL.
///
/// Returns `None` for empty input, shortened links that would require a
/// network round-trip to resolve, and anything else that does not carry a
/// recognisable location.
///
/// Feeding a returned URL back in yields the same URL.
#[must_use]
pub fn normalize_map_link(input: &str) -> Option<String> {
    let candidate = input.trim();
    if candidate.is_empty() {
        return None;
    }
    matchers::first_match(candidate).map(Target::render)
}

/// Returns `true` when the value is already an embeddable map link.
#[must_use]
pub fn is_embed_link(value: &str) -> bool {
    matchers::qualifies_as_embed(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMBED_CASE_ONE: &str = "https://maps.google.com/maps?q=10.3934749,-75.5025325&t=&z=15&ie=UTF8&iwloc=&output=embed";

    #[test]
    fn prepared_embed_link_is_returned_unchanged() {
        assert_eq!(
            normalize_map_link(EMBED_CASE_ONE).as_deref(),
            Some(EMBED_CASE_ONE)
        );
    }

    #[test]
    fn at_coordinates_are_extracted() {
        assert_eq!(
            normalize_map_link("https://www.google.com/maps/@10.391,-75.479,15z").as_deref(),
            Some(
                "https://maps.google.com/maps?q=10.391,-75.479&t=&z=15&ie=UTF8&iwloc=&output=embed"
            )
        );
    }

    #[test]
    fn place_link_with_coordinates_prefers_coordinates() {
        assert_eq!(
            normalize_map_link("https://www.google.com/maps/place/Torre+del+Reloj/@10.4236,-75.5478")
                .as_deref(),
            Some(
                "https://maps.google.com/maps?q=10.4236,-75.5478&t=&z=15&ie=UTF8&iwloc=&output=embed"
            )
        );
    }

    #[test]
    fn shortened_links_yield_no_result() {
        assert_eq!(normalize_map_link("https://goo.gl/maps/abc123"), None);
    }

    #[test]
    fn empty_and_blank_input_yield_no_result() {
        assert_eq!(normalize_map_link(""), None);
        assert_eq!(normalize_map_link("   \n\t"), None);
    }

    #[test]
    fn normalised_output_is_a_fixed_point() {
        let inputs = [
            "https://www.google.com/maps/@10.391,-75.479,15z",
            "https://www.google.com/maps/place/Castillo+San+Felipe",
            "https://www.google.com/maps/search/?api=1&q=Playa+Blanca",
            EMBED_CASE_ONE,
        ];
        for input in inputs {
            let once = normalize_map_link(input);
            assert!(once.is_some(), "expected a result for {input}");
            let twice = once.as_deref().and_then(normalize_map_link);
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn data_parameter_coordinates_are_extracted() {
        let link = "https://www.google.com/maps/place/Hotel/data=!3m1!4b1!4m5!3m4!1s0x0:0x0!8m2!3d10.4001!4d-75.5102";
        assert_eq!(
            normalize_map_link(link).as_deref(),
            Some(
                "https://maps.google.com/maps?q=10.4001,-75.5102&t=&z=15&ie=UTF8&iwloc=&output=embed"
            )
        );
    }

    #[test]
    fn query_coordinates_are_extracted() {
        assert_eq!(
            normalize_map_link("https://maps.google.com/?q=10.5,-75.25").as_deref(),
            Some("https://maps.google.com/maps?q=10.5,-75.25&t=&z=15&ie=UTF8&iwloc=&output=embed")
        );
    }

    #[test]
    fn place_segment_is_decoded_and_reencoded() {
        assert_eq!(
            normalize_map_link("https://www.google.com/maps/place/Caf%C3%A9+Del+Mar").as_deref(),
            Some(
                "https://maps.google.com/maps?q=Caf%C3%A9%20Del%20Mar&t=&z=15&ie=UTF8&iwloc=&output=embed"
            )
        );
    }

    #[test]
    fn place_names_keep_component_safe_punctuation() {
        assert_eq!(
            normalize_map_link("https://www.google.com/maps/place/Bocagrande+(Cartagena)").as_deref(),
            Some(
                "https://maps.google.com/maps?q=Bocagrande%20(Cartagena)&t=&z=15&ie=UTF8&iwloc=&output=embed"
            )
        );
    }

    #[test]
    fn ll_coordinates_are_extracted() {
        assert_eq!(
            normalize_map_link("https://maps.google.com/maps?ll=10.42,-75.55&z=12").as_deref(),
            Some("https://maps.google.com/maps?q=10.42,-75.55&t=&z=15&ie=UTF8&iwloc=&output=embed")
        );
    }

    #[test]
    fn free_text_query_becomes_place_name() {
        assert_eq!(
            normalize_map_link("https://www.google.com/maps?q=Playa+Blanca&hl=es").as_deref(),
            Some(
                "https://maps.google.com/maps?q=Playa%20Blanca&t=&z=15&ie=UTF8&iwloc=&output=embed"
            )
        );
    }

    #[test]
    fn iframe_markup_is_unwrapped() {
        let markup = r#"<iframe src="https://www.google.com/maps/embed?pb=!1m18!1m12" width="600" height="450" loading="lazy"></iframe>"#;
        assert_eq!(
            normalize_map_link(markup).as_deref(),
            Some("https://www.google.com/maps/embed?pb=!1m18!1m12")
        );
    }

    #[test]
    fn iframe_with_foreign_source_yields_no_result() {
        let markup = r#"<iframe src='https://example.com/map'></iframe>"#;
        assert_eq!(normalize_map_link(markup), None);
    }

    #[test]
    fn integer_coordinates_are_not_accepted() {
        assert_eq!(normalize_map_link("https://www.google.com/maps/@10,-75,15z"), None);
    }

    #[test]
    fn unrelated_hosts_yield_no_result() {
        assert_eq!(normalize_map_link("https://www.openstreetmap.org/#map=15/10.4/-75.5"), None);
        assert_eq!(normalize_map_link("Cartagena, Colombia"), None);
    }

    #[test]
    fn malformed_percent_encoding_falls_through() {
        assert_eq!(normalize_map_link("https://www.google.com/maps/place/%E0%A4%A"), None);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            normalize_map_link("  https://www.google.com/maps/@10.391,-75.479,15z \n").as_deref(),
            Some(
                "https://maps.google.com/maps?q=10.391,-75.479&t=&z=15&ie=UTF8&iwloc=&output=embed"
            )
        );
    }

    #[test]
    fn embed_detection_matches_prepared_links() {
        assert!(is_embed_link(EMBED_CASE_ONE));
        assert!(!is_embed_link("https://www.google.com/maps/@10.391,-75.479,15z"));
        assert!(!is_embed_link("https://example.com/embed"));
    }
}
