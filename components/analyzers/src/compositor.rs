//! Compositor advisory scan
//!
//! Static scan of computed styles for properties known to promote GPU
//! compositing. Informational only — the output never feeds into a grade.

use diag_types::{CompositorAdvisory, ElementStyle};

const THREE_D_MARKERS: [&str; 6] = [
    "translate3d",
    "translatez",
    "rotate3d",
    "scale3d",
    "matrix3d",
    "perspective",
];

fn advisory(style: &ElementStyle, property: &str, value: &str, note: &str) -> CompositorAdvisory {
    CompositorAdvisory {
        selector: style.selector.clone(),
        property: property.to_string(),
        value: value.to_string(),
        note: note.to_string(),
    }
}

/// Scan a subtree's computed styles for layer-promoting properties
pub fn scan_compositor_hints(styles: &[ElementStyle]) -> Vec<CompositorAdvisory> {
    let mut advisories = Vec::new();

    for style in styles {
        if let Some(transform) = &style.transform {
            let lowered = transform.to_lowercase();
            if THREE_D_MARKERS.iter().any(|m| lowered.contains(m)) {
                advisories.push(advisory(
                    style,
                    "transform",
                    transform,
                    "3-D transform promotes the element to its own composite layer",
                ));
            }
        }

        if style.opacity < 1.0 {
            advisories.push(advisory(
                style,
                "opacity",
                &format!("{}", style.opacity),
                "non-unit opacity forces blending on a separate layer",
            ));
        }

        if let Some(filter) = &style.filter {
            if !filter.eq_ignore_ascii_case("none") {
                advisories.push(advisory(
                    style,
                    "filter",
                    filter,
                    "filters are applied on a composite layer",
                ));
            }
        }

        if style.position.eq_ignore_ascii_case("fixed")
            || style.position.eq_ignore_ascii_case("sticky")
        {
            advisories.push(advisory(
                style,
                "position",
                &style.position,
                "fixed/sticky positioning keeps the element on its own layer during scroll",
            ));
        }

        if let Some(will_change) = &style.will_change {
            if !will_change.eq_ignore_ascii_case("auto") {
                advisories.push(advisory(
                    style,
                    "will-change",
                    will_change,
                    "will-change hints the compositor to pre-promote the element",
                ));
            }
        }
    }

    advisories
}
