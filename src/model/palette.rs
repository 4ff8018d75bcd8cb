//! Color palette extraction from pasted text such as palette-generator exports

/// Length of a `#RRGGBB` color
const HEX_COLOR_LEN: usize = 7;

/// Extract `#RRGGBB` colors from free text, de-duplicated in first-seen order
///
/// Anything following the six hex digits (an alpha suffix, more hex digits,
/// punctuation) is ignored, so `#1a2b3cff` yields `#1a2b3c`.
pub fn extract_palette(text: &str) -> Vec<String> {
    let mut palette: Vec<String> = Vec::new();

    for (start, _) in text.match_indices('#') {
        let Some(candidate) = text.get(start..start + HEX_COLOR_LEN) else {
            continue;
        };
        if !is_hex_color(candidate) {
            continue;
        }
        if !palette.iter().any(|color| color == candidate) {
            palette.push(candidate.to_string());
        }
    }

    palette
}

/// Whether `value` is a single `#RRGGBB` color
pub fn is_hex_color(value: &str) -> bool {
    value.len() == HEX_COLOR_LEN
        && value.starts_with('#')
        && value.chars().skip(1).all(|c| c.is_ascii_hexdigit())
}
