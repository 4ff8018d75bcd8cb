//! Effective render attributes of a box from its overrides and page defaults

use crate::model::page::{Page, PageBox};
use crate::sampling::random::RandomSource;

/// How a box border is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    /// No border (width zero)
    None,
    /// Solid line
    Solid,
}

/// Fully resolved visual attributes of one box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveStyle {
    /// Box background color
    pub background_color: String,
    /// Box text color
    pub text_color: String,
    /// Border color
    pub border_color: String,
    /// Border width in pixels
    pub border_width: u32,
    /// Border drawing style
    pub border_style: BorderStyle,
    /// Corner radius in pixels
    pub border_radius: u32,
    /// Outer spacing in pixels
    pub gap: u32,
    /// Font for roll results
    pub font_family: String,
    /// Font for the title
    pub title_font_family: String,
    /// Body text size in pixels
    pub text_size: u32,
}

/// Resolve the style a box renders with
///
/// Each color is the box override when set, otherwise the page default.
/// With random colors enabled and a non-empty palette, background, text and
/// border colors are instead drawn independently from the palette. Results
/// depend on the page's current settings and must not be cached.
pub fn resolve_effective_style<R: RandomSource + ?Sized>(
    page: &Page,
    page_box: &PageBox,
    rng: &mut R,
) -> EffectiveStyle {
    let style = &page.style;

    let mut background_color = page_box
        .background_color()
        .unwrap_or(&style.default_background_color)
        .to_string();
    let mut text_color = page_box
        .text_color()
        .unwrap_or(&style.default_text_color)
        .to_string();
    let mut border_color = style.default_border_color.clone();

    if style.use_random_colors && !style.color_palette.is_empty() {
        for slot in [&mut background_color, &mut text_color, &mut border_color] {
            if let Some(color) = rng
                .next_index(style.color_palette.len())
                .and_then(|index| style.color_palette.get(index))
            {
                slot.clone_from(color);
            }
        }
    }

    let border_style = if style.default_border_width == 0 {
        BorderStyle::None
    } else {
        BorderStyle::Solid
    };

    EffectiveStyle {
        background_color,
        text_color,
        border_color,
        border_width: style.default_border_width,
        border_style,
        border_radius: style.border_radius,
        gap: style.gap,
        font_family: style.font_family.clone(),
        title_font_family: style.title_font_family.clone(),
        text_size: style.text_size,
    }
}
