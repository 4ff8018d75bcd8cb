//! Pages: grid layouts of boxes with page-wide style defaults

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::io::configuration::{
    DEFAULT_BORDER_RADIUS, DEFAULT_BORDER_WIDTH, DEFAULT_BOX_BACKGROUND,
    DEFAULT_BOX_BORDER_COLOR, DEFAULT_BOX_TEXT_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_GAP,
    DEFAULT_PAGE_BACKGROUND, DEFAULT_TEXT_SIZE, DEFAULT_THEME, MAX_BORDER_RADIUS,
    MAX_BORDER_WIDTH, MAX_GAP, MAX_TEXT_SIZE, MIN_TEXT_SIZE,
};
use crate::io::error::{Result, RollpageError, invalid_parameter};
use crate::layout::geometry::Rect;
use crate::model::table::TableId;

/// Identifier of a stored page
pub type PageId = Uuid;

/// A rectangular region of a page, optionally bound to a roll table
///
/// Boxes are only created by the layout engine, which guarantees every box
/// has a valid on-grid position that overlaps no sibling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBox {
    id: String,
    #[serde(flatten)]
    rect: Rect,
    #[serde(default)]
    table_ref: Option<TableId>,
    #[serde(default)]
    custom_title: Option<String>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    text_color: Option<String>,
}

impl PageBox {
    pub(crate) const fn new(id: String, rect: Rect) -> Self {
        Self {
            id,
            rect,
            table_ref: None,
            custom_title: None,
            background_color: None,
            text_color: None,
        }
    }

    /// Unique id within the page
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Occupied rectangle
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Bound table, if any
    pub const fn table_ref(&self) -> Option<TableId> {
        self.table_ref
    }

    /// Title set by the page author
    pub fn custom_title(&self) -> Option<&str> {
        self.custom_title.as_deref()
    }

    /// Background color override
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    /// Text color override
    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub(crate) const fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub(crate) fn apply(&mut self, update: BoxContentUpdate) {
        update.table_ref.apply_to(&mut self.table_ref);
        update.custom_title.apply_to(&mut self.custom_title);
        update.background_color.apply_to(&mut self.background_color);
        update.text_color.apply_to(&mut self.text_color);
    }
}

/// Change to one optional box field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Leave the field as it is
    #[default]
    Keep,
    /// Reset the field to unset
    Clear,
    /// Replace the field value
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Set when `Some`, clear when `None`
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }

    fn apply_to(self, field: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *field = None,
            Self::Set(value) => *field = Some(value),
        }
    }
}

/// Partial update of a box's content fields; geometry is never touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxContentUpdate {
    /// Bound table
    pub table_ref: FieldUpdate<TableId>,
    /// Author title
    pub custom_title: FieldUpdate<String>,
    /// Background color override
    pub background_color: FieldUpdate<String>,
    /// Text color override
    pub text_color: FieldUpdate<String>,
}

/// Page-wide look shared by every box unless a box overrides it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageStyle {
    /// Theme name
    pub theme: String,
    /// Page background color
    pub background_color: String,
    /// Whether editors draw the cell grid
    pub show_grid: bool,
    /// Box background color unless overridden
    pub default_background_color: String,
    /// Box text color unless overridden
    pub default_text_color: String,
    /// Box border width in pixels
    pub default_border_width: u32,
    /// Box border color
    pub default_border_color: String,
    /// Box corner radius in pixels
    pub border_radius: u32,
    /// Spacing between boxes in pixels
    pub gap: u32,
    /// Font for roll results
    pub font_family: String,
    /// Font for box titles
    pub title_font_family: String,
    /// Body text size in pixels
    pub text_size: u32,
    /// Colors drawn from when random colors are enabled
    pub color_palette: Vec<String>,
    /// Draw box colors from the palette instead of the defaults
    pub use_random_colors: bool,
}

impl Default for PageStyle {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            background_color: DEFAULT_PAGE_BACKGROUND.to_string(),
            show_grid: true,
            default_background_color: DEFAULT_BOX_BACKGROUND.to_string(),
            default_text_color: DEFAULT_BOX_TEXT_COLOR.to_string(),
            default_border_width: DEFAULT_BORDER_WIDTH,
            default_border_color: DEFAULT_BOX_BORDER_COLOR.to_string(),
            border_radius: DEFAULT_BORDER_RADIUS,
            gap: DEFAULT_GAP,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            title_font_family: DEFAULT_FONT_FAMILY.to_string(),
            text_size: DEFAULT_TEXT_SIZE,
            color_palette: Vec::new(),
            use_random_colors: false,
        }
    }
}

impl PageStyle {
    /// Check numeric settings against their accepted ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first out-of-range setting
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("borderRadius", self.border_radius, 0, MAX_BORDER_RADIUS),
            ("gap", self.gap, 0, MAX_GAP),
            (
                "defaultBorderWidth",
                self.default_border_width,
                0,
                MAX_BORDER_WIDTH,
            ),
            ("textSize", self.text_size, MIN_TEXT_SIZE, MAX_TEXT_SIZE),
        ];
        for (parameter, value, min, max) in ranges {
            if !(min..=max).contains(&value) {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be within {min}..={max}"),
                ));
            }
        }
        Ok(())
    }

    /// Store a palette and derive the default colors from it
    ///
    /// Background takes the first color, text the second and border the
    /// third, each falling back to the first. An empty palette changes nothing.
    pub fn apply_palette(&mut self, palette: Vec<String>) {
        let Some(first) = palette.first().cloned() else {
            return;
        };
        self.default_background_color.clone_from(&first);
        self.default_text_color = palette.get(1).cloned().unwrap_or_else(|| first.clone());
        self.default_border_color = palette.get(2).cloned().unwrap_or(first);
        self.color_palette = palette;
    }
}

/// A composed page: metadata, style defaults and a layout of boxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Record id
    pub id: PageId,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Unique URL identifier, lowercase letters, digits and dashes
    pub slug: String,
    /// Id of the owning user
    pub owner: String,
    /// Labels used for filtering
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether non-owners may view the page
    #[serde(default = "default_public")]
    pub is_public: bool,
    /// Page-wide style defaults
    #[serde(default)]
    pub style: PageStyle,
    #[serde(default, rename = "layout")]
    boxes: Vec<PageBox>,
    #[serde(default)]
    next_box_seq: u64,
}

const fn default_public() -> bool {
    true
}

impl Page {
    /// Create an empty public page with default style and a fresh id
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            slug: slug.into(),
            owner: owner.into(),
            tags: Vec::new(),
            is_public: true,
            style: PageStyle::default(),
            boxes: Vec::new(),
            next_box_seq: 0,
        }
    }

    /// Boxes in display order
    pub fn boxes(&self) -> &[PageBox] {
        &self.boxes
    }

    /// Look up a box by id
    pub fn find_box(&self, id: &str) -> Option<&PageBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    /// Whether the page carries every one of the given tags
    pub fn has_all_tags(&self, tags: &[String]) -> bool {
        tags.iter().all(|tag| self.tags.contains(tag))
    }

    pub(crate) fn box_index(&self, id: &str) -> Option<usize> {
        self.boxes.iter().position(|b| b.id == id)
    }

    pub(crate) fn box_mut(&mut self, index: usize) -> Option<&mut PageBox> {
        self.boxes.get_mut(index)
    }

    pub(crate) fn push_box(&mut self, page_box: PageBox) -> Option<&PageBox> {
        self.boxes.push(page_box);
        self.boxes.last()
    }

    pub(crate) fn take_box(&mut self, index: usize) -> Option<PageBox> {
        (index < self.boxes.len()).then(|| self.boxes.remove(index))
    }

    /// Next unused box id of the form `box-N`
    pub(crate) fn allocate_box_id(&mut self) -> String {
        loop {
            self.next_box_seq += 1;
            let candidate = format!("box-{}", self.next_box_seq);
            if self.box_index(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Check metadata, style ranges and the layout invariants
    ///
    /// Used on records arriving from storage, since deserialization bypasses
    /// the layout engine.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for bad metadata or style, `OutOfBounds`
    /// for an off-grid or empty box and `Collision` for overlapping boxes
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid_parameter("name", &self.name, &"must not be empty"));
        }
        validate_slug(&self.slug)?;
        self.style.validate()?;

        let mut seen = HashSet::new();
        for (index, page_box) in self.boxes.iter().enumerate() {
            if !seen.insert(page_box.id.as_str()) {
                return Err(invalid_parameter(
                    "layout",
                    &page_box.id,
                    &"duplicate box id",
                ));
            }
            if page_box.rect.is_empty() || !page_box.rect.fits_grid() {
                return Err(RollpageError::OutOfBounds {
                    rect: page_box.rect,
                });
            }
            let conflicting: Vec<String> = self
                .boxes
                .iter()
                .skip(index + 1)
                .filter(|other| other.rect.intersects(&page_box.rect))
                .map(|other| other.id.clone())
                .collect();
            if !conflicting.is_empty() {
                return Err(RollpageError::Collision { conflicting });
            }
        }
        Ok(())
    }
}

/// Check a page slug: non-empty, lowercase ASCII letters, digits and dashes
///
/// # Errors
///
/// Returns `InvalidParameter` describing the problem
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(invalid_parameter("slug", &slug, &"must not be empty"));
    }
    if let Some(bad) = slug
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(invalid_parameter(
            "slug",
            &slug,
            &format!("character '{bad}' not allowed, use a-z, 0-9 and '-'"),
        ));
    }
    Ok(())
}
