//! Box placement, movement and resizing with bounds and collision checks
//!
//! Every mutating operation validates the resulting geometry before touching
//! the page, so a failed call leaves the page exactly as it was.

use tracing::debug;

use crate::io::configuration::{GRID_H, GRID_W};
use crate::io::error::{Result, RollpageError, invalid_parameter};
use crate::layout::geometry::{CellMask, Rect};
use crate::model::page::{BoxContentUpdate, Page, PageBox};

/// Check that `rect` is a legal box position on `page`
///
/// The box with id `exclude` (the one being moved or resized) is ignored
/// when looking for collisions.
///
/// # Errors
///
/// Returns `InvalidParameter` for a zero-sized rectangle, `OutOfBounds` when
/// it leaves the grid and `Collision` listing every overlapped box
pub fn check_placement(page: &Page, rect: &Rect, exclude: Option<&str>) -> Result<()> {
    if rect.is_empty() {
        return Err(invalid_parameter(
            "rect",
            rect,
            &"width and height must be at least 1",
        ));
    }
    if !rect.fits_grid() {
        return Err(RollpageError::OutOfBounds { rect: *rect });
    }

    let conflicting: Vec<String> = page
        .boxes()
        .iter()
        .filter(|other| Some(other.id()) != exclude)
        .filter(|other| other.rect().intersects(rect))
        .map(|other| other.id().to_string())
        .collect();

    if conflicting.is_empty() {
        Ok(())
    } else {
        Err(RollpageError::Collision { conflicting })
    }
}

/// Create a new box at `rect` and append it to the page
///
/// The box gets a fresh id and no table, title or color overrides.
///
/// # Errors
///
/// See [`check_placement`]
pub fn place_box<'a>(page: &'a mut Page, rect: Rect) -> Result<&'a PageBox> {
    check_placement(page, &rect, None)?;

    let id = page.allocate_box_id();
    debug!(box_id = %id, %rect, "placed box");
    page.push_box(PageBox::new(id, rect))
        .ok_or_else(|| invalid_parameter("rect", &rect, &"box was not stored"))
}

/// Move a box to a new origin, keeping its size
///
/// # Errors
///
/// Returns `BoxNotFound` for an unknown id, otherwise see [`check_placement`]
pub fn move_box<'a>(page: &'a mut Page, box_id: &str, x: u32, y: u32) -> Result<&'a PageBox> {
    reshape_box(page, box_id, |rect| rect.moved_to(x, y))
}

/// Change a box's size, keeping its origin
///
/// # Errors
///
/// Returns `BoxNotFound` for an unknown id, otherwise see [`check_placement`]
pub fn resize_box<'a>(
    page: &'a mut Page,
    box_id: &str,
    width: u32,
    height: u32,
) -> Result<&'a PageBox> {
    reshape_box(page, box_id, |rect| rect.resized_to(width, height))
}

fn reshape_box<'a, F>(page: &'a mut Page, box_id: &str, reshape: F) -> Result<&'a PageBox>
where
    F: FnOnce(Rect) -> Rect,
{
    let index = page
        .box_index(box_id)
        .ok_or_else(|| box_not_found(box_id))?;
    let current = page
        .boxes()
        .get(index)
        .map(PageBox::rect)
        .ok_or_else(|| box_not_found(box_id))?;

    let target = reshape(current);
    check_placement(page, &target, Some(box_id))?;

    let page_box = page.box_mut(index).ok_or_else(|| box_not_found(box_id))?;
    page_box.set_rect(target);
    debug!(box_id, from = %current, to = %target, "reshaped box");
    Ok(&*page_box)
}

/// Remove a box; unknown ids are ignored
///
/// Returns whether a box was removed.
pub fn remove_box(page: &mut Page, box_id: &str) -> bool {
    let removed = page
        .box_index(box_id)
        .and_then(|index| page.take_box(index))
        .is_some();
    if removed {
        debug!(box_id, "removed box");
    }
    removed
}

/// Apply a partial content update to a box; geometry is untouched
///
/// # Errors
///
/// Returns `BoxNotFound` for an unknown id
pub fn update_box_content<'a>(
    page: &'a mut Page,
    box_id: &str,
    update: BoxContentUpdate,
) -> Result<&'a PageBox> {
    let index = page
        .box_index(box_id)
        .ok_or_else(|| box_not_found(box_id))?;
    let page_box = page.box_mut(index).ok_or_else(|| box_not_found(box_id))?;
    page_box.apply(update);
    debug!(box_id, "updated box content");
    Ok(&*page_box)
}

/// First origin in row-major order where a `width` × `height` box fits
pub fn find_free_slot(page: &Page, width: u32, height: u32) -> Option<Rect> {
    if width == 0 || height == 0 || width > GRID_W || height > GRID_H {
        return None;
    }

    let mut occupied = CellMask::new();
    for page_box in page.boxes() {
        occupied.insert_rect(&page_box.rect());
    }

    (0..=GRID_H - height)
        .flat_map(|y| (0..=GRID_W - width).map(move |x| Rect::new(x, y, width, height)))
        .find(|candidate| !occupied.overlaps(&CellMask::from_rect(candidate)))
}

fn box_not_found(box_id: &str) -> RollpageError {
    RollpageError::BoxNotFound {
        id: box_id.to_string(),
    }
}
