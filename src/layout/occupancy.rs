//! Cell ownership map of a page and its text rendering

use ndarray::Array2;

use crate::io::configuration::{GRID_H, GRID_W};
use crate::model::page::Page;

/// Character drawn for a free cell
pub const FREE_CELL: char = '.';

/// Index of the box owning each cell, shaped `(GRID_H, GRID_W)`
pub fn occupancy(page: &Page) -> Array2<Option<usize>> {
    let mut map = Array2::from_elem((GRID_H as usize, GRID_W as usize), None);

    for (index, page_box) in page.boxes().iter().enumerate() {
        for (column, row) in page_box.rect().cells() {
            if let Some(cell) = map.get_mut([row as usize, column as usize]) {
                *cell = Some(index);
            }
        }
    }

    map
}

/// Label for the box at `index`: `A`-`Z`, then `a`-`z`, then `#`
pub fn box_label(index: usize) -> char {
    let offset = u8::try_from(index).unwrap_or(u8::MAX);
    match offset {
        0..=25 => char::from(b'A' + offset),
        26..=51 => char::from(b'a' + offset - 26),
        _ => '#',
    }
}

/// One line per grid row, each cell showing its owner's label
pub fn render_ascii(page: &Page) -> String {
    occupancy(page)
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or(FREE_CELL, box_label))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
