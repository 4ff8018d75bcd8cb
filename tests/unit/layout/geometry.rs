//! Tests for grid rectangles and cell masks

#[cfg(test)]
mod tests {
    use rollpage::layout::geometry::{CellMask, GRID_CELLS, Rect};

    // Rectangles are half-open, so touching edges do not overlap
    // Verified by changing `<` to `<=` in intersects
    #[test]
    fn test_touching_rects_do_not_intersect() {
        let left = Rect::new(0, 0, 2, 2);

        assert!(!left.intersects(&Rect::new(2, 0, 1, 1)));
        assert!(!left.intersects(&Rect::new(0, 2, 2, 1)));
        assert!(left.intersects(&Rect::new(1, 1, 2, 2)));
        assert!(Rect::new(1, 1, 2, 2).intersects(&left));
    }

    #[test]
    fn test_containment_intersects() {
        let outer = Rect::new(0, 0, 10, 8);
        let inner = Rect::new(4, 3, 1, 1);

        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_empty_rect_intersects_nothing() {
        assert!(!Rect::new(1, 1, 0, 3).intersects(&Rect::new(0, 0, 5, 5)));
        assert!(Rect::new(1, 1, 0, 3).is_empty());
    }

    // Boxes must lie entirely on the 10x8 grid
    #[test]
    fn test_fits_grid() {
        assert!(Rect::new(0, 0, 10, 8).fits_grid());
        assert!(Rect::new(8, 7, 2, 1).fits_grid());
        assert!(!Rect::new(9, 0, 2, 1).fits_grid());
        assert!(!Rect::new(0, 7, 1, 2).fits_grid());
        assert!(!Rect::new(u32::MAX, 0, 2, 1).fits_grid());
    }

    // Edge arithmetic never overflows
    #[test]
    fn test_edges_overflow() {
        assert_eq!(Rect::new(3, 4, 2, 1).right(), Some(5));
        assert_eq!(Rect::new(3, 4, 2, 1).bottom(), Some(5));
        assert_eq!(Rect::new(u32::MAX, 0, 1, 1).right(), None);
        assert!(!Rect::new(u32::MAX, 0, 1, 1).intersects(&Rect::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_cells_row_major() {
        let cells: Vec<(u32, u32)> = Rect::new(1, 2, 2, 2).cells().collect();
        assert_eq!(cells, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
        assert!(Rect::new(1, 2, 2, 2).contains_cell(2, 3));
        assert!(!Rect::new(1, 2, 2, 2).contains_cell(3, 3));
    }

    #[test]
    fn test_moved_and_resized() {
        let rect = Rect::new(1, 1, 2, 3);

        assert_eq!(rect.moved_to(5, 0), Rect::new(5, 0, 2, 3));
        assert_eq!(rect.resized_to(4, 1), Rect::new(1, 1, 4, 1));
        assert_eq!(rect.to_string(), "2x3@1,1");
    }

    #[test]
    fn test_new_mask_is_empty() {
        let mask = CellMask::new();
        assert!(mask.is_empty());
        assert_eq!(mask.count(), 0);
        assert_eq!(CellMask::default(), mask);
    }

    // Only the on-grid part of a rectangle is marked
    #[test]
    fn test_mask_from_rect() {
        let mask = CellMask::from_rect(&Rect::new(8, 6, 4, 4));

        assert_eq!(mask.count(), 4);
        assert!(mask.contains(9, 7));
        assert!(!mask.contains(7, 7));
        assert!(!mask.contains(10, 7));
    }

    #[test]
    fn test_mask_overlap() {
        let mut occupied = CellMask::new();
        occupied.insert_rect(&Rect::new(0, 0, 3, 3));

        assert!(occupied.overlaps(&CellMask::from_rect(&Rect::new(2, 2, 2, 2))));
        assert!(!occupied.overlaps(&CellMask::from_rect(&Rect::new(3, 0, 2, 2))));
    }

    #[test]
    fn test_full_grid_mask() {
        let mask = CellMask::from_rect(&Rect::new(0, 0, 10, 8));
        assert_eq!(mask.count(), GRID_CELLS);
    }
}
