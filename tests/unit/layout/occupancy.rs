//! Tests for the cell occupancy map and its text rendering

#[cfg(test)]
mod tests {
    use rollpage::io::configuration::{GRID_H, GRID_W};
    use rollpage::layout::engine::place_box;
    use rollpage::layout::geometry::Rect;
    use rollpage::layout::occupancy::{box_label, occupancy, render_ascii};
    use rollpage::model::page::Page;

    #[test]
    fn test_empty_page_render() {
        let page = Page::new("Blank", "blank", "alice");
        let rendered = render_ascii(&page);

        assert_eq!(rendered.lines().count(), GRID_H as usize);
        assert!(rendered.lines().all(|line| line == ".........."));
    }

    // Each cell shows the label of the box covering it
    #[test]
    fn test_render_boxes() {
        let mut page = Page::new("Camp", "camp", "alice");
        assert!(place_box(&mut page, Rect::new(0, 0, 2, 2)).is_ok());
        assert!(place_box(&mut page, Rect::new(9, 7, 1, 1)).is_ok());

        let rendered = render_ascii(&page);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.first(), Some(&"AA........"));
        assert_eq!(lines.get(1), Some(&"AA........"));
        assert_eq!(lines.last(), Some(&".........B"));
    }

    #[test]
    fn test_occupancy_map() {
        let mut page = Page::new("Camp", "camp", "alice");
        assert!(place_box(&mut page, Rect::new(3, 1, 2, 1)).is_ok());

        let map = occupancy(&page);

        assert_eq!(map.dim(), (GRID_H as usize, GRID_W as usize));
        assert_eq!(map.get([1, 3]), Some(&Some(0)));
        assert_eq!(map.get([1, 4]), Some(&Some(0)));
        assert_eq!(map.get([1, 5]), Some(&None));
        assert_eq!(map.iter().filter(|cell| cell.is_some()).count(), 2);
    }

    #[test]
    fn test_box_labels() {
        assert_eq!(box_label(0), 'A');
        assert_eq!(box_label(25), 'Z');
        assert_eq!(box_label(26), 'a');
        assert_eq!(box_label(51), 'z');
        assert_eq!(box_label(52), '#');
        assert_eq!(box_label(usize::MAX), '#');
    }
}
