//! Full-screen viewer navigation

use crate::grid::slot::SlotGrid;

/// Viewer keyed by slot index, with next/previous bounded by the slot count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageViewer {
    current: Option<usize>,
}

impl ImageViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the viewer on a slot. Only filled slots can be opened.
    pub fn open(&mut self, index: usize, grid: &SlotGrid) -> bool {
        match grid.get(index) {
            Some(slot) if slot.is_filled() => {
                self.current = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Move forward; stays put on the last slot or when closed
    pub fn next(&mut self, slot_count: usize) -> Option<usize> {
        if let Some(index) = self.current
            && index + 1 < slot_count
        {
            self.current = Some(index + 1);
        }
        self.current
    }

    /// Move back; stays put on the first slot or when closed
    pub fn previous(&mut self) -> Option<usize> {
        if let Some(index) = self.current
            && index > 0
        {
            self.current = Some(index - 1);
        }
        self.current
    }

    pub fn has_next(&self, slot_count: usize) -> bool {
        self.current.is_some_and(|i| i + 1 < slot_count)
    }

    pub fn has_previous(&self) -> bool {
        self.current.is_some_and(|i| i > 0)
    }

    /// "3 / 9" style position label
    pub fn position_label(&self, slot_count: usize) -> Option<String> {
        self.current.map(|i| format!("{} / {}", i + 1, slot_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::session::SessionTag;
    use crate::grid::layout::GridLayout;
    use crate::image::payload::ImagePayload;

    fn grid_with_filled(count: usize, filled: &[usize]) -> SlotGrid {
        let mut grid = SlotGrid::new(&GridLayout::with_slot_count(count));
        for &i in filled {
            let image = ImagePayload::from_bytes("image/png", format!("img-{i}").as_bytes());
            grid.fill(i, image.clone(), image.content_hash(), SessionTag::new(1))
                .unwrap();
        }
        grid
    }

    #[test]
    fn test_open_requires_filled_slot() {
        let grid = grid_with_filled(3, &[1]);
        let mut viewer = ImageViewer::new();
        assert!(!viewer.open(0, &grid));
        assert!(!viewer.open(7, &grid));
        assert!(viewer.open(1, &grid));
        assert_eq!(viewer.current(), Some(1));
    }

    #[test]
    fn test_navigation_is_bounded() {
        let grid = grid_with_filled(3, &[0, 1, 2]);
        let mut viewer = ImageViewer::new();
        viewer.open(0, &grid);

        assert!(!viewer.has_previous());
        assert_eq!(viewer.previous(), Some(0));
        assert_eq!(viewer.next(3), Some(1));
        assert_eq!(viewer.next(3), Some(2));
        assert!(!viewer.has_next(3));
        assert_eq!(viewer.next(3), Some(2));
        assert_eq!(viewer.position_label(3).as_deref(), Some("3 / 3"));
    }

    #[test]
    fn test_closed_viewer_does_not_move() {
        let mut viewer = ImageViewer::new();
        assert_eq!(viewer.next(9), None);
        assert_eq!(viewer.previous(), None);
        assert_eq!(viewer.position_label(9), None);

        let grid = grid_with_filled(2, &[0]);
        viewer.open(0, &grid);
        viewer.close();
        assert!(!viewer.is_open());
    }
}
