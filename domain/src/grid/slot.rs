//! Slots and the slot grid

use crate::core::error::DomainError;
use crate::generation::session::SessionTag;
use crate::grid::layout::{CellSpan, GridLayout};
use crate::image::hash::ContentHash;
use crate::image::payload::ImagePayload;
use serde::Serialize;

/// One fixed position in the result grid (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    index: usize,
    span: CellSpan,
    image: Option<ImagePayload>,
    hash: Option<ContentHash>,
    filled_by: Option<SessionTag>,
}

impl Slot {
    fn new(index: usize, span: CellSpan) -> Self {
        Self {
            index,
            span,
            image: None,
            hash: None,
            filled_by: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn span(&self) -> CellSpan {
        self.span
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    pub fn hash(&self) -> Option<&ContentHash> {
        self.hash.as_ref()
    }

    /// Session whose image currently occupies the slot
    pub fn filled_by(&self) -> Option<SessionTag> {
        self.filled_by
    }

    pub fn is_filled(&self) -> bool {
        self.image.is_some()
    }
}

/// The ordered slots of a gallery
///
/// Slots are created once from the layout and never removed. A slot's image
/// can be replaced but never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotGrid {
    slots: Vec<Slot>,
}

impl SlotGrid {
    pub fn new(layout: &GridLayout) -> Self {
        let slots = layout
            .cells()
            .iter()
            .enumerate()
            .map(|(index, span)| Slot::new(index, *span))
            .collect();
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn fill(
        &mut self,
        index: usize,
        image: ImagePayload,
        hash: ContentHash,
        session: SessionTag,
    ) -> Result<(), DomainError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(DomainError::SlotOutOfRange { index, len })?;
        slot.image = Some(image);
        slot.hash = Some(hash);
        slot.filled_by = Some(session);
        Ok(())
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_filled()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> ImagePayload {
        ImagePayload::from_bytes("image/png", bytes)
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = SlotGrid::new(&GridLayout::reference());
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.get(3).unwrap().index(), 3);
        assert_eq!(grid.get(3).unwrap().span(), CellSpan::new(6, 6));
    }

    #[test]
    fn test_fill_replaces_image() {
        let mut grid = SlotGrid::new(&GridLayout::with_slot_count(2));
        let first = png(b"first");
        let second = png(b"second");

        grid.fill(1, first.clone(), first.content_hash(), SessionTag::new(1))
            .unwrap();
        grid.fill(1, second.clone(), second.content_hash(), SessionTag::new(2))
            .unwrap();

        let slot = grid.get(1).unwrap();
        assert_eq!(slot.image(), Some(&second));
        assert_eq!(slot.hash(), Some(&second.content_hash()));
        assert_eq!(slot.filled_by(), Some(SessionTag::new(2)));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_fill_out_of_range() {
        let mut grid = SlotGrid::new(&GridLayout::with_slot_count(2));
        let image = png(b"x");
        let err = grid
            .fill(2, image.clone(), image.content_hash(), SessionTag::new(1))
            .unwrap_err();
        assert_eq!(err, DomainError::SlotOutOfRange { index: 2, len: 2 });
        assert_eq!(grid.filled_count(), 0);
    }
}
