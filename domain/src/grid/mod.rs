//! The result grid: layout, slots and the viewer.

pub mod layout;
pub mod slot;
pub mod viewer;
