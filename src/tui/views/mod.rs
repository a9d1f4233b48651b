pub mod editor;
pub mod picker;
