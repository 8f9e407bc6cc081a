//! Reusable UI widgets.

pub mod field_editor;

pub use field_editor::FieldEditor;
