//! Core library for SmartScope, a desktop editor for macOS smart folders
//! (`.savedSearch` files). Parses the saved-search property list, edits the
//! folder scope while preserving every other field, and re-serializes to the
//! binary encoding Finder expects.

mod document;
mod editor;
mod finder;
mod gui;
pub mod statics;

pub use document::{FormatError, PlistFormat, SavedSearchDocument, WriteError};
pub use editor::{EditorError, SavedSearchEditor};
pub use finder::{FinderControl, ScriptedFinder};
pub use gui::run_gui;
