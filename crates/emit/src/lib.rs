//! i2b2 output rendering and writing.
//!
//! [`render_concepts`] and [`render_text`] are pure string builders for the
//! `.con` and `.txt` files; [`write_document`] puts a [`RenderedDocument`]
//! on disk under an [`OutputLayout`] without ever leaving half a document
//! behind.
//!
//! ```rust,no_run
//! use emit::{write_document, OutputLayout, RenderedDocument};
//!
//! # fn main() -> Result<(), emit::EmitError> {
//! let layout = OutputLayout::new("out");
//! layout.prepare()?;
//! let doc = RenderedDocument {
//!     doc_id: "note1".into(),
//!     concepts: String::new(),
//!     text: "Nothing to see .\n".into(),
//! };
//! write_document(&layout, &doc)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod render;
mod writer;

pub use crate::error::EmitError;
pub use crate::render::{concept_line, render_concepts, render_text};
pub use crate::writer::{
    remove_document, write_document, OutputLayout, RenderedDocument, WrittenFiles,
    DEFAULT_CONCEPT_DIR, DEFAULT_TEXT_DIR,
};
