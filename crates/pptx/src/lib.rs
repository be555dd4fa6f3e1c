//! PPTX (Office Open XML) writer backend for slide deck generation.
//!
//! Produces .pptx files, which are ZIP archives of XML documents: a
//! handful of static scaffolding parts (master, layout, theme), a few
//! computed package parts, and one slide part plus one media part per
//! input image.

mod package;
mod slide;
mod template;
mod units;
pub mod writer;

pub use writer::PptxWriter;

#[cfg(test)]
mod tests;
