//! Document loader adapters

pub mod pdf;

pub use pdf::PdfLoader;
