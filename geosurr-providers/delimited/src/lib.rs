//! Delimited-text provider for square matrices.
//!
//! Reads and writes weight and distance matrices as comma-separated (or
//! otherwise delimited) text, optionally carrying node labels in a header
//! row and an index column.

mod errors;
mod reader;
mod writer;

pub use errors::DelimitedMatrixError;
pub use reader::{DelimitedMatrixReader, LabelledMatrix};
pub use writer::DelimitedMatrixWriter;

#[cfg(test)]
mod tests;
