//! Delimited matrix writer.
use std::{fs::File, io, path::Path};

use csv::WriterBuilder;
use geosurr_core::SquareMatrix;

use crate::errors::DelimitedMatrixError;

/// Writes square matrices as delimited text.
///
/// With labels the output uses the header-plus-index layout (empty corner
/// cell, labels across the top and down the first column), which
/// [`crate::DelimitedMatrixReader`] reads back unchanged.
#[derive(Clone, Copy, Debug)]
pub struct DelimitedMatrixWriter {
    delimiter: u8,
}

impl Default for DelimitedMatrixWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl DelimitedMatrixWriter {
    /// Creates a comma-separated writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `delimiter` between fields.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Writes `matrix` to a new file at `path`.
    ///
    /// # Errors
    /// Returns [`DelimitedMatrixError::Io`] when the file cannot be created,
    /// and any error of [`DelimitedMatrixWriter::write`].
    pub fn write_path(
        &self,
        path: impl AsRef<Path>,
        matrix: &SquareMatrix,
        labels: Option<&[String]>,
    ) -> Result<(), DelimitedMatrixError> {
        let file = File::create(path)?;
        self.write(file, matrix, labels)
    }

    /// Writes `matrix` to any byte sink.
    ///
    /// # Errors
    /// Returns [`DelimitedMatrixError::LabelCount`] when `labels` does not
    /// have one entry per node, and [`DelimitedMatrixError::Csv`] when
    /// writing fails.
    ///
    /// # Examples
    /// ```
    /// use geosurr_core::SquareMatrix;
    /// use geosurr_providers_delimited::DelimitedMatrixWriter;
    ///
    /// let matrix = SquareMatrix::try_from_rows(vec![vec![0.0, 2.5], vec![2.5, 0.0]])?;
    /// let mut out = Vec::new();
    /// DelimitedMatrixWriter::new().write(&mut out, &matrix, None)?;
    /// assert_eq!(String::from_utf8_lossy(&out), "0,2.5\n2.5,0\n");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write<W: io::Write>(
        &self,
        writer: W,
        matrix: &SquareMatrix,
        labels: Option<&[String]>,
    ) -> Result<(), DelimitedMatrixError> {
        if let Some(labels) = labels {
            if labels.len() != matrix.order() {
                return Err(DelimitedMatrixError::LabelCount {
                    labels: labels.len(),
                    order: matrix.order(),
                });
            }
        }
        let mut csv = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(false)
            .from_writer(writer);
        if let Some(labels) = labels {
            csv.write_record(std::iter::once("").chain(labels.iter().map(String::as_str)))?;
        }
        for (row, values) in matrix.rows().enumerate() {
            let cells = values.iter().map(f64::to_string);
            match labels {
                Some(labels) => csv.write_record(
                    std::iter::once(labels[row].clone()).chain(cells),
                )?,
                None => csv.write_record(cells)?,
            }
        }
        csv.flush()?;
        Ok(())
    }

    /// Writes a labelled rectangular table: a header of `columns` after an
    /// empty corner cell, then each row prefixed by its label. NaN cells are
    /// written as `NaN`.
    ///
    /// # Errors
    /// Returns [`DelimitedMatrixError::LabelCount`] when `rows` and
    /// `row_labels` differ in length, [`DelimitedMatrixError::RaggedRow`]
    /// when a row does not have one value per column, and
    /// [`DelimitedMatrixError::Csv`] when writing fails.
    ///
    /// # Examples
    /// ```
    /// use geosurr_providers_delimited::DelimitedMatrixWriter;
    ///
    /// let mut out = Vec::new();
    /// DelimitedMatrixWriter::new().write_table(
    ///     &mut out,
    ///     &["OLF".to_owned()],
    ///     &["OLF-I".to_owned(), "OLF-C".to_owned()],
    ///     &[vec![1.0, f64::NAN]],
    /// )?;
    /// assert_eq!(String::from_utf8_lossy(&out), ",OLF-I,OLF-C\nOLF,1,NaN\n");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_table<W: io::Write>(
        &self,
        writer: W,
        row_labels: &[String],
        columns: &[String],
        rows: &[Vec<f64>],
    ) -> Result<(), DelimitedMatrixError> {
        if row_labels.len() != rows.len() {
            return Err(DelimitedMatrixError::LabelCount {
                labels: row_labels.len(),
                order: rows.len(),
            });
        }
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != columns.len())
        {
            return Err(DelimitedMatrixError::RaggedRow {
                row,
                expected: columns.len(),
                actual: values.len(),
            });
        }
        let mut csv = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(false)
            .from_writer(writer);
        csv.write_record(std::iter::once("").chain(columns.iter().map(String::as_str)))?;
        for (label, values) in row_labels.iter().zip(rows) {
            csv.write_record(
                std::iter::once(label.clone()).chain(values.iter().map(f64::to_string)),
            )?;
        }
        csv.flush()?;
        Ok(())
    }
}
