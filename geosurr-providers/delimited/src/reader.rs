//! Delimited matrix reader with header and index-column detection.
use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use geosurr_core::SquareMatrix;
use tracing::{debug, instrument};

use crate::errors::DelimitedMatrixError;

/// A square matrix together with the node labels found alongside it.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelledMatrix {
    labels: Option<Vec<String>>,
    matrix: SquareMatrix,
}

impl LabelledMatrix {
    /// Node labels, when the input carried a header row or index column.
    #[must_use]
    pub fn labels(&self) -> Option<&[String]> {
        self.labels.as_deref()
    }

    /// The parsed matrix.
    #[must_use]
    pub fn matrix(&self) -> &SquareMatrix {
        &self.matrix
    }

    /// Splits into labels and matrix.
    #[must_use]
    pub fn into_parts(self) -> (Option<Vec<String>>, SquareMatrix) {
        (self.labels, self.matrix)
    }
}

/// Reads square matrices from delimited text.
///
/// Three layouts are accepted: bare numeric rows, a header row of labels,
/// and the header-plus-index layout written by dataframe libraries, where
/// the first cell is an empty corner and every row starts with its label.
/// A first row counts as a header when its first cell is empty or a later
/// cell is not a number. Labels found in both places must agree.
///
/// Cells spelled `nan` (any case) parse to NaN. Empty cells are rejected
/// unless [`DelimitedMatrixReader::with_missing_as_nan`] is set, which reads
/// them as NaN too, the way dataframe libraries mark missing values.
#[derive(Clone, Copy, Debug)]
pub struct DelimitedMatrixReader {
    delimiter: u8,
    missing_as_nan: bool,
}

impl Default for DelimitedMatrixReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            missing_as_nan: false,
        }
    }
}

impl DelimitedMatrixReader {
    /// Creates a comma-separated reader.
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

    /// Returns the field delimiter.
    #[must_use]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Reads empty cells as NaN instead of rejecting them.
    #[must_use]
    pub fn with_missing_as_nan(mut self, missing_as_nan: bool) -> Self {
        self.missing_as_nan = missing_as_nan;
        self
    }

    /// Returns `true` when empty cells are read as NaN.
    #[must_use]
    pub fn missing_as_nan(&self) -> bool {
        self.missing_as_nan
    }

    /// Reads a matrix from the file at `path`.
    ///
    /// # Errors
    /// Returns [`DelimitedMatrixError::Io`] when the file cannot be opened,
    /// and any error of [`DelimitedMatrixReader::read`].
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<LabelledMatrix, DelimitedMatrixError> {
        let file = File::open(path)?;
        self.read(file)
    }

    /// Reads a matrix from any byte source.
    ///
    /// # Errors
    /// Returns [`DelimitedMatrixError`] when the text is not valid delimited
    /// data, the rows do not form a square matrix, labels disagree, or a cell
    /// is empty or not a number.
    ///
    /// # Examples
    /// ```
    /// use geosurr_providers_delimited::DelimitedMatrixReader;
    ///
    /// let text = ",a,b\na,0,1.5\nb,1.5,0\n";
    /// let parsed = DelimitedMatrixReader::new().read(text.as_bytes())?;
    /// assert_eq!(parsed.labels(), Some(&["a".to_owned(), "b".to_owned()][..]));
    /// assert_eq!(parsed.matrix().get(0, 1), Some(1.5));
    /// # Ok::<(), geosurr_providers_delimited::DelimitedMatrixError>(())
    /// ```
    #[instrument(name = "providers.delimited.read", err, skip(self, reader))]
    pub fn read<R: io::Read>(&self, reader: R) -> Result<LabelledMatrix, DelimitedMatrixError> {
        let mut csv = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);
        let mut records = csv
            .records()
            .collect::<Result<Vec<StringRecord>, csv::Error>>()?;
        if records.is_empty() {
            return Err(DelimitedMatrixError::Empty);
        }
        let header = if looks_like_header(&records[0]) {
            Some(records.remove(0))
        } else {
            None
        };
        let layout = Layout::detect(&records)?;
        let labels = layout.labels(header.as_ref(), &records)?;
        let values = layout.values(&records, self.missing_as_nan)?;
        let matrix = SquareMatrix::from_row_major(layout.order, values)?;
        debug!(order = layout.order, labelled = labels.is_some(), "matrix parsed");
        Ok(LabelledMatrix { labels, matrix })
    }

    /// Reads the cells under the header `name` from a table whose first row
    /// is a header, such as a parcellation listing one node per row.
    ///
    /// # Errors
    /// Returns [`DelimitedMatrixError::MissingColumn`] when no header cell
    /// equals `name`, [`DelimitedMatrixError::RaggedRow`] when a row stops
    /// short of the column, and [`DelimitedMatrixError::Csv`] for malformed
    /// text.
    ///
    /// # Examples
    /// ```
    /// use geosurr_providers_delimited::DelimitedMatrixReader;
    ///
    /// let text = "Acronym,Brain Division\nFRP,Isocortex\nMOB,OLF\n";
    /// let column = DelimitedMatrixReader::new().read_column(text.as_bytes(), "Brain Division")?;
    /// assert_eq!(column, ["Isocortex", "OLF"]);
    /// # Ok::<(), geosurr_providers_delimited::DelimitedMatrixError>(())
    /// ```
    #[instrument(name = "providers.delimited.read_column", err, skip(self, reader))]
    pub fn read_column<R: io::Read>(
        &self,
        reader: R,
        name: &str,
    ) -> Result<Vec<String>, DelimitedMatrixError> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(self.delimiter)
            .from_reader(reader);
        let headers = csv.headers()?.clone();
        let Some(index) = headers.iter().position(|header| header == name) else {
            return Err(DelimitedMatrixError::MissingColumn {
                name: name.to_owned(),
            });
        };
        let mut cells = Vec::new();
        for (row, record) in csv.records().enumerate() {
            let record = record?;
            let Some(cell) = record.get(index) else {
                return Err(DelimitedMatrixError::RaggedRow {
                    row,
                    expected: headers.len(),
                    actual: record.len(),
                });
            };
            cells.push(cell.to_owned());
        }
        debug!(rows = cells.len(), "column parsed");
        Ok(cells)
    }
}

/// The first cell alone may be a row label, so it only marks a header when
/// it is the empty corner or the sole cell.
fn looks_like_header(record: &StringRecord) -> bool {
    let is_label = |cell: &str| !cell.is_empty() && cell.parse::<f64>().is_err();
    match record.get(0) {
        Some("") => true,
        Some(first) if record.len() == 1 => is_label(first),
        _ => record.iter().skip(1).any(is_label),
    }
}

/// Shape of the data rows once any header is removed.
struct Layout {
    order: usize,
    indexed: bool,
}

impl Layout {
    fn detect(rows: &[StringRecord]) -> Result<Self, DelimitedMatrixError> {
        let order = rows.len();
        let Some(first) = rows.first() else {
            return Err(DelimitedMatrixError::Empty);
        };
        let fields = first.len();
        if let Some((row, record)) = rows
            .iter()
            .enumerate()
            .find(|(_, record)| record.len() != fields)
        {
            return Err(DelimitedMatrixError::RaggedRow {
                row,
                expected: fields,
                actual: record.len(),
            });
        }
        let indexed = if fields == order + 1 {
            true
        } else if fields == order {
            false
        } else {
            return Err(DelimitedMatrixError::NotSquare {
                rows: order,
                fields,
            });
        };
        Ok(Self { order, indexed })
    }

    fn labels(
        &self,
        header: Option<&StringRecord>,
        rows: &[StringRecord],
    ) -> Result<Option<Vec<String>>, DelimitedMatrixError> {
        let from_header = header
            .map(|record| {
                let cells: Vec<String> = record.iter().map(str::to_owned).collect();
                match cells.len() {
                    len if len == self.order => Ok(cells),
                    len if self.indexed && len == self.order + 1 => Ok(cells[1..].to_vec()),
                    len => Err(DelimitedMatrixError::LabelCount {
                        labels: len,
                        order: self.order,
                    }),
                }
            })
            .transpose()?;
        let from_index: Option<Vec<String>> = self.indexed.then(|| {
            rows.iter()
                .map(|record| record.get(0).unwrap_or_default().to_owned())
                .collect()
        });

        match (from_header, from_index) {
            (Some(header), Some(index)) => {
                if let Some((position, (header, index))) = header
                    .iter()
                    .zip(&index)
                    .enumerate()
                    .find(|(_, (header, index))| header != index)
                {
                    return Err(DelimitedMatrixError::LabelMismatch {
                        position,
                        header: header.clone(),
                        index: index.clone(),
                    });
                }
                Ok(Some(header))
            }
            (header, index) => Ok(header.or(index)),
        }
    }

    fn values(
        &self,
        rows: &[StringRecord],
        missing_as_nan: bool,
    ) -> Result<Vec<f64>, DelimitedMatrixError> {
        let offset = usize::from(self.indexed);
        let mut values = Vec::with_capacity(self.order * self.order);
        for (row, record) in rows.iter().enumerate() {
            for (column, cell) in record.iter().skip(offset).enumerate() {
                if cell.is_empty() {
                    if missing_as_nan {
                        values.push(f64::NAN);
                        continue;
                    }
                    return Err(DelimitedMatrixError::EmptyCell { row, column });
                }
                let value = cell
                    .parse::<f64>()
                    .map_err(|_| DelimitedMatrixError::InvalidNumber {
                        row,
                        column,
                        value: cell.to_owned(),
                    })?;
                values.push(value);
            }
        }
        Ok(values)
    }
}
