use std::{fs::File, io, path::Path};

use log::info;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// A table of `f64` values whose columns are addressed by name.
///
/// Rows are samples and columns are named variables. Column names are unique, every
/// lookup goes through them so that callers never depend on positional order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    data: Array2<f64>,
}

impl Frame {
    /// Creates a new `Frame`.
    ///
    /// # Arguments
    /// * `columns` - The name of each column, in the same order as `data`'s columns.
    /// * `data` - A row major matrix with one column per name.
    ///
    /// # Returns
    /// A new `Frame` or an error if the names don't match the data or are repeated.
    pub fn new<S: Into<String>>(columns: Vec<S>, data: Array2<f64>) -> Result<Self> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if columns.len() != data.ncols() {
            return Err(MlErr::SizeMismatch {
                a: "column names",
                b: "data columns",
                got: columns.len(),
                expected: data.ncols(),
            });
        }

        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(MlErr::DuplicateColumn { name: name.clone() });
            }
        }

        Ok(Self { columns, data })
    }

    /// Creates a single row `Frame` out of `(name, value)` pairs.
    ///
    /// # Arguments
    /// * `pairs` - The named values of the row, in any order.
    ///
    /// # Returns
    /// A new one row `Frame` or an error if some name is repeated.
    pub fn single_row<S: AsRef<str>>(pairs: &[(S, f64)]) -> Result<Self> {
        let columns: Vec<String> = pairs.iter().map(|(name, _)| name.as_ref().to_string()).collect();
        let values: Vec<f64> = pairs.iter().map(|&(_, value)| value).collect();
        let data = Array2::from_shape_vec((1, values.len()), values).map_err(|_| {
            MlErr::SizeMismatch {
                a: "row values",
                b: "column names",
                got: pairs.len(),
                expected: pairs.len(),
            }
        })?;

        Self::new(columns, data)
    }

    /// The column names, in storage order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.data.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// A view of the whole underlying matrix.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Returns the position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| MlErr::MissingColumn {
                name: name.to_string(),
            })
    }

    /// Returns a view of the column called `name`.
    pub fn column(&self, name: &str) -> Result<ArrayView1<'_, f64>> {
        let idx = self.column_index(name)?;
        Ok(self.data.column(idx))
    }

    /// Builds a new `Frame` holding only the given columns, in the given order.
    ///
    /// # Arguments
    /// * `names` - The columns to keep.
    ///
    /// # Returns
    /// The selected `Frame` or `MlErr::MissingColumn` for the first absent name.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Frame> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        Self::new(columns, self.data.select(Axis(1), &indices))
    }

    /// Builds a new `Frame` holding only the rows at `indices`, in that order.
    ///
    /// # Panics
    /// If any index is out of bounds.
    pub fn take_rows(&self, indices: &[usize]) -> Frame {
        Self {
            columns: self.columns.clone(),
            data: self.data.select(Axis(0), indices),
        }
    }

    /// Copies the column called `name` into an owned vector.
    pub fn to_column(&self, name: &str) -> Result<Array1<f64>> {
        self.column(name).map(|c| c.to_owned())
    }
}

/// Reads the given columns of a CSV file with a header row into a `Frame`.
///
/// Columns that aren't requested are never parsed, so they may hold any kind of value.
///
/// # Arguments
/// * `path` - The path of the CSV file.
/// * `columns` - The names of the columns to load.
///
/// # Returns
/// The loaded `Frame` or an error if the file can't be read, a column is missing or a cell
/// isn't a finite number.
pub fn load_csv<P: AsRef<Path>, S: AsRef<str>>(path: P, columns: &[S]) -> Result<Frame> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let frame = read_csv(file, columns)?;
    info!(
        "loaded {} row(s) and {} column(s) from {}",
        frame.nrows(),
        frame.ncols(),
        path.display()
    );
    Ok(frame)
}

/// Reads the given columns of CSV data with a header row into a `Frame`.
///
/// # Arguments
/// * `reader` - The source of the CSV data.
/// * `columns` - The names of the columns to load.
///
/// # Returns
/// The loaded `Frame` or an error if a column is missing or a cell isn't a finite number.
pub fn read_csv<R: io::Read, S: AsRef<str>>(reader: R, columns: &[S]) -> Result<Frame> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let indices = columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| MlErr::MissingColumn {
                    name: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut values = Vec::new();
    let mut nrows = 0;

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        for (&idx, name) in indices.iter().zip(columns) {
            let raw = record.get(idx).unwrap_or_default();
            let value = parse_cell(raw).ok_or_else(|| MlErr::InvalidValue {
                row,
                column: name.as_ref().to_string(),
                value: raw.to_string(),
            })?;
            values.push(value);
        }

        nrows += 1;
    }

    let data = Array2::from_shape_vec((nrows, indices.len()), values).map_err(|_| {
        MlErr::SizeMismatch {
            a: "parsed cells",
            b: "rows times columns",
            got: nrows,
            expected: nrows * indices.len(),
        }
    })?;

    let names = columns.iter().map(|c| c.as_ref().to_string()).collect();
    Frame::new(names, data)
}

fn parse_cell(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
