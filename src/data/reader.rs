//! Tab-separated table reader.
//!
//! The first row is the header, the first column holds row names. Cells that
//! are blank or do not parse as numbers read as NaN when a numeric view is
//! requested.

use super::Matrix;
use crate::error::{PlotError, Result};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// A text table with named columns and named rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index_name: String,
    columns: Vec<String>,
    row_names: Vec<String>,
    cells: Vec<Vec<String>>,
}

impl Table {
    /// Header of the row-name column.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Data column headers, excluding the row-name column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row names.
    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    /// Number of data rows.
    pub fn rows(&self) -> usize {
        self.row_names.len()
    }

    /// Position of a column by case-insensitive name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| PlotError::ColumnNotFound(name.to_string()))
    }

    /// Column values parsed as numbers.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self.column_index(name)?;
        Ok(self.cells.iter().map(|row| parse_cell(&row[index])).collect())
    }

    /// Column values as text.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>> {
        let index = self.column_index(name)?;
        Ok(self.cells.iter().map(|row| row[index].clone()).collect())
    }

    /// Every data column parsed as numbers.
    pub fn to_matrix(&self) -> Result<Matrix> {
        let rows = self.rows();
        let cols = self.columns.len();

        let values = Array2::from_shape_fn((rows, cols), |(r, c)| parse_cell(&self.cells[r][c]));

        Matrix::new(values, self.row_names.clone(), self.columns.clone())
    }
}

fn parse_cell(cell: &str) -> f64 {
    cell.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse tab-separated text.
pub fn parse_table(text: &str) -> Result<Table> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| PlotError::parse(1, "missing header row"))?;

    let mut header = header.split('\t').map(|s| s.trim().to_string());
    let index_name = header.next().unwrap_or_default();
    let columns: Vec<String> = header.collect();

    let mut row_names = Vec::new();
    let mut cells = Vec::new();

    for (line_no, line) in lines {
        let mut fields = line.split('\t').map(|s| s.trim().to_string());
        let name = fields.next().unwrap_or_default();
        let mut row: Vec<String> = fields.collect();

        if row.len() > columns.len() {
            return Err(PlotError::parse(
                line_no,
                format!("expected {} fields, found {}", columns.len() + 1, row.len() + 1),
            ));
        }
        // trailing empty cells are often dropped by editors
        row.resize(columns.len(), String::new());

        row_names.push(name);
        cells.push(row);
    }

    Ok(Table {
        index_name,
        columns,
        row_names,
        cells,
    })
}

/// Read a tab-separated file.
pub fn read_table(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|e| PlotError::file_open(path.to_path_buf(), e))?;
    parse_table(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEXT: &str = "gene\tlogFC\tP\tnote\nA\t1.5\t0.01\tup\nB\t-2\t\tdown\nC\tNA\t0.5\n";

    #[test]
    fn parses_header_and_row_names() {
        let table = parse_table(TEXT).unwrap();
        assert_eq!(table.index_name(), "gene");
        assert_eq!(table.columns(), ["logFC", "P", "note"]);
        assert_eq!(table.row_names(), ["A", "B", "C"]);
    }

    #[test]
    fn numeric_columns_use_nan_for_gaps() {
        let table = parse_table(TEXT).unwrap();
        let fc = table.numeric_column("LOGFC").unwrap();
        assert_eq!(fc[0], 1.5);
        assert_eq!(fc[1], -2.0);
        assert!(fc[2].is_nan());

        let p = table.numeric_column("p").unwrap();
        assert!(p[1].is_nan());

        assert!(matches!(
            table.numeric_column("missing"),
            Err(PlotError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn extra_fields_are_a_parse_error() {
        let err = parse_table("id\ta\nr1\t1\t2\n").unwrap_err();
        assert!(matches!(err, PlotError::Parse { line: 2, .. }));
    }

    #[test]
    fn to_matrix_keeps_names() {
        let m = parse_table("id\ta\tb\nr1\t1\t2\nr2\t3\t4\n")
            .unwrap()
            .to_matrix()
            .unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.get(1, 0), 3.0);
        assert_eq!(m.col_names(), ["a", "b"]);
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", TEXT).unwrap();
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.rows(), 3);

        let missing = read_table(Path::new("/definitely/not/here.tsv"));
        assert!(matches!(missing, Err(PlotError::FileOpen { .. })));
    }
}
