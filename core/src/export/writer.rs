use super::table::{BeamTable, Cell, TableRow};
use crate::error::{ExplorerError, Result};
use csv::{Terminator, WriterBuilder};
use log::info;
use rust_xlsxwriter::Workbook;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Base name of the workbook the export stands in for
pub const WORKBOOK_NAME: &str = "Beam_Data";

/// Persists export sheets
///
/// One call per beam table; implementations decide the storage layout.
pub trait SheetWriter {
    fn write_sheet(&mut self, table: &BeamTable) -> Result<()>;

    /// Called once after the last sheet
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes every table through a sheet writer, in plan order
pub fn write_tables<W: SheetWriter + ?Sized>(writer: &mut W, tables: &[BeamTable]) -> Result<()> {
    for table in tables {
        writer.write_sheet(table)?;
    }
    writer.finish()
}

/// Writes all sheets into one `.xlsx` workbook, one worksheet per beam
///
/// Row 0 holds the column headers; each following row is one field across all
/// control points. Empty cells are left blank. The workbook is saved by
/// [`SheetWriter::finish`].
pub struct XlsxSheetWriter {
    path: PathBuf,
    workbook: Workbook,
    sheets: usize,
}

impl XlsxSheetWriter {
    /// Creates a writer for `<dir>/Beam_Data.xlsx`, creating the directory if needed
    pub fn new(directory: impl AsRef<Path>) -> Result<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;
        Ok(Self::with_path(xlsx_path(directory)))
    }

    /// Creates a writer for an explicit workbook path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workbook: Workbook::new(),
            sheets: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetWriter for XlsxSheetWriter {
    fn write_sheet(&mut self, table: &BeamTable) -> Result<()> {
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&table.sheet_name)?;

        for (column, row) in table.columns.iter().enumerate() {
            let column = u16::try_from(column).map_err(|_| {
                ExplorerError::InvalidValue(format!(
                    "{} has too many columns for a worksheet",
                    table.sheet_name
                ))
            })?;
            worksheet.write_string(0, column, row.header.as_str())?;
            for (field, cell) in row.cells.iter().enumerate() {
                let sheet_row = field as u32 + 1;
                match cell {
                    Cell::Number(n) => {
                        worksheet.write_number(sheet_row, column, *n)?;
                    }
                    Cell::Text(s) if !s.is_empty() => {
                        worksheet.write_string(sheet_row, column, s.as_str())?;
                    }
                    Cell::Text(_) | Cell::Empty => {}
                }
            }
        }

        self.sheets += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.workbook.save(&self.path)?;
        info!("Wrote {} ({} sheets)", self.path.display(), self.sheets);
        Ok(())
    }
}

/// Writes each sheet as `<dir>/<sheet name>.csv`
///
/// Same layout as the workbook: a header line, then one line per field.
#[derive(Debug, Clone)]
pub struct CsvSheetWriter {
    directory: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvSheetWriter {
    /// Creates a writer, creating the target directory if needed
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self {
            directory,
            written: Vec::new(),
        })
    }

    /// Paths written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SheetWriter for CsvSheetWriter {
    fn write_sheet(&mut self, table: &BeamTable) -> Result<()> {
        let path = self.directory.join(format!("{}.csv", table.sheet_name));
        write_csv(BufWriter::new(File::create(&path)?), table)?;

        info!("Wrote {} ({} columns)", path.display(), table.columns.len());
        self.written.push(path);
        Ok(())
    }
}

/// Writes one table as CSV to any sink
pub fn write_csv<W: Write>(out: W, table: &BeamTable) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(table.columns.iter().map(|column| column.header.as_str()))?;
    for row in 0..TableRow::FIELD_COUNT {
        writer.write_record(table.row(row).map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes all tables as one pretty JSON document keyed by sheet name
#[cfg(feature = "json")]
pub fn write_json(path: &Path, tables: &[BeamTable]) -> Result<()> {
    let sheets: serde_json::Map<String, serde_json::Value> = tables
        .iter()
        .map(|table| -> Result<(String, serde_json::Value)> {
            let value = serde_json::to_value(table)
                .map_err(|e| ExplorerError::InvalidValue(e.to_string()))?;
            Ok((table.sheet_name.clone(), value))
        })
        .collect::<Result<_>>()?;

    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, &sheets)
        .map_err(|e| ExplorerError::IoError(e.into()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Default workbook path inside a directory
pub fn xlsx_path(directory: &Path) -> PathBuf {
    directory.join(format!("{}.xlsx", WORKBOOK_NAME))
}

/// Default JSON export path inside a directory
pub fn json_path(directory: &Path) -> PathBuf {
    directory.join(format!("{}.json", WORKBOOK_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn table() -> BeamTable {
        let mut cells = vec![Cell::Number(1.0); TableRow::FIELD_COUNT];
        cells[4] = Cell::Text("Beam, \"A\"".to_string());
        cells[11] = Cell::Empty;
        BeamTable {
            beam_index: 0,
            sheet_name: "Beam 1".to_string(),
            columns: vec![
                TableRow {
                    header: "Control Point 2".to_string(),
                    cells: cells.clone(),
                },
                TableRow {
                    header: "Control Point 4".to_string(),
                    cells,
                },
            ],
        }
    }

    #[test]
    fn test_write_csv_layout() {
        let mut out = Vec::new();
        write_csv(&mut out, &table()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + TableRow::FIELD_COUNT);
        assert_eq!(lines[0], "Control Point 2,Control Point 4");
        assert_eq!(lines[1], "1.0,1.0");
        assert_eq!(lines[5], "\"Beam, \"\"A\"\"\",\"Beam, \"\"A\"\"\"");
        assert_eq!(lines[12], ",");
    }

    #[test]
    fn test_csv_sheet_writer() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("export");
        let mut writer = CsvSheetWriter::new(&out_dir).unwrap();

        write_tables(&mut writer, &[table()]).unwrap();

        assert_eq!(writer.written(), &[out_dir.join("Beam 1.csv")]);
        let text = std::fs::read_to_string(out_dir.join("Beam 1.csv")).unwrap();
        assert!(text.starts_with("Control Point 2,Control Point 4\n"));
    }

    #[test]
    fn test_xlsx_workbook() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = XlsxSheetWriter::new(temp_dir.path()).unwrap();
        let mut second = table();
        second.beam_index = 1;
        second.sheet_name = "Beam 2".to_string();

        write_tables(&mut writer, &[table(), second]).unwrap();

        assert_eq!(writer.path(), temp_dir.path().join("Beam_Data.xlsx"));
        let bytes = std::fs::read(writer.path()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_xlsx_rejects_duplicate_sheet_names() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = XlsxSheetWriter::with_path(temp_dir.path().join("out.xlsx"));

        let result = write_tables(&mut writer, &[table(), table()]);
        assert!(matches!(result, Err(ExplorerError::WorkbookError(_))));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_write_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = json_path(temp_dir.path());
        write_json(&path, &[table()]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let columns = &value["Beam 1"]["columns"];
        assert_eq!(columns[0]["header"], "Control Point 2");
        assert_eq!(columns[0]["cells"][11], "");
        assert_eq!(columns[0]["cells"][0], 1.0);
    }
}
