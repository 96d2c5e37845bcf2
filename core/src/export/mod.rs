//! Per-beam tabular export of leaf, jaw and meterset data
//!
//! One sheet per beam, one column per control point with complete jaw and MLC
//! data. The field order is the interface to the machine import.

mod table;
mod writer;

pub use table::{
    assemble_row, assemble_tables, remap_jaws, remap_leaf_halves, BeamTable, Cell, ExportReport,
    SkippedControlPoint, TableRow,
};
#[cfg(feature = "json")]
pub use writer::write_json;
pub use writer::{
    json_path, write_csv, write_tables, xlsx_path, CsvSheetWriter, SheetWriter, XlsxSheetWriter,
    WORKBOOK_NAME,
};
