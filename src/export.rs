//! File exports: CSV, JSON, spreadsheet and a plain-text summary.

use crate::analysis::Analysis;
use crate::catalog::models::ProductRecord;
use crate::error::ExportError;
use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One kind of output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Summary,
}

impl ExportFormat {
    /// Every format, in the order they are attempted.
    pub const ALL: [ExportFormat; 4] =
        [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Json, ExportFormat::Summary];

    /// Suffix appended to the base path.
    pub fn suffix(&self) -> &'static str {
        match self {
            ExportFormat::Csv => ".csv",
            ExportFormat::Json => ".json",
            ExportFormat::Xlsx => ".xlsx",
            ExportFormat::Summary => "_summary.txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Xlsx => "XLSX",
            ExportFormat::Summary => "summary",
        };
        f.write_str(name)
    }
}

/// What an export pass produced.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, in attempt order
    pub written: Vec<PathBuf>,
    /// Formats that failed, with the reason
    pub skipped: Vec<(ExportFormat, String)>,
}

impl ExportReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.skipped.is_empty()
    }

    fn record(&mut self, format: ExportFormat, result: Result<PathBuf, ExportError>) {
        match result {
            Ok(path) => {
                info!("Saved {} export to {}", format, path.display());
                self.written.push(path);
            }
            Err(e) => {
                warn!("Skipping {} export: {}", format, e);
                self.skipped.push((format, e.to_string()));
            }
        }
    }
}

/// Writes exports next to a base path such as `books_data`.
pub struct Exporter {
    base: PathBuf,
}

impl Exporter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Output path for a format: the base path plus the format suffix.
    pub fn path_for(&self, format: ExportFormat) -> PathBuf {
        let mut name: OsString = self.base.clone().into_os_string();
        name.push(format.suffix());
        PathBuf::from(name)
    }

    fn create(&self, format: ExportFormat) -> Result<(PathBuf, fs::File), ExportError> {
        let path = self.path_for(format);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&path)?;
        Ok((path, file))
    }

    /// Writes items as CSV with a header row taken from the field names.
    pub fn write_csv<T: Serialize>(&self, items: &[T]) -> Result<PathBuf, ExportError> {
        let (path, file) = self.create(ExportFormat::Csv)?;
        let mut writer = csv::Writer::from_writer(file);

        for item in items {
            writer.serialize(item)?;
        }
        writer.flush()?;

        debug!("Wrote {} CSV rows", items.len());
        Ok(path)
    }

    /// Writes items as a pretty-printed JSON array.
    pub fn write_json<T: Serialize>(&self, items: &[T]) -> Result<PathBuf, ExportError> {
        let (path, file) = self.create(ExportFormat::Json)?;
        serde_json::to_writer_pretty(file, items)?;
        Ok(path)
    }

    /// Writes records to a single-sheet workbook.
    #[cfg(feature = "xlsx")]
    pub fn write_xlsx(&self, records: &[ProductRecord]) -> Result<PathBuf, ExportError> {
        use rust_xlsxwriter::Workbook;

        const HEADERS: [&str; 8] = [
            "title",
            "price_text",
            "price_value",
            "rating",
            "availability",
            "source_url",
            "page_index",
            "captured_at",
        ];

        let path = self.path_for(ExportFormat::Xlsx);
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Books")?;

        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header)?;
        }

        for (i, record) in records.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, record.title.as_str())?;
            sheet.write_string(row, 1, record.price_text.as_str())?;
            sheet.write_number(row, 2, record.price_value)?;
            sheet.write_string(row, 3, record.rating.to_string())?;
            sheet.write_string(row, 4, record.availability.as_str())?;
            sheet.write_string(row, 5, record.source_url.as_str())?;
            sheet.write_number(row, 6, record.page_index as f64)?;
            sheet.write_string(row, 7, record.captured_at.to_rfc3339())?;
        }

        workbook.save(&path)?;
        Ok(path)
    }

    /// Spreadsheet support is compiled out; the format is always skipped.
    #[cfg(not(feature = "xlsx"))]
    pub fn write_xlsx(&self, _records: &[ProductRecord]) -> Result<PathBuf, ExportError> {
        Err(ExportError::Unsupported("XLSX"))
    }

    /// Writes the plain-text analysis report.
    pub fn write_summary(&self, analysis: &Analysis, currency: &str) -> Result<PathBuf, ExportError> {
        let (path, mut file) = self.create(ExportFormat::Summary)?;
        file.write_all(analysis.summary_text(currency).as_bytes())?;
        Ok(path)
    }

    /// Writes every catalogue format. A failing format is logged and skipped.
    pub fn export_catalog(
        &self,
        records: &[ProductRecord],
        analysis: &Analysis,
        currency: &str,
    ) -> ExportReport {
        let mut report = ExportReport::default();

        if records.is_empty() {
            warn!("No records to export");
            return report;
        }

        for format in ExportFormat::ALL {
            let result = match format {
                ExportFormat::Csv => self.write_csv(records),
                ExportFormat::Xlsx => self.write_xlsx(records),
                ExportFormat::Json => self.write_json(records),
                ExportFormat::Summary => self.write_summary(analysis, currency),
            };
            report.record(format, result);
        }

        report
    }

    /// Writes a single CSV file, used for news stories.
    pub fn export_csv<T: Serialize>(&self, items: &[T]) -> ExportReport {
        let mut report = ExportReport::default();

        if items.is_empty() {
            warn!("No records to export");
            return report;
        }

        report.record(ExportFormat::Csv, self.write_csv(items));
        report
    }
}

/// Reads records back from a CSV file written by [`Exporter::write_csv`].
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>, ExportError> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();

    for row in reader.deserialize::<ProductRecord>() {
        records.push(row?);
    }

    Ok(records)
}
