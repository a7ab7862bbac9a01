/*
[INPUT]:  File names / extensions of uploaded input files
[OUTPUT]: MIME content types understood by the API
[POS]:    Data layer - file submission content type lookup
[UPDATE]: When the API accepts new input file formats
*/

use std::path::Path;

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// MIME content types accepted for file submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Plain text, one address per line (.txt)
    TextPlain,
    /// Comma-separated values (.csv)
    TextCsv,
    /// Tab-separated values (.tsv, .tab)
    TextTsv,
    /// Excel 97-2003 worksheet (.xls)
    ExcelXls,
    /// Excel workbook (.xlsx)
    ExcelXlsx,
}

impl ContentType {
    pub fn as_mime(self) -> &'static str {
        match self {
            ContentType::TextPlain => "text/plain",
            ContentType::TextCsv => "text/csv",
            ContentType::TextTsv => "text/tab-separated-values",
            ContentType::ExcelXls => "application/vnd.ms-excel",
            ContentType::ExcelXlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Look up the content type for a file extension (with or without the leading dot)
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        match extension.as_str() {
            "txt" => Some(ContentType::TextPlain),
            "csv" => Some(ContentType::TextCsv),
            "tsv" | "tab" => Some(ContentType::TextTsv),
            "xls" => Some(ContentType::ExcelXls),
            "xlsx" => Some(ContentType::ExcelXlsx),
            _ => None,
        }
    }

    /// Look up the content type from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(Self::from_extension)
    }
}
