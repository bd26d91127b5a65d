//! Workbook media-type check and container format detection.

/// Media type the export endpoint declares for both workbook formats.
pub const WORKBOOK_MEDIA_TYPE: &str = "application/x-twb";

/// Disposition marker that identifies a packaged workbook.
const PACKAGED_MARKER: &str = ".twbx";

/// On-disk container format of a downloaded workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Single-file workbook XML.
    Twb,
    /// Packaged workbook: a zip bundling the XML with extracts and images.
    Twbx,
}

impl WorkbookFormat {
    /// File extension including the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Twb => ".twb",
            Self::Twbx => ".twbx",
        }
    }

    /// Infers the format from a `Content-Disposition` value.
    ///
    /// Packaged workbooks keep the single-file content type, so the
    /// disposition filename is the only signal.
    #[must_use]
    pub fn from_content_disposition(disposition: Option<&str>) -> Self {
        match disposition {
            Some(value) if value.to_ascii_lowercase().contains(PACKAGED_MARKER) => Self::Twbx,
            _ => Self::Twb,
        }
    }
}

impl std::fmt::Display for WorkbookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Twb => "twb",
            Self::Twbx => "twbx",
        })
    }
}

/// Returns true when `content_type` names the workbook media type.
///
/// Comparison ignores ASCII case, surrounding whitespace and parameters
/// such as `; charset=...`.
#[must_use]
pub fn is_workbook_media_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case(WORKBOOK_MEDIA_TYPE)
}
