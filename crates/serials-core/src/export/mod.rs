//! CSV export of the serial number list.
//!
//! The output is one header line followed by one raw value per line. Values
//! are not quoted, so a value holding a comma, quote or line break produces a
//! file that is not RFC 4180 safe; such values are written as-is and logged.

mod sink;

pub use sink::{ExportDestination, ExportSink, FileExportSink, ShareExportSink, WriterExportSink};

use crate::Entry;

/// Header line of every export
pub const CSV_HEADER: &str = "Serial Number";

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub destination: ExportDestination,
    pub count: usize,
}

/// Render entries as CSV text, in the given order.
#[must_use]
pub fn render_csv(entries: &[Entry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(CSV_HEADER);

    for entry in entries {
        if needs_quoting(&entry.value) {
            tracing::warn!(
                "Serial number {:?} contains CSV control characters and is exported unquoted",
                entry.value
            );
        }
        lines.push(entry.value.as_str());
    }

    lines.join("\n")
}

/// Whether a value would need RFC 4180 quoting.
#[must_use]
pub fn needs_quoting(value: &str) -> bool {
    value.contains([',', '"', '\n', '\r'])
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(timestamp_ms: i64) -> String {
    format!("serial-numbers-{timestamp_ms}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries(values: &[&str]) -> Vec<Entry> {
        values.iter().map(|value| Entry::new(*value)).collect()
    }

    #[test]
    fn render_csv_writes_header_then_values() {
        assert_eq!(render_csv(&entries(&["A1", "B2"])), "Serial Number\nA1\nB2");
    }

    #[test]
    fn render_csv_of_empty_list_is_header_only() {
        assert_eq!(render_csv(&[]), "Serial Number");
    }

    #[test]
    fn render_csv_body_reproduces_value_order() {
        let values = ["Z-9", "a-1", "M 5"];
        let rendered = render_csv(&entries(&values));

        let body = rendered.lines().skip(1).collect::<Vec<_>>();
        assert_eq!(body, values);
    }

    #[test]
    fn render_csv_does_not_quote_values() {
        assert_eq!(
            render_csv(&entries(&["a,b", "say \"hi\""])),
            "Serial Number\na,b\nsay \"hi\""
        );
    }

    #[test]
    fn needs_quoting_detects_control_characters() {
        assert!(needs_quoting("a,b"));
        assert!(needs_quoting("a\"b"));
        assert!(needs_quoting("a\nb"));
        assert!(!needs_quoting("SN-0001"));
    }

    #[test]
    fn suggested_export_file_name_uses_csv_extension() {
        assert_eq!(suggested_export_file_name(123), "serial-numbers-123.csv");
    }
}
