use crate::application::dto::{DumpSummary, UploadMode, UploadOutcome};
use crate::content_graph::domain::{FailedUploadMultiple, ItemRef};
use owo_colors::OwoColorize;
use std::fmt::Write as _;
use std::io::IsTerminal;

/// UploadSummaryPrinter renders end-of-run summaries for stderr
///
/// Colors are used only when stderr is a terminal.
pub struct UploadSummaryPrinter {
    colored: bool,
}

impl UploadSummaryPrinter {
    pub fn new() -> Self {
        Self {
            colored: std::io::stderr().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn print(&self, text: &str) {
        eprint!("{}", text);
    }

    fn ok(&self, text: &str) -> String {
        if self.colored {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn failed(&self, text: &str) -> String {
        if self.colored {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn warn(&self, text: &str) -> String {
        if self.colored {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn item_lines(out: &mut String, marker: &str, items: &[ItemRef]) {
        for item in items {
            let _ = writeln!(out, "   {} {}", marker, item);
        }
    }

    pub fn render_dump(&self, summary: &DumpSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}: {} item(s) written to {}",
            self.ok("Dumped"),
            summary.pack_id,
            summary.dumped.len(),
            summary.destination.display()
        );
        for skipped in &summary.skipped {
            let _ = writeln!(
                out,
                "   {} {} ({})",
                self.warn("skipped"),
                skipped.item,
                skipped.reason
            );
        }
        out
    }

    pub fn render_outcome(&self, outcome: &UploadOutcome) -> String {
        let mut out = String::new();
        match &outcome.mode {
            UploadMode::Bundle { archive } => {
                let _ = writeln!(
                    out,
                    "{} {} as {}",
                    self.ok("Uploaded"),
                    outcome.pack_id,
                    archive
                );
            }
            UploadMode::ItemByItem => {
                let _ = writeln!(
                    out,
                    "{} {}: {} item(s)",
                    self.ok("Uploaded"),
                    outcome.pack_id,
                    outcome.uploaded.len()
                );
                Self::item_lines(&mut out, "✓", &outcome.uploaded);
            }
        }
        if !outcome.skipped.is_empty() {
            let _ = writeln!(
                out,
                "{} {} item(s) not uploadable item by item:",
                self.warn("Skipped"),
                outcome.skipped.len()
            );
            Self::item_lines(&mut out, "-", &outcome.skipped);
        }
        if let Some(archive) = &outcome.outer_archive {
            let _ = writeln!(out, "   Archive: {}", archive.display());
        }
        out
    }

    pub fn render_failures(&self, pack_id: &str, result: &FailedUploadMultiple) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}: {} uploaded, {} failed, {} incompatible",
            self.failed("Upload failed"),
            pack_id,
            result.uploaded.len(),
            result.failures.len(),
            result.incompatible.len()
        );
        Self::item_lines(&mut out, "✓", &result.uploaded);
        for failure in &result.failures {
            let status = failure
                .status
                .map(|s| format!(" [{}]", s))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "   ✗ {} ({}{}): {}",
                failure.item, failure.kind, status, failure.additional_info
            );
        }
        for incompatible in &result.incompatible {
            let _ = writeln!(
                out,
                "   {} {} supports {} - {}, target is {}",
                self.warn("≠"),
                incompatible.item,
                incompatible.item_from_version,
                incompatible.item_to_version,
                incompatible.target_version
            );
        }
        out
    }
}

impl Default for UploadSummaryPrinter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::SkipReason;
    use crate::content_graph::domain::{
        ContentType, ContentVersion, FailedUpload, FailureKind, IncompatibleUpload,
    };
    use serde_json::Value;
    use std::path::PathBuf;

    fn item(id: &str) -> ItemRef {
        ItemRef::new(ContentType::Script, id.to_string(), PathBuf::from("a.yml"))
    }

    #[test]
    fn test_render_failures() {
        let result = FailedUploadMultiple {
            uploaded: vec![item("A")],
            failures: vec![FailedUpload {
                item: item("B"),
                kind: FailureKind::Api,
                status: Some(500),
                response_body: Value::Null,
                additional_info: "Internal Server Error".to_string(),
            }],
            incompatible: vec![IncompatibleUpload {
                item: item("C"),
                item_from_version: ContentVersion::new(6, 8, 0),
                item_to_version: ContentVersion::new(99, 99, 99),
                target_version: ContentVersion::new(6, 5, 0),
            }],
        };

        let text = UploadSummaryPrinter::plain().render_failures("HelloWorld", &result);

        assert!(text.starts_with("Upload failed HelloWorld: 1 uploaded, 1 failed, 1 incompatible"));
        assert!(text.contains("✓ Script A"));
        assert!(text.contains("✗ Script B (API error [500]): Internal Server Error"));
        assert!(text.contains("Script C supports 6.8.0 - 99.99.99, target is 6.5.0"));
    }

    #[test]
    fn test_render_bundle_outcome() {
        let outcome = UploadOutcome {
            pack_id: "HelloWorld".to_string(),
            mode: UploadMode::Bundle {
                archive: "Hello World.zip".to_string(),
            },
            uploaded: vec![],
            skipped: vec![],
            outer_archive: Some(PathBuf::from("/out/uploadable_packs.zip")),
        };
        let text = UploadSummaryPrinter::plain().render_outcome(&outcome);
        assert_eq!(
            text,
            "Uploaded HelloWorld as Hello World.zip\n   Archive: /out/uploadable_packs.zip\n"
        );
    }

    #[test]
    fn test_render_dump_lists_skips() {
        let mut summary = DumpSummary::new("HelloWorld".to_string(), PathBuf::from("/out"));
        summary.dumped.push(item("A"));
        summary.skip(item("T"), SkipReason::ExcludedType);

        let text = UploadSummaryPrinter::plain().render_dump(&summary);
        assert!(text.contains("Dumped HelloWorld: 1 item(s) written to /out"));
        assert!(text.contains("skipped Script T (content type is excluded)"));
    }
}
