//! HTML rendering of analysis results.
//!
//! Two output modes share one header helper, so column ordering and
//! field-to-header mapping can never diverge between them:
//! - `Interactive` - per-column filter inputs plus a small inline script
//! - `Static` - print-oriented markup, used as the PDF source
//!
//! Rendering drops `output[0]`: the tool echoes its own column headers as
//! the first parsed row. An empty table (or one holding only the echo)
//! renders as a valid headers-only table.

use crate::document::{AnalysisDocument, Record, Table};
use crate::i18n::{field_label, ui_label, Lang};
use crate::registry::{self, CommandSpec};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Interactive,
    Static,
}

/// Escape text for HTML element and attribute positions.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Header labels for a command, in layout order. Both render modes derive
/// their headers from this helper.
pub fn header_labels(spec: &CommandSpec, lang: Lang) -> Vec<&str> {
    spec.field_names().map(|field| field_label(lang, field)).collect()
}

/// Data rows of a table: everything after the tool's header echo.
fn data_rows(table: &Table) -> &[Record] {
    table.get(1..).unwrap_or_default()
}

fn push_table(out: &mut String, table: &Table, spec: &CommandSpec, lang: Lang, mode: RenderMode) {
    out.push_str("<table id=\"results\">\n<thead>\n<tr>");
    for label in header_labels(spec, lang) {
        let _ = write!(out, "<th>{}</th>", escape(label));
    }
    out.push_str("</tr>\n");

    if mode == RenderMode::Interactive {
        out.push_str("<tr class=\"filters\">");
        for (col, _) in spec.fields.iter().enumerate() {
            let _ = write!(
                out,
                "<th><input data-col=\"{col}\" oninput=\"filterRows()\" placeholder=\"{}\"></th>",
                escape(ui_label(lang, "filter"))
            );
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</thead>\n<tbody>\n");
    for record in data_rows(table) {
        out.push_str("<tr>");
        for field in spec.field_names() {
            let value = record.get(field).unwrap_or("");
            let _ = write!(out, "<td>{}</td>", escape(value));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

const FILTER_SCRIPT: &str = r##"<script>
function filterRows() {
  const inputs = document.querySelectorAll("tr.filters input");
  const rows = document.querySelectorAll("#results tbody tr");
  rows.forEach(row => {
    let visible = true;
    inputs.forEach(input => {
      const needle = input.value.toLowerCase();
      if (!needle) return;
      const cell = row.cells[Number(input.dataset.col)];
      if (!cell || !cell.textContent.toLowerCase().includes(needle)) visible = false;
    });
    row.style.display = visible ? "" : "none";
  });
}
</script>"##;

const PAGE_STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #999; padding: 0.3rem 0.6rem; text-align: left; }
thead th { background: #eee; }
tr.filters input { width: 95%; }
dl { display: grid; grid-template-columns: max-content auto; gap: 0.2rem 1rem; }
dt { font-weight: bold; }
@media print { tr.filters { display: none; } }
</style>"#;

fn page_head(out: &mut String, lang: Lang) {
    let _ = write!(
        out,
        "<!doctype html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n<body>\n",
        lang.code(),
        escape(ui_label(lang, "title")),
        PAGE_STYLE
    );
    let _ = write!(out, "<h1>{}</h1>\n", escape(ui_label(lang, "title")));
}

fn page_foot(out: &mut String, mode: RenderMode) {
    if mode == RenderMode::Interactive {
        out.push_str(FILTER_SCRIPT);
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");
}

fn push_system_info(out: &mut String, doc: &AnalysisDocument, lang: Lang) {
    let _ = write!(out, "<h2>{}</h2>\n<dl>\n", escape(ui_label(lang, "system_info")));
    let rows = [
        ("distribution", format!("{} {}", doc.distribution, doc.distribution_version)),
        ("kernel_version", doc.kernel_version.clone()),
        ("command", doc.command.clone()),
        ("analyzed_at", doc.analysis_timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
    ];
    for (key, value) in rows {
        let _ = write!(
            out,
            "<dt>{}</dt><dd>{}</dd>\n",
            escape(ui_label(lang, key)),
            escape(&value)
        );
    }
    out.push_str("</dl>\n");
}

/// Render one table as a full page. Pure function of its inputs.
pub fn render_table(table: &Table, spec: &CommandSpec, lang: Lang, mode: RenderMode) -> String {
    let mut out = String::new();
    page_head(&mut out, lang);
    push_table(&mut out, table, spec, lang, mode);
    page_foot(&mut out, mode);
    out
}

/// Render the persisted document: system info plus the command's table.
///
/// A document whose command is no longer in the registry degrades to the
/// localized "format not supported" page instead of failing.
pub fn render_document(doc: &AnalysisDocument, lang: Lang, mode: RenderMode) -> String {
    let mut out = String::new();
    page_head(&mut out, lang);
    push_system_info(&mut out, doc, lang);

    match registry::lookup(&doc.command) {
        Some(spec) => {
            if data_rows(&doc.output).is_empty() {
                let _ = write!(out, "<p>{}</p>\n", escape(ui_label(lang, "empty_table")));
            }
            push_table(&mut out, &doc.output, spec, lang, mode);
        }
        None => {
            let _ = write!(out, "<p>{}</p>\n", escape(ui_label(lang, "unsupported")));
        }
    }

    page_foot(&mut out, mode);
    out
}

/// Render a standalone localized error page (no analysis yet, unsupported
/// command).
pub fn render_error_page(lang: Lang, message_key: &str) -> String {
    let mut out = String::new();
    page_head(&mut out, lang);
    let _ = write!(out, "<p>{}</p>\n", escape(ui_label(lang, message_key)));
    page_foot(&mut out, RenderMode::Static);
    out
}

/// Plain-text table for the CLI terminal mode: aligned columns, header
/// echo dropped like the HTML modes.
pub fn render_text(table: &Table, spec: &CommandSpec, lang: Lang) -> String {
    let labels = header_labels(spec, lang);
    let rows = data_rows(table);

    let mut widths: Vec<usize> = labels.iter().map(|l| l.chars().count()).collect();
    for record in rows {
        for (col, field) in spec.field_names().enumerate() {
            let len = record.get(field).unwrap_or("").chars().count();
            if len > widths[col] {
                widths[col] = len;
            }
        }
    }

    let mut out = String::new();
    for (col, label) in labels.iter().enumerate() {
        let _ = write!(out, "{:<width$}  ", label, width = widths[col]);
    }
    out.push('\n');
    for record in rows {
        for (col, field) in spec.field_names().enumerate() {
            let _ =
                write!(out, "{:<width$}  ", record.get(field).unwrap_or(""), width = widths[col]);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ProfileInfo, Record};
    use crate::registry::lookup;

    fn lsmod_table() -> Table {
        vec![
            Record::new(vec![
                ("offset".to_string(), "Offset".to_string()),
                ("name".to_string(), "Name".to_string()),
                ("size".to_string(), "Size".to_string()),
            ]),
            Record::new(vec![
                ("offset".to_string(), "0xffffc0a4e300".to_string()),
                ("name".to_string(), "nf_tables".to_string()),
                ("size".to_string(), "356352".to_string()),
            ]),
        ]
    }

    fn sample_doc(command: &str, output: Table) -> AnalysisDocument {
        let profile = ProfileInfo {
            kernel_version: "5.15.0-76-generic".to_string(),
            distribution: "Ubuntu".to_string(),
            distro_version: "20.04.1".to_string(),
            full_version: "Linux version 5.15.0-76-generic".to_string(),
        };
        AnalysisDocument::from_profile(&profile, command, output)
    }

    #[test]
    fn test_modes_share_header_labels() {
        for spec in crate::registry::REGISTRY {
            for lang in [Lang::En, Lang::Fr] {
                let interactive = render_table(&vec![], spec, lang, RenderMode::Interactive);
                let statik = render_table(&vec![], spec, lang, RenderMode::Static);
                for label in header_labels(spec, lang) {
                    let cell = format!("<th>{label}</th>");
                    assert!(interactive.contains(&cell), "{}: {label} missing", spec.id);
                    assert!(statik.contains(&cell), "{}: {label} missing", spec.id);
                }
                // Same order: the <thead> header cells are byte-identical.
                let header_of = |html: &str| {
                    html.lines()
                        .find(|l| l.starts_with("<tr><th>"))
                        .map(str::to_string)
                };
                assert_eq!(header_of(&interactive), header_of(&statik), "{}", spec.id);
            }
        }
    }

    #[test]
    fn test_empty_table_renders_headers_only() {
        let spec = lookup("linux.lsmod.Lsmod").unwrap();
        let html = render_table(&vec![], spec, Lang::En, RenderMode::Static);
        assert!(html.contains("<th>Name</th>"));
        assert!(html.contains("<tbody>\n</tbody>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_header_echo_dropped() {
        let spec = lookup("linux.lsmod.Lsmod").unwrap();
        let html = render_table(&lsmod_table(), spec, Lang::En, RenderMode::Static);
        // The echo row ("Offset Name Size" as data) must not appear as cells.
        assert!(!html.contains("<td>Name</td>"));
        assert!(html.contains("<td>nf_tables</td>"));
    }

    #[test]
    fn test_interactive_mode_has_filters_static_does_not() {
        let spec = lookup("linux.lsmod.Lsmod").unwrap();
        let interactive = render_table(&lsmod_table(), spec, Lang::En, RenderMode::Interactive);
        let statik = render_table(&lsmod_table(), spec, Lang::En, RenderMode::Static);
        assert!(interactive.contains("filterRows"));
        assert!(interactive.contains("class=\"filters\""));
        assert!(!statik.contains("filterRows"));
        assert!(!statik.contains("class=\"filters\""));
    }

    #[test]
    fn test_values_are_escaped() {
        let spec = lookup("linux.psaux.PsAux").unwrap();
        let table = vec![
            Record::new(vec![("pid".to_string(), "h".to_string())]),
            Record::new(vec![
                ("pid".to_string(), "1".to_string()),
                ("ppid".to_string(), "0".to_string()),
                ("comm".to_string(), "<script>".to_string()),
                ("args".to_string(), "a & b".to_string()),
            ]),
        ];
        let html = render_table(&table, spec, Lang::En, RenderMode::Static);
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>")); // only the page itself, no injected one
    }

    #[test]
    fn test_document_with_unknown_command_degrades() {
        let doc = sample_doc("linux.gone.Plugin", vec![]);
        for lang in [Lang::En, Lang::Fr] {
            let html = render_document(&doc, lang, RenderMode::Interactive);
            assert!(html.contains(ui_label(lang, "unsupported")));
            assert!(!html.contains("<table"));
        }
    }

    #[test]
    fn test_document_renders_system_info() {
        let doc = sample_doc("linux.lsmod.Lsmod", lsmod_table());
        let html = render_document(&doc, Lang::Fr, RenderMode::Static);
        assert!(html.contains("Ubuntu 20.04.1"));
        assert!(html.contains("5.15.0-76-generic"));
        assert!(html.contains("Informations système"));
    }

    #[test]
    fn test_error_page_localized() {
        let html = render_error_page(Lang::Fr, "no_analysis");
        assert!(html.contains("Aucune analyse"));
        assert!(html.contains("lang=\"fr\""));
    }

    #[test]
    fn test_text_render_aligns_and_drops_echo() {
        let spec = lookup("linux.lsmod.Lsmod").unwrap();
        let text = render_text(&lsmod_table(), spec, Lang::En);
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.contains("Offset"));
        assert!(header.contains("Name"));
        let row = lines.next().unwrap();
        assert!(row.contains("nf_tables"));
        assert!(lines.next().is_none());
    }
}
