//! Parsers for Volatility's whitespace-delimited text output.
//!
//! This is the core of dumpsight: one schema-driven parser turns the
//! heterogeneous plugin output into typed tables, driven entirely by the
//! command registry. There is no per-command code path.
//!
//! Rules, in order:
//! - blank lines and the tool's own noise (version banner, progress
//!   indicators) are skipped;
//! - a line with fewer tokens than the command's minimum is dropped
//!   silently — no partial record is ever emitted;
//! - fields consume tokens positionally: one token, a fixed run of
//!   consecutive tokens, or all remaining tokens joined by single spaces.
//!
//! The tool echoes its column headers as the first data line; that echo
//! usually satisfies the token minimum and parses like any row. Keeping it
//! is deliberate: rendering drops row 0 (see `render`).

use crate::document::{Record, Table};
use crate::registry::{CommandSpec, FieldWidth};

/// Line prefixes the tool emits around its tabular output.
const NOISE_PREFIXES: &[&str] = &["Volatility", "Progress:", "WARNING", "ERROR"];

fn is_tool_noise(line: &str) -> bool {
    NOISE_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Parse one line of plugin output into a record, or nothing.
///
/// Returns `None` for blank lines, tool noise, and lines below the
/// command's token minimum. A trailing remainder field may be empty when
/// the line has exactly the minimum token count; it is still present in
/// the record.
pub fn parse_line(line: &str, spec: &CommandSpec) -> Option<Record> {
    let trimmed = line.trim();
    if trimmed.is_empty() || is_tool_noise(trimmed) {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    // min_tokens equals the layout's fixed width sum for every registry
    // entry; taking the max keeps the positional indexing below in bounds
    // even for a hand-built spec.
    let fixed: usize = spec.fields.iter().map(|f| f.width.fixed_tokens()).sum();
    if tokens.len() < spec.min_tokens.max(fixed) {
        return None;
    }

    let mut fields = Vec::with_capacity(spec.fields.len());
    let mut pos = 0;
    for field in spec.fields {
        let value = match field.width {
            FieldWidth::Single => {
                let value = tokens[pos].to_string();
                pos += 1;
                value
            }
            FieldWidth::Run(n) => {
                let value = tokens[pos..pos + n].join(" ");
                pos += n;
                value
            }
            FieldWidth::Rest => {
                let value = tokens[pos..].join(" ");
                pos = tokens.len();
                value
            }
        };
        fields.push((field.name.to_string(), value));
    }

    Some(Record::new(fields))
}

/// Parse the full captured stdout of one plugin invocation into a table.
///
/// Malformed lines accumulate as fewer rows, never as errors.
pub fn parse_output(text: &str, spec: &CommandSpec) -> Table {
    text.lines().filter_map(|line| parse_line(line, spec)).collect()
}
