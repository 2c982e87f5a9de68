//! Console sinks: where formatted log lines end up.
//!
//! The [`Console`] trait models a platform console with one output channel
//! per severity plus visual grouping. [`AnsiConsole`] renders to the
//! terminal; [`MemoryConsole`] records calls for tests and embedders.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::Severity;

/// A text segment with optional CSS styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledSegment {
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub css: String,
}

impl StyledSegment {
    /// A segment with no styling.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            css: String::new(),
        }
    }

    /// A segment with a CSS color annotation.
    pub fn styled(text: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            css: css.into(),
        }
    }
}

/// One formatted console line: a styled prefix plus message segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    pub severity: Severity,
    pub segments: Vec<StyledSegment>,
}

impl LogLine {
    /// Concatenated plain text of all segments, space-separated.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self.segments.iter().map(|s| s.text.as_str()).collect();
        parts.join(" ")
    }
}

/// A platform console: four independent severity channels plus grouping.
///
/// The logger routes each emitted line to the channel matching its
/// severity. Grouping state (nesting depth) is owned entirely by the
/// console implementation.
pub trait Console: Send + Sync {
    fn log(&self, line: &LogLine);
    fn debug(&self, line: &LogLine);
    fn warn(&self, line: &LogLine);
    fn error(&self, line: &LogLine);

    /// Opens a collapsed visual group; subsequent lines nest under it.
    fn group_collapsed(&self, line: &LogLine);

    /// Closes the innermost open group. No-op when no group is open.
    fn group_end(&self);
}

/// Routes a line to the output channel matching its severity.
pub(crate) fn forward(console: &dyn Console, line: &LogLine) {
    match line.severity {
        Severity::Verbose => console.log(line),
        Severity::Debug => console.debug(line),
        Severity::Warning => console.warn(line),
        Severity::Error => console.error(line),
    }
}

const ANSI_RESET: &str = "\x1b[0m";

/// Maps a CSS color annotation to its ANSI escape. Unknown styles render
/// unstyled.
fn ansi_for_css(css: &str) -> Option<&'static str> {
    match css {
        "color: grey" => Some("\x1b[90m"),
        "color: green" => Some("\x1b[32m"),
        "color: yellow" => Some("\x1b[33m"),
        "color: red" => Some("\x1b[31m"),
        _ => None,
    }
}

/// Terminal console rendering CSS-styled segments as ANSI colors.
///
/// `log` and `debug` write to stdout, `warn` and `error` to stderr. Group
/// nesting is tracked here and rendered as two-space indentation per level.
/// Write errors are ignored; emitting a log line never fails.
pub struct AnsiConsole {
    depth: AtomicUsize,
    color: bool,
}

impl AnsiConsole {
    /// Console with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            depth: AtomicUsize::new(0),
            color: true,
        }
    }

    /// Console that renders segment text without color escapes.
    pub fn plain() -> Self {
        Self {
            depth: AtomicUsize::new(0),
            color: false,
        }
    }

    fn render(&self, line: &LogLine) -> String {
        let mut out = "  ".repeat(self.depth.load(Ordering::Relaxed));
        for (i, segment) in line.segments.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match ansi_for_css(&segment.css) {
                Some(code) if self.color => {
                    out.push_str(code);
                    out.push_str(&segment.text);
                    out.push_str(ANSI_RESET);
                }
                _ => out.push_str(&segment.text),
            }
        }
        out
    }

    fn write_stdout(&self, line: &LogLine) {
        let rendered = self.render(line);
        let _ = writeln!(std::io::stdout().lock(), "{rendered}");
    }

    fn write_stderr(&self, line: &LogLine) {
        let rendered = self.render(line);
        let _ = writeln!(std::io::stderr().lock(), "{rendered}");
    }
}

impl Console for AnsiConsole {
    fn log(&self, line: &LogLine) {
        self.write_stdout(line);
    }

    fn debug(&self, line: &LogLine) {
        self.write_stdout(line);
    }

    fn warn(&self, line: &LogLine) {
        self.write_stderr(line);
    }

    fn error(&self, line: &LogLine) {
        self.write_stderr(line);
    }

    fn group_collapsed(&self, line: &LogLine) {
        self.write_stdout(line);
        self.depth.fetch_add(1, Ordering::Relaxed);
    }

    fn group_end(&self) {
        // Saturating decrement: unbalanced group_end must not underflow.
        let _ = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |d| d.checked_sub(1));
    }
}

impl Default for AnsiConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// One recorded console call.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A line forwarded to the channel matching its severity.
    Line(LogLine),
    /// A group opened with the given header line.
    GroupStart(LogLine),
    /// A group closed.
    GroupEnd,
}

/// In-memory console that records every forwarded call in order.
#[derive(Debug, Default)]
pub struct MemoryConsole {
    records: Mutex<Vec<Record>>,
}

impl MemoryConsole {
    /// An empty recording console.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, record: Record) {
        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push(record);
    }

    /// All recorded calls, oldest first.
    pub fn records(&self) -> Vec<Record> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Only the recorded `Line` entries, oldest first.
    pub fn lines(&self) -> Vec<LogLine> {
        self.records()
            .into_iter()
            .filter_map(|record| match record {
                Record::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Discard all recorded calls.
    pub fn clear(&self) {
        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.clear();
    }
}

impl Console for MemoryConsole {
    fn log(&self, line: &LogLine) {
        self.push(Record::Line(line.clone()));
    }

    fn debug(&self, line: &LogLine) {
        self.push(Record::Line(line.clone()));
    }

    fn warn(&self, line: &LogLine) {
        self.push(Record::Line(line.clone()));
    }

    fn error(&self, line: &LogLine) {
        self.push(Record::Line(line.clone()));
    }

    fn group_collapsed(&self, line: &LogLine) {
        self.push(Record::GroupStart(line.clone()));
    }

    fn group_end(&self) {
        self.push(Record::GroupEnd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(severity: Severity, text: &str) -> LogLine {
        LogLine {
            severity,
            segments: vec![
                StyledSegment::styled(format!("» {severity}"), severity.css()),
                StyledSegment::plain(text),
            ],
        }
    }

    // --- StyledSegment / LogLine ---

    #[test]
    fn styled_segment_omit_empty_css() {
        let json = serde_json::to_string(&StyledSegment::plain("plain")).unwrap();
        assert!(!json.contains("css"));
    }

    #[test]
    fn styled_segment_roundtrip() {
        let segment = StyledSegment::styled("Error:", "color: red");
        let json = serde_json::to_string(&segment).unwrap();
        let parsed: StyledSegment = serde_json::from_str(&json).unwrap();
        assert_eq!(segment, parsed);
    }

    #[test]
    fn log_line_text_joins_segments() {
        let line = line(Severity::Debug, "hello");
        assert_eq!(line.text(), "» debug hello");
    }

    // --- AnsiConsole rendering ---

    #[test]
    fn render_plain_skips_escapes() {
        let console = AnsiConsole::plain();
        let rendered = console.render(&line(Severity::Error, "boom"));
        assert_eq!(rendered, "» error boom");
    }

    #[test]
    fn render_colored_wraps_styled_segments() {
        let console = AnsiConsole::new();
        let rendered = console.render(&line(Severity::Warning, "careful"));
        assert!(rendered.starts_with("\x1b[33m» warning\x1b[0m"));
        assert!(rendered.ends_with(" careful"));
    }

    #[test]
    fn render_unknown_css_falls_back_to_plain() {
        let console = AnsiConsole::new();
        let rendered = console.render(&LogLine {
            severity: Severity::Verbose,
            segments: vec![StyledSegment::styled("odd", "font-weight: bold")],
        });
        assert_eq!(rendered, "odd");
    }

    #[test]
    fn group_depth_indents_rendering() {
        let console = AnsiConsole::plain();
        console.group_collapsed(&line(Severity::Verbose, "outer"));
        assert_eq!(console.render(&line(Severity::Verbose, "inner")), "  » verbose inner");

        console.group_collapsed(&line(Severity::Verbose, "deeper"));
        assert_eq!(
            console.render(&line(Severity::Verbose, "leaf")),
            "    » verbose leaf"
        );

        console.group_end();
        console.group_end();
        assert_eq!(console.render(&line(Severity::Verbose, "top")), "» verbose top");
    }

    #[test]
    fn group_end_without_group_is_noop() {
        let console = AnsiConsole::plain();
        console.group_end();
        console.group_end();
        assert_eq!(console.render(&line(Severity::Verbose, "top")), "» verbose top");
    }

    // --- MemoryConsole ---

    #[test]
    fn records_calls_in_order() {
        let console = MemoryConsole::new();
        console.debug(&line(Severity::Debug, "first"));
        console.group_collapsed(&line(Severity::Verbose, "group"));
        console.error(&line(Severity::Error, "second"));
        console.group_end();

        let records = console.records();
        assert_eq!(records.len(), 4);
        assert!(matches!(records[0], Record::Line(_)));
        assert!(matches!(records[1], Record::GroupStart(_)));
        assert!(matches!(records[2], Record::Line(_)));
        assert!(matches!(records[3], Record::GroupEnd));
    }

    #[test]
    fn lines_filters_group_records() {
        let console = MemoryConsole::new();
        console.group_collapsed(&line(Severity::Verbose, "group"));
        console.warn(&line(Severity::Warning, "inside"));
        console.group_end();

        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].severity, Severity::Warning);
    }

    #[test]
    fn clear_resets_records() {
        let console = MemoryConsole::new();
        console.log(&line(Severity::Verbose, "a"));
        assert_eq!(console.len(), 1);

        console.clear();
        assert!(console.is_empty());
    }

    #[test]
    fn forward_routes_by_severity() {
        let console = MemoryConsole::new();
        for severity in Severity::ALL {
            forward(&console, &line(severity, "x"));
        }

        let severities: Vec<Severity> =
            console.lines().iter().map(|l| l.severity).collect();
        assert_eq!(severities, Severity::ALL);
    }
}
