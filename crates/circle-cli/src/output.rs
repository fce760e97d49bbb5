//! Shared output layer for pretty/text/JSON parity across the console.
//!
//! Every handler receives an [`OutputMode`] and a writer and formats its
//! output accordingly: pretty output for humans, tab-separated rows for
//! pipes, or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the config file, same values
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use circle_core::NetworkError;
use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 60;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:=<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading framed by separators.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w)?;
    pretty_rule(w)?;
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, key/value blocks).
    Pretty,
    /// Tab-separated rows with a header line.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Core resolution logic, separated from I/O for testability.
///
/// `format_flag`: explicit `--format` value if provided.
/// `json_flag`: hidden `--json` alias.
/// `format_env`: the value of `FORMAT` if set.
/// `config_output`: the `output` key of the config file if set.
/// `is_tty`: true if stdout is a TTY.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    config_output: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    // Unknown values fall through to the next source.
    if let Some(mode) = format_env.and_then(OutputMode::from_name) {
        return mode;
    }
    if let Some(mode) = config_output.and_then(OutputMode::from_name) {
        return mode;
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, config, and TTY
/// defaults.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    config_output: Option<&str>,
) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        env_val.as_deref(),
        config_output,
        is_tty,
    )
}

/// Trait implemented by any CLI result type that can be rendered in all modes.
///
/// The [`render_item`] and [`render_list`] free functions dispatch to the
/// appropriate method based on [`OutputMode`].
pub trait Renderable {
    /// Render for human consumption.
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single self-contained JSON value, no trailing newline.
    fn render_json(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as a single text row (no header; see [`table_headers`]).
    ///
    /// [`table_headers`]: Renderable::table_headers
    fn render_table(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Column headers for text mode, in the same order as [`render_table`] fields.
    ///
    /// [`render_table`]: Renderable::render_table
    fn table_headers() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }
}

/// Render a single [`Renderable`] item.
pub fn render_item<R: Renderable>(w: &mut dyn Write, item: &R, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => item.render_human(w),
        OutputMode::Text => {
            let headers = R::table_headers();
            if !headers.is_empty() {
                writeln!(w, "{}", headers.join("\t"))?;
            }
            item.render_table(w)
        }
        OutputMode::Json => {
            item.render_json(w)?;
            writeln!(w)
        }
    }
}

/// Render a list of [`Renderable`] items.
///
/// - In JSON mode, wraps items in a JSON array.
/// - In text mode, prints the header once, then one row per item.
/// - In pretty mode, renders items sequentially.
pub fn render_list<R: Renderable>(w: &mut dyn Write, items: &[R], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Pretty => {
            for item in items {
                item.render_human(w)?;
            }
        }
        OutputMode::Text => {
            let headers = if items.is_empty() {
                &[] as &[&str]
            } else {
                R::table_headers()
            };
            if !headers.is_empty() {
                writeln!(w, "{}", headers.join("\t"))?;
            }
            for item in items {
                item.render_table(w)?;
            }
        }
        OutputMode::Json => {
            write!(w, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(w, ",")?;
                }
                writeln!(w)?;
                item.render_json(w)?;
            }
            if !items.is_empty() {
                writeln!(w)?;
            }
            writeln!(w, "]")?;
        }
    }
    Ok(())
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    w: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, value)?;
            writeln!(w)?;
        }
        OutputMode::Text => text_fn(value, w)?,
        OutputMode::Pretty => pretty_fn(value, w)?,
    }
    Ok(())
}

/// A structured error with optional hint and error code.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Optional suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Machine-readable error code (e.g. "E2001").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Create a simple error with just a message.
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            hint: None,
            error_code: None,
        }
    }
}

/// Convert a [`NetworkError`] into a [`CliError`].
impl From<&NetworkError> for CliError {
    fn from(err: &NetworkError) -> Self {
        Self {
            message: err.to_string(),
            hint: err.hint().map(str::to_string),
            error_code: Some(err.code().code().to_string()),
        }
    }
}

/// Render an error in the requested format.
///
/// In JSON mode, outputs `{"error": {"message": "...", "hint": "...", "error_code": "..."}}`.
/// Otherwise, outputs `error: <message>\n  hint: <hint>`.
pub fn render_error(w: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer(&mut *w, &wrapper)?;
            writeln!(w)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(w, "error: {}", error.message)?;
            if let Some(ref hint) = error.hint {
                writeln!(w, "  hint: {hint}")?;
            }
        }
    }
    Ok(())
}

/// Render a success message.
pub fn render_success(w: &mut dyn Write, mode: OutputMode, message: &str) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "ok": true,
                "message": message,
            });
            serde_json::to_writer(&mut *w, &wrapper)?;
            writeln!(w)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(w, "{message}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use circle_core::UserId;

    fn captured(f: impl FnOnce(&mut dyn Write)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).expect("utf8")
    }

    // ── resolve_output_mode_inner ───────────────────────────────────────────

    #[test]
    fn resolve_format_flag_wins_over_everything() {
        let mode = resolve_output_mode_inner(
            Some(OutputMode::Text),
            true,
            Some("pretty"),
            Some("json"),
            true,
        );
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_json_flag_wins_over_env() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), None, true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_env_wins_over_config() {
        let mode = resolve_output_mode_inner(None, false, Some("TEXT"), Some("json"), true);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn resolve_config_wins_over_tty() {
        let mode = resolve_output_mode_inner(None, false, None, Some("json"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn resolve_unknown_values_fall_through_to_tty() {
        let tty = resolve_output_mode_inner(None, false, Some("fancy"), Some("loud"), true);
        assert_eq!(tty, OutputMode::Pretty);
        let pipe = resolve_output_mode_inner(None, false, Some("fancy"), None, false);
        assert_eq!(pipe, OutputMode::Text);
    }

    // ── Renderable dispatch ─────────────────────────────────────────────────

    struct SimpleItem {
        name: &'static str,
        count: u32,
    }

    impl Renderable for SimpleItem {
        fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}: {}", self.name, self.count)
        }

        fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
            write!(w, "{{\"name\":\"{}\",\"count\":{}}}", self.name, self.count)
        }

        fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "{}\t{}", self.name, self.count)
        }

        fn table_headers() -> &'static [&'static str] {
            &["name", "count"]
        }
    }

    fn items() -> Vec<SimpleItem> {
        vec![
            SimpleItem { name: "a", count: 1 },
            SimpleItem { name: "b", count: 2 },
        ]
    }

    #[test]
    fn render_list_text_has_one_header() {
        let out = captured(|w| render_list(w, &items(), OutputMode::Text).expect("render"));
        assert_eq!(out, "name\tcount\na\t1\nb\t2\n");
    }

    #[test]
    fn render_list_text_empty_prints_nothing() {
        let out = captured(|w| render_list::<SimpleItem>(w, &[], OutputMode::Text).expect("render"));
        assert!(out.is_empty());
    }

    #[test]
    fn render_list_json_is_an_array() {
        let out = captured(|w| render_list(w, &items(), OutputMode::Json).expect("render"));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["count"], 2);

        let empty = captured(|w| render_list::<SimpleItem>(w, &[], OutputMode::Json).expect("render"));
        assert_eq!(empty.trim(), "[]");
    }

    #[test]
    fn render_item_pretty_uses_human_form() {
        let out = captured(|w| render_item(w, &items()[0], OutputMode::Pretty).expect("render"));
        assert_eq!(out, "a: 1\n");
    }

    // ── Errors and messages ─────────────────────────────────────────────────

    #[test]
    fn cli_error_from_network_error() {
        let err = NetworkError::FriendshipNotFound(UserId::new(1), UserId::new(2));
        let cli = CliError::from(&err);
        assert_eq!(cli.message, "profiles 1 and 2 are not friends");
        assert_eq!(cli.error_code.as_deref(), Some("E3003"));
        assert!(cli.hint.is_some());
    }

    #[test]
    fn render_error_text_includes_hint() {
        let err = CliError::from(&NetworkError::ProfileNotFound(UserId::new(9)));
        let out = captured(|w| render_error(w, OutputMode::Text, &err).expect("render"));
        assert!(out.starts_with("error: profile 9 not found\n"));
        assert!(out.contains("  hint: "));
    }

    #[test]
    fn render_error_without_hint_is_one_line() {
        let out = captured(|w| {
            render_error(w, OutputMode::Pretty, &CliError::new("boom")).expect("render");
        });
        assert_eq!(out, "error: boom\n");
    }

    #[test]
    fn render_error_json_wraps_fields() {
        let err = CliError::from(&NetworkError::SelfFriendship(UserId::new(3)));
        let out = captured(|w| render_error(w, OutputMode::Json, &err).expect("render"));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["error"]["error_code"], "E3001");
        assert!(value["error"].get("hint").is_none());
    }

    #[test]
    fn render_success_modes() {
        let text = captured(|w| render_success(w, OutputMode::Text, "done").expect("render"));
        assert_eq!(text, "done\n");
        let json = captured(|w| render_success(w, OutputMode::Json, "done").expect("render"));
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["ok"], true);
    }
}
