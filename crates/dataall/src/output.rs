//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Error-channel events are printed to stderr as one-line toasts.

use std::io::{self, IsTerminal, Write};

use dataall_api::Page;
use dataall_core::{ErrorAction, ErrorBus, ErrorEvent};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Page position under a table, e.g. `page 2/3 · 25 total`.
pub fn print_page_footer<T>(format: &OutputFormat, page: &Page<T>, fetched_all: bool, quiet: bool) {
    if quiet || !matches!(format, OutputFormat::Table) {
        return;
    }
    if fetched_all {
        eprintln!("{} total", page.count);
    } else {
        eprintln!("page {}/{} · {} total", page.page, page.pages.max(1), page.count);
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

// ── Toasts ───────────────────────────────────────────────────────────

/// Prints error-channel events to stderr as they arrive.
pub struct Toasts {
    rx: broadcast::Receiver<ErrorAction>,
    color: bool,
}

impl Toasts {
    pub fn new(bus: &ErrorBus, color: bool) -> Self {
        Self {
            rx: bus.subscribe(),
            color,
        }
    }

    /// Print everything published since the last call.
    pub fn drain(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(action) => self.show(&action),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "toast receiver lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    /// Wait for the next event. `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<ErrorAction> {
        loop {
            match self.rx.recv().await {
                Ok(action) => return Some(action),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn show(&self, action: &ErrorAction) {
        if let ErrorAction::SetError(event) = action {
            eprintln!("{}", self.format(event));
        }
    }

    fn format(&self, event: &ErrorEvent) -> String {
        let mut line = if self.color {
            format!("{} {}", "✗".red().bold(), event.message.bold())
        } else {
            format!("✗ {}", event.message)
        };
        if let Some(detail) = event.detail.as_deref().filter(|d| !d.is_empty()) {
            let detail = detail.lines().next().unwrap_or_default();
            if self.color {
                line.push_str(&format!("\n  {}", detail.dimmed()));
            } else {
                line.push_str(&format!("\n  {detail}"));
            }
        }
        line
    }
}
