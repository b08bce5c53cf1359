//! Maintenance window command handlers.

use std::time::Duration;

use chrono::Utc;
use owo_colors::OwoColorize;

use dataall_api::operations::{GetMaintenanceWindowStatus, MaintenanceMode};
use dataall_core::{Access, Console, MaintenanceGuard, MaintenanceState};

use crate::cli::{GlobalOpts, MaintenanceArgs, MaintenanceCommand, OutputFormat};
use crate::error::CliError;
use crate::output::{self, Toasts};

use super::util;

// ── Detail view ─────────────────────────────────────────────────────

fn detail(state: &MaintenanceState, color: bool) -> String {
    let mode = state
        .window
        .mode
        .map_or_else(|| "-".to_owned(), |m| m.to_string());
    let access = match (state.access, color) {
        (Access::Full, true) => state.access.green().to_string(),
        (Access::ReadOnly, true) => state.access.yellow().to_string(),
        (Access::Blocked, true) => state.access.red().to_string(),
        (_, false) => state.access.to_string(),
    };
    let checked = state
        .checked_at
        .map_or_else(|| "-".to_owned(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    format!(
        "Status:   {}\nMode:     {mode}\nAccess:   {access}\nChecked:  {checked}",
        state.window.status
    )
}

fn summary(state: &MaintenanceState) -> String {
    match state.window.mode {
        Some(mode) if state.window.in_effect() => format!("{} {mode}", state.window.status),
        _ => state.window.status.to_string(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: MaintenanceArgs,
    global: &GlobalOpts,
    toasts: &mut Toasts,
) -> Result<(), CliError> {
    let session = console.session()?;
    let mut events = console.bus().subscribe();
    let is_admin = console.config().is_admin;
    let color = output::should_color(&global.color);

    match args.command {
        MaintenanceCommand::Status => {
            let outcome = session.execute(&GetMaintenanceWindowStatus::new()).await;
            let window = util::settle(&mut events, outcome)?
                .get_maintenance_window_status
                .unwrap_or_default();
            let state = MaintenanceState {
                window,
                access: Access::for_window(window, is_admin),
                checked_at: Some(Utc::now()),
            };
            let out = output::render_single(
                &global.output,
                &state,
                |s| detail(s, color),
                summary,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MaintenanceCommand::Start { mode } => {
            let mode = MaintenanceMode::from(mode);
            if !util::confirm(
                &format!("Start a {mode} maintenance window for all users?"),
                global.yes,
            )? {
                return Ok(());
            }
            let guard = MaintenanceGuard::new(session, is_admin);
            if !guard.start(mode).await {
                return Err(util::reported(
                    &mut events,
                    "Could not start maintenance window".into(),
                ));
            }
            if !global.quiet {
                eprintln!("✓ Maintenance window started ({mode})");
            }
            print_state(&guard.state(), global, color)
        }

        MaintenanceCommand::Stop => {
            if !util::confirm("End the maintenance window?", global.yes)? {
                return Ok(());
            }
            let guard = MaintenanceGuard::new(session, is_admin);
            if !guard.stop().await {
                return Err(util::reported(
                    &mut events,
                    "Could not stop maintenance window".into(),
                ));
            }
            if !global.quiet {
                eprintln!("✓ Maintenance window stopped");
            }
            print_state(&guard.state(), global, color)
        }

        MaintenanceCommand::Reindex { with_deletes } => {
            let guard = MaintenanceGuard::new(session, is_admin);
            if !guard.reindex(with_deletes).await {
                return Err(util::reported(
                    &mut events,
                    "Could not start catalog reindex".into(),
                ));
            }
            if !global.quiet {
                eprintln!("✓ Catalog reindex started");
            }
            Ok(())
        }

        MaintenanceCommand::Watch { interval } => {
            let interval = interval.map_or(console.config().maintenance_poll_interval, Duration::from_secs);
            if interval.is_zero() {
                return Err(CliError::Validation {
                    field: "interval".into(),
                    reason: "must be at least one second".into(),
                });
            }
            watch(MaintenanceGuard::spawn(session, interval, is_admin), global, color, toasts).await
        }
    }
}

fn print_state(state: &MaintenanceState, global: &GlobalOpts, color: bool) -> Result<(), CliError> {
    let out = output::render_single(&global.output, state, |s| detail(s, color), summary)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Print one line per window change until Ctrl-C.
async fn watch(
    guard: MaintenanceGuard,
    global: &GlobalOpts,
    color: bool,
    toasts: &mut Toasts,
) -> Result<(), CliError> {
    let mut rx = guard.subscribe();
    let mut last = None;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = *rx.borrow_and_update();
                if state.checked_at.is_none() || last == Some(state.window) {
                    continue;
                }
                last = Some(state.window);
                match global.output {
                    OutputFormat::Table => {
                        let at = state
                            .checked_at
                            .map(|t| t.format("%H:%M:%S").to_string())
                            .unwrap_or_default();
                        output::print_output(
                            &format!("[{at}] {} · access {}", summary(&state), state.access),
                            global.quiet,
                        );
                    }
                    _ => {
                        let out = output::render_single(
                            &OutputFormat::JsonCompact,
                            &state,
                            |s| detail(s, color),
                            summary,
                        )?;
                        output::print_output(&out, global.quiet);
                    }
                }
            }
            action = toasts.recv() => match action {
                Some(action) => toasts.show(&action),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    guard.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use dataall_api::operations::{MaintenanceStatus, MaintenanceWindow};

    use super::*;

    fn state(status: MaintenanceStatus, mode: Option<MaintenanceMode>) -> MaintenanceState {
        let window = MaintenanceWindow { status, mode };
        MaintenanceState {
            window,
            access: Access::for_window(window, false),
            checked_at: None,
        }
    }

    #[test]
    fn summary_hides_mode_of_inactive_window() {
        assert_eq!(
            summary(&state(MaintenanceStatus::Inactive, Some(MaintenanceMode::ReadOnly))),
            "INACTIVE"
        );
        assert_eq!(
            summary(&state(MaintenanceStatus::Active, Some(MaintenanceMode::NoAccess))),
            "ACTIVE NO-ACCESS"
        );
    }

    #[test]
    fn detail_lists_access_level() {
        let text = detail(&state(MaintenanceStatus::Pending, Some(MaintenanceMode::ReadOnly)), false);
        assert!(text.contains("Status:   PENDING"));
        assert!(text.contains("Access:   read-only"));
        assert!(text.contains("Checked:  -"));
    }
}
