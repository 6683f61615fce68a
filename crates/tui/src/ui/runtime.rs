//! Runtime: event loop and terminal lifecycle for the pin code demo.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode,
//!   mouse capture and bracketed paste).
//! - Read terminal input on a dedicated blocking thread and forward it over a
//!   channel.
//! - Sleep until the widget's reveal deadline instead of polling quickly, so
//!   the reveal window closes on time without burning CPU while idle.
//! - Render only when something visible changed.
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event, KeyCode,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::App;
use crate::ui::components::pin_code::PinCodeProps;
use crate::ui::main::draw;

type Backend = CrosstermBackend<std::io::Stdout>;

/// Spawn a blocking input reader that forwards `crossterm` events over a
/// Tokio channel.
///
/// `poll()` and `read()` stay on the same OS thread; the loop exits once the
/// receiving side is dropped.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(64);

    tokio::task::spawn_blocking(move || {
        let poll_interval = Duration::from_millis(16);
        while !sender.is_closed() {
            match event::poll(poll_interval) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    tracing::warn!("Failed to poll terminal input: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture, DisableBracketedPaste)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| draw(frame, app))?;
    Ok(())
}

async fn sleep_until(deadline: Option<time::Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn is_interrupt(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key) if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Run the demo until the user quits or submits a complete code.
///
/// Returns the submitted code, or `None` when the user quit without one.
pub async fn run_app(props: PinCodeProps) -> Result<Option<String>> {
    let mut input_receiver = spawn_input_thread();
    let mut app = App::new(props);
    let mut terminal = setup_terminal()?;

    // Slow housekeeping tick; reveal deadlines are awaited directly.
    let mut ticker = time::interval(Duration::from_millis(1000));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app)?;

    loop {
        let reveal_deadline = app.pin.next_deadline().map(time::Instant::from_std);
        let needs_render = tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(event) if is_interrupt(&event) => break,
                    Some(event) => app.handle_event(event, Instant::now()),
                    // Input channel closed; shut down cleanly.
                    None => break,
                }
            }
            _ = sleep_until(reveal_deadline), if reveal_deadline.is_some() => app.on_tick(Instant::now()),
            _ = ticker.tick() => app.on_tick(Instant::now()),
            _ = signal::ctrl_c() => break,
        };

        if app.should_exit() {
            break;
        }
        if needs_render {
            render(&mut terminal, &mut app)?;
        }
    }

    app.pin.unmount();
    drop(input_receiver);
    cleanup_terminal(&mut terminal)?;
    Ok(app.take_fulfilled())
}
