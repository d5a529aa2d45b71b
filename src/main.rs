mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use invaders::entities::{Difficulty, GameState, GameStatus, InputCommand};
use invaders::sim::{apply_input, init_state, tick};

// ── Input ─────────────────────────────────────────────────────────────────────

/// Drain all pending key events and reduce them to this frame's single
/// command.  `Quit` wins immediately; otherwise the last recognized key
/// wins and anything else collapses to `None`.
fn read_command(rx: &mpsc::Receiver<Event>) -> InputCommand {
    let mut cmd = InputCommand::None;

    while let Ok(ev) = rx.try_recv() {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            continue;
        };
        if !matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            continue;
        }
        let next = match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => InputCommand::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => InputCommand::Right,
            KeyCode::Char(' ') => InputCommand::Shoot,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputCommand::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                InputCommand::Quit
            }
            _ => InputCommand::None,
        };
        if next == InputCommand::Quit {
            return InputCommand::Quit;
        }
        if next != InputCommand::None {
            cmd = next;
        }
    }

    cmd
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Difficulty),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  SPACE  INVADERS  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(4)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Easy  ", Color::Green,  "5 lives, slower pace"),
        ("2", "Normal", Color::Yellow, "3 lives, regular speed"),
        ("3", "Hard  ", Color::Red,    "2 lives, fast and relentless!"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    // Invader legend
    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Know your enemy:"))?;

    let legend: &[(&str, Color, &str)] = &[
        ("V", Color::Green,   " Normal   — marches and descends"),
        ("O", Color::Red,     " Shooting — fires back"),
        ("W", Color::Magenta, " Fast     — dives an extra row"),
        ("M", Color::Cyan,    " Slow     — leaves a Fast one behind"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy + 3 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 8))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Char('1') => return Ok(MenuResult::Start(Difficulty::Easy)),
                KeyCode::Char('2') => return Ok(MenuResult::Start(Difficulty::Normal)),
                KeyCode::Char('3') => return Ok(MenuResult::Start(Difficulty::Hard)),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Fixed-timestep loop: one input command, one simulation tick, one render,
/// then sleep off whatever is left of the difficulty's frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();
    let frame_time = Duration::from_millis(state.difficulty.frame_time_ms());

    loop {
        let frame_start = Instant::now();

        let cmd = read_command(rx);
        if cmd == InputCommand::Quit {
            return Ok(true);
        }

        *state = apply_input(state, cmd);
        *state = tick(state, &mut rng);

        display::render(out, state)?;

        if state.status != GameStatus::Playing {
            // Terminal state — the outcome overlay is on screen; wait for
            // the player to pick restart or quit.
            return wait_for_restart(rx);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn wait_for_restart(rx: &mpsc::Receiver<Event>) -> std::io::Result<bool> {
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Char('r') | KeyCode::Char('R') => return Ok(false),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(true),
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start(difficulty) => {
                let mut rng = thread_rng();
                let mut state = init_state(difficulty, &mut rng);
                if game_loop(out, &mut state, rx)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
