#![forbid(unsafe_code)]

//! folio-demo binary entry point.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{cursor, queue, style, terminal};
use folio_core::terminal_session::{SessionOptions, TerminalSession};
use folio_demo::app::{App, Frame};
use folio_demo::{cli, logging};
use folio_palette::PaletteConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() {
    let opts = cli::Opts::parse();
    if let Err(e) = logging::init(&opts) {
        eprintln!("Cannot open log file {}: {e}", opts.log_file.display());
        std::process::exit(1);
    }

    let config = match PaletteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&opts, config) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

fn run(opts: &cli::Opts, config: PaletteConfig) -> io::Result<()> {
    let session = TerminalSession::new(SessionOptions {
        alternate_screen: true,
        mouse_capture: opts.mouse,
        bracketed_paste: true,
    })?;
    let (width, height) = session.size()?;
    let mut app = App::new(opts, config, width, height);
    tracing::info!(width, height, mouse = opts.mouse, "demo started");

    let mut stdout = io::stdout();
    draw(&mut stdout, &app.frame())?;
    while !app.should_quit() {
        if !session.poll_event(POLL_INTERVAL)? {
            continue;
        }
        if let Some(event) = session.read_event()? {
            app.handle_event(&event);
            draw(&mut stdout, &app.frame())?;
        }
    }

    tracing::info!(route = app.current_route(), "demo finished");
    Ok(())
}

fn draw(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    queue!(out, cursor::Hide, terminal::Clear(terminal::ClearType::All))?;
    for span in &frame.spans {
        queue!(out, cursor::MoveTo(span.x, span.y), style::Print(&span.text))?;
    }
    if let Some((x, y)) = frame.cursor {
        queue!(out, cursor::MoveTo(x, y), cursor::Show)?;
    }
    out.flush()
}
