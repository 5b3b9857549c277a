//! `repeat-tui` is a terminal card editor built on `repeater`.
//!
//! Usage: `repeat-tui [config.json]`. Without an argument, the config is read
//! from the platform config directory if present. Set `RUST_LOG` to write a
//! log to `repeat-tui.log`.

use std::env;
use std::fs::File;
use std::io;
use std::sync::Mutex;

use crossterm::event;
use crossterm::event::Event;
use crossterm::execute;
use crossterm::terminal;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;

use tracing_subscriber::EnvFilter;

use tui::backend::CrosstermBackend;
use tui::Terminal;

use repeater::Config;

mod app;
mod card;
mod ui;

use app::App;
use app::Control;

const LOG_FILE: &str = "repeat-tui.log";

#[derive(Debug, thiserror::Error)]
enum Error {
  #[error(transparent)]
  Io(#[from] io::Error),

  #[error(transparent)]
  Terminal(#[from] crossterm::ErrorKind),

  #[error(transparent)]
  Config(#[from] repeater::Error),
}

fn main() -> Result<(), Error> {
  init_tracing()?;

  let config = match env::args_os().nth(1) {
    Some(path) => Config::load(path)?,
    None => match Config::default_path() {
      Ok(path) => Config::load_or_default(path)?,
      Err(_) => Config::default(),
    },
  };
  tracing::info!(?config, "starting");
  let mut app = App::new(&config);

  terminal::enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen)?;

  let result = run(&mut app);

  execute!(io::stdout(), LeaveAlternateScreen)?;
  terminal::disable_raw_mode()?;
  result
}

fn run(app: &mut App) -> Result<(), Error> {
  let backend = CrosstermBackend::new(io::stdout());
  let mut terminal = Terminal::new(backend)?;
  terminal.hide_cursor()?;

  loop {
    terminal.draw(|f| ui::render(app, f))?;

    if let Event::Key(key) = event::read()? {
      if app.process_key(key) == Control::Quit {
        break;
      }
      app.settle();
    }
  }

  terminal.show_cursor()?;
  Ok(())
}

fn init_tracing() -> Result<(), Error> {
  if env::var_os("RUST_LOG").is_none() {
    return Ok(());
  }

  // The terminal belongs to the UI, so logs go to a file instead.
  let file = File::create(LOG_FILE)?;
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}
