pub mod config;
pub mod fall;
pub mod game;
pub mod input;
pub mod phrase;
pub mod render;
pub mod runtime;
pub mod score;
pub mod ui;
pub mod word_bank;

use crate::{
    config::{ConfigStore, FileConfigStore, GameConfig},
    game::{Game, GamePhase},
    runtime::{translate_key, RuntimeEvent},
    word_bank::WordBank,
};
use anyhow::Result;
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use rand::{rngs::SmallRng, SeedableRng};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    io::{self, stdin},
    sync::mpsc,
    thread,
    time::Duration,
};

/// terminal typing game where a falling phrase races you to the floor
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing game: a phrase falls toward the floor while you type it. Correct phrases score points, raise the word count, and earn breather screens on the way to the target score."
)]
pub struct Cli {
    /// word bank to pull phrases from
    #[clap(short = 'b', long, value_enum)]
    bank: Option<SupportedBank>,

    /// score needed to win
    #[clap(short = 't', long)]
    target_score: Option<u32>,

    /// fall speed in logical units per tick
    #[clap(long)]
    fall_speed: Option<f32>,

    /// seed the phrase sequence for a reproducible run
    #[clap(long)]
    pub seed: Option<u64>,

    /// list the embedded word banks and exit
    #[clap(long)]
    list_banks: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedBank {
    Classic,
    Meadow,
}

impl Cli {
    /// Layers CLI overrides onto the persisted configuration.
    fn apply(&self, config: &mut GameConfig) {
        if let Some(bank) = self.bank {
            config.bank = bank.to_string().to_lowercase();
        }
        if let Some(target_score) = self.target_score {
            config.target_score = target_score;
        }
        if let Some(fall_speed) = self.fall_speed {
            config.fall_speed = fall_speed;
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub config: GameConfig,
    pub bank: WordBank,
    pub seed: Option<u64>,
    pub game: Game,
}

impl App {
    pub fn new(config: GameConfig, bank: WordBank, seed: Option<u64>) -> Result<Self> {
        let game = Game::new(config.clone(), bank.clone(), Self::rng(seed))?;
        Ok(Self {
            config,
            bank,
            seed,
            game,
        })
    }

    fn rng(seed: Option<u64>) -> SmallRng {
        match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    /// Fresh session with the same settings (host-level restart).
    pub fn reset(&mut self) -> Result<()> {
        self.game = Game::new(
            self.config.clone(),
            self.bank.clone(),
            Self::rng(self.seed),
        )?;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list_banks {
        for name in WordBank::names() {
            println!("{name}");
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply(&mut config);
    config.validate()?;
    // first run: keep the effective settings around for next time
    if !store.exists() {
        let _ = store.save(&config);
    }

    let bank = WordBank::load(&config.bank)?;
    let mut app = App::new(config, bank, cli.seed)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // backspace release drives the delete repeat; only kitty-style
    // terminals report key release, elsewhere terminal autorepeat still
    // deletes via repeated press events
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug)]
enum ExitType {
    Restart,
    Quit,
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_interval = app.tick_interval();
    let events = get_game_events(tick_interval);

    loop {
        let mut exit_type = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match events.recv()? {
                RuntimeEvent::Tick => {
                    let phase_before = app.game.phase();
                    app.game.on_tick(tick_interval);

                    // redraw while the phrase is moving, and on the tick
                    // that ends the game
                    let active = app.game.phase() == GamePhase::Playing
                        && !app.game.session().paused;
                    if active || app.game.phase() != phase_before {
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                RuntimeEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                RuntimeEvent::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Esc => break,
                            KeyCode::Char('c')
                                if key.modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                break;
                            }
                            KeyCode::Char('r')
                                if app.game.phase() == GamePhase::GameOver =>
                            {
                                exit_type = ExitType::Restart;
                                break;
                            }
                            _ => {}
                        }
                    }

                    if let Some(game_event) = translate_key(app.game.phase(), key) {
                        app.game.handle_event(game_event);
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => app.reset()?,
            ExitType::Quit => break,
        }
    }

    Ok(())
}

fn get_game_events(tick_interval: Duration) -> mpsc::Receiver<RuntimeEvent> {
    let (tx, rx) = mpsc::channel();

    let tick_tx = tx.clone();
    thread::spawn(move || loop {
        if tick_tx.send(RuntimeEvent::Tick).is_err() {
            break;
        }

        thread::sleep(tick_interval)
    });

    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if tx.send(RuntimeEvent::Key(key)).is_err() {
                    break;
                }
            }
            Ok(Event::Resize(_, _)) => {
                if tx.send(RuntimeEvent::Resize).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });

    rx
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
