use crate::config::GameConfig;
use crate::fall::FallController;
use crate::input::{BackspaceRepeat, InputBuffer};
use crate::phrase::PhraseGenerator;
use crate::render::{DrawItem, FontSize, RenderFrame, StyleTag};
use crate::score::ScoreTracker;
use crate::word_bank::WordBank;
use anyhow::Result;
use rand::rngs::SmallRng;
use std::time::Duration;

/// Top-level game mode. Exactly one is active at a time; transitions are
/// owned by [`Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GamePhase {
    Start,
    Playing,
    Break,
    GameOver,
}

/// Input events the state machine consumes. Quit and restart are host
/// concerns and never reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Begin,
    PauseToggle,
    CharTyped(char),
    DeleteDown,
    DeleteUp,
    Continue,
}

/// Mutable state for one play-through, owned exclusively by [`Game`].
#[derive(Debug, Clone)]
pub struct Session {
    pub score: u32,
    pub target_phrase: String,
    pub input: InputBuffer,
    pub fall_position: f32,
    pub won: bool,
    pub paused: bool,
}

/// The orchestrator: owns the phase, validates transitions, and drives the
/// sub-components once per tick. All dependencies are injected at
/// construction; nothing else holds a reference to the session between
/// ticks.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    phrases: PhraseGenerator,
    fall: FallController,
    scoring: ScoreTracker,
    backspace: BackspaceRepeat,
    rng: SmallRng,
    phase: GamePhase,
    session: Session,
}

impl Game {
    pub fn new(config: GameConfig, bank: WordBank, mut rng: SmallRng) -> Result<Self> {
        config.validate()?;
        let phrases = PhraseGenerator::new(bank)?;
        let fall = FallController::new(config.fall_speed, config.top_y, config.floor_y);
        let scoring = ScoreTracker::new(
            config.words_per_level,
            config.milestones.clone(),
            config.target_score,
        );
        let backspace =
            BackspaceRepeat::new(config.backspace_delay(), config.backspace_interval());

        // the first phrase exists before the first tick, at level 1
        let target_phrase = phrases.generate(&mut rng, scoring.level_for(0));
        let session = Session {
            score: 0,
            target_phrase,
            input: InputBuffer::new(),
            fall_position: fall.top(),
            won: false,
            paused: false,
        };

        Ok(Self {
            config,
            phrases,
            fall,
            scoring,
            backspace,
            rng,
            phase: GamePhase::Start,
            session,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Word count of the current target phrase, derived from the score.
    pub fn level(&self) -> usize {
        self.scoring.level_for(self.session.score)
    }

    /// Applies one input event. Events are handled in arrival order, before
    /// the tick's time-based update.
    pub fn handle_event(&mut self, event: GameEvent) {
        match (self.phase, event) {
            (GamePhase::Start, GameEvent::Begin) => {
                self.phase = GamePhase::Playing;
            }
            (GamePhase::Playing, GameEvent::PauseToggle) => {
                self.session.paused = !self.session.paused;
            }
            (GamePhase::Playing, GameEvent::CharTyped(c)) if !self.session.paused => {
                self.session.input.push(c);
            }
            (GamePhase::Playing, GameEvent::DeleteDown) if !self.session.paused => {
                // one immediate deletion, then the hold timers take over
                self.session.input.delete_last();
                self.backspace.key_down();
            }
            // releasing the key resets the repeat state even while paused
            (_, GameEvent::DeleteUp) => {
                self.backspace.key_up();
            }
            (GamePhase::Break, GameEvent::Continue) => {
                self.phase = GamePhase::Playing;
                self.next_phrase();
            }
            _ => {}
        }
    }

    /// The time-based update for one tick: held-delete repeat, fall motion,
    /// floor check, then phrase matching. Frozen entirely while paused or
    /// outside Playing.
    pub fn on_tick(&mut self, delta: Duration) {
        if self.phase != GamePhase::Playing || self.session.paused {
            return;
        }

        if self.backspace.tick(delta) {
            self.session.input.delete_last();
        }

        self.session.fall_position = self.fall.advance(self.session.fall_position);

        if self.fall.reached_floor(self.session.fall_position) {
            self.phase = GamePhase::GameOver;
            self.session.won = false;
            return;
        }

        if self.session.input.as_str() == self.session.target_phrase {
            self.on_correct_match();
        }
    }

    /// The correct-answer sequence: score increment, win check, milestone
    /// check, phrase regeneration — in that order, at most once per match.
    /// The win check runs first so reaching the target on a milestone score
    /// still ends the game.
    fn on_correct_match(&mut self) {
        self.session.score = self.scoring.record_correct(self.session.score);

        if self.scoring.has_won(self.session.score) {
            self.phase = GamePhase::GameOver;
            self.session.won = true;
            return;
        }

        if self.scoring.is_milestone(self.session.score) {
            // phrase regeneration is deferred until Continue
            self.phase = GamePhase::Break;
            return;
        }

        self.next_phrase();
    }

    fn next_phrase(&mut self) {
        let level = self.level();
        self.session.target_phrase = self.phrases.generate(&mut self.rng, level);
        self.session.fall_position = self.fall.top();
        self.session.input.clear();
    }

    fn score_line(&self) -> String {
        format!(
            "Score: {} / {}",
            self.session.score,
            self.scoring.target()
        )
    }

    /// Assembles the render description for the current phase. Pure read;
    /// never mutates state.
    pub fn render_frame(&self) -> RenderFrame {
        let items = match self.phase {
            GamePhase::Start => vec![
                DrawItem::centered("typefall", 100.0, StyleTag::Title, FontSize::Large),
                DrawItem::centered(
                    "Press P to pause during the game.",
                    190.0,
                    StyleTag::Instruction,
                    FontSize::Small,
                ),
                DrawItem::centered(
                    "Press SPACE to start!",
                    270.0,
                    StyleTag::Accent,
                    FontSize::Small,
                ),
            ],
            GamePhase::Playing => {
                let mut items = vec![
                    DrawItem::centered(
                        self.session.target_phrase.clone(),
                        self.session.fall_position,
                        StyleTag::Phrase,
                        FontSize::Large,
                    ),
                    DrawItem::at(
                        self.session.input.as_str(),
                        350.0,
                        550.0,
                        StyleTag::Input,
                        FontSize::Medium,
                    ),
                    DrawItem::at(self.score_line(), 10.0, 10.0, StyleTag::Score, FontSize::Medium),
                ];
                if self.session.paused {
                    items.push(DrawItem::centered(
                        "PAUSED",
                        250.0,
                        StyleTag::Overlay,
                        FontSize::Large,
                    ));
                    items.push(DrawItem::centered(
                        "Press P to continue",
                        350.0,
                        StyleTag::Instruction,
                        FontSize::Small,
                    ));
                }
                items
            }
            GamePhase::Break => vec![
                DrawItem::centered(self.score_line(), 160.0, StyleTag::Message, FontSize::Large),
                DrawItem::centered(
                    "Take a breather if you need it!",
                    260.0,
                    StyleTag::Instruction,
                    FontSize::Small,
                ),
                DrawItem::centered(
                    "Press SPACE when you're ready to continue",
                    340.0,
                    StyleTag::Accent,
                    FontSize::Small,
                ),
            ],
            GamePhase::GameOver => {
                let banner = if self.session.won {
                    DrawItem::centered("YOU WIN!", 250.0, StyleTag::Win, FontSize::Large)
                } else {
                    DrawItem::centered("GAME OVER", 250.0, StyleTag::Lose, FontSize::Large)
                };
                vec![
                    banner,
                    DrawItem::centered(
                        format!("Final Score: {}", self.session.score),
                        350.0,
                        StyleTag::Score,
                        FontSize::Medium,
                    ),
                    DrawItem::centered(
                        "Press R to restart or ESC to quit",
                        420.0,
                        StyleTag::Instruction,
                        FontSize::Small,
                    ),
                ]
            }
        };

        RenderFrame {
            phase: self.phase,
            items,
        }
    }
}
