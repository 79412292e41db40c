#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session system translating raw keystrokes into session actions.
//!
//! The [`Interpreter`] walks the menu, seed entry and in-game screens and
//! emits [`SessionAction`] values for the adapter to carry out. Movement keys
//! become world commands; menu keys become requests the adapter fulfils
//! (loading, saving, quitting). The [`replay`] helpers rebuild a world from
//! a persisted [`GameState`].

mod replay;

use twin_elements_core::{ActorKind, Command, Event, SessionStatus};

pub use replay::{capture, replay};

/// Screen the interpreter is currently reading keys for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Title menu offering new game, load, lore and quit.
    MainMenu,
    /// Seed prompt shown after choosing a new game.
    SeedEntry {
        /// Digits typed so far.
        digits: String,
    },
    /// A session is running.
    Playing {
        /// Whether `:` was just typed, so `Q` saves and quits.
        quit_armed: bool,
    },
    /// The session ended. Further keys are ignored.
    Over,
}

/// Requests produced by the interpreter for the adapter to carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// Generate a fresh world from the seed.
    NewGame {
        /// Seed typed on the seed prompt.
        seed: u64,
    },
    /// Apply a movement command to the running world.
    Apply(Command),
    /// Restore the saved session.
    Load,
    /// Persist the running session and leave.
    SaveAndQuit,
    /// Leave without saving.
    Quit,
    /// Display the lore and instructions screen.
    ShowLore,
}

/// Keystroke interpreter for a single play session.
#[derive(Clone, Debug)]
pub struct Interpreter {
    screen: Screen,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Creates an interpreter sitting on the main menu.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            screen: Screen::MainMenu,
        }
    }

    /// Screen the next key will be read for.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Switches to the in-game screen after the adapter restored a session.
    pub fn resume(&mut self, status: SessionStatus) {
        self.screen = if status.is_terminal() {
            Screen::Over
        } else {
            Screen::Playing { quit_armed: false }
        };
    }

    /// Consumes world events and the next keystroke to emit session actions.
    ///
    /// Events are observed before the key so a session that just ended stops
    /// accepting input. Keys are matched case-insensitively.
    pub fn handle(&mut self, events: &[Event], key: char, out: &mut Vec<SessionAction>) {
        for event in events {
            if let Event::StatusChanged { status } = event {
                if status.is_terminal() {
                    self.screen = Screen::Over;
                }
            }
        }

        let key = key.to_ascii_uppercase();
        match &mut self.screen {
            Screen::MainMenu => match key {
                'N' => {
                    self.screen = Screen::SeedEntry {
                        digits: String::new(),
                    };
                }
                'L' => out.push(SessionAction::Load),
                'Q' => out.push(SessionAction::Quit),
                'B' => out.push(SessionAction::ShowLore),
                _ => {}
            },
            Screen::SeedEntry { digits } => {
                if key.is_ascii_digit() {
                    digits.push(key);
                } else if key == 'S' {
                    let seed = parse_seed(digits);
                    log::debug!("starting new game with seed {seed}");
                    out.push(SessionAction::NewGame { seed });
                    self.screen = Screen::Playing { quit_armed: false };
                }
            }
            Screen::Playing { quit_armed } => {
                if *quit_armed && key == 'Q' {
                    log::debug!("save and quit requested");
                    out.push(SessionAction::SaveAndQuit);
                    *quit_armed = false;
                    return;
                }
                *quit_armed = key == ':';
                if let Some(command) = movement_command(key) {
                    out.push(SessionAction::Apply(command));
                }
            }
            Screen::Over => {}
        }
    }
}

/// Maps a movement key onto the command it issues.
///
/// `W`, `A`, `S` and `D` steer the fire actor. `I`, `J`, `K` and `L` steer
/// the water actor.
#[must_use]
pub fn movement_command(key: char) -> Option<Command> {
    ActorKind::from_key(key).map(|(actor, direction)| Command::MoveActor { actor, direction })
}

/// Reads typed digits as a seed, saturating instead of overflowing.
fn parse_seed(digits: &str) -> u64 {
    digits
        .chars()
        .filter_map(|digit| digit.to_digit(10))
        .fold(0_u64, |seed, digit| {
            seed.saturating_mul(10).saturating_add(u64::from(digit))
        })
}
