//! Turn loop connecting keystrokes, the world and the rendering backend.

use anyhow::Result;
use twin_elements_core::Event;
use twin_elements_rendering::{Presentation, RenderingBackend, Scene};
use twin_elements_system_session::{self as session, Interpreter, Screen, SessionAction};
use twin_elements_world::{self as world, query, World, WorldConfig};

use crate::store::SaveStore;

/// Whether the driver keeps reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Owns the session and everything needed to carry out its actions.
pub(crate) struct Driver<B> {
    interpreter: Interpreter,
    world: Option<World>,
    events: Vec<Event>,
    world_config: WorldConfig,
    store: SaveStore,
    presentation: Presentation,
    backend: B,
    lore_requested: bool,
}

impl<B: RenderingBackend> Driver<B> {
    pub(crate) fn new(
        world_config: WorldConfig,
        store: SaveStore,
        presentation: Presentation,
        backend: B,
    ) -> Self {
        Self {
            interpreter: Interpreter::new(),
            world: None,
            events: Vec::new(),
            world_config,
            store,
            presentation,
            backend,
            lore_requested: false,
        }
    }

    /// Presents the current scene.
    pub(crate) fn present(&mut self) -> Result<()> {
        let scene = self.scene();
        self.backend.present(&self.presentation, &scene)
    }

    /// Feeds a batch of keys, presenting once the batch is consumed or the
    /// session ends.
    pub(crate) fn run_batch<I>(&mut self, keys: I) -> Result<Flow>
    where
        I: IntoIterator<Item = char>,
    {
        for key in keys {
            if self.feed(key)? == Flow::Exit {
                self.present()?;
                return Ok(Flow::Exit);
            }
        }
        self.present()?;
        Ok(Flow::Continue)
    }

    fn feed(&mut self, key: char) -> Result<Flow> {
        let mut actions = Vec::new();
        self.interpreter.handle(&self.events, key, &mut actions);
        self.events.clear();

        for action in actions {
            if self.perform(action)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }

        let finished = self
            .world
            .as_ref()
            .is_some_and(|world| query::status(world).is_terminal());
        Ok(if finished { Flow::Exit } else { Flow::Continue })
    }

    fn perform(&mut self, action: SessionAction) -> Result<Flow> {
        match action {
            SessionAction::NewGame { seed } => {
                log::info!("generating world for seed {seed}");
                self.world = Some(World::generate(seed, self.world_config));
            }
            SessionAction::Apply(command) => {
                if let Some(world) = self.world.as_mut() {
                    world::apply(world, command, &mut self.events);
                }
            }
            SessionAction::Load => self.load(),
            SessionAction::SaveAndQuit => {
                self.save()?;
                return Ok(Flow::Exit);
            }
            SessionAction::Quit => return Ok(Flow::Exit),
            SessionAction::ShowLore => self.lore_requested = true,
        }
        Ok(Flow::Continue)
    }

    /// Restores the saved session; failures leave the menu in place.
    fn load(&mut self) {
        match self.store.load() {
            Ok(state) => {
                let world = session::replay(&state, self.world_config);
                self.interpreter.resume(query::status(&world));
                log::info!(
                    "restored seed {} after {} steps",
                    state.seed,
                    query::total_steps(&world)
                );
                self.world = Some(world);
            }
            Err(error) => log::error!("could not load saved session: {error:#}"),
        }
    }

    fn save(&self) -> Result<()> {
        match &self.world {
            Some(world) => {
                self.store.save(&session::capture(world))?;
                log::info!("session saved to {}", self.store.path().display());
            }
            None => log::warn!("no session to save"),
        }
        Ok(())
    }

    fn scene(&mut self) -> Scene {
        let lore = std::mem::take(&mut self.lore_requested);
        if lore && *self.interpreter.screen() == Screen::MainMenu {
            return Scene::Lore;
        }

        if let Some(world) = &self.world {
            let status = query::status(world);
            if status.is_terminal() {
                return Scene::GameOver { status };
            }
        }

        match (self.interpreter.screen(), &self.world) {
            (Screen::SeedEntry { digits }, _) => Scene::SeedEntry {
                digits: digits.clone(),
            },
            (Screen::Playing { .. } | Screen::Over, Some(world)) => Scene::Playing {
                grid: query::grid(world).clone(),
                hud: query::hud_status(world),
            },
            _ => Scene::MainMenu,
        }
    }
}
