#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Twin Elements adapters.
//!
//! Adapters describe what should be on screen as a [`Scene`]; the scene is
//! rasterized into a [`Frame`] of colored glyphs that a
//! [`RenderingBackend`] presents. Frames are laid out top-down, so the
//! grid's highest `y` row comes first.

use anyhow::Result as AnyResult;
use twin_elements_core::{Coordinate, Grid, HudStatus, SessionStatus, Tile};

/// RGB color attached to every glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel intensity.
    pub red: u8,
    /// Green channel intensity.
    pub green: u8,
    /// Blue channel intensity.
    pub blue: u8,
}

impl Color {
    /// Plain text color used for menus and the HUD.
    pub const TEXT: Self = Self::from_rgb_u8(230, 230, 230);

    /// Creates a color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Color used to draw the provided tile.
#[must_use]
pub const fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Nothing => Color::from_rgb_u8(0, 0, 0),
        Tile::Wall => Color::from_rgb_u8(150, 110, 80),
        Tile::Floor => Color::from_rgb_u8(110, 110, 110),
        Tile::Fire => Color::from_rgb_u8(230, 90, 30),
        Tile::Water => Color::from_rgb_u8(40, 120, 230),
        Tile::FireDoor => Color::from_rgb_u8(255, 60, 60),
        Tile::WaterDoor => Color::from_rgb_u8(60, 200, 255),
        Tile::Armor => Color::from_rgb_u8(200, 200, 60),
        Tile::Gem => Color::from_rgb_u8(180, 80, 230),
        Tile::FireActor => Color::from_rgb_u8(255, 140, 0),
        Tile::WaterActor => Color::from_rgb_u8(0, 230, 230),
    }
}

/// Single character cell of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// Character drawn in the cell.
    pub symbol: char,
    /// Foreground color of the character.
    pub color: Color,
}

impl Glyph {
    /// Creates a glyph for the provided tile.
    #[must_use]
    pub const fn for_tile(tile: Tile) -> Self {
        Self {
            symbol: tile.glyph(),
            color: tile_color(tile),
        }
    }
}

/// Rasterized screen content, rows ordered top-down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Vec<Glyph>>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Rasterizes the grid, placing its top row first.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let rows = (0..=grid.max_y())
            .rev()
            .map(|y| {
                (0..=grid.max_x())
                    .map(|x| {
                        Glyph::for_tile(grid.get(Coordinate::new(x, y)).unwrap_or_default())
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Appends a line of plain text.
    pub fn push_text(&mut self, text: &str) {
        self.rows.push(
            text.chars()
                .map(|symbol| Glyph {
                    symbol,
                    color: Color::TEXT,
                })
                .collect(),
        );
    }

    /// Rows of the frame, top-down.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Glyph>] {
        &self.rows
    }

    /// Renders every row as uncolored text.
    #[must_use]
    pub fn plain_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|glyph| glyph.symbol).collect())
            .collect()
    }
}

/// Heads-up display lines for the running session.
///
/// The trail countdown is always shown. Armor durability only appears while
/// armor is active and the encounter counters only during an encounter.
#[must_use]
pub fn hud_lines(hud: &HudStatus) -> Vec<String> {
    let mut lines = vec![format!("Steps till Trails: {}", hud.steps_until_trails)];
    if hud.armor_duration > 0 {
        lines.push(format!("Armor durability: {}", hud.armor_duration));
    }
    if hud.status == SessionStatus::Encounter {
        lines.push(format!("Steps Remaining: {}", hud.steps_remaining));
        lines.push(format!("Gems Collected: {}", hud.gems_collected));
    }
    lines
}

const MENU: [&str; 6] = [
    "Twin Elements",
    "",
    "New Game (N)",
    "Load Game (L)",
    "Lore/Instructions (B)",
    "Quit (Q)",
];

const LORE: [&str; 12] = [
    "Lore:",
    "A fire spirit and a water spirit are trapped in an underground temple",
    "flooded with fire and water. The only way out is through their own doors,",
    "and reaching them takes both of them working together.",
    "",
    "Instructions:",
    "Move the fire actor with WASD and the water actor with IJKL.",
    "Each actor leaves a trail of its element once enough steps have passed.",
    "Armor shields both actors from the opposing element for a while.",
    "An actor that steps into the opposing element is captured; its partner",
    "revives it by collecting every gem before the step budget runs out.",
    "Type :Q to save and quit.",
];

/// Tiles explained by the legend on the lore screen.
const LEGEND: [Tile; 10] = [
    Tile::FireActor,
    Tile::WaterActor,
    Tile::Wall,
    Tile::Floor,
    Tile::Fire,
    Tile::Water,
    Tile::FireDoor,
    Tile::WaterDoor,
    Tile::Armor,
    Tile::Gem,
];

/// Screen content an adapter wants presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    /// Title menu.
    MainMenu,
    /// Seed prompt showing the digits typed so far.
    SeedEntry {
        /// Digits typed so far.
        digits: String,
    },
    /// Lore and instructions.
    Lore,
    /// Running session.
    Playing {
        /// Live grid of the session.
        grid: Grid,
        /// HUD counters of the session.
        hud: HudStatus,
    },
    /// Final screen once the session is won or lost.
    GameOver {
        /// Terminal status the session ended with.
        status: SessionStatus,
    },
}

impl Scene {
    /// Rasterizes the scene.
    #[must_use]
    pub fn frame(&self, show_hud: bool) -> Frame {
        match self {
            Self::MainMenu => text_frame(&MENU),
            Self::SeedEntry { digits } => {
                text_frame(&["Enter Seed!", digits.as_str(), "Press S to start"])
            }
            Self::Lore => {
                let mut frame = text_frame(&LORE);
                frame.push_text("");
                frame.push_text("Legend:");
                for tile in LEGEND {
                    frame.push_text(&format!("{}  {}", tile.glyph(), tile.description()));
                }
                frame
            }
            Self::Playing { grid, hud } => {
                let mut frame = Frame::from_grid(grid);
                if show_hud {
                    for line in hud_lines(hud) {
                        frame.push_text(&line);
                    }
                }
                frame
            }
            Self::GameOver { status } => {
                let verdict = if *status == SessionStatus::Won {
                    "YOU WIN!"
                } else {
                    "YOU LOSE! :("
                };
                text_frame(&["GAME OVER", verdict])
            }
        }
    }
}

fn text_frame(lines: &[&str]) -> Frame {
    let mut frame = Frame::new();
    for line in lines {
        frame.push_text(line);
    }
    frame
}

/// Presentation settings shared by every frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Title shown above the first frame.
    pub title: String,
    /// Whether HUD lines are appended below the grid.
    pub show_hud: bool,
    /// Whether glyphs are drawn in color.
    pub color: bool,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, show_hud: bool, color: bool) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            show_hud,
            color,
        }
    }
}

/// Rendering backend capable of presenting Twin Elements scenes.
pub trait RenderingBackend {
    /// Presents the scene using the provided presentation settings.
    fn present(&mut self, presentation: &Presentation, scene: &Scene) -> AnyResult<()>;
}
