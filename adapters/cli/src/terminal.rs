//! Text backend that prints frames to any writer.

use std::io::Write;

use anyhow::Result as AnyResult;
use twin_elements_rendering::{Color, Glyph, Presentation, RenderingBackend, Scene};

const RESET: &str = "\x1b[0m";

/// Prints every presented scene as lines of text.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    out: W,
    title_shown: bool,
}

impl<W: Write> TerminalBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            title_shown: false,
        }
    }

    fn write_colored(&mut self, row: &[Glyph]) -> AnyResult<()> {
        let mut current: Option<Color> = None;
        for glyph in row {
            if current != Some(glyph.color) {
                let Color { red, green, blue } = glyph.color;
                write!(self.out, "\x1b[38;2;{red};{green};{blue}m")?;
                current = Some(glyph.color);
            }
            write!(self.out, "{}", glyph.symbol)?;
        }
        writeln!(self.out, "{RESET}")?;
        Ok(())
    }
}

impl<W: Write> RenderingBackend for TerminalBackend<W> {
    fn present(&mut self, presentation: &Presentation, scene: &Scene) -> AnyResult<()> {
        if !self.title_shown {
            writeln!(self.out, "== {} ==", presentation.title)?;
            self.title_shown = true;
        }

        let frame = scene.frame(presentation.show_hud);
        if presentation.color {
            for row in frame.rows() {
                self.write_colored(row)?;
            }
        } else {
            for line in frame.plain_lines() {
                writeln!(self.out, "{line}")?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
