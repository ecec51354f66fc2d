//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed against the previously drawn one and only changed runs
//! of cells are written; a size change redraws everything. A bell queued with
//! [`TerminalRenderer::queue_bell`] goes out with the next frame.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableFocusChange, EnableFocusChange},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

const BEL: u8 = 0x07;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written, `None` until the first draw or after [`invalidate`](Self::invalidate).
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
    bells: u32,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(32 * 1024),
            bells: 0,
        }
    }

    /// Raw mode, alternate screen, hidden cursor and focus reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?
            .queue(EnableFocusChange)?;
        self.flush()?;
        tracing::debug!("terminal_entered");
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(DisableFocusChange)?
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        tracing::debug!("terminal_restored");
        Ok(())
    }

    /// Redraw everything on the next frame (after a resize the screen contents are unknown).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Ring the terminal bell once with the next draw.
    pub fn queue_bell(&mut self) {
        self.bells += 1;
    }

    /// Write `fb` to the terminal, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents and is meant to be cleared and
    /// repainted for the next frame, so no buffer is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut prev = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.out)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.out)?;
                stale.unwrap_or_else(|| FrameBuffer::new(0, 0))
            }
        };
        let bells = std::mem::take(&mut self.bells) as usize;
        self.out.extend(std::iter::repeat(BEL).take(bells));
        self.flush()?;

        std::mem::swap(&mut prev, fb);
        self.shown = Some(prev);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.out.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Tracks the terminal's current attributes so only changes are emitted.
#[derive(Default)]
struct StyleCursor {
    current: Option<CellStyle>,
}

impl StyleCursor {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current.replace(style);
        if prev == Some(style) {
            return Ok(());
        }
        if prev.map_or(true, |p| p.bold != style.bold) {
            let attr = if style.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            out.queue(SetAttribute(attr))?;
        }
        if prev.map_or(true, |p| p.fg != style.fg) {
            out.queue(SetForegroundColor(color(style.fg)))?;
        }
        if prev.map_or(true, |p| p.bg != style.bg) {
            out.queue(SetBackgroundColor(color(style.bg)))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.current.is_some() {
            out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Encode a run of cells starting at (x, y).
fn encode_run(
    fb: &FrameBuffer,
    (x, y, len): (u16, u16, u16),
    style: &mut StyleCursor,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(cursor::MoveTo(x, y))?;
    for cell in fb.run(x, y, len) {
        style.apply(out, cell.style)?;
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = StyleCursor::default();
    for y in 0..fb.height() {
        encode_run(fb, (0, y, fb.width()), &mut style, out)?;
    }
    style.finish(out)
}

/// Encode only the runs that differ between two frames of equal size.
///
/// Writes nothing when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = StyleCursor::default();
    for run in changed_runs(prev, next) {
        encode_run(next, run, &mut style, out)?;
    }
    style.finish(out)
}

/// Maximal horizontal runs of differing cells as `(x, y, len)`.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let width = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < width && !differs(x) {
                x += 1;
            }
            if x >= width {
                return None;
            }
            let start = x;
            while x < width && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}
