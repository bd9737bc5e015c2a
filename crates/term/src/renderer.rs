//! TerminalRenderer: presents canvases on a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is drawn in full; later frames only rewrite runs of glyphs that changed.

use std::io::{self, Write};
use std::mem;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Rgb, Style};

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<Canvas>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Restore the terminal. Safe to call after a failed `enter`.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("failed to disable raw mode")
    }

    /// Force the next frame to be drawn in full
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    /// Ring the terminal bell
    pub fn bell(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.push(0x07);
        self.flush()
    }

    /// Present `frame` and swap it with the previous one.
    ///
    /// Callers keep a single canvas alive and redraw into it each frame;
    /// after the call it holds stale content from an older frame.
    pub fn present(&mut self, frame: &mut Canvas) -> Result<()> {
        self.buf.clear();
        match self.prev.take() {
            Some(mut prev)
                if prev.width() == frame.width() && prev.height() == frame.height() =>
            {
                encode_diff_into(&prev, frame, &mut self.buf)?;
                mem::swap(&mut prev, frame);
                self.prev = Some(prev);
            }
            _ => {
                encode_full_into(frame, &mut self.buf)?;
                self.prev = Some(frame.clone());
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.out
            .write_all(&self.buf)
            .and_then(|_| self.out.flush())
            .context("failed to write to terminal")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full redraw of `frame` into `out`
pub fn encode_full_into(frame: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = None;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for glyph in frame.row(y) {
            set_style(out, &mut pen, glyph.style)?;
            out.queue(Print(glyph.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the glyph runs that differ between `prev` and `next`.
/// Both canvases must have the same dimensions.
pub fn encode_diff_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = None;
    for y in 0..next.height() {
        let (old, new) = (prev.row(y), next.row(y));
        for (start, end) in changed_runs(old, new) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for glyph in &new[start..end] {
                set_style(out, &mut pen, glyph.style)?;
                out.queue(Print(glyph.ch))?;
            }
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Half-open ranges of indices where `a` and `b` differ
fn changed_runs<'a, T: PartialEq + 'a>(
    a: &'a [T],
    b: &'a [T],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let len = b.len();
    let differs = move |i: usize| a.get(i) != b.get(i);
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < len && !differs(i) {
            i += 1;
        }
        if i >= len {
            return None;
        }
        let start = i;
        while i < len && differs(i) {
            i += 1;
        }
        Some((start, i))
    })
}

fn set_style(out: &mut Vec<u8>, pen: &mut Option<Style>, style: Style) -> Result<()> {
    if *pen == Some(style) {
        return Ok(());
    }
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    *pen = Some(style);
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_neighbours() {
        let a = [0, 0, 0, 0, 0, 0];
        let b = [0, 1, 1, 0, 1, 0];
        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 3), (4, 5)]);
        assert_eq!(changed_runs(&a, &a).count(), 0);
    }

    #[test]
    fn identical_frames_encode_no_glyphs() {
        let mut frame = Canvas::new(6, 2);
        frame.text(0, 0, "blocks", Style::PLAIN);

        let mut out = Vec::new();
        encode_diff_into(&frame, &frame.clone(), &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains("blocks"));
    }

    #[test]
    fn diff_only_writes_changed_text() {
        let prev = Canvas::new(8, 1);
        let mut next = prev.clone();
        next.text(3, 0, "XY", Style::PLAIN);

        let mut out = Vec::new();
        encode_diff_into(&prev, &next, &mut out).unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("XY"));
        // MoveTo is 1-based on the wire: column 4, row 1
        assert!(s.contains("\x1b[1;4H"));
    }

    #[test]
    fn full_redraw_contains_every_row() {
        let mut frame = Canvas::new(3, 2);
        frame.text(0, 0, "abc", Style::PLAIN);
        frame.text(0, 1, "def", Style::fg(Rgb::new(1, 2, 3)));

        let mut out = Vec::new();
        encode_full_into(&frame, &mut out).unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("abc"));
        assert!(s.contains("def"));
        assert!(s.contains("38;2;1;2;3"));
    }
}
