//! GameView: draws a [`GameSnapshot`] onto a [`Canvas`].
//!
//! Pure, no I/O, so layouts can be checked in unit tests.

use crate::canvas::{Canvas, Rgb, Style};
use crate::core::{definition, GameSnapshot, ModeTarget, Piece, SessionState};
use crate::types::{Block, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal size in columns and rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const GARBAGE: Rgb = Rgb::new(120, 120, 128);
const PANEL_GAP: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell; 2 keeps cells roughly square
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

/// Top-left corner of the board interior plus the frame size
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Draw `snap` into `canvas`, resizing it to `viewport`.
    ///
    /// `banner` is a short status line shown under the board.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        banner: Option<&str>,
        viewport: Viewport,
        canvas: &mut Canvas,
    ) {
        canvas.resize(viewport.width, viewport.height);
        canvas.clear();

        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w + PANEL_GAP + 14) / 2 + 1,
            y: viewport.height.saturating_sub(frame_h + 1) / 2 + 1,
            frame_w,
            frame_h,
        };

        self.draw_well(canvas, layout, snap);
        self.draw_panel(canvas, layout, snap);

        let overlay = match snap.state {
            SessionState::Running => None,
            SessionState::Paused => Some(("PAUSED", "p to resume")),
            SessionState::Over(reason) if reason.completed() => {
                Some(("COMPLETE", "r restart  q quit"))
            }
            SessionState::Over(_) => Some(("GAME OVER", "r restart  q quit")),
        };
        if let Some((title, hint)) = overlay {
            let mid = layout.y + BOARD_HEIGHT as u16 / 2;
            let bold = Style::fg(Rgb::new(255, 255, 255)).bold();
            let x = layout.x - 1;
            canvas.text_centered(x, mid - 1, frame_w, title, bold);
            canvas.text_centered(x, mid + 1, frame_w, hint, Style::PLAIN);
        }

        if let Some(text) = banner {
            let y = layout.y - 1 + frame_h;
            canvas.text_centered(layout.x - 1, y, frame_w, text, Style::fg(Rgb::new(250, 210, 90)));
        }
    }

    /// Allocating convenience wrapper around [`GameView::render_into`]
    pub fn render(&self, snap: &GameSnapshot, banner: Option<&str>, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, banner, viewport, &mut canvas);
        canvas
    }

    fn draw_well(&self, canvas: &mut Canvas, at: Layout, snap: &GameSnapshot) {
        let border = Style::fg(Rgb::new(200, 200, 200));
        let (left, top) = (at.x - 1, at.y - 1);
        let (right, bottom) = (left + at.frame_w - 1, top + at.frame_h - 1);

        for x in left + 1..right {
            canvas.put(x, top, '─', border);
            canvas.put(x, bottom, '─', border);
        }
        for y in top + 1..bottom {
            canvas.put(left, y, '│', border);
            canvas.put(right, y, '│', border);
        }
        canvas.put(left, top, '┌', border);
        canvas.put(right, top, '┐', border);
        canvas.put(left, bottom, '└', border);
        canvas.put(right, bottom, '┘', border);

        let dot = Style {
            fg: Rgb::new(70, 70, 80),
            bg: WELL_BG,
            bold: false,
        };
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as i8, y as i8);
                match cell {
                    Some(Block::Piece(kind)) => self.block(canvas, at, x, y, '█', piece_rgb(*kind)),
                    Some(Block::Garbage) => self.block(canvas, at, x, y, '▓', GARBAGE),
                    None => self.cell(canvas, at, x, y, '·', dot),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            self.piece(canvas, at, &ghost, '░', piece_rgb(ghost.kind).shade(2));
        }
        if let Some(piece) = snap.current {
            self.piece(canvas, at, &piece, '█', piece_rgb(piece.kind));
        }
    }

    fn draw_panel(&self, canvas: &mut Canvas, at: Layout, snap: &GameSnapshot) {
        let x = at.x - 1 + at.frame_w + PANEL_GAP;
        let label = Style::PLAIN.bold();
        let value = Style::fg(Rgb::new(190, 190, 190));
        let mut y = at.y - 1;

        canvas.text(x, y, snap.mode.label, Style::fg(Rgb::new(120, 200, 255)).bold());
        y += 2;

        let rows = [
            ("SCORE", snap.stats.score.to_string()),
            ("LINES", snap.stats.lines.to_string()),
            ("LEVEL", snap.stats.level.to_string()),
            ("TIME", clock(snap.stats.elapsed_ms)),
        ];
        for (name, text) in rows {
            canvas.text(x, y, name, label);
            canvas.text(x + 7, y, &text, value);
            y += 1;
        }

        match (snap.mode.target, snap.remaining) {
            (Some(ModeTarget::Lines(_)), Some(left)) => {
                canvas.text(x, y, "LEFT", label);
                canvas.text(x + 7, y, &left.to_string(), value);
            }
            (Some(ModeTarget::Seconds(_)), Some(left)) => {
                canvas.text(x, y, "LEFT", label);
                canvas.text(x + 7, y, &clock(left), value);
            }
            _ => {}
        }
        y += 2;

        canvas.text(x, y, "NEXT", label);
        preview(canvas, x, y + 1, snap.next, piece_rgb(snap.next));
        y += 4;

        canvas.text(x, y, "HOLD", label);
        if let Some(kind) = snap.held {
            let rgb = if snap.can_hold {
                piece_rgb(kind)
            } else {
                piece_rgb(kind).shade(2)
            };
            preview(canvas, x, y + 1, kind, rgb);
        } else {
            canvas.text(x, y + 1, "-", value);
        }
    }

    fn piece(&self, canvas: &mut Canvas, at: Layout, piece: &Piece, ch: char, rgb: Rgb) {
        for (x, y) in piece.cells() {
            self.block(canvas, at, x, y, ch, rgb);
        }
    }

    fn block(&self, canvas: &mut Canvas, at: Layout, x: i8, y: i8, ch: char, rgb: Rgb) {
        let style = Style {
            fg: rgb,
            bg: WELL_BG,
            bold: false,
        };
        self.cell(canvas, at, x, y, ch, style);
    }

    /// Fill one board cell. Cells above the visible board are skipped.
    fn cell(&self, canvas: &mut Canvas, at: Layout, x: i8, y: i8, ch: char, style: Style) {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let col = at.x + x as u16 * self.cell_w;
        canvas.fill(col, at.y + y as u16, self.cell_w, 1, ch, style);
    }
}

fn preview(canvas: &mut Canvas, x: u16, y: u16, kind: PieceKind, rgb: Rgb) {
    let style = Style::fg(rgb);
    for (dx, dy) in definition(kind).shape.offsets() {
        canvas.fill(x + dx as u16 * 2, y + dy as u16, 2, 1, '█', style);
    }
}

fn piece_rgb(kind: PieceKind) -> Rgb {
    Rgb::from_hex(definition(kind).color)
}

/// `m:ss.t`
fn clock(ms: u64) -> String {
    let tenths = ms / 100;
    format!("{}:{:02}.{}", tenths / 600, tenths / 10 % 60, tenths % 10)
}
