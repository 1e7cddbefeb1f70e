use crossterm::{
    cursor, execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
    pub(crate) bold: bool,
}

impl Cell {
    pub(crate) fn new(ch: char, fg: Color) -> Self {
        Self {
            ch,
            fg,
            bg: Color::Black,
            bold: false,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', Color::White)
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn get(&self, x: u16, y: u16) -> Option<Cell> {
        (x < self.w && y < self.h).then(|| self.cells[self.idx(x, y)])
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Clipped at the right edge. Returns the column after the last char.
    pub(crate) fn text(&mut self, x: u16, y: u16, s: &str, fg: Color) -> u16 {
        let mut xx = x;
        for ch in s.chars() {
            if xx >= self.w {
                break;
            }
            self.set(xx, y, Cell::new(ch, fg));
            xx += 1;
        }
        xx
    }

    pub(crate) fn text_bold(&mut self, x: u16, y: u16, s: &str, fg: Color) -> u16 {
        let end = self.text(x, y, s, fg);
        for xx in x..end {
            let i = self.idx(xx, y);
            self.cells[i].bold = true;
        }
        end
    }

    pub(crate) fn frame(&mut self, x0: u16, y0: u16, w: u16, h: u16, fg: Color) {
        if w < 2 || h < 2 {
            return;
        }
        let (x1, y1) = (x0 + w - 1, y0 + h - 1);
        for x in x0..=x1 {
            self.set(x, y0, Cell::new('─', fg));
            self.set(x, y1, Cell::new('─', fg));
        }
        for y in y0..=y1 {
            self.set(x0, y, Cell::new('│', fg));
            self.set(x1, y, Cell::new('│', fg));
        }
        self.set(x0, y0, Cell::new('┌', fg));
        self.set(x1, y0, Cell::new('┐', fg));
        self.set(x0, y1, Cell::new('└', fg));
        self.set(x1, y1, Cell::new('┘', fg));
        for y in y0 + 1..y1 {
            for x in x0 + 1..x1 {
                self.set(x, y, Cell::default());
            }
        }
    }
}

/// Owns the alternate screen for its lifetime; dropping it restores the
/// user's terminal even when the loop bails out with an error.
pub(crate) struct Screen {
    out: Stdout,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
    active: bool,
}

impl Screen {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
            active: true,
        })
    }

    pub(crate) fn cols(&self) -> u16 {
        self.cur.w
    }

    pub(crate) fn rows(&self) -> u16 {
        self.cur.h
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cur.w && r == self.cur.h {
            return Ok(false);
        }
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        queue!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    /// Write only the cells that differ from the last frame.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_style = None;
        for y in 0..self.cur.h {
            for x in 0..self.cur.w {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_style != Some((c.fg, c.bg, c.bold)) {
                    queue!(
                        self.out,
                        SetAttribute(Attribute::Reset),
                        SetForegroundColor(c.fg),
                        SetBackgroundColor(c.bg)
                    )?;
                    if c.bold {
                        queue!(self.out, SetAttribute(Attribute::Bold))?;
                    }
                    last_style = Some((c.fg, c.bg, c.bold));
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_clips_at_edge() {
        let mut buf = CellBuffer::new(5, 2);
        let end = buf.text(3, 1, "hello", Color::White);
        assert_eq!(end, 5);
        assert_eq!(buf.get(3, 1).map(|c| c.ch), Some('h'));
        assert_eq!(buf.get(4, 1).map(|c| c.ch), Some('e'));
        assert_eq!(buf.get(5, 1), None);
    }

    #[test]
    fn frame_draws_corners_and_clears_inside() {
        let mut buf = CellBuffer::new(6, 4);
        buf.text(0, 1, "xxxxxx", Color::White);
        buf.frame(0, 0, 6, 4, Color::White);
        assert_eq!(buf.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(buf.get(5, 3).map(|c| c.ch), Some('┘'));
        assert_eq!(buf.get(2, 1).map(|c| c.ch), Some(' '));
        assert_eq!(buf.get(0, 1).map(|c| c.ch), Some('│'));
    }
}
