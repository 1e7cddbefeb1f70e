//! Presentation adapter. Reads the pet, never writes it.

use crate::model::{CatchupSummary, LifeStage, Pet, Rules, Scene};
use crate::sim::Command;
use crate::status::{mood_message, CareIndicators};
use crate::term::{Cell, CellBuffer};
use crossterm::style::Color;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pixel {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl Pixel {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

pub(crate) const BODY_DEFAULT: Pixel = Pixel::rgb(0x4E, 0xCD, 0xC4);
pub(crate) const BODY_HUNGRY: Pixel = Pixel::rgb(0xFF, 0x6B, 0x6B);
pub(crate) const BODY_SAD: Pixel = Pixel::rgb(0x34, 0x98, 0xDB);
pub(crate) const BODY_TIRED: Pixel = Pixel::rgb(0xF3, 0x9C, 0x12);
pub(crate) const BODY_DEAD: Pixel = Pixel::rgb(0x95, 0xA5, 0xA6);
const INK: Pixel = Pixel::rgb(0x2C, 0x3E, 0x50);
const SHELL_CRACK: Pixel = Pixel::rgb(0x8B, 0x45, 0x13);
const SNORE: Pixel = Pixel::rgb(0xF1, 0xC4, 0x0F);

/// Body colour. Later conditions win, so a dead pet is always grey.
pub(crate) fn pet_palette(pet: &Pet) -> Pixel {
    let mut col = BODY_DEFAULT;
    if pet.hunger < 30.0 {
        col = BODY_HUNGRY;
    }
    if pet.happiness < 30.0 {
        col = BODY_SAD;
    }
    if pet.energy < 30.0 {
        col = BODY_TIRED;
    }
    if !pet.is_alive {
        col = BODY_DEAD;
    }
    col
}

pub(crate) struct PixelCanvas {
    pub(crate) w: u32,
    pub(crate) h: u32,
    px: Vec<Pixel>,
}

impl PixelCanvas {
    pub(crate) fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            px: vec![Pixel::default(); (w as usize) * (h as usize)],
        }
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn get(&self, x: u32, y: u32) -> Pixel {
        if x >= self.w || y >= self.h {
            return Pixel::default();
        }
        self.px[self.idx(x, y)]
    }

    pub(crate) fn clear(&mut self) {
        self.px.fill(Pixel::default());
    }

    fn blend_over(&mut self, x: i32, y: i32, src: Pixel) {
        if x < 0 || y < 0 || x as u32 >= self.w || y as u32 >= self.h {
            return;
        }
        let i = self.idx(x as u32, y as u32);
        let dst = self.px[i];

        let sa = src.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 1e-6 {
            self.px[i] = Pixel::default();
            return;
        }
        let mix = |sc: u8, dc: u8| -> u8 {
            let out = (sc as f32 * sa + dc as f32 * da * (1.0 - sa)) / out_a;
            (out.clamp(0.0, 255.0) + 0.5) as u8
        };
        self.px[i] = Pixel {
            r: mix(src.r, dst.r),
            g: mix(src.g, dst.g),
            b: mix(src.b, dst.b),
            a: (out_a.clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
        };
    }

    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, col: Pixel) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (x0, x1) = ((cx - rx).floor() as i32, (cx + rx).ceil() as i32);
        let (y0, y1) = ((cy - ry).floor() as i32, (cy + ry).ceil() as i32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let nx = (x as f32 + 0.5 - cx) / rx;
                let ny = (y as f32 + 0.5 - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.blend_over(x, y, col);
                }
            }
        }
    }

    fn dot(&mut self, x: f32, y: f32, thick: f32, col: Pixel) {
        if thick <= 1.0 {
            self.blend_over(x.round() as i32, y.round() as i32, col);
        } else {
            self.fill_ellipse(x, y, thick / 2.0, thick / 2.0, col);
        }
    }

    fn line(&mut self, (x0, y0): (f32, f32), (x1, y1): (f32, f32), thick: f32, col: Pixel) {
        let steps = ((x1 - x0).abs().max((y1 - y0).abs()) * 2.0).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.dot(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, thick, col);
        }
    }

    /// Angles in radians, y pointing down: `0..PI` is the lower half.
    fn arc(&mut self, (cx, cy): (f32, f32), r: f32, a0: f32, a1: f32, thick: f32, col: Pixel) {
        let steps = ((a1 - a0).abs() * r * 2.0).ceil().max(2.0) as i32;
        for i in 0..=steps {
            let a = a0 + (a1 - a0) * i as f32 / steps as f32;
            self.dot(cx + r * a.cos(), cy + r * a.sin(), thick, col);
        }
    }
}

/* -----------------------------
   Braille encoding: 2×4 pixels -> U+2800..U+28FF
------------------------------ */

const BRAILLE_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

pub(crate) fn canvas_to_cells(canvas: &PixelCanvas, out: &mut CellBuffer, enable_color: bool) {
    for cy in 0..out.h as u32 {
        for cx in 0..out.w as u32 {
            let mut mask = 0u8;
            let (mut r, mut g, mut b, mut ink) = (0u32, 0u32, 0u32, 0u32);

            for (dx, column) in BRAILLE_BITS.iter().enumerate() {
                for (dy, bit) in column.iter().enumerate() {
                    let p = canvas.get(cx * 2 + dx as u32, cy * 4 + dy as u32);
                    // faint pixels are not ink
                    if p.a >= 32 {
                        mask |= bit;
                        r += p.r as u32;
                        g += p.g as u32;
                        b += p.b as u32;
                        ink += 1;
                    }
                }
            }
            if ink == 0 {
                continue;
            }

            let ch = char::from_u32(0x2800 + mask as u32).unwrap_or(' ');
            let fg = if enable_color {
                Color::Rgb {
                    r: (r / ink) as u8,
                    g: (g / ink) as u8,
                    b: (b / ink) as u8,
                }
            } else {
                Color::White
            };
            out.set(cx as u16, cy as u16, Cell::new(ch, fg));
        }
    }
}

/* -----------------------------
   Pet drawing
------------------------------ */

#[derive(Clone, Copy, Debug)]
pub(crate) struct Viewport {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) w: i32,
    pub(crate) h: i32,
}

/// The pet is drawn on a 160×160 design board centred in the viewport.
const BOARD: f32 = 160.0;

struct Pen<'a> {
    canvas: &'a mut PixelCanvas,
    ox: f32,
    oy: f32,
    scale: f32,
}

impl Pen<'_> {
    fn at(&self, x: f32, y: f32) -> (f32, f32) {
        (self.ox + x * self.scale, self.oy + y * self.scale)
    }

    fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, col: Pixel) {
        let (cx, cy) = self.at(x, y);
        let s = self.scale;
        self.canvas.fill_ellipse(cx, cy, rx * s, ry * s, col);
    }

    fn line(&mut self, a: (f32, f32), b: (f32, f32), col: Pixel) {
        let (a, b) = (self.at(a.0, a.1), self.at(b.0, b.1));
        let thick = (3.0 * self.scale).max(1.0);
        self.canvas.line(a, b, thick, col);
    }

    fn arc(&mut self, x: f32, y: f32, r: f32, a0: f32, a1: f32, col: Pixel) {
        let (cx, cy) = self.at(x, y);
        let thick = (3.0 * self.scale).max(1.0);
        self.canvas.arc((cx, cy), r * self.scale, a0, a1, thick, col);
    }

    fn z(&mut self, x: f32, y: f32, size: f32, col: Pixel) {
        self.line((x, y), (x + size, y), col);
        self.line((x + size, y), (x, y + size), col);
        self.line((x, y + size), (x + size, y + size), col);
    }
}

#[derive(Clone, Copy)]
struct Face {
    eye_y: f32,
    eye_dx: f32,
    eye_r: f32,
    mouth_y: f32,
    mouth_r: f32,
}

fn face_for(stage: LifeStage) -> Option<Face> {
    match stage {
        LifeStage::Egg => None,
        LifeStage::Baby => Some(Face {
            eye_y: 80.0,
            eye_dx: 10.0,
            eye_r: 5.0,
            mouth_y: 95.0,
            mouth_r: 10.0,
        }),
        LifeStage::Teen => Some(Face {
            eye_y: 80.0,
            eye_dx: 15.0,
            eye_r: 6.0,
            mouth_y: 100.0,
            mouth_r: 12.0,
        }),
        LifeStage::Adult => Some(Face {
            eye_y: 75.0,
            eye_dx: 15.0,
            eye_r: 7.0,
            mouth_y: 100.0,
            mouth_r: 15.0,
        }),
    }
}

/// An egg within a fifth of a day of hatching shows a crack.
fn is_hatching(pet: &Pet) -> bool {
    pet.stage == LifeStage::Egg
        && LifeStage::Egg
            .max_age()
            .is_some_and(|end| pet.age > end - 0.2)
}

pub(crate) struct Renderer;

impl Renderer {
    pub(crate) fn draw_pet(canvas: &mut PixelCanvas, pet: &Pet, vp: Viewport, offset: (i32, i32)) {
        let scale = (vp.w.min(vp.h) as f32 / (BOARD + 10.0)).max(0.1);
        let mut pen = Pen {
            ox: (vp.x + vp.w / 2 + offset.0) as f32 - BOARD / 2.0 * scale,
            oy: (vp.y + vp.h / 2 + offset.1) as f32 - BOARD / 2.0 * scale,
            scale,
            canvas,
        };
        let body = pet_palette(pet);

        match pet.stage {
            LifeStage::Egg => {
                pen.ellipse(80.0, 80.0, 40.0, 50.0, body);
                if is_hatching(pet) {
                    pen.line((60.0, 60.0), (75.0, 75.0), SHELL_CRACK);
                    pen.line((75.0, 75.0), (90.0, 65.0), SHELL_CRACK);
                }
            }
            LifeStage::Baby => pen.ellipse(80.0, 90.0, 30.0, 30.0, body),
            LifeStage::Teen => pen.ellipse(80.0, 90.0, 35.0, 40.0, body),
            LifeStage::Adult => {
                pen.ellipse(50.0, 70.0, 10.0, 10.0, body);
                pen.ellipse(110.0, 70.0, 10.0, 10.0, body);
                pen.ellipse(80.0, 85.0, 40.0, 45.0, body);
            }
        }

        if let Some(face) = face_for(pet.stage) {
            let (lx, rx) = (80.0 - face.eye_dx, 80.0 + face.eye_dx);
            if !pet.is_alive {
                for x in [lx, rx] {
                    pen.line((x - 5.0, face.eye_y - 5.0), (x + 5.0, face.eye_y + 5.0), INK);
                    pen.line((x + 5.0, face.eye_y - 5.0), (x - 5.0, face.eye_y + 5.0), INK);
                }
            } else if pet.is_sleeping {
                for x in [lx, rx] {
                    pen.line((x - face.eye_r, face.eye_y), (x + face.eye_r, face.eye_y), INK);
                }
            } else {
                pen.ellipse(lx, face.eye_y, face.eye_r, face.eye_r, INK);
                pen.ellipse(rx, face.eye_y, face.eye_r, face.eye_r, INK);
            }

            let (my, mr) = (face.mouth_y, face.mouth_r);
            if pet.happiness > 70.0 {
                pen.arc(80.0, my, mr, 0.0, PI, INK);
            } else if pet.happiness > 30.0 {
                pen.line((70.0, my), (90.0, my), INK);
            } else {
                pen.arc(80.0, my + 5.0, mr, PI, 2.0 * PI, INK);
            }
        }

        if pet.is_sleeping && pet.is_alive {
            pen.z(58.0, 38.0, 8.0, SNORE);
            pen.z(73.0, 30.0, 10.0, SNORE);
            pen.z(88.0, 38.0, 8.0, SNORE);
        }
    }
}

/// Gentle idle sway in canvas subpixels. Sleeping and dead pets hold still.
pub(crate) fn pet_bounce_offset_subpx(pet: &Pet, frame: u64) -> (i32, i32) {
    if pet.is_sleeping || !pet.is_alive {
        return (0, 0);
    }
    let t = frame as f32 * 0.1;
    ((t.cos() * 3.0) as i32, (t.sin() * 2.0) as i32)
}

pub(crate) fn pet_bounce_offset_cells(pet: &Pet, frame: u64) -> (i32, i32) {
    let (sx, sy) = pet_bounce_offset_subpx(pet, frame);
    ((sx as f32 / 2.0).round() as i32, (sy as f32 / 4.0).round() as i32)
}

fn ascii_sprite(pet: &Pet) -> Vec<String> {
    let eyes = if !pet.is_alive {
        "x   x"
    } else if pet.is_sleeping {
        "-   -"
    } else {
        "o   o"
    };
    let mouth = if pet.happiness > 70.0 {
        "\\_/"
    } else if pet.happiness > 30.0 {
        "---"
    } else {
        "/‾\\"
    };

    match pet.stage {
        LifeStage::Egg => {
            let crack = if is_hatching(pet) { "  /\\/  " } else { "       " };
            vec![
                "   ___   ".into(),
                "  /   \\  ".into(),
                format!(" /{crack}\\ "),
                "|         |".into(),
                " \\       / ".into(),
                "  \\_____/  ".into(),
            ]
        }
        LifeStage::Baby => vec![
            "   .---.   ".into(),
            format!("  ( {eyes} )  "),
            format!("  (  {mouth}  )  "),
            "   '---'   ".into(),
        ],
        LifeStage::Teen => vec![
            "   _____   ".into(),
            "  /     \\  ".into(),
            format!(" |  {eyes}  | "),
            format!(" |   {mouth}   | "),
            "  \\_____/  ".into(),
        ],
        LifeStage::Adult => vec![
            " (\\_____/) ".into(),
            " /       \\ ".into(),
            format!("|  {eyes}  |"),
            format!("|   {mouth}   |"),
            "|         |".into(),
            " \\_______/ ".into(),
        ],
    }
}

pub(crate) fn draw_pet_ascii(buf: &mut CellBuffer, pet: &Pet, cx: i32, cy: i32, enable_color: bool) {
    let fg = if enable_color {
        let p = pet_palette(pet);
        Color::Rgb {
            r: p.r,
            g: p.g,
            b: p.b,
        }
    } else {
        Color::White
    };

    let sprite = ascii_sprite(pet);
    let y0 = cy - sprite.len() as i32 / 2;
    for (row, line) in sprite.iter().enumerate() {
        let y = y0 + row as i32;
        let x0 = cx - line.chars().count() as i32 / 2;
        if y < 0 || x0 < 0 {
            continue;
        }
        buf.text(x0 as u16, y as u16, line, fg);
    }

    if pet.is_sleeping && pet.is_alive {
        let y = y0 - 1;
        if y >= 0 {
            buf.text((cx + 2).max(0) as u16, y as u16, "z Z z", Color::Yellow);
        }
    }
}

/* -----------------------------
   UI overlay (text + meters)
------------------------------ */

/// Whole number shown for a vital: rounded, never negative.
pub(crate) fn display_value(v: f64) -> i64 {
    v.max(0.0).round() as i64
}

/// The age meter fills over roughly fifteen days.
pub(crate) fn age_bar_percent(age: f64) -> f64 {
    (age * 6.67).clamp(0.0, 100.0)
}

fn bar(value01: f64, width: usize) -> String {
    let fill = (value01.clamp(0.0, 1.0) * width as f64 + 0.5) as usize;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { '·' });
    }
    s.push(']');
    s
}

fn meter_color(v: f64) -> Color {
    if v < 25.0 {
        Color::Red
    } else if v < 50.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Greedy word wrap; words longer than `width` are left to clip.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if !cur.is_empty() && cur.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

pub(crate) fn panel_width(cols: u16) -> u16 {
    (cols / 3).max(34).min(cols.saturating_sub(10))
}

pub(crate) fn ui_overlay(buf: &mut CellBuffer, pet: &Pet, rules: &Rules, status: &str, scene: &Scene) {
    let fg = Color::White;
    let dim = Color::DarkGrey;
    let width = panel_width(buf.w) as usize;

    let x = buf.text_bold(1, 0, "DigiBuddy", Color::Cyan);
    let title = format!(
        "  |  Stage: {}  |  Age: {} days",
        pet.stage,
        pet.age.max(0.0).floor() as i64
    );
    buf.text(x, 0, &title, fg);

    let meters = [
        ("Hunger", pet.hunger),
        ("Happy ", pet.happiness),
        ("Energy", pet.energy),
        ("Clean ", pet.cleanliness),
    ];
    for (i, (name, val)) in meters.iter().enumerate() {
        let y = 2 + i as u16;
        let x = buf.text(1, y, &format!("{name} "), fg);
        let x = buf.text(x, y, &bar(val / 100.0, 14), meter_color(*val));
        buf.text(x, y, &format!(" {:>3}", display_value(*val)), fg);
    }
    let age_pct = age_bar_percent(pet.age);
    let x = buf.text(1, 6, "Age    ", fg);
    let x = buf.text(x, 6, &bar(age_pct / 100.0, 14), Color::Magenta);
    buf.text(x, 6, &format!(" {:>3}", pet.age.max(0.0).floor() as i64), fg);

    let lamps = CareIndicators::of(pet);
    let mut x = 1;
    for (on, label, col) in [
        (lamps.healthy, "healthy", Color::Green),
        (lamps.hungry, "hungry", Color::Red),
        (lamps.tired, "tired", Color::Yellow),
        (lamps.sad, "sad", Color::Blue),
    ] {
        let mark = if on { '●' } else { '○' };
        x = buf.text(x, 8, &format!("{mark} {label}  "), if on { col } else { dim });
    }

    let state = if !pet.is_alive {
        "Passed away"
    } else if pet.is_sleeping {
        "Sleeping"
    } else {
        "Awake"
    };
    buf.text(1, 9, &format!("State: {state}"), fg);
    if pet.milestones > 0 {
        let stars = "★".repeat(pet.milestones.min(10) as usize);
        buf.text(1, 10, &format!("Milestones: {stars} ({})", pet.milestones), Color::Yellow);
    }

    for (i, line) in wrap(&format!("\"{}\"", mood_message(pet)), width.saturating_sub(2))
        .iter()
        .take(3)
        .enumerate()
    {
        buf.text(1, 12 + i as u16, line, Color::Cyan);
    }

    let status_y = buf.h.saturating_sub(3);
    buf.text(1, status_y, status, Color::Yellow);

    draw_key_help(buf, pet, rules, scene);
}

fn draw_key_help(buf: &mut CellBuffer, pet: &Pet, rules: &Rules, scene: &Scene) {
    let y = buf.h.saturating_sub(1);
    let fg = Color::White;
    match scene {
        Scene::Main => {
            let sleep_label = if pet.is_sleeping { "wake" } else { "sleep" };
            let keys = [
                ("f", "feed", Some(Command::Feed)),
                ("p", "play", Some(Command::Play)),
                ("s", sleep_label, Some(Command::ToggleSleep)),
                ("c", "clean", Some(Command::Clean)),
                ("r", "reset", None),
                ("h", "help", None),
                ("q", "quit", None),
            ];
            let mut x = buf.text(1, y, "Keys:", fg);
            for (key, label, cmd) in keys {
                let live = cmd.map_or(true, |c| pet.available(c, rules));
                let col = if live { fg } else { Color::DarkGrey };
                x = buf.text(x, y, &format!(" {key} {label} |"), col);
            }
        }
        Scene::Help => {
            buf.text(1, y, "Help: esc or h close | q quit", fg);
        }
        Scene::ConfirmReset => {
            buf.text(1, y, "Reset: y confirm | any other key cancel", fg);
        }
        Scene::Recap(_) => {
            buf.text(1, y, "Recap: any key to continue", fg);
        }
        Scene::Dead => {
            buf.text(1, y, "r start over | q quit", fg);
        }
    }
}

/* -----------------------------
   Modal boxes
------------------------------ */

pub(crate) fn draw_center_box(buf: &mut CellBuffer, title: &str, body: &[String]) {
    let bw = 60.min(buf.w.saturating_sub(4));
    let bh = (body.len() as u16 + 5).min(buf.h.saturating_sub(2));
    if bw < 4 || bh < 4 {
        return;
    }
    let x0 = (buf.w - bw) / 2;
    let y0 = (buf.h - bh) / 2;

    buf.frame(x0, y0, bw, bh, Color::White);
    buf.text_bold(x0 + 2, y0 + 1, title, Color::Cyan);
    for (i, line) in body.iter().enumerate() {
        let y = y0 + 3 + i as u16;
        if y >= y0 + bh - 1 {
            break;
        }
        buf.text(x0 + 2, y, line, Color::White);
    }
}

pub(crate) fn format_away(minutes: i64) -> String {
    let (d, h, m) = (minutes / 1440, minutes % 1440 / 60, minutes % 60);
    if d > 0 {
        format!("{d}d {h}h")
    } else if h > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{m} min")
    }
}

pub(crate) fn recap_lines(s: &CatchupSummary) -> Vec<String> {
    let mut lines = vec![
        format!("You were away for {}.", format_away(s.minutes)),
        String::new(),
        format!("Hunger     -{}", display_value(s.hunger_lost)),
        format!("Happiness  -{}", display_value(s.happiness_lost)),
        format!("Energy     -{}", display_value(s.energy_lost)),
        format!("Grew       +{:.2} days", s.age_gained),
    ];
    if let Some((from, to)) = s.evolved {
        lines.push(format!("Grew from {from} to {to}!"));
    }
    if let Some(days) = s.milestone {
        lines.push(format!("Reached the {days} day milestone!"));
    }
    if s.died {
        lines.push("Your DigiBuddy did not make it while you were gone...".into());
    }
    lines.push(String::new());
    lines.push("Press any key".into());
    lines
}

pub(crate) fn help_lines() -> Vec<String> {
    [
        "Keep your DigiBuddy fed, happy and rested as it grows",
        "from egg to baby, teen and adult.",
        "",
        "F  Feed: +hunger, a little +happiness",
        "P  Play: +happiness, costs energy and hunger",
        "S  Sleep / wake: sleeping restores energy",
        "C  Clean: +happiness",
        "R  Start over with a new egg (asks first)",
        "",
        "If hunger, happiness or energy reaches zero,",
        "your DigiBuddy passes away.",
        "",
        "Esc or H to close help.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub(crate) fn draw_scene_overlay(buf: &mut CellBuffer, scene: &Scene) {
    match scene {
        Scene::Main => {}
        Scene::Help => draw_center_box(buf, "How to play", &help_lines()),
        Scene::Recap(summary) => {
            draw_center_box(buf, "While you were away", &recap_lines(summary))
        }
        Scene::ConfirmReset => draw_center_box(
            buf,
            "Start over?",
            &[
                "Are you sure you want to start over with a new DigiBuddy?".to_string(),
                String::new(),
                "Y to confirm, any other key to cancel.".to_string(),
            ],
        ),
        Scene::Dead => draw_center_box(
            buf,
            "Your DigiBuddy has passed away...",
            &["Press R to start over, or Q to quit.".to_string()],
        ),
    }
}
