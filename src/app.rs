use crate::config::{save_settings_atomic, Paths, Settings};
use crate::input::{collect_input_nonblocking, map_event_to_action, UiAction};
use crate::model::Scene;
use crate::render::{
    canvas_to_cells, draw_pet_ascii, draw_scene_overlay, panel_width, pet_bounce_offset_cells,
    pet_bounce_offset_subpx, ui_overlay, PixelCanvas, Renderer, Viewport,
};
use crate::session::Session;
use crate::sim::Command;
use crate::storage::JsonFileStore;
use crate::term::Screen;
use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub(crate) struct App {
    settings: Settings,
    file_settings: Settings,
    paths: Paths,
    session: Session<JsonFileStore>,
    scene: Scene,
    screen: Screen,
    canvas: PixelCanvas,
    frame: u64,
    should_quit: bool,
}

impl App {
    fn init(settings: Settings, file_settings: Settings, paths: Paths) -> anyhow::Result<Self> {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let store = JsonFileStore::new(&paths.save_path);
        debug!(path = %store.path().display(), "snapshot store");
        let (session, summary) =
            Session::restore(store, settings.rules.clone(), rng, Utc::now());

        let scene = match summary {
            Some(s) if s.has_anything() => Scene::Recap(s),
            _ if !session.pet().is_alive => Scene::Dead,
            _ => Scene::Main,
        };

        let screen = Screen::begin()?;
        let canvas = PixelCanvas::new(screen.cols() as u32 * 2, screen.rows() as u32 * 4);

        Ok(Self {
            settings,
            file_settings,
            paths,
            session,
            scene,
            screen,
            canvas,
            frame: 0,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let tick_step = Duration::from_millis(self.settings.tick_ms);
        info!(tick_ms = self.settings.tick_ms, fps, "loop started");

        let mut last_frame = Instant::now();
        let mut tick_accum = Duration::ZERO;

        while !self.should_quit {
            if self.screen.resize_if_needed()? {
                self.canvas =
                    PixelCanvas::new(self.screen.cols() as u32 * 2, self.screen.rows() as u32 * 4);
            }

            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(action) = map_event_to_action(&self.scene, ev) {
                    self.handle(action);
                }
                if self.should_quit {
                    break;
                }
            }

            let now = Instant::now();
            tick_accum = tick_accum.saturating_add(now.saturating_duration_since(last_frame));
            last_frame = now;
            while tick_accum >= tick_step {
                tick_accum -= tick_step;
                self.dispatch(Command::Tick);
            }

            self.render_frame()?;
            self.frame = self.frame.wrapping_add(1);
            spin_sleep(frame_dt, Instant::now());
        }
        Ok(())
    }

    fn handle(&mut self, action: UiAction) {
        debug!(?action, "input");
        match action {
            UiAction::Quit => self.should_quit = true,
            UiAction::Pet(cmd) => self.dispatch(cmd),
            UiAction::AskReset => self.scene = Scene::ConfirmReset,
            UiAction::ConfirmReset => {
                self.dispatch(Command::Reset);
                self.scene = Scene::Main;
            }
            UiAction::CancelReset => self.scene = self.resting_scene(),
            UiAction::HelpToggle => {
                self.scene = match self.scene {
                    Scene::Help => self.resting_scene(),
                    _ => Scene::Help,
                };
            }
            UiAction::Dismiss => self.scene = self.resting_scene(),
        }
    }

    fn dispatch(&mut self, cmd: Command) {
        self.session.dispatch(cmd, Utc::now());
        if !self.session.pet().is_alive && matches!(self.scene, Scene::Main) {
            self.scene = Scene::Dead;
        }
    }

    fn resting_scene(&self) -> Scene {
        if self.session.pet().is_alive {
            Scene::Main
        } else {
            Scene::Dead
        }
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let pet = self.session.pet();
        self.screen.cur.clear();

        let cols = self.screen.cols() as i32;
        let rows = self.screen.rows() as i32;
        let pet_x = panel_width(self.screen.cols()) as i32;
        let pet_w = (cols - pet_x).max(1);
        // keep the status and key rows clear of the pet
        let pet_h = (rows - 3).max(1);

        if self.settings.enable_braille {
            self.canvas.clear();
            let vp = Viewport {
                x: pet_x * 2,
                y: 0,
                w: pet_w * 2,
                h: pet_h * 4,
            };
            let bounce = pet_bounce_offset_subpx(pet, self.frame);
            Renderer::draw_pet(&mut self.canvas, pet, vp, bounce);
            canvas_to_cells(&self.canvas, &mut self.screen.cur, self.settings.enable_color);
        } else {
            let bounce = pet_bounce_offset_cells(pet, self.frame);
            draw_pet_ascii(
                &mut self.screen.cur,
                pet,
                pet_x + pet_w / 2 + bounce.0,
                pet_h / 2 + bounce.1,
                self.settings.enable_color,
            );
        }

        ui_overlay(
            &mut self.screen.cur,
            pet,
            self.session.rules(),
            self.session.status(),
            &self.scene,
        );
        draw_scene_overlay(&mut self.screen.cur, &self.scene);

        self.screen.present()
    }

    fn shutdown(mut self) -> anyhow::Result<()> {
        let saved = self.session.shutdown(Utc::now());
        self.screen.end()?;
        // flags given for this run are not written back
        save_settings_atomic(&self.paths.settings_path, &self.file_settings)?;
        saved
    }
}

pub(crate) fn run(settings: Settings, file_settings: Settings, paths: Paths) -> anyhow::Result<()> {
    let mut app = App::init(settings, file_settings, paths)?;
    let result = app.run();
    let closed = app.shutdown();
    result.and(closed)
}

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        if end - t > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
