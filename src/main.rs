mod app;
mod components;
mod config;
mod constants;
mod dungeon_gen;
mod engine;
mod error;
mod events;
mod fov;
mod grid;
mod input;
mod message_log;
mod queries;
mod rng;
mod spawning;
mod systems;
mod tile;
mod ui;

use std::sync::Arc;

use config::GameConfig;
use engine::TurnEngine;
use error::GameError;

use glutin::prelude::*;
use glutin::surface::WindowSurface;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use egui_glow::EguiGlow;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::from_env()?;

    let _profiler = if config.profiling {
        puffin::set_scopes_on(true);
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        log::info!("serving puffin profiling data on {addr}");
        Some(puffin_http::Server::new(&addr)?)
    } else {
        None
    };

    let engine = TurnEngine::from_config(&config)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(engine, (config.width, config.height));
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

struct App {
    engine: TurnEngine,
    /// Map cells shown, columns by rows
    viewport: (usize, usize),
    window: Option<AppWindow>,
    /// Error that stopped the game, reported when the loop exits
    fatal: Option<GameError>,
}

struct AppWindow {
    window: Window,
    gl_surface: glutin::surface::Surface<WindowSurface>,
    gl_context: glutin::context::PossiblyCurrentContext,
    gl: Arc<glow::Context>,
    egui_glow: EguiGlow,
}

impl App {
    fn new(engine: TurnEngine, viewport: (usize, usize)) -> Self {
        Self {
            engine,
            viewport,
            window: None,
            fatal: None,
        }
    }

    /// Run one turn for a pressed key. Returns false once the game must stop.
    fn handle_key(&mut self, key: &Key) -> bool {
        let Some(key_id) = input::key_identifier(key) else {
            return true;
        };

        let result = self.engine.handle_key(&key_id);
        puffin::GlobalProfiler::lock().new_frame();

        match result {
            Ok(outcome) => {
                log::trace!("{key_id} -> {outcome:?}");
                true
            }
            Err(err) => {
                log::error!("fatal error: {err}");
                self.fatal = Some(err);
                false
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let app::WindowContext {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        } = match app::create_window(event_loop) {
            Ok(ctx) => ctx,
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(AppWindow {
            window,
            gl_surface,
            gl_context,
            gl,
            egui_glow,
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(win) = &mut self.window else {
            return;
        };

        // Let egui handle the event first
        let egui_response = win.egui_glow.on_window_event(&win.window, &event);
        if egui_response.repaint {
            win.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                app::resize_surface(&win.gl_surface, &win.gl_context, size.width, size.height);
                win.window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if egui_response.consumed || event.state != ElementState::Pressed {
                    return;
                }
                if event.logical_key == Key::Named(NamedKey::Escape) {
                    event_loop.exit();
                    return;
                }
                win.window.request_redraw();
                if !self.handle_key(&event.logical_key) {
                    event_loop.exit();
                }
            }
            WindowEvent::RedrawRequested => {
                let frame = self.engine.project(self.viewport.0, self.viewport.1);
                let status = ui::get_status_bar_data(&self.engine);
                win.render(&frame, &status);
            }
            _ => {}
        }
    }
}

impl AppWindow {
    fn render(&mut self, frame: &systems::GlyphGrid, status: &ui::StatusBarData) {
        puffin::profile_function!();

        self.egui_glow.run(&self.window, |ctx| {
            ui::draw_status_bar(ctx, status);
            ui::draw_map(ctx, frame);
        });

        unsafe {
            use glow::HasContext;
            self.gl.clear_color(0.0, 0.0, 0.0, 1.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.egui_glow.paint(&self.window);

        if let Err(err) = self.gl_surface.swap_buffers(&self.gl_context) {
            log::error!("failed to swap buffers: {err}");
        }
    }
}
