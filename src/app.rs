//! Application window and OpenGL context management.
//!
//! Window creation, OpenGL context setup and egui integration. Keeps
//! platform and graphics concerns out of the turn engine.

use std::error::Error;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use egui_glow::EguiGlow;

use crate::constants::*;

const NO_GL_CONFIG: &str = "no GL config matches the requested template";

/// Result of window and GL context creation.
pub struct WindowContext {
    pub window: Window,
    pub gl_surface: glutin::surface::Surface<WindowSurface>,
    pub gl_context: glutin::context::PossiblyCurrentContext,
    pub gl: Arc<glow::Context>,
    pub egui_glow: EguiGlow,
}

/// Create a window with OpenGL context and egui integration.
pub fn create_window(event_loop: &ActiveEventLoop) -> Result<WindowContext, Box<dyn Error>> {
    let window_attrs = WindowAttributes::default()
        .with_title("Glyph Dungeon")
        .with_inner_size(PhysicalSize::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT))
        .with_resizable(true);

    let template = ConfigTemplateBuilder::new().with_alpha_size(8);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    // EGL can hand the picker an empty list, and the picker has no error path,
    // so that case unwinds out of `build` and is turned into an error here.
    let built = panic::catch_unwind(AssertUnwindSafe(|| {
        display_builder.build(event_loop, template, |configs| {
            match most_samples(configs, |config| config.num_samples()) {
                Some(config) => config,
                None => panic!("{NO_GL_CONFIG}"),
            }
        })
    }));
    let (window, gl_config) = built.map_err(|_| NO_GL_CONFIG)??;

    let window = window.ok_or("display builder returned no window")?;
    let window_handle = window.window_handle()?;
    let gl_display = gl_config.display();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window_handle.as_raw()));

    let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attrs)? };

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        window_handle.as_raw(),
        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
    );

    let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs)? };
    let gl_context = gl_context.make_current(&gl_surface)?;

    let gl = Arc::new(unsafe {
        glow::Context::from_loader_function(|s| match CString::new(s) {
            Ok(s) => gl_display.get_proc_address(&s) as *const _,
            Err(_) => std::ptr::null(),
        })
    });

    let egui_glow = EguiGlow::new(event_loop, gl.clone(), None, None, false);
    {
        let ctx = &egui_glow.egui_ctx;
        ctx.set_fonts(crate::ui::style::load_fonts());
        ctx.set_style(crate::ui::style::dungeon_style());
    }

    log::info!("window created at {}x{}", size.width, size.height);

    Ok(WindowContext {
        window,
        gl_surface,
        gl_context,
        gl,
        egui_glow,
    })
}

/// Pick the config with the most multisample samples. Ties keep the earliest.
fn most_samples<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.reduce(|accum, config| if samples(&config) > samples(&accum) { config } else { accum })
}

/// Resize the GL surface to match the window size.
pub fn resize_surface(
    gl_surface: &glutin::surface::Surface<WindowSurface>,
    gl_context: &glutin::context::PossiblyCurrentContext,
    width: u32,
    height: u32,
) {
    if let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
        gl_surface.resize(gl_context, width, height);
    }
}
