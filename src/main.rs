use anyhow::{anyhow, Context, Result};
use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::GetGlDisplay,
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn, LevelFilter};
use raw_window_handle::HasRawWindowHandle;
use simple_logger::SimpleLogger;
use std::{env, ffi::CString, num::NonZeroU32, ptr};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use quadgl::{load_program, AppConfig, GlDevice, QuadMesh, ShaderProgram};

const DEFAULT_CONFIG: &str = "quadgl.toml";

// GL resources come first so they are dropped while the context is still alive.
struct App {
    program: Option<ShaderProgram<'static, GlDevice>>,
    quad: QuadMesh,
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl App {
    fn new(config: &AppConfig, event_loop: &EventLoop<()>) -> Result<Self> {
        let window_builder = WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(24);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|e| anyhow!("Failed to create window: {}", e))?;

        let window = window.ok_or_else(|| anyhow!("Display builder returned no window"))?;
        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(raw_window_handle));

        let gl_display = gl_config.display();

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("Failed to create OpenGL context")?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .context("Failed to create GL surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("Failed to make context current")?;

        if config.rendering.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                warn!("Could not enable vsync: {}", e);
            }
        }

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => ptr::null(),
        });

        let device: &'static GlDevice = &GlDevice;
        info!("OpenGL {}", device.version());

        let [r, g, b, a] = config.rendering.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
        }

        let quad = QuadMesh::upload();

        let program = match load_program(device, &config.rendering.shader_path) {
            Ok(program) => {
                program.set_used();
                Some(program)
            }
            Err(e) => {
                error!(
                    "Shader program from {} unusable: {}",
                    config.rendering.shader_path.display(),
                    e
                );
                None
            }
        };

        Ok(Self {
            program,
            quad,
            gl_surface,
            gl_context,
            window,
        })
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        self.gl_surface.resize(&self.gl_context, width, height);
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    fn render(&self) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
        if let Some(program) = &self.program {
            program.set_used();
        }
        self.quad.draw();

        if let Err(e) = self.gl_surface.swap_buffers(&self.gl_context) {
            error!("Failed to swap buffers: {}", e);
        }
    }
}

fn main() -> Result<()> {
    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    // The logger lets everything through; the global max level does the filtering
    SimpleLogger::new().with_level(LevelFilter::Trace).init()?;
    log::set_max_level(LevelFilter::Info);

    let config = AppConfig::load_or_default(&config_path);
    log::set_max_level(config.level_filter());
    info!("Initializing application...");

    let event_loop = EventLoop::new()?;
    let app = App::new(&config, &event_loop)?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::RedrawRequested => app.render(),
            _ => (),
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => (),
    })?;

    Ok(())
}
