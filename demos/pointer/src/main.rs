//! Opens a window and logs the gestures recognized on it.
//!
//! Run with `RUST_LOG=info`. Settings are read from the TOML file `GESTURA_SETTINGS` points to.
use std::{fs, path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use gestura_geometry::{Point, Rect, Vector};
use gestura_input::{
    EventAggregator, EventOrigins, GestureCallbacks, GestureConfig, GestureRecognizer,
    GestureSettings,
};
use log::{debug, error, info};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

const SETTINGS_VAR: &str = "GESTURA_SETTINGS";

fn main() -> Result<()> {
    env_logger::init();

    let settings = load_settings()?;
    info!("Gesture settings: {settings:?}");

    let callbacks = GestureCallbacks::all(|gesture| {
        info!("{gesture:?}");
        Ok(())
    });

    let mut demo = Demo {
        window: None,
        aggregator: EventAggregator::default(),
        recognizer: GestureRecognizer::new(GestureConfig::new(callbacks).with_settings(settings)),
    };

    let event_loop = EventLoop::new()?;
    info!("Entering event loop");
    event_loop.run_app(&mut demo)?;
    info!("Exiting event loop");
    Ok(())
}

fn load_settings() -> Result<GestureSettings> {
    let Some(path) = std::env::var_os(SETTINGS_VAR).map(PathBuf::from) else {
        return Ok(GestureSettings {
            wheel_zoom_factor: Some(1.1),
            wheel_rotate_angle: Some(15.0),
            ..Default::default()
        });
    };
    let toml = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read gesture settings from {}", path.display()))?;
    GestureSettings::from_toml(&toml)
}

struct Demo {
    window: Option<Window>,
    aggregator: EventAggregator,
    recognizer: GestureRecognizer,
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(WindowAttributes::default().with_title("Gestures")) {
            Ok(window) => {
                self.aggregator.set_origins(origins(&window));
                self.window = Some(window);
            }
            Err(e) => {
                error!("Failed to create window: {e:?}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.recognizer.dispose();
            event_loop.exit();
            return;
        }

        let relocated = matches!(
            event,
            WindowEvent::Moved(_)
                | WindowEvent::Resized(_)
                | WindowEvent::ScaleFactorChanged { .. }
        );
        if relocated && let Some(window) = &self.window
        {
            self.aggregator.set_origins(origins(window));
        }

        let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
        if let Some(input) = self
            .aggregator
            .update(Instant::now(), &event, |p| p / scale_factor)
        {
            self.recognizer.dispatch(&input);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.recognizer.tick(Instant::now());
        event_loop.set_control_flow(match self.recognizer.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        });
    }
}

/// Locates the client area on the screen, in logical units. The whole client area is the target.
fn origins(window: &Window) -> EventOrigins {
    let scale_factor = window.scale_factor();
    let screen = match window.inner_position() {
        Ok(pos) => Vector::new(pos.x.into(), pos.y.into()) / scale_factor,
        Err(e) => {
            debug!("Window position unavailable, screen coordinates are client coordinates: {e}");
            Vector::ZERO
        }
    };
    let size = window.inner_size();
    let size = Vector::new(size.width.into(), size.height.into()) / scale_factor;
    EventOrigins::new(Vector::ZERO, screen, Rect::new(Point::ZERO, size))
}
