use crate::error::Error;
use crate::types::{Figure, InputState, Key, Vec2};
use log::{debug, info, trace, warn};
use softbuffer::Surface;
use std::num::NonZeroU32;
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};
///pixels one scroll line rotates by
const LINE_HEIGHT: f64 = 32.0;
struct App {
    figure: Figure,
    input: InputState,
    surface_state: Option<Surface<Arc<Window>, Arc<Window>>>,
    error: Option<Error>,
}
pub(crate) fn show(figure: Figure) -> Result<(), Error> {
    let event_loop = EventLoop::new()?;
    let mut app = App {
        figure,
        input: InputState::default(),
        surface_state: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;
    info!("window closed");
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
impl App {
    fn fail(&mut self, el: &ActiveEventLoop, e: Error) {
        warn!("closing window: {e}");
        self.error = Some(e);
        el.exit();
    }
    fn create(&self, el: &ActiveEventLoop) -> Result<Surface<Arc<Window>, Arc<Window>>, Error> {
        let layout = self.figure.layout();
        let mut attributes = Window::default_attributes().with_title(layout.title.clone());
        if !layout.autosize {
            attributes = attributes.with_inner_size(PhysicalSize::new(layout.width, layout.height));
        }
        let window = Arc::new(el.create_window(attributes)?);
        let context =
            softbuffer::Context::new(window.clone()).map_err(|e| Error::Surface(e.to_string()))?;
        let surface =
            Surface::new(&context, window.clone()).map_err(|e| Error::Surface(e.to_string()))?;
        info!("window opened for \"{}\"", layout.title);
        Ok(surface)
    }
    fn redraw(&mut self) -> Result<(), Error> {
        let Some(state) = self.surface_state.as_mut() else {
            return Ok(());
        };
        let (width, height) = {
            let size = state.window().inner_size();
            (size.width, size.height)
        };
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        state.resize(w, h).map_err(|e| Error::Surface(e.to_string()))?;
        let mut buffer = state
            .buffer_mut()
            .map_err(|e| Error::Surface(e.to_string()))?;
        match self.figure.update(width, height, &mut buffer) {
            Ok(()) => {}
            Err(Error::Margin(..)) => {
                debug!("window {width}x{height} too small for the margins");
                let c = self.figure.layout().background_color;
                buffer.fill(((c.r as u32) << 16) | ((c.g as u32) << 8) | c.b as u32);
            }
            Err(e) => return Err(e),
        }
        buffer
            .present()
            .map_err(|e| Error::Surface(e.to_string()))
    }
    fn interact(&mut self) {
        if self.figure.keybinds(&self.input)
            && let Some(state) = self.surface_state.as_ref()
        {
            state.window().request_redraw();
        }
        self.input.reset();
    }
}
impl ApplicationHandler for App {
    fn resumed(&mut self, el: &ActiveEventLoop) {
        match self.create(el) {
            Ok(surface) => {
                surface.window().request_redraw();
                self.surface_state = Some(surface);
            }
            Err(e) => self.fail(el, e),
        }
    }
    fn window_event(&mut self, el: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::Resized(_) => {
                if let Some(state) = self.surface_state.as_ref() {
                    state.window().request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(el, e)
                }
            }
            WindowEvent::CloseRequested => el.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let key = Key::from(event.logical_key);
                trace!("key {key:?}");
                if key == Key::Escape {
                    el.exit();
                    return;
                }
                self.input.keys_pressed.push(key);
                self.interact();
            }
            WindowEvent::ModifiersChanged(m) => self.input.modifiers = m.state().into(),
            WindowEvent::CursorMoved { position, .. } => {
                self.input.pointer_pos = Some(Vec2::new(position.x, position.y));
                self.interact();
            }
            WindowEvent::CursorLeft { .. } => {
                self.input.pointer_pos = None;
                self.input.pointer = None;
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.input.pointer = match state {
                    ElementState::Pressed => Some(true),
                    ElementState::Released => None,
                };
                self.interact();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.raw_scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        Vec2::new(x as f64 * LINE_HEIGHT, y as f64 * LINE_HEIGHT)
                    }
                    MouseScrollDelta::PixelDelta(p) => Vec2::new(p.x, p.y),
                };
                self.interact();
            }
            _ => {}
        }
    }
    fn suspended(&mut self, _: &ActiveEventLoop) {
        self.surface_state = None;
    }
}
