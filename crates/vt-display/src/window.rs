//! Native window backend: a winit window with a softbuffer framebuffer.
//!
//! The frame is stretched to the window's client area with nearest-neighbour
//! lookup; click positions are mapped back to image coordinates.
use std::num::NonZeroU32;

use log::{debug, info};
use softbuffer::{Context, Surface};
use vt_core::{Image, Rgba};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use crate::display::{Click, DisplayError, ImageDisplay, MouseButton};

/// Must be created and used on the main thread.
pub struct WindowDisplay {
    // Field order is drop order: the surface and context go before the window.
    surface: Surface,
    _context: Context,
    window: Window,
    event_loop: EventLoop<()>,
    frame: Image<Rgba>,
    cursor: PhysicalPosition<f64>,
}

fn backend(err: impl std::fmt::Display) -> DisplayError {
    DisplayError::Backend(err.to_string())
}

fn frame_size(img: &Image<Rgba>) -> Result<PhysicalSize<u32>, DisplayError> {
    if img.is_empty() {
        return Err(DisplayError::EmptyImage);
    }
    let w = u32::try_from(img.width()).map_err(backend)?;
    let h = u32::try_from(img.height()).map_err(backend)?;
    Ok(PhysicalSize::new(w, h))
}

impl WindowDisplay {
    /// Opens a window sized for `img` and shows it.
    pub fn open(img: &Image<Rgba>) -> Result<Self, DisplayError> {
        let size = frame_size(img)?;
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_inner_size(size)
            .build(&event_loop)
            .map_err(backend)?;
        // SAFETY: `window` is stored next to the context and surface and
        // outlives both.
        let context = unsafe { Context::new(&window) }.map_err(backend)?;
        let surface = unsafe { Surface::new(&context, &window) }.map_err(backend)?;
        info!("window display {}x{}", size.width, size.height);
        Ok(Self {
            surface,
            _context: context,
            window,
            event_loop,
            frame: img.clone(),
            cursor: PhysicalPosition::new(0.0, 0.0),
        })
    }
}

/// Nearest-neighbour stretch of `frame` into a `width`-pixel-wide 0RGB buffer.
fn blit(frame: &Image<Rgba>, width: usize, out: &mut [u32]) {
    if frame.is_empty() || width == 0 {
        return;
    }
    let height = out.len() / width;
    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        let src = frame.row(y * frame.height() / height);
        for (x, px) in out_row.iter_mut().enumerate() {
            *px = src[x * frame.width() / width].to_0rgb();
        }
    }
}

fn draw(surface: &mut Surface, window: &Window, frame: &Image<Rgba>) -> Result<(), DisplayError> {
    let size = window.inner_size();
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        // Minimised.
        return Ok(());
    };
    surface.resize(w, h).map_err(backend)?;
    let mut buffer = surface.buffer_mut().map_err(backend)?;
    blit(frame, w.get() as usize, &mut buffer);
    buffer.present().map_err(backend)
}

fn to_click(
    pos: PhysicalPosition<f64>,
    window: PhysicalSize<u32>,
    frame: &Image<Rgba>,
    button: winit::event::MouseButton,
) -> Click {
    let sx = frame.width() as f64 / f64::from(window.width.max(1));
    let sy = frame.height() as f64 / f64::from(window.height.max(1));
    let button = match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    };
    Click {
        row: pos.y * sy,
        col: pos.x * sx,
        button,
    }
}

impl ImageDisplay for WindowDisplay {
    fn set_title(&mut self, title: &str) -> Result<(), DisplayError> {
        self.window.set_title(title);
        Ok(())
    }

    fn display(&mut self, img: &Image<Rgba>) -> Result<(), DisplayError> {
        let size = frame_size(img)?;
        if img.dimensions() != self.frame.dimensions() {
            self.window.set_inner_size(size);
        }
        self.frame.clone_from(img);
        self.window.request_redraw();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        draw(&mut self.surface, &self.window, &self.frame)
    }

    fn wait_for_click(&mut self) -> Result<Click, DisplayError> {
        let Self {
            surface,
            window,
            event_loop,
            frame,
            cursor,
            ..
        } = self;
        let window_id = window.id();
        let mut outcome = None;

        event_loop.run_return(|event, _, control_flow| {
            control_flow.set_wait();
            match event {
                Event::RedrawRequested(id) if id == window_id => {
                    if let Err(err) = draw(surface, window, frame) {
                        outcome = Some(Err(err));
                        control_flow.set_exit();
                    }
                }
                Event::WindowEvent { window_id: id, event } if id == window_id => match event {
                    WindowEvent::CloseRequested => {
                        outcome = Some(Err(DisplayError::Closed));
                        control_flow.set_exit();
                    }
                    WindowEvent::CursorMoved { position, .. } => *cursor = position,
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button,
                        ..
                    } => {
                        let click = to_click(*cursor, window.inner_size(), frame, button);
                        debug!("click at ({:.1}, {:.1})", click.row, click.col);
                        outcome = Some(Ok(click));
                        control_flow.set_exit();
                    }
                    _ => {}
                },
                _ => {}
            }
        });

        outcome.unwrap_or(Err(DisplayError::Closed))
    }
}
