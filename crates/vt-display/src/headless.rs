//! Display backend without a window system.
//!
//! Frames are kept in memory; clicks come from a scripted queue or, when no
//! script is given, from lines read on stdin (Enter counts as a click).
use std::collections::VecDeque;
use std::io::BufRead;

use log::{debug, info};
use vt_core::{Image, Rgba};

use crate::display::{Click, DisplayError, ImageDisplay, MouseButton};

enum ClickSource {
    Script(VecDeque<Click>),
    Stdin,
}

pub struct HeadlessDisplay {
    title: String,
    frame: Image<Rgba>,
    flushes: usize,
    clicks: ClickSource,
}

impl HeadlessDisplay {
    /// Opens a display sized for `img`; clicks are read from stdin.
    pub fn open(img: &Image<Rgba>) -> Result<Self, DisplayError> {
        Self::with_source(img, ClickSource::Stdin)
    }

    /// Opens a display that replays `clicks` in order.
    pub fn scripted(
        img: &Image<Rgba>,
        clicks: impl IntoIterator<Item = Click>,
    ) -> Result<Self, DisplayError> {
        Self::with_source(img, ClickSource::Script(clicks.into_iter().collect()))
    }

    fn with_source(img: &Image<Rgba>, clicks: ClickSource) -> Result<Self, DisplayError> {
        if img.is_empty() {
            return Err(DisplayError::EmptyImage);
        }
        info!(
            "headless display {}x{} (width x height)",
            img.width(),
            img.height()
        );
        Ok(Self {
            title: String::new(),
            frame: Image::empty(),
            flushes: 0,
            clicks,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Last frame passed to `display`.
    pub fn frame(&self) -> &Image<Rgba> {
        &self.frame
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl ImageDisplay for HeadlessDisplay {
    fn set_title(&mut self, title: &str) -> Result<(), DisplayError> {
        title.clone_into(&mut self.title);
        Ok(())
    }

    fn display(&mut self, img: &Image<Rgba>) -> Result<(), DisplayError> {
        if img.is_empty() {
            return Err(DisplayError::EmptyImage);
        }
        self.frame.clone_from(img);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.flushes += 1;
        debug!("headless flush #{}", self.flushes);
        Ok(())
    }

    fn wait_for_click(&mut self) -> Result<Click, DisplayError> {
        match &mut self.clicks {
            ClickSource::Script(queue) => queue.pop_front().ok_or(DisplayError::NoInput),
            ClickSource::Stdin => {
                let mut line = String::new();
                if std::io::stdin().lock().read_line(&mut line)? == 0 {
                    return Err(DisplayError::NoInput);
                }
                Ok(Click {
                    row: 0.0,
                    col: 0.0,
                    button: MouseButton::Left,
                })
            }
        }
    }
}
