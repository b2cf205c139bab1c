//! Keyboard LED state from the X server

use rg_status_core::{Registry, Unavailable};
use rg_status_sources::{KeyboardIndicatorsSource, LedReader};

#[cfg(feature = "x11")]
use x11rb::protocol::xproto::ConnectionExt as _;
#[cfg(feature = "x11")]
use x11rb::rust_connection::RustConnection;

/// Connection state of an [`X11LedReader`]
#[cfg(feature = "x11")]
enum DisplayState {
    Unconnected,
    Connected(RustConnection),
    /// Terminal: the display could not be opened
    Unavailable,
}

/// Reads the core keyboard LED mask over its own display connection
///
/// The display is opened on the first read. If that fails the reader stays
/// unavailable for the rest of the run.
pub struct X11LedReader {
    #[cfg(feature = "x11")]
    state: DisplayState,
}

impl X11LedReader {
    #[cfg(feature = "x11")]
    pub fn new() -> Self {
        Self {
            state: DisplayState::Unconnected,
        }
    }

    #[cfg(not(feature = "x11"))]
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for X11LedReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "x11")]
impl LedReader for X11LedReader {
    fn led_mask(&mut self) -> Result<u32, Unavailable> {
        if matches!(self.state, DisplayState::Unconnected) {
            self.state = match x11rb::connect(None) {
                Ok((conn, _)) => DisplayState::Connected(conn),
                Err(e) => {
                    log::info!("Keyboard indicators unavailable: {}", e);
                    DisplayState::Unavailable
                }
            };
        }

        let conn = match &self.state {
            DisplayState::Connected(conn) => conn,
            _ => return Err(Unavailable::Display("cannot open display".to_string())),
        };
        let reply = conn
            .get_keyboard_control()
            .map_err(|e| Unavailable::Display(e.to_string()))?
            .reply()
            .map_err(|e| Unavailable::Display(e.to_string()))?;
        Ok(reply.led_mask)
    }
}

#[cfg(not(feature = "x11"))]
impl LedReader for X11LedReader {
    fn led_mask(&mut self) -> Result<u32, Unavailable> {
        Err(Unavailable::Display(
            "X11 support not enabled at compile time".to_string(),
        ))
    }
}

/// Back `keyboard_indicators` with the X server's LED state
pub fn register(registry: &mut Registry) {
    registry.register("keyboard_indicators", "Keyboard Indicators", |_| {
        Box::new(KeyboardIndicatorsSource::new(Box::new(X11LedReader::new())))
    });
}
