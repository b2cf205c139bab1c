//! X11 root window name sink (read by dwm and similar bars)

use super::Sink;
use anyhow::Result;

#[cfg(feature = "x11")]
use anyhow::{anyhow, Context};
#[cfg(feature = "x11")]
use x11rb::connection::Connection;
#[cfg(feature = "x11")]
use x11rb::protocol::xproto::{AtomEnum, PropMode, Window};
#[cfg(feature = "x11")]
use x11rb::rust_connection::RustConnection;
#[cfg(feature = "x11")]
use x11rb::wrapper::ConnectionExt as _;

/// Sets `WM_NAME` on the default screen's root window
pub struct RootNameSink {
    #[cfg(feature = "x11")]
    conn: RustConnection,
    #[cfg(feature = "x11")]
    root: Window,
}

impl RootNameSink {
    /// Connect to the display named by `$DISPLAY`
    #[cfg(feature = "x11")]
    pub fn connect() -> Result<Self> {
        let (conn, screen_num) =
            x11rb::connect(None).context("Failed to open display")?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| anyhow!("Display has no screen {}", screen_num))?;
        log::info!("Publishing status to root window 0x{:x}", root);

        Ok(Self { conn, root })
    }

    /// Connect to the display (disabled when the x11 feature is off)
    #[cfg(not(feature = "x11"))]
    pub fn connect() -> Result<Self> {
        Err(anyhow::anyhow!(
            "X11 support not enabled at compile time, use --stdout"
        ))
    }

    #[cfg(feature = "x11")]
    fn store_name(&self, name: &str) -> Result<()> {
        self.conn
            .change_property8(
                PropMode::REPLACE,
                self.root,
                AtomEnum::WM_NAME,
                AtomEnum::STRING,
                name.as_bytes(),
            )
            .context("Failed to send WM_NAME")?
            .check()
            .context("Failed to set WM_NAME")?;
        Ok(())
    }

    #[cfg(not(feature = "x11"))]
    fn store_name(&self, _name: &str) -> Result<()> {
        Err(anyhow::anyhow!("X11 support not enabled at compile time"))
    }
}

impl Sink for RootNameSink {
    fn publish(&mut self, status: &str) -> Result<()> {
        self.store_name(status)
    }

    fn clear(&mut self) -> Result<()> {
        self.store_name("")
    }
}
