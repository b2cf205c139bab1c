//! Caps Lock / Num Lock indicator producer

use rg_status_core::{require_argument, Producer, ProducerMetadata, Reading, Unavailable};

/// LED bit for Caps Lock in the core keyboard LED mask
pub const CAPS_LOCK_LED: u32 = 1 << 0;
/// LED bit for Num Lock in the core keyboard LED mask
pub const NUM_LOCK_LED: u32 = 1 << 1;

/// Source of the keyboard LED mask
pub trait LedReader: Send {
    fn led_mask(&mut self) -> Result<u32, Unavailable>;
}

/// Reader for builds without display support
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLedReader;

impl LedReader for NullLedReader {
    fn led_mask(&mut self) -> Result<u32, Unavailable> {
        Err(Unavailable::Display("no display support in this build".to_string()))
    }
}

/// Render `format` against `led_mask`
///
/// Only the first four characters of `format` are read. `c` stands for
/// Caps Lock and `n` for Num Lock. A letter followed by `?` is printed as
/// written when its lock is on and omitted when off. A letter without `?`
/// is always printed, upper case when on and lower case when off.
pub fn format_indicators(format: &str, led_mask: u32) -> String {
    let chars: Vec<char> = format.chars().take(4).collect();
    let mut out = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let key = c.to_ascii_lowercase();
        let led = match key {
            'c' => CAPS_LOCK_LED,
            'n' => NUM_LOCK_LED,
            _ => continue,
        };
        let is_on = led_mask & led != 0;

        if chars.get(i + 1) != Some(&'?') {
            out.push(if is_on { key.to_ascii_uppercase() } else { key });
        } else if is_on {
            out.push(c);
        }
    }

    out
}

/// `keyboard_indicators`: lock state rendered through a `c?n?` style format
pub struct KeyboardIndicatorsSource {
    metadata: ProducerMetadata,
    reader: Box<dyn LedReader>,
}

impl KeyboardIndicatorsSource {
    pub fn new(reader: Box<dyn LedReader>) -> Self {
        Self {
            metadata: ProducerMetadata::new(
                "keyboard_indicators",
                "Keyboard Indicators",
                "Caps Lock and Num Lock state",
                Some("indicator format (c?n?)"),
            ),
            reader,
        }
    }
}

impl Producer for KeyboardIndicatorsSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, argument: Option<&str>) -> Reading {
        let format = require_argument(argument)?;
        let mask = self.reader.led_mask()?;
        Ok(format_indicators(format, mask))
    }
}
