//! Synthetic mouse and keyboard input.

use serde_json::json;
use tracing::trace;

use crate::cdp::error::CdpError;

use super::core::PageSession;

impl PageSession {
    /// Left-click at viewport coordinates.
    ///
    /// Each press carries the running `clickCount`, so a count of 3 arrives
    /// as a triple-click and selects the text under the pointer.
    pub async fn click(&self, x: f64, y: f64, click_count: u32) -> Result<(), CdpError> {
        for count in 1..=click_count.max(1) {
            for phase in ["mousePressed", "mouseReleased"] {
                let event = json!({
                    "type": phase,
                    "x": x,
                    "y": y,
                    "button": "left",
                    "clickCount": count,
                });
                self.call("Input.dispatchMouseEvent", Some(event)).await?;
            }
        }
        trace!("Clicked ({:.0}, {:.0}) x{}", x, y, click_count);
        Ok(())
    }

    /// Insert text at the focused element as a single input event.
    pub async fn insert_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        Ok(())
    }

    /// Press and release a named key such as `Backspace`.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        for phase in ["rawKeyDown", "keyUp"] {
            let event = json!({
                "type": phase,
                "key": key,
                "code": key,
                "windowsVirtualKeyCode": Self::virtual_key_code(key),
            });
            self.call("Input.dispatchKeyEvent", Some(event)).await?;
        }
        Ok(())
    }

    pub(super) fn virtual_key_code(key: &str) -> i64 {
        match key {
            "Backspace" => 8,
            "Tab" => 9,
            "Enter" => 13,
            "Escape" => 27,
            "Delete" => 46,
            _ => 0,
        }
    }
}
