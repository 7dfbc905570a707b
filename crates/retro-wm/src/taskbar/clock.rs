//! System tray and clock label

use serde::{Deserialize, Serialize};

/// Format a wall-clock time for the tray.
///
/// 24-hour mode pads both fields (`09:05`). 12-hour mode leaves the hour
/// unpadded and maps midnight and noon to 12 (`12:05 AM`).
pub fn format_clock(hour: u32, minute: u32, am_pm: bool) -> String {
    if !am_pm {
        return format!("{hour:02}:{minute:02}");
    }

    let suffix = if hour % 24 >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minute:02} {suffix}")
}

/// Right-hand side of the taskbar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemTray {
    /// Render the clock
    pub show_clock: bool,
    /// 12-hour clock with AM/PM suffix
    pub clock_am_pm: bool,
}

impl Default for SystemTray {
    fn default() -> Self {
        Self {
            show_clock: true,
            clock_am_pm: false,
        }
    }
}

impl SystemTray {
    /// Clock text for the given time, `None` when the clock is hidden
    pub fn clock_label(&self, hour: u32, minute: u32) -> Option<String> {
        self.show_clock.then(|| format_clock(hour, minute, self.clock_am_pm))
    }
}
