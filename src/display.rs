//! 16×2 LCD status-line formatter.
//!
//! Pure function of the [`StatusSnapshot`] — host adapters render the
//! same two-line summary the reference panel shows.  Observational only.

use crate::app::events::StatusSnapshot;

/// Character width of the panel LCD.
pub const LCD_COLS: usize = 16;

/// Format the two status lines, each padded to [`LCD_COLS`] characters.
pub fn status_lines(status: &StatusSnapshot) -> (String, String) {
    let (line0, line1) = if status.beam_on {
        if status.aux_output {
            ("HB:ON  SPOT:ON".to_string(), ">>> ACTIVE <<<".to_string())
        } else if status.pulse_count > 0 {
            (
                "HB:ON  SPOT:--".to_string(),
                format!("Flash {}/2...", status.pulse_count),
            )
        } else {
            ("HB:ON  SPOT:--".to_string(), "2xFlash=Toggle".to_string())
        }
    } else if status.aux_enabled {
        ("HB:OFF SPOT:--".to_string(), "Waiting for HB".to_string())
    } else {
        ("HB:OFF SPOT:--".to_string(), "Ready".to_string())
    };

    (format!("{line0:<LCD_COLS$}"), format!("{line1:<LCD_COLS$}"))
}
