//! Display attributes for each session status.

use super::Status;

pub const SLEEP_GLYPH: &str = "\u{1F4A4}"; // 💤
const PENCIL_GLYPH: &str = "\u{270F}\u{FE0F}"; // ✏️
const MEMO_GLYPH: &str = "\u{1F4DD}"; // 📝
const CROSS_GLYPH: &str = "\u{274C}"; // ❌
const CHECK_GLYPH: &str = "\u{2705}"; // ✅
const QUESTION_GLYPH: &str = "\u{2753}"; // ❓

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Seconds in one attention-blink cycle, and how many of them blink.
const ATTENTION_CYCLE_SECS: i64 = 60;
const ATTENTION_BLINK_SECS: i64 = 3;

/// Where a status icon comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Fixed(&'static str),
    /// Braille spinner, one frame per second.
    Spinner,
    /// Pencil that blinks briefly once a minute.
    Attention,
}

impl Icon {
    /// Resolve to a concrete glyph at the given unix time.
    pub fn glyph(self, epoch_secs: i64) -> &'static str {
        match self {
            Icon::Fixed(glyph) => glyph,
            Icon::Spinner => spinner_glyph(epoch_secs),
            Icon::Attention => attention_glyph(epoch_secs),
        }
    }
}

/// One row of the status table.
#[derive(Debug)]
pub struct StatusStyle {
    /// Lower sorts first.
    pub priority: u8,
    pub icon: Icon,
    pub color: &'static str,
    pub label: &'static str,
}

/// Indexed by `Status` discriminant; the last row is the fallback for
/// unrecognised status strings.
static STYLES: [StatusStyle; 7] = [
    StatusStyle {
        priority: 1,
        icon: Icon::Attention,
        color: "red",
        label: "\u{26A0}\u{FE0F} NEEDS ATTENTION",
    },
    StatusStyle {
        priority: 2,
        icon: Icon::Spinner,
        color: "orange",
        label: "Processing...",
    },
    StatusStyle {
        priority: 3,
        icon: Icon::Fixed(PENCIL_GLYPH),
        color: "blue",
        label: "Typing...",
    },
    StatusStyle {
        priority: 4,
        icon: Icon::Fixed(CROSS_GLYPH),
        color: "red",
        label: "Error",
    },
    StatusStyle {
        priority: 5,
        icon: Icon::Fixed(CHECK_GLYPH),
        color: "green",
        label: "Completed",
    },
    StatusStyle {
        priority: 6,
        icon: Icon::Fixed(SLEEP_GLYPH),
        color: "gray",
        label: "Idle",
    },
    StatusStyle {
        priority: 7,
        icon: Icon::Fixed(QUESTION_GLYPH),
        color: "black",
        label: "Unknown",
    },
];

impl Status {
    pub fn style(self) -> &'static StatusStyle {
        &STYLES[self as usize]
    }

    pub fn priority(self) -> u8 {
        self.style().priority
    }

    pub fn color(self) -> &'static str {
        self.style().color
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }

    /// Icon for this status at the given unix time.
    pub fn icon(self, epoch_secs: i64) -> &'static str {
        self.style().icon.glyph(epoch_secs)
    }
}

/// Spinner frame for `executing`: advances every second and wraps.
pub fn spinner_glyph(epoch_secs: i64) -> &'static str {
    SPINNER[epoch_secs.rem_euclid(SPINNER.len() as i64) as usize]
}

/// Attention icon for `waiting_confirmation`. Alternates pencil/memo for
/// the first seconds of each minute, then holds the pencil.
pub fn attention_glyph(epoch_secs: i64) -> &'static str {
    let cycle = epoch_secs.rem_euclid(ATTENTION_CYCLE_SECS);
    if cycle < ATTENTION_BLINK_SECS && cycle % 2 == 1 {
        MEMO_GLYPH
    } else {
        PENCIL_GLYPH
    }
}
