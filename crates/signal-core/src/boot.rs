//! Boot-screen log typer, post-boot power-on timeline and PCB trace routing.

use crate::error::ScheduleError;
use crate::sequencer::{Latch, Phase, PhaseSchedule};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BootLine {
    pub text: &'static str,
    /// Pause after this line is printed, before the next one.
    pub delay_ms: u32,
}

const fn line(text: &'static str, delay_ms: u32) -> BootLine {
    BootLine { text, delay_ms }
}

pub const BOOT_LINES: &[BootLine] = &[
    line("", 300),
    line("╔══════════════════════════════════════╗", 40),
    line("║         ArCh  SYSTEM  BIOS           ║", 40),
    line("║         v1.0.25  [ARM Cortex]         ║", 40),
    line("╚══════════════════════════════════════╝", 200),
    line("", 100),
    line("[BOOT]  Power-On Reset detected", 80),
    line("[CLK ]  Configuring HSE oscillator... 8MHz", 60),
    line("[CLK ]  PLL multiplier set: x9", 50),
    line("[CLK ]  SYSCLK = 72MHz                          [ OK ]", 120),
    line("", 60),
    line("[MEM ]  Initializing SRAM... 20KB", 50),
    line("[MEM ]  Flash: 128KB verified                   [ OK ]", 100),
    line("[MEM ]  Stack pointer set: 0x20005000", 60),
    line("", 80),
    line("[GPIO]  Configuring Port A... output mode", 50),
    line("[GPIO]  Configuring Port B... alt function", 50),
    line("[GPIO]  Pin mapping complete                    [ OK ]", 100),
    line("", 60),
    line("[UART]  USART1 initialized — 115200 baud", 60),
    line("[SPI ]  SPI1 master mode, CPOL=0, CPHA=0", 50),
    line("[I2C ]  I2C1 slave address configured", 50),
    line("[TMR ]  TIM2 PWM output on PA0                  [ OK ]", 100),
    line("", 80),
    line("[NVIC]  Interrupt vector table relocated", 50),
    line("[NVIC]  Priority grouping: 4 bits pre-emption", 60),
    line("[WDG ]  Independent watchdog disabled", 40),
    line("", 100),
    line("[LINK]  Portfolio interface ........ mounted", 70),
    line("[LINK]  GitHub peripheral .......... detected", 70),
    line("[LINK]  LinkedIn bus ............... active", 70),
    line("[LINK]  UART_TX (Email) ........... ready", 70),
    line("", 120),
    line("[SYS ]  All peripherals initialized", 80),
    line("[SYS ]  Entering main() ...", 300),
    line("", 100),
    line("  ┌─────────────────────────────────┐", 40),
    line("  │   ArCh — Embedded Engineer       │", 40),
    line("  │   Systems. Signals. Software.    │", 40),
    line("  └─────────────────────────────────┘", 400),
    line("", 200),
    line("[RDY ]  System online. Welcome.", 500),
];

#[derive(Clone, Debug, PartialEq)]
pub enum BootStep {
    /// Print `text` and come back after `next_delay_ms`.
    Line {
        text: &'static str,
        next_delay_ms: u32,
    },
    /// All lines printed; `fired` is true only for the call that completed boot.
    Complete { fired: bool },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkipOutcome {
    pub flushed: Vec<&'static str>,
    pub fired: bool,
}

/// Timer-driven boot log with a skip path; completion fires exactly once.
#[derive(Clone, Debug)]
pub struct BootSequence {
    lines: &'static [BootLine],
    cursor: usize,
    latch: Latch,
}

impl Default for BootSequence {
    fn default() -> Self {
        Self::new(BOOT_LINES)
    }
}

impl BootSequence {
    pub fn new(lines: &'static [BootLine]) -> Self {
        Self {
            lines,
            cursor: 0,
            latch: Latch::new(),
        }
    }

    pub fn start(&mut self) -> bool {
        self.latch.activate()
    }

    pub fn printed(&self) -> usize {
        self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.latch.is_finished()
    }

    pub fn advance(&mut self) -> BootStep {
        if self.latch.is_finished() {
            return BootStep::Complete { fired: false };
        }
        match self.lines.get(self.cursor) {
            Some(l) => {
                self.cursor += 1;
                BootStep::Line {
                    text: l.text,
                    next_delay_ms: l.delay_ms,
                }
            }
            None => BootStep::Complete {
                fired: self.finish(),
            },
        }
    }

    /// Flush every remaining line and complete. Repeated calls are no-ops.
    pub fn skip(&mut self) -> SkipOutcome {
        if self.latch.is_finished() {
            return SkipOutcome::default();
        }
        let flushed = self.lines[self.cursor..].iter().map(|l| l.text).collect();
        self.cursor = self.lines.len();
        SkipOutcome {
            flushed,
            fired: self.finish(),
        }
    }

    fn finish(&mut self) -> bool {
        let fired = self.latch.finish();
        if fired {
            log::info!("[boot] finished after {} lines", self.cursor);
        }
        fired
    }

    /// Phase view of the log: line `i` is visible during phase `i`.
    pub fn schedule(&self) -> Result<PhaseSchedule, ScheduleError> {
        PhaseSchedule::new(
            self.lines
                .iter()
                .map(|l| Phase::new(l.delay_ms as f64, l.text))
                .collect(),
        )
    }

    /// Number of lines visible `elapsed_ms` after the first line was printed.
    pub fn visible_lines_at(&self, elapsed_ms: f64) -> usize {
        match self.schedule() {
            Ok(s) => {
                let pos = s.locate(elapsed_ms);
                if pos.complete {
                    self.lines.len()
                } else {
                    pos.index + 1
                }
            }
            Err(_) => 0,
        }
    }
}

/// Delay between boot completion and hiding the boot screen.
pub const HIDE_SCREEN_DELAY_MS: u32 = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerOnStage {
    Mcu,
    Traces,
    Peripherals,
    Tagline,
}

/// Offsets relative to the moment the boot screen is hidden.
pub const POWER_ON_TIMELINE: [(PowerOnStage, u32); 4] = [
    (PowerOnStage::Mcu, 400),
    (PowerOnStage::Traces, 800),
    (PowerOnStage::Peripherals, 1400),
    (PowerOnStage::Tagline, 2200),
];

pub const TRACE_STAGGER_MS: u32 = 200;
pub const TRACE_START_MS: u32 = 50;
pub const PERIPHERAL_STAGGER_MS: u32 = 250;
pub const TRACE_BEND_GAP: f64 = 20.0;

#[inline]
pub fn trace_delay_ms(index: usize) -> u32 {
    index as u32 * TRACE_STAGGER_MS + TRACE_START_MS
}

#[inline]
pub fn peripheral_delay_ms(index: usize) -> u32 {
    index as u32 * PERIPHERAL_STAGGER_MS
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum McuSide {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracePoint {
    pub x: f64,
    pub y: f64,
}

/// Peripheral element id and the MCU edge its trace leaves from.
pub const TRACE_CONFIG: [(&str, McuSide); 4] = [
    ("p-portfolio", McuSide::Top),
    ("p-github", McuSide::Right),
    ("p-linkedin", McuSide::Bottom),
    ("p-email", McuSide::Left),
];

/// Edge midpoint of the MCU rect `(left, top, width, height)` on `side`.
pub fn mcu_edge(rect: (f64, f64, f64, f64), side: McuSide) -> TracePoint {
    let (left, top, w, h) = rect;
    let (x, y) = match side {
        McuSide::Top => (left + w / 2.0, top),
        McuSide::Bottom => (left + w / 2.0, top + h),
        McuSide::Left => (left, top + h / 2.0),
        McuSide::Right => (left + w, top + h / 2.0),
    };
    TracePoint {
        x: x.round(),
        y: y.round(),
    }
}

/// Inner edge midpoint of a peripheral, from its resolved CSS offset.
///
/// `offset` is the computed `top`/`right`/`bottom`/`left` value (px) on the
/// side facing away from the MCU. Works from layout values rather than the
/// bounding box so scale animations do not skew the traces.
pub fn peripheral_edge(
    side: McuSide,
    viewport: (f64, f64),
    size: (f64, f64),
    offset: f64,
) -> TracePoint {
    let (vw, vh) = viewport;
    let (w, h) = size;
    let (x, y) = match side {
        McuSide::Top => (vw / 2.0, offset + h),
        McuSide::Bottom => (vw / 2.0, vh - offset - h),
        McuSide::Right => (vw - offset - w, vh / 2.0),
        McuSide::Left => (offset + w, vh / 2.0),
    };
    TracePoint {
        x: x.round(),
        y: y.round(),
    }
}

/// SVG path for a right-angle PCB trace from the MCU to a peripheral.
///
/// Vertical runs get a 0.5px x nudge so the stroke's filter region never
/// collapses to zero width.
pub fn build_trace(mcu: TracePoint, peripheral: TracePoint, side: McuSide) -> String {
    let (mx, my) = (mcu.x, mcu.y);
    let (px, py) = (peripheral.x, peripheral.y);
    match side {
        McuSide::Top | McuSide::Bottom => format!("M {} {} L {} {}", mx, my, mx + 0.5, py),
        McuSide::Left => {
            let bend = mx - TRACE_BEND_GAP;
            format!("M {mx} {my} L {bend} {my} L {bend} {py} L {px} {py}")
        }
        McuSide::Right => {
            let bend = mx + TRACE_BEND_GAP;
            format!("M {mx} {my} L {bend} {my} L {bend} {py} L {px} {py}")
        }
    }
}

/// Keys that skip the boot log.
#[inline]
pub fn is_skip_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Escape")
}
