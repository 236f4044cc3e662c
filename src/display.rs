//! Charlieplexed LED driver and the per-frame display scheduler.
//!
//! Five shared lines address 18 LEDs (9 cells × 2 colors). Exactly one LED
//! is ever conducting: its anode line is driven high, its cathode line low,
//! and the other three lines float in Hi-Z. Persistence of vision turns the
//! fast scan into a steady image.
//!
//! # Ghosting
//!
//! Parasitic capacitance on the shared lines keeps adjacent diode paths
//! faintly lit after an activation ends. Every activation therefore finishes
//! with a full discharge: the source returns to Hi-Z, *all* lines are forced
//! output-low to bleed the stored charge through the diode matrix, and only
//! then do the lines float again. The drive → hold → discharge-all → Hi-Z
//! order is a hard contract; see [`MatrixDriver::light_cell`].
//!
//! # Example
//!
//! ```rust
//! use charlie_ttt::display::MatrixDriver;
//! use charlie_ttt::game::LedColor;
//! use charlie_ttt::hal::{MockPort, MockTimer};
//!
//! let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
//! let mut timer = MockTimer::new();
//! driver.light_cell(&mut timer, LedColor::Red, 4, 3).unwrap();
//! assert!(driver.port().all_parked());
//! ```

use crate::config::DisplayConfig;
use crate::game::{Board, LedColor, NUM_CELLS};
use crate::traits::{LinePort, Sleep};

/// Number of shared physical lines.
pub const NUM_LINES: usize = 5;

/// Maximum activations in one frame: 9 occupied cells plus the cursor.
pub const FRAME_SLOTS: usize = NUM_CELLS + 1;

/// Anode/cathode line ordinals per cell for the red LEDs.
///
/// Green LEDs sit antiparallel on the same line pairs, so green uses the
/// same table with source and sink swapped.
const RED_PAIRS: [(u8, u8); NUM_CELLS] = [
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 2),
    (1, 3),
    (3, 4),
    (2, 3),
    (1, 4),
    (0, 4),
];

/// Returns the (source, sink) line pair that lights `cell` in `color`.
#[inline]
pub fn pair_for(color: LedColor, cell: u8) -> (u8, u8) {
    debug_assert!((cell as usize) < NUM_CELLS);
    let (anode, cathode) = RED_PAIRS[cell as usize];
    match color {
        LedColor::Red => (anode, cathode),
        LedColor::Green => (cathode, anode),
    }
}

/// Driver for the Charlieplexed 9-cell two-color matrix.
///
/// Owns the line port for the duration of a render step; every public
/// method leaves all lines parked in Hi-Z.
#[derive(Debug)]
pub struct MatrixDriver<P: LinePort> {
    port: P,
}

impl<P: LinePort> MatrixDriver<P> {
    /// Takes ownership of the port and parks every line in Hi-Z.
    pub fn new(port: P) -> Result<Self, P::Error> {
        let mut driver = Self { port };
        driver.all_hi_z()?;
        Ok(driver)
    }

    /// Borrow the underlying port (mock inspection, mostly).
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutable access to the underlying port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Parks every line in high impedance.
    pub fn all_hi_z(&mut self) -> Result<(), P::Error> {
        for line in 0..NUM_LINES as u8 {
            self.port.set_hi_z(line)?;
        }
        Ok(())
    }

    /// Lights one LED for `hold_ms`, then discharges the whole matrix.
    ///
    /// All lines other than the cell's pair must already be in Hi-Z, which
    /// holds whenever the previous activation went through this method.
    pub fn light_cell(
        &mut self,
        sleep: &mut impl Sleep,
        color: LedColor,
        cell: u8,
        hold_ms: u16,
    ) -> Result<(), P::Error> {
        let (source, sink) = pair_for(color, cell);

        self.port.set_high(source)?;
        self.port.set_low(sink)?;
        sleep.sleep_ms(u32::from(hold_ms));
        self.discharge(source)
    }

    /// Scans the masked cells in `color` until `duration_ms` of lit time has
    /// accumulated, then parks all lines.
    ///
    /// Each cell gets `slot_ms` per pass, so the pattern appears steady for
    /// the whole duration. A mask with no lit cell parks the lines and
    /// returns immediately.
    pub fn light_mask(
        &mut self,
        sleep: &mut impl Sleep,
        color: LedColor,
        mask: &[bool; NUM_CELLS],
        duration_ms: u16,
        slot_ms: u16,
    ) -> Result<(), P::Error> {
        if !mask.iter().any(|&lit| lit) || slot_ms == 0 {
            return self.all_hi_z();
        }

        let mut elapsed: u16 = 0;
        while elapsed < duration_ms {
            for cell in 0..NUM_CELLS as u8 {
                if mask[cell as usize] {
                    self.light_cell(sleep, color, cell, slot_ms)?;
                    elapsed = elapsed.saturating_add(slot_ms);
                }
                if elapsed >= duration_ms {
                    break;
                }
            }
        }

        self.all_hi_z()
    }

    /// Blanking step: source to Hi-Z first, then every line forced low to
    /// drain the parasitic charge, then everything back to Hi-Z.
    fn discharge(&mut self, source: u8) -> Result<(), P::Error> {
        self.port.set_hi_z(source)?;
        for line in 0..NUM_LINES as u8 {
            self.port.set_low(line)?;
        }
        self.all_hi_z()
    }
}

/// One scheduled LED activation within a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Which color to light.
    pub color: LedColor,
    /// Cell index, `0..9`.
    pub cell: u8,
    /// Hold time in milliseconds.
    pub hold_ms: u16,
}

/// Computes the activations for one frame of the ongoing game.
///
/// Occupied cells are scanned in index order; a cell marked in both colors
/// renders red. The blinking cursor is appended in the current player's
/// color when its duty cycle is in the "on" phase and the cursor cell is
/// free.
///
/// Pure function of its inputs; no port access.
pub fn frame_plan(
    board: &Board,
    cursor: u8,
    current_color: LedColor,
    now_ms: u64,
    config: &DisplayConfig,
) -> heapless::Vec<Slot, FRAME_SLOTS> {
    let mut plan = heapless::Vec::new();

    for cell in 0..NUM_CELLS as u8 {
        let red = board.is_marked(LedColor::Red, cell);
        let green = board.is_marked(LedColor::Green, cell);

        // Red has display priority if a cell is somehow double-marked.
        let color = match (red, green) {
            (true, _) => Some(LedColor::Red),
            (false, true) => Some(LedColor::Green),
            (false, false) => None,
        };
        if let Some(color) = color {
            let _ = plan.push(Slot {
                color,
                cell,
                hold_ms: config.cell_hold_ms,
            });
        }
    }

    let period = config.cursor_period_ms();
    let cursor_on = period > 0 && now_ms % period < config.cursor_on_ms;
    if cursor_on && !board.occupied(cursor) {
        let _ = plan.push(Slot {
            color: current_color,
            cell: cursor,
            hold_ms: config.cursor_hold_ms,
        });
    }

    plan
}

/// Renders one frame: executes the plan through the driver, then parks all
/// lines.
pub fn render<P: LinePort>(
    driver: &mut MatrixDriver<P>,
    sleep: &mut impl Sleep,
    board: &Board,
    cursor: u8,
    current_color: LedColor,
    now_ms: u64,
    config: &DisplayConfig,
) -> Result<(), P::Error> {
    for slot in frame_plan(board, cursor, current_color, now_ms, config) {
        driver.light_cell(sleep, slot.color, slot.cell, slot.hold_ms)?;
    }
    driver.all_hi_z()
}
