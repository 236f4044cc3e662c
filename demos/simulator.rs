//! Desktop simulator: plays a scripted game on mock hardware.
//!
//! Runs entirely on virtual time (the mock timer advances only through the
//! console's own sleeps), so the whole game finishes instantly while going
//! through exactly the tick sequence the firmware would.
//!
//! ```sh
//! cargo run --example simulator
//! ```

use anyhow::{anyhow, Result};
use charlie_ttt::{
    hal::{MockButton, MockPort, MockTimer},
    Clock, Config, DisplayConfig, GameConsole, GameSnapshot, GameState, LedColor, SequenceConfig,
};

type SimConsole = GameConsole<MockPort, MockButton, MockTimer>;

fn tick(console: &mut SimConsole) -> Result<GameState> {
    console
        .tick()
        .map_err(|()| anyhow!("mock port rejected a line write"))
}

/// Holds (or releases) the button for `ms` virtual milliseconds.
fn run(console: &mut SimConsole, pressed: bool, ms: u64) -> Result<()> {
    console.button_mut().set_pressed(pressed);
    for _ in 0..ms {
        tick(console)?;
    }
    console.driver_mut().port_mut().clear_events();
    Ok(())
}

fn short_press(console: &mut SimConsole) -> Result<()> {
    run(console, true, 50)?;
    run(console, false, 600)
}

fn long_press(console: &mut SimConsole) -> Result<()> {
    run(console, true, 1100)?;
    run(console, false, 30)
}

fn commit(console: &mut SimConsole, cell: u8) -> Result<()> {
    while console.game().cursor() != cell {
        short_press(console)?;
    }
    long_press(console)?;
    print_board(&console.snapshot());
    Ok(())
}

fn print_board(snapshot: &GameSnapshot) {
    println!(
        "[Board] turn={} cursor={} state={:?}",
        snapshot.current_color.as_str(),
        snapshot.cursor,
        snapshot.state
    );
    for row in 0..3u8 {
        let mut line = String::from("        ");
        for col in 0..3u8 {
            let cell = row * 3 + col;
            let glyph = if snapshot.board.is_marked(LedColor::Red, cell) {
                'R'
            } else if snapshot.board.is_marked(LedColor::Green, cell) {
                'G'
            } else if cell == snapshot.cursor {
                '*'
            } else {
                '.'
            };
            line.push(glyph);
            line.push(' ');
        }
        println!("{line}");
    }
}

fn main() -> Result<()> {
    // Zero LED holds so one tick is one virtual millisecond; quick animation.
    let config = Config::default()
        .with_display(
            DisplayConfig::default()
                .with_cell_hold_ms(0)
                .with_cursor_hold_ms(0),
        )
        .with_sequence(SequenceConfig::default().with_on_ms(20).with_off_ms(10));

    let mut console = GameConsole::with_config(
        MockPort::new(),
        MockButton::new(),
        MockTimer::new(),
        config,
    )
    .map_err(|()| anyhow!("failed to initialize the matrix"))?;

    println!("[Sim] Red opens with the top row plan, Green answers in the middle");
    for cell in [0u8, 3, 1, 4] {
        commit(&mut console, cell)?;
    }

    println!("[Sim] Red completes the top row");
    while console.game().cursor() != 2 {
        short_press(&mut console)?;
    }
    run(&mut console, true, 1100)?;
    run(&mut console, false, 5)?;

    // Let the release debounce finish; the winning commit lands here.
    let mut state = console.state();
    while state == GameState::Ongoing {
        state = tick(&mut console)?;
    }
    println!("[Sim] {state:?}");
    print_board(&console.snapshot());

    // The console now plays the win animation, then restarts on its own.
    let mut cycles = 0;
    while console.state() != GameState::Ongoing {
        tick(&mut console)?;
        cycles += 1;
    }
    println!("[Sim] Win animation finished after {cycles} cycles, game restarted");
    print_board(&console.snapshot());

    println!(
        "[Sim] Done after {} virtual ms",
        console.timer().now_ms()
    );
    Ok(())
}
