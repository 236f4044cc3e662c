//! Full-game scenarios driven through the console's button, tick by tick.

use charlie_ttt::{
    hal::{MockButton, MockPort, MockTimer},
    Config, DisplayConfig, GameConsole, GameState, LedColor, SequenceConfig,
};

type TestConsole = GameConsole<MockPort, MockButton, MockTimer>;

/// Timing that makes one ongoing tick advance the clock by exactly 1 ms
/// (zero LED holds, 1 ms pacing) and keeps the end-game animation short.
fn test_config() -> Config {
    Config::default()
        .with_display(
            DisplayConfig::default()
                .with_cell_hold_ms(0)
                .with_cursor_hold_ms(0),
        )
        .with_sequence(SequenceConfig::default().with_on_ms(10).with_off_ms(5))
}

fn new_console() -> TestConsole {
    GameConsole::with_config(
        MockPort::new(),
        MockButton::new(),
        MockTimer::new(),
        test_config(),
    )
    .unwrap()
}

fn run(console: &mut TestConsole, pressed: bool, ticks: u64) {
    console.button_mut().set_pressed(pressed);
    for _ in 0..ticks {
        console.tick().unwrap();
    }
    // Keep the mock's event trace from growing without bound over long
    // scenarios; electrical state is preserved.
    console.driver_mut().port_mut().clear_events();
}

/// One short press: navigate forward.
fn short_press(console: &mut TestConsole) {
    run(console, true, 50);
    run(console, false, 600);
}

/// One long press: commit the cursor cell.
fn long_press(console: &mut TestConsole) {
    run(console, true, 1100);
    run(console, false, 30);
}

/// Navigates to `cell` with short presses and commits it.
///
/// Only valid mid-game (the game must stay ongoing afterwards).
fn commit(console: &mut TestConsole, cell: u8) {
    while console.game().cursor() != cell {
        short_press(console);
    }
    long_press(console);
}

/// Ticks with the button released until the state leaves `Ongoing`.
fn tick_until_not_ongoing(console: &mut TestConsole) -> GameState {
    console.button_mut().set_pressed(false);
    for _ in 0..50 {
        let state = console.tick().unwrap();
        if state != GameState::Ongoing {
            return state;
        }
    }
    panic!("game never left Ongoing");
}

// ============================================================================
// Turn Alternation
// ============================================================================

#[test]
fn commits_alternate_between_players() {
    let mut console = new_console();

    commit(&mut console, 0);
    let snapshot = console.snapshot();
    assert!(snapshot.board.is_marked(LedColor::Red, 0));
    assert_eq!(snapshot.current_color, LedColor::Green);

    commit(&mut console, 4);
    let snapshot = console.snapshot();
    assert!(snapshot.board.is_marked(LedColor::Green, 4));
    assert_eq!(snapshot.current_color, LedColor::Red);
}

#[test]
fn navigation_gestures_do_not_mutate_the_board() {
    let mut console = new_console();
    short_press(&mut console);
    short_press(&mut console);

    let snapshot = console.snapshot();
    assert_eq!(snapshot.cursor, 2);
    for cell in 0..9 {
        assert!(!snapshot.board.occupied(cell));
    }
    assert_eq!(snapshot.current_color, LedColor::Red);
}

// ============================================================================
// Win Scenario
// ============================================================================

#[test]
fn red_row_win_plays_animation_then_restarts() {
    let mut console = new_console();

    // Red 0, Green 3, Red 1, Green 4, then Red completes the top row.
    for cell in [0u8, 3, 1, 4] {
        commit(&mut console, cell);
        assert_eq!(console.state(), GameState::Ongoing);
    }
    while console.game().cursor() != 2 {
        short_press(&mut console);
    }
    run(&mut console, true, 1100);
    run(&mut console, false, 5); // release, gesture still in debounce

    assert_eq!(tick_until_not_ongoing(&mut console), GameState::RedWins);

    // Three animation cycles, then a fresh game.
    assert_eq!(console.tick().unwrap(), GameState::RedWins);
    assert_eq!(console.tick().unwrap(), GameState::RedWins);
    assert_eq!(console.tick().unwrap(), GameState::Ongoing);

    let snapshot = console.snapshot();
    assert_eq!(snapshot.cursor, 0);
    assert_eq!(snapshot.current_color, LedColor::Red);
    for cell in 0..9 {
        assert!(!snapshot.board.occupied(cell));
    }
}

#[test]
fn green_column_win_is_reported_for_green() {
    let mut console = new_console();

    // Red 0, Green 1, Red 3, Green 4, Red 8, then Green completes column
    // {1, 4, 7}.
    for cell in [0u8, 1, 3, 4, 8] {
        commit(&mut console, cell);
        assert_eq!(console.state(), GameState::Ongoing);
    }
    while console.game().cursor() != 7 {
        short_press(&mut console);
    }
    run(&mut console, true, 1100);
    run(&mut console, false, 5);

    assert_eq!(tick_until_not_ongoing(&mut console), GameState::GreenWins);
}

// ============================================================================
// Stalemate Scenario
// ============================================================================

#[test]
fn drawn_game_stalemates_and_restarts() {
    let mut console = new_console();

    // Alternating commits with no triple for either color:
    //   R G R
    //   R G G
    //   G R R
    let drawn = [0u8, 1, 2, 4, 3, 5, 7, 6];
    for cell in drawn {
        commit(&mut console, cell);
        assert_eq!(console.state(), GameState::Ongoing);
    }

    // Ninth commit fills the board.
    while console.game().cursor() != 8 {
        short_press(&mut console);
    }
    run(&mut console, true, 1100);
    run(&mut console, false, 5);
    assert_eq!(tick_until_not_ongoing(&mut console), GameState::Stalemate);
    assert!(console.snapshot().board.is_full());

    // Animation runs its three cycles, then the game restarts.
    assert_eq!(console.tick().unwrap(), GameState::Stalemate);
    assert_eq!(console.tick().unwrap(), GameState::Stalemate);
    assert_eq!(console.tick().unwrap(), GameState::Ongoing);
    assert!(!console.snapshot().board.is_full());
}

// ============================================================================
// Rendering Discipline
// ============================================================================

#[test]
fn every_tick_ends_with_all_lines_parked() {
    let mut console = new_console();
    commit(&mut console, 0);

    console.driver_mut().port_mut().clear_events();
    for _ in 0..600 {
        console.tick().unwrap();
        assert!(console.driver().port().all_parked());
    }
    assert!(console.driver().port().is_glitch_free());
}
