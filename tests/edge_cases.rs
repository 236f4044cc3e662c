//! Edge case and boundary condition tests across the driver, detector, and
//! game engine.

use charlie_ttt::{
    frame_plan,
    hal::{MockPort, MockTimer},
    pair_for, render, Board, ButtonConfig, ButtonGesture, Clock, Config, DisplayConfig, Game,
    GameState, GestureDetector, LedColor, MatrixDriver, SequenceConfig, NUM_CELLS,
};

// ============================================================================
// Driver Boundaries
// ============================================================================

#[test]
fn zero_hold_activation_still_discharges() {
    let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
    let mut timer = MockTimer::new();
    driver.light_cell(&mut timer, LedColor::Red, 0, 0).unwrap();

    assert_eq!(timer.now_ms(), 0);
    assert!(driver.port().all_parked());
    assert!(driver.port().all_lines_forced_low_before_final_park());
}

#[test]
fn light_mask_zero_duration_parks_immediately() {
    let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
    let mut timer = MockTimer::new();
    let mask = [true; NUM_CELLS];
    driver
        .light_mask(&mut timer, LedColor::Red, &mask, 0, 2)
        .unwrap();
    assert_eq!(timer.now_ms(), 0);
    assert!(driver.port().lit_pairs().is_empty());
    assert!(driver.port().all_parked());
}

#[test]
fn light_mask_zero_slot_cannot_spin() {
    let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
    let mut timer = MockTimer::new();
    let mask = [true; NUM_CELLS];
    driver
        .light_mask(&mut timer, LedColor::Green, &mask, 100, 0)
        .unwrap();
    assert!(driver.port().all_parked());
}

#[test]
fn every_cell_and_color_drives_a_unique_led() {
    // 9 cells x 2 colors must map to 18 distinct directed pairs.
    let mut pairs = Vec::new();
    for color in [LedColor::Red, LedColor::Green] {
        for cell in 0..NUM_CELLS as u8 {
            pairs.push(pair_for(color, cell));
        }
    }
    pairs.sort_unstable();
    pairs.dedup();
    assert_eq!(pairs.len(), 18);
}

// ============================================================================
// Display Defensive Rules
// ============================================================================

#[test]
fn double_marked_cell_renders_red_through_the_driver() {
    // Should not occur through normal play; the display layer still
    // resolves it deterministically.
    let mut board = Board::new();
    board.mark(LedColor::Red, 4);
    board.mark(LedColor::Green, 4);

    let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
    let mut timer = MockTimer::new();
    // now = 550: cursor blink is in its off phase.
    render(
        &mut driver,
        &mut timer,
        &board,
        0,
        LedColor::Green,
        550,
        &DisplayConfig::default(),
    )
    .unwrap();

    assert_eq!(driver.port().lit_pairs(), [pair_for(LedColor::Red, 4)]);
}

#[test]
fn frame_plan_is_empty_on_empty_board_with_cursor_off() {
    let board = Board::new();
    let plan = frame_plan(&board, 0, LedColor::Red, 599, &DisplayConfig::default());
    assert!(plan.is_empty());
}

// ============================================================================
// Gesture Timing Boundaries
// ============================================================================

fn drive(detector: &mut GestureDetector, segments: &[(bool, u64)]) -> Vec<ButtonGesture> {
    let mut gestures = Vec::new();
    let mut now = 0u64;
    for &(pressed, duration) in segments {
        for _ in 0..duration {
            if let Some(g) = detector.update(pressed, now) {
                gestures.push(g);
            }
            now += 1;
        }
    }
    gestures
}

#[test]
fn press_just_under_long_threshold_is_short() {
    let mut det = GestureDetector::new(ButtonConfig::default());
    // Confirmed at t=10, released at t=1009: held 999 ms.
    let gestures = drive(&mut det, &[(true, 1009), (false, 600)]);
    assert_eq!(gestures, [ButtonGesture::Short]);
}

#[test]
fn second_press_on_window_edge_still_counts_as_double() {
    let mut det = GestureDetector::new(ButtonConfig::default());
    // Window opens at t=110; the second press lands exactly as it would
    // expire.
    let gestures = drive(
        &mut det,
        &[(true, 100), (false, 510), (true, 100), (false, 600)],
    );
    assert_eq!(gestures, [ButtonGesture::Double]);
}

#[test]
fn release_exactly_at_debounce_boundary_confirms() {
    let mut det = GestureDetector::new(ButtonConfig::default());
    // Held exactly through the debounce window, then a clean release.
    let gestures = drive(&mut det, &[(true, 11), (false, 600)]);
    assert_eq!(gestures, [ButtonGesture::Short]);
}

// ============================================================================
// Game Engine Boundaries
// ============================================================================

fn full_drawn_game() -> Game {
    let mut board = Board::new();
    for cell in [0u8, 2, 3, 7, 8] {
        board.mark(LedColor::Red, cell);
    }
    for cell in [1u8, 4, 5, 6] {
        board.mark(LedColor::Green, cell);
    }
    Game::from_parts(board, 0, LedColor::Red)
}

#[test]
fn all_gestures_on_a_full_board_report_stalemate() {
    for gesture in [
        ButtonGesture::Short,
        ButtonGesture::Double,
        ButtonGesture::Long,
    ] {
        let mut game = full_drawn_game();
        assert_eq!(game.apply_gesture(gesture), GameState::Stalemate);
    }
}

#[test]
fn cursor_invariant_holds_under_a_long_gesture_stream() {
    // Deterministic pseudo-random gesture stream; the invariant must hold
    // after every single step of every game played.
    let mut seed: u32 = 0x2F6E_2B1C;
    let mut next = move || {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        seed >> 16
    };

    let mut game = Game::new();
    for _ in 0..2000 {
        let gesture = match next() % 3 {
            0 => ButtonGesture::Short,
            1 => ButtonGesture::Double,
            _ => ButtonGesture::Long,
        };
        let state = game.apply_gesture(gesture);
        match state {
            GameState::Ongoing => {
                assert!(
                    !game.board().occupied(game.cursor()),
                    "cursor {} sits on an occupied cell",
                    game.cursor()
                );
            }
            GameState::Restart => unreachable!("engine never reports Restart"),
            // Terminal: start over, as the console would.
            _ => game.initialize(),
        }
    }
}

#[test]
fn no_cell_ever_carries_both_colors_through_normal_play() {
    let mut seed: u32 = 0xBEEF_CAFE;
    let mut next = move || {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        seed >> 16
    };

    let mut game = Game::new();
    for _ in 0..2000 {
        let gesture = match next() % 3 {
            0 => ButtonGesture::Short,
            1 => ButtonGesture::Double,
            _ => ButtonGesture::Long,
        };
        let state = game.apply_gesture(gesture);
        for cell in 0..NUM_CELLS as u8 {
            assert!(
                !(game.board().is_marked(LedColor::Red, cell)
                    && game.board().is_marked(LedColor::Green, cell)),
                "cell {cell} double-marked"
            );
        }
        if state.is_terminal() {
            game.initialize();
        }
    }
}

// ============================================================================
// Sequencer Boundaries
// ============================================================================

#[test]
fn single_cycle_config_completes_immediately() {
    use charlie_ttt::EndGameSequencer;

    let mut driver = MatrixDriver::new(MockPort::new()).unwrap();
    let mut timer = MockTimer::new();
    let mut seq = EndGameSequencer::new(
        SequenceConfig::default()
            .with_on_ms(4)
            .with_off_ms(2)
            .with_cycles(1),
    );
    assert!(seq
        .play(&mut driver, &mut timer, GameState::GreenWins)
        .unwrap());
    assert_eq!(seq.cycles_played(), 0);
    assert!(driver.port().all_parked());
}

#[test]
fn default_config_values_are_consistent() {
    let config = Config::default();
    assert!(config.button.debounce_ms < config.button.double_window_ms);
    assert!(config.button.double_window_ms < config.button.long_press_ms);
    assert!(config.display.cursor_on_ms > config.display.cursor_off_ms);
    assert!(config.sequence.on_ms > config.sequence.off_ms);
}
