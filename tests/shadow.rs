mod common;

use common::{lcd, Op, Shadow, Shared};
use t6a04a::ShadowCanvas;

fn canvas() -> (Shadow, Shared) {
    let (lcd, state) = lcd();
    let mut canvas = ShadowCanvas::new(lcd);
    canvas.init().unwrap();
    state.borrow_mut().log.clear();
    (canvas, state)
}

#[test]
fn init_blanks_power_on_noise() {
    let (_canvas, state) = canvas();
    let state = state.borrow();
    for row in 0..64 {
        for column in 0..12 {
            assert_eq!(state.word(row, column), 0);
        }
    }
}

#[test]
fn setting_a_set_pixel_is_free() {
    let (mut canvas, state) = canvas();

    canvas.write_pixel(10, 10, true).unwrap();
    assert_eq!(
        state.borrow_mut().take_log(),
        vec![
            Op::Instruction(0b1000_1010),
            Op::Instruction(0b0010_0001),
            Op::Write(0b0010_0000),
        ]
    );

    canvas.write_pixel(10, 10, true).unwrap();
    assert!(state.borrow().log.is_empty());

    canvas.write_pixel(11, 10, true).unwrap();
    assert_eq!(state.borrow().writes(), 1);
    assert_eq!(state.borrow().word(10, 1), 0b0011_0000);
}

#[test]
fn off_screen_pixels_are_ignored() {
    let (mut canvas, state) = canvas();
    canvas.write_pixel(96, 3, true).unwrap();
    canvas.write_pixel(3, 64, true).unwrap();
    assert!(state.borrow().log.is_empty());
}

#[test]
fn clear_only_rewrites_dirty_words() {
    let (mut canvas, state) = canvas();
    canvas.write_pixel(0, 0, true).unwrap();
    canvas.write_pixel(1, 0, true).unwrap();
    canvas.write_pixel(50, 33, true).unwrap();
    state.borrow_mut().log.clear();

    canvas.clear().unwrap();
    assert_eq!(state.borrow().writes(), 2);
    assert_eq!(state.borrow().word(0, 0), 0);
    assert_eq!(state.borrow().word(33, 6), 0);

    state.borrow_mut().log.clear();
    canvas.clear().unwrap();
    assert!(state.borrow().log.is_empty());
}

#[test]
fn fill_then_clear() {
    let (mut canvas, state) = canvas();
    canvas.fill(true).unwrap();
    assert_eq!(state.borrow().writes(), 64 * 12);
    assert_eq!(state.borrow().word(63, 11), 0xff);

    state.borrow_mut().log.clear();
    canvas.fill(true).unwrap();
    assert!(state.borrow().log.is_empty());

    canvas.clear().unwrap();
    assert_eq!(state.borrow().writes(), 64 * 12);
    assert_eq!(state.borrow().word(17, 4), 0);
}

#[test]
fn hline_writes_changed_words_only() {
    let (mut canvas, state) = canvas();

    canvas.fast_fill(0, 5, 96, true).unwrap();
    let mut expected = vec![Op::Instruction(0b1000_0101), Op::Instruction(0b0010_0000)];
    expected.extend_from_slice(&[Op::Write(0xff); 12]);
    assert_eq!(state.borrow_mut().take_log(), expected);

    canvas.fast_fill(0, 5, 96, true).unwrap();
    assert!(state.borrow().log.is_empty());

    // of the three covered words only word 3 changes, one seek and one write
    canvas.fast_fill(30, 5, 2, false).unwrap();
    assert_eq!(state.borrow().word(5, 3), 0b1111_1100);
    state.borrow_mut().log.clear();
    canvas.fast_fill(24, 5, 24, true).unwrap();
    assert_eq!(
        state.borrow_mut().take_log(),
        vec![
            Op::Instruction(0b1000_0101),
            Op::Instruction(0b0010_0011),
            Op::Write(0xff),
        ]
    );
}

#[test]
fn hline_matches_the_plain_driver() {
    let (mut canvas, canvas_state) = canvas();
    let (mut plain, plain_state) = lcd();
    plain.init().unwrap();
    plain.clear().unwrap();

    for &(x, y, width, on) in &[
        (3, 0, 10, true),
        (-5, 1, 10, true),
        (0, 2, 96, true),
        (90, 2, -40, false),
        (17, 63, 1, true),
        (95, 62, -96, true),
        (44, 62, 20, false),
    ] {
        canvas.fast_fill(x, y, width, on).unwrap();
        plain.fast_fill(x, y, width, on).unwrap();
    }
    assert!(canvas_state.borrow().pixels[..] == plain_state.borrow().pixels[..]);
}

#[test]
fn writes_go_through_the_inner_driver() {
    let (mut canvas, _state) = canvas();
    canvas.write_pixel(9, 9, true).unwrap();
    let mut lcd = canvas.release();
    assert_eq!(lcd.read_word_at(9, 1).unwrap(), 0b0100_0000);
}
