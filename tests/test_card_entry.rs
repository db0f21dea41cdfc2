use rat_cardentry::HasScreenCursor;
use rat_cardentry::card_entry::{CardEntry, CardEntryState, handle_events, handle_readonly_events};
use rat_cardentry::event::TextOutcome;
use rat_cardentry::{CardError, PartitionSpec};
use ratatui_core::buffer::Buffer;
use ratatui_core::layout::{Rect, Size};
use ratatui_core::style::Modifier;
use ratatui_core::widgets::StatefulWidget;
use ratatui_crossterm::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn release(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn render(state: &mut CardEntryState, area: Rect) -> Buffer {
    let mut buf = Buffer::empty(area);
    CardEntry::new().render(area, &mut buf, state);
    buf
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn test_partition() {
    assert!(CardEntryState::new().with_partition(12, 3, 2).is_ok());
    assert_eq!(
        CardEntryState::new().with_partition(10, 3, 1).err(),
        Some(CardError::UnevenPartition {
            max_length: 10,
            part_count: 3
        })
    );
}

#[test]
fn test_typing() {
    let mut state = CardEntryState::new().with_selection_fix(true);

    assert_eq!(
        handle_events(&mut state, true, &key(KeyCode::Char('1'))),
        TextOutcome::TextChanged
    );
    assert_eq!(
        handle_events(&mut state, true, &key(KeyCode::Char('a'))),
        TextOutcome::Unchanged
    );
    for c in "2345678".chars() {
        handle_events(&mut state, true, &key(KeyCode::Char(c)));
    }
    assert_eq!(state.numbers(), "12345678");
    assert_eq!(state.text(), "1234 5678");

    state.set_cursor(5, false);
    assert_eq!(
        handle_events(&mut state, true, &key(KeyCode::Backspace)),
        TextOutcome::Changed
    );
    assert_eq!(state.cursor(), 4);
    assert_eq!(
        handle_events(&mut state, true, &key(KeyCode::Backspace)),
        TextOutcome::TextChanged
    );
    assert_eq!(state.numbers(), "1235678");

    assert_eq!(
        handle_events(&mut state, true, &key(KeyCode::Home)),
        TextOutcome::Changed
    );
    assert_eq!(
        handle_events(&mut state, true, &key(KeyCode::Left)),
        TextOutcome::Unchanged
    );

    assert_eq!(
        handle_events(&mut state, true, &ctrl('d')),
        TextOutcome::TextChanged
    );
    assert!(state.is_empty());
}

#[test]
fn test_unfocused() {
    let mut state = CardEntryState::new();
    assert_eq!(
        handle_events(&mut state, false, &key(KeyCode::Char('1'))),
        TextOutcome::Continue
    );
    assert!(state.is_empty());
}

#[test]
fn test_readonly() {
    let mut state = CardEntryState::new();
    state.set_text("1234");
    assert_eq!(
        handle_readonly_events(&mut state, true, &key(KeyCode::Char('5'))),
        TextOutcome::Continue
    );
    assert_eq!(
        handle_readonly_events(&mut state, true, &key(KeyCode::Left)),
        TextOutcome::Changed
    );
    assert_eq!(state.numbers(), "1234");
}

#[test]
fn test_paste_event() {
    let count = Rc::new(Cell::new(0));
    let mut state = CardEntryState::new().with_selection_fix(true);
    let c = count.clone();
    state.on_pin_change(move |_, _| c.set(c.get() + 1));

    let r = handle_events(
        &mut state,
        true,
        &Event::Paste("4111-1111 1111x1111".to_string()),
    );
    assert_eq!(r, TextOutcome::TextChanged);
    assert_eq!(state.numbers(), "4111111111111111");
    assert!(state.is_complete());
    assert_eq!(count.get(), 1);
}

#[test]
fn test_clipboard() {
    let mut state = CardEntryState::new().with_selection_fix(true);
    state.set_text("12345678");
    state.set_selection(2, 7);

    assert_eq!(
        handle_events(&mut state, true, &ctrl('x')),
        TextOutcome::TextChanged
    );
    assert_eq!(state.numbers(), "1278");
    assert_eq!(
        handle_events(&mut state, true, &key(KeyCode::End)),
        TextOutcome::Changed
    );
    assert_eq!(
        handle_events(&mut state, true, &ctrl('v')),
        TextOutcome::TextChanged
    );
    assert_eq!(state.numbers(), "12783456");

    assert_eq!(
        handle_events(&mut state, true, &ctrl('a')),
        TextOutcome::Changed
    );
    assert_eq!(state.selected_text(), "12783456");
}

#[test]
fn test_render() {
    let mut state = CardEntryState::new();
    state.set_text("123456");
    let buf = render(&mut state, Rect::new(0, 0, 21, 2));

    assert_eq!(row(&buf, 0), "1234 56              ");
    assert_eq!(row(&buf, 1), "──── ──── ──── ────  ");
}

#[test]
fn test_render_animated_tail() {
    let mut state = CardEntryState::new().with_animation(true);
    state.set_text("1234");
    // appended 20ms ago: low alpha, still down at the line
    let Some(t0) = Instant::now().checked_sub(Duration::from_millis(20)) else {
        return;
    };
    state.insert_char('5');
    state.value.animation_mut().stop();
    state.value.animation_mut().start(t0);

    let buf = render(&mut state, Rect::new(0, 0, 21, 2));
    assert_eq!(row(&buf, 0), "1234                 ");
    assert_eq!(row(&buf, 1), "──── 5─── ──── ────  ");
    assert!(buf[(5u16, 1u16)].modifier.contains(Modifier::DIM));
    assert!(!buf[(0u16, 0u16)].modifier.contains(Modifier::DIM));

    // expired without tick(): drawn at rest
    let Some(t1) = Instant::now().checked_sub(Duration::from_millis(300)) else {
        return;
    };
    state.value.animation_mut().stop();
    state.value.animation_mut().start(t1);

    let buf = render(&mut state, Rect::new(0, 0, 21, 2));
    assert_eq!(row(&buf, 0), "1234 5               ");
    assert_eq!(row(&buf, 1), "──── ──── ──── ────  ");
    assert!(!buf[(5u16, 0u16)].modifier.contains(Modifier::DIM));
}

#[test]
fn test_render_no_line() {
    let mut state = CardEntryState::new().with_partition(8, 2, 2).unwrap();
    state.set_text("12345");

    let mut buf = Buffer::empty(Rect::new(0, 0, 10, 2));
    CardEntry::new()
        .has_line(false)
        .render(Rect::new(0, 0, 10, 2), &mut buf, &mut state);

    assert_eq!(row(&buf, 0), "1234  5   ");
    assert_eq!(row(&buf, 1), "          ");
}

#[test]
fn test_size() {
    let partition = PartitionSpec::default();
    assert_eq!(CardEntry::new().size(&partition), Size::new(19, 2));
    assert_eq!(
        CardEntry::new().has_line(false).size(&partition),
        Size::new(19, 1)
    );
}

#[test]
fn test_screen_cursor() {
    let mut state = CardEntryState::new().with_selection_fix(true);
    state.set_text("123456");
    render(&mut state, Rect::new(2, 3, 21, 2));

    assert_eq!(state.screen_cursor(), None);
    state.focus.set(true);
    assert_eq!(state.screen_cursor(), Some((9, 3)));

    state.set_cursor(4, false);
    assert_eq!(state.screen_cursor(), Some((6, 3)));
    state.set_cursor(5, false);
    assert_eq!(state.screen_cursor(), Some((7, 3)));

    state.set_text("1234");
    assert_eq!(state.screen_cursor(), Some((7, 3)));
}

#[test]
fn test_click() {
    let mut state = CardEntryState::new().with_selection_fix(true);
    state.set_text("123456");
    render(&mut state, Rect::new(0, 0, 21, 2));

    assert_eq!(
        handle_events(&mut state, true, &click(6, 0)),
        TextOutcome::Changed
    );
    assert_eq!(state.cursor(), 6);
    assert_eq!(
        handle_events(&mut state, true, &click(4, 0)),
        TextOutcome::Changed
    );
    assert_eq!(state.cursor(), 5);
    assert_eq!(
        handle_events(&mut state, true, &click(30, 0)),
        TextOutcome::Continue
    );
}

#[test]
fn test_doubleclick() {
    let mut state = CardEntryState::new().with_selection_fix(true);
    state.set_text("123456");
    render(&mut state, Rect::new(0, 0, 21, 2));

    handle_events(&mut state, true, &click(6, 0));
    handle_events(&mut state, true, &release(6, 0));
    handle_events(&mut state, true, &click(6, 0));
    assert_eq!(
        handle_events(&mut state, true, &release(6, 0)),
        TextOutcome::Changed
    );
    assert_eq!(state.selection(), 5..7);
    assert_eq!(state.selected_text(), "56");
}
