use rat_cardentry::PartitionSpec;
use rat_cardentry::format::DisplayFormatter;
use rat_cardentry::selection::{display_selection, fix_cursor, fix_selection, raw_selection};

#[test]
fn test_fix() {
    assert_eq!(fix_selection(5, 5, "1234 5678"), (5, 5));
    assert_eq!(fix_selection(4, 4, "1234 5678"), (4, 4));
    assert_eq!(fix_selection(4, 6, "1234 5678"), (4, 6));
    assert_eq!(fix_selection(2, 20, "1234 5678"), (2, 9));

    assert_eq!(fix_selection(5, 5, "1234  5678"), (4, 4));
    assert_eq!(fix_selection(1, 5, "1234  5678"), (1, 4));
    assert_eq!(fix_cursor(5, "1234  5678"), 4);
    assert_eq!(fix_cursor(0, ""), 0);
}

#[test]
fn test_idempotent() {
    for display in ["", "1234", "1234 5678 9", "1234  5678  90"] {
        for start in 0..=display.len() + 1 {
            for end in 0..=display.len() + 1 {
                let (s, e) = fix_selection(start, end, display);
                assert_eq!(fix_selection(s, e, display), (s, e));
                assert!(s <= display.len());
                assert!(e <= display.len());
            }
        }
    }
}

#[test]
fn test_never_inside_separator() {
    let display = "1234  5678  90";
    for pos in 0..=display.len() {
        let c = fix_cursor(pos, display);
        let inside = c > 0
            && display.as_bytes()[c - 1] == b' '
            && display.as_bytes().get(c) == Some(&b' ');
        assert!(!inside, "{}", pos);
    }
}

#[test]
fn test_raw_selection() {
    let fmt = DisplayFormatter::new(PartitionSpec::default());
    assert_eq!(raw_selection(2..7, "1234 5678", &fmt), 2..6);
    assert_eq!(raw_selection(0..9, "1234 5678", &fmt), 0..8);
    assert_eq!(raw_selection(4..5, "1234 5678", &fmt), 4..4);
    assert_eq!(display_selection(2..6, 8, &fmt), 2..7);
}
