use rat_cardentry::PartitionSpec;
use rat_cardentry::format::DisplayFormatter;

fn digits(n: usize) -> String {
    (0..n).map(|i| char::from(b'0' + (i % 10) as u8)).collect()
}

#[test]
fn test_round_trip() {
    for partition in [
        PartitionSpec::default(),
        PartitionSpec::new(12, 3, 2).unwrap(),
        PartitionSpec::new(6, 1, 1).unwrap(),
    ] {
        let fmt = DisplayFormatter::new(partition);
        for n in 0..=partition.max_length() {
            let raw = digits(n);
            let display = fmt.format(&raw);
            assert_eq!(fmt.unformat(&display), raw);
            assert_eq!(display.len(), partition.display_len(n));
            assert!(!display.ends_with(' '));
            assert!(!display.starts_with(' '));
        }
    }
}

#[test]
fn test_index_mapping() {
    let partition = PartitionSpec::new(12, 3, 2).unwrap();
    let fmt = DisplayFormatter::new(partition);
    for n in 0..=12 {
        let raw = digits(n);
        let display = fmt.format(&raw);
        for i in 0..=n {
            let j = fmt.raw_to_display(i, n);
            assert!(j <= display.len());
            assert_eq!(fmt.display_to_raw(j, &display), i);
        }
    }
}

#[test]
fn test_mapping_default() {
    let fmt = DisplayFormatter::new(PartitionSpec::default());
    let display = fmt.format("1234567890");
    assert_eq!(display, "1234 5678 90");

    assert_eq!(fmt.raw_to_display(0, 10), 0);
    assert_eq!(fmt.raw_to_display(3, 10), 3);
    assert_eq!(fmt.raw_to_display(4, 10), 5);
    assert_eq!(fmt.raw_to_display(8, 10), 10);
    assert_eq!(fmt.raw_to_display(10, 10), 12);
    // no separator at the end
    assert_eq!(fmt.raw_to_display(4, 4), 4);

    assert_eq!(fmt.display_to_raw(4, &display), 4);
    assert_eq!(fmt.display_to_raw(5, &display), 4);
    assert_eq!(fmt.display_to_raw(12, &display), 10);

    assert!(fmt.is_separator(4, &display));
    assert!(!fmt.is_separator(5, &display));
    assert!(!fmt.is_separator(12, &display));
}

#[test]
fn test_unformat() {
    let fmt = DisplayFormatter::new(PartitionSpec::default());
    assert_eq!(fmt.unformat("4111-1111 1111x1111"), "4111111111111111");
    assert_eq!(fmt.unformat(" 1 2 "), "12");
    assert_eq!(fmt.reformat("12 345"), "1234 5");
}
