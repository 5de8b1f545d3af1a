use battleship_server::{BitBoard, BitBoardError, Cell};

#[test]
fn test_insert_and_contains() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert_eq!(bb.count(), 0);

    assert!(bb.insert(Cell::new(1, 1)).unwrap());
    assert!(bb.contains(Cell::new(1, 1)).unwrap());
    assert!(!bb.contains(Cell::new(1, 2)).unwrap());
    // second insert reports the cell as already present
    assert!(!bb.insert(Cell::new(1, 1)).unwrap());

    bb.insert(Cell::new(3, 2)).unwrap();
    assert_eq!(bb.count(), 2);
}

#[test]
fn test_off_grid_cells_rejected() {
    let mut bb = BitBoard::<u128, 10>::new();
    assert_eq!(
        bb.insert(Cell::new(10, 0)).unwrap_err(),
        BitBoardError::OutOfGrid {
            cell: Cell::new(10, 0),
            size: 10
        }
    );
    assert!(bb.contains(Cell::new(0, 10)).is_err());
    assert_eq!(bb.count(), 0);
}

#[test]
fn test_full_grid_fits_in_u128() {
    let mut bb = BitBoard::<u128, 10>::new();
    for y in 0..10 {
        for x in 0..10 {
            assert!(bb.insert(Cell::new(x, y)).unwrap());
        }
    }
    assert_eq!(bb.count(), 100);
    assert!(bb.contains(Cell::new(9, 9)).unwrap());
}

#[test]
fn test_small_word_small_grid() {
    // 3x3 grid uses nine of sixteen bits
    let mut bb = BitBoard::<u16, 3>::new();
    bb.insert(Cell::new(2, 2)).unwrap();
    assert!(bb.insert(Cell::new(3, 0)).is_err());
    assert_eq!(bb.count(), 1);
}
