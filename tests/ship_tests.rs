use battleship_server::{Cell, Orientation, Ship, ShipKind, BOARD_SIZE};

#[test]
fn test_horizontal_cells_follow_x() {
    let ship = Ship::of_kind(ShipKind::Large, Cell::new(2, 5), Orientation::Horizontal);
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(cells, vec![Cell::new(2, 5), Cell::new(3, 5), Cell::new(4, 5)]);
}

#[test]
fn test_vertical_cells_follow_y() {
    let ship = Ship::of_kind(ShipKind::Huge, Cell::new(0, 0), Orientation::Vertical);
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(
        cells,
        vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2), Cell::new(0, 3)]
    );
}

#[test]
fn test_fits_at_edges() {
    let last = BOARD_SIZE - 1;
    assert!(Ship::of_kind(ShipKind::Small, Cell::new(last, last), Orientation::Vertical).fits());
    assert!(Ship::of_kind(ShipKind::Huge, Cell::new(6, 0), Orientation::Horizontal).fits());
    assert!(!Ship::of_kind(ShipKind::Huge, Cell::new(7, 0), Orientation::Horizontal).fits());
    assert!(!Ship::of_kind(ShipKind::Medium, Cell::new(0, last), Orientation::Vertical).fits());
}

#[test]
fn test_nominal_lengths() {
    assert_eq!(ShipKind::Small.nominal_length(), 1);
    assert_eq!(ShipKind::Medium.nominal_length(), 2);
    assert_eq!(ShipKind::Large.nominal_length(), 3);
    assert_eq!(ShipKind::Huge.nominal_length(), 4);
}

#[test]
fn test_cell_bounds() {
    assert!(Cell::new(0, 0).in_bounds());
    assert!(Cell::new(9, 9).in_bounds());
    assert!(!Cell::new(10, 0).in_bounds());
    assert!(!Cell::new(0, 10).in_bounds());
    assert_eq!(Cell::new(3, 4).to_string(), "(3, 4)");
}
