use wumpus_core::{Bounds, CaveMut, CaveView, Cell, Content, Direction, World, WorldError};

#[test]
fn neighbors_stay_in_bounds_and_keep_fixed_order() {
    let bounds = Bounds::new(4, 4);

    let corner: Vec<Cell> = bounds.neighbors(Cell::new(1, 1)).collect();
    assert_eq!(corner, vec![Cell::new(2, 1), Cell::new(1, 2)]);

    let middle: Vec<Cell> = bounds.neighbors(Cell::new(2, 2)).collect();
    assert_eq!(
        middle,
        vec![
            Cell::new(3, 2),
            Cell::new(1, 2),
            Cell::new(2, 3),
            Cell::new(2, 1)
        ]
    );
}

#[test]
fn cells_scan_every_coordinate_once() {
    let bounds = Bounds::new(3, 2);
    let cells: Vec<Cell> = bounds.cells().collect();
    assert_eq!(cells.len(), bounds.len());
    assert_eq!(cells.first().copied(), Some(Cell::new(1, 1)));
    assert_eq!(cells.last().copied(), Some(Cell::new(3, 2)));

    for (i, cell) in cells.iter().enumerate() {
        let idx = bounds.index(*cell).expect("in bounds");
        assert_eq!(bounds.cell_at(idx), *cell, "slot {i}");
    }
    assert_eq!(bounds.index(Cell::new(0, 1)), None);
}

#[test]
fn direction_to_matches_step() {
    let from = Cell::new(2, 2);
    for direction in Direction::ALL {
        assert_eq!(from.direction_to(from.step(direction)), Some(direction));
    }
    assert_eq!(from.direction_to(Cell::new(3, 3)), None);
}

#[test]
fn build_rejects_out_of_bounds_goal() {
    let err = World::builder(2, 2)
        .start(Cell::new(1, 1))
        .goal(Cell::new(3, 1))
        .build()
        .unwrap_err();
    assert_eq!(err, WorldError::GoalOutOfBounds(Cell::new(3, 1)));
}

#[test]
fn build_rejects_missing_start_and_empty_grid() {
    let err = World::builder(2, 2).goal(Cell::new(2, 2)).build().unwrap_err();
    assert_eq!(err, WorldError::MissingStart);

    let err = World::builder(0, 3)
        .start(Cell::new(1, 1))
        .goal(Cell::new(1, 1))
        .build()
        .unwrap_err();
    assert!(matches!(err, WorldError::Empty { .. }));
}

#[test]
fn derived_percepts_surround_hazards() {
    let world = World::builder(3, 3)
        .start(Cell::new(1, 1))
        .goal(Cell::new(3, 3))
        .pit(Cell::new(2, 2))
        .wumpus(Cell::new(3, 1))
        .derive_percepts(true)
        .build()
        .expect("valid world");

    assert!(world.content_at(Cell::new(2, 1)).contains(Content::Breeze));
    assert!(world.content_at(Cell::new(2, 1)).contains(Content::Stench));
    assert!(world.content_at(Cell::new(1, 2)).contains(Content::Breeze));
    assert!(!world.content_at(Cell::new(1, 1)).contains(Content::Breeze));
    assert!(world.content_at(Cell::new(2, 2)).contains(Content::Pit));
    assert!(world.content_at(Cell::new(1, 1)).is_empty());
}

#[test]
fn agent_position_is_owned_by_world_and_resettable() {
    let mut world = World::builder(2, 2)
        .start(Cell::new(1, 1))
        .goal(Cell::new(2, 2))
        .build()
        .expect("valid world");

    assert_eq!(world.agent_position(), Cell::new(1, 1));
    world.set_agent_position(Cell::new(2, 1));
    assert_eq!(world.agent_position(), Cell::new(2, 1));
    world.reset();
    assert_eq!(world.agent_position(), world.start());
}
