//! Integration tests for grid placement and the block edit actions.

mod fixtures;
use fixtures::*;

use quiltkit::models::{Block, FlipAxis, GeeseDirection, GridPosition, Span, UnitKind, UnitType};
use quiltkit::placement::{
    check_first_tap, complete_two_tap, validate_unit_placement, PlacementRejection,
};

#[test]
fn test_anchor_with_two_blocked_neighbors_offers_the_other_two() {
    let reg = registry();
    let mut block = Block::new(3);
    let top = unit(&reg, "top", UnitType::Square, 0, 1, None);
    place_valid(&reg, &mut block, top);
    let left = unit(&reg, "left", UnitType::Square, 1, 0, None);
    place_valid(&reg, &mut block, left);

    let geese = reg.get(UnitType::FlyingGeese).unwrap();
    let check = check_first_tap(geese, GridPosition::new(1, 1), 3, &block.occupancy());

    assert!(check.valid);
    assert_eq!(
        check.valid_adjacent_cells,
        Some(vec![GridPosition::new(2, 1), GridPosition::new(1, 2)])
    );
}

#[test]
fn test_boxed_in_anchor_is_rejected() {
    let reg = registry();
    let mut block = Block::new(2);
    let a = unit(&reg, "a", UnitType::Square, 0, 1, None);
    place_valid(&reg, &mut block, a);
    let b = unit(&reg, "b", UnitType::Square, 1, 0, None);
    place_valid(&reg, &mut block, b);

    let geese = reg.get(UnitType::FlyingGeese).unwrap();
    let check = check_first_tap(geese, GridPosition::new(0, 0), 2, &block.occupancy());
    assert!(!check.valid);
    assert!(matches!(
        check.reason,
        Some(PlacementRejection::NoAdjacentCell { .. })
    ));
}

#[test]
fn test_two_tap_completion_places_geese() {
    let reg = registry();
    let mut block = Block::new(4);

    let placement = complete_two_tap(
        GridPosition::new(2, 2),
        GridPosition::new(2, 1),
        4,
        &block.occupancy(),
    )
    .expect("adjacent free cell should complete the placement");
    assert_eq!(placement.direction, GeeseDirection::Left);
    assert_eq!(placement.position, GridPosition::new(2, 1));
    assert_eq!(placement.span, Span::new(1, 2));

    let config = quiltkit::models::UnitConfig::new().with_variant(placement.direction.as_str());
    let geese = reg
        .get(UnitType::FlyingGeese)
        .unwrap()
        .instantiate_with_id("g", placement.position, &config)
        .unwrap();
    assert_eq!(geese.kind, placement.kind());
    place_valid(&reg, &mut block, geese);
    assert_eq!(block.occupancy().len(), 2);
}

#[test]
fn test_two_tap_rejects_diagonal_second_tap() {
    let block = Block::new(4);
    let err = complete_two_tap(
        GridPosition::new(1, 1),
        GridPosition::new(2, 2),
        4,
        &block.occupancy(),
    )
    .unwrap_err();
    assert!(matches!(err, PlacementRejection::NotAdjacent { .. }));
}

#[test]
fn test_overlap_names_the_blocking_unit() {
    let reg = registry();
    let block = sample_block(&reg);

    let candidate = unit(&reg, "new", UnitType::Hst, 1, 2, None);
    let check = validate_unit_placement(&reg, &block.units, block.grid_size, &candidate, None);
    assert!(!check.valid);
    match check.reason {
        Some(PlacementRejection::Overlap { cell, unit_id }) => {
            assert_eq!(cell, GridPosition::new(1, 2));
            assert_eq!(unit_id.as_deref(), Some("geese-1"));
        }
        other => panic!("expected overlap, got {other:?}"),
    }
}

#[test]
fn test_rotation_blocked_by_neighbor_leaves_block_unchanged() {
    let reg = registry();
    let mut block = Block::new(4);
    // vertical geese at (0,0)-(1,0), square to its right at (0,1)
    let g = unit(&reg, "g", UnitType::FlyingGeese, 0, 0, Some("up"));
    place_valid(&reg, &mut block, g);
    let s = unit(&reg, "s", UnitType::Square, 0, 1, None);
    place_valid(&reg, &mut block, s);
    let before = block.clone();

    // up → right needs (0,0)-(0,1)
    let check = block.rotate_unit(&reg, "g").unwrap();
    assert!(!check.valid);
    assert_eq!(block, before);

    block.remove_unit("s").unwrap();
    let check = block.rotate_unit(&reg, "g").unwrap();
    assert!(check.valid);
    let geese = block.unit("g").unwrap();
    assert_eq!(
        geese.kind,
        UnitKind::FlyingGeese {
            direction: GeeseDirection::Right
        }
    );
    assert_eq!(geese.span, Span::new(1, 2));
}

#[test]
fn test_rotating_near_the_edge_goes_out_of_bounds() {
    let reg = registry();
    let mut block = Block::new(3);
    let g = unit(&reg, "g", UnitType::FlyingGeese, 1, 2, Some("down"));
    place_valid(&reg, &mut block, g);

    let check = block.rotate_unit(&reg, "g").unwrap();
    assert!(matches!(check.reason, Some(PlacementRejection::OutOfBounds { .. })));
}

#[test]
fn test_editor_session() {
    let reg = registry();
    let mut block = Block::new(4);

    let h = unit(&reg, "h", UnitType::Hst, 0, 0, Some("nw"));
    place_valid(&reg, &mut block, h);
    let q = unit(&reg, "q", UnitType::Qst, 0, 1, None);
    place_valid(&reg, &mut block, q);

    assert!(block.flip_unit(&reg, "h", FlipAxis::Horizontal).unwrap().valid);
    assert_eq!(block.unit("h").unwrap().kind.variant_id(), Some("ne"));

    block.recolor_patch(&reg, "q", "top", "accent1").unwrap();
    assert!(block.rotate_unit(&reg, "q").unwrap().valid);
    // top moves to the right patch
    assert_eq!(block.unit("q").unwrap().role_for("right"), Some("accent1"));

    assert!(block.recolor_patch(&reg, "q", "middle", "feature").is_err());
    assert!(block.rotate_unit(&reg, "missing").is_err());

    assert!(block.remove_unit("h").is_some());
    assert_eq!(block.units.len(), 1);
    assert!(!block.occupancy().is_occupied(GridPosition::new(0, 0)));
}
