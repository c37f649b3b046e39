use store_graph_core::{
    Item, ItemType, Position,
    store::{Cell, CellMarker, Store, load_store_from_string},
};

fn open_store(height: usize, width: usize, items: Vec<Item>) -> Store {
    Store::new(vec![vec![Cell::Aisle; width]; height], items).unwrap()
}

#[test]
fn zero_rows_build_an_empty_graph() {
    let store: Store = Store::new(Vec::new(), Vec::new()).unwrap();
    let graph = store.graph();
    assert!(graph.adj_list().is_empty());
    assert!(graph.graphed_store().is_none());

    let empty_first_row: Store = Store::new(vec![Vec::new()], Vec::new()).unwrap();
    assert!(empty_first_row.graph().is_empty());
}

#[test]
fn open_grid_edge_counts_match_in_bounds_neighbors() {
    let (height, width) = (4, 5);
    let store = open_store(height, width, vec![]);
    let graph = store.graph();
    assert_eq!(graph.adj_list().len(), height * width);

    for row in 0..height {
        for column in 0..width {
            let vertex = graph.vertex_at(Position::new(row, column)).unwrap();
            let on_row_edge = row == 0 || row == height - 1;
            let on_column_edge = column == 0 || column == width - 1;
            let expected = match (on_row_edge, on_column_edge) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            assert_eq!(
                vertex.neighbors.len(),
                expected,
                "edge count at ({row}, {column})"
            );
        }
    }
}

#[test]
fn wall_slots_are_never_edge_destinations() {
    let store = load_store_from_string(
        "
        EN AS WL AS
        AS WL AS SH
        WL AS AS CK
        ",
        vec![],
    )
    .unwrap();
    let graph = store.graph();
    let path = store.path();

    for (position, cell) in path.enumerate() {
        let index = path.slot_index(position).unwrap();
        let is_wall = cell.item_type() == ItemType::Wall;
        assert_eq!(graph.vertex(index).is_none(), is_wall);
    }
    for vertex in graph.adj_list().iter().flatten() {
        for edge in &vertex.neighbors {
            let destination = path.position_of(edge.vertex).unwrap();
            assert_ne!(path[destination], Cell::Wall);
        }
    }
}

#[test]
fn edge_weights_are_item_manhattan_distances() {
    let items = vec![
        Item::new(1, ItemType::Entrance, Position::new(0, 0)),
        Item::new(2, ItemType::Shelf, Position::new(1, 2)),
        Item::new(3, ItemType::Checkout, Position::new(2, 1)),
    ];
    let store = open_store(3, 3, items);
    let graph = store.graph();

    for vertex in graph.adj_list().iter().flatten() {
        for edge in &vertex.neighbors {
            let destination = graph.vertex(edge.vertex).unwrap();
            assert_eq!(
                edge.distance,
                vertex
                    .item
                    .position()
                    .manhattan_distance(&destination.item.position())
            );
        }
    }
}

#[test]
fn every_item_on_an_open_cell_is_matched_once() {
    let items = vec![
        Item::new(10, ItemType::Entrance, Position::new(0, 0)),
        Item::new(11, ItemType::Shelf, Position::new(0, 2)),
        Item::new(12, ItemType::Shelf, Position::new(1, 1)),
        Item::new(13, ItemType::Checkout, Position::new(2, 3)),
        // Off the grid.
        Item::new(14, ItemType::Checkout, Position::new(7, 0)),
    ];
    let store = load_store_from_string(
        "
        EN AS SH AS
        AS WL AS AS
        AS AS AS CK
        ",
        items,
    )
    .unwrap();
    let graph = store.graph();

    // 12 sits on a wall and 14 is off the grid.
    assert_eq!(
        graph.items().keys().copied().collect::<Vec<_>>(),
        vec![10, 11, 13]
    );
    for (id, item) in graph.items() {
        let matched: Vec<_> = graph
            .adj_list()
            .iter()
            .flatten()
            .filter(|vertex| vertex.item.id == Some(*id))
            .collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(&matched[0].item, item);
        assert_eq!(graph.vertex_at(item.position()), Some(matched[0]));
    }
}

#[test]
fn building_twice_gives_the_same_graph() {
    let items = vec![
        Item::new(1, ItemType::Shelf, Position::new(0, 1)),
        Item::new(2, ItemType::Checkout, Position::new(1, 1)),
    ];
    let store = load_store_from_string("AS SH\nWL CK", items).unwrap();
    let before = store.clone();

    let first = store.graph();
    let second = store.graph();
    assert_eq!(first.adj_list().len(), second.adj_list().len());
    assert_eq!(first.items(), second.items());
    assert_eq!(first.adj_list(), second.adj_list());
    assert_eq!(store, before);
}

#[test]
fn two_by_two_scenario() {
    let items = vec![
        Item::new(1, ItemType::Shelf, Position::new(0, 0)),
        Item::new(2, ItemType::Checkout, Position::new(1, 1)),
    ];
    let store = open_store(2, 2, items);
    let graph = store.graph();
    assert_eq!(graph.adj_list().len(), 4);

    let origin = graph.vertex(0).unwrap();
    assert_eq!(origin.item.id, Some(1));
    let mut edges: Vec<_> = origin
        .neighbors
        .iter()
        .map(|edge| (edge.vertex, edge.distance))
        .collect();
    edges.sort_unstable();
    // (0, 1) is slot 1 and (1, 0) is slot 2.
    assert_eq!(edges, vec![(1, 1), (2, 1)]);
    assert_eq!(graph.vertex(3).unwrap().item.id, Some(2));
}

#[test]
fn one_by_three_with_a_wall_in_the_middle() {
    let store = load_store_from_string("AS WL AS", vec![]).unwrap();
    let graph = store.graph();
    assert_eq!(graph.adj_list().len(), 3);
    assert!(graph.vertex(0).unwrap().neighbors.is_empty());
    assert!(graph.vertex(1).is_none());
    assert!(graph.vertex(2).unwrap().neighbors.is_empty());
}

#[test]
fn json_store_round_trip_into_graph_document() {
    let store = Store::from_json(
        r#"{
            "path": [["EN", "AS"], ["WL", "CK"]],
            "items": [
                {"id": 1, "type": "Entrance", "row": 0, "column": 0},
                {"id": 2, "type": "Checkout", "row": 1, "column": 1}
            ]
        }"#,
    )
    .unwrap();
    let mut graph = store.graph();
    graph.set_start(Position::new(0, 0)).unwrap();
    graph.set_end(Position::new(1, 1)).unwrap();

    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["start"], 0);
    assert_eq!(json["end"], 3);
    assert_eq!(json["items"]["2"]["type"], "Checkout");
    assert!(json["adjList"][2].is_null());
    assert_eq!(json["adjList"][1]["neighbors"].as_array().unwrap().len(), 2);
}
