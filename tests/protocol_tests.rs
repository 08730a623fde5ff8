use battleships::protocol::decode_shot;
use battleships::{
    Board, Coord, EngineEvent, Glyph, Orientation, PlacementError, ProtocolError, Setup,
    SetupError, ShipPlacement, ShotResult,
};
use serde_json::{json, Value};

#[test]
fn test_status_event_shape() {
    let line = EngineEvent::Status {
        status: ShotResult::Sunk,
    }
    .encode()
    .unwrap();
    assert!(!line.contains('\n'));
    let value: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value, json!({"event": "status", "status": "sunk"}));
}

#[test]
fn test_shoot_event_shape() {
    let mut own = Board::new(2);
    own.place_ship(1, Coord::new(0, 0), Orientation::Right).unwrap();
    let mut opponent = Board::new(2);
    opponent.place_ship(1, Coord::new(1, 1), Orientation::Down).unwrap();
    opponent.shoot(0, 1);

    let event = EngineEvent::Shoot {
        own_board: own.public_view(),
        opponent_board: opponent.public_view(),
    };
    let value: Value = serde_json::from_str(&event.encode().unwrap()).unwrap();
    assert_eq!(value["event"], "shoot");
    assert_eq!(value["own_board"]["board"], json!([[" ", " "], [" ", " "]]));
    assert_eq!(value["opponent_board"]["board"], json!([[" ", " "], [".", " "]]));
    assert_eq!(
        value["opponent_board"]["remaining_ships"],
        json!({"1": 1, "2": 0, "3": 0, "4": 0, "5": 0})
    );

    assert_eq!(EngineEvent::decode(&event.encode().unwrap()).unwrap(), event);
}

#[test]
fn test_decode_shoot_line_from_an_agent_peer() {
    let line = r#"{"event":"shoot",
        "own_board":{"board":[[" ","x"],[" "," "]],"remaining_ships":{"1":1,"2":1,"3":0,"4":0,"5":0}},
        "opponent_board":{"board":[["."," "],[" ","-"]],"remaining_ships":{"1":0,"2":0,"3":0,"4":0,"5":0}}}"#
        .replace('\n', "");
    match EngineEvent::decode(&line).unwrap() {
        EngineEvent::Shoot {
            own_board,
            opponent_board,
        } => {
            assert_eq!(own_board.board[0][1], Glyph::Hit);
            assert_eq!(own_board.remaining(2), 1);
            assert_eq!(opponent_board.board[1][1], Glyph::Sunk);
            assert_eq!(opponent_board.first_blank(), Some(Coord::new(1, 0)));
        }
        other => panic!("expected a shoot event, got {:?}", other),
    }

    let bad_length = r#"{"board":[[" "]],"remaining_ships":{"one":1}}"#;
    assert!(serde_json::from_str::<battleships::PublicBoard>(bad_length).is_err());
}

#[test]
fn test_decode_rejects_unknown_and_missing_events() {
    assert!(matches!(
        EngineEvent::decode(r#"{"event": "resign"}"#),
        Err(ProtocolError::UnknownEvent(name)) if name == "resign"
    ));
    assert!(matches!(
        EngineEvent::decode(r#"{"status": "hit"}"#),
        Err(ProtocolError::MissingEvent { .. })
    ));
    assert!(matches!(
        EngineEvent::decode("not json"),
        Err(ProtocolError::InvalidJson { .. })
    ));
    assert!(matches!(
        EngineEvent::decode(r#"{"event": "status", "status": "graze"}"#),
        Err(ProtocolError::InvalidJson { .. })
    ));
}

#[test]
fn test_setup_line_places_fleet() {
    let setup = Setup::decode(r#"{"name":"Bot","ships":[{"size":1,"x":"A","y":0,"dir":"r"}]}"#)
        .unwrap();
    assert_eq!(setup.name, "Bot");
    assert_eq!(
        setup.ships,
        vec![ShipPlacement {
            size: 1,
            x: "A".to_string(),
            y: 0,
            dir: Orientation::Right,
        }]
    );

    let mut board = Board::new(10);
    setup.apply_to(&mut board).unwrap();
    assert_eq!(board.ships().len(), 1);
    assert_eq!(board.ships()[0].length(), 1);
    assert_eq!(board.ships()[0].cells(), &[Coord::new(0, 0)]);

    let view = board.public_view();
    assert_eq!(view.board[0][0], Glyph::Blank);
    assert_eq!(view.remaining(1), 1);
}

#[test]
fn test_setup_accepts_lowercase_columns_and_down() {
    let setup = Setup::decode(r#"{"name":"b","ships":[{"size":3,"x":"c","y":2,"dir":"d"}]}"#)
        .unwrap();
    let mut board = Board::new(10);
    setup.apply_to(&mut board).unwrap();
    assert_eq!(
        board.ships()[0].cells(),
        &[Coord::new(2, 2), Coord::new(2, 3), Coord::new(2, 4)]
    );
}

#[test]
fn test_setup_rejects_bad_direction() {
    assert!(matches!(
        Setup::decode(r#"{"name":"b","ships":[{"size":3,"x":"c","y":2,"dir":"up"}]}"#),
        Err(ProtocolError::InvalidJson { .. })
    ));
    assert!(matches!(
        Setup::decode(r#"{"name":"b"}"#),
        Err(ProtocolError::InvalidJson { .. })
    ));
}

#[test]
fn test_apply_to_reports_bad_fleets() {
    let ship = |size, x: &str, y, dir| ShipPlacement {
        size,
        x: x.to_string(),
        y,
        dir,
    };

    let empty = Setup {
        name: "empty".to_string(),
        ships: vec![],
    };
    assert!(matches!(
        empty.apply_to(&mut Board::new(10)),
        Err(SetupError::EmptyFleet)
    ));

    let bad_column = Setup {
        name: "bad".to_string(),
        ships: vec![ship(2, "AA", 0, Orientation::Right)],
    };
    assert!(matches!(
        bad_column.apply_to(&mut Board::new(10)),
        Err(SetupError::BadColumn { column, .. }) if column == "AA"
    ));

    let overlapping = Setup {
        name: "overlap".to_string(),
        ships: vec![
            ship(3, "A", 1, Orientation::Right),
            ship(3, "B", 0, Orientation::Down),
        ],
    };
    let mut board = Board::new(10);
    match overlapping.apply_to(&mut board) {
        Err(SetupError::Placement { source, .. }) => assert_eq!(
            source,
            PlacementError::Overlap {
                at: Coord::new(1, 1),
                occupant: battleships::ShipId(0),
            }
        ),
        other => panic!("expected overlap, got {:?}", other),
    }

    let off_board = Setup {
        name: "off".to_string(),
        ships: vec![ship(4, "H", 0, Orientation::Right)],
    };
    assert!(matches!(
        off_board.apply_to(&mut Board::new(10)),
        Err(SetupError::Placement {
            source: PlacementError::OutOfBounds { .. },
            ..
        })
    ));
}

#[test]
fn test_setup_from_board_round_trips() {
    let mut board = Board::new(10);
    board.place_ship(5, Coord::new(4, 2), Orientation::Down).unwrap();
    board.place_ship(2, Coord::new(0, 9), Orientation::Right).unwrap();
    let setup = Setup::from_board("copy", &board);
    assert_eq!(setup.ships[0].x, "E");
    assert_eq!(setup.ships[1].dir, Orientation::Right);

    let mut rebuilt = Board::new(10);
    setup.apply_to(&mut rebuilt).unwrap();
    assert_eq!(rebuilt, board);
}

#[tokio::test]
async fn test_setup_load_reports_file_errors() {
    let dir = std::env::temp_dir().join(format!("battleships-setup-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let missing = dir.join("missing.json");
    assert!(matches!(
        Setup::load(&missing).await,
        Err(SetupError::Io { path, .. }) if path == missing
    ));

    let garbled = dir.join("garbled.json");
    std::fs::write(&garbled, "{ships").unwrap();
    assert!(matches!(
        Setup::load(&garbled).await,
        Err(SetupError::Json { .. })
    ));

    let good = dir.join("good.json");
    std::fs::write(
        &good,
        r#"{"name": "File", "ships": [{"size": 2, "x": "J", "y": 8, "dir": "d"}]}"#,
    )
    .unwrap();
    let setup = Setup::load(&good).await.unwrap();
    assert_eq!(setup.name, "File");
    assert_eq!(setup.ships[0].x, "J");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_decode_shot() {
    assert_eq!(decode_shot("D 3").unwrap(), Coord::new(3, 3));
    assert!(matches!(
        decode_shot("A x"),
        Err(ProtocolError::MalformedShot { line, .. }) if line == "A x"
    ));
    assert!(matches!(
        decode_shot(r#"{"x": "A", "y": 1}"#),
        Err(ProtocolError::MalformedShot { .. })
    ));
}

#[test]
fn test_glyph_strings() {
    for (glyph, text) in [
        (Glyph::Blank, "\" \""),
        (Glyph::Miss, "\".\""),
        (Glyph::Hit, "\"x\""),
        (Glyph::Sunk, "\"-\""),
        (Glyph::Ship('c'), "\"c\""),
    ] {
        assert_eq!(serde_json::to_string(&glyph).unwrap(), text);
        assert_eq!(serde_json::from_str::<Glyph>(text).unwrap(), glyph);
    }
    assert!(serde_json::from_str::<Glyph>("\"?\"").is_err());
    assert!(serde_json::from_str::<Glyph>("\"xx\"").is_err());
}
