use snake_engine::game::{Direction, Engine, EngineConfig, GameOverReason, Position};

fn seeded(width: usize, height: usize) -> Engine {
    Engine::with_config(EngineConfig::new(width, height).with_seed(2021)).unwrap()
}

/// Park the head of a fresh 10x10 game on (9, 4) heading right
fn head_at_right_edge(engine: &mut Engine) {
    engine.clear_food();
    engine.set_direction(Direction::Up);
    engine.update();
    engine.set_direction(Direction::Right);
    for _ in 0..4 {
        engine.update();
    }
    assert_eq!(engine.head(), Position::new(9, 4));
    assert!(!engine.is_game_over());
}

/// Feed the snake `times` items, one directly in front of it each step
fn grow_by(engine: &mut Engine, times: usize) {
    for _ in 0..times {
        engine.clear_food();
        let ahead = engine.head().moved_in_direction(engine.direction());
        engine.place_food(ahead).unwrap();
        assert!(engine.update().ate_food);
    }
    engine.clear_food();
}

/// Six segments along y = 10, then down, right and up back into the body
fn loop_back_into_body(engine: &mut Engine) -> Option<GameOverReason> {
    grow_by(engine, 5);
    assert_eq!(
        engine.segments(),
        (0..6).map(|x| Position::new(x, 10)).collect::<Vec<_>>()
    );

    engine.set_direction(Direction::Down);
    engine.update();
    engine.set_direction(Direction::Right);
    engine.update();
    engine.set_direction(Direction::Up);
    engine.update().collision
}

#[test]
fn reset_puts_single_segment_in_center() {
    for (width, height) in [(1, 1), (2, 3), (5, 5), (10, 10), (31, 17)] {
        let mut engine = seeded(width, height);
        engine.update();
        engine.reset();

        assert_eq!(
            engine.segments(),
            vec![Position::new((width / 2) as i32, (height / 2) as i32)]
        );
        assert_eq!(engine.score(), 0);
        assert!(!engine.is_game_over());
        assert_eq!(engine.game_over_reason(), GameOverReason::None);
    }
}

#[test]
fn five_by_five_first_step() {
    let mut engine = seeded(5, 5);
    engine.clear_food();
    assert_eq!(engine.head(), Position::new(2, 2));

    engine.update();

    assert_eq!(engine.segments(), vec![Position::new(1, 2)]);
}

#[test]
fn reversal_is_rejected() {
    let mut engine = seeded(10, 10);
    engine.set_direction(Direction::Right);
    assert_eq!(engine.direction(), Direction::Left);
}

#[test]
fn eating_grows_by_one_and_replaces_food() {
    let mut engine = seeded(10, 10);
    engine.clear_food();
    engine.place_food(Position::new(4, 5)).unwrap();
    engine.place_food(Position::new(0, 0)).unwrap();

    let info = engine.update();

    assert!(info.ate_food);
    assert_eq!(engine.score(), 1);
    assert_eq!(
        engine.segments(),
        vec![Position::new(3, 5), Position::new(4, 5)]
    );

    let food = engine.food();
    assert_eq!(food.len(), 2);
    assert!(food.contains(&Position::new(0, 0)));
    assert!(!food.contains(&Position::new(4, 5)));
    for cell in &food {
        assert!(!engine.segments().contains(cell));
    }
}

#[test]
fn loops_at_right_edge() {
    let mut engine = seeded(10, 10);
    engine.set_loop_at_edge(true);
    head_at_right_edge(&mut engine);

    engine.update();

    assert_eq!(engine.head(), Position::new(0, 4));
    assert!(!engine.is_game_over());
}

#[test]
fn dies_at_right_edge_without_looping() {
    let mut engine = seeded(10, 10);
    head_at_right_edge(&mut engine);

    let info = engine.update();

    assert!(engine.is_game_over());
    assert_eq!(engine.game_over_reason(), GameOverReason::EdgeCollision);
    assert_eq!(info.collision, Some(GameOverReason::EdgeCollision));
}

#[test]
fn loops_on_every_edge() {
    let mut engine = seeded(6, 4);
    engine.set_loop_at_edge(true);
    engine.clear_food();

    // Left from (3, 2) wraps after four steps
    for _ in 0..4 {
        engine.update();
    }
    assert_eq!(engine.head(), Position::new(5, 2));

    engine.set_direction(Direction::Down);
    for _ in 0..2 {
        engine.update();
    }
    assert_eq!(engine.head(), Position::new(5, 0));

    engine.set_direction(Direction::Right);
    engine.update();
    assert_eq!(engine.head(), Position::new(0, 0));

    engine.set_direction(Direction::Up);
    engine.update();
    assert_eq!(engine.head(), Position::new(0, 3));
    assert!(!engine.is_game_over());
}

#[test]
fn turning_back_into_the_body_ends_the_game() {
    let mut engine = seeded(20, 20);

    let collision = loop_back_into_body(&mut engine);

    assert_eq!(collision, Some(GameOverReason::SelfCollision));
    assert!(engine.is_game_over());
    assert_eq!(engine.game_over_reason(), GameOverReason::SelfCollision);
    assert_eq!(engine.score(), 5);
}

#[test]
fn passing_through_itself_when_collisions_are_off() {
    let mut engine = seeded(20, 20);
    engine.set_collide_with_snake(false);

    let collision = loop_back_into_body(&mut engine);

    assert_eq!(collision, None);
    assert!(!engine.is_game_over());
    assert_eq!(engine.head(), Position::new(1, 10));
}

#[test]
fn reenabling_collisions_catches_an_existing_overlap() {
    let mut engine = seeded(20, 20);
    engine.set_collide_with_snake(false);
    assert_eq!(loop_back_into_body(&mut engine), None);

    // The tail leaves (2, 10); the overlap on (1, 10) stays
    engine.set_collide_with_snake(true);
    let info = engine.update();

    assert_eq!(engine.head(), Position::new(1, 9));
    assert_eq!(info.collision, Some(GameOverReason::SelfCollision));
}

#[test]
fn eating_beside_the_wall_is_an_edge_collision() {
    let mut engine = seeded(10, 10);
    grow_by(&mut engine, 2);
    assert_eq!(engine.head(), Position::new(1, 5));

    engine.place_food(Position::new(0, 5)).unwrap();
    let info = engine.update();

    assert!(info.ate_food);
    assert_eq!(info.collision, Some(GameOverReason::EdgeCollision));
    assert_eq!(engine.score(), 3);
}

#[test]
fn eating_beside_the_wall_wraps_when_looping() {
    let mut engine = seeded(10, 10);
    engine.set_loop_at_edge(true);
    grow_by(&mut engine, 2);

    engine.place_food(Position::new(0, 5)).unwrap();
    let info = engine.update();

    assert!(info.ate_food);
    assert!(!engine.is_game_over());
    assert_eq!(engine.head(), Position::new(9, 5));
    assert!(engine.segments().iter().all(|cell| cell.in_bounds(10, 10)));
}

#[test]
fn update_after_game_over_changes_nothing() {
    let mut engine = seeded(10, 10);
    head_at_right_edge(&mut engine);
    engine.update();
    assert!(engine.is_game_over());

    let segments = engine.segments();
    let food = engine.food();
    let score = engine.score();
    let direction = engine.direction();

    for _ in 0..3 {
        let info = engine.update();
        assert!(!info.ate_food);
        assert_eq!(info.collision, None);
    }

    assert_eq!(engine.segments(), segments);
    assert_eq!(engine.food(), food);
    assert_eq!(engine.score(), score);
    assert_eq!(engine.direction(), direction);
    assert_eq!(engine.game_over_reason(), GameOverReason::EdgeCollision);
}

#[test]
fn reset_recovers_from_game_over() {
    let mut engine = seeded(10, 10);
    head_at_right_edge(&mut engine);
    engine.update();
    assert!(engine.is_game_over());

    engine.reset();

    assert!(!engine.is_game_over());
    assert_eq!(engine.food().len(), 1);
    engine.update();
    assert!(!engine.is_game_over());
}

#[test]
fn snapshots_are_detached_from_engine() {
    let mut engine = seeded(10, 10);
    let mut segments = engine.segments();
    segments.push(Position::new(0, 0));
    segments[0] = Position::new(9, 9);

    assert_eq!(engine.segments(), vec![Position::new(5, 5)]);
    engine.update();
    assert_eq!(engine.snake_len(), 1 + engine.score() as usize);
}

#[test]
fn food_never_spawns_on_snake_while_playing() {
    let mut engine = Engine::with_config(EngineConfig {
        loop_at_edge: true,
        initial_food: 5,
        ..EngineConfig::new(6, 6).with_seed(77)
    })
    .unwrap();

    let turns = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];
    for step in 0..200 {
        if step % 7 == 0 {
            engine.set_direction(turns[(step / 7) % 4]);
        }
        let before = engine.food();
        engine.update();
        if engine.is_game_over() {
            engine.reset();
        }

        // The snake may later slide over food it skipped, but nothing is
        // ever spawned under it
        let segments = engine.segments();
        let food = engine.food();
        for cell in food.iter().filter(|cell| !before.contains(cell)) {
            assert!(cell.in_bounds(6, 6));
            assert!(!segments.contains(cell));
        }
        for (i, cell) in food.iter().enumerate() {
            assert!(!food[i + 1..].contains(cell));
        }
    }
}
