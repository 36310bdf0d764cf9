use chrono::Local;
use flappy_arcade::{Config, FlyerState, GameController, GameEvent, Input, Point};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn new_game(seed: u64) -> GameController {
    GameController::new(Config::default(), StdRng::seed_from_u64(seed))
}

fn click_start(game: &mut GameController) {
    let start = game.menu().buttons()[0].rect;
    game.handle_input(Input::PrimaryAction(Point::new(start.x + 1.0, start.y + 1.0)));
}

/// Flaps whenever the flyer's middle sinks below the next gap's middle.
fn autopilot(game: &mut GameController) {
    let Some(session) = game.session() else {
        return;
    };
    let flyer = &session.flyer;
    let target = session
        .obstacles
        .iter()
        .find(|o| o.x + o.width >= flyer.x)
        .map_or(360.0, |o| (o.gap.top + o.gap.bottom) / 2.0);
    if flyer.y + flyer.size.h as f64 / 2.0 > target + 30.0 {
        game.handle_input(Input::PrimaryAction(Point::new(0.0, 0.0)));
    }
}

#[test]
fn start_click_opens_clean_session() {
    let mut game = new_game(1);
    assert!(!game.is_playing());
    click_start(&mut game);

    assert!(game.is_playing());
    let session = game.session().unwrap();
    assert!(session.obstacles.is_empty());
    assert_eq!(session.flyer.state(), FlyerState::Flying);
    assert_eq!(game.scores().score(), 0);
}

#[test]
fn piloted_run_scores_each_pipe_once() {
    for seed in [1, 2, 3] {
        let mut game = new_game(seed);
        click_start(&mut game);

        let mut scored = Vec::new();
        for _ in 0..1500 {
            autopilot(&mut game);
            for event in game.update(Local::now()) {
                if let GameEvent::Scored { score } = event {
                    scored.push(score);
                }
            }
            assert!(game.is_playing(), "seed {seed}: flyer died");
        }

        assert!(scored.len() >= 5, "seed {seed}: only {} points", scored.len());
        // One event per pipe, each worth exactly one point.
        let expected: Vec<u32> = (1..=scored.len() as u32).collect();
        assert_eq!(scored, expected);

        let session = game.session().unwrap();
        for pipe in &session.obstacles {
            assert!(!pipe.struck);
            assert_eq!(pipe.passed, pipe.x <= session.flyer.x - 5.0);
        }
    }
}

#[test]
fn abandoned_run_lands_pins_and_is_recorded() {
    let mut game = new_game(9);
    click_start(&mut game);
    let config = game.config().clone();

    let mut over = None;
    let mut frames = 0;
    while over.is_none() {
        if let Some(session) = game.session() {
            let flyer = &session.flyer;
            if flyer.state() == FlyerState::Dead {
                assert_eq!(flyer.velocity, 0.0);
                assert_eq!(flyer.y, flyer.floor_contact_y(&config));
            }
        }
        for event in game.update(Local::now()) {
            if let GameEvent::RunOver { score, rank } = event {
                over = Some((score, rank));
            }
        }
        frames += 1;
        assert!(frames < 2000, "run never ended");
    }

    assert_eq!(over, Some((0, Some(0))));
    assert!(!game.is_playing());
    assert_eq!(game.scores().history().len(), 1);
}

#[test]
fn history_capped_across_sessions() {
    let mut game = new_game(4);
    let limit = game.config().highscore_count;

    for _ in 0..limit + 3 {
        click_start(&mut game);
        while game.is_playing() {
            game.update(Local::now());
        }
        assert!(game.scores().history().len() <= limit);
    }
    assert_eq!(game.scores().history().len(), limit);
}
