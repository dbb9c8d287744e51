//! Race engine integration tests through the public API.

use kart_race::core::{FixedRandom, RaceConfig, RaceRng, RandomSource, ScriptedRandom};
use kart_race::race::{RaceEngine, RaceEvent, RaceOutcome};
use kart_race::racer::{Competitor, PowerUp, Racer};
use kart_race::roster::Roster;

fn racer(name: &str, speed: u32) -> Racer {
    Racer::new(name, speed, PowerUp::from_name("Pink Speed"))
}

/// Competitor that moves a fixed distance per turn and ignores randomness.
struct ScriptedBot {
    name: &'static str,
    step: u32,
    position: u32,
    boosted: bool,
}

impl ScriptedBot {
    fn new(name: &'static str, step: u32) -> Self {
        Self {
            name,
            step,
            position: 0,
            boosted: false,
        }
    }
}

impl Competitor for ScriptedBot {
    fn name(&self) -> &str {
        self.name
    }

    fn position(&self) -> u32 {
        self.position
    }

    fn advance(&mut self, _rng: &mut dyn RandomSource) -> u32 {
        self.position += self.step;
        self.step
    }

    fn activate_power_up(&mut self) {
        self.boosted = true;
    }

    fn is_power_up_active(&self) -> bool {
        self.boosted
    }
}

// =============================================================================
// Deterministic Scenarios
// =============================================================================

#[test]
fn test_fixed_source_single_turn() {
    let mut engine = RaceEngine::new(RaceConfig::default(), FixedRandom::neutral());
    let mut racers = vec![racer("Rocket", 300), racer("Parked", 0)];

    let result = engine.simulate(&mut racers).unwrap();

    assert_eq!(result.turns, 1);
    assert_eq!(result.outcome, RaceOutcome::Finished);
    assert_eq!(result.winner().unwrap().name, "Rocket");
    assert_eq!(racers[0].position(), 300);
    assert_eq!(racers[1].position(), 0);
}

#[test]
fn test_scripted_power_up_race() {
    // Turn 1: Garfield boosts (+30 for 1 turn) and jumps ahead of Odie
    let rng = ScriptedRandom::new()
        .with_activations([true, false])
        .with_offsets([0, 0]);
    let config = RaceConfig::default().with_finish_distance(75);
    let mut engine = RaceEngine::new(config, rng);

    let mut garfield = Racer::new("Garfield", 45, PowerUp::from_name("Lasagna Turbo"));
    let mut odie = Racer::new("Odie", 50, PowerUp::from_name("Crazy Boost"));
    let mut racers = vec![&mut garfield, &mut odie];

    let result = engine.simulate(&mut racers).unwrap();

    assert_eq!(result.turns, 1);
    assert_eq!(result.names().collect::<Vec<_>>(), vec!["Garfield", "Odie"]);
    assert_eq!(garfield.position(), 75);
    assert!(!garfield.is_power_up_active());
    assert_eq!(odie.position(), 50);
}

#[test]
fn test_engine_drives_any_competitor() {
    let mut engine = RaceEngine::new(RaceConfig::default(), FixedRandom::new(0, true));
    let mut bots = vec![ScriptedBot::new("Slow", 60), ScriptedBot::new("Quick", 100)];

    let result = engine.simulate(&mut bots).unwrap();

    assert_eq!(result.turns, 3);
    assert_eq!(result.names().collect::<Vec<_>>(), vec!["Quick", "Slow"]);
    assert_eq!(result.standings[1].position, 180);
    assert!(bots.iter().all(|b| b.boosted));
}

#[test]
fn test_mixed_boxed_field() {
    let mut engine = RaceEngine::new(RaceConfig::default(), FixedRandom::neutral());
    let mut field: Vec<Box<dyn Competitor>> = vec![
        Box::new(ScriptedBot::new("Bot", 100)),
        Box::new(racer("Rocket", 300)),
    ];

    let result = engine.simulate(&mut field).unwrap();

    assert_eq!(result.turns, 1);
    assert_eq!(result.names().collect::<Vec<_>>(), vec!["Rocket", "Bot"]);
    assert_eq!(field[0].position(), 100);
    assert_eq!(field[1].power_up_name(), Some("Pink Speed"));
}

// =============================================================================
// Result Shape
// =============================================================================

#[test]
fn test_result_is_permutation_of_input() {
    for seed in 0..20 {
        let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(seed));
        let mut racers = vec![
            racer("A", 40),
            racer("B", 45),
            racer("C", 50),
            racer("D", 35),
        ];

        let result = engine.simulate(&mut racers).unwrap();

        let mut entrants: Vec<usize> = result.standings.iter().map(|s| s.entrant).collect();
        entrants.sort_unstable();
        assert_eq!(entrants, vec![0, 1, 2, 3]);

        let placements: Vec<u32> = result.standings.iter().map(|s| s.placement).collect();
        assert_eq!(placements, vec![1, 2, 3, 4]);
    }
}

#[test]
fn test_equal_positions_keep_entry_order() {
    let mut engine = RaceEngine::new(RaceConfig::default(), FixedRandom::neutral());
    let mut racers = vec![racer("Third", 100), racer("First", 150), racer("Fourth", 100)];

    let result = engine.simulate(&mut racers).unwrap();

    // First hits 300 in turn 2; the two 200s tie and keep entry order
    assert_eq!(
        result.names().collect::<Vec<_>>(),
        vec!["First", "Third", "Fourth"]
    );
}

#[test]
fn test_standings_sorted_by_position() {
    let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(99));
    let mut racers = vec![racer("A", 42), racer("B", 50), racer("C", 47)];

    let result = engine.simulate(&mut racers).unwrap();

    for pair in result.standings.windows(2) {
        assert!(pair[0].position >= pair[1].position);
        if pair[0].position == pair[1].position {
            assert!(pair[0].entrant < pair[1].entrant);
        }
    }
}

// =============================================================================
// Liveness and Movement
// =============================================================================

#[test]
fn test_someone_finishes_with_real_rng() {
    for seed in 0..50 {
        let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(seed));
        let mut racers = vec![racer("Garfield", 45), racer("Jon", 42), racer("Idle", 0)];

        let result = engine.simulate(&mut racers).unwrap();

        assert!(result.is_finished());
        assert!(result.winner().unwrap().position >= 300);
    }
}

#[test]
fn test_positions_never_decrease() {
    let mut last = [0u32; 3];
    let mut violations = 0;
    let observer = |event: &RaceEvent<'_>| {
        if let RaceEvent::Advanced { name, position, .. } = event {
            let slot = match *name {
                "A" => 0,
                "B" => 1,
                _ => 2,
            };
            if *position < last[slot] {
                violations += 1;
            }
            last[slot] = *position;
        }
    };

    let mut engine =
        RaceEngine::new(RaceConfig::default(), RaceRng::new(3)).with_observer(observer);
    let mut racers = vec![racer("A", 5), racer("B", 30), racer("C", 45)];
    engine.simulate(&mut racers).unwrap();
    drop(engine);

    assert_eq!(violations, 0);
}

#[test]
fn test_turn_cap_stops_a_stalled_race() {
    let config = RaceConfig::default().with_max_turns(20);
    let mut engine = RaceEngine::new(config, FixedRandom::new(-30, false));
    let mut racers = vec![racer("Stalled", 0)];

    let result = engine.simulate(&mut racers).unwrap();

    assert_eq!(result.outcome, RaceOutcome::TurnLimit);
    assert_eq!(result.turns, 20);
    assert_eq!(result.winner().unwrap().position, 0);
}

// =============================================================================
// Roster Races
// =============================================================================

#[test]
fn test_roster_race_records_each_racer_once() {
    let mut roster = Roster::default_roster();
    let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(11));

    let result = roster.run_race(&[1, 2, 3], &mut engine).unwrap();

    let winner = result.winner().unwrap().name.clone();
    for name in ["Odie", "Nermal", "Arlene"] {
        let career = roster.by_name(name).unwrap().career();
        assert_eq!(career.races_played, 1);
        assert_eq!(career.wins, u32::from(name == winner));
    }
    assert_eq!(roster.by_name("Garfield").unwrap().career().races_played, 0);
}

#[test]
fn test_back_to_back_races_reset_racers() {
    let mut roster = Roster::default_roster();
    let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(5));

    roster.run_race(&[0, 4], &mut engine).unwrap();
    let second = roster.run_race(&[0, 4], &mut engine).unwrap();

    // Positions start from zero again, so nobody lands beyond one turn's reach
    let max_step = 50 + 30 + 30;
    assert!(second.standings.iter().all(|s| s.position < 300 + max_step));
    assert_eq!(roster.by_name("Jon").unwrap().career().races_played, 2);
}
