//! Roster and history file integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use kart_race::core::{RaceConfig, RaceRng};
use kart_race::persistence::{HistoryRecord, PersistenceGateway};
use kart_race::race::RaceEngine;
use kart_race::racer::Competitor;
use kart_race::roster::Roster;

/// Fresh directory under the system temp dir, unique per test.
fn scratch_dir(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "kart-race-{}-{}-{}",
        std::process::id(),
        name,
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn gateway(dir: &Path) -> PersistenceGateway {
    PersistenceGateway::new(dir.join("racers.csv"), dir.join("history.txt"))
}

// =============================================================================
// Roster Loading
// =============================================================================

#[test]
fn test_missing_roster_uses_default_and_writes_it() {
    let dir = scratch_dir("missing-roster");
    let gateway = gateway(&dir);

    let roster = gateway.load_roster().unwrap();

    assert_eq!(roster.len(), 5);
    assert!(roster.by_name("Arlene").is_some());
    assert!(gateway.roster_path().exists());

    // The written file loads back to the same racers
    let reloaded = gateway.load_roster().unwrap();
    assert_eq!(reloaded.len(), 5);
    assert_eq!(reloaded.by_name("Jon").unwrap().base_speed(), 42);
}

#[test]
fn test_custom_roster_file() {
    let dir = scratch_dir("custom-roster");
    let gateway = gateway(&dir);
    fs::write(
        gateway.roster_path(),
        "Nombre,Velocidad,PowerUp\nPooky,30,Nitro Hug\nLiz,44,Morning Cafe\nBad,row\n",
    )
    .unwrap();

    let roster = gateway.load_roster().unwrap();

    assert_eq!(roster.len(), 2);
    let liz = roster.by_name("Liz").unwrap();
    assert_eq!(liz.base_speed(), 44);
    assert_eq!(liz.power_up().bonus(), 20);
    assert_eq!(liz.power_up().duration(), 3);
    assert_eq!(roster.by_name("Pooky").unwrap().power_up().duration(), 1);
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_missing_history_is_empty() {
    let dir = scratch_dir("missing-history");
    let gateway = gateway(&dir);
    let mut roster = Roster::default_roster();

    let load = gateway.load_history(&mut roster).unwrap();

    assert_eq!((load.races, load.skipped), (0, 0));
    assert!(roster.iter().all(|r| r.career().races_played == 0));
}

#[test]
fn test_malformed_lines_skipped() {
    let dir = scratch_dir("malformed-history");
    let gateway = gateway(&dir);
    fs::write(
        gateway.history_path(),
        "Odie,Jon,1,2\n\
         Odie,Jon,1\n\
         Garfield,Odie,first,2\n\
         \n\
         Jon,Odie,1,2\n",
    )
    .unwrap();
    let mut roster = Roster::default_roster();

    let load = gateway.load_history(&mut roster).unwrap();

    assert_eq!((load.races, load.skipped), (2, 2));
    let odie = roster.by_name("Odie").unwrap().career();
    assert_eq!((odie.races_played, odie.wins), (2, 1));
    // The bad line naming Garfield left no partial result behind
    assert_eq!(roster.by_name("Garfield").unwrap().career().races_played, 0);
}

#[test]
fn test_race_history_round_trip() {
    let dir = scratch_dir("round-trip");
    let gateway = gateway(&dir);

    let mut session = Roster::default_roster();
    let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(31));
    let result = session.run_race(&[0, 1, 4], &mut engine).unwrap();
    gateway
        .append_history(&[HistoryRecord::from_result(&result)])
        .unwrap();

    // A new session replays the file onto a fresh roster
    let mut restored = Roster::default_roster();
    gateway.load_history(&mut restored).unwrap();

    let winner = &result.winner().unwrap().name;
    for standing in &result.standings {
        let career = restored.by_name(&standing.name).unwrap().career();
        assert_eq!(career.races_played, 1);
        assert_eq!(career.wins, u32::from(&standing.name == winner));
        assert_eq!(career.placement_sum, standing.placement);
    }
    assert_eq!(restored.by_name("Nermal").unwrap().career().races_played, 0);
}

#[test]
fn test_history_is_appended_across_sessions() {
    let dir = scratch_dir("append");
    let gateway = gateway(&dir);

    let first: HistoryRecord = "Odie,Garfield,1,2".parse().unwrap();
    let second: HistoryRecord = "Garfield,Odie,1,2".parse().unwrap();
    gateway.append_history(&[first]).unwrap();
    gateway.append_history(&[second]).unwrap();

    let text = fs::read_to_string(gateway.history_path()).unwrap();
    assert_eq!(text, "Odie,Garfield,1,2\nGarfield,Odie,1,2\n");

    let mut roster = Roster::default_roster();
    gateway.load_history(&mut roster).unwrap();
    let garfield = roster.by_name("Garfield").unwrap().career();
    assert_eq!((garfield.races_played, garfield.wins, garfield.placement_sum), (2, 1, 3));
}

#[test]
fn test_append_nothing_creates_no_file() {
    let dir = scratch_dir("empty-append");
    let gateway = gateway(&dir);

    gateway.append_history(&[]).unwrap();

    assert!(!gateway.history_path().exists());
}

#[test]
fn test_non_utf8_history_line_skipped() {
    let dir = scratch_dir("non-utf8-history");
    let gateway = gateway(&dir);
    let mut bytes = b"Odie,Jon,1,2\n".to_vec();
    bytes.extend_from_slice(b"Odie,J\xffn,1,2\n");
    bytes.extend_from_slice(b"Jon,Odie,1,2\n");
    fs::write(gateway.history_path(), bytes).unwrap();
    let mut roster = Roster::default_roster();

    let load = gateway.load_history(&mut roster).unwrap();

    assert_eq!((load.races, load.skipped), (2, 1));
    let odie = roster.by_name("Odie").unwrap().career();
    assert_eq!((odie.races_played, odie.wins), (2, 1));
}

#[test]
fn test_repeated_name_line_skipped() {
    let dir = scratch_dir("repeated-name");
    let gateway = gateway(&dir);
    fs::write(gateway.history_path(), "Odie,Odie,1,2\nOdie,Jon,1,2\n").unwrap();
    let mut roster = Roster::default_roster();

    let load = gateway.load_history(&mut roster).unwrap();

    assert_eq!((load.races, load.skipped), (1, 1));
    assert_eq!(roster.by_name("Odie").unwrap().career().races_played, 1);
}

#[test]
fn test_non_utf8_roster_row_keeps_other_racers() {
    let dir = scratch_dir("non-utf8-roster");
    let gateway = gateway(&dir);
    let mut bytes = b"Name,Speed,PowerUp\nPooky,30,Nitro\n".to_vec();
    bytes.extend_from_slice(b"B\xffd,20,Boost\n");
    bytes.extend_from_slice(b"Liz,44,Cafe\n");
    fs::write(gateway.roster_path(), bytes).unwrap();

    let roster = gateway.load_roster().unwrap();

    assert_eq!(roster.len(), 2);
    assert!(roster.by_name("Pooky").is_some());
    assert!(roster.by_name("Liz").is_some());
}

#[test]
fn test_loaded_roster_history_round_trips() {
    let dir = scratch_dir("comma-name");
    let gateway = gateway(&dir);
    fs::write(
        gateway.roster_path(),
        "Name,Speed,PowerUp\n\"Garfield, Jr\",60,Turbo\nOdie,50,Crazy Boost\nJon,42,Coffee Rush\n",
    )
    .unwrap();

    let mut roster = gateway.load_roster().unwrap();
    assert!(roster.iter().all(|r| !r.name().contains(',')));

    let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(4));
    let entrants: Vec<usize> = (0..roster.len()).collect();
    let result = roster.run_race(&entrants, &mut engine).unwrap();
    gateway
        .append_history(&[HistoryRecord::from_result(&result)])
        .unwrap();

    let mut restored = gateway.load_roster().unwrap();
    let load = gateway.load_history(&mut restored).unwrap();
    assert_eq!((load.races, load.skipped), (1, 0));
    assert!(restored.iter().all(|r| r.career().races_played == 1));
}
