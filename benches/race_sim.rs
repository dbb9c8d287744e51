//! Throughput of the race engine and tournament runner.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kart_race::core::{RaceConfig, RaceRng};
use kart_race::race::RaceEngine;
use kart_race::roster::Roster;
use kart_race::tournament::TournamentRunner;

fn bench_single_race(c: &mut Criterion) {
    let mut group = c.benchmark_group("race");

    for field in [2usize, 3, 5] {
        let entrants: Vec<usize> = (0..field).collect();
        group.bench_with_input(BenchmarkId::from_parameter(field), &entrants, |b, entrants| {
            let mut roster = Roster::default_roster();
            let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(42));
            b.iter(|| black_box(roster.run_race(entrants, &mut engine)));
        });
    }

    group.finish();
}

fn bench_tournament(c: &mut Criterion) {
    c.bench_function("tournament_4_rounds", |b| {
        let mut roster = Roster::default_roster();
        let mut engine = RaceEngine::new(RaceConfig::default(), RaceRng::new(7));
        let runner = TournamentRunner::default();
        b.iter(|| black_box(runner.run(&mut roster, &[0, 1, 4], &mut engine)));
    });
}

criterion_group!(benches, bench_single_race, bench_tournament);
criterion_main!(benches);
