use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kart_race::persistence::{HistoryRecord, PersistenceGateway};
use kart_race::race::{RaceEngine, RaceEvent, RaceObserver, RaceOutcome, RaceResult};
use kart_race::stats::StatsReport;
use kart_race::tournament::{Medal, RoundEvent, TournamentRunner};
use kart_race::{AppConfig, Competitor, RaceError, RaceRng, Roster};

#[derive(Debug, Parser)]
#[command(version, about = "Turn-based kart racing simulator", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Roster CSV file
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Race history file
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    /// Seed for reproducible races
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pause between turns in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Race your racer against random opponents
    Race {
        /// Racer name; prompts when omitted
        #[arg(short, long)]
        racer: Option<String>,

        #[arg(short, long)]
        opponents: Option<usize>,
    },

    /// Several rounds against the same opponents, ranked by average placement
    Tournament {
        #[arg(short, long)]
        racer: Option<String>,

        #[arg(short, long)]
        opponents: Option<usize>,

        #[arg(long)]
        rounds: Option<u32>,
    },

    /// Career statistics from the race history
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the roster alphabetically
    Roster,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = load_config(&cli)?;
    let mut session = Session::open(config);

    match cli.command.unwrap_or(Command::Race {
        racer: None,
        opponents: None,
    }) {
        Command::Race { racer, opponents } => session.race(racer.as_deref(), opponents),
        Command::Tournament {
            racer,
            opponents,
            rounds,
        } => session.tournament(racer.as_deref(), opponents, rounds),
        Command::Stats { json } => session.stats(json),
        Command::Roster => {
            session.list_roster();
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "kart_race=debug" } else { "kart_race=info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if let Some(path) = &cli.roster {
        config.roster_path = path.clone();
    }
    if let Some(path) = &cli.history {
        config.history_path = path.clone();
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(delay) = cli.delay_ms {
        config.turn_delay_ms = delay;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Roster, history files and RNG for one run of the program.
struct Session {
    config: AppConfig,
    gateway: PersistenceGateway,
    roster: Roster,
    rng: RaceRng,
}

impl Session {
    fn open(config: AppConfig) -> Self {
        let gateway = PersistenceGateway::from_config(&config);

        let mut roster = match gateway.load_roster() {
            Ok(roster) if !roster.is_empty() => roster,
            Ok(_) => {
                warn!("roster file has no usable racers, using the default roster");
                Roster::default_roster()
            }
            Err(err) => {
                warn!(%err, "could not load the roster, using the default roster");
                Roster::default_roster()
            }
        };

        if let Err(err) = gateway.load_history(&mut roster) {
            warn!(%err, "could not load race history, starting with empty stats");
        }

        let rng = match config.seed {
            Some(seed) => RaceRng::new(seed),
            None => RaceRng::from_entropy(),
        };
        info!(seed = rng.seed(), racers = roster.len(), "session ready");

        Self {
            config,
            gateway,
            roster,
            rng,
        }
    }

    fn race(&mut self, racer: Option<&str>, opponents: Option<usize>) -> Result<()> {
        let entrants = self.pick_entrants(racer, opponents)?;
        let mut engine = self.engine();

        let result = self.roster.run_race(&entrants, &mut engine)?;
        self.save_history(&[HistoryRecord::from_result(&result)]);
        Ok(())
    }

    fn tournament(
        &mut self,
        racer: Option<&str>,
        opponents: Option<usize>,
        rounds: Option<u32>,
    ) -> Result<()> {
        let runner = TournamentRunner::new(rounds.unwrap_or(self.config.tournament_rounds));
        println!("Tournament: {} rounds", runner.rounds());

        let entrants = self.pick_entrants(racer, opponents)?;
        let mut engine = self.engine();

        let result = runner.run_with(&mut self.roster, &entrants, &mut engine, |event| {
            if let RoundEvent::Starting { round, of } = event {
                println!();
                println!("=============== ROUND {round} OF {of} ===============");
            }
        })?;
        self.save_history(&result.history());

        println!();
        println!("Final results");
        println!("---------------------------------------------");
        for entry in &result.entries {
            println!("{}", entry.name);
            for (round, placement) in entry.placements.iter().enumerate() {
                println!("  Round {}: place {placement}", round + 1);
            }
            println!("  Average placement: {:.2}", entry.average_placement());
        }

        println!("---------------------------------------------");
        println!("Podium");
        for (rank, entry) in result.podium().iter().enumerate() {
            let medal = Medal::from_rank(rank + 1).map_or_else(String::new, |m| format!(" {m}"));
            println!(
                "{}.{medal} {} (average {:.2})",
                rank + 1,
                entry.name,
                entry.average_placement()
            );
        }
        Ok(())
    }

    fn stats(&self, json: bool) -> Result<()> {
        let report = StatsReport::from_roster(&self.roster);
        if json {
            println!("{}", report.to_json()?);
        } else {
            println!("{report}");
        }
        Ok(())
    }

    fn list_roster(&self) {
        for (i, idx) in self.roster.sorted_by_name().into_iter().enumerate() {
            if let Some(racer) = self.roster.get(idx) {
                println!("{}. {racer}", i + 1);
            }
        }
    }

    /// Engine with console commentary. Takes a fork of the session RNG.
    fn engine(&mut self) -> RaceEngine<RaceRng, ConsoleObserver> {
        RaceEngine::new(self.config.race.clone(), self.rng.fork()).with_observer(ConsoleObserver {
            delay: Duration::from_millis(self.config.turn_delay_ms),
        })
    }

    /// The player's racer followed by randomly drawn opponents.
    fn pick_entrants(&mut self, racer: Option<&str>, opponents: Option<usize>) -> Result<Vec<usize>> {
        let player = match racer {
            Some(name) => self
                .roster
                .find_ignore_case(name)
                .ok_or_else(|| RaceError::UnknownRacer(name.to_string()))?,
            None => prompt_racer(&self.roster)?,
        };
        if let Some(racer) = self.roster.get(player) {
            println!("You picked {}", racer.name());
        }

        let wanted = opponents.unwrap_or(self.config.opponents);
        let available = self.roster.len().saturating_sub(1);
        if wanted > available {
            warn!(wanted, available, "not enough racers, racing with fewer opponents");
        }

        let mut picker = self.rng.fork();
        let picked = self
            .roster
            .pick_opponents(player, wanted.min(available), &mut picker)?;

        let mut entrants = Vec::with_capacity(picked.len() + 1);
        entrants.push(player);
        entrants.extend(picked);
        Ok(entrants)
    }

    fn save_history(&self, records: &[HistoryRecord]) {
        if let Err(err) = self.gateway.append_history(records) {
            warn!(%err, "could not save race history");
        }
    }
}

/// Ask on stdin until a valid racer number or name is entered.
fn prompt_racer(roster: &Roster) -> Result<usize> {
    let order = roster.sorted_by_name();

    println!("Choose your racer:");
    for (i, &idx) in order.iter().enumerate() {
        if let Some(racer) = roster.get(idx) {
            println!("{}. {racer}", i + 1);
        }
    }

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("Racer number: ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("no racer selected");
        }

        let input = line.trim();
        let choice = match input.parse::<usize>() {
            Ok(n) if (1..=order.len()).contains(&n) => Some(order[n - 1]),
            Ok(_) => None,
            Err(_) => roster.find_ignore_case(input),
        };
        match choice {
            Some(idx) => return Ok(idx),
            None => println!("Invalid selection, try again."),
        }
    }
}

/// Prints race commentary to stdout, pausing between turns.
struct ConsoleObserver {
    delay: Duration,
}

impl ConsoleObserver {
    fn print_results(result: &RaceResult) {
        println!();
        println!("================ RESULTS ================");
        for standing in &result.standings {
            println!(
                "{}. {} ({}m)",
                standing.placement, standing.name, standing.position
            );
        }
        if result.outcome == RaceOutcome::TurnLimit {
            println!("Stopped after {} turns with nobody at the finish line.", result.turns);
        }
        println!("=========================================");
    }
}

impl RaceObserver for ConsoleObserver {
    fn on_event(&mut self, event: &RaceEvent<'_>) {
        match event {
            RaceEvent::Started {
                names,
                finish_distance,
            } => {
                println!();
                println!("======== RACE START - FINISH: {finish_distance}m ========");
                for (i, name) in names.iter().enumerate() {
                    println!("{}. {name}", i + 1);
                }
            }
            RaceEvent::TurnStarted { turn } => println!("\n--- Turn {turn} ---"),
            RaceEvent::PowerUpActivated { name, power_up, .. } => {
                println!("{name} activates {}!", power_up.unwrap_or("a power-up"));
            }
            RaceEvent::Advanced {
                name,
                distance,
                position,
                boosted,
                ..
            } => {
                let tag = if *boosted { " [boosted]" } else { "" };
                println!("{name} moves {distance}m (total {position}m){tag}");
            }
            RaceEvent::TurnFinished { .. } => {
                if !self.delay.is_zero() {
                    thread::sleep(self.delay);
                }
            }
            RaceEvent::Finished { result } => Self::print_results(result),
        }
    }
}
