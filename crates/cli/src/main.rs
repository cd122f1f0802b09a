use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use controller::{GameConfig, TurnCommand, TurnController, TurnError, TurnReport};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use safety::AlarmFlags;
use sim::{PlantState, RawControls};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Read one day of controls per line from stdin
    Interactive,
    /// 15% rods, full primary and secondary flow
    SafeStartup,
    /// Aggressive rod withdrawal for maximum output
    FullPower,
    /// Normal power run that loses both coolant loops after 30% of the run
    LossOfCooling,
    /// Random operator, reproducible with --seed
    Random,
}

#[derive(Parser, Debug)]
#[command(
    name = "pwr-sim",
    version,
    about = "Turn-based pressurized water reactor plant simulator"
)]
struct Args {
    #[arg(value_enum, long, default_value = "interactive")]
    scenario: Scenario,

    /// Game length in days (5 to 150)
    #[arg(long, default_value_t = 100)]
    days: u32,

    /// RNG seed for deterministic runs
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Stop an autopilot run after this many days even if the game is not over
    #[arg(long)]
    turns: Option<u32>,
}

#[derive(serde::Serialize)]
struct TraceRow {
    day: u32,
    rod: u8,
    primary: u8,
    secondary: u8,
    emergency: u8,
    reactor_temp_f: f64,
    exchanger_temp_f: f64,
    condenser_temp_f: f64,
    damage: u32,
    fuel: f64,
    daily_output_mwe: f64,
    total_output_mwe: f64,
    alarms: Vec<&'static str>,
    outcome: String,
}

impl TraceRow {
    fn from_report(day: u32, report: &TurnReport) -> Self {
        let s = &report.state;
        Self {
            day,
            rod: s.controls.rod_position(),
            primary: s.controls.primary_pump(),
            secondary: s.controls.secondary_pump(),
            emergency: s.controls.emergency_pump(),
            reactor_temp_f: s.reactor_temp,
            exchanger_temp_f: s.exchanger_temp,
            condenser_temp_f: s.condenser_temp,
            damage: s.damage,
            fuel: s.fuel,
            daily_output_mwe: s.daily_output,
            total_output_mwe: s.total_output,
            alarms: report.alarms.active().into_iter().map(|a| a.id()).collect(),
            outcome: format!("{:?}", report.outcome),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut plant = TurnController::new(GameConfig::new(args.days)?);
    info!(
        "starting {:?} run of {} days",
        args.scenario,
        plant.config().game_length()
    );

    match args.scenario {
        Scenario::Interactive => interactive(&mut plant)?,
        scenario => autopilot(&mut plant, scenario, args.seed, args.turns)?,
    }

    Ok(())
}

/// Scripted operator. Emits a JSONL trace to stdout (one object per day)
/// followed by the run summary.
fn autopilot(
    plant: &mut TurnController,
    scenario: Scenario,
    seed: u64,
    turns: Option<u32>,
) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let limit = turns.unwrap_or(u32::MAX);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut played = 0;
    while !plant.is_over() && played < limit {
        let day = plant.state().day;
        let cmd = scripted_command(scenario, plant.state(), &mut rng);
        let report = plant.submit(cmd)?;
        writeln!(out, "{}", serde_json::to_string(&TraceRow::from_report(day, &report))?)?;
        played += 1;
    }

    writeln!(out, "{}", serde_json::to_string(&plant.summary())?)?;
    Ok(())
}

fn scripted_command(scenario: Scenario, state: &PlantState, rng: &mut StdRng) -> TurnCommand {
    match scenario {
        Scenario::Interactive | Scenario::SafeStartup => {
            TurnCommand::new(RawControls::new(15, 100, 100, 0))
        }
        Scenario::FullPower => {
            // Back the rods off once the core nears its limit.
            let rod = if state.reactor_temp > 650.0 { 10 } else { 60 };
            TurnCommand::new(RawControls::new(rod, 60, 40, 0))
        }
        Scenario::LossOfCooling => {
            let elapsed = f64::from(state.day) / f64::from(state.game_length);
            if elapsed > 0.3 {
                TurnCommand::new(RawControls::new(60, 5, 5, 0))
            } else {
                TurnCommand::new(RawControls::new(60, 60, 40, 0))
            }
        }
        Scenario::Random => {
            let mut cmd = TurnCommand::new(RawControls::new(
                rng.gen_range(0..=100),
                rng.gen_range(0..=100),
                rng.gen_range(0..=100),
                rng.gen_range(0..=100),
            ));
            cmd.toggle_damage_control = rng.gen_bool(0.05);
            cmd
        }
    }
}

const USAGE: &str = "Enter: <rods> <primary> <secondary> <emergency> (integers 0-100), \
                     or one of: dc (damage control), scram, status, quit";

fn interactive(plant: &mut TurnController) -> Result<()> {
    let stdin = io::stdin();
    println!("{USAGE}");
    print_panel(plant.state(), &plant.alarms());

    for line in stdin.lock().lines() {
        let line = line.context("reading operator input")?;
        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["status"] => print_panel(plant.state(), &plant.alarms()),
            ["dc"] => match plant.toggle_damage_control() {
                Ok(response) => println!("{response}"),
                Err(e) => println!("{e}"),
            },
            ["scram"] => {
                let report = plant.scram()?;
                println!("{}", report.outcome);
            }
            [rod, primary, secondary, emergency] => {
                let raw = match RawControls::parse([*rod, *primary, *secondary, *emergency]) {
                    Ok(raw) => raw,
                    Err(e) => {
                        println!("INPUT ERROR: {e}");
                        continue;
                    }
                };
                match plant.submit(TurnCommand::new(raw)) {
                    Ok(report) => {
                        print_panel(&report.state, &report.alarms);
                        if let Some(event) = report.repair {
                            println!("{event}");
                        }
                        if report.outcome.is_game_over() {
                            println!("{}", report.outcome);
                        }
                    }
                    Err(TurnError::InvalidInput(e)) => println!("INPUT ERROR: {e}"),
                    Err(e) => println!("{e}"),
                }
            }
            _ => println!("{USAGE}"),
        }

        if plant.is_over() {
            break;
        }
        io::stdout().flush()?;
    }

    println!("{}", plant.summary());
    Ok(())
}

fn print_panel(state: &PlantState, alarms: &AlarmFlags) {
    println!("------------------------------------------------------------");
    println!(
        "Day {} / {}   Reactor {:.2} F   Exchanger {:.2} F   Condenser {:.2} F",
        state.day, state.game_length, state.reactor_temp, state.exchanger_temp, state.condenser_temp
    );
    println!(
        "Fuel {:.2} %   Damage {} %   Daily {:.3} MWe   Total {:.3} MWe",
        state.fuel, state.damage, state.daily_output, state.total_output
    );
    if alarms.any() {
        let lit: Vec<&str> = alarms.active().into_iter().map(|a| a.label()).collect();
        println!("Annunciators: {}", lit.join(" | "));
    } else {
        println!("Annunciators: none");
    }
}
