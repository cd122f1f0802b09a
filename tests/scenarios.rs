use pwr_sim as pwr;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn cmd(rod: i64, primary: i64, secondary: i64, emergency: i64) -> pwr::TurnCommand {
    pwr::TurnCommand::new(pwr::RawControls::new(rod, primary, secondary, emergency))
}

#[test]
fn documented_equilibrium_point() {
    let p = pwr::PlantParams::default();
    let state = pwr::PlantState {
        reactor_temp: 600.0,
        ..pwr::PlantState::default()
    };
    let controls = pwr::ControlInputs::new(15, 100, 100, 0).unwrap();

    let raw = pwr::thermal::reactivity_delta(&state, &controls, &p);
    assert_eq!(raw, 0.0);

    // Full-flow primary tips the balance: the core sheds 2F.
    let next = pwr::thermal::step(&state, controls, &p);
    assert_eq!(next.reactor_temp, 598.0);
}

#[test]
fn overheated_core_takes_two_points() {
    let p = pwr::PlantParams::default();
    let state = pwr::PlantState {
        reactor_temp: 750.0,
        ..pwr::PlantState::default()
    };
    let (next, _) = pwr::damage::apply(&state, &p);
    assert_eq!(next.damage, 2);
}

#[test]
fn run_lasts_exactly_game_length_days() {
    let mut c = pwr::TurnController::new(pwr::GameConfig::new(5).unwrap());

    for day in 1..5 {
        let report = c.submit(cmd(15, 100, 100, 0)).unwrap();
        assert_eq!(report.state.day, day + 1);
        assert_eq!(report.outcome, pwr::TurnOutcome::Continue);
    }

    let last = c.submit(cmd(15, 100, 100, 0)).unwrap();
    assert_eq!(
        last.outcome,
        pwr::TurnOutcome::GameOver {
            reason: pwr::GameOverReason::DayLimitReached
        }
    );
    assert_eq!(last.state.day, 6);

    let frozen = *c.state();
    assert_eq!(
        c.submit(cmd(15, 100, 100, 0)).unwrap_err(),
        pwr::TurnError::RunOver(pwr::GameOverReason::DayLimitReached)
    );
    assert_eq!(*c.state(), frozen);
    assert_eq!(c.summary().days_played, 5);
}

#[test]
fn damage_reaching_limit_destroys_plant() {
    let cfg = pwr::GameConfig::default();
    let state = pwr::PlantState {
        reactor_temp: 800.0,
        damage: 99,
        ..pwr::PlantState::new(cfg.game_length())
    };
    let mut c = pwr::TurnController::from_state(cfg, state);
    assert!(!c.is_over());

    let report = c.submit(cmd(100, 0, 0, 0)).unwrap();
    assert!(report.state.damage >= 100);
    assert_eq!(
        report.outcome,
        pwr::TurnOutcome::game_over(pwr::GameOverReason::PlantDestroyed)
    );
    assert_eq!(c.summary().end_reason, Some(pwr::GameOverReason::PlantDestroyed));
}

#[test]
fn repair_teams_finish_the_last_point() {
    let cfg = pwr::GameConfig::default();
    let state = pwr::PlantState {
        reactor_temp: 150.0,
        damage: 1,
        damage_control_active: true,
        ..pwr::PlantState::new(cfg.game_length())
    };
    let mut c = pwr::TurnController::from_state(cfg, state);

    let report = c.submit(cmd(0, 50, 50, 0)).unwrap();
    assert_eq!(report.state.damage, 0);
    assert!(!report.state.damage_control_active);
    assert!(!report.alarms.damage_control_active);
    assert_eq!(report.outcome, pwr::TurnOutcome::RepairsComplete);
}

#[test]
fn hot_core_recalls_repair_teams() {
    let cfg = pwr::GameConfig::default();
    let state = pwr::PlantState {
        reactor_temp: 400.0,
        damage: 10,
        damage_control_active: true,
        ..pwr::PlantState::new(cfg.game_length())
    };
    let mut c = pwr::TurnController::from_state(cfg, state);

    let report = c.submit(cmd(0, 100, 100, 0)).unwrap();
    assert_eq!(report.state.damage, 10);
    assert_eq!(report.outcome, pwr::TurnOutcome::DamageControlRecalled);
    assert_eq!(
        c.toggle_damage_control().unwrap(),
        pwr::DamageControlResponse::RefusedCoreTooHot
    );
}

#[test]
fn rejected_turn_is_bit_for_bit_idempotent() {
    let mut c = pwr::TurnController::new(pwr::GameConfig::default());
    c.submit(cmd(60, 30, 0, 0)).unwrap();
    let before = *c.state();

    for bad in [cmd(101, 0, 0, 0), cmd(0, -1, 0, 0), cmd(0, 0, 0, 500)] {
        assert!(matches!(
            c.submit(bad.with_damage_control_toggle()),
            Err(pwr::TurnError::InvalidInput(_))
        ));
    }

    let after = *c.state();
    assert_eq!(after, before);
    assert_eq!(after.reactor_temp.to_bits(), before.reactor_temp.to_bits());
    assert_eq!(after.fuel.to_bits(), before.fuel.to_bits());
    assert_eq!(after.total_output.to_bits(), before.total_output.to_bits());
}

#[test]
fn random_operator_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(12345);

    for _ in 0..20 {
        let mut c = pwr::TurnController::new(pwr::GameConfig::new(60).unwrap());
        let mut expected_total = 0.0;

        while !c.is_over() {
            let before = *c.state();
            let report = c
                .submit(cmd(
                    rng.gen_range(0..=100),
                    rng.gen_range(0..=100),
                    rng.gen_range(0..=100),
                    rng.gen_range(0..=100),
                ))
                .unwrap();
            let s = report.state;

            expected_total += s.daily_output;
            assert_eq!(s.total_output, expected_total);
            assert_eq!(s.day, before.day + 1);
            assert!(s.fuel <= before.fuel);
            assert!(s.reactor_temp >= 70.0);
            assert!(s.exchanger_temp >= 80.0);
            assert!(s.condenser_temp >= 80.0);
            assert!(s.day <= s.game_length + 1);
        }
    }
}

#[test]
fn stale_output_counts_while_generators_offline() {
    let mut c = pwr::TurnController::new(pwr::GameConfig::default());

    let mut online = None;
    for _ in 0..20 {
        let report = c.submit(cmd(60, 30, 0, 0)).unwrap();
        if !report.alarms.generators_offline {
            online = Some(report);
            break;
        }
    }
    let online = online.expect("generators should come online");
    assert!(online.state.daily_output > 0.0);

    // Rods in and full secondary flow drop the exchanger below boiling.
    let report = c.submit(cmd(0, 100, 100, 0)).unwrap();
    assert!(report.alarms.generators_offline);
    assert_eq!(report.state.daily_output, online.state.daily_output);
    assert_eq!(
        report.state.total_output,
        online.state.total_output + online.state.daily_output
    );
}

#[test]
fn scram_ends_the_run() {
    let mut c = pwr::TurnController::new(pwr::GameConfig::default());
    c.submit(cmd(15, 100, 100, 0)).unwrap();
    let report = c.submit(cmd(15, 100, 100, 0).with_scram()).unwrap();
    assert_eq!(
        report.outcome,
        pwr::TurnOutcome::game_over(pwr::GameOverReason::OperatorScram)
    );
    assert!(report.state.scrammed);
    assert_eq!(report.state.day, 2);
}
