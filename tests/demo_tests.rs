//! The built-in demonstrations, end to end

use approx::assert_relative_eq;
use loopsim::prelude::*;

fn report(settings: &ExperimentSettings) -> Report {
    Experiment::from_settings(settings).unwrap().run(false).unwrap()
}

#[test]
fn test_every_demo_runs() {
    for settings in demos::all() {
        let report = report(&settings);
        let expected = (settings.scenario.horizon / settings.scenario.dt).ceil() as usize;

        assert_eq!(report.comparison.len(), settings.loops.len());
        assert_eq!(report.comparison.time().len(), expected);
        for (_, trajectory) in report.comparison.iter() {
            assert!(trajectory.is_finite());
        }
    }
}

#[test]
fn test_p_step_offset_shrinks_with_gain() {
    let report = report(&demos::p_step());
    let finals: Vec<f64> = ["Kp low", "Kp typ", "Kp high"]
        .iter()
        .map(|label| report.metrics_for(label).unwrap().final_value)
        .collect();

    assert!(finals.iter().all(|&x| x < 1.0));
    assert!(finals[0] < finals[1] && finals[1] < finals[2]);
    assert_relative_eq!(finals[0], 1.5 / 10.5, epsilon = 1e-3);
}

#[test]
fn test_pi_disturbance_demo() {
    let report = report(&demos::pi_disturbance());
    let p = report.metrics_for("P control").unwrap();
    let pi = report.metrics_for("PI control").unwrap();

    // (K*Kp + d) / (wn^2 + K*Kp)
    assert_relative_eq!(p.final_value, 5.6 / 14.0, epsilon = 1e-3);
    assert!(pi.final_value > p.final_value);
    assert!(pi.steady_state_error < p.steady_state_error);
}

#[test]
fn test_pid_damping_demo() {
    let report = report(&demos::pid_damping());
    let pi = &report.comparison["PI"];
    let pid = &report.comparison["PID"];

    let variation = |t: &Trajectory| -> f64 {
        t.samples().windows(2).map(|w| (w[1] - w[0]).abs()).sum()
    };
    assert!(variation(pid) < variation(pi));
}

#[test]
fn test_parallel_report_matches_sequential() {
    for settings in demos::all() {
        let experiment = Experiment::from_settings(&settings).unwrap();
        let sequential = experiment.run(false).unwrap();
        let parallel = experiment.run(true).unwrap();
        assert_eq!(sequential.comparison, parallel.comparison);
        assert_eq!(sequential.metrics, parallel.metrics);
    }
}

#[test]
fn test_dumped_demo_reloads() {
    let settings = demos::pi_disturbance();
    let json = settings.to_json().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pi.json");
    std::fs::write(&path, json).unwrap();

    let loaded = Experiment::load(&path).unwrap().run(false).unwrap();
    assert_eq!(loaded.comparison, report(&settings).comparison);
    assert_eq!(loaded.title, "P vs PI control (step + disturbance)");
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Experiment::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, Error::Io(_)));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"name": "x", "loops": []"#).unwrap();
    assert!(matches!(Experiment::load(&path).unwrap_err(), Error::Json(_)));

    let path = dir.path().join("zero-dt.json");
    std::fs::write(
        &path,
        r#"{"name": "x", "scenario": {"dt": 0.0, "horizon": 1.0}, "loops": []}"#,
    )
    .unwrap();
    assert!(matches!(
        Experiment::load(&path).unwrap_err(),
        Error::Config(ConfigError::InvalidTimestep(_))
    ));
}

#[test]
fn test_duplicate_labels_rejected() {
    let settings = demos::p_step().with_loop(LoopSettings::new(
        "Kp low",
        ControllerSettings::P { kp: 2.0 },
    ));
    let err = Experiment::from_settings(&settings).unwrap().run(false).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateLabel("Kp low".to_string()));
}

#[test]
fn test_report_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p_step");

    let report = report(&demos::p_step());
    report.save_csv(&path).unwrap();

    let content = std::fs::read_to_string(dir.path().join("p_step.csv")).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), "time [s],Kp low,Kp typ,Kp high");
    assert_eq!(lines.count(), 600);
}

#[test]
fn test_bundled_experiment_file() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/plant_damping.json");
    let experiment = Experiment::load(path).unwrap();
    assert_eq!(experiment.scenario().len(), 1000);
    assert_eq!(experiment.configs()[1].plant.damping_ratio(), 0.7);

    let report = experiment.run(true).unwrap();
    let labels: Vec<&str> = report.comparison.labels().collect();
    assert_eq!(labels, ["zeta 0.25", "zeta 0.7", "zeta 1.0"]);
}
