//! End-to-end runs of the seeded scenarios

use evo_core::config::{EngineConfig, OccupancyPolicy};
use evo_core::output::{ReportFormat, ReportWriter};
use evo_core::setup::{banded_scenario, zoned_scenario};
use evo_core::{OrganismFilter, CSV_HEADER};

fn experiment_config(occupancy: OccupancyPolicy) -> EngineConfig {
    EngineConfig {
        occupancy,
        mutation_rate: 0.05,
        mutation_sd: 0.025,
        predator_death_rate: 0.1,
        ..EngineConfig::default()
    }
}

#[test]
fn test_banded_single_occupancy_25_generations() {
    let mut sim = banded_scenario(experiment_config(OccupancyPolicy::SingleOccupant));

    for generation in 0..25 {
        let summary = sim.advance_one_tick();
        assert_eq!(summary.births, 0);

        let report = sim.generation_report(generation);
        assert!((0.0..=1.0).contains(&report.avg_prey_alpha));
        assert!(report.population() <= 9);
        assert_eq!(report.population(), sim.population());
    }
    assert_eq!(sim.tick(), 25);
}

#[test]
fn test_banded_unbounded_grows_and_reports() {
    let mut sim = banded_scenario(experiment_config(OccupancyPolicy::Unbounded));
    let start = sim.population();

    let mut births = 0;
    for generation in 0..8 {
        births += sim.advance_one_tick().births;
        let report = sim.generation_report(generation);
        assert!((0.0..=1.0).contains(&report.avg_prey_alpha));
        assert_eq!(report.population(), sim.population());
    }

    assert!(births > 0);
    assert!(sim.population() > start);
    // Prey are never culled
    assert!(sim.census().count(&OrganismFilter::prey()) >= 45);
}

#[test]
fn test_run_writes_csv_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");

    let mut sim = zoned_scenario(EngineConfig::default());
    let mut writer = ReportWriter::create(&path, ReportFormat::Csv).unwrap();
    for generation in 0..5 {
        sim.advance_one_tick();
        writer.write(&sim.generation_report(generation)).unwrap();
    }
    writer.flush().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], CSV_HEADER);
    assert!(lines[5].starts_with("4,"));
}
