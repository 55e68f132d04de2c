//! Scenario execution and result bookkeeping.

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::harness::{self, SeasonPlan, SeasonSummary};
use crate::scenarios::SeasonScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct ScenarioRunner {
    verbose: bool,
}

impl ScenarioRunner {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &SeasonScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                let config = scenario.plan().config;
                println!(
                    "🧪 Testing scenario: {} (members: {} days: {} seed: {})",
                    scenario.name().bright_white(),
                    config.members,
                    config.days,
                    seed
                );
            }

            let result = self.run_single_scenario(scenario, seed, iterations);
            results.push(result);
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &SeasonScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let (successes, failures, performance_data) =
            self.run_season_iterations(scenario.plan(), seed, iterations);

        let avg_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name().to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration: avg_duration,
            performance_data,
        }
    }

    fn run_season_iterations(
        &self,
        plan: &SeasonPlan,
        seed: u64,
        iterations: usize,
    ) -> (usize, Vec<String>, Vec<Duration>) {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));

            match harness::run_plan(plan, iteration_seed) {
                Ok(summary) => {
                    if let Some(err) = evaluate_expectations(plan, &summary) {
                        let context = summarize_recent_events(&summary);
                        let stats = summary.stats;
                        failures.push(format!(
                            "Iteration {} (seed {}, messages {}, characters {}, trainings {}, resets {}): {} | {}",
                            i + 1,
                            summary.seed,
                            stats.messages,
                            stats.characters_created,
                            stats.training_sessions,
                            stats.accounts_reset,
                            err,
                            context
                        ));

                        if self.verbose {
                            println!(
                                "  ❌ Iteration {}/{} failed: {}",
                                i + 1,
                                iterations,
                                err.red()
                            );
                            println!(
                                "     ↳ Seed {} | Levels {} | Promotions {} | Recent: {}",
                                summary.seed,
                                stats.account_levels_gained,
                                stats.tier_promotions,
                                context
                            );
                        }
                    } else {
                        successes += 1;
                        let duration = start_time.elapsed();
                        performance_data.push(duration);

                        if self.verbose {
                            println!(
                                "  ✅ Iteration {}/{} passed ({duration:?}) messages:{} characters:{} trainings:{}",
                                i + 1,
                                iterations,
                                summary.stats.messages,
                                summary.stats.characters_created,
                                summary.stats.training_sessions
                            );
                        }
                    }
                }
                Err(err) => {
                    failures.push(format!(
                        "Iteration {} (seed {iteration_seed}): season aborted: {err:#}",
                        i + 1
                    ));

                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} aborted: {}",
                            i + 1,
                            iterations,
                            format!("{err:#}").red()
                        );
                    }
                }
            }
        }

        (successes, failures, performance_data)
    }
}

fn evaluate_expectations(plan: &SeasonPlan, summary: &SeasonSummary) -> Option<String> {
    for expectation in &plan.expectations {
        if let Err(err) = expectation.evaluate(summary) {
            return Some(err.to_string());
        }
    }
    None
}

fn summarize_recent_events(summary: &SeasonSummary) -> String {
    if summary.event_log.is_empty() {
        return "no notable events".to_string();
    }

    summary
        .event_log
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(" | ")
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations
            .iter()
            .map(std::time::Duration::as_millis)
            .collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::find_catalog_scenario;
    use anyhow::ensure;

    #[test]
    fn passing_scenarios_report_success() {
        let scenario = find_catalog_scenario("smoke").expect("smoke scenario");
        let runner = ScenarioRunner::new(false);
        let results = runner.run_scenario(&scenario, &[42], 2);
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert!(result.passed, "failures: {:?}", result.failures);
        assert_eq!(result.iterations_run, 2);
        assert_eq!(result.successful_iterations, 2);
        assert_eq!(result.performance_data.len(), 2);
    }

    #[test]
    fn failed_expectations_carry_season_context() {
        let plan = find_catalog_scenario("smoke")
            .expect("smoke scenario")
            .plan()
            .clone()
            .with_expectation(|summary: &SeasonSummary| {
                ensure!(summary.stats.messages == 0, "expected a silent season");
                Ok(())
            });
        let scenario = SeasonScenario::new("impossible", "never passes", plan);
        let runner = ScenarioRunner::new(false);
        let results = runner.run_scenario(&scenario, &[7], 1);
        assert!(!results[0].passed);
        assert_eq!(results[0].successful_iterations, 0);
        assert!(results[0].failures[0].contains("expected a silent season"));
        assert!(results[0].failures[0].contains("seed 7"));
    }

    #[test]
    fn duration_fields_serialize_as_millis() {
        let result = ScenarioResult {
            scenario_name: "smoke".to_string(),
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
            performance_data: vec![Duration::from_millis(12)],
        };
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(json.contains("\"average_duration\":12"));
        let back: ScenarioResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.average_duration, Duration::from_millis(12));
        assert_eq!(back.performance_data, vec![Duration::from_millis(12)]);
    }
}
