mod metrics_tests;
mod scorer_tests;
