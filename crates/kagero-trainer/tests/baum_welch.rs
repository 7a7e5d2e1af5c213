use kagero_core::hmm::HiddenMarkovModel;
use kagero_core::prob::{MleEstimator, ProbDist};
use kagero_core::types::{Token, strip_labels};
use kagero_trainer::demo::{market_model, sample_unlabelled};
use kagero_trainer::{BaumWelchConfig, HiddenMarkovModelTrainer, PriorPolicy};

const EPSILON: f64 = 1e-9;

type MarketSequence = Vec<Token<&'static str, &'static str>>;

fn sampled_market_data(seed: u128, count: usize, length: usize) -> Vec<MarketSequence> {
    let model = market_model();
    let mut rng = oorandom::Rand64::new(seed);
    sample_unlabelled(&model, &mut rng, count, length).unwrap()
}

fn assert_non_decreasing(history: &[f64]) {
    for pair in history.windows(2) {
        assert!(
            pair[1] >= pair[0] - EPSILON,
            "log-probability decreased: {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_em_monotonic_from_true_model() {
    let data = sampled_market_data(0x5eed, 10, 5);
    let mut trainer = HiddenMarkovModelTrainer::default();
    let config = BaumWelchConfig::new().with_max_iterations(50);

    let outcome = trainer
        .train_unsupervised(&data, Some(market_model()), &config)
        .unwrap();

    assert!(outcome.report.iterations >= 2);
    assert_eq!(outcome.report.history.len(), outcome.report.iterations);
    assert_non_decreasing(&outcome.report.history);
}

#[test]
fn test_em_monotonic_with_prior_reestimation() {
    let data = sampled_market_data(99, 20, 8);
    let mut trainer = HiddenMarkovModelTrainer::default();
    let config = BaumWelchConfig::new()
        .with_max_iterations(30)
        .with_prior_policy(PriorPolicy::Reestimate);

    let outcome = trainer
        .train_unsupervised(&data, Some(market_model()), &config)
        .unwrap();

    assert_non_decreasing(&outcome.report.history);
    assert!(outcome.model.validate(1e-6).is_ok());
}

#[test]
fn test_first_history_entry_is_seed_likelihood() {
    let data = sampled_market_data(7, 5, 6);
    let seed = market_model();
    let expected: f64 = data
        .iter()
        .map(|seq| seed.log_probability(seq).unwrap())
        .sum();

    let mut trainer = HiddenMarkovModelTrainer::default();
    let outcome = trainer
        .train_unsupervised(&data, Some(seed), &BaumWelchConfig::new().with_max_iterations(1))
        .unwrap();

    assert_eq!(outcome.report.iterations, 1);
    assert!(!outcome.report.converged);
    assert!((outcome.report.history[0] - expected).abs() < 1e-9);
    assert_eq!(outcome.report.log_likelihood, outcome.report.history[0]);
}

#[test]
fn test_converges_with_loose_threshold() {
    let data = sampled_market_data(11, 10, 5);
    let mut trainer = HiddenMarkovModelTrainer::default();
    let config = BaumWelchConfig::new()
        .with_max_iterations(1000)
        .with_convergence_threshold(1e-3);

    let outcome = trainer
        .train_unsupervised(&data, Some(market_model()), &config)
        .unwrap();

    assert!(outcome.report.converged);
    assert!(outcome.report.iterations < 1000);
    let history = &outcome.report.history;
    let n = history.len();
    assert!((history[n - 1] - history[n - 2]).abs() < 1e-3);
}

#[test]
fn test_refined_model_fits_data_better() {
    let data = sampled_market_data(2024, 15, 10);
    let seed = market_model();
    let before: f64 = data.iter().map(|s| seed.log_probability(s).unwrap()).sum();

    let mut trainer = HiddenMarkovModelTrainer::default();
    let outcome = trainer
        .train_unsupervised(&data, Some(seed), &BaumWelchConfig::new().with_max_iterations(20))
        .unwrap();
    let after: f64 = data
        .iter()
        .map(|s| outcome.model.log_probability(s).unwrap())
        .sum();

    assert!(after >= before - EPSILON, "{before} -> {after}");
}

#[test]
fn test_supervised_then_unsupervised() {
    let truth = market_model();
    let mut rng = oorandom::Rand64::new(31);
    let labelled: Vec<Vec<Token<&str, &str>>> = (0..30)
        .map(|_| truth.random_sample(&mut rng, 12).unwrap())
        .collect();
    let unlabelled: Vec<_> = labelled.iter().map(|s| strip_labels(s)).collect();

    let mut trainer = HiddenMarkovModelTrainer::default();
    let (model, report): (HiddenMarkovModel<_, _>, _) = trainer
        .train(
            &labelled,
            &unlabelled,
            &MleEstimator,
            &BaumWelchConfig::new().with_max_iterations(10),
        )
        .unwrap();

    let report = report.unwrap();
    assert_non_decreasing(&report.history);
    assert_eq!(model.states().len(), trainer.states().len());
    let total: f64 = model.states().iter().map(|s| model.priors().prob(s)).sum();
    assert!((total - 1.0).abs() < 1e-9);
}
