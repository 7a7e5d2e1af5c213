use kagero_core::prob::{EleEstimator, MleEstimator};
use kagero_trainer::{HiddenMarkovModelTrainer, accuracy, parse_tagged_sequences};

const CORPUS: &str = "\
# weather diary
umbrella\train
umbrella\train
none\tsun

none\tsun
none\tsun
umbrella\train

umbrella\train
none\tsun
none\tsun
";

#[test]
fn test_train_from_tsv_and_tag() {
    let sequences = parse_tagged_sequences(CORPUS.as_bytes()).unwrap();
    assert_eq!(sequences.len(), 3);

    let mut trainer = HiddenMarkovModelTrainer::default();
    let model = trainer.train_supervised(&sequences, &MleEstimator).unwrap();

    assert_eq!(model.states().as_slice(), &["rain".to_string(), "sun".to_string()]);
    assert!(model.validate(1e-9).is_ok());

    // Emissions are deterministic in this corpus, so tagging is perfect.
    let report = accuracy(&model, &sequences).unwrap();
    assert_eq!(report.tokens, 9);
    assert_eq!(report.correct, 9);
}

#[test]
fn test_supervised_is_deterministic() {
    let sequences = parse_tagged_sequences(CORPUS.as_bytes()).unwrap();
    let a = HiddenMarkovModelTrainer::default()
        .train_supervised(&sequences, &EleEstimator)
        .unwrap();
    let b = HiddenMarkovModelTrainer::default()
        .train_supervised(&sequences, &EleEstimator)
        .unwrap();

    let probe = parse_tagged_sequences("none\tsun\numbrella\train\nnone\tsun\n".as_bytes())
        .unwrap()
        .remove(0);
    assert_eq!(
        a.log_probability(&probe).unwrap(),
        b.log_probability(&probe).unwrap()
    );
    assert_eq!(a.best_path(&probe).unwrap(), b.best_path(&probe).unwrap());
    assert_eq!(a.entropy(&probe), b.entropy(&probe));
}
