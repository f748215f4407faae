//! Properties of the calculation engine checked over ranges of inputs

use mog_tracker::core::display::Hint;
use mog_tracker::core::engine::{
    clamp_grade, weighted_average, BlocAggregator, BlocSnapshot, BlocStatus, ColorTag,
    GradingTargets, MogNeed, OverallAggregator, OverallGpa, SubjectCalculator, SubjectSnapshot,
};
use mog_tracker::core::models::{Subject, Weights};

const EPS: f64 = 1e-9;

fn snap(name: &str, ects: f64, average: Option<f64>) -> SubjectSnapshot {
    SubjectSnapshot::new(name.to_string(), ects, true, average)
}

fn grades() -> impl Iterator<Item = f64> {
    (0..=40).map(|half| f64::from(half) / 2.0)
}

#[test]
fn clamp_stays_in_range() {
    for raw in [-1e9, -20.0, -0.01, 0.0, 7.25, 20.0, 20.01, 1e9, f64::NAN] {
        let clamped = clamp_grade(raw);
        assert!((0.0..=20.0).contains(&clamped), "{raw} -> {clamped}");
    }
}

#[test]
fn scoring_the_required_final_reaches_the_passing_grade() {
    let calc = SubjectCalculator::default();
    for weights in [Weights::default(), Weights::new(0.5, 0.5), Weights::new(0.3, 0.7)] {
        for midterm in grades() {
            let required = calc.required_final_score(midterm, weights);
            if (0.0..=20.0).contains(&required) {
                let avg = weighted_average(midterm, required, weights);
                assert!((avg - 10.0).abs() < EPS, "m={midterm} w={weights:?}");
            }
        }
    }
}

#[test]
fn required_final_decreases_as_midterm_rises() {
    let calc = SubjectCalculator::default();
    let mut previous = f64::INFINITY;
    for midterm in grades() {
        let required = calc.required_final_score(midterm, Weights::default());
        assert!(required < previous);
        previous = required;
    }
}

#[test]
fn hint_classification_boundaries() {
    assert_eq!(Hint::classify(0.0), Hint::AlreadyMet);
    assert_eq!(Hint::classify(-3.0), Hint::AlreadyMet);
    assert_eq!(Hint::classify(20.0), Hint::Need(20.0));
    assert_eq!(Hint::classify(20.01), Hint::Impossible);
    assert_eq!(Hint::classify(21.0).to_string(), "Impossible");
}

#[test]
fn bloc_mog_lies_between_completed_averages() {
    let aggregator = BlocAggregator::default();
    for low in grades() {
        let high = 20.0 - low / 2.0;
        let result = aggregator.aggregate(&[
            snap("A", 3.0, Some(low)),
            snap("B", 5.0, Some(high)),
            snap("C", 2.0, None),
        ]);
        let mog = result.current_mog.expect("two subjects completed");
        assert!(mog >= low.min(high) - EPS && mog <= low.max(high) + EPS);
        assert_eq!(result.status, BlocStatus::InProgress);
    }
}

#[test]
fn meeting_the_single_need_reaches_the_target() {
    let aggregator = BlocAggregator::default();
    for done in grades() {
        let result = aggregator.aggregate(&[snap("A", 6.0, Some(done)), snap("B", 4.0, None)]);
        let MogNeed::Pending(needs) = &result.need else {
            panic!("one subject pending");
        };
        let required = needs[0].required;

        let finished = aggregator.aggregate(&[
            snap("A", 6.0, Some(done)),
            snap("B", 4.0, Some(required)),
        ]);
        let mog = finished.current_mog.expect("all completed");
        assert!((mog - 10.0).abs() < EPS, "done={done} required={required}");
    }
}

#[test]
fn inactive_and_zero_credit_subjects_are_ignored() {
    let aggregator = BlocAggregator::default();
    let base = aggregator.aggregate(&[snap("A", 5.0, Some(12.0))]);
    let noisy = aggregator.aggregate(&[
        snap("A", 5.0, Some(12.0)),
        SubjectSnapshot::new("Off".to_string(), 5.0, false, Some(2.0)),
        snap("Zero", 0.0, Some(2.0)),
        snap("Negative", -2.0, None),
    ]);
    assert_eq!(base, noisy);
    assert_eq!(noisy.status_display(), "Validé");
}

#[test]
fn completed_bloc_status_follows_target() {
    let aggregator = BlocAggregator::default();
    let validated = aggregator.aggregate(&[snap("A", 4.0, Some(10.0)), snap("B", 4.0, Some(10.0))]);
    assert_eq!(validated.status_display(), "Validé");
    let failed = aggregator.aggregate(&[snap("A", 4.0, Some(9.99)), snap("B", 4.0, Some(10.0))]);
    assert_eq!(failed.status_display(), "Non Validé");
}

#[test]
fn complete_gpa_is_the_ects_weighted_mean() {
    let aggregator = OverallAggregator::default();
    let blocs = [
        BlocSnapshot::new(15.0, BlocStatus::Validated, Some(11.41)),
        BlocSnapshot::new(7.0, BlocStatus::Validated, Some(11.4)),
        BlocSnapshot::new(5.0, BlocStatus::NotValidated, Some(8.0)),
        BlocSnapshot::new(4.0, BlocStatus::Validated, Some(12.3)),
    ];
    let result = aggregator.aggregate(&blocs);
    let expected = (11.41 * 15.0 + 11.4 * 7.0 + 8.0 * 5.0 + 12.3 * 4.0) / 31.0;
    let OverallGpa::Complete(gpa) = result.state else {
        panic!("all blocs resolved");
    };
    assert!((gpa - expected).abs() < EPS);
    assert_eq!(result.color, ColorTag::Green);
}

#[test]
fn weights_on_subject_override_calculator_defaults() {
    let calc = SubjectCalculator::new(GradingTargets::default(), Weights::new(0.5, 0.5));
    let plain = Subject::new("a".to_string(), "A".to_string(), 3.0).with_scores(Some(8.0), Some(14.0));
    assert_eq!(calc.evaluate(&plain).average_display(), "11.00");

    let weighted = plain.with_weights(Weights::new(0.25, 0.75));
    assert_eq!(calc.evaluate(&weighted).average_display(), "12.50");
}
