use logcount::{CardinalityEstimator, Precision};

fn main() -> logcount::Result<()> {
    let precision = Precision::for_error_rate(0.02)?;

    let mut estimator1: CardinalityEstimator = CardinalityEstimator::with_precision(precision);
    for i in 0..10 {
        estimator1.insert(&i);
    }
    println!("estimator1 estimate = {:.2}", estimator1.estimate());

    let mut estimator2: CardinalityEstimator = CardinalityEstimator::with_precision(precision);
    for i in 10..15 {
        estimator2.insert(&i);
    }
    println!("estimator2 estimate = {:.2}", estimator2.estimate());

    let merged = estimator1.merge(&estimator2)?;
    println!("merged estimate = {:.2}", merged.estimate());

    let data = merged.serialize();
    let restored: CardinalityEstimator = CardinalityEstimator::deserialize(&data)?;
    println!("restored {:?} from {} bytes", restored, data.len());
    assert_eq!(merged, restored);

    Ok(())
}
