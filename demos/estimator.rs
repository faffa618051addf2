use hll_estimator::HyperLogLog;

fn main() {
    let mut estimator1: HyperLogLog = HyperLogLog::new(14).unwrap();
    for i in 0..10 {
        estimator1.add(&i);
    }
    println!("estimator1 estimate = {:.0}", estimator1.estimate());

    let mut estimator2: HyperLogLog = HyperLogLog::new(14).unwrap();
    for i in 10..15 {
        estimator2.add(&i);
    }
    println!("estimator2 estimate = {:.0}", estimator2.estimate());

    estimator1.merge(&estimator2).unwrap();
    println!("merged estimate = {:.0}", estimator1.estimate());
}
