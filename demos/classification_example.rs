use ndarray::array;
use planeml::{
    run, Algorithm, BoundaryLine, CentroidSeparator, Classifier, Dataset, DecisionTreeClassifier, GaussianNaiveBayes,
    LogisticRegression, Outcome, RunConfig,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "planeml=info".into()),
        )
        .init();

    println!("=== Binary Classification in the Plane ===\n");

    // Two overlapping groups: +1 towards the lower left, -1 towards the upper right
    let x = array![
        [-3.0, -2.5], [-2.2, -3.1], [-1.8, -1.2], [-2.9, -0.8], [-1.1, -2.0], [-0.4, -0.9],
        [0.6, 1.1], [1.9, 2.4], [2.7, 1.3], [1.2, 2.9], [3.1, 3.0], [-0.2, 0.8],
    ];
    let y = array![1.0, 1.0, 1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0];

    let dataset = Dataset::from_arrays(&x, &y)?;
    let (positive, negative) = dataset.class_counts();
    println!("Dataset: {} points ({} of class +1, {} of class -1)\n", dataset.len(), positive, negative);

    let config = RunConfig::new().with_seed(42);

    println!("{:<22} {:>10} {:>12} {:>12}", "Algorithm", "Train Acc", "f(-2, -2)", "f(2, 2)");
    println!("{}", "-".repeat(60));
    for algorithm in Algorithm::ALL.into_iter().filter(|a| a.is_supervised()) {
        match run(algorithm, &dataset, &config) {
            Ok(Outcome::Classifier(model)) => {
                println!(
                    "{:<22} {:>10.3} {:>12} {:>12}",
                    algorithm.id(),
                    model.score(&dataset)?,
                    model.predict_point(-2.0, -2.0)?,
                    model.predict_point(2.0, 2.0)?,
                );
            }
            Ok(_) => unreachable!("supervised algorithms return a classifier"),
            Err(e) => println!("{:<22} failed: {}", algorithm.id(), e),
        }
    }

    println!("\n=== Model Details ===");

    let mut tree = DecisionTreeClassifier::new().max_depth(3);
    tree.fit(&dataset)?;
    if let Some(root) = &tree.root {
        println!("Decision tree: depth {}, {} leaves", root.depth(), root.n_leaves());
        for split in root.splits() {
            println!(
                "  {}{:?} <= {:.3}",
                "  ".repeat(split.depth),
                split.feature,
                split.threshold
            );
        }
    }

    let mut logistic = LogisticRegression::with_params(0.1, 100);
    logistic.fit(&dataset)?;
    if let Some(model) = &logistic.model {
        println!(
            "\nLogistic regression: {:.3}*x + {:.3}*y + {:.3}, training log-loss {:.4}",
            model.w1,
            model.w2,
            model.bias,
            logistic.training_loss.unwrap_or(f64::NAN)
        );
        println!("  P(+1 | origin) = {:.3}", model.probability(0.0, 0.0));
    }

    let mut nb = GaussianNaiveBayes::new();
    nb.fit(&dataset)?;
    let posterior = nb.posterior(0.0, 0.0)?;
    println!(
        "\nNaive Bayes at the origin: {} (P(+1) = {:.3}, P(-1) = {:.3})",
        posterior.class, posterior.positive_prob, posterior.negative_prob
    );

    let mut separator = CentroidSeparator::new();
    separator.fit(&dataset)?;
    if let Some(model) = &separator.model {
        match model.boundary {
            BoundaryLine::Sloped { slope, intercept } => {
                println!("\nCentroid separator: y = {:.3}*x + {:.3}", slope, intercept)
            }
            BoundaryLine::Vertical { x } => println!("\nCentroid separator: x = {:.3}", x),
        }
        println!("  margin {:.3}, support vectors at indices {:?}", model.margin, model.support_vectors);
        for (i, p) in dataset.points().iter().enumerate() {
            if model.is_support_vector(p) {
                println!("  support point {}: ({:.2}, {:.2})", i, p.x, p.y);
            }
        }
    }

    Ok(())
}
