use ndarray::array;
use planeml::{estimate_epsilon, Dataset, Dbscan, KMeans, Position, NOISE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "planeml=info".into()),
        )
        .init();

    println!("=== Clustering Algorithms Comparison ===\n");

    // Create sample data with three natural clusters
    let x = array![
        // Cluster 1: around (2, 2)
        [1.5, 1.8], [2.0, 2.2], [2.3, 1.9], [1.8, 2.5], [2.1, 1.7],
        // Cluster 2: around (8, 8)
        [7.8, 8.2], [8.1, 7.9], [8.3, 8.1], [7.9, 8.4], [8.2, 7.7],
        // Cluster 3: around (2, 8)
        [1.9, 7.8], [2.2, 8.1], [1.7, 8.3], [2.4, 7.9], [2.0, 8.2],
        // Some noise points
        [5.0, 5.0], [0.0, 0.0], [10.0, 0.0]
    ];

    let dataset = Dataset::from_features(&x)?;
    println!("Dataset: {} points", dataset.len());
    println!("Expected: 3 natural clusters + some noise points\n");

    println!("=== K-Means Clustering ===");
    for k in 2..=5 {
        let mut kmeans = KMeans::new(k).max_iter(100).random_state(7);
        kmeans.fit(&dataset)?;
        if let Some(result) = &kmeans.result {
            println!(
                "K-Means(k={}): {} iterations, converged: {}, inertia {:.4}, sizes {:?}",
                k,
                result.n_iter,
                result.converged,
                result.inertia,
                result.cluster_sizes()
            );
        }
    }

    println!("\n=== DBSCAN Clustering ===");
    let positions: Vec<Position> = dataset.points().iter().map(Position::from).collect();
    println!("Estimated epsilon: {:.4}", estimate_epsilon(&positions)?);

    let configs = [(None, "estimated"), (Some(0.5), "tight"), (Some(1.0), "medium"), (Some(3.0), "loose")];
    for (epsilon, description) in configs {
        let mut dbscan = match epsilon {
            Some(eps) => Dbscan::auto().epsilon(eps),
            None => Dbscan::auto(),
        };
        dbscan.fit(&dataset)?;
        if let Some(result) = &dbscan.result {
            println!(
                "DBSCAN(eps={:.3}, min_pts={}) [{}]: {} clusters, {} noise points",
                result.epsilon,
                result.min_pts,
                description,
                result.n_clusters,
                result.n_noise_points()
            );
        }
    }

    println!("\n=== Detailed Analysis ===");
    let mut dbscan = Dbscan::new(1.0, 2);
    let labels = dbscan.fit_predict(&dataset)?;
    if let Some(result) = &dbscan.result {
        println!("DBSCAN (eps=1.0, min_pts=2):");
        println!("  Core samples: {}", result.core_sample_indices.len());
        for (id, size) in result.cluster_sizes.iter().enumerate() {
            if id == NOISE {
                println!("  Noise: {} points", size);
            } else {
                println!("  Cluster {}: {} points", id, size);
            }
        }
    }
    for (p, label) in dataset.points().iter().zip(&labels) {
        if *label == NOISE {
            println!("  outlier at ({:.1}, {:.1})", p.x, p.y);
        }
    }

    Ok(())
}
