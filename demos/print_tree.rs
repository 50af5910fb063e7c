use clade::distance::Euclidean;
use clade::{format_tree, Dendrogram, HierarchicalClustering};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Cluster a handful of 2-D points, print the tree, then cut it.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let labels = ["a", "b", "c", "d", "e", "f"];
    let points = vec![
        vec![0.0, 0.0],
        vec![0.2, 0.1],
        vec![5.0, 5.0],
        vec![5.1, 4.8],
        vec![9.0, 0.5],
        vec![2.5, 2.5],
    ];

    let root = HierarchicalClustering::new()
        .with_metric(Euclidean)
        .fit(&points)?;
    print!("{}", format_tree(&root, Some(&labels[..])));

    let dendro = Dendrogram::from_tree(&root);
    for merge in dendro.merges() {
        println!(
            "{:>3} = {:>3} + {:>3} @ {:.3} (size {})",
            merge.id, merge.left, merge.right, merge.distance, merge.size
        );
    }
    for k in 1..=3 {
        println!("k={k}: {:?}", dendro.cut_to_k(k)?);
    }

    Ok(())
}
