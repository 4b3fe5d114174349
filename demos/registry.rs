use gallop::{Boundary, Search, SharedRegistry};

fn main() {
    let registry = SharedRegistry::new();
    for name in ["alpha", "beta", "gamma", "delta", "epsilon"] {
        registry.push(name);
    }

    // Size the registry by asking only whether an index is populated.
    let snapshot = registry.snapshot();
    let report = Search::new()
        .report(|i: usize| snapshot.contains(i))
        .expect("default budget always suffices");

    match report.boundary {
        Boundary::Found(n) => println!(
            "registry holds {n} entries ({} evaluations)",
            report.evaluations
        ),
        Boundary::Exhausted => println!("registry covers every index"),
    }
}
