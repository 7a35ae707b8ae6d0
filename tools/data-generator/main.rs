use clap::Parser;
use jouken::filter::{FilterDocument, FilterMap, Operator, RawNode};
use rand::{Rng, rngs::ThreadRng};

/// A CLI tool to generate random filter trees for jouken
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_filter.json")]
    output: String,

    /// Depth of the generated tree, counting the root
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// The minimum number of children per condition
    #[arg(long, default_value_t = 0)]
    min: usize,

    /// The maximum number of children per condition
    #[arg(long, default_value_t = 3)]
    max: usize,

    /// Probability that a condition is also listed under a second parent
    #[arg(long, default_value_t = 0.0)]
    share: f64,
}

const PARAMETERS: [&str; 6] = [
    "accommodation.size",
    "main.applicant.age",
    "main.applicant.income",
    "co.applicant.age",
    "co.applicant.income",
    "applied_loan_amount",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.share) {
        eprintln!("Error: --share ({}) must be between 0 and 1", cli.share);
        std::process::exit(1);
    }

    println!(
        "Generating filter tree (depth {}, children per condition: {} to {})...",
        cli.depth, cli.min, cli.max
    );

    let document = generate_tree(&mut rng, &cli);
    document.save(&cli.output)?;

    println!(
        "Successfully generated {} condition(s) and saved them to '{}'",
        document.filter.len(),
        cli.output
    );

    Ok(())
}

/// Grows the tree breadth first, one level at a time.
fn generate_tree(rng: &mut ThreadRng, cli: &Cli) -> FilterDocument {
    let mut filter = FilterMap::new();
    let mut next_id = 1usize;
    let root_id = next_id.to_string();
    filter.insert(root_id.clone(), generate_condition(rng, &root_id));

    let mut level = vec![root_id.clone()];
    for _ in 1..cli.depth.max(1) {
        let mut next_level = Vec::new();
        for parent_id in &level {
            let count = rng.random_range(cli.min..=cli.max);
            for _ in 0..count {
                next_id += 1;
                let child_id = next_id.to_string();
                filter.insert(child_id.clone(), generate_condition(rng, &child_id));
                push_child(&mut filter, parent_id, &child_id);
                next_level.push(child_id);
            }
        }

        // Optionally list some children under a second parent from the same level.
        if cli.share > 0.0 && level.len() > 1 {
            for child_id in &next_level {
                if rng.random_bool(cli.share) {
                    let parent_id = &level[rng.random_range(0..level.len())];
                    let already_listed = filter
                        .get(parent_id)
                        .is_some_and(|p| p.children.contains(child_id));
                    if !already_listed {
                        push_child(&mut filter, parent_id, child_id);
                    }
                }
            }
        }

        if next_level.is_empty() {
            break;
        }
        level = next_level;
    }

    FilterDocument::new(&root_id, filter)
}

fn push_child(filter: &mut FilterMap, parent_id: &str, child_id: &str) {
    if let Some(parent) = filter.get_mut(parent_id) {
        parent.children.push(child_id.to_string());
    }
}

fn generate_condition(rng: &mut ThreadRng, id: &str) -> RawNode {
    let parameter = PARAMETERS[rng.random_range(0..PARAMETERS.len())];
    let operator = match rng.random_range(0..3) {
        0 => Operator::LessThan,
        1 => Operator::Equal,
        _ => Operator::GreaterThan,
    };
    let value = match parameter {
        "main.applicant.age" | "co.applicant.age" => rng.random_range(18..70),
        "accommodation.size" => rng.random_range(10..200),
        _ => rng.random_range(500..10_000),
    };
    RawNode::new(id, parameter, operator, &value.to_string())
}
