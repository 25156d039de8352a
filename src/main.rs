use std::process::ExitCode;

use clap::Parser;
use molecule_parser::{MoleculeParser, ParserConfig};

#[derive(Parser)]
#[command(
    name = "molecule-parser",
    about = "Count the atoms of chemical formulas",
    version
)]
struct Cli {
    /// Formulas to parse, e.g. 'K4[ON(SO3)2]2'
    #[arg(required = true, value_name = "FORMULA")]
    formulas: Vec<String>,

    /// Maximum number of sub molecule rewriting passes (bounded by the formula if omitted)
    #[arg(long, value_name = "N")]
    max_passes: Option<usize>,

    /// Print the flattened formula instead of atom counts
    #[arg(long)]
    flatten: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match cli.max_passes {
        Some(max_passes) => ParserConfig::default().with_max_passes(max_passes),
        None => ParserConfig::default(),
    };
    let parser = MoleculeParser::with_config(config);

    let mut failed = false;
    for formula in &cli.formulas {
        println!("\nFormula: {}", formula);

        if cli.flatten {
            match parser.resolve(formula) {
                Ok(flat) => println!("Flattened: {}", flat),
                Err(e) => {
                    println!("Error: {}", e);
                    failed = true;
                }
            }
        } else {
            match parser.parse(formula) {
                Ok(composition) => {
                    println!("Composition:");
                    for (element, count) in composition.most_common_ordered() {
                        println!("  {}: {}", element, count);
                    }
                }
                Err(e) => {
                    println!("Error: {}", e);
                    failed = true;
                }
            }
        }
        println!("{}", "-".repeat(40));
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
