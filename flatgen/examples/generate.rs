//! Example generator run over a JSON schema model.
//!
//! Run with: `cargo run --example generate -- <model.json> [out_dir]`

use flatgen::codegen::{EmittedSet, Generator, GeneratorOptions, WriteOutcome, write_unit};
use flatgen::schema::{SchemaModel, validate_model};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let model_path = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: generate <model.json> [out_dir]");
            std::process::exit(2);
        }
    };
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);

    let model = SchemaModel::from_json_file(&model_path)?;
    validate_model(&model)?;
    tracing::info!(
        "Loaded {}: {} enums, {} structs, {} tables",
        model.name,
        model.enums.len(),
        model.structs.len(),
        model.tables.len()
    );

    let options = GeneratorOptions::default();
    let unit = Generator::new(&model, &options).generate(&mut EmittedSet::new());

    match write_unit(&out_dir, &model.name, &unit)? {
        WriteOutcome::Skipped => println!("Nothing to generate"),
        WriteOutcome::Unchanged(path) => println!("{} is up to date", path.display()),
        WriteOutcome::Written(path) => println!("Generated {}", path.display()),
    }

    Ok(())
}
