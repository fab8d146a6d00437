// Build script generating Rust code for the test fixture schema.
// The output lands in OUT_DIR and is include!d by tests/generated_code.rs.

use flatgen_codegen::{EmittedSet, Generator, GeneratorOptions, write_unit};
use flatgen_schema::{SchemaModel, validate_model};
use std::env;
use std::path::{Path, PathBuf};

const FIXTURE: &str = "tests/fixtures/game.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", FIXTURE);

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let model = SchemaModel::from_json_file(Path::new(FIXTURE))?;
    validate_model(&model)?;

    let options = GeneratorOptions::new().runtime_crate("flatgen::runtime");
    let unit = Generator::new(&model, &options).generate(&mut EmittedSet::new());
    write_unit(&out_dir, &model.name, &unit)?;
    Ok(())
}
