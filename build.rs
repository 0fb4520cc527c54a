use std::error::Error;
use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    // Build metadata for the startup log line (see src/app.rs).
    EmitBuilder::builder()
        .build_timestamp()
        .cargo_target_triple()
        .rustc_semver()
        .emit()?;
    Ok(())
}
