use anyhow::{Context, Result};
use disassembly_demo::options::DemoOptions;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = DemoOptions::from_env().context("Failed to load the demo options")?;
    disassembly_demo::window::run(options).context("The demo stopped with an error")?;

    Ok(())
}
