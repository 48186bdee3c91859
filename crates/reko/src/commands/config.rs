use reko_core::Config;
use std::path::Path;

fn write_defaults(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists, pass --force to overwrite",
            path.display()
        );
    }
    let yaml = Config::default().to_yaml()?;
    reko_telemetry::atomic_write(path, yaml.as_bytes())?;
    Ok(())
}

pub fn run(config: &Config, path: &Path, init: bool, force: bool) -> anyhow::Result<()> {
    if init {
        write_defaults(path, force)?;
        println!("✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    let source = if path.exists() { "file" } else { "defaults" };
    println!("# {} ({})", path.display(), source);
    print!("{}", config.to_yaml()?);
    Ok(())
}
