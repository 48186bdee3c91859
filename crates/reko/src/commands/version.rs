pub fn run() -> anyhow::Result<()> {
    println!("reko {}", env!("CARGO_PKG_VERSION"));
    println!("N-gram chat assistant shaped by reply ratings");
    Ok(())
}
