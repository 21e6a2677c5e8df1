use anyhow::Result;

fn main() -> Result<()> {
    obsidize::cli::run()
}
