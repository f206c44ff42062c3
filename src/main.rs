use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = sonarr_auto_import::cli::parse();
    app::run(args)
}
