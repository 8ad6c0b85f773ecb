use clap::Parser;
use wqi_pipeline::cli::{run, Cli};
use wqi_pipeline::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
