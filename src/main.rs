use clap::Parser;
use prisma_flow::generate_prisma_diagram;

/// Renders the PRISMA systematic-review flow diagram.
///
/// Takes no arguments: the dataset, geometry, and output path
/// (`static/prisma_diagram.png`) are fixed.
#[derive(Parser, Debug)]
#[command(name = "prisma-flow")]
#[command(version)]
#[command(about = "Render the PRISMA flow diagram to static/prisma_diagram.png", long_about = None)]
struct Args {}

fn main() -> Result<(), String> {
    let _args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let path = generate_prisma_diagram()?;
    eprintln!("PNG saved to: {}", path.display());

    Ok(())
}
