use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ontograph::model::request::{GraphRequest, OntologyPayload};
use ontograph::pipeline::generate;

/// Render an OWL/RDF ontology as a yEd GraphML diagram.
#[derive(Parser)]
#[command(name = "ontograph", version, about)]
struct Cli {
    /// Ontology file (.ttl, .nt, .nq, .trig, .n3, .rdf, .owl, .xml).
    ontology: PathBuf,

    /// JSON request document with the title, options and style fields.
    #[arg(short, long, value_name = "FILE")]
    request: Option<PathBuf>,

    /// Output file path [default: stdout].
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Graph title [default: the ontology file name].
    #[arg(long)]
    title: Option<String>,

    /// Graph type: class, property, individual, both, rdf.
    #[arg(short, long, value_name = "TYPE")]
    graph_type: Option<String>,

    /// Visualization: graffoo, vowl, uml, custom.
    #[arg(long, value_name = "NOTATION")]
    visualization: Option<String>,

    /// Merge parallel property edges into one edge.
    #[arg(long)]
    collapse: bool,

    /// Add inferred superclasses to individual types.
    #[arg(long)]
    reasoning: bool,

    /// Media type of the ontology, overriding the file suffix.
    #[arg(long, value_name = "TYPE")]
    media_type: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "ontograph=debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Request document when given, otherwise a graffoo class graph; flags override either.
fn build_request(cli: &Cli) -> Result<GraphRequest, Box<dyn std::error::Error>> {
    let mut request = match &cli.request {
        Some(path) => GraphRequest::from_json(&fs::read_to_string(path)?)?,
        None => GraphRequest::new("", "class", "graffoo"),
    };

    let file_name = cli
        .ontology
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut payload = OntologyPayload::new(file_name.clone(), fs::read(&cli.ontology)?);
    if let Some(media_type) = cli.media_type.clone().or_else(|| request.media_type.clone()) {
        payload = payload.with_media_type(media_type);
    }
    request = request.with_ontology(payload);

    if let Some(title) = &cli.title {
        request.graph_title = title.clone();
    } else if request.graph_title.trim().is_empty() {
        request.graph_title = file_name;
    }
    if let Some(graph_type) = &cli.graph_type {
        request.graph_type = graph_type.clone();
    }
    if let Some(visualization) = &cli.visualization {
        request.visualization = visualization.clone();
    }
    if cli.collapse {
        request = request.with_collapse(true);
    }
    if cli.reasoning {
        request = request.with_reasoning(true);
    }
    Ok(request)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&cli);
    let request = build_request(&cli)?;
    let generated = generate(&request)?;

    // Determine output writer
    let mut output_writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    output_writer.write_all(generated.document.as_bytes())?;
    output_writer.flush()?;

    info!(
        nodes = generated.node_count,
        edges = generated.edge_count,
        file = %generated.file_name,
        "generated document"
    );
    if !cli.quiet {
        eprintln!(
            "Generated {} nodes and {} edges for {}",
            generated.node_count, generated.edge_count, generated.file_name
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
