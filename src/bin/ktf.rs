//! Command-line entry point: Kubernetes YAML in, Terraform HCL out.
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ktf::{ConvertOptions, SpecRegistry};
use tracing_subscriber::EnvFilter;

/// convert Kubernetes manifests into Terraform HCL
#[derive(Parser, Debug)]
#[command(name = "ktf", version)]
struct CommandLineInterface {
    /// input YAML file, or '-' for stdin
    #[arg(long = "in", default_value = "-")]
    input: String,

    /// output HCL file, or '-' for stdout
    #[arg(long, default_value = "-")]
    out: String,

    /// extra mapping specs (YAML table of name: spec) added to the built-in ones
    #[arg(long)]
    specs: Option<PathBuf>,

    /// spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// fail on resource types without a mapping spec instead of emitting kubernetes_manifest
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = CommandLineInterface::parse();

    let mut registry = SpecRegistry::builtin();
    if let Some(path) = &cli.specs {
        let table = fs::read_to_string(path)
            .with_context(|| format!("reading mapping specs from {}", path.display()))?;
        registry
            .register_table_yaml(&table)
            .with_context(|| format!("loading mapping specs from {}", path.display()))?;
    }

    let options = if cli.strict {
        ConvertOptions::strict()
    } else {
        ConvertOptions::new()
    }
    .with_indent(cli.indent);

    let input = read_input(&cli.input)?;
    let hcl = ktf::convert_str_with_options(&input, &registry, options)
        .with_context(|| format!("converting {}", display_name(&cli.input)))?;
    write_output(&cli.out, &hcl)
}

fn display_name(path: &str) -> &str {
    if path == "-" {
        "<stdin>"
    } else {
        path
    }
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("reading stdin")?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("reading {path}"))
}

fn write_output(path: &str, hcl: &str) -> Result<()> {
    if path == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(hcl.as_bytes()).context("writing stdout")?;
        return stdout.flush().context("flushing stdout");
    }
    fs::write(path, hcl).with_context(|| format!("writing {path}"))
}
