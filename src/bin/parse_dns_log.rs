use anyhow::Context;
use clap::Parser;
use crits_import::core::dns_log;
use std::fs::File;
use std::io::{BufReader, BufWriter};

#[derive(Parser)]
#[command(name = "parse-dns-log")]
#[command(about = "Extract unique queried names from a DNS log for list imports")]
struct Args {
    /// DNS log to read (queried name is the last field of each line)
    #[arg(short, long, default_value = "dns.log")]
    input: String,

    /// Where to write the de-duplicated names
    #[arg(short, long, default_value = "parsed.dns.log")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    println!("Parsing DNS log {}", args.input);

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open DNS log '{}'", args.input))?;
    let queries = dns_log::extract_queries(BufReader::new(input))?;

    let output = File::create(&args.output)
        .with_context(|| format!("Failed to create '{}'", args.output))?;
    dns_log::write_queries(BufWriter::new(output), &queries)?;

    println!("📁 {} unique names written to {}", queries.len(), args.output);
    Ok(())
}
