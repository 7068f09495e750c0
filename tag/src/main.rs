use std::fs::File;
use std::io::{prelude::*, BufReader, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use postag::{to_tagged_line, Model, Tagger};

#[derive(Parser, Debug)]
#[command(about = "A program to tag sentences with a trained model.")]
struct Args {
    /// A file with one space-separated word sequence per line
    test: PathBuf,

    /// The model file to use when tagging
    model: PathBuf,

    /// The file to write the tagged sentences to
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    eprintln!("Loading model file...");
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let model = Model::read(&mut f)?;
    let tagger = Tagger::new(model);

    eprintln!("Start tagging");
    let f = BufReader::new(File::open(args.test)?);
    let mut w = BufWriter::new(File::create(args.output)?);
    let mut n_tokens = 0;
    let start = Instant::now();
    for line in f.lines() {
        let line = line?;
        if line.is_empty() {
            writeln!(w)?;
            continue;
        }
        let words: Vec<&str> = line.split(' ').collect();
        let tags = tagger.tag(&words)?;
        n_tokens += words.len();
        writeln!(w, "{}", to_tagged_line(&words, &tags))?;
    }
    w.flush()?;
    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());
    eprintln!(
        "Speed: {} [tokens/sec]",
        n_tokens as f64 / duration.as_secs_f64()
    );

    Ok(())
}
