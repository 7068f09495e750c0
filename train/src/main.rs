use std::fs::File;
use std::io::{prelude::*, stderr, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use postag::{
    ConfusionMatrix, CorpusStats, HeldOutCounts, Model, Sentence, TagSet, Tagger,
    DEFAULT_UNKNOWN_WORD_MASS,
};

#[derive(Parser, Debug)]
#[command(about = "A program to train HMM part-of-speech tagging models.")]
struct Args {
    /// A word/TAG annotated training corpus
    train: PathBuf,

    /// A word/TAG annotated validation corpus
    devt: PathBuf,

    /// The file to write the trained model to
    model: PathBuf,
}

fn load_tagged(path: &Path, tag_set: &TagSet) -> Result<Vec<Sentence>, Box<dyn std::error::Error>> {
    eprintln!("Loading {path:?} ...");
    let f = File::open(path)?;
    let f = BufReader::new(f);
    let mut sentences = vec![];
    for (i, line) in f.lines().enumerate() {
        if i % 10000 == 0 {
            eprint!("# of sentences: {i}\r");
            stderr().flush()?;
        }
        let line = line?;
        if line.is_empty() {
            continue;
        }
        sentences.push(Sentence::from_tagged(&line, tag_set)?);
    }
    eprintln!("# of sentences: {}", sentences.len());
    Ok(sentences)
}

fn validate(
    tagger: &Tagger,
    sentences: &[Sentence],
) -> Result<ConfusionMatrix, Box<dyn std::error::Error>> {
    let mut matrix = ConfusionMatrix::new(tagger.model().tag_set());
    for (i, s) in sentences.iter().enumerate() {
        if i % 1000 == 0 {
            eprint!("# of validated sentences: {i}\r");
            stderr().flush()?;
        }
        let predicted = tagger.tag_ids(s.words())?;
        for (&gold, &pred) in s.tags().iter().zip(&predicted) {
            matrix.record(gold, pred);
        }
    }
    eprintln!("# of validated sentences: {}", sentences.len());
    Ok(matrix)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let tag_set = TagSet::penn_treebank();

    let train_sents = load_tagged(&args.train, &tag_set)?;
    let mut stats = CorpusStats::new(&tag_set);
    for s in &train_sents {
        stats.add_sentence(s);
    }
    eprintln!("# of training tokens: {}", stats.n_tokens());

    let mut model = Model::from_stats(tag_set.clone(), stats)?;
    model.smooth_unknown_words(DEFAULT_UNKNOWN_WORD_MASS);

    let devt_sents = load_tagged(&args.devt, &tag_set)?;
    let mut held_out = HeldOutCounts::new(&tag_set);
    for s in &devt_sents {
        held_out.add_sentence(s.tags());
    }

    eprintln!("Validating the unsmoothed model...");
    let tagger = Tagger::new(model);
    let matrix = validate(&tagger, &devt_sents)?;
    eprintln!("Accuracy before interpolation: {}", matrix.accuracy());

    let (lambda1, lambda2) = held_out.estimate()?;
    eprintln!("lambda1 = {lambda1} & lambda2 = {lambda2}");
    let mut model = tagger.into_model();
    model.set_interpolation_weights(lambda1, lambda2)?;

    let mut f = zstd::Encoder::new(File::create(args.model)?, 19)?;
    model.write(&mut f)?;
    f.finish()?;
    eprintln!("Model is saved.");

    eprintln!("Validating the smoothed model...");
    let tagger = Tagger::new(model);
    let matrix = validate(&tagger, &devt_sents)?;

    println!("Confusion matrix:");
    println!("{matrix}");
    println!("Accuracy of the model: {}", matrix.accuracy());

    Ok(())
}
