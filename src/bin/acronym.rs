use clap::Parser;
use foldersort::acronym::make_acronym;

/// Build an acronym from the first letter of each word.
#[derive(Debug, Parser)]
#[command(name = "acronym", version, about)]
struct Args {
    /// The words of the sentence
    #[arg(required = true)]
    sentence: Vec<String>,

    /// Word to leave out (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "WORD")]
    excluded: Vec<String>,
}

fn main() {
    let args = Args::parse();
    let sentence = args.sentence.join(" ");
    println!("{}", make_acronym(&sentence, &args.excluded));
}
