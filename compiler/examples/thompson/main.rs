use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use thompson_compiler::{compile, parse, preprocess};
use thompson_runtime::accepts;

const USAGE: &str =
    "thompson --input FILE [--outdir DIR] [--word WORD | --words FILE] [--debug|-d]";
const DEFAULT_OUTDIR: &str = "out_nfas";

#[derive(Debug, Default)]
struct Config {
    input: Option<PathBuf>,
    outdir: Option<PathBuf>,
    word: Option<String>,
    words: Option<PathBuf>,
    debug: bool,
}

impl Config {
    fn from_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| anyhow!("{} expects a value", arg));

            match arg.as_str() {
                "--input" => config.input = Some(PathBuf::from(value()?)),
                "--outdir" => config.outdir = Some(PathBuf::from(value()?)),
                "--word" => config.word = Some(value()?),
                "--words" => config.words = Some(PathBuf::from(value()?)),
                "--debug" | "-d" => config.debug = true,
                _ => return Err(anyhow!("unknown argument {:?}\n{}", arg, USAGE)),
            }
        }

        if config.word.is_some() && config.words.is_some() {
            return Err(anyhow!("--word and --words are mutually exclusive\n{}", USAGE));
        }

        Ok(config)
    }
}

/// Reads a file into its trimmed, non-empty lines.
fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Reads one word per line, kept verbatim so that a blank line is the empty
/// word and line `i` stays aligned with pattern `i`.
fn read_words(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("unable to read {}", path.display()))?;

    Ok(split_words(&contents))
}

fn split_words(contents: &str) -> Vec<String> {
    contents.lines().map(str::to_string).collect()
}

/// Pads `words` with empty words until there is one per pattern.
fn align_words(mut words: Vec<String>, patterns: usize) -> Vec<String> {
    if words.len() < patterns {
        words.resize(patterns, String::new());
    }
    words
}

fn prompt_for_word(idx: usize, pattern: &str) -> anyhow::Result<String> {
    print!("word for [{}] {} (ENTER = ε): ", idx, pattern);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("unable to read word from stdin")?;

    let word = line.strip_suffix('\n').unwrap_or(&line);
    Ok(word.strip_suffix('\r').unwrap_or(word).to_string())
}

fn print_debug(pattern: &str) {
    if let Ok(tokens) = preprocess(pattern) {
        let rendered = tokens.iter().map(ToString::to_string).collect::<String>();
        println!("tokens:  {}", rendered);
    }
    if let Ok(postfix) = parse(pattern) {
        let rendered = postfix.iter().map(ToString::to_string).collect::<String>();
        println!("postfix: {}", rendered);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_args(std::env::args().skip(1))?;
    let input = config.input.as_deref().ok_or_else(|| anyhow!(USAGE))?;
    let outdir = config
        .outdir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTDIR));

    let patterns = read_lines(input)?;
    let words = match &config.words {
        Some(path) => align_words(read_words(path)?, patterns.len()),
        None => vec![],
    };

    fs::create_dir_all(&outdir)
        .with_context(|| format!("unable to create {}", outdir.display()))?;

    for (idx, pattern) in patterns.iter().enumerate().map(|(i, p)| (i + 1, p)) {
        println!("{}", "-".repeat(70));
        println!("[{}] regex: {}", idx, pattern);

        if config.debug {
            print_debug(pattern);
        }

        let nfa = match compile(pattern) {
            Ok(nfa) => nfa,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };

        if config.debug {
            print!("{}", nfa);
        }

        let dot_path = outdir.join(format!("nfa_{}.dot", idx));
        fs::write(&dot_path, nfa.to_dot())
            .with_context(|| format!("unable to write {}", dot_path.display()))?;
        println!("automaton written to {}", dot_path.display());

        let word = match (&config.word, config.words.is_some()) {
            (Some(word), _) => word.clone(),
            (None, true) => words[idx - 1].clone(),
            (None, false) => prompt_for_word(idx, pattern)?,
        };

        let verdict = if accepts(&nfa, &word) { "yes" } else { "no" };
        println!("w = {:?}  ->  {}", word, verdict);
    }

    Ok(())
}
