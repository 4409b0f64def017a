use std::{fmt::Display, str::FromStr};

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use regaut_lib::{
    automaton::{FiniteAutomaton, minimization::Minimizable},
    build_automaton,
    config::RegautConfig,
    format::{dot::to_graphviz, writer},
    is_isomorphic,
    validation::same_language::find_difference,
};
use serde::Serialize;

/// How far the regular expression is processed before it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Nfa,
    Dfa,
    Min,
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nfa" => Ok(Stage::Nfa),
            "dfa" => Ok(Stage::Dfa),
            "min" | "minimal" => Ok(Stage::Min),
            _ => Err(format!("Invalid stage: {}", s)),
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Nfa => write!(f, "nfa"),
            Stage::Dfa => write!(f, "dfa"),
            Stage::Min => write!(f, "min"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Text,
    Dot,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid format: {}", s)),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Regular Automata Tool")]
#[command(version = "0.1")]
#[command(about = "Build, minimize and compare finite automata of regular expressions", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Raise the log level, can be repeated.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the automaton of a regular expression.
    Build {
        regex: String,

        #[arg(short, long, default_value_t = Stage::Min)]
        stage: Stage,

        #[arg(short, long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check which words match a regular expression.
    Accepts {
        regex: String,

        words: Vec<String>,
    },
    /// Check whether two automata accept the same language. Each argument is
    /// a regular expression or `@path` to an automaton file.
    Compare {
        a: String,

        b: String,

        /// Longest word tried when searching for a distinguishing word.
        #[arg(long, default_value_t = 8)]
        max_length: usize,
    },
}

#[derive(Debug, Serialize)]
struct WordResult {
    word: String,
    accepted: bool,
}

#[derive(Debug, Serialize)]
struct CompareResult {
    equivalent: bool,
    states: (usize, usize),
    mapping: Option<Vec<(String, String)>>,
    counterexample: Option<String>,
}

fn init_logging(config: &RegautConfig, verbose: u8) {
    if !config.logger.enabled && verbose == 0 {
        return;
    }

    let level = config.logger.log_level.raised_by(verbose);

    tracing_subscriber::fmt()
        .with_max_level(level.to_tracing_level())
        .with_writer(std::io::stderr)
        .init();
}

fn load(argument: &str) -> anyhow::Result<FiniteAutomaton> {
    match argument.strip_prefix('@') {
        Some(path) => FiniteAutomaton::from_file(path)
            .with_context(|| format!("failed to load automaton from {}", path)),
        None => build_automaton(argument)
            .with_context(|| format!("failed to parse regular expression `{}`", argument)),
    }
}

fn minimal(automaton: &FiniteAutomaton, config: &RegautConfig) -> FiniteAutomaton {
    if automaton.is_deterministic() {
        automaton.minimize()
    } else {
        automaton
            .determinize_with(config.determinize.options())
            .minimize()
    }
}

fn build(
    regex: &str,
    stage: Stage,
    format: OutputFormat,
    config: &RegautConfig,
) -> anyhow::Result<()> {
    let nfa = load(regex)?;

    let automaton = match stage {
        Stage::Nfa => nfa,
        Stage::Dfa => nfa.determinize_with(config.determinize.options()),
        Stage::Min => minimal(&nfa, config),
    };

    tracing::info!(
        %stage,
        states = automaton.state_count(),
        transitions = automaton.transition_count(),
        "built automaton"
    );

    match format {
        OutputFormat::Text => print!("{}", writer::write(&automaton)),
        OutputFormat::Dot => print!("{}", to_graphviz(&automaton, &config.dot)),
        OutputFormat::Json => println!("{}", automaton.to_json()?),
    }

    Ok(())
}

fn accepts(regex: &str, words: &[String], config: &RegautConfig) -> anyhow::Result<()> {
    let automaton = minimal(&load(regex)?, config);

    let results = words
        .iter()
        .map(|word| WordResult {
            word: word.clone(),
            accepted: automaton.accepts_str(word),
        })
        .collect::<Vec<_>>();

    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}

fn compare(a: &str, b: &str, max_length: usize, config: &RegautConfig) -> anyhow::Result<()> {
    let min_a = minimal(&load(a)?, config);
    let min_b = minimal(&load(b)?, config);

    let mapping = is_isomorphic(&min_a, &min_b);
    let counterexample: Option<String> = match mapping {
        Some(_) => None,
        None => find_difference(&min_a, &min_b, max_length).map(|word| word.into_iter().collect()),
    };

    let result = CompareResult {
        equivalent: mapping.is_some(),
        states: (min_a.state_count(), min_b.state_count()),
        mapping: mapping.map(|m| m.label_pairs(&min_a, &min_b)),
        counterexample,
    };

    if result.equivalent {
        eprintln!("{}", "equivalent".bright_green());
    } else {
        eprintln!("{}", "not equivalent".bright_red());
    }
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = RegautConfig::from_optional_file(args.config.as_ref())
        .context("failed to read the configuration")?;

    init_logging(&config, args.verbose);

    match &args.command {
        Command::Build {
            regex,
            stage,
            format,
        } => build(regex, *stage, *format, &config),
        Command::Accepts { regex, words } => accepts(regex, words, &config),
        Command::Compare { a, b, max_length } => compare(a, b, *max_length, &config),
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("{} {:#}", "error:".bright_red(), e);
        std::process::exit(1);
    }
}
