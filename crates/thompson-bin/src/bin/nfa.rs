use std::{fs, io::Read, path::PathBuf, process::ExitCode};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use thompson_re::{
    build_automaton, expand, run_suite, Automaton, DisplayIds, Postfix, SavedAutomaton, Simulation,
};

#[derive(Parser)]
#[command(name = "nfa", about = "Regex to NFA converter using Thompson's construction")]
struct Cli {
    /// Print the intermediate stages of every conversion to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the postfix form and transitions of a regex
    Convert {
        regex: String,
        /// Emit graphviz source instead of the transition list
        #[arg(long)]
        dot: bool,
    },
    /// Decide whether the NFA for a regex accepts a string
    Simulate { regex: String, input: String },
    /// Run one test string per line, read from FILE or stdin
    Suite { regex: String, file: Option<PathBuf> },
    /// Build a regex and write the result to PATH
    Save { regex: String, path: PathBuf },
    /// Redisplay a saved NFA, optionally simulating strings against it
    Load {
        path: PathBuf,
        #[arg(long = "simulate", value_name = "INPUT")]
        inputs: Vec<String>,
    },
}

fn compile(regex: &str, verbose: bool) -> anyhow::Result<(Automaton, Postfix)> {
    let (nfa, postfix) =
        build_automaton(regex).with_context(|| format!("Invalid regex '{}'", regex))?;
    if verbose {
        eprintln!("regex = {}", regex);
        if let Ok(expanded) = expand(regex) {
            eprintln!("expanded = {}", expanded);
        }
        eprintln!("postfix = {}", postfix);
        eprintln!("states = {}", nfa.len());
    }

    Ok((nfa, postfix))
}

fn print_conversion(nfa: &Automaton, postfix: &Postfix) {
    let description = nfa.describe();
    println!("Postfix: {}\n\nTransitions:\n{}", postfix, description);
}

fn print_step(simulation: &Simulation<'_>, ids: &DisplayIds, consumed: Option<char>) {
    let active: Vec<String> = simulation.current().map(|s| ids.name(s)).collect();
    match consumed {
        Some(c) => eprintln!("after '{}': {{{}}}", c, active.join(", ")),
        None => eprintln!("start: {{{}}}", active.join(", ")),
    }
}

fn run_simulation(nfa: &Automaton, input: &str, verbose: bool) -> bool {
    if !verbose {
        return nfa.simulate(input);
    }

    let ids = DisplayIds::new(nfa);
    let mut simulation = nfa.simulation();
    print_step(&simulation, &ids, None);
    for c in input.chars() {
        simulation.step(c);
        print_step(&simulation, &ids, Some(c));
    }

    simulation.is_accepting()
}

fn report(input: &str, accepted: bool) {
    let verdict = if accepted { "accepted" } else { "rejected" };
    println!("String '{}' is {} by the NFA.", input, verdict);
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Convert { regex, dot } => {
            let (nfa, postfix) = compile(&regex, verbose)?;
            if dot {
                println!("{}", nfa.dot());
            } else {
                print_conversion(&nfa, &postfix);
            }
        }
        Command::Simulate { regex, input } => {
            let (nfa, _) = compile(&regex, verbose)?;
            let accepted = run_simulation(&nfa, &input, verbose);
            report(&input, accepted);
        }
        Command::Suite { regex, file } => {
            let (nfa, _) = compile(&regex, verbose)?;
            let test_strings = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("Unable to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Unable to read test strings from stdin")?;
                    buf
                }
            };

            let results = run_suite(&nfa, &test_strings);
            if results.is_empty() {
                bail!("Please enter at least one test string.");
            }
            for result in results {
                println!("{}\t{}", result.input, result.verdict());
            }
        }
        Command::Save { regex, path } => {
            let (nfa, postfix) = compile(&regex, verbose)?;
            let bytes = SavedAutomaton::new(&nfa, &postfix).to_bytes()?;
            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}, {} bytes", path.display(), bytes.len());
        }
        Command::Load { path, inputs } => {
            let bytes =
                fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            let saved = SavedAutomaton::from_bytes(&bytes)?;
            println!("Postfix: {}\n\nTransitions:\n{}", saved.postfix, saved.description());

            if !inputs.is_empty() {
                let (nfa, _) = saved
                    .restore()
                    .with_context(|| format!("Failed to restore NFA from {}", path.display()))?;
                for input in inputs {
                    let accepted = run_simulation(&nfa, &input, verbose);
                    report(&input, accepted);
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
