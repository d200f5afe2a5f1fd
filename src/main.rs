use std::error::Error;

use clap::{ArgAction, Parser, Subcommand};
use discreta::{
    logic::{BooleanExpressionEngine, table::render},
    sets::{
        SetAlgebraEngine,
        infinite::PREDEFINED_NAMES,
        result::{Evaluation, SetResult},
    },
    succession::{SuccessionEvaluator, format_product},
};
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// discreta is a set of calculators for discrete mathematics: truth tables,
/// set algebra and successions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Logs more details to stderr; repeat for even more.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints the truth table of a propositional formula.
    TruthTable {
        /// The formula, such as `(p ∧ q) → ¬r`.
        expression: String,

        /// Refuses formulas with more distinct variables than this.
        #[arg(long, default_value_t = 16)]
        max_variables: usize,
    },
    /// Evaluates a set-algebra expression.
    Sets {
        /// Defines a finite set, such as `A={1, 2, 3}`. Repeatable.
        #[arg(long = "set", value_name = "NAME=ELEMENTS", value_parser = parse_definition)]
        sets: Vec<(String, String)>,

        /// Removes a set before evaluating. Predefined sets cannot be removed.
        #[arg(long, value_name = "NAME")]
        remove: Vec<String>,

        /// Explains every step of the evaluation.
        #[arg(long)]
        steps: bool,

        /// Lists every registered set.
        #[arg(long)]
        list: bool,

        /// The expression, such as `(A ∪ B) ∩ Cᶜ` or `A ⊆ B`.
        expression: Option<String>,
    },
    /// Evaluates a formula in `k` over a range and prints its sum and product.
    Succession {
        /// The formula, such as `k^2 + 1`.
        formula: String,

        /// First value of `k`.
        #[arg(allow_negative_numbers = true)]
        lower: i64,

        /// Last value of `k`.
        #[arg(allow_negative_numbers = true)]
        upper: i64,

        /// Refuses ranges with more terms than this.
        #[arg(long, default_value_t = 100)]
        max_terms: u64,

        /// Also checks a closed form of the sum by induction.
        #[arg(long, value_name = "FORMULA")]
        closed_form: Option<String>,
    },
}

/// Splits `NAME=ELEMENTS`.
fn parse_definition(text: &str) -> Result<(String, String), String> {
    let Some((name, elements)) = text.split_once('=') else {
        return Err(format!("expected NAME=ELEMENTS, got '{text}'"));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("the set name cannot be empty".to_string());
    }
    Ok((name.to_string(), elements.trim().to_string()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn truth_table(expression: &str, max_variables: usize) -> Result<(), Box<dyn Error>> {
    let mut engine = BooleanExpressionEngine::new();

    let variables = engine.get_variables(expression);
    if variables.len() > max_variables {
        return Err(format!("The formula has {} variables; at most {max_variables} are allowed.",
                           variables.len()).into());
    }

    engine.generate_truth_table(expression)?;
    info!("{} rows generated", engine.truth_table.len());
    print!("{}", render(&engine.truth_table));
    Ok(())
}

fn print_evaluation(evaluation: &Evaluation) {
    for (i, step) in evaluation.steps.iter().enumerate() {
        println!("{}. {step}", i + 1);
    }
    if !evaluation.steps.is_empty() {
        println!();
    }
    println!("{}", evaluation.result);
    if let Some(error) = &evaluation.error {
        eprintln!("{error}");
    }
}

fn sets(definitions: &[(String, String)],
        remove: &[String],
        steps: bool,
        list: bool,
        expression: Option<&str>)
        -> Result<(), Box<dyn Error>> {
    let mut engine = SetAlgebraEngine::new();
    engine.set_step_by_step_mode(steps);

    for (name, elements) in definitions {
        engine.add_set_from_literal(name, elements)?;
    }

    for name in remove {
        if PREDEFINED_NAMES.contains(&name.as_str()) {
            return Err(format!("The predefined set '{name}' cannot be removed.").into());
        }
        engine.remove_set(name)?;
    }

    if list {
        for (name, set) in engine.get_all_sets() {
            match &set {
                SetResult::Infinite { definition, .. } => {
                    println!("{name}: {definition}");
                },
                other => println!("{name} = {other}"),
            }
        }
    }

    if let Some(expression) = expression {
        print_evaluation(&engine.evaluate_expression(expression)?);
    }

    Ok(())
}

fn succession(formula: &str,
              lower: i64,
              upper: i64,
              max_terms: u64,
              closed_form: Option<&str>)
              -> Result<(), Box<dyn Error>> {
    let evaluator = SuccessionEvaluator::with_max_terms(max_terms);
    let result = evaluator.evaluate_succession(formula, lower, upper)?;

    println!("a(k) = {}", result.debug.processed_formula);
    for term in &result.terms {
        println!("k = {:>4}  {:.4}", term.k, term.value);
    }
    println!("Σ = {:.4}", result.sum);
    println!("Π = {}", format_product(result.product));

    if let Some(closed_form) = closed_form {
        let report = evaluator.explain_induction(formula, closed_form, lower, upper)?;
        println!();
        println!("Base case: {}", report.base_case);
        println!("Inductive hypothesis: {}", report.hypothesis);
        println!("Inductive step: {}", report.inductive_step);
        match report.counterexample {
            None => println!("The closed form matches every partial sum for k = {lower}..{upper}."),
            Some(k) => println!("The closed form fails at k = {k}."),
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let outcome = match &args.command {
        Command::TruthTable { expression, max_variables } => truth_table(expression, *max_variables),
        Command::Sets { sets: definitions,
                        remove,
                        steps,
                        list,
                        expression, } => sets(definitions, remove, *steps, *list, expression.as_deref()),
        Command::Succession { formula,
                              lower,
                              upper,
                              max_terms,
                              closed_form, } => {
            succession(formula, *lower, *upper, *max_terms, closed_form.as_deref())
        },
    };

    if let Err(e) = outcome {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
