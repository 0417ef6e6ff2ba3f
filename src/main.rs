use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use exprcalc::{
    Calculator,
    error::ExpressionError,
    interpreter::{
        evaluator,
        parser::{DEFAULT_MAX_DEPTH, ParserConfig},
        registry::FunctionRegistry,
    },
    util::num::format_number,
};

/// exprcalc evaluates infix arithmetic expressions such as `2 + 3 * 4` or
/// `POWER(2, 10) / 4`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to evaluate. Without one (and without --file), an
    /// interactive loop is started.
    expression: Option<String>,

    /// Evaluate every non-blank line of a file instead.
    #[arg(short, long, conflicts_with = "expression")]
    file: Option<PathBuf>,

    /// Print the tokens, the postfix program and the parse tree before the
    /// result.
    #[arg(short, long)]
    verbose: bool,

    /// Enable MOD, IDIVIDE, SQRT and the trigonometric functions.
    #[arg(long)]
    scientific: bool,

    /// Maximum nesting of brackets and function arguments.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let registry = if args.scientific {
        FunctionRegistry::scientific()
    } else {
        FunctionRegistry::new()
    };
    let config = ParserConfig { max_depth: args.max_depth };
    let calculator = Calculator::with_registry(registry).with_config(config);

    if let Some(expression) = &args.expression {
        return if report(&calculator, expression, args.verbose) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    if let Some(path) = &args.file {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", path.display());
                return ExitCode::FAILURE;
            },
        };

        let mut all_ok = true;
        for line in contents.lines().filter(|line| !line.trim().is_empty()) {
            all_ok &= report(&calculator, line, args.verbose);
        }
        return if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    }

    if let Err(e) = repl(&calculator, args.verbose) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter)
                                     .with_writer(io::stderr)
                                     .try_init();
}

/// Reads expressions until an empty line or end of input.
fn repl(calculator: &Calculator, verbose: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("Enter infix expression");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            return Ok(());
        }
        report(calculator, &line, verbose);
    }
}

/// Evaluates one expression and prints the result or the error. Returns
/// whether evaluation succeeded.
fn report(calculator: &Calculator, source: &str, verbose: bool) -> bool {
    let outcome = if verbose {
        verbose_evaluate(calculator, source)
    } else {
        calculator.evaluate(source)
    };

    match outcome {
        Ok(value) => {
            println!("{}", format_number(value));
            true
        },
        Err(e) => {
            print_error(source, &e);
            false
        },
    }
}

fn verbose_evaluate(calculator: &Calculator, source: &str) -> Result<f64, ExpressionError> {
    let compilation = calculator.compile(source)?;
    let tokens = compilation.tokens.iter().map(ToString::to_string).collect::<Vec<_>>();

    println!("Tokens: {}", tokens.join(", "));
    println!("RPN: {}", compilation.instructions);
    println!("Tree ({} nodes):", compilation.tree.size());
    print!("{}", compilation.tree);

    evaluator::evaluate(&compilation.instructions, calculator.registry()).map_err(Into::into)
}

/// Prints the error, with a caret under the offending character when the
/// error has a position.
fn print_error(source: &str, error: &ExpressionError) {
    eprintln!("{error}");
    if let Some(offset) = error.offset() {
        eprintln!("  {source}");
        eprintln!("  {:offset$}^", "");
    }
}
