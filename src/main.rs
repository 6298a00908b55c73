use std::fmt::Display;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser as _;
use texmath_parser::{lex, serialize, Parser};

/// Parse LaTeX-like math markup.
#[derive(clap::Parser)]
#[command(name = "texmath", version, about = "Parse LaTeX-like math markup")]
struct Cli {
    /// Markup file to read (stdin when omitted)
    input: Option<PathBuf>,

    /// Print the parsed tree as JSON (the default)
    #[arg(long, conflicts_with_all = ["tokens", "eval"])]
    ast: bool,

    /// Print the lexed tokens instead of parsing
    #[arg(long, conflicts_with = "eval")]
    tokens: bool,

    /// Compile and evaluate with comma separated values, one per variable occurrence
    #[arg(
        long,
        value_name = "VALUES",
        num_args = 0..=1,
        default_missing_value = "",
        allow_hyphen_values = true
    )]
    eval: Option<String>,

    /// Read runs of numbers and variables as products
    #[arg(long)]
    implicit_multiplication: bool,
}

fn fail(err: impl Display) -> ! {
    eprintln!("error: {err}");
    process::exit(1);
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Comma separated values; blank input means no values, but every field must be filled
fn parse_values(values: &str) -> Result<Vec<f64>, String> {
    if values.trim().is_empty() {
        return Ok(Vec::new());
    }
    values
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(pos, val)| match val {
            "" => Err(format!("empty value at position {}", pos + 1)),
            _ => val.parse().map_err(|_| format!("invalid value `{val}`")),
        })
        .collect()
}

fn main() {
    let cli = Cli::parse();
    let source = match read_input(cli.input.as_ref()) {
        Ok(source) => source,
        Err(err) => fail(format!("cannot read input: {err}")),
    };
    let source = source.trim_end();
    let tokens = lex(source);

    if cli.tokens {
        for tok in &tokens {
            println!("{:?}\t{}..{}\t{}", tok.kind, tok.start, tok.end, tok.text);
        }
        return;
    }

    let parser = Parser::new().with_implicit_multiplication(cli.implicit_multiplication);
    let tree = parser.parse_complete(&tokens).unwrap_or_else(|err| fail(err));

    match cli.eval {
        Some(values) if !cli.ast => {
            let values = parse_values(&values).unwrap_or_else(|err| fail(err));
            let result = tree
                .compile()
                .and_then(|func| func.call(&values))
                .unwrap_or_else(|err| fail(err));
            println!("{result}");
        }
        _ => match serialize::to_json_pretty(&tree) {
            Ok(json) => println!("{json}"),
            Err(err) => fail(err),
        },
    }
}
