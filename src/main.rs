use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use std::{fs::read_to_string, process::ExitCode};

#[derive(Debug, Parser)]
#[clap(name = "popcorn", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: PopcornCommand,
}

#[derive(Debug, Subcommand)]
pub enum PopcornCommand {
    /// Print the token stream of a source file.
    Tokenize { path: PathBuf },
    /// Print the parsed program as tagged JSON.
    Parse { path: PathBuf },
    /// Evaluate a source file and print its final value.
    Run { path: PathBuf },
}

fn main() -> ExitCode {
    popcorn_main().expect("Encountered an error!")
}

fn popcorn_main() -> Result<ExitCode> {
    color_eyre::install().expect("Can't fail at first call!");
    let args = CLArgs::parse();
    match args.routine {
        PopcornCommand::Tokenize { path } => {
            let src = read_to_string(path)?;
            if !tokenize(&src) {
                return Ok(ExitCode::from(65));
            }
        }
        PopcornCommand::Parse { path } => {
            let src = read_to_string(path)?;
            if !parse(&src)? {
                return Ok(ExitCode::from(65));
            }
        }
        PopcornCommand::Run { path } => {
            let src = read_to_string(path)?;
            return run(&src);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn tokenize(src: &str) -> bool {
    use popcorn::lexer::{Lexer, TokenKind};

    let mut scanner = Lexer::new(src);
    loop {
        match scanner.next_token() {
            Ok(token) => {
                let lexeme = scanner.get_lexeme(&token.span).unwrap_or_default();
                println!("{} {:?}", token.kind, lexeme);
                if matches!(token.kind, TokenKind::Eof) {
                    return true;
                }
            }
            Err(error) => {
                eprintln!("{error}");
                return false;
            }
        }
    }
}

fn parse(src: &str) -> Result<bool> {
    use popcorn::parser::produce_ast;

    match produce_ast(src) {
        Ok(program) => {
            println!("{}", serde_json::to_string_pretty(&program)?);
            Ok(true)
        }
        Err(error) => {
            eprintln!("{error}");
            Ok(false)
        }
    }
}

fn run(src: &str) -> Result<ExitCode> {
    use popcorn::interpreter::{evaluate, Environment};
    use popcorn::parser::produce_ast;

    let program = match produce_ast(src) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{error}");
            return Ok(ExitCode::from(65));
        }
    };
    let mut environment = Environment::new();
    match evaluate(&program, &mut environment) {
        Ok(value) => {
            println!("{value}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{error}");
            Ok(ExitCode::from(70))
        }
    }
}
