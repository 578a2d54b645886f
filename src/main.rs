use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use ppl_lang::cli::{self, Clause, CliError};
use std::fs;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "ppl")]
#[command(about = "PPL - parse piped processing language queries and rewrite stats clauses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the syntax of a PPL query
    Check {
        /// The PPL query to validate
        query: String,
    },

    /// Export the structured token map of a query clause as JSON
    Tokens {
        /// The PPL query to read
        query: String,

        /// Which clause to export
        #[arg(short, long, value_enum, default_value = "stats")]
        clause: ClauseArg,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Rewrite the query's stats clause from a JSON configuration
    Rewrite {
        /// The PPL query to rewrite
        query: String,

        /// Path to the config JSON (reads from stdin if not provided)
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClauseArg {
    Stats,
    Where,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { query } => run_check(&query),
        Commands::Tokens {
            query,
            clause,
            pretty,
        } => run_tokens(&query, clause, pretty),
        Commands::Rewrite { query, config } => run_rewrite(&query, config),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(query: &str) -> Result<(), CliError> {
    cli::execute_check(query)?;
    println!("Syntax is valid");
    Ok(())
}

fn run_tokens(query: &str, clause: ClauseArg, pretty: bool) -> Result<(), CliError> {
    let clause = match clause {
        ClauseArg::Stats => Clause::Stats,
        ClauseArg::Where => Clause::Where,
    };
    match cli::execute_tokens(query, clause, pretty)? {
        Some(json) => println!("{}", json),
        None => println!("null"),
    }
    Ok(())
}

fn run_rewrite(query: &str, config: Option<String>) -> Result<(), CliError> {
    let config_json = match config {
        Some(path) => fs::read_to_string(path).map_err(CliError::Io)?,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            buffer
        }
        None => return Err(CliError::NoConfig),
    };

    println!("{}", cli::execute_rewrite(query, &config_json)?);
    Ok(())
}
