use clap::{command, Parser, Subcommand};

mod graph;
mod repl;
mod run;

#[derive(Debug, Parser)]
#[command(name = "makako")]
#[command(about = "makako: a small tree-walking scripting lang", version = option_env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Eval a script")]
    Run { path: String },

    #[command(about = "Dump the AST of a script as a DOT graph", arg_required_else_help = true)]
    Graph {
        #[arg(required = true)]
        path: String,
        #[arg(long, short = 'o', help = "output path for the DOT file")]
        output: Option<String>,
    },

    #[command(about = "Enter to the repl mode")]
    Repl,
}

pub fn start() {
    let args = Cli::parse();
    match &args.commands {
        Some(command) => match command {
            Commands::Run { path } => {
                run::run(path);
            }
            Commands::Graph { path, output } => {
                graph::graph(path, output.clone());
            }
            Commands::Repl => {
                repl::start();
            }
        },
        _ => {
            repl::start();
        }
    };
}
