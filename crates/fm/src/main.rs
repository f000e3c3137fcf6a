//! `fm` -- formulation costing and procurement indents.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    // Until the config is read only the flag is known; afterwards the
    // merged setting decides how errors are printed.
    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => exit_with_error(&e, cli.global.json),
    };

    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("fm=debug,formulary_engine=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Some(Commands::List(args)) => commands::list::run(&ctx, &args),
        Some(Commands::Show(args)) => commands::show::run(&ctx, &args),
        Some(Commands::Indent(args)) => commands::indent::run(&ctx, &args),
        Some(Commands::Prices(args)) => commands::prices::run(&ctx, &args),
        Some(Commands::Validate) => commands::validate::run(&ctx),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, &args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        exit_with_error(&e, ctx.json);
    }
}

/// Print the error chain on stderr (as `{"error": ...}` in JSON mode) and
/// exit with code 1.
fn exit_with_error(e: &anyhow::Error, json: bool) -> ! {
    if json {
        let err_json = serde_json::json!({
            "error": format!("{:#}", e),
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else {
        eprintln!("Error: {:#}", e);
    }
    std::process::exit(1);
}
