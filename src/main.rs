use clap::Parser;
use miette::Result;
use shoplist::cli::{Cli, Commands, GlobalOpts};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Exit quietly when stdout is a closed pipe (`shoplist list | head`)
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global);

    match cli.command {
        Commands::Add(args) => shoplist::cli::commands::add::run(args, &global),
        Commands::Edit(args) => shoplist::cli::commands::edit::run(args, &global),
        Commands::Rm(args) => shoplist::cli::commands::rm::run(args, &global),
        Commands::List(args) => shoplist::cli::commands::list::run(args, &global),
        Commands::Show(args) => shoplist::cli::commands::show::run(args, &global),
        Commands::Total => shoplist::cli::commands::total::run(&global),
        Commands::Import(args) => shoplist::cli::commands::import::run(args, &global),
        Commands::Config(cmd) => shoplist::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => shoplist::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `SHOPLIST_LOG` overrides the level picked from the flags
fn init_logging(global: &GlobalOpts) {
    let default_level = if global.verbose {
        "shoplist=debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("SHOPLIST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
