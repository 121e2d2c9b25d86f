// spi: Simple Pascal Interpreter with a step-through execution viewer

use std::fs;
use std::io;
use std::process::ExitCode;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, Level};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

use spi::config::{usage, Options, OptionsError, TraceModules};
use spi::memory::store::VariableStore;
use spi::parser::lexer::Lexer;
use spi::parser::printer::dump_program;
use spi::ui::App;
use spi::Error;

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "spi".to_string());

    let options = match Options::parse(args) {
        Ok(options) => options,
        Err(OptionsError::HelpRequested) => {
            eprintln!("{}", usage(&program_name));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", usage(&program_name));
            return ExitCode::from(2);
        }
    };

    init_tracing(options.trace);

    let result = if options.tui {
        run_tui(&options)
    } else {
        run(&options)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            info!(target: "spi", category = e.category(), "run failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Route the selected trace modules to stderr; nothing is installed otherwise
fn init_tracing(modules: TraceModules) {
    if !modules.any() {
        return;
    }

    let filter = modules
        .targets()
        .into_iter()
        .fold(Targets::new(), |filter, target| {
            filter.with_target(target, Level::TRACE)
        })
        .with_target("spi", Level::INFO);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn read_source(options: &Options) -> Result<String, Error> {
    let source = fs::read_to_string(&options.path).map_err(|source| Error::Io {
        path: options.path.clone(),
        source,
    })?;

    if options.dump.text {
        eprintln!("{}", source);
    }
    if options.dump.tokens {
        for token in Lexer::new(&source).tokenize()? {
            let location = token.location();
            eprintln!("{:>4}:{:<4} {}", location.line, location.column, token);
        }
    }
    Ok(source)
}

/// Plain run: evaluate, then print every binding sorted by name
fn run(options: &Options) -> Result<(), Error> {
    let source = read_source(options)?;

    let program = spi::parse(&source)?;
    if options.dump.ast {
        eprint!("{}", dump_program(&program));
    }

    let mut store = VariableStore::new();
    spi::evaluate(&program, &mut store)?;

    print_bindings(&store);
    Ok(())
}

/// Record the run, then browse it; bindings are printed only if it finished
fn run_tui(options: &Options) -> Result<(), Error> {
    let source = read_source(options)?;

    let recording = spi::record(&source, options.snapshot_limit)?;
    if options.dump.ast {
        eprint!("{}", dump_program(&recording.program));
    }

    let mut app = App::new(recording.history, source, recording.error.clone());
    run_app(&mut app).map_err(Error::Terminal)?;

    if let Some(e) = recording.error {
        return Err(e.into());
    }
    print_bindings(&recording.store);
    Ok(())
}

fn run_app(app: &mut App) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn print_bindings(store: &VariableStore) {
    for (name, value) in store.sorted() {
        println!("{} = {}", name, value);
    }
}
