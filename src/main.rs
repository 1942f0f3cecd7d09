use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use gdb_ddl_generator::{
    cli::{self, Cli, Command, Source},
    import::{self, Collaborators, DatasetReport, PackageLayers, ScriptRecorder},
    pipeline::{generate_scripts, DatasetOutcome},
    workspace, Error,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to initialise logging: {err}");
    }

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {}", report_chain(&err));
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` if at least one dataset failed
fn run(command: Command) -> Result<bool, Error> {
    match command {
        Command::Generate { source, output } => {
            let outcomes = load_scripts(&source)?;
            let mut out = open_output(output.as_deref())?;
            let mut ok = true;
            for outcome in outcomes {
                match outcome.script {
                    Ok(script) => {
                        info!(dataset = %outcome.name, "generated");
                        write!(out, "-- {}\n{}\n", script.table_name, script.sql)
                            .map_err(|source| write_error(output.as_deref(), source))?;
                    }
                    Err(err) => {
                        ok = false;
                        warn!(dataset = %outcome.name, %err, "failed");
                        eprintln!("Error generating {}: {}", outcome.name, report_chain(&err));
                    }
                }
            }
            out.flush()
                .map_err(|source| write_error(output.as_deref(), source))?;
            Ok(ok)
        }
        Command::Plan {
            source,
            package,
            connection,
            layers,
            output,
        } => {
            let target = cli::import_target(package, connection)?;
            let outcomes = load_scripts(&source)?;
            let layers = PackageLayers::new(layers);
            let recorder = ScriptRecorder::new(open_output(output.as_deref())?);
            let collaborators = Collaborators {
                layers: &layers,
                executor: &recorder,
                importer: &recorder,
            };
            let reports = import::run_import(outcomes, &source.options(), &target, &collaborators);
            recorder
                .into_inner()
                .flush()
                .map_err(|source| write_error(output.as_deref(), source))?;

            for report in &reports {
                eprintln!("{report}");
            }
            Ok(!reports.iter().any(DatasetReport::is_failure))
        }
    }
}

fn load_scripts(source: &Source) -> Result<Vec<DatasetOutcome>, Error> {
    cli::validate_source(source)?;
    let text = read_input(source)?;
    let options = roxmltree::ParsingOptions {
        allow_dtd: source.allow_dtd,
        ..roxmltree::ParsingOptions::default()
    };
    let document = roxmltree::Document::parse_with_options(&text, options)
        .map_err(workspace::SchemaError::from)?;
    Ok(generate_scripts(&document, &source.options())?)
}

fn read_input(source: &Source) -> Result<String, Error> {
    if source.is_url() {
        let fetch_error = |err| Error::Fetch {
            url: source.input.clone(),
            source: err,
        };
        reqwest::blocking::get(&source.input)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(fetch_error)
    } else {
        std::fs::read_to_string(&source.input).map_err(|err| Error::Read {
            path: PathBuf::from(&source.input),
            source: err,
        })
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, Error> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).map_err(|source| write_error(Some(path), source))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_error(path: Option<&Path>, source: io::Error) -> Error {
    Error::Write {
        path: path.map_or_else(|| PathBuf::from("<stdout>"), Path::to_path_buf),
        source,
    }
}

fn report_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
