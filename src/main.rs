//! Purpose: `serverapi` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Commands emit stable stdout formats (one JSON value per line).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod report_json;

use report_json::{check_report_json, versions_json};
use serverapi::api::{
    CheckIssue, CheckReport, Error, ErrorKind, FixtureClient, FixtureRef, decode_str,
    encode_value, issue_code_for_kind, to_exit_code,
};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage).with_message(clap_error_summary(&err)));
            }
        },
    };

    init_tracing();

    let fixture_dir = cli.dir.unwrap_or_else(|| PathBuf::from("."));
    let client = FixtureClient::new().with_fixture_dir(fixture_dir);

    match cli.command {
        Command::Check { fixtures } => run_check(&client, &fixtures),
        Command::Normalize { fixture } => run_normalize(&client, &fixture),
        Command::Versions => run_versions(),
        Command::Completion { shell } => run_completion(shell),
    }
}

#[derive(Parser)]
#[command(
    name = "serverapi",
    version,
    about = "Strict checking of server API option documents",
    long_about = None,
    before_help = r#"Option documents select a negotiated server API version for driver test runs.

Mental model:
  - `check` validates option documents (strict schema, unknown keys fail)
  - `normalize` re-emits the canonical form of a valid document
  - `versions` lists the supported API versions
"#,
    after_help = r#"EXAMPLES
  $ serverapi check client-options
  $ serverapi --dir tests/fixtures check api-v1 api-strict
  $ echo '{"version":"1"}' | serverapi check -
  $ serverapi normalize client-options

  $ serverapi <command> --help"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        help = "Fixture directory for named fixtures (default: current directory)",
        value_hint = ValueHint::DirPath
    )]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(
        arg_required_else_help = true,
        about = "Check option documents against the strict schema",
        after_help = r#"EXAMPLES
  $ serverapi check client-options
  $ serverapi check ./custom/opts.json
  $ echo '{"version":"1","strict":true}' | serverapi check -

NOTES
  - One JSON report line per document on stdout
  - Every document is checked; the exit code reflects the first failure"#
    )]
    Check {
        #[arg(required = true, help = "Fixture refs: names, paths, or - for stdin")]
        fixtures: Vec<String>,
    },
    #[command(
        arg_required_else_help = true,
        about = "Decode a document and print its normalized form",
        after_help = r#"EXAMPLES
  $ serverapi normalize client-options
  $ echo '{"version":"1","strict":null}' | serverapi normalize -"#
    )]
    Normalize {
        #[arg(help = "Fixture ref: name, path, or - for stdin")]
        fixture: String,
    },
    #[command(about = "List supported server API versions")]
    Versions,
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ serverapi completion bash > ~/.local/share/bash-completion/completions/serverapi
  $ serverapi completion fish > ~/.config/fish/completions/serverapi.fish"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

fn run_check(client: &FixtureClient, fixtures: &[String]) -> Result<RunOutcome, Error> {
    let mut exit_code = 0;
    for fixture in fixtures {
        tracing::debug!(fixture = %fixture, "checking options document");
        let report = if fixture == "-" {
            stdin_report()?
        } else {
            client.check(&fixture_ref_from_arg(fixture))?
        };
        print_json(&check_report_json(&report))?;
        if exit_code == 0 {
            exit_code = exit_code_for_report(&report);
        }
    }
    Ok(RunOutcome::with_code(exit_code))
}

fn run_normalize(client: &FixtureClient, fixture: &str) -> Result<RunOutcome, Error> {
    tracing::debug!(fixture = %fixture, "normalizing options document");
    let options = if fixture == "-" {
        decode_str(&read_stdin_document()?)?
    } else {
        client.load(&fixture_ref_from_arg(fixture))?
    };
    print_json(&encode_value(&options))?;
    Ok(RunOutcome::ok())
}

fn run_versions() -> Result<RunOutcome, Error> {
    print_json(&versions_json())?;
    Ok(RunOutcome::ok())
}

fn run_completion(shell: Shell) -> Result<RunOutcome, Error> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(RunOutcome::ok())
}

fn fixture_ref_from_arg(arg: &str) -> FixtureRef {
    if arg.contains('/') || arg.contains(std::path::MAIN_SEPARATOR) {
        FixtureRef::path(arg)
    } else {
        FixtureRef::name(arg)
    }
}

fn stdin_report() -> Result<CheckReport, Error> {
    let input = read_stdin_document()?;
    let report = match decode_str(&input) {
        Ok(options) => CheckReport::ok(options),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::Malformed | ErrorKind::UnrecognizedField | ErrorKind::InvalidVersion
            ) =>
        {
            let issue = CheckIssue {
                code: issue_code_for_kind(err.kind()).to_string(),
                message: err
                    .message()
                    .unwrap_or("invalid options document")
                    .to_string(),
                fields: err.fields().to_vec(),
            };
            let mut report = CheckReport::invalid(issue);
            if let Some(hint) = err.hint() {
                report = report.with_hint(hint);
            }
            report
        }
        Err(err) => return Err(err),
    };
    Ok(report.with_fixture_ref("-"))
}

fn read_stdin_document() -> Result<String, Error> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to read stdin")
            .with_source(err)
    })?;
    Ok(input)
}

fn exit_code_for_report(report: &CheckReport) -> i32 {
    let kind = match report.issues.first().map(|issue| issue.code.as_str()) {
        None => return 0,
        Some("malformed") => ErrorKind::Malformed,
        Some("unrecognized-field") => ErrorKind::UnrecognizedField,
        Some("invalid-version") => ErrorKind::InvalidVersion,
        Some(_) => ErrorKind::Internal,
    };
    to_exit_code(kind)
}

fn print_json(value: &Value) -> Result<(), Error> {
    let json = serde_json::to_string(value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode JSON output")
            .with_source(err)
    })?;
    println!("{json}");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .next()
        .unwrap_or("invalid arguments")
        .trim_start_matches("error: ")
        .to_string()
}

fn emit_error(err: &Error) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    err.message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:?}", err.kind()))
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = StdError::source(err);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if !err.fields().is_empty() {
        inner.insert("fields".to_string(), json!(err.fields()));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if !err.fields().is_empty() {
        lines.push(format!("  fields: {}", err.fields().join(", ")));
    }
    if let Some(path) = err.path() {
        lines.push(format!("  path: {}", path.display()));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!("  hint: {hint}"));
    }
    for cause in error_causes(err) {
        lines.push(format!("  cause: {cause}"));
    }
    lines.join("\n")
}
