//! Wraptrace demo: wraps a small calculator object and prints its trace.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wraptrace_debug::{
    HumanFormatter, JsonFormatter, RenderConfig, TextRenderer, TraceFormatter, TraceOutput,
};
use wraptrace_engine::{TracerConfig, WrapperTracer};
use wraptrace_foundation::{Error, Object, Value};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    show_help: bool,
    json: bool,
    quiet: bool,
    debug: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "--json" => config.json = true,
            "-q" | "--quiet" => config.quiet = true,
            "--debug" => config.debug = true,
            other => return Err(format!("unknown option: {other}").into()),
        }
    }
    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(&args)?;
    if config.show_help {
        print_help();
        return Ok(());
    }
    init_tracing(config.debug);

    let output = if config.quiet {
        TraceOutput::None
    } else {
        TraceOutput::Stderr
    };
    let renderer = Arc::new(TextRenderer::new(
        RenderConfig::default()
            .with_output(output)
            .with_json_output(config.json),
    ));
    let tracer = WrapperTracer::with_config(
        calculator(),
        Some(renderer),
        None,
        TracerConfig::isolated(),
    );

    tracer.call("add", &[Value::from(2), Value::from(3)])?;
    tracer.call("sum_of_squares", &[Value::from(3), Value::from(4)])?;
    if let Err(err) = tracer.call("divide", &[Value::from(1), Value::from(0)]) {
        eprintln!("divide failed: {err}");
    }

    let info = tracer.info();
    let report = if config.json {
        JsonFormatter::new().pretty().format_many(&info)
    } else {
        HumanFormatter::new().with_elapsed().format_many(&info)
    };
    println!("{report}");
    Ok(())
}

fn calculator() -> Object {
    let proto = Object::with_class("Calculator")
        .with("precision", 2)
        .with_method("square", |_, args| {
            let n = args.first().cloned().unwrap_or_default().expect_number()?;
            Ok(Value::from(n * n))
        });
    Object::with_prototype(proto)
        .with("memory", Value::array([0]))
        .with_method("add", |_, args| {
            let mut total = 0.0;
            for arg in args {
                total += arg.expect_number()?;
            }
            Ok(Value::from(total))
        })
        .with_method("sum_of_squares", |this, args| {
            let mut total = 0.0;
            for arg in args {
                total += this.call("square", std::slice::from_ref(arg))?.expect_number()?;
            }
            this.set("memory", Value::array([total]));
            Ok(Value::from(total))
        })
        .with_method("divide", |_, args| {
            let [a, b] = args else {
                return Err(Error::arity_mismatch("2".to_string(), args.len()));
            };
            let divisor = b.expect_number()?;
            if divisor == 0.0 {
                return Err(Error::thrown("division by zero"));
            }
            Ok(Value::from(a.expect_number()? / divisor))
        })
}

fn print_help() {
    println!(
        r"wraptrace-demo {}

Wraps a sample calculator object and prints every traced call.

USAGE:
    wraptrace-demo [OPTIONS]

OPTIONS:
    -h, --help     Print help information
    --json         Render calls and the final report as JSON
    -q, --quiet    Do not echo rendered lines to stderr
    --debug        Enable internal trace logging (filtered by RUST_LOG)",
        env!("CARGO_PKG_VERSION")
    );
}
