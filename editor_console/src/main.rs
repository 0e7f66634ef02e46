//! # Editor Console
//!
//! Main entry point: load a document, replay a key script, print the result.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use editor_console::{ConsoleConfig, ConsoleRuntime};
use editor_core::EditorConfig;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("editor_console=info,editor_core=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("editor-console", String::as_str);

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let mut runtime = ConsoleRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to start console: {}", e);
        process::exit(1);
    });

    runtime.run();

    match runtime.output() {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Render error: {}", e);
            process::exit(1);
        }
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_args(args: &[String]) -> Result<ConsoleConfig, String> {
    let mut config = ConsoleConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--file" | "-f" => {
                config.file = Some(PathBuf::from(next_value(args, &mut i, "--file")?));
            }
            "--text" | "-t" => {
                config.text = Some(next_value(args, &mut i, "--text")?.to_string());
            }
            "--script" | "-s" => {
                let path = next_value(args, &mut i, "--script")?;
                let script_text = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read script file: {}", e))?;
                config.script = Some(script_text);
            }
            "--config" | "-c" => {
                let path = next_value(args, &mut i, "--config")?;
                let json = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file: {}", e))?;
                config.editor = EditorConfig::from_json(&json).map_err(|e| e.to_string())?;
            }
            "--json" => {
                config.json = true;
            }
            "--help" | "-h" => {
                print_usage(args.first().map_or("editor-console", String::as_str));
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --file <FILE>        Document to open");
    eprintln!("  -t, --text <TEXT>        Inline document contents (ignored with --file)");
    eprintln!("  -s, --script <FILE>      Key script to replay");
    eprintln!("  -c, --config <FILE>      Editor settings (JSON)");
    eprintln!("  --json                   Print the final state as JSON");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --file notes.txt --script edit.keys", program);
    eprintln!("  {} --text 'hello world' --script jump.keys --json", program);
}
