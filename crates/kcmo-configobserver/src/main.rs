use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use kcmo_configobserver::prelude::*;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("kcmo-configobserver")
        .version(kcmo_configobserver::VERSION)
        .about("Run kube-controller-manager config observers against local manifests")
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("observe")
                .about("Observe the cloud provider from an infrastructure manifest")
                .arg(
                    Arg::new("infrastructure")
                        .long("infrastructure")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Infrastructure manifest (YAML)"),
                )
                .arg(
                    Arg::new("existing")
                        .long("existing")
                        .value_parser(value_parser!(PathBuf))
                        .help("Configuration currently in effect (YAML or JSON)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Observer configuration (TOML or YAML)"),
                )
                .arg(
                    Arg::new("fail-sync")
                        .long("fail-sync")
                        .action(ArgAction::SetTrue)
                        .help("Reject every configmap sync request"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the observed fragment as JSON"),
                ),
        )
        .subcommand(Command::new("defaults").about("Print the default observer configuration"))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_existing(path: &Path) -> Result<ObservedConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading existing config {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(ObservedConfig::new());
    }
    serde_yaml::from_str(&raw).with_context(|| format!("parsing existing config {}", path.display()))
}

fn observe(args: &ArgMatches) -> Result<ExitCode> {
    let infrastructure = args
        .get_one::<PathBuf>("infrastructure")
        .context("--infrastructure is required")?;

    let config = match args.get_one::<PathBuf>("config") {
        Some(path) => ObserverConfig::load(path)?,
        None => ObserverConfig::default(),
    };
    let existing = match args.get_one::<PathBuf>("existing") {
        Some(path) => load_existing(path)?,
        None => ObservedConfig::new(),
    };

    let syncer = if args.get_flag("fail-sync") {
        DryRunSyncer::failing("sync rejected by --fail-sync")
    } else {
        DryRunSyncer::new()
    };
    let listers = StaticListers::new(FileInfrastructureLister::new(infrastructure), syncer);
    let recorder = InMemoryRecorder::new();

    let observer = CloudProviderObserver::with_config(config);
    let (observed, errs) = observer.observe(&listers, &recorder, &existing);

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&observed)?);
    } else {
        print!("{}", serde_yaml::to_string(&observed)?);
    }

    for request in listers.syncer().requests() {
        eprintln!("sync: {} -> {}", request.source, request.destination);
    }
    for event in recorder.events() {
        eprintln!("event: {} {}: {}", event.event_type, event.reason, event.message);
    }
    for err in &errs {
        eprintln!("error: {err}");
    }

    Ok(if errs.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> Result<ExitCode> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json"));

    match matches.subcommand() {
        Some(("observe", args)) => observe(args),
        Some(("defaults", _)) => {
            print!("{}", ObserverConfig::default().to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}
