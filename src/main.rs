mod aws_iot;
mod config;
mod error;
mod logging;
mod provision;

use std::path::{Path, PathBuf};

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use aws_iot::IotApi;
use config::{Config, Settings};
use error::Error;

fn build_cli() -> App<'static, 'static> {
    App::new("IoT Provisioner")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Carl Hurd <carl@basilisklabs.com>")
        .about("Registers CA certificates, devices and things with AWS IoT")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .help("JSON file with provisioning settings")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("region")
                .long("region")
                .env("AWS_REGION")
                .help("AWS region to provision in [default: ap-south-1]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("endpoint")
                .long("endpoint")
                .env("IOT_ENDPOINT")
                .help("Custom IoT control plane endpoint")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("access-key-id")
                .long("access-key-id")
                .env("AWS_ACCESS_KEY_ID")
                .hide_env_values(true)
                .help("Access key id used to sign requests")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("secret-access-key")
                .long("secret-access-key")
                .env("AWS_SECRET_ACCESS_KEY")
                .hide_env_values(true)
                .help("Secret key used to sign requests")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("session-token")
                .long("session-token")
                .env("AWS_SESSION_TOKEN")
                .hide_env_values(true)
                .help("Session token for temporary credentials")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("template")
                .long("template")
                .help("Provisioning template [default: template.json]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("serial-number")
                .long("serial-number")
                .help("Serial number passed to the provisioning template [default: 0x12345]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("thing-type")
                .long("thing-type")
                .help("Value of the Type attribute on created things [default: testthing]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increase log verbosity"),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("Register the CA, register the thing and describe it (default)")
                .arg(
                    Arg::with_name("thing-name")
                        .long("thing-name")
                        .help("Thing to provision [default: iot-dev-1]")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("ca-cert")
                        .long("ca-cert")
                        .help("CA certificate [default: rootCA.pem]")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("verification-cert")
                        .long("verification-cert")
                        .help("Verification certificate [default: verificationCert.pem]")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("device-cert")
                        .long("device-cert")
                        .help("Device certificate [default: devCert.pem]")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("describe-thing")
                .about("Print the version and name of a thing")
                .arg(Arg::with_name("NAME").required(true)),
        )
        .subcommand(
            SubCommand::with_name("delete-thing")
                .about("Delete a thing if it is still at the expected version")
                .arg(Arg::with_name("NAME").required(true))
                .arg(
                    Arg::with_name("VERSION")
                        .required(true)
                        .validator(|v| v.parse::<i64>().map(|_| ()).map_err(|e| e.to_string())),
                ),
        )
        .subcommand(
            SubCommand::with_name("create-thing")
                .about("Create a thing carrying the configured thing type")
                .arg(Arg::with_name("NAME").required(true)),
        )
        .subcommand(
            SubCommand::with_name("register-ca")
                .about("Register a CA certificate with auto-registration enabled")
                .arg(Arg::with_name("CA_CERT").required(true))
                .arg(Arg::with_name("VERIFICATION_CERT").required(true)),
        )
        .subcommand(
            SubCommand::with_name("deregister-ca")
                .about("Deactivate a CA certificate and disable auto-registration")
                .arg(Arg::with_name("CERT_ID").required(true)),
        )
        .subcommand(
            SubCommand::with_name("register-thing")
                .about("Register a thing and its device certificate via the provisioning template")
                .arg(Arg::with_name("NAME").required(true))
                .arg(Arg::with_name("CA_CERT").required(true))
                .arg(Arg::with_name("DEVICE_CERT").required(true)),
        )
        .subcommand(
            SubCommand::with_name("deregister-device-cert")
                .about("Deactivate a device certificate")
                .arg(Arg::with_name("CERT_ID").required(true)),
        )
}

fn owned(matches: &ArgMatches, name: &str) -> Option<String> {
    matches.value_of(name).map(String::from)
}

fn path(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.value_of(name).map(PathBuf::from)
}

/// Settings given on the command line or through the environment.
fn settings_from_matches(matches: &ArgMatches) -> Settings {
    let run = matches.subcommand_matches("run");

    Settings {
        region: owned(matches, "region"),
        endpoint: owned(matches, "endpoint"),
        access_key_id: owned(matches, "access-key-id"),
        secret_access_key: owned(matches, "secret-access-key"),
        session_token: owned(matches, "session-token"),
        template_path: path(matches, "template"),
        serial_number: owned(matches, "serial-number"),
        thing_type: owned(matches, "thing-type"),
        thing_name: run.and_then(|m| owned(m, "thing-name")),
        ca_cert: run.and_then(|m| path(m, "ca-cert")),
        verification_cert: run.and_then(|m| path(m, "verification-cert")),
        device_cert: run.and_then(|m| path(m, "device-cert")),
    }
}

fn load_config(matches: &ArgMatches) -> Result<Config, Error> {
    let base = match matches.value_of("config") {
        Some(file) => Settings::from_file(Path::new(file))?,
        None => Settings::default(),
    };

    Config::resolve(base.merge(settings_from_matches(matches)))
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Error> {
    matches
        .value_of(name)
        .ok_or_else(|| Error::Config(format!("missing argument {}", name)))
}

async fn dispatch<C: IotApi + ?Sized>(
    client: &C,
    config: &Config,
    matches: &ArgMatches<'_>,
) -> Result<(), Error> {
    match matches.subcommand() {
        ("describe-thing", Some(sub)) => {
            provision::describe_thing(client, required(sub, "NAME")?).await?;
        }
        ("delete-thing", Some(sub)) => {
            let version = required(sub, "VERSION")?
                .parse::<i64>()
                .map_err(|e| Error::Config(format!("invalid version: {}", e)))?;
            provision::delete_thing(client, version, required(sub, "NAME")?).await?;
        }
        ("create-thing", Some(sub)) => {
            provision::create_thing(client, config, required(sub, "NAME")?).await?;
        }
        ("register-ca", Some(sub)) => {
            let result = provision::register_ca_certificate(
                client,
                Path::new(required(sub, "CA_CERT")?),
                Path::new(required(sub, "VERIFICATION_CERT")?),
            )
            .await;
            match result {
                Ok(_) => {}
                Err(err @ Error::ReadFile { .. }) => {
                    log::error!("{}, CA certificate not registered", err);
                }
                Err(err) => return Err(err),
            }
        }
        ("deregister-ca", Some(sub)) => {
            provision::deregister_ca_certificate(client, required(sub, "CERT_ID")?).await?;
        }
        ("register-thing", Some(sub)) => {
            provision::register_thing(
                client,
                config,
                required(sub, "NAME")?,
                Path::new(required(sub, "CA_CERT")?),
                Path::new(required(sub, "DEVICE_CERT")?),
            )
            .await?;
        }
        ("deregister-device-cert", Some(sub)) => {
            provision::deregister_device_certificate(client, required(sub, "CERT_ID")?).await?;
        }
        _ => provision::run_default_sequence(client, config).await?,
    }

    Ok(())
}

fn exit_code(result: &Result<(), Error>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run(matches: &ArgMatches<'_>) -> Result<(), Error> {
    let config = load_config(matches)?;
    log::debug!("Using configuration {:?}", config);

    let client = aws_iot::new_client(&config)?;
    dispatch(&client, &config, matches).await
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let level = logging::level_for_verbosity(matches.occurrences_of("verbose"));
    if let Err(err) = logging::setup_logging(level) {
        eprintln!("{}", err);
    }

    let result = run(&matches).await;
    if let Err(err) = &result {
        log::error!("{}", err);
    }

    std::process::exit(exit_code(&result));
}
