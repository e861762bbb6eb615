//! Command line host for the keysmith password generator.
mod error;
mod messages;

pub use error::Error;

/// Result type for the executable.
pub type Result<T> = std::result::Result<T, Error>;

fn main() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "keysmith=info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => messages::fail(e.to_string()),
    }
}

mod cli {
    use crate::Result;
    use clap::{Parser, Subcommand};
    use keysmith_password::PasswordClass;
    use std::path::PathBuf;

    #[derive(Parser, Debug)]
    #[clap(name = "keysmith", author, version, about, long_about = None)]
    pub struct Keysmith {
        #[clap(subcommand)]
        cmd: Command,
    }

    #[derive(Debug, Subcommand)]
    pub enum Command {
        /// Generate credentials.
        Generate {
            /// Password class.
            #[clap(short, long, default_value = "generic")]
            class: PasswordClass,

            /// JSON file with password requirements.
            #[clap(short, long)]
            requirements: Option<PathBuf>,

            /// TOML generator configuration.
            #[clap(long)]
            config: Option<PathBuf>,

            /// Number of credentials to print.
            #[clap(short = 'n', long, default_value = "1")]
            count: usize,
        },
        /// Check whether a password is weak.
        Check {
            /// TOML generator configuration.
            #[clap(long)]
            config: Option<PathBuf>,

            /// Password to check; read from stdin when omitted.
            password: Option<String>,
        },
        /// Print the default grouping for a class.
        Grouping {
            /// Password class.
            #[clap(short, long)]
            class: PasswordClass,
        },
        /// Print the default generation parameters for a class.
        Defaults {
            /// Password class.
            #[clap(short, long)]
            class: PasswordClass,
        },
    }

    /// Run the command and return the exit status.
    pub fn run() -> Result<i32> {
        let args = Keysmith::parse();
        match args.cmd {
            Command::Generate {
                class,
                requirements,
                config,
                count,
            } => {
                service::generate(class, requirements, config, count)?;
            }
            Command::Check { config, password } => {
                if !service::check(config, password)? {
                    return Ok(1);
                }
            }
            Command::Grouping { class } => service::grouping(class),
            Command::Defaults { class } => service::defaults(class)?,
        }
        Ok(0)
    }

    mod service {
        use crate::{messages, Error, Result};
        use keysmith_password::{
            default_grouping_for, normalize, GeneratorConfig, Generator,
            OsRandom, PasswordClass, RawRequirements,
        };
        use serde::Serialize;
        use std::{io::BufRead, path::PathBuf};

        fn load_config(path: Option<PathBuf>) -> Result<GeneratorConfig> {
            Ok(match path {
                Some(path) => GeneratorConfig::load(path)?,
                None => Default::default(),
            })
        }

        /// Generate and print credentials.
        pub fn generate(
            class: PasswordClass,
            requirements: Option<PathBuf>,
            config: Option<PathBuf>,
            count: usize,
        ) -> Result<()> {
            let config = load_config(config)?;
            let requirements = match requirements {
                Some(path) => Some(RawRequirements::load(path)?),
                None => None,
            };

            let params = normalize(class, requirements.as_ref())?;
            let mut generator = Generator::new(OsRandom, config);
            for _ in 0..count {
                println!("{}", generator.generate_password(&params)?);
            }
            tracing::info!(class = %class, count, "generate::done");
            Ok(())
        }

        /// Print whether a password is weak.
        pub fn check(
            config: Option<PathBuf>,
            password: Option<String>,
        ) -> Result<bool> {
            let config = load_config(config)?;
            let password = match password {
                Some(password) => password,
                None => {
                    let mut line = String::new();
                    std::io::stdin().lock().read_line(&mut line)?;
                    let line = line.trim_end_matches(['\r', '\n']);
                    if line.is_empty() {
                        return Err(Error::NoPassword);
                    }
                    line.to_owned()
                }
            };

            if config.weakness.is_weak(&password) {
                println!("weak");
                messages::warn("password is weak");
                Ok(false)
            } else {
                println!("strong");
                messages::success("password is strong");
                Ok(true)
            }
        }

        /// Print the default grouping.
        pub fn grouping(class: PasswordClass) {
            match default_grouping_for(class) {
                Some(grouping) => println!(
                    "{}x{}",
                    grouping.group_size, grouping.number_of_groups
                ),
                None => println!("none"),
            }
        }

        #[derive(Serialize)]
        struct Defaults<'a> {
            class: String,
            parameters: &'a keysmith_password::GenerationParameters,
        }

        /// Print the default parameters as JSON.
        pub fn defaults(class: PasswordClass) -> Result<()> {
            let parameters = normalize(class, None)?;
            let defaults = Defaults {
                class: class.to_string(),
                parameters: &parameters,
            };
            serde_json::to_writer_pretty(std::io::stdout(), &defaults)?;
            println!();
            Ok(())
        }
    }
}
