mod cli;
#[cfg(feature = "mysql")]
mod error_presentation;
#[cfg(feature = "mysql")]
mod logging;
#[cfg(feature = "mysql")]
mod settings;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        #[cfg(feature = "mysql")]
        Command::Mysql(args) => mysql::run(&args),
    }
}

#[cfg(feature = "mysql")]
mod mysql {
    use std::process::ExitCode;

    use connprobe_core::{ConnectivityProbe, exit_code};
    use connprobe_driver_mysql::MysqlDriver;
    use tracing::debug;

    use crate::{
        cli::ConnectionArgs,
        error_presentation::{CliResult, EXIT_USAGE, render_runtime_error},
        logging::setup_logging,
        settings::Settings,
    };

    pub(crate) fn run(args: &ConnectionArgs) -> ExitCode {
        setup_logging(&args.log_level);

        match check(args) {
            Ok(code) => ExitCode::from(code),
            Err(error) => {
                eprintln!("{}", render_runtime_error(error));
                ExitCode::from(EXIT_USAGE)
            }
        }
    }

    fn check(args: &ConnectionArgs) -> CliResult<u8> {
        let config = Settings::load(args)?.into_config()?;
        let driver = MysqlDriver;
        let mut probe = ConnectivityProbe::new(&driver, std::io::stdout().lock());

        let result = probe.run(&config);
        if let Err(error) = &result {
            debug!(stage = %error.stage(), exit_code = error.exit_code(), "probe failed");
        }

        Ok(exit_code(&result))
    }
}
