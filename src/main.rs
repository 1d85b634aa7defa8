// CMS Bootstrap - Startup configuration resolver
// Copyright (c) 2025 CMS Bootstrap Contributors
// Licensed under the MIT License

use cms_bootstrap::cli::{Cli, Commands};
use cms_bootstrap::config::{load_environment, logging_config, EnvSnapshot};
use cms_bootstrap::core::reporting::{
    install_panic_hook, FailureReporter, FailureSeverity, EXIT_CONFIG, EXIT_FATAL,
};
use cms_bootstrap::log_error_with_context;
use cms_bootstrap::logging::{init_logging, TracingSink};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();
    let exit_code = run(&cli);
    process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    // Pure generation; no environment, no logging
    if let Commands::GenerateSecrets(args) = &cli.command {
        return args.execute();
    }

    let env = match load_environment(cli.env_file.as_deref()) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("❌ {e}");
            return EXIT_CONFIG;
        }
    };

    let logging = match logging_config(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            return EXIT_CONFIG;
        }
    };

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    // Dropped at the end of this function, after the command ran
    let _guard = match init_logging(log_level, &logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return EXIT_FATAL;
        }
    };
    install_panic_hook();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "CMS Bootstrap - Startup configuration resolver"
    );

    match execute_command(cli, &env) {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e:#}");
            FailureReporter::new(TracingSink)
                .report(FailureSeverity::Fatal, format!("{e:#}"))
                .exit_code()
        }
    }
}

/// Execute the CLI command
fn execute_command(cli: &Cli, env: &EnvSnapshot) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Check(args) => args.execute(env, &cli.app_root, &TracingSink),
        Commands::Show(args) => args.execute(env, &cli.app_root, &TracingSink),
        Commands::GenerateSecrets(args) => Ok(args.execute()),
    }
}
