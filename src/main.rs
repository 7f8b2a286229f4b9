use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

use sleeprs::export::{export_report, json, text};
use sleeprs::logging::init_logging;
use sleeprs::{
    classify, parse_clock_time, parse_display_time, AgeGroup, AppConfig, CalculationMode,
    ExportFormat, LogLevel, Period, RecommendationReport, SleepQuality, SleepRsError,
    SleepSettings,
};

/// SleepRS - Sleep Cycle Calculator
///
/// Recommends bedtimes or wake times that line up with whole sleep cycles,
/// rated against age-appropriate sleep guidelines.
#[derive(Parser)]
#[command(name = "sleeprs")]
#[command(author = "SleepRS Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Sleep Cycle Calculator", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Age in years (overrides config; selects the group for age-groups)
    #[arg(short, long, global = true)]
    age: Option<f64>,

    /// Minutes needed to fall asleep, 5-30 (overrides config)
    #[arg(long, global = true)]
    fall_asleep: Option<u32>,

    /// Output format (table, json)
    #[arg(short = 'f', long, global = true)]
    format: Option<ExportFormat>,

    /// Also write the report to this file
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend bedtimes for a wake-up time
    Bedtime {
        /// Wake-up time (H:MM)
        #[arg(short, long)]
        wake: String,

        /// AM or PM
        #[arg(short, long, default_value = "AM")]
        period: Period,
    },

    /// Recommend wake-up times for a bedtime
    Wake {
        /// Bedtime (H:MM)
        #[arg(short, long)]
        bedtime: String,

        /// AM or PM
        #[arg(short, long, default_value = "PM")]
        period: Period,
    },

    /// Recommend wake-up times for going to bed right now
    Now,

    /// Recommend times around a target such as "7:00 AM"
    ///
    /// Uses display.default_mode from the config unless --mode is given.
    At {
        /// Target time (H:MM AM/PM)
        time: String,

        /// bedtime or wake
        #[arg(short, long)]
        mode: Option<CalculationMode>,
    },

    /// Show age-group sleep guidelines, or one group's details with --age
    AgeGroups,

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Set a configuration value (key=value)
        #[arg(short, long)]
        set: Option<String>,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,

        /// Write a default config file
        #[arg(long)]
        init: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        match err.downcast_ref::<SleepRsError>() {
            Some(app_err) => {
                if app_err.severity().to_tracing_level() == tracing::Level::ERROR {
                    tracing::error!(error = %app_err, "Command failed");
                }
                eprintln!("{} {}", "error:".red().bold(), app_err.user_message());
            }
            None => eprintln!("{} {:#}", "error:".red().bold(), err),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
    let config = AppConfig::load_or_default(&config_path);

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(log_config.level, cli.verbose);
    init_logging(&log_config).context("Failed to initialize logging")?;

    if !config.display.colors {
        colored::control::set_override(false);
    }

    let format = cli.format.unwrap_or(config.display.output_format);
    let output = cli.output.as_ref();
    let settings = || -> Result<SleepSettings> {
        Ok(config
            .resolve_settings(cli.age, cli.fall_asleep)
            .map_err(SleepRsError::from)?)
    };

    match &cli.command {
        Commands::Bedtime { wake, period } => {
            let target = parse_clock_time(wake, *period).map_err(SleepRsError::from)?;
            report(CalculationMode::Bedtime, target, &settings()?, format, output)?;
        }

        Commands::Wake { bedtime, period } => {
            let target = parse_clock_time(bedtime, *period).map_err(SleepRsError::from)?;
            report(CalculationMode::WakeTime, target, &settings()?, format, output)?;
        }

        Commands::Now => {
            let now = Local::now().naive_local();
            let target = now.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(now);
            report(CalculationMode::WakeTime, target, &settings()?, format, output)?;
        }

        Commands::At { time, mode } => {
            let target = parse_display_time(time).map_err(SleepRsError::from)?;
            let mode = config.calculation_mode(*mode);
            report(mode, target, &settings()?, format, output)?;
        }

        Commands::AgeGroups => match cli.age {
            Some(age) => print_age_group(classify(age), format)?,
            None => match format {
                ExportFormat::Json => {
                    let groups: Vec<_> = AgeGroup::ALL.iter().map(|g| g.data()).collect();
                    println!("{}", serde_json::to_string_pretty(&groups)?);
                }
                ExportFormat::Text => {
                    println!("{}", "Sleep guidelines by age".cyan().bold());
                    println!("{}", text::age_group_table(AgeGroup::ALL.iter().map(|g| g.data())));
                }
            },
        },

        Commands::Config { list, set, get, init } => {
            if *init {
                let mut fresh = AppConfig::default();
                fresh.save_to_file(&config_path).map_err(SleepRsError::from)?;
                println!("{} {}", "✓ Wrote default config to".green(), config_path.display());
                return Ok(());
            }

            let mut config = AppConfig::load_for_update(&config_path).map_err(SleepRsError::from)?;

            if let Some(key_value) = set {
                let (key, value) = key_value.split_once('=').ok_or_else(|| {
                    SleepRsError::Validation(format!("Expected key=value, got '{}'", key_value))
                })?;
                config
                    .set_value(key.trim(), value.trim())
                    .map_err(SleepRsError::from)?;
                config.save_to_file(&config_path).map_err(SleepRsError::from)?;
                println!("{} {} = {}", "✓ Set".green(), key.trim(), value.trim());
            } else if let Some(key) = get {
                println!("{}", config.get_value(key).map_err(SleepRsError::from)?);
            } else if *list {
                println!(
                    "{} {}",
                    "Configuration:".bold(),
                    config_path.display().to_string().dimmed()
                );
                for (key, value) in config.list_values() {
                    println!("  {:<24} {}", key, value);
                }
            } else {
                println!("Config file: {}", config_path.display());
            }
        }
    }

    Ok(())
}

fn report(
    mode: CalculationMode,
    target: NaiveDateTime,
    settings: &SleepSettings,
    format: ExportFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    let report = RecommendationReport::build(mode, target, settings);

    match format {
        ExportFormat::Json => {
            println!("{}", json::to_json_string(&report).map_err(SleepRsError::from)?)
        }
        ExportFormat::Text => print_report(&report),
    }

    if let Some(path) = output {
        export_report(&report, format, path).map_err(SleepRsError::from)?;
        eprintln!("{} {}", "✓ Report written to".green(), path.display());
    }

    Ok(())
}

fn print_report(report: &RecommendationReport) {
    let heading = match report.mode {
        CalculationMode::Bedtime => {
            format!("Go to bed at one of these times to wake at {}", report.target_time)
        }
        CalculationMode::WakeTime => {
            format!("Wake at one of these times after going to bed at {}", report.target_time)
        }
    };
    println!("{}", heading.blue().bold());
    println!(
        "  {} · {} · {}-minute cycles · {} min to fall asleep",
        report.age_group_name,
        report.sleep_range,
        report.cycle_length,
        report.settings.fall_asleep_time
    );
    println!();

    for rec in &report.recommendations {
        let quality = match rec.quality {
            SleepQuality::Excellent => rec.quality.to_string().green().bold(),
            SleepQuality::Good => rec.quality.to_string().cyan(),
            SleepQuality::Fair => rec.quality.to_string().yellow(),
            SleepQuality::Poor => rec.quality.to_string().red(),
        };
        println!(
            "  {:>8}  {:<18}  {} cycles, {}",
            rec.time.bold(),
            quality,
            rec.cycles,
            rec.total_sleep
        );
    }

    if let Some(best) = report.best() {
        println!();
        println!("  {} {}: {}", "Best:".bold(), best.time, best.quality.description().dimmed());
    }

    if let Some(message) = &report.warning_message {
        println!();
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }
}

fn print_age_group(group: AgeGroup, format: ExportFormat) -> Result<()> {
    let data = group.data();

    if format == ExportFormat::Json {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    println!("{}", data.name.cyan().bold());
    println!("  Recommended sleep: {}", data.sleep_range);
    println!("  Sleep cycle:       {} minutes", data.cycle_length);
    println!("  REM sleep:         {}%", data.rem_sleep_percentage);
    println!("  Deep sleep:        {}%", data.deep_sleep_percentage);
    println!("  Characteristics:");
    for item in data.characteristics {
        println!("    - {}", item);
    }

    Ok(())
}
