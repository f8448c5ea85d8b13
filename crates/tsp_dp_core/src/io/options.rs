use std::{env, path::Path};

use log::LevelFilter;
use tsp_dp_derive::{CliOptions, CliValue, KvDisplay};

use crate::{
    Cost, Error, Result,
    constants::{DEFAULT_CITIES, DEFAULT_MAX_COST, DEFAULT_MIN_COST, MAX_EDGE_COST},
};

/// Runtime options: how the instance is built, which strategy solves it, and logging.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Number of cities in a randomly generated instance.
    #[cli(long = "cities")]
    pub cities: usize,
    /// Smallest random off-diagonal cost.
    #[cli(long = "min-cost")]
    pub min_cost: Cost,
    /// Largest random off-diagonal cost.
    #[cli(long = "max-cost")]
    pub max_cost: Cost,
    /// Seed for the instance generator; unset uses the thread-local generator.
    #[cli(long = "seed")]
    #[kv(fmt = "opt")]
    pub seed: Option<u64>,
    /// Dynamic-programming strategy.
    #[cli(
        long = "strategy",
        parse_with = "Strategy::parse",
        value = "<recursive|iterative>"
    )]
    pub strategy: Strategy,
    /// Distance matrix file, `-` for stdin. Empty generates a random instance.
    #[cli(long = "input", value = "<path>")]
    pub input: String,
    /// Structured logging level.
    #[cli(
        long = "log-level",
        parse_with = "LogLevel::parse",
        value = "<error|warn|info|debug|trace|off>"
    )]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse", value = "<compact|pretty>")]
    pub log_format: LogFormat,
    /// Prefix log lines with millisecond timestamps.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Log file path. Empty or `-` means stderr.
    #[cli(long = "log-output", value = "<path>")]
    pub log_output: String,
}

/// How the memo table is filled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, CliValue)]
#[cli_value(option = "strategy")]
pub enum Strategy {
    /// Top-down recursion with memoization.
    #[default]
    #[cli(alias = "memo")]
    Recursive,
    /// Bottom-up table fill.
    #[cli(alias = "bottom-up")]
    Iterative,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

/// Where the distance matrix comes from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputSource<'a> {
    Random,
    Stdin,
    File(&'a Path),
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES,
            min_cost: DEFAULT_MIN_COST,
            max_cost: DEFAULT_MAX_COST,
            seed: None,
            strategy: Strategy::Recursive,
            input: String::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if self.min_cost > self.max_cost {
            return Err(Error::invalid_input(format!(
                "--min-cost ({}) must not exceed --max-cost ({})",
                self.min_cost, self.max_cost
            )));
        }
        if self.max_cost > MAX_EDGE_COST {
            return Err(Error::invalid_input(format!(
                "--max-cost ({}) exceeds maximum {MAX_EDGE_COST}",
                self.max_cost
            )));
        }
        Ok(())
    }

    pub fn usage() -> String {
        format!(
            concat!(
                "Usage:\n",
                "  tsp-dp [options]\n",
                "  tsp-dp [options] --input matrix.txt\n",
                "  tsp-dp [options] --input - < matrix.txt\n\n",
                "Options:\n",
                "{}\n",
                "  --help\n\n",
                "Examples:\n",
                "  tsp-dp\n",
                "  tsp-dp --cities 12 --seed 7 --log-level info\n",
                "  tsp-dp --strategy iterative --input matrix.txt\n",
                "  tsp-dp --log-level=debug --log-format=pretty --log-timestamp --input - < matrix.txt\n",
            ),
            Self::options_usage()
        )
    }

    pub fn input_source(&self) -> InputSource<'_> {
        match self.input.trim() {
            "" => InputSource::Random,
            "-" => InputSource::Stdin,
            path => InputSource::File(Path::new(path)),
        }
    }

    pub fn cost_range(&self) -> std::ops::RangeInclusive<Cost> {
        self.min_cost..=self.max_cost
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        let log_output = self.log_output.trim();
        if log_output.is_empty() || log_output == "-" {
            None
        } else {
            Some(Path::new(log_output))
        }
    }
}
