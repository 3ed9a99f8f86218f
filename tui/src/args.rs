//! Parsing command-line arguments.

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    Command, Error as ClapError,
};
use std::path::PathBuf;

/// A struct to store the parse results.
pub(crate) struct Args {
    /// Width, if given on the command line.
    pub(crate) width: Option<i32>,
    /// Height, if given on the command line.
    pub(crate) height: Option<i32>,
    /// Rule string, if given on the command line.
    pub(crate) rule: Option<String>,
    /// Name of the world, if given on the command line.
    pub(crate) name: Option<String>,
    /// A TOML, YAML or JSON file with the world configuration.
    pub(crate) config: Option<PathBuf>,
    /// Number of generations to run.
    pub(crate) generations: u64,
    /// Whether to print every generation instead of only the last one.
    pub(crate) all: bool,
    /// Whether to randomize the world before running.
    pub(crate) random: bool,
    /// Seed for the random number generator.
    pub(crate) seed: Option<u64>,
    /// File to load the cells from.
    pub(crate) load: Option<PathBuf>,
    /// File to save the cells to.
    pub(crate) save: Option<PathBuf>,
}

fn positive(s: &str) -> Result<i32, String> {
    match s.parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(String::from("must be a positive integer")),
    }
}

fn command() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .long_about(
            "Runs a two-dimensional cellular automaton.\n\
             \n\
             The world is displayed in Plaintext format.\n\
             * Dead cells are represented by `.`;\n\
             * Living cells are represented by `o` for rules with 2 states, \
             `A` for rules with more states;\n\
             * Dying cells are represented by uppercase letters starting from `B`.\n\
             \n\
             Cells beyond the edges of the world are always dead.",
        )
        .arg(
            Arg::new("X")
                .help("Width of the world")
                .index(1)
                .value_parser(positive),
        )
        .arg(
            Arg::new("Y")
                .help("Height of the world")
                .index(2)
                .value_parser(positive),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     Supports Life-like rules (e.g. B36/S23) \
                     and Generations rules (e.g. B2/S/C3).",
                )
                .short('r')
                .long("rule"),
        )
        .arg(
            Arg::new("NAME")
                .help("Name of the world")
                .short('n')
                .long("name"),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads the configuration from a TOML, YAML or JSON file")
                .long_help(
                    "Reads the configuration from a TOML, YAML or JSON file\n\
                     The keys are `width`, `height`, `rule_string` and `name`.\n\
                     Options given on the command line take precedence.",
                )
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Number of generations to run")
                .short('g')
                .long("generations")
                .default_value("1")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("ALL")
                .help("Prints every generation instead of only the last one")
                .short('a')
                .long("all")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("RANDOM")
                .help("Randomizes the world before running")
                .long("random")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed for randomizing the world")
                .long("seed")
                .requires("RANDOM")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("LOAD")
                .help("Loads the cells from a file before running")
                .long_help(
                    "Loads the cells from a file before running\n\
                     Files ending with `.json` are read as JSON, others as binary.\n\
                     The saved world must have the same size.",
                )
                .long("load")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("SAVE")
                .help("Saves the cells to a file after running")
                .long_help(
                    "Saves the cells to a file after running\n\
                     Files ending with `.json` are written as JSON, others as binary.",
                )
                .long("save")
                .value_parser(value_parser!(PathBuf)),
        )
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, ClapError> {
        Self::parse_from(std::env::args_os())
    }

    /// Parses the given arguments. The first one is the program name.
    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, ClapError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;

        Ok(Args {
            width: matches.get_one::<i32>("X").copied(),
            height: matches.get_one::<i32>("Y").copied(),
            rule: matches.get_one::<String>("RULE").cloned(),
            name: matches.get_one::<String>("NAME").cloned(),
            config: matches.get_one::<PathBuf>("CONFIG").cloned(),
            generations: matches
                .get_one::<u64>("GENERATIONS")
                .copied()
                .unwrap_or(1),
            all: matches.get_flag("ALL"),
            random: matches.get_flag("RANDOM"),
            seed: matches.get_one::<u64>("SEED").copied(),
            load: matches.get_one::<PathBuf>("LOAD").cloned(),
            save: matches.get_one::<PathBuf>("SAVE").cloned(),
        })
    }
}
