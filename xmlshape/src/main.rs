//! # xmlshape
//!
//! A CLI tool for auditing which element and attribute paths occur across
//! directories of XML metadata records.
//!
//! ## Overview
//!
//! xmlshape is built on top of xmlshapelib. It scans every `.xml` file in the
//! given folders, then prints one row per distinct path with a sample value,
//! the corpus-wide occurrence count, the highest count inside a single file,
//! and the file the sample came from.
//!
//! ## Usage
//!
//! ```bash
//! # Scan two export folders as one corpus (tab-separated report)
//! xmlshape output/xml/digitalcollections output/xml/preserve
//!
//! # Attribute paths only, most frequent first, as an aligned table
//! xmlshape output/xml/preserve --only attributes --sort occurrences --output table
//!
//! # One row per attribute name instead of per attribute value
//! xmlshape output/xml/preserve --attribute-keys named
//!
//! # Also collapse LC name authority URIs
//! xmlshape output/xml/preserve --collapse-uri http://id.loc.gov/authorities/names/n
//! ```
//!
//! Files that are not well-formed XML are reported on stderr and skipped.

mod render;

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use xmlshapelib::{
    scan_paths, AttributeEntryPolicy, AttributeKeys, FilterConfig, Ordering, PathKinds,
    PathQuerySet, PathTable, ScanOptions, TableLayout, ValueNormalizer,
};

use render::{output_mode, render};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("xmlshape")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Report the element and attribute paths used across folders of XML records")
        .arg(
            Arg::new("folder")
                .action(ArgAction::Append)
                .default_value(".")
                .help("Folders to scan, in order (defaults to current directory)"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Also scan subdirectories"),
        )
        .arg(
            Arg::new("attribute-keys")
                .long("attribute-keys")
                .value_parser(["valued", "named"])
                .default_value("valued")
                .help("Key attributes by name and value, or by name only"),
        )
        .arg(
            Arg::new("legacy-attribute-guard")
                .long("legacy-attribute-guard")
                .action(ArgAction::SetTrue)
                .help("Only start counting an attribute once it appears on an element with text"),
        )
        .arg(
            Arg::new("collapse-uri")
                .long("collapse-uri")
                .action(ArgAction::Append)
                .value_name("PREFIX")
                .help("Collapse attribute values of the form PREFIX<digits> into PREFIX*"),
        )
        .arg(
            Arg::new("no-default-collapse")
                .long("no-default-collapse")
                .action(ArgAction::SetTrue)
                .help("Keep Getty AAT term URIs distinct"),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .value_parser(["all", "elements", "attributes"])
                .default_value("all")
                .help("Which kinds of paths to report"),
        )
        .arg(
            Arg::new("min-occurrences")
                .long("min-occurrences")
                .value_parser(value_parser!(u64))
                .default_value("0")
                .help("Hide paths that occur fewer times than this"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_parser(["first-seen", "path", "occurrences", "max-per-file"])
                .default_value("first-seen")
                .help("Row order"),
        )
        .arg(
            Arg::new("reverse")
                .long("reverse")
                .action(ArgAction::SetTrue)
                .help("Reverse the row order"),
        )
        .arg(
            Arg::new("with-max-file")
                .long("with-max-file")
                .action(ArgAction::SetTrue)
                .help("Add a column naming the file with the most occurrences"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["tsv", "table", "term", "text", "json"])
                .default_value("tsv")
                .help("Output format (table styles the header only on a terminal)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log progress to stderr (-v info, -vv debug)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Do not report skipped files"),
        )
}

/// Install the stderr logger. `RUST_LOG` wins over the flags.
fn init_tracing(matches: &ArgMatches) {
    let default_level = if matches.get_flag("quiet") {
        "error"
    } else {
        match matches.get_count("verbose") {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> Result<FilterConfig, anyhow::Error> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Build the attribute value normalizer from matches
fn build_normalizer(matches: &ArgMatches) -> Result<ValueNormalizer, anyhow::Error> {
    let mut normalizer = if matches.get_flag("no-default-collapse") {
        ValueNormalizer::none()
    } else {
        ValueNormalizer::default()
    };

    if let Some(prefixes) = matches.get_many::<String>("collapse-uri") {
        for prefix in prefixes {
            normalizer = normalizer.with_prefix(prefix)?;
        }
    }

    Ok(normalizer)
}

fn build_scan_options(matches: &ArgMatches) -> Result<ScanOptions, anyhow::Error> {
    let keys: AttributeKeys = parse_choice(matches, "attribute-keys")?;
    let policy = if matches.get_flag("legacy-attribute-guard") {
        AttributeEntryPolicy::RequireElementText
    } else {
        AttributeEntryPolicy::Always
    };

    Ok(ScanOptions::new()
        .filter(build_filter(matches)?)
        .recursive(matches.get_flag("recursive"))
        .attribute_keys(keys)
        .entry_policy(policy)
        .normalizer(build_normalizer(matches)?))
}

fn build_ordering(matches: &ArgMatches) -> Ordering {
    let ordering = match matches.get_one::<String>("sort").map(|s| s.as_str()) {
        Some("path") => Ordering::by_path(),
        Some("occurrences") => Ordering::by_occurrences(),
        Some("max-per-file") => Ordering::by_max_per_file(),
        _ => Ordering::first_seen(),
    };

    if !matches.get_flag("reverse") {
        ordering
    } else if ordering.direction == xmlshapelib::OrderDirection::Ascending {
        ordering.descending()
    } else {
        ordering.ascending()
    }
}

/// Parse a string argument with a `FromStr` type
fn parse_choice<T>(matches: &ArgMatches, id: &str) -> Result<T, anyhow::Error>
where
    T: std::str::FromStr<Err = String>,
{
    let raw = matches
        .get_one::<String>(id)
        .ok_or_else(|| anyhow::anyhow!("missing value for --{}", id))?;
    raw.parse::<T>().map_err(anyhow::Error::msg)
}

/// Scan the folders and render the report
fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let folders: Vec<&String> = matches
        .get_many::<String>("folder")
        .map(|v| v.collect())
        .unwrap_or_default();
    let options = build_scan_options(matches)?;
    debug!(?folders, recursive = options.recursive, "scanning folders");

    let result = scan_paths(&folders, &options)?;

    let kinds: PathKinds = parse_choice(matches, "only")?;
    let min_occurrences = matches
        .get_one::<u64>("min-occurrences")
        .copied()
        .unwrap_or(0);
    let qs = PathQuerySet::from_result(&result, kinds, min_occurrences, build_ordering(matches));

    let layout = if matches.get_flag("with-max-file") {
        TableLayout::Detailed
    } else {
        TableLayout::Report
    };
    let table = PathTable::from_queryset(&qs, layout);
    let name = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("tsv");
    let mode = output_mode(name).map_err(anyhow::Error::msg)?;

    render(&qs, &table, mode).map_err(|e| anyhow::anyhow!("{}", e))
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(&matches);

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
