use clap::{Parser, Subcommand};
use mljr_app::{AppResult, ConditionsOverride, report};
use mljr_input::{CHOLINE_CHLORIDE, CHOLINE_CHLORIDE_GLYCEROL, Template};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "mljr", version)]
#[command(
    about = "Critical properties with the Modified Lydersen-Joback-Reid group-contribution method",
    long_about = None,
    arg_required_else_help = true
)]
struct Cli {
    /// Log resolved groups and intermediate values to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate critical properties for an input file
    Calc {
        /// Path to the input file
        file: PathBuf,
        /// Append the report to the input file instead of printing it
        #[arg(short = 'o', long)]
        append: bool,
        /// Emit the report as JSON (cannot be combined with --append)
        #[arg(long, conflicts_with = "append")]
        json: bool,
        /// T for density, or T-ref Q-ref T for density and surface tension
        #[arg(short = 'x', long = "calc", num_args = 1.., value_name = "VALUES", allow_negative_numbers = true)]
        calc: Option<Vec<f64>>,
    },
    /// Parse and validate an input file, printing the typed configuration
    Validate {
        /// Path to the input file
        file: PathBuf,
    },
    /// Show or write the built-in templates
    Template {
        /// Choline Chloride, pure compound (default)
        #[arg(long)]
        ccl: bool,
        /// Choline Chloride Glycerol, binary mixture
        #[arg(long)]
        ccg: bool,
        /// Write to a new file instead of printing
        #[arg(short, long)]
        write: bool,
        /// Directory for --write
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// List the available group names and aliases
    Groups,
    /// Show command-line examples
    Examples,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Calc {
            file,
            append,
            json,
            calc,
        } => cmd_calc(&file, append, json, calc.as_deref()),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Template {
            ccl,
            ccg,
            write,
            dir,
        } => cmd_template(ccl, ccg, write, &dir),
        Commands::Groups => {
            print!("{}", mljr_app::group_catalog_text());
            Ok(())
        }
        Commands::Examples => {
            print!("{}", mljr_app::usage_examples_text());
            Ok(())
        }
    }
}

fn cmd_calc(file: &Path, append: bool, json: bool, calc: Option<&[f64]>) -> AppResult<()> {
    let overrides = calc.map(ConditionsOverride::from_values).transpose()?;
    let outcome = mljr_app::calc_file(file, overrides.as_ref())?;

    let text = if json {
        let mut s = report::render_json(&outcome)?;
        s.push('\n');
        s
    } else {
        report::render_text(&outcome)
    };

    if append {
        report::append_report(file, &text)?;
        println!("✓ Results appended to {}", file.display());
    } else {
        print!("{text}");
    }
    Ok(())
}

fn cmd_validate(file: &Path) -> AppResult<()> {
    let config = mljr_input::load_file(file)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    eprintln!("✓ {} is a valid {} input", file.display(), config.kind());
    Ok(())
}

fn cmd_template(ccl: bool, ccg: bool, write: bool, dir: &Path) -> AppResult<()> {
    let mut chosen: Vec<&Template> = Vec::new();
    if ccl || !ccg {
        chosen.push(&CHOLINE_CHLORIDE);
    }
    if ccg {
        chosen.push(&CHOLINE_CHLORIDE_GLYCEROL);
    }

    for template in chosen {
        if write {
            let path = mljr_input::write_unique(template, dir)?;
            println!("✓ {} template saved to {}", template.title, path.display());
        } else {
            println!("{}", template.render());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn json_cannot_be_appended_to_the_input() {
        let err = Cli::try_parse_from(["mljr", "calc", "in.txt", "-o", "--json"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn calc_flags_parse() {
        let cli = Cli::try_parse_from(["mljr", "calc", "in.txt", "--json", "-x", "298.15", "56", "350"])
            .unwrap();
        let Commands::Calc {
            append, json, calc, ..
        } = cli.command
        else {
            panic!("expected calc");
        };
        assert!(json && !append);
        assert_eq!(calc, Some(vec![298.15, 56.0, 350.0]));

        let cli = Cli::try_parse_from(["mljr", "calc", "in.txt", "-o"]).unwrap();
        assert!(matches!(cli.command, Commands::Calc { append: true, json: false, .. }));
    }
}
