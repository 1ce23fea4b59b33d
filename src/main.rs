mod commands;
mod core;

use clap::{Parser, Subcommand};
use crate::core::error::{ShipError, print_error};

/// Release pipeline for packaged desktop builds
#[derive(Parser)]
#[command(name = "shipway")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct ShipCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Initialize shipway configuration for a project
  Init,

  /// Show current versions and release layout state
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Run the release pipeline: package, stamp, archive, merge, publish
  Build {
    /// Stop after updating dist/latest; skip commit, tag, and push
    #[arg(long)]
    no_publish: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = ShipCli::parse();

  let result = match cli.command {
    Commands::Init => commands::run_init(),
    Commands::Status { json } => commands::run_status(json),
    Commands::Build { no_publish } => commands::run_build(no_publish),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ShipError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
