use clap::{Parser, Subcommand};
use clockface::clock::{self, ClockMode};
use clockface::geometry;

#[derive(Parser, Debug)]
#[command(name = "clockface", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read and write times as 12-hour "H:MM AM/PM" text
    #[arg(long, global = true)]
    twelve: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the clock-face angle for a time of day
    Degree { time: String },
    /// Print the time of day at a clock-face angle
    Time { degree: f64 },
    /// Print the view-box position of a time of day
    Coord {
        time: String,

        /// Distance to add to the base circle radius
        #[arg(short = 'o', long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,
    },
    /// Print fractional hours as clock text
    Format {
        #[arg(allow_hyphen_values = true)]
        hours: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mode = if cli.twelve {
        ClockMode::Twelve
    } else {
        ClockMode::TwentyFour
    };

    match cli.command {
        Commands::Degree { time } => {
            let hours = clock::parse_time(&time, mode)?;
            println!("{}", geometry::time_to_degree(hours));
        }
        Commands::Time { degree } => {
            if !(0.0..=geometry::CIRCLE_LENGTH).contains(&degree) {
                anyhow::bail!("Degree {} is outside 0..=360", degree);
            }
            let hours = geometry::degree_to_time(degree);
            println!("{}", clock::format_time(hours, mode));
        }
        Commands::Coord { time, offset } => {
            let hours = clock::parse_time(&time, mode)?;
            let coordinate = geometry::coordinate_for_time(hours, offset);
            log::debug!("{} -> {:?}", time, coordinate);
            println!(
                "{:.3} {:.3} {:.3}",
                coordinate.degree, coordinate.x, coordinate.y
            );
        }
        Commands::Format { hours } => {
            if !hours.is_finite() {
                anyhow::bail!("Hours must be a finite number");
            }
            println!("{}", clock::format_time(hours, mode));
        }
    }

    Ok(())
}
