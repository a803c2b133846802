use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use granulation_scaleup_core::steps::sections;
use granulation_scaleup_core::{
    AreaScaling, ConfigError, DocumentRenderer, JsonRenderer, Report, ReportError, ReportSection,
    ResultBook, ScaleUpConfig, ScreenDimension, TextRenderer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pdf,
    Text,
    Json,
}

/// Fluid-bed granulation scale-up calculator
#[derive(Parser, Debug)]
#[command(name = "scaleup")]
#[command(about = "Top-spray granulation lab to pilot scale-up report", long_about = None)]
struct Args {
    /// JSON configuration file (report layout and step inputs)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default configuration to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,

    /// Gauge pressure for the flow estimate (bar)
    #[arg(long)]
    pressure: Option<f64>,

    /// Cross-sectional area for the flow estimate (m²)
    #[arg(long)]
    area: Option<f64>,

    /// Lab spray rate SR1 (g/min)
    #[arg(long)]
    lab_spray_rate: Option<f64>,

    /// Lab air volume AV1 (CFM)
    #[arg(long)]
    lab_air_volume: Option<f64>,

    /// Pilot air volume AV2 used for the spray rate (CFM)
    #[arg(long)]
    pilot_air_volume: Option<f64>,

    /// Lab atomizing air volume AAV1 (CFM)
    #[arg(long)]
    lab_atomizing_air_volume: Option<f64>,

    /// Lab atomizing air pressure P1 (bar)
    #[arg(long)]
    lab_atomizing_pressure: Option<f64>,

    /// Lab bottom screen diameter (m)
    #[arg(long)]
    lab_diameter: Option<f64>,

    /// Pilot bottom screen diameter (m)
    #[arg(long)]
    pilot_diameter: Option<f64>,

    /// Do not feed earlier results into later steps
    #[arg(long)]
    no_chain: bool,

    /// Scale atomizing pressure to preserve droplet size
    #[arg(long)]
    droplet_pressure: bool,

    /// Pilot atomizing air volume AAV2 for droplet-size pressure (CFM);
    /// defaults to the atomizing air volume result
    #[arg(long, requires = "droplet_pressure")]
    pilot_atomizing_air_volume: Option<f64>,

    /// Use the inverse-area air volume rule from older reports
    #[arg(long)]
    legacy_air_volume: bool,

    /// Append the equations used
    #[arg(short, long)]
    equations: bool,

    /// Report title
    #[arg(short, long)]
    title: Option<String>,

    /// Sections to include, comma separated (default: all computed)
    #[arg(short, long, value_delimiter = ',')]
    sections: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Output file (text and JSON default to stdout, PDF to scaleup_report.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.write_default_config {
        ScaleUpConfig::default().save(path)?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => ScaleUpConfig::load(path)?,
        None => ScaleUpConfig::default(),
    };
    apply_overrides(&args, &mut config)?;
    config.validate()?;

    let outcome = config.workflow.run();
    for failure in &outcome.failures {
        eprintln!("{}: {}", failure.section, failure.error);
    }

    let selection = if args.sections.is_empty() {
        config.report.sections.clone()
    } else {
        args.sections.clone()
    };
    for name in &selection {
        if !sections::ALL.contains(&name.as_str()) {
            warn!(section = %name, "Unknown section ignored");
        }
    }

    let selected: ResultBook = if selection.is_empty() {
        outcome.book.clone()
    } else {
        outcome.book.select(&selection).into_iter().cloned().collect()
    };
    let mut report_sections = selected.report_sections();
    if config.report.include_equations {
        report_sections.extend(ReportSection::equations(&selected.formulas_used()));
    }

    let report = match Report::assemble(config.report.title.clone(), report_sections) {
        Ok(report) => report.with_subtitle(format!(
            "Generated {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M")
        )),
        Err(ReportError::NothingToReport) => {
            eprintln!("Warning: {}", ReportError::NothingToReport);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let renderer: Box<dyn DocumentRenderer> = match args.format {
        Format::Pdf => Box::new(config.report.pdf_renderer()),
        Format::Text => Box::new(TextRenderer),
        Format::Json => Box::new(JsonRenderer),
    };
    let bytes = renderer.render(&report)?;

    let output = match (&args.output, args.format) {
        (Some(path), _) => Some(path.clone()),
        (None, Format::Pdf) => Some(PathBuf::from(format!(
            "scaleup_report.{}",
            renderer.file_extension()
        ))),
        (None, _) => None,
    };
    match output {
        Some(path) => {
            fs::write(&path, &bytes)?;
            info!(path = %path.display(), bytes = bytes.len(), "Wrote report");
            println!(
                "Wrote {} section(s) to {} ({})",
                report.sections().len(),
                path.display(),
                renderer.media_type()
            );
        }
        None => std::io::stdout().write_all(&bytes)?,
    }

    if !outcome.is_complete() {
        eprintln!(
            "{} step(s) failed; their sections are missing from the report",
            outcome.failures.len()
        );
    }
    Ok(())
}

/// Fold command-line values into the configured workflow
fn apply_overrides(args: &Args, config: &mut ScaleUpConfig) -> Result<(), ConfigError> {
    let workflow = &mut config.workflow;

    if args.pressure.is_some() || args.area.is_some() {
        let input = workflow.pressure.get_or_insert_with(Default::default);
        if let Some(pressure) = args.pressure {
            input.pressure_bar = pressure;
        }
        if let Some(area) = args.area {
            input.area_m2 = area;
        }
    }

    if let Some(sr1) = args.lab_spray_rate {
        workflow.spray_rate.get_or_insert_with(Default::default).lab_spray_rate = sr1;
        if let Some(input) = workflow.atomizing_air_volume.as_mut() {
            input.lab_spray_rate = sr1;
        }
        if let Some(input) = workflow.atomizing_air_pressure.as_mut() {
            input.lab_spray_rate = sr1;
        }
    }
    if let Some(av1) = args.lab_air_volume {
        workflow.spray_rate.get_or_insert_with(Default::default).lab_air_volume = av1;
        if let Some(input) = workflow.air_volume.as_mut() {
            input.lab_air_volume = av1;
        }
    }
    if let Some(av2) = args.pilot_air_volume {
        workflow.spray_rate.get_or_insert_with(Default::default).pilot_air_volume = av2;
    }

    if let Some(aav1) = args.lab_atomizing_air_volume {
        workflow
            .atomizing_air_volume
            .get_or_insert_with(Default::default)
            .lab_atomizing_air_volume = aav1;
    }
    if let Some(p1) = args.lab_atomizing_pressure {
        workflow
            .atomizing_air_pressure
            .get_or_insert_with(Default::default)
            .lab_pressure = p1;
    }
    if args.droplet_pressure {
        workflow.use_droplet_pressure(args.pilot_atomizing_air_volume)?;
    }

    if args.lab_diameter.is_some() || args.pilot_diameter.is_some() {
        let input = workflow.bottom_screen.get_or_insert_with(Default::default);
        if input.dimension == ScreenDimension::Radius {
            input.dimension = ScreenDimension::Diameter;
            input.lab *= 2.0;
            input.pilot *= 2.0;
        }
        if let Some(d) = args.lab_diameter {
            input.lab = d;
        }
        if let Some(d) = args.pilot_diameter {
            input.pilot = d;
        }
    }

    if args.legacy_air_volume {
        workflow.air_volume.get_or_insert_with(Default::default).scaling =
            AreaScaling::LegacyInverse;
    }
    if args.no_chain {
        workflow.chain = false;
    }

    if args.equations {
        config.report.include_equations = true;
    }
    if let Some(title) = &args.title {
        config.report.title.clone_from(title);
    }
    Ok(())
}
