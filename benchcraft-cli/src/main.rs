use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

use benchcraft_engine::{
    decode_rotation, encode_rotation, CrafterStats, Recipe, RotationReport, Simulation, Step,
    TipRegistry, TipType,
};

#[derive(Debug, Parser)]
#[command(name = "benchcraft", version)]
#[command(about = "Headless rotation runner for the Benchcraft crafting engine")]
struct Args {
    /// Path to a recipe definition (JSON)
    #[arg(long)]
    recipe: PathBuf,

    /// Crafter stats as craftsmanship,control,cp[,level]
    #[arg(long)]
    stats: String,

    /// Rotation as comma-separated action identities
    #[arg(long, conflicts_with = "code")]
    rotation: Option<String>,

    /// Rotation as a share code (BC1-...)
    #[arg(long)]
    code: Option<String>,

    /// Run probabilistically with this seed instead of the linear mode
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the report as JSON instead of the step table
    #[arg(long)]
    json: bool,
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_stats(raw: &str) -> Result<CrafterStats> {
    let fields = split_csv(raw);
    if fields.len() < 3 || fields.len() > 4 {
        bail!("--stats expects craftsmanship,control,cp[,level] (got `{raw}`)");
    }
    let mut values = fields.iter().map(|field| {
        field
            .parse::<u32>()
            .with_context(|| format!("stat `{field}` is not a number"))
    });
    Ok(CrafterStats {
        craftsmanship: values.next().unwrap()?,
        control: values.next().unwrap()?,
        craft_points: values.next().unwrap()?,
        level: values.next().transpose()?.unwrap_or(0),
    })
}

fn load_rotation(args: &Args) -> Result<Vec<String>> {
    if let Some(code) = &args.code {
        let rotation = decode_rotation(code).context("decoding share code")?;
        return Ok(rotation.iter().map(ToString::to_string).collect());
    }
    if let Some(rotation) = &args.rotation {
        return Ok(split_csv(rotation));
    }
    bail!("either --rotation or --code is required");
}

fn severity_label(tip_type: TipType) -> String {
    match tip_type {
        TipType::Success => "SUCCESS".green().to_string(),
        TipType::Info => "INFO".cyan().to_string(),
        TipType::Warning => "WARNING".yellow().to_string(),
    }
}

fn print_step(step: &Step) {
    if step.skipped {
        let reason = step
            .skip_reason
            .map_or_else(String::new, |reason| format!("{reason:?}"));
        println!(
            "{:>3}  {:<20} {}",
            step.index,
            step.action.to_string(),
            format!("skipped ({reason})").red()
        );
        return;
    }
    println!(
        "{:>3}  {:<20} progress {:>5}  quality {:>5}  cp {:>4}  durability {:>3}",
        step.index,
        step.action.to_string(),
        step.added_progress,
        step.added_quality,
        step.cp_difference,
        step.durability_difference,
    );
}

fn print_report(report: &RotationReport) {
    for step in &report.result.steps {
        print_step(step);
    }
    let result = &report.result;
    println!(
        "\n{}  progress {}%  quality {}%  cp {}  durability {}",
        result.status.to_string().bold(),
        result.progress_percent(),
        result.quality_percent(),
        result.state.craft_points,
        result.state.durability,
    );
    for tip in &report.tips {
        println!("{}  {}", severity_label(tip.tip_type), tip.message_key);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let recipe_json = fs::read_to_string(&args.recipe)
        .with_context(|| format!("reading recipe {}", args.recipe.display()))?;
    let recipe: Recipe = serde_json::from_str(&recipe_json).context("parsing recipe JSON")?;
    let stats = parse_stats(&args.stats)?;
    let names = load_rotation(&args)?;

    let simulation = Simulation::from_names(recipe, stats, &names)?;
    log::info!(
        "running {} actions (share code {})",
        simulation.rotation().len(),
        encode_rotation(simulation.rotation())
    );

    let result = match args.seed {
        Some(seed) => simulation.run_seeded(seed),
        None => simulation.run(),
    };
    let tips = TipRegistry::default().evaluate(&result);
    let report = RotationReport { result, tips };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_string_parses_with_optional_level() {
        let stats = parse_stats("1000, 900, 500").unwrap();
        assert_eq!(stats.craftsmanship, 1000);
        assert_eq!(stats.level, 0);

        let stats = parse_stats("1000,900,500,80").unwrap();
        assert_eq!(stats.level, 80);

        assert!(parse_stats("1000,900").is_err());
        assert!(parse_stats("1000,900,abc").is_err());
    }

    #[test]
    fn csv_splitting_trims_and_drops_empties() {
        assert_eq!(
            split_csv(" basic_touch , inner_quiet ,,"),
            vec!["basic_touch".to_string(), "inner_quiet".to_string()]
        );
    }
}
