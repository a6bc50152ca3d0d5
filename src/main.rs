//! skillgap: skill gap analysis and study planning tool

mod catalog;
mod cli;
mod config;
mod error;
mod input;
mod output;
mod processing;
mod taxonomy;

use catalog::CompanyCatalog;
use clap::Parser;
use cli::{Cli, Commands, CompanyAction, ConfigAction};
use config::Config;
use error::{Result, SkillGapError};
use input::DocumentReader;
use log::{error, info};
use output::report::TargetSource;
use output::{AnalysisReport, ReportFormatter};
use processing::{GapAnalyzer, PlanGenerator, SkillExtractor};
use std::path::PathBuf;
use std::process;
use taxonomy::SkillTaxonomy;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            resume,
            job,
            company,
            role,
            weeks,
            output,
            save,
            detailed,
        } => {
            info!("Starting gap analysis");

            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| SkillGapError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, &["pdf", "txt", "md"])
                    .map_err(|e| SkillGapError::InvalidInput(format!("Job file: {}", e)))?;
            }

            let output_format =
                cli::parse_output_format(&output).map_err(SkillGapError::InvalidInput)?;
            if !config.output.color_output {
                colored::control::set_override(false);
            }

            let taxonomy = load_taxonomy(cli.taxonomy.as_ref(), &config)?;
            let extractor = SkillExtractor::new(&taxonomy)?;
            let mut reader = DocumentReader::new();

            let resume_text = reader.read_text(&resume).await?;
            let candidate = extractor.extract(&resume_text);
            info!("Extracted {} skills from resume", candidate.len());

            let (target, target_source) = match (&job, &company) {
                (Some(job_path), _) => {
                    let jd_text = reader.read_text(job_path).await?;
                    let target = extractor.extract_requirements(&jd_text);
                    info!("Extracted {} requirements from job description", target.len());
                    (
                        target,
                        TargetSource::JobDescription {
                            path: job_path.to_string_lossy().to_string(),
                        },
                    )
                }
                (None, Some(company_name)) => {
                    let catalog = load_catalog(&config)?;
                    let profile = catalog.find_role(company_name, role.as_deref())?;
                    let target = extractor.extract_required_list(&profile.required_skills);
                    info!(
                        "Loaded {} required skills for {} / {}",
                        target.len(),
                        company_name,
                        profile.role
                    );
                    (
                        target,
                        TargetSource::CompanyRole {
                            company: company_name.clone(),
                            role: profile.role.clone(),
                        },
                    )
                }
                (None, None) => {
                    return Err(SkillGapError::InvalidInput(
                        "Pass either --job <file> or --company <name>".to_string(),
                    ));
                }
            };

            let gap = GapAnalyzer::new(config.matching.partial.clone()).analyze(&candidate, &target);
            let plan = PlanGenerator::new(&taxonomy, config.plan.clone()).generate(&gap, weeks);

            let report = AnalysisReport::new(
                candidate,
                target,
                gap,
                plan,
                resume.to_string_lossy().to_string(),
                target_source,
                taxonomy.skill_count(),
            );

            let formatter = ReportFormatter::new(output_format, detailed || config.output.detailed);
            println!("{}", formatter.render(&report)?);

            if let Some(save_path) = save {
                formatter.save(&report, &save_path)?;
                println!("Report saved to {}", save_path.display());
            }
        }

        Commands::Extract { file, categories } => {
            cli::validate_file_extension(&file, &["pdf", "txt", "md"])
                .map_err(|e| SkillGapError::InvalidInput(format!("Input file: {}", e)))?;

            let taxonomy = load_taxonomy(cli.taxonomy.as_ref(), &config)?;
            let extractor = SkillExtractor::new(&taxonomy)?;
            let mut reader = DocumentReader::new();

            let text = reader.read_text(&file).await?;
            let skills = extractor.extract(&text);
            let word_count = processing::text::TextNormalizer::new().tokenize(&text).len();

            println!(
                "Found {} skills across {} words in {}\n",
                skills.len(),
                word_count,
                file.display()
            );

            if categories {
                for (category, names) in skills.categorize(&taxonomy) {
                    println!("{}:", category);
                    for name in names {
                        println!("  - {}", name);
                    }
                }
            } else {
                for hit in &skills.hits {
                    println!("  - {} ({}x)", hit.skill, hit.occurrences);
                }
            }
        }

        Commands::Companies { action } => {
            let catalog = load_catalog(&config)?;
            match action {
                CompanyAction::List => {
                    println!("Companies in catalog:\n");
                    for company in &catalog.companies {
                        let roles: Vec<&str> =
                            company.roles.iter().map(|r| r.role.as_str()).collect();
                        println!("  {} ({})", company.name, roles.join(", "));
                    }
                }
                CompanyAction::Show { company } => {
                    let found = catalog.find_company(&company).ok_or_else(|| {
                        SkillGapError::InvalidInput(format!("Unknown company: {}", company))
                    })?;

                    println!("{}\n", found.name);
                    for role in &found.roles {
                        println!("Role: {} (levels: {})", role.role, role.levels.join(", "));
                        println!("  Required skills:");
                        for skill in &role.required_skills {
                            println!("    - {}", skill);
                        }
                        if !role.interview_rounds.is_empty() {
                            println!("  Interview rounds:");
                            for round in &role.interview_rounds {
                                println!(
                                    "    {}. {} ({} min, focus: {})",
                                    round.round,
                                    round.name,
                                    round.duration_min,
                                    round.focus.join(", ")
                                );
                            }
                        }
                        println!();
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current configuration\n");
                println!(
                    "Taxonomy: {}",
                    config
                        .data
                        .taxonomy_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in".to_string())
                );
                println!(
                    "Catalog: {}",
                    config
                        .data
                        .catalog_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in".to_string())
                );
                println!("\nPartial matching:");
                println!("  enabled: {}", config.matching.partial.enabled);
                println!(
                    "  min category overlap: {}",
                    config.matching.partial.min_category_overlap
                );
                println!(
                    "  name similarity: {:.2}",
                    config.matching.partial.name_similarity
                );
                println!("\nPlan budgets:");
                println!("  minutes per week: {}", config.plan.minutes_per_week);
                println!("  minutes per skill: {}", config.plan.minutes_per_skill);
                println!("  partial factor: {:.2}", config.plan.partial_factor);
            }
            Some(ConfigAction::Reset) => {
                let default_config = Config::default();
                default_config.save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

fn load_taxonomy(cli_path: Option<&PathBuf>, config: &Config) -> Result<SkillTaxonomy> {
    match cli_path.or(config.data.taxonomy_path.as_ref()) {
        Some(path) => {
            info!("Loading taxonomy from {}", path.display());
            SkillTaxonomy::load(path)
        }
        None => Ok(SkillTaxonomy::builtin()),
    }
}

fn load_catalog(config: &Config) -> Result<CompanyCatalog> {
    match config.data.catalog_path.as_ref() {
        Some(path) => {
            info!("Loading company catalog from {}", path.display());
            CompanyCatalog::load(path)
        }
        None => Ok(CompanyCatalog::builtin()),
    }
}
