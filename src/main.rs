//! Skillbridge: semantic skill matching and job-role recommendation engine

use clap::Parser;
use colored::Colorize;
use log::{error, info};
use serde::de::DeserializeOwned;
use skillbridge::cli::{Cli, Commands, ModelAction};
use skillbridge::config::Config;
use skillbridge::embedding::{Embedder, EmbeddingEngine, EmbeddingModelManager};
use skillbridge::error::{Result, SkillBridgeError};
use skillbridge::matching::SkillMatcher;
use skillbridge::recommend::{GapAnalyzer, Recommender, RoadmapGenerator};
use skillbridge::taxonomy::{Taxonomy, TaxonomyNormalizer};
use skillbridge::types::{Course, JobRole, UserProfile};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        SkillBridgeError::InvalidInput(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Everything one scoring request needs, constructed once per invocation.
struct Pipeline {
    recommender: Arc<Recommender>,
    gap_analyzer: GapAnalyzer,
    roadmap_generator: RoadmapGenerator,
    normalizer: Arc<TaxonomyNormalizer>,
}

async fn build_pipeline(config: &Config, taxonomy_path: &Path) -> Result<Pipeline> {
    let engine = EmbeddingEngine::from_config(config).await?;
    engine.warmup()?;
    let embedder: Arc<dyn Embedder> = Arc::new(engine);

    let taxonomy = Taxonomy::from_file(taxonomy_path)?;
    info!("Loaded taxonomy with {} skills", taxonomy.len());

    let normalizer = Arc::new(TaxonomyNormalizer::new(
        taxonomy,
        Arc::clone(&embedder),
        &config.matching,
    ));
    let matcher = Arc::new(SkillMatcher::new(
        embedder,
        Arc::clone(&normalizer),
        config.matching.clone(),
    ));
    let recommender = Arc::new(Recommender::new(
        Arc::clone(&matcher),
        config.scoring.clone(),
        &config.cache,
    ));
    let gap_analyzer = GapAnalyzer::new(
        Arc::clone(&matcher),
        Arc::clone(&recommender),
        &config.scoring,
    );
    let roadmap_generator = RoadmapGenerator::new(config.subsidy.clone());

    Ok(Pipeline {
        recommender,
        gap_analyzer,
        roadmap_generator,
        normalizer,
    })
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Recommend {
            profile,
            roles,
            taxonomy,
            top_n,
            json,
        } => {
            let pipeline = build_pipeline(&config, &taxonomy).await?;
            let profile: UserProfile = load_json(&profile)?;
            let roles: Vec<JobRole> = load_json(&roles)?;
            let top_n = top_n.unwrap_or(config.scoring.default_top_n);

            let recommendations = pipeline
                .recommender
                .get_recommendations(&profile, &roles, top_n)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
            } else {
                println!(
                    "{} role recommendations for {}\n",
                    recommendations.len(),
                    profile.name.bold()
                );
                for (i, rec) in recommendations.iter().enumerate() {
                    println!(
                        "{}. {} ({})  score {}",
                        i + 1,
                        rec.title.bold(),
                        rec.category,
                        format!("{:.3}", rec.match_score).green()
                    );
                    println!(
                        "   content {:.3} | rules {:.3} | switcher {:.3} | {:?}",
                        rec.content_score,
                        rec.rule_score,
                        rec.career_switcher_bonus,
                        rec.skill_match_quality
                    );
                    println!("   {}", rec.rationale.dimmed());
                }
            }
            Ok(())
        }

        Commands::Gaps {
            profile,
            roles,
            taxonomy,
            json,
        } => {
            let pipeline = build_pipeline(&config, &taxonomy).await?;
            let profile: UserProfile = load_json(&profile)?;
            let roles: Vec<JobRole> = load_json(&roles)?;

            let gaps = pipeline.gap_analyzer.analyze(&profile, &roles)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&gaps)?);
            } else {
                for role_gap in &gaps {
                    println!(
                        "\n{} (match {:.3})",
                        role_gap.role_title.bold(),
                        role_gap.match_score
                    );
                    for gap in &role_gap.gaps {
                        println!(
                            "  [p{}] {:<24} {:?} / {:?}",
                            gap.priority, gap.skill, gap.gap_severity, gap.required_level
                        );
                    }
                }
            }
            Ok(())
        }

        Commands::Roadmap {
            profile,
            roles,
            taxonomy,
            courses,
            json,
        } => {
            let pipeline = build_pipeline(&config, &taxonomy).await?;
            let profile: UserProfile = load_json(&profile)?;
            let roles: Vec<JobRole> = load_json(&roles)?;
            let courses: Vec<Course> = load_json(&courses)?;

            let gaps = pipeline.gap_analyzer.analyze(&profile, &roles)?;
            let roadmap = pipeline
                .roadmap_generator
                .generate_roadmap(&profile, &gaps, &courses);

            if json {
                println!("{}", serde_json::to_string_pretty(&roadmap)?);
            } else if roadmap.is_empty() {
                println!("No courses needed: no high or medium severity gaps found.");
            } else {
                for item in &roadmap {
                    println!(
                        "Weeks {:>2}-{:<2}  {} ({})",
                        item.week_start,
                        item.week_end,
                        item.course_title.bold(),
                        item.provider
                    );
                    println!(
                        "            covers {} | fee ${:.2} | nett ${:.2}",
                        item.skill,
                        item.course_fee,
                        item.nett_fee_after_subsidy
                    );
                }
            }
            Ok(())
        }

        Commands::Normalize { taxonomy, skills } => {
            let pipeline = build_pipeline(&config, &taxonomy).await?;
            let normalized = pipeline.normalizer.normalize_skills(&skills)?;
            for skill in normalized {
                println!("{}", skill);
            }
            Ok(())
        }

        Commands::Models { action } => run_models_command(action, config).await,
    }
}

async fn run_models_command(action: ModelAction, config: Config) -> Result<()> {
    match action {
        ModelAction::List => {
            let manager = EmbeddingModelManager::new(config.models.models_dir.clone()).await?;
            println!("{}", "Available embedding models:".bold());
            for info in manager.list_available_models() {
                let marker = if manager.is_model_downloaded(
                    &manager.resolve_model_id(&info.repo_id).unwrap_or_default(),
                ) {
                    "downloaded".green()
                } else {
                    "not downloaded".dimmed()
                };
                println!(
                    "  {:<16} {:>4} MB  {}d  [{}]",
                    info.name, info.size_mb, info.dimensions, marker
                );
            }
            Ok(())
        }

        ModelAction::Download { model } => {
            let mut manager = EmbeddingModelManager::new(config.models.models_dir.clone()).await?;
            let model_id = manager
                .resolve_model_id(&model)
                .ok_or_else(|| SkillBridgeError::ModelNotFound(model.clone()))?;
            let path: PathBuf = manager.download_model(&model_id).await?;
            println!("Model available at {}", path.display());
            Ok(())
        }

        ModelAction::Warmup => {
            let engine = EmbeddingEngine::from_config(&config).await?;
            engine.warmup()?;
            println!("Model {} ready", engine.model_name());
            Ok(())
        }
    }
}
