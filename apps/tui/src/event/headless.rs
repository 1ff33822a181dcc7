use chrono::{DateTime, Utc};
use color_eyre::Result;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use airpower_leaderboard::config::AppConfig;
use airpower_leaderboard::roster::write_merged;
use airpower_leaderboard::{FleetCache, LoadOrchestrator, LoadState, LEADERBOARD};

#[derive(Debug, Serialize)]
struct HeadlessReport {
    generated_at: DateTime<Utc>,
    source: String,
    default_entity: &'static str,
    loaded: usize,
    failed: usize,
    entities: Vec<EntityReport>,
}

#[derive(Debug, Serialize)]
struct EntityReport {
    rank: u8,
    code: &'static str,
    name: &'static str,
    li: f64,
    fps: u32,
    state: &'static str,
    aircraft: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the application in headless mode (no UI)
pub async fn run_headless(
    orchestrator: &LoadOrchestrator,
    config: &AppConfig,
    json: bool,
    export: Option<&Path>,
) -> Result<()> {
    orchestrator
        .load_all(&LEADERBOARD, config.default_entity)
        .await;

    let report = build_report(
        orchestrator.cache(),
        orchestrator.source_description(),
        config.default_entity,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = export {
        let rows = export_merged(orchestrator.cache(), path)?;
        tracing::info!(path = %path.display(), rows, "merged roster written");
        if !json {
            println!("\nWrote {rows} aircraft to {}", path.display());
        }
    }

    Ok(())
}

fn build_report(
    cache: &FleetCache,
    source: String,
    default_entity: &'static str,
) -> HeadlessReport {
    let entities: Vec<EntityReport> = LEADERBOARD
        .iter()
        .map(|entity| {
            let state = cache.state(entity.code);
            EntityReport {
                rank: entity.rank,
                code: entity.code,
                name: entity.display_name,
                li: entity.li,
                fps: entity.fps,
                state: state.label(),
                aircraft: state
                    .roster()
                    .iter()
                    .filter(|entry| entry.has_aircraft())
                    .count(),
                resolved_at: cache.resolved_at(entity.code),
                error: match state {
                    LoadState::Failed(reason) => Some(reason),
                    _ => None,
                },
            }
        })
        .collect();

    HeadlessReport {
        generated_at: Utc::now(),
        source,
        default_entity,
        loaded: entities.iter().filter(|e| e.state == "loaded").count(),
        failed: entities.iter().filter(|e| e.error.is_some()).count(),
        entities,
    }
}

fn print_report(report: &HeadlessReport) {
    println!("\nAir Power Leaderboard");
    println!("=====================");
    println!("Source: {}", report.source);
    println!(
        "Generated: {}",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Rosters: {} loaded, {} failed",
        report.loaded, report.failed
    );
    println!();

    for entity in &report.entities {
        let detail = entity
            .error
            .as_ref()
            .map_or_else(
                || format!("{} aircraft", entity.aircraft),
                |e| format!("failed: {e}"),
            );
        println!(
            "{:>2}. {:<4} {:<16} LI {:>4.1}  FPS {:>4}  {detail}",
            entity.rank,
            entity.code.to_uppercase(),
            entity.name,
            entity.li,
            entity.fps,
        );
    }
}

fn export_merged(cache: &FleetCache, path: &Path) -> Result<usize> {
    let rosters: Vec<(&str, Arc<Vec<_>>)> = LEADERBOARD
        .iter()
        .map(|entity| (entity.code, cache.roster(entity.code)))
        .collect();

    let writer = BufWriter::new(File::create(path)?);
    let rows = write_merged(
        writer,
        rosters
            .iter()
            .map(|(code, entries)| (*code, entries.as_slice())),
    )?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airpower_leaderboard::roster::{FetchError, RosterEntry};
    use std::error::Error;

    fn entry(name: &str) -> RosterEntry {
        RosterEntry {
            aircraft: Some(name.to_string()),
            ..RosterEntry::default()
        }
    }

    fn cache_with_outcomes() -> FleetCache {
        let cache = FleetCache::new();
        cache.begin("us");
        cache.resolve("us", Ok(vec![entry("F-35A"), entry("F-22"), entry(" ")]));
        cache.begin("ru");
        cache.resolve("ru", Err(FetchError::UnknownEntity("ru".to_string())));
        cache
    }

    #[test]
    fn report_counts_loaded_and_failed_rosters() {
        let report = build_report(&cache_with_outcomes(), "data".to_string(), "us");

        assert_eq!(report.entities.len(), LEADERBOARD.len());
        assert_eq!(report.loaded, 1);
        assert_eq!(report.failed, 1);

        let us = &report.entities[0];
        assert_eq!(us.code, "us");
        assert_eq!(us.aircraft, 2);
        assert_eq!(us.state, "loaded");
        assert!(us.resolved_at.is_some());

        let ru = report
            .entities
            .iter()
            .find(|entity| entity.code == "ru")
            .map(|entity| entity.state);
        assert_eq!(ru, Some("failed"));
    }

    #[test]
    fn export_writes_loaded_rows_with_country() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("merged.csv");

        let rows = export_merged(&cache_with_outcomes(), &path)?;
        assert_eq!(rows, 2);

        let written = std::fs::read_to_string(&path)?;
        assert!(written.starts_with("Aircraft,"));
        assert!(written.contains("F-35A,,,,,,,us"));
        Ok(())
    }
}
