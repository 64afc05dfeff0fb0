use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, error, info};

use crate::config::settings::ProcessingSettings;
use crate::domain::{BatchProgress, Tournament};
use crate::feed::TournamentFeed;
use crate::services::awards::{self, AwardPlan};
use crate::services::context::RunContext;
use crate::store::{ApplySummary, StatsRepository};

/// Lifecycle of one tournament. Only `Recorded` is ever persisted (as the
/// processed marker); a failed tournament is `Unseen` again on the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentState {
    Unseen,
    InFlight,
    Recorded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TournamentOutcome {
    pub tournament_id: String,
    pub state: TournamentState,
    /// Set when the marker already existed and nothing was written
    pub already_processed: bool,
    pub summary: Option<ApplySummary>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub season: i64,
    pub outcomes: Vec<TournamentOutcome>,
}

impl BatchReport {
    pub fn count(&self, state: TournamentState) -> usize {
        self.outcomes.iter().filter(|o| o.state == state).count()
    }

    pub fn newly_recorded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.state == TournamentState::Recorded && !o.already_processed)
            .count()
    }
}

/// Drives one batch: fetch due tournaments, score each unseen one, record it.
/// Tournaments and teams are handled strictly one after another.
pub struct ResultProcessor<F, S> {
    feed: F,
    store: S,
    settings: ProcessingSettings,
}

impl<F, S> ResultProcessor<F, S>
where
    F: TournamentFeed,
    S: StatsRepository,
{
    pub fn new(feed: F, store: S, settings: ProcessingSettings) -> Self {
        Self {
            feed,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub async fn run(&mut self, now: DateTime<Utc>) -> Result<BatchReport> {
        info!("=== Starting Result Processing ===\n");

        // Step 1: Per-run context
        let ctx = RunContext::load(&self.store)?;

        // Step 2: Due tournaments
        let (since, until) = self.settings.window(now)?;
        let tournaments = self
            .feed
            .list_tournaments(since, until)
            .await
            .context("Failed to list tournaments from feed")?;
        info!("  → Found {} tournaments since {}\n", tournaments.len(), since);

        // Step 3: Process each
        let mut progress = BatchProgress::new(tournaments.len());
        let mut report = BatchReport {
            season: ctx.season,
            outcomes: Vec::with_capacity(tournaments.len()),
        };

        for tournament in &tournaments {
            let outcome = self.process_tournament(&ctx, tournament).await;
            match (outcome.state, outcome.already_processed) {
                (TournamentState::Recorded, true) => progress.increment_already_processed(),
                (TournamentState::Recorded, false) => progress.increment_recorded(),
                _ => progress.increment_failed(),
            }
            report.outcomes.push(outcome);
        }

        info!(
            "=== Processing Complete: {} recorded, {} already processed, {} failed ===",
            progress.recorded(),
            progress.already_processed(),
            progress.failed()
        );
        Ok(report)
    }

    /// Errors never escape: a failing tournament is logged and left unmarked.
    pub async fn process_tournament(&mut self, ctx: &RunContext, tournament: &Tournament) -> TournamentOutcome {
        let mut outcome = TournamentOutcome {
            tournament_id: tournament.id.clone(),
            state: TournamentState::Unseen,
            already_processed: false,
            summary: None,
        };

        match self.store.is_processed(&tournament.id) {
            Ok(true) => {
                debug!("Tournament {} already processed, skipping", tournament.id);
                outcome.state = TournamentState::Recorded;
                outcome.already_processed = true;
                return outcome;
            }
            Ok(false) => {}
            Err(e) => {
                error!("Failed to check marker for tournament {}: {:?}", tournament.id, e);
                outcome.state = TournamentState::Failed;
                return outcome;
            }
        }

        outcome.state = TournamentState::InFlight;
        match self.score_and_record(ctx, tournament).await {
            Ok(summary) => {
                outcome.state = TournamentState::Recorded;
                outcome.summary = Some(summary);
            }
            Err(e) => {
                error!(
                    "Failed to process tournament {} ({}): {:?}",
                    tournament.id,
                    tournament.display_name(),
                    e
                );
                outcome.state = TournamentState::Failed;
            }
        }
        outcome
    }

    async fn score_and_record(&mut self, ctx: &RunContext, tournament: &Tournament) -> Result<ApplySummary> {
        let rows = self
            .feed
            .list_participants(&tournament.id)
            .await
            .with_context(|| format!("Failed to list participants for {}", tournament.id))?;

        let plan = awards::plan_awards(tournament, &rows, ctx);
        log_plan(&plan);

        let summary = self.store.apply_plan(&plan)?;
        info!(
            "Recorded tournament {} ({}, tier {}): {} individual, {} club awards",
            tournament.id,
            tournament.display_name(),
            plan.tier,
            summary.individual_awards,
            summary.club_awards
        );
        Ok(summary)
    }
}

fn log_plan(plan: &AwardPlan) {
    for entry in &plan.podium {
        debug!(
            "  #{} party {} (placement {}): {}",
            entry.position,
            entry.party_id,
            entry.placement,
            entry.competitor_ids.join(", ")
        );
    }
}
