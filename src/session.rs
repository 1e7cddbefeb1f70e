//! The single owner of the pet.
//!
//! Every write goes through [`Session::dispatch`], which runs the shared
//! post-mutation pipeline: reclassify, raise low-stat alerts, persist. The
//! presentation reads [`Session::pet`] and [`Session::status`] between
//! commands; neither can mutate.

use crate::model::{CatchupSummary, Notice, Pet, Rules, SaveFile, SAVE_VERSION};
use crate::sim::{catch_up, Command};
use crate::status::AlertTracker;
use crate::storage::SnapshotStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

pub(crate) struct Session<S: SnapshotStore> {
    pet: Pet,
    rules: Rules,
    rng: StdRng,
    store: S,
    alerts: AlertTracker,
    status: String,
}

impl<S: SnapshotStore> Session<S> {
    /// Start from the stored snapshot when there is a usable one, applying
    /// offline catch-up; otherwise start from defaults.
    pub(crate) fn restore(
        store: S,
        rules: Rules,
        rng: StdRng,
        now: DateTime<Utc>,
    ) -> (Self, Option<CatchupSummary>) {
        let (pet, summary, greeting) = match store.load() {
            Some(save) => {
                let mut pet = save.pet;
                let summary = catch_up(&mut pet, save.last_update, now, &rules.catchup);
                info!(
                    minutes = summary.minutes,
                    stage = %pet.stage,
                    alive = pet.is_alive,
                    "restored pet"
                );
                (pet, Some(summary), Notice::WelcomeBack)
            }
            None => (Pet::new_default(), None, Notice::Welcome),
        };

        let mut session = Self {
            pet,
            rules,
            rng,
            store,
            alerts: AlertTracker::default(),
            status: greeting.to_string(),
        };
        session.alerts.observe(&session.pet);
        session.persist(now);
        (session, summary)
    }

    pub(crate) fn pet(&self) -> &Pet {
        &self.pet
    }

    pub(crate) fn rules(&self) -> &Rules {
        &self.rules
    }

    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    /// Run one command to completion. Returns the notices it produced; the
    /// last one becomes the status line.
    pub(crate) fn dispatch(&mut self, cmd: Command, now: DateTime<Utc>) -> Vec<Notice> {
        let outcome = self.pet.apply(cmd, &self.rules, &mut self.rng);
        let mut notices = outcome.notices;

        if outcome.mutated {
            self.pet.reclassify();
            if cmd == Command::Reset {
                self.alerts.clear();
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "could not clear snapshot");
                }
                info!("pet reset");
            }
            let mut alerts = self.alerts.observe(&self.pet);
            // the command's own notices stay last
            alerts.append(&mut notices);
            notices = alerts;
            self.persist(now);
        }

        for notice in &notices {
            match notice {
                Notice::Died => info!(age = self.pet.age, "pet died"),
                Notice::Evolved(stage) => info!(%stage, "pet evolved"),
                Notice::Milestone(days) => info!(days, "milestone reached"),
                _ => {}
            }
        }
        if cmd == Command::Tick {
            debug!(
                hunger = self.pet.hunger,
                happiness = self.pet.happiness,
                energy = self.pet.energy,
                age = self.pet.age,
                "tick"
            );
        }

        if let Some(last) = notices.last() {
            self.status = last.to_string();
        }
        notices
    }

    pub(crate) fn snapshot(&self, now: DateTime<Utc>) -> SaveFile {
        SaveFile {
            version: SAVE_VERSION,
            last_update: now,
            pet: self.pet.clone(),
        }
    }

    /// A failed save never stops play.
    fn persist(&mut self, now: DateTime<Utc>) {
        let save = self.snapshot(now);
        if let Err(e) = self.store.save(&save) {
            warn!(error = %e, "could not save pet");
        }
    }

    /// Final save on the way out; errors go to the caller.
    pub(crate) fn shutdown(&mut self, now: DateTime<Utc>) -> Result<()> {
        let save = self.snapshot(now);
        self.store.save(&save)?;
        info!("saved on exit");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlertLevel, LifeStage, Refusal, Vital};
    use crate::storage::memory::MemoryStore;
    use chrono::Duration as ChronoDuration;
    use rand::SeedableRng;

    fn quiet() -> Rules {
        Rules {
            flavor_chance: 0.0,
            ..Rules::default()
        }
    }

    fn fresh(now: DateTime<Utc>) -> Session<MemoryStore> {
        let (s, summary) = Session::restore(
            MemoryStore::default(),
            quiet(),
            StdRng::seed_from_u64(1),
            now,
        );
        assert!(summary.is_none());
        s
    }

    #[test]
    fn empty_store_starts_fresh_and_saves() {
        let now = Utc::now();
        let s = fresh(now);
        assert_eq!(s.pet(), &Pet::new_default());
        assert_eq!(s.status(), Notice::Welcome.to_string());
        assert_eq!(s.store().saves, 1);
        assert_eq!(s.store().slot.as_ref().map(|f| f.last_update), Some(now));
    }

    #[test]
    fn restore_applies_catch_up() {
        let then = Utc::now();
        let store = MemoryStore {
            slot: Some(SaveFile {
                version: SAVE_VERSION,
                last_update: then,
                pet: Pet::new_default(),
            }),
            ..MemoryStore::default()
        };
        let now = then + ChronoDuration::minutes(10);
        let (s, summary) = Session::restore(store, quiet(), StdRng::seed_from_u64(1), now);
        let summary = summary.unwrap();
        assert_eq!(summary.minutes, 10);
        assert!((s.pet().hunger - 95.0).abs() < 1e-9);
        assert!(s.pet().is_alive);
        assert_eq!(s.status(), Notice::WelcomeBack.to_string());
        // caught-up state is persisted with the new timestamp
        assert_eq!(s.store().slot.as_ref().map(|f| f.last_update), Some(now));
    }

    #[test]
    fn successful_action_persists() {
        let now = Utc::now();
        let mut s = fresh(now);
        s.dispatch(Command::Play, now);
        assert_eq!(s.store().saves, 2);
        assert_eq!(s.store().slot.as_ref().map(|f| f.pet.clone()), Some(s.pet().clone()));
        assert_eq!(s.status(), Notice::Played.to_string());
    }

    #[test]
    fn blocked_action_reports_without_saving() {
        let now = Utc::now();
        let mut s = fresh(now);
        s.dispatch(Command::ToggleSleep, now);
        let saves = s.store().saves;
        let before = s.pet().clone();

        let notices = s.dispatch(Command::Feed, now);
        assert_eq!(notices, vec![Notice::Blocked(Refusal::Sleeping)]);
        assert_eq!(s.pet(), &before);
        assert_eq!(s.store().saves, saves);
        assert_eq!(
            s.status(),
            "Your DigiBuddy is sleeping! Wait for it to wake up."
        );
    }

    #[test]
    fn pipeline_is_idempotent_on_unchanged_state() {
        let now = Utc::now();
        let s = fresh(now);
        let a = s.snapshot(now);
        let b = s.snapshot(now);
        assert_eq!(a, b);
        assert_eq!(s.pet(), &a.pet);
    }

    #[test]
    fn reset_clears_then_saves_defaults() {
        let now = Utc::now();
        let mut s = fresh(now);
        for _ in 0..60 {
            s.dispatch(Command::Tick, now);
        }
        assert!(s.pet().age > 1.0);

        s.dispatch(Command::Reset, now);
        assert_eq!(s.pet(), &Pet::new_default());
        assert_eq!(s.store().clears, 1);
        assert_eq!(s.store().slot.as_ref().map(|f| f.pet.clone()), Some(Pet::new_default()));
        assert_eq!(s.status(), Notice::Arrived.to_string());
    }

    #[test]
    fn tick_notices_outrank_alerts_on_the_status_line() {
        let now = Utc::now();
        let mut s = fresh(now);
        s.pet.hunger = 25.2;
        s.pet.age = 0.99;
        let notices = s.dispatch(Command::Tick, now);
        assert_eq!(
            notices,
            vec![
                Notice::Alert(Vital::Hunger, AlertLevel::Warning),
                Notice::Evolved(LifeStage::Baby),
            ]
        );
        assert_eq!(s.status(), "Your DigiBuddy evolved into a baby!");
    }

    #[test]
    fn play_into_empty_hunger_ends_the_pet() {
        let now = Utc::now();
        let mut s = fresh(now);
        s.pet.hunger = 2.0;
        let notices = s.dispatch(Command::Play, now);
        assert_eq!(notices.last(), Some(&Notice::Died));
        assert!(!s.pet().is_alive);
        assert_eq!(s.status(), Notice::Died.to_string());
        assert_eq!(s.store().slot.as_ref().map(|f| f.pet.is_alive), Some(false));
    }

    #[test]
    fn death_freezes_the_session() {
        let now = Utc::now();
        let mut s = fresh(now);
        s.pet.energy = 0.1;
        let notices = s.dispatch(Command::Tick, now);
        assert_eq!(notices.last(), Some(&Notice::Died));
        let dead = s.pet().clone();
        let saves = s.store().saves;

        for cmd in [Command::Tick, Command::Feed, Command::Play, Command::Clean] {
            assert!(s.dispatch(cmd, now).is_empty());
        }
        assert_eq!(s.pet(), &dead);
        assert_eq!(s.store().saves, saves);
    }
}
