use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const SAVE_VERSION: u32 = 1;

pub(crate) const VITAL_MIN: f64 = 0.0;
pub(crate) const VITAL_MAX: f64 = 100.0;

pub(crate) fn clamp_vital(v: f64) -> f64 {
    v.clamp(VITAL_MIN, VITAL_MAX)
}

#[derive(Clone, Debug)]
pub(crate) enum Scene {
    Main,
    Help,
    ConfirmReset,
    Recap(CatchupSummary),
    Dead,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LifeStage {
    Egg,
    Baby,
    Teen,
    Adult,
}

impl LifeStage {
    /// Half-open bands, evaluated highest first. Anything that is not
    /// at least 1.0 (negative, NaN) is still an egg.
    pub(crate) fn from_age(age: f64) -> Self {
        if age >= 7.0 {
            LifeStage::Adult
        } else if age >= 3.0 {
            LifeStage::Teen
        } else if age >= 1.0 {
            LifeStage::Baby
        } else {
            LifeStage::Egg
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            LifeStage::Egg => "egg",
            LifeStage::Baby => "baby",
            LifeStage::Teen => "teen",
            LifeStage::Adult => "adult",
        }
    }

    /// Age at which this stage ends, if it ends at all.
    pub(crate) fn max_age(self) -> Option<f64> {
        match self {
            LifeStage::Egg => Some(1.0),
            LifeStage::Baby => Some(3.0),
            LifeStage::Teen => Some(7.0),
            LifeStage::Adult => None,
        }
    }
}

impl fmt::Display for LifeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Vital {
    Hunger,
    Happiness,
    Energy,
    Cleanliness,
}

impl Vital {
    pub(crate) const ALL: [Vital; 4] = [
        Vital::Hunger,
        Vital::Happiness,
        Vital::Energy,
        Vital::Cleanliness,
    ];

    pub(crate) fn read(self, pet: &Pet) -> f64 {
        match self {
            Vital::Hunger => pet.hunger,
            Vital::Happiness => pet.happiness,
            Vital::Energy => pet.energy,
            Vital::Cleanliness => pet.cleanliness,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Pet {
    pub(crate) hunger: f64,
    pub(crate) happiness: f64,
    pub(crate) energy: f64,
    pub(crate) age: f64,
    pub(crate) cleanliness: f64,
    pub(crate) stage: LifeStage,
    pub(crate) is_sleeping: bool,
    pub(crate) is_alive: bool,
    #[serde(default)]
    pub(crate) milestones: u32,
}

impl Default for Pet {
    fn default() -> Self {
        Self::new_default()
    }
}

impl Pet {
    pub(crate) fn new_default() -> Self {
        Self {
            hunger: 100.0,
            happiness: 100.0,
            energy: 100.0,
            age: 0.0,
            cleanliness: 100.0,
            stage: LifeStage::Egg,
            is_sleeping: false,
            is_alive: true,
            milestones: 0,
        }
    }

    /// Re-derive the stage from age. Returns the new stage when it changed.
    pub(crate) fn reclassify(&mut self) -> Option<LifeStage> {
        let next = LifeStage::from_age(self.age);
        if next == self.stage {
            return None;
        }
        self.stage = next;
        Some(next)
    }

    pub(crate) fn any_vital_depleted(&self) -> bool {
        self.hunger <= VITAL_MIN || self.happiness <= VITAL_MIN || self.energy <= VITAL_MIN
    }

    /// Cleanliness is carried but does not take part in the death rule.
    /// Returns true only on the alive -> dead transition.
    pub(crate) fn check_death(&mut self) -> bool {
        if self.is_alive && self.any_vital_depleted() {
            self.is_alive = false;
            return true;
        }
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct DecayRates {
    pub(crate) hunger: f64,
    pub(crate) happiness: f64,
    pub(crate) energy: f64,
    pub(crate) energy_restore: f64,
    pub(crate) sleep_hunger_factor: f64,
    pub(crate) age: f64,
}

impl Default for DecayRates {
    fn default() -> Self {
        Self {
            hunger: 0.3,
            happiness: 0.2,
            energy: 0.2,
            energy_restore: 1.0,
            sleep_hunger_factor: 0.3,
            age: 0.02,
        }
    }
}

/// Per-minute losses applied in one batch for time spent closed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CatchupRates {
    pub(crate) hunger_per_min: f64,
    pub(crate) happiness_per_min: f64,
    pub(crate) energy_per_min: f64,
    pub(crate) age_per_min: f64,
}

impl Default for CatchupRates {
    fn default() -> Self {
        Self {
            hunger_per_min: 0.5,
            happiness_per_min: 0.3,
            energy_per_min: 0.3,
            age_per_min: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ActionEffects {
    pub(crate) feed_hunger: f64,
    pub(crate) feed_happiness: f64,
    pub(crate) play_happiness: f64,
    pub(crate) play_energy_cost: f64,
    pub(crate) play_hunger_cost: f64,
    pub(crate) play_min_energy: f64,
    pub(crate) clean_happiness: f64,
}

impl Default for ActionEffects {
    fn default() -> Self {
        Self {
            feed_hunger: 25.0,
            feed_happiness: 5.0,
            play_happiness: 15.0,
            play_energy_cost: 8.0,
            play_hunger_cost: 3.0,
            play_min_energy: 20.0,
            clean_happiness: 10.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Rules {
    pub(crate) decay: DecayRates,
    pub(crate) catchup: CatchupRates,
    pub(crate) actions: ActionEffects,
    pub(crate) flavor_chance: f64, // per tick, cosmetic only
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            decay: DecayRates::default(),
            catchup: CatchupRates::default(),
            actions: ActionEffects::default(),
            flavor_chance: 0.02,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct SaveFile {
    pub(crate) version: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(crate) last_update: DateTime<Utc>,
    pub(crate) pet: Pet,
}

/// Why an action was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Refusal {
    Dead,
    Sleeping,
    TooTired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AlertLevel {
    Warning,
    Emergency,
}

pub(crate) const FLAVOR_TEXT: [&str; 4] = [
    "Your DigiBuddy is looking for attention!",
    "Your DigiBuddy seems bored...",
    "Your DigiBuddy is making cute noises!",
    "Your DigiBuddy is exploring its surroundings.",
];

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Notice {
    Welcome,
    WelcomeBack,
    Arrived,
    Fed,
    Played,
    Cleaned,
    FellAsleep,
    WokeUp,
    Blocked(Refusal),
    Evolved(LifeStage),
    Milestone(u32),
    Died,
    Flavor(&'static str),
    Alert(Vital, AlertLevel),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Welcome => f.write_str("Welcome to DigiBuddy! Take good care of your new pet."),
            Notice::WelcomeBack => f.write_str("Welcome back! Your DigiBuddy missed you!"),
            Notice::Arrived => f.write_str("A new DigiBuddy has arrived! Take good care of it."),
            Notice::Fed => f.write_str("Yum! Your DigiBuddy enjoyed the meal!"),
            Notice::Played => f.write_str("Your DigiBuddy had fun playing!"),
            Notice::Cleaned => f.write_str("Your DigiBuddy feels fresh and clean!"),
            Notice::FellAsleep => f.write_str("Your DigiBuddy is now sleeping. Zzz..."),
            Notice::WokeUp => f.write_str("Your DigiBuddy woke up!"),
            Notice::Blocked(Refusal::Sleeping) => {
                f.write_str("Your DigiBuddy is sleeping! Wait for it to wake up.")
            }
            Notice::Blocked(Refusal::TooTired) => {
                f.write_str("Your DigiBuddy is too tired to play right now.")
            }
            Notice::Evolved(stage) => write!(f, "Your DigiBuddy evolved into a {stage}!"),
            Notice::Milestone(days) => {
                write!(f, "Milestone reached! Your DigiBuddy is now {days} days old!")
            }
            // dead refusals are dropped before display; both read as the death line
            Notice::Died | Notice::Blocked(Refusal::Dead) => {
                f.write_str("Your DigiBuddy has passed away... Press R to start over.")
            }
            Notice::Flavor(text) => f.write_str(text),
            Notice::Alert(vital, level) => f.write_str(alert_text(*vital, *level)),
        }
    }
}

fn alert_text(vital: Vital, level: AlertLevel) -> &'static str {
    match (vital, level) {
        (Vital::Hunger, AlertLevel::Warning) => {
            "Your DigiBuddy is getting hungry! Consider feeding soon."
        }
        (Vital::Happiness, AlertLevel::Warning) => {
            "Your DigiBuddy is feeling sad! Some playtime would help!"
        }
        (Vital::Energy, AlertLevel::Warning) => {
            "Your DigiBuddy is getting tired! Maybe some rest soon?"
        }
        (Vital::Cleanliness, AlertLevel::Warning) => {
            "Your DigiBuddy is getting dirty! A cleaning would be nice!"
        }
        (Vital::Hunger, AlertLevel::Emergency) => "Your DigiBuddy is very hungry! Feed it now!",
        (Vital::Happiness, AlertLevel::Emergency) => {
            "Your DigiBuddy is very sad! Play with it urgently!"
        }
        (Vital::Energy, AlertLevel::Emergency) => {
            "Your DigiBuddy is exhausted! Let it sleep immediately!"
        }
        (Vital::Cleanliness, AlertLevel::Emergency) => {
            "Your DigiBuddy is very dirty! Clean it right away!"
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CatchupSummary {
    pub(crate) minutes: i64,
    pub(crate) hunger_lost: f64,
    pub(crate) happiness_lost: f64,
    pub(crate) energy_lost: f64,
    pub(crate) age_gained: f64,
    pub(crate) evolved: Option<(LifeStage, LifeStage)>,
    pub(crate) milestone: Option<u32>,
    pub(crate) died: bool,
}

impl CatchupSummary {
    pub(crate) fn new() -> Self {
        Self {
            minutes: 0,
            hunger_lost: 0.0,
            happiness_lost: 0.0,
            energy_lost: 0.0,
            age_gained: 0.0,
            evolved: None,
            milestone: None,
            died: false,
        }
    }

    pub(crate) fn has_anything(&self) -> bool {
        self.minutes > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pet_is_an_egg() {
        let pet = Pet::new_default();
        assert_eq!(LifeStage::from_age(pet.age), LifeStage::Egg);
        assert_eq!(pet.stage, LifeStage::Egg);
        assert!(pet.is_alive);
        assert!(!pet.is_sleeping);
        assert_eq!(pet.cleanliness, 100.0);
    }

    #[test]
    fn stage_bands_are_half_open() {
        assert_eq!(LifeStage::from_age(0.999), LifeStage::Egg);
        assert_eq!(LifeStage::from_age(1.0), LifeStage::Baby);
        assert_eq!(LifeStage::from_age(2.999), LifeStage::Baby);
        assert_eq!(LifeStage::from_age(3.0), LifeStage::Teen);
        assert_eq!(LifeStage::from_age(6.999), LifeStage::Teen);
        assert_eq!(LifeStage::from_age(7.0), LifeStage::Adult);
        assert_eq!(LifeStage::from_age(1000.0), LifeStage::Adult);
    }

    #[test]
    fn stage_classifier_is_total() {
        assert_eq!(LifeStage::from_age(-3.0), LifeStage::Egg);
        assert_eq!(LifeStage::from_age(f64::NAN), LifeStage::Egg);
        assert_eq!(LifeStage::from_age(f64::INFINITY), LifeStage::Adult);
    }

    #[test]
    fn reclassify_reports_only_changes() {
        let mut pet = Pet::new_default();
        assert_eq!(pet.reclassify(), None);
        pet.age = 3.5;
        assert_eq!(pet.reclassify(), Some(LifeStage::Teen));
        assert_eq!(pet.reclassify(), None);
    }

    #[test]
    fn death_ignores_cleanliness() {
        let mut pet = Pet::new_default();
        pet.cleanliness = 0.0;
        assert!(!pet.check_death());
        assert!(pet.is_alive);

        pet.energy = 0.0;
        assert!(pet.check_death());
        assert!(!pet.is_alive);
        // already dead: no second transition
        assert!(!pet.check_death());
    }

    #[test]
    fn stage_serializes_lowercase() {
        let s = serde_json::to_string(&LifeStage::Teen).unwrap();
        assert_eq!(s, "\"teen\"");
    }

    #[test]
    fn notice_texts() {
        assert_eq!(
            Notice::Evolved(LifeStage::Baby).to_string(),
            "Your DigiBuddy evolved into a baby!"
        );
        assert_eq!(
            Notice::Blocked(Refusal::Sleeping).to_string(),
            "Your DigiBuddy is sleeping! Wait for it to wake up."
        );
        assert_eq!(
            Notice::Alert(Vital::Energy, AlertLevel::Emergency).to_string(),
            "Your DigiBuddy is exhausted! Let it sleep immediately!"
        );
    }

    #[test]
    fn one_death_line() {
        assert_eq!(
            Notice::Blocked(Refusal::Dead).to_string(),
            Notice::Died.to_string()
        );
    }

    #[test]
    fn partial_rules_fill_from_defaults() {
        let rules: Rules = serde_json::from_str(r#"{"decay":{"hunger":1.5}}"#).unwrap();
        assert_eq!(rules.decay.hunger, 1.5);
        assert_eq!(rules.decay.happiness, 0.2);
        assert_eq!(rules.actions, ActionEffects::default());
        assert_eq!(rules.flavor_chance, 0.02);
    }
}
