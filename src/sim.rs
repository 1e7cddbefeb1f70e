use crate::model::{
    clamp_vital, CatchupRates, CatchupSummary, LifeStage, Notice, Pet, Refusal, Rules,
    FLAVOR_TEXT,
};
use chrono::{DateTime, Utc};
use rand::Rng;

/// Everything that may write to the pet, in the order it arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Tick,
    Feed,
    Play,
    ToggleSleep,
    Clean,
    Reset,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) mutated: bool,
    pub(crate) notices: Vec<Notice>,
}

impl Outcome {
    fn changed(notices: Vec<Notice>) -> Self {
        Self {
            mutated: true,
            notices,
        }
    }

    fn refused(reason: Refusal) -> Self {
        let notices = match reason {
            Refusal::Dead => Vec::new(),
            other => vec![Notice::Blocked(other)],
        };
        Self {
            mutated: false,
            notices,
        }
    }
}

impl Pet {
    /// Preconditions for a command, in the order they are checked.
    pub(crate) fn check(&self, cmd: Command, rules: &Rules) -> Result<(), Refusal> {
        match cmd {
            Command::Tick | Command::Reset => Ok(()),
            _ if !self.is_alive => Err(Refusal::Dead),
            Command::ToggleSleep => Ok(()),
            Command::Feed | Command::Clean if self.is_sleeping => Err(Refusal::Sleeping),
            Command::Feed | Command::Clean => Ok(()),
            Command::Play if self.is_sleeping => Err(Refusal::Sleeping),
            Command::Play if self.energy < rules.actions.play_min_energy => {
                Err(Refusal::TooTired)
            }
            Command::Play => Ok(()),
        }
    }

    pub(crate) fn available(&self, cmd: Command, rules: &Rules) -> bool {
        self.check(cmd, rules).is_ok()
    }

    pub(crate) fn apply(&mut self, cmd: Command, rules: &Rules, rng: &mut impl Rng) -> Outcome {
        if let Err(reason) = self.check(cmd, rules) {
            return Outcome::refused(reason);
        }
        let mut outcome = self.act(cmd, rules, rng);
        // an action can empty a vital just as a tick can
        if outcome.mutated && self.check_death() {
            outcome.notices.push(Notice::Died);
        }
        outcome
    }

    fn act(&mut self, cmd: Command, rules: &Rules, rng: &mut impl Rng) -> Outcome {
        let fx = &rules.actions;
        match cmd {
            Command::Tick => self.tick(rules, rng),
            Command::Feed => {
                self.hunger = clamp_vital(self.hunger + fx.feed_hunger);
                self.happiness = clamp_vital(self.happiness + fx.feed_happiness);
                Outcome::changed(vec![Notice::Fed])
            }
            Command::Play => {
                self.happiness = clamp_vital(self.happiness + fx.play_happiness);
                self.energy = clamp_vital(self.energy - fx.play_energy_cost);
                self.hunger = clamp_vital(self.hunger - fx.play_hunger_cost);
                Outcome::changed(vec![Notice::Played])
            }
            Command::ToggleSleep => {
                self.is_sleeping = !self.is_sleeping;
                let notice = if self.is_sleeping {
                    Notice::FellAsleep
                } else {
                    Notice::WokeUp
                };
                Outcome::changed(vec![notice])
            }
            Command::Clean => {
                self.happiness = clamp_vital(self.happiness + fx.clean_happiness);
                Outcome::changed(vec![Notice::Cleaned])
            }
            Command::Reset => {
                *self = Pet::new_default();
                Outcome::changed(vec![Notice::Arrived])
            }
        }
    }

    /// One decay step. Dead pets are frozen.
    pub(crate) fn tick(&mut self, rules: &Rules, rng: &mut impl Rng) -> Outcome {
        if !self.is_alive {
            return Outcome::default();
        }
        let d = &rules.decay;

        if self.is_sleeping {
            self.energy = clamp_vital(self.energy + d.energy_restore);
            self.hunger = clamp_vital(self.hunger - d.hunger * d.sleep_hunger_factor);
        } else {
            self.hunger = clamp_vital(self.hunger - d.hunger);
            self.happiness = clamp_vital(self.happiness - d.happiness);
            self.energy = clamp_vital(self.energy - d.energy);
        }

        let mut notices = Vec::new();

        // cosmetic only; rolled before the stage and death notices so those win the status line
        if rng.gen_bool(rules.flavor_chance.clamp(0.0, 1.0)) {
            let text = FLAVOR_TEXT[rng.gen_range(0..FLAVOR_TEXT.len())];
            notices.push(Notice::Flavor(text));
        }

        let growth = self.grow(d.age);
        if let Some(stage) = growth.evolved {
            notices.push(Notice::Evolved(stage));
        }
        if let Some(days) = growth.milestone {
            notices.push(Notice::Milestone(days));
        }

        if self.check_death() {
            notices.push(Notice::Died);
        }

        Outcome::changed(notices)
    }

    fn grow(&mut self, delta: f64) -> Growth {
        self.age += delta.max(0.0);
        let evolved = self.reclassify();

        let reached = (self.age.floor() / 10.0) as u32;
        let milestone = if reached > self.milestones {
            self.milestones = reached;
            Some(reached * 10)
        } else {
            None
        };

        Growth { evolved, milestone }
    }
}

struct Growth {
    evolved: Option<LifeStage>,
    milestone: Option<u32>,
}

/// Apply the time spent closed as a single batch.
pub(crate) fn catch_up(
    pet: &mut Pet,
    last_update: DateTime<Utc>,
    now: DateTime<Utc>,
    rates: &CatchupRates,
) -> CatchupSummary {
    let mut summary = CatchupSummary::new();

    // num_minutes truncates, which is floor for the positive case we act on
    let minutes = (now - last_update).num_minutes();
    if minutes <= 0 || !pet.is_alive {
        return summary;
    }
    let m = minutes as f64;

    let (hunger, happiness, energy) = (pet.hunger, pet.happiness, pet.energy);
    pet.hunger = clamp_vital(pet.hunger - rates.hunger_per_min * m);
    pet.happiness = clamp_vital(pet.happiness - rates.happiness_per_min * m);
    pet.energy = clamp_vital(pet.energy - rates.energy_per_min * m);

    let stage_before = pet.stage;
    let age_before = pet.age;
    let growth = pet.grow(rates.age_per_min * m);

    summary.minutes = minutes;
    summary.hunger_lost = hunger - pet.hunger;
    summary.happiness_lost = happiness - pet.happiness;
    summary.energy_lost = energy - pet.energy;
    summary.age_gained = pet.age - age_before;
    summary.evolved = growth.evolved.map(|after| (stage_before, after));
    summary.milestone = growth.milestone;
    summary.died = pet.check_death();
    summary
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arb_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            6 => Just(Command::Tick),
            2 => Just(Command::Feed),
            2 => Just(Command::Play),
            1 => Just(Command::ToggleSleep),
            1 => Just(Command::Clean),
        ]
    }

    fn arb_pet() -> impl Strategy<Value = Pet> {
        (
            0.0f64..=100.0,
            0.0f64..=100.0,
            0.0f64..=100.0,
            0.0f64..12.0,
            any::<bool>(),
        )
            .prop_map(|(hunger, happiness, energy, age, is_sleeping)| {
                let mut pet = Pet {
                    hunger,
                    happiness,
                    energy,
                    age,
                    is_sleeping,
                    ..Pet::new_default()
                };
                pet.reclassify();
                pet.milestones = (age.floor() / 10.0) as u32;
                pet.check_death();
                pet
            })
    }

    fn in_range(v: f64) -> bool {
        (0.0..=100.0).contains(&v)
    }

    proptest! {
        #[test]
        fn vitals_stay_bounded_and_stage_tracks_age(
            start in arb_pet(),
            cmds in proptest::collection::vec(arb_command(), 1..300),
            seed in any::<u64>(),
        ) {
            let rules = Rules { flavor_chance: 0.5, ..Rules::default() };
            let mut rng = StdRng::seed_from_u64(seed);
            let mut pet = start;

            for cmd in cmds {
                let age_before = pet.age;
                let was_alive = pet.is_alive;
                let frozen = pet.clone();

                pet.apply(cmd, &rules, &mut rng);

                prop_assert!(in_range(pet.hunger));
                prop_assert!(in_range(pet.happiness));
                prop_assert!(in_range(pet.energy));
                prop_assert!(in_range(pet.cleanliness));
                prop_assert_eq!(pet.stage, LifeStage::from_age(pet.age));
                prop_assert!(!pet.is_alive || !pet.any_vital_depleted());
                prop_assert!(pet.age >= age_before);
                if !was_alive {
                    prop_assert_eq!(&pet, &frozen);
                }
            }
        }

        #[test]
        fn catch_up_keeps_invariants(start in arb_pet(), minutes in 0i64..100_000) {
            let mut pet = start.clone();
            let then = Utc::now();
            let now = then + chrono::Duration::minutes(minutes);
            catch_up(&mut pet, then, now, &CatchupRates::default());

            prop_assert!(in_range(pet.hunger));
            prop_assert!(in_range(pet.happiness));
            prop_assert!(in_range(pet.energy));
            prop_assert_eq!(pet.stage, LifeStage::from_age(pet.age));
            prop_assert!(pet.age >= start.age);
            if !start.is_alive {
                prop_assert_eq!(&pet, &start);
            }
        }
    }
}
