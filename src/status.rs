use crate::model::{AlertLevel, LifeStage, Notice, Pet, Vital};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mood {
    Default,
    Sleeping,
    Hungry,
    Tired,
    Dirty,
    Happy,
}

/// Critical needs first, then contentment.
pub(crate) fn derive_mood(pet: &Pet) -> Mood {
    if !pet.is_alive || pet.stage == LifeStage::Egg {
        return Mood::Default;
    }
    if pet.is_sleeping {
        return Mood::Sleeping;
    }
    if pet.hunger < 20.0 {
        return Mood::Hungry;
    }
    if pet.energy < 20.0 {
        return Mood::Tired;
    }
    if pet.cleanliness < 30.0 {
        return Mood::Dirty;
    }
    if pet.happiness > 70.0 && pet.energy > 50.0 && pet.hunger > 50.0 {
        return Mood::Happy;
    }
    Mood::Default
}

pub(crate) fn mood_message(pet: &Pet) -> &'static str {
    if !pet.is_alive {
        return "Your DigiBuddy has passed away... Press R to start over.";
    }
    if pet.stage == LifeStage::Egg {
        return "I'm still an egg! Keep taking care of me!";
    }
    match derive_mood(pet) {
        Mood::Happy => "I'm so happy! Thank you for taking good care of me!",
        Mood::Hungry => "I'm really hungry... Can I have some food?",
        Mood::Tired => "I'm feeling very tired... I need some rest",
        Mood::Sleeping => "Zzz... I'm sleeping peacefully",
        Mood::Dirty => "I feel dirty and uncomfortable... Can you clean me?",
        Mood::Default if pet.happiness > 70.0 => {
            "I'm having a great day! Thanks for being awesome!"
        }
        Mood::Default if pet.energy > 80.0 => "I'm full of energy! Let's do something fun!",
        Mood::Default => "Hello! I'm doing okay today!",
    }
}

/// Warning above 15 up to 25, emergency above 0 up to 15.
pub(crate) fn alert_level(value: f64) -> Option<AlertLevel> {
    if value <= 15.0 && value > 0.0 {
        Some(AlertLevel::Emergency)
    } else if value <= 25.0 && value > 15.0 {
        Some(AlertLevel::Warning)
    } else {
        None
    }
}

/// Edge-triggered low-stat alerts: a vital raises a notice when it enters a
/// band it was not already in. Session-local, never persisted.
#[derive(Clone, Debug, Default)]
pub(crate) struct AlertTracker {
    active: BTreeMap<Vital, AlertLevel>,
}

impl AlertTracker {
    pub(crate) fn clear(&mut self) {
        self.active.clear();
    }

    pub(crate) fn observe(&mut self, pet: &Pet) -> Vec<Notice> {
        if !pet.is_alive {
            self.clear();
            return Vec::new();
        }
        if pet.is_sleeping {
            self.active.remove(&Vital::Energy);
            return Vec::new();
        }

        let mut out = Vec::new();
        for vital in Vital::ALL {
            match alert_level(vital.read(pet)) {
                Some(level) => {
                    if self.active.insert(vital, level) != Some(level) {
                        out.push(Notice::Alert(vital, level));
                    }
                }
                None => {
                    self.active.remove(&vital);
                }
            }
        }
        out
    }
}

/// The three care lamps shown next to the meters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CareIndicators {
    pub(crate) healthy: bool,
    pub(crate) hungry: bool,
    pub(crate) tired: bool,
    pub(crate) sad: bool,
}

impl CareIndicators {
    pub(crate) fn of(pet: &Pet) -> Self {
        Self {
            healthy: pet.hunger > 30.0 && pet.happiness > 30.0 && pet.energy > 30.0,
            hungry: pet.hunger < 50.0,
            tired: pet.energy < 50.0,
            sad: pet.happiness < 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hatched() -> Pet {
        Pet {
            age: 1.5,
            stage: LifeStage::Baby,
            ..Pet::new_default()
        }
    }

    #[test]
    fn eggs_have_no_mood() {
        let pet = Pet {
            hunger: 5.0,
            ..Pet::new_default()
        };
        assert_eq!(derive_mood(&pet), Mood::Default);
        assert_eq!(mood_message(&pet), "I'm still an egg! Keep taking care of me!");
    }

    #[test]
    fn mood_priorities() {
        let mut pet = hatched();
        assert_eq!(derive_mood(&pet), Mood::Happy);

        pet.cleanliness = 10.0;
        assert_eq!(derive_mood(&pet), Mood::Dirty);
        pet.energy = 10.0;
        assert_eq!(derive_mood(&pet), Mood::Tired);
        pet.hunger = 10.0;
        assert_eq!(derive_mood(&pet), Mood::Hungry);
        pet.is_sleeping = true;
        assert_eq!(derive_mood(&pet), Mood::Sleeping);
        pet.is_alive = false;
        assert_eq!(derive_mood(&pet), Mood::Default);
    }

    #[test]
    fn neutral_mood_message_depends_on_energy() {
        let pet = Pet {
            happiness: 50.0,
            energy: 90.0,
            ..hatched()
        };
        assert_eq!(mood_message(&pet), "I'm full of energy! Let's do something fun!");
        let pet = Pet {
            happiness: 50.0,
            energy: 60.0,
            ..hatched()
        };
        assert_eq!(mood_message(&pet), "Hello! I'm doing okay today!");
    }

    #[test]
    fn alert_bands() {
        assert_eq!(alert_level(25.1), None);
        assert_eq!(alert_level(25.0), Some(AlertLevel::Warning));
        assert_eq!(alert_level(15.1), Some(AlertLevel::Warning));
        assert_eq!(alert_level(15.0), Some(AlertLevel::Emergency));
        assert_eq!(alert_level(0.1), Some(AlertLevel::Emergency));
        assert_eq!(alert_level(0.0), None);
    }

    #[test]
    fn alerts_fire_on_band_entry_only() {
        let mut tracker = AlertTracker::default();
        let mut pet = Pet {
            hunger: 24.0,
            ..hatched()
        };
        assert_eq!(
            tracker.observe(&pet),
            vec![Notice::Alert(Vital::Hunger, AlertLevel::Warning)]
        );
        pet.hunger = 20.0;
        assert!(tracker.observe(&pet).is_empty());
        pet.hunger = 14.0;
        assert_eq!(
            tracker.observe(&pet),
            vec![Notice::Alert(Vital::Hunger, AlertLevel::Emergency)]
        );
        pet.hunger = 60.0;
        assert!(tracker.observe(&pet).is_empty());
        pet.hunger = 22.0;
        assert_eq!(tracker.observe(&pet).len(), 1);
    }

    #[test]
    fn sleeping_silences_alerts_and_forgets_energy() {
        let mut tracker = AlertTracker::default();
        let mut pet = Pet {
            energy: 18.0,
            ..hatched()
        };
        assert_eq!(tracker.observe(&pet).len(), 1);

        pet.is_sleeping = true;
        pet.hunger = 10.0;
        assert!(tracker.observe(&pet).is_empty());

        pet.is_sleeping = false;
        let notices = tracker.observe(&pet);
        assert!(notices.contains(&Notice::Alert(Vital::Energy, AlertLevel::Warning)));
        assert!(notices.contains(&Notice::Alert(Vital::Hunger, AlertLevel::Emergency)));
    }

    #[test]
    fn care_indicators() {
        let pet = Pet {
            hunger: 40.0,
            happiness: 25.0,
            energy: 80.0,
            ..hatched()
        };
        let lamps = CareIndicators::of(&pet);
        assert!(!lamps.healthy);
        assert!(lamps.hungry);
        assert!(!lamps.tired);
        assert!(lamps.sad);
    }
}
