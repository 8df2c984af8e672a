//! Roster and usage mutations on a [`TripState`].
//!
//! Traveler names are unique by [`name_key`], so "José", "jose" and "JOSE "
//! all name the same traveler.
use std::collections::BTreeSet;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use uuid::Uuid;

use crate::{StateError, Traveler, TripState, usage::toggle};

/// Identity key of a traveler name.
///
/// Two names clash when they differ only in letter case or accents, or in the
/// spacing and punctuation between words: "José María", "jose maria" and
/// "JOSE-MARIA" share one key. Returns `None` when nothing alphanumeric is
/// left.
pub fn name_key(input: &str) -> Option<String> {
    let folded: String = input
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .map(|ch| if ch.is_alphanumeric() { ch } else { ' ' })
        .collect();
    let key = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    (!key.is_empty()).then_some(key)
}

fn normalize_required_name(value: &str) -> Result<(String, String), StateError> {
    let display = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let key = name_key(&display)
        .ok_or_else(|| StateError::InvalidName("traveler name must not be empty".to_string()))?;
    Ok((display, key))
}

impl TripState {
    /// Ids of every traveler in the roster.
    pub fn traveler_ids(&self) -> BTreeSet<&str> {
        self.travelers.iter().map(|t| t.id.as_str()).collect()
    }

    pub fn traveler(&self, id: &str) -> Option<&Traveler> {
        self.travelers.iter().find(|t| t.id == id)
    }

    fn ensure_unique_name(&self, key: &str, except: Option<&str>) -> Result<(), StateError> {
        let clash = self
            .travelers
            .iter()
            .filter(|t| Some(t.id.as_str()) != except)
            .find(|t| name_key(&t.name).as_deref() == Some(key));
        match clash {
            Some(existing) => Err(StateError::DuplicateName(existing.name.clone())),
            None => Ok(()),
        }
    }

    /// Adds a traveler and returns the generated id.
    pub fn add_traveler(&mut self, name: &str) -> Result<String, StateError> {
        let (display, key) = normalize_required_name(name)?;
        self.ensure_unique_name(&key, None)?;

        let id = Uuid::new_v4().to_string();
        self.travelers.push(Traveler {
            id: id.clone(),
            name: display,
        });
        tracing::debug!(traveler = %id, "traveler added");
        Ok(id)
    }

    pub fn rename_traveler(&mut self, id: &str, name: &str) -> Result<(), StateError> {
        let (display, key) = normalize_required_name(name)?;
        self.ensure_unique_name(&key, Some(id))?;

        let traveler = self
            .travelers
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StateError::UnknownTraveler(id.to_string()))?;
        traveler.name = display;
        Ok(())
    }

    /// Removes a traveler and every usage reference to it.
    ///
    /// Returns `false` if the id was not in the roster.
    pub fn remove_traveler(&mut self, id: &str) -> bool {
        let before = self.travelers.len();
        self.travelers.retain(|t| t.id != id);
        if self.travelers.len() == before {
            return false;
        }

        let known = self.travelers.iter().map(|t| t.id.as_str()).collect();
        let pruned = self.usage_costs.retain_travelers(&known);
        tracing::debug!(traveler = %id, pruned, "traveler removed");
        true
    }

    fn require_traveler(&self, id: &str) -> Result<(), StateError> {
        if self.traveler(id).is_none() {
            return Err(StateError::UnknownTraveler(id.to_string()));
        }
        Ok(())
    }

    /// Marks `traveler` as present (or not) for a daily shared expense on `day`.
    pub fn set_daily_shared_presence(
        &mut self,
        day: &str,
        expense: &str,
        traveler: &str,
        present: bool,
    ) -> Result<(), StateError> {
        self.require_traveler(traveler)?;
        let usage = self.usage_costs.days.entry(day.to_string()).or_default();
        toggle(&mut usage.daily_shared, expense, traveler, present);
        if usage.is_empty() {
            self.usage_costs.days.remove(day);
        }
        Ok(())
    }

    pub fn set_daily_personal_presence(
        &mut self,
        day: &str,
        expense: &str,
        traveler: &str,
        present: bool,
    ) -> Result<(), StateError> {
        self.require_traveler(traveler)?;
        let usage = self.usage_costs.days.entry(day.to_string()).or_default();
        toggle(&mut usage.daily_personal, expense, traveler, present);
        if usage.is_empty() {
            self.usage_costs.days.remove(day);
        }
        Ok(())
    }

    pub fn set_one_time_shared(
        &mut self,
        expense: &str,
        traveler: &str,
        assigned: bool,
    ) -> Result<(), StateError> {
        self.require_traveler(traveler)?;
        toggle(
            &mut self.usage_costs.one_time_shared,
            expense,
            traveler,
            assigned,
        );
        Ok(())
    }

    pub fn set_one_time_personal(
        &mut self,
        expense: &str,
        traveler: &str,
        assigned: bool,
    ) -> Result<(), StateError> {
        self.require_traveler(traveler)?;
        toggle(
            &mut self.usage_costs.one_time_personal,
            expense,
            traveler,
            assigned,
        );
        Ok(())
    }
}
