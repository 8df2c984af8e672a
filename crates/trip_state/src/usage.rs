//! Who used what, and when.
//!
//! Usage records reference travelers and expenses by id only. A day is not an
//! entity of its own: per-day records are keyed by their ISO date string.
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Traveler ids assigned to one expense.
pub type TravelerSet = BTreeSet<String>;

/// Expense id to the travelers assigned to it.
pub type Assignments = BTreeMap<String, TravelerSet>;

/// Assignments of daily expenses for a single calendar day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayUsage {
    #[serde(default)]
    pub daily_shared: Assignments,
    #[serde(default)]
    pub daily_personal: Assignments,
}

impl DayUsage {
    pub fn is_empty(&self) -> bool {
        self.daily_shared.is_empty() && self.daily_personal.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageCosts {
    #[serde(default)]
    pub one_time_shared: Assignments,
    #[serde(default)]
    pub one_time_personal: Assignments,
    /// Keyed by `YYYY-MM-DD`.
    #[serde(default)]
    pub days: BTreeMap<String, DayUsage>,
}

/// Expense ids known to each catalog, used to prune dangling usage keys.
#[derive(Debug, Default)]
pub struct KnownExpenses<'a> {
    pub daily_shared: BTreeSet<&'a str>,
    pub daily_personal: BTreeSet<&'a str>,
    pub one_time_shared: BTreeSet<&'a str>,
    pub one_time_personal: BTreeSet<&'a str>,
}

impl UsageCosts {
    /// Drops every reference to a traveler outside `known`.
    ///
    /// Sets left empty are removed, and so are days left without any
    /// assignment. Returns how many references were pruned.
    pub fn retain_travelers(&mut self, known: &BTreeSet<&str>) -> usize {
        let mut pruned = 0;
        let mut keep = |set: &mut TravelerSet| {
            let before = set.len();
            set.retain(|id| known.contains(id.as_str()));
            pruned += before - set.len();
        };

        retain_sets(&mut self.one_time_shared, &mut keep);
        retain_sets(&mut self.one_time_personal, &mut keep);
        for day in self.days.values_mut() {
            retain_sets(&mut day.daily_shared, &mut keep);
            retain_sets(&mut day.daily_personal, &mut keep);
        }
        self.days.retain(|_, day| !day.is_empty());

        pruned
    }

    /// Drops assignments keyed by an expense id missing from its catalog.
    ///
    /// Returns how many assignments were pruned.
    pub fn retain_expenses(&mut self, known: &KnownExpenses<'_>) -> usize {
        let before = self.assignment_count();

        self.one_time_shared
            .retain(|id, _| known.one_time_shared.contains(id.as_str()));
        self.one_time_personal
            .retain(|id, _| known.one_time_personal.contains(id.as_str()));
        for day in self.days.values_mut() {
            day.daily_shared
                .retain(|id, _| known.daily_shared.contains(id.as_str()));
            day.daily_personal
                .retain(|id, _| known.daily_personal.contains(id.as_str()));
        }
        self.days.retain(|_, day| !day.is_empty());

        before - self.assignment_count()
    }

    /// Number of expense entries across all maps (not traveler references).
    pub fn assignment_count(&self) -> usize {
        self.one_time_shared.len()
            + self.one_time_personal.len()
            + self
                .days
                .values()
                .map(|day| day.daily_shared.len() + day.daily_personal.len())
                .sum::<usize>()
    }

    /// `true` when no traveler is assigned to anything.
    pub fn is_empty(&self) -> bool {
        self.one_time_shared.is_empty() && self.one_time_personal.is_empty() && self.days.is_empty()
    }
}

fn retain_sets(assignments: &mut Assignments, keep: &mut impl FnMut(&mut TravelerSet)) {
    for set in assignments.values_mut() {
        keep(set);
    }
    assignments.retain(|_, set| !set.is_empty());
}

/// Adds or removes `traveler` from the set of `expense`, cleaning up empties.
pub(crate) fn toggle(assignments: &mut Assignments, expense: &str, traveler: &str, on: bool) {
    if on {
        assignments
            .entry(expense.to_string())
            .or_default()
            .insert(traveler.to_string());
        return;
    }

    if let Some(set) = assignments.get_mut(expense) {
        set.remove(traveler);
        if set.is_empty() {
            assignments.remove(expense);
        }
    }
}
