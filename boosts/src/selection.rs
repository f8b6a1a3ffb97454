use crate::boost::{Boost, BoostId};
use crate::category::TargetCategory;
use crate::counties::County;
use chrono::{DateTime, Utc};

/// Keeps the boosts that are still running, in the order they were given.
pub fn active_boosts(boosts: impl IntoIterator<Item = Boost>, now: DateTime<Utc>) -> Vec<Boost> {
    boosts
        .into_iter()
        .filter(|boost| boost.is_active(now))
        .collect()
}

/// Picks the boost the boost dialog should focus on.
///
/// A pinned boost that is still active always wins. Otherwise the pool is
/// narrowed to the desired category (when any boost has it) and the first boost
/// in that pool aimed at `desired_county` is chosen, falling back to the head of
/// the pool. The incoming order is trusted, no sorting happens here.
pub fn select_boost<'a>(
    active: &'a [Boost],
    desired_category: TargetCategory,
    desired_county: Option<County>,
    pinned: Option<&BoostId>,
) -> Option<&'a Boost> {
    if let Some(pinned) = pinned.and_then(|id| active.iter().find(|boost| &boost.id == id)) {
        return Some(pinned);
    }

    let category_matches = active
        .iter()
        .filter(|boost| boost.category() == desired_category)
        .collect::<Vec<_>>();
    let pool = if category_matches.is_empty() {
        active.iter().collect()
    } else {
        category_matches
    };

    desired_county
        .and_then(|county| {
            pool.iter()
                .find(|boost| boost.target_area.county() == Some(county))
                .copied()
        })
        .or_else(|| pool.first().copied())
}
