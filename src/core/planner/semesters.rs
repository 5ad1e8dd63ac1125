//! Semester list generation
//!
//! Regular semesters are numbered `1..=total`. An antara (inter-semester) slot
//! follows every even-numbered semester except the last one, so eight
//! semesters yield `1, 2, antara-1, 3, 4, antara-2, 5, 6, antara-3, 7, 8`.

use crate::core::models::semester::antara_id;
use crate::core::models::Semester;
use std::collections::BTreeMap;

/// Default ceiling for semesters 1 and 2
pub const EARLY_SEMESTER_CREDITS: u32 = 20;

/// Default ceiling for semesters 3 and later
pub const LATER_SEMESTER_CREDITS: u32 = 24;

/// Default ceiling for antara slots
pub const ANTARA_CREDITS: u32 = 9;

/// Semesters that use [`EARLY_SEMESTER_CREDITS`]
const EARLY_SEMESTERS: u32 = 2;

/// Build the ordered semester list for `total_semesters` regular semesters
#[must_use]
pub fn semester_list(total_semesters: u32) -> Vec<Semester> {
    let mut semesters = Vec::with_capacity(total_semesters as usize * 3 / 2);
    for i in 1..=total_semesters {
        semesters.push(Semester::normal(i));
        if i % 2 == 0 && i < total_semesters {
            semesters.push(Semester::antara(i / 2));
        }
    }
    semesters
}

/// Number of antara slots implied by `total_semesters`
#[must_use]
pub const fn antara_count(total_semesters: u32) -> u32 {
    total_semesters.saturating_sub(1) / 2
}

/// Default ceiling for regular semester `number`
#[must_use]
pub const fn default_semester_credits(number: u32) -> u32 {
    if number <= EARLY_SEMESTERS {
        EARLY_SEMESTER_CREDITS
    } else {
        LATER_SEMESTER_CREDITS
    }
}

/// Add default ceilings for every semester id implied by `total_semesters`
/// that has no entry yet. Existing entries, including stale ones for
/// semesters that no longer exist, are left alone.
///
/// # Returns
/// The number of entries added
pub fn fill_default_max_credits(
    total_semesters: u32,
    max_credits: &mut BTreeMap<String, u32>,
) -> usize {
    let before = max_credits.len();
    for i in 1..=total_semesters {
        max_credits
            .entry(i.to_string())
            .or_insert_with(|| default_semester_credits(i));
    }
    for n in 1..=antara_count(total_semesters) {
        max_credits.entry(antara_id(n)).or_insert(ANTARA_CREDITS);
    }
    max_credits.len() - before
}

/// Build the semester list and back-fill missing ceilings in one step
#[must_use]
pub fn generate(
    total_semesters: u32,
    existing_max_credits: &BTreeMap<String, u32>,
) -> (Vec<Semester>, BTreeMap<String, u32>) {
    let mut max_credits = existing_max_credits.clone();
    fill_default_max_credits(total_semesters, &mut max_credits);
    (semester_list(total_semesters), max_credits)
}
