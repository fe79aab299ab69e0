//! Status classifier: membership predicates for the named fiche views.
//!
//! Every function is total and takes an explicit reference instant where the
//! calendar matters, so results are reproducible under test. A fiche with a
//! missing optional field simply fails the relevant predicate.

use chrono::{Duration, NaiveDate, TimeZone, Utc};

use crate::ficha::{
    FichaLifecycle, FichaSnapshot, FichaState, CONDICION_CONCLUIDO, VISIBLE_STATES,
};
use crate::types::Timestamp;

/// Lifecycle flags admitted by the general "all fichas" listing.
///
/// Drafts (`activo = 2`) are included here on purpose: the production filter
/// has always admitted them into the general listing even though every other
/// view excludes them. Preserved as current behavior pending a product
/// decision; see DESIGN.md.
const LISTED_LIFECYCLES: [i32; 3] = [
    FichaLifecycle::Draft.code(),
    FichaLifecycle::Validated.code(),
    FichaLifecycle::FollowUp.code(),
];

/// Lifecycle flags admitted by the day view (drafts excluded).
const ACTIVE_LIFECYCLES: [i32; 2] = [
    FichaLifecycle::Validated.code(),
    FichaLifecycle::FollowUp.code(),
];

fn state_visible(f: &FichaSnapshot) -> bool {
    f.state.is_some_and(|s| VISIBLE_STATES.contains(&s))
}

/// A fiche saved as a draft.
pub fn is_draft(f: &FichaSnapshot) -> bool {
    f.lifecycle == FichaLifecycle::Draft.code()
}

/// A fiche the general listing shows (drafts included, see
/// [`LISTED_LIFECYCLES`]).
pub fn is_published(f: &FichaSnapshot) -> bool {
    LISTED_LIFECYCLES.contains(&f.lifecycle) && state_visible(f)
}

/// A non-draft fiche elaborated on the UTC calendar day of `now`.
pub fn is_today(f: &FichaSnapshot, now: Timestamp) -> bool {
    let (start, end) = day_bounds(now.date_naive());
    ACTIVE_LIFECYCLES.contains(&f.lifecycle)
        && state_visible(f)
        && f.elaborada_en.is_some_and(|t| t >= start && t <= end)
}

/// A fiche the concluded view shows. All four conditions are required and
/// the condition label is matched exactly, case-sensitive.
pub fn is_concluded(f: &FichaSnapshot) -> bool {
    f.state == Some(FichaState::Concluded.code())
        && f.lifecycle == FichaLifecycle::Validated.code()
        && f.cedula.is_some_and(|c| c > 0)
        && f.condicion == CONDICION_CONCLUIDO
}

/// A published fiche elaborated within the inclusive day range
/// `[desde, hasta]`. The end date is extended to its last instant, so a
/// fiche elaborated at 23:59:59.999 on `hasta` is still inside.
pub fn in_date_range(f: &FichaSnapshot, desde: NaiveDate, hasta: NaiveDate) -> bool {
    let start = start_of_day(desde);
    let (_, end) = day_bounds(hasta);
    is_published(f) && f.elaborada_en.is_some_and(|t| t >= start && t <= end)
}

/// First instant of a UTC calendar day.
pub fn start_of_day(date: NaiveDate) -> Timestamp {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is always valid"))
}

/// Inclusive UTC bounds of a calendar day: midnight through one microsecond
/// short of the next midnight (timestamp resolution of the backing store).
pub fn day_bounds(date: NaiveDate) -> (Timestamp, Timestamp) {
    let start = start_of_day(date);
    (start, start + Duration::days(1) - Duration::microseconds(1))
}
