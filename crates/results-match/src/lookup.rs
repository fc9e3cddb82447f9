//! Matching an incoming result row against known riders.

use results_model::RiderRecord;
use tracing::trace;

use crate::normalize::eq_ignore_case;
use crate::options::MatchOptions;

/// Finds the stored rider an imported row belongs to.
///
/// An authoritative external id wins. Otherwise first and last name must
/// match case-insensitively, and when the candidate names a club the stored
/// rider's club must match too. Returns `None` when the host should create
/// a new rider.
pub fn find_existing_rider<'a>(
    riders: &'a [RiderRecord],
    candidate: &RiderRecord,
    options: &MatchOptions,
) -> Option<&'a RiderRecord> {
    if let Some(external_id) = candidate.authoritative_id(&options.provisional_prefix)
        && let Some(found) = riders
            .iter()
            .find(|rider| rider.external_id() == Some(external_id))
    {
        trace!(rider = %found.id, "matched on external id");
        return Some(found);
    }

    let found = riders.iter().find(|rider| {
        eq_ignore_case(&rider.first_name, &candidate.first_name)
            && eq_ignore_case(&rider.last_name, &candidate.last_name)
            && candidate.club().is_none_or(|club| {
                rider
                    .club()
                    .is_some_and(|stored| eq_ignore_case(stored, club))
            })
    });
    if let Some(rider) = found {
        trace!(rider = %rider.id, "matched on name and club");
    }
    found
}
