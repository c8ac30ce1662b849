//! Final pass: any non-finite derived value becomes the missing marker.

use super::EnrichedEvent;

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

pub fn sanitize(event: EnrichedEvent) -> EnrichedEvent {
    EnrichedEvent {
        time_since_last_minutes: finite(event.time_since_last_minutes),
        avg_amount_last_30d: finite(event.avg_amount_last_30d),
        amount_deviation_score: finite(event.amount_deviation_score),
        ..event
    }
}

/// Count of derived fields [`sanitize`] would rewrite.
pub fn non_finite_fields(event: &EnrichedEvent) -> usize {
    [
        event.time_since_last_minutes,
        event.avg_amount_last_30d,
        event.amount_deviation_score,
    ]
    .iter()
    .filter(|v| matches!(v, Some(x) if !x.is_finite()))
    .count()
}
