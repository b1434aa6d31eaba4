//! Materializing a repeating event form into one form per occurrence.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::dates::format_date;
use crate::error::CalResult;
use crate::event::EventForm;
use crate::recurrence::RecurrenceRule;

/// Expand `form` into the forms of its series.
///
/// A non-repeating form is returned as-is. A repeating form yields one copy per occurrence
/// date, all sharing a freshly generated series id. An unparseable start or end date
/// yields no occurrences.
pub fn expand_series(form: &EventForm, horizon: NaiveDate) -> CalResult<Vec<EventForm>> {
    if !form.repeat.kind.is_repeating() {
        return Ok(vec![form.clone()]);
    }

    let Some(rule) = RecurrenceRule::from_repeat(&form.date, &form.repeat, horizon)? else {
        tracing::warn!(
            date = %form.date,
            end_date = ?form.repeat.end_date,
            "Invalid series bounds, no occurrences generated"
        );
        return Ok(Vec::new());
    };

    let series_id = Uuid::new_v4().to_string();

    let forms: Vec<EventForm> = rule
        .dates()?
        .into_iter()
        .map(|date| {
            let mut occurrence = form.clone();
            occurrence.date = format_date(date);
            occurrence.repeat.id = Some(series_id.clone());
            occurrence
        })
        .collect();

    tracing::debug!(series_id = %series_id, count = forms.len(), "Materialized series");

    Ok(forms)
}
