//! In-memory event collection with the save and delete flows of the editor.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{CalResult, CalendarError};
use crate::event::{Event, EventForm, RepeatEditMode};
use crate::overlap::find_overlapping_events_for_series;
use crate::series::expand_series;

#[derive(Debug, Clone)]
pub struct EventStore {
    events: Vec<Event>,
    horizon: NaiveDate,
}

impl EventStore {
    pub fn new(events: Vec<Event>, horizon: NaiveDate) -> Self {
        EventStore { events, horizon }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn series(&self, series_id: &str) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(move |e| e.series_id() == Some(series_id))
    }

    /// Known events that clash with a new `form`, expanded into its series if it repeats.
    pub fn conflicts(&self, form: &EventForm) -> CalResult<Vec<Event>> {
        let candidates = expand_series(form, self.horizon)?;
        Ok(self.clashes_with(&candidates, &[]))
    }

    /// Known events that clash with saving `event` under `mode`.
    ///
    /// - `All` on a series member checks the edited times on the date of every existing
    ///   member, ignoring the members themselves.
    /// - Otherwise only the edited event is checked, on its own date, ignoring its stored
    ///   version.
    pub fn conflicts_for_edit(&self, event: &Event, mode: RepeatEditMode) -> Vec<Event> {
        let series_id = event
            .series_id()
            .filter(|_| mode == RepeatEditMode::All && event.repeat.kind.is_repeating());

        match series_id {
            Some(series_id) => {
                let members: Vec<&Event> = self.series(series_id).collect();
                let candidates: Vec<EventForm> = members
                    .iter()
                    .map(|member| EventForm {
                        date: member.date.clone(),
                        ..event.form.clone()
                    })
                    .collect();
                let excluded: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();

                self.clashes_with(&candidates, &excluded)
            }
            None => self.clashes_with(std::slice::from_ref(&event.form), &[event.id.as_str()]),
        }
    }

    fn clashes_with(&self, candidates: &[EventForm], excluded: &[&str]) -> Vec<Event> {
        let others: Vec<Event> = self
            .events
            .iter()
            .filter(|e| !excluded.contains(&e.id.as_str()))
            .cloned()
            .collect();

        find_overlapping_events_for_series(candidates, &others)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Add a new event, expanding it into a series when it repeats.
    /// Returns the ids of the stored events.
    pub fn add(&mut self, form: EventForm) -> CalResult<Vec<String>> {
        let forms = expand_series(&form, self.horizon)?;

        let mut ids = Vec::with_capacity(forms.len());
        for form in forms {
            let event = form.into_event(Uuid::new_v4().to_string());
            ids.push(event.id.clone());
            self.events.push(event);
        }

        tracing::debug!(count = ids.len(), "Added events");
        Ok(ids)
    }

    /// Save an edited event.
    ///
    /// - Plain events are replaced by id.
    /// - Series members with `All` rewrite every member of the series, each keeping its own
    ///   id and date.
    /// - Series members with `Single` are detached: the original is removed and the edit is
    ///   stored as a new standalone event.
    /// - A series member whose repeat type was cleared is left untouched.
    pub fn update(&mut self, event: Event, mode: RepeatEditMode) -> CalResult<Vec<String>> {
        let Some(series_id) = event.series_id().map(str::to_string) else {
            let slot = self
                .events
                .iter_mut()
                .find(|e| e.id == event.id)
                .ok_or_else(|| CalendarError::EventNotFound(event.id.clone()))?;
            *slot = event;
            tracing::debug!(id = %slot.id, "Updated event");
            return Ok(vec![slot.id.clone()]);
        };

        if !event.repeat.kind.is_repeating() {
            tracing::debug!(id = %event.id, "Repeat cleared on series member, ignoring edit");
            return Ok(Vec::new());
        }

        match mode {
            RepeatEditMode::All => {
                let mut ids = Vec::new();
                for member in self
                    .events
                    .iter_mut()
                    .filter(|e| e.series_id() == Some(series_id.as_str()))
                {
                    let date = std::mem::take(&mut member.form.date);
                    member.form = EventForm {
                        date,
                        ..event.form.clone()
                    };
                    ids.push(member.id.clone());
                }

                if ids.is_empty() {
                    return Err(CalendarError::EventNotFound(format!("series {series_id}")));
                }

                tracing::debug!(series_id = %series_id, count = ids.len(), "Updated series");
                Ok(ids)
            }
            RepeatEditMode::Single => {
                self.delete(&event.id)?;

                let mut form = event.form;
                form.repeat.id = None;
                let detached = form.into_event(Uuid::new_v4().to_string());
                let id = detached.id.clone();
                self.events.push(detached);

                tracing::debug!(id = %id, series_id = %series_id, "Detached series member");
                Ok(vec![id])
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> CalResult<Event> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CalendarError::EventNotFound(id.to_string()))?;

        tracing::debug!(id, "Deleted event");
        Ok(self.events.remove(index))
    }

    /// Delete every listed event. Fails without changes if any id is unknown.
    pub fn delete_many(&mut self, ids: &[String]) -> CalResult<usize> {
        if let Some(missing) = ids.iter().find(|id| self.get(id).is_none()) {
            return Err(CalendarError::EventNotFound(missing.clone()));
        }

        let before = self.events.len();
        self.events.retain(|e| !ids.contains(&e.id));
        Ok(before - self.events.len())
    }

    pub fn delete_series(&mut self, series_id: &str) -> usize {
        let before = self.events.len();
        self.events.retain(|e| e.series_id() != Some(series_id));
        let removed = before - self.events.len();

        tracing::debug!(series_id, removed, "Deleted series");
        removed
    }
}
