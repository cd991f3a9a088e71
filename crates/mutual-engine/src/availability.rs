//! Mutual availability across people, per date.
//!
//! An [`AvailabilityContext`] holds the lookup maps for one run: person name to
//! id, and per (person, date) the busy blocks and the free intervals derived
//! from them. It is built once and never mutated, so queries only read from it.
//!
//! A query resolves every requested name, then for each date folds the
//! people's free sets through [`crate::merge::intersect`] in the order given.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::derive::derive_free;
use crate::error::{MutualError, Result};
use crate::interval::{BusyInterval, FreeInterval, WorkingHours};
use crate::merge::intersect_all;
use crate::records::{parse_event, RawEvent, User};

/// Stable identifier for a person within one run.
pub type PersonId = u64;

/// Busy blocks and derived free intervals for one person on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DaySchedule {
    busy: Vec<BusyInterval>,
    free: Vec<FreeInterval>,
}

/// First event of a person that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RejectedEvent {
    id: u64,
    reason: String,
}

/// Immutable lookup context for availability queries.
#[derive(Debug, Clone)]
pub struct AvailabilityContext {
    hours: WorkingHours,
    people: HashMap<String, PersonId>,
    schedules: HashMap<PersonId, HashMap<String, DaySchedule>>,
    rejected: HashMap<PersonId, RejectedEvent>,
}

/// Free windows shared by everyone in a query, for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAvailability {
    pub date: String,
    pub windows: Vec<BusyInterval>,
}

/// Query result: dates in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub dates: Vec<DateAvailability>,
}

impl AvailabilityResult {
    /// Windows for `date`, if it was part of the query.
    pub fn get(&self, date: &str) -> Option<&[BusyInterval]> {
        self.dates
            .iter()
            .find(|d| d.date == date)
            .map(|d| d.windows.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateAvailability> {
        self.dates.iter()
    }
}

impl AvailabilityContext {
    /// Build a context from already-grouped busy lists.
    ///
    /// Each busy list must be sorted by start and non-overlapping. Free
    /// intervals are derived for every (person, date) entry up front.
    ///
    /// # Errors
    /// Returns `MutualError::InvalidTimeFormat` if a busy bound is not `HH:MM`.
    pub fn new(
        hours: WorkingHours,
        people: HashMap<String, PersonId>,
        busy: HashMap<(PersonId, String), Vec<BusyInterval>>,
    ) -> Result<Self> {
        let mut schedules: HashMap<PersonId, HashMap<String, DaySchedule>> = HashMap::new();
        for ((person, date), busy) in busy {
            let free = derive_free(&busy, &hours)?;
            debug!(
                person,
                date = %date,
                busy = busy.len(),
                free_minutes = free.iter().map(FreeInterval::duration_minutes).sum::<u32>(),
                "derived free time"
            );
            schedules
                .entry(person)
                .or_default()
                .insert(date, DaySchedule { busy, free });
        }

        debug!(
            people = people.len(),
            schedules = schedules.values().map(HashMap::len).sum::<usize>(),
            %hours,
            "built availability context"
        );

        Ok(Self {
            hours,
            people,
            schedules,
            rejected: HashMap::new(),
        })
    }

    /// Start building a context from raw user and event records.
    pub fn builder(hours: WorkingHours) -> ContextBuilder {
        ContextBuilder::new(hours)
    }

    /// Daily window every free interval is bounded by.
    pub fn working_hours(&self) -> WorkingHours {
        self.hours
    }

    /// Resolve a display name to its person id.
    pub fn person_id(&self, name: &str) -> Result<PersonId> {
        self.people
            .get(name)
            .copied()
            .ok_or_else(|| MutualError::MissingPerson {
                name: name.to_string(),
            })
    }

    /// Busy blocks for `name` on `date`, sorted by start.
    pub fn busy(&self, name: &str, date: &str) -> Result<&[BusyInterval]> {
        self.schedule(name, date).map(|day| day.busy.as_slice())
    }

    /// Free intervals for `name` on `date`, sorted by start.
    pub fn free(&self, name: &str, date: &str) -> Result<&[FreeInterval]> {
        self.schedule(name, date).map(|day| day.free.as_slice())
    }

    fn schedule(&self, name: &str, date: &str) -> Result<&DaySchedule> {
        let person = self.person_id(name)?;
        if let Some(rejected) = self.rejected.get(&person) {
            return Err(MutualError::InvalidEvent {
                id: rejected.id,
                reason: rejected.reason.clone(),
            });
        }
        self.schedules
            .get(&person)
            .and_then(|days| days.get(date))
            .ok_or_else(|| MutualError::MissingDate {
                person: name.to_string(),
                date: date.to_string(),
            })
    }

    /// Compute the free windows shared by all `names`, for each of `dates`.
    ///
    /// Dates are evaluated independently and reported in input order. An empty
    /// window list for a date means nobody overlaps; that is not an error.
    ///
    /// # Errors
    /// Fails the whole query, with no partial result, if `names` is empty
    /// (`NoPeople`), a name is unknown (`MissingPerson`), a person has no data
    /// for one of the dates (`MissingDate`), or one of the people had an event
    /// rejected while building (`InvalidEvent`).
    pub fn availability_for<N, D>(&self, names: &[N], dates: &[D]) -> Result<AvailabilityResult>
    where
        N: AsRef<str>,
        D: AsRef<str>,
    {
        if names.is_empty() {
            return Err(MutualError::NoPeople);
        }
        for name in names {
            self.person_id(name.as_ref())?;
        }

        let mut result = AvailabilityResult::default();
        for date in dates {
            let date = date.as_ref();
            let sets = names
                .iter()
                .map(|name| self.free(name.as_ref(), date))
                .collect::<Result<Vec<_>>>()?;

            let windows = intersect_all(sets)
                .iter()
                .map(FreeInterval::to_busy)
                .collect::<Result<Vec<_>>>()?;

            debug!(date, people = names.len(), windows = windows.len(), "mutual availability");
            result.dates.push(DateAvailability {
                date: date.to_string(),
                windows,
            });
        }

        Ok(result)
    }
}

/// Builds an [`AvailabilityContext`] from raw records.
///
/// Events are parsed, grouped per (user, date), sorted by start, and strictly
/// overlapping blocks are coalesced. Touching blocks are left apart.
///
/// An event that cannot be parsed does not stop the build. Its user is marked
/// instead, and every later lookup for that user fails with the event's
/// `InvalidEvent`. Queries for other people are unaffected.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    hours: WorkingHours,
    users: Vec<User>,
    events: Vec<RawEvent>,
    cover_dates: Vec<String>,
}

impl ContextBuilder {
    pub fn new(hours: WorkingHours) -> Self {
        Self {
            hours,
            users: Vec::new(),
            events: Vec::new(),
            cover_dates: Vec::new(),
        }
    }

    pub fn users(mut self, users: impl IntoIterator<Item = User>) -> Self {
        self.users.extend(users);
        self
    }

    pub fn events(mut self, events: impl IntoIterator<Item = RawEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Give every known user an entry on these dates, even without events.
    ///
    /// A user with nothing booked on a covered date is free all working day.
    /// Without coverage such a lookup fails with `MissingDate`.
    pub fn cover_dates<D: AsRef<str>>(mut self, dates: &[D]) -> Self {
        self.cover_dates
            .extend(dates.iter().map(|d| d.as_ref().to_string()));
        self
    }

    /// # Errors
    /// Returns `MutualError::InvalidTimeFormat` if a derived busy bound is not
    /// `HH:MM`, which parsed events never produce.
    pub fn build(self) -> Result<AvailabilityContext> {
        let mut people = HashMap::with_capacity(self.users.len());
        for user in self.users {
            if let Some(previous) = people.insert(user.name.clone(), user.id) {
                warn!(name = %user.name, previous, id = user.id, "duplicate user name, keeping the later id");
            }
        }

        let mut busy: HashMap<(PersonId, String), Vec<BusyInterval>> = HashMap::new();
        for id in people.values() {
            for date in &self.cover_dates {
                busy.entry((*id, date.clone())).or_default();
            }
        }

        let known: HashSet<PersonId> = people.values().copied().collect();
        let mut rejected: HashMap<PersonId, RejectedEvent> = HashMap::new();
        for raw in &self.events {
            if !known.contains(&raw.user_id) {
                warn!(event = raw.id, user_id = raw.user_id, "skipping event for unknown user");
                continue;
            }
            match parse_event(raw) {
                Ok(event) => busy
                    .entry((raw.user_id, event.date.clone()))
                    .or_default()
                    .push(event.into()),
                Err(MutualError::InvalidEvent { id, reason }) => {
                    warn!(
                        event = id,
                        user_id = raw.user_id,
                        %reason,
                        "rejecting event, queries for this user will fail"
                    );
                    rejected
                        .entry(raw.user_id)
                        .or_insert(RejectedEvent { id, reason });
                }
                Err(e) => return Err(e),
            }
        }

        let busy = busy
            .into_iter()
            .map(|(key, blocks)| (key, coalesce(blocks)))
            .collect();

        let mut context = AvailabilityContext::new(self.hours, people, busy)?;
        context.rejected = rejected;
        Ok(context)
    }
}

/// Sort busy blocks by start and merge the ones that overlap.
///
/// Zero-padded `HH:MM` strings order the same as the times they name.
fn coalesce(mut blocks: Vec<BusyInterval>) -> Vec<BusyInterval> {
    blocks.sort_by(|a, b| (&a.start, &a.end).cmp(&(&b.start, &b.end)));

    let mut merged: Vec<BusyInterval> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let Some(last) = merged.last_mut() {
            if block.start < last.end {
                if block.end > last.end {
                    last.end = block.end;
                }
                continue;
            }
        }
        merged.push(block);
    }
    merged
}
