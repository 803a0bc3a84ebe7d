//! Observable, insertion-ordered meeting collection.
//!
//! Observers never get a mutable handle: they receive shared `Arc` snapshots in
//! change events or through [`MeetingStore::meetings`]. Appends are
//! copy-on-write, so a snapshot held by an observer is never altered behind it.

use std::fmt;
use std::sync::Arc;

use crate::log_debug;
use crate::models::Meeting;

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone)]
pub enum MeetingsEvent {
    /// The held sequence was swapped for a different one.
    Replaced { meetings: Arc<Vec<Meeting>> },
    /// A meeting was appended at `index`.
    Added {
        index: usize,
        meetings: Arc<Vec<Meeting>>,
    },
}

impl MeetingsEvent {
    pub fn meetings(&self) -> &Arc<Vec<Meeting>> {
        match self {
            MeetingsEvent::Replaced { meetings } | MeetingsEvent::Added { meetings, .. } => {
                meetings
            }
        }
    }
}

type Observer = Box<dyn FnMut(&MeetingsEvent)>;

pub struct MeetingStore {
    meetings: Arc<Vec<Meeting>>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl Default for MeetingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MeetingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeetingStore")
            .field("meetings", &self.meetings.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl MeetingStore {
    pub fn new() -> Self {
        Self::with_meetings(Vec::new())
    }

    pub fn with_meetings(meetings: Vec<Meeting>) -> Self {
        Self {
            meetings: Arc::new(meetings),
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn meetings(&self) -> Arc<Vec<Meeting>> {
        Arc::clone(&self.meetings)
    }

    pub fn len(&self) -> usize {
        self.meetings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }

    /// Replaces the held sequence.
    ///
    /// Observers are notified only when `meetings` is a different allocation
    /// from the one currently held; handing back the same `Arc` is a no-op even
    /// if its contents compare equal. Returns whether a notification was sent.
    pub fn set_meetings(&mut self, meetings: Arc<Vec<Meeting>>) -> bool {
        if Arc::ptr_eq(&self.meetings, &meetings) {
            return false;
        }

        self.meetings = meetings;
        self.notify(MeetingsEvent::Replaced {
            meetings: Arc::clone(&self.meetings),
        });
        true
    }

    pub fn push(&mut self, meeting: Meeting) {
        Arc::make_mut(&mut self.meetings).push(meeting);
        let index = self.meetings.len() - 1;
        self.notify(MeetingsEvent::Added {
            index,
            meetings: Arc::clone(&self.meetings),
        });
    }

    /// Registers `observer`; it is invoked synchronously, in subscription
    /// order, on every change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&MeetingsEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    fn notify(&mut self, event: MeetingsEvent) {
        log_debug!(
            "Notifying {} observer(s) of {:?} ({} meetings)",
            self.observers.len(),
            event_kind(&event),
            event.meetings().len()
        );
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

fn event_kind(event: &MeetingsEvent) -> &'static str {
    match event {
        MeetingsEvent::Replaced { .. } => "replace",
        MeetingsEvent::Added { .. } => "add",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorTag;
    use chrono::{Duration, NaiveDate};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn meeting(name: &str, hour: u32) -> Meeting {
        let from = NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Meeting {
            event_name: name.to_string(),
            from,
            to: from + Duration::hours(1),
            color: ColorTag::rgba(0x33, 0x99, 0x33, 0xFF),
        }
    }

    fn recorder(store: &mut MeetingStore) -> Rc<RefCell<Vec<MeetingsEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        seen
    }

    #[test]
    fn same_reference_is_suppressed() {
        let mut store = MeetingStore::new();
        let seen = recorder(&mut store);

        let batch = Arc::new(vec![meeting("Scrum", 9)]);
        assert!(store.set_meetings(Arc::clone(&batch)));
        assert!(!store.set_meetings(Arc::clone(&batch)));
        assert!(!store.set_meetings(store.meetings()));

        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn equal_contents_in_new_allocation_still_notify() {
        let mut store = MeetingStore::with_meetings(vec![meeting("Support", 10)]);
        let seen = recorder(&mut store);

        let copy = Arc::new(store.meetings().as_ref().clone());
        assert!(store.set_meetings(copy));
        assert!(store.set_meetings(Arc::new(vec![meeting("Support", 10)])));

        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn push_preserves_order_and_snapshots() {
        let mut store = MeetingStore::new();
        let seen = recorder(&mut store);

        store.push(meeting("Consulting", 9));
        let snapshot = store.meetings();
        store.push(meeting("Consulting", 9));
        store.push(meeting("Project Plan", 11));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store.meetings()[2].event_name, "Project Plan");

        let indices: Vec<usize> = seen
            .borrow()
            .iter()
            .filter_map(|event| match event {
                MeetingsEvent::Added { index, .. } => Some(*index),
                MeetingsEvent::Replaced { .. } => None,
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn observers_run_in_subscription_order_until_unsubscribed() {
        let mut store = MeetingStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push("first"))
        };
        {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push("second"));
        }

        store.set_meetings(Arc::new(Vec::new()));
        assert_eq!(*order.borrow(), vec!["first", "second"]);

        assert!(store.unsubscribe(first));
        assert!(!store.unsubscribe(first));
        assert_eq!(store.subscriber_count(), 1);

        store.set_meetings(Arc::new(Vec::new()));
        assert_eq!(*order.borrow(), vec!["first", "second", "second"]);
    }
}
