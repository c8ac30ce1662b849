//! Partition events by account, each partition in `(timestamp, id)` order.

use crate::events::{AccountId, TransactionEvent};
use std::collections::BTreeMap;

/// One chronologically ordered stream per account. Never holds an empty stream.
#[derive(Debug, Clone, Default)]
pub struct AccountStreams {
    streams: BTreeMap<AccountId, Vec<TransactionEvent>>,
}

impl AccountStreams {
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn get(&self, account: &AccountId) -> Option<&[TransactionEvent]> {
        self.streams.get(account).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &[TransactionEvent])> {
        self.streams.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn into_streams(self) -> Vec<(AccountId, Vec<TransactionEvent>)> {
        self.streams.into_iter().collect()
    }
}

pub fn group_by_account<I>(events: I) -> AccountStreams
where
    I: IntoIterator<Item = TransactionEvent>,
{
    let mut streams: BTreeMap<AccountId, Vec<TransactionEvent>> = BTreeMap::new();
    for ev in events {
        streams.entry(ev.account_id.clone()).or_default().push(ev);
    }
    for stream in streams.values_mut() {
        stream.sort_by(TransactionEvent::chronological);
    }
    AccountStreams { streams }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ev(id: u64, account: &str, secs: i64) -> TransactionEvent {
        TransactionEvent {
            id,
            account_id: AccountId::from(account),
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            amount: 1.0,
            fraud_label: None,
        }
    }

    #[test]
    fn sorts_by_time_then_id() {
        let streams = group_by_account(vec![
            ev(1, "A", 50),
            ev(2, "B", 10),
            ev(3, "A", 10),
            ev(4, "A", 50),
            ev(5, "A", 30),
        ]);
        assert_eq!(streams.len(), 2);
        let a: Vec<u64> = streams.get(&"A".into()).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(a, vec![3, 5, 1, 4]);
        assert_eq!(streams.get(&"B".into()).unwrap().len(), 1);
    }

    #[test]
    fn partition_is_total() {
        let input: Vec<_> = (1..=20).map(|i| ev(i, ["X", "Y", "Z"][i as usize % 3], 100 - i as i64)).collect();
        let streams = group_by_account(input);
        let mut ids: Vec<u64> = streams.iter().flat_map(|(_, s)| s.iter().map(|e| e.id)).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_account(Vec::new()).is_empty());
    }
}
