use crate::foundation::error::{MorphyteError, MorphyteResult};
use crate::state::model::Snapshot;
use crate::timeline::keystate::{KeyState, KeystateEntry, KeystateRecord};

/// An ordered, validated sequence of keystates spanning `[0, 1]`.
///
/// Built once per animated entity via [`resolve_timeline`] and immutable
/// thereafter; to change it, re-resolve a new raw keystate list. Only
/// serialization is derived, since deserializing would bypass
/// validation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    keys: Vec<KeyState>,
}

impl Timeline {
    /// Resolved keystates in time order.
    pub fn keys(&self) -> &[KeyState] {
        &self.keys
    }

    /// First keystate.
    pub fn first(&self) -> &KeyState {
        &self.keys[0]
    }

    /// Last keystate.
    pub fn last(&self) -> &KeyState {
        &self.keys[self.keys.len() - 1]
    }

    /// Index of the segment active at global time `t`, with the segment's
    /// start/end keystates.
    ///
    /// Returns `None` when `t` lies at or outside the timeline boundaries
    /// (the engine returns the boundary snapshots verbatim there).
    pub fn segment_at(&self, t: f64) -> Option<(usize, &KeyState, &KeyState)> {
        if t <= self.first().time || t >= self.last().time {
            return None;
        }
        for i in 0..self.keys.len() - 1 {
            if t < self.keys[i + 1].time {
                return Some((i, &self.keys[i], &self.keys[i + 1]));
            }
        }
        None
    }
}

/// Normalize a heterogeneous keystate list into an ordered [`Timeline`].
///
/// Untimed entries are distributed evenly between their explicitly-timed
/// neighbors; when no entry carries a time, the first anchors to 0.0 and
/// the last to 1.0. Resolution fails fast with
/// [`MorphyteError::Timeline`] when times fall outside `[0, 1]`, are not
/// strictly increasing after distribution, or fewer than two entries are
/// present.
#[tracing::instrument(skip(entries), fields(count = entries.len()))]
pub fn resolve_timeline(entries: Vec<KeystateEntry>) -> MorphyteResult<Timeline> {
    if entries.len() < 2 {
        return Err(MorphyteError::timeline(
            "a timeline requires at least two keystates",
        ));
    }

    let mut records: Vec<KeystateRecord> = Vec::with_capacity(entries.len());
    let mut has_explicit = false;
    for entry in entries {
        let record = match entry {
            KeystateEntry::Bare(snapshot) => KeystateRecord::new(snapshot),
            KeystateEntry::Timed(time, snapshot) => KeystateRecord::new(snapshot).at(time),
            KeystateEntry::Full(record) => record,
        };
        if let Some(t) = record.time {
            if !(0.0..=1.0).contains(&t) {
                return Err(MorphyteError::timeline(format!(
                    "keystate time must be in [0, 1], got {t}"
                )));
            }
            has_explicit = true;
        }
        records.push(record);
    }

    // With no explicit anchors at all, the ends pin to the full range.
    if !has_explicit {
        if let Some(first) = records.first_mut() {
            first.time = Some(0.0);
        }
        if let Some(last) = records.last_mut() {
            last.time = Some(1.0);
        }
    }

    let keys = distribute_times(records);
    validate_monotonic(&keys)?;
    Ok(Timeline { keys })
}

/// Assign times to untimed records by even distribution between anchors.
///
/// Runs of untimed records between an anchor at `t_prev` and the next
/// anchor at `t_next` (defaulting to 0.0 / 1.0 at the ends) receive
/// `t_prev + (t_next - t_prev) * (k+1)/(m+1)`.
fn distribute_times(records: Vec<KeystateRecord>) -> Vec<KeyState> {
    let mut keys: Vec<KeyState> = Vec::with_capacity(records.len());
    let mut i = 0;
    while i < records.len() {
        if let Some(t) = records[i].time {
            keys.push(finalize(records[i].clone(), t));
            i += 1;
            continue;
        }

        let t_prev = keys.last().map_or(0.0, |k| k.time);
        let mut j = i;
        while j < records.len() && records[j].time.is_none() {
            j += 1;
        }
        let t_next = if j < records.len() {
            records[j].time.unwrap_or(1.0)
        } else {
            1.0
        };

        let run = j - i;
        for k in 0..run {
            let t = t_prev + (t_next - t_prev) * (k + 1) as f64 / (run + 1) as f64;
            keys.push(finalize(records[i + k].clone(), t));
        }
        i = j;
    }
    keys
}

fn finalize(record: KeystateRecord, time: f64) -> KeyState {
    KeyState {
        snapshot: record.snapshot,
        time,
        easing: record.easing,
        morph: record.morph,
    }
}

fn validate_monotonic(keys: &[KeyState]) -> MorphyteResult<()> {
    for pair in keys.windows(2) {
        if pair[1].time <= pair[0].time {
            return Err(MorphyteError::timeline(format!(
                "keystate times must be strictly increasing, got {} then {}",
                pair[0].time, pair[1].time
            )));
        }
    }
    Ok(())
}

/// Parse a raw JSON keystate list into typed entries.
///
/// Admissible element shapes:
/// - a snapshot object (bare, auto-timed),
/// - a two-element array `[time, snapshot]`,
/// - a record object carrying a `snapshot` field plus optional `time`,
///   `easing`, and `morph`.
///
/// A two-element array whose second element is itself a bare number is
/// rejected as ambiguous rather than coerced; that shape is always a
/// modeling mistake in a snapshot timeline.
pub fn entries_from_json(value: &serde_json::Value) -> MorphyteResult<Vec<KeystateEntry>> {
    let items = value
        .as_array()
        .ok_or_else(|| MorphyteError::timeline("keystate list must be a JSON array"))?;

    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        entries.push(entry_from_json(item).map_err(|e| {
            MorphyteError::timeline(format!("keystate entry {i}: {e}"))
        })?);
    }
    Ok(entries)
}

fn entry_from_json(item: &serde_json::Value) -> MorphyteResult<KeystateEntry> {
    match item {
        serde_json::Value::Array(pair) => {
            if pair.len() != 2 {
                return Err(MorphyteError::timeline(format!(
                    "expected a [time, snapshot] pair, got an array of {} elements",
                    pair.len()
                )));
            }
            let time = pair[0].as_f64().ok_or_else(|| {
                MorphyteError::timeline("pair element 0 must be a normalized time")
            })?;
            if pair[1].is_number() {
                return Err(MorphyteError::timeline(
                    "ambiguous pair: element 1 is a bare number, not a snapshot",
                ));
            }
            let snapshot: Snapshot = serde_json::from_value(pair[1].clone())
                .map_err(|e| MorphyteError::timeline(format!("pair element 1: {e}")))?;
            Ok(KeystateEntry::Timed(time, snapshot))
        }
        serde_json::Value::Object(map) => {
            if map.contains_key("snapshot") {
                let record: KeystateRecord = serde_json::from_value(item.clone())
                    .map_err(|e| MorphyteError::timeline(e.to_string()))?;
                Ok(KeystateEntry::Full(record))
            } else {
                let snapshot: Snapshot = serde_json::from_value(item.clone())
                    .map_err(|e| MorphyteError::timeline(e.to_string()))?;
                Ok(KeystateEntry::Bare(snapshot))
            }
        }
        other => Err(MorphyteError::timeline(format!(
            "expected a snapshot, pair, or record, got {other}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/resolve.rs"]
mod tests;
