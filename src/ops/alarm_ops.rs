use chrono::{Days, NaiveDateTime, NaiveTime};

use crate::model::alarm::{Alarm, AlarmPatch, NewAlarm};
use crate::model::store::Store;
use crate::ops::ids::IdGenerator;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlarmError {
    #[error("invalid alarm time: {0} (expected HH:MM)")]
    InvalidTime(String),
}

/// Parse an `HH:MM` time of day.
pub fn parse_alarm_time(time: &str) -> Result<NaiveTime, AlarmError> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| AlarmError::InvalidTime(time.to_string()))
}

/// Add an enabled alarm.
pub fn add_alarm(store: &Store, ids: &mut dyn IdGenerator, data: NewAlarm) -> Result<(Store, Alarm), AlarmError> {
    let time = parse_alarm_time(&data.time)?;
    let id = ids.next_id(&|candidate| store.alarm(candidate).is_some());
    let alarm = Alarm {
        id,
        time: time.format("%H:%M").to_string(),
        enabled: true,
        sound: data.sound,
        label: data.label,
        recurring: data.recurring,
    };
    tracing::info!(alarm_id = %alarm.id, time = %alarm.time, "added alarm");

    let mut alarms = store.alarms().to_vec();
    alarms.push(alarm.clone());
    Ok((store.with_alarms(alarms), alarm))
}

/// Flip an alarm's enabled flag. Unknown ids are a no-op.
pub fn toggle_alarm(store: &Store, alarm_id: &str) -> Store {
    map_alarm(store, alarm_id, |a| a.enabled = !a.enabled)
}

/// Apply a partial update. The new time, if any, is validated first.
pub fn update_alarm(store: &Store, alarm_id: &str, patch: AlarmPatch) -> Result<Store, AlarmError> {
    let time = patch
        .time
        .as_deref()
        .map(parse_alarm_time)
        .transpose()?
        .map(|t| t.format("%H:%M").to_string());
    Ok(map_alarm(store, alarm_id, move |a| {
        if let Some(time) = time {
            a.time = time;
        }
        if let Some(sound) = patch.sound {
            a.sound = sound;
        }
        if let Some(label) = patch.label {
            a.label = label;
        }
        if let Some(recurring) = patch.recurring {
            a.recurring = recurring;
        }
    }))
}

/// Remove an alarm. Unknown ids are a no-op.
pub fn delete_alarm(store: &Store, alarm_id: &str) -> Store {
    if store.alarm(alarm_id).is_none() {
        tracing::debug!(alarm_id, "delete: alarm not found");
        return store.clone();
    }
    let alarms = store
        .alarms()
        .iter()
        .filter(|a| a.id != alarm_id)
        .cloned()
        .collect();
    store.with_alarms(alarms)
}

/// The next enabled alarm to ring after `now`, with its firing time. An alarm
/// whose time has passed today rings tomorrow. Ties go to the earlier alarm in
/// the sequence.
pub fn next_alarm(alarms: &[Alarm], now: NaiveDateTime) -> Option<(&Alarm, NaiveDateTime)> {
    let today = now.date();
    let tomorrow = today.checked_add_days(Days::new(1))?;
    alarms
        .iter()
        .filter(|a| a.enabled)
        .filter_map(|a| {
            let time = parse_alarm_time(&a.time).ok()?;
            let fires = if today.and_time(time) > now {
                today.and_time(time)
            } else {
                tomorrow.and_time(time)
            };
            Some((a, fires))
        })
        .min_by_key(|(_, fires)| *fires)
}

fn map_alarm(store: &Store, alarm_id: &str, f: impl FnOnce(&mut Alarm)) -> Store {
    let Some(current) = store.alarm(alarm_id) else {
        tracing::debug!(alarm_id, "alarm not found");
        return store.clone();
    };
    let mut updated = current.clone();
    f(&mut updated);
    let alarms = store
        .alarms()
        .iter()
        .map(|a| if a.id == alarm_id { updated.clone() } else { a.clone() })
        .collect();
    store.with_alarms(alarms)
}
