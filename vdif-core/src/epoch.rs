//! Опорные эпохи VDIF
//!
//! VDIF считает время полугодовыми эпохами от 2000-01-01T00:00:00 UTC:
//! чётный индекс — январь–июнь года `2000 + index/2`, нечётный — июль–декабрь.
//! Индекс пересчитывается из секунды каждого кадра; кэшировать нечего.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use vdif_types::SecondsField;

/// Маска 30-битного поля секунд заголовка.
pub const SECONDS_MASK: u32 = 0x3FFF_FFFF;

/// Маска 6-битного поля индекса опорной эпохи.
pub const REF_EPOCH_MASK: u32 = 0x3F;

/// Индекс полугодовой опорной эпохи для абсолютной Unix-секунды.
///
/// Даты до 2000 года прижимаются к эпохе 0.
pub fn ref_epoch_index(epoch_seconds: u32) -> u8 {
    let dt = utc_from_secs(epoch_seconds);
    let half_years = (dt.year() - 2000).max(0) as u32 * 2;
    let idx = half_years + if dt.month() <= 6 { 0 } else { 1 };

    (idx & REF_EPOCH_MASK) as u8
}

/// Unix-секунда начала опорной эпохи с данным индексом.
pub fn ref_epoch_start_secs(index: u8) -> u32 {
    let year = 2000 + (index as i32) / 2;
    let month = if index % 2 == 0 { 1 } else { 7 };

    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .unwrap()
        .timestamp() as u32
}

/// Значение 30-битного поля секунд для выбранной интерпретации.
pub fn seconds_field_value(
    epoch_seconds: u32,
    mode: SecondsField,
) -> u32 {
    match mode {
        SecondsField::TruncatedUnix => epoch_seconds & SECONDS_MASK,
        SecondsField::SinceRefEpoch => {
            let start = ref_epoch_start_secs(ref_epoch_index(epoch_seconds));

            epoch_seconds.saturating_sub(start) & SECONDS_MASK
        }
    }
}

fn utc_from_secs(epoch_seconds: u32) -> DateTime<Utc> {
    // Для любой u32-секунды метка валидна и однозначна
    DateTime::<Utc>::from_timestamp(epoch_seconds as i64, 0).unwrap()
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
