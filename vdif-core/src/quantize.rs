//! Квантование выборок
//!
//! Обе политики чистые в пределах кадра: никакого состояния между кадрами,
//! каждый кадр тестируется независимо.

use vdif_types::QuantPolicy;

/// Квантует кадр вещественных выборок в коды `[0, 2^bits - 1]`.
pub fn quantize(
    samples: &[f64],
    bits: u8,
    policy: QuantPolicy,
) -> Vec<u8> {
    match policy {
        QuantPolicy::ClipFloor => clip_floor(samples, bits),
        QuantPolicy::Percentile => percentile(samples, bits),
    }
}

/// `clip(floor(x), 0, 2^bits - 1)`.
fn clip_floor(
    samples: &[f64],
    bits: u8,
) -> Vec<u8> {
    let max = ((1u32 << bits) - 1) as f64;

    samples
        .iter()
        .map(|&x| x.floor().clamp(0.0, max) as u8)
        .collect()
}

/// Пороги по перцентилям распределения текущего кадра.
///
/// Для 2 бит это квартильные границы [25, 50, 75]; обобщение — `2^bits - 1`
/// равноотстоящих перцентилей. Попадание ровно на порог относится к нижнему
/// интервалу (digitize, upper-inclusive).
fn percentile(
    samples: &[f64],
    bits: u8,
) -> Vec<u8> {
    if samples.is_empty() {
        return Vec::new();
    }

    let levels = 1usize << bits;
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let thresholds: Vec<f64> = (1..levels)
        .map(|k| percentile_of(&sorted, k as f64 / levels as f64))
        .collect();

    samples
        .iter()
        .map(|&x| thresholds.iter().filter(|&&t| t < x).count() as u8)
        .collect()
}

/// Перцентиль с линейной интерполяцией по отсортированному срезу.
fn percentile_of(
    sorted: &[f64],
    q: f64,
) -> f64 {
    let n = sorted.len();

    if n == 1 {
        return sorted[0];
    }

    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;

    if lo + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lo] * (1.0 - frac) + sorted[lo + 1] * frac
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
