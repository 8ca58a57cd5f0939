//! Источники тестового сигнала
//!
//! Пейсеру всё равно, откуда берутся выборки: контракт — «заполни буфер
//! одного кадра». Штатный источник — синус с аддитивным гауссовым шумом,
//! фазонепрерывный между кадрами: временная база считается от глобального
//! номера выборки, а не сбрасывается на каждом кадре.

use std::f64::consts::PI;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Абстракция источника выборок.
pub trait SampleSource: Send {
    /// Заполняет `buf` выборками очередного кадра.
    fn next_frame(
        &mut self,
        buf: &mut [f64],
    );
}

/// Синус + гауссов шум.
pub struct ToneSource {
    sample_rate_hz: f64,
    tone_freq_hz: f64,
    noise_std: f64,
    sample_index: u64,
    rng: StdRng,
    gauss: Gauss,
}

/// Гауссов генератор Бокса-Мюллера с кэшем второго значения.
struct Gauss {
    spare: Option<f64>,
}

impl ToneSource {
    pub fn new(
        sample_rate_hz: f64,
        tone_freq_hz: f64,
        noise_std: f64,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self {
            sample_rate_hz,
            tone_freq_hz,
            noise_std,
            sample_index: 0,
            rng,
            gauss: Gauss { spare: None },
        }
    }
}

impl SampleSource for ToneSource {
    fn next_frame(
        &mut self,
        buf: &mut [f64],
    ) {
        for (i, slot) in buf.iter_mut().enumerate() {
            // Непрерывная временная база: тон не сбрасывает фазу на кадре
            let t = (self.sample_index + i as u64) as f64 / self.sample_rate_hz;
            let mut v = (2.0 * PI * self.tone_freq_hz * t).sin();

            if self.noise_std > 0.0 {
                v += self.gauss.next(&mut self.rng) * self.noise_std;
            }

            *slot = v;
        }

        self.sample_index += buf.len() as u64;
    }
}

impl Gauss {
    fn next(
        &mut self,
        rng: &mut StdRng,
    ) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }

        let u1: f64 = rng.gen::<f64>().max(1e-12);
        let u2: f64 = rng.gen();
        let r = (-2.0 * u1.ln()).sqrt();
        let th = 2.0 * PI * u2;

        self.spare = Some(r * th.sin());

        r * th.cos()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_phase_continuity() {
        // Два последовательных кадра чистого тона совпадают с одной
        // непрерывной синусоидой без разрыва на границе
        let rate = 8_000.0;
        let freq = 440.0;
        let n = 160;

        let mut src = ToneSource::new(rate, freq, 0.0, Some(1));
        let mut frame_a = vec![0.0; n];
        let mut frame_b = vec![0.0; n];

        src.next_frame(&mut frame_a);
        src.next_frame(&mut frame_b);

        for i in 0..n {
            let expected_a = (2.0 * PI * freq * i as f64 / rate).sin();
            let expected_b = (2.0 * PI * freq * (n + i) as f64 / rate).sin();

            assert!((frame_a[i] - expected_a).abs() < 1e-12);
            assert!((frame_b[i] - expected_b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tone_seeded_reproducible() {
        let mut a = ToneSource::new(8_000.0, 440.0, 0.2, Some(7));
        let mut b = ToneSource::new(8_000.0, 440.0, 0.2, Some(7));

        let mut frame_a = vec![0.0; 64];
        let mut frame_b = vec![0.0; 64];

        a.next_frame(&mut frame_a);
        b.next_frame(&mut frame_b);

        assert_eq!(frame_a, frame_b);
    }

    #[test]
    fn test_noise_statistics() {
        // Нулевой тон: остаётся чистый шум с заданным СКО
        let mut src = ToneSource::new(8_000.0, 0.0, 0.5, Some(42));
        let mut buf = vec![0.0; 20_000];

        src.next_frame(&mut buf);

        let mean = buf.iter().sum::<f64>() / buf.len() as f64;
        let var = buf.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / buf.len() as f64;

        assert!(mean.abs() < 0.02, "mean ≈ 0, got {mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std ≈ 0.5, got {}", var.sqrt());
    }

    #[test]
    fn test_zero_noise_is_deterministic_tone() {
        let mut src = ToneSource::new(1_000.0, 250.0, 0.0, None);
        let mut buf = vec![0.0; 4];

        src.next_frame(&mut buf);

        // 250 Гц при 1 кГц — четверть периода на выборку
        assert!(buf[0].abs() < 1e-12);
        assert!((buf[1] - 1.0).abs() < 1e-12);
        assert!(buf[2].abs() < 1e-9);
        assert!((buf[3] + 1.0).abs() < 1e-12);
    }
}
