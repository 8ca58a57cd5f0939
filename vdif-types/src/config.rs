use std::time::Duration;

use crate::{HeaderLayout, QuantPolicy, SecondsField, StationId, VdifError, VdifResult};

/// Размер заголовка кадра VDIF (8 слов по 32 бита)
pub const VDIF_HEADER_SIZE: usize = 32;

/// Максимальный размер UDP payload (стандартный IPv4).
pub const UDP_MAX_PAYLOAD: usize = 65_507;

/// Максимум 24-битного поля «номер кадра в секунде»
pub const MAX_FRAMES_PER_SECOND: u32 = 0x00FF_FFFF;

/// Неизменяемая конфигурация кадра, задаётся один раз при старте.
///
/// Длительность кадра всегда производная от `sample_rate_hz` и
/// `samples_per_frame` и отдельно не задаётся, чтобы пара не могла
/// рассогласоваться.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Частота дискретизации (Гц)
    pub sample_rate_hz: f64,
    /// Выборок в одном кадре
    pub samples_per_frame: u32,
    /// Глубина квантования, бит на выборку (1..=8, канонично 2)
    pub bits_per_sample: u8,
    /// Количество каналов (степень двойки; в заголовок идёт log2)
    pub channels: u32,
    /// VDIF thread ID (10-битное поле)
    pub thread_id: u16,
    /// Идентификатор станции (2 ASCII символа)
    pub station_id: StationId,
    /// Версия VDIF (3-битное поле, 0..=7)
    pub vdif_version: u8,
    /// Политика квантования
    pub quant_policy: QuantPolicy,
    /// Раскладка полей заголовка
    pub header_layout: HeaderLayout,
    /// Интерпретация поля секунд
    pub seconds_field: SecondsField,
}

impl FrameConfig {
    /// Размер payload в байтах: `ceil(samples * bits / 8)`.
    pub fn payload_size_bytes(&self) -> u32 {
        (self.samples_per_frame * self.bits_per_sample as u32 + 7) / 8
    }

    /// Полный размер кадра (заголовок + payload).
    pub fn frame_size_bytes(&self) -> u32 {
        VDIF_HEADER_SIZE as u32 + self.payload_size_bytes()
    }

    /// Длина кадра в 8-байтовых единицах — поле заголовка.
    ///
    /// Валидна только после `validate()`: деление обязано быть точным.
    pub fn frame_length_units(&self) -> u32 {
        self.frame_size_bytes() / 8
    }

    /// Кадров в секунду: `round(sample_rate / samples_per_frame)`.
    pub fn frames_per_second(&self) -> u32 {
        (self.sample_rate_hz / self.samples_per_frame as f64).round() as u32
    }

    /// Длительность кадра в секундах (всегда производная).
    pub fn frame_duration_secs(&self) -> f64 {
        self.samples_per_frame as f64 / self.sample_rate_hz
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_duration_secs())
    }

    /// log2(channels) для 5-битного поля заголовка.
    pub fn log2_channels(&self) -> u32 {
        self.channels.trailing_zeros()
    }

    /// Полная проверка конфигурации. Все ошибки — фатальные и
    /// обнаруживаются здесь, до отправки первого кадра; по-кадровых
    /// проверок кодировщик не делает.
    pub fn validate(&self) -> VdifResult<()> {
        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            return Err(VdifError::config(format!(
                "sample rate must be > 0, got {}",
                self.sample_rate_hz
            )));
        }

        if self.samples_per_frame == 0 {
            return Err(VdifError::config("samples per frame must be > 0"));
        }

        if self.bits_per_sample < 1 || self.bits_per_sample > 8 {
            return Err(VdifError::InvalidBitDepth(self.bits_per_sample));
        }

        if self.channels == 0 || !self.channels.is_power_of_two() {
            return Err(VdifError::ChannelsNotPowerOfTwo(self.channels));
        }

        if self.thread_id > 0x03FF {
            return Err(VdifError::ThreadIdOutOfRange(self.thread_id));
        }

        if self.vdif_version > 7 {
            return Err(VdifError::VersionOutOfRange(self.vdif_version));
        }

        let frame_bytes = self.frame_size_bytes();

        if frame_bytes % 8 != 0 {
            return Err(VdifError::UnalignedFrameLength { frame_bytes });
        }

        if frame_bytes as usize > UDP_MAX_PAYLOAD {
            return Err(VdifError::config(format!(
                "frame of {frame_bytes} bytes exceeds UDP payload limit {UDP_MAX_PAYLOAD}"
            )));
        }

        let fps = self.frames_per_second();

        if fps == 0 || fps > MAX_FRAMES_PER_SECOND {
            return Err(VdifError::config(format!(
                "frames per second {fps} outside 1..={MAX_FRAMES_PER_SECOND}"
            )));
        }

        Ok(())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 64e6,
            samples_per_frame: 20_000,
            bits_per_sample: 2,
            channels: 1,
            thread_id: 0,
            station_id: StationId::new("AA").unwrap(),
            vdif_version: 1,
            quant_policy: QuantPolicy::default(),
            header_layout: HeaderLayout::default(),
            seconds_field: SecondsField::default(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let cfg = FrameConfig::default();

        cfg.validate().unwrap();

        // Опорный сценарий: 64 МГц, 20000 выборок, 2 бита
        assert_eq!(cfg.payload_size_bytes(), 5_000);
        assert_eq!(cfg.frame_size_bytes(), 5_032);
        assert_eq!(cfg.frame_length_units(), 629);
        assert_eq!(cfg.frames_per_second(), 3_200);
        assert!((cfg.frame_duration_secs() - 3.125e-4).abs() < 1e-12);
    }

    #[test]
    fn test_frame_length_units_exact() {
        let cfg = FrameConfig::default();

        assert_eq!(cfg.frame_length_units() * 8, 32 + cfg.payload_size_bytes());
    }

    #[test]
    fn test_reject_unaligned_frame_length() {
        // 100 выборок × 2 бита = 25 байт payload → кадр 57 байт, не кратно 8
        let cfg = FrameConfig {
            sample_rate_hz: 1_000.0,
            samples_per_frame: 100,
            ..FrameConfig::default()
        };

        match cfg.validate() {
            Err(VdifError::UnalignedFrameLength { frame_bytes }) => {
                assert_eq!(frame_bytes, 57);
            }
            other => panic!("expected UnalignedFrameLength, got {other:?}"),
        }
    }

    #[test]
    fn test_reject_bad_bit_depth() {
        let cfg = FrameConfig {
            bits_per_sample: 0,
            ..FrameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(VdifError::InvalidBitDepth(0))));

        let cfg = FrameConfig {
            bits_per_sample: 9,
            ..FrameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(VdifError::InvalidBitDepth(9))));
    }

    #[test]
    fn test_reject_non_power_of_two_channels() {
        let cfg = FrameConfig {
            channels: 3,
            ..FrameConfig::default()
        };

        assert!(matches!(
            cfg.validate(),
            Err(VdifError::ChannelsNotPowerOfTwo(3))
        ));
    }

    #[test]
    fn test_reject_thread_id_and_version() {
        let cfg = FrameConfig {
            thread_id: 1_024,
            ..FrameConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = FrameConfig {
            vdif_version: 8,
            ..FrameConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_reject_oversized_frame() {
        // 2-битные выборки: 400000 × 2 / 8 = 100000 байт > UDP лимит
        let cfg = FrameConfig {
            sample_rate_hz: 64e6,
            samples_per_frame: 400_000,
            ..FrameConfig::default()
        };

        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_log2_channels() {
        let cfg = FrameConfig {
            channels: 16,
            ..FrameConfig::default()
        };

        assert_eq!(cfg.log2_channels(), 4);
    }

    #[test]
    fn test_payload_size_rounds_up() {
        // 7 выборок × 2 бита = 14 бит → 2 байта
        let cfg = FrameConfig {
            samples_per_frame: 7,
            ..FrameConfig::default()
        };

        assert_eq!(cfg.payload_size_bytes(), 2);
    }
}
