use thiserror::Error;

/// Результат для операций VDIF
pub type VdifResult<T> = std::result::Result<T, VdifError>;

/// Ошибки конфигурации и кодирования кадров VDIF.
///
/// Все варианты относятся к валидации конфигурации: после успешного
/// `FrameConfig::validate()` кодировщик своим инвариантам доверяет и
/// по-кадровых проверок не делает.
#[derive(Debug, Error)]
pub enum VdifError {
    /// Глубина квантования вне диапазона 1..=8 бит
    #[error("Invalid bits per sample: {0} (expected 1..=8)")]
    InvalidBitDepth(u8),

    /// Количество каналов не является степенью двойки
    #[error("Channel count must be a power of two, got {0}")]
    ChannelsNotPowerOfTwo(u32),

    /// Идентификатор станции не 2 ASCII байта
    #[error("Station ID must be exactly 2 ASCII characters: {0:?}")]
    InvalidStationId(String),

    /// Длина кадра не кратна 8 байтам (поле frame length в 8-байтовых
    /// единицах не представимо точно)
    #[error("Frame of {frame_bytes} bytes is not a multiple of 8")]
    UnalignedFrameLength { frame_bytes: u32 },

    /// Thread ID не помещается в 10-битное поле заголовка
    #[error("Thread ID {0} exceeds 10-bit field (max 1023)")]
    ThreadIdOutOfRange(u16),

    /// Версия VDIF не помещается в 3-битное поле заголовка
    #[error("VDIF version {0} exceeds 3-bit field (max 7)")]
    VersionOutOfRange(u8),

    /// Прочие некорректные сочетания параметров
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VdifError {
    /// Удобный конструктор
    pub fn config<S: Into<String>>(s: S) -> Self {
        Self::Config(s.into())
    }
}
