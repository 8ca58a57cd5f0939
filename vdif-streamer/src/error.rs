use thiserror::Error;

pub type StreamResult<T> = std::result::Result<T, StreamError>;

#[derive(Debug, Error)]
pub enum StreamError {
    /// Ошибки сокета и отправки
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка конфигурации кадра VDIF
    #[error("VDIF error: {0}")]
    Vdif(#[from] vdif_types::VdifError),

    /// Некорректные параметры сессии
    #[error("Config error: {0}")]
    Config(String),
}
