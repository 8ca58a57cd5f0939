//! Библиотека кодирования кадров VDIF
//!
//! Эталонная реализация 32-байтного заголовка VDIF, квантования выборок и
//! суб-байтовой упаковки payload. Раскладка заголовка бит-точная и
//! байт-точная: потребитель, совместимый с VDIF, обязан уметь разобрать
//! каждый кадр.
//!
//! # Быстрый старт
//!
//! ```
//! use vdif_types::FrameConfig;
//! use vdif_core::encode_frame;
//!
//! let cfg = FrameConfig::default();
//! cfg.validate()?;
//!
//! let samples = vec![0.0f64; cfg.samples_per_frame as usize];
//! let frame = encode_frame(&cfg, 1_704_067_200, 0, &samples);
//! assert_eq!(frame.len(), cfg.frame_size_bytes() as usize);
//! # Ok::<(), vdif_types::VdifError>(())
//! ```

pub mod epoch;
pub mod frame;
pub mod header;
pub mod pack;
pub mod quantize;

pub use epoch::*;
pub use frame::*;
pub use header::*;
pub use pack::*;
pub use quantize::*;

/// Версия библиотеки.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
