//! Сборка кадра
//!
//! Заголовок и payload склеиваются в один неизменяемый буфер точно
//! заданной длины и передаются транспорту. Кадр живёт один такт: собрали,
//! отправили, выбросили.

use vdif_types::{FrameConfig, VDIF_HEADER_SIZE};

use crate::{encode_header, pack_codes, quantize};

/// Склеивает заголовок и payload в буфер длиной `32 + payload_size`.
///
/// Избыточный payload защитно усекается; недостающий хвост дополняется
/// нулями (ненулевого заполнения не бывает).
pub fn assemble_frame(
    header: &[u8; VDIF_HEADER_SIZE],
    payload: &[u8],
    payload_size: usize,
) -> Vec<u8> {
    let mut frame = Vec::with_capacity(VDIF_HEADER_SIZE + payload_size);

    frame.extend_from_slice(header);
    frame.extend_from_slice(&payload[..payload.len().min(payload_size)]);
    frame.resize(VDIF_HEADER_SIZE + payload_size, 0);

    frame
}

/// Полный конвейер одного кадра: квантование → упаковка → заголовок →
/// сборка.
pub fn encode_frame(
    cfg: &FrameConfig,
    epoch_seconds: u32,
    frame_number: u32,
    samples: &[f64],
) -> Vec<u8> {
    let codes = quantize(samples, cfg.bits_per_sample, cfg.quant_policy);
    let payload = pack_codes(&codes, cfg.bits_per_sample);
    let header = encode_header(cfg, epoch_seconds, frame_number);

    assemble_frame(&header, &payload, cfg.payload_size_bytes() as usize)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_exact_size() {
        let header = [0u8; VDIF_HEADER_SIZE];
        let payload = vec![0xABu8; 100];
        let frame = assemble_frame(&header, &payload, 100);

        assert_eq!(frame.len(), 132);
        assert_eq!(&frame[32..], &payload[..]);
    }

    #[test]
    fn test_assemble_truncates_overlong_payload() {
        let header = [0u8; VDIF_HEADER_SIZE];
        let payload = vec![0xFFu8; 200];
        let frame = assemble_frame(&header, &payload, 100);

        assert_eq!(frame.len(), 132);
        assert!(frame[32..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_assemble_zero_fills_short_payload() {
        let header = [0u8; VDIF_HEADER_SIZE];
        let payload = vec![0xFFu8; 40];
        let frame = assemble_frame(&header, &payload, 100);

        assert_eq!(frame.len(), 132);
        assert!(frame[32..72].iter().all(|&b| b == 0xFF));
        assert!(frame[72..].iter().all(|&b| b == 0), "хвост только нулевой");
    }

    #[test]
    fn test_encode_frame_reference_size() {
        // Опорный сценарий: кадр 32 + 5000 байт
        let cfg = FrameConfig::default();
        let samples = vec![0.5f64; cfg.samples_per_frame as usize];
        let frame = encode_frame(&cfg, 1_704_067_200, 0, &samples);

        assert_eq!(frame.len(), 5_032);
    }

    #[test]
    fn test_encode_frame_payload_content() {
        // Выборки со значением 1.x → код 1 → каждый байт 01 01 01 01 = 0x55
        let cfg = FrameConfig {
            sample_rate_hz: 1_000.0,
            samples_per_frame: 32,
            ..FrameConfig::default()
        };
        let samples = vec![1.25f64; 32];
        let frame = encode_frame(&cfg, 1_704_067_200, 0, &samples);

        assert_eq!(frame.len(), 32 + 8);
        assert_eq!(&frame[32..], &[0x55u8; 8]);
    }
}
