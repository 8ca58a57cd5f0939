//! Кодировщик 32-байтного заголовка VDIF
//!
//! Заголовок — восемь 32-битных слов в порядке little-endian. Раскладка
//! полей по словам выбирается [`HeaderLayout`]; внутри одного потока она
//! обязана быть неизменной, иначе приёмник молча разберёт мусор.

use byteorder::{ByteOrder, LittleEndian};
use vdif_types::{FrameConfig, HeaderLayout, VDIF_HEADER_SIZE};

use crate::epoch::{ref_epoch_index, seconds_field_value};

/// Кодирует заголовок кадра.
///
/// `epoch_seconds` — абсолютная Unix-секунда кадра, `frame_number` — номер
/// кадра внутри текущей секунды (`[0, frames_per_second)`). Конфигурация
/// обязана быть провалидирована заранее; здесь по-кадровых проверок нет.
pub fn encode_header(
    cfg: &FrameConfig,
    epoch_seconds: u32,
    frame_number: u32,
) -> [u8; VDIF_HEADER_SIZE] {
    let seconds = seconds_field_value(epoch_seconds, cfg.seconds_field);
    let ref_epoch = ref_epoch_index(epoch_seconds) as u32;
    let frame_len_units = cfg.frame_length_units();
    let log2_ch = cfg.log2_channels();
    let bits_m1 = (cfg.bits_per_sample - 1) as u32;
    let version = cfg.vdif_version as u32;
    let station = cfg.station_id.as_u16() as u32;
    let thread = cfg.thread_id as u32;

    let words: [u32; 4] = match cfg.header_layout {
        // Слово 0: invalid(1) | legacy(1)=0 | секунды(30)
        // Слово 1: ref epoch(6) | unused(2) | номер кадра(24)
        // Слово 2: версия(3) | log2(каналов)(5) | длина кадра /8(24)
        // Слово 3: тип данных(1)=0 | бит/выборку-1(5) | thread(10) | станция(16)
        HeaderLayout::Vdif1 => [
            seconds,
            (ref_epoch << 26) | (frame_number & 0x00FF_FFFF),
            (version << 29) | (log2_ch << 24) | (frame_len_units & 0x00FF_FFFF),
            (bits_m1 << 26) | (thread << 16) | station,
        ],
        // Раскладка старых генераторных скриптов
        HeaderLayout::Compat => [
            seconds,
            ((frame_number & 0x00FF_FFFF) << 8) | (log2_ch << 3) | (bits_m1 & 0x07),
            (station << 16) | (version << 8),
            (frame_len_units & 0x00FF_FFFF) << 8,
        ],
    };

    let mut buf = [0u8; VDIF_HEADER_SIZE];

    for (i, w) in words.iter().enumerate() {
        LittleEndian::write_u32(&mut buf[i * 4..i * 4 + 4], *w);
    }

    // Слова 4-7 зарезервированы, остаются нулями
    buf
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use vdif_types::{SecondsField, StationId};

    use super::*;

    // 2024-01-01T00:00:00Z — внутри эпохи 48
    const T0: u32 = 1_704_067_200;

    fn word(
        buf: &[u8; VDIF_HEADER_SIZE],
        i: usize,
    ) -> u32 {
        u32::from_le_bytes([buf[i * 4], buf[i * 4 + 1], buf[i * 4 + 2], buf[i * 4 + 3]])
    }

    #[test]
    fn test_header_is_32_bytes() {
        let cfg = FrameConfig::default();
        let h = encode_header(&cfg, T0, 0);

        assert_eq!(h.len(), 32);
    }

    #[test]
    fn test_vdif1_word0_seconds() {
        let cfg = FrameConfig::default();
        let h = encode_header(&cfg, T0, 0);

        // TruncatedUnix: Unix-секунды под 30-битной маской, invalid=0, legacy=0
        assert_eq!(word(&h, 0), T0 & 0x3FFF_FFFF);
    }

    #[test]
    fn test_vdif1_word1_ref_epoch_and_frame_number() {
        let cfg = FrameConfig::default();
        let h = encode_header(&cfg, T0, 1_234);

        let w1 = word(&h, 1);

        assert_eq!(w1 >> 26, 48, "ref epoch 2024H1");
        assert_eq!(w1 & 0x00FF_FFFF, 1_234, "frame number in second");
    }

    #[test]
    fn test_vdif1_word2_version_channels_length() {
        let cfg = FrameConfig::default();
        let h = encode_header(&cfg, T0, 0);

        let w2 = word(&h, 2);

        assert_eq!(w2 >> 29, 1, "vdif version");
        assert_eq!((w2 >> 24) & 0x1F, 0, "log2(1 channel)");
        assert_eq!(w2 & 0x00FF_FFFF, 629, "(32 + 5000) / 8");
    }

    #[test]
    fn test_vdif1_word3_station_bytes() {
        let cfg = FrameConfig::default();
        let h = encode_header(&cfg, T0, 0);

        // Станция "AA" в младших 16 битах слова 3: в little-endian это
        // байты 12 и 13 заголовка
        assert_eq!(h[12], 0x41);
        assert_eq!(h[13], 0x41);

        let w3 = word(&h, 3);

        assert_eq!(w3 >> 31, 0, "data type = real");
        assert_eq!((w3 >> 26) & 0x1F, 1, "bits per sample - 1");
        assert_eq!((w3 >> 16) & 0x03FF, 0, "thread id");
        assert_eq!(w3 & 0xFFFF, 0x4141, "station AA");
    }

    #[test]
    fn test_vdif1_thread_id_field() {
        let cfg = FrameConfig {
            thread_id: 0x03FF,
            ..FrameConfig::default()
        };
        let h = encode_header(&cfg, T0, 0);

        assert_eq!((word(&h, 3) >> 16) & 0x03FF, 0x03FF);
        // Станция не затёрта полем thread
        assert_eq!(word(&h, 3) & 0xFFFF, 0x4141);
    }

    #[test]
    fn test_reserved_words_zero() {
        let cfg = FrameConfig::default();
        let h = encode_header(&cfg, T0, 77);

        for i in 4..8 {
            assert_eq!(word(&h, i), 0, "word {i} reserved");
        }
    }

    #[test]
    fn test_compat_layout_words() {
        let cfg = FrameConfig {
            header_layout: HeaderLayout::Compat,
            ..FrameConfig::default()
        };
        let h = encode_header(&cfg, T0, 42);

        assert_eq!(word(&h, 0), T0 & 0x3FFF_FFFF);
        // номер кадра(24) << 8 | log2ch(5) << 3 | бит-1(3)
        assert_eq!(word(&h, 1), (42 << 8) | 0x01);
        // станция << 16 | версия << 8
        assert_eq!(word(&h, 2), (0x4141 << 16) | (1 << 8));
        // длина кадра в 8-байтовых единицах << 8
        assert_eq!(word(&h, 3), 629 << 8);
    }

    #[test]
    fn test_seconds_field_mode_changes_word0_only() {
        let truncated = FrameConfig::default();
        let strict = FrameConfig {
            seconds_field: SecondsField::SinceRefEpoch,
            ..FrameConfig::default()
        };

        // Час после начала эпохи 48
        let t = T0 + 3_600;
        let h_trunc = encode_header(&truncated, t, 5);
        let h_strict = encode_header(&strict, t, 5);

        assert_eq!(word(&h_strict, 0), 3_600);
        assert_eq!(word(&h_trunc, 0), t & 0x3FFF_FFFF);
        assert_eq!(&h_trunc[4..], &h_strict[4..], "отличается только слово 0");
    }

    #[test]
    fn test_multi_channel_station() {
        let cfg = FrameConfig {
            channels: 4,
            station_id: StationId::new("Wb").unwrap(),
            ..FrameConfig::default()
        };
        let h = encode_header(&cfg, T0, 0);

        assert_eq!((word(&h, 2) >> 24) & 0x1F, 2, "log2(4)");
        assert_eq!(word(&h, 3) & 0xFFFF, 0x5762, "station Wb");
    }
}
