//! Суб-байтовая упаковка кодов
//!
//! Коды укладываются старшими битами вперёд: первый код занимает верхние
//! биты первого байта. Явный битовый курсор вместо фиксированных групп,
//! чтобы глубины, не делящие 8, работали так же.

/// Длина упакованного буфера: `ceil(n * bits / 8)`.
pub fn packed_len(
    n: usize,
    bits: u8,
) -> usize {
    (n * bits as usize + 7) / 8
}

/// Пакует коды (`< 2^bits` каждый) в байты, MSB-first.
///
/// Неполный хвост дополняется нулевыми слотами; формула длины от этого не
/// меняется. Коды беззнаковые, расширения знака нет.
pub fn pack_codes(
    codes: &[u8],
    bits: u8,
) -> Vec<u8> {
    let mut out = vec![0u8; packed_len(codes.len(), bits)];
    let mut bit_pos = 0usize;

    for &code in codes {
        let code = code & (((1u16 << bits) - 1) as u8);

        for j in (0..bits).rev() {
            if (code >> j) & 1 == 1 {
                out[bit_pos / 8] |= 1 << (7 - bit_pos % 8);
            }
            bit_pos += 1;
        }
    }

    out
}

/// Обратная операция: читает `count` кодов из байтов, MSB-first.
///
/// Нулевые хвостовые слоты за пределами `count` игнорируются.
pub fn unpack_codes(
    bytes: &[u8],
    bits: u8,
    count: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(count);
    let mut bit_pos = 0usize;

    for _ in 0..count {
        let mut code = 0u8;

        for _ in 0..bits {
            let bit = (bytes[bit_pos / 8] >> (7 - bit_pos % 8)) & 1;
            code = (code << 1) | bit;
            bit_pos += 1;
        }

        out.push(code);
    }

    out
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
