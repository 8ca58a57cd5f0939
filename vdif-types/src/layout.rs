/// Соглашение о раскладке полей по словам заголовка.
///
/// Оба варианта — 32-байтный заголовок из восьми 32-битных little-endian
/// слов; отличается только распределение полей внутри слов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderLayout {
    /// Каноническая раскладка VDIF 1.x
    #[default]
    Vdif1,
    /// Раскладка старых внутренних генераторных скриптов — сохранена,
    /// чтобы архивные записи оставались сравнимыми
    Compat,
}

/// Интерпретация 30-битного поля «секунды от опорной эпохи».
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecondsField {
    /// Unix-секунды, усечённые до 30 бит — бит-в-бит совместимо со старым
    /// генератором; приёмник обязан ожидать именно это
    #[default]
    TruncatedUnix,
    /// Секунды строго от начала вычисленной полугодовой эпохи
    /// (буквальное чтение спецификации VDIF)
    SinceRefEpoch,
}

impl std::fmt::Display for HeaderLayout {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            HeaderLayout::Vdif1 => write!(f, "vdif1"),
            HeaderLayout::Compat => write!(f, "compat"),
        }
    }
}

impl std::str::FromStr for HeaderLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vdif1" | "vdif" | "standard" => Ok(HeaderLayout::Vdif1),
            "compat" | "legacy-scripts" => Ok(HeaderLayout::Compat),
            _ => Err(format!(
                "Unknown header layout: '{s}'. Use: vdif1, compat"
            )),
        }
    }
}

impl std::fmt::Display for SecondsField {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            SecondsField::TruncatedUnix => write!(f, "truncated-unix"),
            SecondsField::SinceRefEpoch => write!(f, "since-ref-epoch"),
        }
    }
}

impl std::str::FromStr for SecondsField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncated-unix" | "unix" => Ok(SecondsField::TruncatedUnix),
            "since-ref-epoch" | "ref-epoch" | "strict" => Ok(SecondsField::SinceRefEpoch),
            _ => Err(format!(
                "Unknown seconds field mode: '{s}'. Use: truncated-unix, since-ref-epoch"
            )),
        }
    }
}
