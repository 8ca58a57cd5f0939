/// Политика квантования входных выборок.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantPolicy {
    /// `clip(floor(x), 0, 2^bits - 1)` — детерминированно и без состояния,
    /// но для немасштабированного сигнала смещено к насыщению
    #[default]
    ClipFloor,
    /// Пороги по перцентилям распределения текущего кадра
    /// (адаптивно, диапазон кодов гарантирован только как [0, 2^bits - 1])
    Percentile,
}

impl std::fmt::Display for QuantPolicy {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            QuantPolicy::ClipFloor => write!(f, "clip-floor"),
            QuantPolicy::Percentile => write!(f, "percentile"),
        }
    }
}

impl std::str::FromStr for QuantPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clip-floor" | "clipfloor" | "clip" => Ok(QuantPolicy::ClipFloor),
            "percentile" | "quartile" => Ok(QuantPolicy::Percentile),
            _ => Err(format!(
                "Unknown quantization policy: '{s}'. Use: clip-floor, percentile"
            )),
        }
    }
}
