use vdif_types::FrameConfig;

/// Полная конфигурация сессии стриминга.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Конфигурация кадра VDIF
    pub frame: FrameConfig,
    /// Адрес приёмника host:port
    pub target_addr: String,
    /// Локальный адрес сокета
    pub bind_addr: String,
    /// Частота тестового тона (Гц)
    pub tone_freq_hz: f64,
    /// СКО аддитивного гауссова шума
    pub noise_std: f64,
    /// Длительность передачи (секунды)
    pub duration_secs: f64,
    /// Интервал вывода статистики (секунды)
    pub stats_interval_secs: u64,
    /// Ошибка отправки фатальна (для строгих тестовых стендов)
    pub strict_send: bool,
    /// Зерно генератора шума (None — от энтропии)
    pub seed: Option<u64>,
}

impl StreamConfig {
    fn new() -> Self {
        Self {
            frame: FrameConfig::default(),
            target_addr: "10.8.81.20:50000".to_string(),
            bind_addr: "0.0.0.0:0".to_string(),
            tone_freq_hz: 1e6,
            noise_std: 0.2,
            duration_secs: 1.0,
            stats_interval_secs: 5,
            strict_send: false,
            seed: None,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Парсит строку частоты в герцы (дробные).
///
/// Поддерживает суффиксы: `GHz`, `MHz`, `kHz`, `Hz` (регистронезависимо)
/// и экспоненциальную запись без суффикса.
///
/// # Примеры
/// ```
/// use vdif_streamer::config::parse_freq_hz;
/// assert_eq!(parse_freq_hz("64MHz").unwrap(), 64_000_000.0);
/// assert_eq!(parse_freq_hz("1.5GHz").unwrap(), 1_500_000_000.0);
/// assert_eq!(parse_freq_hz("64e6").unwrap(), 64_000_000.0);
/// ```
pub fn parse_freq_hz(s: &str) -> Result<f64, String> {
    let s = s.trim();
    let lower = s.to_lowercase();

    let (num_str, mult) = if let Some(v) = lower.strip_suffix("ghz") {
        (v.trim(), 1_000_000_000_f64)
    } else if let Some(v) = lower.strip_suffix("mhz") {
        (v.trim(), 1_000_000_f64)
    } else if let Some(v) = lower.strip_suffix("khz") {
        (v.trim(), 1_000_f64)
    } else if let Some(v) = lower.strip_suffix("hz") {
        (v.trim(), 1_f64)
    } else {
        // Без суффикса — число в герцах
        return s
            .parse::<f64>()
            .map_err(|e| format!("Invalid frequency '{s}': {e}"));
    };

    let n: f64 = num_str
        .parse()
        .map_err(|e| format!("Invalid frequency value '{num_str}': {e}"))?;

    Ok(n * mult)
}

/// Парсит `udp://host:port` или просто `host:port`.
pub fn parse_udp_target(s: &str) -> Result<String, String> {
    let addr = s.strip_prefix("udp://").unwrap_or(s);
    addr.parse::<std::net::SocketAddr>()
        .map(|a| a.to_string())
        .map_err(|e| format!("Invalid UDP address '{s}': {e}"))
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
