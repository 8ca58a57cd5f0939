use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Instant,
};

/// Метрики сессии, обновляемые lock-free.
#[derive(Debug, Default)]
pub struct StreamMetrics {
    pub frames_sent: AtomicU64,
    pub bytes_sent: AtomicU64,
    pub send_errors: AtomicU64,
    /// Такты, отправленные позже дедлайна более чем на 1 мс
    pub late_ticks: AtomicU64,
    pub timing_error_ns_total: AtomicU64,
}

/// Snapshot метрик для отображения / тестирования.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub duration_secs: f64,
    pub frames_sent: u64,
    pub bytes_sent: u64,
    pub send_errors: u64,
    pub late_ticks: u64,
    pub frames_per_sec: f64,
    pub throughput_mbps: f64,
    pub avg_timing_error_us: f64,
}

impl StreamMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Средний темп отправки (кадров/с).
    pub fn frames_per_sec(
        &self,
        start: &Instant,
    ) -> f64 {
        let secs = start.elapsed().as_secs_f64();

        if secs < 1e-9 {
            return 0.0;
        }

        self.frames_sent.load(Ordering::Relaxed) as f64 / secs
    }

    /// Скорость передачи в МБ/с.
    pub fn throughput_mbps(
        &self,
        start: &Instant,
    ) -> f64 {
        let secs = start.elapsed().as_secs_f64();

        if secs < 1e-9 {
            return 0.0;
        }

        self.bytes_sent.load(Ordering::Relaxed) as f64 / secs / 1_000_000.0
    }

    /// Средняя ошибка тайминга (мкс) на отправленный кадр.
    pub fn avg_timing_error_us(&self) -> f64 {
        let frames = self.frames_sent.load(Ordering::Relaxed);

        if frames == 0 {
            return 0.0;
        }

        self.timing_error_ns_total.load(Ordering::Relaxed) as f64 / frames as f64 / 1_000.0
    }

    /// Итоговая сводка для вывода в конце сессии.
    pub fn summary(
        &self,
        start: &Instant,
    ) -> MetricsSummary {
        MetricsSummary {
            duration_secs: start.elapsed().as_secs_f64(),
            frames_sent: self.frames_sent.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            send_errors: self.send_errors.load(Ordering::Relaxed),
            late_ticks: self.late_ticks.load(Ordering::Relaxed),
            frames_per_sec: self.frames_per_sec(start),
            throughput_mbps: self.throughput_mbps(start),
            avg_timing_error_us: self.avg_timing_error_us(),
        }
    }
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "  Duration      : {:.2}s", self.duration_secs)?;
        writeln!(f, "  Frames sent   : {}", self.frames_sent)?;
        writeln!(
            f,
            "  Bytes sent    : {:.1} MB",
            self.bytes_sent as f64 / 1e6
        )?;
        writeln!(f, "  Send errors   : {}", self.send_errors)?;
        writeln!(f, "  Late ticks    : {}", self.late_ticks)?;
        writeln!(f, "  Frame rate    : {:.1} fps", self.frames_per_sec)?;
        writeln!(f, "  Throughput    : {:.2} MB/s", self.throughput_mbps)?;
        writeln!(
            f,
            "  Timing error  : {:.1} µs avg",
            self.avg_timing_error_us
        )?;
        write!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
