use std::{
    sync::{
        atomic::{AtomicBool, AtomicU8, Ordering},
        Arc,
    },
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use log::{info, warn};
use vdif_core::encode_frame;

use crate::{FrameSink, SampleSource, StreamConfig, StreamError, StreamMetrics, StreamResult};

/// Состояние сессии.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionState {
    Idle = 0,
    Running = 1,
    Stopped = 2,
}

impl SessionState {
    pub fn from_u8(v: u8) -> Self {
        match v {
            1 => SessionState::Running,
            2 => SessionState::Stopped,
            _ => SessionState::Idle,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Сессия стриминга (single-threaded).
///
/// Один логический поток управления: кадр полностью кодируется и
/// отправляется до начала следующего; единственная точка ожидания —
/// пауза до абсолютного дедлайна такта.
pub struct StreamSession {
    config: StreamConfig,
    metrics: Arc<StreamMetrics>,
    stop_flag: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
}

impl StreamSession {
    /// Создаёт сессию, проверяя конфигурацию. Все ошибки конфигурации
    /// фатальны и обнаруживаются здесь, до отправки первого кадра.
    pub fn new(config: StreamConfig) -> StreamResult<Self> {
        config.frame.validate()?;

        if !config.duration_secs.is_finite() || config.duration_secs <= 0.0 {
            return Err(StreamError::Config(format!(
                "duration must be > 0, got {}",
                config.duration_secs
            )));
        }

        Ok(Self {
            config,
            metrics: StreamMetrics::new(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            state: Arc::new(AtomicU8::new(SessionState::Idle.as_u8())),
        })
    }

    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    pub fn metrics(&self) -> Arc<StreamMetrics> {
        self.metrics.clone()
    }

    /// Разделяемая ячейка состояния (читать через [`SessionState::from_u8`]).
    pub fn state_flag(&self) -> Arc<AtomicU8> {
        self.state.clone()
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Relaxed))
    }

    /// Запускает передачу. Блокирует до конца заданной длительности или
    /// до установки stop-флага (проверяется между тактами, не внутри кадра).
    pub fn run(
        self,
        source: &mut dyn SampleSource,
        sink: &mut dyn FrameSink,
    ) -> StreamResult<()> {
        let cfg = &self.config;
        let metrics = &self.metrics;
        let stop = &self.stop_flag;

        let fps = cfg.frame.frames_per_second() as u64;
        let frame_duration = cfg.frame.frame_duration();
        let total_frames = (cfg.duration_secs / cfg.frame.frame_duration_secs()).round() as u64;
        let stats_interval = Duration::from_secs(cfg.stats_interval_secs);

        // Стартовая Unix-секунда; секунды дальнейших тактов производны от
        // счётчика кадров, не от повторных чтений часов
        let epoch_start = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as u32;

        let start = Instant::now();
        let mut last_stats = Instant::now();
        let mut samples = vec![0.0f64; cfg.frame.samples_per_frame as usize];

        self.state
            .store(SessionState::Running.as_u8(), Ordering::Relaxed);

        info!(
            "Streaming {total_frames} frames ({fps} fps, {} bytes each)",
            cfg.frame.frame_size_bytes()
        );

        for tick in 0..total_frames {
            // Кооперативная остановка — только между тактами
            if stop.load(Ordering::Relaxed) {
                info!("Stop requested at frame {tick}/{total_frames}");
                break;
            }

            source.next_frame(&mut samples);

            let (epoch_seconds, frame_number) = tick_timestamp(epoch_start, fps, tick);
            let frame = encode_frame(&cfg.frame, epoch_seconds, frame_number, &samples);

            // Дедлайн такта i — start + i·frame_duration, независимо от
            // фактического пробуждения предыдущего такта. Опоздание только
            // учитывается; темп не ресинхронизируется.
            let deadline = start + frame_duration.mul_f64(tick as f64);
            let now = Instant::now();

            if now > deadline {
                let late = now - deadline;

                metrics
                    .timing_error_ns_total
                    .fetch_add(late.as_nanos() as u64, Ordering::Relaxed);

                // Порог 1 мс, меньшие отклонения — обычный джиттер сна
                if late > Duration::from_millis(1) {
                    metrics.late_ticks.fetch_add(1, Ordering::Relaxed);
                }
            }

            match sink.send(&frame) {
                Ok(n) => {
                    metrics.frames_sent.fetch_add(1, Ordering::Relaxed);
                    metrics.bytes_sent.fetch_add(n as u64, Ordering::Relaxed);
                }
                Err(e) => {
                    metrics.send_errors.fetch_add(1, Ordering::Relaxed);

                    if cfg.strict_send {
                        self.state
                            .store(SessionState::Stopped.as_u8(), Ordering::Relaxed);
                        return Err(StreamError::Io(e));
                    }

                    warn!("UDP send error: {e}");
                }
            }

            if last_stats.elapsed() >= stats_interval {
                Self::log_progress(metrics, &start, tick, total_frames);
                last_stats = Instant::now();
            }

            // Абсолютный дедлайн следующего такта — от стартовой точки,
            // а не «поспать frame_duration»: накопленный дрейф исключён
            let next_deadline = start + frame_duration.mul_f64((tick + 1) as f64);
            let now = Instant::now();

            if next_deadline > now {
                std::thread::sleep(next_deadline - now);
            }
        }

        self.state
            .store(SessionState::Stopped.as_u8(), Ordering::Relaxed);

        info!(
            "Done: {} frames in {:.2}s",
            metrics.frames_sent.load(Ordering::Relaxed),
            start.elapsed().as_secs_f64(),
        );

        Ok(())
    }

    fn log_progress(
        m: &StreamMetrics,
        start: &Instant,
        tick: u64,
        total: u64,
    ) {
        info!(
            "[ {:.0}s ] frame {tick}/{total} sent={} errors={} late={} timing_err={:.1}µs",
            start.elapsed().as_secs_f64(),
            m.frames_sent.load(Ordering::Relaxed),
            m.send_errors.load(Ordering::Relaxed),
            m.late_ticks.load(Ordering::Relaxed),
            m.avg_timing_error_us(),
        );
    }
}

/// Секунда эпохи и номер кадра в секунде для такта `tick`.
fn tick_timestamp(
    epoch_start: u32,
    fps: u64,
    tick: u64,
) -> (u32, u32) {
    let epoch_seconds = epoch_start + (tick / fps) as u32;
    let frame_number = (tick % fps) as u32;

    (epoch_seconds, frame_number)
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
