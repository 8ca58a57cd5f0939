use std::sync::atomic::Ordering;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use vdif_streamer::{
    parse_freq_hz, parse_udp_target, StreamConfig, StreamSession, ToneSource, UdpSink,
};
use vdif_types::{FrameConfig, HeaderLayout, QuantPolicy, SecondsField, StationId};

#[derive(Parser, Debug)]
#[command(
    name = "vdif-streamer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Stream synthetic VDIF frames over UDP at real-time frame rate",
    long_about = None,
)]
struct Cli {
    /// Частота дискретизации (64MHz, 64e6, 64000000)
    #[arg(short = 'r', long, default_value = "64MHz")]
    rate: String,
    /// Выборок в одном кадре (вместе с rate задаёт длительность кадра)
    #[arg(long, default_value = "20000")]
    samples_per_frame: u32,
    /// Бит на выборку (1..=8)
    #[arg(short, long, default_value = "2")]
    bits: u8,
    /// Количество каналов (степень двойки)
    #[arg(short, long, default_value = "1")]
    channels: u32,
    /// VDIF thread ID
    #[arg(long, default_value = "0")]
    thread_id: u16,
    /// Идентификатор станции (2 ASCII символа)
    #[arg(short, long, default_value = "AA")]
    station: String,
    /// Версия VDIF (0..=7)
    #[arg(long, default_value = "1")]
    vdif_version: u8,
    /// Адрес приёмника (udp://host:port или host:port)
    #[arg(short, long, default_value = "10.8.81.20:50000")]
    target: String,
    /// Локальный адрес сокета
    #[arg(long, default_value = "0.0.0.0:0")]
    bind: String,
    /// Частота тестового тона (1MHz, 1e6)
    #[arg(long, default_value = "1MHz")]
    tone: String,
    /// СКО аддитивного гауссова шума
    #[arg(long, default_value = "0.2")]
    noise: f64,
    /// Политика квантования: clip-floor, percentile
    #[arg(long, default_value = "clip-floor")]
    policy: QuantPolicy,
    /// Раскладка заголовка: vdif1, compat
    #[arg(long, default_value = "vdif1")]
    layout: HeaderLayout,
    /// Поле секунд: truncated-unix, since-ref-epoch
    #[arg(long, default_value = "truncated-unix")]
    seconds_field: SecondsField,
    /// Длительность передачи (секунды)
    #[arg(short, long, default_value = "1.0")]
    duration: f64,
    /// Интервал вывода статистики (секунды)
    #[arg(long, default_value = "5")]
    stats_interval: u64,
    /// Ошибка отправки фатальна (для строгих тестовых стендов)
    #[arg(long)]
    strict: bool,
    /// Зерно генератора шума (по умолчанию — от энтропии)
    #[arg(long)]
    seed: Option<u64>,
    /// Тихий режим (только ошибки)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.quiet { "error" } else { "info" };

    env_logger::Builder::new()
        .filter_level(level.parse().unwrap())
        .format_target(false)
        .format_timestamp_secs()
        .init();

    let sample_rate_hz = match parse_freq_hz(&cli.rate) {
        Ok(r) => r,
        Err(e) => {
            error!("--rate: {e}");
            std::process::exit(1);
        }
    };

    let tone_freq_hz = match parse_freq_hz(&cli.tone) {
        Ok(f) => f,
        Err(e) => {
            error!("--tone: {e}");
            std::process::exit(1);
        }
    };

    let station_id = match StationId::new(&cli.station) {
        Ok(s) => s,
        Err(e) => {
            error!("--station: {e}");
            std::process::exit(1);
        }
    };

    let target_addr = match parse_udp_target(&cli.target) {
        Ok(a) => a,
        Err(e) => {
            error!("--target: {e}");
            std::process::exit(1);
        }
    };

    let frame = FrameConfig {
        sample_rate_hz,
        samples_per_frame: cli.samples_per_frame,
        bits_per_sample: cli.bits,
        channels: cli.channels,
        thread_id: cli.thread_id,
        station_id,
        vdif_version: cli.vdif_version,
        quant_policy: cli.policy,
        header_layout: cli.layout,
        seconds_field: cli.seconds_field,
    };

    let config = StreamConfig {
        frame,
        target_addr,
        bind_addr: cli.bind.clone(),
        tone_freq_hz,
        noise_std: cli.noise,
        duration_secs: cli.duration,
        stats_interval_secs: cli.stats_interval,
        strict_send: cli.strict,
        seed: cli.seed,
    };

    let session = match StreamSession::new(config.clone()) {
        Ok(s) => s,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let stop_flag = session.stop_flag();
    let stop_ctrlc = stop_flag.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        if stop_ctrlc.swap(true, Ordering::SeqCst) {
            // Второй Ctrl+C — принудительный выход
            warn!("Force exit");
            std::process::exit(130);
        }
        warn!("Ctrl+C received — stopping after current frame...");
    }) {
        warn!("Failed to set Ctrl+C handler: {e}");
    }

    // Выводим конфигурацию
    let fc = &config.frame;
    let data_rate_mbs =
        fc.frame_size_bytes() as f64 * fc.frames_per_second() as f64 / 1_000_000.0;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Target        : {}", config.target_addr);
    info!("  Sample rate   : {:.3} Msps", fc.sample_rate_hz / 1e6);
    info!("  Frame         : {} samples × {} bit, {} bytes", fc.samples_per_frame, fc.bits_per_sample, fc.frame_size_bytes());
    info!("  Frame rate    : {} fps", fc.frames_per_second());
    info!("  Station       : {} (thread {})", fc.station_id, fc.thread_id);
    info!("  Layout        : {} / {}", fc.header_layout, fc.seconds_field);
    info!("  Quantization  : {}", fc.quant_policy);
    info!("  Tone          : {:.3} MHz + noise σ={}", config.tone_freq_hz / 1e6, config.noise_std);
    info!("  Duration      : {}s", config.duration_secs);
    info!("  Data rate     : {:.1} MB/s", data_rate_mbs);
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut source = ToneSource::new(
        fc.sample_rate_hz,
        config.tone_freq_hz,
        config.noise_std,
        config.seed,
    );

    let mut sink = match UdpSink::connect(&config.bind_addr, &config.target_addr) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to open UDP socket: {e}");
            std::process::exit(1);
        }
    };

    let metrics = session.metrics();
    let session_start = Instant::now();

    match session.run(&mut source, &mut sink) {
        Ok(()) => {}
        Err(e) => {
            error!("Streaming failed: {e}");
            std::process::exit(1);
        }
    }

    // --- Итоговая статистика ---
    let summary = metrics.summary(&session_start);
    info!("\n{summary}");

    if summary.send_errors > 0 {
        warn!(
            "⚠ {} send errors ({} frames delivered). Check receiver address and MTU.",
            summary.send_errors, summary.frames_sent
        );
    }

    if summary.late_ticks > 0 {
        warn!(
            "⚠ {} ticks dispatched >1ms late. Consider a larger frame or a lighter load.",
            summary.late_ticks
        );
    }

    info!("✓ Streaming complete: {} frames", summary.frames_sent);
}
