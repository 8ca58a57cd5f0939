//! Транспортная граница
//!
//! Транспорт внедряется в сессию как способность (dependency injection),
//! а не процесс-глобальный сокет: тесты подставляют [`MemorySink`].
//! Отправка fire-and-forget: подтверждений, повторов и backpressure нет.

use std::net::UdpSocket;

/// Примитив отправки одного кадра.
pub trait FrameSink: Send {
    /// Отправляет буфер кадра целиком, возвращает число переданных байт.
    fn send(
        &mut self,
        frame: &[u8],
    ) -> std::io::Result<usize>;
}

/// UDP-отправитель: одна датаграмма на кадр, без дополнительного фрейминга.
pub struct UdpSink {
    socket: UdpSocket,
}

impl UdpSink {
    /// Создаёт сокет и привязывает его к адресу приёмника.
    pub fn connect(
        bind_addr: &str,
        target_addr: &str,
    ) -> std::io::Result<Self> {
        let socket = UdpSocket::bind(bind_addr)?;

        socket.connect(target_addr)?;

        Ok(Self { socket })
    }
}

impl FrameSink for UdpSink {
    fn send(
        &mut self,
        frame: &[u8],
    ) -> std::io::Result<usize> {
        self.socket.send(frame)
    }
}

/// Накопительный sink для тестов: складывает кадры в память.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<Vec<u8>>,
    /// Отказывать на каждой отправке (имитация транспортной ошибки)
    pub fail_sends: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameSink for MemorySink {
    fn send(
        &mut self,
        frame: &[u8],
    ) -> std::io::Result<usize> {
        if self.fail_sends {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "simulated send failure",
            ));
        }

        self.frames.push(frame.to_vec());

        Ok(frame.len())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
