//! Serial telemetry sink.
//!
//! Implements [`EventSink`] by writing the CSV stream to a byte writer
//! (UART0 via stdout in production, a `Vec<u8>` in tests): the header on
//! [`AppEvent::Started`] and one line per [`AppEvent::Telemetry`].  Every
//! other event goes to the logger.
//!
//! The logger shares the same UART.  Once the loop starts the firmware caps
//! it at [`CONSOLE_LOG_LEVEL`], so only warnings and errors interleave with
//! the CSV, and their `W (..)`/`E (..)` prefix never parses as a row.

use std::io::Write;

use log::{info, warn, LevelFilter};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::telemetry::HEADER;

/// Most verbose log level allowed on the console while telemetry streams.
pub const CONSOLE_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// CSV writer on the serial channel.
pub struct SerialTelemetrySink<W> {
    out: W,
}

impl<W: Write> SerialTelemetrySink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        let res = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(e) = res {
            warn!("telemetry write failed: {}", e);
        }
    }
}

impl<W: Write> EventSink for SerialTelemetrySink<W> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
                self.write_line(HEADER);
            }
            AppEvent::Telemetry(record) => {
                let line = record.to_csv_line();
                self.write_line(&line);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::SensorFault { error, held_f } => {
                warn!("SENSOR | {} | holding {:.1}\u{00b0}F", error, held_f);
            }
            AppEvent::SensorRecovered => {
                info!("SENSOR | recovered");
            }
        }
    }
}
