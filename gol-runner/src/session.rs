use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use gol_config::DisplaySettings;
use gol_core::SimulationEngine;
use gol_transport::{FileSender, Sender, Serializer, TransportError, UniverseTextSerializer};
use log::{error, info, warn};

use crate::command::{Command, HELP};
use crate::render::{render, CLEAR_SCREEN, TITLE};
use crate::stats::GenerationTimer;

/// Owns the engine for the lifetime of a run and drives it on behalf of the
/// user, one generation at a time so that an interrupt can stop a long run
/// between generations.
pub struct Session {
    engine: SimulationEngine,
    display: DisplaySettings,
    interrupt: Arc<AtomicBool>,
    timer: GenerationTimer,
}

impl Session {
    pub fn new(
        engine: SimulationEngine,
        display: DisplaySettings,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            engine,
            display,
            interrupt,
            timer: GenerationTimer::new(),
        }
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn timer(&self) -> &GenerationTimer {
        &self.timer
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{}{}", CLEAR_SCREEN, render(&self.engine, &self.display))?;
        out.flush()
    }

    /// Advances up to `n` generations and returns how many ran. Stops early
    /// only when interrupted.
    pub fn run_generations(&mut self, n: u64, out: &mut impl Write) -> io::Result<u64> {
        self.interrupt.store(false, Ordering::SeqCst);
        let frame_delay = Duration::from_millis(self.display.frame_delay_ms);

        let mut completed = 0;
        while completed < n {
            if self.interrupt.load(Ordering::SeqCst) {
                warn!("Interrupted after {} of {} generations", completed, n);
                break;
            }
            let engine = &mut self.engine;
            self.timer.time(|| engine.advance(1));
            completed += 1;

            if self.display.enabled {
                self.draw(out)?;
                if !frame_delay.is_zero() {
                    sleep(frame_delay);
                }
            }
        }
        self.interrupt.store(false, Ordering::SeqCst);
        Ok(completed)
    }

    /// Serializes the current state and hands it to `sender`. A failure leaves
    /// the engine untouched.
    pub fn dump(
        &self,
        serializer: &dyn Serializer,
        sender: &mut dyn Sender,
    ) -> Result<(), TransportError> {
        let data = serializer.serialize(&self.engine)?;
        sender.send(&data)
    }

    fn dump_to_file(&self, path: &Path) -> Result<(), TransportError> {
        self.dump(&UniverseTextSerializer, &mut FileSender::new(path))
    }

    /// Reads commands line by line until `exit` or end of input.
    pub fn run_interactive(
        &mut self,
        mut input: impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<()> {
        writeln!(out, "\t\t\t\t\t{}\n", TITLE)?;
        writeln!(out, "Enter tick <number of iterations> to start the game!")?;
        writeln!(out, "{}", HELP)?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Tick(n))) => {
                    let completed = self.run_generations(n, out)?;
                    if !self.display.enabled {
                        writeln!(
                            out,
                            "generation {} ({} advanced), population {}",
                            self.engine.generation(),
                            completed,
                            self.engine.grid().population()
                        )?;
                    }
                }
                Ok(Some(Command::Dump(path))) => match self.dump_to_file(&path) {
                    Ok(()) => {
                        info!(
                            "Dumped generation {} to {}",
                            self.engine.generation(),
                            path.display()
                        );
                        writeln!(out, "Done!")?;
                    }
                    Err(e) => error!("{}", e),
                },
                Ok(Some(Command::Help)) => writeln!(out, "{}", HELP)?,
                Ok(Some(Command::Exit)) => break,
                Err(e) => {
                    warn!("{}", e);
                    writeln!(out, "{}", e)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gol_core::parse;
    use std::fs;
    use tempfile::TempDir;

    const BLINKER: &str = "#N Blinker\n#R #B3/S23\n#S 5 5\n2 1\n2 2\n2 3\n";

    fn session(display_enabled: bool) -> Session {
        let engine = SimulationEngine::new(parse(BLINKER).unwrap()).unwrap();
        let display = DisplaySettings {
            enabled: display_enabled,
            frame_delay_ms: 0,
            ..DisplaySettings::default()
        };
        Session::new(engine, display, Arc::new(AtomicBool::new(false)))
    }

    #[test]
    fn scripted_interactive_session() {
        let dir = TempDir::new().unwrap();
        let dump = dir.path().join("after.life");
        let script = format!("tick 3\n\nbogus\ndump {}\nhelp\nexit\ntick 5\n", dump.display());

        let mut session = session(false);
        let mut out = Vec::new();
        session.run_interactive(script.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(session.engine().generation(), 3);
        assert!(out.contains("generation 3 (3 advanced), population 3"));
        assert!(out.contains("Unknown command!"));
        assert!(out.contains("Done!"));
        assert_eq!(
            fs::read_to_string(&dump).unwrap(),
            "#N Blinker\n#R #B3/S23\n#S 5 5\n1 2\n2 2\n3 2\n"
        );
        assert_eq!(session.timer().summary().unwrap().generations, 3);
    }

    #[test]
    fn failed_dump_keeps_state() {
        let dir = TempDir::new().unwrap();
        let script = format!("tick\ndump {}\n", dir.path().join("missing/x.life").display());
        let mut session = session(false);
        let before = {
            let mut probe = session.engine().clone();
            probe.advance(1);
            probe.live_cells()
        };
        let mut out = Vec::new();
        session.run_interactive(script.as_bytes(), &mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("Done!"));
        assert_eq!(session.engine().live_cells(), before);
    }

    #[test]
    fn rendering_draws_every_generation() {
        let mut session = session(true);
        let mut out = Vec::new();
        assert_eq!(session.run_generations(2, &mut out).unwrap(), 2);
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches(CLEAR_SCREEN).count(), 2);
        assert!(out.contains("generation 2"));
    }

    #[test]
    fn interrupt_stops_between_generations() {
        struct InterruptingWriter(Arc<AtomicBool>, Vec<u8>);
        impl Write for InterruptingWriter {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.1.extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                // Each rendered frame ends in a flush; simulate Ctrl+C after the first.
                self.0.store(true, Ordering::SeqCst);
                Ok(())
            }
        }

        let mut session = session(true);
        let mut out = InterruptingWriter(Arc::clone(&session.interrupt), Vec::new());
        assert_eq!(session.run_generations(1_000, &mut out).unwrap(), 1);
        assert_eq!(session.engine().generation(), 1);
        assert!(!session.interrupt.load(Ordering::SeqCst));
    }

    #[test]
    fn zero_ticks_leave_state_alone() {
        let mut session = session(false);
        let before = session.engine().live_cells();
        assert_eq!(session.run_generations(0, &mut io::sink()).unwrap(), 0);
        assert_eq!(session.engine().live_cells(), before);
    }
}
