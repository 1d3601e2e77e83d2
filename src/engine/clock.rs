//! Step clock for the grid playhead
//!
//! Runs in its own thread and broadcasts one tick per sixteenth note to every
//! subscriber. The ticks only drive the on-screen playhead; the live-coding
//! runtime keeps its own time.

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use stepgrid_core::engine::step_interval_secs;
use stepgrid_core::STEPS;

/// A single step boundary
#[derive(Clone, Debug)]
pub struct StepTick {
    /// Grid column, 0-15
    pub step: usize,
    /// Steps emitted since the clock was last started
    pub count: u64,
    pub timestamp: Instant,
}

#[derive(Debug)]
enum ClockCommand {
    Start,
    Stop,
    Subscribe(Sender<StepTick>),
    Shutdown,
}

/// Sixteenth-note clock running in a background thread
pub struct StepClock {
    /// BPM stored as bits so the clock thread reads it without locking
    bpm: Arc<AtomicU32>,
    running: Arc<AtomicBool>,
    command_tx: Sender<ClockCommand>,
    thread: Option<JoinHandle<()>>,
}

impl StepClock {
    pub fn new(bpm: f32) -> Self {
        let bpm_bits = Arc::new(AtomicU32::new(bpm.to_bits()));
        let running = Arc::new(AtomicBool::new(false));
        let (command_tx, command_rx) = bounded(64);

        let thread_bpm = bpm_bits.clone();
        let thread_running = running.clone();
        let thread = thread::spawn(move || {
            ClockThread::new(thread_bpm, thread_running, command_rx).run();
        });

        StepClock {
            bpm: bpm_bits,
            running,
            command_tx,
            thread: Some(thread),
        }
    }

    /// New receiver for tick events. Every subscriber sees every tick.
    pub fn subscribe(&self) -> Receiver<StepTick> {
        let (tx, rx) = unbounded();
        let _ = self.command_tx.send(ClockCommand::Subscribe(tx));
        rx
    }

    /// Start from step 0. Restarting a running clock also rewinds it.
    pub fn start(&self) {
        let _ = self.command_tx.send(ClockCommand::Start);
    }

    pub fn stop(&self) {
        let _ = self.command_tx.send(ClockCommand::Stop);
    }

    /// Takes effect from the next tick
    pub fn set_bpm(&self, bpm: f32) {
        self.bpm.store(bpm.to_bits(), Ordering::Relaxed);
    }

    pub fn bpm(&self) -> f32 {
        f32::from_bits(self.bpm.load(Ordering::Relaxed))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_secs_f64(step_interval_secs(self.bpm()))
    }
}

impl Drop for StepClock {
    fn drop(&mut self) {
        let _ = self.command_tx.send(ClockCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

struct ClockThread {
    bpm: Arc<AtomicU32>,
    running: Arc<AtomicBool>,
    command_rx: Receiver<ClockCommand>,
    subscribers: Vec<Sender<StepTick>>,
    count: u64,
    next_tick: Option<Instant>,
}

impl ClockThread {
    fn new(bpm: Arc<AtomicU32>, running: Arc<AtomicBool>, command_rx: Receiver<ClockCommand>) -> Self {
        Self {
            bpm,
            running,
            command_rx,
            subscribers: Vec::new(),
            count: 0,
            next_tick: None,
        }
    }

    fn step_duration(&self) -> Duration {
        let bpm = f32::from_bits(self.bpm.load(Ordering::Relaxed));
        Duration::from_secs_f64(step_interval_secs(bpm))
    }

    fn run(&mut self) {
        loop {
            let command = match self.next_tick {
                // Running: wait for a command until the next tick is due
                Some(due) => {
                    let wait = due.saturating_duration_since(Instant::now());
                    match self.command_rx.recv_timeout(wait) {
                        Ok(cmd) => Some(cmd),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                // Stopped: block until told to do something
                None => match self.command_rx.recv() {
                    Ok(cmd) => Some(cmd),
                    Err(_) => break,
                },
            };

            match command {
                Some(cmd) => {
                    if self.handle_command(cmd) {
                        break;
                    }
                }
                None => {
                    self.emit_tick();
                    // Schedule from the previous due time so ticks don't drift
                    self.next_tick = self.next_tick.map(|due| due + self.step_duration());
                }
            }
        }
    }

    /// Returns true when the thread should exit
    fn handle_command(&mut self, cmd: ClockCommand) -> bool {
        match cmd {
            ClockCommand::Start => {
                self.count = 0;
                self.next_tick = Some(Instant::now());
                self.running.store(true, Ordering::Relaxed);
            }
            ClockCommand::Stop => {
                self.next_tick = None;
                self.running.store(false, Ordering::Relaxed);
            }
            ClockCommand::Subscribe(tx) => self.subscribers.push(tx),
            ClockCommand::Shutdown => {
                self.running.store(false, Ordering::Relaxed);
                return true;
            }
        }
        false
    }

    fn emit_tick(&mut self) {
        let tick = StepTick {
            step: (self.count % STEPS as u64) as usize,
            count: self.count,
            timestamp: Instant::now(),
        };
        self.subscribers.retain(|tx| tx.send(tick.clone()).is_ok());
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = StepClock::new(120.0);
        assert_eq!(clock.bpm(), 120.0);
        assert!(!clock.is_running());
        assert_eq!(clock.step_duration(), Duration::from_millis(125));
    }

    #[test]
    fn test_bpm_change() {
        let clock = StepClock::new(120.0);
        clock.set_bpm(60.0);
        assert_eq!(clock.bpm(), 60.0);
        assert_eq!(clock.step_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_ticks_count_up_from_zero() {
        // 200 BPM -> 75ms per step
        let clock = StepClock::new(200.0);
        let rx = clock.subscribe();
        clock.start();

        let first = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        let second = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!((first.step, first.count), (0, 0));
        assert_eq!((second.step, second.count), (1, 1));
        assert!(second.timestamp > first.timestamp);
    }

    #[test]
    fn test_stop_silences_ticks() {
        let clock = StepClock::new(200.0);
        let rx = clock.subscribe();
        clock.start();
        rx.recv_timeout(Duration::from_secs(1)).unwrap();

        clock.stop();
        thread::sleep(Duration::from_millis(20));
        assert!(!clock.is_running());
        // drain anything emitted before the stop landed
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_restart_rewinds() {
        let clock = StepClock::new(200.0);
        let rx = clock.subscribe();
        clock.start();
        rx.recv_timeout(Duration::from_secs(1)).unwrap();
        rx.recv_timeout(Duration::from_secs(1)).unwrap();

        clock.stop();
        thread::sleep(Duration::from_millis(20));
        while rx.try_recv().is_ok() {}
        clock.start();
        let tick = rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(tick.count, 0);
    }
}
