use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSignal {
    Tick(i64),
    Expired,
}

/// Events are tagged with the generation of the countdown instance that
/// produced them. The session only honors events from the generation it
/// currently has armed; anything older raced a cancellation and is dropped.
#[derive(Debug, Clone, Copy)]
pub struct TimerEvent {
    pub generation: u64,
    pub signal: TimerSignal,
}

/// A cancellable one-second countdown. Starting a new countdown implicitly
/// cancels the previous instance; `cancel` is idempotent. A non-positive
/// duration expires immediately without emitting ticks.
pub struct Countdown {
    tx: mpsc::Sender<TimerEvent>,
    generation: u64,
    active: Option<Arc<AtomicBool>>,
}

impl Countdown {
    pub fn new() -> (Self, mpsc::Receiver<TimerEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                tx,
                generation: 0,
                active: None,
            },
            rx,
        )
    }

    /// Begin a countdown of `duration_secs`, superseding any prior instance.
    /// Returns the generation of the new instance.
    pub fn start(&mut self, duration_secs: i64) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;

        let cancelled = Arc::new(AtomicBool::new(false));
        self.active = Some(cancelled.clone());
        let tx = self.tx.clone();

        thread::spawn(move || {
            let mut remaining = duration_secs;
            loop {
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                if remaining <= 0 {
                    let _ = tx.send(TimerEvent {
                        generation,
                        signal: TimerSignal::Expired,
                    });
                    return;
                }
                if tx
                    .send(TimerEvent {
                        generation,
                        signal: TimerSignal::Tick(remaining),
                    })
                    .is_err()
                {
                    return;
                }
                thread::sleep(Duration::from_secs(1));
                remaining -= 1;
            }
        });

        generation
    }

    /// Stop the running instance, if any. Safe to call repeatedly or after
    /// the instance has already expired.
    pub fn cancel(&mut self) {
        if let Some(flag) = self.active.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub fn format_duration(total_secs: i64) -> String {
    if total_secs <= 0 {
        return "0h 0m 0s".to_string();
    }
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{}h {}m {}s", hours, minutes, seconds)
}

/// Compact m:ss clock used in the exam titlebar and result screen.
pub fn format_clock(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}
