//! Process-wide GPU engine loader
//!
//! Owns the single wgpu instance/adapter/device/queue shared by every
//! viewport. The load runs off-thread (driven by `pollster`) and lands in a
//! write-once slot; callers observe it through [`EngineLoader::ready`] and
//! never block. A failed load leaves the slot empty forever, which downstream
//! code treats as "that scene just never appears", not as a fatal error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Poll interval for readiness checks
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Give-up deadline for a viewport waiting on the engine
pub const POLL_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while acquiring the GPU stack
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no suitable GPU adapter found")]
    NoAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to request GPU device: {0}")]
    NoDevice(#[from] wgpu::RequestDeviceError),
}

/// The shared GPU handle
///
/// Everything a viewport needs to create its own surface and resources.
/// Created once, then shared behind an `Arc` for the life of the process.
pub struct GpuEngine {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
}

impl GpuEngine {
    /// Requests the full wgpu stack
    ///
    /// Surfaces are created later, per window, from the returned instance,
    /// so the adapter is requested without a compatibility surface.
    pub async fn request() -> Result<GpuEngine, EngineError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Croft Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        Ok(GpuEngine {
            instance,
            adapter,
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }
}

/// Write-once loader for the shared [`GpuEngine`]
///
/// The first `ensure_started` call spawns the load; later calls are no-ops.
/// The lifecycle is strictly absent -> loading -> ready; a failed load stays
/// in "loading" from the outside, and pollers give up via their own timeout.
pub struct EngineLoader {
    started: AtomicBool,
    slot: OnceLock<Arc<GpuEngine>>,
}

impl EngineLoader {
    const fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            slot: OnceLock::new(),
        }
    }

    /// Triggers the engine load if nobody has yet
    ///
    /// Idempotent across callers: exactly one load attempt happens for the
    /// whole process lifetime regardless of how many viewports call this.
    pub fn ensure_started(&'static self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        log::info!("requesting GPU engine");
        std::thread::spawn(move || match pollster::block_on(GpuEngine::request()) {
            Ok(engine) => {
                let _ = self.slot.set(Arc::new(engine));
                log::info!("GPU engine ready");
            }
            Err(err) => {
                // Slot stays empty; pollers time out and degrade silently.
                log::warn!("GPU engine unavailable: {err}");
            }
        });
    }

    /// True once the engine handle is available
    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Returns the engine handle if the load has completed
    pub fn ready(&self) -> Option<Arc<GpuEngine>> {
        self.slot.get().cloned()
    }
}

static LOADER: EngineLoader = EngineLoader::new();

/// The process-wide engine loader
pub fn loader() -> &'static EngineLoader {
    &LOADER
}

/// Bounded fixed-interval readiness poll
///
/// One per viewport that is waiting for the engine. Checks are due every
/// [`POLL_INTERVAL`] and stop for good after [`POLL_TIMEOUT`]; an expired
/// poll means the owning viewport never initializes, which is the intended
/// silent degradation rather than an error.
pub struct ReadyPoll {
    interval: Duration,
    deadline: Instant,
    next_check: Instant,
    attempts: u32,
}

impl ReadyPoll {
    pub fn new(now: Instant) -> Self {
        Self::with_timing(now, POLL_INTERVAL, POLL_TIMEOUT)
    }

    /// Creates a poll with explicit timing, used by tests
    pub fn with_timing(now: Instant, interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            deadline: now + timeout,
            next_check: now,
            attempts: 0,
        }
    }

    /// True when the next readiness check should run
    ///
    /// Consumes the check: a `true` result schedules the following check one
    /// interval later and counts an attempt.
    pub fn due(&mut self, now: Instant) -> bool {
        if self.expired(now) || now < self.next_check {
            return false;
        }
        self.attempts += 1;
        self.next_check = now + self.interval;
        true
    }

    /// True once the poll has run out of time
    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Number of readiness checks performed so far
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_is_due_on_interval_boundaries() {
        let start = Instant::now();
        let mut poll =
            ReadyPoll::with_timing(start, Duration::from_millis(100), Duration::from_secs(10));

        assert!(poll.due(start));
        // Immediately after a check nothing is due.
        assert!(!poll.due(start));
        assert!(!poll.due(start + Duration::from_millis(50)));
        assert!(poll.due(start + Duration::from_millis(100)));
        assert_eq!(poll.attempts(), 2);
    }

    #[test]
    fn test_poll_gives_up_after_timeout() {
        let start = Instant::now();
        let mut poll =
            ReadyPoll::with_timing(start, Duration::from_millis(100), Duration::from_secs(10));

        let mut now = start;
        let mut checks = 0;
        while !poll.expired(now) {
            if poll.due(now) {
                checks += 1;
            }
            now += Duration::from_millis(10);
        }

        // 10 s at 100 ms per check bounds the attempt count at 100.
        assert!(checks <= 100);
        assert!(checks >= 99);
        assert!(poll.expired(now));
        assert!(!poll.due(now));
    }

    #[test]
    fn test_expired_poll_never_becomes_due_again() {
        let start = Instant::now();
        let mut poll =
            ReadyPoll::with_timing(start, Duration::from_millis(100), Duration::from_millis(250));

        let past_deadline = start + Duration::from_secs(1);
        assert!(poll.expired(past_deadline));
        assert!(!poll.due(past_deadline));
        assert!(!poll.due(past_deadline + Duration::from_secs(5)));
    }

    #[test]
    fn test_loader_starts_empty() {
        // The shared loader must not report readiness before anyone asked
        // for the engine (this test intentionally avoids ensure_started so
        // it stays hermetic on machines without a GPU).
        let fresh = EngineLoader::new();
        assert!(!fresh.is_ready());
        assert!(fresh.ready().is_none());
    }
}
