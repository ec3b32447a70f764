use crate::models::HealthRes;

/// Liveness check for the drive API
///
/// Reports only that the process is serving requests. It never calls the remote drive, so a
/// logged-out server or an unreachable provider still reports healthy.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    ///
    /// # Returns
    /// A new `HealthService` instance.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance
    ///
    /// Handlers call this directly; no session or credential is needed.
    ///
    /// # Returns
    /// A `HealthRes` with `ok` set and the API's greeting message.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Drive API is alive".into(),
        }
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::new()
    }
}
