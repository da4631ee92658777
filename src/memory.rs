//! Best-effort process memory reporting.
//!
//! The success summary prints the resident set size so large runs can
//! confirm the transform really streams instead of buffering the matrix.

/// Resident set size of the current process at a point in time.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemorySnapshot {
    pub rss_bytes: u64,
}

impl MemorySnapshot {
    /// Capture the current RSS. Platform specific and best-effort: on
    /// unsupported platforms this reports zero rather than failing.
    pub fn capture() -> Self {
        #[cfg(target_os = "linux")]
        {
            Self::capture_linux()
        }

        #[cfg(target_os = "macos")]
        {
            Self::capture_macos()
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            Self::default()
        }
    }

    #[cfg(target_os = "linux")]
    fn capture_linux() -> Self {
        // /proc/self/statm reports sizes in pages: size resident shared ...
        let page_size = 4096u64;
        let rss_pages = std::fs::read_to_string("/proc/self/statm")
            .ok()
            .and_then(|statm| statm.split_whitespace().nth(1)?.parse::<u64>().ok())
            .unwrap_or(0);
        Self {
            rss_bytes: rss_pages * page_size,
        }
    }

    #[cfg(target_os = "macos")]
    fn capture_macos() -> Self {
        use std::process::Command;

        // ps reports RSS in kilobytes
        let rss_kb = Command::new("ps")
            .args(["-o", "rss=", "-p", &std::process::id().to_string()])
            .output()
            .ok()
            .and_then(|out| {
                String::from_utf8_lossy(&out.stdout)
                    .trim()
                    .parse::<u64>()
                    .ok()
            })
            .unwrap_or(0);
        Self {
            rss_bytes: rss_kb * 1024,
        }
    }

    /// Resident set size in MiB.
    pub fn rss_mib(&self) -> f64 {
        self.rss_bytes as f64 / (1024.0 * 1024.0)
    }
}
