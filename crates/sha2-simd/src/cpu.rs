//! Runtime CPU capability detection.
//!
//! Detection runs once per process; later queries read the cached result.

use std::sync::OnceLock;

/// Capabilities relevant to the SHA-2 backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuFeatures {
    /// x86 SHA extensions plus the SSE levels the kernel needs.
    pub sha_ni: bool,
    /// x86 AVX2.
    pub avx2: bool,
    /// ARMv8 SHA-256 instructions.
    pub arm_sha2: bool,
    /// ARM Advanced SIMD.
    pub neon: bool,
}

static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

impl CpuFeatures {
    /// Features of the running CPU, detected on first call.
    pub fn get() -> Self {
        *FEATURES.get_or_init(Self::detect)
    }

    /// Probe the CPU without consulting the cache.
    pub fn detect() -> Self {
        #[allow(unused_mut)]
        let mut features = Self::default();

        #[cfg(target_arch = "x86_64")]
        {
            features.sha_ni = std::arch::is_x86_feature_detected!("sha")
                && std::arch::is_x86_feature_detected!("sse2")
                && std::arch::is_x86_feature_detected!("ssse3")
                && std::arch::is_x86_feature_detected!("sse4.1");
            features.avx2 = std::arch::is_x86_feature_detected!("avx2");
        }

        #[cfg(target_arch = "aarch64")]
        {
            features.neon = std::arch::is_aarch64_feature_detected!("neon");
            features.arm_sha2 = features.neon && std::arch::is_aarch64_feature_detected!("sha2");
        }

        features
    }
}
