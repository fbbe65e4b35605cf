//! Runtime CPU detection and backend dispatch.
//!
//! A [`Dispatcher`] resolves its backends once, when it is built, and keeps
//! the chosen compression function as a plain function pointer. Preference
//! is hardware instructions, then SIMD lanes, then the portable core. SIMD
//! only helps when several messages are hashed together, so single messages
//! never use it and batches hand their remainders to the single-message
//! path.

use std::fmt;
use std::sync::OnceLock;

use logging::{trace_batch, trace_dispatch};

use crate::consts::{SHA224_IV, SHA256_IV, SHA384_IV, SHA512_IV};
use crate::cpu::CpuFeatures;
use crate::digest::{Digest, Digest224, Digest256, Digest384, Digest512};
use crate::error::Sha2Error;
use crate::hw::{self, Compress256Fn};
use crate::pad::{Padded32, Padded64};
use crate::{scalar, simd};

/// Broad class of a compression backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Dedicated SHA instructions, 32-bit family only.
    Hardware,
    /// Several independent messages per vector register.
    Simd,
    /// Portable scalar code.
    General,
}

/// A compression backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// x86 SHA extensions.
    ShaNi,
    /// ARMv8 SHA2 cryptographic extensions.
    ArmSha2,
    /// AVX2 with 8 lanes of 32-bit words or 4 lanes of 64-bit words.
    Avx2,
    /// ARM NEON with 4 lanes of 32-bit words or 2 lanes of 64-bit words.
    Neon,
    /// Portable scalar fallback (1 lane).
    Portable,
}

impl Backend {
    /// Every backend, fastest class first.
    pub const ALL: [Self; 5] = [
        Self::ShaNi,
        Self::ArmSha2,
        Self::Avx2,
        Self::Neon,
        Self::Portable,
    ];

    /// Class of this backend.
    pub const fn kind(self) -> BackendKind {
        match self {
            Self::ShaNi | Self::ArmSha2 => BackendKind::Hardware,
            Self::Avx2 | Self::Neon => BackendKind::Simd,
            Self::Portable => BackendKind::General,
        }
    }

    /// Short lowercase name, as used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShaNi => "sha-ni",
            Self::ArmSha2 => "arm-sha2",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
            Self::Portable => "portable",
        }
    }

    /// Messages hashed per pass for SHA-224/256.
    pub const fn lanes32(self) -> usize {
        match self.simd_engine() {
            Some(engine) => engine.lanes32(),
            None => 1,
        }
    }

    /// Messages hashed per pass for SHA-384/512, or 0 for backends without a
    /// 64-bit-family implementation.
    pub const fn lanes64(self) -> usize {
        match (self.kind(), self.simd_engine()) {
            (BackendKind::Hardware, _) => 0,
            (_, Some(engine)) => engine.lanes64(),
            (_, None) => 1,
        }
    }

    /// Whether the running CPU can execute this backend.
    pub fn is_available(self) -> bool {
        match (self.simd_engine(), self.hw_engine()) {
            (Some(engine), _) => engine.is_available(),
            (_, Some(engine)) => engine.is_available(),
            (None, None) => true,
        }
    }

    const fn simd_engine(self) -> Option<simd::Engine> {
        match self {
            Self::Avx2 => Some(simd::Engine::Avx2),
            Self::Neon => Some(simd::Engine::Neon),
            _ => None,
        }
    }

    const fn hw_engine(self) -> Option<hw::Engine> {
        match self {
            Self::ShaNi => Some(hw::Engine::ShaNi),
            Self::ArmSha2 => Some(hw::Engine::ArmSha2),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which backend classes a [`Dispatcher`] may select.
///
/// A policy only changes the execution path; every policy produces the same
/// digests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DispatchPolicy {
    /// Allow SHA instruction backends.
    pub allow_hardware: bool,
    /// Allow multi-lane SIMD backends for batches.
    pub allow_simd: bool,
}

impl DispatchPolicy {
    /// Allow every backend the CPU supports.
    pub const fn all() -> Self {
        Self {
            allow_hardware: true,
            allow_simd: true,
        }
    }

    /// Force the portable backend.
    pub const fn portable() -> Self {
        Self {
            allow_hardware: false,
            allow_simd: false,
        }
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::all()
    }
}

/// The backends a dispatcher resolved, per family and call shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActiveBackends {
    /// Single SHA-224/256 messages.
    pub sha256: Backend,
    /// Batched SHA-224/256 messages.
    pub sha256_batch: Backend,
    /// Single SHA-384/512 messages.
    pub sha512: Backend,
    /// Batched SHA-384/512 messages.
    pub sha512_batch: Backend,
}

/// Dispatcher that selects the fastest available backends at runtime.
#[derive(Clone, Copy)]
pub struct Dispatcher {
    policy: DispatchPolicy,
    backends: ActiveBackends,
    compress256: Compress256Fn,
    simd32: Option<simd::Engine>,
    simd64: Option<simd::Engine>,
}

impl Dispatcher {
    /// Detect CPU features and select the best available backends.
    pub fn detect() -> Self {
        Self::with_policy(DispatchPolicy::default())
    }

    /// Detect CPU features, selecting only among backends `policy` allows.
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        let features = CpuFeatures::get();
        trace_dispatch!(
            sha_ni = features.sha_ni,
            avx2 = features.avx2,
            arm_sha2 = features.arm_sha2,
            neon = features.neon,
            "detected CPU features"
        );

        let hardware = if policy.allow_hardware {
            Backend::ALL.into_iter().find_map(|backend| {
                backend
                    .hw_engine()
                    .and_then(hw::Engine::compress256)
                    .map(|compress| (backend, compress))
            })
        } else {
            None
        };
        let vector = if policy.allow_simd {
            Backend::ALL
                .into_iter()
                .find(|backend| backend.kind() == BackendKind::Simd && backend.is_available())
        } else {
            None
        };

        let portable: Compress256Fn = scalar::compress256_blocks;
        let (sha256, compress256) = hardware.unwrap_or((Backend::Portable, portable));
        let simd32 = if hardware.is_some() {
            None
        } else {
            vector.and_then(Backend::simd_engine)
        };
        let simd64 = vector.and_then(Backend::simd_engine);

        let backends = ActiveBackends {
            sha256,
            sha256_batch: if simd32.is_some() {
                vector.unwrap_or(sha256)
            } else {
                sha256
            },
            sha512: Backend::Portable,
            sha512_batch: vector.unwrap_or(Backend::Portable),
        };
        trace_dispatch!(
            sha256 = %backends.sha256,
            sha256_batch = %backends.sha256_batch,
            sha512 = %backends.sha512,
            sha512_batch = %backends.sha512_batch,
            "selected backends"
        );

        Self {
            policy,
            backends,
            compress256,
            simd32,
            simd64,
        }
    }

    /// The policy this dispatcher was built with.
    pub const fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// The backends selected for each family.
    pub const fn backends(&self) -> ActiveBackends {
        self.backends
    }

    /// SHA-224 of one message.
    pub fn hash224(&self, message: &[u8]) -> Digest224 {
        Digest::from_state32(&state32_using(self.compress256, SHA224_IV, message))
    }

    /// SHA-256 of one message.
    pub fn hash256(&self, message: &[u8]) -> Digest256 {
        Digest::from_state32(&state32_using(self.compress256, SHA256_IV, message))
    }

    /// SHA-384 of one message.
    pub fn hash384(&self, message: &[u8]) -> Digest384 {
        Digest::from_state64(&state64(SHA384_IV, message))
    }

    /// SHA-512 of one message.
    pub fn hash512(&self, message: &[u8]) -> Digest512 {
        Digest::from_state64(&state64(SHA512_IV, message))
    }

    /// SHA-224 of every input, in input order.
    pub fn hash224_batch<T: AsRef<[u8]>>(&self, inputs: &[T]) -> Vec<Digest224> {
        self.batch32(&SHA224_IV, inputs)
            .iter()
            .map(Digest::from_state32)
            .collect()
    }

    /// SHA-256 of every input, in input order.
    pub fn hash256_batch<T: AsRef<[u8]>>(&self, inputs: &[T]) -> Vec<Digest256> {
        self.batch32(&SHA256_IV, inputs)
            .iter()
            .map(Digest::from_state32)
            .collect()
    }

    /// SHA-384 of every input, in input order.
    pub fn hash384_batch<T: AsRef<[u8]>>(&self, inputs: &[T]) -> Vec<Digest384> {
        self.batch64(&SHA384_IV, inputs)
            .iter()
            .map(Digest::from_state64)
            .collect()
    }

    /// SHA-512 of every input, in input order.
    pub fn hash512_batch<T: AsRef<[u8]>>(&self, inputs: &[T]) -> Vec<Digest512> {
        self.batch64(&SHA512_IV, inputs)
            .iter()
            .map(Digest::from_state64)
            .collect()
    }

    fn batch32<T: AsRef<[u8]>>(&self, iv: &[u32; 8], inputs: &[T]) -> Vec<[u32; 8]> {
        let messages: Vec<&[u8]> = inputs.iter().map(AsRef::as_ref).collect();
        let single = |message: &[u8]| state32_using(self.compress256, *iv, message);
        match self.simd32 {
            Some(engine) => run_batch(
                &messages,
                engine.lanes32(),
                |group, out| simd::hash32_group(engine, iv, group, out),
                single,
            ),
            None => messages.iter().map(|&message| single(message)).collect(),
        }
    }

    fn batch64<T: AsRef<[u8]>>(&self, iv: &[u64; 8], inputs: &[T]) -> Vec<[u64; 8]> {
        let messages: Vec<&[u8]> = inputs.iter().map(AsRef::as_ref).collect();
        let single = |message: &[u8]| state64(*iv, message);
        match self.simd64 {
            Some(engine) => run_batch(
                &messages,
                engine.lanes64(),
                |group, out| simd::hash64_group(engine, iv, group, out),
                single,
            ),
            None => messages.iter().map(|&message| single(message)).collect(),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::detect()
    }
}

/// Global dispatcher instance, initialized on first use.
pub fn global() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(Dispatcher::detect)
}

/// Hash whole groups of `lanes` messages with `group`, and everything else
/// (a trailing partial group, or a group `group` refused) with `single`.
fn run_batch<W: Copy + Default>(
    messages: &[&[u8]],
    lanes: usize,
    mut group: impl FnMut(&[&[u8]], &mut [[W; 8]]) -> bool,
    mut single: impl FnMut(&[u8]) -> [W; 8],
) -> Vec<[W; 8]> {
    let mut out = vec![[W::default(); 8]; messages.len()];
    let mut groups = messages.chunks_exact(lanes);
    let mut slots = out.chunks_exact_mut(lanes);

    for (chunk, slot) in (&mut groups).zip(&mut slots) {
        if !group(chunk, slot) {
            for (&message, state) in chunk.iter().zip(slot.iter_mut()) {
                *state = single(message);
            }
        }
    }

    let remainder = groups.remainder();
    trace_batch!(
        inputs = messages.len(),
        lanes,
        groups = messages.len() / lanes,
        remainder = remainder.len(),
        "hashed batch"
    );
    for (&message, state) in remainder.iter().zip(slots.into_remainder()) {
        *state = single(message);
    }

    out
}

fn state32_using(compress: Compress256Fn, iv: [u32; 8], message: &[u8]) -> [u32; 8] {
    let padded = Padded32::new(message);
    let mut state = iv;
    compress(&mut state, padded.full_blocks());
    compress(&mut state, padded.tail_blocks());
    state
}

fn state64(iv: [u64; 8], message: &[u8]) -> [u64; 8] {
    let padded = Padded64::new(message);
    let mut state = iv;
    scalar::compress512_blocks(&mut state, padded.full_blocks());
    scalar::compress512_blocks(&mut state, padded.tail_blocks());
    state
}

fn batch32_with(
    backend: Backend,
    iv: &[u32; 8],
    messages: &[&[u8]],
) -> Result<Vec<[u32; 8]>, Sha2Error> {
    let unavailable = || Sha2Error::BackendUnavailable { backend };
    if !backend.is_available() {
        return Err(unavailable());
    }

    if let Some(engine) = backend.simd_engine() {
        let lanes = engine.lanes32();
        let mut out = vec![[0u32; 8]; messages.len()];
        for (group, slot) in messages.chunks(lanes).zip(out.chunks_mut(lanes)) {
            if !simd::hash32_group(engine, iv, group, slot) {
                return Err(unavailable());
            }
        }
        return Ok(out);
    }

    let compress: Compress256Fn = match backend.hw_engine() {
        Some(engine) => engine.compress256().ok_or_else(unavailable)?,
        None => scalar::compress256_blocks,
    };
    Ok(messages
        .iter()
        .map(|message| state32_using(compress, *iv, message))
        .collect())
}

fn batch64_with(
    backend: Backend,
    bits: usize,
    iv: &[u64; 8],
    messages: &[&[u8]],
) -> Result<Vec<[u64; 8]>, Sha2Error> {
    if backend.kind() == BackendKind::Hardware {
        return Err(Sha2Error::UnsupportedFamily { backend, bits });
    }
    let unavailable = || Sha2Error::BackendUnavailable { backend };
    if !backend.is_available() {
        return Err(unavailable());
    }

    if let Some(engine) = backend.simd_engine() {
        let lanes = engine.lanes64();
        let mut out = vec![[0u64; 8]; messages.len()];
        for (group, slot) in messages.chunks(lanes).zip(out.chunks_mut(lanes)) {
            if !simd::hash64_group(engine, iv, group, slot) {
                return Err(unavailable());
            }
        }
        return Ok(out);
    }

    Ok(messages
        .iter()
        .map(|message| state64(*iv, message))
        .collect())
}

fn as_messages<T: AsRef<[u8]>>(inputs: &[T]) -> Vec<&[u8]> {
    inputs.iter().map(AsRef::as_ref).collect()
}

/// SHA-224 of `message` on exactly `backend`.
///
/// SIMD backends hash the message in one lane and fill the others with
/// empty messages.
pub fn hash224_with(backend: Backend, message: &[u8]) -> Result<Digest224, Sha2Error> {
    let states = batch32_with(backend, &SHA224_IV, &[message])?;
    Ok(Digest::from_state32(&states[0]))
}

/// SHA-256 of `message` on exactly `backend`.
pub fn hash256_with(backend: Backend, message: &[u8]) -> Result<Digest256, Sha2Error> {
    let states = batch32_with(backend, &SHA256_IV, &[message])?;
    Ok(Digest::from_state32(&states[0]))
}

/// SHA-384 of `message` on exactly `backend`.
///
/// Hardware backends return [`Sha2Error::UnsupportedFamily`].
pub fn hash384_with(backend: Backend, message: &[u8]) -> Result<Digest384, Sha2Error> {
    let states = batch64_with(backend, 384, &SHA384_IV, &[message])?;
    Ok(Digest::from_state64(&states[0]))
}

/// SHA-512 of `message` on exactly `backend`.
pub fn hash512_with(backend: Backend, message: &[u8]) -> Result<Digest512, Sha2Error> {
    let states = batch64_with(backend, 512, &SHA512_IV, &[message])?;
    Ok(Digest::from_state64(&states[0]))
}

/// SHA-224 of every input on exactly `backend`, in input order.
///
/// A trailing partial SIMD group is padded with empty messages rather than
/// handed to another backend.
pub fn hash224_batch_with<T: AsRef<[u8]>>(
    backend: Backend,
    inputs: &[T],
) -> Result<Vec<Digest224>, Sha2Error> {
    let states = batch32_with(backend, &SHA224_IV, &as_messages(inputs))?;
    Ok(states.iter().map(Digest::from_state32).collect())
}

/// SHA-256 of every input on exactly `backend`, in input order.
pub fn hash256_batch_with<T: AsRef<[u8]>>(
    backend: Backend,
    inputs: &[T],
) -> Result<Vec<Digest256>, Sha2Error> {
    let states = batch32_with(backend, &SHA256_IV, &as_messages(inputs))?;
    Ok(states.iter().map(Digest::from_state32).collect())
}

/// SHA-384 of every input on exactly `backend`, in input order.
pub fn hash384_batch_with<T: AsRef<[u8]>>(
    backend: Backend,
    inputs: &[T],
) -> Result<Vec<Digest384>, Sha2Error> {
    let states = batch64_with(backend, 384, &SHA384_IV, &as_messages(inputs))?;
    Ok(states.iter().map(Digest::from_state64).collect())
}

/// SHA-512 of every input on exactly `backend`, in input order.
pub fn hash512_batch_with<T: AsRef<[u8]>>(
    backend: Backend,
    inputs: &[T],
) -> Result<Vec<Digest512>, Sha2Error> {
    let states = batch64_with(backend, 512, &SHA512_IV, &as_messages(inputs))?;
    Ok(states.iter().map(Digest::from_state64).collect())
}
