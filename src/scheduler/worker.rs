//! Worker threads and their completion-state protocol.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use glam::Vec2;

use super::partition::WorkChunk;
use crate::noise::{height_to_u16, sample_height, HeightProfile};
use crate::terrain::GenerationParams;

/// Lifecycle of one worker, stored as an atomic byte.
///
/// A worker only ever advances itself to `ProcessingDone`; the final `Done`
/// transition belongs to the dispatcher, after the join. The two-phase
/// signal keeps a worker from ever being marked joined while its thread is
/// still winding down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    Idle = 0,
    Processing,
    ProcessingDone,
    Done,
}

impl WorkerState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => WorkerState::Idle,
            1 => WorkerState::Processing,
            2 => WorkerState::ProcessingDone,
            3 => WorkerState::Done,
            _ => unreachable!("invalid worker state {raw}"),
        }
    }
}

/// Samples every coordinate of a chunk, in chunk order.
///
/// Pure function of its inputs: the single- and multi-threaded generation
/// paths both run exactly this, which is what keeps them bit-identical.
pub fn sample_chunk(
    profile: HeightProfile,
    seed: u32,
    params: &GenerationParams,
    chunk: &WorkChunk,
) -> Vec<u16> {
    chunk
        .iter()
        .map(|&(x, y)| {
            let pos = Vec2::new(x as f32, y as f32) * params.scale;
            height_to_u16(sample_height(profile, seed, pos, params))
        })
        .collect()
}

/// One launched worker: its chunk, completion flag, and thread handle.
///
/// The thread starts immediately on construction, reports through the
/// atomic state, and hands its samples back through the join.
pub struct WorkerHandle {
    chunk: Arc<WorkChunk>,
    state: Arc<AtomicU8>,
    thread: Option<JoinHandle<Vec<u16>>>,
}

impl WorkerHandle {
    /// Launches a worker over the given chunk.
    pub fn spawn(
        profile: HeightProfile,
        seed: u32,
        params: GenerationParams,
        chunk: WorkChunk,
    ) -> Self {
        let chunk = Arc::new(chunk);
        let state = Arc::new(AtomicU8::new(WorkerState::Processing as u8));

        let thread_chunk = Arc::clone(&chunk);
        let thread_state = Arc::clone(&state);
        let thread = thread::spawn(move || {
            let samples = sample_chunk(profile, seed, &params, &thread_chunk);
            thread_state.store(WorkerState::ProcessingDone as u8, Ordering::Release);
            samples
        });

        Self {
            chunk,
            state,
            thread: Some(thread),
        }
    }

    /// The coordinates this worker is sampling.
    pub fn chunk(&self) -> &WorkChunk {
        &self.chunk
    }

    /// Reads the worker's current state.
    pub fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Joins the worker thread, returns its samples, and marks the handle
    /// `Done`. Returns `None` if the handle was already joined.
    ///
    /// Callers must wait for `ProcessingDone` before joining; joining a
    /// still-processing worker would block the polling thread.
    pub fn join(&mut self) -> Option<Vec<u16>> {
        let thread = self.thread.take()?;
        let samples = thread.join().expect("height worker panicked");
        self.state.store(WorkerState::Done as u8, Ordering::Release);
        Some(samples)
    }
}
