use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::config::MapConfig;

/// Staggered repeating start times for marker animations. Marker `i` first
/// starts `interval * i` ms after the schedule begins and then every
/// `repeat_interval` ms. Owns no timers; callers drive their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSchedule {
    pub interval_ms: u64,
    pub repeat_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerTiming {
    pub first_start_ms: u64,
    pub repeat_ms: u64,
}

impl MarkerTiming {
    fn next_after(&self, start_ms: u64) -> Option<u64> {
        if self.repeat_ms == 0 {
            return None;
        }
        start_ms.checked_add(self.repeat_ms)
    }
}

impl From<&MapConfig> for AnimationSchedule {
    fn from(cfg: &MapConfig) -> Self {
        Self {
            interval_ms: cfg.animation_interval_ms,
            repeat_interval_ms: cfg.animation_repeat_interval_ms,
        }
    }
}

impl AnimationSchedule {
    pub fn timing(&self, index: usize) -> MarkerTiming {
        MarkerTiming {
            first_start_ms: self.interval_ms.saturating_mul(index as u64),
            repeat_ms: self.repeat_interval_ms,
        }
    }

    /// Every start time of marker `index` strictly before `until_ms`, lazily.
    pub fn starts_before(
        &self,
        index: usize,
        until_ms: u64,
    ) -> impl Iterator<Item = u64> + use<> {
        let timing = self.timing(index);
        std::iter::successors(Some(timing.first_start_ms), move |&s| timing.next_after(s))
            .take_while(move |&s| s < until_ms)
    }

    /// Start times of markers `0..count` before `until_ms`, merged in time
    /// order as `(index, start_ms)`. Ties come out in marker order.
    pub fn merged_starts(&self, count: usize, until_ms: u64) -> MergedStarts {
        let mut streams: Vec<Box<dyn Iterator<Item = u64>>> = Vec::with_capacity(count);
        let mut heap = BinaryHeap::with_capacity(count);
        for index in 0..count {
            let mut stream = self.starts_before(index, until_ms);
            if let Some(start_ms) = stream.next() {
                heap.push(Reverse((start_ms, index)));
            }
            streams.push(Box::new(stream));
        }
        MergedStarts { streams, heap }
    }
}

/// Lazy k-way merge over per-marker start times; holds one pending start per
/// marker.
pub struct MergedStarts {
    streams: Vec<Box<dyn Iterator<Item = u64>>>,
    heap: BinaryHeap<Reverse<(u64, usize)>>,
}

impl Iterator for MergedStarts {
    type Item = (usize, u64);

    fn next(&mut self) -> Option<Self::Item> {
        let Reverse((start_ms, index)) = self.heap.pop()?;
        if let Some(next) = self.streams[index].next() {
            self.heap.push(Reverse((next, index)));
        }
        Some((index, start_ms))
    }
}
