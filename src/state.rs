//! Observable state of a resource controller and the outcome of a resolve call

use std::sync::atomic::{AtomicBool, Ordering};

/// Current state of a cache-backed resource
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState<T> {
    /// Nothing requested yet, or the last result was discarded
    Idle,
    /// A network fetch is in flight
    Loading,
    Resolved(T),
    /// The last fetch failed
    NotFound,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        ResourceState::Idle
    }
}

impl<T> ResourceState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, ResourceState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResourceState::Loading)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceState::NotFound)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResourceState::Resolved(data) => Some(data),
            _ => None,
        }
    }

    /// Short label for logging
    pub fn label(&self) -> &'static str {
        match self {
            ResourceState::Idle => "idle",
            ResourceState::Loading => "loading",
            ResourceState::Resolved(_) => "resolved",
            ResourceState::NotFound => "not found",
        }
    }
}

/// Outcome of a single `resolve` call
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    NotFound,
    /// Nothing to publish: another fetch was in flight, the request was not
    /// resolvable, or it failed after a newer request replaced it
    Busy,
    /// Fetched and cached, but a different identifier was requested meanwhile
    /// so the result was not published
    Superseded(T),
}

impl<T> Resolution<T> {
    /// The data, if the call produced any
    pub fn data(&self) -> Option<&T> {
        match self {
            Resolution::Resolved(data) | Resolution::Superseded(data) => Some(data),
            Resolution::NotFound | Resolution::Busy => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resolution::Resolved(data) | Resolution::Superseded(data) => Some(data),
            Resolution::NotFound | Resolution::Busy => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Resolution::Busy)
    }
}

/// Holds a controller's single in-flight slot; releases it on drop
#[derive(Debug)]
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    /// Take the slot, or `None` if another resolution holds it
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
