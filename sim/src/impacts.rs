use std::collections::VecDeque;

use glam::Vec2;

// Number of simultaneously tracked impacts; inserting past this evicts the
// oldest entry.
pub const MAX_IMPACTS: usize = 10;
// Seconds an impact keeps feeding the solver before it expires.
pub const IMPACT_LIFETIME: f64 = 0.25;

// One discrete disturbance event in domain-normalized [0,1]² coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub position: Vec2,
    pub strength: f32,
    pub created_at: f64,
}

// Continuous drag-based disturbance; at most one, toggled by the host.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerSource {
    pub position: Vec2,
    pub active: bool,
}

// Bounded impact collection. Ring semantics: push at the tail, evict the head
// when full. Time is always passed in by the caller, the injector never reads
// a clock.
pub struct ImpactInjector {
    impacts: VecDeque<Impact>,
}

impl ImpactInjector {
    pub fn new() -> Self {
        Self {
            impacts: VecDeque::with_capacity(MAX_IMPACTS),
        }
    }

    // Insert a new impact; the oldest one is dropped when the buffer is full.
    pub fn add(&mut self, position: Vec2, strength: f32, now: f64) {
        self.expire(now);
        if self.impacts.len() == MAX_IMPACTS {
            self.impacts.pop_front();
        }
        self.impacts.push_back(Impact {
            position,
            strength,
            created_at: now,
        });
    }

    // Drop entries whose lifetime has run out.
    pub fn expire(&mut self, now: f64) {
        self.impacts.retain(|i| now - i.created_at < IMPACT_LIFETIME);
    }

    // Impacts that should feed the next solver step. Expiry runs first, so
    // the returned slice is read-only for the whole step.
    pub fn active(&mut self, now: f64) -> &[Impact] {
        self.expire(now);
        self.impacts.make_contiguous()
    }

    pub fn len(&self) -> usize {
        self.impacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }
}

impl Default for ImpactInjector {
    fn default() -> Self {
        Self::new()
    }
}
