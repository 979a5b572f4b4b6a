//! Generation-counter cancellation.
//!
//! A `TokenSource` hands out `CancelToken`s. Only the most recently issued token is current;
//! issuing a new one or calling `invalidate` retires every earlier token for good, because the
//! counter only moves forward.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelToken {
    generation: u64,
}

impl CancelToken {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct TokenSource {
    generation: u64,
}

impl TokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> CancelToken {
        self.generation = self.generation.wrapping_add(1);
        CancelToken {
            generation: self.generation,
        }
    }

    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_current(&self, token: CancelToken) -> bool {
        self.is_current_generation(token.generation)
    }

    /// Same check for a generation that travelled through the dispatch bus.
    pub fn is_current_generation(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
