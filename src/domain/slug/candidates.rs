// src/domain/slug/candidates.rs

/// Endless, restartable sequence `base`, `base-1`, `base-2`, ...
#[derive(Debug, Clone)]
pub struct CandidateSequence {
    base: String,
    next_suffix: u64,
}

impl CandidateSequence {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            next_suffix: 0,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn restart(&mut self) {
        self.next_suffix = 0;
    }
}

impl Iterator for CandidateSequence {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let candidate = match self.next_suffix {
            0 => self.base.clone(),
            n => format!("{}-{n}", self.base),
        };
        self.next_suffix = self.next_suffix.checked_add(1)?;
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_base_then_numbered_suffixes() {
        let seq = CandidateSequence::new("foo");
        let firsts: Vec<_> = seq.take(4).collect();
        assert_eq!(firsts, ["foo", "foo-1", "foo-2", "foo-3"]);
    }

    #[test]
    fn restart_goes_back_to_base() {
        let mut seq = CandidateSequence::new("bar");
        seq.next();
        seq.next();
        seq.restart();
        assert_eq!(seq.next().as_deref(), Some("bar"));
        assert_eq!(seq.base(), "bar");
    }
}
