use crc32fast::Hasher;

/// Derive a stable seed from a canvas id using CRC32.
pub fn canvas_seed(canvas_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(canvas_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential instance id generator, seeded per canvas.
///
/// Ids look like `3f2a91c4-7` and are never reused within a session: the
/// counter only moves forward, and loading a document advances it past
/// every id the document already carries.
#[derive(Debug, Clone)]
pub struct InstanceIdGenerator {
    seed: String,
    count: u32,
}

impl InstanceIdGenerator {
    pub fn new(canvas_id: &str) -> Self {
        Self {
            seed: canvas_seed(canvas_id),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next id.
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    /// Make sure future ids never collide with an existing one. Called for
    /// every instance id found in a loaded document.
    pub fn advance_past(&mut self, id: &str) {
        if let Some(counter) = id
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u32>().ok())
        {
            self.count = self.count.max(counter);
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_canvas_same_seed() {
        assert_eq!(canvas_seed("canvas-1"), canvas_seed("canvas-1"));
        assert_ne!(canvas_seed("canvas-1"), canvas_seed("canvas-2"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = InstanceIdGenerator::new("canvas-1");
        let a = gen.new_id();
        let b = gen.new_id();

        assert!(a.ends_with("-1"));
        assert!(b.ends_with("-2"));
        assert!(a.starts_with(gen.seed()));
    }

    #[test]
    fn test_advance_past_loaded_ids() {
        let mut gen = InstanceIdGenerator::new("canvas-1");
        let seed = gen.seed().to_string();

        gen.advance_past(&format!("{seed}-9"));
        assert_eq!(gen.new_id(), format!("{seed}-10"));

        // Foreign ids (different seed) are ignored.
        gen.advance_past("deadbeef-99");
        assert_eq!(gen.new_id(), format!("{seed}-11"));
    }
}
