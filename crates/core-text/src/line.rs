/// One line of text without its terminator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a line from `bytes`, keeping at most `max` of them. Returns the line and
    /// whether anything was cut.
    pub(crate) fn truncated(bytes: &[u8], max: usize) -> (Self, bool) {
        let keep = bytes.len().min(max);
        (
            Self {
                bytes: bytes[..keep].to_vec(),
            },
            keep < bytes.len(),
        )
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn insert(&mut self, at: usize, b: u8) {
        self.bytes.insert(at, b);
    }

    pub(crate) fn remove(&mut self, at: usize) -> u8 {
        self.bytes.remove(at)
    }

    /// Cut the line at `at`; `self` keeps the prefix, the suffix is returned.
    pub(crate) fn split_off(&mut self, at: usize) -> Line {
        Line {
            bytes: self.bytes.split_off(at),
        }
    }

    pub(crate) fn append(&mut self, other: &Line) {
        self.bytes.extend_from_slice(&other.bytes);
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
