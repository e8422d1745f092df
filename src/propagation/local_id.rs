/// A propagator-local identifier for one of the variables it watches. The
/// propagator assigns these at registration time and receives them back in
/// [`Propagator::notify`] to identify which of its variables changed.
///
/// [`Propagator::notify`]: super::Propagator::notify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalId(u32);

impl LocalId {
    pub const fn from(value: u32) -> Self {
        LocalId(value)
    }

    pub fn unpack(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for LocalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
