/// Describes what every collection in this crate is, at minimum: a thing
/// holding some number of elements which can be emptied out.
pub trait Container {
    /// The number of elements stored right now.
    fn len(&self) -> usize;

    /// Whether there is nothing stored at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every element. Backing buffers may be kept around for reuse.
    fn clear(&mut self);
}
