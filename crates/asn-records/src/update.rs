use asn_core::ID;
use asn_core::Unique;

/// A proposed write to one record, carrying the stored pre-image.
///
/// Hooks decide whether they fire by comparing the two sides; the store
/// uses `original` as the expected row when committing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update<T> {
    original: T,
    proposed: T,
}

impl<T> Update<T> {
    pub fn new(original: T, proposed: T) -> Self {
        Self { original, proposed }
    }
    pub fn original(&self) -> &T {
        &self.original
    }
    pub fn proposed(&self) -> &T {
        &self.proposed
    }
    pub fn into_proposed(self) -> T {
        self.proposed
    }
    /// Whether a watched field differs between the two sides.
    pub fn changed<F, V>(&self, field: F) -> bool
    where
        F: Fn(&T) -> V,
        V: PartialEq,
    {
        field(&self.original) != field(&self.proposed)
    }
    /// Whether a flag went from false to true.
    pub fn rose<F>(&self, flag: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        !flag(&self.original) && flag(&self.proposed)
    }
    /// Whether a flag went from true to false.
    pub fn fell<F>(&self, flag: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        flag(&self.original) && !flag(&self.proposed)
    }
}

impl<T> Update<T>
where
    T: PartialEq,
{
    pub fn is_noop(&self) -> bool {
        self.original == self.proposed
    }
}

impl<T> Update<T>
where
    T: Unique,
{
    pub fn id(&self) -> ID<T> {
        self.proposed.id()
    }
}
