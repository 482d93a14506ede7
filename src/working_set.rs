use crate::error::KernelError;
use crate::id::UnitsObjectId;
use crate::objects::UnitsObject;

/// The objects supplied alongside an instruction.
///
/// Lookups are a linear scan by exact identifier; the set never holds more than
/// `MAX_OBJECTS` entries so no index is kept. Duplicate identifiers are not
/// rejected here, the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    objects: Vec<UnitsObject>,
}

impl WorkingSet {
    pub fn new(objects: Vec<UnitsObject>) -> Self {
        Self { objects }
    }

    /// Find an object by identifier
    pub fn find(&self, id: &UnitsObjectId) -> Option<&UnitsObject> {
        self.objects.iter().find(|object| object.id == *id)
    }

    /// Find an object the selected operation cannot proceed without
    pub fn require(&self, id: &UnitsObjectId) -> Result<&UnitsObject, KernelError> {
        self.find(id)
            .ok_or_else(|| KernelError::invalid_params(format!("object {} not in working set", id)))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitsObject> {
        self.objects.iter()
    }
}

impl From<Vec<UnitsObject>> for WorkingSet {
    fn from(objects: Vec<UnitsObject>) -> Self {
        Self::new(objects)
    }
}

impl FromIterator<UnitsObject> for WorkingSet {
    fn from_iter<I: IntoIterator<Item = UnitsObject>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
