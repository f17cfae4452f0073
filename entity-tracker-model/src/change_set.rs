use crate::EntityRef;
use entity_tracker_types::EntityTypeId;

/// Entities pending flush, grouped by type.
///
/// Groups keep the order in which their type was first added and instances
/// keep insertion order, so iteration is type-then-instance. A change-set is
/// only valid for the flush cycle it was computed for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    groups: Vec<(EntityTypeId, Vec<EntityRef>)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity to its type's group, opening the group if needed.
    pub fn push(&mut self, entity: EntityRef) {
        let entity_type = entity.entity_type();
        match self.groups.iter_mut().find(|(t, _)| *t == entity_type) {
            Some((_, entities)) => entities.push(entity),
            None => self.groups.push((entity_type, vec![entity])),
        }
    }

    /// Adds a whole group. An empty group is kept but contributes no entities.
    pub fn with_group(mut self, entity_type: EntityTypeId, entities: Vec<EntityRef>) -> Self {
        match self.groups.iter_mut().find(|(t, _)| *t == entity_type) {
            Some((_, existing)) => existing.extend(entities),
            None => self.groups.push((entity_type, entities)),
        }
        self
    }

    /// True when no group holds any entity.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|(_, entities)| entities.is_empty())
    }

    /// Number of entities across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, entities)| entities.len()).sum()
    }

    /// Groups in type order.
    pub fn groups(&self) -> impl Iterator<Item = (EntityTypeId, &[EntityRef])> {
        self.groups.iter().map(|(t, entities)| (*t, entities.as_slice()))
    }

    /// All entities, type-then-instance.
    pub fn iter(&self) -> impl Iterator<Item = &EntityRef> {
        self.groups.iter().flat_map(|(_, entities)| entities.iter())
    }

    pub fn entities_of(&self, entity_type: EntityTypeId) -> &[EntityRef] {
        self.groups
            .iter()
            .find(|(t, _)| *t == entity_type)
            .map(|(_, entities)| entities.as_slice())
            .unwrap_or(&[])
    }
}

impl FromIterator<EntityRef> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = EntityRef>>(iter: I) -> Self {
        let mut change_set = Self::new();
        for entity in iter {
            change_set.push(entity);
        }
        change_set
    }
}

impl IntoIterator for ChangeSet {
    type Item = EntityRef;
    type IntoIter = std::iter::Flatten<
        std::iter::Map<
            std::vec::IntoIter<(EntityTypeId, Vec<EntityRef>)>,
            fn((EntityTypeId, Vec<EntityRef>)) -> Vec<EntityRef>,
        >,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let entities: fn((EntityTypeId, Vec<EntityRef>)) -> Vec<EntityRef> = |(_, e)| e;
        self.groups.into_iter().map(entities).flatten()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a EntityRef;
    type IntoIter = Box<dyn Iterator<Item = &'a EntityRef> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
