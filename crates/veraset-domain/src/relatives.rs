//! Incrementally built heir set
//!
//! The collection is an index from person id to entry. Each entry keeps a back
//! reference to the entry it was attached beneath plus the ordered ids of its own
//! descendants, so attaching and cascading deletes never search the tree.
//!
//! Every mutation consults the degree resolver before touching state and leaves the
//! collection unchanged when it fails.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::eligibility::{self, DegreeEligibility};
use crate::entities::{Lineage, MarriageInfo, Person, Relation};
use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{Branch, Degree, GrandparentRole, ParentSide, PersonId};

/// Grandparent slots per branch
pub const MAX_GRANDPARENTS_PER_BRANCH: usize = 2;

/// One recorded relative
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub person: Person,
    pub relation: Relation,
    /// Entry this one was attached beneath
    pub parent: Option<PersonId>,
    /// Descendants attached beneath this entry, in insertion order
    pub children: Vec<PersonId>,
    /// The relative's own spouse, never an heir of the deceased
    pub spouse: Option<Person>,
}

/// Mutable, UI-side accumulator of the heir set
#[derive(Debug, Clone, Default)]
pub struct RelativeCollection {
    entries: HashMap<PersonId, Entry>,
    spouse: Option<PersonId>,
    children: Vec<PersonId>,
    mother: Option<PersonId>,
    father: Option<PersonId>,
    grandparents: BTreeMap<(Branch, GrandparentRole), PersonId>,
    /// Spouse id of a relative -> id of that relative
    partners: HashMap<PersonId, PersonId>,
}

impl RelativeCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the spouse of the deceased
    pub fn add_spouse(&mut self, mut person: Person) -> DomainResult<()> {
        if self.spouse.is_some() {
            return Err(DomainError::DuplicateSpouse);
        }
        if person.marriage_info.is_none() {
            person.marriage_info = Some(MarriageInfo::current());
        }
        let id = self.insert(person, Relation::Spouse, None)?;
        self.spouse = Some(id);
        Ok(())
    }

    /// Record a child of the deceased, or a descendant of a deceased descendant
    pub fn add_child(&mut self, person: Person, parent_id: Option<&PersonId>) -> DomainResult<()> {
        self.resolve().ensure(Degree::First)?;

        match parent_id {
            None => {
                let id = self.insert(person, Relation::Child, None)?;
                self.children.push(id);
            }
            Some(parent_id) => {
                self.require_deceased_anchor(parent_id, |lineage| {
                    lineage == Lineage::Descendants
                })?;
                self.insert(person, Relation::Descendant, Some(parent_id.clone()))?;
            }
        }
        Ok(())
    }

    /// Record the mother or father of the deceased
    pub fn add_parent(&mut self, side: ParentSide, person: Person) -> DomainResult<()> {
        self.resolve().ensure(Degree::Second)?;

        if self.parent_slot(side).is_some() {
            return Err(DomainError::SlotOccupied {
                slot: side.to_string(),
            });
        }
        let id = self.insert(person, Relation::Parent { side }, None)?;
        *self.parent_slot_mut(side) = Some(id);
        Ok(())
    }

    /// Record a grandparent on one branch
    pub fn add_grandparent(
        &mut self,
        branch: Branch,
        role: GrandparentRole,
        person: Person,
    ) -> DomainResult<()> {
        self.resolve().ensure(Degree::Third)?;

        if self.grandparent_count(branch) >= MAX_GRANDPARENTS_PER_BRANCH {
            return Err(DomainError::CapacityExceeded {
                branch,
                max: MAX_GRANDPARENTS_PER_BRANCH,
            });
        }
        if self.grandparents.contains_key(&(branch, role)) {
            return Err(DomainError::SlotOccupied {
                slot: format!("{branch} {role}"),
            });
        }
        let id = self.insert(person, Relation::Grandparent { branch, role }, None)?;
        self.grandparents.insert((branch, role), id);
        Ok(())
    }

    /// Attach a descendant beneath a deceased ascendant-line relative
    ///
    /// Beneath a parent this records a sibling of the deceased, beneath a grandparent
    /// an uncle or aunt, beneath either of those a nephew, niece or cousin.
    pub fn add_sibling_or_cousin(&mut self, anchor_id: &PersonId, person: Person) -> DomainResult<()> {
        let lineage = self.require_deceased_anchor(anchor_id, |lineage| {
            matches!(lineage, Lineage::Parent(_) | Lineage::Grandparent(_))
        })?;
        if let Some(degree) = lineage.degree() {
            self.resolve().ensure(degree)?;
        }

        let relation = match self.entries.get(anchor_id).map(|entry| entry.relation) {
            Some(Relation::Grandparent { branch, .. }) => Relation::UncleAunt { branch },
            _ => Relation::Descendant,
        };
        self.insert(person, relation, Some(anchor_id.clone()))?;
        Ok(())
    }

    /// Record the spouse of a relative, e.g. the widow of a deceased child
    pub fn add_spouse_of(&mut self, relative_id: &PersonId, mut person: Person) -> DomainResult<()> {
        self.ensure_new_id(&person.id)?;
        let entry = self.entry_mut(relative_id)?;
        if entry.relation == Relation::Spouse {
            return Err(DomainError::InvalidPerson {
                field: "spouse".to_string(),
                reason: "The spouse of the deceased cannot have a recorded spouse".to_string(),
            });
        }
        if entry.spouse.is_some() {
            return Err(DomainError::SlotOccupied {
                slot: format!("spouse of {}", entry.person.name),
            });
        }
        if person.marriage_info.is_none() {
            person.marriage_info = Some(MarriageInfo::current());
        }
        let spouse_id = person.id.clone();
        entry.spouse = Some(person);
        self.partners.insert(spouse_id.clone(), relative_id.clone());
        debug!(id = %spouse_id, relative = %relative_id, "Added spouse of relative");
        Ok(())
    }

    /// Remove a person together with every descendant recorded beneath them
    pub fn remove(&mut self, id: &PersonId) -> DomainResult<Vec<Person>> {
        if let Some(relative_id) = self.partners.remove(id) {
            let spouse = self
                .entries
                .get_mut(&relative_id)
                .and_then(|entry| entry.spouse.take());
            return Ok(spouse.into_iter().collect());
        }

        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| DomainError::PersonNotFound { id: id.to_string() })?;

        let (parent, relation) = (entry.parent.clone(), entry.relation);

        match (parent, relation) {
            (Some(parent_id), _) => {
                if let Some(parent) = self.entries.get_mut(&parent_id) {
                    parent.children.retain(|child| child != id);
                }
            }
            (None, Relation::Spouse) => self.spouse = None,
            (None, Relation::Child) => self.children.retain(|child| child != id),
            (None, Relation::Parent { side }) => *self.parent_slot_mut(side) = None,
            (None, Relation::Grandparent { branch, role }) => {
                self.grandparents.remove(&(branch, role));
            }
            (None, Relation::UncleAunt { .. } | Relation::Descendant) => {}
        }

        let mut removed = Vec::new();
        let mut pending = vec![id.clone()];
        while let Some(next) = pending.pop() {
            if let Some(entry) = self.entries.remove(&next) {
                pending.extend(entry.children.iter().cloned());
                if let Some(spouse) = entry.spouse {
                    self.partners.remove(&spouse.id);
                    removed.push(spouse);
                }
                removed.push(entry.person);
            }
        }
        debug!(id = %id, removed = removed.len(), "Removed relative subtree");
        Ok(removed)
    }

    /// Change a person's display name
    pub fn rename(&mut self, id: &PersonId, name: impl Into<String>) -> DomainResult<()> {
        if let Some(spouse) = self.partner_mut(id) {
            return spouse.rename(name);
        }
        let entry = self.entry_mut(id)?;
        entry.person.rename(name)
    }

    /// Change a person's life status
    ///
    /// A person who has descendants recorded beneath them cannot be marked alive:
    /// living heirs block representation of their line.
    pub fn set_alive(&mut self, id: &PersonId, is_alive: bool) -> DomainResult<()> {
        if let Some(spouse) = self.partner_mut(id) {
            spouse.is_alive = is_alive;
            return Ok(());
        }
        let entry = self.entry_mut(id)?;
        if is_alive && !entry.children.is_empty() {
            return Err(DomainError::LivingAncestor { id: id.to_string() });
        }
        entry.person.is_alive = is_alive;
        Ok(())
    }

    /// Current degree eligibility, recomputed on every call
    pub fn resolve(&self) -> DegreeEligibility {
        eligibility::resolve(self)
    }

    pub fn get(&self, id: &PersonId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &PersonId) -> bool {
        self.entries.contains_key(id) || self.partners.contains_key(id)
    }

    pub fn spouse(&self) -> Option<&Person> {
        self.spouse.as_ref().and_then(|id| self.person(id))
    }

    /// Direct children of the deceased, in insertion order
    pub fn children(&self) -> Vec<&Person> {
        self.child_entries()
            .into_iter()
            .map(|entry| &entry.person)
            .collect()
    }

    pub fn child_entries(&self) -> Vec<&Entry> {
        self.children
            .iter()
            .filter_map(|id| self.entries.get(id))
            .collect()
    }

    pub fn parent_entry(&self, side: ParentSide) -> Option<&Entry> {
        self.parent_slot(side)
            .as_ref()
            .and_then(|id| self.entries.get(id))
    }

    pub fn grandparent_entry(&self, branch: Branch, role: GrandparentRole) -> Option<&Entry> {
        self.grandparents
            .get(&(branch, role))
            .and_then(|id| self.entries.get(id))
    }

    pub fn mother(&self) -> Option<&Person> {
        self.parent(ParentSide::Mother)
    }

    pub fn father(&self) -> Option<&Person> {
        self.parent(ParentSide::Father)
    }

    pub fn parent(&self, side: ParentSide) -> Option<&Person> {
        self.parent_slot(side).as_ref().and_then(|id| self.person(id))
    }

    pub fn grandparent(&self, branch: Branch, role: GrandparentRole) -> Option<&Person> {
        self.grandparents
            .get(&(branch, role))
            .and_then(|id| self.person(id))
    }

    pub fn grandparent_count(&self, branch: Branch) -> usize {
        self.grandparents.keys().filter(|(b, _)| *b == branch).count()
    }

    /// Uncles and aunts recorded on one branch, across both grandparents
    pub fn uncles_aunts(&self, branch: Branch) -> Vec<&Person> {
        GrandparentRole::ALL
            .iter()
            .filter_map(|role| self.grandparents.get(&(branch, *role)))
            .flat_map(|id| self.descendants_of(id))
            .filter(|entry| entry.relation == (Relation::UncleAunt { branch }))
            .map(|entry| &entry.person)
            .collect()
    }

    /// Entries attached directly beneath `id`, in insertion order
    pub fn descendants_of(&self, id: &PersonId) -> Vec<&Entry> {
        self.entries
            .get(id)
            .map(|entry| {
                entry
                    .children
                    .iter()
                    .filter_map(|child| self.entries.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_parents(&self) -> bool {
        self.mother.is_some() || self.father.is_some()
    }

    pub fn has_grandparents(&self) -> bool {
        !self.grandparents.is_empty()
    }

    /// Whether any blood relative or spouse has been recorded
    pub fn has_heirs(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every recorded person, relatives' spouses included, in no particular order
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.entries
            .values()
            .flat_map(|entry| std::iter::once(&entry.person).chain(entry.spouse.as_ref()))
    }

    /// The line of descent an entry belongs to
    pub fn lineage(&self, id: &PersonId) -> Option<Lineage> {
        let mut current = self.entries.get(id)?;
        // Bounded by the number of entries so a corrupted back reference cannot loop
        for _ in 0..=self.entries.len() {
            match (&current.parent, current.relation) {
                (None, Relation::Spouse) => return Some(Lineage::Spouse),
                (None, Relation::Child) => return Some(Lineage::Descendants),
                (None, Relation::Parent { side }) => return Some(Lineage::Parent(side)),
                (None, Relation::Grandparent { branch, .. }) => {
                    return Some(Lineage::Grandparent(branch))
                }
                (None, _) => return None,
                (Some(parent), _) => current = self.entries.get(parent)?,
            }
        }
        None
    }

    fn person(&self, id: &PersonId) -> Option<&Person> {
        self.entries.get(id).map(|entry| &entry.person)
    }

    fn entry_mut(&mut self, id: &PersonId) -> DomainResult<&mut Entry> {
        self.entries
            .get_mut(id)
            .ok_or_else(|| DomainError::PersonNotFound { id: id.to_string() })
    }

    /// Spouse of a relative, recorded on the relative's entry
    fn partner_mut(&mut self, id: &PersonId) -> Option<&mut Person> {
        let relative_id = self.partners.get(id)?;
        self.entries
            .get_mut(relative_id)
            .and_then(|entry| entry.spouse.as_mut())
    }

    fn parent_slot(&self, side: ParentSide) -> &Option<PersonId> {
        match side {
            ParentSide::Mother => &self.mother,
            ParentSide::Father => &self.father,
        }
    }

    fn parent_slot_mut(&mut self, side: ParentSide) -> &mut Option<PersonId> {
        match side {
            ParentSide::Mother => &mut self.mother,
            ParentSide::Father => &mut self.father,
        }
    }

    fn require_deceased_anchor<F>(&self, anchor_id: &PersonId, accepts: F) -> DomainResult<Lineage>
    where
        F: Fn(Lineage) -> bool,
    {
        let not_found = || DomainError::ParentNotFound {
            id: anchor_id.to_string(),
        };
        let entry = self.entries.get(anchor_id).ok_or_else(not_found)?;
        if entry.person.is_alive {
            return Err(not_found());
        }
        let lineage = self.lineage(anchor_id).ok_or_else(not_found)?;
        if !accepts(lineage) {
            return Err(not_found());
        }
        Ok(lineage)
    }

    fn ensure_new_id(&self, id: &PersonId) -> DomainResult<()> {
        if id.is_reserved() {
            return Err(DomainError::InvalidPerson {
                field: "id".to_string(),
                reason: format!("{id} is reserved"),
            });
        }
        if self.contains(id) {
            return Err(DomainError::InvalidPerson {
                field: "id".to_string(),
                reason: format!("{id} is already recorded"),
            });
        }
        Ok(())
    }

    fn insert(
        &mut self,
        person: Person,
        relation: Relation,
        parent: Option<PersonId>,
    ) -> DomainResult<PersonId> {
        self.ensure_new_id(&person.id)?;
        // Marriage metadata belongs to spouses only
        if person.marriage_info.is_some() && relation != Relation::Spouse {
            return Err(DomainError::InvalidPerson {
                field: "marriage_info".to_string(),
                reason: "Only a spouse carries marriage information".to_string(),
            });
        }

        let id = person.id.clone();
        if let Some(parent_id) = &parent {
            if let Some(parent_entry) = self.entries.get_mut(parent_id) {
                parent_entry.children.push(id.clone());
            }
        }
        debug!(id = %id, relation = ?relation, "Added relative");
        self.entries.insert(
            id.clone(),
            Entry {
                person,
                relation,
                parent,
                children: Vec::new(),
                spouse: None,
            },
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alive(name: &str) -> Person {
        Person::new(name, true).unwrap()
    }

    fn dead(name: &str) -> Person {
        Person::new(name, false).unwrap()
    }

    #[test]
    fn test_second_spouse_rejected() {
        let mut relatives = RelativeCollection::new();
        relatives.add_spouse(alive("Ayşe")).unwrap();
        assert_eq!(
            relatives.add_spouse(alive("Fatma")),
            Err(DomainError::DuplicateSpouse)
        );
        assert_eq!(relatives.spouse().unwrap().name, "Ayşe");
        assert_eq!(
            relatives.spouse().unwrap().marriage_info,
            Some(MarriageInfo::current())
        );
    }

    #[test]
    fn test_descendant_requires_deceased_child_line() {
        let mut relatives = RelativeCollection::new();
        let ali = dead("Ali");
        let ali_id = ali.id.clone();
        let can = alive("Can");
        let can_id = can.id.clone();
        relatives.add_child(ali, None).unwrap();
        relatives.add_child(can, None).unwrap();

        relatives.add_child(alive("Veli"), Some(&ali_id)).unwrap();
        assert!(matches!(
            relatives.add_child(alive("Zeynep"), Some(&can_id)),
            Err(DomainError::ParentNotFound { .. })
        ));
        assert!(matches!(
            relatives.add_child(alive("Zeynep"), Some(&PersonId::from("missing"))),
            Err(DomainError::ParentNotFound { .. })
        ));
        assert_eq!(relatives.descendants_of(&ali_id).len(), 1);
    }

    #[test]
    fn test_grandchild_cannot_hang_from_spouse() {
        let mut relatives = RelativeCollection::new();
        let spouse = dead("Ayşe");
        let spouse_id = spouse.id.clone();
        relatives.add_spouse(spouse).unwrap();
        assert!(matches!(
            relatives.add_child(alive("Veli"), Some(&spouse_id)),
            Err(DomainError::ParentNotFound { .. })
        ));
    }

    #[test]
    fn test_grandparent_capacity_checked_before_slot() {
        let mut relatives = RelativeCollection::new();
        relatives
            .add_grandparent(Branch::Maternal, GrandparentRole::Grandmother, alive("Hatice"))
            .unwrap();
        assert!(matches!(
            relatives.add_grandparent(
                Branch::Maternal,
                GrandparentRole::Grandmother,
                alive("Emine")
            ),
            Err(DomainError::SlotOccupied { .. })
        ));
        relatives
            .add_grandparent(Branch::Maternal, GrandparentRole::Grandfather, alive("Hasan"))
            .unwrap();
        assert!(matches!(
            relatives.add_grandparent(
                Branch::Maternal,
                GrandparentRole::Grandfather,
                alive("Hüseyin")
            ),
            Err(DomainError::CapacityExceeded {
                branch: Branch::Maternal,
                max: 2
            })
        ));
        assert_eq!(relatives.grandparent_count(Branch::Maternal), 2);
        assert_eq!(relatives.grandparent_count(Branch::Paternal), 0);
    }

    #[test]
    fn test_uncle_attaches_to_deceased_grandparent() {
        let mut relatives = RelativeCollection::new();
        let grandfather = dead("Osman");
        let grandfather_id = grandfather.id.clone();
        relatives
            .add_grandparent(Branch::Paternal, GrandparentRole::Grandfather, grandfather)
            .unwrap();
        let uncle = dead("Mehmet");
        let uncle_id = uncle.id.clone();
        relatives
            .add_sibling_or_cousin(&grandfather_id, uncle)
            .unwrap();
        relatives
            .add_sibling_or_cousin(&uncle_id, alive("Elif"))
            .unwrap();

        assert_eq!(
            relatives.get(&uncle_id).unwrap().relation,
            Relation::UncleAunt {
                branch: Branch::Paternal
            }
        );
        assert_eq!(relatives.uncles_aunts(Branch::Paternal).len(), 1);
        assert!(relatives.uncles_aunts(Branch::Maternal).is_empty());
        assert_eq!(
            relatives.lineage(&uncle_id),
            Some(Lineage::Grandparent(Branch::Paternal))
        );
    }

    #[test]
    fn test_cascading_remove() {
        let mut relatives = RelativeCollection::new();
        let ali = dead("Ali");
        let ali_id = ali.id.clone();
        relatives.add_child(ali, None).unwrap();
        let veli = dead("Veli");
        let veli_id = veli.id.clone();
        relatives.add_child(veli, Some(&ali_id)).unwrap();
        relatives.add_child(alive("Deniz"), Some(&veli_id)).unwrap();
        relatives.add_child(alive("Can"), None).unwrap();

        let removed = relatives.remove(&ali_id).unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(relatives.len(), 1);
        assert_eq!(relatives.children().len(), 1);
        assert!(!relatives.contains(&veli_id));
    }

    #[test]
    fn test_remove_nested_entry_detaches_from_parent() {
        let mut relatives = RelativeCollection::new();
        let father = dead("Ahmet");
        let father_id = father.id.clone();
        relatives.add_parent(ParentSide::Father, father).unwrap();
        let sibling = alive("Fatma");
        let sibling_id = sibling.id.clone();
        relatives.add_sibling_or_cousin(&father_id, sibling).unwrap();

        relatives.remove(&sibling_id).unwrap();
        assert!(relatives.descendants_of(&father_id).is_empty());
        assert!(relatives.father().is_some());
    }

    #[test]
    fn test_remove_unknown_person() {
        let mut relatives = RelativeCollection::new();
        assert!(matches!(
            relatives.remove(&PersonId::from("ghost")),
            Err(DomainError::PersonNotFound { .. })
        ));
    }

    #[test]
    fn test_set_alive_with_descendants_rejected() {
        let mut relatives = RelativeCollection::new();
        let ali = dead("Ali");
        let ali_id = ali.id.clone();
        relatives.add_child(ali, None).unwrap();
        relatives.add_child(alive("Veli"), Some(&ali_id)).unwrap();

        assert!(matches!(
            relatives.set_alive(&ali_id, true),
            Err(DomainError::LivingAncestor { .. })
        ));
        assert!(!relatives.get(&ali_id).unwrap().person.is_alive);

        relatives.rename(&ali_id, "Ali Rıza").unwrap();
        assert_eq!(relatives.get(&ali_id).unwrap().person.name, "Ali Rıza");
    }

    #[test]
    fn test_spouse_of_deceased_child() {
        let mut relatives = RelativeCollection::new();
        let ali = dead("Ali");
        let ali_id = ali.id.clone();
        relatives.add_child(ali, None).unwrap();
        let widow = alive("Selin");
        let widow_id = widow.id.clone();
        relatives.add_spouse_of(&ali_id, widow).unwrap();
        assert!(matches!(
            relatives.add_spouse_of(&ali_id, alive("Derya")),
            Err(DomainError::SlotOccupied { .. })
        ));
        assert!(relatives.contains(&widow_id));
        assert_eq!(relatives.persons().count(), 2);

        let removed = relatives.remove(&widow_id).unwrap();
        assert_eq!(removed[0].name, "Selin");
        assert!(relatives.get(&ali_id).unwrap().spouse.is_none());
        assert!(!relatives.contains(&widow_id));
    }

    #[test]
    fn test_edit_spouse_of_relative() {
        let mut relatives = RelativeCollection::new();
        let ali = dead("Ali");
        let ali_id = ali.id.clone();
        relatives.add_child(ali, None).unwrap();
        relatives.add_child(alive("Veli"), Some(&ali_id)).unwrap();
        let widow = alive("Selin");
        let widow_id = widow.id.clone();
        relatives.add_spouse_of(&ali_id, widow).unwrap();

        relatives.rename(&widow_id, "Selin Kaya").unwrap();
        relatives.set_alive(&widow_id, false).unwrap();
        let spouse = relatives.get(&ali_id).unwrap().spouse.as_ref().unwrap();
        assert_eq!(spouse.name, "Selin Kaya");
        assert!(!spouse.is_alive);

        // The relative's own descendants do not block the spouse
        relatives.set_alive(&widow_id, true).unwrap();
        assert!(relatives.get(&ali_id).unwrap().spouse.as_ref().unwrap().is_alive);
        assert!(!relatives.get(&ali_id).unwrap().person.is_alive);

        assert!(matches!(
            relatives.rename(&widow_id, "  "),
            Err(DomainError::InvalidPerson { .. })
        ));
        assert_eq!(
            relatives.get(&ali_id).unwrap().spouse.as_ref().unwrap().name,
            "Selin Kaya"
        );
    }

    #[test]
    fn test_principal_spouse_cannot_have_spouse() {
        let mut relatives = RelativeCollection::new();
        let spouse = alive("Ayşe");
        let spouse_id = spouse.id.clone();
        relatives.add_spouse(spouse).unwrap();
        assert!(matches!(
            relatives.add_spouse_of(&spouse_id, alive("Kemal")),
            Err(DomainError::InvalidPerson { .. })
        ));
    }

    #[test]
    fn test_marriage_info_only_on_spouses() {
        let mut relatives = RelativeCollection::new();
        let married_child = alive("Can").with_marriage(1, true).unwrap();
        assert!(matches!(
            relatives.add_child(married_child, None),
            Err(DomainError::InvalidPerson { ref field, .. }) if field == "marriage_info"
        ));
        assert!(relatives.is_empty());

        let married_parent = alive("Emine").with_marriage(1, true).unwrap();
        assert!(relatives.add_parent(ParentSide::Mother, married_parent).is_err());
        assert!(relatives.mother().is_none());

        let ali = dead("Ali");
        let ali_id = ali.id.clone();
        relatives.add_child(ali, None).unwrap();
        let second_wife = alive("Selin").with_marriage(2, true).unwrap();
        relatives.add_spouse_of(&ali_id, second_wife).unwrap();
        relatives
            .add_spouse(alive("Ayşe").with_marriage(2, false).unwrap())
            .unwrap();
        assert_eq!(relatives.spouse().unwrap().marriage_info.unwrap().order, 2);
    }

    #[test]
    fn test_reserved_and_duplicate_ids_rejected() {
        let mut relatives = RelativeCollection::new();
        let reserved = Person::with_id(PersonId::from("deceased"), "Ghost", true).unwrap();
        assert!(matches!(
            relatives.add_child(reserved, None),
            Err(DomainError::InvalidPerson { .. })
        ));

        let can = alive("Can");
        relatives.add_child(can.clone(), None).unwrap();
        assert!(matches!(
            relatives.add_child(can, None),
            Err(DomainError::InvalidPerson { .. })
        ));
        assert_eq!(relatives.len(), 1);
    }
}
