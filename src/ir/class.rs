//! Classes and the class hierarchy.
//!
//! The hierarchy is the read-only substrate of CHA: it answers subclass,
//! subinterface, and implementor queries, and maps subsignatures to
//! declared methods. All reverse indices are precomputed when the program
//! is built, so every query is O(1) or proportional to its answer.

use bitflags::bitflags;
use rustc_hash::FxHashMap;

use crate::ir::{MethodId, Subsignature};
use crate::macros::index_type;

index_type! {
    /// A strongly-typed identifier for classes within a hierarchy.
    ClassId, "c"
}

bitflags! {
    /// Class attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClassFlags: u8 {
        /// The class cannot be instantiated.
        const ABSTRACT = 1 << 0;
        /// The type is an interface.
        const INTERFACE = 1 << 1;
        /// The class cannot be subclassed.
        const FINAL = 1 << 2;
    }
}

/// A class or interface of the analyzed program.
#[derive(Debug)]
pub struct Class {
    /// This class's identifier.
    id: ClassId,
    /// Fully qualified name.
    name: String,
    /// Direct superclass; `None` for the root class and for interfaces
    /// without one.
    superclass: Option<ClassId>,
    /// Directly implemented interfaces (for classes) or directly extended
    /// interfaces (for interfaces).
    interfaces: Vec<ClassId>,
    /// Attribute flags.
    flags: ClassFlags,
    /// Declared methods, keyed by subsignature.
    declared: FxHashMap<Subsignature, MethodId>,
}

impl Class {
    pub(crate) fn new(
        id: ClassId,
        name: String,
        superclass: Option<ClassId>,
        interfaces: Vec<ClassId>,
        flags: ClassFlags,
    ) -> Self {
        Self {
            id,
            name,
            superclass,
            interfaces,
            flags,
            declared: FxHashMap::default(),
        }
    }

    pub(crate) fn declare_method(&mut self, subsig: Subsignature, method: MethodId) {
        self.declared.insert(subsig, method);
    }

    /// Returns this class's identifier.
    #[must_use]
    pub const fn id(&self) -> ClassId {
        self.id
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the direct superclass, if any.
    #[must_use]
    pub const fn superclass(&self) -> Option<ClassId> {
        self.superclass
    }

    /// Returns the directly implemented (or extended) interfaces.
    #[must_use]
    pub fn interfaces(&self) -> &[ClassId] {
        &self.interfaces
    }

    /// Returns `true` if this type is an interface.
    #[must_use]
    pub const fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    /// Returns `true` if this class is abstract.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.flags.contains(ClassFlags::ABSTRACT)
    }

    /// Returns the method this class declares with the given
    /// subsignature, if any. Inherited methods are not consulted; that is
    /// what dispatch is for.
    #[must_use]
    pub fn declared_method(&self, subsig: &Subsignature) -> Option<MethodId> {
        self.declared.get(subsig).copied()
    }
}

/// The class hierarchy of the analyzed program.
///
/// Immutable after construction. The reverse indices (subclasses,
/// subinterfaces, implementors) are derived from the forward declarations
/// in a single pass when the program is built.
#[derive(Debug)]
pub struct ClassHierarchy {
    /// All classes, indexed by [`ClassId`].
    classes: Vec<Class>,
    /// Direct subclasses per class.
    subclasses: Vec<Vec<ClassId>>,
    /// Direct subinterfaces per interface.
    subinterfaces: Vec<Vec<ClassId>>,
    /// Direct implementors per interface.
    implementors: Vec<Vec<ClassId>>,
}

impl ClassHierarchy {
    /// Builds the hierarchy from a complete class list, computing the
    /// reverse indices.
    pub(crate) fn new(classes: Vec<Class>) -> Self {
        let n = classes.len();
        let mut subclasses = vec![Vec::new(); n];
        let mut subinterfaces = vec![Vec::new(); n];
        let mut implementors = vec![Vec::new(); n];

        for class in &classes {
            if let Some(sup) = class.superclass {
                subclasses[sup.index()].push(class.id);
            }
            for &iface in &class.interfaces {
                if class.is_interface() {
                    subinterfaces[iface.index()].push(class.id);
                } else {
                    implementors[iface.index()].push(class.id);
                }
            }
        }

        Self {
            classes,
            subclasses,
            subinterfaces,
            implementors,
        }
    }

    /// Returns the class with the given ID, if it exists.
    #[must_use]
    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.index())
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns an iterator over all classes.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.iter()
    }

    /// Returns the direct subclasses of a class.
    #[must_use]
    pub fn direct_subclasses_of(&self, class: ClassId) -> &[ClassId] {
        self.subclasses
            .get(class.index())
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the direct subinterfaces of an interface.
    #[must_use]
    pub fn direct_subinterfaces_of(&self, iface: ClassId) -> &[ClassId] {
        self.subinterfaces
            .get(iface.index())
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the direct implementors of an interface.
    #[must_use]
    pub fn direct_implementors_of(&self, iface: ClassId) -> &[ClassId] {
        self.implementors
            .get(iface.index())
            .map_or(&[], Vec::as_slice)
    }

    /// Returns the superclass of a class, if any.
    #[must_use]
    pub fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        self.class(class).and_then(Class::superclass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: usize, name: &str, superclass: Option<usize>, flags: ClassFlags) -> Class {
        Class::new(
            ClassId::new(id),
            name.to_string(),
            superclass.map(ClassId::new),
            Vec::new(),
            flags,
        )
    }

    #[test]
    fn test_hierarchy_reverse_indices() {
        // Object <- A <- B
        let classes = vec![
            class(0, "Object", None, ClassFlags::empty()),
            class(1, "A", Some(0), ClassFlags::empty()),
            class(2, "B", Some(1), ClassFlags::empty()),
        ];
        let hierarchy = ClassHierarchy::new(classes);

        assert_eq!(hierarchy.direct_subclasses_of(ClassId::new(0)), &[ClassId::new(1)]);
        assert_eq!(hierarchy.direct_subclasses_of(ClassId::new(1)), &[ClassId::new(2)]);
        assert!(hierarchy.direct_subclasses_of(ClassId::new(2)).is_empty());
        assert_eq!(hierarchy.superclass_of(ClassId::new(2)), Some(ClassId::new(1)));
    }

    #[test]
    fn test_hierarchy_interfaces() {
        // interface I; interface J extends I; class C implements I
        let i = class(0, "I", None, ClassFlags::INTERFACE);
        let mut j = class(1, "J", None, ClassFlags::INTERFACE);
        j.interfaces.push(ClassId::new(0));
        let mut c = class(2, "C", None, ClassFlags::empty());
        c.interfaces.push(ClassId::new(0));

        let hierarchy = ClassHierarchy::new(vec![i, j, c]);
        assert_eq!(
            hierarchy.direct_subinterfaces_of(ClassId::new(0)),
            &[ClassId::new(1)]
        );
        assert_eq!(
            hierarchy.direct_implementors_of(ClassId::new(0)),
            &[ClassId::new(2)]
        );
    }
}
