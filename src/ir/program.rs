//! The analyzed program and its builder.
//!
//! [`Program`] bundles the class hierarchy, the method table, and the
//! designated entry methods. Hosts construct it through
//! [`ProgramBuilder`], the narrow interface behind which IR construction
//! lives; once built, everything except the result maps is immutable.

use crate::{
    ir::{
        Class, ClassFlags, ClassHierarchy, ClassId, Method, MethodBody, MethodFlags, MethodId,
        ResultMap, Subsignature,
    },
    Error, Result,
};

/// The complete analyzed program.
#[derive(Debug)]
pub struct Program {
    /// The class hierarchy.
    hierarchy: ClassHierarchy,
    /// All methods, indexed by [`MethodId`].
    methods: Vec<Method>,
    /// Entry methods anchoring call-graph reachability.
    entries: Vec<MethodId>,
    /// Program-level analysis results (call graph, interprocedural
    /// facts).
    results: ResultMap,
}

impl Program {
    /// Returns the class hierarchy.
    #[must_use]
    pub const fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    /// Returns the method with the given ID, if it exists.
    #[must_use]
    pub fn method(&self, id: MethodId) -> Option<&Method> {
        self.methods.get(id.index())
    }

    /// Returns the body of the given method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MethodNotFound`] for an unknown ID and
    /// [`Error::MissingBody`] for an abstract method.
    pub fn body_of(&self, id: MethodId) -> Result<&MethodBody> {
        self.method(id)
            .ok_or(Error::MethodNotFound(id))?
            .body()
            .ok_or(Error::MissingBody(id))
    }

    /// Returns the number of methods.
    #[must_use]
    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Returns an iterator over all methods.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.methods.iter()
    }

    /// Returns the entry methods.
    #[must_use]
    pub fn entries(&self) -> &[MethodId] {
        &self.entries
    }

    /// Returns the program-level analysis result map.
    #[must_use]
    pub fn results(&self) -> &ResultMap {
        &self.results
    }
}

/// Builder assembling a [`Program`] from classes and methods.
///
/// This is the constructor API hosts (IR builders, class-hierarchy
/// loaders, and tests) use. IDs are handed out sequentially; declared
/// methods are wired into their classes when [`build`](Self::build) runs.
///
/// # Examples
///
/// ```rust
/// use flowscope::ir::{ClassFlags, IrType, MethodBody, MethodFlags, ProgramBuilder, Subsignature};
///
/// let mut builder = ProgramBuilder::new();
/// let object = builder.add_class("Object", None, Vec::new(), ClassFlags::empty());
/// let main_sig = Subsignature::new("main", Vec::new(), IrType::Void);
/// let main = builder.add_method(
///     object,
///     main_sig,
///     MethodFlags::STATIC,
///     Some(MethodBody::new(Vec::new(), Vec::new(), Vec::new())),
/// );
/// builder.add_entry(main);
/// let program = builder.build().unwrap();
/// assert_eq!(program.entries(), &[main]);
/// ```
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    classes: Vec<Class>,
    methods: Vec<Method>,
    entries: Vec<MethodId>,
}

impl ProgramBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class and returns its ID.
    pub fn add_class(
        &mut self,
        name: impl Into<String>,
        superclass: Option<ClassId>,
        interfaces: Vec<ClassId>,
        flags: ClassFlags,
    ) -> ClassId {
        let id = ClassId::new(self.classes.len());
        self.classes
            .push(Class::new(id, name.into(), superclass, interfaces, flags));
        id
    }

    /// Adds a method declared by `class` and returns its ID.
    ///
    /// Abstract methods pass `None` for the body.
    pub fn add_method(
        &mut self,
        class: ClassId,
        subsig: Subsignature,
        flags: MethodFlags,
        body: Option<MethodBody>,
    ) -> MethodId {
        let id = MethodId::new(self.methods.len());
        self.methods
            .push(Method::new(id, class, subsig, flags, body));
        id
    }

    /// Designates an entry method for call-graph reachability.
    pub fn add_entry(&mut self, method: MethodId) {
        self.entries.push(method);
    }

    /// Finalizes the program, wiring declared-method tables and the
    /// hierarchy's reverse indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClassNotFound`] if a method references an unknown
    /// class, and [`Error::MethodNotFound`] if an entry ID is unknown.
    pub fn build(mut self) -> Result<Program> {
        for method in &self.methods {
            let class = self
                .classes
                .get_mut(method.class().index())
                .ok_or(Error::ClassNotFound(method.class()))?;
            class.declare_method(method.subsig().clone(), method.id());
        }

        for &entry in &self.entries {
            if entry.index() >= self.methods.len() {
                return Err(Error::MethodNotFound(entry));
            }
        }

        Ok(Program {
            hierarchy: ClassHierarchy::new(self.classes),
            methods: self.methods,
            entries: self.entries,
            results: ResultMap::new(),
        })
    }
}
