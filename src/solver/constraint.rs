use std::fmt;

use crate::solver::{
    constraints::{
        all_different::AllDifferent,
        counted_set::CountedSet,
        dictionary_word::DictionaryWord,
        equality::Equality,
        fixed_set::FixedSet,
        run_length::RunLength,
        slither::{BoxCount, SingleLoop, VertexDegree},
    },
    problem::GroupScope,
};

/// A human-readable description of a constraint, used when rendering
/// search statistics.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// The capability every constraint implements.
///
/// A checker is attached to exactly one group and sees that group's
/// members through a [`GroupScope`], addressed by position in the group's
/// ordered member list. All side effects are `restrict*` calls on the
/// scope; a checker never touches decisions outside its own group.
///
/// `init` runs once, when the group is added to the problem, and is the
/// only place a checker may mutate its own state (for example caching the
/// domain size) or apply unconditional restrictions. `apply` runs on every
/// propagation round in which at least one member changed; `dirty` lists
/// the positions of the members that changed since the previous round.
/// Returning `false` signals a local contradiction and abandons the
/// current search branch.
pub trait ConstraintChecker: fmt::Debug {
    fn init(&mut self, _scope: &mut GroupScope<'_>) {}

    fn apply(&self, scope: &mut GroupScope<'_>, dirty: &[usize]) -> bool;

    fn descriptor(&self) -> ConstraintDescriptor;
}

/// The closed set of built-in checkers, plus an escape hatch for
/// user-supplied ones.
///
/// Keeping the built-ins in an enum lets the propagation loop dispatch
/// without a heap allocation per group in the common case; anything not
/// covered here goes through `Custom`.
#[derive(Debug)]
pub enum Checker {
    AllDifferent(AllDifferent),
    Equality(Equality),
    FixedSet(FixedSet),
    CountedSet(CountedSet),
    DictionaryWord(DictionaryWord),
    RunLength(RunLength),
    VertexDegree(VertexDegree),
    BoxCount(BoxCount),
    SingleLoop(SingleLoop),
    Custom(Box<dyn ConstraintChecker>),
}

impl ConstraintChecker for Checker {
    fn init(&mut self, scope: &mut GroupScope<'_>) {
        match self {
            Checker::AllDifferent(c) => c.init(scope),
            Checker::Equality(c) => c.init(scope),
            Checker::FixedSet(c) => c.init(scope),
            Checker::CountedSet(c) => c.init(scope),
            Checker::DictionaryWord(c) => c.init(scope),
            Checker::RunLength(c) => c.init(scope),
            Checker::VertexDegree(c) => c.init(scope),
            Checker::BoxCount(c) => c.init(scope),
            Checker::SingleLoop(c) => c.init(scope),
            Checker::Custom(c) => c.init(scope),
        }
    }

    fn apply(&self, scope: &mut GroupScope<'_>, dirty: &[usize]) -> bool {
        match self {
            Checker::AllDifferent(c) => c.apply(scope, dirty),
            Checker::Equality(c) => c.apply(scope, dirty),
            Checker::FixedSet(c) => c.apply(scope, dirty),
            Checker::CountedSet(c) => c.apply(scope, dirty),
            Checker::DictionaryWord(c) => c.apply(scope, dirty),
            Checker::RunLength(c) => c.apply(scope, dirty),
            Checker::VertexDegree(c) => c.apply(scope, dirty),
            Checker::BoxCount(c) => c.apply(scope, dirty),
            Checker::SingleLoop(c) => c.apply(scope, dirty),
            Checker::Custom(c) => c.apply(scope, dirty),
        }
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        match self {
            Checker::AllDifferent(c) => c.descriptor(),
            Checker::Equality(c) => c.descriptor(),
            Checker::FixedSet(c) => c.descriptor(),
            Checker::CountedSet(c) => c.descriptor(),
            Checker::DictionaryWord(c) => c.descriptor(),
            Checker::RunLength(c) => c.descriptor(),
            Checker::VertexDegree(c) => c.descriptor(),
            Checker::BoxCount(c) => c.descriptor(),
            Checker::SingleLoop(c) => c.descriptor(),
            Checker::Custom(c) => c.descriptor(),
        }
    }
}

impl From<AllDifferent> for Checker {
    fn from(c: AllDifferent) -> Self {
        Checker::AllDifferent(c)
    }
}

impl From<Equality> for Checker {
    fn from(c: Equality) -> Self {
        Checker::Equality(c)
    }
}

impl From<FixedSet> for Checker {
    fn from(c: FixedSet) -> Self {
        Checker::FixedSet(c)
    }
}

impl From<CountedSet> for Checker {
    fn from(c: CountedSet) -> Self {
        Checker::CountedSet(c)
    }
}

impl From<DictionaryWord> for Checker {
    fn from(c: DictionaryWord) -> Self {
        Checker::DictionaryWord(c)
    }
}

impl From<RunLength> for Checker {
    fn from(c: RunLength) -> Self {
        Checker::RunLength(c)
    }
}

impl From<VertexDegree> for Checker {
    fn from(c: VertexDegree) -> Self {
        Checker::VertexDegree(c)
    }
}

impl From<BoxCount> for Checker {
    fn from(c: BoxCount) -> Self {
        Checker::BoxCount(c)
    }
}

impl From<SingleLoop> for Checker {
    fn from(c: SingleLoop) -> Self {
        Checker::SingleLoop(c)
    }
}

impl From<Box<dyn ConstraintChecker>> for Checker {
    fn from(c: Box<dyn ConstraintChecker>) -> Self {
        Checker::Custom(c)
    }
}
